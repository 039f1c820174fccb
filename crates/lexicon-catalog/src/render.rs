//! Positional `{}` substitution.
//!
//! Placeholders are filled strictly left to right. `{{` and `}}` stand for
//! literal braces; any other brace text is copied through untouched.

use lexicon_core::error::LexiconError;

enum Piece<'a> {
    Text(&'a str),
    Placeholder,
}

fn pieces(template: &str) -> Vec<Piece<'_>> {
    let bytes = template.as_bytes();
    let mut out = Vec::new();
    let mut start = 0;
    let mut i = 0;
    while i < bytes.len() {
        match (bytes[i], bytes.get(i + 1)) {
            (b'{', Some(b'{')) | (b'}', Some(b'}')) => {
                // Keep text up to and including the first brace of the pair.
                out.push(Piece::Text(&template[start..=i]));
                i += 2;
                start = i;
            }
            (b'{', Some(b'}')) => {
                if start < i {
                    out.push(Piece::Text(&template[start..i]));
                }
                out.push(Piece::Placeholder);
                i += 2;
                start = i;
            }
            _ => i += 1,
        }
    }
    if start < bytes.len() {
        out.push(Piece::Text(&template[start..]));
    }
    out
}

/// Number of `{}` placeholders in `template`.
pub fn placeholder_count(template: &str) -> usize {
    pieces(template)
        .iter()
        .filter(|p| matches!(p, Piece::Placeholder))
        .count()
}

/// Substitute `args` into the `{}` placeholders of `template`.
///
/// Fails with [`LexiconError::ArgumentCount`] unless there is exactly one
/// argument per placeholder.
pub fn render<S: AsRef<str>>(template: &str, args: &[S]) -> Result<String, LexiconError> {
    let pieces = pieces(template);
    let expected = pieces
        .iter()
        .filter(|p| matches!(p, Piece::Placeholder))
        .count();
    if expected != args.len() {
        return Err(LexiconError::ArgumentCount {
            expected,
            given: args.len(),
        });
    }

    let extra: usize = args.iter().map(|a| a.as_ref().len()).sum();
    let mut out = String::with_capacity(template.len() + extra);
    let mut args = args.iter();
    for piece in pieces {
        match piece {
            Piece::Text(text) => out.push_str(text),
            Piece::Placeholder => {
                if let Some(arg) = args.next() {
                    out.push_str(arg.as_ref());
                }
            }
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_placeholder() {
        assert_eq!(
            render("{} is shutting down.", &["Server1"]).unwrap(),
            "Server1 is shutting down."
        );
    }

    #[test]
    fn test_left_to_right_order() {
        assert_eq!(
            render("Sincronizando {} de {}", &["3", "10"]).unwrap(),
            "Sincronizando 3 de 10"
        );
    }

    #[test]
    fn test_no_placeholders_no_args() {
        let args: [&str; 0] = [];
        assert_eq!(render("Emby", &args).unwrap(), "Emby");
    }

    #[test]
    fn test_too_few_arguments() {
        let err = render("{} and {}", &["one"]).unwrap_err();
        assert!(matches!(
            err,
            LexiconError::ArgumentCount {
                expected: 2,
                given: 1
            }
        ));
    }

    #[test]
    fn test_too_many_arguments() {
        let err = render("plain", &["extra"]).unwrap_err();
        assert!(matches!(
            err,
            LexiconError::ArgumentCount {
                expected: 0,
                given: 1
            }
        ));
    }

    #[test]
    fn test_escaped_braces() {
        assert_eq!(render("{{}} {}", &["x"]).unwrap(), "{} x");
        assert_eq!(placeholder_count("{{}}"), 0);
    }

    #[test]
    fn test_other_brace_text_is_literal() {
        assert_eq!(placeholder_count("{name} {0} {"), 0);
        let args: [&str; 0] = [];
        assert_eq!(render("{name} {0} {", &args).unwrap(), "{name} {0} {");
    }

    #[test]
    fn test_markup_is_untouched() {
        assert_eq!(
            render("[COLOR red]{}[/COLOR]", &["PIN"]).unwrap(),
            "[COLOR red]PIN[/COLOR]"
        );
    }

    #[test]
    fn test_owned_arguments() {
        let args = vec![String::from("1234")];
        assert_eq!(render("PIN: {}", &args).unwrap(), "PIN: 1234");
    }

    #[test]
    fn test_multibyte_text_around_placeholders() {
        assert_eq!(
            render("Conexão com {} concluída", &["Emby"]).unwrap(),
            "Conexão com Emby concluída"
        );
    }
}
