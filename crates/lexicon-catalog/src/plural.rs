//! The two-form plural rules found in `Plural-Forms` headers.

use tracing::warn;

/// Plural selection for catalogs declaring `nplurals=2`.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum PluralRule {
    /// `plural=(n != 1)`: English, German, Spanish, ...
    #[default]
    NotOne,
    /// `plural=(n > 1)`: French, Brazilian Portuguese, ...
    GreaterThanOne,
}

impl PluralRule {
    /// Number of plural forms every supported rule declares.
    pub const NPLURALS: usize = 2;

    /// Parse a `Plural-Forms` header value such as
    /// `nplurals=2; plural=(n > 1);`.
    ///
    /// Unsupported rules are logged and treated as [`PluralRule::NotOne`].
    pub fn from_header(value: &str) -> Self {
        let mut nplurals = None;
        let mut expr = None;
        for part in value.split(';') {
            let Some((key, val)) = part.split_once('=') else {
                continue;
            };
            match key.trim() {
                "nplurals" => nplurals = val.trim().parse::<usize>().ok(),
                "plural" => {
                    let compact: String = val.chars().filter(|c| !c.is_whitespace()).collect();
                    expr = Some(strip_parens(&compact).to_string());
                }
                _ => {}
            }
        }

        match (nplurals, expr.as_deref()) {
            (Some(2), Some("n!=1")) => Self::NotOne,
            (Some(2), Some("n>1")) => Self::GreaterThanOne,
            _ => {
                warn!("unsupported Plural-Forms '{value}', using plural=(n != 1)");
                Self::NotOne
            }
        }
    }

    /// Index of the `msgstr[i]` form to use for count `n`.
    pub fn index(&self, n: u64) -> usize {
        let plural = match self {
            Self::NotOne => n != 1,
            Self::GreaterThanOne => n > 1,
        };
        usize::from(plural)
    }

    /// Header value that reproduces this rule.
    pub fn header_value(&self) -> &'static str {
        match self {
            Self::NotOne => "nplurals=2; plural=(n != 1);",
            Self::GreaterThanOne => "nplurals=2; plural=(n > 1);",
        }
    }
}

fn strip_parens(mut expr: &str) -> &str {
    while let Some(inner) = expr.strip_prefix('(').and_then(|e| e.strip_suffix(')')) {
        expr = inner;
    }
    expr
}
