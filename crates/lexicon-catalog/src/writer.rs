//! PO writer. Output parses back to the same catalog.

use std::fmt::Write as _;

use crate::catalog::{Catalog, CatalogEntry};

/// Escape `text` for use inside a quoted PO string.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            _ => out.push(c),
        }
    }
    out
}

impl Catalog {
    /// Serialize to PO text: preamble, header, then entries in
    /// declaration order. A `Language` field is added when the header
    /// lacks one, so the output always reloads.
    pub fn to_po(&self) -> String {
        let mut out = String::new();
        for line in &self.header().preamble {
            out.push_str(line);
            out.push('\n');
        }

        out.push_str("msgid \"\"\nmsgstr \"\"\n");
        for (key, value) in &self.header().fields {
            let _ = writeln!(out, "\"{}\\n\"", escape(&format!("{key}: {value}")));
        }
        if self.header().get("Language").is_none() {
            let _ = writeln!(out, "\"Language: {}\\n\"", escape(self.locale()));
        }

        for entry in self.entries() {
            out.push('\n');
            write_entry(&mut out, entry);
        }
        out
    }
}

fn write_entry(out: &mut String, entry: &CatalogEntry) {
    if let Some(comment) = &entry.comment {
        for line in comment.lines() {
            let _ = writeln!(out, "#. {line}");
        }
    }
    let _ = writeln!(out, "msgctxt \"{}\"", entry.id.context());
    let _ = writeln!(out, "msgid \"{}\"", escape(&entry.source));
    match &entry.plural {
        Some(plural) => {
            let _ = writeln!(out, "msgid_plural \"{}\"", escape(&plural.source));
            for (i, form) in plural.forms.iter().enumerate() {
                let _ = writeln!(out, "msgstr[{i}] \"{}\"", escape(form));
            }
        }
        None => {
            let _ = writeln!(out, "msgstr \"{}\"", escape(&entry.template));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape() {
        assert_eq!(escape("a \"b\"\n\\c\t"), "a \\\"b\\\"\\n\\\\c\\t");
    }

    #[test]
    fn test_writes_header_and_entry() {
        let po = "# preamble\nmsgid \"\"\nmsgstr \"\"\n\"Language: pt_BR\\n\"\n\n\
                  #. note\nmsgctxt \"#32070\"\nmsgid \"{} is shutting down.\"\nmsgstr \"{} está sendo desligado.\"\n";
        let catalog = Catalog::parse(po).unwrap();
        assert_eq!(catalog.to_po(), po);
    }

    #[test]
    fn test_round_trip_preserves_mapping() {
        let po = r##"# header comment
msgid ""
msgstr ""
"Language: pt_BR\n"
"Plural-Forms: nplurals=2; plural=(n > 1);\n"

#. two lines
#. of notes
msgctxt "#3"
msgid ""
"Multi\n"
"line \"quoted\""
msgstr "Várias\nlinhas \\ \"citadas\""

msgctxt "#1"
msgid "Untranslated"
msgstr ""
msgctxt "#2"
msgid "{} file"
msgid_plural "{} files"
msgstr[0] "{} arquivo"
msgstr[1] "{} arquivos"
"##;
        let first = Catalog::parse(po).unwrap();
        let second = Catalog::parse(&first.to_po()).unwrap();

        assert_eq!(first.locale(), second.locale());
        assert_eq!(first.header(), second.header());
        assert_eq!(first.entries(), second.entries());
        assert_eq!(second.plural_rule(), first.plural_rule());
        assert_eq!(second.to_po(), first.to_po());
    }

    #[test]
    fn test_round_trip_without_language_header() {
        let po = "msgid \"\"\nmsgstr \"\"\n\"MIME-Version: 1.0\\n\"\n\n\
                  msgctxt \"#32000\"\nmsgid \"Emby\"\nmsgstr \"Emby\"\n";
        let first = Catalog::parse_with_locale(po, "pt_br").unwrap();
        let written = first.to_po();
        assert!(written.contains("\"Language: pt_br\\n\""), "{written}");

        let second = Catalog::parse(&written).unwrap();
        assert_eq!(second.locale(), "pt_br");
        assert_eq!(first.entries(), second.entries());
        assert_eq!(second.to_po(), written);
    }

    #[test]
    fn test_every_declared_id_looks_up_its_template() {
        let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("../../resources/language/resource.language.pt_br/strings.po");
        let text = std::fs::read_to_string(path).unwrap();
        let catalog = Catalog::parse(&text).unwrap();
        let reloaded = Catalog::parse(&catalog.to_po()).unwrap();

        for entry in catalog.entries() {
            assert_eq!(catalog.lookup(entry.id).unwrap(), entry.text());
            assert_eq!(reloaded.lookup(entry.id).unwrap(), entry.text());
        }
        assert_eq!(catalog.entries(), reloaded.entries());
    }
}
