//! PO reader.
//!
//! Accepts the subset of gettext PO that add-on catalogs use: a leading
//! comment block, a `msgid ""` header entry, then blocks of
//! `msgctxt "#<id>"` / `msgid` / `msgstr` (or `msgid_plural` with
//! `msgstr[n]`), each optionally preceded by `#.` notes. Quoted
//! continuation lines are concatenated onto the preceding keyword.

use std::collections::HashMap;

use lexicon_core::error::LexiconError;
use tracing::debug;

use crate::catalog::{Catalog, CatalogEntry, Header, MessageId, PluralForms};
use crate::plural::PluralRule;


/// The field a continuation line appends to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Context,
    Source,
    SourcePlural,
    Translation,
    Form(usize),
}

/// An entry block being accumulated.
#[derive(Debug, Default)]
struct Pending {
    start_line: usize,
    comments: Vec<String>,
    context: Option<String>,
    source: Option<String>,
    source_plural: Option<String>,
    translation: Option<String>,
    forms: Vec<(usize, String)>,
    last: Option<Field>,
}

impl Pending {
    fn has_keywords(&self) -> bool {
        self.context.is_some() || self.source.is_some()
    }

    fn has_translation(&self) -> bool {
        self.translation.is_some() || !self.forms.is_empty()
    }

    fn field_mut(&mut self, field: Field) -> Option<&mut String> {
        match field {
            Field::Context => self.context.as_mut(),
            Field::Source => self.source.as_mut(),
            Field::SourcePlural => self.source_plural.as_mut(),
            Field::Translation => self.translation.as_mut(),
            Field::Form(i) => self
                .forms
                .iter_mut()
                .find(|(idx, _)| *idx == i)
                .map(|(_, s)| s),
        }
    }
}

#[derive(Debug, Default)]
struct Reader {
    header: Option<Header>,
    preamble: Vec<String>,
    entries: Vec<CatalogEntry>,
    seen: HashMap<MessageId, usize>,
    pending: Pending,
}

/// How the catalog locale is chosen.
#[derive(Debug, Clone, Copy)]
pub(crate) enum LocaleSource<'a> {
    /// The `Language` header field, which must be present.
    Header,
    /// The `Language` header field, else this tag.
    HeaderOr(&'a str),
    /// This tag, whatever the header says.
    Explicit(&'a str),
}

/// Parse PO `text`, taking its locale from `source`.
pub(crate) fn parse(text: &str, source: LocaleSource<'_>) -> Result<Catalog, LexiconError> {
    let mut reader = Reader::default();
    let mut last_line = 0;
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);

    for (idx, raw) in text.lines().enumerate() {
        let line_no = idx + 1;
        last_line = line_no;
        reader.line(line_no, raw.trim())?;
    }
    reader.flush(last_line)?;

    let Some(mut header) = reader.header else {
        return Err(LexiconError::parse(
            last_line.max(1),
            "invalid header: missing msgid \"\" header entry",
        ));
    };
    header.preamble = reader.preamble;

    let declared = header
        .get("Language")
        .filter(|l| !l.trim().is_empty())
        .map(str::to_string);
    let locale = match (source, declared) {
        (LocaleSource::Explicit(tag), _) => tag.to_string(),
        (_, Some(declared)) => declared,
        (LocaleSource::HeaderOr(tag), None) => tag.to_string(),
        (LocaleSource::Header, None) => {
            return Err(LexiconError::parse(
                1,
                "invalid header: missing Language field",
            ))
        }
    };

    let catalog = Catalog::from_parts(&locale, header, reader.entries)?;
    debug!(
        "parsed catalog '{}' with {} entries",
        catalog.locale(),
        catalog.len()
    );
    Ok(catalog)
}

impl Reader {
    fn line(&mut self, line_no: usize, line: &str) -> Result<(), LexiconError> {
        // Blank lines only separate entries; inside an entry they are ignored.
        if line.is_empty() {
            if self.pending.has_translation() {
                self.flush(line_no)?;
            }
            return Ok(());
        }

        if let Some(comment) = line.strip_prefix('#') {
            return self.comment(line_no, line, comment);
        }

        if line.starts_with('"') {
            let value = unquote(line_no, line)?;
            let Some(field) = self.pending.last else {
                return Err(LexiconError::parse(
                    line_no,
                    "string continuation without a keyword",
                ));
            };
            if let Some(target) = self.pending.field_mut(field) {
                target.push_str(&value);
            }
            return Ok(());
        }

        let (keyword, rest) = line
            .split_once(|c: char| c.is_whitespace())
            .ok_or_else(|| LexiconError::parse(line_no, format!("unexpected line: {line}")))?;
        let value = unquote(line_no, rest)?;
        self.keyword(line_no, keyword, value)
    }

    fn comment(&mut self, line_no: usize, raw: &str, body: &str) -> Result<(), LexiconError> {
        if self.pending.has_translation() {
            self.flush(line_no)?;
        } else if self.pending.has_keywords() {
            return Err(LexiconError::parse(
                line_no,
                "unterminated entry: comment before msgstr",
            ));
        }

        if self.header.is_none() && self.pending.comments.is_empty() && !body.starts_with('.') {
            self.preamble.push(raw.to_string());
            return Ok(());
        }

        if self.pending.comments.is_empty() {
            self.pending.start_line = line_no;
        }
        if let Some(note) = body.strip_prefix('.') {
            let note = note.strip_prefix(' ').unwrap_or(note);
            self.pending.comments.push(note.to_string());
        }
        Ok(())
    }

    fn keyword(&mut self, line_no: usize, keyword: &str, value: String) -> Result<(), LexiconError> {
        let starts_entry = matches!(keyword, "msgctxt" | "msgid");
        if starts_entry && self.pending.has_translation() {
            self.flush(line_no)?;
        }
        if starts_entry && !self.pending.has_keywords() && self.pending.comments.is_empty() {
            self.pending.start_line = line_no;
        }

        let pending = &mut self.pending;
        let field = match keyword {
            "msgctxt" => {
                if pending.has_keywords() {
                    return Err(unterminated(line_no, "msgctxt"));
                }
                pending.context = Some(value);
                Field::Context
            }
            "msgid" => {
                if pending.source.is_some() {
                    return Err(unterminated(line_no, "msgid"));
                }
                pending.source = Some(value);
                Field::Source
            }
            "msgid_plural" => {
                if pending.source.is_none() || pending.source_plural.is_some() {
                    return Err(LexiconError::parse(line_no, "misplaced msgid_plural"));
                }
                pending.source_plural = Some(value);
                Field::SourcePlural
            }
            "msgstr" => {
                if pending.source.is_none() {
                    return Err(LexiconError::parse(line_no, "msgstr without msgid"));
                }
                if pending.source_plural.is_some() {
                    return Err(LexiconError::parse(
                        line_no,
                        "plural entry needs msgstr[n] forms",
                    ));
                }
                if pending.translation.is_some() {
                    return Err(LexiconError::parse(line_no, "duplicate msgstr"));
                }
                pending.translation = Some(value);
                Field::Translation
            }
            other => {
                let index = other
                    .strip_prefix("msgstr[")
                    .and_then(|r| r.strip_suffix(']'))
                    .and_then(|n| n.parse::<usize>().ok())
                    .ok_or_else(|| {
                        LexiconError::parse(line_no, format!("unknown keyword '{other}'"))
                    })?;
                if pending.source_plural.is_none() {
                    return Err(LexiconError::parse(
                        line_no,
                        "msgstr[n] without msgid_plural",
                    ));
                }
                if index >= PluralRule::NPLURALS {
                    return Err(LexiconError::parse(
                        line_no,
                        format!("plural index {index} out of range"),
                    ));
                }
                if pending.forms.iter().any(|(i, _)| *i == index) {
                    return Err(LexiconError::parse(
                        line_no,
                        format!("duplicate msgstr[{index}]"),
                    ));
                }
                pending.forms.push((index, value));
                Field::Form(index)
            }
        };
        pending.last = Some(field);
        Ok(())
    }

    /// Close the pending block as either the header or a catalog entry.
    fn flush(&mut self, line_no: usize) -> Result<(), LexiconError> {
        let pending = std::mem::take(&mut self.pending);
        if !pending.has_keywords() {
            return Ok(());
        }
        let start = pending.start_line;

        let Some(source) = pending.source else {
            return Err(unterminated(line_no, "missing msgid"));
        };
        let template = match (pending.translation, pending.source_plural.is_some()) {
            (Some(t), false) => t,
            (None, true) if !pending.forms.is_empty() => String::new(),
            _ => return Err(unterminated(line_no, "missing msgstr")),
        };

        if self.header.is_none() {
            if pending.context.is_some() || !source.is_empty() {
                return Err(LexiconError::parse(
                    start,
                    "invalid header: catalog must start with a msgid \"\" entry",
                ));
            }
            self.header = Some(parse_header(start, &template)?);
            return Ok(());
        }

        let ctxt = pending
            .context
            .ok_or_else(|| LexiconError::parse(start, "entry has no msgctxt id"))?;
        let id = MessageId::from_context(&ctxt).ok_or_else(|| {
            LexiconError::parse(start, format!("invalid message id '{ctxt}'"))
        })?;
        if let Some(first) = self.seen.insert(id, start) {
            return Err(LexiconError::parse(
                start,
                format!("duplicate message id {} (first at line {first})", id.context()),
            ));
        }

        let (template, plural) = match pending.source_plural {
            Some(plural_source) => {
                let mut forms = pending.forms;
                forms.sort_by_key(|(i, _)| *i);
                if forms.iter().enumerate().any(|(pos, (i, _))| pos != *i) {
                    return Err(LexiconError::parse(start, "plural forms are not contiguous"));
                }
                let forms: Vec<String> = forms.into_iter().map(|(_, s)| s).collect();
                let first = forms.first().cloned().unwrap_or_default();
                (
                    first,
                    Some(PluralForms {
                        source: plural_source,
                        forms,
                    }),
                )
            }
            None => (template, None),
        };

        let comment = if pending.comments.is_empty() {
            None
        } else {
            Some(pending.comments.join("\n"))
        };

        self.entries.push(CatalogEntry {
            id,
            source,
            template,
            comment,
            plural,
        });
        Ok(())
    }
}

fn unterminated(line_no: usize, what: &str) -> LexiconError {
    LexiconError::parse(line_no, format!("unterminated entry: {what}"))
}

fn parse_header(line_no: usize, text: &str) -> Result<Header, LexiconError> {
    let mut fields = Vec::new();
    for line in text.split('\n').filter(|l| !l.trim().is_empty()) {
        let (key, value) = line.split_once(':').ok_or_else(|| {
            LexiconError::parse(line_no, format!("invalid header line '{line}'"))
        })?;
        let key = key.trim();
        if key.is_empty() {
            return Err(LexiconError::parse(
                line_no,
                format!("invalid header line '{line}'"),
            ));
        }
        fields.push((key.to_string(), value.trim().to_string()));
    }
    Ok(Header {
        preamble: Vec::new(),
        fields,
    })
}

/// Strip the surrounding quotes from a PO string and decode escapes.
fn unquote(line_no: usize, s: &str) -> Result<String, LexiconError> {
    let s = s.trim();
    let Some(body) = s.strip_prefix('"') else {
        return Err(LexiconError::parse(line_no, "expected a quoted string"));
    };

    let mut result = String::with_capacity(body.len());
    let mut chars = body.char_indices();
    while let Some((pos, c)) = chars.next() {
        match c {
            '\\' => match chars.next() {
                Some((_, 'n')) => result.push('\n'),
                Some((_, 't')) => result.push('\t'),
                Some((_, 'r')) => result.push('\r'),
                Some((_, '"')) => result.push('"'),
                Some((_, '\\')) => result.push('\\'),
                Some((_, other)) => {
                    result.push('\\');
                    result.push(other);
                }
                None => break,
            },
            '"' => {
                if !body[pos + 1..].trim().is_empty() {
                    return Err(LexiconError::parse(
                        line_no,
                        "unexpected text after closing quote",
                    ));
                }
                return Ok(result);
            }
            _ => result.push(c),
        }
    }
    Err(LexiconError::parse(line_no, "unterminated string"))
}
