//! Catalog data model and id lookup.
//!
//! # Invariants
//!
//! 1. Ids are unique within a catalog; the reader rejects duplicates.
//! 2. Entries keep their declaration order, so writing a catalog back out
//!    reproduces the source layout.
//! 3. A catalog never changes after it has been built.

use serde::Serialize;
use std::collections::HashMap;
use std::fmt;
use std::path::Path;

use lexicon_core::error::LexiconError;

use crate::plural::PluralRule;
use crate::po::LocaleSource;

/// Directory prefix of per-locale resource folders.
pub(crate) const RESOURCE_PREFIX: &str = "resource.language.";

/// Numeric message id, written `#<digits>` in `msgctxt`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct MessageId(pub u32);

impl MessageId {
    /// Parse a `msgctxt` value of the form `#32001`.
    pub fn from_context(ctxt: &str) -> Option<Self> {
        let digits = ctxt.strip_prefix('#')?;
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        digits.parse().ok().map(Self)
    }

    /// The `msgctxt` form of this id.
    pub fn context(&self) -> String {
        format!("#{}", self.0)
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for MessageId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

/// `msgid_plural` with its indexed `msgstr[n]` forms.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PluralForms {
    pub source: String,
    pub forms: Vec<String>,
}

/// One `msgctxt`/`msgid`/`msgstr` block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogEntry {
    pub id: MessageId,
    /// The `msgid` text.
    pub source: String,
    /// The `msgstr` text (`msgstr[0]` for plural entries). Empty when
    /// untranslated.
    pub template: String,
    /// `#.` notes for translators.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plural: Option<PluralForms>,
}

impl CatalogEntry {
    pub fn is_translated(&self) -> bool {
        !self.template.is_empty()
    }

    /// The template, or the source text when untranslated.
    pub fn text(&self) -> &str {
        if self.is_translated() {
            &self.template
        } else {
            &self.source
        }
    }
}

/// Catalog metadata: the leading `#` comment block and the `Key: value`
/// fields of the `msgid ""` entry, in file order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Header {
    pub preamble: Vec<String>,
    pub fields: Vec<(String, String)>,
}

impl Header {
    /// Field value by case-insensitive key.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v.as_str())
    }
}

/// Normalize a locale tag to lower case with `_` separators
/// (`pt-BR` and `pt_BR` both become `pt_br`).
pub fn normalize_locale(tag: &str) -> String {
    tag.trim().replace('-', "_").to_ascii_lowercase()
}

/// All messages for one locale.
#[derive(Debug, Clone)]
pub struct Catalog {
    locale: String,
    header: Header,
    plural_rule: PluralRule,
    entries: Vec<CatalogEntry>,
    index: HashMap<MessageId, usize>,
}

impl Catalog {
    /// Assemble a catalog from already-validated parts.
    ///
    /// Fails with [`LexiconError::DuplicateId`] if `entries` repeats an id.
    pub fn from_parts(
        locale: &str,
        header: Header,
        entries: Vec<CatalogEntry>,
    ) -> Result<Self, LexiconError> {
        let mut index = HashMap::with_capacity(entries.len());
        for (pos, entry) in entries.iter().enumerate() {
            if index.insert(entry.id, pos).is_some() {
                return Err(LexiconError::DuplicateId {
                    locale: normalize_locale(locale),
                    id: entry.id.0,
                });
            }
        }
        let plural_rule = header
            .get("Plural-Forms")
            .map(PluralRule::from_header)
            .unwrap_or_default();
        Ok(Self {
            locale: normalize_locale(locale),
            header,
            plural_rule,
            entries,
            index,
        })
    }

    /// Parse PO text. The locale comes from the `Language` header field.
    pub fn parse(text: &str) -> Result<Self, LexiconError> {
        crate::po::parse(text, LocaleSource::Header)
    }

    /// Parse PO text for an explicitly chosen locale.
    pub fn parse_with_locale(text: &str, locale: &str) -> Result<Self, LexiconError> {
        crate::po::parse(text, LocaleSource::Explicit(locale))
    }

    /// Read and parse a PO file.
    ///
    /// Without a `Language` header the locale comes from the enclosing
    /// `resource.language.<tag>` folder.
    pub fn load(path: &Path) -> Result<Self, LexiconError> {
        let text = std::fs::read_to_string(path)?;
        let source = match folder_locale(path) {
            Some(tag) => LocaleSource::HeaderOr(tag),
            None => LocaleSource::Header,
        };
        let catalog = crate::po::parse(&text, source)?;
        tracing::info!(
            "loaded catalog '{}' from {} ({} entries)",
            catalog.locale,
            path.display(),
            catalog.len()
        );
        Ok(catalog)
    }

    pub fn locale(&self) -> &str {
        &self.locale
    }

    pub fn header(&self) -> &Header {
        &self.header
    }

    pub fn plural_rule(&self) -> PluralRule {
        self.plural_rule
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in declaration order.
    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn ids(&self) -> impl Iterator<Item = MessageId> + '_ {
        self.entries.iter().map(|e| e.id)
    }

    pub fn contains(&self, id: MessageId) -> bool {
        self.index.contains_key(&id)
    }

    pub fn entry(&self, id: MessageId) -> Option<&CatalogEntry> {
        self.index.get(&id).map(|&pos| &self.entries[pos])
    }

    /// Template for `id`. Untranslated entries yield their `msgid` text.
    pub fn lookup(&self, id: MessageId) -> Result<&str, LexiconError> {
        self.entry(id)
            .map(CatalogEntry::text)
            .ok_or_else(|| self.not_found(id))
    }

    /// Translated template for `id`, or `None` when absent or untranslated.
    pub fn translation(&self, id: MessageId) -> Option<&str> {
        self.entry(id)
            .filter(|e| e.is_translated())
            .map(|e| e.template.as_str())
    }

    /// Template for `id` chosen by the catalog's plural rule for count `n`.
    ///
    /// Singular-only entries return their normal template.
    pub fn lookup_plural(&self, id: MessageId, n: u64) -> Result<&str, LexiconError> {
        let entry = self.entry(id).ok_or_else(|| self.not_found(id))?;
        Ok(plural_text(entry, self.plural_rule, n))
    }

    /// Plural form for count `n`, or `None` when absent or untranslated.
    pub fn translation_plural(&self, id: MessageId, n: u64) -> Option<&str> {
        self.entry(id)
            .filter(|e| e.is_translated())
            .map(|e| plural_text(e, self.plural_rule, n))
    }

    fn not_found(&self, id: MessageId) -> LexiconError {
        LexiconError::NotFound {
            locale: self.locale.clone(),
            id: id.0,
        }
    }
}

/// Locale tag of the `resource.language.<tag>` folder holding `path`.
pub(crate) fn folder_locale(path: &Path) -> Option<&str> {
    path.parent()?
        .file_name()?
        .to_str()?
        .strip_prefix(RESOURCE_PREFIX)
        .filter(|tag| !tag.is_empty())
}

fn plural_text(entry: &CatalogEntry, rule: PluralRule, n: u64) -> &str {
    let Some(plural) = &entry.plural else {
        return entry.text();
    };
    let index = rule.index(n);
    match plural.forms.get(index).filter(|f| !f.is_empty()) {
        Some(form) => form,
        None if index == 0 => &entry.source,
        None => &plural.source,
    }
}
