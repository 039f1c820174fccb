//! Translation coverage of each locale against the base locale.

use crate::catalog::MessageId;
use crate::registry::Registry;
use crate::render::placeholder_count;

/// How completely one locale translates the base catalog.
#[derive(Debug, Clone, PartialEq)]
pub struct LocaleCoverage {
    pub locale: String,
    /// Ids in the base catalog.
    pub total: usize,
    /// Base ids with a non-empty translation.
    pub translated: usize,
    /// Base ids with no entry at all.
    pub missing: Vec<MessageId>,
    /// Base ids whose entry has an empty `msgstr`.
    pub untranslated: Vec<MessageId>,
    /// Ids whose translation has a different `{}` count than the base.
    pub placeholder_mismatches: Vec<MessageId>,
    /// Ids the base catalog does not declare.
    pub extra: Vec<MessageId>,
}

impl LocaleCoverage {
    /// Translated share of the base catalog, 0.0-100.0.
    pub fn percent(&self) -> f32 {
        if self.total == 0 {
            100.0
        } else {
            self.translated as f32 / self.total as f32 * 100.0
        }
    }

    /// Whether the locale can be shipped as is.
    pub fn is_consistent(&self) -> bool {
        self.placeholder_mismatches.is_empty()
    }
}

impl Registry {
    /// Coverage for every non-base locale, sorted by locale tag.
    ///
    /// Empty when the base catalog is not loaded.
    pub fn coverage(&self) -> Vec<LocaleCoverage> {
        let Some(base) = self.base() else {
            return Vec::new();
        };

        self.locales()
            .into_iter()
            .filter(|tag| *tag != self.base_locale())
            .filter_map(|tag| self.catalog(tag))
            .map(|catalog| {
                let mut report = LocaleCoverage {
                    locale: catalog.locale().to_string(),
                    total: base.len(),
                    translated: 0,
                    missing: Vec::new(),
                    untranslated: Vec::new(),
                    placeholder_mismatches: Vec::new(),
                    extra: Vec::new(),
                };

                for entry in base.entries() {
                    let Some(target) = catalog.entry(entry.id) else {
                        report.missing.push(entry.id);
                        continue;
                    };
                    if !target.is_translated() {
                        report.untranslated.push(entry.id);
                        continue;
                    }
                    report.translated += 1;
                    if placeholder_count(&target.template) != placeholder_count(entry.text()) {
                        report.placeholder_mismatches.push(entry.id);
                    }
                }

                report.extra = catalog.ids().filter(|id| !base.contains(*id)).collect();
                report
            })
            .collect()
    }
}
