//! Locale registry with base-locale fallback.
//!
//! # Failure Modes
//!
//! | Failure | Cause | Behavior |
//! |---------|-------|----------|
//! | Parse error | Malformed `strings.po` | Locale skipped, recorded in `failures()` |
//! | Missing base | Base locale failed or absent | `load_dir` returns an error |
//! | Missing id | Id in no catalog | `resolve` fails, `localise` yields the raw id |
//! | Argument mismatch | Wrong argument count | `localise` yields the bare template |

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use lexicon_core::error::LexiconError;
use tracing::{info, warn};

use crate::catalog::{normalize_locale, Catalog, MessageId, RESOURCE_PREFIX};
use crate::fold::ascii_fold;
use crate::render::render;


/// Catalog file name inside each resource folder.
const STRINGS_FILE: &str = "strings.po";

/// A catalog that could not be loaded.
#[derive(Debug)]
pub struct LoadFailure {
    pub locale: String,
    pub path: PathBuf,
    pub error: LexiconError,
}

/// Loaded catalogs, one per locale, plus the base locale they fall back to.
#[derive(Debug)]
pub struct Registry {
    base: String,
    catalogs: HashMap<String, Catalog>,
    failures: Vec<LoadFailure>,
    ascii_fold: bool,
}

impl Registry {
    pub fn new(base_locale: &str) -> Self {
        Self {
            base: normalize_locale(base_locale),
            catalogs: HashMap::new(),
            failures: Vec::new(),
            ascii_fold: false,
        }
    }

    /// Fold every string returned by [`Registry::localise`] to ASCII.
    pub fn with_ascii_fold(mut self, enabled: bool) -> Self {
        self.ascii_fold = enabled;
        self
    }

    /// Add a catalog, replacing any earlier one for the same locale.
    pub fn insert(&mut self, catalog: Catalog) -> Option<Catalog> {
        self.catalogs.insert(catalog.locale().to_string(), catalog)
    }

    /// Load every `resource.language.<tag>/strings.po` under `dir`.
    ///
    /// A malformed catalog is logged and skipped; the base locale must load.
    pub fn load_dir(dir: &Path, base_locale: &str) -> Result<Self, LexiconError> {
        let mut registry = Self::new(base_locale);

        let mut folders: Vec<(String, PathBuf)> = std::fs::read_dir(dir)?
            .filter_map(Result::ok)
            .filter_map(|entry| {
                let name = entry.file_name();
                let tag = name.to_str()?.strip_prefix(RESOURCE_PREFIX)?;
                let path = entry.path().join(STRINGS_FILE);
                path.is_file().then(|| (normalize_locale(tag), path))
            })
            .collect();
        folders.sort();

        for (locale, path) in folders {
            match load_file(&path, &locale) {
                Ok(catalog) => {
                    info!(
                        "loaded catalog '{locale}' ({} entries) from {}",
                        catalog.len(),
                        path.display()
                    );
                    registry.insert(catalog);
                }
                Err(error) => {
                    warn!("skipping catalog '{locale}' at {}: {error}", path.display());
                    registry.failures.push(LoadFailure {
                        locale,
                        path,
                        error,
                    });
                }
            }
        }

        if !registry.catalogs.contains_key(&registry.base) {
            return Err(LexiconError::Config(format!(
                "base locale '{}' could not be loaded from {}",
                registry.base,
                dir.display()
            )));
        }
        Ok(registry)
    }

    pub fn base_locale(&self) -> &str {
        &self.base
    }

    pub fn base(&self) -> Option<&Catalog> {
        self.catalogs.get(&self.base)
    }

    pub fn catalog(&self, locale: &str) -> Option<&Catalog> {
        self.catalogs.get(&normalize_locale(locale))
    }

    /// Loaded locale tags, sorted.
    pub fn locales(&self) -> Vec<&str> {
        let mut tags: Vec<&str> = self.catalogs.keys().map(String::as_str).collect();
        tags.sort_unstable();
        tags
    }

    pub fn failures(&self) -> &[LoadFailure] {
        &self.failures
    }

    /// Template for `id` in `locale`, falling back to the base locale when
    /// the locale lacks a translation.
    pub fn resolve(&self, locale: &str, id: MessageId) -> Result<&str, LexiconError> {
        let locale = normalize_locale(locale);
        if let Some(text) = self.catalogs.get(&locale).and_then(|c| c.translation(id)) {
            return Ok(text);
        }
        self.base_lookup(&locale, id, |base| base.lookup(id))
    }

    /// Like [`Registry::resolve`], selecting the plural form for `n`.
    pub fn resolve_plural(
        &self,
        locale: &str,
        id: MessageId,
        n: u64,
    ) -> Result<&str, LexiconError> {
        let locale = normalize_locale(locale);
        if let Some(text) = self
            .catalogs
            .get(&locale)
            .and_then(|c| c.translation_plural(id, n))
        {
            return Ok(text);
        }
        self.base_lookup(&locale, id, |base| base.lookup_plural(id, n))
    }

    fn base_lookup<'a>(
        &'a self,
        locale: &str,
        id: MessageId,
        lookup: impl FnOnce(&'a Catalog) -> Result<&'a str, LexiconError>,
    ) -> Result<&'a str, LexiconError> {
        let not_found = || LexiconError::NotFound {
            locale: locale.to_string(),
            id: id.0,
        };
        let base = self.catalogs.get(&self.base).ok_or_else(not_found)?;
        lookup(base).map_err(|_| not_found())
    }

    /// Resolve `id` and substitute `args`.
    pub fn format<S: AsRef<str>>(
        &self,
        locale: &str,
        id: MessageId,
        args: &[S],
    ) -> Result<String, LexiconError> {
        render(self.resolve(locale, id)?, args)
    }

    /// Resolve and render `id`, degrading instead of failing: a missing id
    /// yields the id itself, an argument mismatch yields the template as is.
    pub fn localise<S: AsRef<str>>(&self, locale: &str, id: MessageId, args: &[S]) -> String {
        let text = match self.resolve(locale, id) {
            Ok(template) => match render(template, args) {
                Ok(rendered) => rendered,
                Err(e) => {
                    warn!("message #{id} in '{locale}': {e}");
                    template.to_string()
                }
            },
            Err(e) => {
                warn!("{e}");
                id.to_string()
            }
        };
        if self.ascii_fold {
            ascii_fold(&text)
        } else {
            text
        }
    }
}

fn load_file(path: &Path, locale: &str) -> Result<Catalog, LexiconError> {
    let text = std::fs::read_to_string(path)?;
    let catalog = Catalog::parse_with_locale(&text, locale)?;
    if let Some(declared) = catalog.header().get("Language") {
        if normalize_locale(declared) != catalog.locale() {
            warn!(
                "{} declares Language '{declared}' but lives in '{}'",
                path.display(),
                catalog.locale()
            );
        }
    }
    Ok(catalog)
}
