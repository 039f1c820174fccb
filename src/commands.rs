//! CLI command bodies. Each returns the text to print.

#[cfg(test)]
mod tests;

use lexicon_catalog::{Catalog, MessageId, Registry};
use lexicon_core::config;
use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::path::Path;

/// Result of `lexicon check`.
pub struct CheckReport {
    pub text: String,
    /// False when a catalog failed to load or a locale has placeholder mismatches.
    pub passed: bool,
}

/// Load the configured resource directory.
pub fn load_registry(cfg: &config::Config) -> anyhow::Result<Registry> {
    let dir = config::shellexpand(&cfg.catalog.resource_dir);
    let registry = Registry::load_dir(Path::new(&dir), &cfg.catalog.base_locale)?
        .with_ascii_fold(cfg.catalog.ascii_fold);
    Ok(registry)
}

/// Coverage report for every loaded locale.
pub fn check(registry: &Registry) -> CheckReport {
    let mut text = String::new();
    let _ = writeln!(text, "Base locale: {}", registry.base_locale());
    let _ = writeln!(text, "Loaded: {}", registry.locales().join(", "));

    for failure in registry.failures() {
        let _ = writeln!(
            text,
            "  {}: FAILED ({}): {}",
            failure.locale,
            failure.path.display(),
            failure.error
        );
    }

    let report = registry.coverage();
    for locale in &report {
        let _ = writeln!(
            text,
            "  {}: {}/{} translated ({:.1}%)",
            locale.locale,
            locale.translated,
            locale.total,
            locale.percent()
        );
        write_ids(&mut text, "missing", &locale.missing);
        write_ids(&mut text, "untranslated", &locale.untranslated);
        write_ids(&mut text, "placeholder mismatch", &locale.placeholder_mismatches);
        write_ids(&mut text, "not in base", &locale.extra);
    }

    let inconsistent = report.iter().filter(|l| !l.is_consistent()).count();
    let failed = registry.failures().len();
    if failed > 0 || inconsistent > 0 {
        let _ = writeln!(
            text,
            "{failed} catalog(s) failed to load, {inconsistent} locale(s) with placeholder mismatches"
        );
    }

    CheckReport {
        text,
        passed: failed == 0 && inconsistent == 0,
    }
}

/// Resolve and render one message. Uses the base locale when `locale` is `None`.
pub fn get(
    registry: &Registry,
    locale: Option<&str>,
    id: u32,
    count: Option<u64>,
    args: &[String],
    ascii_fold: bool,
) -> anyhow::Result<String> {
    let locale = locale.unwrap_or(registry.base_locale());
    let id = MessageId(id);
    let text = match count {
        Some(n) => lexicon_catalog::render(registry.resolve_plural(locale, id, n)?, args)?,
        None => registry.format(locale, id, args)?,
    };
    Ok(if ascii_fold {
        lexicon_catalog::ascii_fold(&text)
    } else {
        text
    })
}

/// Canonical PO text for the file at `path`.
pub fn fmt(path: &Path) -> anyhow::Result<String> {
    Ok(Catalog::load(path)?.to_po())
}

/// The locale's id → template map as pretty-printed JSON.
pub fn export(registry: &Registry, locale: &str) -> anyhow::Result<String> {
    let Some(catalog) = registry.catalog(locale) else {
        anyhow::bail!("locale '{locale}' is not loaded");
    };
    let map: BTreeMap<u32, &str> = catalog
        .entries()
        .iter()
        .map(|entry| (entry.id.0, entry.text()))
        .collect();
    Ok(serde_json::to_string_pretty(&map)?)
}

fn write_ids(text: &mut String, label: &str, ids: &[MessageId]) {
    if ids.is_empty() {
        return;
    }
    let list: Vec<String> = ids.iter().map(|id| id.context()).collect();
    let _ = writeln!(text, "      {label}: {}", list.join(" "));
}
