mod defaults;

#[cfg(test)]
mod tests;

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::LexiconError;
use defaults::*;

/// Top-level lexicon configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub lexicon: LexiconConfig,
    #[serde(default)]
    pub catalog: CatalogConfig,
}

/// General settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LexiconConfig {
    /// Default tracing filter when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for LexiconConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

/// Where catalogs live and how they are resolved.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Directory holding `resource.language.<tag>/strings.po` folders.
    #[serde(default = "default_resource_dir")]
    pub resource_dir: String,
    /// Source locale every other locale falls back to.
    #[serde(default = "default_base_locale")]
    pub base_locale: String,
    /// Fold localized strings to plain ASCII (NFKD, non-ASCII dropped).
    #[serde(default)]
    pub ascii_fold: bool,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            resource_dir: default_resource_dir(),
            base_locale: default_base_locale(),
            ascii_fold: false,
        }
    }
}

/// Expand `~` to home directory.
pub fn shellexpand(path: &str) -> String {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = std::env::var_os("HOME") {
            return format!("{}/{rest}", home.to_string_lossy());
        }
    }
    path.to_string()
}

/// Load configuration from a TOML file.
///
/// Falls back to defaults if the file does not exist.
pub fn load(path: &str) -> Result<Config, LexiconError> {
    let path = Path::new(path);
    if !path.exists() {
        tracing::info!(
            "Config file not found at {}, using defaults",
            path.display()
        );
        return Ok(Config::default());
    }

    let content = std::fs::read_to_string(path)
        .map_err(|e| LexiconError::Config(format!("failed to read {}: {}", path.display(), e)))?;

    parse(&content)
}

/// Parse configuration from TOML text and validate it.
pub fn parse(content: &str) -> Result<Config, LexiconError> {
    let config: Config = toml::from_str(content)
        .map_err(|e| LexiconError::Config(format!("failed to parse config: {}", e)))?;

    if config.catalog.base_locale.trim().is_empty() {
        return Err(LexiconError::Config(
            "catalog.base_locale must not be empty".to_string(),
        ));
    }

    Ok(config)
}
