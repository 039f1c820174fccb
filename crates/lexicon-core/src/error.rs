use thiserror::Error;

/// Top-level error type for lexicon.
#[derive(Debug, Error)]
pub enum LexiconError {
    /// Malformed catalog resource. Fatal to loading that locale.
    #[error("parse error at line {line}: {message}")]
    Parse { line: usize, message: String },

    /// The same message id appears twice in one catalog.
    #[error("duplicate message id #{id} in locale '{locale}'")]
    DuplicateId { locale: String, id: u32 },

    /// No entry for the message id in the requested locale.
    #[error("message #{id} not found in locale '{locale}'")]
    NotFound { locale: String, id: u32 },

    /// Placeholder count in a template differs from the arguments supplied.
    #[error("template expects {expected} argument(s), got {given}")]
    ArgumentCount { expected: usize, given: usize },

    /// Configuration error.
    #[error("config error: {0}")]
    Config(String),

    /// I/O error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl LexiconError {
    /// Build a parse error for the given 1-based line.
    pub fn parse(line: usize, message: impl Into<String>) -> Self {
        Self::Parse {
            line,
            message: message.into(),
        }
    }
}
