//! Typed errors raised by loading and configuration.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failure to materialize a collection from its source.
///
/// Cache problems never surface here; they degrade to a fresh parse.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("source '{}' is unreadable: {source}", .path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("source is malformed: {0}")]
    Malformed(#[from] serde_json::Error),
}

impl LoadError {
    /// Short machine-readable reason, `"unreadable"` or `"malformed"`.
    pub fn reason(&self) -> &'static str {
        match self {
            LoadError::Unreadable { .. } => "unreadable",
            LoadError::Malformed(_) => "malformed",
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid search configuration: {0}")]
    Invalid(#[from] serde_json::Error),
}
