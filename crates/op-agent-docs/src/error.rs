//! Error types for op-agent-docs

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for documentation generation
#[derive(Error, Debug)]
pub enum Error {
    #[error("Agents directory not found: {}", .0.display())]
    AgentsDirNotFound(PathBuf),

    #[error("Could not read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Could not write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Error::Config(msg.into())
    }

    /// Whether the run can continue past this error (per-document failures only)
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Error::Read { .. })
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}
