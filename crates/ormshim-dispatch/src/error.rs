//! Error types for table declaration and resolution.

use ormshim_version::{Version, VersionError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("host library version unavailable: {reason}")]
    VersionUnavailable { reason: String },

    #[error("operation '{operation}' has no implementation for version {version}")]
    NoMatchingRange { operation: String, version: Version },

    #[error("operation '{operation}': {source}")]
    InvalidRange {
        operation: String,
        source: VersionError,
    },

    #[error("operation '{0}' is declared more than once")]
    DuplicateOperation(String),

    #[error("operation '{0}' has no entries")]
    EmptyOperation(String),

    #[error("operation '{operation}': entry {index} follows a wildcard and can never match")]
    UnreachableEntry { operation: String, index: usize },
}

impl Error {
    pub fn unavailable(reason: impl std::fmt::Display) -> Self {
        Error::VersionUnavailable {
            reason: reason.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
