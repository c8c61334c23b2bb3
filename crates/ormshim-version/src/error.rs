//! Error types for version parsing.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum VersionError {
    #[error("empty version string")]
    Empty,

    #[error("invalid semantic version '{input}': {source}")]
    Invalid {
        input: String,
        source: semver::Error,
    },

    #[error("invalid version bound '{0}'")]
    InvalidBound(String),

    #[error("invalid version range '{range}': {reason}")]
    InvalidRange { range: String, reason: String },
}

pub type Result<T> = std::result::Result<T, VersionError>;
