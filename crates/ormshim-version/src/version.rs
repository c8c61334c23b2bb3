//! Semantic Versioning wrapper.

use std::ops::Deref;

use serde::{Deserialize, Serialize};

use crate::VersionError;

/// A parsed semantic version as reported by a host library.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Version(semver::Version);

impl Version {
    /// Create new release version.
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        Self(semver::Version::new(major, minor, patch))
    }

    /// Parse a reported version string.
    ///
    /// Surrounding whitespace and one leading `v` are tolerated, since package
    /// metadata is not always normalized.
    pub fn parse(s: &str) -> Result<Self, VersionError> {
        let trimmed = s.trim();
        let trimmed = trimmed.strip_prefix('v').unwrap_or(trimmed);
        if trimmed.is_empty() {
            return Err(VersionError::Empty);
        }

        semver::Version::parse(trimmed)
            .map(Self)
            .map_err(|source| VersionError::Invalid {
                input: s.to_string(),
                source,
            })
    }

    /// Access underlying semver crate Version.
    pub fn inner(&self) -> &semver::Version {
        &self.0
    }

    /// Get major version.
    pub fn major(&self) -> u64 {
        self.0.major
    }

    /// Get minor version.
    pub fn minor(&self) -> u64 {
        self.0.minor
    }

    /// Get patch version.
    pub fn patch(&self) -> u64 {
        self.0.patch
    }

    /// Get pre-release identifier.
    pub fn pre(&self) -> &str {
        &self.0.pre
    }

    pub fn is_prerelease(&self) -> bool {
        !self.0.pre.is_empty()
    }

    /// The same version with pre-release and build metadata stripped.
    pub fn release(&self) -> Self {
        Self::new(self.0.major, self.0.minor, self.0.patch)
    }
}

impl From<semver::Version> for Version {
    fn from(version: semver::Version) -> Self {
        Self(version)
    }
}

impl std::str::FromStr for Version {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Version::parse(s)
    }
}

impl std::fmt::Display for Version {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Deref for Version {
    type Target = semver::Version;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
