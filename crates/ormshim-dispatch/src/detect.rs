//! Host library version detection.
//!
//! A detector is a pure read of metadata the host library already exposes.
//! Detectors do not cache; the [`Resolver`](crate::Resolver) does.

use std::path::{Path, PathBuf};

use ormshim_version::Version;
use serde::Deserialize;
use tracing::debug;

use crate::{Error, Result};

pub trait VersionDetector {
    fn detect(&self) -> Result<Version>;
}

impl<D: VersionDetector + ?Sized> VersionDetector for &D {
    fn detect(&self) -> Result<Version> {
        (**self).detect()
    }
}

impl<D: VersionDetector + ?Sized> VersionDetector for Box<D> {
    fn detect(&self) -> Result<Version> {
        (**self).detect()
    }
}

/// A version string handed over directly, e.g. the one a loaded library
/// reports about itself, or a configured pin.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StaticVersion(Option<String>);

impl StaticVersion {
    pub fn new(version: impl Into<String>) -> Self {
        Self(Some(version.into()))
    }

    /// Nothing was reported.
    pub fn unreported() -> Self {
        Self(None)
    }
}

impl From<Option<String>> for StaticVersion {
    fn from(version: Option<String>) -> Self {
        Self(version)
    }
}

impl VersionDetector for StaticVersion {
    fn detect(&self) -> Result<Version> {
        let reported = self
            .0
            .as_deref()
            .ok_or_else(|| Error::unavailable("no version reported"))?;
        Version::parse(reported).map_err(Error::unavailable)
    }
}

#[derive(Debug, Deserialize)]
struct Manifest {
    version: Option<String>,
}

/// Reads the `version` field of a package manifest (`package.json`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestVersion {
    path: PathBuf,
}

impl ManifestVersion {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The manifest of `package` installed under `root/node_modules`.
    pub fn installed(root: &Path, package: &str) -> Self {
        Self::new(root.join("node_modules").join(package).join("package.json"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl VersionDetector for ManifestVersion {
    fn detect(&self) -> Result<Version> {
        let path = self.path.display();
        let content = std::fs::read_to_string(&self.path)
            .map_err(|e| Error::unavailable(format!("cannot read {}: {}", path, e)))?;
        let manifest: Manifest = serde_json::from_str(&content)
            .map_err(|e| Error::unavailable(format!("malformed manifest {}: {}", path, e)))?;
        let version = manifest
            .version
            .ok_or_else(|| Error::unavailable(format!("manifest {} has no version", path)))?;

        Version::parse(&version).map_err(Error::unavailable)
    }
}

/// Try `primary`; when it cannot produce a version, ask `fallback`.
///
/// Any primary failure triggers the fallback, including a reported string
/// that does not parse. A host reporting `"latest"` with a readable manifest
/// therefore resolves to the manifest's version rather than failing.
#[derive(Debug, Clone)]
pub struct PairDetector<P, F> {
    primary: P,
    fallback: F,
}

impl<P, F> PairDetector<P, F>
where
    P: VersionDetector,
    F: VersionDetector,
{
    pub fn new(primary: P, fallback: F) -> Self {
        Self { primary, fallback }
    }
}

impl<P, F> VersionDetector for PairDetector<P, F>
where
    P: VersionDetector,
    F: VersionDetector,
{
    fn detect(&self) -> Result<Version> {
        let primary = match self.primary.detect() {
            Ok(version) => return Ok(version),
            Err(e) => reason(e),
        };
        debug!(%primary, "primary version source unavailable, trying fallback");

        self.fallback
            .detect()
            .map_err(|e| Error::unavailable(format!("{}; {}", primary, reason(e))))
    }
}

fn reason(error: Error) -> String {
    match error {
        Error::VersionUnavailable { reason } => reason,
        other => other.to_string(),
    }
}
