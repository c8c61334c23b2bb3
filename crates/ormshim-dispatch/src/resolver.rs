//! One-time resolution of operation tables against a detected version.
//!
//! # Architecture
//!
//! [`Resolve`] is the seam between the engine and a concrete table: it turns
//! a table plus a version into an immutable result. [`PatchTable`] implements
//! it generically; typed tables with one field per operation implement it by
//! calling [`resolve_operation`] once per field.
//!
//! [`Resolver`] owns a table and caches the first successful result.

use once_cell::sync::OnceCell;
use ormshim_version::{RangeMatcher, SemverMatcher, Version};
use tracing::{debug, info, warn};

use crate::{Error, OperationEntry, OperationSpec, Patch, PatchTable, Result, VersionDetector};

/// Turn a table into its resolved form for one version.
pub trait Resolve {
    type Output;

    fn resolve(&self, version: &Version, matcher: &dyn RangeMatcher) -> Result<Self::Output>;
}

/// Bind one operation: the first entry, in declaration order, whose range
/// contains `version`.
pub fn resolve_operation<'a, T>(
    spec: &'a OperationSpec<T>,
    version: &Version,
    matcher: &dyn RangeMatcher,
) -> Result<&'a OperationEntry<T>> {
    let Some(entry) = spec.select(version, matcher) else {
        warn!(operation = spec.name(), %version, "no range matches");
        return Err(Error::NoMatchingRange {
            operation: spec.name().to_string(),
            version: version.clone(),
        });
    };

    debug!(
        operation = spec.name(),
        range = %entry.range(),
        absent = entry.patch().is_absent(),
        %version,
        "bound operation"
    );
    Ok(entry)
}

/// Resolve a whole table with the default `semver` matcher.
pub fn resolve<T: Clone>(table: &PatchTable<T>, version: &Version) -> Result<ResolvedTable<T>> {
    table.resolve(version, &SemverMatcher)
}

/// Result of resolving a [`PatchTable`]: one patch per operation, in
/// declaration order.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedTable<T> {
    version: Version,
    bindings: Vec<(String, Patch<T>)>,
}

impl<T> ResolvedTable<T> {
    pub fn version(&self) -> &Version {
        &self.version
    }

    pub fn get(&self, operation: &str) -> Option<&Patch<T>> {
        self.bindings
            .iter()
            .find(|(name, _)| name == operation)
            .map(|(_, patch)| patch)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Patch<T>)> {
        self.bindings.iter().map(|(name, patch)| (name.as_str(), patch))
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

impl<T: Clone> Resolve for PatchTable<T> {
    type Output = ResolvedTable<T>;

    fn resolve(&self, version: &Version, matcher: &dyn RangeMatcher) -> Result<Self::Output> {
        let bindings = self
            .operations()
            .iter()
            .map(|spec| {
                resolve_operation(spec, version, matcher)
                    .map(|entry| (spec.name().to_string(), entry.patch().clone()))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(ResolvedTable {
            version: version.clone(),
            bindings,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    Unresolved,
    Resolved,
}

/// Owns a table and resolves it at most once.
///
/// The transition to [`State::Resolved`] is terminal. A failed attempt leaves
/// the resolver unresolved, so it can be retried. Concurrent callers block on
/// the same initialization and all observe one result.
pub struct Resolver<R: Resolve, M = SemverMatcher> {
    table: R,
    matcher: M,
    resolved: OnceCell<(Version, R::Output)>,
}

impl<R: Resolve> Resolver<R> {
    pub fn new(table: R) -> Self {
        Self::with_matcher(table, SemverMatcher)
    }
}

impl<R: Resolve, M: RangeMatcher> Resolver<R, M> {
    pub fn with_matcher(table: R, matcher: M) -> Self {
        Self {
            table,
            matcher,
            resolved: OnceCell::new(),
        }
    }

    pub fn table(&self) -> &R {
        &self.table
    }

    pub fn state(&self) -> State {
        match self.resolved.get() {
            Some(_) => State::Resolved,
            None => State::Unresolved,
        }
    }

    pub fn is_resolved(&self) -> bool {
        self.state() == State::Resolved
    }

    /// The cached result, if resolution already succeeded.
    pub fn get(&self) -> Option<&R::Output> {
        self.resolved.get().map(|(_, output)| output)
    }

    /// The version the cached result was resolved for.
    pub fn version(&self) -> Option<&Version> {
        self.resolved.get().map(|(version, _)| version)
    }

    /// Resolve for `version`, or return the cached result.
    pub fn resolve(&self, version: &Version) -> Result<&R::Output> {
        let (cached, output) = self.resolved.get_or_try_init(|| {
            let output = self.table.resolve(version, &self.matcher)?;
            info!(%version, "resolved operation table");
            Ok::<_, Error>((version.clone(), output))
        })?;

        if cached != version {
            warn!(%cached, requested = %version, "resolver already bound to another version");
        }
        Ok(output)
    }

    /// Detect the version and resolve, or return the cached result without
    /// detecting again.
    pub fn resolve_with(&self, detector: &dyn VersionDetector) -> Result<&R::Output> {
        if let Some(output) = self.get() {
            return Ok(output);
        }
        let version = detector.detect()?;
        self.resolve(&version)
    }
}
