//! Declarative operation tables.
//!
//! A table maps each operation name to an ordered list of
//! (range, implementation) entries. Order is priority: the first entry whose
//! range matches wins, so a wildcard fallback belongs last.

use ormshim_version::{RangeMatcher, Version, VersionRange};

use crate::{Error, Result};

/// An implementation slot: either a bound implementation, or an explicit
/// statement that nothing is available for the range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Patch<T> {
    Available(T),
    Absent,
}

impl<T> Patch<T> {
    pub fn is_absent(&self) -> bool {
        matches!(self, Patch::Absent)
    }
}

impl<T> From<Option<T>> for Patch<T> {
    fn from(value: Option<T>) -> Self {
        value.map_or(Patch::Absent, Patch::Available)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct OperationEntry<T> {
    range: VersionRange,
    patch: Patch<T>,
}

impl<T> OperationEntry<T> {
    pub fn new(range: VersionRange, patch: Patch<T>) -> Self {
        Self { range, patch }
    }

    pub fn range(&self) -> &VersionRange {
        &self.range
    }

    pub fn patch(&self) -> &Patch<T> {
        &self.patch
    }
}

/// The ordered entries of one named operation.
#[derive(Debug, Clone, PartialEq)]
pub struct OperationSpec<T> {
    name: String,
    entries: Vec<OperationEntry<T>>,
}

impl<T> OperationSpec<T> {
    /// Declare an operation from `(range expression, patch)` pairs.
    ///
    /// Fails if a range does not parse, if there are no entries, or if an
    /// entry follows a wildcard.
    pub fn declare<'a>(
        name: impl Into<String>,
        entries: impl IntoIterator<Item = (&'a str, Patch<T>)>,
    ) -> Result<Self> {
        let name = name.into();
        let entries = entries
            .into_iter()
            .map(|(range, patch)| {
                VersionRange::parse(range)
                    .map(|range| OperationEntry::new(range, patch))
                    .map_err(|source| Error::InvalidRange {
                        operation: name.clone(),
                        source,
                    })
            })
            .collect::<Result<Vec<_>>>()?;

        Self::from_entries(name, entries)
    }

    pub fn from_entries(name: impl Into<String>, entries: Vec<OperationEntry<T>>) -> Result<Self> {
        let name = name.into();
        if entries.is_empty() {
            return Err(Error::EmptyOperation(name));
        }
        if let Some(wildcard) = entries.iter().position(|e| e.range.is_wildcard()) {
            if wildcard + 1 < entries.len() {
                return Err(Error::UnreachableEntry {
                    operation: name,
                    index: wildcard + 1,
                });
            }
        }

        Ok(Self { name, entries })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn entries(&self) -> &[OperationEntry<T>] {
        &self.entries
    }

    /// First entry whose range contains `version`.
    pub fn select(&self, version: &Version, matcher: &dyn RangeMatcher) -> Option<&OperationEntry<T>> {
        self.entries
            .iter()
            .find(|entry| matcher.matches(version, &entry.range))
    }
}

/// A name-unique, ordered set of operations sharing one implementation type.
#[derive(Debug, Clone, PartialEq)]
pub struct PatchTable<T> {
    operations: Vec<OperationSpec<T>>,
}

impl<T> PatchTable<T> {
    pub fn builder() -> PatchTableBuilder<T> {
        PatchTableBuilder {
            operations: Vec::new(),
        }
    }

    pub fn operations(&self) -> &[OperationSpec<T>] {
        &self.operations
    }

    pub fn get(&self, name: &str) -> Option<&OperationSpec<T>> {
        self.operations.iter().find(|spec| spec.name == name)
    }

    /// Every version named by any range in the table, sorted.
    pub fn boundaries(&self) -> Vec<Version> {
        boundaries(self.operations.iter().flat_map(|spec| spec.entries()))
    }
}

pub struct PatchTableBuilder<T> {
    operations: Vec<OperationSpec<T>>,
}

impl<T> PatchTableBuilder<T> {
    pub fn operation(mut self, spec: OperationSpec<T>) -> Self {
        self.operations.push(spec);
        self
    }

    pub fn build(self) -> Result<PatchTable<T>> {
        for (i, spec) in self.operations.iter().enumerate() {
            if self.operations[..i].iter().any(|other| other.name == spec.name) {
                return Err(Error::DuplicateOperation(spec.name.clone()));
            }
        }

        Ok(PatchTable {
            operations: self.operations,
        })
    }
}

/// Sorted, deduplicated boundary versions of a set of entries.
pub fn boundaries<'a, T: 'a>(entries: impl IntoIterator<Item = &'a OperationEntry<T>>) -> Vec<Version> {
    let mut out: Vec<Version> = entries
        .into_iter()
        .flat_map(|entry| entry.range.boundaries())
        .collect();
    out.sort();
    out.dedup();
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use ormshim_version::SemverMatcher;

    #[test]
    fn test_declare_parses_ranges() {
        let spec = OperationSpec::declare(
            "query",
            [(">=3.0.0", Patch::Available(3)), ("^2.0.0", Patch::Available(2))],
        )
        .unwrap();
        assert_eq!(spec.name(), "query");
        assert_eq!(spec.entries().len(), 2);
        assert_eq!(spec.entries()[1].range().as_str(), "^2.0.0");
    }

    #[test]
    fn test_declare_rejects_bad_range() {
        let err = OperationSpec::declare("query", [(">=three", Patch::Available(1))]).unwrap_err();
        assert!(matches!(err, Error::InvalidRange { ref operation, .. } if operation == "query"));
    }

    #[test]
    fn test_declare_rejects_empty() {
        let err = OperationSpec::<u8>::declare("find", []).unwrap_err();
        assert!(matches!(err, Error::EmptyOperation(ref name) if name == "find"));
    }

    #[test]
    fn test_entries_after_wildcard_are_unreachable() {
        let err = OperationSpec::declare(
            "uppercaseFirst",
            [("*", Patch::Available(0)), (">=5.0.0", Patch::Available(1))],
        )
        .unwrap_err();
        assert!(matches!(err, Error::UnreachableEntry { index: 1, .. }));

        let err = OperationSpec::declare(
            "uppercaseFirst",
            [("x.x.x", Patch::Available(0)), (">=5.0.0", Patch::Available(1))],
        )
        .unwrap_err();
        assert!(matches!(err, Error::UnreachableEntry { index: 1, .. }));
    }

    #[test]
    fn test_select_first_match() {
        let spec = OperationSpec::declare(
            "find",
            [(">=2.0.0", Patch::Available("wide")), ("^2.0.0", Patch::Available("narrow"))],
        )
        .unwrap();
        let entry = spec.select(&Version::new(2, 1, 0), &SemverMatcher).unwrap();
        assert_eq!(entry.patch(), &Patch::Available("wide"));
        assert!(spec.select(&Version::new(1, 0, 0), &SemverMatcher).is_none());
    }

    #[test]
    fn test_wildcard_fallback_takes_anything() {
        let spec = OperationSpec::declare(
            "uppercaseFirst",
            [(">=5.0.0", Patch::Available("local")), ("*", Patch::Available("host"))],
        )
        .unwrap();
        for version in ["0.1.0", "5.0.0-beta", "9.9.9-alpha.1"] {
            let entry = spec.select(&version.parse().unwrap(), &SemverMatcher).unwrap();
            assert_eq!(entry.patch(), &Patch::Available("host"), "{}", version);
        }
        let entry = spec.select(&Version::new(5, 1, 0), &SemverMatcher).unwrap();
        assert_eq!(entry.patch(), &Patch::Available("local"));
    }

    #[test]
    fn test_builder_rejects_duplicates() {
        let spec = OperationSpec::declare("query", [("*", Patch::Available(()))]).unwrap();
        let err = PatchTable::builder()
            .operation(spec.clone())
            .operation(spec)
            .build()
            .unwrap_err();
        assert!(matches!(err, Error::DuplicateOperation(ref name) if name == "query"));
    }

    #[test]
    fn test_table_boundaries_sorted() {
        let table = PatchTable::builder()
            .operation(
                OperationSpec::declare(
                    "a",
                    [(">=4.0.0 || >=5.0.0-beta", Patch::Available(1)), ("2.0.0 - 3.x.x", Patch::Absent)],
                )
                .unwrap(),
            )
            .operation(OperationSpec::declare("b", [("^2.0.0", Patch::Available(2))]).unwrap())
            .build()
            .unwrap();

        let expected: Vec<Version> = ["2.0.0", "4.0.0", "5.0.0-beta"]
            .iter()
            .map(|s| s.parse().unwrap())
            .collect();
        assert_eq!(table.boundaries(), expected);
        assert!(table.get("b").is_some());
        assert!(table.get("c").is_none());
    }

    #[test]
    fn test_patch_from_option() {
        assert_eq!(Patch::from(Some(1)), Patch::Available(1));
        assert_eq!(Patch::<u8>::from(None), Patch::Absent);
    }
}
