//! Version-ranged operation tables.
//!
//! # Architecture
//!
//! A [`PatchTable`] declares, per operation, which implementation serves
//! which host library versions. Resolution is a pure function of the table
//! and one detected [`Version`]: every operation binds the first entry whose
//! range matches, and a single unmatched operation fails the whole table.
//!
//! The [`Resolver`] runs that function at most once and hands out the cached
//! result afterwards.
//!
//! # Example
//!
//! ```
//! use ormshim_dispatch::{OperationSpec, Patch, PatchTable, Resolver, StaticVersion};
//!
//! let table = PatchTable::builder()
//!     .operation(OperationSpec::declare(
//!         "query",
//!         [(">=3.0.0", Patch::Available("two-arg")), ("^2.0.0", Patch::Available("three-arg"))],
//!     )?)
//!     .build()?;
//!
//! let resolver = Resolver::new(table);
//! let resolved = resolver.resolve_with(&StaticVersion::new("2.5.0"))?;
//! assert_eq!(resolved.get("query"), Some(&Patch::Available("three-arg")));
//! # Ok::<(), ormshim_dispatch::Error>(())
//! ```

pub use detect::{ManifestVersion, PairDetector, StaticVersion, VersionDetector};
pub use error::{Error, Result};
pub use ormshim_version::{RangeMatcher, SemverMatcher, Version, VersionRange};
pub use resolver::{Resolve, ResolvedTable, Resolver, State, resolve, resolve_operation};
pub use table::{OperationEntry, OperationSpec, Patch, PatchTable, PatchTableBuilder, boundaries};

mod detect;
mod error;
mod resolver;
mod table;
