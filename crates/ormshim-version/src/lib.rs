//! Version parsing and npm-style range matching for ormshim.
//!
//! Versions are strict SemVer 2.0 (`4.44.3`, `5.0.0-beta.2`). Ranges are the
//! expressions compatibility tables are written in:
//!
//! - comparators: `>=3.0.0`, `<5`, `=2.1.0`, or a bare exact version
//! - caret and tilde: `^2.0.0`, `~3.1`
//! - x-ranges: `4.x`, `4.x.x`, `4`
//! - hyphen ranges: `2.0.0 - 3.x.x` (inclusive)
//! - alternatives: `>=4.0.0 || >=5.0.0-beta`
//! - the universal wildcard `*`, which also matches prereleases
//!
//! # Example
//!
//! ```
//! use ormshim_version::{RangeMatcher, SemverMatcher, Version, VersionRange};
//!
//! let range: VersionRange = ">=4.0.0 || >=5.0.0-beta".parse().unwrap();
//! let beta: Version = "5.0.0-beta".parse().unwrap();
//! assert!(SemverMatcher.matches(&beta, &range));
//! ```

pub use error::{Result, VersionError};
pub use partial::{Bound, Partial};
pub use range::{RangeMatcher, SemverMatcher, VersionRange};
pub use version::Version;

mod error;
mod partial;
mod range;
mod version;
