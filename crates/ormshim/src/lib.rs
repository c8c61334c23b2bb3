//! One stable operation surface over every supported release of a
//! Sequelize-style ORM.
//!
//! # Architecture
//!
//! The host library is described by the traits in [`host`]. [`SequelizeTable`]
//! declares, per operation, which call form serves which host versions.
//! Resolving the table for the detected version yields [`ResolvedPatches`]:
//! one bound variant per operation, with call shapes that do not depend on the
//! host version.
//!
//! Resolution happens once. Use [`Shim`] to hold it next to a host instance, or
//! [`patches`] for the process-wide cache.
//!
//! # Example
//!
//! ```
//! use ormshim::{Features, SequelizeTable};
//! use ormshim::ops::{Find, Query};
//! use ormshim_dispatch::{Resolve, SemverMatcher, Version};
//!
//! let table = SequelizeTable::declare(Features::default())?;
//! let patches = table.resolve(&Version::new(3, 2, 1), &SemverMatcher)?;
//! assert_eq!(patches.query, Query::Direct);
//! assert_eq!(patches.find, Find::Alias);
//! # Ok::<(), ormshim_dispatch::Error>(())
//! ```

pub use config::ShimConfig;
pub use error::{Error, Result};
pub use resolved::ResolvedPatches;
pub use shim::{LibraryVersion, Shim, detector, patches, patches_with};
pub use table::{Features, OPERATIONS, Operation, SequelizeTable};

pub mod host;
pub mod ops;
pub mod table;

mod config;
mod error;
mod resolved;
mod shim;
