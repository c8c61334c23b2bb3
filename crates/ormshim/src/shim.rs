//! Detection, resolution and caching for a loaded host library.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use once_cell::sync::Lazy;
use ormshim_dispatch::{
    ManifestVersion, PairDetector, Resolve, Resolver, SemverMatcher, StaticVersion, Version,
    VersionDetector,
};
use tracing::{debug, info};

use crate::config::ShimConfig;
use crate::host::Library;
use crate::resolved::ResolvedPatches;
use crate::table::{Features, SequelizeTable};
use crate::Result;

static RESOLVED: Lazy<Mutex<HashMap<(Version, Features), Arc<ResolvedPatches>>>> =
    Lazy::new(|| Mutex::new(HashMap::new()));

/// The version a loaded library reports about itself.
pub struct LibraryVersion<'a>(pub &'a dyn Library);

impl VersionDetector for LibraryVersion<'_> {
    fn detect(&self) -> ormshim_dispatch::Result<Version> {
        StaticVersion::from(self.0.version().map(str::to_string)).detect()
    }
}

/// The detector `config` asks for: a pinned version, else the library's own
/// report, falling back to the manifest when one is configured.
pub fn detector<'a>(library: &'a dyn Library, config: &ShimConfig) -> Box<dyn VersionDetector + 'a> {
    match (&config.version, &config.manifest) {
        (Some(pinned), _) => Box::new(StaticVersion::new(pinned.as_str())),
        (None, Some(manifest)) => Box::new(PairDetector::new(
            LibraryVersion(library),
            ManifestVersion::new(manifest),
        )),
        (None, None) => Box::new(LibraryVersion(library)),
    }
}

/// Resolved operations for one host library instance.
pub struct Shim {
    config: ShimConfig,
    resolver: Resolver<SequelizeTable>,
}

impl Shim {
    pub fn new(library: &dyn Library, config: ShimConfig) -> Result<Self> {
        Ok(Self {
            config,
            resolver: Resolver::new(SequelizeTable::for_library(library)?),
        })
    }

    pub fn table(&self) -> &SequelizeTable {
        self.resolver.table()
    }

    pub fn is_resolved(&self) -> bool {
        self.resolver.is_resolved()
    }

    /// Detect and resolve on first call; later calls return the same value.
    pub fn patches(&self, library: &dyn Library) -> Result<&ResolvedPatches> {
        let detector = detector(library, &self.config);
        Ok(self.resolver.resolve_with(&detector)?)
    }
}

/// Process-wide resolved operations for `library`, configured from
/// `ormshim.toml` and the environment.
pub fn patches(library: &dyn Library) -> Result<Arc<ResolvedPatches>> {
    patches_with(library, &ShimConfig::load()?)
}

/// Process-wide resolved operations for `library`.
///
/// Results are cached per (version, features) for the life of the process;
/// resolution runs under the cache lock, so each key resolves once.
pub fn patches_with(library: &dyn Library, config: &ShimConfig) -> Result<Arc<ResolvedPatches>> {
    let version = detector(library, config).detect()?;
    let features = Features::of(library);
    let key = (version, features);

    let mut cache = RESOLVED.lock().unwrap_or_else(PoisonError::into_inner);
    if let Some(resolved) = cache.get(&key) {
        debug!(version = %key.0, "reusing resolved operations");
        return Ok(Arc::clone(resolved));
    }

    let table = SequelizeTable::declare(features)?;
    let resolved = Arc::new(table.resolve(&key.0, &SemverMatcher)?);
    info!(version = %key.0, nested_utils = features.nested_utils, "resolved host operations");
    cache.insert(key, Arc::clone(&resolved));
    Ok(resolved)
}
