//! Shim configuration.
//!
//! Sources, later ones winning: built-in defaults, `ormshim.toml`, then
//! `ORMSHIM_*` environment variables (`ORMSHIM_VERSION`, `ORMSHIM_MANIFEST`).

use std::path::{Path, PathBuf};

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};

use crate::Result;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShimConfig {
    /// Pin the host version instead of detecting it.
    pub version: Option<String>,
    /// Host package manifest, consulted when the library reports no version.
    pub manifest: Option<PathBuf>,
}

impl ShimConfig {
    pub const FILE: &str = "ormshim.toml";
    pub const ENV_PREFIX: &str = "ORMSHIM_";

    pub fn figment(file: &Path) -> Figment {
        Figment::from(Serialized::defaults(ShimConfig::default()))
            .merge(Toml::file(file))
            .merge(Env::prefixed(Self::ENV_PREFIX))
    }

    /// Load from `ormshim.toml` in the working directory and the environment.
    pub fn load() -> Result<Self> {
        Self::load_from(Path::new(Self::FILE))
    }

    pub fn load_from(file: &Path) -> Result<Self> {
        Ok(Self::figment(file).extract()?)
    }

    pub fn pinned(version: impl Into<String>) -> Self {
        Self {
            version: Some(version.into()),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;

    #[test]
    fn test_defaults_without_sources() {
        Jail::expect_with(|_| {
            assert_eq!(ShimConfig::load().map_err(|e| e.to_string())?, ShimConfig::default());
            Ok(())
        });
    }

    #[test]
    fn test_file_then_env() {
        Jail::expect_with(|jail| {
            jail.create_file(
                ShimConfig::FILE,
                r#"
                    version = "3.30.4"
                    manifest = "node_modules/sequelize/package.json"
                "#,
            )?;

            let config = ShimConfig::load().map_err(|e| e.to_string())?;
            assert_eq!(config.version.as_deref(), Some("3.30.4"));
            assert_eq!(
                config.manifest,
                Some(PathBuf::from("node_modules/sequelize/package.json"))
            );

            jail.set_env("ORMSHIM_VERSION", "4.44.3");
            let config = ShimConfig::load().map_err(|e| e.to_string())?;
            assert_eq!(config.version.as_deref(), Some("4.44.3"));
            Ok(())
        });
    }

    #[test]
    fn test_malformed_file() {
        Jail::expect_with(|jail| {
            jail.create_file(ShimConfig::FILE, "version = [")?;
            assert!(matches!(ShimConfig::load(), Err(crate::Error::Config(_))));
            Ok(())
        });
    }
}
