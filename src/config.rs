// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Configuration management
//!
//! Sources, later ones winning: built-in defaults, the user config file,
//! `yak-map.toml` in the working directory (or the file given explicitly),
//! then `YAKMAP_*` environment variables. CLI flags are applied on top by
//! the binary.

use crate::error::Result;
use crate::positions::DEFAULT_POSITIONS_FILE;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

/// Name of the per-checkout config file
pub const LOCAL_CONFIG_FILE: &str = "yak-map.toml";

/// Prefix for environment overrides
pub const ENV_PREFIX: &str = "YAKMAP";

/// Application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Saved layout file
    pub positions_path: PathBuf,
    /// Dev server listen address
    pub bind: SocketAddr,
    /// Accept position updates from the page
    pub persist_positions: bool,
    /// Dataset file replacing the built-in one
    pub dataset_path: Option<PathBuf>,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            positions_path: PathBuf::from(DEFAULT_POSITIONS_FILE),
            bind: SocketAddr::from(([127, 0, 0, 1], 3300)),
            persist_positions: true,
            dataset_path: None,
            log_level: "info".to_string(),
        }
    }
}

/// User-level config file, if the platform has a config directory
#[must_use]
pub fn user_config_path() -> Option<PathBuf> {
    directories::ProjectDirs::from("com", "hyperpolymath", "yak-map")
        .map(|d| d.config_dir().join("config.toml"))
}

/// Load configuration.
///
/// An explicit `path` must exist; the default locations are optional.
pub fn load(path: Option<&Path>) -> Result<Config> {
    let mut builder = config::Config::builder();

    match path {
        Some(p) => {
            builder = builder.add_source(toml_file(p).required(true));
        }
        None => {
            if let Some(user) = user_config_path() {
                builder = builder.add_source(toml_file(&user).required(false));
            }
            builder = builder.add_source(toml_file(Path::new(LOCAL_CONFIG_FILE)).required(false));
        }
    }

    let settings = builder
        .add_source(config::Environment::with_prefix(ENV_PREFIX).try_parsing(true))
        .build()?;

    Ok(settings.try_deserialize()?)
}

fn toml_file(path: &Path) -> config::File<config::FileSourceFile, config::FileFormat> {
    config::File::from(path).format(config::FileFormat::Toml)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = Config::default();

        assert_eq!(config.positions_path, PathBuf::from("yak-map-pos.json"));
        assert_eq!(config.bind.to_string(), "127.0.0.1:3300");
        assert!(config.persist_positions);
        assert!(config.dataset_path.is_none());
    }

    #[test]
    fn test_load_explicit_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("custom.toml");
        fs::write(
            &path,
            "positions_path = \"layout/pos.json\"\nbind = \"127.0.0.1:4000\"\npersist_positions = false\n",
        )
        .unwrap();

        let config = load(Some(&path)).unwrap();

        assert_eq!(config.positions_path, PathBuf::from("layout/pos.json"));
        assert_eq!(config.bind.port(), 4000);
        assert!(!config.persist_positions);
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        assert!(load(Some(&dir.path().join("nope.toml"))).is_err());
    }
}
