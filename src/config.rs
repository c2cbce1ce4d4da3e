//! Server configuration.
//!
//! Settings come from a TOML file, by default
//! `<config dir>/qmlantom/config.toml` (e.g. `~/.config/qmlantom/config.toml`
//! on Linux), and can be overridden on the command line.
//!
//! ```toml
//! # Extra directories of catalog descriptor files (*.json).
//! catalog_dirs = ["/opt/appstudio/qml_types"]
//! # Load the descriptors compiled into the binary.
//! bundled_catalog = true
//! # tracing-subscriber filter directive.
//! log_filter = "qmlantom_lsp=debug"
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use etcetera::{BaseStrategy, choose_base_strategy};
use serde::Deserialize;

use crate::bundled::bundled_sources;
use crate::catalog::DescriptorSource;
use crate::error::{CatalogError, ConfigError};

pub const DEFAULT_LOG_FILTER: &str = "qmlantom_lsp=info";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub catalog_dirs: Vec<PathBuf>,
    pub bundled_catalog: bool,
    pub log_filter: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            catalog_dirs: Vec::new(),
            bundled_catalog: true,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl Config {
    /// The per-user config file location, if a home directory is known.
    pub fn default_path() -> Option<PathBuf> {
        let strategy = choose_base_strategy().ok()?;
        Some(strategy.config_dir().join("qmlantom").join("config.toml"))
    }

    pub fn from_toml(content: &str, path: &Path) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content, path)
    }

    /// Load `explicit` if given (it must exist), else the default file if it
    /// exists, else the defaults.
    pub fn discover(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        match Self::default_path() {
            Some(path) if path.is_file() => Self::load(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Every descriptor source to build the catalog from: the bundled set
    /// first (if enabled), then each configured directory in order.
    pub fn descriptor_sources(&self) -> Result<Vec<DescriptorSource>, CatalogError> {
        let mut sources = if self.bundled_catalog {
            bundled_sources()
        } else {
            Vec::new()
        };
        for dir in &self.catalog_dirs {
            sources.extend(DescriptorSource::read_dir(dir)?);
        }
        Ok(sources)
    }
}
