//! Configuration file I/O: path resolution and loading.

use std::path::{Path, PathBuf};

use thiserror::Error;

use super::Config;

/// Why a config file could not be used.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("parse error in {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Returns the platform-specific configuration directory for `termgrid`.
pub fn config_dir() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        if let Ok(appdata) = std::env::var("APPDATA") {
            return PathBuf::from(appdata).join("termgrid");
        }
        PathBuf::from(".").join("termgrid")
    }
    #[cfg(not(target_os = "windows"))]
    {
        if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
            return PathBuf::from(xdg).join("termgrid");
        }
        if let Ok(home) = std::env::var("HOME") {
            return PathBuf::from(home).join(".config").join("termgrid");
        }
        PathBuf::from(".").join("termgrid")
    }
}

/// Returns the path to the config file.
pub fn config_path() -> PathBuf {
    config_dir().join("config.toml")
}

impl Config {
    /// Loads config from the default path. Returns defaults if the file
    /// doesn't exist or can't be parsed.
    pub fn load() -> Self {
        Self::load_from(&config_path())
    }

    /// Loads config from `path`, falling back to defaults.
    ///
    /// A missing file is silent; any other problem is logged.
    pub fn load_from(path: &Path) -> Self {
        match Self::try_load_from(path) {
            Ok(cfg) => {
                log::info!("config: loaded from {}", path.display());
                cfg
            }
            Err(ConfigError::Read { source, .. })
                if source.kind() == std::io::ErrorKind::NotFound =>
            {
                log::debug!("config: {} not found, using defaults", path.display());
                Self::default()
            }
            Err(e) => {
                log::warn!("config: {e}");
                Self::default()
            }
        }
    }

    /// Tries to load config from `path`, keeping the error.
    pub fn try_load_from(path: &Path) -> Result<Self, ConfigError> {
        let data = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_owned(),
            source,
        })?;
        toml::from_str(&data).map_err(|source| ConfigError::Parse {
            path: path.to_owned(),
            source,
        })
    }
}
