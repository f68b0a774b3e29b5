//! Optional `devagent.toml` configuration.
//!
//! Lookup order: an explicit path, `DEVAGENT_CONFIG_PATH`, `devagent.toml`
//! in the working directory, then `~/.qwen3-devagent/devagent.toml`. When
//! none of these exist the defaults apply.

use std::env;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

pub const CONFIG_FILE_NAME: &str = "devagent.toml";
pub const CONFIG_PATH_ENV: &str = "DEVAGENT_CONFIG_PATH";
/// Per-user directory under the home directory.
pub const HOME_CONFIG_DIR: &str = ".qwen3-devagent";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DevagentConfig {
    pub catalog: CatalogConfig,
    pub debug: DebugConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Catalog document to use instead of the bundled one. Relative paths
    /// are resolved against the directory of the config file.
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DebugConfig {
    pub trace_level: TraceLevel,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TraceLevel {
    Error,
    #[default]
    Warn,
    Info,
    Debug,
    Trace,
}

impl TraceLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            TraceLevel::Error => "error",
            TraceLevel::Warn => "warn",
            TraceLevel::Info => "info",
            TraceLevel::Debug => "debug",
            TraceLevel::Trace => "trace",
        }
    }

    /// Step `steps` levels towards `Trace`, saturating.
    pub fn raised_by(self, steps: u8) -> Self {
        const ORDER: [TraceLevel; 5] = [
            TraceLevel::Error,
            TraceLevel::Warn,
            TraceLevel::Info,
            TraceLevel::Debug,
            TraceLevel::Trace,
        ];
        let current = ORDER.iter().position(|level| *level == self).unwrap_or(0);
        let target = current.saturating_add(usize::from(steps));
        ORDER
            .get(target)
            .copied()
            .unwrap_or(TraceLevel::Trace)
    }
}

impl fmt::Display for TraceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Loaded configuration together with the file it came from.
#[derive(Debug, Clone, Default)]
pub struct ConfigManager {
    config: DevagentConfig,
    config_path: Option<PathBuf>,
}

impl ConfigManager {
    /// Load configuration from the default locations.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::load_from_file(path);
        }

        if let Ok(config_path) = env::var(CONFIG_PATH_ENV) {
            let trimmed = config_path.trim();
            if !trimmed.is_empty() {
                return Self::load_from_file(trimmed);
            }
        }

        let workspace = env::current_dir().map_err(|source| ConfigError::Io {
            path: PathBuf::from("."),
            source,
        })?;
        Self::load_from_workspace(&workspace, dirs::home_dir().as_deref())
    }

    /// Use the first config found in `workspace`, then under `home`.
    pub fn load_from_workspace(
        workspace: &Path,
        home: Option<&Path>,
    ) -> Result<Self, ConfigError> {
        let candidates = [
            Some(workspace.join(CONFIG_FILE_NAME)),
            home.map(|home| home.join(HOME_CONFIG_DIR).join(CONFIG_FILE_NAME)),
        ];

        for candidate in candidates.into_iter().flatten() {
            if candidate.is_file() {
                return Self::load_from_file(candidate);
            }
        }

        tracing::debug!(workspace = %workspace.display(), "no config file found, using defaults");
        Ok(Self::default())
    }

    /// Load configuration from a specific file. The file must exist.
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: DevagentConfig = toml::from_str(&content).map_err(|source| {
            ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            }
        })?;

        tracing::debug!(path = %path.display(), "loaded configuration");
        Ok(Self {
            config,
            config_path: Some(path.to_path_buf()),
        })
    }

    pub fn config(&self) -> &DevagentConfig {
        &self.config
    }

    pub fn config_path(&self) -> Option<&Path> {
        self.config_path.as_deref()
    }

    /// `catalog.path`, made absolute relative to the config file's directory.
    pub fn catalog_path(&self) -> Option<PathBuf> {
        let configured = self.config.catalog.path.as_ref()?;
        if configured.is_absolute() {
            return Some(configured.clone());
        }

        let base = self
            .config_path
            .as_deref()
            .and_then(Path::parent)
            .unwrap_or_else(|| Path::new(""));
        Some(base.join(configured))
    }
}
