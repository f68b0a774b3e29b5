use std::env;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::catalog::ModelCatalog;
use crate::config::ConfigManager;
use crate::error::CatalogError;

pub const CATALOG_PATH_ENV: &str = "DEVAGENT_CATALOG_PATH";

/// Where a catalog was read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogSource {
    /// The document compiled into this crate.
    Bundled,
    File(PathBuf),
}

impl CatalogSource {
    pub fn path(&self) -> Option<&Path> {
        match self {
            CatalogSource::Bundled => None,
            CatalogSource::File(path) => Some(path),
        }
    }
}

impl fmt::Display for CatalogSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogSource::Bundled => f.write_str("bundled catalog"),
            CatalogSource::File(path) => write!(f, "{}", path.display()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct LoadedCatalog {
    pub catalog: ModelCatalog,
    pub source: CatalogSource,
}

/// Resolves which catalog document to read.
///
/// Precedence: explicit path, then `DEVAGENT_CATALOG_PATH`, then
/// `catalog.path` from configuration, then the bundled document.
#[derive(Debug, Clone)]
pub struct CatalogLoader {
    explicit: Option<PathBuf>,
    configured: Option<PathBuf>,
    read_env: bool,
}

impl Default for CatalogLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl CatalogLoader {
    pub fn new() -> Self {
        Self {
            explicit: None,
            configured: None,
            read_env: true,
        }
    }

    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.explicit = Some(path.into());
        self
    }

    pub fn with_optional_path(mut self, path: Option<PathBuf>) -> Self {
        self.explicit = path;
        self
    }

    pub fn with_config(mut self, config: &ConfigManager) -> Self {
        self.configured = config.catalog_path();
        self
    }

    /// Skip the environment variable lookup.
    pub fn ignore_env(mut self) -> Self {
        self.read_env = false;
        self
    }

    pub fn resolve(&self) -> CatalogSource {
        if let Some(path) = &self.explicit {
            return CatalogSource::File(path.clone());
        }

        if self.read_env {
            if let Ok(value) = env::var(CATALOG_PATH_ENV) {
                let trimmed = value.trim();
                if !trimmed.is_empty() {
                    return CatalogSource::File(PathBuf::from(trimmed));
                }
            }
        }

        match &self.configured {
            Some(path) => CatalogSource::File(path.clone()),
            None => CatalogSource::Bundled,
        }
    }

    pub fn load(&self) -> Result<LoadedCatalog, CatalogError> {
        let source = self.resolve();
        let catalog = match &source {
            CatalogSource::Bundled => ModelCatalog::bundled()?,
            CatalogSource::File(path) => ModelCatalog::from_path(path)?,
        };

        tracing::info!(source = %source, entries = catalog.len(), "model catalog loaded");
        Ok(LoadedCatalog { catalog, source })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_path_wins_over_config() {
        let loader = CatalogLoader {
            explicit: Some(PathBuf::from("/tmp/explicit.json")),
            configured: Some(PathBuf::from("/tmp/configured.json")),
            read_env: false,
        };
        assert_eq!(
            loader.resolve(),
            CatalogSource::File(PathBuf::from("/tmp/explicit.json"))
        );
    }

    #[test]
    fn falls_back_to_bundled() {
        let loader = CatalogLoader::new().ignore_env();
        assert_eq!(loader.resolve(), CatalogSource::Bundled);
        assert_eq!(loader.resolve().path(), None);
        assert_eq!(loader.resolve().to_string(), "bundled catalog");
    }

    #[test]
    fn bundled_load_reports_source() {
        let loaded = CatalogLoader::new().ignore_env().load().expect("bundled");
        assert_eq!(loaded.source, CatalogSource::Bundled);
        assert!(!loaded.catalog.is_empty());
    }
}
