//! Typed access to the Qwen3-DevAgent model catalog.
//!
//! The catalog is a single JSON document with one top-level field,
//! `models`, holding an ordered list of [`ModelEntry`] records. This crate
//! defines that schema, validates documents against it and re-serializes
//! them unchanged. It never runs `install_command`; that string is handed
//! to whatever tool consumes the catalog.
//!
//! ```no_run
//! use devagent_catalog::ModelCatalog;
//!
//! let catalog = ModelCatalog::bundled()?;
//! let qwen = catalog.get("qwen3").expect("bundled entry");
//! assert_eq!(qwen.install_command, "ollama pull qwen3");
//! # Ok::<(), devagent_catalog::CatalogError>(())
//! ```

pub mod catalog;
pub mod config;
pub mod entry;
pub mod error;
pub mod loader;
pub mod quantity;
#[cfg(feature = "schema")]
pub mod schema;

pub use catalog::{CatalogDocument, ModelCatalog, bundled_document};
pub use config::{ConfigManager, DevagentConfig, TraceLevel};
pub use entry::{ModelEntry, REQUIRED_FIELDS, Requirements};
pub use error::{CatalogError, ConfigError, SchemaViolation};
pub use loader::{CATALOG_PATH_ENV, CatalogLoader, CatalogSource, LoadedCatalog};
pub use quantity::{GpuLevel, GpuPolicy, MemorySize};
#[cfg(feature = "schema")]
pub use schema::{catalog_schema, catalog_schema_pretty};
