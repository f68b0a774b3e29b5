use serde::{Deserialize, Serialize};

use crate::quantity::{GpuPolicy, MemorySize};

/// Dotted paths of every field a catalog record must carry as a non-empty
/// string, in document order.
pub const REQUIRED_FIELDS: &[&str] = &[
    "id",
    "name",
    "description",
    "source",
    "category",
    "requirements.ram",
    "requirements.disk",
    "requirements.gpu",
    "install_command",
];

/// One downloadable model and its install metadata.
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelEntry {
    /// Unique key across the catalog.
    pub id: String,
    /// Display name.
    pub name: String,
    pub description: String,
    /// Publisher or organization.
    pub source: String,
    /// Free-text grouping label.
    pub category: String,
    pub requirements: Requirements,
    /// Shell command handed to an external package manager. Never
    /// interpreted here.
    pub install_command: String,
}

impl ModelEntry {
    /// Look up a field by its dotted path as listed in [`REQUIRED_FIELDS`].
    pub fn field(&self, path: &str) -> Option<&str> {
        let value = match path {
            "id" => &self.id,
            "name" => &self.name,
            "description" => &self.description,
            "source" => &self.source,
            "category" => &self.category,
            "requirements.ram" => &self.requirements.ram,
            "requirements.disk" => &self.requirements.disk,
            "requirements.gpu" => &self.requirements.gpu,
            "install_command" => &self.install_command,
            _ => return None,
        };
        Some(value.as_str())
    }
}

/// Hardware needed to run a model, as written by a human.
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Requirements {
    pub ram: String,
    pub disk: String,
    pub gpu: String,
}

impl Requirements {
    pub fn ram_size(&self) -> Option<MemorySize> {
        MemorySize::parse(&self.ram)
    }

    pub fn disk_size(&self) -> Option<MemorySize> {
        MemorySize::parse(&self.disk)
    }

    pub fn gpu_policy(&self) -> GpuPolicy {
        GpuPolicy::parse(&self.gpu)
    }
}
