use std::fs;
use std::path::Path;

use indexmap::IndexMap;
use indexmap::map::Entry;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;

use crate::entry::{ModelEntry, REQUIRED_FIELDS};
use crate::error::{CatalogError, SchemaViolation};

const BUNDLED_CATALOG: &str = include_str!("../data/models.json");

/// Raw text of the catalog document compiled into this crate.
pub fn bundled_document() -> &'static str {
    BUNDLED_CATALOG
}

/// Wire shape of a catalog document: `{ "models": [ ... ] }`.
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogDocument {
    pub models: Vec<ModelEntry>,
}

#[derive(Serialize)]
struct DocumentView<'a> {
    models: Vec<&'a ModelEntry>,
}

/// Validated, read-only set of catalog entries in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModelCatalog {
    entries: IndexMap<String, ModelEntry>,
}

impl ModelCatalog {
    /// Parse the catalog compiled into this crate.
    pub fn bundled() -> Result<Self, CatalogError> {
        Self::from_json_str(BUNDLED_CATALOG)
    }

    /// Read and validate a catalog file. Only a failed read is
    /// [`CatalogError::Io`]; bytes that are not JSON (including invalid
    /// UTF-8) are [`CatalogError::MalformedData`].
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        tracing::debug!(path = %path.display(), "reading catalog document");
        let bytes = fs::read(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let root: Value = serde_json::from_slice(&bytes).map_err(CatalogError::MalformedData)?;
        Self::from_value(root)
    }

    /// Parse and validate a catalog document.
    ///
    /// Text that is not JSON is [`CatalogError::MalformedData`]; any
    /// structural problem is [`CatalogError::SchemaViolation`].
    pub fn from_json_str(text: &str) -> Result<Self, CatalogError> {
        let root: Value = serde_json::from_str(text).map_err(CatalogError::MalformedData)?;
        Self::from_value(root)
    }

    pub fn from_value(root: Value) -> Result<Self, CatalogError> {
        let Value::Object(mut object) = root else {
            return Err(SchemaViolation::NotAnObject.into());
        };
        let models = object
            .remove("models")
            .ok_or(SchemaViolation::MissingModels)?;
        let Value::Array(records) = models else {
            return Err(SchemaViolation::ModelsNotArray.into());
        };

        let mut entries = IndexMap::with_capacity(records.len());
        for (index, record) in records.into_iter().enumerate() {
            check_record_shape(index, &record)?;
            // Shape was checked above, so a failure here means serde and the
            // shape check disagree about what a record is.
            let entry: ModelEntry =
                serde_json::from_value(record).map_err(CatalogError::MalformedData)?;
            insert_entry(&mut entries, index, entry)?;
        }

        tracing::trace!(entries = entries.len(), "catalog validated");
        Ok(Self { entries })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.entries.contains_key(id)
    }

    pub fn get(&self, id: &str) -> Option<&ModelEntry> {
        self.entries.get(id)
    }

    pub fn iter(&self) -> impl ExactSizeIterator<Item = &ModelEntry> + '_ {
        self.entries.values()
    }

    pub fn entries(&self) -> Vec<&ModelEntry> {
        self.iter().collect()
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.keys().map(String::as_str)
    }

    /// Entries grouped under their category label. Groups and the entries
    /// inside them keep document order.
    pub fn by_category(&self) -> IndexMap<&str, Vec<&ModelEntry>> {
        let mut groups: IndexMap<&str, Vec<&ModelEntry>> = IndexMap::new();
        for entry in self.entries.values() {
            groups.entry(entry.category.as_str()).or_default().push(entry);
        }
        groups
    }

    /// The entry with the largest RAM requirement, with disk as tiebreaker.
    /// Entries whose RAM string does not parse are skipped; on a full tie
    /// the earlier entry wins.
    pub fn most_demanding(&self) -> Option<&ModelEntry> {
        self.entries
            .values()
            .filter_map(|entry| {
                let requirements = &entry.requirements;
                let ram = requirements.ram_size()?;
                Some(((ram, requirements.disk_size()), entry))
            })
            .reduce(|best, candidate| if candidate.0 > best.0 { candidate } else { best })
            .map(|(_, entry)| entry)
    }

    /// Owned copy of the document this catalog was loaded from.
    pub fn to_document(&self) -> CatalogDocument {
        CatalogDocument {
            models: self.entries.values().cloned().collect(),
        }
    }

    pub fn to_json_string(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Two-space indented document with non-ASCII text left as-is.
    pub fn to_json_string_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl Serialize for ModelCatalog {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        DocumentView {
            models: self.entries.values().collect(),
        }
        .serialize(serializer)
    }
}

impl TryFrom<CatalogDocument> for ModelCatalog {
    type Error = SchemaViolation;

    fn try_from(document: CatalogDocument) -> Result<Self, Self::Error> {
        let mut entries = IndexMap::with_capacity(document.models.len());
        for (index, entry) in document.models.into_iter().enumerate() {
            insert_entry(&mut entries, index, entry)?;
        }
        Ok(Self { entries })
    }
}

impl<'a> IntoIterator for &'a ModelCatalog {
    type Item = &'a ModelEntry;
    type IntoIter = indexmap::map::Values<'a, String, ModelEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.values()
    }
}

fn check_record_shape(index: usize, record: &Value) -> Result<(), SchemaViolation> {
    if !record.is_object() {
        return Err(SchemaViolation::EntryNotObject { index });
    }

    for &field in REQUIRED_FIELDS {
        let pointer = format!("/{}", field.replace('.', "/"));
        match record.pointer(&pointer) {
            None => return Err(SchemaViolation::MissingField { index, field }),
            Some(Value::String(_)) => {}
            Some(_) => return Err(SchemaViolation::InvalidFieldType { index, field }),
        }
    }

    Ok(())
}

fn insert_entry(
    entries: &mut IndexMap<String, ModelEntry>,
    index: usize,
    entry: ModelEntry,
) -> Result<(), SchemaViolation> {
    for &field in REQUIRED_FIELDS {
        let blank = entry.field(field).is_none_or(|value| value.trim().is_empty());
        if blank {
            return Err(SchemaViolation::EmptyField { index, field });
        }
    }

    match entries.entry(entry.id.clone()) {
        Entry::Occupied(existing) => Err(SchemaViolation::DuplicateId {
            id: entry.id,
            first: existing.index(),
            second: index,
        }),
        Entry::Vacant(slot) => {
            slot.insert(entry);
            Ok(())
        }
    }
}
