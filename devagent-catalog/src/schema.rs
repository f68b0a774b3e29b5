#![cfg(feature = "schema")]

use schemars::{Schema, schema_for};

use crate::catalog::CatalogDocument;

/// JSON Schema describing a catalog document.
pub fn catalog_schema() -> Schema {
    schema_for!(CatalogDocument)
}

/// Render the catalog schema as a pretty-printed JSON string.
pub fn catalog_schema_pretty() -> serde_json::Result<String> {
    serde_json::to_string_pretty(&catalog_schema())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::REQUIRED_FIELDS;

    #[test]
    fn schema_requires_every_entry_field() {
        let schema = serde_json::to_value(catalog_schema()).expect("schema json");
        let rendered = schema.to_string();
        for &field in REQUIRED_FIELDS {
            let leaf = field.rsplit('.').next().unwrap_or(field);
            assert!(rendered.contains(leaf), "schema does not mention {leaf}");
        }
        assert_eq!(schema["required"], serde_json::json!(["models"]));
    }
}
