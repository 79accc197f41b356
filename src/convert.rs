//! JSON to YAML conversion of API detail documents
//!
//! The document is decoded into a generic value tree and re-encoded as block
//! YAML. Mapping keys keep the order they had in the JSON source.

use serde_json::Value;

use crate::error::{ExportError, ExportResult};

/// Convert a JSON document to YAML text
///
/// Empty input, malformed JSON and a top-level `null` are rejected.
pub fn json_to_yaml(body: &[u8]) -> ExportResult<String> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Err(ExportError::Conversion("empty document".to_string()));
    }

    let value: Value = serde_json::from_slice(body)
        .map_err(|e| ExportError::Conversion(format!("Unmarshal failed: {}", e)))?;

    if value.is_null() {
        return Err(ExportError::Conversion("document is null".to_string()));
    }

    serde_yaml::to_string(&value).map_err(|e| {
        ExportError::Conversion(format!("Error marshaling into YAML from JSON: {}", e))
    })
}
