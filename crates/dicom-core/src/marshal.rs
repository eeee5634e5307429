//! Conversion between core types and the backend's native representation.
//!
//! Backends receive criteria as a JSON object of strings and keyword lists as
//! a JSON array of strings. Nothing outside this module and the backends
//! depends on that encoding.

use dicom_model::{KeywordSpec, TagCriteria};
use serde_json::{Map, Value};

use crate::error::BackendError;

/// Encodes criteria as a native key-value mapping.
pub fn criteria_to_native(criteria: &TagCriteria) -> Value {
    let entries: Map<String, Value> = criteria
        .iter()
        .map(|(tag, expected)| (tag.to_string(), Value::String(expected.to_string())))
        .collect();
    Value::Object(entries)
}

/// Encodes keywords as a native ordered sequence.
pub fn keywords_to_native(keywords: &KeywordSpec) -> Value {
    Value::Array(
        keywords
            .iter()
            .map(|keyword| Value::String(keyword.to_string()))
            .collect(),
    )
}

/// Decodes a native mapping back into criteria.
pub fn criteria_from_native(value: &Value) -> Result<TagCriteria, BackendError> {
    TagCriteria::from_json(value).map_err(|error| BackendError::Marshal(error.to_string()))
}

/// Decodes a native sequence back into keywords; a bare string is rejected.
pub fn keywords_from_native(value: &Value) -> Result<KeywordSpec, BackendError> {
    if !value.is_array() {
        return Err(BackendError::Marshal(
            "keywords must be encoded as a sequence".to_string(),
        ));
    }
    KeywordSpec::from_json(value).map_err(|error| BackendError::Marshal(error.to_string()))
}
