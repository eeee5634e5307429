use thiserror::Error;

/// Validation failures for caller-supplied criteria and keyword lists.
///
/// These are raised at the boundary, before any row of a dataset is touched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    #[error("tag criteria must be a mapping of tag to value, found {found}")]
    CriteriaNotMapping { found: String },
    #[error("tag criteria value for '{tag}' must be a string, found {found}")]
    CriteriaValueNotString { tag: String, found: String },
    #[error("tag criteria must contain at least one tag")]
    EmptyCriteria,
    #[error("tag '{tag}' appears more than once in criteria")]
    DuplicateTag { tag: String },
    #[error("keywords must be a string or a list of strings, found {found}")]
    KeywordsNotSequence { found: String },
    #[error("at least one keyword is required")]
    EmptyKeywords,
    #[error("{kind} must not be blank")]
    BlankName { kind: &'static str },
}

pub type Result<T> = std::result::Result<T, ModelError>;

/// Short type label for a JSON value, used in validation messages.
pub(crate) fn json_type_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}
