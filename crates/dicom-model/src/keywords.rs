//! Keyword lists for projecting attribute values into columns.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{ModelError, Result, json_type_name};

/// Ordered, non-empty list of keyword names.
///
/// Duplicates are kept: each occurrence produces its own output column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct KeywordSpec {
    keywords: Vec<String>,
}

impl KeywordSpec {
    pub fn new<I, S>(keywords: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let keywords: Vec<String> = keywords.into_iter().map(Into::into).collect();
        if keywords.is_empty() {
            return Err(ModelError::EmptyKeywords);
        }
        if keywords.iter().any(|keyword| keyword.trim().is_empty()) {
            return Err(ModelError::BlankName { kind: "keyword" });
        }
        Ok(Self { keywords })
    }

    /// Build a keyword list from a JSON string or array of strings.
    pub fn from_json(value: &Value) -> Result<Self> {
        match value {
            Value::String(keyword) => Self::new([keyword.as_str()]),
            Value::Array(items) => {
                let mut keywords = Vec::with_capacity(items.len());
                for item in items {
                    let Value::String(keyword) = item else {
                        return Err(ModelError::KeywordsNotSequence {
                            found: format!("array containing {}", json_type_name(item)),
                        });
                    };
                    keywords.push(keyword.clone());
                }
                Self::new(keywords)
            }
            other => Err(ModelError::KeywordsNotSequence {
                found: json_type_name(other).to_string(),
            }),
        }
    }

    pub fn len(&self) -> usize {
        self.keywords.len()
    }

    /// Always false for a constructed value.
    pub fn is_empty(&self) -> bool {
        self.keywords.is_empty()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.keywords
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.keywords.iter().map(String::as_str)
    }
}

impl TryFrom<Vec<String>> for KeywordSpec {
    type Error = ModelError;

    fn try_from(keywords: Vec<String>) -> Result<Self> {
        Self::new(keywords)
    }
}

impl From<KeywordSpec> for Vec<String> {
    fn from(spec: KeywordSpec) -> Self {
        spec.keywords
    }
}

/// Normalizes a single keyword or a list of keywords into a [`KeywordSpec`].
pub trait IntoKeywords {
    fn into_keywords(self) -> Result<KeywordSpec>;
}

impl IntoKeywords for KeywordSpec {
    fn into_keywords(self) -> Result<KeywordSpec> {
        Ok(self)
    }
}

impl IntoKeywords for &KeywordSpec {
    fn into_keywords(self) -> Result<KeywordSpec> {
        Ok(self.clone())
    }
}

impl IntoKeywords for &str {
    fn into_keywords(self) -> Result<KeywordSpec> {
        KeywordSpec::new([self])
    }
}

impl IntoKeywords for String {
    fn into_keywords(self) -> Result<KeywordSpec> {
        KeywordSpec::new([self])
    }
}

impl IntoKeywords for Vec<String> {
    fn into_keywords(self) -> Result<KeywordSpec> {
        KeywordSpec::new(self)
    }
}

impl IntoKeywords for Vec<&str> {
    fn into_keywords(self) -> Result<KeywordSpec> {
        KeywordSpec::new(self)
    }
}

impl IntoKeywords for &[String] {
    fn into_keywords(self) -> Result<KeywordSpec> {
        KeywordSpec::new(self.iter().cloned())
    }
}

impl IntoKeywords for &[&str] {
    fn into_keywords(self) -> Result<KeywordSpec> {
        KeywordSpec::new(self.iter().copied())
    }
}

impl<const N: usize> IntoKeywords for [&str; N] {
    fn into_keywords(self) -> Result<KeywordSpec> {
        KeywordSpec::new(self)
    }
}

impl IntoKeywords for &Value {
    fn into_keywords(self) -> Result<KeywordSpec> {
        KeywordSpec::from_json(self)
    }
}

impl IntoKeywords for Value {
    fn into_keywords(self) -> Result<KeywordSpec> {
        KeywordSpec::from_json(&self)
    }
}
