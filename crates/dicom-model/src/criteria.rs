//! Tag criteria: the `{tag: expected value}` mapping used by filter and drop.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{ModelError, Result, json_type_name};

/// Non-empty mapping from tag code to the exact value a row must carry.
///
/// Keys are unique and iteration order is sorted by tag, so two criteria built
/// from the same pairs in any order compare equal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "BTreeMap<String, String>", into = "BTreeMap<String, String>")]
pub struct TagCriteria {
    entries: BTreeMap<String, String>,
}

impl TagCriteria {
    /// Build criteria from `(tag, value)` pairs.
    ///
    /// Rejects an empty input, blank tags, and tags listed twice.
    pub fn from_pairs<I, K, V>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut entries = BTreeMap::new();
        for (tag, value) in pairs {
            let tag = tag.into();
            if tag.trim().is_empty() {
                return Err(ModelError::BlankName { kind: "tag" });
            }
            if entries.contains_key(&tag) {
                return Err(ModelError::DuplicateTag { tag });
            }
            entries.insert(tag, value.into());
        }
        Self::from_map(entries)
    }

    fn from_map(entries: BTreeMap<String, String>) -> Result<Self> {
        if entries.is_empty() {
            return Err(ModelError::EmptyCriteria);
        }
        if entries.keys().any(|tag| tag.trim().is_empty()) {
            return Err(ModelError::BlankName { kind: "tag" });
        }
        Ok(Self { entries })
    }

    /// Build criteria from a JSON value, which must be an object of strings.
    pub fn from_json(value: &Value) -> Result<Self> {
        let Value::Object(object) = value else {
            return Err(ModelError::CriteriaNotMapping {
                found: json_type_name(value).to_string(),
            });
        };
        let mut entries = BTreeMap::new();
        for (tag, expected) in object {
            let Value::String(expected) = expected else {
                return Err(ModelError::CriteriaValueNotString {
                    tag: tag.clone(),
                    found: json_type_name(expected).to_string(),
                });
            };
            entries.insert(tag.clone(), expected.clone());
        }
        Self::from_map(entries)
    }

    /// Parse criteria from JSON text such as `{"00080070": "SIEMENS"}`.
    pub fn parse_json(text: &str) -> Result<Self> {
        let value: Value =
            serde_json::from_str(text).map_err(|error| ModelError::CriteriaNotMapping {
                found: format!("invalid JSON ({error})"),
            })?;
        Self::from_json(&value)
    }

    pub fn get(&self, tag: &str) -> Option<&str> {
        self.entries.get(tag).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false for a constructed value; kept for API symmetry.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate `(tag, expected value)` pairs in tag order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(tag, value)| (tag.as_str(), value.as_str()))
    }
}

impl TryFrom<BTreeMap<String, String>> for TagCriteria {
    type Error = ModelError;

    fn try_from(entries: BTreeMap<String, String>) -> Result<Self> {
        Self::from_map(entries)
    }
}

impl From<TagCriteria> for BTreeMap<String, String> {
    fn from(criteria: TagCriteria) -> Self {
        criteria.entries
    }
}

/// Conversion of caller input into validated [`TagCriteria`].
///
/// Implemented for the mapping shapes a caller may hand over, plus JSON
/// values, whose shape is only known at runtime.
pub trait IntoCriteria {
    fn into_criteria(self) -> Result<TagCriteria>;
}

impl IntoCriteria for TagCriteria {
    fn into_criteria(self) -> Result<TagCriteria> {
        Ok(self)
    }
}

impl IntoCriteria for &TagCriteria {
    fn into_criteria(self) -> Result<TagCriteria> {
        Ok(self.clone())
    }
}

impl IntoCriteria for BTreeMap<String, String> {
    fn into_criteria(self) -> Result<TagCriteria> {
        TagCriteria::from_map(self)
    }
}

impl<S: std::hash::BuildHasher> IntoCriteria for HashMap<String, String, S> {
    fn into_criteria(self) -> Result<TagCriteria> {
        TagCriteria::from_map(self.into_iter().collect())
    }
}

impl IntoCriteria for Vec<(String, String)> {
    fn into_criteria(self) -> Result<TagCriteria> {
        TagCriteria::from_pairs(self)
    }
}

impl<const N: usize> IntoCriteria for [(&str, &str); N] {
    fn into_criteria(self) -> Result<TagCriteria> {
        TagCriteria::from_pairs(self)
    }
}

impl IntoCriteria for &Value {
    fn into_criteria(self) -> Result<TagCriteria> {
        TagCriteria::from_json(self)
    }
}

impl IntoCriteria for Value {
    fn into_criteria(self) -> Result<TagCriteria> {
        TagCriteria::from_json(&self)
    }
}
