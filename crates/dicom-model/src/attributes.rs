//! Parsed attribute sets for a single metadata record.
//!
//! An [`AttributeSet`] is the transient view of one record's Native DICOM Model
//! document. Every attribute is reachable by its tag code (`00080070`) and by
//! its keyword (`Manufacturer`) when the document carries one.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Tag-indexed and keyword-indexed values of one document.
///
/// The two indexes are separate: a tag code is never found by a keyword
/// lookup, nor a keyword by a tag lookup. A key that is missing and a key
/// present without a value both read as "no value"; an empty string is a
/// real value and is kept distinct from either.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeSet {
    by_tag: HashMap<String, Option<String>>,
    by_keyword: HashMap<String, Option<String>>,
}

impl AttributeSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one attribute under its tag and keyword.
    ///
    /// Attributes are recorded in document order, so a later attribute
    /// reusing a tag or keyword replaces the earlier value.
    pub fn insert_attribute(
        &mut self,
        tag: Option<&str>,
        keyword: Option<&str>,
        value: Option<String>,
    ) {
        if let Some(tag) = tag.filter(|tag| !tag.is_empty()) {
            self.by_tag.insert(tag.to_string(), value.clone());
        }
        if let Some(keyword) = keyword.filter(|keyword| !keyword.is_empty()) {
            self.by_keyword.insert(keyword.to_string(), value);
        }
    }

    /// Value of the attribute with tag code `tag`.
    pub fn tag_value(&self, tag: &str) -> Option<&str> {
        self.by_tag.get(tag).and_then(|value| value.as_deref())
    }

    /// Value of the attribute named `keyword`.
    pub fn keyword_value(&self, keyword: &str) -> Option<&str> {
        self.by_keyword.get(keyword).and_then(|value| value.as_deref())
    }

    /// True if the document has an attribute with this tag, valued or not.
    pub fn has_tag(&self, tag: &str) -> bool {
        self.by_tag.contains_key(tag)
    }

    /// True if the document has an attribute with this keyword, valued or not.
    pub fn has_keyword(&self, keyword: &str) -> bool {
        self.by_keyword.contains_key(keyword)
    }

    pub fn tag_count(&self) -> usize {
        self.by_tag.len()
    }

    pub fn keyword_count(&self) -> usize {
        self.by_keyword.len()
    }
}
