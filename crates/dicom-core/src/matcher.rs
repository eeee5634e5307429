//! Tag matching against parsed attribute sets.

use dicom_model::{AttributeSet, TagCriteria};

/// Returns true iff every `(tag, expected)` pair of `criteria` is present in
/// `attrs` with exactly that value.
///
/// Only tag codes are consulted; a criteria key naming a keyword matches
/// nothing. Comparison is case-sensitive string equality with no
/// normalization of numbers or dates. A tag that is missing, or present
/// without a value, never matches.
pub fn matches(attrs: &AttributeSet, criteria: &TagCriteria) -> bool {
    criteria
        .iter()
        .all(|(tag, expected)| attrs.tag_value(tag) == Some(expected))
}
