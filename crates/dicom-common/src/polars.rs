//! Polars `AnyValue` helpers.
//!
//! Row identifiers are opaque and may arrive as integers or strings, so they
//! are rendered as text before being compared or reported.

use polars::prelude::{AnyValue, DataFrame, PolarsResult};

/// Renders a Polars `AnyValue` as text, keeping `Null` distinct.
///
/// # Examples
///
/// ```
/// use polars::prelude::AnyValue;
/// use dicom_common::any_to_optional_string;
///
/// assert_eq!(any_to_optional_string(AnyValue::Null), None);
/// assert_eq!(any_to_optional_string(AnyValue::Int64(7)), Some("7".to_string()));
/// ```
pub fn any_to_optional_string(value: AnyValue<'_>) -> Option<String> {
    match value {
        AnyValue::Null => None,
        AnyValue::Int8(v) => Some(v.to_string()),
        AnyValue::Int16(v) => Some(v.to_string()),
        AnyValue::Int32(v) => Some(v.to_string()),
        AnyValue::Int64(v) => Some(v.to_string()),
        AnyValue::UInt8(v) => Some(v.to_string()),
        AnyValue::UInt16(v) => Some(v.to_string()),
        AnyValue::UInt32(v) => Some(v.to_string()),
        AnyValue::UInt64(v) => Some(v.to_string()),
        AnyValue::String(s) => Some(s.to_string()),
        AnyValue::StringOwned(s) => Some(s.to_string()),
        other => Some(other.to_string()),
    }
}

/// Reads every cell of a column as text, in row order.
pub fn column_strings(df: &DataFrame, column: &str) -> PolarsResult<Vec<Option<String>>> {
    let column = df.column(column)?;
    let mut values = Vec::with_capacity(df.height());
    for idx in 0..df.height() {
        values.push(any_to_optional_string(column.get(idx)?));
    }
    Ok(values)
}
