//! Keyword projection into fixed-width, ordered value tuples.

use std::collections::HashSet;

use dicom_model::{AttributeSet, KeywordSpec};
use polars::prelude::DataType;
use tracing::debug;

use crate::error::Result;
use crate::frame::MetadataFrame;

/// Declared type of every projected column.
pub const PROJECTED_DTYPE: DataType = DataType::String;

/// Looks up each keyword in order, yielding `None` where it has no value.
/// Tag codes are not keywords and project to `None`.
///
/// The result always has one entry per keyword, and entry `i` belongs to
/// keyword `i`.
pub fn project(attrs: &AttributeSet, keywords: &KeywordSpec) -> Vec<Option<String>> {
    keywords
        .iter()
        .map(|keyword| attrs.keyword_value(keyword).map(str::to_string))
        .collect()
}

/// Chooses output column names for `keywords`.
///
/// A keyword that collides with an existing column or an earlier keyword is
/// suffixed `_1`, `_2`, and so on until the name is free.
pub fn projected_column_names<I, S>(existing: I, keywords: &KeywordSpec) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut taken: HashSet<String> = existing.into_iter().map(Into::into).collect();
    keywords
        .iter()
        .map(|keyword| {
            let mut name = keyword.to_string();
            let mut suffix = 1usize;
            while taken.contains(&name) {
                name = format!("{keyword}_{suffix}");
                suffix += 1;
            }
            taken.insert(name.clone());
            name
        })
        .collect()
}

/// Parses every row locally and appends one String column per keyword.
///
/// Returns the names of the appended columns. Fails on the first row whose
/// document cannot be parsed, leaving the frame unchanged.
pub fn append_projection(frame: &mut MetadataFrame, keywords: &KeywordSpec) -> Result<Vec<String>> {
    let names = projected_column_names(frame.column_names(), keywords);
    let schema: Vec<(String, DataType)> = names
        .iter()
        .map(|name| (name.clone(), PROJECTED_DTYPE))
        .collect();
    frame.add_columns(|row| Ok(project(&row.parse()?, keywords)), &schema)?;
    debug!(columns = ?names, rows = frame.height(), "appended projected columns");
    Ok(names)
}
