//! Row-set selection by tag criteria.
//!
//! Filtering keeps the rows whose document matches the criteria; dropping
//! removes them. Both build a complete replacement frame before returning, so
//! a parse failure on any row leaves the input untouched.

use std::collections::HashSet;

use dicom_common::column_strings;
use dicom_model::TagCriteria;
use polars::prelude::{BooleanChunked, DataFrame, NewChunkedArray};
use tracing::{debug, trace};

use crate::error::Result;
use crate::frame::{DicomFrames, MetadataFrame};
use crate::matcher::matches;

/// Which side of the criteria a selection keeps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowSelection {
    /// Keep matching rows (`filter_by_tags`).
    Keep,
    /// Remove matching rows (`drop_rows_by_tags`).
    Drop,
}

impl RowSelection {
    /// Whether a row with the given match outcome survives.
    pub fn retains(self, matched: bool) -> bool {
        match self {
            Self::Keep => matched,
            Self::Drop => !matched,
        }
    }

    pub const fn operation(self) -> &'static str {
        match self {
            Self::Keep => "filter_by_tags",
            Self::Drop => "drop_rows_by_tags",
        }
    }
}

/// Computes the survival mask of every row.
pub fn selection_mask(
    frame: &MetadataFrame,
    criteria: &TagCriteria,
    selection: RowSelection,
) -> Result<Vec<bool>> {
    let rows = frame.rows()?;
    let mut keep = Vec::with_capacity(rows.len());
    for row in &rows {
        let matched = matches(&row.parse()?, criteria);
        trace!(row = row.index, matched, "evaluated tag criteria");
        keep.push(selection.retains(matched));
    }
    Ok(keep)
}

/// Returns a new metadata frame holding only the surviving rows.
pub fn select_rows(
    frame: &MetadataFrame,
    criteria: &TagCriteria,
    selection: RowSelection,
) -> Result<MetadataFrame> {
    let keep = selection_mask(frame, criteria, selection)?;
    let mask = BooleanChunked::from_slice("selection".into(), &keep);
    frame.with_data(frame.data().filter(&mask)?)
}

/// Applies a selection to a metadata frame and its pixel data together.
///
/// Pixel data rows are kept only when their id survives in the metadata.
pub fn select_frames(
    frames: &DicomFrames,
    criteria: &TagCriteria,
    selection: RowSelection,
) -> Result<DicomFrames> {
    let metadata = select_rows(&frames.metadata, criteria, selection)?;
    let pixeldata = match &frames.pixeldata {
        Some(pixels) => {
            let surviving: HashSet<String> = metadata.ids()?.into_iter().flatten().collect();
            Some(restrict_to_ids(
                pixels,
                &metadata.config().id_column,
                &surviving,
            )?)
        }
        None => None,
    };
    debug!(
        operation = selection.operation(),
        before = frames.metadata.height(),
        after = metadata.height(),
        "selected rows"
    );
    Ok(DicomFrames {
        metadata,
        pixeldata,
    })
}

/// Keeps the rows of `data` whose `id_column` value is in `ids`.
pub fn restrict_to_ids(data: &DataFrame, id_column: &str, ids: &HashSet<String>) -> Result<DataFrame> {
    let keep: Vec<bool> = column_strings(data, id_column)?
        .iter()
        .map(|id| id.as_ref().is_some_and(|id| ids.contains(id)))
        .collect();
    let mask = BooleanChunked::from_slice("ids".into(), &keep);
    Ok(data.filter(&mask)?)
}
