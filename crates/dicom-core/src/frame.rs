//! Local frame types for metadata datasets.
//!
//! A [`MetadataFrame`] wraps a Polars DataFrame holding one metadata record
//! per row: an opaque identifier column and a column of XML documents.
//! [`DicomFrames`] pairs it with an optional pixel data frame keyed by the
//! same identifier.

use std::collections::HashSet;

use dicom_common::column_strings;
use dicom_model::AttributeSet;
use polars::prelude::{Column, DataFrame, DataType, NamedFrom, Series, StringChunked};
use serde::{Deserialize, Serialize};

use crate::error::{DicomError, Result};

/// Column names of a metadata frame.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrameConfig {
    /// Row identifier column; any dtype.
    pub id_column: String,
    /// XML document column; must be String.
    pub metadata_column: String,
}

impl Default for FrameConfig {
    fn default() -> Self {
        Self {
            id_column: "id".to_string(),
            metadata_column: "metadata".to_string(),
        }
    }
}

/// One record as seen by a per-row transform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetadataRow<'a> {
    /// Position of the row in the frame.
    pub index: usize,
    /// Row identifier rendered as text.
    pub id: Option<String>,
    /// The XML document, `None` for a null cell.
    pub document: Option<&'a str>,
}

impl MetadataRow<'_> {
    /// Parses the row's document; a null document is reported as malformed.
    pub fn parse(&self) -> Result<AttributeSet> {
        dicom_xml::parse(self.document.unwrap_or_default()).map_err(|source| DicomError::Parse {
            row: self.index,
            id: self.id_label(),
            source,
        })
    }

    fn id_label(&self) -> String {
        self.id.clone().unwrap_or_else(|| "<null>".to_string())
    }
}

/// A locally materialized metadata frame.
#[derive(Debug, Clone)]
pub struct MetadataFrame {
    data: DataFrame,
    config: FrameConfig,
}

impl MetadataFrame {
    /// Wraps a DataFrame, checking that both configured columns exist and
    /// that the metadata column holds text.
    pub fn new(data: DataFrame, config: FrameConfig) -> Result<Self> {
        require_column(&data, &config.id_column)?;
        let metadata = require_column(&data, &config.metadata_column)?;
        if metadata.dtype() != &DataType::String {
            return Err(DicomError::ColumnType {
                column: config.metadata_column.clone(),
                found: metadata.dtype().to_string(),
            });
        }
        Ok(Self { data, config })
    }

    /// Builds a frame with the default column names from `(id, document)` pairs.
    pub fn from_records<I, K, D>(records: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, D)>,
        K: Into<String>,
        D: Into<String>,
    {
        let config = FrameConfig::default();
        let (ids, documents): (Vec<String>, Vec<String>) = records
            .into_iter()
            .map(|(id, document)| (id.into(), document.into()))
            .unzip();
        let data = DataFrame::new(vec![
            Column::new(config.id_column.as_str().into(), ids),
            Column::new(config.metadata_column.as_str().into(), documents),
        ])?;
        Self::new(data, config)
    }

    pub fn data(&self) -> &DataFrame {
        &self.data
    }

    pub fn into_data(self) -> DataFrame {
        self.data
    }

    pub fn config(&self) -> &FrameConfig {
        &self.config
    }

    /// Number of records.
    pub fn height(&self) -> usize {
        self.data.height()
    }

    pub fn column_names(&self) -> Vec<String> {
        self.data
            .get_column_names()
            .into_iter()
            .map(|name| name.to_string())
            .collect()
    }

    /// The XML document column.
    pub fn documents(&self) -> Result<&StringChunked> {
        Ok(self.data.column(&self.config.metadata_column)?.str()?)
    }

    /// Row identifiers rendered as text, in row order.
    pub fn ids(&self) -> Result<Vec<Option<String>>> {
        Ok(column_strings(&self.data, &self.config.id_column)?)
    }

    /// All rows, ready for per-row evaluation.
    pub fn rows(&self) -> Result<Vec<MetadataRow<'_>>> {
        let ids = self.ids()?;
        let documents = self.documents()?;
        Ok(ids
            .into_iter()
            .zip(documents)
            .enumerate()
            .map(|(index, (id, document))| MetadataRow {
                index,
                id,
                document,
            })
            .collect())
    }

    /// Returns a frame over `data` with the same column configuration.
    pub(crate) fn with_data(&self, data: DataFrame) -> Result<Self> {
        Self::new(data, self.config.clone())
    }

    /// Appends columns computed by `transform` from each row.
    ///
    /// `transform` returns one value per schema entry, in schema order; each
    /// column is built as text and cast to its declared type. The frame is
    /// only modified once every row has been transformed.
    pub fn add_columns<F>(&mut self, mut transform: F, schema: &[(String, DataType)]) -> Result<()>
    where
        F: FnMut(&MetadataRow<'_>) -> Result<Vec<Option<String>>>,
    {
        self.check_new_columns(schema)?;
        let mut columns: Vec<Vec<Option<String>>> =
            vec![Vec::with_capacity(self.height()); schema.len()];
        for row in self.rows()? {
            let values = transform(&row)?;
            if values.len() != schema.len() {
                return Err(DicomError::schema(format!(
                    "row {} produced {} values for {} declared columns",
                    row.index,
                    values.len(),
                    schema.len()
                )));
            }
            for (column, value) in columns.iter_mut().zip(values) {
                column.push(value);
            }
        }

        let mut data = self.data.clone();
        for ((name, dtype), values) in schema.iter().zip(columns) {
            let series = Series::new(name.as_str().into(), values).cast(dtype)?;
            data.with_column(series)?;
        }
        self.data = data;
        Ok(())
    }

    fn check_new_columns(&self, schema: &[(String, DataType)]) -> Result<()> {
        let mut seen: HashSet<&str> = self
            .data
            .get_column_names()
            .into_iter()
            .map(|name| name.as_str())
            .collect();
        for (name, _) in schema {
            if !seen.insert(name.as_str()) {
                return Err(DicomError::schema(format!("column '{name}' already exists")));
            }
        }
        Ok(())
    }
}

/// A metadata frame and its optional pixel data frame.
#[derive(Debug, Clone)]
pub struct DicomFrames {
    pub(crate) metadata: MetadataFrame,
    pub(crate) pixeldata: Option<DataFrame>,
}

impl DicomFrames {
    pub fn new(metadata: MetadataFrame) -> Self {
        Self {
            metadata,
            pixeldata: None,
        }
    }

    /// Attaches pixel data; it must carry the metadata frame's id column.
    pub fn with_pixeldata(mut self, pixeldata: DataFrame) -> Result<Self> {
        require_column(&pixeldata, &self.metadata.config.id_column)?;
        self.pixeldata = Some(pixeldata);
        Ok(self)
    }

    pub fn metadata(&self) -> &MetadataFrame {
        &self.metadata
    }

    pub fn pixeldata(&self) -> Option<&DataFrame> {
        self.pixeldata.as_ref()
    }

    pub fn into_parts(self) -> (MetadataFrame, Option<DataFrame>) {
        (self.metadata, self.pixeldata)
    }
}

impl From<MetadataFrame> for DicomFrames {
    fn from(metadata: MetadataFrame) -> Self {
        Self::new(metadata)
    }
}

fn require_column<'a>(data: &'a DataFrame, name: &str) -> Result<&'a Column> {
    data.column(name)
        .map_err(|_| DicomError::ColumnNotFound {
            column: name.to_string(),
        })
}
