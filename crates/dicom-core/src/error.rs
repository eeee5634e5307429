//! Error types for metadata operations.
//!
//! Failures fall into three groups that callers handle differently:
//! validation of caller input, per-row document parse failures on the local
//! path, and failures raised by the backend on the delegated path.

use dicom_model::ModelError;
use dicom_xml::XmlError;
use thiserror::Error;

/// Error type for dataset operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum DicomError {
    /// Caller-supplied criteria or keywords were rejected before any row was read.
    #[error("invalid argument: {0}")]
    Validation(#[from] ModelError),

    /// A row's metadata document is not valid XML.
    #[error("metadata document at row {row} (id {id}) could not be parsed: {source}")]
    Parse {
        row: usize,
        id: String,
        #[source]
        source: XmlError,
    },

    /// The backend failed while executing a delegated operation.
    #[error("backend failure: {0}")]
    Delegation(#[from] BackendError),

    /// A required column is missing from a frame.
    #[error("column '{column}' not found")]
    ColumnNotFound { column: String },

    /// A column exists but does not hold text.
    #[error("column '{column}' has type {found}, expected String")]
    ColumnType { column: String, found: String },

    /// Appended columns do not agree with their declared schema.
    #[error("schema mismatch: {message}")]
    Schema { message: String },

    /// Polars DataFrame operation error.
    #[error("DataFrame error: {0}")]
    Polars(#[from] polars::error::PolarsError),
}

impl DicomError {
    /// True for failures caused by caller input rather than data or backend.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    pub(crate) fn schema(message: impl Into<String>) -> Self {
        Self::Schema {
            message: message.into(),
        }
    }
}

/// Failures reported by a [`MetadataBackend`](crate::backend::MetadataBackend).
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum BackendError {
    /// The backend cannot be reached.
    #[error("backend unavailable: {0}")]
    Unavailable(String),

    /// A native value could not be converted to or from the core types.
    #[error("cannot convert native value: {0}")]
    Marshal(String),

    /// The backend accepted the request but failed to execute it.
    #[error("execution failed: {source}")]
    Execution {
        #[source]
        source: Box<DicomError>,
    },
}

impl BackendError {
    pub(crate) fn execution(source: DicomError) -> Self {
        Self::Execution {
            source: Box::new(source),
        }
    }
}

pub type Result<T> = std::result::Result<T, DicomError>;
