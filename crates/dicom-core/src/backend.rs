//! Contract between datasets and the backend that holds remote metadata.
//!
//! A backend owns frames that live outside the local process. Operations are
//! requested with native values produced by [`crate::marshal`] and mutate the
//! remote frame in place.

use std::fmt;

use serde_json::Value;

use crate::error::BackendError;
use crate::frame::DicomFrames;

/// Entry point of a backend: uploads local frames.
pub trait MetadataBackend: Send + Sync + fmt::Debug {
    /// Short name used in logs.
    fn name(&self) -> &str;

    /// Copies `frames` into the backend and returns a handle to the copy.
    fn import(&self, frames: &DicomFrames) -> Result<Box<dyn RemoteFrame>, BackendError>;
}

/// Handle to metadata (and pixel data) held by a backend.
///
/// Mutating operations either apply completely or leave the frame as it was.
pub trait RemoteFrame: Send + fmt::Debug {
    /// Number of metadata rows.
    fn count(&self) -> Result<usize, BackendError>;

    /// Keeps the rows matching a native `{tag: value}` mapping.
    fn filter_by_tags(&mut self, criteria: &Value) -> Result<(), BackendError>;

    /// Removes the rows matching a native `{tag: value}` mapping.
    fn drop_rows_by_tags(&mut self, criteria: &Value) -> Result<(), BackendError>;

    /// Appends one String column per keyword of a native keyword sequence.
    fn extract_keywords(&mut self, keywords: &Value) -> Result<(), BackendError>;

    /// Copies the frames into the local process.
    fn collect(&self) -> Result<DicomFrames, BackendError>;
}
