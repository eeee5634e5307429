//! Locality-aware dataset handle.
//!
//! [`DicomDataset`] is the caller-facing entry point for tag and keyword
//! operations. Each call validates its input, then routes on the declared
//! [`Locality`] of the metadata:
//!
//! | Operation | Remote | Local |
//! |---|---|---|
//! | `filter_by_tags` | delegate | upload, then delegate |
//! | `drop_rows_by_tags` | delegate | upload, then delegate |
//! | `extract_keywords` | delegate | parse and project row by row |

use std::sync::Arc;

use dicom_model::{IntoCriteria, IntoKeywords, Locality, TagCriteria};
use polars::prelude::DataFrame;
use tracing::{debug, info};

use crate::backend::{MetadataBackend, RemoteFrame};
use crate::error::{BackendError, Result};
use crate::frame::DicomFrames;
use crate::marshal::{criteria_to_native, keywords_to_native};
use crate::projector::append_projection;
use crate::transform::RowSelection;

/// Where the dataset's frames are held.
#[derive(Debug)]
pub enum MetadataStore {
    /// Held by the backend behind a handle.
    Remote(Box<dyn RemoteFrame>),
    /// Materialized in this process.
    Local(DicomFrames),
}

impl MetadataStore {
    pub fn locality(&self) -> Locality {
        match self {
            Self::Remote(_) => Locality::Remote,
            Self::Local(_) => Locality::Local,
        }
    }
}

/// A metadata dataset bound to a backend.
#[derive(Debug)]
pub struct DicomDataset {
    store: MetadataStore,
    backend: Arc<dyn MetadataBackend>,
}

impl DicomDataset {
    /// A dataset whose frames are already materialized locally.
    pub fn local(frames: impl Into<DicomFrames>, backend: Arc<dyn MetadataBackend>) -> Self {
        Self {
            store: MetadataStore::Local(frames.into()),
            backend,
        }
    }

    /// A dataset whose frames are uploaded to the backend immediately.
    pub fn remote(frames: impl Into<DicomFrames>, backend: Arc<dyn MetadataBackend>) -> Result<Self> {
        let remote = backend.import(&frames.into())?;
        Ok(Self::from_remote(remote, backend))
    }

    /// Wraps an existing backend handle.
    pub fn from_remote(remote: Box<dyn RemoteFrame>, backend: Arc<dyn MetadataBackend>) -> Self {
        Self {
            store: MetadataStore::Remote(remote),
            backend,
        }
    }

    pub fn locality(&self) -> Locality {
        self.store.locality()
    }

    /// Number of metadata rows.
    pub fn count(&self) -> Result<usize> {
        match &self.store {
            MetadataStore::Remote(remote) => Ok(remote.count()?),
            MetadataStore::Local(frames) => Ok(frames.metadata().height()),
        }
    }

    /// Snapshot of the frames, collected from the backend when remote.
    pub fn frames(&self) -> Result<DicomFrames> {
        match &self.store {
            MetadataStore::Remote(remote) => Ok(remote.collect()?),
            MetadataStore::Local(frames) => Ok(frames.clone()),
        }
    }

    /// Snapshot of the metadata DataFrame.
    pub fn metadata(&self) -> Result<DataFrame> {
        Ok(self.frames()?.metadata().data().clone())
    }

    /// Snapshot of the pixel data DataFrame, if the dataset has one.
    pub fn pixeldata(&self) -> Result<Option<DataFrame>> {
        Ok(self.frames()?.pixeldata().cloned())
    }

    /// Consumes the dataset and returns its frames, collecting them from the
    /// backend when remote.
    pub fn into_frames(self) -> Result<DicomFrames> {
        match self.store {
            MetadataStore::Remote(remote) => Ok(remote.collect()?),
            MetadataStore::Local(frames) => Ok(frames),
        }
    }

    /// Pulls remote frames into the local process. No-op when already local.
    pub fn materialize(&mut self) -> Result<()> {
        if let MetadataStore::Remote(remote) = &self.store {
            let frames = remote.collect()?;
            debug!(rows = frames.metadata().height(), "materialized remote metadata");
            self.store = MetadataStore::Local(frames);
        }
        Ok(())
    }

    /// Keeps only the rows whose metadata matches every `{tag: value}` pair.
    ///
    /// Always executed by the backend; local frames are uploaded first.
    ///
    /// # Errors
    ///
    /// Returns a validation error, without touching the dataset, if
    /// `criteria` is not a non-empty mapping of strings.
    pub fn filter_by_tags<C: IntoCriteria>(&mut self, criteria: C) -> Result<()> {
        let criteria = criteria.into_criteria()?;
        self.delegate_selection(&criteria, RowSelection::Keep)
    }

    /// Removes the rows whose metadata matches every `{tag: value}` pair.
    ///
    /// The complement of [`filter_by_tags`](Self::filter_by_tags).
    pub fn drop_rows_by_tags<C: IntoCriteria>(&mut self, criteria: C) -> Result<()> {
        let criteria = criteria.into_criteria()?;
        self.delegate_selection(&criteria, RowSelection::Drop)
    }

    /// Appends one String column per keyword holding that keyword's value.
    ///
    /// Accepts a single keyword or a list. Rows without the keyword get null.
    pub fn extract_keywords<K: IntoKeywords>(&mut self, keywords: K) -> Result<()> {
        let keywords = keywords.into_keywords()?;
        match &mut self.store {
            MetadataStore::Remote(remote) => {
                debug!(
                    backend = self.backend.name(),
                    keywords = keywords.len(),
                    "delegating keyword extraction"
                );
                remote.extract_keywords(&keywords_to_native(&keywords))?;
                info!(keywords = keywords.len(), "extracted keywords remotely");
            }
            MetadataStore::Local(frames) => {
                let columns = append_projection(&mut frames.metadata, &keywords)?;
                info!(columns = ?columns, rows = frames.metadata.height(), "extracted keywords locally");
            }
        }
        Ok(())
    }

    fn delegate_selection(&mut self, criteria: &TagCriteria, selection: RowSelection) -> Result<()> {
        let native = criteria_to_native(criteria);
        let remote = self.ensure_remote()?;
        match selection {
            RowSelection::Keep => remote.filter_by_tags(&native)?,
            RowSelection::Drop => remote.drop_rows_by_tags(&native)?,
        }
        info!(
            operation = selection.operation(),
            tags = criteria.len(),
            "row selection delegated"
        );
        Ok(())
    }

    /// Uploads local frames if needed and returns the backend handle.
    ///
    /// The store is replaced only after a successful upload.
    fn ensure_remote(&mut self) -> Result<&mut Box<dyn RemoteFrame>> {
        if let MetadataStore::Local(frames) = &self.store {
            debug!(
                backend = self.backend.name(),
                rows = frames.metadata().height(),
                "uploading local metadata for delegated execution"
            );
            let remote = self.backend.import(frames)?;
            self.store = MetadataStore::Remote(remote);
        }
        match &mut self.store {
            MetadataStore::Remote(remote) => Ok(remote),
            MetadataStore::Local(_) => Err(BackendError::Unavailable(
                "metadata was not uploaded".to_string(),
            )
            .into()),
        }
    }
}
