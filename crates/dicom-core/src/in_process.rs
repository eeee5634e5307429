//! In-process backend.
//!
//! Holds remote frames in memory and evaluates delegated requests with the
//! same row-level logic as the local path. Used by the CLI's `--remote` mode
//! and by tests of the delegation contract.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use serde_json::Value;
use tracing::debug;

use crate::backend::{MetadataBackend, RemoteFrame};
use crate::error::BackendError;
use crate::frame::DicomFrames;
use crate::marshal::{criteria_from_native, keywords_from_native};
use crate::projector::append_projection;
use crate::transform::{RowSelection, select_frames};

/// Backend keeping frames in the local process.
///
/// Availability can be switched off to simulate an unreachable backend; the
/// switch is shared with every frame imported through this instance.
#[derive(Debug, Clone)]
pub struct InProcessBackend {
    available: Arc<AtomicBool>,
}

impl Default for InProcessBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl InProcessBackend {
    pub fn new() -> Self {
        Self {
            available: Arc::new(AtomicBool::new(true)),
        }
    }

    /// Marks the backend reachable or unreachable.
    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::Release);
    }

    fn ensure_available(available: &AtomicBool) -> Result<(), BackendError> {
        if available.load(Ordering::Acquire) {
            Ok(())
        } else {
            Err(BackendError::Unavailable(
                "in-process backend is offline".to_string(),
            ))
        }
    }
}

impl MetadataBackend for InProcessBackend {
    fn name(&self) -> &str {
        "in-process"
    }

    fn import(&self, frames: &DicomFrames) -> Result<Box<dyn RemoteFrame>, BackendError> {
        Self::ensure_available(&self.available)?;
        debug!(rows = frames.metadata().height(), "imported frames");
        Ok(Box::new(InProcessFrame {
            frames: frames.clone(),
            available: Arc::clone(&self.available),
        }))
    }
}

#[derive(Debug)]
struct InProcessFrame {
    frames: DicomFrames,
    available: Arc<AtomicBool>,
}

impl InProcessFrame {
    fn select(&mut self, criteria: &Value, selection: RowSelection) -> Result<(), BackendError> {
        InProcessBackend::ensure_available(&self.available)?;
        let criteria = criteria_from_native(criteria)?;
        self.frames =
            select_frames(&self.frames, &criteria, selection).map_err(BackendError::execution)?;
        Ok(())
    }
}

impl RemoteFrame for InProcessFrame {
    fn count(&self) -> Result<usize, BackendError> {
        InProcessBackend::ensure_available(&self.available)?;
        Ok(self.frames.metadata().height())
    }

    fn filter_by_tags(&mut self, criteria: &Value) -> Result<(), BackendError> {
        self.select(criteria, RowSelection::Keep)
    }

    fn drop_rows_by_tags(&mut self, criteria: &Value) -> Result<(), BackendError> {
        self.select(criteria, RowSelection::Drop)
    }

    fn extract_keywords(&mut self, keywords: &Value) -> Result<(), BackendError> {
        InProcessBackend::ensure_available(&self.available)?;
        let keywords = keywords_from_native(keywords)?;
        append_projection(&mut self.frames.metadata, &keywords).map_err(BackendError::execution)?;
        Ok(())
    }

    fn collect(&self) -> Result<DicomFrames, BackendError> {
        InProcessBackend::ensure_available(&self.available)?;
        Ok(self.frames.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::MetadataFrame;
    use serde_json::json;

    fn frames() -> DicomFrames {
        let doc = r#"<NativeDicomModel><DicomAttribute keyword="Modality" tag="00080060" vr="CS"><Value number="1">MR</Value></DicomAttribute></NativeDicomModel>"#;
        MetadataFrame::from_records([("0", doc), ("1", "<oops")])
            .unwrap()
            .into()
    }

    #[test]
    fn offline_backend_rejects_import() {
        let backend = InProcessBackend::new();
        backend.set_available(false);
        assert!(matches!(
            backend.import(&frames()),
            Err(BackendError::Unavailable(_))
        ));
    }

    #[test]
    fn failed_selection_keeps_remote_frame() {
        let backend = InProcessBackend::new();
        let mut remote = backend.import(&frames()).unwrap();
        let err = remote
            .filter_by_tags(&json!({"00080060": "MR"}))
            .unwrap_err();
        assert!(matches!(err, BackendError::Execution { .. }));
        assert_eq!(remote.count().unwrap(), 2);
    }

    #[test]
    fn rejects_non_native_keywords() {
        let backend = InProcessBackend::new();
        let mut remote = backend.import(&frames()).unwrap();
        assert!(matches!(
            remote.extract_keywords(&json!("Modality")),
            Err(BackendError::Marshal(_))
        ));
    }
}
