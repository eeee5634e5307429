//! Tag and keyword operations over DICOM metadata frames.
//!
//! This crate provides the row-level logic and its execution routing:
//!
//! - **matcher**: tag criteria evaluation against an attribute set
//! - **projector**: keyword projection into ordered value tuples
//! - **transform**: filter/drop row selection over whole frames
//! - **frame**: local metadata and pixel data frames
//! - **marshal**: native encodings exchanged with a backend
//! - **backend**: the backend contract, with an in-process implementation
//! - **dataset**: [`DicomDataset`], which routes each call by locality

pub mod backend;
pub mod dataset;
pub mod error;
pub mod frame;
pub mod in_process;
pub mod marshal;
pub mod matcher;
pub mod projector;
pub mod transform;

pub use backend::{MetadataBackend, RemoteFrame};
pub use dataset::{DicomDataset, MetadataStore};
pub use error::{BackendError, DicomError, Result};
pub use frame::{DicomFrames, FrameConfig, MetadataFrame, MetadataRow};
pub use in_process::InProcessBackend;
pub use matcher::matches;
pub use projector::{append_projection, project, projected_column_names};
pub use transform::{RowSelection, select_frames, select_rows, selection_mask};

pub use dicom_model::{
    AttributeSet, IntoCriteria, IntoKeywords, KeywordSpec, Locality, ModelError, TagCriteria,
};
