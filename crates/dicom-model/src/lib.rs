//! Data model for DICOM metadata operations.
//!
//! - **attributes**: [`AttributeSet`], one record's parsed attributes
//! - **criteria**: [`TagCriteria`], the `{tag: value}` mapping for filter/drop
//! - **keywords**: [`KeywordSpec`], the ordered keyword list for extraction
//! - **locality**: [`Locality`], where the metadata column resides

pub mod attributes;
pub mod criteria;
pub mod error;
pub mod keywords;
pub mod locality;

pub use attributes::AttributeSet;
pub use criteria::{IntoCriteria, TagCriteria};
pub use error::{ModelError, Result};
pub use keywords::{IntoKeywords, KeywordSpec};
pub use locality::Locality;
