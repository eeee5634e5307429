//! Reader for Native DICOM Model XML documents.
//!
//! Each metadata record stores one document of the form:
//!
//! ```xml
//! <NativeDicomModel xml:space="preserve">
//!   <DicomAttribute keyword="Manufacturer" tag="00080070" vr="LO">
//!     <Value number="1">SIEMENS</Value>
//!   </DicomAttribute>
//! </NativeDicomModel>
//! ```
//!
//! [`parse`] turns such a document into an [`AttributeSet`](dicom_model::AttributeSet)
//! indexed by tag and keyword.

pub mod error;
pub mod reader;

pub use error::{Result, XmlError};
pub use reader::parse;
