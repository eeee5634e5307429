//! Error types for metadata document parsing.

use thiserror::Error;

/// A metadata document that could not be read as XML.
///
/// Positions are byte offsets into the document text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum XmlError {
    /// The XML tokenizer rejected the document.
    #[error("malformed XML at byte {position}: {message}")]
    Syntax { position: u64, message: String },

    /// The document ended while elements were still open.
    #[error("unexpected end of document: <{element}> is not closed")]
    Unclosed { element: String },

    /// The document contains no root element.
    #[error("document has no root element")]
    MissingRoot,

    /// Content found after the root element was closed.
    #[error("content after root element at byte {position}")]
    TrailingContent { position: u64 },

    /// An entity reference that is neither predefined nor a character reference.
    #[error("unknown entity '&{name};' at byte {position}")]
    UnknownEntity { name: String, position: u64 },
}

pub type Result<T> = std::result::Result<T, XmlError>;
