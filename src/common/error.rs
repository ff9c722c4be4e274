//! Unified error types for specdeck.
//!
//! Only batch-level failures surface through this type: an invalid product
//! record, an unreadable template, or a serialization failure. Per-slide
//! recoverable conditions (a missing asset, an undecodable image) are
//! absorbed where they occur and never become an `Error`.
use thiserror::Error;

/// Result type for specdeck operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for specdeck operations.
#[derive(Error, Debug)]
pub enum Error {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A product record is missing its required code field
    #[error("product at index {index} has no code")]
    MissingCode { index: usize },

    /// Template package is missing a required part
    #[error("part not found: {0}")]
    PartNotFound(String),

    /// Invalid pack URI
    #[error("invalid pack URI: {0}")]
    InvalidPackUri(String),

    /// Template structure error
    #[error("template error: {0}")]
    Template(String),

    /// XML parsing or generation error
    #[error("XML error: {0}")]
    Xml(String),

    /// ZIP archive error
    #[error("ZIP error: {0}")]
    Zip(String),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl From<quick_xml::Error> for Error {
    fn from(err: quick_xml::Error) -> Self {
        Error::Xml(err.to_string())
    }
}

impl From<zip::result::ZipError> for Error {
    fn from(err: zip::result::ZipError) -> Self {
        Error::Zip(err.to_string())
    }
}

impl From<std::fmt::Error> for Error {
    fn from(err: std::fmt::Error) -> Self {
        Error::Xml(err.to_string())
    }
}
