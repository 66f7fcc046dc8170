//! Error types

use thiserror::Error;

/// Failures raised by the element tree and document.
///
/// The radio combo controller itself never returns these: missing structure
/// there is a no-op.
#[derive(Debug, Error)]
pub enum Error {
    #[error("duplicate element id: {0}")]
    DuplicateId(String),

    #[error("no element with id: {0}")]
    UnknownElement(String),

    #[error("cannot remove the root element: {0}")]
    RemoveRoot(String),

    #[error("element cannot be checked: {0}")]
    NotCheckable(String),

    #[error("invalid marker configuration: {0}")]
    Markers(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
