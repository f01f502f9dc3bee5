use std::io;

use thiserror::Error;

/// Result type alias for layout operations.
pub type Result<T> = std::result::Result<T, LayoutError>;

/// Errors raised while building a document.
#[derive(Error, Debug)]
pub enum LayoutError {
    /// The output target could not be created or written.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// An operation was called in a lifecycle state that does not allow it,
    /// e.g. drawing before the first page or after finalization.
    #[error("{operation} is not valid while the document is {state}")]
    InvalidState {
        operation: &'static str,
        state: &'static str,
    },

    /// Image data could not be decoded.
    #[error("Image error: {0}")]
    Image(String),
}
