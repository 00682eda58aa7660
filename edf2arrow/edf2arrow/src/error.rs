//! Error type for the EDF reader and pipeline.

use edf2arrow_core::{JoinError, MergeError, NormalizeError};
use edf2arrow_edfapi::EdfApiError;

/// Errors produced by [`EdfReader`](crate::EdfReader) and
/// [`assemble_tables`](crate::assemble_tables).
#[derive(Debug, thiserror::Error)]
pub enum EdfReaderError {
    /// The source path does not exist; raised before any native call.
    #[error("file \"{path}\" does not exist")]
    FileNotFound { path: String },

    /// Failure in the native reader; fatal for the file, no partial
    /// recovery is attempted.
    #[error(transparent)]
    Native(#[from] EdfApiError),

    #[error(transparent)]
    Merge(#[from] MergeError),

    #[error(transparent)]
    Join(#[from] JoinError),

    #[error(transparent)]
    Normalize(#[from] NormalizeError),
}
