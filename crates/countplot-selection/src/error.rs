//! Error types for countplot-selection

use thiserror::Error;

/// Selection errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectionError {
    #[error("No snapshot loaded")]
    NoSnapshot,

    #[error("Snapshot has no points")]
    EmptySnapshot,

    #[error("Point index {index} out of range (snapshot has {len} points)")]
    OutOfRange { index: usize, len: usize },
}

/// Result type for selection operations
pub type SelectionResult<T> = Result<T, SelectionError>;
