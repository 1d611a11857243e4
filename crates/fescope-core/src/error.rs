//! Error types for fescope.

use thiserror::Error;

/// The main error type for fescope operations.
#[derive(Error, Debug)]
pub enum FescopeError {
    /// The time series exposes no steps (or nothing displayable).
    #[error("time series contains no data to display")]
    NoData,

    /// A scalar field with the given name exists in neither point nor cell data.
    #[error("field '{0}' not found in point or cell data")]
    UnknownField(String),

    /// A component index is out of bounds for the field's width.
    #[error("component {index} out of range for a field with {width} components")]
    InvalidComponent { index: usize, width: usize },

    /// A cell has fewer than three affinely independent points.
    ///
    /// Internal and recovered: the decomposer skips such cells instead of
    /// surfacing this to callers.
    #[error("degenerate cell has no renderable boundary")]
    DegenerateCell,

    /// A binding operation was attempted before a mesh was opened.
    #[error("no mesh is loaded - call open() first")]
    NotLoaded,

    /// Mesh construction invariant violation.
    #[error("invalid mesh: {0}")]
    InvalidMesh(String),

    /// Data size mismatch.
    #[error("data size mismatch: expected {expected}, got {actual}")]
    SizeMismatch { expected: usize, actual: usize },

    /// A time-series source was asked for a step it does not have.
    #[error("step index {0} out of range")]
    StepOutOfRange(usize),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// A specialized Result type for fescope operations.
pub type Result<T> = std::result::Result<T, FescopeError>;
