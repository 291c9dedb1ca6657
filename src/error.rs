use thiserror::Error;

/// Convenience result type for pipeline operations.
pub type PipelineResult<T> = Result<T, PipelineError>;

/// Error type returned by the pipeline's fallible operations.
///
/// Per-cell parse failures and per-country lookup failures are deliberately
/// *not* errors: they degrade to [`crate::types::Value::Missing`] and surface
/// as [`crate::observability::Diagnostic`] records instead, so one bad cell
/// never aborts a whole table.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Underlying I/O error (e.g. file not found, permission denied).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV read/write error.
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON (de)serialization error (configuration files, raw value grids).
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// A named range was not present in the backing store.
    #[error("named range '{range_id}' not found")]
    RangeNotFound { range_id: String },

    /// The table does not have the shape an operation requires
    /// (missing required column, row arity mismatch, empty raw grid).
    #[error("schema mismatch: {message}")]
    SchemaMismatch { message: String },
}
