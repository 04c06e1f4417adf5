//! Error types for scheduler boundaries.
//!
//! Heap and scheduler operations themselves are infallible: looking at an
//! empty container yields `None`, never an error. Failures only exist at the
//! edges — request validation, kind dispatch, snapshot I/O.

use thiserror::Error;

/// Errors produced at the scheduling boundaries.
#[derive(Debug, Error)]
pub enum SchedulerError {
    /// Submitted task failed validation before reaching the core.
    #[error("invalid task: {0}")]
    InvalidTask(String),
    /// Configuration failed validation.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    /// Snapshot store failure with context.
    #[error("snapshot store error: {0}")]
    Store(String),
}

/// Application-facing result using anyhow for higher-level contexts.
pub type AppResult<T> = Result<T, anyhow::Error>;
