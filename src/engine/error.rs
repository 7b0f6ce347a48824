//! Errors returned by [`CollectionEngine`](super::CollectionEngine).

use thiserror::Error;

use crate::config::ConfigError;
use crate::models::{TaskId, TaskStatus};
use crate::store::StoreError;

/// Collection session failure.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    /// The configuration failed validation.
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    /// The task store rejected a task list or an unknown ID.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Only open → completed is allowed; urgency is fixed and completion is final.
    #[error("task {id} cannot change from {from} to {to}")]
    IllegalTransition {
        id: TaskId,
        from: TaskStatus,
        to: TaskStatus,
    },
}

/// Result alias for session operations.
pub type EngineResult<T> = Result<T, EngineError>;
