//! Events emitted by the motion simulator.

use serde::Serialize;

use crate::models::{Coordinate, TaskId};

/// The truck reached a stop.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletionEvent {
    /// Task whose stop was reached.
    pub task_id: TaskId,
    /// Position of the reached stop.
    pub position: Coordinate,
    /// Simulator tick count at arrival (1-based).
    pub tick: u64,
}
