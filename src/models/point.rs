//! Planning view of a task.

use serde::{Deserialize, Serialize};

use super::{Coordinate, TaskId, Urgency};

/// A pickup location as seen by the sequencer.
///
/// Points are derived from tasks by the engine, which resolves each task's
/// map position. They carry only what planning needs.
///
/// # Examples
///
/// ```
/// use u_collect::models::{Coordinate, Point, Urgency};
///
/// let p = Point::new(1, Coordinate::new(20.0, 20.0), Urgency::Urgent);
/// assert!(!p.completed);
/// assert_eq!(p.stop().id, p.id);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// Task this point belongs to.
    pub id: TaskId,
    /// Resolved map position.
    pub position: Coordinate,
    /// Urgency class, used for score weighting.
    pub urgency: Urgency,
    /// Completed points never enter a plan.
    pub completed: bool,
}

impl Point {
    /// Creates an open point.
    pub fn new(id: impl Into<TaskId>, position: Coordinate, urgency: Urgency) -> Self {
        Self {
            id: id.into(),
            position,
            urgency,
            completed: false,
        }
    }

    /// Sequence element for this point.
    pub fn stop(&self) -> Stop {
        Stop {
            id: self.id,
            position: self.position,
        }
    }
}

/// One element of a [`RouteSequence`](super::RouteSequence).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Stop {
    /// Task to collect.
    pub id: TaskId,
    /// Where the truck has to go.
    pub position: Coordinate,
}
