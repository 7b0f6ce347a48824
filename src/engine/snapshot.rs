//! Render state handed to the presentation layer.

use serde::Serialize;

use crate::models::{Coordinate, Point, Task, TaskId, TaskStatus, Urgency};
use crate::simulation::Phase;

/// Truck marker.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TruckView {
    /// Horizontal position, percent of width.
    pub x: f64,
    /// Vertical position, percent of height.
    pub y: f64,
    /// CSS `top`, e.g. `"90%"`.
    pub top: String,
    /// CSS `left`, e.g. `"10%"`.
    pub left: String,
}

impl From<Coordinate> for TruckView {
    fn from(c: Coordinate) -> Self {
        Self {
            x: c.x,
            y: c.y,
            top: c.top(),
            left: c.left(),
        }
    }
}

/// One bin pin.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PointView {
    /// Task ID.
    pub id: TaskId,
    /// Street address shown in the task list.
    pub address: String,
    /// Pin position, percent of width.
    pub x: f64,
    /// Pin position, percent of height.
    pub y: f64,
    /// CSS `top` of the pin.
    pub top: String,
    /// CSS `left` of the pin.
    pub left: String,
    /// Planning urgency; unchanged by completion.
    pub urgency: Urgency,
    /// Bin fill level in [0, 100].
    pub fill_level: f64,
    /// Display status; `Completed` once collected.
    pub status: TaskStatus,
}

impl PointView {
    pub(crate) fn new(task: &Task, point: &Point) -> Self {
        Self {
            id: task.id(),
            address: task.address().to_owned(),
            x: point.position.x,
            y: point.position.y,
            top: point.position.top(),
            left: point.position.left(),
            urgency: task.urgency(),
            fill_level: task.fill_level(),
            status: task.status(),
        }
    }
}

/// Everything the map panel draws in one frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    /// Truck marker.
    pub truck: TruckView,
    /// All pins in task-list order, completed ones included.
    pub points: Vec<PointView>,
    /// Last completed or clicked point, for highlighting.
    pub selected: Option<TaskId>,
    /// Number of completed tasks.
    pub completed: usize,
    /// Number of tasks.
    pub total: usize,
    /// Remaining stops in visiting order.
    pub route: Vec<TaskId>,
    /// Whether the start/stop control is on.
    pub route_started: bool,
    /// Simulator phase; `Idle` once the queue runs out even if started.
    pub phase: Phase,
}

impl Snapshot {
    /// Pin for `id`, if present.
    pub fn point(&self, id: TaskId) -> Option<&PointView> {
        self.points.iter().find(|p| p.id == id)
    }

    /// Selected pin, if any.
    pub fn selected_point(&self) -> Option<&PointView> {
        self.selected.and_then(|id| self.point(id))
    }
}
