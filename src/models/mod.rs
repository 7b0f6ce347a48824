//! Domain model types for collection routing.
//!
//! Provides the core abstractions: map coordinates, collection tasks with
//! urgency and fill level, the planning view of a task, and the queue of
//! stops a truck works through.

mod coordinate;
mod point;
mod route;
mod task;

pub use coordinate::Coordinate;
pub use point::{Point, Stop};
pub use route::RouteSequence;
pub use task::{demo_tasks, ParseStatusError, Task, TaskId, TaskRecord, TaskStatus, Urgency};
