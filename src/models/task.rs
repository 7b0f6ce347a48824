//! Collection tasks, urgency classes, and display status.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

use super::Coordinate;

/// Stable identifier of a collection task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(pub u32);

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl From<u32> for TaskId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

/// Urgency class of a pickup. Fixed for the lifetime of a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Urgency {
    /// Bin needs emptying soon; planned with a distance discount.
    Urgent,
    /// Regular collection.
    #[default]
    Normal,
}

/// Three-valued status as shown by the host UI.
///
/// This folds urgency and completion into one value for display. Planning
/// never looks at it; see [`Task::status`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    /// Not yet collected, urgent.
    Urgent,
    /// Not yet collected, regular.
    Normal,
    /// Collected.
    Completed,
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TaskStatus::Urgent => "urgent",
            TaskStatus::Normal => "normal",
            TaskStatus::Completed => "completed",
        };
        f.write_str(s)
    }
}

/// Unrecognized status string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown task status {0:?}, expected urgent, normal or completed")]
pub struct ParseStatusError(pub String);

impl FromStr for TaskStatus {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "urgent" => Ok(TaskStatus::Urgent),
            "normal" => Ok(TaskStatus::Normal),
            "completed" => Ok(TaskStatus::Completed),
            _ => Err(ParseStatusError(s.to_owned())),
        }
    }
}

/// A waste-collection task: one bin at one address.
///
/// # Examples
///
/// ```
/// use u_collect::models::{Task, TaskStatus, Urgency};
///
/// let t = Task::new(1, "123 Main St", Urgency::Urgent, 90.0);
/// assert_eq!(t.status(), TaskStatus::Urgent);
/// assert!(!t.is_completed());
///
/// // Fill level is clamped into [0, 100].
/// let t = Task::new(2, "456 Elm St", Urgency::Normal, 140.0);
/// assert_eq!(t.fill_level(), 100.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    id: TaskId,
    address: String,
    #[serde(default)]
    urgency: Urgency,
    #[serde(default, deserialize_with = "deserialize_fill")]
    fill_level: f64,
    #[serde(default)]
    completed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    position: Option<Coordinate>,
}

impl Task {
    /// Creates an open (not completed) task without an explicit position.
    pub fn new(
        id: impl Into<TaskId>,
        address: impl Into<String>,
        urgency: Urgency,
        fill_level: f64,
    ) -> Self {
        Self {
            id: id.into(),
            address: address.into(),
            urgency,
            fill_level: clamp_fill(fill_level),
            completed: false,
            position: None,
        }
    }

    /// Creates a task from the host's three-valued status.
    ///
    /// A `Completed` status carries no urgency; the task is recorded as
    /// `Normal` and completed.
    pub fn from_status(
        id: impl Into<TaskId>,
        address: impl Into<String>,
        status: TaskStatus,
        fill_level: f64,
    ) -> Self {
        let urgency = match status {
            TaskStatus::Urgent => Urgency::Urgent,
            TaskStatus::Normal | TaskStatus::Completed => Urgency::Normal,
        };
        let mut task = Self::new(id, address, urgency, fill_level);
        task.completed = status == TaskStatus::Completed;
        task
    }

    /// Pins the task to an explicit map position instead of the layout slot.
    pub fn with_position(mut self, position: Coordinate) -> Self {
        self.position = Some(position);
        self
    }

    /// Marks the task as already completed.
    pub fn completed(mut self) -> Self {
        self.completed = true;
        self
    }

    /// Task ID.
    pub fn id(&self) -> TaskId {
        self.id
    }

    /// Street address shown in the task list.
    pub fn address(&self) -> &str {
        &self.address
    }

    /// Urgency class.
    pub fn urgency(&self) -> Urgency {
        self.urgency
    }

    /// Bin fill level in percent, `[0, 100]`. Display only.
    pub fn fill_level(&self) -> f64 {
        self.fill_level
    }

    /// Whether the bin has been collected.
    pub fn is_completed(&self) -> bool {
        self.completed
    }

    /// Explicit map position, if the host supplied one.
    pub fn position(&self) -> Option<Coordinate> {
        self.position
    }

    /// Display status: `Completed` once collected, otherwise the urgency.
    pub fn status(&self) -> TaskStatus {
        match (self.completed, self.urgency) {
            (true, _) => TaskStatus::Completed,
            (false, Urgency::Urgent) => TaskStatus::Urgent,
            (false, Urgency::Normal) => TaskStatus::Normal,
        }
    }

    /// Sets the completed flag. Returns `true` if it changed.
    pub(crate) fn mark_completed(&mut self) -> bool {
        let changed = !self.completed;
        self.completed = true;
        changed
    }
}

/// A task in the host dashboard's own shape, with the folded `status`.
///
/// ```
/// use u_collect::models::{Task, TaskRecord, TaskStatus};
///
/// let record: TaskRecord = serde_json::from_str(
///     r#"{"id": 1, "address": "123 Main St", "status": "urgent", "fillLevel": 90}"#,
/// ).unwrap();
/// let task = Task::from(record);
/// assert_eq!(task.status(), TaskStatus::Urgent);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskRecord {
    /// Task ID.
    pub id: TaskId,
    /// Street address.
    pub address: String,
    /// Folded urgency/completion status.
    pub status: TaskStatus,
    /// Fill level in percent.
    #[serde(default)]
    pub fill_level: f64,
    /// Optional explicit map position.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<Coordinate>,
}

impl From<TaskRecord> for Task {
    fn from(record: TaskRecord) -> Self {
        let task = Task::from_status(record.id, record.address, record.status, record.fill_level);
        match record.position {
            Some(p) => task.with_position(p),
            None => task,
        }
    }
}

impl From<&Task> for TaskRecord {
    fn from(task: &Task) -> Self {
        Self {
            id: task.id,
            address: task.address.clone(),
            status: task.status(),
            fill_level: task.fill_level,
            position: task.position,
        }
    }
}

fn deserialize_fill<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    f64::deserialize(deserializer).map(clamp_fill)
}

fn clamp_fill(level: f64) -> f64 {
    if level.is_nan() {
        0.0
    } else {
        level.clamp(0.0, 100.0)
    }
}

/// The five bins of the demo route.
pub fn demo_tasks() -> Vec<Task> {
    vec![
        Task::new(1, "123 Main St", Urgency::Urgent, 90.0),
        Task::new(2, "456 Elm St", Urgency::Normal, 65.0),
        Task::new(3, "789 Oak St", Urgency::Normal, 50.0),
        Task::new(4, "321 Pine St", Urgency::Urgent, 85.0),
        Task::new(5, "654 Maple Ave", Urgency::Normal, 40.0),
    ]
}
