//! Task store: the host-owned source of truth for tasks and their status.

use std::collections::{HashMap, HashSet};

use thiserror::Error;

use crate::models::{Task, TaskId};

/// Task store failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// No task with this ID.
    #[error("task {0} not found")]
    UnknownTask(TaskId),

    /// A task list contained the same ID twice.
    #[error("task {0} appears more than once")]
    DuplicateTask(TaskId),

    /// A task carried a NaN or infinite position.
    #[error("task {0} has a non-finite position")]
    NonFinitePosition(TaskId),
}

/// Access to the tasks the engine plans over.
///
/// The engine only reads tasks and requests completion; everything else
/// about a task belongs to the host. Implement this over the host's own
/// state to avoid copying, or use [`TaskBoard`].
///
/// Implementations must keep completion terminal: once
/// [`mark_completed`](TaskStore::mark_completed) succeeded for an ID, that
/// task stays completed, including across [`replace`](TaskStore::replace).
/// They must also reject tasks whose explicit position is not finite.
pub trait TaskStore {
    /// All tasks in display order.
    fn tasks(&self) -> &[Task];

    /// Looks up one task.
    fn get(&self, id: TaskId) -> Option<&Task> {
        self.tasks().iter().find(|t| t.id() == id)
    }

    /// Marks a task completed.
    ///
    /// Returns `Ok(true)` if the task transitioned, `Ok(false)` if it was
    /// already completed.
    fn mark_completed(&mut self, id: TaskId) -> Result<bool, StoreError>;

    /// Replaces the whole task list.
    fn replace(&mut self, tasks: Vec<Task>) -> Result<(), StoreError>;

    /// Number of completed tasks.
    fn completed_count(&self) -> usize {
        self.tasks().iter().filter(|t| t.is_completed()).count()
    }
}

/// In-memory [`TaskStore`].
///
/// # Examples
///
/// ```
/// use u_collect::models::{Task, TaskId, Urgency};
/// use u_collect::store::{TaskBoard, TaskStore};
///
/// let mut board = TaskBoard::new(vec![
///     Task::new(1, "123 Main St", Urgency::Urgent, 90.0),
///     Task::new(2, "456 Elm St", Urgency::Normal, 65.0),
/// ]).unwrap();
///
/// assert_eq!(board.mark_completed(TaskId(1)), Ok(true));
/// assert_eq!(board.mark_completed(TaskId(1)), Ok(false));
/// assert_eq!(board.completed_count(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct TaskBoard {
    tasks: Vec<Task>,
    index: HashMap<TaskId, usize>,
    /// Every ID ever completed, kept even after `replace` drops the task.
    completed: HashSet<TaskId>,
}

impl TaskBoard {
    /// Creates a board, rejecting duplicate IDs and non-finite positions.
    pub fn new(tasks: Vec<Task>) -> Result<Self, StoreError> {
        let mut board = Self::default();
        board.replace(tasks)?;
        Ok(board)
    }

    /// Number of tasks.
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Returns `true` if the board holds no tasks.
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}

impl TaskStore for TaskBoard {
    fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    fn get(&self, id: TaskId) -> Option<&Task> {
        self.index.get(&id).map(|&i| &self.tasks[i])
    }

    fn mark_completed(&mut self, id: TaskId) -> Result<bool, StoreError> {
        let &i = self.index.get(&id).ok_or(StoreError::UnknownTask(id))?;
        self.completed.insert(id);
        Ok(self.tasks[i].mark_completed())
    }

    fn replace(&mut self, mut tasks: Vec<Task>) -> Result<(), StoreError> {
        let mut index = HashMap::with_capacity(tasks.len());
        for (i, task) in tasks.iter().enumerate() {
            if index.insert(task.id(), i).is_some() {
                return Err(StoreError::DuplicateTask(task.id()));
            }
            if task.position().is_some_and(|p| !p.is_finite()) {
                return Err(StoreError::NonFinitePosition(task.id()));
            }
        }
        for task in tasks.iter_mut() {
            if task.is_completed() {
                self.completed.insert(task.id());
            } else if self.completed.contains(&task.id()) {
                task.mark_completed();
            }
        }
        self.tasks = tasks;
        self.index = index;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Coordinate, Urgency};

    fn tasks() -> Vec<Task> {
        vec![
            Task::new(1, "123 Main St", Urgency::Urgent, 90.0),
            Task::new(2, "456 Elm St", Urgency::Normal, 65.0),
            Task::new(3, "789 Oak St", Urgency::Normal, 50.0),
        ]
    }

    #[test]
    fn test_board_lookup() {
        let board = TaskBoard::new(tasks()).expect("unique ids");
        assert_eq!(board.len(), 3);
        assert_eq!(board.get(TaskId(2)).map(|t| t.address()), Some("456 Elm St"));
        assert!(board.get(TaskId(9)).is_none());
    }

    #[test]
    fn test_duplicate_rejected() {
        let mut t = tasks();
        t.push(Task::new(2, "dup", Urgency::Normal, 0.0));
        assert_eq!(
            TaskBoard::new(t).err(),
            Some(StoreError::DuplicateTask(TaskId(2)))
        );
    }

    #[test]
    fn test_mark_completed_idempotent() {
        let mut board = TaskBoard::new(tasks()).expect("unique ids");
        assert_eq!(board.mark_completed(TaskId(3)), Ok(true));
        let once: Vec<Task> = board.tasks().to_vec();
        assert_eq!(board.mark_completed(TaskId(3)), Ok(false));
        assert_eq!(board.tasks(), once.as_slice());
        assert_eq!(board.completed_count(), 1);
    }

    #[test]
    fn test_mark_unknown() {
        let mut board = TaskBoard::new(tasks()).expect("unique ids");
        assert_eq!(
            board.mark_completed(TaskId(42)),
            Err(StoreError::UnknownTask(TaskId(42)))
        );
    }

    #[test]
    fn test_completion_survives_replace() {
        let mut board = TaskBoard::new(tasks()).expect("unique ids");
        board.mark_completed(TaskId(1)).expect("known id");
        // Host re-sends task 1 as open; it stays completed.
        board.replace(tasks()).expect("unique ids");
        assert!(board.get(TaskId(1)).is_some_and(|t| t.is_completed()));
        assert_eq!(board.completed_count(), 1);
    }

    #[test]
    fn test_failed_replace_keeps_old_tasks() {
        let mut board = TaskBoard::new(tasks()).expect("unique ids");
        let dup = vec![
            Task::new(7, "a", Urgency::Normal, 0.0),
            Task::new(7, "b", Urgency::Normal, 0.0),
        ];
        assert!(board.replace(dup).is_err());
        assert_eq!(board.len(), 3);
    }

    #[test]
    fn test_non_finite_position_rejected() {
        for bad in [
            Coordinate::new(f64::NAN, 0.0),
            Coordinate::new(0.0, f64::INFINITY),
            Coordinate::new(f64::NEG_INFINITY, 50.0),
        ] {
            let mut t = tasks();
            t.push(Task::new(4, "nowhere", Urgency::Urgent, 10.0).with_position(bad));
            assert_eq!(
                TaskBoard::new(t).err(),
                Some(StoreError::NonFinitePosition(TaskId(4)))
            );
        }
    }

    #[test]
    fn test_non_finite_replace_keeps_old_tasks() {
        let mut board = TaskBoard::new(tasks()).expect("unique ids");
        board.mark_completed(TaskId(1)).expect("known id");
        let bad = vec![
            Task::new(8, "a", Urgency::Normal, 0.0).with_position(Coordinate::new(30.0, 30.0)),
            Task::new(9, "b", Urgency::Normal, 0.0).with_position(Coordinate::new(f64::NAN, 0.0)),
        ];
        assert_eq!(board.replace(bad), Err(StoreError::NonFinitePosition(TaskId(9))));
        assert_eq!(board.len(), 3);
        assert!(board.get(TaskId(8)).is_none());
        assert_eq!(board.completed_count(), 1);
    }
}
