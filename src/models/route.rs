//! Planned visiting order.

use std::collections::VecDeque;

use super::{Stop, TaskId};

/// An ordered queue of stops not yet visited.
///
/// Built by the sequencer, consumed from the front by the motion simulator.
///
/// # Examples
///
/// ```
/// use u_collect::models::{Coordinate, RouteSequence, Stop, TaskId};
///
/// let mut route = RouteSequence::new();
/// route.push(Stop { id: TaskId(1), position: Coordinate::new(20.0, 20.0) });
/// route.push(Stop { id: TaskId(2), position: Coordinate::new(35.0, 35.0) });
/// assert_eq!(route.len(), 2);
/// assert_eq!(route.head().map(|s| s.id), Some(TaskId(1)));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RouteSequence {
    stops: VecDeque<Stop>,
}

impl RouteSequence {
    /// Creates an empty sequence.
    pub fn new() -> Self {
        Self {
            stops: VecDeque::new(),
        }
    }

    /// Appends a stop to the end of the sequence.
    pub fn push(&mut self, stop: Stop) {
        self.stops.push_back(stop);
    }

    /// Next stop to visit.
    pub fn head(&self) -> Option<&Stop> {
        self.stops.front()
    }

    /// Removes and returns the next stop.
    pub fn pop(&mut self) -> Option<Stop> {
        self.stops.pop_front()
    }

    /// Removes the stop for `id`. Returns `true` if it was queued.
    pub fn remove(&mut self, id: TaskId) -> bool {
        let before = self.stops.len();
        self.stops.retain(|s| s.id != id);
        self.stops.len() != before
    }

    /// Keeps only the stops for which `keep` returns `true`.
    pub fn retain(&mut self, mut keep: impl FnMut(&Stop) -> bool) {
        self.stops.retain(|s| keep(s));
    }

    /// Drops every stop.
    pub fn clear(&mut self) {
        self.stops.clear();
    }

    /// Returns `true` if `id` is queued.
    pub fn contains(&self, id: TaskId) -> bool {
        self.stops.iter().any(|s| s.id == id)
    }

    /// Iterates stops in visiting order.
    pub fn iter(&self) -> impl Iterator<Item = &Stop> {
        self.stops.iter()
    }

    /// Task IDs in visiting order.
    pub fn ids(&self) -> Vec<TaskId> {
        self.stops.iter().map(|s| s.id).collect()
    }

    /// Number of queued stops.
    pub fn len(&self) -> usize {
        self.stops.len()
    }

    /// Returns `true` if nothing is queued.
    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }
}

impl FromIterator<Stop> for RouteSequence {
    fn from_iter<I: IntoIterator<Item = Stop>>(iter: I) -> Self {
        Self {
            stops: iter.into_iter().collect(),
        }
    }
}
