//! Urgency-weighted nearest-neighbor sequencing.
//!
//! Builds the visiting order greedily: starting from the truck, always go to
//! the open point with the lowest score, where
//!
//! ```text
//! score = distance(current, point) * factor(point.urgency)
//! ```
//!
//! With the default factors (urgent 0.5, normal 1.0) an urgent bin wins
//! against a normal bin up to twice as far away.
//!
//! # Complexity
//!
//! O(n²) where n = number of open points.

use crate::config::UrgencyWeights;
use crate::models::{Coordinate, Point, RouteSequence};

/// Plans the visiting order of all open points, starting from `origin`.
///
/// Completed points are skipped. Ties in score go to the point that comes
/// first in `points`, so the result depends only on the inputs.
///
/// # Arguments
///
/// * `origin` — Current truck position
/// * `points` — Candidate points, in task-list order
/// * `weights` — Urgency factors applied to raw distance
///
/// # Examples
///
/// ```
/// use u_collect::config::UrgencyWeights;
/// use u_collect::constructive::plan;
/// use u_collect::models::{Coordinate, Point, TaskId, Urgency};
///
/// let points = vec![
///     Point::new(1, Coordinate::new(20.0, 20.0), Urgency::Urgent),
///     Point::new(2, Coordinate::new(35.0, 35.0), Urgency::Normal),
/// ];
/// let route = plan(Coordinate::new(10.0, 90.0), &points, &UrgencyWeights::default());
/// // Point 2 is closer, but point 1 is urgent: 70.7 * 0.5 < 60.4.
/// assert_eq!(route.ids(), vec![TaskId(1), TaskId(2)]);
/// ```
pub fn plan(origin: Coordinate, points: &[Point], weights: &UrgencyWeights) -> RouteSequence {
    let mut visited: Vec<bool> = points.iter().map(|p| p.completed).collect();
    let mut route = RouteSequence::new();
    let mut current = origin;

    loop {
        let mut best: Option<(usize, f64)> = None;
        for (i, point) in points.iter().enumerate() {
            if visited[i] {
                continue;
            }
            let score = current.distance_to(point.position) * weights.factor(point.urgency);
            if best.map_or(true, |(_, s)| score < s) {
                best = Some((i, score));
            }
        }

        match best {
            Some((next, _)) => {
                visited[next] = true;
                route.push(points[next].stop());
                current = points[next].position;
            }
            None => break,
        }
    }

    route
}
