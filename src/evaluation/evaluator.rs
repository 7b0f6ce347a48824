//! Route summary: leg lengths, total distance, and tick estimate.

use serde::Serialize;

use crate::models::{Coordinate, RouteSequence, TaskId};

/// One leg of a planned route.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Leg {
    /// Stop reached at the end of this leg.
    pub to: TaskId,
    /// Straight-line length of the leg.
    pub distance: f64,
    /// Distance from the route origin to the end of this leg.
    pub cumulative: f64,
}

/// Aggregate figures for a planned route.
///
/// # Examples
///
/// ```
/// use u_collect::evaluation::summarize;
/// use u_collect::models::{Coordinate, RouteSequence, Stop, TaskId};
///
/// let route: RouteSequence = [
///     Stop { id: TaskId(1), position: Coordinate::new(3.0, 4.0) },
///     Stop { id: TaskId(2), position: Coordinate::new(6.0, 8.0) },
/// ].into_iter().collect();
///
/// let summary = summarize(Coordinate::new(0.0, 0.0), &route, 2.0);
/// assert_eq!(summary.stops, 2);
/// assert!((summary.total_distance - 10.0).abs() < 1e-10);
/// // ceil(5 / 2) ticks per leg.
/// assert_eq!(summary.estimated_ticks, 6);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteSummary {
    /// Number of stops left.
    pub stops: usize,
    /// Sum of all leg lengths.
    pub total_distance: f64,
    /// Legs in visiting order.
    pub legs: Vec<Leg>,
    /// Ticks needed at `speed`, ignoring the arrival radius.
    pub estimated_ticks: u64,
}

/// Summarizes `route` as driven from `origin` at `speed` units per tick.
///
/// A non-positive or non-finite speed yields an estimate of zero ticks.
pub fn summarize(origin: Coordinate, route: &RouteSequence, speed: f64) -> RouteSummary {
    let mut legs = Vec::with_capacity(route.len());
    let mut prev = origin;
    let mut total = 0.0;

    for stop in route.iter() {
        let d = prev.distance_to(stop.position);
        total += d;
        legs.push(Leg {
            to: stop.id,
            distance: d,
            cumulative: total,
        });
        prev = stop.position;
    }

    let estimated_ticks = if speed.is_finite() && speed > 0.0 {
        legs.iter().map(|l| (l.distance / speed).ceil() as u64).sum::<u64>()
    } else {
        0
    };

    RouteSummary {
        stops: legs.len(),
        total_distance: total,
        legs,
        estimated_ticks,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Stop;

    fn route(points: &[(u32, f64, f64)]) -> RouteSequence {
        points
            .iter()
            .map(|&(id, x, y)| Stop {
                id: TaskId(id),
                position: Coordinate::new(x, y),
            })
            .collect()
    }

    #[test]
    fn test_summary_empty() {
        let s = summarize(Coordinate::new(1.0, 1.0), &RouteSequence::new(), 2.0);
        assert_eq!(s.stops, 0);
        assert_eq!(s.total_distance, 0.0);
        assert!(s.legs.is_empty());
        assert_eq!(s.estimated_ticks, 0);
    }

    #[test]
    fn test_summary_legs() {
        let r = route(&[(1, 0.0, 3.0), (2, 4.0, 3.0), (3, 4.0, 0.0)]);
        let s = summarize(Coordinate::new(0.0, 0.0), &r, 2.0);
        assert_eq!(s.stops, 3);
        assert!((s.total_distance - 10.0).abs() < 1e-10);
        assert_eq!(s.legs[1].to, TaskId(2));
        assert!((s.legs[1].distance - 4.0).abs() < 1e-10);
        assert!((s.legs[1].cumulative - 7.0).abs() < 1e-10);
        // ceil(3/2) + ceil(4/2) + ceil(3/2) = 2 + 2 + 2
        assert_eq!(s.estimated_ticks, 6);
    }

    #[test]
    fn test_summary_bad_speed() {
        let r = route(&[(1, 10.0, 0.0)]);
        assert_eq!(summarize(Coordinate::new(0.0, 0.0), &r, 0.0).estimated_ticks, 0);
        assert_eq!(
            summarize(Coordinate::new(0.0, 0.0), &r, f64::NAN).estimated_ticks,
            0
        );
    }
}
