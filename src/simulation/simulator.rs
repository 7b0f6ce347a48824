//! Tick-driven truck motion along a planned route.

use log::{debug, trace};
use serde::Serialize;

use crate::config::EngineConfig;
use crate::models::{Coordinate, RouteSequence, Stop, TaskId};

use super::CompletionEvent;

/// Simulator phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    /// Ticks are no-ops.
    #[default]
    Idle,
    /// Ticks move the truck toward the head of the sequence.
    Active,
}

/// Moves a truck toward the head of a route sequence, one fixed step per tick.
///
/// Each tick the truck moves `speed` units in a straight line toward the
/// next stop. Overshoot is not clamped; the arrival check after the move
/// catches it. A stop is reached when the truck ends a tick within
/// `arrival_radius` of it, at most one stop per tick.
///
/// # Examples
///
/// ```
/// use u_collect::models::{Coordinate, RouteSequence, Stop, TaskId};
/// use u_collect::simulation::{MotionSimulator, Phase};
///
/// let mut sim = MotionSimulator::new(Coordinate::new(0.0, 0.0), 2.0, 2.0);
/// let route: RouteSequence =
///     [Stop { id: TaskId(1), position: Coordinate::new(5.0, 0.0) }].into_iter().collect();
/// sim.start(route);
///
/// assert!(sim.tick().is_empty()); // x = 2, 3 away
/// let events = sim.tick();        // x = 4, 1 away
/// assert_eq!(events[0].task_id, TaskId(1));
/// assert_eq!(sim.phase(), Phase::Idle);
/// ```
#[derive(Debug, Clone)]
pub struct MotionSimulator {
    truck: Coordinate,
    sequence: RouteSequence,
    phase: Phase,
    speed: f64,
    arrival_radius: f64,
    ticks: u64,
}

impl MotionSimulator {
    /// Creates an idle simulator with the truck at `truck`.
    pub fn new(truck: Coordinate, speed: f64, arrival_radius: f64) -> Self {
        Self {
            truck,
            sequence: RouteSequence::new(),
            phase: Phase::Idle,
            speed,
            arrival_radius,
            ticks: 0,
        }
    }

    /// Creates an idle simulator from engine settings.
    pub fn from_config(config: &EngineConfig) -> Self {
        Self::new(config.truck_start, config.speed, config.arrival_radius)
    }

    /// Replaces the sequence and starts moving.
    ///
    /// An empty route leaves the simulator idle. Returns the new phase.
    pub fn start(&mut self, route: RouteSequence) -> Phase {
        self.sequence = route;
        self.phase = if self.sequence.is_empty() {
            Phase::Idle
        } else {
            Phase::Active
        };
        self.phase
    }

    /// Replaces the sequence without changing phase, except that an empty
    /// sequence always means idle.
    pub fn set_sequence(&mut self, route: RouteSequence) {
        self.sequence = route;
        if self.sequence.is_empty() {
            self.phase = Phase::Idle;
        }
    }

    /// Halts motion. Position and sequence are kept.
    pub fn stop(&mut self) {
        self.phase = Phase::Idle;
    }

    /// Advances one tick and returns the stops reached.
    ///
    /// The returned list holds at most one event. Idle ticks do nothing.
    pub fn tick(&mut self) -> Vec<CompletionEvent> {
        if self.phase == Phase::Idle {
            return Vec::new();
        }
        let Some(target) = self.sequence.head().copied() else {
            self.phase = Phase::Idle;
            return Vec::new();
        };
        self.ticks += 1;

        let distance = self.truck.distance_to(target.position);
        if distance > f64::EPSILON {
            let (dx, dy) = self.truck.delta_to(target.position);
            let ratio = self.speed / distance;
            self.truck = self.truck.offset(dx * ratio, dy * ratio);
            trace!(
                "tick {}: truck at ({:.2}, {:.2}), {:.2} from {}",
                self.ticks,
                self.truck.x,
                self.truck.y,
                self.truck.distance_to(target.position),
                target.id
            );
        }

        if self.truck.distance_to(target.position) > self.arrival_radius {
            return Vec::new();
        }

        self.sequence.pop();
        debug!("tick {}: reached {}", self.ticks, target.id);
        if self.sequence.is_empty() {
            self.phase = Phase::Idle;
        }
        vec![CompletionEvent {
            task_id: target.id,
            position: target.position,
            tick: self.ticks,
        }]
    }

    /// Drops `id` from the sequence. Returns `true` if it was queued.
    ///
    /// Goes idle if that empties the sequence.
    pub fn remove(&mut self, id: TaskId) -> bool {
        let removed = self.sequence.remove(id);
        if self.sequence.is_empty() {
            self.phase = Phase::Idle;
        }
        removed
    }

    /// Keeps only the queued stops for which `keep` returns `true`.
    pub fn retain(&mut self, keep: impl FnMut(&Stop) -> bool) {
        self.sequence.retain(keep);
        if self.sequence.is_empty() {
            self.phase = Phase::Idle;
        }
    }

    /// Moves the truck to `position` without driving. Only allowed while idle.
    ///
    /// Returns `false` (and does nothing) while active.
    pub fn place(&mut self, position: Coordinate) -> bool {
        if self.phase == Phase::Active {
            return false;
        }
        self.truck = position;
        true
    }

    /// Current truck position.
    pub fn truck(&self) -> Coordinate {
        self.truck
    }

    /// Remaining stops.
    pub fn sequence(&self) -> &RouteSequence {
        &self.sequence
    }

    /// Current phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Returns `true` while ticks move the truck.
    pub fn is_active(&self) -> bool {
        self.phase == Phase::Active
    }

    /// Number of ticks that did work so far.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Step length per tick.
    pub fn speed(&self) -> f64 {
        self.speed
    }

    /// Arrival threshold.
    pub fn arrival_radius(&self) -> f64 {
        self.arrival_radius
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn route(stops: &[(u32, f64, f64)]) -> RouteSequence {
        stops
            .iter()
            .map(|&(id, x, y)| Stop {
                id: TaskId(id),
                position: Coordinate::new(x, y),
            })
            .collect()
    }

    #[test]
    fn test_idle_tick_is_noop() {
        let mut sim = MotionSimulator::new(Coordinate::new(1.0, 1.0), 2.0, 2.0);
        assert!(sim.tick().is_empty());
        assert_eq!(sim.truck(), Coordinate::new(1.0, 1.0));
        assert_eq!(sim.ticks(), 0);
    }

    #[test]
    fn test_start_empty_stays_idle() {
        let mut sim = MotionSimulator::new(Coordinate::new(0.0, 0.0), 2.0, 2.0);
        assert_eq!(sim.start(RouteSequence::new()), Phase::Idle);
        assert!(sim.tick().is_empty());
    }

    #[test]
    fn test_moves_fixed_step() {
        let mut sim = MotionSimulator::new(Coordinate::new(0.0, 0.0), 2.0, 2.0);
        sim.start(route(&[(1, 30.0, 40.0)]));
        sim.tick();
        let t = sim.truck();
        assert!((t.x - 1.2).abs() < 1e-10);
        assert!((t.y - 1.6).abs() < 1e-10);
        assert_eq!(sim.ticks(), 1);
    }

    #[test]
    fn test_arrival_within_one_tick_when_close() {
        let mut sim = MotionSimulator::new(Coordinate::new(0.0, 0.0), 2.0, 2.0);
        sim.start(route(&[(1, 1.5, 0.0), (2, 50.0, 0.0)]));
        let events = sim.tick();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].task_id, TaskId(1));
        assert_eq!(events[0].tick, 1);
        // Overshoot is not clamped.
        assert!((sim.truck().x - 2.0).abs() < 1e-10);
        assert_eq!(sim.sequence().ids(), vec![TaskId(2)]);
        assert!(sim.is_active());
    }

    #[test]
    fn test_zero_distance_arrives_immediately() {
        let mut sim = MotionSimulator::new(Coordinate::new(20.0, 20.0), 2.0, 2.0);
        sim.start(route(&[(1, 20.0, 20.0)]));
        let events = sim.tick();
        assert_eq!(events.len(), 1);
        assert_eq!(sim.truck(), Coordinate::new(20.0, 20.0));
        assert_eq!(sim.phase(), Phase::Idle);
    }

    #[test]
    fn test_one_arrival_per_tick() {
        // Both stops are within the radius, but only the head is checked.
        let mut sim = MotionSimulator::new(Coordinate::new(0.0, 0.0), 2.0, 2.0);
        sim.start(route(&[(1, 0.5, 0.0), (2, 1.0, 0.0)]));
        assert_eq!(sim.tick().len(), 1);
        assert_eq!(sim.sequence().len(), 1);
        assert_eq!(sim.tick()[0].task_id, TaskId(2));
    }

    #[test]
    fn test_stop_freezes_position() {
        let mut sim = MotionSimulator::new(Coordinate::new(0.0, 0.0), 2.0, 2.0);
        sim.start(route(&[(1, 50.0, 0.0)]));
        sim.tick();
        sim.stop();
        let frozen = sim.truck();
        for _ in 0..5 {
            assert!(sim.tick().is_empty());
        }
        assert_eq!(sim.truck(), frozen);
        assert_eq!(sim.sequence().len(), 1);
    }

    #[test]
    fn test_set_sequence_keeps_phase() {
        let mut sim = MotionSimulator::new(Coordinate::new(0.0, 0.0), 2.0, 2.0);
        sim.set_sequence(route(&[(1, 50.0, 0.0)]));
        assert_eq!(sim.phase(), Phase::Idle);
        assert!(sim.tick().is_empty());

        sim.start(route(&[(1, 50.0, 0.0)]));
        sim.set_sequence(route(&[(2, 0.0, 50.0)]));
        assert!(sim.is_active());
        sim.set_sequence(RouteSequence::new());
        assert_eq!(sim.phase(), Phase::Idle);
    }

    #[test]
    fn test_remove_last_goes_idle() {
        let mut sim = MotionSimulator::new(Coordinate::new(0.0, 0.0), 2.0, 2.0);
        sim.start(route(&[(1, 50.0, 0.0)]));
        assert!(sim.remove(TaskId(1)));
        assert!(!sim.remove(TaskId(1)));
        assert_eq!(sim.phase(), Phase::Idle);
    }

    #[test]
    fn test_retain_drops_stale() {
        let mut sim = MotionSimulator::new(Coordinate::new(0.0, 0.0), 2.0, 2.0);
        sim.start(route(&[(1, 50.0, 0.0), (2, 60.0, 0.0)]));
        sim.retain(|s| s.id != TaskId(1));
        assert_eq!(sim.sequence().ids(), vec![TaskId(2)]);
        assert!(sim.is_active());
    }

    #[test]
    fn test_place_only_when_idle() {
        let mut sim = MotionSimulator::new(Coordinate::new(0.0, 0.0), 2.0, 2.0);
        assert!(sim.place(Coordinate::new(5.0, 5.0)));
        sim.start(route(&[(1, 50.0, 0.0)]));
        assert!(!sim.place(Coordinate::new(9.0, 9.0)));
        assert_eq!(sim.truck(), Coordinate::new(5.0, 5.0));
    }

    #[test]
    fn test_drives_whole_route() {
        let mut sim = MotionSimulator::from_config(&EngineConfig::default());
        sim.start(route(&[(1, 20.0, 20.0), (2, 35.0, 35.0), (3, 50.0, 50.0)]));
        let mut reached = Vec::new();
        for _ in 0..1000 {
            reached.extend(sim.tick().into_iter().map(|e| e.task_id));
            if !sim.is_active() {
                break;
            }
        }
        assert_eq!(reached, vec![TaskId(1), TaskId(2), TaskId(3)]);
        assert!(sim.sequence().is_empty());
    }

    proptest! {
        #[test]
        fn prop_distance_strictly_decreases_until_arrival(
            sx in 0.0..100.0f64, sy in 0.0..100.0f64,
            tx in 0.0..100.0f64, ty in 0.0..100.0f64,
            speed in 0.5..5.0f64,
            radius_scale in 0.5..2.0f64,
        ) {
            let radius = speed * radius_scale;
            let target = Coordinate::new(tx, ty);
            let mut sim = MotionSimulator::new(Coordinate::new(sx, sy), speed, radius);
            sim.start(route(&[(1, tx, ty)]));

            let mut last = sim.truck().distance_to(target);
            let mut arrived = false;
            for _ in 0..1000 {
                let events = sim.tick();
                if !events.is_empty() {
                    prop_assert_eq!(events[0].task_id, TaskId(1));
                    arrived = true;
                    break;
                }
                let d = sim.truck().distance_to(target);
                prop_assert!(d < last);
                last = d;
            }
            prop_assert!(arrived);
            prop_assert!(!sim.sequence().contains(TaskId(1)));
        }
    }
}
