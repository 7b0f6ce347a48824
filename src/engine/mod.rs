//! Collection session: ties the task store, the sequencer, and the motion
//! simulator together behind the API the dashboard talks to.
//!
//! # Control flow
//!
//! 1. Turning the route on plans every open point from the truck's current
//!    position and starts the simulator.
//! 2. Each tick moves the truck; on arrival the engine marks the task
//!    completed in the store and selects it. The queued order is kept
//!    unless [`ArrivalPolicy::Replan`] is configured.
//! 3. Turning the route off halts the simulator and discards time already
//!    accumulated toward the next tick. Position and queue are kept.
//!
//! Every mutation goes through `&mut self`, so tick-driven completion and
//! external overrides never interleave.

mod error;
mod snapshot;


use std::collections::HashSet;
use std::time::Duration;

use log::{debug, info, warn};

use crate::config::{ArrivalPolicy, EngineConfig, PinLayout};
use crate::constructive::plan;
use crate::evaluation::{summarize, RouteSummary};
use crate::models::{Coordinate, Point, RouteSequence, Task, TaskId, TaskStatus};
use crate::simulation::{CompletionEvent, MotionSimulator, Phase, TickDriver};
use crate::store::{StoreError, TaskBoard, TaskStore};

pub use error::{EngineError, EngineResult};
pub use snapshot::{PointView, Snapshot, TruckView};

/// One driver's collection session.
///
/// # Examples
///
/// ```
/// use u_collect::config::EngineConfig;
/// use u_collect::engine::CollectionEngine;
/// use u_collect::models::demo_tasks;
///
/// let mut engine = CollectionEngine::with_tasks(demo_tasks(), EngineConfig::default()).unwrap();
/// engine.set_route_started(true);
///
/// let mut completed = 0;
/// for _ in 0..10_000 {
///     completed += engine.tick().len();
///     if engine.route().is_empty() {
///         break;
///     }
/// }
/// assert_eq!(completed, 5);
/// assert_eq!(engine.snapshot().completed, 5);
/// ```
#[derive(Debug)]
pub struct CollectionEngine<S: TaskStore = TaskBoard> {
    store: S,
    config: EngineConfig,
    points: Vec<Point>,
    simulator: MotionSimulator,
    driver: TickDriver,
    started: bool,
    selected: Option<TaskId>,
}

impl CollectionEngine<TaskBoard> {
    /// Creates a session over an in-memory [`TaskBoard`].
    pub fn with_tasks(tasks: Vec<Task>, config: EngineConfig) -> EngineResult<Self> {
        let store = TaskBoard::new(tasks)?;
        Self::new(store, config)
    }
}

impl<S: TaskStore> CollectionEngine<S> {
    /// Creates a stopped session with the truck at `config.truck_start`.
    pub fn new(store: S, config: EngineConfig) -> EngineResult<Self> {
        config.validate()?;
        let points = derive_points(store.tasks(), &config.layout);
        Ok(Self {
            simulator: MotionSimulator::from_config(&config),
            driver: TickDriver::new(config.tick_interval),
            store,
            config,
            points,
            started: false,
            selected: None,
        })
    }

    /// Turns the route on or off. Setting the current value does nothing.
    pub fn set_route_started(&mut self, started: bool) {
        if started == self.started {
            return;
        }
        self.started = started;
        if started {
            info!("route started");
            self.plan_and_start();
        } else {
            self.simulator.stop();
            self.driver.reset();
            let truck = self.simulator.truck();
            info!(
                "route stopped at ({:.1}, {:.1}) with {} stops left",
                truck.x,
                truck.y,
                self.simulator.sequence().len()
            );
        }
    }

    /// Flips the route on/off. Returns the new state.
    pub fn toggle_route(&mut self) -> bool {
        self.set_route_started(!self.started);
        self.started
    }

    /// Plans all open points again from the truck's current position.
    ///
    /// Restarts motion if the route is on; otherwise only the queue changes.
    pub fn replan(&mut self) {
        if self.started {
            self.plan_and_start();
        } else {
            let route = self.plan_from_truck();
            debug!("replanned {} stops while stopped", route.len());
            self.simulator.set_sequence(route);
        }
    }

    /// Runs one tick. Does nothing while the route is off.
    pub fn tick(&mut self) -> Vec<CompletionEvent> {
        if !self.started {
            return Vec::new();
        }
        let events = self.simulator.tick();
        for event in &events {
            self.apply_completion(event.task_id);
        }
        if !events.is_empty()
            && self.config.arrival_policy == ArrivalPolicy::Replan
            && !self.simulator.sequence().is_empty()
        {
            self.plan_and_start();
        }
        events
    }

    /// Runs every tick due after `elapsed` more wall-clock time.
    ///
    /// At most `config.max_catch_up_ticks` run per call; excess ticks are
    /// dropped. Stops early once there is nothing left to drive to.
    pub fn advance(&mut self, elapsed: Duration) -> Vec<CompletionEvent> {
        if !self.started {
            return Vec::new();
        }
        let due = self.driver.accumulate(elapsed);
        let cap = self.config.max_catch_up_ticks;
        if due > cap {
            warn!("{} ticks overdue, running {} and dropping the rest", due, cap);
        }
        let mut events = Vec::new();
        for _ in 0..due.min(cap) {
            if !self.simulator.is_active() {
                break;
            }
            events.extend(self.tick());
        }
        events
    }

    /// Replaces the task list.
    ///
    /// While the route is on, the queue is discarded and all open points are
    /// planned again from the truck's current position. While it is off,
    /// stops whose task is gone or completed are dropped from the queue.
    pub fn replace_tasks(&mut self, tasks: Vec<Task>) -> EngineResult<()> {
        self.store.replace(tasks)?;
        self.points = derive_points(self.store.tasks(), &self.config.layout);
        if let Some(id) = self.selected {
            if self.store.get(id).is_none() {
                self.selected = None;
            }
        }

        if self.started {
            self.plan_and_start();
        } else {
            let open: HashSet<TaskId> = self
                .points
                .iter()
                .filter(|p| !p.completed)
                .map(|p| p.id)
                .collect();
            self.simulator.retain(|s| open.contains(&s.id));
        }
        debug!("task list replaced: {} tasks", self.points.len());
        Ok(())
    }

    /// External status override, e.g. manual dispatch.
    ///
    /// Only `Completed` changes anything: the task is marked completed,
    /// dropped from the queue, and selected. Requesting the status a task
    /// already shows is a no-op returning `Ok(false)`.
    ///
    /// # Errors
    ///
    /// [`StoreError::UnknownTask`] for an unknown ID;
    /// [`EngineError::IllegalTransition`] for any other change, which leaves
    /// the session untouched.
    pub fn update_status(&mut self, id: TaskId, status: TaskStatus) -> EngineResult<bool> {
        let current = self
            .store
            .get(id)
            .ok_or(StoreError::UnknownTask(id))?
            .status();
        if current == status {
            return Ok(false);
        }
        if status != TaskStatus::Completed {
            return Err(EngineError::IllegalTransition {
                id,
                from: current,
                to: status,
            });
        }

        let changed = self.store.mark_completed(id)?;
        self.mark_point_completed(id);
        if self.simulator.remove(id) {
            debug!("{} completed externally, dropped from queue", id);
        }
        self.selected = Some(id);
        Ok(changed)
    }

    /// Pin click: completes `id` and selects it.
    pub fn select(&mut self, id: TaskId) -> EngineResult<bool> {
        let changed = self.update_status(id, TaskStatus::Completed)?;
        self.selected = Some(id);
        Ok(changed)
    }

    /// Current truck position.
    pub fn truck_position(&self) -> Coordinate {
        self.simulator.truck()
    }

    /// Last completed or clicked task.
    pub fn selected(&self) -> Option<TaskId> {
        self.selected
    }

    /// Remaining stops in visiting order.
    pub fn route(&self) -> &RouteSequence {
        self.simulator.sequence()
    }

    /// Whether the route is switched on.
    pub fn is_route_started(&self) -> bool {
        self.started
    }

    /// Simulator phase. Idle while stopped or once every stop is reached.
    pub fn phase(&self) -> Phase {
        self.simulator.phase()
    }

    /// Planning view of every task, in task-list order.
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// The task store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Active configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Distance and tick estimate for the remaining stops.
    pub fn summary(&self) -> RouteSummary {
        summarize(self.simulator.truck(), self.simulator.sequence(), self.config.speed)
    }

    /// Render state for the map panel.
    pub fn snapshot(&self) -> Snapshot {
        let tasks = self.store.tasks();
        Snapshot {
            truck: self.simulator.truck().into(),
            points: tasks
                .iter()
                .zip(&self.points)
                .map(|(task, point)| PointView::new(task, point))
                .collect(),
            selected: self.selected,
            completed: self.store.completed_count(),
            total: tasks.len(),
            route: self.simulator.sequence().ids(),
            route_started: self.started,
            phase: self.simulator.phase(),
        }
    }

    fn plan_from_truck(&self) -> RouteSequence {
        plan(self.simulator.truck(), &self.points, &self.config.weights)
    }

    fn plan_and_start(&mut self) {
        let route = self.plan_from_truck();
        info!("planned {} stops: {:?}", route.len(), route.ids());
        if self.simulator.start(route) == Phase::Idle {
            info!("nothing left to collect");
        }
    }

    fn apply_completion(&mut self, id: TaskId) {
        match self.store.mark_completed(id) {
            Ok(changed) => {
                self.mark_point_completed(id);
                self.selected = Some(id);
                if !changed {
                    debug!("{} was already completed", id);
                }
            }
            Err(e) => warn!("ignoring arrival at {}: {}", id, e),
        }
    }

    fn mark_point_completed(&mut self, id: TaskId) {
        if let Some(point) = self.points.iter_mut().find(|p| p.id == id) {
            point.completed = true;
        }
    }
}

fn derive_points(tasks: &[Task], layout: &PinLayout) -> Vec<Point> {
    tasks
        .iter()
        .enumerate()
        .map(|(i, task)| Point {
            id: task.id(),
            position: task.position().unwrap_or_else(|| layout.slot(i)),
            urgency: task.urgency(),
            completed: task.is_completed(),
        })
        .collect()
}
