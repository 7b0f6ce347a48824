//! # u-collect
//!
//! Route planning and truck motion simulation for waste-collection
//! dashboards: orders pickups with an urgency-weighted nearest-neighbor
//! heuristic, drives a truck marker along the plan on a fixed tick, and marks
//! bins collected on arrival.
//!
//! ## Modules
//!
//! - [`models`] — Domain model types (Coordinate, Task, Point, RouteSequence)
//! - [`config`] — Engine configuration and validation
//! - [`constructive`] — Route sequencing (urgency-weighted nearest neighbor)
//! - [`evaluation`] — Route length and tick estimates
//! - [`simulation`] — Tick-driven truck motion and arrival detection
//! - [`store`] — Task store trait and in-memory implementation
//! - [`engine`] — Collection session tying everything together
//! - `wasm` — Browser bindings (feature `wasm`)

pub mod config;
pub mod constructive;
pub mod engine;
pub mod evaluation;
pub mod models;
pub mod simulation;
pub mod store;

#[cfg(feature = "wasm")]
pub mod wasm;
