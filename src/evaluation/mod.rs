//! Route evaluation.
//!
//! Computes leg lengths, total distance, and a tick estimate for a planned
//! route, for display alongside the map.

mod evaluator;

pub use evaluator::{summarize, Leg, RouteSummary};
