//! Constructive heuristics for ordering collection stops.
//!
//! - [`plan`] — Urgency-weighted greedy nearest neighbor, O(n²)

mod nearest_neighbor;

pub use nearest_neighbor::plan;
