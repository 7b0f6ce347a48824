//! Truck motion simulation.
//!
//! - [`MotionSimulator`] — straight-line stepping toward the next stop with
//!   proximity arrival
//! - [`TickDriver`] — turns elapsed time into a whole number of due ticks
//! - [`CompletionEvent`] — emitted when a stop is reached

mod driver;
mod event;
mod simulator;

pub use driver::TickDriver;
pub use event::CompletionEvent;
pub use simulator::{MotionSimulator, Phase};
