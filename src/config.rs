//! Engine configuration.
//!
//! All knobs live in [`EngineConfig`]. Defaults reproduce the demo
//! dashboard: a truck starting at (10, 90) moving 2 units per 100 ms tick,
//! urgent bins weighted at half their distance.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::{Coordinate, Urgency};

/// Invalid configuration value.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// Speed must be finite and strictly positive.
    #[error("speed must be finite and positive, got {0}")]
    NonPositiveSpeed(f64),

    /// Radius below `speed / 2` lets an overshooting truck oscillate forever.
    #[error("arrival radius {radius} is below the minimum {min} for this speed")]
    ArrivalRadiusTooSmall {
        /// Configured radius.
        radius: f64,
        /// Smallest radius that guarantees arrival (`speed / 2`).
        min: f64,
    },

    /// Urgency factors must be finite and strictly positive.
    #[error("urgency factor for {urgency:?} must be finite and positive, got {factor}")]
    InvalidUrgencyFactor {
        /// Offending class.
        urgency: Urgency,
        /// Offending factor.
        factor: f64,
    },

    /// A zero tick interval would make every elapsed duration infinitely many ticks.
    #[error("tick interval must be non-zero")]
    ZeroTickInterval,

    /// `advance` must be allowed to run at least one tick.
    #[error("max catch-up ticks must be at least 1")]
    ZeroCatchUpTicks,

    /// A configured coordinate or layout value is NaN or infinite.
    #[error("{0} must be finite")]
    NonFiniteCoordinate(&'static str),
}

/// Score multipliers applied to raw distance during planning.
///
/// A factor below 1.0 makes a class attractive from farther away.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UrgencyWeights {
    /// Factor for [`Urgency::Urgent`].
    pub urgent: f64,
    /// Factor for [`Urgency::Normal`].
    pub normal: f64,
}

impl UrgencyWeights {
    /// Factor for the given class.
    pub fn factor(&self, urgency: Urgency) -> f64 {
        match urgency {
            Urgency::Urgent => self.urgent,
            Urgency::Normal => self.normal,
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        for (urgency, factor) in [(Urgency::Urgent, self.urgent), (Urgency::Normal, self.normal)] {
            if !factor.is_finite() || factor <= 0.0 {
                return Err(ConfigError::InvalidUrgencyFactor { urgency, factor });
            }
        }
        Ok(())
    }
}

impl Default for UrgencyWeights {
    fn default() -> Self {
        Self {
            urgent: 0.5,
            normal: 1.0,
        }
    }
}

/// Diagonal pin placement for tasks without an explicit position.
///
/// The i-th task lands at `(start + i * spacing, start + i * spacing)`.
///
/// ```
/// use u_collect::config::PinLayout;
/// use u_collect::models::Coordinate;
///
/// let layout = PinLayout::default();
/// assert_eq!(layout.slot(0), Coordinate::new(20.0, 20.0));
/// assert_eq!(layout.slot(2), Coordinate::new(50.0, 50.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PinLayout {
    /// Offset of the first slot on both axes.
    pub start: f64,
    /// Step between consecutive slots on both axes.
    pub spacing: f64,
}

impl PinLayout {
    /// Position of the `index`-th slot.
    pub fn slot(&self, index: usize) -> Coordinate {
        let v = self.start + index as f64 * self.spacing;
        Coordinate::new(v, v)
    }
}

impl Default for PinLayout {
    fn default() -> Self {
        Self {
            start: 20.0,
            spacing: 15.0,
        }
    }
}

/// What happens to the queue when the truck reaches a stop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ArrivalPolicy {
    /// Pop the reached stop and continue with the queued order.
    #[default]
    KeepQueue,
    /// Re-plan the remaining stops from the reached stop.
    Replan,
}

/// Engine configuration.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use u_collect::config::EngineConfig;
///
/// let config = EngineConfig::default()
///     .with_speed(4.0)
///     .with_arrival_radius(4.0)
///     .with_tick_interval(Duration::from_millis(50));
/// assert!(config.validate().is_ok());
///
/// let bad = EngineConfig::default().with_arrival_radius(0.5);
/// assert!(bad.validate().is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EngineConfig {
    /// Distance covered per tick.
    pub speed: f64,
    /// Distance at which a stop counts as reached.
    pub arrival_radius: f64,
    /// Wall-clock time per tick.
    #[serde(rename = "tickIntervalMs", with = "duration_ms")]
    pub tick_interval: Duration,
    /// Where the truck starts the session.
    pub truck_start: Coordinate,
    /// Planning score multipliers.
    pub weights: UrgencyWeights,
    /// Pin placement for tasks without explicit positions.
    pub layout: PinLayout,
    /// Queue handling on arrival.
    pub arrival_policy: ArrivalPolicy,
    /// Upper bound on ticks run by one `advance` call.
    pub max_catch_up_ticks: u32,
}

impl EngineConfig {
    /// Sets the per-tick speed.
    pub fn with_speed(mut self, speed: f64) -> Self {
        self.speed = speed;
        self
    }

    /// Sets the arrival radius.
    pub fn with_arrival_radius(mut self, radius: f64) -> Self {
        self.arrival_radius = radius;
        self
    }

    /// Sets the tick interval.
    pub fn with_tick_interval(mut self, interval: Duration) -> Self {
        self.tick_interval = interval;
        self
    }

    /// Sets the truck's starting position.
    pub fn with_truck_start(mut self, start: Coordinate) -> Self {
        self.truck_start = start;
        self
    }

    /// Sets the urgency weights.
    pub fn with_weights(mut self, weights: UrgencyWeights) -> Self {
        self.weights = weights;
        self
    }

    /// Sets the pin layout.
    pub fn with_layout(mut self, layout: PinLayout) -> Self {
        self.layout = layout;
        self
    }

    /// Sets the arrival policy.
    pub fn with_arrival_policy(mut self, policy: ArrivalPolicy) -> Self {
        self.arrival_policy = policy;
        self
    }

    /// Sets the catch-up bound for `advance`.
    pub fn with_max_catch_up_ticks(mut self, ticks: u32) -> Self {
        self.max_catch_up_ticks = ticks;
        self
    }

    /// Checks every value, returning the first problem found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.speed.is_finite() || self.speed <= 0.0 {
            return Err(ConfigError::NonPositiveSpeed(self.speed));
        }
        let min = self.speed / 2.0;
        if !self.arrival_radius.is_finite() || self.arrival_radius < min {
            return Err(ConfigError::ArrivalRadiusTooSmall {
                radius: self.arrival_radius,
                min,
            });
        }
        self.weights.validate()?;
        if self.tick_interval.is_zero() {
            return Err(ConfigError::ZeroTickInterval);
        }
        if self.max_catch_up_ticks == 0 {
            return Err(ConfigError::ZeroCatchUpTicks);
        }
        if !self.truck_start.is_finite() {
            return Err(ConfigError::NonFiniteCoordinate("truck start"));
        }
        if !self.layout.start.is_finite() || !self.layout.spacing.is_finite() {
            return Err(ConfigError::NonFiniteCoordinate("pin layout"));
        }
        Ok(())
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            speed: 2.0,
            arrival_radius: 2.0,
            tick_interval: Duration::from_millis(100),
            truck_start: Coordinate::new(10.0, 90.0),
            weights: UrgencyWeights::default(),
            layout: PinLayout::default(),
            arrival_policy: ArrivalPolicy::KeepQueue,
            max_catch_up_ticks: 10,
        }
    }
}

mod duration_ms {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_u64(u64::try_from(d.as_millis()).unwrap_or(u64::MAX))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        u64::deserialize(d).map(Duration::from_millis)
    }
}
