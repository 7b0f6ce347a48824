//! Planar coordinate type.

use serde::{Deserialize, Serialize};

/// A position in the normalized map plane.
///
/// Both axes are percentage-of-viewport units, nominally `[0, 100]`. The
/// `y` axis grows downwards, matching CSS `top` offsets.
///
/// # Examples
///
/// ```
/// use u_collect::models::Coordinate;
///
/// let a = Coordinate::new(0.0, 0.0);
/// let b = Coordinate::new(3.0, 4.0);
/// assert!((a.distance_to(b) - 5.0).abs() < 1e-10);
/// assert_eq!(b.top(), "4%");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Coordinate {
    /// Horizontal offset.
    pub x: f64,
    /// Vertical offset.
    pub y: f64,
}

impl Coordinate {
    /// Creates a coordinate.
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another coordinate.
    pub fn distance_to(self, other: Coordinate) -> f64 {
        let (dx, dy) = self.delta_to(other);
        (dx * dx + dy * dy).sqrt()
    }

    /// Vector `(other - self)`.
    pub fn delta_to(self, other: Coordinate) -> (f64, f64) {
        (other.x - self.x, other.y - self.y)
    }

    /// Returns this coordinate shifted by `(dx, dy)`.
    pub fn offset(self, dx: f64, dy: f64) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    /// Returns `true` if both components are finite.
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// CSS `top` offset, e.g. `"90%"`.
    pub fn top(self) -> String {
        format!("{}%", self.y)
    }

    /// CSS `left` offset, e.g. `"10%"`.
    pub fn left(self) -> String {
        format!("{}%", self.x)
    }
}

impl From<(f64, f64)> for Coordinate {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}
