//! Parameter intervals along a ray.

/// A pair of ray parameters `[entrance, exit]`.
///
/// Values are distances along the ray measured in multiples of its direction
/// vector, so they are plain distances only when the direction is unit length.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Interval {
    /// Parameter at which the ray enters the region.
    pub entrance: f32,
    /// Parameter at which the ray leaves the region.
    pub exit: f32,
}

impl Interval {
    /// Create a new interval. No ordering is enforced.
    pub fn new(entrance: f32, exit: f32) -> Self {
        Self { entrance, exit }
    }

    /// Signed length `exit - entrance`.
    pub fn length(&self) -> f32 {
        self.exit - self.entrance
    }

    /// Floor both ends at zero, discarding the part behind the ray origin.
    pub fn clamp_to_forward(&self) -> Self {
        Self::new(self.entrance.max(0.0), self.exit.max(0.0))
    }
}
