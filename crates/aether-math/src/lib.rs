//! Closed-form ray geometry shared by the aether scattering crates.
//!
//! Everything here is pure `f32` math on value types. Non-intersection is
//! expressed through `Option`, never through sentinel payloads.

mod interval;
mod intersect;
mod ray;

pub use interval::Interval;
pub use intersect::{interval_difference, oplus, ray_plane_distance, ray_sphere_interval};
pub use ray::{Ray, Sphere};

/// Stand-in for "effectively infinite" quantities, e.g. the column density of
/// a ray that passes through solid ground.
pub const BIG: f32 = 1e20;

/// Threshold below which a denominator is treated as zero.
pub const SMALL: f32 = 1e-20;

/// Upper bound on the number of light sources a single shading call accepts.
pub const MAX_LIGHT_COUNT: usize = 9;

/// Floor applied to the squared half-chord before taking its square root.
pub const HALF_CHORD_FLOOR: f32 = 1e-10;
