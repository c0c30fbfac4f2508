//! Closed-form approximation of air column density along straight rays through
//! a spherically stratified atmosphere with density `exp(-height / H)`.
//!
//! Results are column density ratios: the distance one would have to travel
//! along the surface to meet the same number of particles.

use std::f32::consts::PI;

use aether_math::BIG;
use glam::Vec3;

/// Sign function returning `0.0` for zero, unlike [`f32::signum`].
fn sign(x: f32) -> f32 {
    if x > 0.0 {
        1.0
    } else if x < 0.0 {
        -1.0
    } else {
        0.0
    }
}

/// Column density ratio between two points on a 2D ray, in scale heights.
///
/// `a` and `b` are signed distances along the ray from its closest approach to
/// the world centre, `z2` is the squared closest-approach distance and `r` the
/// world radius, all pre-divided by the scale height. The integral is found by
/// substitution and then adjusted so it never divides by zero as the
/// distances approach zero.
///
/// Naming: capitals are surface values, `x*` distances along the ray from
/// closest approach, `r*` distances from the world centre, `s*` the
/// antiderivative evaluated at a point.
pub fn column_density_ratio_2d(a: f32, b: f32, z2: f32, r: f32) -> f32 {
    let x = (r * r - z2).max(0.0).sqrt();
    let div0_fix = 1.0 / ((x * x + r) * 0.5 * PI).sqrt();
    let ra = (a * a + z2).sqrt();
    let rb = (b * b + z2).sqrt();
    let sa = 1.0 / (a.abs() / ra + div0_fix) * (r - ra).exp();
    let sb = 1.0 / (b.abs() / rb + div0_fix) * (r - rb).exp();
    let s = 1.0 / (x.abs() / r + div0_fix) * (r - z2.sqrt()).exp().min(1.0);
    sign(b) * (s - sb) - sign(a) * (s - sa)
}

/// Column density ratio along a 2D ray, in world units.
///
/// `x_start` and `x_stop` are distances along the ray from closest approach;
/// negative values lie before it. `z2` is the squared closest-approach
/// distance, `r` the world radius and `h` the scale height.
///
/// A segment that crosses the ground returns [`BIG`]. Every other result is
/// clamped to `[0, BIG]` so infinities and NaNs never reach shading.
pub fn column_density_ratio_2d_scaled(x_start: f32, x_stop: f32, z2: f32, r: f32, h: f32) -> f32 {
    let x = (r * r - z2).max(0.0).sqrt();
    if x_start < x && -x < x_stop && z2 < r * r {
        return BIG;
    }
    let sigma = h * column_density_ratio_2d(x_start / h, x_stop / h, z2 / (h * h), r / h);
    // f32::min discards NaN in favour of BIG.
    sigma.abs().min(BIG)
}

/// Column density ratio along a 3D segment.
///
/// `p` is the segment origin relative to the world centre, `v` its unit
/// direction and `x` its length.
pub fn column_density_ratio_3d(p: Vec3, v: Vec3, x: f32, r: f32, h: f32) -> f32 {
    let xz = (-p).dot(v);
    let z2 = p.dot(p) - xz * xz;
    column_density_ratio_2d_scaled(0.0 - xz, x - xz, z2, r, h)
}
