//! Light transport through a flat, constant-density fluid layer.
//!
//! Water is treated as incompressible, so column density is simply path
//! length and every integral has a closed form.

use aether_math::{BIG, SMALL};
use aether_physics::{mie_phase, rayleigh_phase};
use glam::Vec3;

use crate::ScatteringCoefficients;

/// Light scattered toward the viewer by a fluid layer of depth `depth`, W/m² per channel.
///
/// `cos_view_angle` and `cos_light_angle` are the cosines between the surface
/// normal and the view and light rays, `cos_scatter_angle` the cosine between
/// light and view. Cosines at or below zero are floored at [`SMALL`].
/// Refraction at the surface is not modelled: light is assumed to continue in
/// a straight line.
pub fn fluid_scattered_radiance_flat_world(
    cos_view_angle: f32,
    cos_light_angle: f32,
    cos_scatter_angle: f32,
    depth: f32,
    refracted_intensity: Vec3,
    beta: &ScatteringCoefficients,
) -> Vec3 {
    let nv = cos_view_angle.max(SMALL);
    let nl = cos_light_angle.max(SMALL);

    let gamma_ray = rayleigh_phase(cos_scatter_angle);
    let gamma_mie = mie_phase(cos_scatter_angle);
    let beta_gamma = beta.rayleigh * gamma_ray + beta.mie * gamma_mie;
    let beta_sum = beta.extinction();

    let sigma_v = (depth / nv).min(BIG);
    // Full path (down along the light, back up along the view) per unit of view path.
    let sigma_ratio = 1.0 + nv / nl;

    let extinction = sigma_ratio * beta_sum;
    let absorbed = Vec3::new(
        path_integral(sigma_v, extinction.x),
        path_integral(sigma_v, extinction.y),
        path_integral(sigma_v, extinction.z),
    );
    refracted_intensity * beta_gamma * absorbed
}

/// `∫₀ˢ exp(-k·x) dx`, falling back to `s` when `k` vanishes.
///
/// `exp_m1` keeps the result accurate for small `k`, where `exp(-s·k) - 1`
/// would cancel to zero in f32.
fn path_integral(s: f32, k: f32) -> f32 {
    if k.abs() <= SMALL {
        return s;
    }
    -(-s * k).exp_m1() / k
}

/// Fraction of light surviving passage through a fluid layer of depth `depth`
/// at incidence cosine `cos_incident_angle`, per channel.
pub fn fluid_transmittance_flat_world(
    cos_incident_angle: f32,
    depth: f32,
    beta: &ScatteringCoefficients,
) -> Vec3 {
    let sigma = (depth / cos_incident_angle.max(SMALL)).min(BIG);
    (-sigma * beta.extinction()).exp()
}
