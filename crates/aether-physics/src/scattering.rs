//! Angular phase functions: the fraction of scattered light redirected into a
//! given angle, independent of wavelength and density.

use std::f32::consts::PI;

/// Default Mie asymmetry parameter for terrestrial aerosols.
pub const MIE_ASYMMETRY: f32 = 0.76;

/// Rayleigh phase function for the cosine of the scattering angle.
pub fn rayleigh_phase(cos_angle: f32) -> f32 {
    3.0 / (16.0 * PI) * (1.0 + cos_angle * cos_angle)
}

/// Mie phase function using [`MIE_ASYMMETRY`].
pub fn mie_phase(cos_angle: f32) -> f32 {
    mie_phase_with_asymmetry(cos_angle, MIE_ASYMMETRY)
}

/// Cornette–Shanks approximation of the Mie phase function.
///
/// `g` in `(-1, 1)` controls the forward (positive) or backward (negative) lobe.
pub fn mie_phase_with_asymmetry(cos_angle: f32, g: f32) -> f32 {
    let g2 = g * g;
    let num = 3.0 * (1.0 - g2) * (1.0 + cos_angle * cos_angle);
    let denom = 8.0 * PI * (2.0 + g2) * (1.0 + g2 - 2.0 * g * cos_angle).powf(1.5);
    num / denom
}
