//! Black-body emission.

use std::f32::consts::PI;

use glam::Vec3;

use crate::constants::{
    BOLTZMANN_CONSTANT, PLANCK_CONSTANT, SPEED_OF_LIGHT, STEFAN_BOLTZMANN_CONSTANT,
};

/// Number of terms summed from the infinite series for the black-body fraction.
///
/// Two terms are indistinguishable from the full series at display precision.
pub const BLACK_BODY_SERIES_TERMS: u32 = 2;

/// Visible wavelength bands (meters) used to split black-body flux into RGB.
pub const RED_BAND: (f32, f32) = (600e-9, 700e-9);
pub const GREEN_BAND: (f32, f32) = (500e-9, 600e-9);
pub const BLUE_BAND: (f32, f32) = (400e-9, 500e-9);

/// Fraction of a black body's radiated power emitted below `wavelength`.
///
/// Series solution from Lawson 2004, "The Blackbody Fraction, Infinite Series
/// and Spreadsheets", truncated to [`BLACK_BODY_SERIES_TERMS`] terms.
pub fn black_body_fraction_below_wavelength(wavelength: f32, temperature: f32) -> f32 {
    let c2 = PLANCK_CONSTANT * SPEED_OF_LIGHT / BOLTZMANN_CONSTANT;
    let z = c2 / (wavelength * temperature);
    let z2 = z * z;
    let z3 = z2 * z;

    let mut sum = 0.0;
    for term in 1..=BLACK_BODY_SERIES_TERMS {
        let n = term as f32;
        let n2 = n * n;
        let n3 = n2 * n;
        sum += (z3 + 3.0 * z2 / n + 6.0 * z / n2 + 6.0 / n3) * (-n * z).exp() / n;
    }
    15.0 * sum / (PI * PI * PI * PI)
}

/// Fraction of a black body's radiated power emitted between `lo` and `hi` meters.
pub fn black_body_fraction_between_wavelengths(lo: f32, hi: f32, temperature: f32) -> f32 {
    black_body_fraction_below_wavelength(hi, temperature)
        - black_body_fraction_below_wavelength(lo, temperature)
}

/// Total radiant flux (W/m²) emitted by a black body, by the Stefan–Boltzmann law.
pub fn black_body_emissive_flux(temperature: f32) -> f32 {
    let t = temperature;
    STEFAN_BOLTZMANN_CONSTANT * t * t * t * t
}

/// Emitted flux (W/m²) falling in the red, green and blue visible bands.
pub fn black_body_rgb_intensity(temperature: f32) -> Vec3 {
    let flux = black_body_emissive_flux(temperature);
    let band = |(lo, hi): (f32, f32)| flux * black_body_fraction_between_wavelengths(lo, hi, temperature);
    Vec3::new(band(RED_BAND), band(GREEN_BAND), band(BLUE_BAND))
}
