//! Physical constants, black-body emission, angular scattering, and colour
//! space helpers used by the atmosphere renderer.
//!
//! All quantities are SI unless stated otherwise: wavelengths in meters,
//! temperatures in kelvin, fluxes in W/m².

pub mod color;
pub mod constants;
pub mod emission;
pub mod scattering;

pub use color::{EXPOSURE_INTENSITY, rgb_intensity_of_rgb_signal, rgb_signal_of_rgb_intensity, tone_map};
pub use emission::{
    black_body_emissive_flux, black_body_fraction_below_wavelength,
    black_body_fraction_between_wavelengths, black_body_rgb_intensity,
};
pub use scattering::{MIE_ASYMMETRY, mie_phase, mie_phase_with_asymmetry, rayleigh_phase};
