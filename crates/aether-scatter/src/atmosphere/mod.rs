//! Atmospheric scattering for a curved, exponentially stratified world.
//!
//! Provides [`Atmosphere`] for configuration, the closed-form column density
//! routines, and the raymarch that accumulates in-scattered light along a
//! view ray.

mod column_density;
mod scatter;

pub use column_density::{
    column_density_ratio_2d, column_density_ratio_2d_scaled, column_density_ratio_3d,
};
pub use scatter::{STEP_COUNT, air_transmittance, scattered_radiance, scattered_radiance_for_lights};

use aether_physics::constants::EARTH_SCALE_HEIGHT;
use glam::Vec3;

/// Per-wavelength extinction rates (m⁻¹, RGB) at surface density.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScatteringCoefficients {
    /// Rayleigh scattering by molecules.
    pub rayleigh: Vec3,
    /// Mie scattering by aerosols.
    pub mie: Vec3,
    /// Absorption, e.g. by ozone.
    pub absorption: Vec3,
}

impl ScatteringCoefficients {
    pub fn new(rayleigh: Vec3, mie: Vec3, absorption: Vec3) -> Self {
        Self {
            rayleigh,
            mie,
            absorption,
        }
    }

    /// A medium that neither scatters nor absorbs.
    pub fn zero() -> Self {
        Self::new(Vec3::ZERO, Vec3::ZERO, Vec3::ZERO)
    }

    /// Sea-level coefficients for an earth-like atmosphere.
    pub fn earth_air() -> Self {
        Self::new(
            Vec3::new(5.5e-6, 13.0e-6, 22.4e-6),
            Vec3::splat(21e-6),
            Vec3::new(2.04e-6, 4.97e-6, 1.95e-7),
        )
    }

    /// Coefficients for clear sea water.
    pub fn earth_ocean() -> Self {
        Self::new(
            Vec3::new(0.0012, 0.0027, 0.0056),
            Vec3::ZERO,
            Vec3::new(0.45, 0.06, 0.02),
        )
    }

    /// Total extinction: scattering in every direction plus absorption.
    pub fn extinction(&self) -> Vec3 {
        self.rayleigh + self.mie + self.absorption
    }
}

impl Default for ScatteringCoefficients {
    fn default() -> Self {
        Self::earth_air()
    }
}

/// A thin atmosphere whose density falls off as `exp(-height / scale_height)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Atmosphere {
    /// Height over which density falls by a factor of `e`, in meters.
    pub scale_height: f32,
    /// Extinction coefficients at surface density.
    pub coefficients: ScatteringCoefficients,
}

impl Atmosphere {
    pub fn new(scale_height: f32, coefficients: ScatteringCoefficients) -> Self {
        Self {
            scale_height,
            coefficients,
        }
    }

    /// Earth-like atmosphere with an 8.5 km scale height.
    pub fn earth_like() -> Self {
        Self::new(EARTH_SCALE_HEIGHT as f32, ScatteringCoefficients::earth_air())
    }

    /// Density relative to the surface at the given height.
    pub fn density_ratio(&self, height: f32) -> f32 {
        (-height / self.scale_height).exp()
    }
}

impl Default for Atmosphere {
    fn default() -> Self {
        Self::earth_like()
    }
}
