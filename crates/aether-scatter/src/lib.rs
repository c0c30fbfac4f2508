//! Light transport through planetary atmospheres and oceans.
//!
//! The atmosphere model integrates single scattering along a view ray with a
//! fixed-step raymarch, using a closed-form approximation of the air column
//! density so no nested march toward the light is needed. The ocean model is a
//! flat, constant-density slab with fully closed-form solutions.

pub mod atmosphere;
mod error;
mod light;
pub mod ocean;

pub use atmosphere::{
    Atmosphere, STEP_COUNT, ScatteringCoefficients, air_transmittance, column_density_ratio_2d,
    column_density_ratio_2d_scaled, column_density_ratio_3d, scattered_radiance,
    scattered_radiance_for_lights,
};
pub use error::ScatterError;
pub use light::{LightSet, LightSource};
pub use ocean::{fluid_scattered_radiance_flat_world, fluid_transmittance_flat_world};
