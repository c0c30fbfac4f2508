//! Physical constants and astronomical reference values.

/// Planck constant, J·s.
pub const PLANCK_CONSTANT: f32 = 6.626_070_04e-34;
/// Boltzmann constant, J/K.
pub const BOLTZMANN_CONSTANT: f32 = 1.380_648_5e-23;
/// Speed of light in vacuum, m/s.
pub const SPEED_OF_LIGHT: f32 = 299_792_458.0;
/// Stefan–Boltzmann constant, W/(m²·K⁴).
pub const STEFAN_BOLTZMANN_CONSTANT: f32 = 5.670_373e-8;

/// Radius of the sun, m.
pub const SOLAR_RADIUS: f64 = 695.7e6;
/// Effective surface temperature of the sun, K.
pub const SOLAR_TEMPERATURE: f64 = 5772.0;

/// Mean radius of the earth, m.
pub const EARTH_RADIUS: f64 = 6.371e6;
/// Scale height of the earth's lower atmosphere, m.
pub const EARTH_SCALE_HEIGHT: f64 = 8500.0;
/// Mean earth–sun distance, m.
pub const ASTRONOMICAL_UNIT: f64 = 149_597_870_700.0;
