//! Conversion between display signal and linear light intensity, and
//! exposure-based tone mapping.

use glam::Vec3;

/// Display gamma used for signal encoding.
pub const GAMMA: f32 = 2.2;

/// Intensity (W/m²) that maps to `1 - 1/e` after tone mapping.
pub const EXPOSURE_INTENSITY: f32 = 150.0;

/// Decode a display signal in `[0, 1]` to relative linear intensity.
pub fn rgb_intensity_of_rgb_signal(signal: Vec3) -> Vec3 {
    signal.max(Vec3::ZERO).powf(GAMMA)
}

/// Encode relative linear intensity in `[0, 1]` as a display signal.
pub fn rgb_signal_of_rgb_intensity(intensity: Vec3) -> Vec3 {
    intensity.max(Vec3::ZERO).powf(1.0 / GAMMA)
}

/// Map unbounded intensity into `[0, 1)` with `1 - exp(-E / exposure)`.
pub fn tone_map(intensity: Vec3, exposure: f32) -> Vec3 {
    Vec3::ONE - (-intensity / exposure).exp()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signal_intensity_inverse() {
        let signal = Vec3::new(0.1, 0.5, 0.9);
        let back = rgb_signal_of_rgb_intensity(rgb_intensity_of_rgb_signal(signal));
        assert!((back - signal).abs().max_element() < 1e-5);
    }

    #[test]
    fn test_signal_endpoints_fixed() {
        assert_eq!(rgb_intensity_of_rgb_signal(Vec3::ZERO), Vec3::ZERO);
        assert_eq!(rgb_intensity_of_rgb_signal(Vec3::ONE), Vec3::ONE);
    }

    #[test]
    fn test_tone_map_range() {
        assert_eq!(tone_map(Vec3::ZERO, EXPOSURE_INTENSITY), Vec3::ZERO);

        let mapped = tone_map(Vec3::splat(EXPOSURE_INTENSITY), EXPOSURE_INTENSITY);
        let expected = 1.0 - (-1.0_f32).exp();
        assert!((mapped.x - expected).abs() < 1e-6);

        let bright = tone_map(Vec3::splat(1e6), EXPOSURE_INTENSITY);
        assert!(bright.min_element() > 0.999 && bright.max_element() <= 1.0);
    }
}
