//! Errors raised while assembling scattering inputs.

/// Errors that can occur when building inputs for the scattering model.
///
/// The numeric routines themselves never fail; degenerate geometry is
/// absorbed by clamping.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ScatterError {
    /// More light sources than a single shading call supports.
    #[error("too many light sources: {count} exceeds the limit of {max}")]
    TooManyLights { count: usize, max: usize },
}
