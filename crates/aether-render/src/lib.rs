//! CPU compositor for the atmosphere pass.
//!
//! [`shade_pixel`] is the per-pixel entry point: it builds the view ray,
//! clips it against the atmosphere shell and the planet, accumulates scattered
//! light from every source, lets the background through what remains, and
//! tone maps the result. [`FrameRenderer`] runs it over a whole frame on a
//! pool of worker threads.

mod background;
mod error;
mod frame;
mod inputs;
mod shade;
mod uniform;

pub use background::{Background, SignalImage};
pub use error::RenderError;
pub use frame::{Frame, FrameRenderer};
pub use inputs::{SceneInputs, ViewInputs};
pub use shade::{ATMOSPHERE_SCALE_HEIGHTS, BACKGROUND_PATH_FRACTION, shade_pixel};
pub use uniform::SceneUniform;
