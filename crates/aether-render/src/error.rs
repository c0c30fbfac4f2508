//! Render error types.

/// Errors that can occur while rendering a frame or moving images to and from disk.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// Frame dimensions must be non-zero.
    #[error("invalid frame size {width}x{height}")]
    InvalidSize { width: u32, height: u32 },

    /// Pixel buffer does not match the stated dimensions.
    #[error("image data has {actual} bytes, expected {expected}")]
    BufferSize { expected: usize, actual: usize },

    /// Failed to spawn a render worker thread.
    #[error("failed to spawn render worker: {0}")]
    Spawn(#[source] std::io::Error),

    /// A worker exited before delivering every row.
    #[error("render workers delivered {delivered} of {expected} rows")]
    IncompleteFrame { delivered: u32, expected: u32 },

    /// Failed to read or write an image file.
    #[error("image I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to decode a PNG background.
    #[error("failed to decode PNG: {0}")]
    Decode(#[from] png::DecodingError),

    /// Failed to encode the output PNG.
    #[error("failed to encode PNG: {0}")]
    Encode(#[from] png::EncodingError),
}
