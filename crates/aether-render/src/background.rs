//! Background light behind the atmosphere.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use glam::{Vec2, Vec3};

use crate::RenderError;

/// An RGB signal image, stored top row first with channels in `[0, 1]`.
#[derive(Clone, Debug, PartialEq)]
pub struct SignalImage {
    width: u32,
    height: u32,
    pixels: Vec<Vec3>,
}

impl SignalImage {
    /// Wrap tightly packed RGBA8 data. Alpha is ignored.
    pub fn from_rgba8(width: u32, height: u32, data: &[u8]) -> Result<Self, RenderError> {
        if width == 0 || height == 0 {
            return Err(RenderError::InvalidSize { width, height });
        }
        let expected = width as usize * height as usize * 4;
        if data.len() != expected {
            return Err(RenderError::BufferSize {
                expected,
                actual: data.len(),
            });
        }
        let pixels = data
            .chunks_exact(4)
            .map(|p| Vec3::new(p[0] as f32, p[1] as f32, p[2] as f32) / 255.0)
            .collect();
        Ok(Self { width, height, pixels })
    }

    /// Load a PNG file, expanding palette, grayscale and 16-bit images to 8-bit colour.
    pub fn load_png(path: &Path) -> Result<Self, RenderError> {
        let file = File::open(path)?;
        Self::decode_png(BufReader::new(file))
    }

    pub fn decode_png(reader: impl Read) -> Result<Self, RenderError> {
        let mut decoder = png::Decoder::new(reader);
        decoder.set_transformations(png::Transformations::normalize_to_color8());
        let mut reader = decoder.read_info()?;
        let mut buf = vec![0; reader.output_buffer_size()];
        let info = reader.next_frame(&mut buf)?;
        let bytes = &buf[..info.buffer_size()];

        let rgba: Vec<u8> = match info.color_type {
            png::ColorType::Rgba => bytes.to_vec(),
            png::ColorType::Rgb => bytes
                .chunks_exact(3)
                .flat_map(|p| [p[0], p[1], p[2], 255])
                .collect(),
            png::ColorType::GrayscaleAlpha => bytes
                .chunks_exact(2)
                .flat_map(|p| [p[0], p[0], p[0], p[1]])
                .collect(),
            // Grayscale; indexed images are expanded by the decoder.
            _ => bytes.iter().flat_map(|&g| [g, g, g, 255]).collect(),
        };
        Self::from_rgba8(info.width, info.height, &rgba)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Nearest texel at `uv`, with `v = 0` at the bottom row. Coordinates are clamped to the edge.
    pub fn sample(&self, uv: Vec2) -> Vec3 {
        let x = (uv.x * self.width as f32).floor().clamp(0.0, (self.width - 1) as f32) as usize;
        let y = ((1.0 - uv.y) * self.height as f32).floor().clamp(0.0, (self.height - 1) as f32) as usize;
        self.pixels[y * self.width as usize + x]
    }
}

/// Light arriving from behind the atmosphere, as a gamma-encoded signal.
#[derive(Clone, Debug, PartialEq)]
pub enum Background {
    Solid(Vec3),
    Image(SignalImage),
}

impl Background {
    /// Background signal at screen position `uv`.
    pub fn sample(&self, uv: Vec2) -> Vec3 {
        match self {
            Self::Solid(color) => *color,
            Self::Image(image) => image.sample(uv),
        }
    }
}

impl Default for Background {
    fn default() -> Self {
        Self::Solid(Vec3::ZERO)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 2x2 image: red, green on the top row, blue, white on the bottom row.
    fn checker() -> SignalImage {
        #[rustfmt::skip]
        let data = [
            255, 0, 0, 255,   0, 255, 0, 255,
            0, 0, 255, 255,   255, 255, 255, 255,
        ];
        SignalImage::from_rgba8(2, 2, &data).unwrap()
    }

    #[test]
    fn test_nearest_sampling_by_quadrant() {
        let image = checker();
        assert_eq!(image.sample(Vec2::new(0.25, 0.75)), Vec3::X);
        assert_eq!(image.sample(Vec2::new(0.75, 0.75)), Vec3::Y);
        assert_eq!(image.sample(Vec2::new(0.25, 0.25)), Vec3::Z);
        assert_eq!(image.sample(Vec2::new(0.75, 0.25)), Vec3::ONE);
    }

    #[test]
    fn test_sampling_clamps_at_edges() {
        let image = checker();
        assert_eq!(image.sample(Vec2::new(1.0, 1.0)), Vec3::Y);
        assert_eq!(image.sample(Vec2::new(-0.5, 0.0)), Vec3::Z);
    }

    #[test]
    fn test_rejects_mismatched_buffer() {
        let err = SignalImage::from_rgba8(2, 2, &[0; 12]).unwrap_err();
        assert!(matches!(err, RenderError::BufferSize { expected: 16, actual: 12 }));
        assert!(matches!(
            SignalImage::from_rgba8(0, 2, &[]),
            Err(RenderError::InvalidSize { .. })
        ));
    }

    #[test]
    fn test_decodes_rgb_png() {
        let mut encoded = Vec::new();
        {
            let mut encoder = png::Encoder::new(&mut encoded, 2, 1);
            encoder.set_color(png::ColorType::Rgb);
            encoder.set_depth(png::BitDepth::Eight);
            let mut writer = encoder.write_header().unwrap();
            writer.write_image_data(&[255, 0, 0, 0, 0, 255]).unwrap();
        }
        let image = SignalImage::decode_png(encoded.as_slice()).unwrap();
        assert_eq!((image.width(), image.height()), (2, 1));
        assert_eq!(image.sample(Vec2::new(0.2, 0.5)), Vec3::X);
        assert_eq!(image.sample(Vec2::new(0.8, 0.5)), Vec3::Z);
    }

    #[test]
    fn test_solid_background_is_uniform() {
        let background = Background::Solid(Vec3::new(0.1, 0.2, 0.3));
        assert_eq!(background.sample(Vec2::ZERO), background.sample(Vec2::ONE));
    }
}
