//! Whole-frame rendering on a pool of worker threads.
//!
//! Rows are queued on a bounded channel, shaded by named scoped workers, and
//! reassembled in row order, so output does not depend on the thread count.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::time::Instant;

use crossbeam_channel::bounded;
use glam::{Vec2, Vec4};
use tracing::{debug, info};

use crate::{Background, RenderError, SceneInputs, ViewInputs, shade_pixel};

/// A rendered RGBA8 image, top row first.
#[derive(Clone, Debug, PartialEq)]
pub struct Frame {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<[u8; 4]>,
}

impl Frame {
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        self.pixels[y as usize * self.width as usize + x as usize]
    }

    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }

    /// Encode the frame as an 8-bit RGBA PNG into `writer`.
    pub fn write_png_to(&self, writer: impl Write) -> Result<(), RenderError> {
        let mut encoder = png::Encoder::new(writer, self.width, self.height);
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);
        let mut writer = encoder.write_header()?;
        writer.write_image_data(self.as_bytes())?;
        writer.finish()?;
        Ok(())
    }

    pub fn encode_png(&self) -> Result<Vec<u8>, RenderError> {
        let mut buf = Vec::new();
        self.write_png_to(&mut buf)?;
        Ok(buf)
    }

    pub fn write_png(&self, path: &Path) -> Result<(), RenderError> {
        let mut file = BufWriter::new(File::create(path)?);
        self.write_png_to(&mut file)?;
        file.flush()?;
        info!(path = %path.display(), "Wrote {}x{} frame", self.width, self.height);
        Ok(())
    }
}

struct RenderedRow {
    y: u32,
    pixels: Vec<[u8; 4]>,
}

/// Shades frames across a fixed number of worker threads.
#[derive(Clone, Copy, Debug)]
pub struct FrameRenderer {
    thread_count: usize,
}

impl FrameRenderer {
    /// Create a renderer using `thread_count` workers (at least one).
    pub fn new(thread_count: usize) -> Self {
        Self {
            thread_count: thread_count.max(1),
        }
    }

    /// One worker per core, leaving one core for the caller.
    pub fn with_defaults() -> Self {
        let cpus = num_cpus::get().max(2);
        Self::new(cpus - 1)
    }

    pub fn thread_count(&self) -> usize {
        self.thread_count
    }

    /// Render a `width × height` frame.
    pub fn render(
        &self,
        width: u32,
        height: u32,
        background: &Background,
        view: &ViewInputs,
        scene: &SceneInputs,
    ) -> Result<Frame, RenderError> {
        if width == 0 || height == 0 {
            return Err(RenderError::InvalidSize { width, height });
        }
        let start = Instant::now();
        let threads = self.thread_count.min(height as usize);
        info!(width, height, threads, lights = scene.lights.len(), "Rendering frame");

        let (task_sender, task_receiver) = bounded::<u32>(height as usize);
        let (result_sender, result_receiver) = bounded::<RenderedRow>(height as usize);
        for y in 0..height {
            // Capacity covers every row and the receiver is alive.
            let _ = task_sender.send(y);
        }
        drop(task_sender);

        let mut pixels = vec![[0u8; 4]; width as usize * height as usize];
        let delivered = std::thread::scope(|scope| -> Result<u32, RenderError> {
            for i in 0..threads {
                let receiver = task_receiver.clone();
                let sender = result_sender.clone();
                std::thread::Builder::new()
                    .name(format!("render-worker-{i}"))
                    .spawn_scoped(scope, move || {
                        while let Ok(y) = receiver.recv() {
                            let pixels = render_row(y, width, height, background, view, scene);
                            if sender.send(RenderedRow { y, pixels }).is_err() {
                                break;
                            }
                        }
                    })
                    .map_err(RenderError::Spawn)?;
            }
            drop(result_sender);

            let mut delivered = 0;
            for row in result_receiver.iter() {
                let offset = row.y as usize * width as usize;
                pixels[offset..offset + width as usize].copy_from_slice(&row.pixels);
                delivered += 1;
            }
            Ok(delivered)
        })?;

        if delivered != height {
            return Err(RenderError::IncompleteFrame {
                delivered,
                expected: height,
            });
        }
        debug!("Frame rendered in {:.1} ms", start.elapsed().as_secs_f64() * 1000.0);
        Ok(Frame { width, height, pixels })
    }
}

/// Screen position of the centre of pixel `(x, y)`, with `v = 0` at the bottom row.
fn pixel_uv(x: u32, y: u32, width: u32, height: u32) -> Vec2 {
    Vec2::new(
        (x as f32 + 0.5) / width as f32,
        1.0 - (y as f32 + 0.5) / height as f32,
    )
}

fn render_row(
    y: u32,
    width: u32,
    height: u32,
    background: &Background,
    view: &ViewInputs,
    scene: &SceneInputs,
) -> Vec<[u8; 4]> {
    (0..width)
        .map(|x| {
            let uv = pixel_uv(x, y, width, height);
            to_rgba8(shade_pixel(uv, background.sample(uv), view, scene))
        })
        .collect()
}

fn to_rgba8(color: Vec4) -> [u8; 4] {
    let c = (color.clamp(Vec4::ZERO, Vec4::ONE) * 255.0).round();
    [c.x as u8, c.y as u8, c.z as u8, c.w as u8]
}
