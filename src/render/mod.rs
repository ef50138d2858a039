//! Drawing surfaces the display renders into, and sinks for presented frames.

pub mod cpu;
pub mod sink;
pub mod surface;

pub use cpu::{RasterSurface, SurfaceStyle};
pub use sink::{FrameSink, InMemorySink, PngSequenceSink, write_png};
pub use surface::{DrawCall, DrawSurface, RecordingSurface};

/// A presented frame as RGBA8 pixels.
///
/// Frames are **premultiplied alpha**; the flag makes this explicit at API boundaries.
#[derive(Clone, Debug)]
pub struct FrameRGBA {
    pub width: u32,
    pub height: u32,
    /// RGBA8 bytes, tightly packed, row-major.
    pub data: Vec<u8>,
    pub premultiplied: bool,
}

impl FrameRGBA {
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = ((y * self.width + x) * 4) as usize;
        let px = self.data.get(i..i + 4)?;
        Some([px[0], px[1], px[2], px[3]])
    }
}
