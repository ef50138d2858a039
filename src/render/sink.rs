use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::foundation::core::Canvas;
use crate::foundation::error::{GlyphError, GlyphResult};
use crate::render::FrameRGBA;

/// Consumes presented frames in presentation order.
///
/// Ordering contract: `push_frame` indices start at 0 and increase by one per present.
pub trait FrameSink {
    /// Called once before any frames are pushed.
    fn begin(&mut self, canvas: Canvas) -> GlyphResult<()>;
    fn push_frame(&mut self, idx: u64, frame: &FrameRGBA) -> GlyphResult<()>;
    /// Called once after the last frame is pushed.
    fn end(&mut self) -> GlyphResult<()>;
}

/// In-memory sink for tests and single-frame export.
#[derive(Debug, Default)]
pub struct InMemorySink {
    canvas: Option<Canvas>,
    frames: Vec<(u64, FrameRGBA)>,
    /// Keep only the most recent frame when set.
    keep_last_only: bool,
}

impl InMemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last_only() -> Self {
        Self {
            keep_last_only: true,
            ..Self::default()
        }
    }

    pub fn canvas(&self) -> Option<Canvas> {
        self.canvas
    }

    pub fn frames(&self) -> &[(u64, FrameRGBA)] {
        &self.frames
    }

    pub fn last(&self) -> Option<&FrameRGBA> {
        self.frames.last().map(|(_, f)| f)
    }
}

impl FrameSink for InMemorySink {
    fn begin(&mut self, canvas: Canvas) -> GlyphResult<()> {
        self.canvas = Some(canvas);
        self.frames.clear();
        Ok(())
    }

    fn push_frame(&mut self, idx: u64, frame: &FrameRGBA) -> GlyphResult<()> {
        if self.keep_last_only {
            self.frames.clear();
        }
        self.frames.push((idx, frame.clone()));
        Ok(())
    }

    fn end(&mut self) -> GlyphResult<()> {
        Ok(())
    }
}

/// Writes every presented frame as `frame_00000.png`, `frame_00001.png`, ...
#[derive(Debug)]
pub struct PngSequenceSink {
    dir: PathBuf,
    written: Vec<PathBuf>,
}

impl PngSequenceSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            written: Vec::new(),
        }
    }

    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }
}

impl FrameSink for PngSequenceSink {
    fn begin(&mut self, _canvas: Canvas) -> GlyphResult<()> {
        std::fs::create_dir_all(&self.dir)
            .with_context(|| format!("create output dir '{}'", self.dir.display()))?;
        self.written.clear();
        Ok(())
    }

    fn push_frame(&mut self, idx: u64, frame: &FrameRGBA) -> GlyphResult<()> {
        let path = self.dir.join(format!("frame_{idx:05}.png"));
        write_png(&path, frame)?;
        self.written.push(path);
        Ok(())
    }

    fn end(&mut self) -> GlyphResult<()> {
        tracing::info!(
            frames = self.written.len(),
            dir = %self.dir.display(),
            "png sequence written"
        );
        Ok(())
    }
}

/// Encode `frame` as a straight-alpha RGBA8 PNG.
pub fn write_png(path: &Path, frame: &FrameRGBA) -> GlyphResult<()> {
    let expected = (frame.width as usize) * (frame.height as usize) * 4;
    if frame.data.len() != expected {
        return Err(GlyphError::render(format!(
            "frame buffer is {} bytes, expected {expected} for {}x{}",
            frame.data.len(),
            frame.width,
            frame.height
        )));
    }

    let straight;
    let data = if frame.premultiplied {
        straight = unpremultiply_rgba8(&frame.data);
        &straight
    } else {
        &frame.data
    };

    image::save_buffer_with_format(
        path,
        data,
        frame.width,
        frame.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", path.display()))?;
    Ok(())
}

fn unpremultiply_rgba8(data: &[u8]) -> Vec<u8> {
    let mut out = data.to_vec();
    for px in out.chunks_exact_mut(4) {
        let a = u16::from(px[3]);
        if a == 0 || a == 255 {
            continue;
        }
        for c in &mut px[..3] {
            *c = ((u16::from(*c) * 255 + a / 2) / a).min(255) as u8;
        }
    }
    out
}
