use vello_cpu::kurbo::{Circle, Rect, Shape as _};

use crate::foundation::core::{Canvas, Point, Rgba8};
use crate::foundation::error::{GlyphError, GlyphResult};
use crate::render::FrameRGBA;
use crate::render::sink::FrameSink;
use crate::render::surface::DrawSurface;

const CIRCLE_TOLERANCE: f64 = 0.1;

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SurfaceStyle {
    pub background: Rgba8,
    pub dot: Rgba8,
}

impl Default for SurfaceStyle {
    fn default() -> Self {
        Self {
            background: Rgba8::WHITE,
            dot: Rgba8::RED,
        }
    }
}

/// CPU raster surface powered by `vello_cpu`.
///
/// Each present clears to the background, fills every queued dot, and hands the resulting
/// premultiplied frame to the sink.
pub struct RasterSurface<S: FrameSink> {
    width: u16,
    height: u16,
    style: SurfaceStyle,
    ctx: vello_cpu::RenderContext,
    sink: S,
    presented: u64,
}

impl<S: FrameSink> RasterSurface<S> {
    pub fn new(canvas: Canvas, style: SurfaceStyle, mut sink: S) -> GlyphResult<Self> {
        let width: u16 = canvas
            .width
            .try_into()
            .map_err(|_| GlyphError::render("surface width exceeds u16"))?;
        let height: u16 = canvas
            .height
            .try_into()
            .map_err(|_| GlyphError::render("surface height exceeds u16"))?;
        if width == 0 || height == 0 {
            return Err(GlyphError::render("surface width/height must be non-zero"));
        }

        sink.begin(canvas)?;
        Ok(Self {
            width,
            height,
            style,
            ctx: new_context(width, height, style),
            sink,
            presented: 0,
        })
    }

    pub fn presented(&self) -> u64 {
        self.presented
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Ends the sink and returns it.
    pub fn finish(mut self) -> GlyphResult<S> {
        self.sink.end()?;
        Ok(self.sink)
    }
}

impl<S: FrameSink> DrawSurface for RasterSurface<S> {
    fn draw_circle(&mut self, center: Point, radius: f64) -> GlyphResult<()> {
        if !radius.is_finite() || radius < 0.0 {
            return Err(GlyphError::precondition(format!(
                "dot radius must be finite and non-negative, got {radius}"
            )));
        }
        let circle = Circle::new((f64::from(center.x), f64::from(center.y)), radius);
        self.ctx.fill_path(&circle.to_path(CIRCLE_TOLERANCE));
        Ok(())
    }

    fn present(&mut self) -> GlyphResult<()> {
        let mut ctx = std::mem::replace(
            &mut self.ctx,
            new_context(self.width, self.height, self.style),
        );
        ctx.flush();
        let mut pixmap = vello_cpu::Pixmap::new(self.width, self.height);
        ctx.render_to_pixmap(&mut pixmap);

        let frame = FrameRGBA {
            width: u32::from(self.width),
            height: u32::from(self.height),
            data: pixmap.data_as_u8_slice().to_vec(),
            premultiplied: true,
        };
        self.sink.push_frame(self.presented, &frame)?;
        self.presented += 1;
        Ok(())
    }
}

fn color(c: Rgba8) -> vello_cpu::peniko::Color {
    vello_cpu::peniko::Color::from_rgba8(c.r, c.g, c.b, c.a)
}

fn new_context(width: u16, height: u16, style: SurfaceStyle) -> vello_cpu::RenderContext {
    let mut ctx = vello_cpu::RenderContext::new(width, height);
    ctx.set_paint(color(style.background));
    ctx.fill_rect(&Rect::new(0.0, 0.0, f64::from(width), f64::from(height)));
    ctx.set_paint(color(style.dot));
    ctx
}
