use crate::foundation::core::Point;
use crate::foundation::error::GlyphResult;

/// Receives the dots of one tick, then one `present` making them visible.
pub trait DrawSurface {
    /// Queue a filled circle at a device-space `center`.
    fn draw_circle(&mut self, center: Point, radius: f64) -> GlyphResult<()>;

    /// Make everything queued since the previous present visible.
    fn present(&mut self) -> GlyphResult<()>;
}

impl<S: DrawSurface + ?Sized> DrawSurface for &mut S {
    fn draw_circle(&mut self, center: Point, radius: f64) -> GlyphResult<()> {
        (**self).draw_circle(center, radius)
    }

    fn present(&mut self) -> GlyphResult<()> {
        (**self).present()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub enum DrawCall {
    Circle { center: Point, radius: f64 },
    Present,
}

/// Records every call in order. Used by tests and the `trace` CLI output.
#[derive(Clone, Debug, Default)]
pub struct RecordingSurface {
    calls: Vec<DrawCall>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> &[DrawCall] {
        &self.calls
    }

    pub fn circle_count(&self) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, DrawCall::Circle { .. }))
            .count()
    }

    pub fn present_count(&self) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, DrawCall::Present))
            .count()
    }

    /// Circle centres drawn between the `n`-th and `n + 1`-th present.
    pub fn circles_in_frame(&self, n: usize) -> Vec<Point> {
        self.calls
            .split(|c| matches!(c, DrawCall::Present))
            .nth(n)
            .unwrap_or_default()
            .iter()
            .filter_map(|c| match c {
                DrawCall::Circle { center, .. } => Some(*center),
                DrawCall::Present => None,
            })
            .collect()
    }

    pub fn clear(&mut self) {
        self.calls.clear();
    }
}

impl DrawSurface for RecordingSurface {
    fn draw_circle(&mut self, center: Point, radius: f64) -> GlyphResult<()> {
        self.calls.push(DrawCall::Circle { center, radius });
        Ok(())
    }

    fn present(&mut self) -> GlyphResult<()> {
        self.calls.push(DrawCall::Present);
        Ok(())
    }
}
