use crate::config::DisplayConfig;
use crate::foundation::core::Point;
use crate::foundation::error::{GlyphError, GlyphResult};
use crate::glyph::model::FrameTrack;
use crate::render::surface::DrawSurface;
use crate::sampler;
use crate::transform::{AffineTransform, TransformChain};

/// Glyph-space placement of the three digits, left to right.
pub const DIGIT_ORIGINS: [Point; 3] = [Point::new(30, 30), Point::new(150, 30), Point::new(270, 30)];

/// Dot radius in device pixels per unit of scale.
pub const DOT_RADIUS_PER_SCALE: f64 = 2.0;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct TickStats {
    /// Frame index that was drawn.
    pub frame: usize,
    pub circles: usize,
}

/// Pan/zoom/rotate state plus a cyclic cursor into a precomputed frame track.
///
/// Pan, zoom and rotation never touch the frame cursor; only [`AnimatedDisplay::render_tick`]
/// advances it.
#[derive(Clone, Debug)]
pub struct AnimatedDisplay {
    track: FrameTrack,
    frame_idx: usize,
    scale: f64,
    angle_deg: i32,
    center: Point,
    digit_origins: [Point; 3],
    chain: TransformChain,
}

impl AnimatedDisplay {
    pub fn new(track: FrameTrack) -> GlyphResult<Self> {
        if track.is_empty() {
            return Err(GlyphError::precondition("frame track must not be empty"));
        }
        Ok(Self {
            track,
            frame_idx: 0,
            scale: 1.0,
            angle_deg: 0,
            center: Point::ORIGIN,
            digit_origins: DIGIT_ORIGINS,
            chain: TransformChain::default(),
        })
    }

    /// Applies the configured digit placement and initial pan.
    pub fn from_config(track: FrameTrack, cfg: &DisplayConfig) -> GlyphResult<Self> {
        let mut display = Self::new(track)?;
        display.digit_origins = cfg.digit_origins;
        display.move_to(cfg.center);
        Ok(display)
    }

    pub fn track(&self) -> &FrameTrack {
        &self.track
    }

    pub fn frame_index(&self) -> usize {
        self.frame_idx
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Rotation in degrees, always within `0..360`.
    pub fn angle(&self) -> i32 {
        self.angle_deg
    }

    pub fn center(&self) -> Point {
        self.center
    }

    pub fn transforms(&self) -> TransformChain {
        self.chain
    }

    pub fn scale_up(&mut self, factor: f64) -> GlyphResult<()> {
        check_factor(factor)?;
        self.set_scale(self.scale * factor)
    }

    pub fn scale_down(&mut self, factor: f64) -> GlyphResult<()> {
        check_factor(factor)?;
        self.set_scale(self.scale / factor)
    }

    fn set_scale(&mut self, scale: f64) -> GlyphResult<()> {
        if !(scale.is_finite() && scale > 0.0) {
            return Err(GlyphError::precondition(format!(
                "scale left the finite positive range: {scale}"
            )));
        }
        self.scale = scale;
        self.chain.scale = AffineTransform::scale(scale, self.center);
        tracing::trace!(scale, "scale changed");
        Ok(())
    }

    /// Sets the pan offset absolutely.
    pub fn move_to(&mut self, center: Point) {
        self.center = center;
        self.chain.translate = AffineTransform::translate(center);
        tracing::trace!(x = center.x, y = center.y, "moved");
    }

    /// Pans by `delta`; a pan that would leave the `i32` range is refused.
    pub fn move_relative(&mut self, delta: Point) -> GlyphResult<()> {
        let center = self.center.checked_add(delta).ok_or_else(|| {
            GlyphError::precondition(format!(
                "pan by {delta:?} from {:?} overflows",
                self.center
            ))
        })?;
        self.move_to(center);
        Ok(())
    }

    /// Adds a signed rotation, wrapping into `0..360`.
    pub fn rotate(&mut self, delta_deg: i32) {
        let angle = (i64::from(self.angle_deg) + i64::from(delta_deg)).rem_euclid(360);
        self.angle_deg = angle as i32;
        self.chain.rotate = AffineTransform::rotate(f64::from(self.angle_deg).to_radians());
        tracing::trace!(angle = self.angle_deg, "rotated");
    }

    /// Draws the current frame, presents it, then advances to the next frame.
    ///
    /// Dots are issued glyph by glyph, curve by curve, in sample order. Every dot is placed and
    /// transformed before the first draw, so a coordinate that overflows `i32` fails the tick
    /// without touching the surface. On error the frame cursor stays put.
    pub fn render_tick<S: DrawSurface + ?Sized>(&mut self, surface: &mut S) -> GlyphResult<TickStats> {
        if !self.chain.is_finite() {
            return Err(GlyphError::precondition("transform chain is not finite"));
        }
        let frame = self
            .track
            .frame(self.frame_idx)
            .ok_or_else(|| GlyphError::precondition("frame track must not be empty"))?;

        let mut dots = Vec::with_capacity(frame.glyphs().len() * 2 * sampler::POINTS_PER_CURVE);
        for (glyph, origin) in frame.glyphs().iter().zip(self.digit_origins) {
            for curve in glyph.curves() {
                for p in sampler::sample(curve, origin, self.chain) {
                    dots.push(p?);
                }
            }
        }

        let radius = DOT_RADIUS_PER_SCALE * self.scale;
        for &p in &dots {
            surface.draw_circle(p, radius)?;
        }
        surface.present()?;
        let circles = dots.len();

        let stats = TickStats {
            frame: self.frame_idx,
            circles,
        };
        self.frame_idx = (self.frame_idx + 1) % self.track.len();
        tracing::debug!(frame = stats.frame, circles, "tick");
        Ok(stats)
    }
}

fn check_factor(factor: f64) -> GlyphResult<()> {
    if factor.is_finite() && factor > 0.0 {
        Ok(())
    } else {
        Err(GlyphError::precondition(format!(
            "scale factor must be finite and > 0, got {factor}"
        )))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/display/animated.rs"]
mod tests;
