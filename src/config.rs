//! Display configuration, loadable from JSON with every field optional.

use std::path::Path;

use anyhow::Context as _;

use crate::foundation::core::{Canvas, Point};
use crate::foundation::error::{GlyphError, GlyphResult};
use crate::display::DIGIT_ORIGINS;
use crate::render::cpu::SurfaceStyle;

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DisplayConfig {
    pub canvas: Canvas,
    /// Pan offset applied after scale and rotation.
    pub center: Point,
    pub tick_ms: u64,
    pub pan_step: i32,
    pub rotate_step_deg: i32,
    pub zoom_factor: f64,
    pub style: SurfaceStyle,
    /// Glyph-space placement of each digit, left to right.
    pub digit_origins: [Point; 3],
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            canvas: Canvas {
                width: 1024,
                height: 850,
            },
            center: Point::new(320, 240),
            tick_ms: 80,
            pan_step: 10,
            rotate_step_deg: 5,
            zoom_factor: 1.2,
            style: SurfaceStyle::default(),
            digit_origins: DIGIT_ORIGINS,
        }
    }
}

impl DisplayConfig {
    pub fn validate(&self) -> GlyphResult<()> {
        if self.canvas.width == 0 || self.canvas.height == 0 {
            return Err(GlyphError::validation("canvas width/height must be non-zero"));
        }
        if !(self.zoom_factor.is_finite() && self.zoom_factor > 0.0) {
            return Err(GlyphError::validation("zoom_factor must be finite and > 0"));
        }
        Ok(())
    }

    pub fn from_json(s: &str) -> GlyphResult<Self> {
        let cfg: Self = serde_json::from_str(s)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn load(path: &Path) -> GlyphResult<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read config '{}'", path.display()))?;
        Self::from_json(&text)
    }
}
