//! Point-on-curve estimation for cubic glyph curves.

pub mod curve;

pub use curve::{CurveSamples, POINTS_PER_CURVE, SAMPLE_STEP, rounded_casteljau, sample};
