//! Glyph data model and the glyph sources the frame builder consumes.

pub mod model;
pub mod source;

pub use model::{Curve, Frame, FrameTrack, Glyph};
pub use source::{GLYPH_0, GLYPH_1, GlyphPair, LEGACY_ORIGIN, MAX_GLYPH_COORD};
