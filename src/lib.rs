//! Morphing binary-counter glyph display.
//!
//! Two cubic-curve digit shapes morph into each other while a three-digit binary counter cycles
//! `000 → 001 → … → 111 → 000`. The whole display can be panned, zoomed and rotated.
//!
//! - [`FrameSequenceBuilder`] precomputes the 88-frame [`FrameTrack`] once.
//! - [`AnimatedDisplay`] owns the track and the interactive state; each
//!   [`AnimatedDisplay::render_tick`] samples every curve through the scale → rotate → translate
//!   [`TransformChain`] and draws one dot per sample on a [`DrawSurface`].
//! - [`Driver`] runs ticks at a fixed cadence and feeds input [`Command`]s.
#![forbid(unsafe_code)]

pub mod animation;
pub mod config;
pub mod display;
pub mod driver;
mod foundation;
pub mod glyph;
pub mod render;
pub mod sampler;
pub mod transform;

pub use crate::animation::{FrameSequenceBuilder, TRACK_LEN};
pub use crate::config::DisplayConfig;
pub use crate::display::{AnimatedDisplay, TickStats};
pub use crate::driver::{Command, Driver, Key, RunStats, ScriptedInput};
pub use crate::foundation::core::{Canvas, Point, Rgba8};
pub use crate::foundation::error::{GlyphError, GlyphResult};
pub use crate::glyph::{Curve, Frame, FrameTrack, GLYPH_0, GLYPH_1, Glyph, GlyphPair};
pub use crate::render::{
    DrawSurface, FrameRGBA, InMemorySink, PngSequenceSink, RasterSurface, RecordingSurface,
};
pub use crate::transform::{AffineTransform, TransformChain};
