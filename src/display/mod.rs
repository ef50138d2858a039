//! The interactive, self-advancing counter display.

pub mod animated;

pub use animated::{AnimatedDisplay, DIGIT_ORIGINS, DOT_RADIUS_PER_SCALE, TickStats};
