//! Precomputed morph animation for the three-digit binary counter.

pub mod track;

pub use track::{
    COUNTER_STATES, FRAMES_PER_TRANSITION, FrameSequenceBuilder, TRACK_LEN, interpolate, zip3,
};
