use crate::foundation::core::Point;
use crate::glyph::model::{Curve, Frame, FrameTrack, Glyph};
use crate::glyph::source::GlyphPair;

/// Interpolated glyphs per transition, both endpoints included.
pub const FRAMES_PER_TRANSITION: usize = 11;

/// Counter values 0b000..=0b111; each one starts one transition edge.
pub const COUNTER_STATES: u8 = 8;

pub const TRACK_LEN: usize = COUNTER_STATES as usize * FRAMES_PER_TRANSITION;

const DIGITS: usize = 3;
const STEPS: i32 = FRAMES_PER_TRANSITION as i32 - 1;

fn lerp_point(from: Point, to: Point, i: i32) -> Point {
    Point::new(lerp(from.x, to.x, i), lerp(from.y, to.y, i))
}

fn lerp(from: i32, to: i32, i: i32) -> i32 {
    // Integer division truncates toward zero. Widened so the difference cannot overflow; for
    // `0 <= i <= STEPS` the result lies between `from` and `to`.
    let v = i64::from(from) + (i64::from(to) - i64::from(from)) * i64::from(i) / i64::from(STEPS);
    v as i32
}

/// Morphs `from` into `to` over `FRAMES_PER_TRANSITION` glyphs, moving each control point
/// independently.
pub fn interpolate(from: &Glyph, to: &Glyph) -> Vec<Glyph> {
    if from == to {
        return vec![*from; FRAMES_PER_TRANSITION];
    }

    (0..=STEPS)
        .map(|i| {
            Glyph(std::array::from_fn(|c| {
                let (a, b) = (from.0[c].points(), to.0[c].points());
                Curve(std::array::from_fn(|p| lerp_point(a[p], b[p], i)))
            }))
        })
        .collect()
}

/// Position-wise zip of three glyph tracks into frames; stops at the shortest input.
pub fn zip3(first: &[Glyph], second: &[Glyph], third: &[Glyph]) -> Vec<Frame> {
    first
        .iter()
        .zip(second)
        .zip(third)
        .map(|((a, b), c)| Frame([*a, *b, *c]))
        .collect()
}

/// Builds the master frame track from the two base glyphs.
#[derive(Clone, Debug)]
pub struct FrameSequenceBuilder {
    // Indexed `[from_bit][to_bit]`.
    morphs: [[Vec<Glyph>; 2]; 2],
}

impl FrameSequenceBuilder {
    pub fn new(glyphs: &GlyphPair) -> Self {
        let morph = |from: u8, to: u8| interpolate(glyphs.get(from), glyphs.get(to));
        Self {
            morphs: [[morph(0, 0), morph(0, 1)], [morph(1, 0), morph(1, 1)]],
        }
    }

    /// Glyph track for one digit position moving from bit `from` to bit `to`.
    pub fn morph(&self, from: u8, to: u8) -> &[Glyph] {
        &self.morphs[usize::from(from & 1)][usize::from(to & 1)]
    }

    /// Frames for the counter advancing from `from` to `to`, most significant digit first.
    pub fn transition(&self, from: u8, to: u8) -> Vec<Frame> {
        let digit = |pos: usize| self.morph((from >> pos) & 1, (to >> pos) & 1);
        zip3(digit(DIGITS - 1), digit(1), digit(0))
    }

    /// All eight transitions `000 → 001 → … → 111 → 000`, concatenated.
    #[tracing::instrument(skip(self))]
    pub fn build(&self) -> FrameTrack {
        let frames: Vec<Frame> = (0..COUNTER_STATES)
            .flat_map(|from| self.transition(from, (from + 1) % COUNTER_STATES))
            .collect();
        tracing::debug!(frames = frames.len(), "built frame track");
        FrameTrack::from_frames(frames)
    }
}
