use std::iter::FusedIterator;

use crate::foundation::core::Point;
use crate::foundation::error::{GlyphError, GlyphResult};
use crate::foundation::math::round_half_down;
use crate::glyph::model::Curve;
use crate::transform::TransformChain;

/// Parameter increment between consecutive samples.
pub const SAMPLE_STEP: f64 = 0.05;

/// Points emitted per curve: the start point plus one per step over `t ∈ [0, 1)`.
pub const POINTS_PER_CURVE: usize = 21;

/// De Casteljau reduction that rounds every interpolated offset to an integer before the next
/// level uses it.
///
/// This intentionally differs from exact Bezier evaluation: the per-level rounding drifts as `t`
/// grows, which gives the dots their discretized placement.
pub fn rounded_casteljau(curve: &Curve, t: f64) -> Point {
    let mut r = *curve.points();
    for level in (2..=r.len()).rev() {
        for i in 0..level - 1 {
            let (a, b) = (r[i], r[i + 1]);
            r[i] = Point::new(step(a.x, b.x, t), step(a.y, b.y, t));
        }
    }
    r[0]
}

fn step(a: i32, b: i32, t: f64) -> i32 {
    let offset = round_half_down(t * (f64::from(b) - f64::from(a)));
    // Lies between `a` and `b` for t in [0, 1]; saturates otherwise.
    (i64::from(a) + offset).clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}

/// Samples `curve` placed at `origin` and mapped through `chain`.
pub fn sample(curve: &Curve, origin: Point, chain: TransformChain) -> CurveSamples {
    CurveSamples {
        curve: *curve,
        origin,
        chain,
        state: State::Start,
    }
}

#[derive(Clone, Copy, Debug)]
enum State {
    Start,
    Stepping { t: f64 },
    Done,
}

/// Lazy, finite sequence of device-space sample points for one curve.
///
/// Yields the transformed start point, then one point per `SAMPLE_STEP` while `t < 1`. A point
/// that cannot be placed or transformed within `i32` is yielded as an error and ends the
/// sequence.
#[derive(Clone, Debug)]
pub struct CurveSamples {
    curve: Curve,
    origin: Point,
    chain: TransformChain,
    state: State,
}

impl CurveSamples {
    fn project(&self, local: Point) -> GlyphResult<Point> {
        let placed = local.checked_add(self.origin).ok_or_else(|| {
            GlyphError::precondition(format!(
                "glyph point {local:?} overflows at origin {:?}",
                self.origin
            ))
        })?;
        self.chain.apply(placed)
    }

    fn emit(&mut self, local: Point) -> GlyphResult<Point> {
        let projected = self.project(local);
        if projected.is_err() {
            self.state = State::Done;
        }
        projected
    }
}

impl Iterator for CurveSamples {
    type Item = GlyphResult<Point>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.state {
            State::Start => {
                self.state = State::Stepping { t: 0.0 };
                Some(self.emit(self.curve.start()))
            }
            State::Stepping { t } if t < 1.0 => {
                let local = rounded_casteljau(&self.curve, t);
                // Accumulated rather than `i * step`; twenty additions overshoot 1.0 slightly.
                self.state = State::Stepping { t: t + SAMPLE_STEP };
                Some(self.emit(local))
            }
            State::Stepping { .. } | State::Done => {
                self.state = State::Done;
                None
            }
        }
    }
}

impl FusedIterator for CurveSamples {}

#[cfg(test)]
#[path = "../../tests/unit/sampler/curve.rs"]
mod tests;
