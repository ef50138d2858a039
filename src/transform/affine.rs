use crate::foundation::core::Point;
use crate::foundation::error::{GlyphError, GlyphResult};

/// 2D affine map over integer points.
///
/// Maps `(x, y)` to `(a11·x + a21·y + a31, a12·x + a22·y + a32)`; each output coordinate is
/// truncated toward zero.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct AffineTransform {
    pub a11: f64,
    pub a12: f64,
    pub a21: f64,
    pub a22: f64,
    pub a31: f64,
    pub a32: f64,
}

impl Default for AffineTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl AffineTransform {
    pub const IDENTITY: Self = Self {
        a11: 1.0,
        a12: 0.0,
        a21: 0.0,
        a22: 1.0,
        a31: 0.0,
        a32: 0.0,
    };

    /// Pure translation by `offset`.
    pub fn translate(offset: Point) -> Self {
        Self {
            a31: f64::from(offset.x),
            a32: f64::from(offset.y),
            ..Self::IDENTITY
        }
    }

    /// Pure rotation by `angle_rad` about the origin.
    pub fn rotate(angle_rad: f64) -> Self {
        let (sin, cos) = angle_rad.sin_cos();
        Self {
            a11: cos,
            a12: sin,
            a21: -sin,
            a22: cos,
            ..Self::IDENTITY
        }
    }

    /// Uniform scale anchored at the coordinate origin.
    ///
    /// `_center` is accepted for call-site symmetry but never shifts the anchor.
    pub fn scale(s: f64, _center: Point) -> Self {
        Self {
            a11: s,
            a22: s,
            ..Self::IDENTITY
        }
    }

    fn map(&self, p: Point) -> (f64, f64) {
        let x = f64::from(p.x);
        let y = f64::from(p.y);
        (
            self.a11 * x + self.a21 * y + self.a31,
            self.a12 * x + self.a22 * y + self.a32,
        )
    }

    /// Maps `p` and truncates. Results outside `i32` saturate; see [`Self::try_apply`].
    pub fn apply(&self, p: Point) -> Point {
        let (x, y) = self.map(p);
        Point::new(x as i32, y as i32)
    }

    /// Like [`Self::apply`], but a non-finite or out-of-range coordinate is an error.
    pub fn try_apply(&self, p: Point) -> GlyphResult<Point> {
        let (x, y) = self.map(p);
        Ok(Point::new(to_coord(x)?, to_coord(y)?))
    }

    /// Applies `chain` left to right, truncating to integers after every step.
    pub fn apply_chain(p: Point, chain: &[AffineTransform]) -> Point {
        chain.iter().fold(p, |acc, tr| tr.apply(acc))
    }

    pub fn is_finite(&self) -> bool {
        [self.a11, self.a12, self.a21, self.a22, self.a31, self.a32]
            .iter()
            .all(|c| c.is_finite())
    }
}

fn to_coord(v: f64) -> GlyphResult<i32> {
    let t = v.trunc();
    if t.is_finite() && t >= f64::from(i32::MIN) && t <= f64::from(i32::MAX) {
        Ok(t as i32)
    } else {
        Err(GlyphError::precondition(format!(
            "transformed coordinate {v} does not fit in i32"
        )))
    }
}

/// The three transforms a display applies to every rendered point.
///
/// Application order is fixed: scale, then rotate, then translate.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize)]
pub struct TransformChain {
    pub scale: AffineTransform,
    pub rotate: AffineTransform,
    pub translate: AffineTransform,
}

impl TransformChain {
    pub fn as_array(&self) -> [AffineTransform; 3] {
        [self.scale, self.rotate, self.translate]
    }

    /// Applies scale, rotate and translate in turn, failing on the first coordinate that
    /// leaves the `i32` range.
    pub fn apply(&self, p: Point) -> GlyphResult<Point> {
        self.as_array()
            .iter()
            .try_fold(p, |acc, tr| tr.try_apply(acc))
    }

    pub fn is_finite(&self) -> bool {
        self.scale.is_finite() && self.rotate.is_finite() && self.translate.is_finite()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/transform/affine.rs"]
mod tests;
