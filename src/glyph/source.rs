//! Built-in digit shapes and the plain-text glyph loader.
//!
//! Text format, repeated once per glyph (`0` first, then `1`):
//!
//! ```text
//! <curve count>
//! x0 y0 x1 y1 x2 y2 x3 y3     # one line per curve
//! ```
//!
//! Every coordinate has a fixed origin subtracted on load.

use std::path::Path;

use anyhow::Context as _;

use crate::foundation::core::Point;
use crate::foundation::error::{GlyphError, GlyphResult};
use crate::glyph::model::{Curve, Glyph};

const fn pt(x: i32, y: i32) -> Point {
    Point::new(x, y)
}

/// Digit `0`: two mirrored halves of an oval.
pub const GLYPH_0: Glyph = Glyph::new(
    Curve::new(pt(40, 0), pt(-12, 0), pt(-12, 120), pt(40, 120)),
    Curve::new(pt(40, 0), pt(92, 0), pt(92, 120), pt(40, 120)),
)
.normalized();

/// Digit `1`: a short flag and a vertical stem.
pub const GLYPH_1: Glyph = Glyph::new(
    Curve::new(pt(14, 36), pt(26, 28), pt(40, 14), pt(52, 0)),
    Curve::new(pt(52, 0), pt(52, 40), pt(52, 80), pt(52, 120)),
)
.normalized();

/// Largest magnitude a loaded coordinate may have, before or after origin subtraction.
pub const MAX_GLYPH_COORD: i32 = 1_000_000;

/// Origin subtracted from coordinates in legacy point files.
pub const LEGACY_ORIGIN: Point = Point::new(180, 120);

/// The two base shapes the frame builder morphs between.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct GlyphPair {
    pub zero: Glyph,
    pub one: Glyph,
}

impl Default for GlyphPair {
    fn default() -> Self {
        Self::builtin()
    }
}

impl GlyphPair {
    pub const fn builtin() -> Self {
        Self {
            zero: GLYPH_0,
            one: GLYPH_1,
        }
    }

    pub fn get(&self, bit: u8) -> &Glyph {
        if bit == 0 { &self.zero } else { &self.one }
    }

    /// Parses the text format, subtracting `origin` from every coordinate.
    pub fn parse(text: &str, origin: Point) -> GlyphResult<Self> {
        let mut tokens = Tokens::new(text);
        let zero = parse_glyph(&mut tokens, origin, 0)?;
        let one = parse_glyph(&mut tokens, origin, 1)?;
        if let Some((line, tok)) = tokens.next_raw() {
            tracing::debug!(line, token = tok, "ignoring trailing glyph data");
        }
        Ok(Self { zero, one })
    }

    #[tracing::instrument(skip_all, fields(path = %path.display()))]
    pub fn load(path: &Path, origin: Point) -> GlyphResult<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read glyph file '{}'", path.display()))?;
        let pair = Self::parse(&text, origin)?;
        tracing::info!("loaded glyph pair");
        Ok(pair)
    }
}

fn parse_glyph(tokens: &mut Tokens<'_>, origin: Point, which: u8) -> GlyphResult<Glyph> {
    let count = tokens.next_int(|| format!("curve count of glyph {which}"))?;
    if count != 2 {
        return Err(GlyphError::validation(format!(
            "glyph {which} must have exactly 2 curves, found {count}"
        )));
    }

    let mut curves = [Curve::new(Point::ORIGIN, Point::ORIGIN, Point::ORIGIN, Point::ORIGIN); 2];
    for (ci, curve) in curves.iter_mut().enumerate() {
        for (pi, slot) in curve.0.iter_mut().enumerate() {
            let what = || format!("glyph {which} curve {ci} point {pi}");
            let x = tokens.next_int(what)?;
            let y = tokens.next_int(what)?;
            *slot = Point::new(x, y)
                .checked_sub(origin)
                .filter(|p| in_bounds(*p) && in_bounds(Point::new(x, y)))
                .ok_or_else(|| {
                    GlyphError::validation(format!(
                        "{}: ({x}, {y}) is outside ±{MAX_GLYPH_COORD} relative to origin {origin:?}",
                        what()
                    ))
                })?;
        }
    }
    Ok(Glyph(curves))
}

fn in_bounds(p: Point) -> bool {
    p.x.unsigned_abs() <= MAX_GLYPH_COORD.unsigned_abs()
        && p.y.unsigned_abs() <= MAX_GLYPH_COORD.unsigned_abs()
}

struct Tokens<'a> {
    inner: Box<dyn Iterator<Item = (usize, &'a str)> + 'a>,
}

impl<'a> Tokens<'a> {
    fn new(text: &'a str) -> Self {
        let inner = text.lines().enumerate().flat_map(|(i, line)| {
            let line = line.split('#').next().unwrap_or("");
            line.split_whitespace().map(move |tok| (i + 1, tok))
        });
        Self {
            inner: Box::new(inner),
        }
    }

    fn next_raw(&mut self) -> Option<(usize, &'a str)> {
        self.inner.next()
    }

    fn next_int(&mut self, what: impl Fn() -> String) -> GlyphResult<i32> {
        let (line, tok) = self
            .next_raw()
            .ok_or_else(|| GlyphError::validation(format!("unexpected end of data: {}", what())))?;
        tok.parse::<i32>().map_err(|_| {
            GlyphError::validation(format!(
                "line {line}: expected integer for {}, found '{tok}'",
                what()
            ))
        })
    }
}
