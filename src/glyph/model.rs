use crate::foundation::core::Point;
use crate::foundation::math::Fnv1a64;

/// One cubic segment: four ordered control points.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Curve(pub [Point; 4]);

impl Curve {
    pub const fn new(p0: Point, p1: Point, p2: Point, p3: Point) -> Self {
        Self([p0, p1, p2, p3])
    }

    pub fn points(&self) -> &[Point; 4] {
        &self.0
    }

    pub fn start(&self) -> Point {
        self.0[0]
    }
}

/// One renderable digit shape made of exactly two curves.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Glyph(pub [Curve; 2]);

impl Glyph {
    pub const fn new(a: Curve, b: Curve) -> Self {
        Self([a, b])
    }

    pub fn curves(&self) -> &[Curve; 2] {
        &self.0
    }

    pub fn points(&self) -> impl Iterator<Item = Point> + '_ {
        self.0.iter().flat_map(|c| c.0.iter().copied())
    }

    /// Shifts the glyph so its maximum x and maximum y both land on 0.
    pub const fn normalized(self) -> Self {
        let mut max_x = i32::MIN;
        let mut max_y = i32::MIN;
        let mut c = 0;
        while c < 2 {
            let mut p = 0;
            while p < 4 {
                let pt = self.0[c].0[p];
                if pt.x > max_x {
                    max_x = pt.x;
                }
                if pt.y > max_y {
                    max_y = pt.y;
                }
                p += 1;
            }
            c += 1;
        }

        let mut out = self;
        let mut c = 0;
        while c < 2 {
            let mut p = 0;
            while p < 4 {
                let pt = out.0[c].0[p];
                out.0[c].0[p] = Point::new(pt.x - max_x, pt.y - max_y);
                p += 1;
            }
            c += 1;
        }
        out
    }
}

/// Three glyphs shown side by side, most significant digit first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Frame(pub [Glyph; 3]);

impl Frame {
    pub fn glyphs(&self) -> &[Glyph; 3] {
        &self.0
    }
}

/// Immutable cyclic sequence of frames.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct FrameTrack {
    frames: Vec<Frame>,
}

impl FrameTrack {
    pub(crate) fn from_frames(frames: Vec<Frame>) -> Self {
        Self { frames }
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    /// Frame at `idx`, wrapping past the end.
    pub fn frame(&self, idx: usize) -> Option<&Frame> {
        if self.frames.is_empty() {
            return None;
        }
        self.frames.get(idx % self.frames.len())
    }

    /// Stable content hash over every control point, in track order.
    pub fn fingerprint(&self) -> u64 {
        let mut h = Fnv1a64::new_default();
        for frame in &self.frames {
            for glyph in frame.glyphs() {
                for p in glyph.points() {
                    h.write_i32(p.x);
                    h.write_i32(p.y);
                }
            }
        }
        h.finish()
    }
}
