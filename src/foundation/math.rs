/// FNV-1a, used to fingerprint precomputed frame tracks.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Fnv1a64(u64);

impl Fnv1a64 {
    pub(crate) const OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
    const PRIME: u64 = 0x0000_0100_0000_01B3;

    pub(crate) fn new_default() -> Self {
        Self(Self::OFFSET_BASIS)
    }

    pub(crate) fn write_i32(&mut self, v: i32) {
        self.write_bytes(&v.to_le_bytes());
    }

    pub(crate) fn write_bytes(&mut self, bytes: &[u8]) {
        let mut h = self.0;
        for &b in bytes {
            h ^= u64::from(b);
            h = h.wrapping_mul(Self::PRIME);
        }
        self.0 = h;
    }

    pub(crate) fn finish(self) -> u64 {
        self.0
    }
}

/// Round to the nearest integer via `ceil(v - 0.5)`.
///
/// Exact halves go toward negative infinity (`2.5 -> 2`, `-2.5 -> -3`).
pub(crate) fn round_half_down(v: f64) -> i64 {
    (v - 0.5).ceil() as i64
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
