//! Affine maps over integer points and the fixed scale → rotate → translate chain.

pub mod affine;

pub use affine::{AffineTransform, TransformChain};
