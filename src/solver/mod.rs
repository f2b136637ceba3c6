//! Outer-iteration drivers that consume accelerated corrections.

pub mod fixed_point;

pub use fixed_point::{AffineMap, FixedPointSolver};
