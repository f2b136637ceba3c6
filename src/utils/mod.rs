//! Shared utilities for outer-iteration drivers.

pub mod convergence;

pub use convergence::{Convergence, SolveStats};
