//! API options for the nonlinear Krylov accelerator.
//!
//! This module provides the `NkaOptions` struct, which carries the two
//! parameters of the acceleration subspace: the maximum number of retained
//! history vectors and the drop tolerance below which a new secant direction
//! is treated as a linear combination of existing history.

/// Accelerator capacity & tolerance parameters.
#[derive(Debug, Clone, Copy)]
pub struct NkaOptions {
    /// Maximum number of retained subspace vectors. Zero disables
    /// acceleration entirely (identity pass-through).
    pub mvec: usize,

    /// Vector drop tolerance for near-dependent secant directions.
    pub vtol: f64,
}

impl Default for NkaOptions {
    fn default() -> Self {
        NkaOptions {
            mvec: 10,
            vtol: 0.01,
        }
    }
}
