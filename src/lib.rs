//! nka: nonlinear Krylov acceleration for fixed-point and inexact Newton iterations
//!
//! This crate implements the nonlinear Krylov accelerator of Carlson & Miller:
//! a black-box component that sits inside an outer fixed-point (or inexact
//! Newton) loop, listens to the sequence of raw corrections, and replaces each
//! one with an accelerated correction built from a bounded window of secant
//! history. Inner products may be collective reductions over distributed
//! vectors, with shared-memory (rayon) and distributed-memory (MPI) backends.

pub mod parallel;

pub mod accel;
pub mod config;
pub mod core;
pub mod error;
pub mod solver;
pub mod utils;

// Re-exports for convenience
pub use accel::*;
pub use config::*;
pub use core::*;
pub use error::*;
pub use solver::*;
pub use utils::*;

// Re-export SolveStats at the crate root for convenience
pub use utils::convergence::SolveStats;
