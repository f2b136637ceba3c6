//! Core numerical traits and their implementations for common vector types.

pub mod traits;
pub mod wrappers;

pub use traits::*;
pub use wrappers::*;
