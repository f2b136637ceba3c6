//! API options for the accelerator.

pub mod options;

pub use options::NkaOptions;
