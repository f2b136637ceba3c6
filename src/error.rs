use thiserror::Error;

// Unified error type for nka

#[derive(Error, Debug)]
pub enum NkaError {
    #[error("non-finite residual at iteration {0}")]
    NonFiniteResidual(usize),
    #[error("invalid configuration: {0}")]
    InvalidConfig(&'static str),
}
