//! Trait implementations for faer dense matrices and plain vectors.
//!
//! This module wires `faer::Mat` and `Vec<T>` into the generic accelerator and
//! driver interfaces: a dense matrix acts as the linear fixed-point map
//! `G(x) = A·x`, and `()` provides inner products and norms over `Vec<T>`,
//! parallelized with Rayon when the `rayon` feature is enabled. For MPI builds,
//! `DistributedInnerProduct` wraps a communicator and performs the same
//! reductions collectively across all cooperating processes.

use crate::core::traits::{FixedPointMap, Indexing, InnerProduct};
use faer::Mat;
use num_traits::Float;

/// Linear fixed-point map G(x) = A·x for a dense faer matrix.
impl<T: Float> FixedPointMap<Vec<T>> for Mat<T> {
    fn apply(&self, x: &Vec<T>, g: &mut Vec<T>) {
        assert_eq!(self.ncols(), x.len(), "Input vector x has incorrect length");
        assert_eq!(self.nrows(), g.len(), "Output vector g has incorrect length");
        for i in 0..self.nrows() {
            g[i] = T::zero();
            for j in 0..self.ncols() {
                g[i] = g[i] + self[(i, j)] * x[j];
            }
        }
    }
}

/// Implements inner product and norm for vectors, with optional Rayon parallelism.
impl<T: Float + From<f64> + Send + Sync> InnerProduct<Vec<T>> for () {
    type Scalar = T;
    /// Computes the dot product of two vectors: `x^T y`.
    fn dot(&self, x: &Vec<T>, y: &Vec<T>) -> T {
        assert_eq!(x.len(), y.len(), "Vectors must have the same length");
        #[cfg(feature = "rayon")]
        {
            use rayon::prelude::*;
            x.as_slice()
                .par_iter()
                .zip(y.as_slice().par_iter())
                .map(|(xi, yi)| *xi * *yi)
                .reduce(|| T::zero(), |acc, v| acc + v)
        }
        #[cfg(not(feature = "rayon"))]
        {
            x.iter()
                .zip(y.iter())
                .map(|(xi, yi)| *xi * *yi)
                .fold(T::zero(), |acc, v| acc + v)
        }
    }
    /// Computes the Euclidean norm of a vector: `||x||_2`.
    fn norm(&self, x: &Vec<T>) -> T {
        #[cfg(feature = "rayon")]
        {
            use rayon::prelude::*;
            x.as_slice()
                .par_iter()
                .map(|xi| *xi * *xi)
                .reduce(|| T::zero(), |acc, v| acc + v)
                .sqrt()
        }
        #[cfg(not(feature = "rayon"))]
        {
            x.iter()
                .map(|xi| *xi * *xi)
                .fold(T::zero(), |acc, v| acc + v)
                .sqrt()
        }
    }
}

/// Collective inner product and norm over distributed vectors.
///
/// Each process holds its local slice; `dot` and `norm` reduce the local
/// contributions across the communicator. Every process must issue the same
/// sequence of calls or the collective reductions will mismatch.
#[cfg(feature = "mpi")]
pub struct DistributedInnerProduct<'a, C: crate::parallel::Comm> {
    /// Reference to the communicator implementing the `Comm` trait.
    pub comm: &'a C,
}

#[cfg(feature = "mpi")]
impl<'a, C: crate::parallel::Comm> InnerProduct<Vec<f64>> for DistributedInnerProduct<'a, C> {
    type Scalar = f64;
    fn dot(&self, x: &Vec<f64>, y: &Vec<f64>) -> f64 {
        assert_eq!(x.len(), y.len(), "Vectors must have the same length");
        let local: f64 = x.iter().zip(y.iter()).map(|(&a, &b)| a * b).sum();
        self.comm.all_reduce(local)
    }
    fn norm(&self, x: &Vec<f64>) -> f64 {
        let local: f64 = x.iter().map(|&a| a * a).sum();
        self.comm.all_reduce(local).sqrt()
    }
}

/// Implements the `Indexing` trait for `Vec<T>`, treating a vector as a column vector.
impl<T> Indexing for Vec<T> {
    fn nrows(&self) -> usize {
        self.len()
    }
}

/// Implements the `Indexing` trait for `faer::Mat`, returning the number of rows.
impl<T> Indexing for Mat<T> {
    fn nrows(&self) -> usize {
        self.nrows()
    }
}
