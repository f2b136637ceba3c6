//! Accelerated fixed-point (Picard) iteration driver.
//!
//! Runs `x ← x + f_accel` where `f_accel` is the accelerated form of the raw
//! correction `f = G(x) − x`, until the correction norm meets the relative
//! tolerance. With `mvec = 0` in the options this degenerates to a plain
//! Picard iteration, which makes for an easy side-by-side comparison.

use crate::accel::Nka;
use crate::config::NkaOptions;
use crate::core::traits::{FixedPointMap, InnerProduct};
use crate::error::NkaError;
use crate::utils::convergence::{Convergence, SolveStats};
use num_traits::Float;

/// Affine fixed-point map G(x) = A·x + b over a dense faer matrix.
pub struct AffineMap<T> {
    pub a: faer::Mat<T>,
    pub b: Vec<T>,
}

impl<T: Float> FixedPointMap<Vec<T>> for AffineMap<T> {
    fn apply(&self, x: &Vec<T>, g: &mut Vec<T>) {
        <faer::Mat<T> as FixedPointMap<Vec<T>>>::apply(&self.a, x, g);
        for (gi, bi) in g.iter_mut().zip(&self.b) {
            *gi = *gi + *bi;
        }
    }
}

/// Fixed-point solver with optional nonlinear Krylov acceleration.
pub struct FixedPointSolver<T> {
    /// Convergence criteria (relative tolerance and max iterations).
    pub conv: Convergence<T>,
    /// Accelerator parameters; `mvec = 0` disables acceleration.
    pub accel: NkaOptions,
}

impl<T> FixedPointSolver<T>
where
    T: Float + From<f64> + Send + Sync,
{
    /// Create a new driver with relative tolerance and iteration limit.
    pub fn new(tol: T, max_iters: usize) -> Self {
        FixedPointSolver {
            conv: Convergence { tol, max_iters },
            accel: NkaOptions::default(),
        }
    }

    /// Override the accelerator parameters.
    pub fn with_acceleration(mut self, accel: NkaOptions) -> Self {
        self.accel = accel;
        self
    }

    /// Iterate `x ← x + accel(G(x) − x)` to a fixed point of `map`.
    ///
    /// # Arguments
    /// * `map` - Fixed-point map implementing `FixedPointMap`
    /// * `x` - On input: initial guess; on output: the (approximate) fixed point
    ///
    /// # Returns
    /// * `Ok(SolveStats)` if the iteration ran to convergence or the limit
    /// * `Err(NkaError::NonFiniteResidual)` if the iteration left finite range
    pub fn solve<M>(&mut self, map: &M, x: &mut Vec<T>) -> Result<SolveStats<T>, NkaError>
    where
        M: FixedPointMap<Vec<T>>,
    {
        let ip = ();
        let vtol: T = <T as From<f64>>::from(self.accel.vtol);
        let mut accel: Nka<T, Vec<T>> = Nka::new(self.accel.mvec, vtol, x);

        let mut g = vec![T::zero(); x.len()];
        let mut f = vec![T::zero(); x.len()];
        let mut df = vec![T::zero(); x.len()];

        map.apply(x, &mut g);
        for ((fi, gi), xi) in f.iter_mut().zip(&g).zip(x.iter()) {
            *fi = *gi - *xi;
        }
        let res0 = ip.norm(&f);
        let mut stats = SolveStats {
            iterations: 0,
            final_residual: res0,
            converged: res0 == T::zero(),
        };
        if stats.converged {
            return Ok(stats);
        }

        for k in 1..=self.conv.max_iters {
            accel.correction(&f, &mut df);
            for (xi, di) in x.iter_mut().zip(&df) {
                *xi = *xi + *di;
            }
            map.apply(x, &mut g);
            for ((fi, gi), xi) in f.iter_mut().zip(&g).zip(x.iter()) {
                *fi = *gi - *xi;
            }
            let res = ip.norm(&f);
            if !res.is_finite() {
                return Err(NkaError::NonFiniteResidual(k));
            }
            let (stop, s) = self.conv.check(res, res0, k);
            stats = s;
            if stop {
                break;
            }
        }
        Ok(stats)
    }
}
