//! Tests for the accelerated fixed-point driver against direct solves.
//!
//! The fixed point of G(x) = A·x + b satisfies (I − A) x = b, so the driver's
//! answer can be checked elementwise against a direct LU solve of that system,
//! mirroring the iterative-vs-direct comparisons used for Krylov solvers.

use approx::assert_abs_diff_eq;
use faer::Mat;
use faer::linalg::solvers::SolveCore;
use nka::config::NkaOptions;
use nka::core::traits::FixedPointMap;
use nka::solver::{AffineMap, FixedPointSolver};
use rand::Rng;

/// Random contraction A (scaled to be safely convergent) and random shift b.
fn random_contraction(n: usize) -> (Mat<f64>, Vec<f64>) {
    let mut rng = rand::thread_rng();
    let data: Vec<f64> = (0..n * n).map(|_| rng.r#gen::<f64>() - 0.5).collect();
    // Row sums bounded by 0.8 keep the spectral radius below one.
    let scale = 0.8 / n as f64;
    let a = Mat::from_fn(n, n, |i, j| scale * data[j * n + i]);
    let b: Vec<f64> = (0..n).map(|_| rng.r#gen::<f64>()).collect();
    (a, b)
}

#[test]
fn accelerated_driver_matches_direct_solve() {
    let n = 10;
    let (a, b) = random_contraction(n);

    // Direct solve of (I - A) x = b.
    let eye_minus_a = Mat::from_fn(n, n, |i, j| {
        let aij = a[(i, j)];
        if i == j { 1.0 - aij } else { -aij }
    });
    let mut x_direct = b.clone();
    let lu = faer::linalg::solvers::FullPivLu::new(eye_minus_a.as_ref());
    let x_mat = faer::MatMut::from_column_major_slice_mut(&mut x_direct, n, 1);
    lu.solve_in_place_with_conj(faer::Conj::No, x_mat);

    let map = AffineMap { a, b };
    let mut x = vec![0.0; n];
    let mut solver = FixedPointSolver::new(1e-12, 200).with_acceleration(NkaOptions {
        mvec: 12,
        vtol: 1e-12,
    });
    let stats = solver.solve(&map, &mut x).unwrap();
    assert!(stats.converged, "driver did not converge: {stats:?}");
    for i in 0..n {
        assert_abs_diff_eq!(x[i], x_direct[i], epsilon = 1e-8);
    }
}

#[test]
fn plain_and_accelerated_drivers_agree() {
    let n = 6;
    let (a, b) = random_contraction(n);
    let map = AffineMap { a, b };

    let mut x_plain = vec![0.0; n];
    let mut plain = FixedPointSolver::new(1e-11, 1000).with_acceleration(NkaOptions {
        mvec: 0,
        vtol: 0.01,
    });
    let stats_plain = plain.solve(&map, &mut x_plain).unwrap();
    assert!(stats_plain.converged);

    let mut x_accel = vec![0.0; n];
    let mut accelerated = FixedPointSolver::new(1e-11, 1000);
    let stats_accel = accelerated.solve(&map, &mut x_accel).unwrap();
    assert!(stats_accel.converged);
    assert!(stats_accel.iterations <= stats_plain.iterations);

    for i in 0..n {
        assert_abs_diff_eq!(x_accel[i], x_plain[i], epsilon = 1e-7);
    }
}

/// Newton's iteration for x² = 2 as a fixed-point map: G(x) = x + (2 − x²)/(2x).
struct NewtonSqrt2;

impl FixedPointMap<Vec<f64>> for NewtonSqrt2 {
    fn apply(&self, x: &Vec<f64>, g: &mut Vec<f64>) {
        g[0] = x[0] + (2.0 - x[0] * x[0]) / (2.0 * x[0]);
    }
}

#[test]
fn accelerated_newton_finds_sqrt2() {
    let mut x = vec![2.0];
    let mut solver = FixedPointSolver::new(1e-14, 50).with_acceleration(NkaOptions {
        mvec: 5,
        vtol: 1e-10,
    });
    let stats = solver.solve(&NewtonSqrt2, &mut x).unwrap();
    assert!(stats.converged);
    assert_abs_diff_eq!(x[0], 2.0_f64.sqrt(), epsilon = 1e-10);
}
