use faer::Mat;
use nka::config::NkaOptions;
use nka::solver::{AffineMap, FixedPointSolver};
use rand::Rng;

fn main() {
    let n = 50;
    // build a random slow contraction: G(x) = A x + b with spectral radius ~0.95
    let mut rng = rand::thread_rng();
    let data: Vec<f64> = (0..n * n).map(|_| rng.r#gen::<f64>() - 0.5).collect();
    let scale = 0.9 / n as f64;
    let a = Mat::from_fn(n, n, |i, j| {
        if i == j { 0.9 } else { scale * data[j * n + i] }
    });
    let b: Vec<f64> = (0..n).map(|_| rng.r#gen()).collect();
    let map = AffineMap { a, b };

    // plain Picard iteration
    let mut x = vec![0.0; n];
    let mut plain = FixedPointSolver::new(1e-10, 2000).with_acceleration(NkaOptions {
        mvec: 0,
        vtol: 0.01,
    });
    let stats = plain.solve(&map, &mut x).unwrap();
    println!(
        "plain Picard:  {} iterations, residual = {:.3e}, converged = {}",
        stats.iterations, stats.final_residual, stats.converged
    );

    // same problem with nonlinear Krylov acceleration
    let mut x = vec![0.0; n];
    let mut accelerated = FixedPointSolver::new(1e-10, 2000).with_acceleration(NkaOptions {
        mvec: 20,
        vtol: 1e-10,
    });
    let stats = accelerated.solve(&map, &mut x).unwrap();
    println!(
        "accelerated:   {} iterations, residual = {:.3e}, converged = {}",
        stats.iterations, stats.final_residual, stats.converged
    );
}
