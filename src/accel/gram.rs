//! Gram triangle of secant inner products and its incremental factorization.
//!
//! Storage convention, with slot ids ordered by subspace age: the raw inner
//! product `⟨w_i, w_j⟩` of a newer slot `i` against an older slot `j` lives at
//! `h[i][j]`; the Cholesky-style factor of the active Gram matrix, taken in
//! newest-to-oldest order, lives in the transposed positions `h[j][i]` and on
//! the diagonal. The stored secant vectors are unit norm, so the raw diagonal
//! is implicitly one. Entries belonging to slots no longer in the subspace are
//! stale and are never read: every row is rewritten when its slot re-enters
//! the subspace, and the factor is recomputed whenever the subspace changes.

use num_traits::Float;

/// Dense scratch for the active Gram matrix and its triangular factor.
pub struct GramTriangle<T> {
    h: Vec<Vec<T>>,
}

impl<T: Float> GramTriangle<T> {
    pub fn new(capacity: usize) -> Self {
        GramTriangle {
            h: vec![vec![T::zero(); capacity]; capacity],
        }
    }

    /// Record the raw inner product of a newer slot against an older one.
    pub fn set_product(&mut self, newer: usize, older: usize, value: T) {
        self.h[newer][older] = value;
    }

    /// Factor the active Gram matrix, dropping near-dependent history.
    ///
    /// `order` lists the active slots newest first. Elimination proceeds from
    /// the newest slot toward the oldest; a slot whose squared orthogonal
    /// remainder against the retained newer slots falls to `vtol²` or below is
    /// numerically a linear combination of newer history and is rejected, as
    /// is everything beyond `max_keep` retained slots. On return `order` holds
    /// the retained slots and the rejected ids are handed back for the caller
    /// to unlink. The pass is bounded by the subspace size, so it always
    /// terminates, and the newest slot is always retained.
    pub fn factorize(&mut self, order: &mut Vec<usize>, vtol: T, max_keep: usize) -> Vec<usize> {
        let mut dropped = Vec::new();
        if order.is_empty() {
            return dropped;
        }
        let mut kept: Vec<usize> = Vec::with_capacity(order.len());
        let newest = order[0];
        self.h[newest][newest] = T::one();
        kept.push(newest);
        let tol2 = vtol * vtol;
        for &k in order[1..].iter() {
            if kept.len() >= max_keep {
                dropped.push(k);
                continue;
            }
            // Single stage of the factorization: eliminate row k against the
            // already-factored newer rows.
            let mut hkk = T::one();
            for (jn, &j) in kept.iter().enumerate() {
                let mut hkj = self.h[j][k];
                for &i in &kept[..jn] {
                    hkj = hkj - self.h[j][i] * self.h[k][i];
                }
                hkj = hkj / self.h[j][j];
                self.h[k][j] = hkj;
                hkk = hkk - hkj * hkj;
            }
            if hkk > tol2 {
                self.h[k][k] = hkk.sqrt();
                kept.push(k);
            } else {
                dropped.push(k);
            }
        }
        *order = kept;
        dropped
    }

    /// Solve `(WᵀW) c = cf` in place using the current factorization.
    ///
    /// `order` lists the retained slots newest first; `cf` is indexed by slot
    /// id and holds `⟨w_k, f⟩` on entry and the combination coefficients on
    /// exit.
    pub fn solve(&self, order: &[usize], cf: &mut [T]) {
        // Forward substitution, newest to oldest.
        for (jn, &j) in order.iter().enumerate() {
            let mut cj = cf[j];
            for &i in &order[..jn] {
                cj = cj - self.h[j][i] * cf[i];
            }
            cf[j] = cj / self.h[j][j];
        }
        // Backward substitution, oldest to newest.
        for (jn, &j) in order.iter().enumerate().rev() {
            let mut cj = cf[j];
            for &i in &order[jn + 1..] {
                cj = cj - self.h[i][j] * cf[i];
            }
            cf[j] = cj / self.h[j][j];
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn factor_and_solve_two_vectors() {
        // Unit vectors with ⟨w0, w1⟩ = 0.6; slot 0 newest.
        let mut gram = GramTriangle::<f64>::new(3);
        gram.set_product(0, 1, 0.6);
        let mut order = vec![0, 1];
        let dropped = gram.factorize(&mut order, 1e-10, 2);
        assert!(dropped.is_empty());
        assert_eq!(order, vec![0, 1]);

        // Solve [[1, 0.6], [0.6, 1]] c = [1.0, 0.2].
        let mut cf = vec![1.0, 0.2, 0.0];
        gram.solve(&order, &mut cf);
        assert_abs_diff_eq!(cf[0] + 0.6 * cf[1], 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(0.6 * cf[0] + cf[1], 0.2, epsilon = 1e-12);
    }

    #[test]
    fn factor_and_solve_three_vectors() {
        // Gram matrix in newest-first order (slots 2, 0, 1):
        // [[1, 0.3, 0.1], [0.3, 1, 0.5], [0.1, 0.5, 1]]
        let mut gram = GramTriangle::<f64>::new(4);
        gram.set_product(2, 0, 0.3);
        gram.set_product(2, 1, 0.1);
        gram.set_product(0, 1, 0.5);
        let mut order = vec![2, 0, 1];
        let dropped = gram.factorize(&mut order, 1e-10, 3);
        assert!(dropped.is_empty());

        let rhs = [0.7, -0.4, 1.1]; // in order (2, 0, 1)
        let mut cf = vec![0.0; 4];
        cf[2] = rhs[0];
        cf[0] = rhs[1];
        cf[1] = rhs[2];
        gram.solve(&order, &mut cf);
        // Verify Gram · c = rhs.
        assert_abs_diff_eq!(cf[2] + 0.3 * cf[0] + 0.1 * cf[1], rhs[0], epsilon = 1e-12);
        assert_abs_diff_eq!(0.3 * cf[2] + cf[0] + 0.5 * cf[1], rhs[1], epsilon = 1e-12);
        assert_abs_diff_eq!(0.1 * cf[2] + 0.5 * cf[0] + cf[1], rhs[2], epsilon = 1e-12);
    }

    #[test]
    fn near_dependent_older_vector_is_dropped() {
        let mut gram = GramTriangle::<f64>::new(3);
        // ⟨w0, w1⟩ ≈ 1: slot 1 is numerically parallel to the newer slot 0.
        gram.set_product(0, 1, 1.0 - 1e-14);
        let mut order = vec![0, 1];
        let dropped = gram.factorize(&mut order, 1e-4, 2);
        assert_eq!(dropped, vec![1]);
        assert_eq!(order, vec![0]);
    }

    #[test]
    fn capacity_trim_drops_oldest_tail() {
        let mut gram = GramTriangle::<f64>::new(4);
        gram.set_product(0, 1, 0.2);
        gram.set_product(0, 2, 0.1);
        gram.set_product(1, 2, 0.3);
        let mut order = vec![0, 1, 2];
        let dropped = gram.factorize(&mut order, 1e-10, 2);
        assert_eq!(dropped, vec![2]);
        assert_eq!(order, vec![0, 1]);
    }
}
