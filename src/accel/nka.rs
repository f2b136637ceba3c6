//! Nonlinear Krylov accelerator.
//!
//! Sits inside an outer fixed-point or inexact Newton loop and replaces each
//! raw correction with an accelerated one built from a bounded window of
//! correction history, following the multi-secant scheme of Carlson & Miller
//! (SIAM J. Sci. Comput. 19, 1998, §9). Each history pair holds a past
//! accepted correction `v` and the normalized secant difference `w` of
//! consecutive raw corrections; the accelerated correction is the affine
//! combination of the current raw correction and prior accepted corrections
//! most consistent with the secant history in the least-squares sense.
//!
//! The engine owns all of its vector storage outright: the caller supplies a
//! template that is cloned once at construction, and caller vectors are never
//! retained across calls. Conditioning problems are handled internally by
//! dropping near-dependent history, never by failing the call. Inner products
//! and norms go through the configured [`InnerProduct`], which may be a
//! collective reduction over distributed vectors; every call evaluates them in
//! a deterministic order so all cooperating processes issue identical
//! collective sequences.

use crate::accel::arena::SlotArena;
use crate::accel::gram::GramTriangle;
use crate::core::traits::InnerProduct;
use num_traits::Float;

/// Accelerator over vectors `V` with scalar `T` and inner product `IP`.
pub struct Nka<T, V, IP = ()> {
    /// Maximum number of retained subspace vectors.
    mvec: usize,
    /// Vector drop tolerance for near-dependent secant directions.
    vtol: T,
    /// A pair proposed by `correction` awaits completion by the next call.
    pending: bool,
    /// Past accepted (accelerated) corrections, by slot id.
    v: Vec<V>,
    /// Normalized secant differences of consecutive raw corrections, by slot id.
    w: Vec<V>,
    arena: SlotArena,
    gram: GramTriangle<T>,
    ip: IP,
    /// Scratch: active slots, newest first.
    order: Vec<usize>,
    /// Scratch: projection coefficients, indexed by slot id.
    coef: Vec<T>,
}

impl<T, V> Nka<T, V, ()>
where
    T: Float,
    V: AsRef<[T]> + AsMut<[T]> + Clone,
    (): InnerProduct<V, Scalar = T>,
{
    /// Accelerator with the default (local) inner product.
    ///
    /// `template` is cloned to size the internal storage pool; its contents
    /// are irrelevant. `mvec = 0` yields a permanent identity pass-through.
    ///
    /// # Panics
    /// Panics if `vtol` is not positive and finite (a configuration error).
    pub fn new(mvec: usize, vtol: T, template: &V) -> Self {
        Self::with_inner_product(mvec, vtol, template, ())
    }
}

impl<T, V, IP> Nka<T, V, IP>
where
    T: Float,
    V: AsRef<[T]> + AsMut<[T]> + Clone,
    IP: InnerProduct<V, Scalar = T>,
{
    /// Accelerator with an explicit inner product, e.g. a collective one over
    /// distributed vectors.
    pub fn with_inner_product(mvec: usize, vtol: T, template: &V, ip: IP) -> Self {
        assert!(
            vtol > T::zero() && vtol.is_finite(),
            "vector drop tolerance must be positive and finite"
        );
        // One spare slot holds the pair proposed by the current call while the
        // subspace is still full.
        let slots = mvec + 1;
        Nka {
            mvec,
            vtol,
            pending: false,
            v: (0..slots).map(|_| template.clone()).collect(),
            w: (0..slots).map(|_| template.clone()).collect(),
            arena: SlotArena::new(slots),
            gram: GramTriangle::new(slots),
            ip,
            order: Vec::with_capacity(slots),
            coef: vec![T::zero(); slots],
        }
    }

    /// Number of vectors currently in the acceleration subspace.
    pub fn subspace_size(&self) -> usize {
        self.arena.len()
    }

    /// True when a proposed pair awaits completion by the next `correction`.
    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// Replace the raw correction `raw` with an accelerated one in `out`.
    ///
    /// On the first call after construction or [`restart`](Self::restart) the
    /// raw correction passes through unchanged and seeds the history. The call
    /// always produces a finite, well-defined vector for finite input; it
    /// never reports an error.
    pub fn correction(&mut self, raw: &V, out: &mut V) {
        out.as_mut().copy_from_slice(raw.as_ref());
        if self.mvec == 0 {
            return;
        }

        // Complete the pending secant pair with the newly observed correction.
        if self.pending {
            let p = self
                .arena
                .newest()
                .expect("pending pair with an empty subspace");
            for (wj, fj) in self.w[p].as_mut().iter_mut().zip(out.as_ref()) {
                *wj = *wj - *fj;
            }
            let s = self.ip.norm(&self.w[p]);
            if s == T::zero() {
                // The outer iterate did not move, so the pair carries no
                // secant information. Toss it and continue.
                self.arena.remove(p);
                self.arena.release(p);
                self.pending = false;
            } else {
                // Normalize w and apply the same scale to its paired v.
                let inv = T::one() / s;
                for wj in self.w[p].as_mut().iter_mut() {
                    *wj = *wj * inv;
                }
                for vj in self.v[p].as_mut().iter_mut() {
                    *vj = *vj * inv;
                }
                // Record the new Gram row, then refactor the subspace with
                // near-dependent history dropped.
                self.order.clear();
                self.order.extend(self.arena.iter_newest_first());
                for idx in 1..self.order.len() {
                    let k = self.order[idx];
                    let prod = self.ip.dot(&self.w[p], &self.w[k]);
                    self.gram.set_product(p, k, prod);
                }
                let dropped = self.gram.factorize(&mut self.order, self.vtol, self.mvec);
                for id in dropped {
                    self.arena.remove(id);
                    self.arena.release(id);
                }
                self.pending = false;
            }
        }

        // Slot for the pair proposed by this call; the raw correction is the
        // secant base completed on the next call.
        let new = self.arena.allocate();
        self.w[new].as_mut().copy_from_slice(out.as_ref());

        if !self.arena.is_empty() {
            // Project f onto the span of the secant history and solve the
            // small least-squares system for the combination coefficients.
            self.order.clear();
            self.order.extend(self.arena.iter_newest_first());
            for idx in 0..self.order.len() {
                let k = self.order[idx];
                self.coef[k] = self.ip.dot(&*out, &self.w[k]);
            }
            self.gram.solve(&self.order, &mut self.coef);
            // f ← f + Σ cₖ (vₖ − wₖ)
            for &k in &self.order {
                let ck = self.coef[k];
                for ((fj, vj), wj) in out
                    .as_mut()
                    .iter_mut()
                    .zip(self.v[k].as_ref())
                    .zip(self.w[k].as_ref())
                {
                    *fj = *fj + ck * (*vj - *wj);
                }
            }
        }

        // FIFO eviction keeps the subspace within capacity.
        if self.arena.len() == self.mvec {
            if let Some(oldest) = self.arena.pop_oldest() {
                self.arena.release(oldest);
            }
        }

        // Cache the accelerated correction for completion on the next call.
        self.v[new].as_mut().copy_from_slice(out.as_ref());
        self.arena.push_newest(new);
        self.pending = true;
    }

    /// Discard the pending pair, leaving the accepted history untouched.
    ///
    /// Call this when the iterate adopted by the outer loop is not the one the
    /// last `correction` proposed, so the next secant difference would be
    /// meaningless. No-op when nothing is pending.
    pub fn relax(&mut self) {
        if self.pending {
            let p = self
                .arena
                .newest()
                .expect("pending pair with an empty subspace");
            self.arena.remove(p);
            self.arena.release(p);
            self.pending = false;
        }
    }

    /// Forget all correction history. The next `correction` behaves exactly
    /// as if the accelerator had just been constructed; storage is recycled,
    /// not freed.
    pub fn restart(&mut self) {
        self.arena.clear();
        self.pending = false;
    }
}
