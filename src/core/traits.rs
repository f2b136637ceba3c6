//! Core numerical traits for nka.

/// Fixed-point map evaluation: g ← G(x).
pub trait FixedPointMap<V> {
    /// Compute g = G(x).
    fn apply(&self, x: &V, g: &mut V);
}

/// Inner products & norms, possibly collective over distributed vectors.
pub trait InnerProduct<V> {
    /// Associated scalar type.
    type Scalar: Copy + PartialOrd + From<f64>;
    /// Compute dot(x, y).
    fn dot(&self, x: &V, y: &V) -> Self::Scalar;
    /// Compute ‖x‖₂.
    fn norm(&self, x: &V) -> Self::Scalar;
}

/// Uniform indexing into vectors (dense or distributed-local).
pub trait Indexing {
    /// Number of rows (or length for a vector).
    fn nrows(&self) -> usize;
}
