//! Bounded-memory acceleration subspace: slot arena, Gram triangle, and the
//! accelerator engine itself.

pub mod arena;
pub mod gram;
pub mod nka;

pub use arena::SlotArena;
pub use gram::GramTriangle;
pub use nka::Nka;
