//! Communicator abstraction for collective vector reductions.
//!
//! The accelerator itself is single threaded; the only parallelism it touches
//! is through inner products and norms, which may be collective reductions
//! over a fixed set of cooperating processes. `Comm` captures exactly that
//! surface: rank/size queries, a barrier, and an all-reduce sum.

pub trait Comm {
    fn rank(&self) -> usize;
    fn size(&self) -> usize;
    fn barrier(&self);
    /// Global sum of `x` across all cooperating processes.
    fn all_reduce(&self, x: f64) -> f64;
    /// Collective dot product over distributed slices.
    fn dot(&self, a: &[f64], b: &[f64]) -> f64 {
        let local = a.iter().zip(b).map(|(&x, &y)| x * y).sum::<f64>();
        self.all_reduce(local)
    }
    /// Collective 2-norm over distributed slices.
    fn norm(&self, a: &[f64]) -> f64 {
        let local = a.iter().map(|&x| x * x).sum::<f64>();
        self.all_reduce(local).sqrt()
    }
}

#[cfg(feature = "mpi")]
pub mod mpi_comm;
#[cfg(feature = "mpi")]
pub use mpi_comm::MpiComm;

#[cfg(feature = "rayon")]
pub mod rayon_comm;
#[cfg(feature = "rayon")]
pub use rayon_comm::RayonComm;

pub enum UniverseComm {
    #[cfg(feature = "mpi")]
    Mpi(MpiComm),
    #[cfg(feature = "rayon")]
    Rayon(RayonComm),
    #[cfg(not(any(feature = "mpi", feature = "rayon")))]
    Serial,
}

impl Comm for UniverseComm {
    fn rank(&self) -> usize {
        match self {
            #[cfg(feature = "mpi")]
            UniverseComm::Mpi(comm) => comm.rank(),
            #[cfg(feature = "rayon")]
            UniverseComm::Rayon(comm) => comm.rank(),
            #[cfg(not(any(feature = "mpi", feature = "rayon")))]
            UniverseComm::Serial => 0,
        }
    }
    fn size(&self) -> usize {
        match self {
            #[cfg(feature = "mpi")]
            UniverseComm::Mpi(comm) => comm.size(),
            #[cfg(feature = "rayon")]
            UniverseComm::Rayon(comm) => comm.size(),
            #[cfg(not(any(feature = "mpi", feature = "rayon")))]
            UniverseComm::Serial => 1,
        }
    }
    fn barrier(&self) {
        match self {
            #[cfg(feature = "mpi")]
            UniverseComm::Mpi(comm) => comm.barrier(),
            #[cfg(feature = "rayon")]
            UniverseComm::Rayon(comm) => comm.barrier(),
            #[cfg(not(any(feature = "mpi", feature = "rayon")))]
            UniverseComm::Serial => {}
        }
    }
    fn all_reduce(&self, x: f64) -> f64 {
        match self {
            #[cfg(feature = "mpi")]
            UniverseComm::Mpi(comm) => comm.all_reduce(x),
            #[cfg(feature = "rayon")]
            UniverseComm::Rayon(comm) => comm.all_reduce(x),
            #[cfg(not(any(feature = "mpi", feature = "rayon")))]
            UniverseComm::Serial => x,
        }
    }
}
