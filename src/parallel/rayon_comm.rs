// rayon-based shared-memory communication

pub struct RayonComm;

impl RayonComm {
    pub fn new() -> Self {
        rayon::ThreadPoolBuilder::new()
            .num_threads(num_cpus::get())
            .build_global()
            .ok();
        RayonComm
    }
}

impl Default for RayonComm {
    fn default() -> Self {
        Self::new()
    }
}

impl super::Comm for RayonComm {
    fn rank(&self) -> usize {
        0
    }
    fn size(&self) -> usize {
        num_cpus::get()
    }
    fn barrier(&self) {
        rayon::scope(|_| {});
    }
    fn all_reduce(&self, x: f64) -> f64 {
        x // No-op for shared memory
    }
}
