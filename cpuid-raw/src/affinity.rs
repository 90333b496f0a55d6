use nix::sched::{sched_getaffinity, sched_setaffinity, CpuSet};
use nix::unistd::Pid;

/// Pins the calling thread to one logical CPU until dropped.
///
/// Topology leaves (0x1 EBX, 0xB, 0x8000_001E) report per-core APIC ids, so a
/// snapshot taken while the scheduler migrates us would mix cores.
pub struct PinGuard {
    old_affinity: CpuSet,
}

impl PinGuard {
    pub fn new(cpu: usize) -> nix::Result<Self> {
        let old_affinity = sched_getaffinity(Pid::from_raw(0))?;

        let mut pinned = CpuSet::new();
        pinned.set(cpu)?;
        sched_setaffinity(Pid::from_raw(0), &pinned)?;

        tracing::debug!("Pinned snapshot capture to CPU {cpu}");
        Ok(Self { old_affinity })
    }

    /// First CPU the process is currently allowed to run on.
    pub fn first_allowed_cpu() -> Option<usize> {
        let set = sched_getaffinity(Pid::from_raw(0)).ok()?;
        (0..CpuSet::count()).find(|&cpu| set.is_set(cpu).unwrap_or(false))
    }
}

impl Drop for PinGuard {
    fn drop(&mut self) {
        let _ = sched_setaffinity(Pid::from_raw(0), &self.old_affinity);
    }
}
