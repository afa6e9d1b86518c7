//! Pool usage statistics

/// Counters describing how a pool has satisfied spawns
///
/// Only spawns that completed are counted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PoolStats {
    /// Successful spawns
    pub spawned: u64,
    /// Spawns served by an inactive member
    pub recycled: u64,
    /// Spawns served by a member added through the grow policy
    pub grown: u64,
    /// Spawns that repurposed the oldest member
    pub evicted: u64,
    /// Maximum number of simultaneously active members seen after a spawn
    pub peak_active: usize,
}

impl PoolStats {
    /// Fraction of spawns that reused an inactive member
    #[allow(clippy::cast_precision_loss)]
    pub fn reuse_ratio(&self) -> f32 {
        if self.spawned == 0 {
            0.0
        } else {
            self.recycled as f32 / self.spawned as f32
        }
    }
}
