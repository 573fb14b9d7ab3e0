use std::default::Default;

use lumen_shared::{DEFAULT_MAX_INSTANCES, DEFAULT_MAX_SENDS_PER_TICK, DEFAULT_SHARD_COUNT};

/// Contains Config properties which will be used by the Server
#[derive(Clone, Default)]
pub struct ServerConfig {
    /// Used to configure the manager for free-standing effects
    pub effects: InterestConfig,
    /// Used to configure the manager for grouped effects
    pub groups: InterestConfig,
}

/// Contains Config properties which will be used by one InterestManager
#[derive(Clone, Debug)]
pub struct InterestConfig {
    /// Number of shards observers are split into. Each tick evaluates one
    /// shard, so every observer is re-evaluated once every `shard_count`
    /// ticks. Values below 1 are treated as 1.
    pub shard_count: u32,
    /// Upper bound on every instance's visible range
    pub global_max_visible_range: f32,
    /// Maximum CREATE and UPDATE messages emitted per tick. REMOVE messages
    /// are never limited.
    pub max_sends_per_tick: usize,
    /// Spawns past this many live instances are rejected
    pub max_instances: usize,
    /// Whether to shuffle observer evaluation order every tick, so budget
    /// overflow does not always fall on the same observers
    pub shuffle_observers: bool,
    /// Seed for the shuffle, random if `None`
    pub rng_seed: Option<u64>,
}

impl Default for InterestConfig {
    fn default() -> Self {
        Self {
            shard_count: DEFAULT_SHARD_COUNT,
            global_max_visible_range: f32::INFINITY,
            max_sends_per_tick: DEFAULT_MAX_SENDS_PER_TICK,
            max_instances: DEFAULT_MAX_INSTANCES,
            shuffle_observers: true,
            rng_seed: None,
        }
    }
}

impl InterestConfig {
    pub(crate) fn effective_shard_count(&self) -> u32 {
        self.shard_count.max(1)
    }
}
