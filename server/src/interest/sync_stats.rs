/// Per-tick synchronization counters of one manager
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SyncStats {
    /// CREATE and UPDATE messages sent
    pub synced: u32,
    /// Updates skipped because the observer's level of detail did not call
    /// for one this tick
    pub skipped_by_lod: u32,
    /// (observer, instance) pairs not evaluated because the observer is in
    /// another shard
    pub skipped_by_shard: u32,
    /// CREATE and UPDATE messages dropped because the send budget ran out
    pub throttled_by_budget: u32,
}
