// Simulation

/// Fraction of an instance's visible range inside which it is always
/// simulated. Beyond it, up to the full range, simulation is throttled.
pub const SIMULATION_THROTTLE_RATIO: f32 = 0.5;

/// Visible range used when a spawn does not specify one
pub const DEFAULT_VISIBLE_RANGE: f32 = 64.0;

// Synchronization

/// Number of observer shards a manager round-robins through by default
pub const DEFAULT_SHARD_COUNT: u32 = 4;

/// Default cap on CREATE and UPDATE messages a manager emits per tick
pub const DEFAULT_MAX_SENDS_PER_TICK: usize = 256;

/// Default cap on live instances per manager
pub const DEFAULT_MAX_INSTANCES: usize = 1024;

// Level of detail

/// Update intervals by ratio of observer distance to visible range. A ratio
/// below a band's bound gets that band's interval; past the last band,
/// `LOD_FAR_INTERVAL` applies.
pub const LOD_BANDS: [(f32, u32); 3] = [(0.25, 1), (0.50, 3), (0.75, 6)];
pub const LOD_FAR_INTERVAL: u32 = 12;
