pub mod helpers;

pub use helpers::*;

use lumen_server::InterestConfig;

/// Single shard, no shuffling: every observer is evaluated every tick, in
/// key order
pub fn deterministic_config() -> InterestConfig {
    InterestConfig {
        shard_count: 1,
        shuffle_observers: false,
        rng_seed: Some(0),
        ..InterestConfig::default()
    }
}
