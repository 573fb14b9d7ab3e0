//! With N shards, each (observer, instance) pair is evaluated once every N
//! ticks.

use std::collections::HashMap;

use proptest::prelude::*;

use lumen_server::{InterestConfig, InterestManager};
use lumen_shared::{BoxedEffect, EffectCategory, EffectSpec, ObserverKey, Position};
use lumen_test::{RecordingTransport, Smoke, TestProtocol, TestScene};

proptest! {
    #[test]
    fn prop_every_observer_is_evaluated_within_shard_count_ticks(
        shard_count in 1u32..6,
        keys in prop::collection::btree_set(0u64..1000, 1..12),
        seed in any::<u64>(),
    ) {
        let protocol = TestProtocol::full();
        let config = InterestConfig {
            shard_count,
            rng_seed: Some(seed),
            ..InterestConfig::default()
        };
        let mut manager: InterestManager<BoxedEffect> =
            InterestManager::new(EffectCategory::Effect, config, protocol.effects().clone());
        let mut scene = TestScene::new();
        for key in &keys {
            scene.add_observer(*key, Position::ORIGIN);
        }
        manager
            .spawn(EffectSpec::new(Position::ORIGIN, 100.0), Box::new(Smoke::new(0)))
            .unwrap();
        let mut transport = RecordingTransport::new();

        // at distance 0 every evaluation sends a CREATE or an UPDATE
        let ticks = 3 * shard_count as u64;
        let mut evaluated: HashMap<ObserverKey, Vec<u64>> = HashMap::new();
        for tick in 1..=ticks {
            manager.tick(&scene, &mut transport);
            for (observer, _) in transport.take() {
                evaluated.entry(observer).or_default().push(tick);
            }
        }

        for key in &keys {
            let observer = ObserverKey::from_u64(*key);
            let history = evaluated.get(&observer).cloned().unwrap_or_default();
            prop_assert!(!history.is_empty());
            prop_assert!(history[0] <= shard_count as u64);
            for pair in history.windows(2) {
                prop_assert!(pair[1] - pair[0] <= shard_count as u64);
            }
            prop_assert!(ticks - history[history.len() - 1] < shard_count as u64);
        }
    }
}

#[test]
fn zero_shards_behaves_as_one() {
    let protocol = TestProtocol::full();
    let config = InterestConfig {
        shard_count: 0,
        ..InterestConfig::default()
    };
    let mut manager: InterestManager<BoxedEffect> =
        InterestManager::new(EffectCategory::Effect, config, protocol.effects().clone());
    let mut scene = TestScene::new();
    scene.add_observer(3, Position::ORIGIN);
    scene.add_observer(8, Position::ORIGIN);
    manager
        .spawn(EffectSpec::new(Position::ORIGIN, 10.0), Box::new(Smoke::new(0)))
        .unwrap();
    let mut transport = RecordingTransport::new();

    let stats = manager.tick(&scene, &mut transport);

    assert_eq!(stats.synced, 2);
    assert_eq!(stats.skipped_by_shard, 0);
}
