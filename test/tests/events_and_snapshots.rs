use std::thread;

use lumen_server::{EffectServer, RemoveEvent, RemoveReason, ServerConfig, SpawnEvent};
use lumen_shared::{EffectCategory, EffectSpec, Position};
use lumen_test::{deterministic_config, Flare, RecordingTransport, Spark, TestProtocol, TestScene};

fn server() -> (EffectServer, RecordingTransport) {
    let _ = env_logger::builder().is_test(true).try_init();
    let transport = RecordingTransport::new();
    let config = ServerConfig {
        effects: deterministic_config(),
        groups: deterministic_config(),
    };
    let server = EffectServer::new(config, TestProtocol::full(), Box::new(transport.clone()));
    (server, transport)
}

#[test]
fn remove_events_carry_their_reason() {
    let (mut server, _transport) = server();
    let scene = TestScene::new();

    let expiring = server
        .spawn_effect(EffectSpec::default().max_tick(1), Spark::new(1))
        .unwrap();
    let canceled = server.spawn_effect(EffectSpec::default(), Spark::new(1)).unwrap();
    // fuse 0 cancels itself on its first step, which needs an observer in range
    let mut scene_with_observer = TestScene::new();
    scene_with_observer.add_observer(0, Position::ORIGIN);
    let burnt = server.spawn_effect(EffectSpec::default(), Flare::new(0)).unwrap();

    let mut events = server.take_events();
    assert_eq!(events.read::<SpawnEvent>().count(), 3);
    assert!(!events.has::<RemoveEvent>());

    server.cancel(EffectCategory::Effect, &canceled);
    server.tick(&scene_with_observer);
    server.tick(&scene);

    let mut events = server.take_events();
    let mut removes: Vec<_> = events.read::<RemoveEvent>().collect();
    removes.sort_by_key(|(_, id, _)| *id);
    assert_eq!(
        removes,
        vec![
            (EffectCategory::Effect, expiring, RemoveReason::Expired),
            (EffectCategory::Effect, canceled, RemoveReason::Canceled),
            (EffectCategory::Effect, burnt, RemoveReason::Canceled),
        ]
    );
    assert!(server.effects().is_empty());
}

#[test]
fn snapshots_are_published_every_tick_and_readable_elsewhere() {
    let (mut server, _transport) = server();
    let scene = TestScene::new();
    let snapshots = server.snapshots(EffectCategory::Effect);
    assert!(snapshots.get().is_empty());

    let id = server
        .spawn_effect(EffectSpec::new(Position::new(2.0, 3.0, 4.0), 8.0), Spark::new(1))
        .unwrap();
    // nothing is published until a tick runs
    assert!(snapshots.get().is_empty());

    server.tick(&scene);
    let reader = snapshots.clone();
    let published = thread::spawn(move || reader.get()).join().unwrap();

    assert_eq!(published.len(), 1);
    let snapshot = &published[0];
    assert_eq!(snapshot.id, id);
    assert_eq!(snapshot.category, EffectCategory::Effect);
    assert_eq!(snapshot.type_key, "spark");
    assert_eq!(snapshot.position, Position::new(2.0, 3.0, 4.0));
    assert_eq!(snapshot.tick_counter, 1);

    server.cancel(EffectCategory::Effect, &id);
    server.tick(&scene);
    assert!(snapshots.get().is_empty());
    assert_eq!(published.len(), 1);
}

#[test]
fn group_snapshots_are_separate() {
    let (mut server, _transport) = server();
    let scene = TestScene::new();
    let bonfire = TestProtocol::bonfire(server.protocol());
    server.spawn_group(EffectSpec::default(), bonfire).unwrap();

    server.tick(&scene);

    assert_eq!(server.snapshots(EffectCategory::Group).get().len(), 1);
    assert!(server.snapshots(EffectCategory::Effect).get().is_empty());
    assert_eq!(server.stats(EffectCategory::Group).synced, 0);
}
