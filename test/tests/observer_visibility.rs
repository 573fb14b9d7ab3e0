//! What makes an observer gain or lose an instance, and how the directory
//! forgets observers that are gone.

use lumen_server::{InterestConfig, InterestManager};
use lumen_shared::{
    BoxedEffect, EffectCategory, EffectMessageType, EffectSpec, Position, RegionKey,
};
use lumen_test::{
    assert_in_scope, assert_not_in_scope, count_to, deterministic_config, RecordingTransport,
    Smoke, TestProtocol, TestScene,
};

fn manager(config: InterestConfig) -> InterestManager<BoxedEffect> {
    let _ = env_logger::builder().is_test(true).try_init();
    let protocol = TestProtocol::full();
    InterestManager::new(EffectCategory::Effect, config, protocol.effects().clone())
}

#[test]
fn leaving_range_sends_remove_and_returning_sends_create() {
    let mut manager = manager(deterministic_config());
    let mut scene = TestScene::new();
    let observer = scene.add_observer(0, Position::ORIGIN);
    let id = manager
        .spawn(EffectSpec::new(Position::ORIGIN, 10.0), Box::new(Smoke::new(0)))
        .unwrap();
    let mut transport = RecordingTransport::new();

    manager.tick(&scene, &mut transport);
    assert_in_scope!(manager, observer, id);

    scene.move_observer(&observer, Position::new(10.5, 0.0, 0.0));
    manager.tick(&scene, &mut transport);
    assert_not_in_scope!(manager, observer, id);

    scene.move_observer(&observer, Position::new(10.0, 0.0, 0.0));
    manager.tick(&scene, &mut transport);
    assert_in_scope!(manager, observer, id);

    let sent = transport.take();
    assert_eq!(count_to(&sent, &observer, EffectMessageType::Create), 2);
    assert_eq!(count_to(&sent, &observer, EffectMessageType::Remove), 1);
}

#[test]
fn region_and_eligibility_gate_visibility() {
    let mut manager = manager(deterministic_config());
    let mut scene = TestScene::new();
    let wanderer = scene.add_observer(0, Position::ORIGIN);
    let spectator = scene.add_observer(1, Position::ORIGIN);
    let id = manager
        .spawn(EffectSpec::new(Position::ORIGIN, 10.0), Box::new(Smoke::new(0)))
        .unwrap();
    let mut transport = RecordingTransport::new();

    manager.tick(&scene, &mut transport);
    assert_in_scope!(manager, wanderer, id);
    assert_in_scope!(manager, spectator, id);
    transport.take();

    scene.set_region(&wanderer, RegionKey::from_u32(2));
    scene.set_eligible(&spectator, false);
    manager.tick(&scene, &mut transport);

    let sent = transport.take();
    assert_eq!(count_to(&sent, &wanderer, EffectMessageType::Remove), 1);
    assert_eq!(count_to(&sent, &spectator, EffectMessageType::Remove), 1);
    assert_not_in_scope!(manager, wanderer, id);
    assert_not_in_scope!(manager, spectator, id);
}

#[test]
fn global_max_range_caps_instance_range() {
    let mut manager = manager(InterestConfig {
        global_max_visible_range: 5.0,
        ..deterministic_config()
    });
    let mut scene = TestScene::new();
    let observer = scene.add_observer(0, Position::new(8.0, 0.0, 0.0));
    let id = manager
        .spawn(EffectSpec::new(Position::ORIGIN, 10.0), Box::new(Smoke::new(0)))
        .unwrap();
    let mut transport = RecordingTransport::new();

    manager.tick(&scene, &mut transport);

    assert_not_in_scope!(manager, observer, id);
    assert!(transport.take().is_empty());
}

#[test]
fn departed_observer_is_pruned_without_messages() {
    let mut manager = manager(deterministic_config());
    let mut scene = TestScene::new();
    let staying = scene.add_observer(0, Position::ORIGIN);
    let leaving = scene.add_observer(1, Position::ORIGIN);
    let id = manager
        .spawn(EffectSpec::new(Position::ORIGIN, 10.0), Box::new(Smoke::new(0)))
        .unwrap();
    let mut transport = RecordingTransport::new();

    manager.tick(&scene, &mut transport);
    assert_in_scope!(manager, leaving, id);
    transport.take();

    scene.remove_observer(&leaving);
    manager.tick(&scene, &mut transport);

    let sent = transport.take();
    assert_eq!(count_to(&sent, &leaving, EffectMessageType::Remove), 0);
    assert!(manager.observer_scope(&leaving).is_empty());
    assert_in_scope!(manager, staying, id);
}

#[test]
fn disconnected_observer_loses_everything() {
    let mut manager = manager(deterministic_config());
    let mut scene = TestScene::new();
    let observer = scene.add_observer(0, Position::ORIGIN);
    let id = manager
        .spawn(EffectSpec::new(Position::ORIGIN, 10.0), Box::new(Smoke::new(0)))
        .unwrap();
    let mut transport = RecordingTransport::new();

    manager.tick(&scene, &mut transport);
    scene.disconnect(&observer);
    manager.tick(&scene, &mut transport);

    assert_not_in_scope!(manager, observer, id);
    assert_eq!(manager.observer_scope(&observer).len(), 0);
}

#[test]
fn scopes_clear_once_no_instances_remain() {
    let mut manager = manager(deterministic_config());
    let mut scene = TestScene::new();
    let observer = scene.add_observer(0, Position::ORIGIN);
    let first = manager
        .spawn(EffectSpec::new(Position::ORIGIN, 10.0).max_tick(2), Box::new(Smoke::new(0)))
        .unwrap();
    let second = manager
        .spawn(EffectSpec::new(Position::ORIGIN, 10.0).max_tick(2), Box::new(Smoke::new(0)))
        .unwrap();
    let mut transport = RecordingTransport::new();

    manager.tick(&scene, &mut transport);
    assert_eq!(manager.observer_scope(&observer).len(), 2);
    let mut scope: Vec<_> = manager.observer_scope(&observer).iter().copied().collect();
    scope.sort();
    assert_eq!(scope, vec![first, second]);

    manager.tick(&scene, &mut transport);
    assert!(manager.is_empty());
    assert!(manager.observer_scope(&observer).is_empty());
}
