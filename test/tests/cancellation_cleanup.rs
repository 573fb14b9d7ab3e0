//! However an instance ends, every observer that had it is told, and no
//! scope still holds it once the tick that observed the end is over.

use lumen_server::{InterestManager, RemoveEvent, RemoveReason};
use lumen_shared::{
    BoxedEffect, EffectCategory, EffectMessageType, EffectSpec, InstanceId, ObserverKey, Position,
};
use lumen_test::{
    assert_in_scope, assert_not_in_scope, count_to, deterministic_config, Flare,
    RecordingTransport, Smoke, TestProtocol, TestScene,
};

fn setup(observers: u64) -> (InterestManager<BoxedEffect>, TestScene, Vec<ObserverKey>) {
    let _ = env_logger::builder().is_test(true).try_init();
    let protocol = TestProtocol::full();
    let manager = InterestManager::new(
        EffectCategory::Effect,
        deterministic_config(),
        protocol.effects().clone(),
    );
    let mut scene = TestScene::new();
    let keys = (0..observers)
        .map(|key| scene.add_observer(key, Position::new(key as f32, 0.0, 0.0)))
        .collect();
    (manager, scene, keys)
}

#[test]
fn canceled_instance_is_removed_from_every_scope() {
    let (mut manager, scene, observers) = setup(3);
    let mut transport = RecordingTransport::new();
    let id = manager
        .spawn(EffectSpec::new(Position::ORIGIN, 50.0), Box::new(Smoke::new(1)))
        .unwrap();

    manager.tick(&scene, &mut transport);
    for observer in &observers {
        assert_in_scope!(manager, *observer, id);
    }
    transport.take();

    assert!(manager.cancel(&id));
    // still live until the next tick observes the cancellation
    assert!(manager.has_instance(&id));

    manager.tick(&scene, &mut transport);
    let sent = transport.take();
    for observer in &observers {
        assert_eq!(count_to(&sent, observer, EffectMessageType::Remove), 1);
        assert_eq!(count_to(&sent, observer, EffectMessageType::Update), 0);
        assert_not_in_scope!(manager, *observer, id);
    }
    assert!(!manager.has_instance(&id));

    let mut events = manager.take_events();
    let removes: Vec<_> = events.read::<RemoveEvent>().collect();
    assert_eq!(removes, vec![(EffectCategory::Effect, id, RemoveReason::Canceled)]);
}

#[test]
fn self_canceling_behavior_is_cleaned_up_the_same_tick() {
    let (mut manager, scene, observers) = setup(2);
    let mut transport = RecordingTransport::new();
    // fuse 1: steps on ticks 1 and 2, cancels itself on tick 2
    let id = manager
        .spawn(EffectSpec::new(Position::ORIGIN, 50.0), Box::new(Flare::new(1)))
        .unwrap();

    manager.tick(&scene, &mut transport);
    assert!(manager.has_instance(&id));
    transport.take();

    manager.tick(&scene, &mut transport);
    let sent = transport.take();
    assert!(!manager.has_instance(&id));
    for observer in &observers {
        assert_eq!(count_to(&sent, observer, EffectMessageType::Remove), 1);
        assert_not_in_scope!(manager, *observer, id);
    }
}

#[test]
fn only_holders_receive_the_remove() {
    let (mut manager, mut scene, observers) = setup(2);
    let mut transport = RecordingTransport::new();
    let far = scene.add_observer(9, Position::new(500.0, 0.0, 0.0));
    let id = manager
        .spawn(EffectSpec::new(Position::ORIGIN, 50.0), Box::new(Smoke::new(1)))
        .unwrap();

    manager.tick(&scene, &mut transport);
    manager.cancel(&id);
    manager.tick(&scene, &mut transport);
    let sent = transport.take();

    for observer in &observers {
        assert_eq!(count_to(&sent, observer, EffectMessageType::Remove), 1);
    }
    assert_eq!(count_to(&sent, &far, EffectMessageType::Remove), 0);
    assert_eq!(count_to(&sent, &far, EffectMessageType::Create), 0);
}

#[test]
fn cancel_of_unknown_instance_is_refused() {
    let (mut manager, _scene, _observers) = setup(0);
    assert!(!manager.cancel(&InstanceId::from_u64(42)));
}
