//! Type ids come from registration order, so endpoints only agree when they
//! register identically.

use lumen_shared::{
    BoxedEffect, EffectCategory, EffectProtocol, TypeRegistry,
};
use lumen_test::{Flare, Smoke, Spark};

#[test]
fn same_order_gives_same_ids() {
    let server = EffectProtocol::builder()
        .add_effect::<Spark>()
        .add_effect::<Smoke>()
        .add_effect::<Flare>()
        .build();
    let client = EffectProtocol::builder()
        .add_effect::<Spark>()
        .add_effect::<Smoke>()
        .add_effect::<Flare>()
        .build();

    for (key, expected) in [("spark", 0), ("smoke", 1), ("flare", 2)] {
        assert_eq!(server.id_by_key(EffectCategory::Effect, key), Some(expected));
        assert_eq!(client.id_by_key(EffectCategory::Effect, key), Some(expected));
    }
}

#[test]
fn different_order_gives_different_ids() {
    let first: TypeRegistry<BoxedEffect> = TypeRegistry::new("effect");
    first.register_effect::<Spark>();
    first.register_effect::<Smoke>();

    let second: TypeRegistry<BoxedEffect> = TypeRegistry::new("effect");
    second.register_effect::<Smoke>();
    second.register_effect::<Spark>();

    assert_eq!(first.id_by_key("spark"), Some(0));
    assert_eq!(second.id_by_key("spark"), Some(1));
    assert_ne!(first.id_by_key("smoke"), second.id_by_key("smoke"));
    assert_ne!(first.key_by_id(0), second.key_by_id(0));
}

#[test]
fn lookups_miss_without_panicking() {
    let registry: TypeRegistry<BoxedEffect> = TypeRegistry::new("effect");
    registry.register_effect::<Spark>();

    assert_eq!(registry.id_by_key("comet"), None);
    assert_eq!(registry.key_by_id(9), None);
    assert_eq!(registry.len(), 1);
}
