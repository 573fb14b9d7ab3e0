use std::sync::{Arc, PoisonError, RwLock};

use lumen_shared::{EffectBehavior, EffectCategory, EffectInstance, InstanceId, Position, RegionKey, Tick};

/// Read-only copy of one live instance, as of the end of a tick
#[derive(Clone, Debug, PartialEq)]
pub struct InstanceSnapshot {
    pub category: EffectCategory,
    pub id: InstanceId,
    pub type_key: String,
    pub region: RegionKey,
    pub position: Position,
    pub visible_range: f32,
    pub tick_counter: Tick,
    pub max_tick: Tick,
    pub canceled: bool,
}

impl InstanceSnapshot {
    pub(crate) fn of<B: EffectBehavior>(category: EffectCategory, instance: &EffectInstance<B>) -> Self {
        Self {
            category,
            id: instance.id(),
            type_key: instance.type_key().to_string(),
            region: instance.region(),
            position: instance.position(),
            visible_range: instance.visible_range(),
            tick_counter: instance.tick_counter(),
            max_tick: instance.max_tick(),
            canceled: instance.is_canceled(),
        }
    }
}

/// Handle to the latest published set of instance snapshots.
///
/// The tick thread replaces the whole set once per tick; readers on any
/// thread get an immutable `Arc` that stays valid while they hold it.
#[derive(Clone, Default)]
pub struct InstanceSnapshots {
    latest: Arc<RwLock<Arc<Vec<InstanceSnapshot>>>>,
}

impl InstanceSnapshots {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self) -> Arc<Vec<InstanceSnapshot>> {
        self.latest
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn find(&self, id: &InstanceId) -> Option<InstanceSnapshot> {
        self.get().iter().find(|snapshot| snapshot.id == *id).cloned()
    }

    pub(crate) fn publish(&self, snapshots: Vec<InstanceSnapshot>) {
        let snapshots = Arc::new(snapshots);
        *self.latest.write().unwrap_or_else(PoisonError::into_inner) = snapshots;
    }
}
