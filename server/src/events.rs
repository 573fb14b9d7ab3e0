use std::{mem, vec::IntoIter};

use lumen_shared::{EffectCategory, InstanceId};

/// Why an instance left its manager
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RemoveReason {
    /// Its tick counter reached `max_tick`
    Expired,
    /// It was canceled by its behavior or through the manager
    Canceled,
}

pub struct InterestEvents {
    spawns: Vec<(EffectCategory, InstanceId)>,
    removes: Vec<(EffectCategory, InstanceId, RemoveReason)>,
    empty: bool,
}

impl Default for InterestEvents {
    fn default() -> Self {
        Self::new()
    }
}

impl InterestEvents {
    pub(crate) fn new() -> Self {
        Self {
            spawns: Vec::new(),
            removes: Vec::new(),
            empty: true,
        }
    }

    // Public

    pub fn is_empty(&self) -> bool {
        self.empty
    }

    pub fn read<V: InterestEvent>(&mut self) -> V::Iter {
        V::iter(self)
    }

    pub fn has<V: InterestEvent>(&self) -> bool {
        V::has(self)
    }

    // Crate-public

    pub(crate) fn push_spawn(&mut self, category: EffectCategory, id: InstanceId) {
        self.spawns.push((category, id));
        self.empty = false;
    }

    pub(crate) fn push_remove(
        &mut self,
        category: EffectCategory,
        id: InstanceId,
        reason: RemoveReason,
    ) {
        self.removes.push((category, id, reason));
        self.empty = false;
    }

    /// Moves every event of `other` to the end of this queue
    pub(crate) fn append(&mut self, mut other: InterestEvents) {
        if other.empty {
            return;
        }
        self.spawns.append(&mut other.spawns);
        self.removes.append(&mut other.removes);
        self.empty = false;
    }

    pub(crate) fn take(&mut self) -> InterestEvents {
        mem::take(self)
    }
}

// Event Trait
pub trait InterestEvent {
    type Iter;

    fn iter(events: &mut InterestEvents) -> Self::Iter;

    fn has(events: &InterestEvents) -> bool;
}

// Spawn Event
pub struct SpawnEvent;
impl InterestEvent for SpawnEvent {
    type Iter = IntoIter<(EffectCategory, InstanceId)>;

    fn iter(events: &mut InterestEvents) -> Self::Iter {
        let list = mem::take(&mut events.spawns);
        IntoIterator::into_iter(list)
    }

    fn has(events: &InterestEvents) -> bool {
        !events.spawns.is_empty()
    }
}

// Remove Event
pub struct RemoveEvent;
impl InterestEvent for RemoveEvent {
    type Iter = IntoIter<(EffectCategory, InstanceId, RemoveReason)>;

    fn iter(events: &mut InterestEvents) -> Self::Iter {
        let list = mem::take(&mut events.removes);
        IntoIterator::into_iter(list)
    }

    fn has(events: &InterestEvents) -> bool {
        !events.removes.is_empty()
    }
}
