use std::vec::IntoIter;

use lumen_shared::{EffectCategory, InstanceId};

pub struct ClientEvents {
    creates: Vec<(EffectCategory, InstanceId)>,
    updates: Vec<(EffectCategory, InstanceId)>,
    removes: Vec<(EffectCategory, InstanceId)>,
    empty: bool,
}

impl Default for ClientEvents {
    fn default() -> Self {
        Self::new()
    }
}

impl ClientEvents {
    pub(crate) fn new() -> Self {
        Self {
            creates: Vec::new(),
            updates: Vec::new(),
            removes: Vec::new(),
            empty: true,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.empty
    }

    pub fn read<V: ClientEvent>(&mut self) -> V::Iter {
        V::iter(self)
    }

    pub fn has<V: ClientEvent>(&self) -> bool {
        V::has(self)
    }

    pub(crate) fn push_create(&mut self, category: EffectCategory, id: InstanceId) {
        self.creates.push((category, id));
        self.empty = false;
    }

    pub(crate) fn push_update(&mut self, category: EffectCategory, id: InstanceId) {
        self.updates.push((category, id));
        self.empty = false;
    }

    pub(crate) fn push_remove(&mut self, category: EffectCategory, id: InstanceId) {
        self.removes.push((category, id));
        self.empty = false;
    }
}

// Event Trait
pub trait ClientEvent {
    type Iter;

    fn iter(events: &mut ClientEvents) -> Self::Iter;

    fn has(events: &ClientEvents) -> bool;
}

// Create Event
pub struct CreateEvent;
impl ClientEvent for CreateEvent {
    type Iter = IntoIter<(EffectCategory, InstanceId)>;

    fn iter(events: &mut ClientEvents) -> Self::Iter {
        let list = std::mem::take(&mut events.creates);
        IntoIterator::into_iter(list)
    }

    fn has(events: &ClientEvents) -> bool {
        !events.creates.is_empty()
    }
}

// Update Event
pub struct UpdateEvent;
impl ClientEvent for UpdateEvent {
    type Iter = IntoIter<(EffectCategory, InstanceId)>;

    fn iter(events: &mut ClientEvents) -> Self::Iter {
        let list = std::mem::take(&mut events.updates);
        IntoIterator::into_iter(list)
    }

    fn has(events: &ClientEvents) -> bool {
        !events.updates.is_empty()
    }
}

// Remove Event
pub struct RemoveEvent;
impl ClientEvent for RemoveEvent {
    type Iter = IntoIter<(EffectCategory, InstanceId)>;

    fn iter(events: &mut ClientEvents) -> Self::Iter {
        let list = std::mem::take(&mut events.removes);
        IntoIterator::into_iter(list)
    }

    fn has(events: &ClientEvents) -> bool {
        !events.removes.is_empty()
    }
}
