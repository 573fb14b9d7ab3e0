use std::collections::{hash_set, HashMap, HashSet};

use lumen_shared::{InstanceId, ObserverKey};

/// Per observer, the instances it has been told about and not yet told to
/// remove
#[derive(Default)]
pub struct ObserverDirectory {
    scopes: HashMap<ObserverKey, HashSet<InstanceId>>,
}

impl ObserverDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has(&self, observer: &ObserverKey, id: &InstanceId) -> bool {
        self.scopes
            .get(observer)
            .is_some_and(|scope| scope.contains(id))
    }

    /// Marks the instance visible, creating the observer's entry on first use
    pub fn insert(&mut self, observer: &ObserverKey, id: InstanceId) -> bool {
        self.scopes.entry(*observer).or_default().insert(id)
    }

    pub fn remove(&mut self, observer: &ObserverKey, id: &InstanceId) -> bool {
        self.scopes
            .get_mut(observer)
            .is_some_and(|scope| scope.remove(id))
    }

    /// Drops the instance from every scope, returning the observers that
    /// held it
    pub fn remove_everywhere(&mut self, id: &InstanceId) -> Vec<ObserverKey> {
        let mut holders: Vec<ObserverKey> = self
            .scopes
            .iter_mut()
            .filter_map(|(observer, scope)| scope.remove(id).then_some(*observer))
            .collect();
        holders.sort();
        holders
    }

    /// Keeps only the observers for which `keep` returns true
    pub fn retain<F: FnMut(&ObserverKey) -> bool>(&mut self, mut keep: F) {
        self.scopes.retain(|observer, _| keep(observer));
    }

    pub fn clear(&mut self) {
        self.scopes.clear();
    }

    #[cfg(test)]
    pub fn contains_observer(&self, observer: &ObserverKey) -> bool {
        self.scopes.contains_key(observer)
    }

    pub fn scope_len(&self, observer: &ObserverKey) -> usize {
        self.scopes.get(observer).map_or(0, HashSet::len)
    }

    pub fn scope_iter(&self, observer: &ObserverKey) -> Option<hash_set::Iter<'_, InstanceId>> {
        self.scopes.get(observer).map(|scope| scope.iter())
    }

    /// Whether any observer still holds the instance
    #[cfg(test)]
    pub fn is_held(&self, id: &InstanceId) -> bool {
        self.scopes.values().any(|scope| scope.contains(id))
    }

    #[cfg(test)]
    pub fn observer_count(&self) -> usize {
        self.scopes.len()
    }
}
