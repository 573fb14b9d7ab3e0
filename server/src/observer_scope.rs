use lumen_shared::{InstanceId, ObserverKey};

use crate::interest::ObserverDirectory;

/// Read-only view of the instances one observer currently has visible
pub struct ObserverScopeRef<'s> {
    directory: &'s ObserverDirectory,
    key: ObserverKey,
}

impl<'s> ObserverScopeRef<'s> {
    pub(crate) fn new(directory: &'s ObserverDirectory, key: &ObserverKey) -> Self {
        Self {
            directory,
            key: *key,
        }
    }

    pub fn key(&self) -> ObserverKey {
        self.key
    }

    /// Returns true if the observer's scope contains the instance
    pub fn has(&self, id: &InstanceId) -> bool {
        self.directory.has(&self.key, id)
    }

    pub fn len(&self) -> usize {
        self.directory.scope_len(&self.key)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Visible instance ids, in no particular order
    pub fn iter(&self) -> impl Iterator<Item = &'s InstanceId> {
        self.directory
            .scope_iter(&self.key)
            .into_iter()
            .flatten()
    }
}
