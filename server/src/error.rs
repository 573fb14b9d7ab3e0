use thiserror::Error;

use lumen_shared::{EffectCategory, InstanceId};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ServerError {
    /// Spawning would exceed the manager's instance cap
    #[error("Cannot spawn {category:?} instance: {max_instances} instances already live")]
    CapacityReached {
        category: EffectCategory,
        max_instances: usize,
    },

    /// No live instance has this id
    #[error("{category:?} instance {id:?} does not exist or has already been removed")]
    UnknownInstance {
        category: EffectCategory,
        id: InstanceId,
    },
}
