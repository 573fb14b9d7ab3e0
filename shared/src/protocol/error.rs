use thiserror::Error;

use crate::NetId;

/// Errors that can occur during protocol operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProtocolError {
    /// Protocol is locked and cannot be modified
    #[error("Protocol is already locked and cannot be modified. EffectProtocol.lock() has been called and no further types may be registered")]
    AlreadyLocked,

    /// A registry rejected a registration
    #[error(transparent)]
    Registry(#[from] RegistryError),
}

/// Errors that can occur while resolving type keys and type ids
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// Network ID not found in registry
    #[error("Type net ID {net_id} not found in {registry} registry. Every endpoint must register the same types in the same order")]
    NetIdNotFound { registry: &'static str, net_id: NetId },

    /// Type key not found in registry
    #[error("Type key '{key}' not registered in {registry} registry. Must call `register()` during protocol initialization")]
    KeyNotFound { registry: &'static str, key: String },

    /// Registry has handed out every available id
    #[error("{registry} registry is full, cannot register '{key}'")]
    Full { registry: &'static str, key: String },
}
