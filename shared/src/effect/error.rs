use thiserror::Error;

use lumen_serde::SerdeErr;

use crate::RegistryError;

/// Errors that can occur while reconstructing an effect instance from its
/// encoded state
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EffectDecodeError {
    /// The encoded state was truncated or malformed
    #[error("Failed to read effect state: {0}")]
    Serde(#[from] SerdeErr),

    /// The state references a type this endpoint never registered
    #[error(transparent)]
    Registry(#[from] RegistryError),
}
