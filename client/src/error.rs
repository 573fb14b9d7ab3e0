use thiserror::Error;

use lumen_shared::{EffectCategory, EffectDecodeError, InstanceId, SerdeErr};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    /// The message itself could not be read
    #[error("Failed to read effect message: {0}")]
    Serde(#[from] SerdeErr),

    /// The instance state in a CREATE or UPDATE could not be decoded
    #[error("Failed to decode instance state: {0}")]
    Decode(#[from] EffectDecodeError),

    /// A REMOVE arrived for an instance this client does not mirror
    #[error("{category:?} instance {id:?} is not mirrored by this client")]
    UnknownInstance {
        category: EffectCategory,
        id: InstanceId,
    },

    /// The encoded state belongs to a different instance than the message names
    #[error("Message for instance {expected:?} carried state of instance {found:?}")]
    InstanceIdMismatch {
        expected: InstanceId,
        found: InstanceId,
    },
}
