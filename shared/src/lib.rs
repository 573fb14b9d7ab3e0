//! # Lumen Shared
//! Common functionality shared between lumen-server & lumen-client crates:
//! effect instances and their lifecycle, type registries, the scene and
//! transport seams, and the synchronization messages.

#![deny(trivial_numeric_casts, unstable_features, unused_import_braces)]

pub use lumen_serde::{
    BitCounter, BitReader, BitWrite, BitWriter, Serde, SerdeErr, SerdeInteger, UnsignedInteger,
    UnsignedVariableInteger,
};

mod constants;
mod effect;
mod messages;
mod position;
mod protocol;
mod scene;
mod transport;
mod types;

pub use constants::{
    DEFAULT_MAX_INSTANCES, DEFAULT_MAX_SENDS_PER_TICK, DEFAULT_SHARD_COUNT,
    DEFAULT_VISIBLE_RANGE, LOD_BANDS, LOD_FAR_INTERVAL, SIMULATION_THROTTLE_RATIO,
};
pub use effect::{
    BoxedEffect, EffectBehavior, EffectContext, EffectDecodeError, EffectGroup, EffectInstance,
    EffectKind, EffectSpec, GroupMember, StepOutcome,
};
pub use messages::{EffectMessage, EffectMessageType};
pub use position::Position;
pub use protocol::{
    new_decoder, Decoder, EffectProtocol, ProtocolError, RegistryError, TypeRegistry,
};
pub use scene::Scene;
pub use transport::{EffectChannel, EffectChannelReceiver, Transport};
pub use types::{EffectCategory, InstanceId, NetId, ObserverKey, RegionKey, Tick};
