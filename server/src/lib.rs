//! # Lumen Server
//! Runs effect instances and keeps every connected observer informed of the
//! ones currently relevant to it, throttling simulation and traffic by
//! distance and by a per-tick send budget.

#![deny(
    trivial_casts,
    trivial_numeric_casts,
    unstable_features,
    unused_import_braces
)]

pub mod shared {
    pub use lumen_shared::{
        BitReader, BitWrite, BitWriter, EffectChannel, EffectChannelReceiver, Serde, SerdeErr,
        UnsignedInteger, UnsignedVariableInteger,
    };
}

mod error;
mod events;
mod interest;
mod observer_scope;
mod server;

pub use error::ServerError;
pub use events::{InterestEvent, InterestEvents, RemoveEvent, RemoveReason, SpawnEvent};
pub use interest::{
    lod_interval, InstanceSnapshot, InstanceSnapshots, InterestManager, ObserverDirectory,
    SendBudget, SyncStats,
};
pub use observer_scope::ObserverScopeRef;
pub use server::{EffectServer, InterestConfig, ServerConfig};
