//! # Lumen Client
//! Mirrors the effect instances a server has put in scope, applying the
//! CREATE, UPDATE and REMOVE messages it sends.

#![deny(
    trivial_casts,
    trivial_numeric_casts,
    unstable_features,
    unused_import_braces
)]

pub mod shared {
    pub use lumen_shared::{BitReader, BitWrite, BitWriter, Serde, SerdeErr};
}

mod client;
mod client_events;
mod error;

pub use client::EffectClient;
pub use client_events::{ClientEvent, ClientEvents, CreateEvent, RemoveEvent, UpdateEvent};
pub use error::ClientError;
