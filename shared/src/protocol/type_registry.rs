use std::{
    collections::HashMap,
    sync::{Arc, PoisonError, RwLock},
};

use log::info;

use lumen_serde::BitReader;

use crate::{
    effect::{BoxedEffect, EffectDecodeError, EffectKind},
    NetId,
};

use super::error::RegistryError;

/// Reconstructs a type's payload from a bit stream
pub type Decoder<B> = Arc<dyn Fn(&mut BitReader) -> Result<B, EffectDecodeError> + Send + Sync>;

pub fn new_decoder<B, F>(decode: F) -> Decoder<B>
where
    F: Fn(&mut BitReader) -> Result<B, EffectDecodeError> + Send + Sync + 'static,
{
    Arc::new(decode)
}

struct RegistryEntry<B> {
    key: String,
    decoder: Decoder<B>,
}

struct RegistryInner<B> {
    net_ids: HashMap<String, NetId>,
    entries: Vec<RegistryEntry<B>>,
}

/// Maps stable type keys to dense `NetId`s, assigned in first-registration
/// order, and to the decoder for that type.
///
/// Ids are only meaningful if every communicating endpoint registers the same
/// keys in the same order.
///
/// Registration takes `&self`: the registry is shared behind an `Arc` and
/// lookups may run on any thread while another thread registers.
pub struct TypeRegistry<B> {
    name: &'static str,
    inner: RwLock<RegistryInner<B>>,
}

impl<B> TypeRegistry<B> {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            inner: RwLock::new(RegistryInner {
                net_ids: HashMap::new(),
                entries: Vec::new(),
            }),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Registers a key, returning its id. Registering a key again keeps its
    /// id and replaces only the decoder.
    pub fn register(&self, key: &str, decoder: Decoder<B>) -> NetId {
        match self.try_register(key, decoder) {
            Ok(net_id) => net_id,
            Err(error) => panic!("{}", error),
        }
    }

    pub fn try_register(&self, key: &str, decoder: Decoder<B>) -> Result<NetId, RegistryError> {
        let mut inner = self.inner.write().unwrap_or_else(PoisonError::into_inner);

        if let Some(net_id) = inner.net_ids.get(key).copied() {
            inner.entries[net_id as usize].decoder = decoder;
            return Ok(net_id);
        }

        let Ok(net_id) = NetId::try_from(inner.entries.len()) else {
            return Err(RegistryError::Full {
                registry: self.name,
                key: key.to_string(),
            });
        };

        info!("{} registry: registering type '{}' as {}", self.name, key, net_id);
        inner.net_ids.insert(key.to_string(), net_id);
        inner.entries.push(RegistryEntry {
            key: key.to_string(),
            decoder,
        });

        Ok(net_id)
    }

    pub fn id_by_key(&self, key: &str) -> Option<NetId> {
        let inner = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        inner.net_ids.get(key).copied()
    }

    pub fn key_by_id(&self, net_id: NetId) -> Option<String> {
        let inner = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        inner
            .entries
            .get(net_id as usize)
            .map(|entry| entry.key.clone())
    }

    pub fn try_id_by_key(&self, key: &str) -> Result<NetId, RegistryError> {
        self.id_by_key(key).ok_or_else(|| RegistryError::KeyNotFound {
            registry: self.name,
            key: key.to_string(),
        })
    }

    pub fn decoder(&self, net_id: NetId) -> Option<Decoder<B>> {
        let inner = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        inner
            .entries
            .get(net_id as usize)
            .map(|entry| entry.decoder.clone())
    }

    /// Reads one payload of the given type. The decoder runs outside the lock.
    pub fn decode(&self, net_id: NetId, reader: &mut BitReader) -> Result<B, EffectDecodeError> {
        let Some(decoder) = self.decoder(net_id) else {
            return Err(RegistryError::NetIdNotFound {
                registry: self.name,
                net_id,
            }
            .into());
        };
        decoder(reader)
    }

    /// Registered keys, in id order
    pub fn keys(&self) -> Vec<String> {
        let inner = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        inner.entries.iter().map(|entry| entry.key.clone()).collect()
    }

    pub fn len(&self) -> usize {
        let inner = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        inner.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl TypeRegistry<BoxedEffect> {
    /// Registers an effect type under its `TYPE_KEY`
    pub fn register_effect<T: EffectKind>(&self) -> NetId {
        self.register(T::TYPE_KEY, effect_decoder::<T>())
    }

    pub fn try_register_effect<T: EffectKind>(&self) -> Result<NetId, RegistryError> {
        self.try_register(T::TYPE_KEY, effect_decoder::<T>())
    }
}

fn effect_decoder<T: EffectKind>() -> Decoder<BoxedEffect> {
    new_decoder(|reader| {
        let effect: BoxedEffect = Box::new(T::read(reader)?);
        Ok(effect)
    })
}
