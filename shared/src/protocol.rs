use std::sync::Arc;

use crate::{
    effect::{BoxedEffect, EffectGroup, EffectKind},
    EffectCategory, NetId,
};

pub mod error;
pub mod type_registry;

pub use error::{ProtocolError, RegistryError};
pub use type_registry::{new_decoder, Decoder, TypeRegistry};

// EffectProtocol

/// The set of effect and group types both endpoints agree on.
///
/// Types get their ids in registration order, so server and client must
/// build their protocols identically.
pub struct EffectProtocol {
    effects: Arc<TypeRegistry<BoxedEffect>>,
    groups: Arc<TypeRegistry<EffectGroup>>,
    locked: bool,
}

impl Default for EffectProtocol {
    fn default() -> Self {
        Self {
            effects: Arc::new(TypeRegistry::new("effect")),
            groups: Arc::new(TypeRegistry::new("group")),
            locked: false,
        }
    }
}

impl EffectProtocol {
    pub fn builder() -> Self {
        Self::default()
    }

    pub fn add_effect<T: EffectKind>(&mut self) -> &mut Self {
        self.check_lock();
        self.effects.register_effect::<T>();
        self
    }

    /// Adds a group type. Its members are read through this protocol's
    /// effect registry, so member types must be added as effects too.
    pub fn add_group(&mut self, type_key: &str) -> &mut Self {
        self.check_lock();
        self.groups
            .register(type_key, EffectGroup::decoder(type_key, self.effects.clone()));
        self
    }

    // Non-panicking builder methods

    pub fn try_add_effect<T: EffectKind>(&mut self) -> Result<&mut Self, ProtocolError> {
        self.try_check_lock()?;
        self.effects.try_register_effect::<T>()?;
        Ok(self)
    }

    pub fn try_add_group(&mut self, type_key: &str) -> Result<&mut Self, ProtocolError> {
        self.try_check_lock()?;
        self.groups
            .try_register(type_key, EffectGroup::decoder(type_key, self.effects.clone()))?;
        Ok(self)
    }

    pub fn try_lock(&mut self) -> Result<(), ProtocolError> {
        self.try_check_lock()?;
        self.locked = true;
        Ok(())
    }

    pub fn lock(&mut self) {
        self.check_lock();
        self.locked = true;
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    /// Returns Err if the protocol is locked
    pub fn try_check_lock(&self) -> Result<(), ProtocolError> {
        if self.locked {
            Err(ProtocolError::AlreadyLocked)
        } else {
            Ok(())
        }
    }

    /// Panics if the protocol is locked
    pub fn check_lock(&self) {
        if self.locked {
            panic!("Protocol already locked!");
        }
    }

    pub fn build(&mut self) -> Self {
        std::mem::take(self)
    }

    // Lookups

    pub fn effects(&self) -> &Arc<TypeRegistry<BoxedEffect>> {
        &self.effects
    }

    pub fn groups(&self) -> &Arc<TypeRegistry<EffectGroup>> {
        &self.groups
    }

    pub fn id_by_key(&self, category: EffectCategory, key: &str) -> Option<NetId> {
        match category {
            EffectCategory::Effect => self.effects.id_by_key(key),
            EffectCategory::Group => self.groups.id_by_key(key),
        }
    }

    pub fn key_by_id(&self, category: EffectCategory, net_id: NetId) -> Option<String> {
        match category {
            EffectCategory::Effect => self.effects.key_by_id(net_id),
            EffectCategory::Group => self.groups.key_by_id(net_id),
        }
    }
}
