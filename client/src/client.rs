use std::{collections::HashMap, mem, sync::Arc};

use log::{trace, warn};

use lumen_shared::{
    BitReader, BoxedEffect, EffectBehavior, EffectCategory, EffectDecodeError, EffectGroup,
    EffectInstance, EffectMessage, EffectProtocol, InstanceId, NetId, RegistryError,
    TypeRegistry,
};

use crate::{client_events::ClientEvents, ClientError};

/// Mirrors the instances a server has put in this client's scope.
///
/// The protocol must have been built with the same registrations, in the
/// same order, as the server's.
pub struct EffectClient {
    protocol: EffectProtocol,
    effects: HashMap<InstanceId, EffectInstance<BoxedEffect>>,
    groups: HashMap<InstanceId, EffectInstance<EffectGroup>>,
    events: ClientEvents,
}

impl EffectClient {
    /// Create a new EffectClient. The protocol is locked if it isn't already.
    pub fn new(mut protocol: EffectProtocol) -> Self {
        if !protocol.is_locked() {
            protocol.lock();
        }

        Self {
            protocol,
            effects: HashMap::new(),
            groups: HashMap::new(),
            events: ClientEvents::new(),
        }
    }

    /// Reads and applies one encoded message
    pub fn receive_bytes(&mut self, bytes: &[u8]) -> Result<(), ClientError> {
        let message = EffectMessage::from_bytes(bytes)?;
        self.receive(message)
    }

    /// Applies one message. CREATE and UPDATE replace the mirrored instance
    /// with the full state they carry; an UPDATE for an instance not yet
    /// mirrored creates it.
    pub fn receive(&mut self, message: EffectMessage) -> Result<(), ClientError> {
        trace!("received {:?}", message.message_type());
        match message {
            EffectMessage::Create {
                category,
                net_id,
                instance_id,
                state,
            }
            | EffectMessage::Update {
                category,
                net_id,
                instance_id,
                state,
            } => self.apply_state(category, net_id, instance_id, &state),
            EffectMessage::Remove {
                category,
                instance_id,
                ..
            } => self.apply_remove(category, instance_id),
        }
    }

    fn apply_state(
        &mut self,
        category: EffectCategory,
        net_id: NetId,
        id: InstanceId,
        state: &[u8],
    ) -> Result<(), ClientError> {
        let existed = match category {
            EffectCategory::Effect => {
                let instance = decode_instance(self.protocol.effects(), net_id, id, state)?;
                self.effects.insert(id, instance).is_some()
            }
            EffectCategory::Group => {
                let instance = decode_instance(self.protocol.groups(), net_id, id, state)?;
                self.groups.insert(id, instance).is_some()
            }
        };

        if existed {
            self.events.push_update(category, id);
        } else {
            self.events.push_create(category, id);
        }
        Ok(())
    }

    fn apply_remove(&mut self, category: EffectCategory, id: InstanceId) -> Result<(), ClientError> {
        let removed = match category {
            EffectCategory::Effect => self.effects.remove(&id).is_some(),
            EffectCategory::Group => self.groups.remove(&id).is_some(),
        };

        if !removed {
            warn!("REMOVE for unknown {:?} instance {:?}", category, id);
            return Err(ClientError::UnknownInstance { category, id });
        }
        self.events.push_remove(category, id);
        Ok(())
    }

    // Accessors

    pub fn effect(&self, id: &InstanceId) -> Option<&EffectInstance<BoxedEffect>> {
        self.effects.get(id)
    }

    pub fn group(&self, id: &InstanceId) -> Option<&EffectInstance<EffectGroup>> {
        self.groups.get(id)
    }

    pub fn has_instance(&self, category: EffectCategory, id: &InstanceId) -> bool {
        match category {
            EffectCategory::Effect => self.effects.contains_key(id),
            EffectCategory::Group => self.groups.contains_key(id),
        }
    }

    /// Mirrored instance ids of a category, sorted
    pub fn instance_ids(&self, category: EffectCategory) -> Vec<InstanceId> {
        let mut ids: Vec<InstanceId> = match category {
            EffectCategory::Effect => self.effects.keys().copied().collect(),
            EffectCategory::Group => self.groups.keys().copied().collect(),
        };
        ids.sort();
        ids
    }

    pub fn len(&self, category: EffectCategory) -> usize {
        match category {
            EffectCategory::Effect => self.effects.len(),
            EffectCategory::Group => self.groups.len(),
        }
    }

    pub fn protocol(&self) -> &EffectProtocol {
        &self.protocol
    }

    /// Events queued since the last call
    pub fn take_events(&mut self) -> ClientEvents {
        mem::take(&mut self.events)
    }
}

fn decode_instance<B: EffectBehavior>(
    registry: &Arc<TypeRegistry<B>>,
    net_id: NetId,
    id: InstanceId,
    state: &[u8],
) -> Result<EffectInstance<B>, ClientError> {
    let mut reader = BitReader::new(state);
    let instance = EffectInstance::read(&mut reader, |reader| registry.decode(net_id, reader))
        .inspect_err(|error| {
            if let EffectDecodeError::Registry(RegistryError::NetIdNotFound { registry, net_id }) = error {
                warn!("unknown type id {} in {} registry", net_id, registry);
            }
        })?;

    if instance.id() != id {
        return Err(ClientError::InstanceIdMismatch {
            expected: id,
            found: instance.id(),
        });
    }
    Ok(instance)
}
