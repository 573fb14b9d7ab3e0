use std::sync::Arc;

use lumen_serde::{BitWrite, Serde, SerdeErr, UnsignedVariableInteger};

use crate::{
    protocol::type_registry::{new_decoder, Decoder, TypeRegistry},
    NetId, RegistryError,
};

use super::{BoxedEffect, EffectBehavior, EffectContext};

/// One member effect of a group, tagged with its id in the free-standing
/// effect registry so the group can be decoded on the other end.
pub struct GroupMember {
    net_id: NetId,
    behavior: BoxedEffect,
}

impl GroupMember {
    pub fn net_id(&self) -> NetId {
        self.net_id
    }

    pub fn behavior(&self) -> &BoxedEffect {
        &self.behavior
    }
}

/// A composite effect: several member behaviors sharing one lifecycle.
/// Members are stepped in order every time the group steps.
pub struct EffectGroup {
    type_key: String,
    members: Vec<GroupMember>,
}

impl EffectGroup {
    pub fn new(type_key: &str) -> Self {
        Self {
            type_key: type_key.to_string(),
            members: Vec::new(),
        }
    }

    /// Adds a member, resolving its type id through the member registry
    pub fn try_add_member(
        &mut self,
        members: &TypeRegistry<BoxedEffect>,
        behavior: BoxedEffect,
    ) -> Result<(), RegistryError> {
        let net_id = members.try_id_by_key(behavior.type_key())?;
        self.members.push(GroupMember { net_id, behavior });
        Ok(())
    }

    pub fn with_member(
        mut self,
        members: &TypeRegistry<BoxedEffect>,
        behavior: BoxedEffect,
    ) -> Result<Self, RegistryError> {
        self.try_add_member(members, behavior)?;
        Ok(self)
    }

    pub fn members(&self) -> &[GroupMember] {
        &self.members
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Decoder for groups registered under `type_key`, reading members
    /// through the free-standing effect registry
    pub fn decoder(type_key: &str, members: Arc<TypeRegistry<BoxedEffect>>) -> Decoder<EffectGroup> {
        let type_key = type_key.to_string();
        new_decoder(move |reader| {
            let count = UnsignedVariableInteger::<5>::de(reader)?.get() as usize;
            if count > reader.bits_remaining() {
                return Err(SerdeErr::InvalidValue {
                    type_name: "EffectGroup",
                    detail: format!("member count {} exceeds remaining buffer", count),
                }
                .into());
            }

            let mut group = EffectGroup::new(&type_key);
            for _ in 0..count {
                let raw_net_id = UnsignedVariableInteger::<7>::de(reader)?.get();
                let net_id = NetId::try_from(raw_net_id).map_err(|_| SerdeErr::InvalidValue {
                    type_name: "NetId",
                    detail: format!("{} does not fit in 16 bits", raw_net_id),
                })?;
                let behavior = members.decode(net_id, reader)?;
                group.members.push(GroupMember { net_id, behavior });
            }
            Ok(group)
        })
    }
}

impl EffectBehavior for EffectGroup {
    fn type_key(&self) -> &str {
        &self.type_key
    }

    fn step(&mut self, context: &mut EffectContext) {
        for member in self.members.iter_mut() {
            member.behavior.step(context);
        }
    }

    fn write(&self, writer: &mut dyn BitWrite) {
        UnsignedVariableInteger::<5>::new(self.members.len() as u64).ser(writer);
        for member in &self.members {
            UnsignedVariableInteger::<7>::new(member.net_id).ser(writer);
            member.behavior.write(writer);
        }
    }
}
