use lumen_serde::{
    BitReader, BitWrite, BitWriter, Serde, SerdeErr, UnsignedInteger, UnsignedVariableInteger,
};

use crate::{EffectCategory, InstanceId, NetId};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EffectMessageType {
    Create,
    Update,
    Remove,
}

impl Serde for EffectMessageType {
    fn ser(&self, writer: &mut dyn BitWrite) {
        let index: u8 = match self {
            EffectMessageType::Create => 0,
            EffectMessageType::Update => 1,
            EffectMessageType::Remove => 2,
        };
        UnsignedInteger::<2>::new(index).ser(writer);
    }

    fn de(reader: &mut BitReader) -> Result<Self, SerdeErr> {
        match UnsignedInteger::<2>::de(reader)?.get() {
            0 => Ok(EffectMessageType::Create),
            1 => Ok(EffectMessageType::Update),
            2 => Ok(EffectMessageType::Remove),
            other => Err(SerdeErr::InvalidValue {
                type_name: "EffectMessageType",
                detail: format!("unknown message type {}", other),
            }),
        }
    }
}

/// A synchronization message for one (observer, instance) pair.
///
/// `Create` and `Update` always carry the instance's full encoded state,
/// there are no partial updates.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EffectMessage {
    Create {
        category: EffectCategory,
        net_id: NetId,
        instance_id: InstanceId,
        state: Vec<u8>,
    },
    Update {
        category: EffectCategory,
        net_id: NetId,
        instance_id: InstanceId,
        state: Vec<u8>,
    },
    Remove {
        category: EffectCategory,
        net_id: NetId,
        instance_id: InstanceId,
    },
}

impl EffectMessage {
    pub fn message_type(&self) -> EffectMessageType {
        match self {
            EffectMessage::Create { .. } => EffectMessageType::Create,
            EffectMessage::Update { .. } => EffectMessageType::Update,
            EffectMessage::Remove { .. } => EffectMessageType::Remove,
        }
    }

    pub fn category(&self) -> EffectCategory {
        match self {
            EffectMessage::Create { category, .. }
            | EffectMessage::Update { category, .. }
            | EffectMessage::Remove { category, .. } => *category,
        }
    }

    pub fn net_id(&self) -> NetId {
        match self {
            EffectMessage::Create { net_id, .. }
            | EffectMessage::Update { net_id, .. }
            | EffectMessage::Remove { net_id, .. } => *net_id,
        }
    }

    pub fn instance_id(&self) -> InstanceId {
        match self {
            EffectMessage::Create { instance_id, .. }
            | EffectMessage::Update { instance_id, .. }
            | EffectMessage::Remove { instance_id, .. } => *instance_id,
        }
    }

    /// Full encoded instance state, `None` for `Remove`
    pub fn state(&self) -> Option<&[u8]> {
        match self {
            EffectMessage::Create { state, .. } | EffectMessage::Update { state, .. } => {
                Some(state)
            }
            EffectMessage::Remove { .. } => None,
        }
    }

    pub fn is_create(&self) -> bool {
        matches!(self, EffectMessage::Create { .. })
    }

    pub fn is_update(&self) -> bool {
        matches!(self, EffectMessage::Update { .. })
    }

    pub fn is_remove(&self) -> bool {
        matches!(self, EffectMessage::Remove { .. })
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut writer = BitWriter::new();
        self.ser(&mut writer);
        writer.to_bytes()
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SerdeErr> {
        let mut reader = BitReader::new(bytes);
        Self::de(&mut reader)
    }
}

impl Serde for EffectMessage {
    fn ser(&self, writer: &mut dyn BitWrite) {
        self.message_type().ser(writer);
        self.category().ser(writer);
        UnsignedVariableInteger::<7>::new(self.net_id()).ser(writer);
        self.instance_id().ser(writer);
        if let Some(state) = self.state() {
            UnsignedVariableInteger::<7>::new(state.len() as u64).ser(writer);
            writer.write_bytes(state);
        }
    }

    fn de(reader: &mut BitReader) -> Result<Self, SerdeErr> {
        let message_type = EffectMessageType::de(reader)?;
        let category = EffectCategory::de(reader)?;
        let raw_net_id = UnsignedVariableInteger::<7>::de(reader)?.get();
        let net_id = NetId::try_from(raw_net_id).map_err(|_| SerdeErr::InvalidValue {
            type_name: "NetId",
            detail: format!("{} does not fit in 16 bits", raw_net_id),
        })?;
        let instance_id = InstanceId::de(reader)?;

        match message_type {
            EffectMessageType::Remove => Ok(EffectMessage::Remove {
                category,
                net_id,
                instance_id,
            }),
            EffectMessageType::Create | EffectMessageType::Update => {
                let length = UnsignedVariableInteger::<7>::de(reader)?.get() as usize;
                let state = reader.read_bytes(length)?;
                if message_type == EffectMessageType::Create {
                    Ok(EffectMessage::Create {
                        category,
                        net_id,
                        instance_id,
                        state,
                    })
                } else {
                    Ok(EffectMessage::Update {
                        category,
                        net_id,
                        instance_id,
                        state,
                    })
                }
            }
        }
    }
}
