use lumen_serde::{BitReader, BitWrite, Serde, SerdeErr, UnsignedVariableInteger};

pub type Tick = u32;
/// Dense, registration-ordered alias of a type key, kept compact on the wire
pub type NetId = u16;

// InstanceId
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug, PartialOrd, Ord)]
pub struct InstanceId(u64);

impl InstanceId {
    pub fn from_u64(value: u64) -> Self {
        Self(value)
    }

    pub fn to_u64(&self) -> u64 {
        self.0
    }
}

impl Serde for InstanceId {
    fn ser(&self, writer: &mut dyn BitWrite) {
        UnsignedVariableInteger::<7>::new(self.0).ser(writer);
    }

    fn de(reader: &mut BitReader) -> Result<Self, SerdeErr> {
        Ok(Self(UnsignedVariableInteger::<7>::de(reader)?.get()))
    }
}

// ObserverKey
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug, PartialOrd, Ord)]
pub struct ObserverKey(u64);

impl ObserverKey {
    pub fn from_u64(value: u64) -> Self {
        Self(value)
    }

    pub fn to_u64(&self) -> u64 {
        self.0
    }
}

// RegionKey
/// Identifies the scene region an instance lives in. Observers only ever see
/// instances of a region they are in.
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug, Default)]
pub struct RegionKey(u32);

impl RegionKey {
    pub fn from_u32(value: u32) -> Self {
        Self(value)
    }

    pub fn to_u32(&self) -> u32 {
        self.0
    }
}

impl Serde for RegionKey {
    fn ser(&self, writer: &mut dyn BitWrite) {
        UnsignedVariableInteger::<7>::new(self.0).ser(writer);
    }

    fn de(reader: &mut BitReader) -> Result<Self, SerdeErr> {
        let value = UnsignedVariableInteger::<7>::de(reader)?.get();
        let value = u32::try_from(value).map_err(|_| SerdeErr::InvalidValue {
            type_name: "RegionKey",
            detail: format!("{} does not fit in 32 bits", value),
        })?;
        Ok(Self(value))
    }
}

/// The two flavors of synchronized instance. Each category has its own type
/// registry, so type ids are only meaningful together with their category.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EffectCategory {
    /// Free-standing effect instances
    Effect,
    /// Grouped, composite effect instances
    Group,
}

impl Serde for EffectCategory {
    fn ser(&self, writer: &mut dyn BitWrite) {
        writer.write_bit(matches!(self, EffectCategory::Group));
    }

    fn de(reader: &mut BitReader) -> Result<Self, SerdeErr> {
        if reader.read_bit()? {
            Ok(EffectCategory::Group)
        } else {
            Ok(EffectCategory::Effect)
        }
    }
}
