mod effect_message;

pub use effect_message::{EffectMessage, EffectMessageType};
