mod behavior;
mod error;
mod group;
mod instance;

pub use behavior::{BoxedEffect, EffectBehavior, EffectContext, EffectKind};
pub use error::EffectDecodeError;
pub use group::{EffectGroup, GroupMember};
pub use instance::{EffectInstance, EffectSpec, StepOutcome};
