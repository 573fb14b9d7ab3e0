use lumen_serde::{BitReader, BitWrite, SerdeErr};

use crate::{Position, Tick};

/// Type-specific part of an effect instance: what it computes each tick and
/// how its opaque payload is written. The lifecycle around it (counters,
/// expiry, distance throttling) is handled by `EffectInstance`.
pub trait EffectBehavior: Send + Sync + 'static {
    /// Stable key this type is registered under
    fn type_key(&self) -> &str;

    /// Runs one simulation step
    fn step(&mut self, context: &mut EffectContext);

    /// Writes the type-specific payload
    fn write(&self, writer: &mut dyn BitWrite);
}

/// A concrete effect type that can be registered and read back
pub trait EffectKind: EffectBehavior + Sized {
    const TYPE_KEY: &'static str;

    fn read(reader: &mut BitReader) -> Result<Self, SerdeErr>;
}

pub type BoxedEffect = Box<dyn EffectBehavior>;

impl EffectBehavior for BoxedEffect {
    fn type_key(&self) -> &str {
        self.as_ref().type_key()
    }

    fn step(&mut self, context: &mut EffectContext) {
        self.as_mut().step(context);
    }

    fn write(&self, writer: &mut dyn BitWrite) {
        self.as_ref().write(writer);
    }
}

/// What a behavior may see and change about its instance during a step
pub struct EffectContext<'a> {
    tick: Tick,
    position: &'a mut Position,
    cancel_requested: bool,
}

impl<'a> EffectContext<'a> {
    pub fn new(tick: Tick, position: &'a mut Position) -> Self {
        Self {
            tick,
            position,
            cancel_requested: false,
        }
    }

    /// The instance's tick counter before this step
    pub fn tick(&self) -> Tick {
        self.tick
    }

    pub fn position(&self) -> Position {
        *self.position
    }

    pub fn set_position(&mut self, position: Position) {
        *self.position = position;
    }

    /// Ends the instance. Observers are told on the owning manager's next sweep.
    pub fn cancel(&mut self) {
        self.cancel_requested = true;
    }

    pub fn cancel_requested(&self) -> bool {
        self.cancel_requested
    }
}
