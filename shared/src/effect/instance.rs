use lumen_serde::{BitReader, BitWrite, BitWriter, Serde, UnsignedVariableInteger};

use crate::{
    constants::{DEFAULT_VISIBLE_RANGE, SIMULATION_THROTTLE_RATIO},
    scene::Scene,
    InstanceId, Position, RegionKey, Tick,
};

use super::{behavior::EffectContext, EffectBehavior, EffectDecodeError};

/// Spawn parameters for an effect instance
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EffectSpec {
    pub region: RegionKey,
    pub position: Position,
    /// Radius within which observers may perceive the instance
    pub visible_range: f32,
    /// Tick count at which the instance expires, 0 for no expiry
    pub max_tick: Tick,
    /// Minimum spacing between simulation steps while only distant
    /// observers are present
    pub throttle_interval: u32,
}

impl Default for EffectSpec {
    fn default() -> Self {
        Self {
            region: RegionKey::default(),
            position: Position::ORIGIN,
            visible_range: DEFAULT_VISIBLE_RANGE,
            max_tick: 0,
            throttle_interval: 1,
        }
    }
}

impl EffectSpec {
    pub fn new(position: Position, visible_range: f32) -> Self {
        Self {
            position,
            visible_range,
            ..Self::default()
        }
    }

    pub fn region(mut self, region: RegionKey) -> Self {
        self.region = region;
        self
    }

    pub fn max_tick(mut self, max_tick: Tick) -> Self {
        self.max_tick = max_tick;
        self
    }

    pub fn throttle_interval(mut self, throttle_interval: u32) -> Self {
        self.throttle_interval = throttle_interval;
        self
    }
}

/// Which branch an instance's tick took
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepOutcome {
    /// Already canceled, nothing happened
    Idle,
    /// No observer within range, behavior skipped
    Dormant,
    /// Only distant observers, behavior skipped on this off-tick
    Throttled,
    /// Behavior ran
    Stepped,
}

/// One simulated, networked effect object: lifecycle state plus its
/// type-specific behavior.
pub struct EffectInstance<B> {
    id: InstanceId,
    region: RegionKey,
    position: Position,
    visible_range: f32,
    tick_counter: Tick,
    max_tick: Tick,
    canceled: bool,
    throttle_interval: u32,
    behavior: B,
}

impl<B: EffectBehavior> EffectInstance<B> {
    pub fn new(id: InstanceId, spec: EffectSpec, behavior: B) -> Self {
        Self {
            id,
            region: spec.region,
            position: spec.position,
            visible_range: spec.visible_range,
            tick_counter: 0,
            max_tick: spec.max_tick,
            canceled: false,
            throttle_interval: spec.throttle_interval.max(1),
            behavior,
        }
    }

    // Accessors

    pub fn id(&self) -> InstanceId {
        self.id
    }

    pub fn type_key(&self) -> &str {
        self.behavior.type_key()
    }

    pub fn region(&self) -> RegionKey {
        self.region
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn set_position(&mut self, position: Position) {
        self.position = position;
    }

    pub fn visible_range(&self) -> f32 {
        self.visible_range
    }

    pub fn tick_counter(&self) -> Tick {
        self.tick_counter
    }

    pub fn max_tick(&self) -> Tick {
        self.max_tick
    }

    pub fn throttle_interval(&self) -> u32 {
        self.throttle_interval
    }

    pub fn is_canceled(&self) -> bool {
        self.canceled
    }

    pub fn behavior(&self) -> &B {
        &self.behavior
    }

    pub fn behavior_mut(&mut self) -> &mut B {
        &mut self.behavior
    }

    /// Marks the instance canceled. Cancellation is permanent; the owning
    /// manager tells observers on its next sweep.
    pub fn cancel(&mut self) {
        self.canceled = true;
    }

    // Simulation

    /// Advances the instance by one tick, asking the scene how far away the
    /// nearest observer is.
    pub fn tick<S: Scene + ?Sized>(&mut self, scene: &S) -> StepOutcome {
        if self.canceled {
            return StepOutcome::Idle;
        }
        let nearest = scene.nearest_observer_distance(&self.region, &self.position);
        self.advance(nearest)
    }

    /// Advances the instance by one tick given the distance to its nearest
    /// observer (`None` when there is no observer at all).
    pub fn advance(&mut self, nearest_observer: Option<f32>) -> StepOutcome {
        if self.canceled {
            return StepOutcome::Idle;
        }

        let nearest = nearest_observer.unwrap_or(f32::INFINITY);

        let outcome = if nearest > self.visible_range {
            StepOutcome::Dormant
        } else if nearest > self.visible_range * SIMULATION_THROTTLE_RATIO
            && self.throttle_interval > 1
            && self.tick_counter % self.throttle_interval != 0
        {
            StepOutcome::Throttled
        } else {
            let mut context = EffectContext::new(self.tick_counter, &mut self.position);
            self.behavior.step(&mut context);
            if context.cancel_requested() {
                self.canceled = true;
            }
            StepOutcome::Stepped
        };

        // counters advance on every branch, lifetime is independent of visibility
        self.tick_counter = self.tick_counter.saturating_add(1);
        if self.max_tick > 0 && self.tick_counter >= self.max_tick {
            self.canceled = true;
        }

        outcome
    }

    // Encoding

    /// Writes the full lifecycle header followed by the behavior's payload
    pub fn write(&self, writer: &mut dyn BitWrite) {
        self.id.ser(writer);
        self.region.ser(writer);
        UnsignedVariableInteger::<7>::new(self.tick_counter).ser(writer);
        UnsignedVariableInteger::<7>::new(self.max_tick).ser(writer);
        self.canceled.ser(writer);
        self.position.ser(writer);
        self.visible_range.ser(writer);
        UnsignedVariableInteger::<7>::new(self.throttle_interval).ser(writer);
        self.behavior.write(writer);
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut writer = BitWriter::new();
        self.write(&mut writer);
        writer.to_bytes()
    }

    /// Encoded payload alone, without the lifecycle header
    pub fn payload_bytes(&self) -> Vec<u8> {
        let mut writer = BitWriter::new();
        self.behavior.write(&mut writer);
        writer.to_bytes()
    }

    /// Reads a full instance, using `read_payload` for the behavior part
    pub fn read<F>(reader: &mut BitReader, read_payload: F) -> Result<Self, EffectDecodeError>
    where
        F: FnOnce(&mut BitReader) -> Result<B, EffectDecodeError>,
    {
        let id = InstanceId::de(reader)?;
        let region = RegionKey::de(reader)?;
        let tick_counter = read_u32(reader, "tick_counter")?;
        let max_tick = read_u32(reader, "max_tick")?;
        let canceled = bool::de(reader)?;
        let position = Position::de(reader)?;
        let visible_range = f32::de(reader)?;
        let throttle_interval = read_u32(reader, "throttle_interval")?;
        let behavior = read_payload(reader)?;

        Ok(Self {
            id,
            region,
            position,
            visible_range,
            tick_counter,
            max_tick,
            canceled,
            throttle_interval,
            behavior,
        })
    }
}

fn read_u32(reader: &mut BitReader, field: &'static str) -> Result<u32, EffectDecodeError> {
    let value = UnsignedVariableInteger::<7>::de(reader)?.get();
    u32::try_from(value).map_err(|_| {
        lumen_serde::SerdeErr::InvalidValue {
            type_name: field,
            detail: format!("{} does not fit in 32 bits", value),
        }
        .into()
    })
}
