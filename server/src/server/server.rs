use log::info;

use lumen_shared::{
    BoxedEffect, EffectBehavior, EffectCategory, EffectGroup, EffectProtocol, EffectSpec,
    InstanceId, ObserverKey, Scene, Transport,
};

use crate::{
    events::InterestEvents,
    interest::{InstanceSnapshots, InterestManager, SyncStats},
    observer_scope::ObserverScopeRef,
    ServerError,
};

use super::ServerConfig;

/// Runs both effect categories against one scene and one transport.
///
/// Free-standing effects and groups are kept by separate managers with
/// separate type registries; their messages share the transport and are told
/// apart by category.
pub struct EffectServer {
    config: ServerConfig,
    protocol: EffectProtocol,
    effects: InterestManager<BoxedEffect>,
    groups: InterestManager<EffectGroup>,
    transport: Box<dyn Transport>,
}

impl EffectServer {
    /// Create a new EffectServer. The protocol is locked if it isn't already.
    pub fn new(config: ServerConfig, mut protocol: EffectProtocol, transport: Box<dyn Transport>) -> Self {
        if !protocol.is_locked() {
            protocol.lock();
        }

        let effects = InterestManager::new(
            EffectCategory::Effect,
            config.effects.clone(),
            protocol.effects().clone(),
        );
        let groups = InterestManager::new(
            EffectCategory::Group,
            config.groups.clone(),
            protocol.groups().clone(),
        );

        info!(
            "Effect server started with {} effect types and {} group types",
            protocol.effects().len(),
            protocol.groups().len()
        );

        Self {
            config,
            protocol,
            effects,
            groups,
            transport,
        }
    }

    // Spawning

    /// Spawns a free-standing effect, `None` if the effect manager is full
    pub fn spawn_effect<T: EffectBehavior>(&mut self, spec: EffectSpec, effect: T) -> Option<InstanceId> {
        self.effects.spawn(spec, Box::new(effect))
    }

    pub fn try_spawn_effect<T: EffectBehavior>(
        &mut self,
        spec: EffectSpec,
        effect: T,
    ) -> Result<InstanceId, ServerError> {
        self.effects.try_spawn(spec, Box::new(effect))
    }

    /// Spawns a group, `None` if the group manager is full
    pub fn spawn_group(&mut self, spec: EffectSpec, group: EffectGroup) -> Option<InstanceId> {
        self.groups.spawn(spec, group)
    }

    pub fn try_spawn_group(
        &mut self,
        spec: EffectSpec,
        group: EffectGroup,
    ) -> Result<InstanceId, ServerError> {
        self.groups.try_spawn(spec, group)
    }

    /// Marks an instance canceled. Observers are told on the next tick.
    pub fn cancel(&mut self, category: EffectCategory, id: &InstanceId) -> bool {
        match category {
            EffectCategory::Effect => self.effects.cancel(id),
            EffectCategory::Group => self.groups.cancel(id),
        }
    }

    pub fn try_cancel(&mut self, category: EffectCategory, id: &InstanceId) -> Result<(), ServerError> {
        match category {
            EffectCategory::Effect => self.effects.try_cancel(id),
            EffectCategory::Group => self.groups.try_cancel(id),
        }
    }

    // Tick

    /// Ticks free-standing effects, then groups
    pub fn tick<S: Scene + ?Sized>(&mut self, scene: &S) {
        self.effects.tick(scene, self.transport.as_mut());
        self.groups.tick(scene, self.transport.as_mut());
    }

    /// Spawn and removal events of both categories queued since the last call
    pub fn take_events(&mut self) -> InterestEvents {
        let mut events = self.effects.take_events();
        events.append(self.groups.take_events());
        events
    }

    // Accessors

    pub fn stats(&self, category: EffectCategory) -> SyncStats {
        match category {
            EffectCategory::Effect => self.effects.stats(),
            EffectCategory::Group => self.groups.stats(),
        }
    }

    pub fn snapshots(&self, category: EffectCategory) -> InstanceSnapshots {
        match category {
            EffectCategory::Effect => self.effects.snapshots(),
            EffectCategory::Group => self.groups.snapshots(),
        }
    }

    pub fn observer_scope(&self, category: EffectCategory, observer: &ObserverKey) -> ObserverScopeRef<'_> {
        match category {
            EffectCategory::Effect => self.effects.observer_scope(observer),
            EffectCategory::Group => self.groups.observer_scope(observer),
        }
    }

    pub fn effects(&self) -> &InterestManager<BoxedEffect> {
        &self.effects
    }

    pub fn effects_mut(&mut self) -> &mut InterestManager<BoxedEffect> {
        &mut self.effects
    }

    pub fn groups(&self) -> &InterestManager<EffectGroup> {
        &self.groups
    }

    pub fn groups_mut(&mut self) -> &mut InterestManager<EffectGroup> {
        &mut self.groups
    }

    pub fn protocol(&self) -> &EffectProtocol {
        &self.protocol
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }
}
