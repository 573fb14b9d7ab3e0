use std::{collections::HashMap, sync::Arc};

use log::{debug, trace};

use lumen_shared::{
    EffectBehavior, EffectCategory, EffectInstance, EffectMessage, EffectSpec, InstanceId, NetId,
    ObserverKey, Scene, Transport, TypeRegistry,
};

use crate::{
    events::{InterestEvents, RemoveReason},
    observer_scope::ObserverScopeRef,
    InterestConfig, ServerError,
};

use super::{
    lod::lod_interval, InstanceSnapshot, InstanceSnapshots, ObserverDirectory, SendBudget,
    SyncStats,
};

/// Owns the live instances of one category and keeps observers in sync with
/// them.
///
/// Each tick advances every instance and, for one shard of observers,
/// diffs what each observer should see against what it was last told,
/// emitting CREATE, UPDATE and REMOVE messages within a per-tick budget.
pub struct InterestManager<B: EffectBehavior> {
    config: InterestConfig,
    registry: Arc<TypeRegistry<B>>,
    instances: HashMap<InstanceId, EffectInstance<B>>,
    next_instance_id: u64,
    tick_index: u64,
    sync: SyncState,
    rng: fastrand::Rng,
    events: InterestEvents,
    snapshots: InstanceSnapshots,
}

impl<B: EffectBehavior> InterestManager<B> {
    pub fn new(
        category: EffectCategory,
        config: InterestConfig,
        registry: Arc<TypeRegistry<B>>,
    ) -> Self {
        let rng = match config.rng_seed {
            Some(seed) => fastrand::Rng::with_seed(seed),
            None => fastrand::Rng::new(),
        };
        let sync = SyncState {
            category,
            directory: ObserverDirectory::new(),
            budget: SendBudget::new(config.max_sends_per_tick),
            stats: SyncStats::default(),
            global_max_visible_range: config.global_max_visible_range,
        };

        Self {
            config,
            registry,
            instances: HashMap::new(),
            next_instance_id: 0,
            tick_index: 0,
            sync,
            rng,
            events: InterestEvents::new(),
            snapshots: InstanceSnapshots::new(),
        }
    }

    // Instances

    /// Adds an instance, or returns `None` if the manager is at capacity
    pub fn spawn(&mut self, spec: EffectSpec, behavior: B) -> Option<InstanceId> {
        match self.try_spawn(spec, behavior) {
            Ok(id) => Some(id),
            Err(error) => {
                debug!("{}", error);
                None
            }
        }
    }

    pub fn try_spawn(&mut self, spec: EffectSpec, behavior: B) -> Result<InstanceId, ServerError> {
        if self.instances.len() >= self.config.max_instances {
            return Err(ServerError::CapacityReached {
                category: self.sync.category,
                max_instances: self.config.max_instances,
            });
        }

        let id = InstanceId::from_u64(self.next_instance_id);
        self.next_instance_id += 1;
        self.instances
            .insert(id, EffectInstance::new(id, spec, behavior));
        self.events.push_spawn(self.sync.category, id);

        Ok(id)
    }

    /// Marks an instance canceled. Observers are told on the next tick.
    pub fn cancel(&mut self, id: &InstanceId) -> bool {
        self.try_cancel(id).is_ok()
    }

    pub fn try_cancel(&mut self, id: &InstanceId) -> Result<(), ServerError> {
        let Some(instance) = self.instances.get_mut(id) else {
            return Err(ServerError::UnknownInstance {
                category: self.sync.category,
                id: *id,
            });
        };
        instance.cancel();
        Ok(())
    }

    pub fn has_instance(&self, id: &InstanceId) -> bool {
        self.instances.contains_key(id)
    }

    pub fn instance(&self, id: &InstanceId) -> Option<&EffectInstance<B>> {
        self.instances.get(id)
    }

    pub fn instance_mut(&mut self, id: &InstanceId) -> Option<&mut EffectInstance<B>> {
        self.instances.get_mut(id)
    }

    /// Live instance ids, in spawn order
    pub fn instance_ids(&self) -> Vec<InstanceId> {
        let mut ids: Vec<InstanceId> = self.instances.keys().copied().collect();
        ids.sort();
        ids
    }

    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    // Tick

    /// Runs one tick: sweeps and advances every instance, reaps the canceled
    /// ones, prunes disconnected observers and publishes snapshots.
    /// Returns this tick's counters.
    pub fn tick<S: Scene + ?Sized>(&mut self, scene: &S, transport: &mut dyn Transport) -> SyncStats {
        self.sync.stats = SyncStats::default();
        self.sync.budget.reset();
        self.tick_index += 1;

        let shard_count = u64::from(self.config.effective_shard_count());
        let shard = self.tick_index % shard_count;
        let observers = scene.observers();
        let mut shard_observers: Vec<ObserverKey> = observers
            .iter()
            .filter(|observer| shard_of(observer, shard_count) == shard)
            .copied()
            .collect();
        if self.config.shuffle_observers {
            // shuffle order of observers in order to avoid priority among them
            self.rng.shuffle(&mut shard_observers);
        }
        let off_shard = u32::try_from(observers.len() - shard_observers.len()).unwrap_or(u32::MAX);

        // instances are visited from a rotating offset, so the budget does
        // not always run out on the same ones
        let mut ids = self.instance_ids();
        if !ids.is_empty() {
            let offset = (self.tick_index % ids.len() as u64) as usize;
            ids.rotate_left(offset);
        }

        let mut reaped = Vec::new();
        for id in ids {
            let Some(instance) = self.instances.get_mut(&id) else {
                continue;
            };

            if !instance.is_canceled() {
                match self.registry.id_by_key(instance.type_key()) {
                    Some(net_id) => {
                        self.sync.stats.skipped_by_shard =
                            self.sync.stats.skipped_by_shard.saturating_add(off_shard);
                        self.sync
                            .sweep(instance, net_id, &shard_observers, scene, transport);
                    }
                    None => {
                        debug!(
                            "{:?} instance {:?} has unregistered type '{}', not synchronized",
                            self.sync.category,
                            id,
                            instance.type_key()
                        );
                    }
                }
            }

            instance.tick(scene);

            if instance.is_canceled() {
                reaped.push(id);
            }
        }

        for id in reaped {
            let Some(instance) = self.instances.remove(&id) else {
                continue;
            };
            let net_id = self.registry.id_by_key(instance.type_key());
            self.sync.remove_everywhere(&id, net_id, transport);

            let reason = if instance.max_tick() > 0 && instance.tick_counter() >= instance.max_tick() {
                RemoveReason::Expired
            } else {
                RemoveReason::Canceled
            };
            self.events.push_remove(self.sync.category, id, reason);
        }

        self.sync
            .directory
            .retain(|observer| scene.is_connected(observer));
        if self.instances.is_empty() {
            self.sync.directory.clear();
        }

        self.publish_snapshots();

        self.sync.stats
    }

    fn publish_snapshots(&self) {
        let category = self.sync.category;
        let snapshots = self
            .instance_ids()
            .iter()
            .filter_map(|id| self.instances.get(id))
            .map(|instance| InstanceSnapshot::of(category, instance))
            .collect();
        self.snapshots.publish(snapshots);
    }

    // Observers

    pub fn observer_scope(&self, observer: &ObserverKey) -> ObserverScopeRef<'_> {
        ObserverScopeRef::new(&self.sync.directory, observer)
    }

    // Accessors

    pub fn category(&self) -> EffectCategory {
        self.sync.category
    }

    pub fn config(&self) -> &InterestConfig {
        &self.config
    }

    pub fn registry(&self) -> &Arc<TypeRegistry<B>> {
        &self.registry
    }

    /// Number of ticks run so far
    pub fn tick_index(&self) -> u64 {
        self.tick_index
    }

    /// Counters of the most recent tick
    pub fn stats(&self) -> SyncStats {
        self.sync.stats
    }

    /// Spawn and removal events queued since the last call
    pub fn take_events(&mut self) -> InterestEvents {
        self.events.take()
    }

    /// Handle to this manager's published snapshots, readable from any thread
    pub fn snapshots(&self) -> InstanceSnapshots {
        self.snapshots.clone()
    }
}

/// Shard an observer belongs to. The key is mixed first so keys sharing a
/// stride with `shard_count` still spread across shards; the result only
/// depends on the key, so an observer keeps its shard as others come and go.
pub(crate) fn shard_of(observer: &ObserverKey, shard_count: u64) -> u64 {
    // splitmix64 finalizer
    let mut z = observer.to_u64().wrapping_add(0x9E37_79B9_7F4A_7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    (z ^ (z >> 31)) % shard_count.max(1)
}

// SyncState
struct SyncState {
    category: EffectCategory,
    directory: ObserverDirectory,
    budget: SendBudget,
    stats: SyncStats,
    global_max_visible_range: f32,
}

impl SyncState {
    /// Diffs one instance against the given observers
    fn sweep<B: EffectBehavior, S: Scene + ?Sized>(
        &mut self,
        instance: &EffectInstance<B>,
        net_id: NetId,
        observers: &[ObserverKey],
        scene: &S,
        transport: &mut dyn Transport,
    ) {
        let id = instance.id();
        let region = instance.region();
        let position = instance.position();
        let range = instance.visible_range().min(self.global_max_visible_range);
        let mut state: Option<Vec<u8>> = None;

        for observer in observers {
            let desired_distance = if scene.same_region(observer, &region) && scene.eligible(observer) {
                scene
                    .distance(observer, &position)
                    .filter(|distance| *distance <= range)
            } else {
                None
            };
            let visible = self.directory.has(observer, &id);

            match (desired_distance, visible) {
                (Some(_), false) => {
                    // visibility is tracked even when the send is dropped,
                    // the next UPDATE carries full state
                    self.directory.insert(observer, id);
                    if !self.try_consume_budget() {
                        continue;
                    }
                    let state = state.get_or_insert_with(|| instance.to_bytes()).clone();
                    trace!("CREATE {:?} {:?} -> {:?}", self.category, id, observer);
                    transport.send(
                        observer,
                        EffectMessage::Create {
                            category: self.category,
                            net_id,
                            instance_id: id,
                            state,
                        },
                    );
                    self.stats.synced += 1;
                }
                (None, true) => {
                    self.directory.remove(observer, &id);
                    self.send_remove(observer, &id, net_id, transport);
                }
                (Some(distance), true) => {
                    let interval = lod_interval(distance, instance.visible_range());
                    if instance.tick_counter() % interval != 0 {
                        self.stats.skipped_by_lod += 1;
                        continue;
                    }
                    if !self.try_consume_budget() {
                        continue;
                    }
                    let state = state.get_or_insert_with(|| instance.to_bytes()).clone();
                    trace!("UPDATE {:?} {:?} -> {:?}", self.category, id, observer);
                    transport.send(
                        observer,
                        EffectMessage::Update {
                            category: self.category,
                            net_id,
                            instance_id: id,
                            state,
                        },
                    );
                    self.stats.synced += 1;
                }
                (None, false) => {}
            }
        }
    }

    /// Tells every observer still holding the instance to remove it
    fn remove_everywhere(
        &mut self,
        id: &InstanceId,
        net_id: Option<NetId>,
        transport: &mut dyn Transport,
    ) {
        let holders = self.directory.remove_everywhere(id);
        let Some(net_id) = net_id else {
            return;
        };
        for observer in holders {
            self.send_remove(&observer, id, net_id, transport);
        }
    }

    fn send_remove(
        &self,
        observer: &ObserverKey,
        id: &InstanceId,
        net_id: NetId,
        transport: &mut dyn Transport,
    ) {
        trace!("REMOVE {:?} {:?} -> {:?}", self.category, id, observer);
        transport.send(
            observer,
            EffectMessage::Remove {
                category: self.category,
                net_id,
                instance_id: *id,
            },
        );
    }

    fn try_consume_budget(&mut self) -> bool {
        if self.budget.try_consume() {
            return true;
        }
        if self.stats.throttled_by_budget == 0 {
            debug!(
                "{:?} send budget of {} exhausted, dropping further sends this tick",
                self.category,
                self.budget.used()
            );
        }
        self.stats.throttled_by_budget += 1;
        false
    }
}
