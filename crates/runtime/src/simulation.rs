//! Frame-synchronous simulation.
//!
//! [`Simulation`] owns every piece of mutable game state (agents, ledger,
//! director, deferred tasks, music, player) and advances all of it once per
//! [`Simulation::step`]. Nothing interleaves with a step and nothing inside
//! it awaits; services are reached through the [`ArenaWorld`] it owns.

use std::collections::BTreeMap;
use std::path::PathBuf;

use arena_content::ContentBundle;
use arena_core::spawn::SpawnArea;
use arena_core::{
    Agent, AnimParam, AnimationSink, ArenaConfig, Arsenal, BrainRegistry, CombatEvent,
    CombatResolver, CorpseEvent, DeferredQueue, EnemyKind, EnemyRoster, EntityAllocator, EntityId,
    GameError, ImpulseSink, LayerMask, LevelClock, LevelOutcome, LevelSummary, MusicDirector,
    NavigationOracle, NavigationQuery, OracleError, PcgRng, Perception, Pickup, PickupEffect,
    PickupKind, PickupOrigin, PlayerDamage, PlayerVitals, Pose, Ray, ScoreLedger, SpawnCommand,
    SpawnContext, SpawnDirector, TargetSnapshot, Tension, TransitionPolicy, WeaponKind,
    WeaponProfile,
};
use glam::Vec3;
use tracing::{debug, info, warn};

use crate::bus::NotificationBus;
use crate::error::{Result, RuntimeError};
use crate::input::PlayerInput;
use crate::journal::Journal;
use crate::notification::{Clip, Notification};
use crate::volumes::{Occupancy, VolumeTracker};
use crate::world::ArenaWorld;

/// Height of the player's eyes; shots start here.
pub const EYE_HEIGHT: f32 = 1.6;
/// Height of the player's fist.
pub const PUNCH_HEIGHT: f32 = 1.2;
/// Spacing of pickups dropped by one body.
const DROP_SPACING: f32 = 0.5;

/// Random stream ids that never collide with agent ids.
const DIRECTOR_STREAM: u32 = u32::MAX;
const COMBAT_STREAM: u32 = u32::MAX - 1;

/// Work scheduled for a later frame.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Deferred {
    DropPickup { kind: PickupKind, position: Vec3 },
    RespawnPickup(u32),
}

#[derive(Debug, Clone)]
struct Tracked {
    agent: Agent,
    occupancy: Occupancy,
}

pub struct Simulation<W> {
    config: ArenaConfig,
    roster: EnemyRoster,
    weapons: Vec<WeaponProfile>,
    brains: BrainRegistry,
    resolver: CombatResolver,
    director: SpawnDirector,
    volumes: VolumeTracker,
    world: W,

    agents: BTreeMap<EntityId, Tracked>,
    allocator: EntityAllocator,
    ledger: ScoreLedger,
    deferred: DeferredQueue<Deferred>,
    music: MusicDirector,
    clock: LevelClock,
    player: PlayerVitals,
    arsenal: Arsenal,
    layout: Vec<Pickup>,
    pickups: BTreeMap<u32, Pickup>,
    next_pickup: u32,
    spawn_areas: Vec<SpawnArea>,
    rng: PcgRng,
    seed: u64,
    frame: u64,
    outcome: Option<LevelOutcome>,

    bus: NotificationBus,
    journal: Option<Journal>,
}

impl<W: ArenaWorld> Simulation<W> {
    pub fn builder() -> SimulationBuilder<W> {
        SimulationBuilder::new()
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    #[inline]
    pub fn config(&self) -> &ArenaConfig {
        &self.config
    }

    #[inline]
    pub fn world(&self) -> &W {
        &self.world
    }

    #[inline]
    pub fn world_mut(&mut self) -> &mut W {
        &mut self.world
    }

    #[inline]
    pub fn ledger(&self) -> &ScoreLedger {
        &self.ledger
    }

    #[inline]
    pub fn player(&self) -> &PlayerVitals {
        &self.player
    }

    #[inline]
    pub fn arsenal(&self) -> &Arsenal {
        &self.arsenal
    }

    #[inline]
    pub fn music(&self) -> &MusicDirector {
        &self.music
    }

    #[inline]
    pub fn clock(&self) -> &LevelClock {
        &self.clock
    }

    #[inline]
    pub fn director(&self) -> &SpawnDirector {
        &self.director
    }

    #[inline]
    pub fn frame(&self) -> u64 {
        self.frame
    }

    #[inline]
    pub fn outcome(&self) -> Option<LevelOutcome> {
        self.outcome
    }

    #[inline]
    pub fn is_over(&self) -> bool {
        self.outcome.is_some()
    }

    pub fn bus(&self) -> &NotificationBus {
        &self.bus
    }

    pub fn agent(&self, id: EntityId) -> Option<&Agent> {
        self.agents.get(&id).map(|t| &t.agent)
    }

    /// Agents in id order, live ones and corpses alike.
    pub fn agents(&self) -> impl Iterator<Item = &Agent> {
        self.agents.values().map(|t| &t.agent)
    }

    /// Name of the state an agent's brain is in.
    pub fn state_name(&self, id: EntityId) -> Option<&str> {
        let agent = self.agent(id)?;
        let graph = self.brains.graph(agent.kind());
        Some(graph.name_of(agent.machine().current()))
    }

    pub fn pickups(&self) -> impl Iterator<Item = (u32, &Pickup)> {
        self.pickups.iter().map(|(&id, p)| (id, p))
    }

    /// Deferred tasks still pending for an agent.
    pub fn pending_tasks(&self, agent: EntityId) -> usize {
        self.deferred.pending_for(agent)
    }

    pub fn summary(&self, outcome: LevelOutcome) -> LevelSummary {
        LevelSummary {
            outcome,
            score: self.ledger.score(),
            kills: self.ledger.kills(),
            elapsed: self.clock.elapsed(),
            peak_active: self.ledger.peak_active(),
        }
    }

    // ========================================================================
    // Frame
    // ========================================================================

    /// Advance the level by `dt` seconds.
    ///
    /// Returns the notifications produced, in order. Once the level is over
    /// this does nothing until [`Simulation::reset_level`].
    pub fn step(&mut self, dt: f32, input: &PlayerInput) -> Result<Vec<Notification>> {
        if self.outcome.is_some() {
            return Ok(Vec::new());
        }
        let dt = dt.max(0.0);
        self.frame += 1;
        let mut out = Vec::new();

        if let Some(pose) = input.pose
            && self.player.is_alive()
        {
            self.world.set_target_pose(pose);
        }
        self.clock.tick(dt, self.player.is_alive());

        self.player_actions(input, &mut out);
        self.collect_pickups(&mut out);
        self.run_agents(dt, &mut out)?;
        self.advance_corpses(dt, &mut out);
        self.direct_spawns(&mut out);
        self.run_deferred(dt, &mut out);
        self.update_music(dt, &mut out);
        self.flush_outboxes();
        self.world.step(dt);

        if !self.player.is_alive() {
            self.finish(LevelOutcome::PlayerDied, &mut out);
        }
        self.emit(out)
    }

    /// End the level early (time limit, shutdown).
    pub fn end(&mut self, outcome: LevelOutcome) -> Result<LevelSummary> {
        if let Some(done) = self.outcome {
            return Ok(self.summary(done));
        }
        let mut out = Vec::new();
        self.finish(outcome, &mut out);
        self.emit(out)?;
        Ok(self.summary(outcome))
    }

    /// Back to level start: empty arena, zeroed ledger, full health.
    pub fn reset_level(&mut self) -> Result<Vec<Notification>> {
        for id in self.agents.keys().copied().collect::<Vec<_>>() {
            self.world.remove(id);
        }
        self.agents.clear();
        self.ledger.reset();
        self.deferred.clear();
        self.director.reset();
        self.music.reset();
        self.clock.reset();
        self.player = PlayerVitals::new(&self.config.player);
        self.arsenal = Arsenal::new(self.weapons.clone());
        self.pickups = self.layout.iter().copied().enumerate().map(|(i, p)| (i as u32, p)).collect();
        self.next_pickup = self.layout.len() as u32;
        self.outcome = None;

        info!(frame = self.frame, "level reset");
        self.emit(vec![
            Notification::LevelReset,
            Notification::HealthChanged {
                health: self.player.health(),
                low_health: false,
            },
        ])
    }

    fn finish(&mut self, outcome: LevelOutcome, out: &mut Vec<Notification>) {
        self.outcome = Some(outcome);
        let summary = self.summary(outcome);
        let (minutes, seconds) = self.clock.minutes_seconds();
        info!(
            %outcome,
            score = summary.score,
            kills = summary.kills,
            survived = %format_args!("{minutes}:{seconds:02}"),
            peak_active = summary.peak_active,
            "level ended"
        );
        out.push(Notification::LevelEnded { summary });
    }

    fn emit(&mut self, out: Vec<Notification>) -> Result<Vec<Notification>> {
        if let Some(journal) = self.journal.as_mut() {
            journal.append(self.frame, self.clock.elapsed(), &out)?;
            if self.outcome.is_some() {
                journal.flush()?;
            }
        }
        for notification in &out {
            self.bus.publish(notification.clone());
        }
        Ok(out)
    }

    // ========================================================================
    // Player
    // ========================================================================

    fn player_actions(&mut self, input: &PlayerInput, out: &mut Vec<Notification>) {
        if !self.player.is_alive() {
            return;
        }
        if let Some(kind) = input.equip
            && let Err(e) = self.arsenal.equip(kind)
        {
            debug!(error = %e, code = e.error_code(), "equip rejected");
        }
        if input.reload
            && let Some(weapon) = self.arsenal.equipped_mut()
            && weapon.reload() > 0
        {
            let kind = weapon.profile().kind;
            out.push(Notification::PlayClip {
                clip: Clip::Reloaded(kind),
            });
            self.push_ammo(kind, out);
        }
        if input.fire {
            self.fire(out);
        }
        if input.punch {
            self.punch(out);
        }
    }

    fn push_ammo(&self, kind: WeaponKind, out: &mut Vec<Notification>) {
        if let Some(weapon) = self.arsenal.get(kind) {
            let magazine = weapon.magazine();
            out.push(Notification::AmmoChanged {
                weapon: kind,
                loaded: magazine.loaded,
                reserve: magazine.reserve,
            });
        }
    }

    fn fire(&mut self, out: &mut Vec<Notification>) {
        let pose = self.world.target_pose();
        let origin = pose.position + Vec3::Y * EYE_HEIGHT;
        let Some(weapon) = self.arsenal.equipped_mut() else {
            return;
        };
        let profile = weapon.profile().clone();

        let shots = match weapon.fire(origin, pose.forward, &mut self.rng, &self.world) {
            Ok(shots) => shots,
            Err(e) => {
                debug!(error = %e, code = e.error_code(), "dry fire");
                out.push(Notification::PlayClip {
                    clip: Clip::DryFire(profile.kind),
                });
                return;
            }
        };
        out.push(Notification::PlayClip {
            clip: Clip::WeaponFired(profile.kind),
        });
        self.push_ammo(profile.kind, out);

        for shot in shots {
            if let Some((target, tag)) = shot.hit.collider.agent() {
                let event = CombatEvent::shot(target, tag, &profile, &shot);
                self.apply_hit(&event, out);
            }
        }
    }

    fn punch(&mut self, out: &mut Vec<Notification>) {
        let pose = self.world.target_pose();
        let origin = pose.position + Vec3::Y * PUNCH_HEIGHT;
        let Some(ray) = Ray::new(origin, pose.forward) else {
            return;
        };
        out.push(Notification::PlayClip { clip: Clip::Punch });

        if let Some(hit) = self
            .world
            .raycast(ray, self.config.combat.punch_reach, LayerMask::WEAPON)
            && let Some((target, tag)) = hit.collider.agent()
        {
            let event = CombatEvent::punch(target, tag, &self.config.combat, hit.point, ray.direction);
            self.apply_hit(&event, out);
        }
    }

    fn apply_hit(&mut self, event: &CombatEvent, out: &mut Vec<Notification>) {
        let Some(tracked) = self.agents.get_mut(&event.target) else {
            return;
        };
        let position = self
            .world
            .pose(event.target)
            .map_or(event.point, |pose| pose.position);

        let outcome =
            self.resolver
                .resolve_hit(event, &mut tracked.agent, &mut self.ledger, &mut self.rng);

        if let Some(impulse) = outcome.impulse {
            self.world.apply_impulse(impulse);
        }
        if let Some(death) = &outcome.death {
            tracked.occupancy = Occupancy::default();
            out.push(Notification::AgentDied {
                agent: death.agent,
                kind: death.kind,
            });
            for (index, &kind) in death.drops.iter().enumerate() {
                let offset = Vec3::X * (index as f32 * DROP_SPACING);
                self.deferred.schedule(
                    Some(death.agent),
                    self.config.combat.pickup_drop_delay,
                    Deferred::DropPickup {
                        kind,
                        position: position + offset,
                    },
                );
            }
        }
        if outcome.delta.points > 0 || outcome.death.is_some() {
            out.push(Notification::ScoreChanged {
                score: self.ledger.score(),
                points: outcome.delta.points,
                kills: self.ledger.kills(),
            });
        }
    }

    fn collect_pickups(&mut self, out: &mut Vec<Notification>) {
        if !self.player.is_alive() {
            return;
        }
        let position = self.world.target_pose().position;
        let in_reach: Vec<u32> = self
            .pickups
            .iter()
            .filter(|(_, pickup)| pickup.in_reach(position))
            .map(|(&id, _)| id)
            .collect();

        for id in in_reach {
            let Some(pickup) = self.pickups.get_mut(&id) else {
                continue;
            };
            let Some(effect) =
                pickup.collect(&mut self.player, &mut self.arsenal, &self.config.player)
            else {
                continue;
            };
            let kind = pickup.kind;
            let respawn = pickup.respawn_delay(&self.config.player, &mut self.rng);

            out.push(Notification::PickupCollected { pickup: id, kind });
            out.push(Notification::PlayClip {
                clip: Clip::PickupCollected,
            });
            match effect {
                PickupEffect::Healed(_) => out.push(Notification::HealthChanged {
                    health: self.player.health(),
                    low_health: self.player.is_low_health(),
                }),
                PickupEffect::Rounds { weapon, .. } => self.push_ammo(weapon, out),
            }

            match respawn {
                Some(delay) => {
                    self.deferred
                        .schedule(None, delay, Deferred::RespawnPickup(id));
                }
                None => {
                    self.pickups.remove(&id);
                }
            }
        }
    }

    // ========================================================================
    // Agents
    // ========================================================================

    fn run_agents(&mut self, dt: f32, out: &mut Vec<Notification>) -> Result<()> {
        let target_pose = self.world.target_pose();
        let target = TargetSnapshot {
            position: target_pose.position,
            grounded: self.world.target_grounded(),
            alive: self.player.is_alive(),
        };

        for (&id, tracked) in self.agents.iter_mut() {
            let agent = &mut tracked.agent;
            if !agent.is_active() {
                continue;
            }
            let pose = self
                .world
                .pose(id)
                .ok_or(OracleError::PoseUnavailable(id))?;
            let nav = self.world.status(id).unwrap_or_default();
            let distance = pose.position.distance(target.position);

            for event in self.volumes.update(&mut tracked.occupancy, distance) {
                agent.on_volume(event);
            }

            let graph = self.brains.graph(agent.kind());
            let perception = Perception {
                pose,
                nav,
                target,
                dt,
            };
            if let Some(step) = agent.think(graph, &perception, &self.world)
                && step.changed()
            {
                out.push(Notification::StateChanged {
                    agent: id,
                    from: graph.name_of(step.previous).to_string(),
                    to: graph.name_of(step.current).to_string(),
                });
            }

            let Some(hit) = agent.attack(distance, dt, &self.config.enemy_attacks) else {
                continue;
            };
            out.push(Notification::PlayClip {
                clip: Clip::EnemyAttack(hit.stance),
            });
            match self.player.apply_damage(hit.damage) {
                PlayerDamage::Hurt { health } => out.push(Notification::HealthChanged {
                    health,
                    low_health: self.player.is_low_health(),
                }),
                PlayerDamage::Died => {
                    info!(agent = %id, stance = %hit.stance, "player killed");
                    out.push(Notification::HealthChanged {
                        health: self.player.health(),
                        low_health: false,
                    });
                    out.push(Notification::PlayerDied);
                }
                PlayerDamage::Ignored => {}
            }
        }
        Ok(())
    }

    fn advance_corpses(&mut self, dt: f32, out: &mut Vec<Notification>) {
        let mut disposed = Vec::new();
        for (&id, tracked) in self.agents.iter_mut() {
            match tracked.agent.advance_corpse(dt) {
                Some(CorpseEvent::Dissolve) => {
                    out.push(Notification::CorpseDissolving { agent: id });
                }
                Some(CorpseEvent::Disposed) => disposed.push(id),
                Some(CorpseEvent::Fade) | None => {}
            }
        }
        for id in disposed {
            self.despawn(id);
            out.push(Notification::AgentDespawned { agent: id });
        }
    }

    /// Remove an agent and everything still scheduled on its behalf.
    fn despawn(&mut self, id: EntityId) {
        if self.agents.remove(&id).is_none() {
            return;
        }
        self.world.remove(id);
        let cancelled = self.deferred.cancel_owner(id);
        debug!(agent = %id, cancelled, "agent despawned");
    }

    fn direct_spawns(&mut self, out: &mut Vec<Notification>) {
        let ctx = SpawnContext {
            population: &self.ledger,
            target: self.world.target_pose().position,
            target_alive: self.player.is_alive(),
            areas: &self.spawn_areas,
            navigation: &self.world,
        };
        if let Some(command) = self.director.tick(self.clock.elapsed() as f32, &ctx) {
            self.spawn_agent(command, out);
        }
    }

    /// Spawn an agent outside the director's schedule.
    ///
    /// Returns `None` if the world rejects the position.
    pub fn spawn(&mut self, command: SpawnCommand) -> Result<Option<EntityId>> {
        let mut out = Vec::new();
        let id = self.spawn_agent(command, &mut out);
        self.emit(out)?;
        Ok(id)
    }

    fn spawn_agent(&mut self, command: SpawnCommand, out: &mut Vec<Notification>) -> Option<EntityId> {
        let id = self.allocator.allocate();
        let pose = Pose::new(command.position, command.facing);
        if !self.world.place(id, pose) {
            let e = OracleError::PlacementRejected {
                agent: id,
                position: command.position,
            };
            warn!(code = e.error_code(), severity = e.severity().as_str(), "{e}");
            return None;
        }
        self.world.attach_colliders(id, command.kind);
        self.world.set_bool(id, AnimParam::Alive, true);

        let template = self.roster.get(command.kind);
        let graph = self.brains.graph(command.kind);
        let agent = Agent::spawn(
            id,
            template,
            graph,
            &self.config,
            PcgRng::stream(self.seed, id.0, 0),
        );
        self.ledger.record_spawn(command.kind);
        self.agents.insert(
            id,
            Tracked {
                agent,
                occupancy: Occupancy::default(),
            },
        );

        out.push(Notification::AgentSpawned {
            agent: id,
            kind: command.kind,
            position: command.position,
            wave: command.wave,
        });
        Some(id)
    }

    fn run_deferred(&mut self, dt: f32, out: &mut Vec<Notification>) {
        for due in self.deferred.advance(dt) {
            match due.task {
                Deferred::DropPickup { kind, position } => {
                    let id = self.next_pickup;
                    self.next_pickup += 1;
                    self.pickups
                        .insert(id, Pickup::new(kind, position, PickupOrigin::Dropped));
                    out.push(Notification::PickupDropped {
                        pickup: id,
                        kind,
                        position,
                    });
                }
                Deferred::RespawnPickup(id) => {
                    if let Some(pickup) = self.pickups.get_mut(&id) {
                        pickup.respawn();
                        out.push(Notification::PickupRespawned { pickup: id });
                    }
                }
            }
        }
    }

    fn update_music(&mut self, dt: f32, out: &mut Vec<Notification>) {
        let tension = Tension {
            player_alive: self.player.is_alive(),
            active: self.ledger.active(),
            active_flamers: self.ledger.active_of(EnemyKind::Flamer),
        };
        if let Some(change) = self.music.check(tension) {
            out.push(Notification::MusicCrossfade {
                from: change.from,
                to: change.to,
            });
        }
        if let Some(track) = self.music.advance(dt) {
            out.push(Notification::MusicChanged { track });
        }
    }

    /// Hand queued navigation and animation writes to the services.
    fn flush_outboxes(&mut self) {
        for (&id, tracked) in self.agents.iter_mut() {
            let outbox = tracked.agent.take_outbox();
            for command in outbox.nav {
                NavigationOracle::apply(&mut self.world, id, command);
            }
            for command in outbox.anim {
                AnimationSink::apply(&mut self.world, id, command);
            }
        }
    }
}

impl<W> std::fmt::Debug for Simulation<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Simulation")
            .field("frame", &self.frame)
            .field("agents", &self.agents.len())
            .field("score", &self.ledger.score())
            .field("outcome", &self.outcome)
            .finish()
    }
}

// ============================================================================
// Builder
// ============================================================================

/// Builder for [`Simulation`].
pub struct SimulationBuilder<W> {
    content: ContentBundle,
    seed: u64,
    policy: TransitionPolicy,
    world: Option<W>,
    pickups: Vec<Pickup>,
    spawn_areas: Vec<SpawnArea>,
    journal: Option<PathBuf>,
    bus: Option<NotificationBus>,
}

impl<W: ArenaWorld> SimulationBuilder<W> {
    fn new() -> Self {
        Self {
            content: ContentBundle::default(),
            seed: 0,
            policy: TransitionPolicy::default(),
            world: None,
            pickups: Vec::new(),
            spawn_areas: Vec::new(),
            journal: None,
            bus: None,
        }
    }

    /// Tunables and tables. Defaults to the built-in content.
    pub fn content(mut self, content: ContentBundle) -> Self {
        self.content = content;
        self
    }

    /// Session seed every random stream derives from.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn policy(mut self, policy: TransitionPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Required service implementations.
    pub fn world(mut self, world: W) -> Self {
        self.world = Some(world);
        self
    }

    /// Pickups placed in the level. They respawn after being collected.
    pub fn pickups(mut self, positions: impl IntoIterator<Item = (PickupKind, Vec3)>) -> Self {
        self.pickups = positions
            .into_iter()
            .map(|(kind, position)| Pickup::new(kind, position, PickupOrigin::Level))
            .collect();
        self
    }

    pub fn spawn_areas(mut self, areas: Vec<SpawnArea>) -> Self {
        self.spawn_areas = areas;
        self
    }

    /// Append notifications to a JSON-lines file.
    pub fn journal(mut self, path: impl Into<PathBuf>) -> Self {
        self.journal = Some(path.into());
        self
    }

    /// Publish on an existing bus instead of a private one.
    pub fn bus(mut self, bus: NotificationBus) -> Self {
        self.bus = Some(bus);
        self
    }

    pub fn build(self) -> Result<Simulation<W>> {
        let world = self.world.ok_or(RuntimeError::MissingWorld)?;
        let ContentBundle {
            config,
            weapons,
            enemies,
            schedule,
        } = self.content;

        schedule.validate()?;
        let brains = BrainRegistry::new(self.policy)?;
        let journal = self.journal.map(Journal::open_or_create).transpose()?;

        let director = SpawnDirector::new(
            schedule,
            config.spawn.clone(),
            PcgRng::stream(self.seed, DIRECTOR_STREAM, 0),
        );
        let resolver = CombatResolver::new(config.scores, config.combat.clone());
        let volumes = VolumeTracker::new(config.volumes.clone());
        let music = MusicDirector::new(config.music.clone());
        let player = PlayerVitals::new(&config.player);
        let arsenal = Arsenal::new(weapons.clone());
        let pickups = self
            .pickups
            .iter()
            .copied()
            .enumerate()
            .map(|(i, p)| (i as u32, p))
            .collect();

        info!(
            seed = self.seed,
            policy = self.policy.as_str(),
            pickups = self.pickups.len(),
            "simulation ready"
        );

        Ok(Simulation {
            roster: enemies,
            weapons,
            brains,
            resolver,
            director,
            volumes,
            world,
            agents: BTreeMap::new(),
            allocator: EntityAllocator::new(),
            ledger: ScoreLedger::new(),
            deferred: DeferredQueue::new(),
            music,
            clock: LevelClock::new(),
            player,
            arsenal,
            next_pickup: self.pickups.len() as u32,
            layout: self.pickups,
            pickups,
            spawn_areas: self.spawn_areas,
            rng: PcgRng::stream(self.seed, COMBAT_STREAM, 0),
            seed: self.seed,
            frame: 0,
            outcome: None,
            bus: self.bus.unwrap_or_default(),
            journal,
            config,
        })
    }
}
