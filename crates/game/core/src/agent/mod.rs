//! Enemy agents.
//!
//! An [`Agent`] bundles everything one enemy owns: its brain context and
//! current state, health, attack cadence and, once dead, its corpse timeline.
//! Pose and navigation belong to the services and are only ever copied in
//! through [`Perception`].
mod blackboard;
mod corpse;
mod kind;
mod lifecycle;
mod sight;
mod template;

pub use blackboard::{Blackboard, RangeVolume, VolumeEvent, VolumePhase};
pub use corpse::{CorpseEvent, CorpsePhase, CorpseTimeline};
pub use kind::{ColliderTag, EnemyKind};
pub use lifecycle::{DamageOutcome, Vitals};
pub use sight::{SightReading, SightSensor};
pub use template::{AttachedPickups, EnemyRoster, EnemyTemplate, MAX_ATTACHED_PICKUPS};

use state_machine::{StateMachine, Step};
use tracing::{debug, info, trace};

use crate::ai::{AgentContext, AgentGraph, BrainTuning, Outbox, TargetSnapshot, graphs};
use crate::combat::{AttackCadence, AttackStance, EnemyHit};
use crate::config::{ArenaConfig, CombatConfig, EnemyAttackConfig};
use crate::entity::{EntityId, Pose};
use crate::env::{
    AnimCommand, AnimParam, AnimValue, NavCommand, NavStatus, PcgRng, PhysicsOracle, RngOracle,
};

/// Frame snapshot handed to [`Agent::think`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Perception {
    pub pose: Pose,
    pub nav: NavStatus,
    pub target: TargetSnapshot,
    pub dt: f32,
}

#[derive(Clone, Debug)]
pub struct Agent {
    kind: EnemyKind,
    ctx: AgentContext,
    machine: StateMachine,
    stance: Option<AttackStance>,
    cadence: AttackCadence,
    vitals: Vitals,
    drops: AttachedPickups,
    corpse: Option<CorpseTimeline>,
    active: bool,
}

impl Agent {
    /// Build a live agent from its template.
    ///
    /// `rng` becomes the agent's private stream; the projectile attack range
    /// is drawn from it first.
    pub fn spawn(
        id: EntityId,
        template: &EnemyTemplate,
        graph: &AgentGraph,
        config: &ArenaConfig,
        mut rng: PcgRng,
    ) -> Self {
        let (near, far) = config.ai.projectile_range;
        let projectile_range = rng.range_f32(near, far);
        let sight = SightSensor::new(
            template.fov_degrees,
            config.sight.sensor_radius,
            config.sight.interval,
        );
        let ctx = AgentContext::new(
            id,
            Blackboard::new(template.kind.is_ranged(), projectile_range),
            sight,
            rng,
            BrainTuning::from_config(&config.ai),
        );

        Self {
            kind: template.kind,
            ctx,
            machine: StateMachine::new(graph),
            stance: None,
            cadence: AttackCadence::new(),
            vitals: Vitals::new(template.max_health),
            drops: template.drops().iter().copied().collect(),
            corpse: None,
            active: true,
        }
    }

    #[inline]
    pub fn id(&self) -> EntityId {
        self.ctx.id
    }

    #[inline]
    pub fn kind(&self) -> EnemyKind {
        self.kind
    }

    /// Whether the controller still runs. False once dead.
    #[inline]
    pub fn is_active(&self) -> bool {
        self.active
    }

    #[inline]
    pub fn is_dead(&self) -> bool {
        self.vitals.is_dead()
    }

    #[inline]
    pub fn vitals(&self) -> &Vitals {
        &self.vitals
    }

    pub(crate) fn vitals_mut(&mut self) -> &mut Vitals {
        &mut self.vitals
    }

    #[inline]
    pub fn blackboard(&self) -> &Blackboard {
        &self.ctx.blackboard
    }

    #[inline]
    pub fn context(&self) -> &AgentContext {
        &self.ctx
    }

    #[inline]
    pub fn context_mut(&mut self) -> &mut AgentContext {
        &mut self.ctx
    }

    #[inline]
    pub fn machine(&self) -> &StateMachine {
        &self.machine
    }

    #[inline]
    pub fn stance(&self) -> Option<AttackStance> {
        self.stance
    }

    #[inline]
    pub fn corpse(&self) -> Option<&CorpseTimeline> {
        self.corpse.as_ref()
    }

    /// Route a trigger-volume event to the blackboard. Ignored once inactive.
    pub fn on_volume(&mut self, event: VolumeEvent) {
        if !self.active {
            return;
        }
        if let Some(write) = self.ctx.blackboard.on_volume(event) {
            self.ctx.outbox.anim.push(write);
        }
    }

    /// Run one brain tick: sense, act, transition.
    ///
    /// Returns `None` when the controller is inactive.
    pub fn think(
        &mut self,
        graph: &AgentGraph,
        perception: &Perception,
        physics: &dyn PhysicsOracle,
    ) -> Option<Step> {
        if !self.active {
            return None;
        }
        self.ctx.pose = perception.pose;
        self.ctx.nav = perception.nav;
        self.ctx.target = perception.target;
        self.ctx.dt = perception.dt;

        let reading = self.ctx.sight.update(
            perception.dt,
            &perception.pose,
            perception.target.position,
            physics,
        );
        if reading.evaluated {
            self.ctx.blackboard.player_in_sight = reading.visible;
            self.ctx.write_flag(AnimParam::SeesPlayer, reading.visible);
            trace!(agent = %self.id(), visible = reading.visible, "sight evaluated");
        }

        let step = self.machine.tick(graph, &mut self.ctx);
        self.track_ranged_attack();
        self.stance = stance_of(graph.name_of(step.current));

        if step.changed() {
            debug!(
                agent = %self.id(),
                kind = %self.kind,
                from = graph.name_of(step.previous),
                to = graph.name_of(step.current),
                "state changed"
            );
        }
        Some(step)
    }

    /// The ranged attack animation runs while the last range flag written
    /// this tick is set.
    fn track_ranged_attack(&mut self) {
        if !self.kind.is_ranged() {
            return;
        }
        let last = self.ctx.outbox.anim.iter().rev().find_map(|write| match write.param {
            AnimParam::InProjectileRange | AnimParam::InFlamethrowerRange => match write.value {
                AnimValue::Bool(v) => Some(v),
                _ => None,
            },
            _ => None,
        });
        if let Some(attacking) = last {
            self.ctx.blackboard.is_ranged_attacking = attacking;
        }
    }

    /// Advance the attack cadence; returns a hit that landed on the target.
    pub fn attack(
        &mut self,
        distance: f32,
        dt: f32,
        config: &EnemyAttackConfig,
    ) -> Option<EnemyHit> {
        if !self.active {
            return None;
        }
        let hit = self
            .cadence
            .advance(self.stance, &mut self.ctx.blackboard, distance, dt, config)?;
        if hit.stance == AttackStance::Melee {
            self.ctx
                .outbox
                .anim
                .push(AnimCommand::int(AnimParam::AttackType, 0));
        }
        Some(hit)
    }

    /// Take everything queued for the services since the last flush.
    pub fn take_outbox(&mut self) -> Outbox {
        self.ctx.outbox.drain()
    }

    /// Deactivate the controller and start the corpse timeline.
    ///
    /// Returns the pickups to release. Calling this twice returns nothing the
    /// second time.
    pub fn kill(&mut self, config: &CombatConfig) -> AttachedPickups {
        if !self.active {
            return AttachedPickups::new();
        }
        self.active = false;
        self.stance = None;
        self.ctx.blackboard.clear();
        self.ctx.outbox = Outbox::default();
        self.ctx.push_nav(NavCommand::Stop);
        self.ctx.write_flag(AnimParam::Alive, false);
        self.ctx.write_flag(AnimParam::IsDead, true);
        self.corpse = Some(CorpseTimeline::from_config(config));
        info!(
            agent = %self.id(),
            kind = %self.kind,
            health = self.vitals.health(),
            "agent died"
        );
        core::mem::take(&mut self.drops)
    }

    /// Advance the corpse timeline. `None` while alive.
    pub fn advance_corpse(&mut self, dt: f32) -> Option<CorpseEvent> {
        let event = self.corpse.as_mut()?.advance(dt)?;
        if event == CorpseEvent::Fade {
            self.ctx
                .outbox
                .anim
                .push(AnimCommand::trigger(AnimParam::Fade));
        }
        Some(event)
    }
}

fn stance_of(state: &str) -> Option<AttackStance> {
    match state {
        graphs::MELEE => Some(AttackStance::Melee),
        graphs::RANGED => Some(AttackStance::Gun),
        graphs::FLAME => Some(AttackStance::Flame),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec3;
    use state_machine::TransitionPolicy;

    use super::*;
    use crate::ai::graph_for;
    use crate::env::{Collider, LayerMask, Ray, RayHit};

    /// Nothing blocks sight; the player is wherever the ray points.
    struct OpenField;

    impl PhysicsOracle for OpenField {
        fn raycast(&self, ray: Ray, max: f32, _mask: LayerMask) -> Option<RayHit> {
            Some(RayHit {
                collider: Collider::Player,
                point: ray.at(max.min(1.0)),
                distance: max.min(1.0),
            })
        }

        fn sphere_cast(&self, ray: Ray, _r: f32, max: f32, mask: LayerMask) -> Option<RayHit> {
            self.raycast(ray, max, mask)
        }
    }

    struct TestContext {
        graph: AgentGraph,
        agent: Agent,
    }

    impl TestContext {
        fn new(kind: EnemyKind) -> Self {
            let graph = graph_for(kind, TransitionPolicy::LastWins).unwrap();
            let agent = Agent::spawn(
                EntityId(3),
                &EnemyTemplate::for_kind(kind),
                &graph,
                &ArenaConfig::default(),
                PcgRng::seeded(3),
            );
            Self { graph, agent }
        }

        fn think(&mut self, target: Vec3) -> Option<Step> {
            let perception = Perception {
                pose: Pose::new(Vec3::ZERO, Vec3::Z),
                nav: NavStatus::default(),
                target: TargetSnapshot {
                    position: target,
                    ..TargetSnapshot::default()
                },
                dt: 0.1,
            };
            self.agent.think(&self.graph, &perception, &OpenField)
        }

        fn state(&self) -> &str {
            self.graph.name_of(self.agent.machine().current())
        }
    }

    #[test]
    fn projectile_range_is_drawn_per_agent() {
        let ctx = TestContext::new(EnemyKind::Armoured);
        let range = ctx.agent.blackboard().projectile_attack_range;
        assert!((5.0..15.0).contains(&range));
    }

    #[test]
    fn melee_agent_engages_inside_melee_volume() {
        let mut ctx = TestContext::new(EnemyKind::Melee);
        ctx.agent
            .on_volume(VolumeEvent::new(RangeVolume::Melee, VolumePhase::Enter, 1.0));

        let step = ctx.think(Vec3::new(0.0, 0.0, 1.0)).unwrap();
        assert!(step.changed());
        assert_eq!(ctx.state(), graphs::MELEE);
        assert_eq!(ctx.agent.stance(), Some(AttackStance::Melee));
        assert!(ctx.agent.blackboard().player_in_sight);

        ctx.think(Vec3::new(0.0, 0.0, 1.0));
        assert_ne!(ctx.agent.blackboard().attack_type, 0);
        let hit = ctx
            .agent
            .attack(1.0, 1.2, &EnemyAttackConfig::default())
            .unwrap();
        assert_eq!(hit.damage, 10.0);
    }

    #[test]
    fn flamer_lights_up_after_entering_flame_state() {
        let mut ctx = TestContext::new(EnemyKind::Flamer);
        ctx.agent.on_volume(VolumeEvent::new(
            RangeVolume::Flamethrower,
            VolumePhase::Enter,
            4.0,
        ));

        ctx.think(Vec3::new(0.0, 0.0, 4.0));
        assert_eq!(ctx.state(), graphs::FLAME);
        assert!(ctx.agent.blackboard().is_ranged_attacking);

        ctx.think(Vec3::new(0.0, 0.0, 4.0));
        assert_eq!(ctx.agent.blackboard().attack_type, 1);
    }

    #[test]
    fn dead_agent_stops_thinking() {
        let mut ctx = TestContext::new(EnemyKind::Armoured);
        let drops = ctx.agent.kill(&CombatConfig::default());
        assert_eq!(drops.len(), 1);
        assert!(ctx.agent.kill(&CombatConfig::default()).is_empty());

        assert!(ctx.think(Vec3::new(0.0, 0.0, 3.0)).is_none());
        ctx.agent
            .on_volume(VolumeEvent::new(RangeVolume::Melee, VolumePhase::Enter, 1.0));
        assert!(!ctx.agent.blackboard().in_melee_range);

        let outbox = ctx.agent.take_outbox();
        assert_eq!(outbox.nav, vec![NavCommand::Stop]);
        assert_eq!(ctx.agent.corpse().map(|c| c.phase()), Some(CorpsePhase::Ragdoll));
    }
}
