//! Applies hits to agents, keeps the ledger and dispatches deaths.

use glam::Vec3;
use tracing::debug;

use super::{
    HitZone, ScoreCategory, ScoreLedger, ScoreTable, ShotHit, Strike, WeaponProfile,
    hit_damage, kill_category,
};
use crate::agent::{Agent, AttachedPickups, ColliderTag, DamageOutcome, EnemyKind};
use crate::config::CombatConfig;
use crate::entity::EntityId;
use crate::env::{AnimCommand, AnimParam, Impulse, RngOracle};

/// A hit on an agent, produced by a weapon or a punch and consumed at once.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CombatEvent {
    pub target: EntityId,
    pub tag: ColliderTag,
    pub zone: HitZone,
    pub strike: Strike,
    pub in_effective_range: bool,
    pub point: Vec3,
    /// Travel direction of the projectile or swing.
    pub direction: Vec3,
}

impl CombatEvent {
    pub fn shot(target: EntityId, tag: ColliderTag, weapon: &WeaponProfile, shot: &ShotHit) -> Self {
        Self {
            target,
            tag,
            zone: HitZone::of(tag),
            strike: weapon.strike(),
            in_effective_range: shot.in_effective_range,
            point: shot.hit.point,
            direction: shot.direction,
        }
    }

    pub fn punch(
        target: EntityId,
        tag: ColliderTag,
        config: &CombatConfig,
        point: Vec3,
        direction: Vec3,
    ) -> Self {
        Self {
            target,
            tag,
            zone: HitZone::Punch,
            strike: Strike::punch(config),
            in_effective_range: true,
            point,
            direction,
        }
    }
}

/// Points awarded by one hit.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ScoreDelta {
    pub points: u32,
    pub hit: Option<ScoreCategory>,
    pub kill: Option<ScoreCategory>,
}

/// The agent died on this hit.
#[derive(Clone, Debug, PartialEq)]
pub struct Death {
    pub agent: EntityId,
    pub kind: EnemyKind,
    /// Pickups to release after the drop delay.
    pub drops: AttachedPickups,
}

#[derive(Clone, Debug, PartialEq)]
pub struct HitOutcome {
    /// Health removed. Zero for hits on a corpse.
    pub damage: f32,
    pub delta: ScoreDelta,
    /// Impulse for the physics service: a ragdoll launch on death, a shove on
    /// a corpse, nothing for a live body.
    pub impulse: Option<Impulse>,
    pub death: Option<Death>,
}

#[derive(Clone, Debug, Default)]
pub struct CombatResolver {
    scores: ScoreTable,
    combat: CombatConfig,
}

impl CombatResolver {
    pub fn new(scores: ScoreTable, combat: CombatConfig) -> Self {
        Self { scores, combat }
    }

    #[inline]
    pub fn scores(&self) -> &ScoreTable {
        &self.scores
    }

    #[inline]
    pub fn combat(&self) -> &CombatConfig {
        &self.combat
    }

    /// Resolve one hit against `agent`.
    ///
    /// Death fires once. Later hits shove the corpse and award nothing.
    pub fn resolve_hit(
        &self,
        event: &CombatEvent,
        agent: &mut Agent,
        ledger: &mut ScoreLedger,
        rng: &mut impl RngOracle,
    ) -> HitOutcome {
        let direction = event.direction.try_normalize().unwrap_or(Vec3::Z);

        if agent.is_dead() {
            return HitOutcome {
                damage: 0.0,
                delta: ScoreDelta::default(),
                impulse: Some(Impulse {
                    target: agent.id(),
                    tag: event.tag,
                    force: direction * event.strike.stopping_power,
                    torque: Vec3::ZERO,
                }),
                death: None,
            };
        }

        let hit = hit_damage(event.zone, &event.strike, event.in_effective_range);
        let outcome = agent.vitals_mut().apply_damage(hit.damage);

        let mut delta = ScoreDelta {
            hit: event.zone.hit_category(),
            ..ScoreDelta::default()
        };
        if let Some(category) = delta.hit {
            delta.points += ledger.award(category, &self.scores);
        }

        match outcome {
            DamageOutcome::Killed { .. } => {
                delta.kill = kill_category(event.tag);
                if let Some(category) = delta.kill {
                    delta.points += ledger.award(category, &self.scores);
                }
                ledger.record_kill(agent.kind());

                let drops = agent.kill(&self.combat);
                let spin = self.combat.ragdoll_max_torque;
                let torque = Vec3::new(
                    rng.range_f32(-spin, spin),
                    rng.range_f32(-spin, spin),
                    rng.range_f32(-spin, spin),
                ) * hit.force;

                debug!(
                    agent = %agent.id(),
                    tag = %event.tag,
                    zone = %event.zone,
                    points = delta.points,
                    "killing blow"
                );
                HitOutcome {
                    damage: hit.damage,
                    delta,
                    impulse: Some(Impulse {
                        target: agent.id(),
                        tag: event.tag,
                        force: direction * hit.force,
                        torque,
                    }),
                    death: Some(Death {
                        agent: agent.id(),
                        kind: agent.kind(),
                        drops,
                    }),
                }
            }
            DamageOutcome::Wounded { after, .. } => {
                agent
                    .context_mut()
                    .outbox
                    .anim
                    .push(AnimCommand::trigger(AnimParam::Hit));
                debug!(
                    agent = %agent.id(),
                    zone = %event.zone,
                    damage = hit.damage,
                    health = after,
                    "hit"
                );
                HitOutcome {
                    damage: hit.damage,
                    delta,
                    impulse: None,
                    death: None,
                }
            }
            DamageOutcome::AlreadyDead => HitOutcome {
                damage: 0.0,
                delta: ScoreDelta::default(),
                impulse: None,
                death: None,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use state_machine::TransitionPolicy;

    use super::*;
    use crate::agent::EnemyTemplate;
    use crate::ai::graph_for;
    use crate::config::ArenaConfig;
    use crate::env::PcgRng;

    struct TestContext {
        resolver: CombatResolver,
        ledger: ScoreLedger,
        rng: PcgRng,
    }

    impl TestContext {
        fn new() -> Self {
            Self {
                resolver: CombatResolver::default(),
                ledger: ScoreLedger::new(),
                rng: PcgRng::seeded(21),
            }
        }

        fn spawn(&mut self, kind: EnemyKind) -> Agent {
            let graph = graph_for(kind, TransitionPolicy::LastWins).unwrap();
            self.ledger.record_spawn(kind);
            Agent::spawn(
                EntityId(9),
                &EnemyTemplate::for_kind(kind),
                &graph,
                &ArenaConfig::default(),
                PcgRng::seeded(9),
            )
        }

        fn shoot(&mut self, agent: &mut Agent, tag: ColliderTag, in_range: bool) -> HitOutcome {
            let event = CombatEvent {
                target: agent.id(),
                tag,
                zone: HitZone::of(tag),
                strike: WeaponProfile::handgun().strike(),
                in_effective_range: in_range,
                point: Vec3::ZERO,
                direction: Vec3::Z,
            };
            self.resolver
                .resolve_hit(&event, agent, &mut self.ledger, &mut self.rng)
        }
    }

    #[test]
    fn headshot_kills_melee_once() {
        let mut ctx = TestContext::new();
        let mut agent = ctx.spawn(EnemyKind::Melee);

        let outcome = ctx.shoot(&mut agent, ColliderTag::EnemyHead, true);
        assert_eq!(agent.vitals().health(), -175.0);
        assert_eq!(outcome.delta.points, 20 + 50);
        assert_eq!(outcome.delta.kill, Some(ScoreCategory::KillMelee));
        assert!(outcome.death.is_some());
        assert_eq!(ctx.ledger.kills(), 1);
        assert_eq!(ctx.ledger.active(), 0);
        assert!(!agent.is_active());

        let again = ctx.shoot(&mut agent, ColliderTag::EnemyHead, true);
        assert!(again.death.is_none());
        assert_eq!(again.delta, ScoreDelta::default());
        assert_eq!(again.impulse.map(|i| i.force), Some(Vec3::Z * 3.25));
        assert_eq!(agent.vitals().health(), -175.0);
        assert_eq!(ctx.ledger.score(), 70);
        assert_eq!(ctx.ledger.kills(), 1);
    }

    #[test]
    fn limb_kill_pays_only_the_body_shot() {
        let mut ctx = TestContext::new();
        let mut agent = ctx.spawn(EnemyKind::Melee);

        let mut killing_blow = None;
        for _ in 0..5 {
            let outcome = ctx.shoot(&mut agent, ColliderTag::EnemyBodypart, true);
            if outcome.death.is_some() {
                killing_blow = Some(outcome);
                break;
            }
        }
        let killing_blow = killing_blow.unwrap();
        assert_eq!(killing_blow.delta.points, 10);
        assert_eq!(killing_blow.delta.hit, Some(ScoreCategory::BodyShot));
        assert_eq!(killing_blow.delta.kill, None);
        assert_eq!(ctx.ledger.kills(), 1);
        assert_eq!(ctx.ledger.active_of(EnemyKind::Melee), 0);
        // 25 health takes three 10-point body shots
        assert_eq!(ctx.ledger.score(), 30);
    }

    #[test]
    fn body_shots_out_of_range_are_weak() {
        let mut ctx = TestContext::new();
        let mut agent = ctx.spawn(EnemyKind::Armoured);

        let outcome = ctx.shoot(&mut agent, ColliderTag::ArmouredEnemy, false);
        assert!((outcome.damage - 1.0).abs() < 1e-6);
        assert_eq!(outcome.delta.points, 10);
        assert!(outcome.impulse.is_none());
    }

    #[test]
    fn armor_absorbs_score() {
        let mut ctx = TestContext::new();
        let mut agent = ctx.spawn(EnemyKind::Flamer);

        let outcome = ctx.shoot(&mut agent, ColliderTag::FlamerEnemy, true);
        assert_eq!(outcome.delta, ScoreDelta::default());
        assert!((agent.vitals().health() - 199.5).abs() < 1e-4);
    }

    #[test]
    fn flamer_death_releases_every_pickup() {
        let mut ctx = TestContext::new();
        let mut agent = ctx.spawn(EnemyKind::Flamer);

        let mut death = None;
        for _ in 0..20 {
            let outcome = ctx.shoot(&mut agent, ColliderTag::EnergyPack, true);
            if outcome.death.is_some() {
                death = outcome.death;
            }
        }
        let death = death.unwrap();
        assert_eq!(death.kind, EnemyKind::Flamer);
        assert_eq!(death.drops.len(), 2);
        // 20 energy-pack hits: 19 before dying plus the kill
        assert_eq!(ctx.ledger.score(), 20 * 20 + 150);
        assert_eq!(ctx.ledger.active_of(EnemyKind::Flamer), 0);
    }

    #[test]
    fn punch_scores_and_damages() {
        let mut ctx = TestContext::new();
        let mut agent = ctx.spawn(EnemyKind::Melee);
        let event = CombatEvent::punch(
            agent.id(),
            ColliderTag::MeleeEnemy,
            &CombatConfig::default(),
            Vec3::ZERO,
            Vec3::X,
        );
        let outcome = ctx
            .resolver
            .resolve_hit(&event, &mut agent, &mut ctx.ledger, &mut ctx.rng);
        assert_eq!(outcome.damage, 5.0);
        assert_eq!(outcome.delta.hit, Some(ScoreCategory::Punch));
        assert_eq!(agent.vitals().health(), 20.0);
    }
}
