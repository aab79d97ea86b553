//! Per-tick behaviors run by states.

use state_machine::Action;
use tracing::trace;

use super::AgentContext;
use crate::env::{AnimParam, NavCommand, RngOracle};

/// Chase the target: periodically re-issue the target position as destination.
#[derive(Clone, Copy, Debug, Default)]
pub struct GetInRange;

impl Action<AgentContext> for GetInRange {
    fn act(&self, ctx: &mut AgentContext) {
        let interval = ctx.tuning.get_in_range_interval;
        if !ctx.blackboard.check_countdown_elapsed(interval, ctx.dt) {
            return;
        }
        if ctx.nav.path_pending || !ctx.nav.on_surface {
            return;
        }

        ctx.push_nav(NavCommand::Resume);
        // Chasing a target in mid-air would send the agent off the mesh.
        if ctx.target.grounded {
            ctx.push_nav(NavCommand::SetDestination(ctx.target.position));
            trace!(agent = %ctx.id, target = ?ctx.target.position, "destination refreshed");
        }
    }

    fn name(&self) -> &'static str {
        "GetInRange"
    }
}

/// Pick a random swing while the target is in melee reach.
#[derive(Clone, Copy, Debug, Default)]
pub struct PerformMeleeAttack;

impl PerformMeleeAttack {
    /// Swing variants are 1..=3.
    const VARIANTS: (u32, u32) = (1, 4);
}

impl Action<AgentContext> for PerformMeleeAttack {
    fn act(&self, ctx: &mut AgentContext) {
        if ctx.blackboard.in_melee_range {
            if ctx.blackboard.attack_type == 0 {
                ctx.write_flag(AnimParam::PlayerInRange, true);
                let (lo, hi) = Self::VARIANTS;
                let swing = ctx.rng.range_u32(lo, hi) as i32;
                ctx.set_attack_type(swing);
            }
        } else {
            ctx.write_flag(AnimParam::PlayerInRange, false);
            ctx.set_attack_type(0);
        }
    }

    fn name(&self) -> &'static str {
        "PerformMeleeAttack"
    }
}

/// Fire at the last known target position when it is inside the attack cone.
#[derive(Clone, Copy, Debug, Default)]
pub struct ShootPlayer;

impl ShootPlayer {
    /// Shot variants are 1..=2.
    const VARIANTS: (u32, u32) = (1, 3);
}

impl Action<AgentContext> for ShootPlayer {
    fn act(&self, ctx: &mut AgentContext) {
        if !ctx.blackboard.in_projectile_range {
            return;
        }
        if ctx.facing_last_known() {
            let (lo, hi) = Self::VARIANTS;
            let shot = ctx.rng.range_u32(lo, hi) as i32;
            ctx.set_attack_type(shot);
        } else {
            ctx.set_attack_type(0);
        }
    }

    fn name(&self) -> &'static str {
        "ShootPlayer"
    }
}

/// Keep the flamethrower lit while the ranged attack animation runs and the
/// target is inside the attack cone.
#[derive(Clone, Copy, Debug, Default)]
pub struct FlameAttackPlayer;

impl Action<AgentContext> for FlameAttackPlayer {
    fn act(&self, ctx: &mut AgentContext) {
        if !ctx.blackboard.in_flamethrower_range {
            return;
        }
        let lit = ctx.blackboard.is_ranged_attacking && ctx.facing_last_known();
        ctx.set_attack_type(i32::from(lit));
    }

    fn name(&self) -> &'static str {
        "FlameAttackPlayer"
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec3;

    use super::*;
    use crate::agent::{Blackboard, SightSensor};
    use crate::ai::BrainTuning;
    use crate::entity::{EntityId, Pose};
    use crate::env::{AnimCommand, Collider, LayerMask, PcgRng, PhysicsOracle, Ray, RayHit};

    struct TestContext;

    impl TestContext {
        fn agent(ranged: bool) -> AgentContext {
            AgentContext::new(
                EntityId(1),
                Blackboard::new(ranged, 10.0),
                SightSensor::new(110.0, 20.0, 0.1),
                PcgRng::seeded(11),
                BrainTuning::default(),
            )
        }

        /// Agent at the origin facing +Z that has seen the target at `seen`.
        fn agent_that_saw(seen: Vec3) -> AgentContext {
            let mut ctx = Self::agent(true);
            ctx.pose = Pose::new(Vec3::ZERO, Vec3::Z);
            ctx.sight.update(0.1, &ctx.pose, seen, &OpenField);
            assert!(ctx.sight.visible());
            ctx
        }
    }

    struct OpenField;

    impl PhysicsOracle for OpenField {
        fn raycast(&self, ray: Ray, max_distance: f32, _mask: LayerMask) -> Option<RayHit> {
            Some(RayHit {
                collider: Collider::Player,
                point: ray.at(max_distance.min(5.0)),
                distance: max_distance.min(5.0),
            })
        }

        fn sphere_cast(&self, ray: Ray, _r: f32, max: f32, mask: LayerMask) -> Option<RayHit> {
            self.raycast(ray, max, mask)
        }
    }

    #[test]
    fn get_in_range_is_debounced() {
        let mut ctx = TestContext::agent(false);
        ctx.target.position = Vec3::new(3.0, 0.0, 4.0);
        ctx.dt = 0.1;

        GetInRange.act(&mut ctx);
        GetInRange.act(&mut ctx);
        assert!(ctx.outbox.nav.is_empty());

        GetInRange.act(&mut ctx);
        assert_eq!(
            ctx.outbox.nav,
            vec![
                NavCommand::Resume,
                NavCommand::SetDestination(Vec3::new(3.0, 0.0, 4.0))
            ]
        );
    }

    #[test]
    fn get_in_range_skips_destination_for_airborne_target() {
        let mut ctx = TestContext::agent(false);
        ctx.target.grounded = false;
        ctx.dt = 0.3;

        GetInRange.act(&mut ctx);
        assert_eq!(ctx.outbox.nav, vec![NavCommand::Resume]);
    }

    #[test]
    fn get_in_range_waits_for_pending_path() {
        let mut ctx = TestContext::agent(false);
        ctx.nav.path_pending = true;
        ctx.dt = 0.3;

        GetInRange.act(&mut ctx);
        assert!(ctx.outbox.nav.is_empty());
    }

    #[test]
    fn melee_attack_picks_swing_once_and_resets_when_out_of_reach() {
        let mut ctx = TestContext::agent(false);
        ctx.blackboard.in_melee_range = true;

        PerformMeleeAttack.act(&mut ctx);
        let swing = ctx.blackboard.attack_type;
        assert!((1..=3).contains(&swing));
        assert!(
            ctx.outbox
                .anim
                .contains(&AnimCommand::bool(AnimParam::PlayerInRange, true))
        );

        ctx.outbox.anim.clear();
        PerformMeleeAttack.act(&mut ctx);
        assert_eq!(ctx.blackboard.attack_type, swing);
        assert!(ctx.outbox.anim.is_empty());

        ctx.blackboard.in_melee_range = false;
        PerformMeleeAttack.act(&mut ctx);
        assert_eq!(ctx.blackboard.attack_type, 0);
    }

    #[test]
    fn shoot_requires_target_inside_attack_cone() {
        let mut ctx = TestContext::agent_that_saw(Vec3::new(0.0, 0.0, 8.0));
        ctx.blackboard.in_projectile_range = true;

        ShootPlayer.act(&mut ctx);
        assert!((1..=2).contains(&ctx.blackboard.attack_type));

        // Turn away: the last known position is now 90 degrees off.
        ctx.pose = Pose::new(Vec3::ZERO, Vec3::X);
        ShootPlayer.act(&mut ctx);
        assert_eq!(ctx.blackboard.attack_type, 0);
    }

    #[test]
    fn shoot_is_idle_out_of_projectile_range() {
        let mut ctx = TestContext::agent_that_saw(Vec3::new(0.0, 0.0, 8.0));
        ctx.blackboard.attack_type = 2;

        ShootPlayer.act(&mut ctx);
        assert_eq!(ctx.blackboard.attack_type, 2);
        assert!(ctx.outbox.anim.is_empty());
    }

    #[test]
    fn flame_needs_running_ranged_attack() {
        let mut ctx = TestContext::agent_that_saw(Vec3::new(0.0, 0.0, 4.0));
        ctx.blackboard.in_flamethrower_range = true;

        FlameAttackPlayer.act(&mut ctx);
        assert_eq!(ctx.blackboard.attack_type, 0);

        ctx.blackboard.is_ranged_attacking = true;
        FlameAttackPlayer.act(&mut ctx);
        assert_eq!(ctx.blackboard.attack_type, 1);
    }
}
