//! Predicates consulted by state transitions.
//!
//! Range decisions mirror the raw range flag into the matching animation
//! parameter. That write is display-only; the returned bool is what drives the
//! graph.

use state_machine::Decision;

use super::AgentContext;
use crate::env::AnimParam;

/// Whether the sensor currently sees the target. Not used by the built-in
/// graphs; available to custom ones.
#[derive(Clone, Copy, Debug, Default)]
pub struct SeesPlayer;

impl Decision<AgentContext> for SeesPlayer {
    fn decide(&self, ctx: &mut AgentContext) -> bool {
        ctx.blackboard.player_in_sight
    }

    fn name(&self) -> &'static str {
        "SeesPlayer"
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct InMeleeRange;

impl Decision<AgentContext> for InMeleeRange {
    fn decide(&self, ctx: &mut AgentContext) -> bool {
        let in_range = ctx.blackboard.in_melee_range;
        ctx.write_flag(AnimParam::PlayerInRange, in_range);
        in_range
    }

    fn name(&self) -> &'static str {
        "InMeleeRange"
    }
}

/// In the projectile volume and currently seeing the target.
#[derive(Clone, Copy, Debug, Default)]
pub struct InProjectileRange;

impl Decision<AgentContext> for InProjectileRange {
    fn decide(&self, ctx: &mut AgentContext) -> bool {
        let in_range = ctx.blackboard.in_projectile_range;
        ctx.write_flag(AnimParam::InProjectileRange, in_range);
        in_range && ctx.blackboard.player_in_sight
    }

    fn name(&self) -> &'static str {
        "InProjectileRange"
    }
}

/// In the flamethrower volume and currently seeing the target.
#[derive(Clone, Copy, Debug, Default)]
pub struct InFlamethrowerRange;

impl Decision<AgentContext> for InFlamethrowerRange {
    fn decide(&self, ctx: &mut AgentContext) -> bool {
        let in_range = ctx.blackboard.in_flamethrower_range;
        ctx.write_flag(AnimParam::InFlamethrowerRange, in_range);
        in_range && ctx.blackboard.player_in_sight
    }

    fn name(&self) -> &'static str {
        "InFlamethrowerRange"
    }
}
