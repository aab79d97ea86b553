//! State graphs for each enemy kind.
//!
//! The action and decision set is closed: every graph is assembled here from
//! the variants in [`super::actions`] and [`super::decisions`] once at startup
//! and shared by all agents of the kind.

use std::sync::Arc;

use state_machine::{GraphBuilder, GraphError, StateGraph, TargetRef, TransitionPolicy};

use super::actions::{FlameAttackPlayer, GetInRange, PerformMeleeAttack, ShootPlayer};
use super::decisions::{InFlamethrowerRange, InMeleeRange, InProjectileRange};
use super::AgentContext;
use crate::agent::EnemyKind;

pub const HUNT: &str = "Hunt";
pub const MELEE: &str = "Melee";
pub const RANGED: &str = "Ranged";
pub const FLAME: &str = "Flame";

pub type AgentGraph = StateGraph<AgentContext>;

const REMAIN: TargetRef = TargetRef::Remain;

fn melee_state(builder: &mut GraphBuilder<AgentContext>) {
    builder
        .state(MELEE)
        .action(PerformMeleeAttack)
        .transition(InMeleeRange, REMAIN, HUNT);
}

/// Chase, then brawl.
pub fn melee_graph(policy: TransitionPolicy) -> Result<AgentGraph, GraphError> {
    let mut builder = GraphBuilder::new(policy);
    builder
        .state(HUNT)
        .action(GetInRange)
        .transition(InMeleeRange, MELEE, REMAIN);
    melee_state(&mut builder);
    builder.build(HUNT)
}

/// Chase, shoot when in range and in sight, brawl when cornered.
pub fn armoured_graph(policy: TransitionPolicy) -> Result<AgentGraph, GraphError> {
    let mut builder = GraphBuilder::new(policy);
    builder
        .state(HUNT)
        .action(GetInRange)
        .transition(InProjectileRange, RANGED, REMAIN)
        .transition(InMeleeRange, MELEE, REMAIN);
    builder
        .state(RANGED)
        .action(ShootPlayer)
        .transition(InProjectileRange, REMAIN, HUNT)
        .transition(InMeleeRange, MELEE, REMAIN);
    melee_state(&mut builder);
    builder.build(HUNT)
}

/// Chase, flame while closing in, brawl when cornered.
pub fn flamer_graph(policy: TransitionPolicy) -> Result<AgentGraph, GraphError> {
    let mut builder = GraphBuilder::new(policy);
    builder
        .state(HUNT)
        .action(GetInRange)
        .transition(InFlamethrowerRange, FLAME, REMAIN)
        .transition(InMeleeRange, MELEE, REMAIN);
    builder
        .state(FLAME)
        .action(FlameAttackPlayer)
        .action(GetInRange)
        .transition(InFlamethrowerRange, REMAIN, HUNT)
        .transition(InMeleeRange, MELEE, REMAIN);
    melee_state(&mut builder);
    builder.build(HUNT)
}

pub fn graph_for(kind: EnemyKind, policy: TransitionPolicy) -> Result<AgentGraph, GraphError> {
    match kind {
        EnemyKind::Melee => melee_graph(policy),
        EnemyKind::Armoured => armoured_graph(policy),
        EnemyKind::Flamer => flamer_graph(policy),
    }
}

/// One shared graph per enemy kind.
#[derive(Clone, Debug)]
pub struct BrainRegistry {
    graphs: [Arc<AgentGraph>; EnemyKind::COUNT],
    policy: TransitionPolicy,
}

impl BrainRegistry {
    pub fn new(policy: TransitionPolicy) -> Result<Self, GraphError> {
        Ok(Self {
            graphs: [
                Arc::new(melee_graph(policy)?),
                Arc::new(armoured_graph(policy)?),
                Arc::new(flamer_graph(policy)?),
            ],
            policy,
        })
    }

    #[inline]
    pub fn policy(&self) -> TransitionPolicy {
        self.policy
    }

    pub fn graph(&self, kind: EnemyKind) -> &Arc<AgentGraph> {
        &self.graphs[kind.index()]
    }
}
