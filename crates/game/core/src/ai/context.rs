//! Owned per-agent context the state graph operates on.
//!
//! The context holds frame snapshots of the outside world plus the agent's own
//! mutable state. Behavior code never touches services directly: movement and
//! animation requests are queued in the [`Outbox`] and flushed by the runtime
//! after the tick. This keeps one graph shareable across every agent of a kind.

use glam::Vec3;

use crate::agent::{Blackboard, SightSensor};
use crate::config::AiConfig;
use crate::entity::{EntityId, Pose};
use crate::env::{AnimCommand, AnimParam, NavCommand, NavStatus, PcgRng};

/// What the agent knows about its target this frame.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TargetSnapshot {
    pub position: Vec3,
    /// Whether the target stands on walkable ground (not mid-jump).
    pub grounded: bool,
    pub alive: bool,
}

impl Default for TargetSnapshot {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            grounded: true,
            alive: true,
        }
    }
}

/// Per-kind behavior constants.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BrainTuning {
    pub get_in_range_interval: f32,
    pub attack_angle_threshold: f32,
}

impl BrainTuning {
    pub fn from_config(config: &AiConfig) -> Self {
        Self {
            get_in_range_interval: config.get_in_range_interval,
            attack_angle_threshold: config.attack_angle_threshold,
        }
    }
}

impl Default for BrainTuning {
    fn default() -> Self {
        Self::from_config(&AiConfig::default())
    }
}

/// Service requests produced during one tick.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Outbox {
    pub nav: Vec<NavCommand>,
    pub anim: Vec<AnimCommand>,
}

impl Outbox {
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nav.is_empty() && self.anim.is_empty()
    }

    /// Take everything queued so far.
    pub fn drain(&mut self) -> Outbox {
        core::mem::take(self)
    }
}

#[derive(Clone, Debug)]
pub struct AgentContext {
    pub id: EntityId,
    pub pose: Pose,
    pub target: TargetSnapshot,
    pub nav: NavStatus,
    /// Seconds covered by the current tick.
    pub dt: f32,
    pub blackboard: Blackboard,
    pub sight: SightSensor,
    pub rng: PcgRng,
    pub tuning: BrainTuning,
    pub outbox: Outbox,
}

impl AgentContext {
    pub fn new(
        id: EntityId,
        blackboard: Blackboard,
        sight: SightSensor,
        rng: PcgRng,
        tuning: BrainTuning,
    ) -> Self {
        Self {
            id,
            pose: Pose::default(),
            target: TargetSnapshot::default(),
            nav: NavStatus::default(),
            dt: 0.0,
            blackboard,
            sight,
            rng,
            tuning,
            outbox: Outbox::default(),
        }
    }

    /// Angle between the agent's forward and the last known target position.
    pub fn angle_to_last_known(&self) -> f32 {
        self.pose.angle_to(self.sight.last_known_position())
    }

    /// Whether the last known target position lies inside the attack cone.
    pub fn facing_last_known(&self) -> bool {
        self.angle_to_last_known() <= self.tuning.attack_angle_threshold
    }

    pub fn set_attack_type(&mut self, attack_type: i32) {
        self.blackboard.attack_type = attack_type;
        self.outbox
            .anim
            .push(AnimCommand::int(AnimParam::AttackType, attack_type));
    }

    pub fn write_flag(&mut self, param: AnimParam, value: bool) {
        self.outbox.anim.push(AnimCommand::bool(param, value));
    }

    pub fn push_nav(&mut self, command: NavCommand) {
        self.outbox.nav.push(command);
    }
}
