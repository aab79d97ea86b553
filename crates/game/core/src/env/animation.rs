//! Animation parameter sink.
//!
//! Animation playback is a black box that only receives parameter writes.
//! The core never reads animation state back.

use crate::entity::EntityId;

/// Named animator parameters written by the core.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AnimParam {
    SeesPlayer,
    PlayerInRange,
    InProjectileRange,
    InFlamethrowerRange,
    AttackType,
    Hit,
    Alive,
    IsDead,
    Fade,
}

/// Value carried by a parameter write.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AnimValue {
    Bool(bool),
    Int(i32),
    Float(f32),
    Trigger,
}

/// One queued parameter write.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AnimCommand {
    pub param: AnimParam,
    pub value: AnimValue,
}

impl AnimCommand {
    pub const fn bool(param: AnimParam, value: bool) -> Self {
        Self {
            param,
            value: AnimValue::Bool(value),
        }
    }

    pub const fn int(param: AnimParam, value: i32) -> Self {
        Self {
            param,
            value: AnimValue::Int(value),
        }
    }

    pub const fn trigger(param: AnimParam) -> Self {
        Self {
            param,
            value: AnimValue::Trigger,
        }
    }
}

/// Receiver of parameter writes.
pub trait AnimationSink {
    fn set_bool(&mut self, agent: EntityId, param: AnimParam, value: bool);
    fn set_int(&mut self, agent: EntityId, param: AnimParam, value: i32);
    fn set_float(&mut self, agent: EntityId, param: AnimParam, value: f32);
    fn set_trigger(&mut self, agent: EntityId, param: AnimParam);

    fn apply(&mut self, agent: EntityId, command: AnimCommand) {
        match command.value {
            AnimValue::Bool(v) => self.set_bool(agent, command.param, v),
            AnimValue::Int(v) => self.set_int(agent, command.param, v),
            AnimValue::Float(v) => self.set_float(agent, command.param, v),
            AnimValue::Trigger => self.set_trigger(agent, command.param),
        }
    }
}
