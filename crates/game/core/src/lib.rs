//! Engine-agnostic enemy AI, combat resolution and spawn direction.
//!
//! `arena-core` owns the rules of an arena shooter: per-agent perception and
//! state-machine brains, hit-zone damage and kill scoring, the time-banded
//! spawn director, player vitals, pickups and tension music. Physics,
//! navigation and animation are reached only through the traits in [`env`],
//! and every multi-frame effect is an explicit timer advanced by the caller's
//! frame loop.
pub mod agent;
pub mod ai;
pub mod combat;
pub mod config;
pub mod entity;
pub mod env;
pub mod error;
pub mod level;
pub mod music;
pub mod pickup;
pub mod player;
pub mod spawn;
pub mod timer;

pub use agent::{
    Agent, Blackboard, ColliderTag, CorpseEvent, CorpsePhase, DamageOutcome, EnemyKind,
    EnemyRoster, EnemyTemplate, Perception, RangeVolume, SightSensor, VolumeEvent, VolumePhase,
};
pub use ai::{AgentContext, AgentGraph, BrainRegistry, BrainTuning, TargetSnapshot};
pub use combat::{
    Arsenal, AttackStance, CombatEvent, CombatResolver, Death, EnemyHit, HitOutcome, HitZone,
    ScoreCategory, ScoreLedger, ScoreTable, Weapon, WeaponError, WeaponKind, WeaponProfile,
};
pub use config::ArenaConfig;
pub use entity::{EntityAllocator, EntityId, Pose};
pub use env::{
    AnimCommand, AnimParam, AnimationSink, Collider, Impulse, ImpulseSink, LayerMask,
    NavCommand, NavStatus, NavigationOracle, NavigationQuery, OracleError, PcgRng, PhysicsOracle,
    Ray, RayHit, RngOracle,
};
pub use error::{ErrorSeverity, GameError};
pub use level::{LevelClock, LevelOutcome, LevelSummary};
pub use music::{MusicChange, MusicDirector, MusicTrack, Tension};
pub use pickup::{Pickup, PickupEffect, PickupKind, PickupOrigin};
pub use player::{PlayerDamage, PlayerVitals};
pub use spawn::{SpawnCommand, SpawnContext, SpawnDirector, SpawnError, SpawnSchedule};
pub use state_machine::TransitionPolicy;
pub use timer::{DeferredQueue, Due, TimedFade, TimerHandle};
