//! One-way notifications for rendering, audio and UI.
//!
//! The simulation never reads anything back from its observers. Every frame
//! produces an ordered list of notifications which is returned to the caller,
//! published on the [`crate::NotificationBus`] and optionally journaled.

use arena_core::{
    AttackStance, EnemyKind, EntityId, LevelSummary, MusicTrack, PickupKind, WeaponKind,
};
use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Routing topic of a notification.
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub enum Topic {
    /// Score and kill counter.
    Score,
    /// Player health, weapons and pickups.
    Player,
    /// Agent lifecycle and brain state.
    Agents,
    /// Clips and music.
    Audio,
    /// Level start and end.
    Level,
}

impl Topic {
    pub const ALL: [Topic; 5] = [
        Topic::Score,
        Topic::Player,
        Topic::Agents,
        Topic::Audio,
        Topic::Level,
    ];
}

/// Sound effects the core asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Clip {
    WeaponFired(WeaponKind),
    DryFire(WeaponKind),
    Reloaded(WeaponKind),
    Punch,
    EnemyAttack(AttackStance),
    PickupCollected,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Notification {
    ScoreChanged {
        score: u64,
        points: u32,
        kills: u32,
    },
    HealthChanged {
        health: f32,
        low_health: bool,
    },
    PlayerDied,
    AmmoChanged {
        weapon: WeaponKind,
        loaded: u32,
        reserve: u32,
    },
    AgentSpawned {
        agent: EntityId,
        kind: EnemyKind,
        position: Vec3,
        wave: bool,
    },
    StateChanged {
        agent: EntityId,
        from: String,
        to: String,
    },
    AgentDied {
        agent: EntityId,
        kind: EnemyKind,
    },
    /// The corpse started dissolving; particle effects go here.
    CorpseDissolving {
        agent: EntityId,
    },
    AgentDespawned {
        agent: EntityId,
    },
    PickupDropped {
        pickup: u32,
        kind: PickupKind,
        position: Vec3,
    },
    PickupCollected {
        pickup: u32,
        kind: PickupKind,
    },
    PickupRespawned {
        pickup: u32,
    },
    PlayClip {
        clip: Clip,
    },
    MusicCrossfade {
        from: MusicTrack,
        to: MusicTrack,
    },
    MusicChanged {
        track: MusicTrack,
    },
    LevelReset,
    LevelEnded {
        summary: LevelSummary,
    },
}

impl Notification {
    pub fn topic(&self) -> Topic {
        use Notification::*;
        match self {
            ScoreChanged { .. } => Topic::Score,
            HealthChanged { .. }
            | PlayerDied
            | AmmoChanged { .. }
            | PickupDropped { .. }
            | PickupCollected { .. }
            | PickupRespawned { .. } => Topic::Player,
            AgentSpawned { .. }
            | StateChanged { .. }
            | AgentDied { .. }
            | CorpseDissolving { .. }
            | AgentDespawned { .. } => Topic::Agents,
            PlayClip { .. } | MusicCrossfade { .. } | MusicChanged { .. } => Topic::Audio,
            LevelReset | LevelEnded { .. } => Topic::Level,
        }
    }
}
