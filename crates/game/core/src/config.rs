//! Gameplay tunables.
//!
//! Every section has a `Default` carrying the shipped values, and the whole
//! struct deserializes with `serde(default)` so data files only need to list
//! the values they override.

use crate::combat::ScoreTable;

/// Root configuration consumed by every core subsystem.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ArenaConfig {
    pub sight: SightConfig,
    pub ai: AiConfig,
    pub volumes: VolumeConfig,
    pub combat: CombatConfig,
    pub scores: ScoreTable,
    pub player: PlayerConfig,
    pub enemy_attacks: EnemyAttackConfig,
    pub spawn: SpawnConfig,
    pub music: MusicConfig,
}

impl ArenaConfig {
    pub fn new() -> Self {
        Self::default()
    }
}

// ============================================================================
// Perception and decision making
// ============================================================================

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SightConfig {
    /// Minimum seconds between two visibility evaluations.
    pub interval: f32,
    pub default_fov_degrees: f32,
    pub sensor_radius: f32,
}

impl SightConfig {
    pub const MIN_FOV_DEGREES: f32 = 20.0;
    pub const MAX_FOV_DEGREES: f32 = 270.0;
}

impl Default for SightConfig {
    fn default() -> Self {
        Self {
            interval: 0.1,
            default_fov_degrees: 110.0,
            sensor_radius: 20.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AiConfig {
    /// Maximum angle between forward and target for ranged attack intent.
    pub attack_angle_threshold: f32,
    /// Cadence of destination refreshes while hunting.
    pub get_in_range_interval: f32,
    /// Per-agent projectile attack range is drawn from this interval.
    pub projectile_range: (f32, f32),
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            attack_angle_threshold: 20.0,
            get_in_range_interval: 0.25,
            projectile_range: (5.0, 15.0),
        }
    }
}

/// Radii of the trigger volumes carried by the target.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct VolumeConfig {
    pub melee_radius: f32,
    pub projectile_radius: f32,
    pub flamethrower_radius: f32,
}

impl Default for VolumeConfig {
    fn default() -> Self {
        Self {
            melee_radius: 2.0,
            projectile_radius: 15.0,
            flamethrower_radius: 6.0,
        }
    }
}

// ============================================================================
// Combat
// ============================================================================

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CombatConfig {
    /// Delay between a death and its pickup drop.
    pub pickup_drop_delay: f32,
    pub ragdoll_seconds: f32,
    pub dissolve_seconds: f32,
    pub fade_seconds: f32,
    /// Ragdoll torque is drawn from `[-max, max]` per axis and scaled by force.
    pub ragdoll_max_torque: f32,
    pub punch_damage: f32,
    pub punch_force: f32,
    pub punch_reach: f32,
}

impl Default for CombatConfig {
    fn default() -> Self {
        Self {
            pickup_drop_delay: 0.15,
            ragdoll_seconds: 5.0,
            dissolve_seconds: 3.5,
            fade_seconds: 1.0,
            ragdoll_max_torque: 360.0,
            punch_damage: 5.0,
            punch_force: 5.0,
            punch_reach: 1.5,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PlayerConfig {
    pub max_health: f32,
    pub low_health: f32,
    pub health_pickup: f32,
    pub pickup_respawn_seconds: f32,
    pub pickup_respawn_stagger: f32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            max_health: 100.0,
            low_health: 30.0,
            health_pickup: 15.0,
            pickup_respawn_seconds: 60.0,
            pickup_respawn_stagger: 5.0,
        }
    }
}

/// Damage and cadence of enemy attacks against the target.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EnemyAttackConfig {
    pub melee_damage: f32,
    pub melee_interval: f32,
    pub gun_damage: f32,
    pub gun_range: f32,
    pub gun_interval: f32,
    pub flame_damage: f32,
    pub flame_interval: f32,
}

impl Default for EnemyAttackConfig {
    fn default() -> Self {
        Self {
            melee_damage: 10.0,
            melee_interval: 1.2,
            gun_damage: 25.0,
            gun_range: 15.0,
            gun_interval: 1.5,
            flame_damage: 15.0,
            flame_interval: 0.5,
        }
    }
}

// ============================================================================
// Population and audio
// ============================================================================

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SpawnConfig {
    pub global_cap: u32,
    pub placement_attempts: u32,
    pub melee_distance: (f32, f32),
    pub armoured_distance: (f32, f32),
    pub flamer_distance: (f32, f32),
}

impl Default for SpawnConfig {
    fn default() -> Self {
        Self {
            global_cap: 30,
            placement_attempts: 10,
            melee_distance: (4.0, 9.25),
            armoured_distance: (6.0, 21.0),
            flamer_distance: (10.0, 25.0),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct MusicConfig {
    pub volume_step: f32,
    pub step_interval: f32,
    /// Fewer active enemies than this selects the low-tension track.
    pub low_threshold: u32,
    /// More active enemies than this selects the high-tension track.
    pub high_threshold: u32,
}

impl MusicConfig {
    /// Seconds a full crossfade takes.
    pub fn crossfade_seconds(&self) -> f32 {
        if self.volume_step <= 0.0 {
            return 0.0;
        }
        (1.0 / self.volume_step).round() * self.step_interval
    }
}

impl Default for MusicConfig {
    fn default() -> Self {
        Self {
            volume_step: 0.1,
            step_interval: 0.25,
            low_threshold: 3,
            high_threshold: 15,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crossfade_takes_ten_steps() {
        let music = MusicConfig::default();
        assert!((music.crossfade_seconds() - 2.5).abs() < 1e-6);
    }

    #[test]
    fn defaults_match_shipped_balance() {
        let config = ArenaConfig::new();
        assert_eq!(config.spawn.global_cap, 30);
        assert_eq!(config.sight.interval, 0.1);
        assert_eq!(config.ai.projectile_range, (5.0, 15.0));
        assert_eq!(config.player.max_health, 100.0);
    }
}
