//! Damage policy per hit zone.

use super::HitZone;
use crate::config::CombatConfig;

// ============================================================================
// Strike
// ============================================================================

/// Damage parameters of whatever delivered the hit.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Strike {
    pub damage: f32,
    pub headshot_damage: f32,
    /// Impulse magnitude pushed onto the hit body.
    pub stopping_power: f32,
}

impl Strike {
    /// Player melee swing.
    pub fn punch(config: &CombatConfig) -> Self {
        Self {
            damage: config.punch_damage,
            headshot_damage: config.punch_damage,
            stopping_power: config.punch_force,
        }
    }
}

// ============================================================================
// Damage Calculation
// ============================================================================

/// Damage and impulse for one hit.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HitDamage {
    pub damage: f32,
    pub force: f32,
}

/// Body shots beyond effective range.
pub const BODY_FALLOFF: f32 = 0.1;
/// Impulse scale for body shots beyond effective range.
pub const BODY_FORCE_FALLOFF: f32 = 0.5;
/// Headshots beyond effective range.
pub const HEAD_FALLOFF: f32 = 0.25;
/// Fraction of weapon damage that gets through flamer armor, at any range.
pub const ARMOR_FACTOR: f32 = 0.05;

/// Damage and force for a hit in `zone`.
///
/// ```text
/// body        damage        | damage * 0.1, force * 0.5
/// head        headshot      | headshot * 0.25
/// armor       damage * 0.05 (range ignored)
/// energy pack damage        (range ignored)
/// punch       damage        (range ignored)
/// ```
pub fn hit_damage(zone: HitZone, strike: &Strike, in_effective_range: bool) -> HitDamage {
    let force = strike.stopping_power;
    match zone {
        HitZone::Body if in_effective_range => HitDamage {
            damage: strike.damage,
            force,
        },
        HitZone::Body => HitDamage {
            damage: strike.damage * BODY_FALLOFF,
            force: force * BODY_FORCE_FALLOFF,
        },
        HitZone::Head if in_effective_range => HitDamage {
            damage: strike.headshot_damage,
            force,
        },
        HitZone::Head => HitDamage {
            damage: strike.headshot_damage * HEAD_FALLOFF,
            force,
        },
        HitZone::Armor => HitDamage {
            damage: strike.damage * ARMOR_FACTOR,
            force,
        },
        HitZone::EnergyPack | HitZone::Punch => HitDamage {
            damage: strike.damage,
            force,
        },
    }
}
