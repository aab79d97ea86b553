//! Health and ammo pickups.
//!
//! Level pickups come back a while after being collected. Pickups dropped by
//! dead enemies are one-shot.

use glam::Vec3;

use crate::combat::{Arsenal, WeaponKind};
use crate::config::PlayerConfig;
use crate::env::RngOracle;
use crate::player::PlayerVitals;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PickupKind {
    Health,
    Ammo(WeaponKind),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PickupOrigin {
    /// Placed in the level; respawns.
    Level,
    /// Dropped by a dead enemy; never respawns.
    Dropped,
}

/// What collecting a pickup did.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PickupEffect {
    Healed(f32),
    Rounds { weapon: WeaponKind, added: u32 },
}

#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Pickup {
    pub kind: PickupKind,
    pub position: Vec3,
    pub origin: PickupOrigin,
    active: bool,
}

impl Pickup {
    /// Distance at which the player collects a pickup.
    pub const REACH: f32 = 1.0;

    pub fn new(kind: PickupKind, position: Vec3, origin: PickupOrigin) -> Self {
        Self {
            kind,
            position,
            origin,
            active: true,
        }
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn in_reach(&self, player: Vec3) -> bool {
        self.active && self.position.distance(player) <= Self::REACH
    }

    /// Try to hand the pickup to the player.
    ///
    /// A pickup the player has no use for (full health, full reserve, weapon
    /// not carried) stays where it is and returns `None`.
    pub fn collect(
        &mut self,
        vitals: &mut PlayerVitals,
        arsenal: &mut Arsenal,
        config: &PlayerConfig,
    ) -> Option<PickupEffect> {
        if !self.active || !vitals.is_alive() {
            return None;
        }
        let effect = match self.kind {
            PickupKind::Health => {
                if vitals.is_full() {
                    return None;
                }
                PickupEffect::Healed(vitals.heal(config.health_pickup))
            }
            PickupKind::Ammo(weapon) => match arsenal.add_pickup(weapon) {
                Ok(added) if added > 0 => PickupEffect::Rounds { weapon, added },
                _ => return None,
            },
        };
        self.active = false;
        Some(effect)
    }

    /// Delay before a collected pickup reappears. `None` for dropped pickups.
    pub fn respawn_delay(&self, config: &PlayerConfig, rng: &mut impl RngOracle) -> Option<f32> {
        match self.origin {
            PickupOrigin::Level => Some(
                config.pickup_respawn_seconds + rng.range_f32(0.0, config.pickup_respawn_stagger),
            ),
            PickupOrigin::Dropped => None,
        }
    }

    pub fn respawn(&mut self) {
        self.active = true;
    }
}
