//! Per-frame player input.

use arena_core::{Pose, WeaponKind};

/// What the player does this frame.
///
/// Firing and punching go along the forward vector of the player pose, so
/// aiming is done by setting `pose`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PlayerInput {
    /// New pose. `None` keeps the current one.
    pub pose: Option<Pose>,
    pub equip: Option<WeaponKind>,
    pub reload: bool,
    pub fire: bool,
    pub punch: bool,
}

impl PlayerInput {
    pub fn idle() -> Self {
        Self::default()
    }

    pub fn at(pose: Pose) -> Self {
        Self {
            pose: Some(pose),
            ..Self::default()
        }
    }

    pub fn firing(mut self) -> Self {
        self.fire = true;
        self
    }

    pub fn punching(mut self) -> Self {
        self.punch = true;
        self
    }

    pub fn reloading(mut self) -> Self {
        self.reload = true;
        self
    }

    pub fn equipping(mut self, weapon: WeaponKind) -> Self {
        self.equip = Some(weapon);
        self
    }
}
