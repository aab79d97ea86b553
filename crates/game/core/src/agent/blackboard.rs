//! Per-agent fact store.
//!
//! The blackboard is written by range-volume events, the sight sensor and
//! actions, and read by actions and decisions. One writer per fact per tick.

use crate::env::{AnimCommand, AnimParam};

/// Trigger volume carried by the target.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RangeVolume {
    Melee,
    Projectile,
    Flamethrower,
}

/// Trigger callback phase.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum VolumePhase {
    Enter,
    Stay,
    Exit,
}

/// A trigger-volume notification for one agent.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VolumeEvent {
    pub volume: RangeVolume,
    pub phase: VolumePhase,
    /// Distance between agent and target when the event fired.
    pub distance: f32,
}

impl VolumeEvent {
    pub const fn new(volume: RangeVolume, phase: VolumePhase, distance: f32) -> Self {
        Self {
            volume,
            phase,
            distance,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Blackboard {
    pub in_melee_range: bool,
    pub in_projectile_range: bool,
    pub in_flamethrower_range: bool,
    pub player_in_sight: bool,
    /// Set while the agent's ranged or flame attack animation runs.
    pub is_ranged_attacking: bool,
    /// 0 means no attack; other values select an attack animation.
    pub attack_type: i32,
    /// Countdown accumulator used by [`Blackboard::check_countdown_elapsed`].
    pub state_time_elapsed: f32,
    /// Per-agent distance under which projectile attacks are allowed.
    pub projectile_attack_range: f32,
    ranged: bool,
}

impl Blackboard {
    /// Fresh blackboard. `ranged` enables the projectile/flamethrower refinements.
    pub fn new(ranged: bool, projectile_attack_range: f32) -> Self {
        Self {
            in_melee_range: false,
            in_projectile_range: false,
            in_flamethrower_range: false,
            player_in_sight: false,
            is_ranged_attacking: false,
            attack_type: 0,
            state_time_elapsed: 0.0,
            projectile_attack_range,
            ranged,
        }
    }

    #[inline]
    pub fn is_ranged(&self) -> bool {
        self.ranged
    }

    /// Debounce timer: accumulates `dt` and fires (then resets) once
    /// `duration` is reached. Fires repeatedly at `duration` cadence.
    pub fn check_countdown_elapsed(&mut self, duration: f32, dt: f32) -> bool {
        self.state_time_elapsed += dt;
        if self.state_time_elapsed >= duration {
            self.state_time_elapsed = 0.0;
            return true;
        }
        false
    }

    /// Apply a trigger-volume event.
    ///
    /// Returns the display flag write the event implies, if any.
    pub fn on_volume(&mut self, event: VolumeEvent) -> Option<AnimCommand> {
        match (event.volume, event.phase) {
            (RangeVolume::Melee, VolumePhase::Enter) => {
                self.in_melee_range = true;
                self.in_projectile_range = false;
                self.in_flamethrower_range = false;
                None
            }
            (RangeVolume::Melee, VolumePhase::Exit) => {
                self.in_melee_range = false;
                self.in_projectile_range = true;
                self.in_flamethrower_range = true;
                None
            }
            (RangeVolume::Projectile, VolumePhase::Stay) if self.ranged => {
                if event.distance <= self.projectile_attack_range {
                    self.in_projectile_range = true;
                }
                None
            }
            (RangeVolume::Projectile, VolumePhase::Exit) if self.ranged => {
                self.in_projectile_range = false;
                Some(AnimCommand::bool(AnimParam::InProjectileRange, false))
            }
            (RangeVolume::Flamethrower, VolumePhase::Enter) if self.ranged => {
                self.in_flamethrower_range = true;
                None
            }
            (RangeVolume::Flamethrower, VolumePhase::Exit) if self.ranged => {
                self.in_flamethrower_range = false;
                None
            }
            _ => None,
        }
    }

    /// Clear every transient fact. Used when the controller is deactivated.
    pub fn clear(&mut self) {
        let ranged = self.ranged;
        let range = self.projectile_attack_range;
        *self = Self::new(ranged, range);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(volume: RangeVolume, phase: VolumePhase) -> VolumeEvent {
        VolumeEvent::new(volume, phase, 1.0)
    }

    #[test]
    fn countdown_fires_repeatedly_at_duration_cadence() {
        let mut bb = Blackboard::new(false, 10.0);
        let mut fired = 0;
        for _ in 0..100 {
            if bb.check_countdown_elapsed(0.25, 0.05) {
                fired += 1;
            }
        }
        // 5 s of frames at a 0.25 s cadence
        assert!((16..=20).contains(&fired), "fired {fired} times");
    }

    #[test]
    fn countdown_resets_after_firing() {
        let mut bb = Blackboard::new(false, 10.0);
        assert!(bb.check_countdown_elapsed(0.25, 0.3));
        assert_eq!(bb.state_time_elapsed, 0.0);
        assert!(!bb.check_countdown_elapsed(0.25, 0.1));
    }

    #[test]
    fn melee_enter_clears_ranged_flags_and_exit_sets_them() {
        let mut bb = Blackboard::new(true, 10.0);
        bb.in_projectile_range = true;
        bb.in_flamethrower_range = true;

        bb.on_volume(event(RangeVolume::Melee, VolumePhase::Enter));
        assert!(bb.in_melee_range);
        assert!(!bb.in_projectile_range);
        assert!(!bb.in_flamethrower_range);

        bb.on_volume(event(RangeVolume::Melee, VolumePhase::Exit));
        assert!(!bb.in_melee_range);
        assert!(bb.in_projectile_range);
        assert!(bb.in_flamethrower_range);
    }

    #[test]
    fn projectile_stay_respects_attack_range() {
        let mut bb = Blackboard::new(true, 8.0);

        bb.on_volume(VolumeEvent::new(
            RangeVolume::Projectile,
            VolumePhase::Stay,
            12.0,
        ));
        assert!(!bb.in_projectile_range);

        bb.on_volume(VolumeEvent::new(
            RangeVolume::Projectile,
            VolumePhase::Stay,
            7.5,
        ));
        assert!(bb.in_projectile_range);

        let write = bb.on_volume(event(RangeVolume::Projectile, VolumePhase::Exit));
        assert!(!bb.in_projectile_range);
        assert_eq!(
            write,
            Some(AnimCommand::bool(AnimParam::InProjectileRange, false))
        );
    }

    #[test]
    fn melee_only_agents_ignore_ranged_volumes() {
        let mut bb = Blackboard::new(false, 8.0);
        bb.on_volume(event(RangeVolume::Flamethrower, VolumePhase::Enter));
        bb.on_volume(VolumeEvent::new(
            RangeVolume::Projectile,
            VolumePhase::Stay,
            1.0,
        ));
        assert!(!bb.in_flamethrower_range);
        assert!(!bb.in_projectile_range);
    }
}
