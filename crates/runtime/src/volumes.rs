//! Trigger volumes carried by the player.
//!
//! The player carries three spheres (melee, projectile, flamethrower). Each
//! frame the tracker compares every agent's distance against them and emits
//! the enter/stay/exit callbacks a physics engine would.

use arena_core::config::VolumeConfig;
use arena_core::{RangeVolume, VolumeEvent, VolumePhase};

/// Callback order within a frame: outer volumes first so melee events, which
/// also touch the outer flags, apply last.
const ORDER: [RangeVolume; 3] = [
    RangeVolume::Projectile,
    RangeVolume::Flamethrower,
    RangeVolume::Melee,
];

/// Which volumes one agent is currently inside.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Occupancy {
    inside: [bool; 3],
}

impl Occupancy {
    fn slot(volume: RangeVolume) -> usize {
        match volume {
            RangeVolume::Melee => 0,
            RangeVolume::Projectile => 1,
            RangeVolume::Flamethrower => 2,
        }
    }

    pub fn is_inside(&self, volume: RangeVolume) -> bool {
        self.inside[Self::slot(volume)]
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct VolumeTracker {
    radii: VolumeConfig,
}

impl VolumeTracker {
    pub fn new(radii: VolumeConfig) -> Self {
        Self { radii }
    }

    fn radius(&self, volume: RangeVolume) -> f32 {
        match volume {
            RangeVolume::Melee => self.radii.melee_radius,
            RangeVolume::Projectile => self.radii.projectile_radius,
            RangeVolume::Flamethrower => self.radii.flamethrower_radius,
        }
    }

    /// Events for an agent now at `distance` from the player.
    ///
    /// A volume reports `Enter` on the first frame inside, `Stay` on the
    /// following ones and `Exit` on the first frame outside.
    pub fn update(&self, occupancy: &mut Occupancy, distance: f32) -> Vec<VolumeEvent> {
        let mut events = Vec::new();
        for volume in ORDER {
            let slot = Occupancy::slot(volume);
            let was_inside = occupancy.inside[slot];
            let inside = distance <= self.radius(volume);
            let phase = match (was_inside, inside) {
                (false, true) => VolumePhase::Enter,
                (true, true) => VolumePhase::Stay,
                (true, false) => VolumePhase::Exit,
                (false, false) => continue,
            };
            occupancy.inside[slot] = inside;
            events.push(VolumeEvent::new(volume, phase, distance));
        }
        events
    }

    /// Exit events for every volume the agent is inside. Used at teardown.
    pub fn leave_all(&self, occupancy: &mut Occupancy, distance: f32) -> Vec<VolumeEvent> {
        let mut events = Vec::new();
        for volume in ORDER {
            let slot = Occupancy::slot(volume);
            if occupancy.inside[slot] {
                occupancy.inside[slot] = false;
                events.push(VolumeEvent::new(volume, VolumePhase::Exit, distance));
            }
        }
        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn phases(events: &[VolumeEvent]) -> Vec<(RangeVolume, VolumePhase)> {
        events.iter().map(|e| (e.volume, e.phase)).collect()
    }

    #[test]
    fn walking_in_enters_then_stays() {
        let tracker = VolumeTracker::new(VolumeConfig::default());
        let mut occupancy = Occupancy::default();

        assert!(tracker.update(&mut occupancy, 20.0).is_empty());
        assert_eq!(
            phases(&tracker.update(&mut occupancy, 10.0)),
            vec![(RangeVolume::Projectile, VolumePhase::Enter)]
        );
        assert_eq!(
            phases(&tracker.update(&mut occupancy, 1.5)),
            vec![
                (RangeVolume::Projectile, VolumePhase::Stay),
                (RangeVolume::Flamethrower, VolumePhase::Enter),
                (RangeVolume::Melee, VolumePhase::Enter),
            ]
        );
        assert!(occupancy.is_inside(RangeVolume::Melee));
    }

    #[test]
    fn backing_off_exits_the_inner_volume() {
        let tracker = VolumeTracker::new(VolumeConfig::default());
        let mut occupancy = Occupancy::default();
        tracker.update(&mut occupancy, 1.0);

        let events = tracker.update(&mut occupancy, 3.0);
        assert_eq!(
            phases(&events),
            vec![
                (RangeVolume::Projectile, VolumePhase::Stay),
                (RangeVolume::Flamethrower, VolumePhase::Stay),
                (RangeVolume::Melee, VolumePhase::Exit),
            ]
        );
        assert_eq!(events[2].distance, 3.0);
    }

    #[test]
    fn leave_all_exits_everything_once() {
        let tracker = VolumeTracker::new(VolumeConfig::default());
        let mut occupancy = Occupancy::default();
        tracker.update(&mut occupancy, 5.0);

        assert_eq!(tracker.leave_all(&mut occupancy, 5.0).len(), 2);
        assert!(tracker.leave_all(&mut occupancy, 5.0).is_empty());
    }
}
