//! Entity identity and spatial snapshots.

use core::fmt;

use glam::Vec3;

/// Unique identifier for the player and every spawned agent.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EntityId(pub u32);

impl EntityId {
    /// Reserved identifier for the player (the target of every agent).
    pub const PLAYER: Self = Self(0);

    /// Returns true if this entity represents the player.
    #[inline]
    pub const fn is_player(self) -> bool {
        self.0 == Self::PLAYER.0
    }
}

impl Default for EntityId {
    fn default() -> Self {
        Self::PLAYER
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Hands out monotonically increasing agent ids, skipping the player id.
#[derive(Clone, Debug)]
pub struct EntityAllocator {
    next: u32,
}

impl EntityAllocator {
    pub const fn new() -> Self {
        Self { next: 1 }
    }

    pub fn allocate(&mut self) -> EntityId {
        let id = EntityId(self.next);
        self.next = self.next.wrapping_add(1).max(1);
        id
    }
}

impl Default for EntityAllocator {
    fn default() -> Self {
        Self::new()
    }
}

/// Position and facing of an entity, owned by the navigation/physics service.
///
/// The core only ever reads copies of it.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Pose {
    pub position: Vec3,
    /// Unit forward vector.
    pub forward: Vec3,
}

impl Pose {
    pub fn new(position: Vec3, forward: Vec3) -> Self {
        Self {
            position,
            forward: forward.try_normalize().unwrap_or(Vec3::Z),
        }
    }

    /// Pose at `position` facing `target`.
    pub fn looking_at(position: Vec3, target: Vec3) -> Self {
        Self::new(position, target - position)
    }

    /// Unsigned angle in degrees between forward and the direction to `point`.
    ///
    /// Returns 0 when `point` coincides with the position.
    pub fn angle_to(&self, point: Vec3) -> f32 {
        angle_between_degrees(self.forward, point - self.position)
    }
}

impl Default for Pose {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            forward: Vec3::Z,
        }
    }
}

/// Unsigned angle in degrees between two vectors; 0 if either is zero.
pub fn angle_between_degrees(a: Vec3, b: Vec3) -> f32 {
    if a.length_squared() <= f32::EPSILON || b.length_squared() <= f32::EPSILON {
        return 0.0;
    }
    a.angle_between(b).to_degrees()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allocator_never_hands_out_the_player() {
        let mut alloc = EntityAllocator::new();
        let first = alloc.allocate();
        assert!(!first.is_player());
        assert_eq!(alloc.allocate(), EntityId(2));
    }

    #[test]
    fn angle_to_point_behind_is_180() {
        let pose = Pose::new(Vec3::ZERO, Vec3::Z);
        assert!((pose.angle_to(Vec3::new(0.0, 0.0, -5.0)) - 180.0).abs() < 1e-3);
        assert!(pose.angle_to(Vec3::new(0.0, 0.0, 5.0)).abs() < 1e-3);
        assert!((pose.angle_to(Vec3::new(5.0, 0.0, 0.0)) - 90.0).abs() < 1e-3);
    }

    #[test]
    fn degenerate_forward_falls_back_to_z() {
        let pose = Pose::new(Vec3::ONE, Vec3::ZERO);
        assert_eq!(pose.forward, Vec3::Z);
    }
}
