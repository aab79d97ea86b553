//! Physics query service.
//!
//! Collision detection is a black box. The core asks narrow questions (what
//! does this ray or sphere sweep hit first?) and pushes impulses for ragdolls
//! and corpses. A miss is `None`, never an error.

use glam::Vec3;

use crate::agent::ColliderTag;
use crate::entity::EntityId;

bitflags::bitflags! {
    /// Collision layers a query may hit.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct LayerMask: u32 {
        const DEFAULT   = 1 << 0;
        const PLAYER    = 1 << 1;
        const ENEMY     = 1 << 2;
        const SHOOTABLE = 1 << 3;
        const GROUND    = 1 << 4;

        /// What an agent's eyes can be blocked by or can see.
        const SIGHT = Self::DEFAULT.bits() | Self::PLAYER.bits() | Self::GROUND.bits();
        /// What a player weapon can hit.
        const WEAPON = Self::DEFAULT.bits()
            | Self::ENEMY.bits()
            | Self::SHOOTABLE.bits()
            | Self::GROUND.bits();
    }
}

/// Half-line with a unit direction.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    /// Ray from `origin` towards `toward`. `None` if the points coincide.
    pub fn between(origin: Vec3, toward: Vec3) -> Option<Self> {
        (toward - origin)
            .try_normalize()
            .map(|direction| Self { origin, direction })
    }

    pub fn new(origin: Vec3, direction: Vec3) -> Option<Self> {
        direction
            .try_normalize()
            .map(|direction| Self { origin, direction })
    }

    #[inline]
    pub fn at(&self, distance: f32) -> Vec3 {
        self.origin + self.direction * distance
    }
}

/// What a query hit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Collider {
    Player,
    /// A tagged part of a spawned agent.
    Agent { id: EntityId, tag: ColliderTag },
    /// A destructible prop.
    Destructible,
    /// Static level geometry.
    Environment,
}

impl Collider {
    pub const fn agent(self) -> Option<(EntityId, ColliderTag)> {
        match self {
            Collider::Agent { id, tag } => Some((id, tag)),
            _ => None,
        }
    }
}

/// First hit of a query.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RayHit {
    pub collider: Collider,
    pub point: Vec3,
    pub distance: f32,
}

/// Narrow physics interface consumed by sensing and weapons.
pub trait PhysicsOracle {
    /// First collider hit by an infinitely thin ray within `max_distance`.
    fn raycast(&self, ray: Ray, max_distance: f32, mask: LayerMask) -> Option<RayHit>;

    /// First collider hit by a sphere of `radius` swept along `ray`.
    fn sphere_cast(
        &self,
        ray: Ray,
        radius: f32,
        max_distance: f32,
        mask: LayerMask,
    ) -> Option<RayHit>;
}

/// Impulse pushed to a rigid body (corpse shove, ragdoll launch).
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Impulse {
    pub target: EntityId,
    pub tag: ColliderTag,
    pub force: Vec3,
    /// Angular impulse; zero for plain shoves.
    pub torque: Vec3,
}

/// Sink for impulses. Applied by the physics service at its own step.
pub trait ImpulseSink {
    fn apply_impulse(&mut self, impulse: Impulse);
}

impl ImpulseSink for Vec<Impulse> {
    fn apply_impulse(&mut self, impulse: Impulse) {
        self.push(impulse);
    }
}
