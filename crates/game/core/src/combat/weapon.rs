//! Player weapons: profiles, magazines and hit acquisition.

use glam::{Quat, Vec3};
use tracing::debug;

use super::Strike;
use crate::env::{LayerMask, PhysicsOracle, Ray, RayHit, RngOracle};
use crate::error::{ErrorSeverity, GameError};

// ============================================================================
// Profiles
// ============================================================================

#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum WeaponKind {
    Handgun,
    Shotgun,
    PlasmaRifle,
}

/// Static parameters of a weapon. Loaded from data; defaults match the
/// shipped tables.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WeaponProfile {
    pub kind: WeaponKind,
    /// Sphere-cast radius of a pellet.
    pub radius: f32,
    pub effective_range: f32,
    pub max_range: f32,
    pub damage: f32,
    pub headshot_damage: f32,
    pub magazine_size: u32,
    pub max_reserve: u32,
    pub stopping_power: f32,
    /// Maximum deviation of a pellet from the aim direction, in degrees.
    pub spread_degrees: f32,
    pub pellets: u32,
    /// Magazines granted by one ammo pickup.
    pub pickup_magazines: u32,
}

impl WeaponProfile {
    pub fn handgun() -> Self {
        Self {
            kind: WeaponKind::Handgun,
            radius: 0.15,
            effective_range: 25.0,
            max_range: 40.0,
            damage: 10.0,
            headshot_damage: 200.0,
            magazine_size: 8,
            max_reserve: 48,
            stopping_power: 3.25,
            spread_degrees: 2.0,
            pellets: 1,
            pickup_magazines: 4,
        }
    }

    pub fn shotgun() -> Self {
        Self {
            kind: WeaponKind::Shotgun,
            radius: 0.2,
            effective_range: 8.0,
            max_range: 40.0,
            damage: 20.0,
            headshot_damage: 150.0,
            magazine_size: 2,
            max_reserve: 20,
            stopping_power: 6.5,
            spread_degrees: 8.0,
            pellets: 4,
            pickup_magazines: 4,
        }
    }

    pub fn plasma_rifle() -> Self {
        Self {
            kind: WeaponKind::PlasmaRifle,
            radius: 0.1,
            effective_range: 35.0,
            max_range: 60.0,
            damage: 20.0,
            headshot_damage: 200.0,
            magazine_size: 21,
            max_reserve: 63,
            stopping_power: 4.5,
            spread_degrees: 1.5,
            pellets: 1,
            pickup_magazines: 2,
        }
    }

    pub fn defaults() -> Vec<Self> {
        vec![Self::handgun(), Self::shotgun(), Self::plasma_rifle()]
    }

    pub fn strike(&self) -> Strike {
        Strike {
            damage: self.damage,
            headshot_damage: self.headshot_damage,
            stopping_power: self.stopping_power,
        }
    }

    #[inline]
    pub fn in_effective_range(&self, distance: f32) -> bool {
        distance <= self.effective_range
    }
}

// ============================================================================
// Errors
// ============================================================================

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum WeaponError {
    #[error("{0} magazine is empty")]
    EmptyMagazine(WeaponKind),

    #[error("no {0} in the arsenal")]
    NotCarried(WeaponKind),
}

impl GameError for WeaponError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::EmptyMagazine(_) => ErrorSeverity::Recoverable,
            Self::NotCarried(_) => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::EmptyMagazine(_) => "WEAPON_EMPTY_MAGAZINE",
            Self::NotCarried(_) => "WEAPON_NOT_CARRIED",
        }
    }
}

// ============================================================================
// Magazine
// ============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Magazine {
    pub loaded: u32,
    pub reserve: u32,
}

// ============================================================================
// Weapon
// ============================================================================

/// One pellet's result.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ShotHit {
    pub hit: RayHit,
    /// Direction the pellet travelled.
    pub direction: Vec3,
    pub in_effective_range: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Weapon {
    profile: WeaponProfile,
    magazine: Magazine,
}

impl Weapon {
    /// A weapon with a full magazine and a full reserve.
    pub fn new(profile: WeaponProfile) -> Self {
        let magazine = Magazine {
            loaded: profile.magazine_size,
            reserve: profile.max_reserve,
        };
        Self { profile, magazine }
    }

    #[inline]
    pub fn profile(&self) -> &WeaponProfile {
        &self.profile
    }

    #[inline]
    pub fn magazine(&self) -> Magazine {
        self.magazine
    }

    pub fn set_magazine(&mut self, magazine: Magazine) {
        self.magazine = Magazine {
            loaded: magazine.loaded.min(self.profile.magazine_size),
            reserve: magazine.reserve.min(self.profile.max_reserve),
        };
    }

    /// Move `min(missing, reserve)` rounds into the magazine. Returns the count.
    pub fn reload(&mut self) -> u32 {
        let missing = self.profile.magazine_size.saturating_sub(self.magazine.loaded);
        let moved = missing.min(self.magazine.reserve);
        self.magazine.loaded += moved;
        self.magazine.reserve -= moved;
        moved
    }

    /// Add one pickup worth of magazines to the reserve. Returns rounds added.
    pub fn add_pickup(&mut self) -> u32 {
        let granted = self.profile.pickup_magazines * self.profile.magazine_size;
        let room = self.profile.max_reserve.saturating_sub(self.magazine.reserve);
        let added = granted.min(room);
        self.magazine.reserve += added;
        added
    }

    /// Fire one round along `aim` from `origin`.
    ///
    /// Every pellet deviates by a random angle in `[0, spread]` and is swept
    /// as a sphere up to max range. Pellets that hit nothing are omitted.
    pub fn fire(
        &mut self,
        origin: Vec3,
        aim: Vec3,
        rng: &mut impl RngOracle,
        physics: &dyn PhysicsOracle,
    ) -> Result<Vec<ShotHit>, WeaponError> {
        if self.magazine.loaded == 0 {
            return Err(WeaponError::EmptyMagazine(self.profile.kind));
        }
        self.magazine.loaded -= 1;

        let aim = aim.try_normalize().unwrap_or(Vec3::Z);
        let mut hits = Vec::with_capacity(self.profile.pellets as usize);
        for _ in 0..self.profile.pellets {
            let direction = spread(aim, self.profile.spread_degrees, rng);
            let Some(ray) = Ray::new(origin, direction) else {
                continue;
            };
            if let Some(hit) = physics.sphere_cast(
                ray,
                self.profile.radius,
                self.profile.max_range,
                LayerMask::WEAPON,
            ) {
                hits.push(ShotHit {
                    hit,
                    direction: ray.direction,
                    in_effective_range: self.profile.in_effective_range(hit.distance),
                });
            }
        }

        debug!(
            weapon = %self.profile.kind,
            hits = hits.len(),
            loaded = self.magazine.loaded,
            "fired"
        );
        Ok(hits)
    }
}

/// Rotate `aim` by a random angle in `[0, max_degrees]` about a random axis
/// perpendicular to it.
fn spread(aim: Vec3, max_degrees: f32, rng: &mut impl RngOracle) -> Vec3 {
    if max_degrees <= 0.0 {
        return aim;
    }
    let axis = aim
        .cross(rng.unit_vector())
        .try_normalize()
        .unwrap_or_else(|| aim.any_orthonormal_vector());
    let angle = rng.range_f32(0.0, max_degrees).to_radians();
    Quat::from_axis_angle(axis, angle) * aim
}

// ============================================================================
// Arsenal
// ============================================================================

/// Weapons carried by the player and the one in hand.
#[derive(Clone, Debug, PartialEq)]
pub struct Arsenal {
    weapons: Vec<Weapon>,
    equipped: usize,
}

impl Arsenal {
    pub fn new(profiles: impl IntoIterator<Item = WeaponProfile>) -> Self {
        Self {
            weapons: profiles.into_iter().map(Weapon::new).collect(),
            equipped: 0,
        }
    }

    pub fn equipped(&self) -> Option<&Weapon> {
        self.weapons.get(self.equipped)
    }

    pub fn equipped_mut(&mut self) -> Option<&mut Weapon> {
        self.weapons.get_mut(self.equipped)
    }

    pub fn get(&self, kind: WeaponKind) -> Option<&Weapon> {
        self.weapons.iter().find(|w| w.profile.kind == kind)
    }

    pub fn get_mut(&mut self, kind: WeaponKind) -> Option<&mut Weapon> {
        self.weapons.iter_mut().find(|w| w.profile.kind == kind)
    }

    pub fn equip(&mut self, kind: WeaponKind) -> Result<(), WeaponError> {
        let index = self
            .weapons
            .iter()
            .position(|w| w.profile.kind == kind)
            .ok_or(WeaponError::NotCarried(kind))?;
        self.equipped = index;
        Ok(())
    }

    /// Apply an ammo pickup for `kind`. Returns rounds added.
    pub fn add_pickup(&mut self, kind: WeaponKind) -> Result<u32, WeaponError> {
        self.get_mut(kind)
            .map(Weapon::add_pickup)
            .ok_or(WeaponError::NotCarried(kind))
    }
}

impl Default for Arsenal {
    fn default() -> Self {
        Self::new(WeaponProfile::defaults())
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;
    use crate::env::{Collider, PcgRng};

    /// Records every cast and reports a wall at a fixed distance.
    struct TestContext {
        wall: f32,
        casts: RefCell<Vec<Ray>>,
    }

    impl PhysicsOracle for TestContext {
        fn raycast(&self, ray: Ray, max: f32, mask: LayerMask) -> Option<RayHit> {
            self.sphere_cast(ray, 0.0, max, mask)
        }

        fn sphere_cast(&self, ray: Ray, _r: f32, max: f32, mask: LayerMask) -> Option<RayHit> {
            assert_eq!(mask, LayerMask::WEAPON);
            self.casts.borrow_mut().push(ray);
            (self.wall <= max).then(|| RayHit {
                collider: Collider::Environment,
                point: ray.at(self.wall),
                distance: self.wall,
            })
        }
    }

    fn range(wall: f32) -> TestContext {
        TestContext {
            wall,
            casts: RefCell::new(Vec::new()),
        }
    }

    #[test]
    fn reload_moves_missing_or_remaining_rounds() {
        let mut handgun = Weapon::new(WeaponProfile::handgun());
        handgun.set_magazine(Magazine {
            loaded: 3,
            reserve: 2,
        });
        assert_eq!(handgun.reload(), 2);
        assert_eq!(
            handgun.magazine(),
            Magazine {
                loaded: 5,
                reserve: 0
            }
        );

        handgun.set_magazine(Magazine {
            loaded: 3,
            reserve: 40,
        });
        assert_eq!(handgun.reload(), 5);
        assert_eq!(handgun.magazine().reserve, 35);
    }

    #[test]
    fn empty_magazine_fails_to_fire() {
        let mut shotgun = Weapon::new(WeaponProfile::shotgun());
        shotgun.set_magazine(Magazine {
            loaded: 0,
            reserve: 10,
        });
        let err = shotgun
            .fire(Vec3::ZERO, Vec3::Z, &mut PcgRng::seeded(1), &range(5.0))
            .unwrap_err();
        assert_eq!(err, WeaponError::EmptyMagazine(WeaponKind::Shotgun));
        assert_eq!(err.error_code(), "WEAPON_EMPTY_MAGAZINE");
    }

    #[test]
    fn shotgun_round_fires_every_pellet_within_spread() {
        let physics = range(5.0);
        let mut shotgun = Weapon::new(WeaponProfile::shotgun());
        let hits = shotgun
            .fire(Vec3::ZERO, Vec3::Z, &mut PcgRng::seeded(9), &physics)
            .unwrap();

        assert_eq!(hits.len(), 4);
        assert_eq!(shotgun.magazine().loaded, 1);
        for ray in physics.casts.borrow().iter() {
            let deviation = ray.direction.angle_between(Vec3::Z).to_degrees();
            assert!(deviation <= 8.0 + 1e-3, "deviation {deviation}");
        }
        assert!(hits.iter().all(|h| h.in_effective_range));
    }

    #[test]
    fn effective_range_is_inclusive() {
        let mut handgun = Weapon::new(WeaponProfile::handgun());
        let at_edge = handgun
            .fire(Vec3::ZERO, Vec3::Z, &mut PcgRng::seeded(2), &range(25.0))
            .unwrap();
        assert!(at_edge[0].in_effective_range);

        let beyond = handgun
            .fire(Vec3::ZERO, Vec3::Z, &mut PcgRng::seeded(2), &range(30.0))
            .unwrap();
        assert!(!beyond[0].in_effective_range);

        let out_of_reach = handgun
            .fire(Vec3::ZERO, Vec3::Z, &mut PcgRng::seeded(2), &range(50.0))
            .unwrap();
        assert!(out_of_reach.is_empty());
    }

    #[test]
    fn ammo_pickup_is_capped_at_max_reserve() {
        let mut arsenal = Arsenal::default();
        let plasma = arsenal.get_mut(WeaponKind::PlasmaRifle).unwrap();
        plasma.set_magazine(Magazine {
            loaded: 21,
            reserve: 0,
        });
        assert_eq!(arsenal.add_pickup(WeaponKind::PlasmaRifle), Ok(42));
        assert_eq!(arsenal.add_pickup(WeaponKind::PlasmaRifle), Ok(21));
        assert_eq!(arsenal.add_pickup(WeaponKind::PlasmaRifle), Ok(0));
    }

    #[test]
    fn equip_switches_weapon_in_hand() {
        let mut arsenal = Arsenal::new([WeaponProfile::handgun()]);
        assert_eq!(
            arsenal.equip(WeaponKind::Shotgun),
            Err(WeaponError::NotCarried(WeaponKind::Shotgun))
        );
        assert!(arsenal.equip(WeaponKind::Handgun).is_ok());
        assert_eq!(
            arsenal.equipped().map(|w| w.profile().kind),
            Some(WeaponKind::Handgun)
        );
    }
}
