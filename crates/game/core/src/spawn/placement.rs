//! Spawn point selection around the target.

use glam::Vec3;

use crate::env::{NavigationQuery, RngOracle};

/// Axis-aligned region of the level where spawns are allowed while the
/// target stands inside it.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpawnArea {
    pub min: Vec3,
    pub max: Vec3,
}

impl SpawnArea {
    pub fn new(a: Vec3, b: Vec3) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    #[inline]
    pub fn contains(&self, point: Vec3) -> bool {
        point.cmpge(self.min).all() && point.cmple(self.max).all()
    }
}

/// Random point on the horizontal annulus `[near, far]` around `center`.
pub fn annulus_point(center: Vec3, near: f32, far: f32, rng: &mut impl RngOracle) -> (Vec3, f32) {
    let radius = rng.range_f32(near, far);
    let theta = rng.range_f32(0.0, core::f32::consts::TAU);
    (
        center + Vec3::new(theta.cos() * radius, 0.0, theta.sin() * radius),
        radius,
    )
}

/// Pick a navigable point near `target`.
///
/// Candidates must fall inside an area that also contains the target and must
/// not coincide with it. After `attempts` misses an unconstrained sample is
/// used instead.
pub fn choose_spawn_point(
    target: Vec3,
    distance: (f32, f32),
    attempts: u32,
    areas: &[SpawnArea],
    navigation: &dyn NavigationQuery,
    rng: &mut impl RngOracle,
) -> Option<Vec3> {
    let active: Vec<&SpawnArea> = areas.iter().filter(|a| a.contains(target)).collect();
    let (near, far) = distance;

    if !active.is_empty() {
        for _ in 0..attempts {
            let (candidate, radius) = annulus_point(target, near, far, rng);
            if let Some(point) = navigation.sample_position(candidate, radius)
                && point != target
                && active.iter().any(|area| area.contains(point))
            {
                return Some(point);
            }
        }
    }

    unconstrained_point(target, distance, navigation, rng)
}

/// One annulus sample snapped to the navigation surface, no area check.
pub fn unconstrained_point(
    target: Vec3,
    (near, far): (f32, f32),
    navigation: &dyn NavigationQuery,
    rng: &mut impl RngOracle,
) -> Option<Vec3> {
    let (candidate, radius) = annulus_point(target, near, far, rng);
    navigation.sample_position(candidate, radius.max(far))
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;
    use crate::entity::{EntityId, Pose};
    use crate::env::PcgRng;

    /// Flat floor at y = 0 covering x in `[-limit, limit]`.
    struct TestContext {
        limit: f32,
        samples: Cell<u32>,
    }

    impl NavigationQuery for TestContext {
        fn pose(&self, _agent: EntityId) -> Option<Pose> {
            None
        }

        fn is_path_pending(&self, _agent: EntityId) -> bool {
            false
        }

        fn is_on_surface(&self, _agent: EntityId) -> bool {
            true
        }

        fn desired_velocity(&self, _agent: EntityId) -> Vec3 {
            Vec3::ZERO
        }

        fn sample_position(&self, point: Vec3, _max: f32) -> Option<Vec3> {
            self.samples.set(self.samples.get() + 1);
            Some(Vec3::new(point.x.clamp(-self.limit, self.limit), 0.0, point.z))
        }
    }

    fn floor() -> TestContext {
        TestContext {
            limit: 100.0,
            samples: Cell::new(0),
        }
    }

    #[test]
    fn samples_stay_inside_the_annulus() {
        let mut rng = PcgRng::seeded(17);
        let nav = floor();
        let area = SpawnArea::new(Vec3::splat(-50.0), Vec3::splat(50.0));
        for _ in 0..200 {
            let point =
                choose_spawn_point(Vec3::ZERO, (4.0, 9.25), 10, &[area], &nav, &mut rng).unwrap();
            let distance = point.distance(Vec3::ZERO);
            assert!((4.0 - 1e-3..=9.25 + 1e-3).contains(&distance), "{distance}");
        }
    }

    #[test]
    fn candidates_outside_target_area_are_retried_then_fall_back() {
        let mut rng = PcgRng::seeded(3);
        let nav = floor();
        // Target area is a thin strip the annulus can never reach into.
        let strip = SpawnArea::new(Vec3::new(-0.5, -1.0, -0.5), Vec3::new(0.5, 1.0, 0.5));

        let point = choose_spawn_point(Vec3::ZERO, (4.0, 9.25), 10, &[strip], &nav, &mut rng);
        assert!(point.is_some());
        assert_eq!(nav.samples.get(), 11);
    }

    #[test]
    fn no_active_area_goes_straight_to_fallback() {
        let mut rng = PcgRng::seeded(3);
        let nav = floor();
        let far_away = SpawnArea::new(Vec3::splat(100.0), Vec3::splat(110.0));

        choose_spawn_point(Vec3::ZERO, (6.0, 21.0), 10, &[far_away], &nav, &mut rng);
        assert_eq!(nav.samples.get(), 1);
    }
}
