//! Rate-limited cone-of-vision sensor.
//!
//! Visibility is recomputed at most once per interval no matter how often
//! [`SightSensor::update`] is called. The last known target position is only
//! ever overwritten by a positive sighting.

use glam::Vec3;

use crate::config::SightConfig;
use crate::entity::Pose;
use crate::env::{Collider, LayerMask, PhysicsOracle, Ray};

/// Result of a sensor update.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SightReading {
    pub visible: bool,
    pub last_known_position: Vec3,
    /// Whether this call actually re-evaluated visibility.
    pub evaluated: bool,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SightSensor {
    fov_degrees: f32,
    radius: f32,
    interval: f32,
    timer: f32,
    visible: bool,
    last_known_position: Vec3,
    has_sighting: bool,
}

impl SightSensor {
    /// Build a sensor. The field of view is clamped to the supported range.
    pub fn new(fov_degrees: f32, radius: f32, interval: f32) -> Self {
        Self {
            fov_degrees: fov_degrees
                .clamp(SightConfig::MIN_FOV_DEGREES, SightConfig::MAX_FOV_DEGREES),
            radius: radius.max(0.0),
            interval: interval.max(0.0),
            timer: 0.0,
            visible: false,
            last_known_position: Vec3::ZERO,
            has_sighting: false,
        }
    }

    pub fn from_config(config: &SightConfig) -> Self {
        Self::new(
            config.default_fov_degrees,
            config.sensor_radius,
            config.interval,
        )
    }

    #[inline]
    pub fn fov_degrees(&self) -> f32 {
        self.fov_degrees
    }

    #[inline]
    pub fn radius(&self) -> f32 {
        self.radius
    }

    #[inline]
    pub fn visible(&self) -> bool {
        self.visible
    }

    #[inline]
    pub fn last_known_position(&self) -> Vec3 {
        self.last_known_position
    }

    /// Whether the target was ever seen.
    #[inline]
    pub fn has_sighting(&self) -> bool {
        self.has_sighting
    }

    fn reading(&self, evaluated: bool) -> SightReading {
        SightReading {
            visible: self.visible,
            last_known_position: self.last_known_position,
            evaluated,
        }
    }

    /// Advance the sensor by `dt` and re-evaluate if the interval has passed.
    pub fn update(
        &mut self,
        dt: f32,
        eye: &Pose,
        target: Vec3,
        physics: &dyn PhysicsOracle,
    ) -> SightReading {
        self.timer += dt;
        if self.timer < self.interval {
            return self.reading(false);
        }
        self.timer = 0.0;

        self.visible = false;
        if eye.angle_to(target) < self.fov_degrees * 0.5
            && let Some(ray) = Ray::between(eye.position, target)
            && let Some(hit) = physics.raycast(ray, self.radius, LayerMask::SIGHT)
            && hit.collider == Collider::Player
        {
            self.visible = true;
            self.last_known_position = target;
            self.has_sighting = true;
        }

        self.reading(true)
    }
}
