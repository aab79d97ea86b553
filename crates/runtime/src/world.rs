//! Service implementations for headless sessions.
//!
//! [`HeadlessWorld`] answers the core's physics and navigation queries for a
//! flat square arena with vertical pillars. Agents walk in straight lines and
//! bodies are a handful of primitive colliders. It exists to drive tests and
//! scripted sessions, not to stand in for a real engine.

use std::collections::{BTreeMap, HashMap};

use arena_core::{
    AnimParam, AnimationSink, Collider, ColliderTag, EnemyKind, EntityId, Impulse, ImpulseSink,
    LayerMask, NavigationOracle, NavigationQuery, PhysicsOracle, Pose, Ray, RayHit,
    env::AnimValue,
};
use glam::{Vec2, Vec3};

/// What the simulation needs from its world beyond the core service traits.
pub trait ArenaWorld: PhysicsOracle + NavigationOracle + AnimationSink + ImpulseSink {
    /// Pose of the target (the player).
    fn target_pose(&self) -> Pose;

    fn set_target_pose(&mut self, pose: Pose);

    /// Whether the target stands on the ground.
    fn target_grounded(&self) -> bool {
        true
    }

    /// Create the hit colliders of a freshly placed agent.
    fn attach_colliders(&mut self, agent: EntityId, kind: EnemyKind);

    /// Advance locomotion by `dt`.
    fn step(&mut self, dt: f32);
}

// ============================================================================
// Configuration
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct WorldConfig {
    /// The walkable floor is `[-half_extent, half_extent]` on x and z.
    pub half_extent: f32,
    pub agent_speed: f32,
    /// Agents stop this far from their destination.
    pub stopping_distance: f32,
    pub player_start: Vec3,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            half_extent: 40.0,
            agent_speed: 3.5,
            stopping_distance: 1.2,
            player_start: Vec3::ZERO,
        }
    }
}

// ============================================================================
// Colliders
// ============================================================================

const PLAYER_RADIUS: f32 = 0.4;
const PLAYER_HEIGHT: f32 = 1.8;
const BODY_RADIUS: f32 = 0.45;
const BODY_HEIGHT: f32 = 1.5;
const HEAD_HEIGHT: f32 = 1.7;
const HEAD_RADIUS: f32 = 0.2;
const PACK_HEIGHT: f32 = 1.2;
const PACK_RADIUS: f32 = 0.25;
const PACK_OFFSET: f32 = 0.4;
const PILLAR_HEIGHT: f32 = 6.0;
const ARRIVAL_TOLERANCE: f32 = 1e-3;

/// Primitive shapes, both inflatable by a sweep radius.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Shape {
    /// Vertical cylinder standing on `base`.
    Cylinder { base: Vec3, radius: f32, height: f32 },
    Sphere { center: Vec3, radius: f32 },
}

impl Shape {
    /// Distance along `ray` to the first contact, if within `max`.
    fn intersect(&self, ray: Ray, inflate: f32, max: f32) -> Option<f32> {
        let t = match *self {
            Shape::Sphere { center, radius } => ray_sphere(ray, center, radius + inflate)?,
            Shape::Cylinder {
                base,
                radius,
                height,
            } => ray_cylinder(ray, base, radius + inflate, height)?,
        };
        (t <= max).then_some(t)
    }
}

fn ray_sphere(ray: Ray, center: Vec3, radius: f32) -> Option<f32> {
    let oc = ray.origin - center;
    let b = oc.dot(ray.direction);
    let c = oc.length_squared() - radius * radius;
    if c <= 0.0 {
        return Some(0.0);
    }
    let disc = b * b - c;
    if disc < 0.0 {
        return None;
    }
    let t = -b - disc.sqrt();
    (t >= 0.0).then_some(t)
}

fn ray_cylinder(ray: Ray, base: Vec3, radius: f32, height: f32) -> Option<f32> {
    let within_height = |t: f32| {
        let y = ray.at(t).y;
        y >= base.y && y <= base.y + height
    };
    let o = Vec2::new(ray.origin.x - base.x, ray.origin.z - base.z);
    let d = Vec2::new(ray.direction.x, ray.direction.z);
    let c = o.length_squared() - radius * radius;
    if c <= 0.0 && within_height(0.0) {
        return Some(0.0);
    }
    let a = d.length_squared();
    if a <= f32::EPSILON {
        return None;
    }
    let b = o.dot(d);
    let disc = b * b - a * c;
    if disc < 0.0 {
        return None;
    }
    let root = disc.sqrt();
    [(-b - root) / a, (-b + root) / a]
        .into_iter()
        .find(|&t| t >= 0.0 && within_height(t))
}

// ============================================================================
// Bodies
// ============================================================================

#[derive(Debug, Clone)]
struct Body {
    pose: Pose,
    kind: Option<EnemyKind>,
    destination: Option<Vec3>,
    stopped: bool,
    velocity: Vec3,
}

impl Body {
    fn colliders(&self) -> impl Iterator<Item = (ColliderTag, Shape)> + '_ {
        let kind = self.kind;
        let position = self.pose.position;
        let back = -self.pose.forward;
        kind.into_iter()
            .flat_map(EnemyKind::colliders)
            .map(move |&tag| {
                let shape = match tag {
                    ColliderTag::EnemyHead => Shape::Sphere {
                        center: position + Vec3::Y * HEAD_HEIGHT,
                        radius: HEAD_RADIUS,
                    },
                    ColliderTag::EnergyPack => Shape::Sphere {
                        center: position + back * PACK_OFFSET + Vec3::Y * PACK_HEIGHT,
                        radius: PACK_RADIUS,
                    },
                    _ => Shape::Cylinder {
                        base: position,
                        radius: BODY_RADIUS,
                        height: BODY_HEIGHT,
                    },
                };
                (tag, shape)
            })
    }
}

// ============================================================================
// World
// ============================================================================

#[derive(Debug, Clone)]
pub struct HeadlessWorld {
    config: WorldConfig,
    player: Pose,
    bodies: BTreeMap<EntityId, Body>,
    pillars: Vec<(Vec3, f32)>,
    anim: HashMap<(EntityId, AnimParam), AnimValue>,
    triggers: HashMap<(EntityId, AnimParam), u32>,
    impulses: Vec<Impulse>,
}

impl HeadlessWorld {
    pub fn new(config: WorldConfig) -> Self {
        Self {
            player: Pose::new(config.player_start, Vec3::Z),
            config,
            bodies: BTreeMap::new(),
            pillars: Vec::new(),
            anim: HashMap::new(),
            triggers: HashMap::new(),
            impulses: Vec::new(),
        }
    }

    pub fn config(&self) -> &WorldConfig {
        &self.config
    }

    /// Add a pillar that blocks sight, shots and placement.
    pub fn add_pillar(&mut self, center: Vec3, radius: f32) {
        self.pillars.push((Vec3::new(center.x, 0.0, center.z), radius));
    }

    pub fn contains(&self, point: Vec3) -> bool {
        let e = self.config.half_extent;
        point.x.abs() <= e && point.z.abs() <= e
    }

    fn in_pillar(&self, point: Vec3) -> bool {
        self.pillars.iter().any(|&(center, radius)| {
            Vec2::new(point.x - center.x, point.z - center.z).length() < radius
        })
    }

    /// Move an agent without pathing. Used by tests to stage encounters.
    pub fn teleport(&mut self, agent: EntityId, pose: Pose) -> bool {
        match self.bodies.get_mut(&agent) {
            Some(body) => {
                body.pose = pose;
                body.destination = None;
                body.velocity = Vec3::ZERO;
                true
            }
            None => false,
        }
    }

    pub fn destination(&self, agent: EntityId) -> Option<Vec3> {
        self.bodies.get(&agent)?.destination
    }

    pub fn is_stopped(&self, agent: EntityId) -> bool {
        self.bodies.get(&agent).is_some_and(|b| b.stopped)
    }

    pub fn agent_count(&self) -> usize {
        self.bodies.len()
    }

    pub fn anim_value(&self, agent: EntityId, param: AnimParam) -> Option<AnimValue> {
        self.anim.get(&(agent, param)).copied()
    }

    pub fn anim_bool(&self, agent: EntityId, param: AnimParam) -> Option<bool> {
        match self.anim_value(agent, param)? {
            AnimValue::Bool(value) => Some(value),
            _ => None,
        }
    }

    /// How many times a trigger parameter was fired for `agent`.
    pub fn trigger_count(&self, agent: EntityId, param: AnimParam) -> u32 {
        self.triggers.get(&(agent, param)).copied().unwrap_or(0)
    }

    /// Impulses applied since the last call.
    pub fn take_impulses(&mut self) -> Vec<Impulse> {
        std::mem::take(&mut self.impulses)
    }

    fn cast(&self, ray: Ray, inflate: f32, max: f32, mask: LayerMask) -> Option<RayHit> {
        let mut best: Option<(f32, Collider)> = None;
        let mut consider = |t: Option<f32>, collider: Collider| {
            if let Some(t) = t
                && best.is_none_or(|(d, _)| t < d)
            {
                best = Some((t, collider));
            }
        };

        if mask.contains(LayerMask::PLAYER) {
            let shape = Shape::Cylinder {
                base: self.player.position,
                radius: PLAYER_RADIUS,
                height: PLAYER_HEIGHT,
            };
            consider(shape.intersect(ray, inflate, max), Collider::Player);
        }
        if mask.contains(LayerMask::ENEMY) {
            for (&id, body) in &self.bodies {
                for (tag, shape) in body.colliders() {
                    consider(
                        shape.intersect(ray, inflate, max),
                        Collider::Agent { id, tag },
                    );
                }
            }
        }
        if mask.contains(LayerMask::DEFAULT) {
            for &(base, radius) in &self.pillars {
                let shape = Shape::Cylinder {
                    base,
                    radius,
                    height: PILLAR_HEIGHT,
                };
                consider(shape.intersect(ray, inflate, max), Collider::Environment);
            }
        }

        best.map(|(distance, collider)| RayHit {
            collider,
            point: ray.at(distance),
            distance,
        })
    }
}

impl Default for HeadlessWorld {
    fn default() -> Self {
        Self::new(WorldConfig::default())
    }
}

impl PhysicsOracle for HeadlessWorld {
    fn raycast(&self, ray: Ray, max_distance: f32, mask: LayerMask) -> Option<RayHit> {
        self.cast(ray, 0.0, max_distance, mask)
    }

    fn sphere_cast(
        &self,
        ray: Ray,
        radius: f32,
        max_distance: f32,
        mask: LayerMask,
    ) -> Option<RayHit> {
        self.cast(ray, radius.max(0.0), max_distance, mask)
    }
}

impl ImpulseSink for HeadlessWorld {
    fn apply_impulse(&mut self, impulse: Impulse) {
        self.impulses.push(impulse);
    }
}

impl NavigationQuery for HeadlessWorld {
    fn pose(&self, agent: EntityId) -> Option<Pose> {
        self.bodies.get(&agent).map(|b| b.pose)
    }

    fn is_path_pending(&self, _agent: EntityId) -> bool {
        false
    }

    fn is_on_surface(&self, agent: EntityId) -> bool {
        self.bodies
            .get(&agent)
            .is_some_and(|b| self.contains(b.pose.position))
    }

    fn desired_velocity(&self, agent: EntityId) -> Vec3 {
        self.bodies
            .get(&agent)
            .map_or(Vec3::ZERO, |b| b.velocity)
    }

    fn sample_position(&self, point: Vec3, max_distance: f32) -> Option<Vec3> {
        let e = self.config.half_extent;
        let snapped = Vec3::new(point.x.clamp(-e, e), 0.0, point.z.clamp(-e, e));
        if snapped.distance(point) > max_distance || self.in_pillar(snapped) {
            return None;
        }
        Some(snapped)
    }
}

impl NavigationOracle for HeadlessWorld {
    fn request_destination(&mut self, agent: EntityId, point: Vec3) {
        if let Some(body) = self.bodies.get_mut(&agent) {
            body.destination = Some(point);
        }
    }

    fn resume(&mut self, agent: EntityId) {
        if let Some(body) = self.bodies.get_mut(&agent) {
            body.stopped = false;
        }
    }

    fn stop(&mut self, agent: EntityId) {
        if let Some(body) = self.bodies.get_mut(&agent) {
            body.stopped = true;
            body.velocity = Vec3::ZERO;
        }
    }

    fn place(&mut self, agent: EntityId, pose: Pose) -> bool {
        if !self.contains(pose.position) || self.in_pillar(pose.position) {
            return false;
        }
        self.bodies.insert(
            agent,
            Body {
                pose,
                kind: None,
                destination: None,
                stopped: false,
                velocity: Vec3::ZERO,
            },
        );
        true
    }

    fn remove(&mut self, agent: EntityId) {
        self.bodies.remove(&agent);
        self.anim.retain(|(id, _), _| *id != agent);
        self.triggers.retain(|(id, _), _| *id != agent);
    }
}

impl AnimationSink for HeadlessWorld {
    fn set_bool(&mut self, agent: EntityId, param: AnimParam, value: bool) {
        self.anim.insert((agent, param), AnimValue::Bool(value));
    }

    fn set_int(&mut self, agent: EntityId, param: AnimParam, value: i32) {
        self.anim.insert((agent, param), AnimValue::Int(value));
    }

    fn set_float(&mut self, agent: EntityId, param: AnimParam, value: f32) {
        self.anim.insert((agent, param), AnimValue::Float(value));
    }

    fn set_trigger(&mut self, agent: EntityId, param: AnimParam) {
        *self.triggers.entry((agent, param)).or_insert(0) += 1;
    }
}

impl ArenaWorld for HeadlessWorld {
    fn target_pose(&self) -> Pose {
        self.player
    }

    fn set_target_pose(&mut self, pose: Pose) {
        let e = self.config.half_extent;
        let position = Vec3::new(
            pose.position.x.clamp(-e, e),
            pose.position.y,
            pose.position.z.clamp(-e, e),
        );
        self.player = Pose::new(position, pose.forward);
    }

    fn attach_colliders(&mut self, agent: EntityId, kind: EnemyKind) {
        if let Some(body) = self.bodies.get_mut(&agent) {
            body.kind = Some(kind);
        }
    }

    fn step(&mut self, dt: f32) {
        let speed = self.config.agent_speed;
        let stopping = self.config.stopping_distance;
        for body in self.bodies.values_mut() {
            body.velocity = Vec3::ZERO;
            let Some(destination) = body.destination else {
                continue;
            };
            let mut offset = destination - body.pose.position;
            offset.y = 0.0;
            let Some(direction) = offset.try_normalize() else {
                continue;
            };
            // Arrived agents keep facing their destination.
            body.pose.forward = direction;
            if body.stopped || offset.length() <= stopping + ARRIVAL_TOLERANCE {
                continue;
            }
            let travel = (speed * dt).min(offset.length() - stopping);
            body.velocity = direction * speed;
            body.pose.position += direction * travel;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// World with the player at the origin and one agent of `kind` at `at`.
    struct TestContext {
        world: HeadlessWorld,
        agent: EntityId,
    }

    impl TestContext {
        fn new(kind: EnemyKind, at: Vec3) -> Self {
            let mut world = HeadlessWorld::default();
            let agent = EntityId(1);
            assert!(world.place(agent, Pose::looking_at(at, Vec3::ZERO)));
            world.attach_colliders(agent, kind);
            Self { world, agent }
        }
    }

    #[test]
    fn shots_at_head_height_hit_the_head() {
        let ctx = TestContext::new(EnemyKind::Melee, Vec3::new(0.0, 0.0, 10.0));
        let ray = Ray::between(Vec3::new(0.0, 1.7, 0.0), Vec3::new(0.0, 1.7, 10.0)).unwrap();

        let hit = ctx.world.raycast(ray, 40.0, LayerMask::WEAPON).unwrap();
        assert_eq!(
            hit.collider,
            Collider::Agent {
                id: ctx.agent,
                tag: ColliderTag::EnemyHead
            }
        );
    }

    #[test]
    fn energy_pack_sits_behind_the_flamer() {
        let ctx = TestContext::new(EnemyKind::Flamer, Vec3::new(0.0, 0.0, 10.0));

        let from_front =
            Ray::between(Vec3::new(0.0, 1.2, 0.0), Vec3::new(0.0, 1.2, 10.0)).unwrap();
        let front = ctx.world.raycast(from_front, 40.0, LayerMask::WEAPON).unwrap();
        assert_eq!(front.collider.agent().map(|(_, t)| t), Some(ColliderTag::FlamerEnemy));

        let from_back =
            Ray::between(Vec3::new(0.0, 1.2, 20.0), Vec3::new(0.0, 1.2, 10.0)).unwrap();
        let back = ctx.world.raycast(from_back, 40.0, LayerMask::WEAPON).unwrap();
        assert_eq!(back.collider.agent().map(|(_, t)| t), Some(ColliderTag::EnergyPack));
    }

    #[test]
    fn pillars_block_sight() {
        let mut world = HeadlessWorld::default();
        let eye = Vec3::new(0.0, 0.0, 10.0);
        let ray = Ray::between(eye, Vec3::ZERO).unwrap();
        assert_eq!(
            world.raycast(ray, 20.0, LayerMask::SIGHT).map(|h| h.collider),
            Some(Collider::Player)
        );

        world.add_pillar(Vec3::new(0.0, 0.0, 5.0), 1.0);
        assert_eq!(
            world.raycast(ray, 20.0, LayerMask::SIGHT).map(|h| h.collider),
            Some(Collider::Environment)
        );
    }

    #[test]
    fn agents_walk_to_their_destination_and_stop_short() {
        let mut ctx = TestContext::new(EnemyKind::Melee, Vec3::new(0.0, 0.0, 10.0));
        ctx.world.request_destination(ctx.agent, Vec3::ZERO);

        for _ in 0..100 {
            ctx.world.step(0.1);
        }
        let pose = ctx.world.pose(ctx.agent).unwrap();
        assert!((pose.position.z - 1.2).abs() < 1e-3, "{:?}", pose.position);
        assert!(pose.forward.z < -0.99);
        assert_eq!(ctx.world.desired_velocity(ctx.agent), Vec3::ZERO);
    }

    #[test]
    fn stopped_agents_stay_put() {
        let mut ctx = TestContext::new(EnemyKind::Melee, Vec3::new(0.0, 0.0, 10.0));
        ctx.world.request_destination(ctx.agent, Vec3::ZERO);
        ctx.world.stop(ctx.agent);
        ctx.world.step(1.0);
        assert_eq!(
            ctx.world.pose(ctx.agent).unwrap().position,
            Vec3::new(0.0, 0.0, 10.0)
        );
    }

    #[test]
    fn sampling_snaps_to_floor_and_avoids_pillars() {
        let mut world = HeadlessWorld::default();
        assert_eq!(
            world.sample_position(Vec3::new(3.0, 2.0, 4.0), 5.0),
            Some(Vec3::new(3.0, 0.0, 4.0))
        );
        assert_eq!(world.sample_position(Vec3::new(50.0, 0.0, 0.0), 5.0), None);
        assert_eq!(
            world.sample_position(Vec3::new(50.0, 0.0, 0.0), 15.0),
            Some(Vec3::new(40.0, 0.0, 0.0))
        );

        world.add_pillar(Vec3::new(3.0, 0.0, 4.0), 1.0);
        assert_eq!(world.sample_position(Vec3::new(3.0, 0.0, 4.0), 5.0), None);
    }

    #[test]
    fn removal_forgets_animation_state() {
        let mut ctx = TestContext::new(EnemyKind::Melee, Vec3::new(0.0, 0.0, 10.0));
        ctx.world.set_bool(ctx.agent, AnimParam::Alive, true);
        ctx.world.set_trigger(ctx.agent, AnimParam::Hit);
        ctx.world.remove(ctx.agent);
        assert_eq!(ctx.world.anim_value(ctx.agent, AnimParam::Alive), None);
        assert_eq!(ctx.world.trigger_count(ctx.agent, AnimParam::Hit), 0);
        assert_eq!(ctx.world.agent_count(), 0);
    }
}
