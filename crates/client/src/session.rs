//! Scripted headless session.
//!
//! A [`Gunner`] stands in for the player: it turns towards the nearest live
//! enemy, picks a weapon for the range, fires, reloads and punches, and walks
//! to a health pack when hurt. Enough to exercise every system of the level.

use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use arena_content::ContentBundle;
use arena_core::spawn::SpawnArea;
use arena_core::{
    EnemyKind, LevelOutcome, LevelSummary, NavigationQuery, PickupKind, Pose, WeaponKind,
};
use arena_runtime::simulation::{EYE_HEIGHT, PUNCH_HEIGHT};
use arena_runtime::{
    ArenaWorld, HeadlessWorld, Notification, PlayerInput, Simulation, Topic, WorldConfig,
};
use glam::Vec3;
use tokio::sync::broadcast::error::RecvError;
use tokio::task::JoinHandle;
use tokio::time::{Interval, MissedTickBehavior};
use tracing::{debug, info, warn};

use crate::config::SessionConfig;

const HEAD_HEIGHT: f32 = 1.7;
const CHEST_HEIGHT: f32 = 1.0;
/// Seconds between trigger pulls.
const FIRE_INTERVAL: f32 = 0.35;
const WALK_SPEED: f32 = 4.0;
/// Shotgun range for the scripted player.
const CLOSE_RANGE: f32 = 6.0;

// ============================================================================
// Scripted player
// ============================================================================

#[derive(Debug, Clone, Default)]
pub struct Gunner {
    cooldown: f32,
}

impl Gunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Input for the next frame.
    pub fn decide<W: ArenaWorld>(&mut self, sim: &Simulation<W>, dt: f32) -> PlayerInput {
        self.cooldown = (self.cooldown - dt).max(0.0);
        let me = sim.world().target_pose();

        if sim.player().is_low_health()
            && let Some(pose) = self.seek_health(sim, me, dt)
        {
            return PlayerInput::at(pose);
        }

        let Some((kind, position)) = nearest_enemy(sim, me.position) else {
            return PlayerInput::idle();
        };
        let distance = me.position.distance(position);

        let aim_height = if kind == EnemyKind::Melee {
            HEAD_HEIGHT
        } else {
            CHEST_HEIGHT
        };
        let reach = sim.config().combat.punch_reach;
        let origin = if distance <= reach {
            PUNCH_HEIGHT
        } else {
            EYE_HEIGHT
        };
        let aim = position + Vec3::Y * aim_height - (me.position + Vec3::Y * origin);
        let mut input = PlayerInput::at(Pose::new(me.position, aim));

        if self.cooldown > 0.0 {
            return input;
        }
        self.cooldown = FIRE_INTERVAL;

        if distance <= reach {
            return input.punching();
        }

        let weapon = choose_weapon(kind, distance);
        let loaded = sim
            .arsenal()
            .get(weapon)
            .map_or(0, |w| w.magazine().loaded);
        let equipped = sim.arsenal().equipped().map(|w| w.profile().kind);
        if equipped != Some(weapon) {
            input = input.equipping(weapon);
        }
        if loaded > 0 {
            input.firing()
        } else {
            input.reloading()
        }
    }

    /// Step towards the closest active health pack.
    fn seek_health<W: ArenaWorld>(&self, sim: &Simulation<W>, me: Pose, dt: f32) -> Option<Pose> {
        let (_, pack) = sim
            .pickups()
            .filter(|(_, p)| p.kind == PickupKind::Health && p.is_active())
            .min_by(|(_, a), (_, b)| {
                a.position
                    .distance(me.position)
                    .total_cmp(&b.position.distance(me.position))
            })?;
        let to_pack = pack.position - me.position;
        let step = to_pack.clamp_length_max(WALK_SPEED * dt);
        Some(Pose::new(me.position + step, to_pack))
    }
}

fn nearest_enemy<W: ArenaWorld>(sim: &Simulation<W>, from: Vec3) -> Option<(EnemyKind, Vec3)> {
    sim.agents()
        .filter(|agent| agent.is_active())
        .filter_map(|agent| {
            let pose = sim.world().pose(agent.id())?;
            Some((agent.kind(), pose.position))
        })
        .min_by(|(_, a), (_, b)| a.distance(from).total_cmp(&b.distance(from)))
}

fn choose_weapon(kind: EnemyKind, distance: f32) -> WeaponKind {
    if distance < CLOSE_RANGE {
        WeaponKind::Shotgun
    } else if kind == EnemyKind::Melee {
        WeaponKind::Handgun
    } else {
        WeaponKind::PlasmaRifle
    }
}

// ============================================================================
// Session
// ============================================================================

/// Arena layout: four pillars, two health packs and an ammo crate per weapon.
pub fn arena_world() -> (HeadlessWorld, Vec<(PickupKind, Vec3)>, Vec<SpawnArea>) {
    let mut world = HeadlessWorld::new(WorldConfig::default());
    for (x, z) in [(12.0, 12.0), (-12.0, 12.0), (12.0, -12.0), (-12.0, -12.0)] {
        world.add_pillar(Vec3::new(x, 0.0, z), 1.5);
    }

    let pickups = vec![
        (PickupKind::Health, Vec3::new(6.0, 0.0, 0.0)),
        (PickupKind::Health, Vec3::new(-6.0, 0.0, 0.0)),
        (PickupKind::Ammo(WeaponKind::Handgun), Vec3::new(0.0, 0.0, 6.0)),
        (PickupKind::Ammo(WeaponKind::Shotgun), Vec3::new(0.0, 0.0, -6.0)),
        (PickupKind::Ammo(WeaponKind::PlasmaRifle), Vec3::new(4.0, 0.0, 4.0)),
    ];

    let extent = world.config().half_extent;
    let areas = vec![SpawnArea::new(
        Vec3::new(-extent, -1.0, -extent),
        Vec3::new(extent, 5.0, extent),
    )];
    (world, pickups, areas)
}

/// Run one level to its end and return the summary.
pub async fn run(config: &SessionConfig, content: ContentBundle, log_dir: &Path) -> Result<LevelSummary> {
    let (world, pickups, areas) = arena_world();
    let mut builder = Simulation::builder()
        .content(content)
        .seed(config.seed)
        .policy(config.policy)
        .world(world)
        .pickups(pickups)
        .spawn_areas(areas);
    if let Some(journal) = &config.journal {
        builder = builder.journal(log_dir.join(journal));
    }
    let mut sim = builder.build().context("Failed to build simulation")?;
    let listener = spawn_listener(&sim);

    let dt = config.frame_seconds();
    let mut ticker = config.realtime.then(|| {
        let mut interval = tokio::time::interval(Duration::from_secs_f32(dt));
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        interval
    });
    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    info!(
        seed = config.seed,
        tick_hz = config.tick_hz,
        duration = config.duration_secs,
        realtime = config.realtime,
        "session started"
    );

    let mut gunner = Gunner::new();
    let mut interrupted = false;
    for _ in 0..config.frame_budget() {
        tokio::select! {
            biased;
            _ = &mut shutdown => {
                warn!("interrupted");
                interrupted = true;
                break;
            }
            _ = pace(&mut ticker) => {}
        }

        let input = gunner.decide(&sim, dt);
        sim.step(dt, &input)?;
        if sim.is_over() {
            break;
        }
    }

    let outcome = if interrupted {
        LevelOutcome::Interrupted
    } else {
        LevelOutcome::TimeElapsed
    };
    let summary = sim.end(outcome)?;

    drop(sim);
    if let Err(e) = listener.await {
        warn!(error = %e, "notification listener failed");
    }
    Ok(summary)
}

async fn pace(ticker: &mut Option<Interval>) {
    match ticker {
        Some(interval) => {
            interval.tick().await;
        }
        None => tokio::task::yield_now().await,
    }
}

/// Log level and score notifications until the simulation is dropped.
fn spawn_listener<W: ArenaWorld>(sim: &Simulation<W>) -> JoinHandle<()> {
    let mut level = sim.bus().subscribe(Topic::Level);
    let mut score = sim.bus().subscribe(Topic::Score);
    tokio::spawn(async move {
        let (mut level_open, mut score_open) = (true, true);
        loop {
            tokio::select! {
                received = level.recv(), if level_open => {
                    level_open = log_notification(received);
                }
                received = score.recv(), if score_open => {
                    score_open = log_notification(received);
                }
                else => break,
            }
        }
    })
}

/// Returns false once the channel is closed.
fn log_notification(received: Result<Notification, RecvError>) -> bool {
    match received {
        Ok(Notification::ScoreChanged {
            score,
            points,
            kills,
        }) => debug!(score, points, kills, "score"),
        Ok(Notification::LevelEnded { summary }) => {
            info!(outcome = %summary.outcome, score = summary.score, "level over");
        }
        Ok(_) => {}
        Err(RecvError::Lagged(skipped)) => debug!(skipped, "listener lagged"),
        Err(RecvError::Closed) => return false,
    }
    true
}

#[cfg(test)]
mod tests {
    use arena_core::SpawnCommand;

    use super::*;

    struct TestContext {
        sim: Simulation<HeadlessWorld>,
        gunner: Gunner,
    }

    impl TestContext {
        fn new() -> Self {
            let sim = Simulation::builder()
                .world(HeadlessWorld::default())
                .build()
                .unwrap();
            Self {
                sim,
                gunner: Gunner::new(),
            }
        }

        fn enemy(&mut self, kind: EnemyKind, position: Vec3) {
            let command = SpawnCommand {
                kind,
                position,
                facing: -position,
                wave: false,
            };
            self.sim.spawn(command).unwrap().unwrap();
        }
    }

    #[test]
    fn idle_without_enemies() {
        let mut ctx = TestContext::new();
        let input = ctx.gunner.decide(&ctx.sim, 0.05);
        assert_eq!(input, PlayerInput::idle());
    }

    #[test]
    fn close_melee_gets_the_shotgun_at_head_height() {
        let mut ctx = TestContext::new();
        ctx.enemy(EnemyKind::Melee, Vec3::new(0.0, 0.0, 4.0));

        let input = ctx.gunner.decide(&ctx.sim, 0.05);

        assert!(input.fire);
        assert_eq!(input.equip, Some(WeaponKind::Shotgun));
        let forward = input.pose.unwrap().forward;
        assert!(forward.z > 0.99 && forward.y > 0.0);
    }

    #[test]
    fn distant_armoured_gets_the_plasma_rifle() {
        let mut ctx = TestContext::new();
        ctx.enemy(EnemyKind::Armoured, Vec3::new(10.0, 0.0, 0.0));

        let input = ctx.gunner.decide(&ctx.sim, 0.05);

        assert!(input.fire);
        assert_eq!(input.equip, Some(WeaponKind::PlasmaRifle));
        assert!(input.pose.unwrap().forward.x > 0.9);
    }

    #[test]
    fn enemy_in_reach_is_punched() {
        let mut ctx = TestContext::new();
        ctx.enemy(EnemyKind::Melee, Vec3::new(0.0, 0.0, 1.0));

        let input = ctx.gunner.decide(&ctx.sim, 0.05);

        assert!(input.punch);
        assert!(!input.fire);
    }

    #[test]
    fn trigger_respects_cooldown() {
        let mut ctx = TestContext::new();
        ctx.enemy(EnemyKind::Melee, Vec3::new(0.0, 0.0, 10.0));

        assert!(ctx.gunner.decide(&ctx.sim, 0.05).fire);
        assert!(!ctx.gunner.decide(&ctx.sim, 0.05).fire);
        assert!(ctx.gunner.decide(&ctx.sim, FIRE_INTERVAL).fire);
    }

    #[tokio::test]
    async fn short_session_runs_to_the_time_limit() {
        let dir = std::env::temp_dir().join("arena-session-test");
        let config = SessionConfig {
            duration_secs: 3.0,
            tick_hz: 20,
            ..SessionConfig::default()
        };

        let summary = run(&config, ContentBundle::default(), &dir).await.unwrap();

        assert_eq!(summary.outcome, LevelOutcome::TimeElapsed);
        assert!((summary.elapsed - 3.0).abs() < 0.1);
    }
}
