//! Population director.
//!
//! Turns level time into spawn commands. Timers fire into a FIFO queue of
//! requests; each tick admits at most one of them against the population caps
//! and places it around the target.

use std::collections::VecDeque;

use glam::Vec3;
use tracing::{debug, info, warn};

use super::placement::{choose_spawn_point, unconstrained_point};
use super::{SpawnArea, SpawnSchedule};
use crate::agent::EnemyKind;
use crate::combat::ScoreLedger;
use crate::config::SpawnConfig;
use crate::entity::Pose;
use crate::env::{NavigationQuery, PcgRng, RngOracle};

/// What the director sees of the world on a tick.
pub struct SpawnContext<'a> {
    pub population: &'a ScoreLedger,
    pub target: Vec3,
    pub target_alive: bool,
    pub areas: &'a [SpawnArea],
    pub navigation: &'a dyn NavigationQuery,
}

/// Spawn an enemy of `kind` at `position`, facing `facing`.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpawnCommand {
    pub kind: EnemyKind,
    pub position: Vec3,
    pub facing: Vec3,
    /// Spawned by a kill wave.
    pub wave: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Request {
    Capped(EnemyKind),
    Wave(EnemyKind),
}

enum Admission {
    Admit,
    Drop,
    RetryFlamer,
}

#[derive(Clone, Debug)]
pub struct SpawnDirector {
    schedule: SpawnSchedule,
    config: SpawnConfig,
    rng: PcgRng,
    seed: PcgRng,
    queue: VecDeque<Request>,
    next_melee: Option<f32>,
    next_armoured: Option<f32>,
    opening_armoured: Option<f32>,
    next_flamer: Option<f32>,
    flamer_retry: Option<f32>,
    next_wave: Option<f32>,
    waves_started: bool,
}

impl SpawnDirector {
    pub fn new(schedule: SpawnSchedule, config: SpawnConfig, rng: PcgRng) -> Self {
        let mut director = Self {
            opening_armoured: schedule.opening_armoured_at,
            next_flamer: Some(schedule.flamer_first_at),
            next_wave: Some(schedule.kill_wave_at),
            schedule,
            config,
            rng,
            seed: rng,
            queue: VecDeque::new(),
            next_melee: None,
            next_armoured: None,
            flamer_retry: None,
            waves_started: false,
        };
        director.next_melee = director.sample_melee(0.0);
        director
    }

    #[inline]
    pub fn schedule(&self) -> &SpawnSchedule {
        &self.schedule
    }

    /// Requests waiting for admission.
    #[inline]
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    #[inline]
    pub fn in_kill_waves(&self) -> bool {
        self.waves_started
    }

    /// Back to level start, replaying the same random stream.
    pub fn reset(&mut self) {
        *self = Self::new(self.schedule.clone(), self.config.clone(), self.seed);
    }

    /// Advance to `elapsed` seconds of level time. Emits at most one command.
    pub fn tick(&mut self, elapsed: f32, ctx: &SpawnContext<'_>) -> Option<SpawnCommand> {
        if !ctx.target_alive {
            self.queue.clear();
            return None;
        }
        self.fire_timers(elapsed);

        while let Some(request) = self.queue.pop_front() {
            match self.admit(request, elapsed, ctx.population) {
                Admission::Admit => {
                    if let Some(command) = self.place(request, ctx) {
                        info!(
                            kind = %command.kind,
                            wave = command.wave,
                            active = ctx.population.active() + 1,
                            elapsed,
                            "spawning"
                        );
                        return Some(command);
                    }
                }
                Admission::Drop => {
                    debug!(?request, elapsed, "spawn skipped by cap");
                }
                Admission::RetryFlamer => {
                    self.flamer_retry = Some(elapsed + self.schedule.flamer_retry);
                }
            }
        }
        None
    }

    fn fire_timers(&mut self, elapsed: f32) {
        if elapsed >= self.schedule.kill_wave_at {
            if !self.waves_started {
                self.waves_started = true;
                self.next_melee = None;
                self.next_armoured = None;
                self.opening_armoured = None;
                self.next_flamer = None;
                self.flamer_retry = None;
                self.queue.retain(|r| matches!(r, Request::Wave(_)));
                info!(elapsed, "kill waves started");
            }
            while let Some(at) = self.next_wave.filter(|&at| elapsed >= at) {
                let kind = EnemyKind::ALL[self.rng.pick_index(EnemyKind::COUNT)];
                self.queue.push_back(Request::Wave(kind));
                self.next_wave = Some(at + self.schedule.kill_wave_every.max(f32::EPSILON));
            }
            return;
        }

        while let Some(at) = self.next_melee.filter(|&at| elapsed >= at) {
            self.queue.push_back(Request::Capped(EnemyKind::Melee));
            self.next_melee = self.sample_melee(at).map(|interval| at + interval);
        }

        if self.opening_armoured.is_some_and(|at| elapsed >= at) {
            self.queue.push_back(Request::Capped(EnemyKind::Armoured));
            self.opening_armoured = None;
        }

        let band_armoured = self
            .schedule
            .band_at(elapsed)
            .and_then(|band| band.armoured_interval);
        match (self.next_armoured, band_armoured) {
            (None, Some(interval)) => {
                self.next_armoured = Some(elapsed + self.sample(interval));
            }
            (Some(_), None) => self.next_armoured = None,
            _ => {}
        }
        while let Some(at) = self.next_armoured.filter(|&at| elapsed >= at) {
            self.queue.push_back(Request::Capped(EnemyKind::Armoured));
            let interval = self
                .schedule
                .band_at(at)
                .and_then(|band| band.armoured_interval);
            self.next_armoured = interval.map(|interval| at + self.sample(interval));
        }

        while let Some(at) = self.next_flamer.filter(|&at| elapsed >= at) {
            self.queue.push_back(Request::Capped(EnemyKind::Flamer));
            self.next_flamer = Some(at + self.schedule.flamer_every.max(f32::EPSILON));
        }
        if self.flamer_retry.is_some_and(|at| elapsed >= at) {
            self.flamer_retry = None;
            self.queue.push_back(Request::Capped(EnemyKind::Flamer));
        }
    }

    fn sample(&mut self, (min, max): (f32, f32)) -> f32 {
        self.rng.range_f32(min, max)
    }

    /// Interval to the next melee spawn, from the band covering `at`.
    fn sample_melee(&mut self, at: f32) -> Option<f32> {
        let interval = self.schedule.band_at(at)?.melee_interval;
        Some(self.sample(interval))
    }

    fn admit(&self, request: Request, elapsed: f32, population: &ScoreLedger) -> Admission {
        let global_full = population.active() >= self.config.global_cap;
        match request {
            Request::Wave(_) | Request::Capped(EnemyKind::Melee) if global_full => Admission::Drop,
            Request::Wave(_) | Request::Capped(EnemyKind::Melee) => Admission::Admit,
            Request::Capped(EnemyKind::Armoured) => {
                let cap = self.schedule.armoured_cap_at(elapsed);
                if global_full || population.active_of(EnemyKind::Armoured) >= cap {
                    Admission::Drop
                } else {
                    Admission::Admit
                }
            }
            Request::Capped(EnemyKind::Flamer) => {
                if population.active_of(EnemyKind::Flamer) >= self.schedule.flamer_cap {
                    Admission::Drop
                } else if global_full {
                    Admission::RetryFlamer
                } else {
                    Admission::Admit
                }
            }
        }
    }

    fn distance_for(&self, kind: EnemyKind) -> (f32, f32) {
        match kind {
            EnemyKind::Melee => self.config.melee_distance,
            EnemyKind::Armoured => self.config.armoured_distance,
            EnemyKind::Flamer => self.config.flamer_distance,
        }
    }

    fn place(&mut self, request: Request, ctx: &SpawnContext<'_>) -> Option<SpawnCommand> {
        let (kind, wave) = match request {
            Request::Capped(kind) => (kind, false),
            Request::Wave(kind) => (kind, true),
        };
        let distance = self.distance_for(kind);
        let position = if wave {
            unconstrained_point(ctx.target, distance, ctx.navigation, &mut self.rng)
        } else {
            choose_spawn_point(
                ctx.target,
                distance,
                self.config.placement_attempts,
                ctx.areas,
                ctx.navigation,
                &mut self.rng,
            )
        };

        let Some(position) = position else {
            warn!(%kind, target = ?ctx.target, "no navigable spawn point");
            return None;
        };
        Some(SpawnCommand {
            kind,
            position,
            facing: Pose::looking_at(position, ctx.target).forward,
            wave,
        })
    }
}
