//! Loads the standard set of data files from one directory.

use std::path::{Path, PathBuf};

use arena_core::{ArenaConfig, EnemyRoster, SpawnSchedule, WeaponProfile};
use tracing::{debug, info};

use crate::loaders::{ConfigLoader, EnemyLoader, LoadResult, ScheduleLoader, WeaponLoader};

/// Everything a session needs from data files.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── arena.toml
/// ├── weapons.ron
/// ├── enemies.ron
/// └── spawn_schedule.ron
/// ```
///
/// Missing files fall back to the built-in defaults; malformed files are
/// errors.
#[derive(Clone, Debug, PartialEq)]
pub struct ContentBundle {
    pub config: ArenaConfig,
    pub weapons: Vec<WeaponProfile>,
    pub enemies: EnemyRoster,
    pub schedule: SpawnSchedule,
}

impl ContentBundle {
    pub const CONFIG_FILE: &'static str = "arena.toml";
    pub const WEAPONS_FILE: &'static str = "weapons.ron";
    pub const ENEMIES_FILE: &'static str = "enemies.ron";
    pub const SCHEDULE_FILE: &'static str = "spawn_schedule.ron";

    pub fn load_dir(data_dir: &Path) -> LoadResult<Self> {
        let config = load_or(data_dir, Self::CONFIG_FILE, ConfigLoader::load, ArenaConfig::new)?;
        let weapons = load_or(
            data_dir,
            Self::WEAPONS_FILE,
            WeaponLoader::load,
            WeaponProfile::defaults,
        )?;
        let enemies = load_or(
            data_dir,
            Self::ENEMIES_FILE,
            EnemyLoader::load,
            EnemyRoster::default,
        )?;
        let schedule = load_or(
            data_dir,
            Self::SCHEDULE_FILE,
            ScheduleLoader::load,
            SpawnSchedule::default,
        )?;

        info!(
            dir = %data_dir.display(),
            weapons = weapons.len(),
            bands = schedule.bands.len(),
            "content loaded"
        );

        Ok(Self {
            config,
            weapons,
            enemies,
            schedule,
        })
    }
}

impl Default for ContentBundle {
    fn default() -> Self {
        Self {
            config: ArenaConfig::default(),
            weapons: WeaponProfile::defaults(),
            enemies: EnemyRoster::default(),
            schedule: SpawnSchedule::default(),
        }
    }
}

fn load_or<T>(
    dir: &Path,
    name: &str,
    load: impl FnOnce(&Path) -> LoadResult<T>,
    fallback: impl FnOnce() -> T,
) -> LoadResult<T> {
    let path: PathBuf = dir.join(name);
    if !path.exists() {
        debug!(file = name, "data file absent, using defaults");
        return Ok(fallback());
    }
    load(&path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loaders::test_support::TestContext;

    #[test]
    fn shipped_data_loads() {
        let bundle = ContentBundle::load_dir(&crate::shipped_data_dir()).unwrap();
        let defaults = ContentBundle::default();

        assert_eq!(bundle.config.spawn.global_cap, 30);
        assert_eq!(bundle.config.scores, defaults.config.scores);
        let kinds: Vec<_> = bundle.weapons.iter().map(|w| w.kind).collect();
        let default_kinds: Vec<_> = defaults.weapons.iter().map(|w| w.kind).collect();
        assert_eq!(kinds, default_kinds);
        for kind in arena_core::EnemyKind::ALL {
            assert_eq!(
                bundle.enemies.get(kind).pickups,
                defaults.enemies.get(kind).pickups
            );
        }
        assert_eq!(bundle.schedule.bands.len(), 5);
        assert_eq!(bundle.schedule.armoured_cap_at(150.0), 2);
    }

    #[test]
    fn empty_directory_yields_defaults() {
        let ctx = TestContext::new();
        let bundle = ContentBundle::load_dir(ctx.dir.path()).unwrap();
        assert_eq!(bundle.weapons.len(), 3);
        assert_eq!(bundle.schedule, SpawnSchedule::default());
    }

    #[test]
    fn malformed_file_fails_the_bundle() {
        let ctx = TestContext::new();
        ctx.write(ContentBundle::WEAPONS_FILE, "(weapons: [");
        assert!(ContentBundle::load_dir(ctx.dir.path()).is_err());
    }
}
