//! Spawn schedule loader.

use std::path::Path;

use arena_core::SpawnSchedule;

use crate::loaders::{LoadResult, read_file};

/// Loader for the spawn schedule from RON files.
pub struct ScheduleLoader;

impl ScheduleLoader {
    /// Load and validate a spawn schedule.
    pub fn load(path: &Path) -> LoadResult<SpawnSchedule> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<SpawnSchedule> {
        let schedule: SpawnSchedule = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse spawn schedule RON: {}", e))?;

        schedule
            .validate()
            .map_err(|e| anyhow::anyhow!("Invalid spawn schedule: {}", e))?;
        Ok(schedule)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unlisted_fields_keep_defaults() {
        let schedule = ScheduleLoader::parse(
            "(bands: [
                (start: 0.0, end: 60.0, melee_interval: (2.0, 3.0)),
                (start: 60.0, end: 1200.0, melee_interval: (1.0, 2.0),
                 armoured_interval: Some((10.0, 20.0)), armoured_cap: Some(5)),
            ])",
        )
        .unwrap();

        assert_eq!(schedule.bands.len(), 2);
        assert_eq!(schedule.armoured_cap_at(30.0), 3);
        assert_eq!(schedule.armoured_cap_at(90.0), 5);
        assert_eq!(schedule.kill_wave_every, 6.0);
    }

    #[test]
    fn overlapping_bands_are_rejected() {
        let err = ScheduleLoader::parse(
            "(bands: [
                (start: 0.0, end: 60.0, melee_interval: (2.0, 3.0)),
                (start: 30.0, end: 90.0, melee_interval: (2.0, 3.0)),
            ])",
        )
        .unwrap_err();
        assert!(err.to_string().contains("Invalid spawn schedule"));
    }

    #[test]
    fn empty_schedule_is_rejected() {
        assert!(ScheduleLoader::parse("(bands: [])").is_err());
    }
}
