//! Time-banded spawn schedule.

use super::SpawnError;

/// Spawn pacing for one stretch of the level.
///
/// Bands cover `[start, end)` in seconds of level time.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpawnBand {
    pub start: f32,
    pub end: f32,
    /// `[min, max]` seconds between melee spawns.
    pub melee_interval: (f32, f32),
    /// `[min, max]` seconds between armoured spawns; `None` disables them.
    #[cfg_attr(feature = "serde", serde(default))]
    pub armoured_interval: Option<(f32, f32)>,
    /// Concurrent armoured cap; `None` falls back to the schedule default.
    #[cfg_attr(feature = "serde", serde(default))]
    pub armoured_cap: Option<u32>,
}

impl SpawnBand {
    #[inline]
    pub fn contains(&self, elapsed: f32) -> bool {
        self.start <= elapsed && elapsed < self.end
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SpawnSchedule {
    pub bands: Vec<SpawnBand>,
    pub default_armoured_cap: u32,
    /// One-shot armoured spawn early in the level.
    pub opening_armoured_at: Option<f32>,
    pub flamer_first_at: f32,
    pub flamer_every: f32,
    pub flamer_cap: u32,
    /// Delay before a flamer blocked by the global cap is tried again.
    pub flamer_retry: f32,
    /// Level time after which kill waves replace the banded schedule.
    pub kill_wave_at: f32,
    pub kill_wave_every: f32,
}

impl SpawnSchedule {
    /// Band covering `elapsed`, if any.
    pub fn band_at(&self, elapsed: f32) -> Option<&SpawnBand> {
        self.bands.iter().find(|band| band.contains(elapsed))
    }

    /// Armoured cap in force at `elapsed`.
    pub fn armoured_cap_at(&self, elapsed: f32) -> u32 {
        self.band_at(elapsed)
            .and_then(|band| band.armoured_cap)
            .unwrap_or(self.default_armoured_cap)
    }

    /// Check band ordering and interval sanity.
    pub fn validate(&self) -> Result<(), SpawnError> {
        if self.bands.is_empty() {
            return Err(SpawnError::EmptySchedule);
        }
        let mut previous_end = f32::NEG_INFINITY;
        for (index, band) in self.bands.iter().enumerate() {
            if band.end <= band.start {
                return Err(SpawnError::InvalidBand {
                    index,
                    reason: "end must be after start",
                });
            }
            if !valid_interval(band.melee_interval) {
                return Err(SpawnError::InvalidBand {
                    index,
                    reason: "melee interval must be positive with min <= max",
                });
            }
            if let Some(interval) = band.armoured_interval
                && !valid_interval(interval)
            {
                return Err(SpawnError::InvalidBand {
                    index,
                    reason: "armoured interval must be positive with min <= max",
                });
            }
            if band.start < previous_end {
                return Err(SpawnError::BandsOverlap { index });
            }
            previous_end = band.end;
        }
        Ok(())
    }
}

fn valid_interval((min, max): (f32, f32)) -> bool {
    min > 0.0 && min <= max
}

impl Default for SpawnSchedule {
    fn default() -> Self {
        let band = |start, end, melee, armoured, cap| SpawnBand {
            start,
            end,
            melee_interval: melee,
            armoured_interval: armoured,
            armoured_cap: cap,
        };
        Self {
            bands: vec![
                band(0.0, 120.0, (6.5, 10.0), None, None),
                band(120.0, 300.0, (6.0, 8.5), Some((30.0, 60.0)), Some(2)),
                band(300.0, 600.0, (5.5, 8.0), Some((22.0, 48.0)), Some(3)),
                band(600.0, 900.0, (4.0, 6.5), Some((15.0, 30.0)), Some(4)),
                band(900.0, 1200.0, (3.5, 5.5), Some((10.0, 18.0)), Some(4)),
            ],
            default_armoured_cap: 3,
            opening_armoured_at: Some(30.24),
            flamer_first_at: 300.0,
            flamer_every: 300.0,
            flamer_cap: 2,
            flamer_retry: 0.1,
            kill_wave_at: 1200.0,
            kill_wave_every: 6.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn band_boundary_at_two_minutes() {
        let schedule = SpawnSchedule::default();

        let early = schedule.band_at(119.9).unwrap();
        assert_eq!(early.melee_interval, (6.5, 10.0));
        assert_eq!(schedule.armoured_cap_at(119.9), 3);

        let later = schedule.band_at(120.0).unwrap();
        assert_eq!(later.melee_interval, (6.0, 8.5));
        assert_eq!(schedule.armoured_cap_at(120.0), 2);
    }

    #[test]
    fn no_band_after_terminal_band() {
        let schedule = SpawnSchedule::default();
        assert!(schedule.band_at(1200.0).is_none());
        assert!(schedule.validate().is_ok());
    }

    #[test]
    fn validation_rejects_bad_bands() {
        let mut schedule = SpawnSchedule::default();
        schedule.bands[2].start = 100.0;
        assert_eq!(
            schedule.validate(),
            Err(SpawnError::BandsOverlap { index: 2 })
        );

        let mut schedule = SpawnSchedule::default();
        schedule.bands[0].melee_interval = (5.0, 1.0);
        assert!(matches!(
            schedule.validate(),
            Err(SpawnError::InvalidBand { index: 0, .. })
        ));

        schedule.bands.clear();
        assert_eq!(schedule.validate(), Err(SpawnError::EmptySchedule));
    }
}
