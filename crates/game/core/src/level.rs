//! Level clock and end-of-level summary.

/// Seconds survived in the current level.
///
/// The clock only runs while the player is alive, so the elapsed time at
/// death is the survival time the summary reports.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LevelClock {
    elapsed: f64,
}

impl LevelClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance by `dt` if the player is alive. Returns the new elapsed time.
    pub fn tick(&mut self, dt: f32, player_alive: bool) -> f64 {
        if player_alive {
            self.elapsed += f64::from(dt.max(0.0));
        }
        self.elapsed
    }

    #[inline]
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    /// Elapsed time split into whole minutes and seconds.
    pub fn minutes_seconds(&self) -> (u64, u64) {
        let total = self.elapsed.max(0.0) as u64;
        (total / 60, total % 60)
    }

    pub fn reset(&mut self) {
        self.elapsed = 0.0;
    }
}

/// Why a level ended.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum LevelOutcome {
    PlayerDied,
    TimeElapsed,
    Interrupted,
}

#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LevelSummary {
    pub outcome: LevelOutcome,
    pub score: u64,
    pub kills: u32,
    pub elapsed: f64,
    pub peak_active: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clock_stops_while_player_is_dead() {
        let mut clock = LevelClock::new();
        clock.tick(0.5, true);
        clock.tick(0.5, true);
        clock.tick(10.0, false);
        assert_eq!(clock.elapsed(), 1.0);

        clock.reset();
        assert_eq!(clock.elapsed(), 0.0);
    }

    #[test]
    fn formats_minutes_and_seconds() {
        let mut clock = LevelClock::new();
        clock.tick(125.5, true);
        assert_eq!(clock.minutes_seconds(), (2, 5));
    }
}
