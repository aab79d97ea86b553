//! Tension-driven music selection with crossfades.

use tracing::debug;

use crate::config::MusicConfig;
use crate::timer::TimedFade;

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
pub enum MusicTrack {
    LowTension,
    MidTension,
    HighTension,
    Flamer,
    GameOver,
}

/// A crossfade that just started.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MusicChange {
    pub from: MusicTrack,
    pub to: MusicTrack,
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct Crossfade {
    from: MusicTrack,
    to: MusicTrack,
    fade: TimedFade,
}

/// Inputs the track choice depends on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Tension {
    pub player_alive: bool,
    pub active: u32,
    pub active_flamers: u32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct MusicDirector {
    config: MusicConfig,
    current: MusicTrack,
    fade: Option<Crossfade>,
}

impl MusicDirector {
    pub fn new(config: MusicConfig) -> Self {
        Self {
            config,
            current: MusicTrack::LowTension,
            fade: None,
        }
    }

    /// Track fully audible right now. During a fade this is still the source.
    #[inline]
    pub fn current(&self) -> MusicTrack {
        self.current
    }

    #[inline]
    pub fn is_fading(&self) -> bool {
        self.fade.is_some()
    }

    /// Progress of the running crossfade in `[0, 1]`.
    pub fn fade_progress(&self) -> Option<f32> {
        self.fade.map(|f| f.fade.progress())
    }

    /// `(outgoing, incoming)` volumes of the running crossfade.
    pub fn volumes(&self) -> Option<(f32, f32)> {
        self.fade.map(|f| {
            let p = f.fade.progress();
            (1.0 - p, p)
        })
    }

    /// Track the current tension asks for, if it asks for one at all.
    fn desired(&self, tension: Tension) -> Option<MusicTrack> {
        if tension.active_flamers > 0 {
            return Some(MusicTrack::Flamer);
        }
        let MusicConfig {
            low_threshold,
            high_threshold,
            ..
        } = self.config;
        let active = tension.active;
        if active > low_threshold && active < high_threshold {
            Some(MusicTrack::MidTension)
        } else if active > high_threshold {
            Some(MusicTrack::HighTension)
        } else if active < low_threshold {
            Some(MusicTrack::LowTension)
        } else {
            None
        }
    }

    /// Re-evaluate the track. Returns the crossfade started, if any.
    ///
    /// Player death always fades to game over, even mid-fade. Otherwise a
    /// running fade is never interrupted.
    pub fn check(&mut self, tension: Tension) -> Option<MusicChange> {
        if !tension.player_alive {
            let heading_to_game_over = self.fade.is_some_and(|f| f.to == MusicTrack::GameOver);
            if self.current == MusicTrack::GameOver || heading_to_game_over {
                return None;
            }
            return Some(self.start(MusicTrack::GameOver));
        }
        if self.fade.is_some() {
            return None;
        }
        let wanted = self.desired(tension)?;
        if wanted == self.current {
            return None;
        }
        Some(self.start(wanted))
    }

    fn start(&mut self, to: MusicTrack) -> MusicChange {
        let change = MusicChange {
            from: self.current,
            to,
        };
        self.fade = Some(Crossfade {
            from: self.current,
            to,
            fade: TimedFade::new(self.config.crossfade_seconds()),
        });
        debug!(from = %change.from, to = %change.to, "music crossfade");
        change
    }

    /// Advance the running fade. Returns the new track when a fade completes.
    pub fn advance(&mut self, dt: f32) -> Option<MusicTrack> {
        let fade = self.fade.as_mut()?;
        if !fade.fade.advance(dt) {
            return None;
        }
        let to = fade.to;
        debug!(from = %fade.from, %to, "music crossfade complete");
        self.current = to;
        self.fade = None;
        Some(to)
    }

    pub fn reset(&mut self) {
        self.current = MusicTrack::LowTension;
        self.fade = None;
    }
}
