//! Body disposal after death.
//!
//! Ragdoll, then dissolve, then a visible fade, then disposal. Each phase is a
//! plain timer advanced by the simulation tick.

use crate::config::CombatConfig;
use crate::timer::TimedFade;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CorpsePhase {
    Ragdoll,
    Dissolving,
    Fading,
    Disposed,
}

/// Emitted when the timeline enters a new phase.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CorpseEvent {
    /// Particles and mesh bake start.
    Dissolve,
    /// The visible fade starts.
    Fade,
    /// The body can be removed.
    Disposed,
}

#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CorpseTimeline {
    phase: CorpsePhase,
    timer: TimedFade,
    dissolve_seconds: f32,
    fade_seconds: f32,
}

impl CorpseTimeline {
    pub fn new(ragdoll_seconds: f32, dissolve_seconds: f32, fade_seconds: f32) -> Self {
        Self {
            phase: CorpsePhase::Ragdoll,
            timer: TimedFade::new(ragdoll_seconds),
            dissolve_seconds,
            fade_seconds,
        }
    }

    pub fn from_config(config: &CombatConfig) -> Self {
        Self::new(
            config.ragdoll_seconds,
            config.dissolve_seconds,
            config.fade_seconds,
        )
    }

    #[inline]
    pub fn phase(&self) -> CorpsePhase {
        self.phase
    }

    /// Progress through the current phase, in `[0, 1]`.
    pub fn progress(&self) -> f32 {
        match self.phase {
            CorpsePhase::Disposed => 1.0,
            _ => self.timer.progress(),
        }
    }

    /// Advance by `dt`. At most one phase change is reported per call.
    pub fn advance(&mut self, dt: f32) -> Option<CorpseEvent> {
        if self.phase == CorpsePhase::Disposed || !self.timer.advance(dt) {
            return None;
        }
        let (next, event, seconds) = match self.phase {
            CorpsePhase::Ragdoll => (
                CorpsePhase::Dissolving,
                CorpseEvent::Dissolve,
                self.dissolve_seconds,
            ),
            CorpsePhase::Dissolving => (CorpsePhase::Fading, CorpseEvent::Fade, self.fade_seconds),
            CorpsePhase::Fading => (CorpsePhase::Disposed, CorpseEvent::Disposed, 0.0),
            CorpsePhase::Disposed => return None,
        };
        self.phase = next;
        self.timer = TimedFade::new(seconds);
        Some(event)
    }
}
