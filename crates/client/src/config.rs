//! Session configuration read from the environment.
use std::env;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use arena_core::TransitionPolicy;

/// Settings for one scripted session.
#[derive(Clone, Debug)]
pub struct SessionConfig {
    pub seed: u64,
    /// Level time limit in seconds.
    pub duration_secs: f32,
    pub tick_hz: u32,
    pub content_dir: PathBuf,
    pub session_id: Option<String>,
    pub policy: TransitionPolicy,
    /// Pace frames against the wall clock instead of running flat out.
    pub realtime: bool,
    /// Journal file. Relative paths land in the session log directory.
    pub journal: Option<PathBuf>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            seed: 0x5eed,
            duration_secs: 180.0,
            tick_hz: 60,
            content_dir: arena_content::shipped_data_dir(),
            session_id: None,
            policy: TransitionPolicy::default(),
            realtime: false,
            journal: None,
        }
    }
}

impl SessionConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `ARENA_SEED` - Session seed (default: 0x5eed)
    /// - `ARENA_DURATION_SECS` - Level time limit (default: 180)
    /// - `ARENA_TICK_HZ` - Frames per simulated second (default: 60)
    /// - `ARENA_CONTENT_DIR` - Data directory (default: shipped data)
    /// - `ARENA_SESSION_ID` - Session identifier for logs (default: auto-generated)
    /// - `ARENA_TRANSITION_POLICY` - `last-wins` or `first-match` (default: last-wins)
    /// - `ARENA_REALTIME` - Pace frames against the wall clock (default: false)
    /// - `ARENA_JOURNAL` - Notification journal file (default: none)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(seed) = read_var::<u64>(&lookup, "ARENA_SEED") {
            config.seed = seed;
        }
        if let Some(secs) = read_var::<f32>(&lookup, "ARENA_DURATION_SECS")
            && secs > 0.0
        {
            config.duration_secs = secs;
        }
        if let Some(hz) = read_var::<u32>(&lookup, "ARENA_TICK_HZ") {
            config.tick_hz = hz.clamp(1, 1_000);
        }
        if let Some(policy) = read_var::<TransitionPolicy>(&lookup, "ARENA_TRANSITION_POLICY") {
            config.policy = policy;
        }
        if let Some(realtime) = read_var::<bool>(&lookup, "ARENA_REALTIME") {
            config.realtime = realtime;
        }

        config.content_dir = lookup("ARENA_CONTENT_DIR")
            .map(PathBuf::from)
            .unwrap_or(config.content_dir);
        config.session_id = lookup("ARENA_SESSION_ID").filter(|id| !id.is_empty());
        config.journal = lookup("ARENA_JOURNAL").map(PathBuf::from);

        config
    }

    /// Seconds per frame.
    pub fn frame_seconds(&self) -> f32 {
        1.0 / self.tick_hz as f32
    }

    /// Frames needed to reach the time limit.
    pub fn frame_budget(&self) -> u64 {
        (self.duration_secs * self.tick_hz as f32).ceil() as u64
    }

    /// Configured session id, or one derived from the current time.
    pub fn session_id(&self) -> String {
        self.session_id.clone().unwrap_or_else(|| {
            let timestamp = SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map_or(0, |d| d.as_secs());
            format!("session_{timestamp}")
        })
    }
}

fn read_var<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    lookup(key)?.trim().parse().ok()
}
