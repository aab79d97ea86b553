//! Headless arena session.
//!
//! Loads content, runs one level with a scripted player and prints the
//! summary. Configured through `ARENA_*` environment variables (a `.env` file
//! is honoured).
mod config;
mod logging;
mod session;

use anyhow::{Context, Result};
use arena_content::ContentBundle;

use crate::config::SessionConfig;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let config = SessionConfig::from_env();
    let session_id = config.session_id();
    let session_dir = logging::log_dir().join(&session_id);
    let _guard = logging::setup_logging(&session_dir)?;

    let content = ContentBundle::load_dir(&config.content_dir).with_context(|| {
        format!(
            "Failed to load content from {}",
            config.content_dir.display()
        )
    })?;

    let summary = session::run(&config, content, &session_dir).await?;
    let minutes = (summary.elapsed / 60.0).floor() as u64;
    let seconds = (summary.elapsed % 60.0).floor() as u64;

    tracing::info!(session = %session_id, "session finished");
    println!("outcome:     {}", summary.outcome);
    println!("score:       {}", summary.score);
    println!("kills:       {}", summary.kills);
    println!("survived:    {minutes}:{seconds:02}");
    println!("peak active: {}", summary.peak_active);
    Ok(())
}
