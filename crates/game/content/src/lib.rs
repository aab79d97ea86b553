//! Data-driven arena content and loaders.
//!
//! This crate reads the tunable data shipped with the arena:
//! - Gameplay configuration (TOML)
//! - Weapon profiles (RON)
//! - Enemy templates (RON)
//! - The time-banded spawn schedule (RON)
//!
//! Every file deserializes straight into `arena-core` types. Anything a file
//! leaves out keeps the core defaults, so a partial file is a valid override.

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{
    ConfigLoader, ContentBundle, EnemyLoader, LoadResult, ScheduleLoader, WeaponLoader,
};

/// Directory of the data files shipped with this crate.
pub fn shipped_data_dir() -> std::path::PathBuf {
    std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("data")
}
