//! Content loaders for reading arena data from files.
//!
//! TOML is used for the flat tunables, RON for the tables.

pub mod bundle;
pub mod config;
pub mod enemy;
pub mod schedule;
pub mod weapon;

pub use bundle::ContentBundle;
pub use config::ConfigLoader;
pub use enemy::EnemyLoader;
pub use schedule::ScheduleLoader;
pub use weapon::WeaponLoader;

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::io::Write;
    use std::path::PathBuf;

    use tempfile::TempDir;

    /// Scratch directory holding data files written by a test.
    pub struct TestContext {
        pub dir: TempDir,
    }

    impl TestContext {
        pub fn new() -> Self {
            Self {
                dir: TempDir::new().unwrap(),
            }
        }

        pub fn write(&self, name: &str, content: &str) -> PathBuf {
            let path = self.dir.path().join(name);
            let mut file = std::fs::File::create(&path).unwrap();
            file.write_all(content.as_bytes()).unwrap();
            path
        }
    }
}
