//! Arena configuration loader.

use std::path::Path;

use arena_core::ArenaConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for arena tunables from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config data from a TOML file.
    ///
    /// Sections and keys that are absent keep their defaults.
    pub fn load(path: &Path) -> LoadResult<ArenaConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<ArenaConfig> {
        let config: ArenaConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;

        if config.spawn.global_cap == 0 {
            anyhow::bail!("spawn.global_cap must be at least 1");
        }
        let (near, far) = config.ai.projectile_range;
        if near > far {
            anyhow::bail!("ai.projectile_range must be ordered, got ({near}, {far})");
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loaders::test_support::TestContext;

    #[test]
    fn partial_file_keeps_defaults() {
        let config = ConfigLoader::parse(
            r#"
            [spawn]
            global_cap = 12

            [scores]
            headshot = 40
            "#,
        )
        .unwrap();

        assert_eq!(config.spawn.global_cap, 12);
        assert_eq!(config.spawn.placement_attempts, 10);
        assert_eq!(config.scores.headshot, 40);
        assert_eq!(config.scores.kill_flamer, 150);
        assert_eq!(config.sight, ArenaConfig::default().sight);
    }

    #[test]
    fn empty_file_is_the_default_config() {
        assert_eq!(ConfigLoader::parse("").unwrap(), ArenaConfig::default());
    }

    #[test]
    fn rejects_zero_population_cap() {
        let err = ConfigLoader::parse("[spawn]\nglobal_cap = 0\n").unwrap_err();
        assert!(err.to_string().contains("global_cap"));
    }

    #[test]
    fn malformed_file_reports_parse_error() {
        let ctx = TestContext::new();
        let path = ctx.write("arena.toml", "[sight\ninterval = ");
        let err = ConfigLoader::load(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config TOML"));
    }

    #[test]
    fn missing_file_reports_path() {
        let ctx = TestContext::new();
        let path = ctx.dir.path().join("absent.toml");
        let err = ConfigLoader::load(&path).unwrap_err();
        assert!(err.to_string().contains("absent.toml"));
    }
}
