//! Enemy template loader.

use std::path::Path;

use arena_core::{EnemyRoster, EnemyTemplate};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Enemy catalog structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnemyCatalog {
    pub enemies: Vec<EnemyTemplate>,
}

/// Loader for enemy templates from RON files.
pub struct EnemyLoader;

impl EnemyLoader {
    /// Load enemy templates from a RON file into a roster.
    ///
    /// Kinds missing from the file keep their default template.
    pub fn load(path: &Path) -> LoadResult<EnemyRoster> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<EnemyRoster> {
        let catalog: EnemyCatalog = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse enemy catalog RON: {}", e))?;

        for template in &catalog.enemies {
            if template.max_health <= 0.0 {
                anyhow::bail!("enemy '{}' must start with positive health", template.kind);
            }
        }

        Ok(EnemyRoster::from_templates(catalog.enemies))
    }
}
