//! Weapon profile loader.

use std::path::Path;

use arena_core::WeaponProfile;
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Weapon catalog structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeaponCatalog {
    pub weapons: Vec<WeaponProfile>,
}

/// Loader for weapon profiles from RON files.
pub struct WeaponLoader;

impl WeaponLoader {
    /// Load weapon profiles from a RON file.
    ///
    /// Each weapon kind may appear at most once.
    pub fn load(path: &Path) -> LoadResult<Vec<WeaponProfile>> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<Vec<WeaponProfile>> {
        let catalog: WeaponCatalog = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse weapon catalog RON: {}", e))?;

        for (index, weapon) in catalog.weapons.iter().enumerate() {
            if catalog.weapons[..index].iter().any(|w| w.kind == weapon.kind) {
                anyhow::bail!("weapon '{}' is listed twice", weapon.kind);
            }
            if weapon.magazine_size == 0 || weapon.pellets == 0 {
                anyhow::bail!(
                    "weapon '{}' needs a non-empty magazine and at least one pellet",
                    weapon.kind
                );
            }
            if weapon.effective_range > weapon.max_range {
                anyhow::bail!(
                    "weapon '{}' effective range exceeds its max range",
                    weapon.kind
                );
            }
        }

        Ok(catalog.weapons)
    }
}
