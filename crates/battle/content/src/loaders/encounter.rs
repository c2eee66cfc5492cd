//! Encounter loader.

use std::path::Path;

use crate::loaders::{LoadResult, read_file};
use crate::store::EncounterSpec;

/// Loader for encounters from RON files.
pub struct EncounterLoader;

impl EncounterLoader {
    pub fn load(path: &Path) -> LoadResult<EncounterSpec> {
        let content = read_file(path)?;
        let encounter: EncounterSpec = ron::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse encounter RON: {}", e))?;

        anyhow::ensure!(
            !encounter.allies.is_empty() && !encounter.enemies.is_empty(),
            "encounter '{}' needs at least one ally and one enemy",
            encounter.name
        );
        Ok(encounter)
    }
}
