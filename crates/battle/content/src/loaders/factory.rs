//! Content factory for building a content store from data files.

use std::path::{Path, PathBuf};

use battle_core::BattleConfig;

use crate::loaders::{ActionLoader, CharacterLoader, ConfigLoader, EncounterLoader, LoadResult};
use crate::registry::ActionRegistry;
use crate::store::{ContentStore, EncounterSpec};

/// Content factory that loads all battle content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml
/// ├── actions.ron
/// ├── characters.ron
/// └── encounters/
///     ├── harbor_brawl.ron
///     └── captains_duel.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    /// Creates a new content factory pointing to a data directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load battle rules from `config.toml`. A missing file means defaults.
    pub fn load_config(&self) -> LoadResult<BattleConfig> {
        let path = self.data_dir.join("config.toml");
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(BattleConfig::default());
        }
        ConfigLoader::load(&path)
    }

    /// Load the action catalog from `actions.ron`.
    pub fn load_actions(&self) -> LoadResult<ActionRegistry> {
        ActionLoader::load(&self.data_dir.join("actions.ron"))
    }

    /// Load character templates from `characters.ron`.
    pub fn load_characters(&self) -> LoadResult<Vec<(String, battle_core::CharacterTemplate)>> {
        CharacterLoader::load(&self.data_dir.join("characters.ron"))
    }

    /// Load an encounter from `encounters/{name}.ron`.
    pub fn load_encounter(&self, name: &str) -> LoadResult<EncounterSpec> {
        let path = self.encounters_dir().join(format!("{}.ron", name));
        EncounterLoader::load(&path)
    }

    /// Names of every encounter file, sorted.
    pub fn encounter_names(&self) -> LoadResult<Vec<String>> {
        let dir = self.encounters_dir();
        let entries = std::fs::read_dir(&dir)
            .map_err(|e| anyhow::anyhow!("Failed to read directory {}: {}", dir.display(), e))?;

        let mut names = Vec::new();
        for entry in entries {
            let path = entry?.path();
            if !path.extension().is_some_and(|ext| ext == "ron") {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|stem| stem.to_str()) {
                names.push(stem.to_owned());
            }
        }
        names.sort();
        Ok(names)
    }

    /// Load config, actions and characters into a validated [`ContentStore`].
    pub fn load_store(&self) -> LoadResult<ContentStore> {
        let config = self.load_config()?;
        let actions = self.load_actions()?;
        let mut store = ContentStore::new(config, actions);

        for (id, template) in self.load_characters()? {
            store
                .add_character(id.clone(), template)
                .map_err(|e| anyhow::anyhow!("Invalid character '{}': {}", id, e))?;
        }

        tracing::debug!(
            actions = store.actions().len(),
            characters = store.character_count(),
            "content loaded"
        );
        Ok(store)
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    fn encounters_dir(&self) -> PathBuf {
        self.data_dir.join("encounters")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factory_paths() {
        let factory = ContentFactory::new("/tmp/data");
        assert_eq!(factory.data_dir(), Path::new("/tmp/data"));
    }
}
