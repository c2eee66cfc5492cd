//! Character template loader.

use std::path::Path;

use battle_core::CharacterTemplate;

use crate::loaders::{LoadResult, read_file};

/// Loader for character templates from RON files.
pub struct CharacterLoader;

impl CharacterLoader {
    /// Load `(character_id, template)` pairs from a RON file.
    ///
    /// Action references are not resolved here; the content store checks them
    /// against the action catalog when templates are registered.
    pub fn load(path: &Path) -> LoadResult<Vec<(String, CharacterTemplate)>> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<Vec<(String, CharacterTemplate)>> {
        let characters: Vec<(String, CharacterTemplate)> = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse character catalog RON: {}", e))?;

        for (id, template) in &characters {
            anyhow::ensure!(
                template.stats.is_valid(),
                "character '{}' has negative or non-finite stats",
                id
            );
        }
        Ok(characters)
    }
}
