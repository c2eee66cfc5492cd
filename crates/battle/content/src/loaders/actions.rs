//! Action catalog loader.

use std::path::Path;

use battle_core::ActionDefinition;
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};
use crate::registry::ActionRegistry;

/// Action catalog structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionFile {
    pub actions: Vec<ActionDefinition>,
}

/// Loader for action definitions from RON files.
pub struct ActionLoader;

impl ActionLoader {
    /// Load and validate an action catalog from a RON file.
    pub fn load(path: &Path) -> LoadResult<ActionRegistry> {
        let content = read_file(path)?;
        Self::parse(&content)
            .map_err(|e| anyhow::anyhow!("Invalid action catalog {}: {}", path.display(), e))
    }

    pub fn parse(content: &str) -> LoadResult<ActionRegistry> {
        let file: ActionFile = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse action catalog RON: {}", e))?;
        Ok(ActionRegistry::from_definitions(file.actions)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use battle_core::{ActionId, ActionKind, TargetType};

    #[test]
    fn parses_every_effect_kind() {
        let registry = ActionLoader::parse(
            r#"(
                actions: [
                    (id: "slash", name: "Slash", target_type: SingleEnemy,
                     effect: Attack(min_damage: 4.0, max_damage: 8.0)),
                    (id: "tonic", name: "Tonic", target_type: AllAllies,
                     effect: Heal(min_heal: 2.0, max_heal: 5.0), cooldown_turns: 2.0),
                    (id: "drum", name: "War Drum", target_type: SingleAlly,
                     effect: Buff(stat: Attack, magnitude: 3.0, duration_turns: 2.0)),
                    (id: "curse", name: "Curse", target_type: SingleEnemy,
                     effect: Debuff(stat: Speed, magnitude: 2.0, duration_turns: 1.5)),
                ],
            )"#,
        )
        .unwrap();

        assert_eq!(registry.len(), 4);
        let tonic = registry.get(&ActionId::new("tonic")).unwrap();
        assert_eq!(tonic.kind(), ActionKind::Heal);
        assert_eq!(tonic.target_type, TargetType::AllAllies);
        assert_eq!(tonic.cooldown_turns, 2.0);
        assert_eq!(
            registry.get(&ActionId::new("slash")).unwrap().cooldown_turns,
            0.0
        );
    }

    #[test]
    fn invalid_definitions_fail_the_load() {
        let result = ActionLoader::parse(
            r#"(actions: [(id: "bad", name: "Bad", target_type: SingleEnemy,
                           effect: Attack(min_damage: 9.0, max_damage: 1.0))])"#,
        );
        assert!(result.is_err());
    }
}
