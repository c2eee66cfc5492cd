//! Content store: everything needed to stage an encounter.

use std::collections::HashMap;

use battle_core::{
    BattleConfig, BattleEvent, BattleSession, CharacterTemplate, Faction, RandomSource, Rank,
    Roster,
};

use crate::registry::{ActionRegistry, ContentError};

/// One combatant placed in an encounter.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EncounterEntry {
    /// Character template id.
    pub character: String,
    /// Overrides the template's rank.
    #[cfg_attr(feature = "serde", serde(default))]
    pub rank: Option<Rank>,
}

impl EncounterEntry {
    pub fn new(character: impl Into<String>) -> Self {
        Self {
            character: character.into(),
            rank: None,
        }
    }

    pub fn with_rank(mut self, rank: Rank) -> Self {
        self.rank = Some(rank);
        self
    }
}

/// Two parties to pit against each other.
///
/// Placement decides the side: a template listed under `enemies` fights for
/// the enemy faction whatever its authored faction is.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EncounterSpec {
    pub name: String,
    pub allies: Vec<EncounterEntry>,
    pub enemies: Vec<EncounterEntry>,
}

/// Loaded, validated content. Read-only once built.
#[derive(Clone, Debug, Default)]
pub struct ContentStore {
    config: BattleConfig,
    actions: ActionRegistry,
    characters: HashMap<String, CharacterTemplate>,
}

impl ContentStore {
    pub fn new(config: BattleConfig, actions: ActionRegistry) -> Self {
        Self {
            config,
            actions,
            characters: HashMap::new(),
        }
    }

    /// Registers a template after checking that it spawns cleanly.
    pub fn add_character(
        &mut self,
        id: impl Into<String>,
        template: CharacterTemplate,
    ) -> Result<(), ContentError> {
        let id = id.into();
        if self.characters.contains_key(&id) {
            return Err(ContentError::DuplicateCharacter(id));
        }
        template.to_combatant(&self.actions)?;
        self.characters.insert(id, template);
        Ok(())
    }

    pub fn with_character(
        mut self,
        id: impl Into<String>,
        template: CharacterTemplate,
    ) -> Result<Self, ContentError> {
        self.add_character(id, template)?;
        Ok(self)
    }

    pub fn config(&self) -> &BattleConfig {
        &self.config
    }

    pub fn actions(&self) -> &ActionRegistry {
        &self.actions
    }

    pub fn character(&self, id: &str) -> Option<&CharacterTemplate> {
        self.characters.get(id)
    }

    pub fn character_count(&self) -> usize {
        self.characters.len()
    }

    /// Spawns the encounter's allies, then its enemies, in listed order.
    pub fn build_roster(&self, encounter: &EncounterSpec) -> Result<Roster, ContentError> {
        let placed = encounter
            .allies
            .iter()
            .map(|entry| (entry, Faction::Ally))
            .chain(encounter.enemies.iter().map(|entry| (entry, Faction::Enemy)));

        let mut roster = Roster::new();
        for (entry, faction) in placed {
            let template =
                self.characters
                    .get(&entry.character)
                    .ok_or_else(|| ContentError::UnknownCharacter {
                        encounter: encounter.name.clone(),
                        character: entry.character.clone(),
                    })?;

            let mut template = template.clone();
            template.faction = faction;
            if let Some(rank) = entry.rank {
                template.rank = rank;
            }
            roster.add(template.to_combatant(&self.actions)?);
        }
        Ok(roster)
    }

    /// Builds the roster and starts a session with the store's config.
    pub fn start_battle(
        &self,
        encounter: &EncounterSpec,
        rng: impl RandomSource + 'static,
    ) -> Result<(BattleSession, Vec<BattleEvent>), ContentError> {
        let roster = self.build_roster(encounter)?;
        tracing::info!(
            encounter = %encounter.name,
            combatants = roster.len(),
            "staging encounter"
        );
        Ok(BattleSession::start(roster, self.config.clone(), rng)?)
    }
}
