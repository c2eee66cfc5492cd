//! Character template definitions.
//!
//! Templates are authored in the content store and spawned into
//! [`Combatant`]s when an encounter starts.

use arrayvec::ArrayVec;

use crate::action::ActionId;
use crate::config::BattleConfig;
use crate::engine::SessionError;
use crate::state::{Combatant, CombatantId, Faction};
use crate::stats::BaseStats;

use super::ActionCatalog;

/// Character class. Descriptive only; carries no rules of its own.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display, strum::EnumString)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CharacterClass {
    #[default]
    Duelist,
    Trader,
    Doctor,
    Musketeer,
    WitchDoctor,
}

/// Threat rank. Scales health, attack and defense at spawn.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display, strum::EnumString)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Rank {
    #[default]
    Normal,
    Elite,
    MiniBoss,
    Boss,
}

impl Rank {
    pub const fn stat_multiplier(self) -> f64 {
        match self {
            Self::Normal => 1.0,
            Self::Elite => 1.5,
            Self::MiniBoss => 2.0,
            Self::Boss => 3.0,
        }
    }
}

/// Immutable character definition.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CharacterTemplate {
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub class: CharacterClass,
    pub faction: Faction,
    pub stats: BaseStats,
    #[cfg_attr(feature = "serde", serde(default))]
    pub rank: Rank,
    pub actions: ArrayVec<ActionId, { BattleConfig::MAX_ACTION_SLOTS }>,
}

impl CharacterTemplate {
    pub fn new(name: impl Into<String>, faction: Faction, stats: BaseStats) -> Self {
        Self {
            name: name.into(),
            class: CharacterClass::default(),
            faction,
            stats,
            rank: Rank::default(),
            actions: ArrayVec::new(),
        }
    }

    pub fn with_class(mut self, class: CharacterClass) -> Self {
        self.class = class;
        self
    }

    pub fn with_rank(mut self, rank: Rank) -> Self {
        self.rank = rank;
        self
    }

    /// Adds an action slot. Slots beyond the limit are dropped.
    pub fn with_action(mut self, action: impl Into<String>) -> Self {
        if let Err(err) = self.actions.try_push(ActionId(action.into())) {
            tracing::warn!(
                template = %self.name,
                action = %err.element(),
                "action slots full, ignoring action"
            );
        }
        self
    }

    /// Base stats after the rank multiplier.
    pub fn spawn_stats(&self) -> BaseStats {
        self.stats.scaled(self.rank.stat_multiplier())
    }

    /// Spawn a full-health combatant, resolving every slot through `catalog`.
    ///
    /// The returned combatant carries a placeholder id; the roster assigns
    /// the real one on insertion.
    pub fn to_combatant(
        &self,
        catalog: &(impl ActionCatalog + ?Sized),
    ) -> Result<Combatant, SessionError> {
        if !self.stats.is_valid() {
            return Err(SessionError::InvalidStats {
                character: self.name.clone(),
            });
        }

        let mut combatant =
            Combatant::new(CombatantId(0), self.name.clone(), self.faction, self.spawn_stats());
        for id in &self.actions {
            let definition = catalog
                .action(id)
                .ok_or_else(|| SessionError::UnknownAction {
                    character: self.name.clone(),
                    action: id.clone(),
                })?;
            combatant = combatant.with_action(definition.clone());
        }
        Ok(combatant)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::{ActionDefinition, ActionEffect, TargetType};

    fn catalog() -> Vec<ActionDefinition> {
        vec![ActionDefinition::new(
            "cutlass",
            "Cutlass",
            TargetType::SingleEnemy,
            ActionEffect::Attack {
                min_damage: 3.0,
                max_damage: 6.0,
            },
        )]
    }

    #[test]
    fn boss_rank_triples_combat_stats() {
        let template = CharacterTemplate::new(
            "Dread Captain",
            Faction::Enemy,
            BaseStats::new(100.0, 10.0, 5.0, 5.0),
        )
        .with_rank(Rank::Boss)
        .with_action("cutlass");

        let combatant = template.to_combatant(catalog().as_slice()).unwrap();
        assert_eq!(combatant.base, BaseStats::new(300.0, 30.0, 15.0, 5.0));
        assert_eq!(combatant.current_health(), 300.0);
        assert_eq!(combatant.loadout().len(), 1);
    }

    #[test]
    fn unknown_action_is_rejected() {
        let template = CharacterTemplate::new("Deckhand", Faction::Ally, BaseStats::default())
            .with_action("grapeshot");
        assert_eq!(
            template.to_combatant(catalog().as_slice()),
            Err(SessionError::UnknownAction {
                character: "Deckhand".into(),
                action: ActionId::new("grapeshot"),
            })
        );
    }

    #[test]
    fn extra_slots_are_dropped() {
        let template = (0..BattleConfig::MAX_ACTION_SLOTS + 1).fold(
            CharacterTemplate::new("Quartermaster", Faction::Ally, BaseStats::default()),
            |template, slot| template.with_action(format!("slot_{slot}")),
        );
        assert_eq!(template.actions.len(), BattleConfig::MAX_ACTION_SLOTS);
        assert_eq!(
            template.actions.last(),
            Some(&ActionId::new(format!("slot_{}", BattleConfig::MAX_ACTION_SLOTS - 1)))
        );
    }

    #[test]
    fn negative_stats_are_rejected() {
        let template = CharacterTemplate::new(
            "Ghost",
            Faction::Enemy,
            BaseStats::new(-1.0, 1.0, 1.0, 1.0),
        );
        assert!(matches!(
            template.to_combatant(catalog().as_slice()),
            Err(SessionError::InvalidStats { .. })
        ));
    }
}
