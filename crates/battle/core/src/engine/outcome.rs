//! Battle state machine: victory / defeat detection.

use crate::state::{Faction, Roster};

/// Encounter outcome. `InProgress` moves to one of the terminal values
/// exactly once and never changes afterwards.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BattleOutcome {
    #[default]
    InProgress,
    AllyVictory,
    EnemyVictory,
}

impl BattleOutcome {
    pub const fn is_terminal(self) -> bool {
        !matches!(self, Self::InProgress)
    }

    /// Outcome implied by who is still standing.
    ///
    /// Allies are checked first, so a roster with nobody alive on either side
    /// counts as an enemy victory.
    pub fn evaluate(roster: &Roster) -> Self {
        if !roster.has_living(Faction::Ally) {
            Self::EnemyVictory
        } else if !roster.has_living(Faction::Enemy) {
            Self::AllyVictory
        } else {
            Self::InProgress
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{Combatant, CombatantId};
    use crate::stats::BaseStats;

    fn fighter(faction: Faction, health: f64) -> Combatant {
        Combatant::new(CombatantId(0), "F", faction, BaseStats::default()).with_health(health)
    }

    #[test]
    fn evaluates_each_side() {
        let roster: Roster = [fighter(Faction::Ally, 10.0), fighter(Faction::Enemy, 10.0)]
            .into_iter()
            .collect();
        assert_eq!(BattleOutcome::evaluate(&roster), BattleOutcome::InProgress);

        let roster: Roster = [fighter(Faction::Ally, 10.0), fighter(Faction::Enemy, 0.0)]
            .into_iter()
            .collect();
        assert_eq!(BattleOutcome::evaluate(&roster), BattleOutcome::AllyVictory);

        let roster: Roster = [fighter(Faction::Ally, 0.0), fighter(Faction::Enemy, 0.0)]
            .into_iter()
            .collect();
        assert_eq!(BattleOutcome::evaluate(&roster), BattleOutcome::EnemyVictory);
    }

    #[test]
    fn only_in_progress_is_non_terminal() {
        assert!(!BattleOutcome::InProgress.is_terminal());
        assert!(BattleOutcome::AllyVictory.is_terminal());
        assert!(BattleOutcome::EnemyVictory.is_terminal());
    }
}
