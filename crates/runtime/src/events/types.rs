//! Event types for different topics.

use battle_core::{
    ActionResult, BattleEvent, BattleOutcome, BattleSession, CombatantId, Faction, StatKind,
};
use serde::{Deserialize, Serialize};

/// A combatant's turn began.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TurnEvent {
    pub combatant: CombatantId,
    pub name: String,
    pub faction: Faction,
    pub round: u32,
}

/// Results, deaths and modifier changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CombatEvent {
    /// One target's result of a resolved action.
    Resolved(ActionResult),

    Died { combatant: CombatantId },

    ModifierExpired {
        combatant: CombatantId,
        stat: StatKind,
        magnitude: f64,
    },

    /// A provider's decision failed validation; the provider is asked again.
    CommandRejected {
        combatant: CombatantId,
        error: String,
    },
}

/// The battle reached its terminal outcome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutcomeEvent {
    pub outcome: BattleOutcome,
    pub round: u32,
}

impl TurnEvent {
    pub(crate) fn new(session: &BattleSession, combatant: CombatantId, round: u32) -> Self {
        let (name, faction) = session
            .combatant(combatant)
            .map_or((String::new(), Faction::Ally), |c| (c.name.clone(), c.faction));
        Self {
            combatant,
            name,
            faction,
            round,
        }
    }
}

impl super::Event {
    /// Wraps a session event for the bus, filling in display details.
    pub fn from_battle(event: &BattleEvent, session: &BattleSession) -> Self {
        match event {
            BattleEvent::TurnStarted { combatant, round } => {
                Self::Turn(TurnEvent::new(session, *combatant, *round))
            }
            BattleEvent::ActionResolved(result) => {
                Self::Combat(CombatEvent::Resolved(result.clone()))
            }
            BattleEvent::CombatantDied { combatant } => Self::Combat(CombatEvent::Died {
                combatant: *combatant,
            }),
            BattleEvent::ModifierExpired {
                combatant,
                stat,
                magnitude,
            } => Self::Combat(CombatEvent::ModifierExpired {
                combatant: *combatant,
                stat: *stat,
                magnitude: *magnitude,
            }),
            BattleEvent::BattleEnded { outcome } => Self::Outcome(OutcomeEvent {
                outcome: *outcome,
                round: session.round(),
            }),
        }
    }
}
