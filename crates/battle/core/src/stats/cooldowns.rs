//! Cooldown tracker - per-combatant action availability.

use std::collections::BTreeMap;

use crate::action::{ActionDefinition, ActionId};

use super::round_half_up;

/// Owner turns remaining before each used action can be chosen again.
///
/// Entries only exist for actions with a positive cooldown that were used.
/// Like modifiers, entries advance only when the owner completes a turn.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CooldownTracker {
    remaining: BTreeMap<ActionId, u32>,
}

impl CooldownTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a use of `action`. No-op for actions without a cooldown.
    pub fn mark_used(&mut self, action: &ActionDefinition) {
        if action.cooldown_turns <= 0.0 {
            return;
        }
        let turns = round_half_up(action.cooldown_turns) as u32;
        if turns == 0 {
            self.remaining.remove(&action.id);
        } else {
            self.remaining.insert(action.id.clone(), turns);
        }
    }

    /// Called once when the owner finishes its turn.
    pub fn advance_owner_turn(&mut self) {
        self.remaining.retain(|_, turns| {
            *turns = turns.saturating_sub(1);
            *turns > 0
        });
    }

    pub fn is_available(&self, action: &ActionDefinition) -> bool {
        action.cooldown_turns <= 0.0 || !self.remaining.contains_key(&action.id)
    }

    /// Turns left on `action`, or 0 when it is ready.
    pub fn remaining(&self, action: &ActionId) -> u32 {
        self.remaining.get(action).copied().unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.remaining.is_empty()
    }
}
