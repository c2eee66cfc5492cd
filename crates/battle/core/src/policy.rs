//! Automated decision making for non-player combatants.

use crate::action::{ActionError, ActionId, TargetSelection};
use crate::engine::BattleSession;
use crate::events::BattleEvent;

/// An action and target picked for the current combatant.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Decision {
    pub action: ActionId,
    pub target: TargetSelection,
}

/// Chooses what the current combatant does.
pub trait ActionPolicy: Send {
    /// Returns `None` when the combatant has nothing usable and passes.
    fn decide(&mut self, session: &BattleSession) -> Option<Decision>;
}

/// Uses the first loadout slot that is off cooldown and has a target,
/// aimed at the first valid target in roster order. Group actions target
/// the whole faction.
#[derive(Clone, Copy, Debug, Default)]
pub struct FirstReadyPolicy;

impl ActionPolicy for FirstReadyPolicy {
    fn decide(&mut self, session: &BattleSession) -> Option<Decision> {
        session.available_actions().into_iter().find_map(|action| {
            let targets = session.valid_targets(&action.id).ok()?;
            let first = *targets.first()?;
            let target = if action.target_type.is_group() {
                TargetSelection::All
            } else {
                TargetSelection::Single(first)
            };
            Some(Decision {
                action: action.id.clone(),
                target,
            })
        })
    }
}

impl BattleSession {
    /// Plays the current turn with `policy`, going through the same
    /// select / confirm path as player input. Passes the turn when the
    /// policy has no decision.
    pub fn play_turn(
        &mut self,
        policy: &mut (impl ActionPolicy + ?Sized),
    ) -> Result<Vec<BattleEvent>, ActionError> {
        if self.is_over() {
            return Err(ActionError::BattleEnded);
        }
        let Some(decision) = policy.decide(self) else {
            tracing::debug!(actor = ?self.current_combatant_id(), "no usable action, passing");
            return Ok(self.complete_turn());
        };
        self.apply_decision(decision)
    }

    /// Runs a decision through `select_action`, `select_target` and `confirm`.
    ///
    /// All or nothing: a rejected decision leaves no pending selection.
    pub fn apply_decision(&mut self, decision: Decision) -> Result<Vec<BattleEvent>, ActionError> {
        let result = self
            .select_action(decision.action)
            .and_then(|()| self.select_target(decision.target))
            .and_then(|()| self.confirm());
        if result.is_err() {
            self.clear_selection();
        }
        result
    }
}
