//! Battle session: turn flow, command handling and outcome tracking.
//!
//! [`BattleSession`] is the single owner of battle state. Presentation code
//! drives it with commands (or the lower-level `resolve` / `complete_turn`
//! pair) and reads back the events each call produced. Every failed call
//! leaves the session unchanged.

mod commands;
mod errors;
mod outcome;
mod turns;

pub use commands::{Command, PendingSelection};
pub use errors::SessionError;
pub use outcome::BattleOutcome;
pub use turns::{TurnScheduler, compute_initiative};

use std::fmt;

use crate::action::{ActionDefinition, ActionError, ActionId, TargetSelection, valid_targets};
use crate::combat;
use crate::config::BattleConfig;
use crate::env::{ActionCatalog, CharacterTemplate, RandomSource};
use crate::events::BattleEvent;
use crate::state::{Combatant, CombatantId, Faction, Roster};

/// One running encounter.
pub struct BattleSession {
    roster: Roster,
    scheduler: TurnScheduler,
    outcome: BattleOutcome,
    config: BattleConfig,
    selection: PendingSelection,
    acted: bool,
    rng: Box<dyn RandomSource>,
}

impl fmt::Debug for BattleSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BattleSession")
            .field("roster", &self.roster)
            .field("scheduler", &self.scheduler)
            .field("outcome", &self.outcome)
            .field("selection", &self.selection)
            .field("acted", &self.acted)
            .finish_non_exhaustive()
    }
}

impl BattleSession {
    /// Starts a battle and rolls the first round.
    ///
    /// Returns the session together with its opening events: the first
    /// `TurnStarted`, or `BattleEnded` if one side starts with nobody alive.
    pub fn start(
        roster: Roster,
        config: BattleConfig,
        rng: impl RandomSource + 'static,
    ) -> Result<(Self, Vec<BattleEvent>), SessionError> {
        for faction in [Faction::Ally, Faction::Enemy] {
            let count = roster.count_in(faction);
            if count > config.max_party_size {
                return Err(SessionError::PartyTooLarge {
                    faction,
                    count,
                    max: config.max_party_size,
                });
            }
        }

        let mut rng: Box<dyn RandomSource> = Box::new(rng);
        let scheduler =
            TurnScheduler::start(&roster, &mut *rng, &config).ok_or(SessionError::EmptyRoster)?;

        let mut session = Self {
            roster,
            scheduler,
            outcome: BattleOutcome::InProgress,
            config,
            selection: PendingSelection::default(),
            acted: false,
            rng,
        };
        tracing::info!(combatants = session.roster.len(), "battle started");

        let mut events = Vec::with_capacity(1);
        if let Some(ended) = session.evaluate_outcome() {
            events.push(ended);
        } else if let Some(first) = session.scheduler.current() {
            events.push(BattleEvent::TurnStarted {
                combatant: first,
                round: session.scheduler.round(),
            });
        }
        Ok((session, events))
    }

    /// Spawns every template through `catalog` and starts a battle with them,
    /// in template order.
    pub fn from_templates<'a>(
        templates: impl IntoIterator<Item = &'a CharacterTemplate>,
        catalog: &(impl ActionCatalog + ?Sized),
        config: BattleConfig,
        rng: impl RandomSource + 'static,
    ) -> Result<(Self, Vec<BattleEvent>), SessionError> {
        let roster = templates
            .into_iter()
            .map(|template| template.to_combatant(catalog))
            .collect::<Result<Roster, _>>()?;
        Self::start(roster, config, rng)
    }

    // ===== queries =====

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn combatant(&self, id: CombatantId) -> Option<&Combatant> {
        self.roster.get(id)
    }

    pub fn current_combatant_id(&self) -> Option<CombatantId> {
        self.scheduler.current()
    }

    pub fn current_combatant(&self) -> Option<&Combatant> {
        self.current_combatant_id().and_then(|id| self.roster.get(id))
    }

    pub fn round(&self) -> u32 {
        self.scheduler.round()
    }

    /// This round's order, dead combatants included.
    pub fn turn_order(&self) -> &[CombatantId] {
        self.scheduler.turn_order()
    }

    pub fn outcome(&self) -> BattleOutcome {
        self.outcome
    }

    pub fn is_over(&self) -> bool {
        self.outcome.is_terminal()
    }

    pub fn config(&self) -> &BattleConfig {
        &self.config
    }

    pub fn selection(&self) -> &PendingSelection {
        &self.selection
    }

    /// Whether the current combatant already resolved an action this turn.
    pub fn has_acted(&self) -> bool {
        self.acted
    }

    /// Loadout actions of the current combatant that are off cooldown.
    pub fn available_actions(&self) -> Vec<&ActionDefinition> {
        self.current_combatant()
            .map(|actor| {
                actor
                    .loadout()
                    .iter()
                    .filter(|action| actor.is_available(action))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Combatants the current combatant could aim `action` at.
    pub fn valid_targets(&self, action: &ActionId) -> Result<Vec<CombatantId>, ActionError> {
        let actor = self.acting()?;
        let definition = self.loadout_action(actor, action)?;
        let acting = self.roster.get(actor).ok_or(ActionError::UnknownCombatant(actor))?;
        Ok(valid_targets(&self.roster, acting, definition))
    }

    // ===== turn flow =====

    /// Resolves `action` for the current combatant against `selection`.
    ///
    /// Evaluates the outcome after any death, appending `BattleEnded` when
    /// the battle is decided. Does not end the turn.
    pub fn resolve(
        &mut self,
        action: &ActionId,
        selection: TargetSelection,
    ) -> Result<Vec<BattleEvent>, ActionError> {
        let actor = self.acting()?;
        if self.acted {
            return Err(ActionError::AlreadyActed(actor));
        }
        let definition = self.loadout_action(actor, action)?.clone();

        let mut events = combat::resolve(
            &mut self.roster,
            actor,
            &definition,
            selection,
            &mut *self.rng,
            &self.config,
        )?;
        self.acted = true;
        self.selection.clear();

        if events
            .iter()
            .any(|event| matches!(event, BattleEvent::CombatantDied { .. }))
        {
            events.extend(self.evaluate_outcome());
        }
        Ok(events)
    }

    /// Ends the current turn.
    ///
    /// Ticks the owner's modifiers and cooldowns, re-checks the outcome and
    /// moves to the next living combatant. Ending a turn without acting
    /// passes it. Does nothing once the battle is over.
    pub fn complete_turn(&mut self) -> Vec<BattleEvent> {
        if self.outcome.is_terminal() {
            return Vec::new();
        }

        let mut events = Vec::new();
        if let Some(owner) = self.scheduler.current() {
            let expired = self
                .roster
                .get_mut(owner)
                .map(Combatant::advance_owner_turn)
                .unwrap_or_default();
            for expired in expired {
                tracing::debug!(%owner, stat = %expired.stat, "modifier expired");
                events.push(BattleEvent::ModifierExpired {
                    combatant: owner,
                    stat: expired.stat,
                    magnitude: expired.magnitude,
                });
            }
        }
        self.selection.clear();
        self.acted = false;

        if let Some(ended) = self.evaluate_outcome() {
            events.push(ended);
            return events;
        }

        match self
            .scheduler
            .advance(&self.roster, &mut *self.rng, &self.config)
        {
            Some(next) => events.push(BattleEvent::TurnStarted {
                combatant: next,
                round: self.scheduler.round(),
            }),
            None => tracing::error!("no living combatant left to schedule"),
        }
        events
    }

    // ===== commands =====

    /// Selects an action from the current combatant's loadout. Clears any
    /// previously selected target.
    pub fn select_action(&mut self, action: ActionId) -> Result<(), ActionError> {
        let actor = self.acting()?;
        if self.acted {
            return Err(ActionError::AlreadyActed(actor));
        }
        let definition = self.loadout_action(actor, &action)?;
        let acting = self.roster.get(actor).ok_or(ActionError::UnknownCombatant(actor))?;
        if !acting.is_available(definition) {
            return Err(ActionError::ActionUnavailable {
                remaining: acting.cooldowns().remaining(&definition.id),
                action,
            });
        }

        self.selection.action = Some(action);
        self.selection.target = None;
        Ok(())
    }

    /// Selects the target for the already selected action.
    pub fn select_target(&mut self, target: TargetSelection) -> Result<(), ActionError> {
        let actor = self.acting()?;
        let action = self
            .selection
            .action
            .as_ref()
            .ok_or(ActionError::NoActionSelected)?;
        let definition = self.loadout_action(actor, action)?;
        combat::validate(&self.roster, actor, definition, target)?;

        self.selection.target = Some(target);
        Ok(())
    }

    /// Resolves the pending selection, then ends the turn if the battle is
    /// still running.
    pub fn confirm(&mut self) -> Result<Vec<BattleEvent>, ActionError> {
        self.acting()?;
        let action = self
            .selection
            .action
            .clone()
            .ok_or(ActionError::NoActionSelected)?;
        let target = self.selection.target.ok_or(ActionError::NoTargetSelected)?;

        let mut events = self.resolve(&action, target)?;
        events.extend(self.complete_turn());
        Ok(events)
    }

    /// Drops any pending action and target without acting.
    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    /// Dispatches a [`Command`]. Selection commands produce no events.
    pub fn handle(&mut self, command: Command) -> Result<Vec<BattleEvent>, ActionError> {
        match command {
            Command::SelectAction(action) => self.select_action(action).map(|()| Vec::new()),
            Command::SelectTarget(target) => self.select_target(target).map(|()| Vec::new()),
            Command::Confirm => self.confirm(),
        }
    }

    // ===== internals =====

    /// Current combatant, or `BattleEnded` once the outcome is terminal.
    fn acting(&self) -> Result<CombatantId, ActionError> {
        if self.outcome.is_terminal() {
            return Err(ActionError::BattleEnded);
        }
        self.scheduler.current().ok_or(ActionError::BattleEnded)
    }

    fn loadout_action(
        &self,
        actor: CombatantId,
        action: &ActionId,
    ) -> Result<&ActionDefinition, ActionError> {
        self.roster
            .get(actor)
            .ok_or(ActionError::UnknownCombatant(actor))?
            .action(action)
            .ok_or_else(|| ActionError::UnknownAction {
                actor,
                action: action.clone(),
            })
    }

    /// Moves to a terminal outcome if one side is wiped out. Yields the
    /// `BattleEnded` event only on the transition itself.
    fn evaluate_outcome(&mut self) -> Option<BattleEvent> {
        if self.outcome.is_terminal() {
            return None;
        }
        let outcome = BattleOutcome::evaluate(&self.roster);
        if !outcome.is_terminal() {
            return None;
        }
        self.outcome = outcome;
        tracing::info!(%outcome, round = self.scheduler.round(), "battle ended");
        Some(BattleEvent::BattleEnded { outcome })
    }
}
