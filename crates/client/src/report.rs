//! Turns runtime events into battle log lines.
use battle_core::{BattleOutcome, BattleSession, CombatantId, ResultKind};
use battle_runtime::{CombatEvent, Event};
use tokio::sync::broadcast::{self, error::TryRecvError};

fn name(session: &BattleSession, id: CombatantId) -> String {
    session
        .combatant(id)
        .map_or_else(|| id.to_string(), |combatant| combatant.name.clone())
}

/// One human-readable line per event.
pub fn describe(event: &Event, session: &BattleSession) -> String {
    match event {
        Event::Turn(turn) => format!(
            "-- round {} | {} ({}) acts",
            turn.round, turn.name, turn.faction
        ),
        Event::Combat(CombatEvent::Resolved(result)) => {
            let actor = name(session, result.actor);
            let target = name(session, result.target);
            let amount = result.amount.unwrap_or_default();
            match result.kind {
                ResultKind::Hit => {
                    format!("{actor} hits {target} with {} for {amount:.1}", result.action)
                }
                ResultKind::CriticalHit => format!(
                    "{actor} lands a critical {} on {target} for {amount:.1}",
                    result.action
                ),
                ResultKind::Miss => format!("{actor} misses {target} with {}", result.action),
                ResultKind::Heal => format!("{actor} heals {target} for {amount:.1}"),
                ResultKind::CriticalHeal => {
                    format!("{actor} heals {target} for {amount:.1} (critical)")
                }
                ResultKind::BuffApplied | ResultKind::DebuffApplied => {
                    format!("{actor} uses {} on {target} ({amount:+.1})", result.action)
                }
            }
        }
        Event::Combat(CombatEvent::Died { combatant }) => {
            format!("{} is down", name(session, *combatant))
        }
        Event::Combat(CombatEvent::ModifierExpired {
            combatant,
            stat,
            magnitude,
        }) => format!(
            "{}'s {stat} modifier ({magnitude:+.1}) wears off",
            name(session, *combatant)
        ),
        Event::Combat(CombatEvent::CommandRejected { combatant, error }) => {
            format!("{} cannot do that: {error}", name(session, *combatant))
        }
        Event::Outcome(outcome) => match outcome.outcome {
            BattleOutcome::AllyVictory => format!("Victory after {} rounds", outcome.round),
            BattleOutcome::EnemyVictory => format!("Defeat after {} rounds", outcome.round),
            BattleOutcome::InProgress => "The battle goes on".to_string(),
        },
    }
}

/// Takes the rejected decisions queued on a combat subscription.
///
/// Rejections only travel on the bus; every other combat event also comes
/// back from `Runtime::step` and is skipped here.
pub fn drain_rejections(combat: &mut broadcast::Receiver<Event>) -> Vec<Event> {
    let mut rejected = Vec::new();
    loop {
        match combat.try_recv() {
            Ok(event @ Event::Combat(CombatEvent::CommandRejected { .. })) => {
                rejected.push(event)
            }
            Ok(_) | Err(TryRecvError::Lagged(_)) => continue,
            Err(TryRecvError::Empty | TryRecvError::Closed) => break,
        }
    }
    rejected
}

/// Survivor summary printed after the outcome.
pub fn survivors(session: &BattleSession) -> Vec<String> {
    session
        .roster()
        .living()
        .map(|combatant| {
            format!(
                "{} ({}) {:.0}/{:.0}",
                combatant.name,
                combatant.faction,
                combatant.current_health(),
                combatant.max_health()
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use battle_core::{
        ActionId, ActionResult, BaseStats, BattleConfig, Combatant, Faction, Roster,
        ScriptedRandom,
    };
    use battle_runtime::{EventBus, OutcomeEvent, Topic};

    fn session() -> BattleSession {
        let roster: Roster = [
            Combatant::new(CombatantId(0), "Duelist", Faction::Ally, BaseStats::default()),
            Combatant::new(CombatantId(0), "Marine", Faction::Enemy, BaseStats::default()),
        ]
        .into_iter()
        .collect();
        BattleSession::start(roster, BattleConfig::default(), ScriptedRandom::new())
            .unwrap()
            .0
    }

    #[test]
    fn names_both_sides_of_a_hit() {
        let session = session();
        let event = Event::Combat(CombatEvent::Resolved(ActionResult {
            actor: CombatantId(0),
            target: CombatantId(1),
            action: ActionId::new("cutlass_slash"),
            kind: ResultKind::CriticalHit,
            amount: Some(12.0),
        }));
        assert_eq!(
            describe(&event, &session),
            "Duelist lands a critical cutlass_slash on Marine for 12.0"
        );
    }

    #[test]
    fn rejections_are_drained_from_the_bus() {
        let session = session();
        let bus = EventBus::with_capacity(8);
        let mut combat = bus.subscribe(Topic::Combat);
        bus.publish(Event::Combat(CombatEvent::Died {
            combatant: CombatantId(1),
        }));
        bus.publish(Event::Combat(CombatEvent::CommandRejected {
            combatant: CombatantId(0),
            error: "no target selected".into(),
        }));

        let rejected = drain_rejections(&mut combat);
        assert_eq!(rejected.len(), 1);
        assert_eq!(
            describe(&rejected[0], &session),
            "Duelist cannot do that: no target selected"
        );
        assert!(drain_rejections(&mut combat).is_empty());
    }

    #[test]
    fn reports_outcome_and_survivors() {
        let session = session();
        let event = Event::Outcome(OutcomeEvent {
            outcome: BattleOutcome::EnemyVictory,
            round: 4,
        });
        assert_eq!(describe(&event, &session), "Defeat after 4 rounds");
        assert_eq!(survivors(&session).len(), 2);
    }
}
