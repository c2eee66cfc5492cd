//! Action resolution: rolls, outcome computation and application.

use crate::action::{ActionDefinition, ActionEffect, ActionError, TargetSelection, resolve_targets};
use crate::config::BattleConfig;
use crate::env::RandomSource;
use crate::events::BattleEvent;
use crate::state::{CombatantId, Roster};
use crate::stats::{StatKind, round_half_up};

use super::hit::{AttackRoll, classify_attack};
use super::result::{ActionResult, ResultKind};

/// Validate and resolve `action` by `actor` against `selection`.
///
/// All checks (actor exists, cooldown, targeting) run before the first roll,
/// so an error leaves the roster untouched.
pub fn resolve(
    roster: &mut Roster,
    actor: CombatantId,
    action: &ActionDefinition,
    selection: TargetSelection,
    rng: &mut dyn RandomSource,
    config: &BattleConfig,
) -> Result<Vec<BattleEvent>, ActionError> {
    let targets = validate(roster, actor, action, selection)?;
    Ok(apply(roster, actor, action, &targets, rng, config))
}

/// Runs every precondition of [`resolve`] and returns the expanded targets.
pub fn validate(
    roster: &Roster,
    actor: CombatantId,
    action: &ActionDefinition,
    selection: TargetSelection,
) -> Result<Vec<CombatantId>, ActionError> {
    let acting = roster.get(actor).ok_or(ActionError::UnknownCombatant(actor))?;

    if !acting.is_available(action) {
        return Err(ActionError::ActionUnavailable {
            action: action.id.clone(),
            remaining: acting.cooldowns().remaining(&action.id),
        });
    }

    resolve_targets(roster, acting, action, selection)
}

/// Applies an already validated action to each target in order.
///
/// Emits one `ActionResolved` per target, a `CombatantDied` right after any
/// fatal result, and records the cooldown on the actor last. The cooldown is
/// consumed whatever the rolls were.
pub fn apply(
    roster: &mut Roster,
    actor: CombatantId,
    action: &ActionDefinition,
    targets: &[CombatantId],
    rng: &mut dyn RandomSource,
    config: &BattleConfig,
) -> Vec<BattleEvent> {
    let mut events = Vec::with_capacity(targets.len() + 1);
    let actor_attack = roster
        .get(actor)
        .map_or(0.0, |acting| acting.effective(StatKind::Attack));

    for &target_id in targets {
        let Some(target) = roster.get_mut(target_id) else {
            tracing::warn!(%target_id, "target vanished before resolution");
            continue;
        };

        let (kind, amount, died) = match action.effect {
            ActionEffect::Attack {
                min_damage,
                max_damage,
            } => {
                let roll = rng.roll_die(BattleConfig::D20_SIDES);
                let defense = target.effective(StatKind::Defense);
                let outcome = classify_attack(roll, actor_attack, defense);
                tracing::debug!(
                    %actor,
                    target = %target_id,
                    roll,
                    attack = actor_attack,
                    defense,
                    ?outcome,
                    "attack roll"
                );

                match outcome {
                    AttackRoll::CriticalFail | AttackRoll::Miss => (ResultKind::Miss, None, false),
                    AttackRoll::Hit | AttackRoll::Critical => {
                        let mut damage = round_half_up(rng.uniform_f64(min_damage, max_damage));
                        let kind = if outcome == AttackRoll::Critical {
                            damage *= f64::from(config.crit_multiplier);
                            ResultKind::CriticalHit
                        } else {
                            ResultKind::Hit
                        };
                        let died = target.take_damage(damage);
                        (kind, Some(damage), died)
                    }
                }
            }
            ActionEffect::Heal { min_heal, max_heal } => {
                let roll = rng.roll_die(BattleConfig::D20_SIDES);
                let mut heal = round_half_up(rng.uniform_f64(min_heal, max_heal));
                let kind = if roll >= BattleConfig::CRITICAL_ROLL {
                    heal *= f64::from(config.crit_multiplier);
                    ResultKind::CriticalHeal
                } else {
                    ResultKind::Heal
                };
                tracing::debug!(%actor, target = %target_id, roll, heal, "heal roll");
                target.heal(heal);
                (kind, Some(heal), false)
            }
            ActionEffect::Buff {
                stat,
                magnitude,
                duration_turns,
            } => {
                let turns = target.apply_modifier(stat, magnitude, duration_turns);
                tracing::debug!(%target_id, %stat, magnitude, turns, "buff applied");
                (ResultKind::BuffApplied, Some(magnitude), false)
            }
            ActionEffect::Debuff {
                stat,
                magnitude,
                duration_turns,
            } => {
                let turns = target.apply_modifier(stat, -magnitude, duration_turns);
                tracing::debug!(%target_id, %stat, magnitude = -magnitude, turns, "debuff applied");
                (ResultKind::DebuffApplied, Some(-magnitude), false)
            }
        };

        events.push(BattleEvent::ActionResolved(ActionResult {
            actor,
            target: target_id,
            action: action.id.clone(),
            kind,
            amount,
        }));

        if died {
            tracing::info!(combatant = %target_id, "combatant died");
            events.push(BattleEvent::CombatantDied {
                combatant: target_id,
            });
        }
    }

    if let Some(acting) = roster.get_mut(actor) {
        acting.mark_used(action);
    }

    events
}
