//! Buff tracker - turn-scoped stat modifiers.
//!
//! Modifiers count down in their *owner's* turns, not in rounds. A modifier
//! with duration N placed on a combatant expires when that combatant has
//! completed N of its own turns, no matter how many other combatants act in
//! between or who applied it.

use super::{StatKind, round_half_up};

/// A temporary additive change to one stat.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActiveModifier {
    pub stat: StatKind,
    /// Signed amount added to the base stat.
    pub magnitude: f64,
    /// Owner turns left before expiry. Always ≥ 1 while stored.
    pub turns_remaining: u32,
}

/// Ordered list of active modifiers on one combatant.
///
/// Several modifiers of the same stat may coexist; their magnitudes add up.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ModifierSet {
    modifiers: Vec<ActiveModifier>,
}

impl ModifierSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Converts an authored duration into whole owner turns.
    ///
    /// Rounds half-up and never returns less than one turn.
    pub fn duration_turns(duration: f64) -> u32 {
        if !duration.is_finite() || duration <= 0.0 {
            return 1;
        }
        (round_half_up(duration) as u32).max(1)
    }

    /// Appends a modifier and returns the number of turns it will last.
    pub fn apply(&mut self, stat: StatKind, magnitude: f64, duration: f64) -> u32 {
        let turns_remaining = Self::duration_turns(duration);
        self.modifiers.push(ActiveModifier {
            stat,
            magnitude,
            turns_remaining,
        });
        turns_remaining
    }

    /// Called once when the owner finishes its turn.
    ///
    /// Decrements every modifier and drops the ones that reached zero.
    /// Returns the modifiers that expired, in application order.
    pub fn advance_owner_turn(&mut self) -> Vec<ActiveModifier> {
        let mut expired = Vec::new();
        self.modifiers.retain_mut(|modifier| {
            modifier.turns_remaining = modifier.turns_remaining.saturating_sub(1);
            if modifier.turns_remaining == 0 {
                expired.push(*modifier);
                false
            } else {
                true
            }
        });
        expired
    }

    /// Sum of all magnitudes targeting `stat`.
    pub fn total(&self, stat: StatKind) -> f64 {
        self.modifiers
            .iter()
            .filter(|modifier| modifier.stat == stat)
            .map(|modifier| modifier.magnitude)
            .sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ActiveModifier> {
        self.modifiers.iter()
    }

    pub fn len(&self) -> usize {
        self.modifiers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modifiers.is_empty()
    }
}
