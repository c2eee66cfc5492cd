use crate::config::BattleConfig;
use crate::env::RandomSource;
use crate::state::{CombatantId, Roster};
use crate::stats::StatKind;

/// Round-based turn order.
///
/// Every round, each living combatant rolls initiative (effective speed plus
/// one initiative die) and acts once in descending initiative order. Ties keep
/// the previous round's order; in the first round that is roster order.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TurnScheduler {
    turn_order: Vec<CombatantId>,
    turn_index: usize,
    round: u32,
}

impl TurnScheduler {
    /// Rolls the first round. Returns `None` when nobody is alive.
    pub fn start(
        roster: &Roster,
        rng: &mut dyn RandomSource,
        config: &BattleConfig,
    ) -> Option<Self> {
        let mut scheduler = Self::default();
        scheduler.begin_round(roster, rng, config);
        (!scheduler.turn_order.is_empty()).then_some(scheduler)
    }

    /// Combatant whose turn it is.
    pub fn current(&self) -> Option<CombatantId> {
        self.turn_order.get(self.turn_index).copied()
    }

    pub fn round(&self) -> u32 {
        self.round
    }

    pub fn turn_order(&self) -> &[CombatantId] {
        &self.turn_order
    }

    pub fn turn_index(&self) -> usize {
        self.turn_index
    }

    /// Moves to the next living combatant, starting a new round when the
    /// current order is exhausted. Returns `None` only if nobody is alive.
    pub fn advance(
        &mut self,
        roster: &Roster,
        rng: &mut dyn RandomSource,
        config: &BattleConfig,
    ) -> Option<CombatantId> {
        loop {
            self.turn_index += 1;
            match self.turn_order.get(self.turn_index) {
                Some(&id) if roster.is_alive(id) => return Some(id),
                Some(_) => continue,
                None => {
                    self.begin_round(roster, rng, config);
                    return self.current();
                }
            }
        }
    }

    fn begin_round(&mut self, roster: &Roster, rng: &mut dyn RandomSource, config: &BattleConfig) {
        self.round += 1;
        self.turn_index = 0;
        self.turn_order = compute_initiative(roster, &self.turn_order, rng, config);
        tracing::debug!(round = self.round, order = ?self.turn_order, "turn order rolled");
    }
}

/// Rolls initiative for every living combatant and sorts descending.
///
/// Combatants roll in `previous` order first (skipping the dead), then any
/// living combatant missing from it in roster order. The sort is stable, so
/// that same sequence breaks ties.
pub fn compute_initiative(
    roster: &Roster,
    previous: &[CombatantId],
    rng: &mut dyn RandomSource,
    config: &BattleConfig,
) -> Vec<CombatantId> {
    let mut sequence: Vec<CombatantId> = previous
        .iter()
        .copied()
        .filter(|&id| roster.is_alive(id))
        .collect();
    for combatant in roster.living() {
        if !sequence.contains(&combatant.id) {
            sequence.push(combatant.id);
        }
    }

    let mut rolled: Vec<(CombatantId, f64)> = sequence
        .into_iter()
        .filter_map(|id| {
            let speed = roster.get(id)?.effective(StatKind::Speed);
            let roll = rng.roll_die(config.initiative_die);
            Some((id, speed + f64::from(roll)))
        })
        .collect();
    rolled.sort_by(|a, b| b.1.total_cmp(&a.1));
    rolled.into_iter().map(|(id, _)| id).collect()
}
