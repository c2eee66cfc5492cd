use super::{Combatant, CombatantId, Faction};

/// Ordered, indexed list of every combatant in a session.
///
/// A combatant's id is its index; ids are assigned on insertion and never
/// reused. Dead combatants stay in the roster with zero health.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Roster {
    combatants: Vec<Combatant>,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a combatant, assigning it the next id.
    pub fn add(&mut self, mut combatant: Combatant) -> CombatantId {
        let id = CombatantId(self.combatants.len() as u32);
        combatant.id = id;
        self.combatants.push(combatant);
        id
    }

    pub fn get(&self, id: CombatantId) -> Option<&Combatant> {
        self.combatants.get(id.index())
    }

    pub(crate) fn get_mut(&mut self, id: CombatantId) -> Option<&mut Combatant> {
        self.combatants.get_mut(id.index())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Combatant> {
        self.combatants.iter()
    }

    pub fn living(&self) -> impl Iterator<Item = &Combatant> {
        self.combatants.iter().filter(|c| c.is_alive())
    }

    /// Living members of `faction`, in roster order.
    pub fn living_in(&self, faction: Faction) -> impl Iterator<Item = &Combatant> {
        self.living().filter(move |c| c.faction == faction)
    }

    pub fn count_in(&self, faction: Faction) -> usize {
        self.combatants
            .iter()
            .filter(|c| c.faction == faction)
            .count()
    }

    pub fn has_living(&self, faction: Faction) -> bool {
        self.living_in(faction).next().is_some()
    }

    pub fn is_alive(&self, id: CombatantId) -> bool {
        self.get(id).is_some_and(Combatant::is_alive)
    }

    pub fn len(&self) -> usize {
        self.combatants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.combatants.is_empty()
    }
}

impl FromIterator<Combatant> for Roster {
    fn from_iter<T: IntoIterator<Item = Combatant>>(iter: T) -> Self {
        let mut roster = Self::new();
        for combatant in iter {
            roster.add(combatant);
        }
        roster
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::BaseStats;

    #[test]
    fn ids_follow_insertion_order() {
        let roster: Roster = [
            Combatant::new(CombatantId(9), "A", Faction::Ally, BaseStats::default()),
            Combatant::new(CombatantId(9), "B", Faction::Enemy, BaseStats::default())
                .with_health(0.0),
            Combatant::new(CombatantId(9), "C", Faction::Enemy, BaseStats::default()),
        ]
        .into_iter()
        .collect();

        let ids: Vec<_> = roster.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![CombatantId(0), CombatantId(1), CombatantId(2)]);

        let living_enemies: Vec<_> = roster.living_in(Faction::Enemy).map(|c| c.id).collect();
        assert_eq!(living_enemies, vec![CombatantId(2)]);
        assert_eq!(roster.count_in(Faction::Enemy), 2);
        assert!(!roster.is_alive(CombatantId(1)));
        assert!(!roster.is_alive(CombatantId(7)));
    }
}
