use battle_core::{
    ActionDefinition, ActionEffect, ActionError, ActionId, BattleConfig, BattleEvent, BattleOutcome,
    BattleSession, CharacterTemplate, Combatant, CombatantId, Faction, FirstReadyPolicy,
    PcgRandom, ResultKind, Roster, ScriptedRandom, StatKind, TargetSelection, TargetType,
};
use proptest::prelude::*;

fn cutlass() -> ActionDefinition {
    ActionDefinition::new(
        "cutlass",
        "Cutlass",
        TargetType::SingleEnemy,
        ActionEffect::Attack {
            min_damage: 4.0,
            max_damage: 8.0,
        },
    )
}

fn broadside() -> ActionDefinition {
    ActionDefinition::new(
        "broadside",
        "Broadside",
        TargetType::AllEnemies,
        ActionEffect::Attack {
            min_damage: 50.0,
            max_damage: 50.0,
        },
    )
    .with_cooldown(2.0)
}

fn grog() -> ActionDefinition {
    ActionDefinition::new(
        "grog",
        "Grog",
        TargetType::AllAllies,
        ActionEffect::Heal {
            min_heal: 3.0,
            max_heal: 6.0,
        },
    )
    .with_cooldown(1.0)
}

fn rally() -> ActionDefinition {
    ActionDefinition::new(
        "rally",
        "Rally",
        TargetType::SingleAlly,
        ActionEffect::Buff {
            stat: StatKind::Attack,
            magnitude: 5.0,
            duration_turns: 1.0,
        },
    )
    .with_cooldown(2.0)
}

fn hex() -> ActionDefinition {
    ActionDefinition::new(
        "hex",
        "Hex",
        TargetType::SingleEnemy,
        ActionEffect::Debuff {
            stat: StatKind::Defense,
            magnitude: 3.0,
            duration_turns: 2.0,
        },
    )
    .with_cooldown(3.0)
}

fn catalog() -> Vec<ActionDefinition> {
    vec![cutlass(), broadside(), grog(), rally(), hex()]
}

fn pirate(name: &str, faction: Faction, health: f64, speed: f64) -> Combatant {
    Combatant::new(
        CombatantId(0),
        name,
        faction,
        battle_core::BaseStats::new(health, 5.0, 3.0, speed),
    )
}

fn deaths(events: &[BattleEvent]) -> Vec<CombatantId> {
    events
        .iter()
        .filter_map(|event| match event {
            BattleEvent::CombatantDied { combatant } => Some(*combatant),
            _ => None,
        })
        .collect()
}

#[test]
fn modifier_counts_only_its_owners_turns() {
    let roster: Roster = [
        pirate("Captain", Faction::Ally, 30.0, 30.0).with_action(rally()),
        pirate("Marine", Faction::Enemy, 30.0, 20.0),
        pirate("Gunner", Faction::Ally, 30.0, 10.0),
    ]
    .into_iter()
    .collect();
    let (mut session, _) =
        BattleSession::start(roster, BattleConfig::default(), ScriptedRandom::new()).unwrap();
    let gunner = CombatantId(2);

    session
        .resolve(&ActionId::new("rally"), TargetSelection::Single(gunner))
        .unwrap();
    let captain_end = session.complete_turn();
    assert!(
        !captain_end
            .iter()
            .any(|event| matches!(event, BattleEvent::ModifierExpired { .. }))
    );

    // The marine's turn does not touch the gunner's modifier.
    session.complete_turn();
    assert_eq!(session.current_combatant_id(), Some(gunner));
    assert_eq!(
        session.combatant(gunner).unwrap().effective(StatKind::Attack),
        10.0
    );

    let gunner_end = session.complete_turn();
    assert_eq!(
        gunner_end,
        vec![
            BattleEvent::ModifierExpired {
                combatant: gunner,
                stat: StatKind::Attack,
                magnitude: 5.0,
            },
            BattleEvent::TurnStarted {
                combatant: CombatantId(0),
                round: 2,
            },
        ]
    );
    assert_eq!(
        session.combatant(gunner).unwrap().effective(StatKind::Attack),
        5.0
    );
}

fn tailwind() -> ActionDefinition {
    ActionDefinition::new(
        "tailwind",
        "Tailwind",
        TargetType::SingleAlly,
        ActionEffect::Buff {
            stat: StatKind::Speed,
            magnitude: 100.0,
            duration_turns: 3.0,
        },
    )
}

#[test]
fn speed_changes_wait_for_the_next_round() {
    let roster: Roster = [
        pirate("Navigator", Faction::Ally, 30.0, 30.0).with_action(tailwind()),
        pirate("Marine", Faction::Enemy, 30.0, 20.0),
        pirate("Lookout", Faction::Ally, 30.0, 10.0),
    ]
    .into_iter()
    .collect();
    let (mut session, _) =
        BattleSession::start(roster, BattleConfig::default(), ScriptedRandom::new()).unwrap();
    let round_one = [CombatantId(0), CombatantId(1), CombatantId(2)];
    assert_eq!(session.turn_order(), &round_one);

    let lookout = CombatantId(2);
    session
        .resolve(&ActionId::new("tailwind"), TargetSelection::Single(lookout))
        .unwrap();
    session.complete_turn();
    assert_eq!(
        session.combatant(lookout).unwrap().effective(StatKind::Speed),
        110.0
    );

    // The buffed lookout still waits behind the marine this round.
    assert_eq!(session.current_combatant_id(), Some(CombatantId(1)));
    assert_eq!(session.turn_order(), &round_one);
    session.complete_turn();
    assert_eq!(session.current_combatant_id(), Some(lookout));
    assert_eq!(session.turn_order(), &round_one);

    session.complete_turn();
    assert_eq!(session.round(), 2);
    assert_eq!(
        session.turn_order(),
        &[lookout, CombatantId(0), CombatantId(1)]
    );
    assert_eq!(session.current_combatant_id(), Some(lookout));
}

#[test]
fn wiping_the_enemy_party_is_an_ally_victory() {
    let roster: Roster = [
        pirate("Captain", Faction::Ally, 30.0, 50.0).with_action(broadside()),
        pirate("Rat", Faction::Enemy, 10.0, 1.0),
        pirate("Rat", Faction::Enemy, 10.0, 1.0),
        pirate("Rat", Faction::Enemy, 10.0, 1.0),
    ]
    .into_iter()
    .collect();
    // Four initiative rolls, then one d20 and one damage roll per rat.
    let rng = ScriptedRandom::new()
        .with_ints([1, 1, 1, 1, 15, 15, 15])
        .with_reals([50.0, 50.0, 50.0]);
    let (mut session, _) = BattleSession::start(roster, BattleConfig::default(), rng).unwrap();

    session.select_action(ActionId::new("broadside")).unwrap();
    session.select_target(TargetSelection::All).unwrap();
    let events = session.confirm().unwrap();

    assert_eq!(
        deaths(&events),
        vec![CombatantId(1), CombatantId(2), CombatantId(3)]
    );
    assert_eq!(
        events.last(),
        Some(&BattleEvent::BattleEnded {
            outcome: BattleOutcome::AllyVictory
        })
    );
    assert_eq!(events.iter().filter(|event| event.is_terminal()).count(), 1);
    assert_eq!(session.outcome(), BattleOutcome::AllyVictory);

    assert!(session.complete_turn().is_empty());
    assert_eq!(
        session.resolve(&ActionId::new("broadside"), TargetSelection::All),
        Err(ActionError::BattleEnded)
    );
}

#[test]
fn losing_every_ally_is_an_enemy_victory() {
    let roster: Roster = [
        pirate("Deckhand", Faction::Ally, 5.0, 1.0),
        pirate("Kraken", Faction::Enemy, 100.0, 50.0).with_action(cutlass()),
    ]
    .into_iter()
    .collect();
    let rng = ScriptedRandom::new().with_ints([1, 1, 20]).with_reals([8.0]);
    let (mut session, _) = BattleSession::start(roster, BattleConfig::default(), rng).unwrap();
    assert_eq!(session.current_combatant_id(), Some(CombatantId(1)));

    let events = session
        .resolve(&ActionId::new("cutlass"), TargetSelection::Single(CombatantId(0)))
        .unwrap();
    let hit = events[0].as_result().unwrap();
    assert_eq!(hit.kind, ResultKind::CriticalHit);
    assert_eq!(hit.amount, Some(16.0));
    assert_eq!(
        events.last(),
        Some(&BattleEvent::BattleEnded {
            outcome: BattleOutcome::EnemyVictory
        })
    );
}

#[test]
fn targeting_rules_reject_before_any_roll() {
    let roster: Roster = [
        pirate("Surgeon", Faction::Ally, 30.0, 30.0)
            .with_action(grog())
            .with_action(cutlass()),
        pirate("Mate", Faction::Ally, 30.0, 1.0).with_health(10.0),
        pirate("Fallen", Faction::Ally, 30.0, 1.0).with_health(0.0),
        pirate("Marine", Faction::Enemy, 30.0, 1.0),
    ]
    .into_iter()
    .collect();
    let (mut session, _) =
        BattleSession::start(roster, BattleConfig::default(), ScriptedRandom::new()).unwrap();

    let before = session.roster().clone();
    assert!(matches!(
        session.resolve(&ActionId::new("cutlass"), TargetSelection::All),
        Err(ActionError::InvalidTarget { target: None, .. })
    ));
    assert!(matches!(
        session.resolve(&ActionId::new("cutlass"), TargetSelection::Single(CombatantId(1))),
        Err(ActionError::InvalidTarget { .. })
    ));
    assert!(matches!(
        session.resolve(&ActionId::new("grog"), TargetSelection::Single(CombatantId(2))),
        Err(ActionError::InvalidTarget { .. })
    ));
    assert_eq!(
        session.resolve(&ActionId::new("grog"), TargetSelection::Single(CombatantId(9))),
        Err(ActionError::UnknownCombatant(CombatantId(9)))
    );
    assert_eq!(session.roster(), &before);

    // Group heals reach only living allies.
    let events = session
        .resolve(&ActionId::new("grog"), TargetSelection::All)
        .unwrap();
    let healed: Vec<_> = events
        .iter()
        .filter_map(BattleEvent::as_result)
        .map(|result| result.target)
        .collect();
    assert_eq!(healed, vec![CombatantId(0), CombatantId(1)]);
    assert_eq!(session.combatant(CombatantId(2)).unwrap().current_health(), 0.0);
}

#[test]
fn debuff_lowers_defense_for_its_duration() {
    let roster: Roster = [
        pirate("Witch", Faction::Ally, 30.0, 30.0).with_action(hex()),
        pirate("Marine", Faction::Enemy, 30.0, 1.0),
    ]
    .into_iter()
    .collect();
    let (mut session, _) =
        BattleSession::start(roster, BattleConfig::default(), ScriptedRandom::new()).unwrap();
    let marine = CombatantId(1);

    session
        .resolve(&ActionId::new("hex"), TargetSelection::Single(marine))
        .unwrap();
    session.complete_turn();
    assert_eq!(session.combatant(marine).unwrap().effective(StatKind::Defense), 0.0);

    // First of the marine's two turns.
    session.complete_turn();
    session.complete_turn();
    assert_eq!(session.combatant(marine).unwrap().effective(StatKind::Defense), 0.0);

    let events = session.complete_turn();
    assert!(matches!(
        events.first(),
        Some(BattleEvent::ModifierExpired { combatant, .. }) if *combatant == marine
    ));
    assert_eq!(session.combatant(marine).unwrap().effective(StatKind::Defense), 3.0);
}

#[test]
fn templates_spawn_in_order() {
    let templates = [
        CharacterTemplate::new("Quartermaster", Faction::Ally, battle_core::BaseStats::default())
            .with_action("cutlass"),
        CharacterTemplate::new("Boarder", Faction::Enemy, battle_core::BaseStats::default())
            .with_action("cutlass")
            .with_rank(battle_core::Rank::Elite),
    ];
    let (session, events) = BattleSession::from_templates(
        &templates,
        catalog().as_slice(),
        BattleConfig::default(),
        PcgRandom::new(7),
    )
    .unwrap();

    assert_eq!(events.len(), 1);
    assert_eq!(session.roster().len(), 2);
    assert_eq!(session.combatant(CombatantId(1)).unwrap().name, "Boarder");
    assert_eq!(session.combatant(CombatantId(1)).unwrap().max_health(), 150.0);
}

fn skirmish(seed: u64) -> BattleSession {
    let roster: Roster = [
        pirate("Captain", Faction::Ally, 40.0, 6.0)
            .with_action(hex())
            .with_action(cutlass()),
        pirate("Surgeon", Faction::Ally, 30.0, 4.0)
            .with_action(grog())
            .with_action(cutlass()),
        pirate("Bosun", Faction::Enemy, 45.0, 5.0)
            .with_action(rally())
            .with_action(cutlass()),
        pirate("Marine", Faction::Enemy, 35.0, 3.0).with_action(cutlass()),
    ]
    .into_iter()
    .collect();
    let (session, _) =
        BattleSession::start(roster, BattleConfig::default(), PcgRandom::new(seed)).unwrap();
    session
}

fn play_out(session: &mut BattleSession, max_turns: usize) -> Vec<BattleEvent> {
    let mut log = Vec::new();
    for _ in 0..max_turns {
        if session.is_over() {
            break;
        }
        log.extend(session.play_turn(&mut FirstReadyPolicy).unwrap());
    }
    log
}

#[test]
fn same_seed_replays_the_same_battle() {
    let mut first = skirmish(42);
    let mut second = skirmish(42);
    assert_eq!(first.turn_order(), second.turn_order());

    let first_log = play_out(&mut first, 500);
    let second_log = play_out(&mut second, 500);
    assert_eq!(first_log, second_log);
    assert_eq!(first.outcome(), second.outcome());
    assert_eq!(first.roster(), second.roster());
}

#[test]
fn auto_battle_terminates() {
    let mut session = skirmish(3);
    let log = play_out(&mut session, 1_000);
    assert!(session.is_over());
    assert_eq!(log.iter().filter(|event| event.is_terminal()).count(), 1);
    assert!(log.last().is_some_and(BattleEvent::is_terminal));
}

proptest! {
    #[test]
    fn health_stays_within_bounds(seed in any::<u64>()) {
        let mut session = skirmish(seed);
        for _ in 0..300 {
            if session.is_over() {
                break;
            }
            session.play_turn(&mut FirstReadyPolicy).unwrap();
            for combatant in session.roster().iter() {
                prop_assert!(combatant.current_health() >= 0.0);
                prop_assert!(combatant.current_health() <= combatant.max_health());
            }
        }
    }
}
