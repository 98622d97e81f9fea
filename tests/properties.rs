//! Property tests for the engine's invariants.

use proptest::prelude::*;
use spellduel::{
    evaluate, parse_command, Combatant, Command, Outcome, ScriptedTactics, Spell, SpellKind,
    StandardPolicy, TurnResolver, VOCABULARY,
};

fn deck() -> Vec<Spell> {
    vec![
        Spell::new("Spark", SpellKind::Attack, 8, 1),
        Spell::new("Nova", SpellKind::Special, 30, 1),
        Spell::new("Ward", SpellKind::Defend, 0, 1),
        Spell::new("Mend", SpellKind::Heal, 12, 1),
    ]
}

fn kind() -> impl Strategy<Value = SpellKind> {
    prop_oneof![
        Just(SpellKind::Attack),
        Just(SpellKind::Special),
        Just(SpellKind::Defend),
        Just(SpellKind::Heal),
    ]
}

fn command() -> impl Strategy<Value = Command> {
    prop_oneof![
        Just(Command::Attack),
        Just(Command::Special),
        Just(Command::Defend),
        Just(Command::Heal),
        Just(Command::Help),
    ]
}

fn combatant(name: &'static str) -> impl Strategy<Value = Combatant> {
    (1u32..200, 1u32..10).prop_flat_map(move |(max_health, level)| {
        (0..=max_health).prop_map(move |health| {
            Combatant::new(name, "Ember", max_health)
                .at_level(level)
                .with_deck(deck())
                .with_health(health)
        })
    })
}

proptest! {
    #[test]
    fn health_stays_within_bounds_over_many_rounds(
        mut player in combatant("Ada"),
        mut enemy in combatant("Morgan"),
        commands in prop::collection::vec(command(), 1..30),
        replies in prop::collection::vec(kind(), 0..30),
    ) {
        let mut resolver = TurnResolver::new(
            Box::new(StandardPolicy::default()),
            Box::new(ScriptedTactics::new(replies)),
        );
        for command in commands {
            if evaluate(&player, &enemy).is_terminal() {
                break;
            }
            let turn = resolver.resolve(command, &player, &enemy).unwrap();
            prop_assert!(turn.actor.health <= turn.actor.max_health);
            prop_assert!(turn.opponent.health <= turn.opponent.max_health);
            prop_assert_eq!(turn.actor.max_health, player.max_health);
            player = turn.actor;
            enemy = turn.opponent;
        }
    }

    #[test]
    fn meta_commands_change_nothing(player in combatant("Ada"), enemy in combatant("Morgan")) {
        let mut resolver = TurnResolver::standard(7);
        let turn = resolver.resolve(Command::Help, &player, &enemy).unwrap();
        prop_assert!(!turn.consumed);
        prop_assert_eq!(turn.actor, player);
        prop_assert_eq!(turn.opponent, enemy);
    }

    #[test]
    fn evaluation_is_pure(player in combatant("Ada"), enemy in combatant("Morgan")) {
        let first = evaluate(&player, &enemy);
        prop_assert_eq!(first, evaluate(&player, &enemy));
        let expected = if player.health == 0 {
            Outcome::Loss
        } else if enemy.health == 0 {
            Outcome::Win
        } else {
            Outcome::Continue
        };
        prop_assert_eq!(first, expected);
    }

    #[test]
    fn levelling_never_lowers_a_stat(mut player in combatant("Ada"), times in 1u32..20) {
        let start = player.clone();
        for _ in 0..times {
            let before = player.clone();
            player.level_up();
            prop_assert!(player.health >= before.health);
            prop_assert!(player.max_health > before.max_health);
            prop_assert!(player.health <= player.max_health);
        }
        prop_assert_eq!(player.level, start.level + times);
        prop_assert_eq!(player.deck, start.deck);
    }

    #[test]
    fn recording_a_defeat_twice_is_a_no_op(
        mut player in combatant("Ada"),
        names in prop::collection::vec("[A-Z][a-z]{2,8}", 1..6),
    ) {
        for name in &names {
            player.record_defeat(name);
        }
        let once = player.defeated.clone();
        for name in &names {
            prop_assert!(!player.record_defeat(name));
        }
        prop_assert_eq!(player.defeated, once);
    }

    #[test]
    fn parsing_accepts_exactly_the_vocabulary(raw in "\\PC{0,12}") {
        let known = VOCABULARY
            .iter()
            .any(|(token, _)| token.eq_ignore_ascii_case(raw.trim()));
        match parse_command(&raw) {
            Ok(command) => {
                prop_assert!(known);
                prop_assert!(command.token().eq_ignore_ascii_case(raw.trim()));
            }
            Err(rejected) => {
                prop_assert!(!known);
                prop_assert_eq!(rejected.raw, raw);
            }
        }
    }
}
