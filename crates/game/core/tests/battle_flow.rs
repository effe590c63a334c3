use legends_core::{
    Battle, BattleConfig, BattleError, BattleEvent, BattleOutcome, BattlePhase, Combatant,
    DeclarativeSkill, EventLog, Hero, HeroClass, ListenerError, Monster, MonsterKind, PcgRng,
    PreviewMode, ScriptedIo, SequenceRng, StatusEffect, StatusKind, TargetMode, spawn_for_party,
};

fn dragon(name: &str) -> Monster {
    Monster::new(MonsterKind::Dragon, name, 1)
}

/// Plenty of "attack / first target" answers for a full battle.
fn attack_inputs() -> ScriptedIo {
    ScriptedIo::with_inputs(std::iter::repeat_n("1", 4_000))
}

// ============================================================================
// Single rounds
// ============================================================================

#[test]
fn warrior_basic_attack_on_level_one_dragon() {
    let mut battle = Battle::new(
        vec![Hero::new("Aria", HeroClass::Warrior)],
        vec![dragon("Drake")],
        SequenceRng::constant(0.5),
        BattleConfig::default(),
    );
    let mut io = ScriptedIo::with_inputs(["1"]);

    let outcome = battle.play_round(&mut io).expect("round resolves");

    assert_eq!(outcome, None);
    assert_eq!(battle.round(), 1);
    assert_eq!(battle.phase(), BattlePhase::RoundStart);
    // 13 raw, 4 defense.
    assert_eq!(battle.monsters()[0].health().current(), 91);
    assert!(io.contains("Aria attacked Drake for 13 damage."));

    // Claw Swipe for 14, then ceil(86 × 1.1) = 95.
    assert!(io.contains("Drake uses Claw Swipe on Aria for 14 damage."));
    assert_eq!(battle.heroes()[0].health().current(), 95);
}

#[test]
fn insufficient_mana_returns_to_the_menu() {
    let mut hero = Hero::new("Aria", HeroClass::Warrior);
    hero.spend_mana(70).expect("warrior starts with 80 MP");
    assert_eq!(hero.mana().current(), 10);

    let mut config = BattleConfig::default();
    config.regen_factor = 1.0;
    let mut battle = Battle::new(
        vec![hero],
        vec![dragon("Drake")],
        SequenceRng::constant(0.5),
        config,
    );
    let mut io = ScriptedIo::with_inputs(["2", "5"]);

    battle.play_round(&mut io).expect("round resolves");

    assert!(io.contains("Not enough MP to use Power Strike."));
    assert!(io.contains("Aria skips the turn."));
    assert_eq!(io.output().matches("Action for Aria:").count(), 2);
    assert_eq!(battle.monsters()[0].health().current(), 100);
    assert_eq!(battle.heroes()[0].mana().current(), 10);
}

#[test]
fn area_skill_total_is_the_sum_of_each_hit() {
    let nova = DeclarativeSkill {
        name: "Nova".into(),
        mana_cost: 10,
        strength_multiplier: 1.0,
        dexterity_multiplier: 0.0,
        target: TargetMode::Area,
        chance: 1.0,
        status: None,
    };
    let hero = Hero::new("Bram", HeroClass::Sorcerer).with_skill(nova.into());
    let monsters = vec![
        Monster::new(MonsterKind::Spirit, "Shade", 1),
        Monster::new(MonsterKind::Spirit, "Wisp", 1),
        Monster::new(MonsterKind::Spirit, "Ghost", 1),
    ];
    let log = EventLog::new();
    let mut battle = Battle::new(
        vec![hero],
        monsters,
        SequenceRng::constant(0.99),
        BattleConfig::default(),
    );
    battle.listen(log.clone());
    let mut io = ScriptedIo::with_inputs(["2"]);

    battle.play_round(&mut io).expect("round resolves");

    // round(12 × 1.0) with a negligible dexterity bonus, three times.
    assert!(io.contains("Bram used Nova (AOE) total damage: 36"));
    assert!(!io.contains("Choose target monster by index"));
    assert!(battle.monsters().iter().all(|m| m.health().current() == 92));

    let hits = log
        .events()
        .into_iter()
        .filter(|e| matches!(e, BattleEvent::DamageDealt { amount: 8, .. }))
        .count();
    assert_eq!(hits, 3);
}

#[test]
fn committed_preview_executes_the_announced_action() {
    // preview, hero pick, then either the action draw or the dodge draw.
    let rolls = [0.1, 0.9, 0.9, 0.9, 0.9];

    let mut independent = Battle::new(
        vec![Hero::new("Aria", HeroClass::Warrior)],
        vec![dragon("Drake")],
        SequenceRng::new(rolls),
        BattleConfig::default(),
    );
    let mut io = ScriptedIo::with_inputs(["5"]);
    independent.play_round(&mut io).expect("round resolves");
    assert!(io.contains("[1] Drake plans: Fire Breath (AOE)"));
    assert!(io.contains("Drake uses Claw Swipe on Aria"));

    let mut committed = Battle::new(
        vec![Hero::new("Aria", HeroClass::Warrior)],
        vec![dragon("Drake")],
        SequenceRng::new(rolls),
        BattleConfig::default().preview_mode(PreviewMode::Committed),
    );
    let mut io = ScriptedIo::with_inputs(["5"]);
    committed.play_round(&mut io).expect("round resolves");
    assert!(io.contains("[1] Drake plans: Fire Breath (AOE)"));
    assert!(io.contains("Drake uses Fire Breath! Deals 15 damage to all heroes."));
}

#[test]
fn party_wiped_by_status_damage_skips_monster_ticks() {
    let mut hero = Hero::new("Aria", HeroClass::Warrior);
    hero.add_status(StatusEffect::new(StatusKind::Poison, 1, 1_000));
    let mut monster = dragon("Drake");
    monster.add_status(StatusEffect::new(StatusKind::Burn, 3, 5));

    let log = EventLog::new();
    let mut battle = Battle::new(
        vec![hero],
        vec![monster],
        SequenceRng::constant(0.99),
        BattleConfig::default(),
    );
    battle.listen(log.clone());
    let mut io = ScriptedIo::with_inputs(["5"]);

    let outcome = battle.play_round(&mut io).expect("round resolves");

    assert_eq!(outcome, Some(BattleOutcome::Defeat));
    assert!(io.contains("Aria suffers 1000 from POISON"));
    assert!(!io.contains("Drake suffers"));
    assert_eq!(battle.monsters()[0].health().current(), 100);
    assert!(battle.monsters()[0].has_status(StatusKind::Burn));

    let events = log.events();
    assert!(events.contains(&BattleEvent::Defeated {
        name: "Aria".into()
    }));
    assert_eq!(
        events.last(),
        Some(&BattleEvent::BattleEnded {
            outcome: BattleOutcome::Defeat
        })
    );
}

#[test]
fn failing_listener_does_not_stop_the_battle() {
    let mut battle = Battle::new(
        vec![Hero::new("Aria", HeroClass::Warrior)],
        vec![dragon("Drake")],
        SequenceRng::constant(0.5),
        BattleConfig::default(),
    );
    battle.listen(|_: &BattleEvent| -> Result<(), ListenerError> {
        Err(ListenerError::new("broken", "always fails"))
    });
    let mut io = ScriptedIo::with_inputs(["1"]);

    battle.play_round(&mut io).expect("round resolves");

    assert_eq!(battle.monsters()[0].health().current(), 91);
    assert!(!battle.listener_failures().is_empty());
}

// ============================================================================
// Full battles
// ============================================================================

fn full_battle(seed: u64) -> (Battle, Result<BattleOutcome, BattleError>, ScriptedIo) {
    let heroes = vec![
        Hero::new("Aria", HeroClass::Warrior),
        Hero::new("Cass", HeroClass::Paladin),
    ];
    let config = BattleConfig::default();
    let mut rng = PcgRng::seed_from_u64(seed);
    let monsters = spawn_for_party(&heroes, 0, &config, &mut rng);

    let mut battle = Battle::new(heroes, monsters, rng, config);
    let mut io = attack_inputs();
    let result = battle.run(&mut io);
    (battle, result, io)
}

#[test]
fn same_seed_and_inputs_replay_identically() {
    let (first, first_result, first_io) = full_battle(42);
    let (second, second_result, second_io) = full_battle(42);

    assert_eq!(first_result, second_result);
    assert_eq!(first.round(), second.round());
    assert_eq!(first_io.transcript(), second_io.transcript());

    for (a, b) in first.heroes().iter().zip(second.heroes()) {
        assert_eq!(a.health(), b.health());
        assert_eq!(a.mana(), b.mana());
    }
    for (a, b) in first.monsters().iter().zip(second.monsters()) {
        assert_eq!(a.health(), b.health());
    }
}

#[test]
fn exactly_one_side_survives() {
    for seed in 0..16 {
        let (battle, result, io) = full_battle(seed);
        let outcome = result.expect("enough scripted input");

        let heroes_alive = battle.any_hero_alive();
        let monsters_alive = battle.any_monster_alive();
        assert_ne!(heroes_alive, monsters_alive, "seed {seed}");
        assert_eq!(outcome.heroes_won(), heroes_alive, "seed {seed}");
        assert_eq!(battle.phase(), BattlePhase::Terminal(outcome));
        assert!(io.contains("--- Battle End ---"));
        assert_eq!(io.clears(), 1);
    }
}

#[test]
fn health_and_mana_stay_within_bounds() {
    for seed in 0..8 {
        let (battle, _, _) = full_battle(seed);
        for hero in battle.heroes() {
            assert!(hero.health().current() <= hero.health().max());
            assert!(hero.mana().current() <= hero.mana().max());
        }
        for monster in battle.monsters() {
            assert!(monster.health().current() <= monster.health().max());
        }
    }
}
