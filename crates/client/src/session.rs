//! One battle session: content, party, encounter, battle, rewards.

use anyhow::{Context, Result};
use legends_content::ContentFactory;
use legends_core::{
    Battle, BattleConfig, BattleIo, BattleOutcome, EventLog, Hero, PcgRng, SkillBook,
    StandardRewards, spawn_for_party,
};

use crate::config::ClientConfig;

/// Battle content resolved before the first round.
struct Content {
    battle: BattleConfig,
    skills: SkillBook,
}

fn load_content(config: &ClientConfig) -> Result<Content> {
    let (mut battle, skills) = match &config.data_dir {
        Some(dir) => {
            let factory = ContentFactory::new(dir);
            let battle = factory
                .load_config()
                .with_context(|| format!("Failed to load battle config from {}", dir.display()))?;
            let skills = factory
                .load_skills()
                .with_context(|| format!("Failed to load skills from {}", dir.display()))?;
            (battle, skills)
        }
        None => (BattleConfig::default(), SkillBook::standard()),
    };

    if let Some(difficulty) = config.difficulty {
        battle.difficulty = difficulty;
    }
    Ok(Content { battle, skills })
}

/// Runs a single battle and, on victory, hands out rewards.
///
/// Defeat is a normal outcome. Errors mean the battle could not be played
/// to the end (bad content or closed input).
pub fn run(config: &ClientConfig, io: &mut dyn BattleIo) -> Result<BattleOutcome> {
    let content = load_content(config)?;
    let seed = config.seed.unwrap_or_else(rand::random);
    tracing::info!(
        seed,
        difficulty = %content.battle.difficulty,
        party = config.party.len(),
        "starting session"
    );

    let heroes: Vec<Hero> = config
        .party
        .iter()
        .map(|member| {
            let mut hero = Hero::new(member.name.clone(), member.class);
            content.skills.equip(&mut hero);
            hero
        })
        .collect();

    let mut rng = PcgRng::seed_from_u64(seed);
    let monsters = spawn_for_party(&heroes, config.monster_bias, &content.battle, &mut rng);

    let log = EventLog::new();
    let mut battle = Battle::new(heroes, monsters, rng, content.battle);
    battle.listen(log.clone());

    let outcome = battle.run(io).context("Battle aborted")?;

    match outcome {
        BattleOutcome::Victory => {
            io.println("Victory! All monsters are defeated.");
            let loot = battle.award(&mut StandardRewards, io);
            tracing::info!(items = loot.len(), "rewards awarded");
        }
        BattleOutcome::Defeat => {
            io.println("Defeat. The party has fallen.");
        }
    }

    tracing::info!(
        ?outcome,
        rounds = battle.round(),
        events = log.len(),
        listener_failures = battle.listener_failures().len(),
        "session finished"
    );
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use legends_core::{Difficulty, ScriptedIo};

    fn scripted_attacks() -> ScriptedIo {
        ScriptedIo::with_inputs(std::iter::repeat_n("1", 4_000))
    }

    #[test]
    fn seeded_session_plays_to_an_outcome() {
        let config = ClientConfig {
            seed: Some(7),
            ..ClientConfig::default()
        };
        let mut io = scripted_attacks();

        let outcome = run(&config, &mut io).unwrap();

        assert!(io.contains("--- Battle End ---"));
        match outcome {
            BattleOutcome::Victory => assert!(io.contains("Battle rewards:")),
            BattleOutcome::Defeat => assert!(io.contains("Defeat. The party has fallen.")),
        }
    }

    #[test]
    fn same_seed_replays_the_same_transcript() {
        let config = ClientConfig {
            seed: Some(11),
            ..ClientConfig::default()
        };
        let mut first = scripted_attacks();
        let mut second = scripted_attacks();

        let a = run(&config, &mut first).unwrap();
        let b = run(&config, &mut second).unwrap();

        assert_eq!(a, b);
        assert_eq!(first.transcript(), second.transcript());
    }

    #[test]
    fn closed_input_is_an_error() {
        let config = ClientConfig {
            seed: Some(1),
            ..ClientConfig::default()
        };
        let mut io = ScriptedIo::new();

        assert!(run(&config, &mut io).is_err());
    }

    #[test]
    fn data_directory_and_difficulty_override_are_applied() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(ContentFactory::CONFIG_FILE),
            "difficulty = \"EASY\"\nregen_factor = 1.5\n",
        )
        .unwrap();

        let config = ClientConfig {
            seed: Some(3),
            data_dir: Some(dir.path().to_path_buf()),
            difficulty: Some(Difficulty::Hard),
            ..ClientConfig::default()
        };
        let content = load_content(&config).unwrap();

        assert_eq!(content.battle.difficulty, Difficulty::Hard);
        assert_eq!(content.battle.regen_factor, 1.5);
        assert_eq!(content.skills.len(), 3);
    }
}
