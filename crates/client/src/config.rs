//! Client configuration loaded from the environment.
use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use legends_core::{Difficulty, HeroClass};

/// Largest party the client will field.
pub const MAX_PARTY_SIZE: usize = 3;

/// One party slot: archetype and display name.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PartyMember {
    pub class: HeroClass,
    pub name: String,
}

/// Configuration for one terminal battle session.
#[derive(Clone, Debug)]
pub struct ClientConfig {
    /// Seed for the battle's random stream. Drawn from entropy when unset.
    pub seed: Option<u64>,
    /// Overrides the difficulty from `config.toml`.
    pub difficulty: Option<Difficulty>,
    /// Directory with `skills.ron` and `config.toml`. Built-in content when unset.
    pub data_dir: Option<PathBuf>,
    pub party: Vec<PartyMember>,
    /// Signed bias added to the party's best level when spawning monsters.
    pub monster_bias: i32,
    pub session_id: Option<String>,
    pub log_dir: Option<PathBuf>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            seed: None,
            difficulty: None,
            data_dir: None,
            party: vec![PartyMember {
                class: HeroClass::Warrior,
                name: "Hero".to_owned(),
            }],
            monster_bias: 0,
            session_id: None,
            log_dir: None,
        }
    }
}

impl ClientConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `LEGENDS_SEED` - Battle seed (default: random)
    /// - `LEGENDS_DIFFICULTY` - `EASY`, `NORMAL`, `HARD`, `INSTANT_DEFEAT` or `TEST`
    /// - `LEGENDS_DATA_DIR` - Directory with `skills.ron` / `config.toml`
    /// - `LEGENDS_PARTY` - Comma-separated `class:name` list, 1-3 heroes (default: `warrior:Hero`)
    /// - `LEGENDS_MONSTER_BIAS` - Signed monster level bias (default: 0)
    /// - `LEGENDS_SESSION_ID` - Session identifier for log files (default: timestamp)
    /// - `LEGENDS_LOG_DIR` - Log directory (default: platform cache dir)
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        config.seed = read_env::<u64>("LEGENDS_SEED");

        if let Ok(raw) = env::var("LEGENDS_DIFFICULTY") {
            let difficulty = raw
                .trim()
                .parse::<Difficulty>()
                .with_context(|| format!("Invalid LEGENDS_DIFFICULTY '{raw}'"))?;
            config.difficulty = Some(difficulty);
        }

        config.data_dir = env::var("LEGENDS_DATA_DIR").ok().map(PathBuf::from);

        if let Ok(raw) = env::var("LEGENDS_PARTY") {
            config.party = parse_party(&raw).context("Invalid LEGENDS_PARTY")?;
        }

        if let Some(bias) = read_env::<i32>("LEGENDS_MONSTER_BIAS") {
            config.monster_bias = bias;
        }

        config.session_id = env::var("LEGENDS_SESSION_ID").ok();
        config.log_dir = env::var("LEGENDS_LOG_DIR").ok().map(PathBuf::from);

        Ok(config)
    }
}

/// Parses `class:name` entries; a bare class uses the class name as hero name.
pub fn parse_party(raw: &str) -> Result<Vec<PartyMember>> {
    let mut party = Vec::new();
    for entry in raw.split(',').map(str::trim).filter(|e| !e.is_empty()) {
        let (class, name) = match entry.split_once(':') {
            Some((class, name)) => (class.trim(), name.trim()),
            None => (entry, ""),
        };
        let class: HeroClass = class
            .parse()
            .with_context(|| format!("Unknown hero class '{class}'"))?;
        let name = if name.is_empty() {
            class.to_string()
        } else {
            name.to_owned()
        };
        party.push(PartyMember { class, name });
    }

    if party.is_empty() {
        bail!("party must contain at least one hero");
    }
    if party.len() > MAX_PARTY_SIZE {
        bail!(
            "party has {} heroes, at most {} are allowed",
            party.len(),
            MAX_PARTY_SIZE
        );
    }
    Ok(party)
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.trim().parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_named_and_bare_entries() {
        let party = parse_party("warrior:Aria, Sorcerer ,paladin: Cass").unwrap();
        assert_eq!(
            party,
            vec![
                PartyMember {
                    class: HeroClass::Warrior,
                    name: "Aria".into()
                },
                PartyMember {
                    class: HeroClass::Sorcerer,
                    name: "Sorcerer".into()
                },
                PartyMember {
                    class: HeroClass::Paladin,
                    name: "Cass".into()
                },
            ]
        );
    }

    #[test]
    fn rejects_bad_parties() {
        assert!(parse_party("").is_err());
        assert!(parse_party("bard:Lute").is_err());
        assert!(parse_party("warrior,warrior,warrior,warrior").is_err());
    }

    #[test]
    fn default_party_is_one_warrior() {
        let config = ClientConfig::default();
        assert_eq!(config.party.len(), 1);
        assert_eq!(config.party[0].class, HeroClass::Warrior);
        assert_eq!(config.party[0].name, "Hero");
    }
}
