//! Declarative skill loader.
//!
//! A skill file lists one entry per hero class. Class, target and status
//! names are matched case-insensitively; anything unknown is a load error.
//!
//! ```ron
//! (
//!     skills: [
//!         (
//!             class: "Sorcerer",
//!             name: "Chain Lightning",
//!             mana_cost: 40,
//!             dexterity_multiplier: 1.1,
//!             target: "AOE",
//!             chance: 0.8,
//!             status: Some((kind: "STUN", turns: 1, potency: 0)),
//!         ),
//!     ],
//! )
//! ```

use std::path::Path;

use legends_core::{DeclarativeSkill, HeroClass, SkillBook, StatusKind, StatusTemplate, TargetMode};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Skill catalog structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillCatalog {
    pub skills: Vec<SkillSpec>,
}

/// One declarative skill as written in a data file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillSpec {
    pub class: String,
    pub name: String,
    pub mana_cost: u32,
    #[serde(default)]
    pub strength_multiplier: f64,
    #[serde(default)]
    pub dexterity_multiplier: f64,
    #[serde(default = "default_target")]
    pub target: String,
    #[serde(default = "default_chance")]
    pub chance: f64,
    #[serde(default)]
    pub status: Option<StatusSpec>,
}

/// Status attached by a skill, as written in a data file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusSpec {
    pub kind: String,
    pub turns: u32,
    #[serde(default)]
    pub potency: u32,
}

fn default_target() -> String {
    "Single".to_owned()
}

fn default_chance() -> f64 {
    1.0
}

impl SkillSpec {
    /// Resolves names into a class and a ready-to-use skill.
    pub fn resolve(&self) -> LoadResult<(HeroClass, DeclarativeSkill)> {
        let class: HeroClass = self.class.parse().map_err(|_| {
            anyhow::anyhow!("Unknown hero class '{}' for skill '{}'", self.class, self.name)
        })?;
        let target: TargetMode = self.target.parse().map_err(|_| {
            anyhow::anyhow!("Unknown target '{}' for skill '{}'", self.target, self.name)
        })?;
        if !(0.0..=1.0).contains(&self.chance) {
            anyhow::bail!(
                "Skill '{}' has chance {} outside [0, 1]",
                self.name,
                self.chance
            );
        }
        let status = self
            .status
            .as_ref()
            .map(|spec| {
                let kind: StatusKind = spec.kind.parse().map_err(|_| {
                    anyhow::anyhow!("Unknown status '{}' for skill '{}'", spec.kind, self.name)
                })?;
                Ok::<_, anyhow::Error>(StatusTemplate::new(kind, spec.turns, spec.potency))
            })
            .transpose()?;

        let skill = DeclarativeSkill {
            name: self.name.clone(),
            mana_cost: self.mana_cost,
            strength_multiplier: self.strength_multiplier,
            dexterity_multiplier: self.dexterity_multiplier,
            target,
            chance: self.chance,
            status,
        };
        Ok((class, skill))
    }
}

/// Loader for the skill book from RON files.
pub struct SkillLoader;

impl SkillLoader {
    /// Load a skill book from a RON file.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the RON file containing a SkillCatalog
    ///
    /// Classes without an entry keep their formula skill.
    pub fn load(path: &Path) -> LoadResult<SkillBook> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    /// Parse a skill book from RON text.
    pub fn parse(content: &str) -> LoadResult<SkillBook> {
        let catalog: SkillCatalog = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse skill catalog RON: {}", e))?;

        let mut book = SkillBook::empty();
        for spec in &catalog.skills {
            let (class, skill) = spec.resolve()?;
            if book.insert(class, skill).is_some() {
                tracing::warn!(%class, skill = %spec.name, "duplicate skill entry replaced");
            }
        }
        tracing::debug!(skills = book.len(), "skill book loaded");
        Ok(book)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use legends_core::{Skill, TargetMode};
    use std::io::Write;

    const CATALOG: &str = r#"(
        skills: [
            (
                class: "Warrior",
                name: "Cleave",
                mana_cost: 25,
                strength_multiplier: 0.9,
                target: "AOE",
            ),
            (
                class: "sorcerer",
                name: "Venom Bolt",
                mana_cost: 15,
                dexterity_multiplier: 1.2,
                chance: 0.75,
                status: Some((kind: "POISON", turns: 3, potency: 4)),
            ),
        ],
    )"#;

    #[test]
    fn parses_entries_with_defaults() {
        let book = SkillLoader::parse(CATALOG).unwrap();
        assert_eq!(book.len(), 2);

        let Some(Skill::Declarative(cleave)) = book.get(HeroClass::Warrior) else {
            panic!("warrior skill missing");
        };
        assert_eq!(cleave.target, TargetMode::Area);
        assert_eq!(cleave.chance, 1.0);
        assert_eq!(cleave.dexterity_multiplier, 0.0);
        assert_eq!(cleave.status, None);

        let Some(Skill::Declarative(bolt)) = book.get(HeroClass::Sorcerer) else {
            panic!("sorcerer skill missing");
        };
        assert_eq!(bolt.target, TargetMode::Single);
        assert_eq!(
            bolt.status,
            Some(StatusTemplate::new(StatusKind::Poison, 3, 4))
        );

        assert!(book.get(HeroClass::Paladin).is_none());
    }

    #[test]
    fn unknown_status_is_an_error() {
        let content = r#"(skills: [(
            class: "Paladin",
            name: "Curse",
            mana_cost: 10,
            status: Some((kind: "FREEZE", turns: 1)),
        )])"#;
        let error = SkillLoader::parse(content).unwrap_err();
        assert!(error.to_string().contains("Unknown status 'FREEZE'"));
    }

    #[test]
    fn unknown_class_and_bad_chance_are_errors() {
        let unknown_class = r#"(skills: [(class: "Bard", name: "Song", mana_cost: 5)])"#;
        assert!(SkillLoader::parse(unknown_class).is_err());

        let bad_chance =
            r#"(skills: [(class: "Warrior", name: "Gamble", mana_cost: 5, chance: 1.5)])"#;
        assert!(SkillLoader::parse(bad_chance).is_err());
    }

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(CATALOG.as_bytes()).unwrap();

        let book = SkillLoader::load(file.path()).unwrap();
        assert_eq!(book.len(), 2);
    }
}
