//! Skill resolution.
//!
//! Two interchangeable representations share one entry point:
//!
//! - [`FormulaSkill`]: fixed per-archetype formula, always single target
//! - [`DeclarativeSkill`]: data-described formula with a target mode, a
//!   trigger chance and an optional status template
//!
//! [`Skill::cast`] performs the whole resolution, including the dodge rolls.
//! Draw order is part of the contract: a single-target cast rolls the
//! target's dodge and then, for chance-gated skills, the trigger; an area
//! cast repeats dodge-then-trigger for each living target in roster order.

mod book;
mod declarative;
mod formula;

pub use book::SkillBook;
pub use declarative::{DeclarativeSkill, StatusTemplate, TargetMode};
pub use formula::FormulaSkill;

use crate::combat;
use crate::combatant::Combatant;
use crate::error::{ErrorSeverity, GameError};
use crate::hero::Hero;
use crate::io::BattleIo;
use crate::monster::Monster;
use crate::rng::RandomSource;
use crate::status::StatusEffect;

/// Failures that stop a skill before anything happens.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SkillError {
    #[error("not enough mana: {required} required, {available} available")]
    InsufficientMana { required: u32, available: u32 },

    #[error("no living target")]
    NoTarget,
}

impl GameError for SkillError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Recoverable
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::InsufficientMana { .. } => "SKILL_INSUFFICIENT_MANA",
            Self::NoTarget => "SKILL_NO_TARGET",
        }
    }
}

/// What happened to one target of a cast.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HitOutcome {
    /// The target dodged: no damage, no status.
    Dodged,
    /// The trigger roll failed: no damage, no status.
    Fizzled,
    Landed {
        /// Computed damage before the target's mitigation.
        damage: u32,
        /// Health the target actually lost.
        health_lost: u32,
        status: Option<StatusEffect>,
    },
}

/// One target of a cast, by monster roster index.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SkillHit {
    pub target: usize,
    pub outcome: HitOutcome,
}

/// Result of a cast.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SkillOutcome {
    pub mana_spent: u32,
    /// Sum of computed damage across every landed hit.
    pub total_damage: u32,
    /// Health restored to the caster.
    pub healed: u32,
    pub hits: Vec<SkillHit>,
}

impl SkillOutcome {
    fn spent(mana_spent: u32) -> Self {
        Self {
            mana_spent,
            ..Self::default()
        }
    }

    fn record(&mut self, target: usize, outcome: HitOutcome) {
        if let HitOutcome::Landed { damage, .. } = outcome {
            self.total_damage += damage;
        }
        self.hits.push(SkillHit { target, outcome });
    }
}

/// A hero's special ability.
#[derive(Clone, Debug, PartialEq)]
pub enum Skill {
    Formula(FormulaSkill),
    Declarative(DeclarativeSkill),
}

impl Skill {
    pub fn name(&self) -> &str {
        match self {
            Self::Formula(skill) => skill.name(),
            Self::Declarative(skill) => &skill.name,
        }
    }

    pub fn mana_cost(&self) -> u32 {
        match self {
            Self::Formula(skill) => skill.mana_cost(),
            Self::Declarative(skill) => skill.mana_cost,
        }
    }

    pub fn target_mode(&self) -> TargetMode {
        match self {
            Self::Formula(_) => TargetMode::Single,
            Self::Declarative(skill) => skill.target,
        }
    }

    pub fn is_area(&self) -> bool {
        self.target_mode() == TargetMode::Area
    }

    /// Resolves the skill.
    ///
    /// Fails without side effects or draws if the caster lacks mana, or if a
    /// single-target cast points at a dead or missing monster. `target` is
    /// ignored for area skills. A dodged single-target cast spends no mana.
    pub fn cast(
        &self,
        caster: &mut Hero,
        monsters: &mut [Monster],
        target: usize,
        rng: &mut (impl RandomSource + ?Sized),
        io: &mut (impl BattleIo + ?Sized),
    ) -> Result<SkillOutcome, SkillError> {
        let required = self.mana_cost();
        let available = caster.mana().current();
        if available < required {
            io.println(&format!(
                "{} does not have enough MP to use {}.",
                caster.name(),
                self.name()
            ));
            return Err(SkillError::InsufficientMana {
                required,
                available,
            });
        }

        if let Self::Declarative(skill) = self {
            if skill.target == TargetMode::Area {
                if !monsters.iter().any(|m| m.is_alive()) {
                    return Err(SkillError::NoTarget);
                }
                let outcome = skill.apply_area(caster, monsters, rng, io)?;
                io.println(&format!(
                    "{} used {} (AOE) total damage: {}",
                    caster.name(),
                    skill.name,
                    outcome.total_damage
                ));
                return Ok(outcome);
            }
        }

        let monster = monsters
            .get_mut(target)
            .filter(|m| m.is_alive())
            .ok_or(SkillError::NoTarget)?;
        if combat::roll_dodge(monster.dodge_chance(), rng) {
            io.println(&format!(
                "{} dodged {}'s skill!",
                monster.name(),
                caster.name()
            ));
            let mut outcome = SkillOutcome::spent(0);
            outcome.record(target, HitOutcome::Dodged);
            return Ok(outcome);
        }

        let mut outcome = match self {
            Self::Formula(skill) => skill.apply(caster, monster, io)?,
            Self::Declarative(skill) => skill.apply_single(caster, monster, rng, io)?,
        };
        for hit in &mut outcome.hits {
            hit.target = target;
        }
        io.println(&format!(
            "    {} HP={}",
            monster.name(),
            monster.health()
        ));
        Ok(outcome)
    }
}

impl From<FormulaSkill> for Skill {
    fn from(skill: FormulaSkill) -> Self {
        Self::Formula(skill)
    }
}

impl From<DeclarativeSkill> for Skill {
    fn from(skill: DeclarativeSkill) -> Self {
        Self::Declarative(skill)
    }
}
