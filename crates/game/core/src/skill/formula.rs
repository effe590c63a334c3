//! Fixed per-archetype skills.

use crate::combat;
use crate::combatant::Combatant;
use crate::hero::{Hero, HeroClass};
use crate::io::BattleIo;
use crate::monster::Monster;
use crate::status::{StatusEffect, StatusKind};

use super::{HitOutcome, SkillError, SkillOutcome};

/// Skill bound to one hero archetype's stat formula.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FormulaSkill {
    /// Warrior: `round((str + weapon) × 1.5)`, armor penetration on the target.
    PowerStrike,
    /// Sorcerer: `round(dex × 1.5 + str × 0.5)`, burn on the target.
    ArcaneBlast,
    /// Paladin: `round(str × 1.2 + dex × 1.0)`, heals the caster, slows the target.
    HolySmite,
}

impl FormulaSkill {
    pub const fn for_class(class: HeroClass) -> Self {
        match class {
            HeroClass::Warrior => Self::PowerStrike,
            HeroClass::Sorcerer => Self::ArcaneBlast,
            HeroClass::Paladin => Self::HolySmite,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::PowerStrike => "Power Strike",
            Self::ArcaneBlast => "Arcane Blast",
            Self::HolySmite => "Holy Smite",
        }
    }

    pub const fn mana_cost(self) -> u32 {
        match self {
            Self::PowerStrike => 20,
            Self::ArcaneBlast => 30,
            Self::HolySmite => 25,
        }
    }

    /// Base damage before the dexterity bonus.
    pub fn base_damage(self, caster: &Hero) -> u32 {
        match self {
            Self::PowerStrike => {
                let weapon = caster.weapon().map_or(0, |w| w.damage);
                (f64::from(caster.strength() + weapon) * 1.5).round() as u32
            }
            Self::ArcaneBlast => {
                combat::weighted_base(caster.strength(), 0.5, caster.dexterity(), 1.5)
            }
            Self::HolySmite => {
                combat::weighted_base(caster.strength(), 1.2, caster.dexterity(), 1.0)
            }
        }
    }

    /// Status attached to the target after a hit dealing `damage`.
    fn status(self, caster: &Hero, damage: u32) -> StatusEffect {
        match self {
            Self::PowerStrike => {
                StatusEffect::new(StatusKind::ArmorPenetrate, 2, (caster.level() * 2).max(1))
            }
            Self::ArcaneBlast => StatusEffect::new(StatusKind::Burn, 3, (damage / 5).max(1)),
            Self::HolySmite => StatusEffect::new(StatusKind::Slow, 1, 1),
        }
    }

    /// Spends mana and hits `target`. The dodge roll has already happened.
    pub(super) fn apply(
        self,
        caster: &mut Hero,
        target: &mut Monster,
        io: &mut (impl BattleIo + ?Sized),
    ) -> Result<SkillOutcome, SkillError> {
        caster.spend_mana(self.mana_cost())?;
        let mut outcome = SkillOutcome::spent(self.mana_cost());

        let damage = caster.spell_damage(self.base_damage(caster).max(1));
        let health_lost = target.take_damage(damage);
        io.println(&format!(
            "{} used {} on {} for {} damage.",
            caster.name(),
            self.name(),
            target.name(),
            damage
        ));

        if self == Self::HolySmite {
            let heal = caster.health().max() / 5;
            outcome.healed = caster.heal(heal);
            io.println(&format!(
                "{} is healed for {} HP by holy energy.",
                caster.name(),
                heal
            ));
        }

        let status = self.status(caster, damage);
        target.add_status(status);
        outcome.record(
            0,
            HitOutcome::Landed {
                damage,
                health_lost,
                status: Some(status),
            },
        );
        Ok(outcome)
    }
}
