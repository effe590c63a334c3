//! Data-described skills.

use crate::combat;
use crate::combatant::Combatant;
use crate::hero::Hero;
use crate::io::BattleIo;
use crate::monster::Monster;
use crate::rng::RandomSource;
use crate::status::{StatusEffect, StatusKind};

use super::{HitOutcome, SkillError, SkillOutcome};

/// Who a declarative skill hits.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display, strum::EnumString)]
#[strum(ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TargetMode {
    /// One chosen monster.
    #[default]
    Single,
    /// Every living monster, each resolved independently.
    #[strum(to_string = "Area", serialize = "AOE")]
    #[cfg_attr(feature = "serde", serde(alias = "AOE", alias = "Aoe"))]
    Area,
}

/// Status attached by a declarative skill on every landed hit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusTemplate {
    pub kind: StatusKind,
    pub turns: u32,
    pub potency: u32,
}

impl StatusTemplate {
    pub const fn new(kind: StatusKind, turns: u32, potency: u32) -> Self {
        Self {
            kind,
            turns,
            potency,
        }
    }

    pub fn instantiate(&self) -> StatusEffect {
        StatusEffect::new(self.kind, self.turns, self.potency)
    }
}

/// A skill whose formula and effects come from data.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DeclarativeSkill {
    pub name: String,
    pub mana_cost: u32,
    pub strength_multiplier: f64,
    pub dexterity_multiplier: f64,
    pub target: TargetMode,
    /// Trigger chance in `[0, 1]`. Below 1.0 every hit draws a trigger roll.
    pub chance: f64,
    pub status: Option<StatusTemplate>,
}

impl DeclarativeSkill {
    /// Damage against one target: `spell(max(1, round(str × sm + dex × dm)))`.
    pub fn damage(&self, caster: &Hero) -> u32 {
        let base = combat::weighted_base(
            caster.strength(),
            self.strength_multiplier,
            caster.dexterity(),
            self.dexterity_multiplier,
        );
        caster.spell_damage(base.max(1))
    }

    /// Spends mana and resolves against one target whose dodge already failed.
    pub(super) fn apply_single(
        &self,
        caster: &mut Hero,
        target: &mut Monster,
        rng: &mut (impl RandomSource + ?Sized),
        io: &mut (impl BattleIo + ?Sized),
    ) -> Result<SkillOutcome, SkillError> {
        caster.spend_mana(self.mana_cost)?;
        let mut outcome = SkillOutcome::spent(self.mana_cost);
        let hit = self.resolve_hit(caster, target, rng, io);
        outcome.record(0, hit);
        Ok(outcome)
    }

    /// Spends mana once, then resolves each living monster independently.
    pub(super) fn apply_area(
        &self,
        caster: &mut Hero,
        targets: &mut [Monster],
        rng: &mut (impl RandomSource + ?Sized),
        io: &mut (impl BattleIo + ?Sized),
    ) -> Result<SkillOutcome, SkillError> {
        caster.spend_mana(self.mana_cost)?;
        let mut outcome = SkillOutcome::spent(self.mana_cost);

        for (index, target) in targets.iter_mut().enumerate() {
            if !target.is_alive() {
                continue;
            }
            if combat::roll_dodge(target.dodge_chance(), rng) {
                io.println(&format!(
                    "{} dodged {}'s {}!",
                    target.name(),
                    caster.name(),
                    self.name
                ));
                outcome.record(index, HitOutcome::Dodged);
                continue;
            }
            let hit = self.resolve_hit(caster, target, rng, io);
            outcome.record(index, hit);
        }
        Ok(outcome)
    }

    fn resolve_hit(
        &self,
        caster: &Hero,
        target: &mut Monster,
        rng: &mut (impl RandomSource + ?Sized),
        io: &mut (impl BattleIo + ?Sized),
    ) -> HitOutcome {
        let damage = self.damage(caster);
        if !combat::roll_trigger(self.chance, rng) {
            io.println(&format!(
                "{} used {} but it failed to trigger on {}.",
                caster.name(),
                self.name,
                target.name()
            ));
            return HitOutcome::Fizzled;
        }

        let mut health_lost = 0;
        if damage > 0 {
            health_lost = target.take_damage(damage);
            io.println(&format!(
                "{} used {} on {} for {} damage.",
                caster.name(),
                self.name,
                target.name(),
                damage
            ));
        }

        let status = self.status.map(|template| {
            let effect = template.instantiate();
            target.add_status(effect);
            io.println(&format!(
                "{} applied {} to {}",
                caster.name(),
                effect.kind(),
                target.name()
            ));
            effect
        });

        HitOutcome::Landed {
            damage,
            health_lost,
            status,
        }
    }
}
