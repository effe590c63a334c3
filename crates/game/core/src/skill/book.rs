//! Archetype to skill table.

use std::collections::BTreeMap;

use crate::hero::{Hero, HeroClass};
use crate::status::StatusKind;

use super::{DeclarativeSkill, FormulaSkill, Skill, StatusTemplate, TargetMode};

/// Explicit mapping from hero archetype to skill, resolved when a party is
/// assembled.
///
/// Archetypes missing from the book fall back to their [`FormulaSkill`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SkillBook {
    skills: BTreeMap<HeroClass, Skill>,
}

impl SkillBook {
    pub fn empty() -> Self {
        Self::default()
    }

    /// The built-in declarative skills.
    pub fn standard() -> Self {
        let mut book = Self::empty();
        book.insert(
            HeroClass::Warrior,
            DeclarativeSkill {
                name: "Power Strike".into(),
                mana_cost: 20,
                strength_multiplier: 1.2,
                dexterity_multiplier: 0.0,
                target: TargetMode::Single,
                chance: 1.0,
                status: Some(StatusTemplate::new(StatusKind::ArmorPenetrate, 2, 2)),
            },
        );
        book.insert(
            HeroClass::Sorcerer,
            DeclarativeSkill {
                name: "Arcane Blast".into(),
                mana_cost: 30,
                strength_multiplier: 0.5,
                dexterity_multiplier: 1.5,
                target: TargetMode::Single,
                chance: 1.0,
                status: Some(StatusTemplate::new(StatusKind::Burn, 3, 3)),
            },
        );
        book.insert(
            HeroClass::Paladin,
            DeclarativeSkill {
                name: "Holy Smite".into(),
                mana_cost: 25,
                strength_multiplier: 1.0,
                dexterity_multiplier: 0.5,
                target: TargetMode::Single,
                chance: 1.0,
                status: Some(StatusTemplate::new(StatusKind::Slow, 1, 1)),
            },
        );
        book
    }

    /// Registers `skill` for `class`, returning the entry it replaces.
    pub fn insert(&mut self, class: HeroClass, skill: impl Into<Skill>) -> Option<Skill> {
        self.skills.insert(class, skill.into())
    }

    pub fn get(&self, class: HeroClass) -> Option<&Skill> {
        self.skills.get(&class)
    }

    /// The skill `class` uses: the book entry, or the archetype formula.
    pub fn resolve(&self, class: HeroClass) -> Skill {
        self.get(class)
            .cloned()
            .unwrap_or(Skill::Formula(FormulaSkill::for_class(class)))
    }

    /// Hands `hero` the skill its archetype resolves to.
    pub fn equip(&self, hero: &mut Hero) {
        hero.set_skill(self.resolve(hero.class()));
    }

    pub fn len(&self) -> usize {
        self.skills.len()
    }

    pub fn is_empty(&self) -> bool {
        self.skills.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (HeroClass, &Skill)> + '_ {
        self.skills.iter().map(|(class, skill)| (*class, skill))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_book_covers_every_archetype() {
        let book = SkillBook::standard();
        assert_eq!(book.len(), 3);
        let warrior = book.resolve(HeroClass::Warrior);
        assert_eq!(warrior.name(), "Power Strike");
        assert_eq!(warrior.mana_cost(), 20);
        assert!(matches!(warrior, Skill::Declarative(_)));
    }

    #[test]
    fn missing_archetype_falls_back_to_formula() {
        let book = SkillBook::empty();
        assert_eq!(
            book.resolve(HeroClass::Sorcerer),
            Skill::Formula(FormulaSkill::ArcaneBlast)
        );
    }

    #[test]
    fn equip_replaces_hero_skill() {
        let mut hero = Hero::new("Cale", HeroClass::Paladin);
        assert_eq!(hero.skill(), &Skill::Formula(FormulaSkill::HolySmite));
        SkillBook::standard().equip(&mut hero);
        assert!(matches!(hero.skill(), Skill::Declarative(s) if s.mana_cost == 25));
    }
}
