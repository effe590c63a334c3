//! Player-controlled combatants.

use crate::combat;
use crate::combatant::{self, Combatant, Meter};
use crate::config::BattleConfig;
use crate::io::BattleIo;
use crate::item::{Armor, Consumable, Consumables, ItemEffect, ItemError, Weapon};
use crate::monster::Monster;
use crate::skill::{FormulaSkill, Skill, SkillError};
use crate::status::{StatusEffect, StatusEffects, StatusKind, StatusTick};

/// Hero archetypes.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    strum::Display,
    strum::EnumString,
    strum::IntoStaticStr,
    strum::EnumIter,
)]
#[strum(ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum HeroClass {
    Warrior,
    Sorcerer,
    Paladin,
}

/// Level-one attributes of an archetype.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StartingStats {
    pub mana: u32,
    pub strength: u32,
    pub dexterity: u32,
    pub agility: u32,
    pub gold: u32,
    pub health_potions: u32,
    pub mana_potions: u32,
}

/// Attribute selector used for archetype growth.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Attribute {
    Strength,
    Dexterity,
    Agility,
}

impl HeroClass {
    pub const fn starting_stats(self) -> StartingStats {
        let (mana, strength, dexterity, agility) = match self {
            Self::Warrior => (80, 22, 10, 16),
            Self::Sorcerer => (120, 12, 22, 18),
            Self::Paladin => (100, 20, 18, 12),
        };
        StartingStats {
            mana,
            strength,
            dexterity,
            agility,
            gold: 300,
            health_potions: 3,
            mana_potions: 1,
        }
    }

    /// The two attributes that grow faster on level up.
    pub const fn favored(self) -> [Attribute; 2] {
        match self {
            Self::Warrior => [Attribute::Strength, Attribute::Agility],
            Self::Sorcerer => [Attribute::Dexterity, Attribute::Agility],
            Self::Paladin => [Attribute::Strength, Attribute::Dexterity],
        }
    }
}

/// A hero taking part in battles.
#[derive(Clone, Debug)]
pub struct Hero {
    name: String,
    class: HeroClass,
    level: u32,
    exp: u32,
    health: Meter,
    mana: Meter,
    strength: u32,
    dexterity: u32,
    agility: u32,
    gold: u32,
    weapon: Option<Weapon>,
    armor: Option<Armor>,
    health_potions: u32,
    mana_potions: u32,
    consumables: Consumables,
    statuses: StatusEffects,
    skill: Skill,
}

impl Hero {
    /// Creates a level-one hero with the archetype's starting stats and its
    /// formula skill.
    pub fn new(name: impl Into<String>, class: HeroClass) -> Self {
        let stats = class.starting_stats();
        Self {
            name: name.into(),
            class,
            level: 1,
            exp: 0,
            health: Meter::full(BattleConfig::HEALTH_PER_LEVEL),
            mana: Meter::full(stats.mana),
            strength: stats.strength,
            dexterity: stats.dexterity,
            agility: stats.agility,
            gold: stats.gold,
            weapon: None,
            armor: None,
            health_potions: stats.health_potions,
            mana_potions: stats.mana_potions,
            consumables: Consumables::new(),
            statuses: StatusEffects::empty(),
            skill: Skill::Formula(FormulaSkill::for_class(class)),
        }
    }

    pub fn with_skill(mut self, skill: Skill) -> Self {
        self.skill = skill;
        self
    }

    pub fn set_skill(&mut self, skill: Skill) {
        self.skill = skill;
    }

    pub fn class(&self) -> HeroClass {
        self.class
    }

    pub fn skill(&self) -> &Skill {
        &self.skill
    }

    pub fn exp(&self) -> u32 {
        self.exp
    }

    pub fn mana(&self) -> Meter {
        self.mana
    }

    pub fn strength(&self) -> u32 {
        self.strength
    }

    pub fn dexterity(&self) -> u32 {
        self.dexterity
    }

    pub fn agility(&self) -> u32 {
        self.agility
    }

    pub fn gold(&self) -> u32 {
        self.gold
    }

    pub fn weapon(&self) -> Option<&Weapon> {
        self.weapon.as_ref()
    }

    pub fn armor(&self) -> Option<&Armor> {
        self.armor.as_ref()
    }

    /// Equips a weapon, returning the one it replaces.
    pub fn equip_weapon(&mut self, weapon: Weapon) -> Option<Weapon> {
        self.weapon.replace(weapon)
    }

    /// Equips armor, returning the piece it replaces.
    pub fn equip_armor(&mut self, armor: Armor) -> Option<Armor> {
        self.armor.replace(armor)
    }

    // ========================================================================
    // Combat
    // ========================================================================

    /// Basic-attack damage before the target's mitigation.
    pub fn attack_damage(&self) -> u32 {
        combat::attack_damage(self.strength, self.level, self.weapon.as_ref().map(|w| w.damage))
    }

    /// Applies this hero's dexterity bonus to a skill's base damage.
    pub fn spell_damage(&self, base: u32) -> u32 {
        combat::spell_damage(base, self.dexterity)
    }

    /// Deducts `cost` mana, or fails without deducting anything.
    pub fn spend_mana(&mut self, cost: u32) -> Result<(), SkillError> {
        let available = self.mana.current();
        if available < cost {
            return Err(SkillError::InsufficientMana {
                required: cost,
                available,
            });
        }
        self.mana.drain(cost);
        Ok(())
    }

    /// Restores health, returning the amount actually healed.
    pub fn heal(&mut self, amount: u32) -> u32 {
        self.health.restore(amount)
    }

    /// Restores mana, returning the amount actually restored.
    pub fn restore_mana(&mut self, amount: u32) -> u32 {
        self.mana.restore(amount)
    }

    /// Removes every effect of `kind`. Returns how many were removed.
    pub fn remove_status(&mut self, kind: StatusKind) -> usize {
        self.statuses.remove(kind)
    }

    /// End-of-round regeneration of both pools. Dead heroes do not regenerate.
    pub fn regenerate(&mut self, factor: f64) {
        if !self.is_alive() {
            return;
        }
        self.health.regenerate(factor);
        self.mana.regenerate(factor);
    }

    // ========================================================================
    // Potions and consumables
    // ========================================================================

    pub fn health_potions(&self) -> u32 {
        self.health_potions
    }

    pub fn mana_potions(&self) -> u32 {
        self.mana_potions
    }

    pub fn add_health_potion(&mut self) {
        self.health_potions += 1;
    }

    pub fn add_mana_potion(&mut self) {
        self.mana_potions += 1;
    }

    /// Health restored by one health potion: half of maximum health.
    pub fn health_potion_amount(&self) -> u32 {
        self.health.max() / 2
    }

    pub fn mana_potion_amount(&self) -> u32 {
        BattleConfig::MANA_POTION_RESTORE
    }

    /// Drinks a health potion. Returns the health restored.
    pub fn drink_health_potion(&mut self) -> Result<u32, ItemError> {
        if self.health_potions == 0 {
            return Err(ItemError::NoHealthPotions);
        }
        self.health_potions -= 1;
        Ok(self.health.restore(self.health_potion_amount()))
    }

    /// Drinks a mana potion. Returns the mana restored.
    pub fn drink_mana_potion(&mut self) -> Result<u32, ItemError> {
        if self.mana_potions == 0 {
            return Err(ItemError::NoManaPotions);
        }
        self.mana_potions -= 1;
        Ok(self.mana.restore(self.mana_potion_amount()))
    }

    pub fn consumables(&self) -> &Consumables {
        &self.consumables
    }

    pub fn add_consumable(&mut self, item: Consumable) {
        self.consumables.add(item);
    }

    /// Uses the consumable at `index`. One item is consumed only on success.
    pub fn use_consumable(
        &mut self,
        index: usize,
        target: Option<&mut Monster>,
        io: &mut dyn BattleIo,
    ) -> Result<ItemEffect, ItemError> {
        let item = self
            .consumables
            .get(index)
            .cloned()
            .ok_or(ItemError::EmptySlot { index })?;
        let effect = item.apply(self, target, io)?;
        self.consumables.take_one(index);
        Ok(effect)
    }

    // ========================================================================
    // Progression
    // ========================================================================

    pub fn gain_gold(&mut self, amount: u32) {
        self.gold = self.gold.saturating_add(amount);
    }

    /// Adds experience and levels up as often as it allows.
    ///
    /// Returns the number of levels gained.
    pub fn gain_exp(&mut self, amount: u32) -> u32 {
        self.exp = self.exp.saturating_add(amount);
        let mut gained = 0;
        while self.exp >= self.level * BattleConfig::XP_PER_LEVEL_FACTOR {
            self.exp -= self.level * BattleConfig::XP_PER_LEVEL_FACTOR;
            self.level_up();
            gained += 1;
        }
        gained
    }

    fn level_up(&mut self) {
        self.level += 1;
        self.health = Meter::full(self.level * BattleConfig::HEALTH_PER_LEVEL);

        let max_mana = combat::scale_stat(self.mana.max(), 0.10);
        let mana = combat::scale_stat(self.mana.current(), 0.10);
        self.mana = Meter::new(mana, max_mana);

        let (strength, dexterity, agility) = (self.strength, self.dexterity, self.agility);
        self.strength = combat::scale_stat(strength, 0.05);
        self.dexterity = combat::scale_stat(dexterity, 0.05);
        self.agility = combat::scale_stat(agility, 0.05);

        for attribute in self.class.favored() {
            let (slot, base) = match attribute {
                Attribute::Strength => (&mut self.strength, strength),
                Attribute::Dexterity => (&mut self.dexterity, dexterity),
                Attribute::Agility => (&mut self.agility, agility),
            };
            *slot = (*slot).max(combat::scale_stat(base, 0.10));
        }
        tracing::debug!(hero = %self.name, level = self.level, "level up");
    }

    /// Brings a fallen hero back with half of maximum health.
    pub fn revive_at_half(&mut self) {
        self.health.set(self.health.max() / 2);
    }

    /// Restores health and mana to their maxima.
    pub fn full_recover(&mut self) {
        self.health.fill();
        self.mana.fill();
    }
}

impl Combatant for Hero {
    fn name(&self) -> &str {
        &self.name
    }

    fn level(&self) -> u32 {
        self.level
    }

    fn health(&self) -> Meter {
        self.health
    }

    fn defense(&self) -> u32 {
        self.armor.as_ref().map_or(0, |a| a.reduction)
    }

    fn dodge_chance(&self) -> f64 {
        combat::hero_dodge_chance(self.agility)
    }

    fn status_effects(&self) -> &StatusEffects {
        &self.statuses
    }

    fn add_status(&mut self, effect: StatusEffect) {
        self.statuses.add(effect);
    }

    fn take_damage(&mut self, raw: u32) -> u32 {
        let reduced = self.mitigated(raw);
        self.health.drain(reduced)
    }

    fn tick_status_effects(&mut self) -> Vec<StatusTick> {
        combatant::tick_ledger(&mut self.statuses, &mut self.health)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starting_stats_follow_archetype() {
        let warrior = Hero::new("Aria", HeroClass::Warrior);
        assert_eq!(warrior.level(), 1);
        assert_eq!(warrior.health(), Meter::full(100));
        assert_eq!(warrior.mana(), Meter::full(80));
        assert_eq!(warrior.strength(), 22);
        assert_eq!(warrior.gold(), 300);
        assert_eq!(warrior.health_potions(), 3);
        assert_eq!(warrior.mana_potions(), 1);

        let sorcerer = Hero::new("Bram", HeroClass::Sorcerer);
        assert_eq!(sorcerer.mana().max(), 120);
        assert_eq!(sorcerer.dexterity(), 22);
    }

    #[test]
    fn unarmed_warrior_hits_for_thirteen() {
        let warrior = Hero::new("Aria", HeroClass::Warrior);
        assert_eq!(warrior.attack_damage(), 13);
    }

    #[test]
    fn armor_mitigates_and_penetration_cancels_it() {
        let mut hero = Hero::new("Aria", HeroClass::Warrior);
        hero.equip_armor(Armor::new("Plate", 5));
        assert_eq!(hero.take_damage(12), 7);
        assert_eq!(hero.health().current(), 93);

        hero.add_status(StatusEffect::new(StatusKind::ArmorPenetrate, 1, 3));
        assert_eq!(hero.take_damage(12), 10);
        assert_eq!(hero.take_damage(1_000), 83);
        assert!(!hero.is_alive());
    }

    #[test]
    fn dodge_chance_scales_with_agility() {
        let hero = Hero::new("Aria", HeroClass::Warrior);
        assert!((hero.dodge_chance() - 0.032).abs() < 1e-12);
    }

    #[test]
    fn spending_mana_is_all_or_nothing() {
        let mut hero = Hero::new("Aria", HeroClass::Warrior);
        hero.mana.set(10);
        assert_eq!(
            hero.spend_mana(20),
            Err(SkillError::InsufficientMana {
                required: 20,
                available: 10
            })
        );
        assert_eq!(hero.mana().current(), 10);
        assert_eq!(hero.spend_mana(10), Ok(()));
        assert_eq!(hero.mana().current(), 0);
    }

    #[test]
    fn potions_run_out() {
        let mut hero = Hero::new("Aria", HeroClass::Warrior);
        hero.take_damage(80);
        assert_eq!(hero.drink_health_potion(), Ok(50));
        assert_eq!(hero.drink_health_potion(), Ok(30));
        assert_eq!(hero.drink_health_potion(), Ok(0));
        assert_eq!(hero.drink_health_potion(), Err(ItemError::NoHealthPotions));

        assert_eq!(hero.drink_mana_potion(), Ok(0));
        assert_eq!(hero.drink_mana_potion(), Err(ItemError::NoManaPotions));
    }

    #[test]
    fn regeneration_rounds_up_and_caps() {
        let mut hero = Hero::new("Aria", HeroClass::Warrior);
        hero.take_damage(50);
        hero.mana.set(41);
        hero.regenerate(1.10);
        // ceil(50 × 1.10) is 56 in floating point
        assert_eq!(hero.health().current(), 56);
        assert_eq!(hero.mana().current(), 46);

        let mut full = Hero::new("Bram", HeroClass::Paladin);
        full.regenerate(1.10);
        assert_eq!(full.health(), Meter::full(100));
        assert_eq!(full.mana(), Meter::full(100));
    }

    #[test]
    fn dead_heroes_do_not_regenerate() {
        let mut hero = Hero::new("Aria", HeroClass::Warrior);
        hero.take_damage(1_000);
        hero.regenerate(1.10);
        assert_eq!(hero.health().current(), 0);
    }

    #[test]
    fn level_up_grows_stats_and_favors_archetype() {
        let mut hero = Hero::new("Aria", HeroClass::Warrior);
        assert_eq!(hero.gain_exp(5), 0);
        assert_eq!(hero.gain_exp(1), 1);

        assert_eq!(hero.level(), 2);
        assert_eq!(hero.exp(), 0);
        assert_eq!(hero.health(), Meter::full(200));
        assert_eq!(hero.mana(), Meter::full(88));
        // Favored: ceil(22 × 1.10) = 25, ceil(16 × 1.10) = 18
        assert_eq!(hero.strength(), 25);
        assert_eq!(hero.agility(), 18);
        // Regular: ceil(10 × 1.05) = 11
        assert_eq!(hero.dexterity(), 11);
    }

    #[test]
    fn revive_restores_half_health() {
        let mut hero = Hero::new("Aria", HeroClass::Sorcerer);
        hero.take_damage(1_000);
        hero.revive_at_half();
        assert_eq!(hero.health().current(), 50);
        hero.full_recover();
        assert!(hero.health().is_full());
    }

    #[test]
    fn class_names_parse() {
        assert_eq!("paladin".parse::<HeroClass>(), Ok(HeroClass::Paladin));
        assert_eq!(HeroClass::Sorcerer.to_string(), "Sorcerer");
    }
}
