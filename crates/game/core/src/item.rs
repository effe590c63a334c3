//! Equipment and battle consumables.
//!
//! The item catalog itself lives outside the battle engine. This module only
//! models what a hero carries into battle and what using a consumable does.

use crate::combatant::Combatant;
use crate::error::{ErrorSeverity, GameError};
use crate::hero::Hero;
use crate::io::BattleIo;
use crate::monster::Monster;
use crate::status::{StatusEffect, StatusKind};

// ============================================================================
// Equipment
// ============================================================================

/// A weapon adds its damage to a hero's basic attack.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Weapon {
    pub name: String,
    pub damage: u32,
}

impl Weapon {
    pub fn new(name: impl Into<String>, damage: u32) -> Self {
        Self {
            name: name.into(),
            damage,
        }
    }
}

/// Armor provides a hero's defense value.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Armor {
    pub name: String,
    pub reduction: u32,
}

impl Armor {
    pub fn new(name: impl Into<String>, reduction: u32) -> Self {
        Self {
            name: name.into(),
            reduction,
        }
    }
}

/// Equipment handed out after a victory.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Loot {
    Weapon(Weapon),
    Armor(Armor),
}

impl std::fmt::Display for Loot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Weapon(w) => write!(f, "{} (damage {})", w.name, w.damage),
            Self::Armor(a) => write!(f, "{} (reduction {})", a.name, a.reduction),
        }
    }
}

// ============================================================================
// Consumables
// ============================================================================

/// What a consumable does when used.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::IntoStaticStr,
)]
#[strum(ascii_case_insensitive, serialize_all = "SCREAMING_SNAKE_CASE")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum ConsumableKind {
    /// Restores health by its potency.
    Heal,
    /// Restores mana by its potency.
    RestoreMana,
    /// Removes every poison effect from the user.
    Antidote,
    /// Stuns a monster for one turn.
    StunBomb,
    /// Lowers a monster's defense by its potency for two turns.
    ArmorBreak,
}

impl ConsumableKind {
    /// Returns true if using the item requires choosing a monster.
    pub const fn needs_target(self) -> bool {
        matches!(self, Self::StunBomb | Self::ArmorBreak)
    }
}

/// A single-use item.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Consumable {
    pub name: String,
    pub level: u32,
    pub kind: ConsumableKind,
    pub potency: u32,
}

/// Observable result of using a consumable.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ItemEffect {
    Healed(u32),
    ManaRestored(u32),
    Cured { removed: usize },
    StatusApplied(StatusEffect),
}

impl Consumable {
    pub fn new(name: impl Into<String>, level: u32, kind: ConsumableKind, potency: u32) -> Self {
        Self {
            name: name.into(),
            level,
            kind,
            potency,
        }
    }

    pub fn needs_target(&self) -> bool {
        self.kind.needs_target()
    }

    /// Whether using the item right now would have any effect.
    pub fn is_usable(&self, user: &Hero, monsters: &[Monster]) -> bool {
        match self.kind {
            ConsumableKind::Heal => !user.health().is_full(),
            ConsumableKind::RestoreMana => !user.mana().is_full(),
            ConsumableKind::Antidote => user.has_status(StatusKind::Poison),
            ConsumableKind::StunBomb | ConsumableKind::ArmorBreak => {
                monsters.iter().any(|m| m.is_alive())
            }
        }
    }

    /// Applies the item's effect. Does not consume it.
    pub fn apply(
        &self,
        user: &mut Hero,
        target: Option<&mut Monster>,
        io: &mut dyn BattleIo,
    ) -> Result<ItemEffect, ItemError> {
        match self.kind {
            ConsumableKind::Heal => {
                let healed = user.heal(self.potency);
                io.println(&format!(
                    "{} used {} and healed {} HP.",
                    user.name(),
                    self.name,
                    healed
                ));
                if healed == 0 {
                    return Err(ItemError::NoEffect);
                }
                Ok(ItemEffect::Healed(healed))
            }
            ConsumableKind::RestoreMana => {
                let restored = user.restore_mana(self.potency);
                io.println(&format!(
                    "{} used {} and restored {} MP.",
                    user.name(),
                    self.name,
                    restored
                ));
                if restored == 0 {
                    return Err(ItemError::NoEffect);
                }
                Ok(ItemEffect::ManaRestored(restored))
            }
            ConsumableKind::Antidote => {
                let removed = user.remove_status(StatusKind::Poison);
                io.println(&format!("{} used {} and removed poison.", user.name(), self.name));
                Ok(ItemEffect::Cured { removed })
            }
            ConsumableKind::StunBomb | ConsumableKind::ArmorBreak => {
                let Some(target) = target else {
                    io.println(&format!("No target to use {}", self.name));
                    return Err(ItemError::NoTarget);
                };
                let effect = if self.kind == ConsumableKind::StunBomb {
                    StatusEffect::new(StatusKind::Stun, 1, 0)
                } else {
                    StatusEffect::new(StatusKind::ArmorPenetrate, 2, self.potency)
                };
                target.add_status(effect);
                let verb = if self.kind == ConsumableKind::StunBomb {
                    "stun"
                } else {
                    "break armor of"
                };
                io.println(&format!(
                    "{} used {} to {} {}",
                    user.name(),
                    self.name,
                    verb,
                    target.name()
                ));
                Ok(ItemEffect::StatusApplied(effect))
            }
        }
    }
}

/// Identical consumables grouped under one count.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConsumableStack {
    item: Consumable,
    count: u32,
}

impl ConsumableStack {
    pub fn item(&self) -> &Consumable {
        &self.item
    }

    pub fn count(&self) -> u32 {
        self.count
    }
}

/// A hero's consumable pouch.
///
/// Stacks are read through [`Consumables::stacks`]; counts only change via
/// [`Consumables::add`] and [`Consumables::take_one`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Consumables {
    stacks: Vec<ConsumableStack>,
}

impl Consumables {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one item, merging into an identical stack if present.
    pub fn add(&mut self, item: Consumable) {
        if let Some(stack) = self.stacks.iter_mut().find(|s| s.item == item) {
            stack.count += 1;
            return;
        }
        self.stacks.push(ConsumableStack { item, count: 1 });
    }

    pub fn stacks(&self) -> &[ConsumableStack] {
        &self.stacks
    }

    pub fn get(&self, index: usize) -> Option<&Consumable> {
        self.stacks.get(index).map(|s| &s.item)
    }

    /// Removes one item from the stack at `index`, dropping empty stacks.
    pub fn take_one(&mut self, index: usize) -> Option<Consumable> {
        let stack = self.stacks.get_mut(index)?;
        stack.count = stack.count.saturating_sub(1);
        let item = stack.item.clone();
        if stack.count == 0 {
            self.stacks.remove(index);
        }
        Some(item)
    }

    pub fn len(&self) -> usize {
        self.stacks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stacks.is_empty()
    }
}

/// Item and potion usage failures. All are recoverable: the hero picks again.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ItemError {
    #[error("No health potions left!")]
    NoHealthPotions,

    #[error("No mana potions left!")]
    NoManaPotions,

    #[error("No item in slot {index}")]
    EmptySlot { index: usize },

    #[error("Item needs a target")]
    NoTarget,

    #[error("Item had no effect")]
    NoEffect,
}

impl GameError for ItemError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::EmptySlot { .. } => ErrorSeverity::Validation,
            _ => ErrorSeverity::Recoverable,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::NoHealthPotions => "ITEM_NO_HEALTH_POTIONS",
            Self::NoManaPotions => "ITEM_NO_MANA_POTIONS",
            Self::EmptySlot { .. } => "ITEM_EMPTY_SLOT",
            Self::NoTarget => "ITEM_NO_TARGET",
            Self::NoEffect => "ITEM_NO_EFFECT",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hero::HeroClass;
    use crate::io::ScriptedIo;
    use crate::monster::MonsterKind;

    fn bomb() -> Consumable {
        Consumable::new("Stun Bomb", 1, ConsumableKind::StunBomb, 0)
    }

    #[test]
    fn identical_items_share_a_stack() {
        let mut pouch = Consumables::new();
        pouch.add(bomb());
        pouch.add(bomb());
        pouch.add(Consumable::new("Elixir", 1, ConsumableKind::Heal, 30));
        assert_eq!(pouch.len(), 2);
        assert_eq!(pouch.stacks()[0].count(), 2);

        assert_eq!(pouch.take_one(0), Some(bomb()));
        assert_eq!(pouch.stacks()[0].count(), 1);
        pouch.take_one(0);
        assert_eq!(pouch.len(), 1);
        assert_eq!(pouch.take_one(5), None);
    }

    #[test]
    fn heal_is_unusable_at_full_health() {
        let hero = Hero::new("Aria", HeroClass::Warrior);
        let elixir = Consumable::new("Elixir", 1, ConsumableKind::Heal, 30);
        assert!(!elixir.is_usable(&hero, &[]));
        let antidote = Consumable::new("Antidote", 1, ConsumableKind::Antidote, 0);
        assert!(!antidote.is_usable(&hero, &[]));
    }

    #[test]
    fn targeted_items_need_a_living_monster() {
        let hero = Hero::new("Aria", HeroClass::Warrior);
        let mut monster = Monster::new(MonsterKind::Dragon, "Whelp", 1);
        assert!(bomb().is_usable(&hero, std::slice::from_ref(&monster)));
        monster.take_damage(10_000);
        assert!(!bomb().is_usable(&hero, std::slice::from_ref(&monster)));
    }

    #[test]
    fn stun_bomb_stuns_target() {
        let mut hero = Hero::new("Aria", HeroClass::Warrior);
        let mut monster = Monster::new(MonsterKind::Spirit, "Shade", 1);
        let mut io = ScriptedIo::new();

        let effect = bomb().apply(&mut hero, Some(&mut monster), &mut io);
        assert!(matches!(effect, Ok(ItemEffect::StatusApplied(_))));
        assert!(monster.has_status(StatusKind::Stun));
        assert!(io.contains("to stun Shade"));

        assert_eq!(
            bomb().apply(&mut hero, None, &mut io),
            Err(ItemError::NoTarget)
        );
    }

    #[test]
    fn antidote_removes_poison() {
        let mut hero = Hero::new("Aria", HeroClass::Paladin);
        hero.add_status(StatusEffect::new(StatusKind::Poison, 3, 2));
        let antidote = Consumable::new("Antidote", 1, ConsumableKind::Antidote, 0);
        assert!(antidote.is_usable(&hero, &[]));

        let mut io = ScriptedIo::new();
        let effect = antidote.apply(&mut hero, None, &mut io);
        assert_eq!(effect, Ok(ItemEffect::Cured { removed: 1 }));
        assert!(!hero.has_status(StatusKind::Poison));
    }
}
