//! Monsters: stats, action tables and spawning.

pub mod behavior;
pub mod spawn;

pub use behavior::{MonsterAction, MonsterTurn, Strike, StrikeOutcome};
pub use spawn::{NamePool, spawn_for_party};

use crate::combat;
use crate::combatant::{self, Combatant, Meter};
use crate::config::BattleConfig;
use crate::status::{StatusEffect, StatusEffects, StatusTick};

/// Monster variants.
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
#[strum(ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MonsterKind {
    Dragon,
    Exoskeleton,
    Spirit,
    FinalBoss,
}

/// Per-level stat block of a monster variant.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MonsterStats {
    pub base_damage: u32,
    pub defense: u32,
    /// Dodge rating in percent.
    pub dodge: f64,
}

impl MonsterKind {
    /// Kinds that appear in regular encounters.
    pub const SPAWNABLE: [MonsterKind; 3] = [Self::Dragon, Self::Exoskeleton, Self::Spirit];

    pub fn stats(self, level: u32) -> MonsterStats {
        let l = f64::from(level);
        let (base_damage, defense, dodge) = match self {
            Self::Dragon => (12, 4, 8.0 + l),
            Self::Exoskeleton => (8, 10, 5.0 + 0.5 * l),
            Self::Spirit => (10, 4, 15.0 + 2.0 * l),
            Self::FinalBoss => (20, 8, 5.0 + 2.0 * l),
        };
        MonsterStats {
            base_damage: level.saturating_mul(base_damage),
            defense: level.saturating_mul(defense),
            dodge,
        }
    }
}

/// Coarse strength class, for display.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
pub enum Tier {
    Beginner,
    Advanced,
}

impl Tier {
    pub const fn for_level(level: u32) -> Self {
        if level <= 2 { Self::Beginner } else { Self::Advanced }
    }
}

/// A monster in a battle.
#[derive(Clone, Debug)]
pub struct Monster {
    name: String,
    kind: MonsterKind,
    level: u32,
    health: Meter,
    base_damage: u32,
    defense: u32,
    dodge: f64,
    max_dodge: f64,
    instant_defeat: bool,
    statuses: StatusEffects,
}

impl Monster {
    pub fn new(kind: MonsterKind, name: impl Into<String>, level: u32) -> Self {
        let level = level.max(1);
        let stats = kind.stats(level);
        Self {
            name: name.into(),
            kind,
            level,
            health: Meter::full(level.saturating_mul(BattleConfig::HEALTH_PER_LEVEL)),
            base_damage: stats.base_damage,
            defense: stats.defense,
            dodge: stats.dodge,
            max_dodge: BattleConfig::DEFAULT_MAX_MONSTER_DODGE,
            instant_defeat: false,
            statuses: StatusEffects::empty(),
        }
    }

    /// Applies battle-wide settings: the dodge cap and the instant-defeat mode.
    pub(crate) fn configure(&mut self, config: &BattleConfig) {
        self.max_dodge = config.max_monster_dodge;
        self.instant_defeat = config.difficulty.is_instant_defeat();
    }

    pub fn kind(&self) -> MonsterKind {
        self.kind
    }

    pub fn base_damage(&self) -> u32 {
        self.base_damage
    }

    /// Dodge rating in percent, before normalization.
    pub fn dodge_rating(&self) -> f64 {
        self.dodge
    }

    pub fn tier(&self) -> Tier {
        Tier::for_level(self.level)
    }

    pub fn is_instant_defeat(&self) -> bool {
        self.instant_defeat
    }
}

impl Combatant for Monster {
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
        self.defense
    }

    fn dodge_chance(&self) -> f64 {
        combat::monster_dodge_chance(self.dodge, self.max_dodge)
    }

    fn status_effects(&self) -> &StatusEffects {
        &self.statuses
    }

    fn add_status(&mut self, effect: StatusEffect) {
        self.statuses.add(effect);
    }

    fn take_damage(&mut self, raw: u32) -> u32 {
        let reduced = self.mitigated(raw);
        let before = self.health.current();
        self.health.drain(reduced);
        if self.instant_defeat {
            self.health.set(0);
        }
        before - self.health.current()
    }

    fn tick_status_effects(&mut self) -> Vec<StatusTick> {
        combatant::tick_ledger(&mut self.statuses, &mut self.health)
    }
}

impl std::fmt::Display for Monster {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} [{}] (Lv {}) HP={} DMG={} DEF={} DODGE={:.2}",
            self.name,
            self.tier(),
            self.level,
            self.health.current(),
            self.base_damage,
            self.defense,
            self.dodge
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Difficulty;
    use crate::status::StatusKind;

    #[test]
    fn stats_scale_with_level() {
        let dragon = Monster::new(MonsterKind::Dragon, "Whelp", 3);
        assert_eq!(dragon.health(), Meter::full(300));
        assert_eq!(dragon.base_damage(), 36);
        assert_eq!(dragon.defense(), 12);
        assert!((dragon.dodge_chance() - 0.11).abs() < 1e-12);
        assert_eq!(dragon.tier(), Tier::Advanced);

        let exo = Monster::new(MonsterKind::Exoskeleton, "Shell", 1);
        assert!((exo.dodge_rating() - 5.5).abs() < 1e-12);
        assert_eq!(exo.tier(), Tier::Beginner);
    }

    #[test]
    fn warrior_punch_leaves_dragon_at_ninety_one() {
        let mut dragon = Monster::new(MonsterKind::Dragon, "Whelp", 1);
        assert_eq!(dragon.take_damage(13), 9);
        assert_eq!(dragon.health().current(), 91);
    }

    #[test]
    fn armor_penetration_lowers_defense() {
        let mut exo = Monster::new(MonsterKind::Exoskeleton, "Shell", 1);
        assert_eq!(exo.take_damage(8), 0);
        exo.add_status(StatusEffect::new(StatusKind::ArmorPenetrate, 2, 4));
        assert_eq!(exo.take_damage(8), 2);
        exo.add_status(StatusEffect::new(StatusKind::ArmorPenetrate, 2, 40));
        assert_eq!(exo.take_damage(8), 8);
    }

    #[test]
    fn instant_defeat_zeroes_health_on_any_hit() {
        let mut exo = Monster::new(MonsterKind::Exoskeleton, "Shell", 5);
        exo.configure(&BattleConfig::with_difficulty(Difficulty::InstantDefeat));
        // Fully mitigated, still defeated.
        assert_eq!(exo.take_damage(1), 500);
        assert!(!exo.is_alive());
    }

    #[test]
    fn dodge_is_capped_by_config() {
        let mut spirit = Monster::new(MonsterKind::Spirit, "Wraith", 50);
        assert!((spirit.dodge_chance() - 0.95).abs() < 1e-12);
        let mut config = BattleConfig::default();
        config.max_monster_dodge = 0.5;
        spirit.configure(&config);
        assert!((spirit.dodge_chance() - 0.5).abs() < 1e-12);
    }
}
