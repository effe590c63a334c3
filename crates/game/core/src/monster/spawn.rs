//! Encounter generation.

use crate::combatant::Combatant;
use crate::config::BattleConfig;
use crate::hero::Hero;
use crate::rng::RandomSource;

use super::{Monster, MonsterKind};

/// Monster names by kind, split into beginner and advanced pools.
#[derive(Clone, Copy, Debug)]
pub struct NamePool {
    pub dragons: [&'static [&'static str]; 2],
    pub exoskeletons: [&'static [&'static str]; 2],
    pub spirits: [&'static [&'static str]; 2],
}

impl NamePool {
    pub const STANDARD: NamePool = NamePool {
        dragons: [
            &["Young Red Dragon", "Whelp Flamewing", "Tiny Ember Drake"],
            &["Ancient Red Dragon", "Crimson Tyrant", "Skyflame Dragon"],
        ],
        exoskeletons: [
            &["Rusty Shell", "Bronze Carapace", "Cracked Exoskeleton"],
            &["Iron Wall", "Titan Shell", "Obsidian Carapace"],
        ],
        spirits: [
            &["Faint Spirit", "Whispering Shade", "Lost Soul"],
            &["Wailing Banshee", "Void Wraith", "Nightmare Spirit"],
        ],
    };

    /// Names for `kind`; the final boss has no pool of its own.
    pub fn names(&self, kind: MonsterKind, beginner: bool) -> &'static [&'static str] {
        let pools = match kind {
            MonsterKind::Dragon => self.dragons,
            MonsterKind::Exoskeleton => self.exoskeletons,
            MonsterKind::Spirit => self.spirits,
            MonsterKind::FinalBoss => return &[],
        };
        pools[usize::from(!beginner)]
    }
}

impl Default for NamePool {
    fn default() -> Self {
        Self::STANDARD
    }
}

/// Spawns one monster per hero.
///
/// The party's best level decides both the name pool (beginner up to level
/// 2) and the monster level: `maxLevel + bias`, at least 1 and at most
/// `maxLevel + max_monster_level_delta`, and never above
/// [`BattleConfig::MAX_MONSTER_LEVEL`]. Each monster draws its kind and then
/// its name from `rng`.
pub fn spawn_for_party(
    heroes: &[Hero],
    level_bias: i32,
    config: &BattleConfig,
    rng: &mut (impl RandomSource + ?Sized),
) -> Vec<Monster> {
    let pool = NamePool::STANDARD;
    let max_level = heroes.iter().map(|h| h.level()).max().unwrap_or(1).max(1);
    let beginner = max_level <= 2;
    let count = heroes.len().max(1);

    let biased = i64::from(max_level) + i64::from(level_bias);
    let ceiling = i64::from(max_level) + i64::from(config.max_monster_level_delta);
    let level = biased
        .min(ceiling)
        .clamp(1, i64::from(BattleConfig::MAX_MONSTER_LEVEL)) as u32;

    let mut monsters = Vec::with_capacity(count);
    for _ in 0..count {
        let pick = rng.next_int(MonsterKind::SPAWNABLE.len() as u32) as usize;
        let kind = MonsterKind::SPAWNABLE[pick];
        let names = pool.names(kind, beginner);
        let name = names[rng.next_int(names.len() as u32) as usize];
        tracing::debug!(%kind, name, level, "spawned monster");
        monsters.push(Monster::new(kind, name, level));
    }
    monsters
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hero::HeroClass;
    use crate::rng::{PcgRng, SequenceRng};

    #[test]
    fn one_monster_per_hero() {
        let heroes = vec![
            Hero::new("Aria", HeroClass::Warrior),
            Hero::new("Bram", HeroClass::Sorcerer),
        ];
        let mut rng = PcgRng::seed_from_u64(7);
        let monsters = spawn_for_party(&heroes, 0, &BattleConfig::default(), &mut rng);
        assert_eq!(monsters.len(), 2);
        assert!(monsters.iter().all(|m| m.level() == 1));
        assert!(monsters.iter().all(|m| m.kind() != MonsterKind::FinalBoss));
    }

    #[test]
    fn draws_kind_then_name() {
        let heroes = vec![Hero::new("Aria", HeroClass::Warrior)];
        // Kind: 0.5 × 3 → Exoskeleton. Name: 0.9 × 3 → third beginner name.
        let mut rng = SequenceRng::new(vec![0.5, 0.9]);
        let monsters = spawn_for_party(&heroes, 0, &BattleConfig::default(), &mut rng);
        assert_eq!(monsters[0].kind(), MonsterKind::Exoskeleton);
        assert_eq!(monsters[0].name(), "Cracked Exoskeleton");
        assert_eq!(rng.draws(), 2);
    }

    #[test]
    fn level_bias_is_clamped() {
        let heroes = vec![Hero::new("Aria", HeroClass::Warrior)];
        let config = BattleConfig::default();
        let mut rng = SequenceRng::constant(0.0);

        let weak = spawn_for_party(&heroes, -5, &config, &mut rng);
        assert_eq!(weak[0].level(), 1);

        let strong = spawn_for_party(&heroes, 10, &config, &mut rng);
        assert_eq!(strong[0].level(), 4);
        assert_eq!(strong[0].name(), "Young Red Dragon");
    }

    #[test]
    fn extreme_bias_and_delta_stay_at_the_level_cap() {
        let heroes = vec![Hero::new("Aria", HeroClass::Warrior)];
        let config = BattleConfig {
            max_monster_level_delta: 4_000_000_000,
            ..BattleConfig::default()
        };
        let mut rng = PcgRng::seed_from_u64(1);

        let monsters = spawn_for_party(&heroes, i32::MAX, &config, &mut rng);

        let monster = &monsters[0];
        assert_eq!(monster.level(), BattleConfig::MAX_MONSTER_LEVEL);
        assert_eq!(
            monster.health().max(),
            BattleConfig::MAX_MONSTER_LEVEL * BattleConfig::HEALTH_PER_LEVEL
        );
    }

    #[test]
    fn stats_saturate_instead_of_overflowing() {
        let stats = MonsterKind::FinalBoss.stats(u32::MAX);
        assert_eq!(stats.base_damage, u32::MAX);
        assert_eq!(stats.defense, u32::MAX);

        let monster = Monster::new(MonsterKind::Dragon, "Ancient", u32::MAX);
        assert_eq!(monster.health().max(), u32::MAX);
    }

    #[test]
    fn empty_party_still_gets_a_monster() {
        let mut rng = SequenceRng::constant(0.0);
        let monsters = spawn_for_party(&[], 0, &BattleConfig::default(), &mut rng);
        assert_eq!(monsters.len(), 1);
    }
}
