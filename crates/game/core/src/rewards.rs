//! Post-victory rewards.
//!
//! Rewards sit outside the round loop: the caller invokes a [`RewardPolicy`]
//! through [`crate::Battle::award`] once the heroes have won.

use crate::combatant::Combatant;
use crate::hero::Hero;
use crate::io::BattleIo;
use crate::item::{Armor, Loot, Weapon};
use crate::monster::{Monster, MonsterKind};
use crate::rng::RandomSource;

/// Hands out gold, experience and loot after a won battle.
pub trait RewardPolicy {
    fn award(
        &mut self,
        heroes: &mut [Hero],
        monsters: &[Monster],
        rng: &mut dyn RandomSource,
        io: &mut dyn BattleIo,
    ) -> Vec<Loot>;
}

/// The default reward table.
///
/// Every hero gets `Σ max(1, level) × 100` gold and `max(1, 2 × monsters)`
/// experience. Each monster drops a piece of equipment scaled to its level
/// and may leave a health potion (30%) and a mana potion (20%) for the first
/// hero. Fallen heroes are revived at half health.
#[derive(Clone, Copy, Debug, Default)]
pub struct StandardRewards;

impl StandardRewards {
    pub const HEALTH_POTION_CHANCE: f64 = 0.30;
    pub const MANA_POTION_CHANCE: f64 = 0.20;

    /// The drop for one defeated monster.
    pub fn drop_for(monster: &Monster) -> Loot {
        let level = monster.level();
        match monster.kind() {
            MonsterKind::Dragon => Loot::Weapon(Weapon::new(
                format!("Dragonfang Greatsword (Lv {level})"),
                level.saturating_mul(40),
            )),
            MonsterKind::Exoskeleton => Loot::Armor(Armor::new(
                format!("Exo Plate Armor (Lv {level})"),
                level.saturating_mul(30),
            )),
            MonsterKind::Spirit => Loot::Weapon(Weapon::new(
                format!("Spirit Wand (Lv {level})"),
                level.saturating_mul(25),
            )),
            MonsterKind::FinalBoss => Loot::Weapon(Weapon::new(
                format!("Abyssal Crown Blade (Lv {level})"),
                level.saturating_mul(60),
            )),
        }
    }
}

impl RewardPolicy for StandardRewards {
    fn award(
        &mut self,
        heroes: &mut [Hero],
        monsters: &[Monster],
        rng: &mut dyn RandomSource,
        io: &mut dyn BattleIo,
    ) -> Vec<Loot> {
        let mut loot = Vec::with_capacity(monsters.len());
        let mut total_levels = 0u32;

        for monster in monsters {
            total_levels = total_levels.saturating_add(monster.level().max(1));
            loot.push(Self::drop_for(monster));

            if rng.next_f64() < Self::HEALTH_POTION_CHANCE {
                if let Some(first) = heroes.first_mut() {
                    first.add_health_potion();
                }
            }
            if rng.next_f64() < Self::MANA_POTION_CHANCE {
                if let Some(first) = heroes.first_mut() {
                    first.add_mana_potion();
                }
            }
        }

        let gold = total_levels.saturating_mul(100);
        let exp = (monsters.len() as u32).saturating_mul(2).max(1);

        io.println("Battle rewards:");
        io.println(&format!("  Gold per surviving hero: {gold}"));
        io.println(&format!("  EXP per surviving hero: {exp}"));
        if !loot.is_empty() {
            io.println("  Loot dropped:");
            for item in &loot {
                io.println(&format!("    - {item}"));
            }
        }

        for hero in heroes.iter_mut() {
            if !hero.is_alive() {
                hero.revive_at_half();
            }
            hero.gain_gold(gold);
            let levels = hero.gain_exp(exp);
            tracing::debug!(hero = hero.name(), gold, exp, levels, "rewards granted");
        }
        loot
    }
}
