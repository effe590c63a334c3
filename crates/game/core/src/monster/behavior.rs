//! Monster action tables.
//!
//! Each variant owns a small weighted table. Selection consumes one draw;
//! the final boss preview may consume two. Every strike then consumes one
//! dodge draw per hero it targets, in roster order for area attacks.

use crate::combat;
use crate::combatant::Combatant;
use crate::hero::Hero;
use crate::io::BattleIo;
use crate::rng::RandomSource;
use crate::status::StatusKind;

use super::{Monster, MonsterKind};

/// An entry of a monster action table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::IntoStaticStr)]
pub enum MonsterAction {
    #[strum(to_string = "Fire Breath")]
    FireBreath,
    #[strum(to_string = "Claw Swipe")]
    ClawSwipe,
    #[strum(to_string = "Shield Bash")]
    ShieldBash,
    #[strum(to_string = "Crushing Strike")]
    CrushingStrike,
    #[strum(to_string = "Mimic")]
    Mimic,
    #[strum(to_string = "Ethereal Strike")]
    EtherealStrike,
    #[strum(to_string = "Cataclysm")]
    Cataclysm,
    #[strum(to_string = "Meteor Strike")]
    MeteorStrike,
    #[strum(to_string = "Devastating Slash")]
    DevastatingSlash,
}

impl MonsterAction {
    /// Returns true if the action hits every living hero.
    pub const fn is_area(self) -> bool {
        matches!(self, Self::FireBreath | Self::Cataclysm)
    }

    /// Text shown after "plans:" in the monster preview.
    pub const fn preview_label(self) -> &'static str {
        match self {
            Self::FireBreath => "Fire Breath (AOE)",
            Self::ClawSwipe => "Claw Swipe",
            Self::ShieldBash => "Shield Bash (heavy)",
            Self::CrushingStrike => "Crushing Strike",
            Self::Mimic => "Mimic (copies target attack)",
            Self::EtherealStrike => "Ethereal Strike",
            Self::Cataclysm => "Cataclysm (huge AOE)",
            Self::MeteorStrike => "Meteor Strike (single heavy)",
            Self::DevastatingSlash => "Devastating Slash",
        }
    }

    /// Raw damage of the action before the hero's mitigation.
    pub fn damage(self, monster: &Monster, target: &Hero) -> u32 {
        let level = monster.level();
        let base = monster.base_damage();
        match self {
            Self::FireBreath => level.saturating_mul(15).max(1),
            Self::ClawSwipe => base.saturating_add(level.saturating_mul(2).max(1)),
            Self::ShieldBash => base.saturating_add(level.saturating_mul(6).max(1)),
            Self::CrushingStrike | Self::EtherealStrike => base,
            Self::Mimic => target.attack_damage(),
            Self::Cataclysm => level.saturating_mul(40).max(10),
            Self::MeteorStrike => level.saturating_mul(35).max(20),
            Self::DevastatingSlash => base.saturating_add(level.saturating_mul(5)),
        }
    }
}

impl MonsterKind {
    /// Draws the action the monster resolves this turn. One draw.
    pub fn select_action(self, rng: &mut (impl RandomSource + ?Sized)) -> MonsterAction {
        let roll = rng.next_f64();
        let action = match self {
            Self::Dragon if roll < 0.25 => MonsterAction::FireBreath,
            Self::Dragon => MonsterAction::ClawSwipe,
            Self::Exoskeleton if roll < 0.20 => MonsterAction::ShieldBash,
            Self::Exoskeleton => MonsterAction::CrushingStrike,
            Self::Spirit if roll < 0.30 => MonsterAction::Mimic,
            Self::Spirit => MonsterAction::EtherealStrike,
            Self::FinalBoss if roll < 0.3 => MonsterAction::Cataclysm,
            Self::FinalBoss if roll < 0.6 => MonsterAction::MeteorStrike,
            Self::FinalBoss => MonsterAction::DevastatingSlash,
        };
        tracing::trace!(kind = %self, roll, %action, "monster action selected");
        action
    }

    /// Draws the action announced in the preview.
    ///
    /// Same tables as [`MonsterKind::select_action`], except the final boss
    /// draws its tiers separately: 0.3 for Cataclysm, then a fresh draw
    /// against 0.5 for Meteor Strike.
    pub fn preview_action(self, rng: &mut (impl RandomSource + ?Sized)) -> MonsterAction {
        if self != Self::FinalBoss {
            return self.select_action(rng);
        }
        if rng.next_f64() < 0.3 {
            MonsterAction::Cataclysm
        } else if rng.next_f64() < 0.5 {
            MonsterAction::MeteorStrike
        } else {
            MonsterAction::DevastatingSlash
        }
    }
}

/// Result of a strike against one hero.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StrikeOutcome {
    Dodged,
    /// The hit landed; `health_lost` is the post-mitigation damage.
    Hit { health_lost: u32 },
}

/// One hero targeted by a monster action.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Strike {
    /// Roster index of the hero.
    pub hero: usize,
    /// Raw damage before mitigation.
    pub damage: u32,
    pub outcome: StrikeOutcome,
}

/// What a monster did with its turn.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MonsterTurn {
    /// Stunned: nothing happened and no draw was consumed.
    Stunned,
    Acted {
        action: MonsterAction,
        strikes: Vec<Strike>,
    },
}

impl Monster {
    /// Previews the next action for the "plans:" announcement.
    pub fn preview(&self, rng: &mut (impl RandomSource + ?Sized)) -> MonsterAction {
        self.kind.preview_action(rng)
    }

    /// Resolves this monster's turn against `heroes[target]`.
    ///
    /// A stunned monster announces it and does nothing; the stun is left to
    /// expire on its own. Otherwise `planned` is executed when given, or a
    /// fresh action is drawn.
    pub fn take_turn(
        &self,
        planned: Option<MonsterAction>,
        target: usize,
        heroes: &mut [Hero],
        rng: &mut (impl RandomSource + ?Sized),
        io: &mut (impl BattleIo + ?Sized),
    ) -> MonsterTurn {
        if self.has_status(StatusKind::Stun) {
            io.println(&format!("{} is stunned and cannot act!", self.name()));
            return MonsterTurn::Stunned;
        }
        let action = planned.unwrap_or_else(|| self.kind.select_action(rng));
        let strikes = if action.is_area() {
            self.area_attack(action, heroes, rng, io)
        } else {
            self.single_attack(action, target, heroes, rng, io)
                .into_iter()
                .collect()
        };
        MonsterTurn::Acted { action, strikes }
    }

    fn area_attack(
        &self,
        action: MonsterAction,
        heroes: &mut [Hero],
        rng: &mut (impl RandomSource + ?Sized),
        io: &mut (impl BattleIo + ?Sized),
    ) -> Vec<Strike> {
        let mut strikes = Vec::new();
        let mut announced = false;
        for (index, hero) in heroes.iter_mut().enumerate() {
            if !hero.is_alive() {
                continue;
            }
            let damage = action.damage(self, hero);
            if !announced {
                io.println(&format!(
                    "{} uses {}! Deals {} damage to all heroes.",
                    self.name(),
                    action,
                    damage
                ));
                announced = true;
            }
            strikes.push(strike(index, hero, damage, rng, io));
        }
        strikes
    }

    fn single_attack(
        &self,
        action: MonsterAction,
        target: usize,
        heroes: &mut [Hero],
        rng: &mut (impl RandomSource + ?Sized),
        io: &mut (impl BattleIo + ?Sized),
    ) -> Option<Strike> {
        let hero = heroes.get_mut(target).filter(|h| h.is_alive())?;
        let damage = action.damage(self, hero);
        io.println(&format!(
            "{} uses {} on {} for {} damage.",
            self.name(),
            action,
            hero.name(),
            damage
        ));
        Some(strike(target, hero, damage, rng, io))
    }
}

fn strike(
    index: usize,
    hero: &mut Hero,
    damage: u32,
    rng: &mut (impl RandomSource + ?Sized),
    io: &mut (impl BattleIo + ?Sized),
) -> Strike {
    let outcome = if combat::roll_dodge(hero.dodge_chance(), rng) {
        io.println(&format!("{} dodged the attack!", hero.name()));
        StrikeOutcome::Dodged
    } else {
        let health_lost = hero.take_damage(damage);
        io.println(&format!("    {} HP={}", hero.name(), hero.health()));
        StrikeOutcome::Hit { health_lost }
    };
    Strike {
        hero: index,
        damage,
        outcome,
    }
}
