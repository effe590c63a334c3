//! Heroes' phase: menu input, targeting and action resolution.

use crate::combat;
use crate::combatant::Combatant;
use crate::events::BattleEvent;
use crate::hero::Hero;
use crate::io::BattleIo;
use crate::item::ItemEffect;
use crate::monster::Monster;
use crate::skill::HitOutcome;

use super::{Battle, BattleError, TurnContext};

/// Menu entries, numbered as shown to the player.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum MenuChoice {
    Attack,
    Skill,
    HealthPotion,
    ManaPotion,
    Skip,
    Item,
}

impl MenuChoice {
    fn parse(raw: &str) -> Option<Self> {
        match raw.trim().parse::<u8>().ok()? {
            1 => Some(Self::Attack),
            2 => Some(Self::Skill),
            3 => Some(Self::HealthPotion),
            4 => Some(Self::ManaPotion),
            5 => Some(Self::Skip),
            6 => Some(Self::Item),
            _ => None,
        }
    }
}

/// Whether the hero's turn is over after a menu choice.
enum Step {
    Done,
    Reprompt,
}

impl Battle {
    /// Every living hero acts once, in roster order. Stops early when the
    /// last monster falls.
    pub(super) fn heroes_turn(&mut self, io: &mut dyn BattleIo) -> Result<(), BattleError> {
        let (heroes, monsters, mut ctx) = self.split(io);
        ctx.io.println("Heroes' turn:");

        for hero in heroes.iter_mut() {
            if !hero.is_alive() {
                continue;
            }
            ctx.events.emit(BattleEvent::TurnStarted {
                actor: hero.name().to_owned(),
            });
            hero_action(hero, monsters, &mut ctx)?;
            if !monsters.iter().any(|m| m.is_alive()) {
                break;
            }
        }
        Ok(())
    }
}

/// Prompts until the hero commits to an action.
fn hero_action(
    hero: &mut Hero,
    monsters: &mut [Monster],
    ctx: &mut TurnContext<'_>,
) -> Result<(), BattleError> {
    loop {
        print_menu(hero, ctx.io);
        let raw = ctx.io.read_line().ok_or_else(|| BattleError::InputClosed {
            hero: hero.name().to_owned(),
        })?;

        let Some(choice) = MenuChoice::parse(&raw) else {
            ctx.io.println("Invalid choice.");
            continue;
        };
        tracing::trace!(hero = hero.name(), ?choice, "menu choice");

        let step = match choice {
            MenuChoice::Attack => {
                normal_attack(hero, monsters, ctx);
                Step::Done
            }
            MenuChoice::Skill => use_skill(hero, monsters, ctx),
            MenuChoice::HealthPotion => match hero.drink_health_potion() {
                Ok(_) => {
                    ctx.io.println(&format!(
                        "{} used a health potion. HP is now {}",
                        hero.name(),
                        hero.health()
                    ));
                    Step::Done
                }
                Err(error) => {
                    ctx.io.println(&error.to_string());
                    Step::Reprompt
                }
            },
            MenuChoice::ManaPotion => match hero.drink_mana_potion() {
                Ok(_) => {
                    ctx.io.println(&format!(
                        "{} used a mana potion. MP is now {}",
                        hero.name(),
                        hero.mana().current()
                    ));
                    Step::Done
                }
                Err(error) => {
                    ctx.io.println(&error.to_string());
                    Step::Reprompt
                }
            },
            MenuChoice::Skip => {
                ctx.io.println(&format!("{} skips the turn.", hero.name()));
                Step::Done
            }
            MenuChoice::Item => use_item(hero, monsters, ctx),
        };

        if let Step::Done = step {
            return Ok(());
        }
    }
}

fn print_menu(hero: &Hero, io: &mut dyn BattleIo) {
    let skill = hero.skill();
    io.println("");
    io.println(&format!("Action for {}:", hero.name()));
    io.println("  1) Normal Attack");
    io.println(&format!(
        "  2) Use Skill ({}, MP cost: {})",
        skill.name(),
        skill.mana_cost()
    ));
    io.println(&format!(
        "  3) Use Health Potion (+{} HP)",
        hero.health_potion_amount()
    ));
    io.println(&format!(
        "  4) Use Mana Potion (+{} MP)",
        hero.mana_potion_amount()
    ));
    io.println("  5) Skip");
    io.println("  6) Use Item");
    io.print("Choose (1-6): ");
}

/// Picks a living monster by its 1-based roster index.
///
/// A lone survivor is chosen without asking. Unparseable, out-of-range,
/// dead or missing input falls back to the first living monster.
pub(super) fn choose_target(monsters: &[Monster], io: &mut dyn BattleIo) -> Option<usize> {
    let mut alive = monsters
        .iter()
        .enumerate()
        .filter(|(_, m)| m.is_alive())
        .map(|(index, _)| index);
    let first = alive.next()?;
    if alive.next().is_none() {
        return Some(first);
    }

    io.print("Choose target monster by index: ");
    let picked = io
        .read_line()
        .and_then(|raw| raw.trim().parse::<usize>().ok())
        .and_then(|n| n.checked_sub(1))
        .filter(|&index| monsters.get(index).is_some_and(|m| m.is_alive()));
    Some(picked.unwrap_or(first))
}

fn normal_attack(hero: &mut Hero, monsters: &mut [Monster], ctx: &mut TurnContext<'_>) {
    let Some(index) = choose_target(monsters, ctx.io) else {
        return;
    };
    let target = &mut monsters[index];
    let damage = hero.attack_damage();

    if combat::roll_dodge(target.dodge_chance(), ctx.rng) {
        ctx.io.println(&format!(
            "{} dodged {}'s attack!",
            target.name(),
            hero.name()
        ));
        return;
    }

    let was_alive = target.is_alive();
    let health_lost = target.take_damage(damage);
    ctx.io.println(&format!(
        "{} attacked {} for {} damage.",
        hero.name(),
        target.name(),
        damage
    ));
    ctx.io
        .println(&format!("    {} HP={}", target.name(), target.health()));
    ctx.hit(&*target, damage, health_lost, was_alive);
}

fn use_skill(hero: &mut Hero, monsters: &mut [Monster], ctx: &mut TurnContext<'_>) -> Step {
    let skill = hero.skill().clone();
    if hero.mana().current() < skill.mana_cost() {
        ctx.io
            .println(&format!("Not enough MP to use {}.", skill.name()));
        return Step::Reprompt;
    }

    let target = if skill.is_area() {
        0
    } else {
        match choose_target(monsters, ctx.io) {
            Some(index) => index,
            None => return Step::Done,
        }
    };

    let alive_before: Vec<bool> = monsters.iter().map(|m| m.is_alive()).collect();
    match skill.cast(hero, monsters, target, ctx.rng, ctx.io) {
        Ok(outcome) => {
            tracing::debug!(
                hero = hero.name(),
                skill = skill.name(),
                mana = outcome.mana_spent,
                damage = outcome.total_damage,
                "skill resolved"
            );
            for hit in &outcome.hits {
                let HitOutcome::Landed {
                    damage,
                    health_lost,
                    status,
                } = hit.outcome
                else {
                    continue;
                };
                let monster = &monsters[hit.target];
                if let Some(effect) = status {
                    ctx.status_applied(monster, effect);
                }
                ctx.hit(monster, damage, health_lost, alive_before[hit.target]);
            }
            Step::Done
        }
        Err(error) => {
            tracing::debug!(hero = hero.name(), %error, "skill rejected");
            Step::Reprompt
        }
    }
}

fn use_item(hero: &mut Hero, monsters: &mut [Monster], ctx: &mut TurnContext<'_>) -> Step {
    if hero.consumables().is_empty() {
        ctx.io.println("No items in inventory.");
        return Step::Reprompt;
    }

    ctx.io.println("Items:");
    for (position, stack) in hero.consumables().stacks().iter().enumerate() {
        let item = stack.item();
        let note = if item.is_usable(hero, monsters) {
            ""
        } else {
            "(not usable)"
        };
        ctx.io.println(&format!(
            "  {}) {} x{}  Lv:{}  {}",
            position + 1,
            item.name,
            stack.count(),
            item.level,
            note
        ));
    }

    ctx.io.print("Choose item to use (0 cancel): ");
    let Some(slot) = ctx
        .io
        .read_line()
        .and_then(|raw| raw.trim().parse::<usize>().ok())
        .and_then(|n| n.checked_sub(1))
    else {
        return Step::Reprompt;
    };
    let Some(item) = hero.consumables().get(slot).cloned() else {
        return Step::Reprompt;
    };

    if !item.is_usable(hero, monsters) {
        ctx.io.println("That item cannot be used right now.");
        return Step::Reprompt;
    }

    let target = if item.needs_target() {
        match choose_target(monsters, ctx.io) {
            Some(index) => Some(index),
            None => return Step::Reprompt,
        }
    } else {
        None
    };

    ctx.io.print(&format!("Confirm use {}? (y/n): ", item.name));
    let confirmed = ctx
        .io
        .read_line()
        .is_some_and(|raw| raw.trim().eq_ignore_ascii_case("y"));
    if !confirmed {
        ctx.io.println("Cancelled.");
        return Step::Reprompt;
    }

    let monster = target.and_then(|index| monsters.get_mut(index));
    match hero.use_consumable(slot, monster, ctx.io) {
        Ok(ItemEffect::StatusApplied(effect)) => {
            if let Some(index) = target {
                ctx.status_applied(&monsters[index], effect);
            }
        }
        Ok(effect) => tracing::debug!(hero = hero.name(), ?effect, "item used"),
        Err(error) => {
            tracing::debug!(hero = hero.name(), %error, "item failed");
            ctx.io.println("Failed to use item.");
        }
    }
    Step::Done
}
