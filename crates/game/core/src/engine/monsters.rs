//! Monsters' phase: plan announcements, then one action per living monster.

use crate::combatant::Combatant;
use crate::config::PreviewMode;
use crate::events::BattleEvent;
use crate::hero::Hero;
use crate::io::BattleIo;
use crate::monster::{MonsterAction, MonsterTurn, StrikeOutcome};
use crate::rng::RandomSource;

use super::Battle;

impl Battle {
    pub(super) fn monsters_turn(&mut self, io: &mut dyn BattleIo) {
        let mode = self.config.preview_mode;
        let (heroes, monsters, mut ctx) = self.split(io);
        ctx.io.println("Monsters' turn:");

        let mut plans: Vec<Option<MonsterAction>> = vec![None; monsters.len()];
        for (index, monster) in monsters.iter().enumerate() {
            if !monster.is_alive() {
                continue;
            }
            let preview = monster.preview(ctx.rng);
            ctx.io.println(&format!(
                "  [{}] {} plans: {}",
                index + 1,
                monster.name(),
                preview.preview_label()
            ));
            if mode == PreviewMode::Committed {
                plans[index] = Some(preview);
            }
        }

        for (index, monster) in monsters.iter().enumerate() {
            if !monster.is_alive() {
                continue;
            }
            ctx.events.emit(BattleEvent::TurnStarted {
                actor: monster.name().to_owned(),
            });
            let Some(target) = pick_living_hero(heroes, ctx.rng) else {
                return;
            };

            match monster.take_turn(plans[index], target, heroes, ctx.rng, ctx.io) {
                MonsterTurn::Stunned => {
                    tracing::debug!(monster = monster.name(), "monster stunned");
                }
                MonsterTurn::Acted { action, strikes } => {
                    tracing::debug!(monster = monster.name(), %action, "monster acted");
                    for strike in strikes {
                        if let StrikeOutcome::Hit { health_lost } = strike.outcome {
                            ctx.hit(&heroes[strike.hero], strike.damage, health_lost, true);
                        }
                    }
                }
            }
        }
    }
}

/// Draws a uniformly random living hero. One draw unless nobody is alive.
fn pick_living_hero(heroes: &[Hero], rng: &mut dyn RandomSource) -> Option<usize> {
    let alive: Vec<usize> = heroes
        .iter()
        .enumerate()
        .filter(|(_, h)| h.is_alive())
        .map(|(index, _)| index)
        .collect();
    if alive.is_empty() {
        return None;
    }
    let pick = rng.next_int(alive.len() as u32) as usize;
    Some(alive[pick])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hero::HeroClass;
    use crate::rng::SequenceRng;

    #[test]
    fn picks_among_living_heroes_only() {
        let mut heroes = vec![
            Hero::new("Aria", HeroClass::Warrior),
            Hero::new("Bram", HeroClass::Sorcerer),
            Hero::new("Cass", HeroClass::Paladin),
        ];
        heroes[0].take_damage(100_000);

        let mut rng = SequenceRng::new(vec![0.0, 0.99]);
        assert_eq!(pick_living_hero(&heroes, &mut rng), Some(1));
        assert_eq!(pick_living_hero(&heroes, &mut rng), Some(2));
        assert_eq!(rng.draws(), 2);
    }

    #[test]
    fn no_draw_when_party_is_down() {
        let mut heroes = vec![Hero::new("Aria", HeroClass::Warrior)];
        heroes[0].take_damage(100_000);
        let mut rng = SequenceRng::constant(0.5);
        assert_eq!(pick_living_hero(&heroes, &mut rng), None);
        assert_eq!(rng.draws(), 0);
    }
}
