//! End-of-round upkeep: regeneration, then status ticks.

use crate::combatant::Combatant;
use crate::events::BattleEvent;
use crate::status::{StatusKind, StatusTick};

use super::{Battle, TurnContext};

impl Battle {
    /// Living heroes regenerate a fraction of both pools.
    pub(super) fn regenerate(&mut self) {
        let factor = self.config.regen_factor;
        for hero in self.heroes.iter_mut().filter(|h| h.is_alive()) {
            hero.regenerate(factor);
        }
    }

    /// Ticks every living combatant once: heroes first, then monsters.
    ///
    /// If the hero ticks kill the whole party, monster ledgers are left
    /// untouched so the round cannot end with both sides down.
    pub(super) fn tick_effects(&mut self, io: &mut dyn crate::io::BattleIo) {
        let (heroes, monsters, mut ctx) = self.split(io);

        for hero in heroes.iter_mut().filter(|h| h.is_alive()) {
            let report = hero.tick_status_effects();
            announce(&*hero, &report, true, &mut ctx);
        }
        if !heroes.iter().any(|h| h.is_alive()) {
            tracing::debug!("party fell to status damage");
            return;
        }

        for monster in monsters.iter_mut().filter(|m| m.is_alive()) {
            let report = monster.tick_status_effects();
            announce(&*monster, &report, false, &mut ctx);
        }
    }
}

/// Prints and emits what a ledger tick did to `bearer`.
///
/// Slow only gets a line for heroes.
fn announce(
    bearer: &dyn Combatant,
    report: &[StatusTick],
    report_slow: bool,
    ctx: &mut TurnContext<'_>,
) {
    let name = bearer.name();
    for tick in report {
        if tick.damage > 0 {
            ctx.io.println(&format!("{name} suffers {} from {}", tick.damage, tick.kind));
            ctx.events.emit(BattleEvent::StatusDamage {
                target: name.to_owned(),
                kind: tick.kind,
                amount: tick.damage,
            });
        } else if tick.kind == StatusKind::Stun {
            ctx.io.println(&format!("{name} is stunned ({} turns left)", tick.turns_left));
        } else if tick.kind == StatusKind::Slow && report_slow {
            ctx.io.println(&format!("{name} is slowed ({} turns left)", tick.turns_left));
        }
        if tick.expired {
            ctx.events.emit(BattleEvent::StatusExpired {
                target: name.to_owned(),
                kind: tick.kind,
            });
        }
    }
    // Every ticked combatant was alive going in.
    ctx.defeated_if(bearer, true);
}
