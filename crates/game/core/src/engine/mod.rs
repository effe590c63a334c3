//! Battle state machine and turn scheduler.
//!
//! A [`Battle`] owns both rosters, the shared random stream and the event
//! dispatcher. Each round walks the phases
//! `RoundStart → HeroesAct → MonstersAct → Regenerate → TickEffects`, and the
//! battle becomes terminal as soon as one side has no living member.
//!
//! Heroes act in roster order and read their choices from the [`BattleIo`]
//! collaborator; monsters act in roster order with no input. Given the same
//! seed and the same inputs, two runs produce identical rosters, outcome and
//! transcript.

mod errors;
mod heroes;
mod monsters;
mod upkeep;

pub use errors::{BattleError, BattlePhase};

use crate::combatant::Combatant;
use crate::config::BattleConfig;
use crate::events::{BattleEvent, BattleListener, BattleOutcome, EventDispatcher, ListenerError};
use crate::hero::Hero;
use crate::io::BattleIo;
use crate::item::Loot;
use crate::monster::Monster;
use crate::rewards::RewardPolicy;
use crate::rng::RandomSource;
use crate::status::StatusEffect;

/// Collaborators borrowed for the duration of one phase.
pub(crate) struct TurnContext<'a> {
    pub rng: &'a mut dyn RandomSource,
    pub io: &'a mut dyn BattleIo,
    pub events: &'a mut EventDispatcher,
}

impl TurnContext<'_> {
    /// Reports a landed hit. Zero-damage hits fire nothing.
    pub fn hit(&mut self, target: &dyn Combatant, damage: u32, health_lost: u32, was_alive: bool) {
        if damage == 0 {
            return;
        }
        self.events.emit(BattleEvent::DamageDealt {
            target: target.name().to_owned(),
            amount: health_lost,
        });
        self.defeated_if(target, was_alive);
    }

    pub fn status_applied(&mut self, target: &dyn Combatant, effect: StatusEffect) {
        self.events.emit(BattleEvent::StatusApplied {
            target: target.name().to_owned(),
            kind: effect.kind(),
            turns: effect.remaining_turns(),
            potency: effect.potency(),
        });
    }

    /// Fires `Defeated` if `target` just went from alive to dead.
    pub fn defeated_if(&mut self, target: &dyn Combatant, was_alive: bool) {
        if was_alive && !target.is_alive() {
            tracing::debug!(name = target.name(), "combatant defeated");
            self.events.emit(BattleEvent::Defeated {
                name: target.name().to_owned(),
            });
        }
    }
}

/// A single battle between a hero party and a group of monsters.
pub struct Battle {
    heroes: Vec<Hero>,
    monsters: Vec<Monster>,
    rng: Box<dyn RandomSource>,
    events: EventDispatcher,
    config: BattleConfig,
    round: u32,
    phase: BattlePhase,
}

impl Battle {
    /// Creates a battle. Battle-wide settings are applied to every monster.
    pub fn new(
        heroes: Vec<Hero>,
        mut monsters: Vec<Monster>,
        rng: impl RandomSource + 'static,
        config: BattleConfig,
    ) -> Self {
        for monster in &mut monsters {
            monster.configure(&config);
        }
        Self {
            heroes,
            monsters,
            rng: Box::new(rng),
            events: EventDispatcher::new(),
            config,
            round: 0,
            phase: BattlePhase::RoundStart,
        }
    }

    /// Registers an event listener.
    pub fn listen(&mut self, listener: impl BattleListener + 'static) {
        self.events.register(listener);
    }

    pub fn heroes(&self) -> &[Hero] {
        &self.heroes
    }

    pub fn monsters(&self) -> &[Monster] {
        &self.monsters
    }

    pub fn config(&self) -> &BattleConfig {
        &self.config
    }

    /// Rounds started so far.
    pub fn round(&self) -> u32 {
        self.round
    }

    pub fn phase(&self) -> BattlePhase {
        self.phase
    }

    /// Listener faults swallowed during resolution.
    pub fn listener_failures(&self) -> &[ListenerError] {
        self.events.failures()
    }

    pub fn any_hero_alive(&self) -> bool {
        self.heroes.iter().any(|h| h.is_alive())
    }

    pub fn any_monster_alive(&self) -> bool {
        self.monsters.iter().any(|m| m.is_alive())
    }

    /// The outcome, once one side is fully defeated.
    pub fn outcome(&self) -> Option<BattleOutcome> {
        if !self.any_hero_alive() {
            Some(BattleOutcome::Defeat)
        } else if !self.any_monster_alive() {
            Some(BattleOutcome::Victory)
        } else {
            None
        }
    }

    /// Runs rounds until one side is defeated.
    pub fn run(&mut self, io: &mut dyn BattleIo) -> Result<BattleOutcome, BattleError> {
        tracing::info!(
            heroes = self.heroes.len(),
            monsters = self.monsters.len(),
            difficulty = %self.config.difficulty,
            "battle started"
        );
        io.clear();
        io.println("--- Battle Start ---");

        let outcome = loop {
            if let Some(outcome) = self.play_round(io)? {
                break outcome;
            }
        };

        io.println("--- Battle End ---");
        tracing::info!(?outcome, rounds = self.round, "battle ended");
        Ok(outcome)
    }

    /// Plays one full round. Returns the outcome if the battle is over.
    ///
    /// If every monster falls while heroes act, the round ends there: no
    /// monster turns, regeneration or status ticks happen.
    pub fn play_round(
        &mut self,
        io: &mut dyn BattleIo,
    ) -> Result<Option<BattleOutcome>, BattleError> {
        if let Some(outcome) = self.outcome() {
            return Ok(Some(self.finish(outcome)));
        }

        self.round += 1;
        self.phase = BattlePhase::RoundStart;
        tracing::debug!(round = self.round, "round started");
        self.events.emit(BattleEvent::RoundStarted { round: self.round });
        self.print_status(io);

        self.phase = BattlePhase::HeroesAct;
        self.heroes_turn(io)?;
        if !self.any_monster_alive() {
            return Ok(Some(self.finish(BattleOutcome::Victory)));
        }

        self.phase = BattlePhase::MonstersAct;
        self.monsters_turn(io);
        if !self.any_hero_alive() {
            return Ok(Some(self.finish(BattleOutcome::Defeat)));
        }

        self.phase = BattlePhase::Regenerate;
        self.regenerate();

        self.phase = BattlePhase::TickEffects;
        self.tick_effects(io);

        match self.outcome() {
            Some(outcome) => Ok(Some(self.finish(outcome))),
            None => {
                self.phase = BattlePhase::RoundStart;
                Ok(None)
            }
        }
    }

    /// Hands out rewards through `policy` after a victory.
    ///
    /// Returns no loot unless the heroes won.
    pub fn award(&mut self, policy: &mut dyn RewardPolicy, io: &mut dyn BattleIo) -> Vec<Loot> {
        if self.phase != BattlePhase::Terminal(BattleOutcome::Victory) {
            return Vec::new();
        }
        policy.award(&mut self.heroes, &self.monsters, self.rng.as_mut(), io)
    }

    /// Ends the battle and hands back both rosters.
    pub fn into_parts(self) -> (Vec<Hero>, Vec<Monster>) {
        (self.heroes, self.monsters)
    }

    fn finish(&mut self, outcome: BattleOutcome) -> BattleOutcome {
        if !self.phase.is_terminal() {
            self.phase = BattlePhase::Terminal(outcome);
            self.events.emit(BattleEvent::BattleEnded { outcome });
        }
        outcome
    }

    fn print_status(&self, io: &mut dyn BattleIo) {
        io.println(&format!("Round {}", self.round));
        io.println("Heroes:");
        for hero in &self.heroes {
            let skill = hero.skill();
            io.println(&format!(
                "  {} [{}] Lv {}  HP={}  MP={}  Skill: {} (MP: {})",
                hero.name(),
                hero.class(),
                hero.level(),
                hero.health(),
                hero.mana(),
                skill.name(),
                skill.mana_cost()
            ));
            io.println(&format!(
                "     HP Pots={} MP Pots={}",
                hero.health_potions(),
                hero.mana_potions()
            ));
        }
        io.println("Monsters:");
        for (index, monster) in self.monsters.iter().enumerate() {
            io.println(&format!(
                "  [{}] {:<12} [{}] HP={}",
                index + 1,
                monster.name(),
                monster.tier(),
                monster.health()
            ));
        }
    }

    /// Splits the battle into the rosters and the collaborators a phase needs.
    fn split<'a>(
        &'a mut self,
        io: &'a mut dyn BattleIo,
    ) -> (&'a mut [Hero], &'a mut [Monster], TurnContext<'a>) {
        (
            self.heroes.as_mut_slice(),
            self.monsters.as_mut_slice(),
            TurnContext {
                rng: self.rng.as_mut(),
                io,
                events: &mut self.events,
            },
        )
    }
}

impl std::fmt::Debug for Battle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Battle")
            .field("heroes", &self.heroes)
            .field("monsters", &self.monsters)
            .field("config", &self.config)
            .field("round", &self.round)
            .field("phase", &self.phase)
            .finish_non_exhaustive()
    }
}
