//! Deterministic battle resolution for a party of heroes against monsters.
//!
//! `legends-core` defines the canonical combat rules (status effects, damage
//! and mitigation, skills, monster behavior, the round scheduler) and exposes
//! pure APIs. Randomness, player input and output are injected, so a battle
//! replays exactly from a seed and a list of inputs. All round progression
//! flows through [`engine::Battle`].
pub mod combat;
pub mod combatant;
pub mod config;
pub mod engine;
pub mod error;
pub mod events;
pub mod hero;
pub mod io;
pub mod item;
pub mod monster;
pub mod rewards;
pub mod rng;
pub mod skill;
pub mod status;

pub use combatant::{Combatant, Meter};
pub use config::{BattleConfig, Difficulty, PreviewMode};
pub use engine::{Battle, BattleError, BattlePhase};
pub use error::{ErrorSeverity, GameError};
pub use events::{
    BattleEvent, BattleListener, BattleOutcome, EventDispatcher, EventLog, ListenerError,
};
pub use hero::{Attribute, Hero, HeroClass, StartingStats};
pub use io::{BattleIo, ScriptedIo};
pub use item::{
    Armor, Consumable, ConsumableKind, ConsumableStack, Consumables, ItemEffect, ItemError, Loot,
    Weapon,
};
pub use monster::{
    Monster, MonsterAction, MonsterKind, MonsterStats, MonsterTurn, NamePool, Strike,
    StrikeOutcome, Tier, spawn_for_party,
};
pub use rewards::{RewardPolicy, StandardRewards};
pub use rng::{PcgRng, RandomSource, SequenceRng};
pub use skill::{
    DeclarativeSkill, FormulaSkill, HitOutcome, Skill, SkillBook, SkillError, SkillHit,
    SkillOutcome, StatusTemplate, TargetMode,
};
pub use status::{StatusEffect, StatusEffects, StatusKind, StatusTick};
