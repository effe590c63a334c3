//! Error types for battle resolution.

use crate::error::{ErrorSeverity, GameError};

/// Errors that stop a battle before either side is defeated.
///
/// Player mistakes and resource shortfalls never surface here: they are
/// re-prompted inside the hero's turn.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum BattleError {
    #[error("input closed while {hero} was choosing an action")]
    InputClosed { hero: String },
}

impl GameError for BattleError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::InputClosed { .. } => ErrorSeverity::Fatal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::InputClosed { .. } => "BATTLE_INPUT_CLOSED",
        }
    }
}

/// Battle state machine states.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BattlePhase {
    RoundStart,
    HeroesAct,
    MonstersAct,
    Regenerate,
    TickEffects,
    Terminal(crate::events::BattleOutcome),
}

impl BattlePhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            BattlePhase::RoundStart => "round_start",
            BattlePhase::HeroesAct => "heroes_act",
            BattlePhase::MonstersAct => "monsters_act",
            BattlePhase::Regenerate => "regenerate",
            BattlePhase::TickEffects => "tick_effects",
            BattlePhase::Terminal(_) => "terminal",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, BattlePhase::Terminal(_))
    }
}
