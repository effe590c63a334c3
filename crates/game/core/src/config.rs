//! Battle configuration constants and tunable parameters.
//!
//! A single value is handed to [`crate::engine::Battle`] at construction; there is
//! no process-wide difficulty switch.

/// Tunables for one battle.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BattleConfig {
    /// Difficulty mode. `InstantDefeat` zeroes any monster that takes a hit.
    pub difficulty: Difficulty,

    /// Multiplier applied to living heroes' health and mana after every round.
    pub regen_factor: f64,

    /// Upper bound for a monster's normalized dodge chance.
    pub max_monster_dodge: f64,

    /// Maximum levels a spawned monster may sit above the party's best hero.
    pub max_monster_level_delta: u32,

    /// How the monster action preview relates to the executed action.
    pub preview_mode: PreviewMode,
}

impl BattleConfig {
    // ===== fixed game rules =====
    /// Health per level for heroes and monsters alike.
    pub const HEALTH_PER_LEVEL: u32 = 100;
    /// Experience required per level: `level * XP_PER_LEVEL_FACTOR`.
    pub const XP_PER_LEVEL_FACTOR: u32 = 6;
    /// Mana restored by a mana potion.
    pub const MANA_POTION_RESTORE: u32 = 50;
    /// Highest level a spawned monster can have.
    pub const MAX_MONSTER_LEVEL: u32 = 1_000;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_REGEN_FACTOR: f64 = 1.10;
    pub const DEFAULT_MAX_MONSTER_DODGE: f64 = 0.95;
    pub const DEFAULT_MAX_MONSTER_LEVEL_DELTA: u32 = 3;

    pub fn new() -> Self {
        Self {
            difficulty: Difficulty::Normal,
            regen_factor: Self::DEFAULT_REGEN_FACTOR,
            max_monster_dodge: Self::DEFAULT_MAX_MONSTER_DODGE,
            max_monster_level_delta: Self::DEFAULT_MAX_MONSTER_LEVEL_DELTA,
            preview_mode: PreviewMode::Independent,
        }
    }

    pub fn with_difficulty(difficulty: Difficulty) -> Self {
        Self {
            difficulty,
            ..Self::new()
        }
    }

    /// Builder-style override of the preview mode.
    #[must_use]
    pub fn preview_mode(mut self, mode: PreviewMode) -> Self {
        self.preview_mode = mode;
        self
    }
}

impl Default for BattleConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Difficulty modes.
///
/// Only `InstantDefeat` changes battle resolution; the others are labels
/// consumed by spawning and presentation layers.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::IntoStaticStr,
)]
#[strum(ascii_case_insensitive, serialize_all = "SCREAMING_SNAKE_CASE")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum Difficulty {
    Easy,
    #[default]
    Normal,
    Hard,
    /// Developer override: every hit on a monster defeats it.
    #[strum(to_string = "INSTANT_DEFEAT", serialize = "TEST")]
    #[cfg_attr(feature = "serde", serde(alias = "TEST"))]
    InstantDefeat,
}

impl Difficulty {
    pub const fn is_instant_defeat(self) -> bool {
        matches!(self, Self::InstantDefeat)
    }
}

/// Relationship between the "plans:" preview and the action a monster executes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PreviewMode {
    /// Preview and execution draw from the stream separately and may disagree.
    #[default]
    Independent,
    /// The previewed action is stored and executed without a second selection draw.
    Committed,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn difficulty_parses_test_alias() {
        assert_eq!("TEST".parse::<Difficulty>(), Ok(Difficulty::InstantDefeat));
        assert_eq!("test".parse::<Difficulty>(), Ok(Difficulty::InstantDefeat));
        assert_eq!("instant_defeat".parse::<Difficulty>(), Ok(Difficulty::InstantDefeat));
        assert_eq!("normal".parse::<Difficulty>(), Ok(Difficulty::Normal));
        assert!("nightmare".parse::<Difficulty>().is_err());
    }

    #[test]
    fn defaults_match_game_rules() {
        let config = BattleConfig::default();
        assert_eq!(config.difficulty, Difficulty::Normal);
        assert_eq!(config.regen_factor, 1.10);
        assert_eq!(config.max_monster_dodge, 0.95);
        assert_eq!(config.preview_mode, PreviewMode::Independent);
    }
}
