//! Battle configuration loader.

use std::path::Path;

use legends_core::BattleConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for battle configuration from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config data from a TOML file.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the TOML file containing BattleConfig
    ///
    /// Missing keys keep their defaults.
    pub fn load(path: &Path) -> LoadResult<BattleConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    /// Parse config data from TOML text.
    pub fn parse(content: &str) -> LoadResult<BattleConfig> {
        let config: BattleConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;

        if config.regen_factor.is_nan() || config.regen_factor < 1.0 {
            anyhow::bail!(
                "regen_factor must be at least 1.0, got {}",
                config.regen_factor
            );
        }
        if !(0.0..=1.0).contains(&config.max_monster_dodge) {
            anyhow::bail!(
                "max_monster_dodge must lie in [0, 1], got {}",
                config.max_monster_dodge
            );
        }
        if config.max_monster_level_delta > BattleConfig::MAX_MONSTER_LEVEL {
            anyhow::bail!(
                "max_monster_level_delta must be at most {}, got {}",
                BattleConfig::MAX_MONSTER_LEVEL,
                config.max_monster_level_delta
            );
        }
        Ok(config)
    }
}
