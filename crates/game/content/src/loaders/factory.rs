//! Content factory for loading battle content from a data directory.

use std::path::{Path, PathBuf};

use legends_core::{BattleConfig, SkillBook};

use crate::loaders::{ConfigLoader, LoadResult, SkillLoader};

/// Content factory that loads all battle content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml
/// └── skills.ron
/// ```
///
/// Both files are optional: a missing file yields the built-in content.
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    pub const CONFIG_FILE: &'static str = "config.toml";
    pub const SKILLS_FILE: &'static str = "skills.ron";

    /// Creates a new content factory pointing to a data directory.
    ///
    /// # Arguments
    ///
    /// * `data_dir` - Path to the directory containing data files
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load battle configuration from `config.toml`, or the defaults if absent.
    pub fn load_config(&self) -> LoadResult<BattleConfig> {
        let path = self.data_dir.join(Self::CONFIG_FILE);
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(BattleConfig::default());
        }
        ConfigLoader::load(&path)
    }

    /// Load the skill book from `skills.ron`, or the standard book if absent.
    pub fn load_skills(&self) -> LoadResult<SkillBook> {
        let path = self.data_dir.join(Self::SKILLS_FILE);
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no skill file, using standard skills");
            return Ok(SkillBook::standard());
        }
        SkillLoader::load(&path)
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}
