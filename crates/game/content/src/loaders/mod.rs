//! Content loaders for reading game data from files.
//!
//! Each loader turns a RON or TOML file into the legends-core value it
//! describes. [`ContentFactory`] resolves the standard file names inside a
//! data directory.

pub mod config;
pub mod factory;
pub mod skills;

pub use config::ConfigLoader;
pub use factory::ContentFactory;
pub use skills::{SkillLoader, SkillSpec, StatusSpec};

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
