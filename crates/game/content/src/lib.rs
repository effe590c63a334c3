//! Data-driven content definitions and loaders.
//!
//! This crate provides loaders for RON/TOML data files:
//! - Declarative hero skills (data-driven via RON)
//! - Battle configuration (data-driven via TOML)
//!
//! Content is resolved once, before a battle starts, and never appears in
//! battle state.
//!
//! All loaders use legends-core types directly with serde for RON/TOML deserialization.

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{ConfigLoader, ContentFactory, SkillLoader, SkillSpec, StatusSpec};
