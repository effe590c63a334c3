//! Terminal client for the battle engine.
//!
//! The binary is a thin composition root: it reads [`ClientConfig`] from the
//! environment, installs file logging, and plays one [`session`] through
//! [`TerminalIo`].

pub mod config;
pub mod logging;
pub mod session;
pub mod terminal;

pub use config::{ClientConfig, PartyMember};
pub use terminal::TerminalIo;
