//! Data-driven scenario content and loaders.
//!
//! This crate turns data files into `quest-core` inputs:
//! - Scenarios (board, actors, cards, quest layer) from RON
//! - Engine configuration from TOML
//! - Action scripts from RON, with actions tagged by string kind
//!
//! Loaded setups are checked for consistency before they reach the engine.

pub mod check;
pub mod error;

#[cfg(feature = "loaders")]
pub mod loaders;

pub use check::validate_setup;
pub use error::ScenarioError;

#[cfg(feature = "loaders")]
pub use loaders::{
    ActionScriptLoader, ConfigLoader, ContentFactory, LoadResult, Scenario, ScenarioLoader,
};
