//! Content loaders for reading game data from files.
//!
//! Scenarios and action scripts are RON; engine configuration is TOML. Every
//! loader also offers a `parse` entry point over an in-memory string.

pub mod config;
pub mod factory;
pub mod scenario;
pub mod script;

pub use config::ConfigLoader;
pub use factory::ContentFactory;
pub use scenario::{Scenario, ScenarioLoader};
pub use script::ActionScriptLoader;

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}

/// RON options shared by every loader. `Option` fields may be written bare.
pub(crate) fn ron_options() -> ron::Options {
    ron::Options::default().with_default_extension(ron::extensions::Extensions::IMPLICIT_SOME)
}
