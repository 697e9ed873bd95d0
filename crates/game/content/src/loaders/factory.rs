//! Content factory for loading a quest from a data directory.

use std::path::{Path, PathBuf};

use quest_core::{Action, GameConfig};

use crate::loaders::{ActionScriptLoader, ConfigLoader, LoadResult, Scenario, ScenarioLoader};

/// Content factory that loads quest content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml
/// ├── scenarios/
/// │   └── first-trial.ron
/// └── scripts/
///     └── first-trial.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    /// Creates a new content factory pointing to a data directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Factory over the data shipped with this crate.
    pub fn bundled() -> Self {
        Self::new(Path::new(env!("CARGO_MANIFEST_DIR")).join("data"))
    }

    /// Load game configuration from `config.toml`.
    ///
    /// A missing file yields the default configuration.
    pub fn load_config(&self) -> LoadResult<GameConfig> {
        let path = self.data_dir.join("config.toml");
        if !path.exists() {
            return Ok(GameConfig::default());
        }
        ConfigLoader::load(&path)
    }

    /// Load a scenario from `scenarios/{name}.ron`.
    pub fn load_scenario(&self, name: &str) -> LoadResult<Scenario> {
        let path = self.data_dir.join("scenarios").join(format!("{}.ron", name));
        ScenarioLoader::load(&path)
    }

    /// Load an action script from `scripts/{name}.ron`.
    pub fn load_script(&self, name: &str) -> LoadResult<Vec<Action>> {
        let path = self.data_dir.join("scripts").join(format!("{}.ron", name));
        ActionScriptLoader::load(&path)
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}
