//! Scenario loader.
//!
//! A scenario file describes one quest: the board, the starting actors, the
//! card catalog and the quest layer. Cards are listed rather than keyed so
//! each id is written once.

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use quest_core::{
    ActorId, ActorState, BoardState, CardCatalog, DialogEntry, DiscoverableState,
    EquipmentDefinition, FurnitureState, GameSetup, ObjectiveDefinition, OwnerKey, Position,
    SpellDefinition,
};
use serde::Deserialize;
use tracing::debug;

use crate::check::validate_setup;
use crate::loaders::{LoadResult, read_file, ron_options};

/// Scenario data structure for RON files.
#[derive(Debug, Clone, Deserialize)]
struct ScenarioRon {
    #[serde(default)]
    name: String,
    #[serde(default)]
    description: String,
    board: BoardState,
    actors: Vec<ActorState>,
    #[serde(default)]
    turn_order: Option<Vec<ActorId>>,
    #[serde(default)]
    spells: Vec<SpellDefinition>,
    #[serde(default)]
    equipment: Vec<EquipmentDefinition>,
    #[serde(default)]
    discoverables: Vec<DiscoverableState>,
    #[serde(default)]
    furniture: Vec<FurnitureState>,
    #[serde(default)]
    dialog: Vec<DialogEntry>,
    #[serde(default)]
    objectives: Vec<ObjectiveDefinition>,
    #[serde(default)]
    discovered: BTreeMap<OwnerKey, BTreeSet<Position>>,
}

impl ScenarioRon {
    fn into_scenario(self) -> Scenario {
        let cards = self
            .spells
            .into_iter()
            .fold(CardCatalog::default(), CardCatalog::with_spell);
        let cards = self
            .equipment
            .into_iter()
            .fold(cards, CardCatalog::with_equipment);

        let mut setup = GameSetup::new(self.board, self.actors)
            .with_cards(cards)
            .with_discoverables(self.discoverables)
            .with_furniture(self.furniture)
            .with_dialog(self.dialog)
            .with_objectives(self.objectives);
        setup.turn_order = self.turn_order;
        setup.discovered = self.discovered;

        Scenario {
            name: self.name,
            description: self.description,
            setup,
        }
    }
}

/// A loaded, checked scenario.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Scenario {
    pub name: String,
    pub description: String,
    pub setup: GameSetup,
}

/// Loader for scenarios from RON files.
pub struct ScenarioLoader;

impl ScenarioLoader {
    /// Load a scenario from a RON file and check it for consistency.
    pub fn load(path: &Path) -> LoadResult<Scenario> {
        let content = read_file(path)?;
        let scenario =
            Self::parse(&content).map_err(|e| anyhow::anyhow!("{}: {}", path.display(), e))?;
        debug!(
            path = %path.display(),
            name = %scenario.name,
            actors = scenario.setup.actors.len(),
            "scenario loaded"
        );
        Ok(scenario)
    }

    pub fn parse(content: &str) -> LoadResult<Scenario> {
        let data: ScenarioRon = ron_options()
            .from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse scenario RON: {}", e))?;
        let scenario = data.into_scenario();
        validate_setup(&scenario.setup)
            .map_err(|e| anyhow::anyhow!("Invalid scenario '{}': {}", scenario.name, e))?;
        Ok(scenario)
    }
}
