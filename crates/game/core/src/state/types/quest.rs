//! Quest layer: furniture, dialog, trigger side effects and objectives.

use std::collections::{BTreeMap, BTreeSet};

use super::{
    ActorId, ActorState, AreaId, DiscoverableState, Faction, FurnitureId, ObjectiveId, Position,
    SearchType,
};

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FurnitureState {
    pub id: FurnitureId,
    pub kind: String,
    pub position: Position,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DialogEntry {
    pub id: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub speaker: Option<String>,
    pub text: String,
}

/// Side effect a visibility trigger applies after revealing its tiles.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum QuestTriggerEffect {
    SpawnActors { actors: Vec<ActorState> },
    AddDiscoverables { discoverables: Vec<DiscoverableState> },
    EnqueueDialog { entries: Vec<DialogEntry> },
    PlaceFurniture { furniture: Vec<FurnitureState> },
}

#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
pub enum ObjectiveKind {
    Spawn,
    Defeat,
    Search,
}

/// Which events advance an objective. Empty filters match everything.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ObjectiveCondition {
    pub kind: ObjectiveKind,
    #[cfg_attr(feature = "serde", serde(default))]
    pub actor_ids: Vec<ActorId>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub faction: Option<Faction>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub area_ids: Vec<AreaId>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub search_type: Option<SearchType>,
    /// Explicit target; zero or absent falls back to the filter size.
    #[cfg_attr(feature = "serde", serde(default))]
    pub count: Option<u32>,
}

impl ObjectiveCondition {
    pub fn new(kind: ObjectiveKind) -> Self {
        Self {
            kind,
            actor_ids: Vec::new(),
            faction: None,
            area_ids: Vec::new(),
            search_type: None,
            count: None,
        }
    }

    pub fn with_actors(mut self, actors: impl IntoIterator<Item = ActorId>) -> Self {
        self.actor_ids.extend(actors);
        self
    }

    pub fn with_faction(mut self, faction: Faction) -> Self {
        self.faction = Some(faction);
        self
    }

    pub fn with_areas(mut self, areas: impl IntoIterator<Item = AreaId>) -> Self {
        self.area_ids.extend(areas);
        self
    }

    pub fn with_search_type(mut self, search_type: SearchType) -> Self {
        self.search_type = Some(search_type);
        self
    }

    pub fn with_count(mut self, count: u32) -> Self {
        self.count = Some(count);
        self
    }

    /// Number of distinct matches required to reach the objective.
    pub fn target(&self) -> u32 {
        if let Some(count) = self.count.filter(|count| *count > 0) {
            return count;
        }
        let filter_len = match self.kind {
            ObjectiveKind::Search => self.area_ids.len(),
            ObjectiveKind::Spawn | ObjectiveKind::Defeat => self.actor_ids.len(),
        };
        u32::try_from(filter_len).unwrap_or(u32::MAX).max(1)
    }
}

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
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
pub enum ObjectiveCategory {
    #[default]
    Primary,
    Secondary,
    Bonus,
}

/// Quest outcome an objective feeds when it reaches its target.
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
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
pub enum ObjectiveOutcome {
    Victory,
    Defeat,
    #[default]
    None,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ObjectiveDefinition {
    pub id: ObjectiveId,
    #[cfg_attr(feature = "serde", serde(default))]
    pub description: String,
    pub condition: ObjectiveCondition,
    #[cfg_attr(feature = "serde", serde(default))]
    pub category: ObjectiveCategory,
    #[cfg_attr(feature = "serde", serde(default))]
    pub contributes_to: ObjectiveOutcome,
}

impl ObjectiveDefinition {
    pub fn new(id: impl Into<ObjectiveId>, condition: ObjectiveCondition) -> Self {
        Self {
            id: id.into(),
            description: String::new(),
            condition,
            category: ObjectiveCategory::Primary,
            contributes_to: ObjectiveOutcome::None,
        }
    }

    pub fn contributing_to(mut self, outcome: ObjectiveOutcome) -> Self {
        self.contributes_to = outcome;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

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
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
#[strum(serialize_all = "kebab-case")]
pub enum ObjectiveStatus {
    #[default]
    Pending,
    Completed,
    Failed,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ObjectiveProgress {
    pub current: u32,
    pub target: u32,
    pub status: ObjectiveStatus,
}

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
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
#[strum(serialize_all = "kebab-case")]
pub enum QuestStatus {
    #[default]
    InProgress,
    Victory,
    Defeat,
}

/// Read-only view of one objective, carried by progress events.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ObjectiveSnapshot {
    pub id: ObjectiveId,
    pub description: String,
    pub category: ObjectiveCategory,
    pub contributes_to: ObjectiveOutcome,
    pub current: u32,
    pub target: u32,
    pub status: ObjectiveStatus,
}

/// Objective definitions in declaration order, with their progress.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct QuestObjectivesState {
    pub definitions: Vec<ObjectiveDefinition>,
    pub progress: BTreeMap<ObjectiveId, ObjectiveProgress>,
    /// Keys (actor or area ids) that already advanced each objective.
    pub tracking: BTreeMap<ObjectiveId, BTreeSet<String>>,
    pub overall_status: QuestStatus,
}

impl QuestObjectivesState {
    pub fn from_definitions(definitions: Vec<ObjectiveDefinition>) -> Self {
        let progress = definitions
            .iter()
            .map(|definition| {
                let progress = ObjectiveProgress {
                    current: 0,
                    target: definition.condition.target(),
                    status: ObjectiveStatus::Pending,
                };
                (definition.id.clone(), progress)
            })
            .collect();
        let tracking = definitions
            .iter()
            .map(|definition| (definition.id.clone(), BTreeSet::new()))
            .collect();

        Self {
            definitions,
            progress,
            tracking,
            overall_status: QuestStatus::InProgress,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    pub fn snapshot(&self) -> Vec<ObjectiveSnapshot> {
        self.definitions
            .iter()
            .filter_map(|definition| {
                let progress = self.progress.get(&definition.id)?;
                Some(ObjectiveSnapshot {
                    id: definition.id.clone(),
                    description: definition.description.clone(),
                    category: definition.category,
                    contributes_to: definition.contributes_to,
                    current: progress.current,
                    target: progress.target,
                    status: progress.status,
                })
            })
            .collect()
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct QuestState {
    pub furniture: BTreeMap<FurnitureId, FurnitureState>,
    pub dialog_queue: Vec<DialogEntry>,
    pub objectives: QuestObjectivesState,
    /// Interactions already performed, e.g. `door:<id>`.
    pub interaction_history: BTreeSet<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn target_prefers_explicit_count() {
        let condition = ObjectiveCondition::new(ObjectiveKind::Defeat)
            .with_actors([ActorId::from("a"), ActorId::from("b")])
            .with_count(5);
        assert_eq!(condition.target(), 5);
    }

    #[test]
    fn target_falls_back_to_filter_size_then_one() {
        let defeat = ObjectiveCondition::new(ObjectiveKind::Defeat)
            .with_actors([ActorId::from("a"), ActorId::from("b")])
            .with_count(0);
        assert_eq!(defeat.target(), 2);

        // Search targets ignore actor filters.
        let search =
            ObjectiveCondition::new(ObjectiveKind::Search).with_actors([ActorId::from("a")]);
        assert_eq!(search.target(), 1);

        let search = search.with_areas(["r1", "r2", "r3"].map(AreaId::from));
        assert_eq!(search.target(), 3);
    }

    #[test]
    fn objectives_start_pending_in_progress() {
        let objectives = QuestObjectivesState::from_definitions(vec![ObjectiveDefinition::new(
            "slay",
            ObjectiveCondition::new(ObjectiveKind::Defeat),
        )]);
        let snapshot = objectives.snapshot();
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot[0].status, ObjectiveStatus::Pending);
        assert_eq!(snapshot[0].category, ObjectiveCategory::Primary);
        assert_eq!(snapshot[0].contributes_to, ObjectiveOutcome::None);
        assert_eq!(objectives.overall_status, QuestStatus::InProgress);
    }
}
