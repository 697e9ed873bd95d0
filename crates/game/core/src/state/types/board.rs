use std::collections::BTreeSet;

use super::{AreaId, DoorId, Position, SearchKinds, SearchType, VisibilityTrigger};

/// Door placed on the board. A closed door blocks movement and sight.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DoorState {
    pub id: DoorId,
    pub position: Position,
    #[cfg_attr(feature = "serde", serde(default))]
    pub open: bool,
}

impl DoorState {
    pub fn closed(id: impl Into<DoorId>, position: Position) -> Self {
        Self {
            id: id.into(),
            position,
            open: false,
        }
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
pub enum AreaKind {
    #[default]
    Room,
    Corridor,
    Exterior,
}

/// Named search zone covering a set of tiles.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchArea {
    pub id: AreaId,
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub kind: AreaKind,
    pub tiles: Vec<Position>,
    /// Search kinds permitted here. An empty set permits every kind.
    #[cfg_attr(feature = "serde", serde(default))]
    pub allowed_searches: SearchKinds,
}

impl SearchArea {
    pub fn new(id: impl Into<AreaId>, name: impl Into<String>, tiles: Vec<Position>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind: AreaKind::Room,
            tiles,
            allowed_searches: SearchKinds::empty(),
        }
    }

    pub fn with_allowed_searches(mut self, allowed: SearchKinds) -> Self {
        self.allowed_searches = allowed;
        self
    }

    pub fn contains(&self, position: Position) -> bool {
        self.tiles.contains(&position)
    }

    pub fn allows(&self, search_type: SearchType) -> bool {
        self.allowed_searches.is_empty() || self.allowed_searches.has(search_type)
    }
}

/// Static board layout plus the mutable door flags.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BoardState {
    pub width: u32,
    pub height: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub blocked: BTreeSet<Position>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub doors: Vec<DoorState>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub areas: Vec<SearchArea>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub visibility_triggers: Vec<VisibilityTrigger>,
}

impl BoardState {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    pub fn with_blocked(mut self, tiles: impl IntoIterator<Item = Position>) -> Self {
        self.blocked.extend(tiles);
        self
    }

    pub fn with_door(mut self, door: DoorState) -> Self {
        self.doors.push(door);
        self
    }

    pub fn with_area(mut self, area: SearchArea) -> Self {
        self.areas.push(area);
        self
    }

    pub fn with_trigger(mut self, trigger: VisibilityTrigger) -> Self {
        self.visibility_triggers.push(trigger);
        self
    }

    pub fn door(&self, id: &DoorId) -> Option<&DoorState> {
        self.doors.iter().find(|door| &door.id == id)
    }

    pub fn door_mut(&mut self, id: &DoorId) -> Option<&mut DoorState> {
        self.doors.iter_mut().find(|door| &door.id == id)
    }

    pub fn area(&self, id: &AreaId) -> Option<&SearchArea> {
        self.areas.iter().find(|area| &area.id == id)
    }
}
