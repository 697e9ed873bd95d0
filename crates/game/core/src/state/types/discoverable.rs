use super::{AreaId, DiscoverableId, Position, SearchType};

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
pub enum DiscoverableType {
    Trap,
    SecretDoor,
    Treasure,
}

impl DiscoverableType {
    /// The search that uncovers this kind of feature.
    pub const fn revealed_by(self) -> SearchType {
        match self {
            Self::Trap => SearchType::Traps,
            Self::SecretDoor => SearchType::SecretDoors,
            Self::Treasure => SearchType::Treasure,
        }
    }
}

/// Hidden board feature. `revealed` only ever moves from false to true.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DiscoverableState {
    pub id: DiscoverableId,
    pub area_id: AreaId,
    pub kind: DiscoverableType,
    pub position: Position,
    #[cfg_attr(feature = "serde", serde(default))]
    pub revealed: bool,
}

impl DiscoverableState {
    pub fn hidden(
        id: impl Into<DiscoverableId>,
        area_id: impl Into<AreaId>,
        kind: DiscoverableType,
        position: Position,
    ) -> Self {
        Self {
            id: id.into(),
            area_id: area_id.into(),
            kind,
            position,
            revealed: false,
        }
    }
}
