//! Search rules and the one-shot search history.

use std::collections::BTreeMap;

use bitflags::bitflags;

use super::{ActorId, AreaId};

/// Kind of search an actor may perform inside an area.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
pub enum SearchType {
    Traps,
    SecretDoors,
    Treasure,
}

impl SearchType {
    pub const fn flag(self) -> SearchKinds {
        match self {
            Self::Traps => SearchKinds::TRAPS,
            Self::SecretDoors => SearchKinds::SECRET_DOORS,
            Self::Treasure => SearchKinds::TREASURE,
        }
    }
}

bitflags! {
    /// Set of [`SearchType`]s, used for area permissions and history entries.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct SearchKinds: u8 {
        const TRAPS        = 1 << 0;
        const SECRET_DOORS = 1 << 1;
        const TREASURE     = 1 << 2;
    }
}

impl SearchKinds {
    pub const fn has(self, kind: SearchType) -> bool {
        self.contains(kind.flag())
    }
}

impl From<SearchType> for SearchKinds {
    fn from(kind: SearchType) -> Self {
        kind.flag()
    }
}

impl FromIterator<SearchType> for SearchKinds {
    fn from_iter<I: IntoIterator<Item = SearchType>>(iter: I) -> Self {
        iter.into_iter()
            .fold(SearchKinds::empty(), |acc, kind| acc | kind.flag())
    }
}

/// Scope at which a completed search is remembered.
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
pub enum SearchHistoryMode {
    /// One search of each kind per area, shared by everyone.
    #[default]
    PerArea,
    /// One search of each kind per area for each hero.
    PerHero,
}

/// Search permissions fixed at game creation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SearchRules {
    pub require_heroes_only: bool,
    pub require_no_enemies: bool,
    pub history_mode: SearchHistoryMode,
}

impl SearchRules {
    pub const DEFAULT_REQUIRE_HEROES_ONLY: bool = true;
    pub const DEFAULT_REQUIRE_NO_ENEMIES: bool = true;

    pub const fn new() -> Self {
        Self {
            require_heroes_only: Self::DEFAULT_REQUIRE_HEROES_ONLY,
            require_no_enemies: Self::DEFAULT_REQUIRE_NO_ENEMIES,
            history_mode: SearchHistoryMode::PerArea,
        }
    }
}

impl Default for SearchRules {
    fn default() -> Self {
        Self::new()
    }
}

/// Searches already performed, partitioned by history mode.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchHistory {
    pub per_area: BTreeMap<AreaId, SearchKinds>,
    pub per_hero: BTreeMap<ActorId, BTreeMap<AreaId, SearchKinds>>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchState {
    pub rules: SearchRules,
    pub history: SearchHistory,
}

impl SearchState {
    pub fn new(rules: SearchRules) -> Self {
        Self {
            rules,
            history: SearchHistory::default(),
        }
    }
}
