use crate::state::{SearchRules, VisibilityMode};

/// Fog-of-war settings applied when a game is created.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct VisibilityRules {
    pub mode: VisibilityMode,
    /// Flood-fill radius in tiles. `None` means unlimited.
    pub vision_range: Option<u32>,
}

/// Rule configuration for a single game.
///
/// Passed to [`crate::create_game_state`] and copied into the initial state;
/// nothing reads it afterwards.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GameConfig {
    pub search: SearchRules,
    pub visibility: VisibilityRules,
}

impl GameConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_search(mut self, search: SearchRules) -> Self {
        self.search = search;
        self
    }

    pub fn with_visibility(mut self, visibility: VisibilityRules) -> Self {
        self.visibility = visibility;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::SearchHistoryMode;

    #[test]
    fn defaults_match_tabletop_rules() {
        let config = GameConfig::default();
        assert!(config.search.require_heroes_only);
        assert!(config.search.require_no_enemies);
        assert_eq!(config.search.history_mode, SearchHistoryMode::PerArea);
        assert_eq!(config.visibility.mode, VisibilityMode::Global);
        assert_eq!(config.visibility.vision_range, None);
    }
}
