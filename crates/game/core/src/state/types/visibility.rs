//! Fog-of-war bookkeeping and scripted reveal triggers.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

use super::{ActorId, AreaId, DoorId, Faction, Position, QuestTriggerEffect, TriggerId};

/// How discovered tiles are partitioned between observers.
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
pub enum VisibilityMode {
    #[default]
    Global,
    PerFaction,
    PerActor,
}

/// Identity whose discovered-tile set is tracked independently.
///
/// Serialized as `global`, `faction:<faction>` or `actor:<id>` so it can key
/// maps in every format.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(into = "String", try_from = "String"))]
pub enum OwnerKey {
    Global,
    Faction(Faction),
    Actor(ActorId),
}

impl fmt::Display for OwnerKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Global => f.write_str("global"),
            Self::Faction(faction) => write!(f, "faction:{faction}"),
            Self::Actor(actor) => write!(f, "actor:{actor}"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("invalid owner key `{0}`")]
pub struct ParseOwnerKeyError(pub String);

impl FromStr for OwnerKey {
    type Err = ParseOwnerKeyError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        if value == "global" {
            return Ok(Self::Global);
        }
        if let Some(faction) = value.strip_prefix("faction:") {
            return faction
                .parse()
                .map(Self::Faction)
                .map_err(|_| ParseOwnerKeyError(value.to_owned()));
        }
        match value.strip_prefix("actor:") {
            Some(actor) if !actor.is_empty() => Ok(Self::Actor(ActorId::from(actor))),
            _ => Err(ParseOwnerKeyError(value.to_owned())),
        }
    }
}

impl From<OwnerKey> for String {
    fn from(key: OwnerKey) -> Self {
        key.to_string()
    }
}

impl TryFrom<String> for OwnerKey {
    type Error = ParseOwnerKeyError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// What caused tiles to become visible.
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
#[strum(serialize_all = "kebab-case")]
pub enum RevealSource {
    Search,
    Door,
    Script,
}

/// Stimulus a board trigger is bound to.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TriggerContext {
    Door(DoorId),
    Script(String),
}

impl TriggerContext {
    pub fn source(&self) -> RevealSource {
        match self {
            Self::Door(_) => RevealSource::Door,
            Self::Script(_) => RevealSource::Script,
        }
    }
}

/// Who receives the tiles a trigger reveals.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TriggerOwner {
    #[default]
    Global,
    Faction(Faction),
    Actor(ActorId),
}

/// One-shot reveal bound to a door or a script hook.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VisibilityTrigger {
    pub id: TriggerId,
    pub context: TriggerContext,
    #[cfg_attr(feature = "serde", serde(default))]
    pub owner: TriggerOwner,
    #[cfg_attr(feature = "serde", serde(default))]
    pub area_ids: Vec<AreaId>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub tiles: Vec<Position>,
    /// Quest side effects applied after the reveal.
    #[cfg_attr(feature = "serde", serde(default))]
    pub effects: Vec<QuestTriggerEffect>,
}

impl VisibilityTrigger {
    pub fn new(id: impl Into<TriggerId>, context: TriggerContext) -> Self {
        Self {
            id: id.into(),
            context,
            owner: TriggerOwner::Global,
            area_ids: Vec::new(),
            tiles: Vec::new(),
            effects: Vec::new(),
        }
    }

    pub fn with_owner(mut self, owner: TriggerOwner) -> Self {
        self.owner = owner;
        self
    }

    pub fn with_area(mut self, area: impl Into<AreaId>) -> Self {
        self.area_ids.push(area.into());
        self
    }

    pub fn with_tiles(mut self, tiles: impl IntoIterator<Item = Position>) -> Self {
        self.tiles.extend(tiles);
        self
    }

    pub fn with_effect(mut self, effect: QuestTriggerEffect) -> Self {
        self.effects.push(effect);
        self
    }

    pub fn matches(&self, context: &TriggerContext) -> bool {
        &self.context == context
    }
}

/// Fog-of-war state. Discovered sets and the trigger history only grow.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VisibilityState {
    pub mode: VisibilityMode,
    /// Flood-fill radius in tiles; `None` means unlimited.
    pub vision_range: Option<u32>,
    pub discovered: BTreeMap<OwnerKey, BTreeSet<Position>>,
    pub trigger_history: BTreeSet<TriggerId>,
}

impl VisibilityState {
    pub fn new(mode: VisibilityMode, vision_range: Option<u32>) -> Self {
        Self {
            mode,
            vision_range,
            discovered: BTreeMap::new(),
            trigger_history: BTreeSet::new(),
        }
    }

    pub fn discovered_by(&self, owner: &OwnerKey) -> Option<&BTreeSet<Position>> {
        self.discovered.get(owner)
    }

    pub fn has_fired(&self, trigger: &TriggerId) -> bool {
        self.trigger_history.contains(trigger)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn owner_key_text_form_parses_back() {
        for key in [
            OwnerKey::Global,
            OwnerKey::Faction(Faction::Monster),
            OwnerKey::Actor(ActorId::from("hero-1")),
        ] {
            assert_eq!(key.to_string().parse::<OwnerKey>(), Ok(key));
        }
    }

    #[test]
    fn owner_key_rejects_unknown_prefix() {
        assert!("team:red".parse::<OwnerKey>().is_err());
        assert!("actor:".parse::<OwnerKey>().is_err());
    }

    #[test]
    fn trigger_matches_only_its_context() {
        let trigger = VisibilityTrigger::new("t1", TriggerContext::Door("d1".into()));
        assert!(trigger.matches(&TriggerContext::Door("d1".into())));
        assert!(!trigger.matches(&TriggerContext::Door("d2".into())));
        assert!(!trigger.matches(&TriggerContext::Script("d1".into())));
    }
}
