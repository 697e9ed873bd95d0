//! Spell and equipment card definitions.
//!
//! The catalog is static for a game: it is built once at setup and shared
//! between every snapshot.

use std::collections::{BTreeMap, BTreeSet};

use super::{EquipmentId, Position, SpellId, StatKind, StatusDuration, StatusEffect, StatusId};

/// Who an ability may be aimed at.
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
pub enum TargetKind {
    /// Only the user.
    #[strum(serialize = "self")]
    #[cfg_attr(feature = "serde", serde(rename = "self"))]
    SelfOnly,
    /// A living actor of the user's faction, the user included.
    Ally,
    /// A living actor of an opposing faction.
    Enemy,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TargetingProfile {
    pub kind: TargetKind,
    pub range: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub requires_line_of_sight: bool,
}

impl TargetingProfile {
    pub const fn self_only() -> Self {
        Self {
            kind: TargetKind::SelfOnly,
            range: 0,
            requires_line_of_sight: false,
        }
    }

    pub const fn ally(range: u32) -> Self {
        Self {
            kind: TargetKind::Ally,
            range,
            requires_line_of_sight: false,
        }
    }

    pub const fn enemy(range: u32, requires_line_of_sight: bool) -> Self {
        Self {
            kind: TargetKind::Enemy,
            range,
            requires_line_of_sight,
        }
    }
}

/// One step of an ability's resolution, applied to the resolved target.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SpellEffect {
    Damage {
        amount: u32,
    },
    Heal {
        amount: u32,
    },
    /// Relocates the target by `delta` or to `destination` (which wins).
    Move {
        #[cfg_attr(feature = "serde", serde(default))]
        delta: Option<Position>,
        #[cfg_attr(feature = "serde", serde(default))]
        destination: Option<Position>,
        #[cfg_attr(feature = "serde", serde(default))]
        ignore_collisions: bool,
    },
    /// Permanent stat change.
    Buff {
        stat: StatKind,
        amount: i32,
    },
    Status {
        effect: StatusEffect,
    },
    /// Shorthand for a single-stat timed status.
    StatusModifier {
        stat: StatKind,
        amount: i32,
        duration: StatusDuration,
        #[cfg_attr(feature = "serde", serde(default))]
        id: Option<StatusId>,
        #[cfg_attr(feature = "serde", serde(default))]
        name: Option<String>,
        #[cfg_attr(feature = "serde", serde(default))]
        tags: BTreeSet<String>,
    },
    Cleanse {
        #[cfg_attr(feature = "serde", serde(default))]
        status_ids: BTreeSet<StatusId>,
        #[cfg_attr(feature = "serde", serde(default))]
        tags: BTreeSet<String>,
        #[cfg_attr(feature = "serde", serde(default))]
        remove_all: bool,
    },
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpellDefinition {
    pub id: SpellId,
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub school: String,
    pub target: TargetingProfile,
    pub effects: Vec<SpellEffect>,
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
pub enum EquipmentSlot {
    Weapon,
    Armor,
    #[default]
    Trinket,
    Consumable,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EquipmentDefinition {
    pub id: EquipmentId,
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub slot: EquipmentSlot,
    pub target: TargetingProfile,
    pub effects: Vec<SpellEffect>,
    /// Removed from the user's equipment after a successful use.
    #[cfg_attr(feature = "serde", serde(default))]
    pub consumable: bool,
}

/// Lookup tables for every card in play.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CardCatalog {
    #[cfg_attr(feature = "serde", serde(default))]
    pub spells: BTreeMap<SpellId, SpellDefinition>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub equipment: BTreeMap<EquipmentId, EquipmentDefinition>,
}

impl CardCatalog {
    pub fn with_spell(mut self, spell: SpellDefinition) -> Self {
        self.spells.insert(spell.id.clone(), spell);
        self
    }

    pub fn with_equipment(mut self, equipment: EquipmentDefinition) -> Self {
        self.equipment.insert(equipment.id.clone(), equipment);
        self
    }

    pub fn spell(&self, id: &SpellId) -> Option<&SpellDefinition> {
        self.spells.get(id)
    }

    pub fn equipment(&self, id: &EquipmentId) -> Option<&EquipmentDefinition> {
        self.equipment.get(id)
    }
}
