//! Events emitted by state transitions.
//!
//! Every successful `apply` returns the events it produced, in the order the
//! underlying changes happened. Callers feed them to the objective tracker
//! and to whatever presents the game.

use crate::action::DieFace;
use crate::state::{
    ActorId, AreaId, DialogEntry, DiscoverableId, DiscoverableType, DoorId, EquipmentId, Faction,
    FurnitureId, ObjectiveSnapshot, OwnerKey, Position, QuestStatus, RevealSource, SearchType,
    SpellEffect, SpellId, StatusId, TriggerId,
};

/// A discoverable uncovered by a search.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchDiscovery {
    pub id: DiscoverableId,
    pub kind: DiscoverableType,
    pub position: Position,
}

#[derive(Clone, Debug, PartialEq, Eq, strum::IntoStaticStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type", rename_all = "camelCase"))]
#[strum(serialize_all = "camelCase")]
pub enum GameEvent {
    Move {
        actor_id: ActorId,
        from: Position,
        to: Position,
    },
    AttackResolved {
        attacker_id: ActorId,
        target_id: ActorId,
        attack_roll: Vec<DieFace>,
        defense_roll: Vec<DieFace>,
        attack_successes: u32,
        defense_successes: u32,
        damage: u32,
        critical: bool,
        target_health: u32,
        target_defeated: bool,
    },
    /// Health dropped from above zero to zero.
    ActorDefeated {
        actor_id: ActorId,
        faction: Faction,
    },
    SearchPerformed {
        actor_id: ActorId,
        area_id: AreaId,
        search_type: SearchType,
        discoveries: Vec<SearchDiscovery>,
    },
    /// Tiles newly added to one owner's discovered set.
    TilesRevealed {
        owner: OwnerKey,
        tiles: Vec<Position>,
        source: RevealSource,
        trigger_id: Option<TriggerId>,
    },
    SpellCast {
        caster_id: ActorId,
        spell_id: SpellId,
        target_id: Option<ActorId>,
        effects: Vec<SpellEffect>,
    },
    EquipmentUsed {
        actor_id: ActorId,
        equipment_id: EquipmentId,
        target_id: Option<ActorId>,
        effects: Vec<SpellEffect>,
        consumed: bool,
    },
    StatusExpired {
        actor_id: ActorId,
        status_id: StatusId,
    },
    TurnEnded {
        previous_actor_id: ActorId,
        next_actor_id: ActorId,
    },
    /// Nobody in the turn order is alive; the turn pointer stays put.
    TurnOrderExhausted {
        previous_actor_id: ActorId,
    },
    DoorOpened {
        actor_id: ActorId,
        door_id: DoorId,
    },
    ActorsSpawned {
        actor_ids: Vec<ActorId>,
    },
    DiscoverablesAdded {
        discoverable_ids: Vec<DiscoverableId>,
    },
    DialogEnqueued {
        entries: Vec<DialogEntry>,
    },
    FurniturePlaced {
        furniture_ids: Vec<FurnitureId>,
    },
    QuestObjectivesUpdated {
        status: QuestStatus,
        objectives: Vec<ObjectiveSnapshot>,
    },
}

impl GameEvent {
    /// Stable camelCase label, e.g. `attackResolved`.
    pub fn kind(&self) -> &'static str {
        self.into()
    }
}
