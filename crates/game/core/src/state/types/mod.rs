pub mod actor;
pub mod board;
pub mod cards;
pub mod common;
pub mod discoverable;
pub mod quest;
pub mod search;
pub mod status;
pub mod turn;
pub mod visibility;

pub use actor::ActorState;
pub use board::{AreaKind, BoardState, DoorState, SearchArea};
pub use cards::{
    CardCatalog, EquipmentDefinition, EquipmentSlot, SpellDefinition, SpellEffect, TargetKind,
    TargetingProfile,
};
pub use common::{
    ActorId, AreaId, DiscoverableId, DoorId, EquipmentId, Faction, FurnitureId, ObjectiveId,
    Position, SpellId, StatusId, TriggerId,
};
pub use discoverable::{DiscoverableState, DiscoverableType};
pub use quest::{
    DialogEntry, FurnitureState, ObjectiveCategory, ObjectiveCondition, ObjectiveDefinition,
    ObjectiveKind, ObjectiveOutcome, ObjectiveProgress, ObjectiveSnapshot, ObjectiveStatus,
    QuestObjectivesState, QuestState, QuestStatus, QuestTriggerEffect,
};
pub use search::{
    SearchHistory, SearchHistoryMode, SearchKinds, SearchRules, SearchState, SearchType,
};
pub use status::{StatKind, StatModifiers, StatusDuration, StatusEffect, StatusEffects};
pub use turn::TurnState;
pub use visibility::{
    OwnerKey, ParseOwnerKeyError, RevealSource, TriggerContext, TriggerOwner, VisibilityMode,
    VisibilityState, VisibilityTrigger,
};
