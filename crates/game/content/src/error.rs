//! Errors raised while checking scenario content.

use quest_core::{
    ActionError, ActionKind, ActorId, AreaId, EquipmentId, ErrorSeverity, GameError, Position,
    SpellId, TriggerId,
};

/// A scenario or action script that cannot be played as written.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ScenarioError {
    #[error("board must be at least 1x1, got {width}x{height}")]
    EmptyBoard { width: u32, height: u32 },

    #[error("actor id {0} is declared more than once")]
    DuplicateActor(ActorId),

    #[error("actor {actor} starts outside the board at {position}")]
    ActorOutOfBounds { actor: ActorId, position: Position },

    #[error("actor {actor} starts on a blocked tile at {position}")]
    ActorOnBlockedTile { actor: ActorId, position: Position },

    #[error("actors {first} and {second} share the tile {position}")]
    SharedTile {
        first: ActorId,
        second: ActorId,
        position: Position,
    },

    #[error("turn order names unknown actor {0}")]
    UnknownTurnActor(ActorId),

    #[error("actor {actor} knows spell {spell}, which the catalog does not define")]
    UnknownSpell { actor: ActorId, spell: SpellId },

    #[error("actor {actor} carries {equipment}, which the catalog does not define")]
    UnknownEquipment {
        actor: ActorId,
        equipment: EquipmentId,
    },

    #[error("{owner} references unknown area {area}")]
    UnknownArea { owner: String, area: AreaId },

    #[error("trigger id {0} is declared more than once")]
    DuplicateTrigger(TriggerId),

    #[error("action #{index}: {source}")]
    InvalidAction { index: usize, source: ActionError },

    #[error("action #{index} ({kind}) is missing `{field}`")]
    MissingField {
        index: usize,
        kind: ActionKind,
        field: &'static str,
    },

    #[error("action #{index}: `{value}` is not a valid {field}")]
    InvalidLabel {
        index: usize,
        field: &'static str,
        value: String,
    },
}

impl GameError for ScenarioError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::EmptyBoard { .. } => "SCENARIO_EMPTY_BOARD",
            Self::DuplicateActor(_) => "SCENARIO_DUPLICATE_ACTOR",
            Self::ActorOutOfBounds { .. } => "SCENARIO_ACTOR_OUT_OF_BOUNDS",
            Self::ActorOnBlockedTile { .. } => "SCENARIO_ACTOR_ON_BLOCKED_TILE",
            Self::SharedTile { .. } => "SCENARIO_SHARED_TILE",
            Self::UnknownTurnActor(_) => "SCENARIO_UNKNOWN_TURN_ACTOR",
            Self::UnknownSpell { .. } => "SCENARIO_UNKNOWN_SPELL",
            Self::UnknownEquipment { .. } => "SCENARIO_UNKNOWN_EQUIPMENT",
            Self::UnknownArea { .. } => "SCENARIO_UNKNOWN_AREA",
            Self::DuplicateTrigger(_) => "SCENARIO_DUPLICATE_TRIGGER",
            Self::InvalidAction { source, .. } => source.error_code(),
            Self::MissingField { .. } => "SCENARIO_MISSING_FIELD",
            Self::InvalidLabel { .. } => "SCENARIO_INVALID_LABEL",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_action_kind_keeps_the_action_code() {
        let error = ScenarioError::InvalidAction {
            index: 3,
            source: ActionError::UnknownActionKind("dance".into()),
        };
        assert_eq!(error.error_code(), "ACTION_UNKNOWN_ACTION_KIND");
        assert!(error.to_string().starts_with("action #3: "));
        assert!(std::error::Error::source(&error).is_some());
    }

    #[test]
    fn every_scenario_error_is_a_validation_error() {
        let error = ScenarioError::MissingField {
            index: 0,
            kind: ActionKind::Move,
            field: "to",
        };
        assert_eq!(error.severity(), ErrorSeverity::Validation);
        assert_eq!(error.to_string(), "action #0 (move) is missing `to`");
    }
}
