//! Action rejection reasons.
//!
//! `validate` never panics or throws; it returns one of these. The reason
//! string a caller shows is the `Display` form.

use crate::error::{ErrorSeverity, GameError};
use crate::state::{ActorId, AreaId, DoorId, EquipmentId, Position, SearchType, SpellId};

/// Which roll a dice-count check refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "lowercase")]
pub enum RollSide {
    Attack,
    Defense,
}

/// A spell or equipment card referenced by an action.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AbilityRef {
    Spell(SpellId),
    Equipment(EquipmentId),
}

impl std::fmt::Display for AbilityRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Spell(id) => write!(f, "spell {id}"),
            Self::Equipment(id) => write!(f, "equipment {id}"),
        }
    }
}

/// Why a target failed an ability's targeting profile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TargetRejection {
    #[strum(to_string = "ability can only target its user")]
    SelfOnly,
    #[strum(to_string = "target is not an ally")]
    NotAlly,
    #[strum(to_string = "target is not an enemy")]
    NotEnemy,
}

/// Errors that reject an action.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ActionError {
    #[error("actor {0} not found")]
    ActorNotFound(ActorId),

    #[error("actor {0} is defeated")]
    ActorDefeated(ActorId),

    #[error("not {actor}'s turn")]
    NotActorsTurn { actor: ActorId },

    #[error("destination {0} is out of bounds")]
    OutOfBounds(Position),

    #[error("destination {0} is blocked")]
    DestinationBlocked(Position),

    #[error("destination {0} is occupied")]
    TileOccupied(Position),

    #[error("actor must move at least one tile")]
    NoMovement,

    #[error("insufficient movement: {required} needed, {remaining} remaining")]
    InsufficientMovement { required: u32, remaining: u32 },

    #[error("target {0} not found")]
    TargetNotFound(ActorId),

    #[error("target is not adjacent (distance {distance})")]
    TargetNotAdjacent { distance: u32 },

    #[error("target out of range: distance {distance}, range {range}")]
    OutOfRange { distance: u32, range: u32 },

    #[error("no line of sight to target")]
    NoLineOfSight,

    #[error("target {0} is already defeated")]
    TargetAlreadyDefeated(ActorId),

    #[error("{side} roll has {actual} dice, expected {expected}")]
    DiceCountMismatch {
        side: RollSide,
        expected: u32,
        actual: u32,
    },

    #[error("unknown {0}")]
    UnknownAbility(AbilityRef),

    #[error("{0} is not available to the actor")]
    AbilityNotPossessed(AbilityRef),

    #[error("invalid target: {0}")]
    InvalidTarget(TargetRejection),

    #[error("only heroes may search")]
    SearchRestrictedToHeroes,

    #[error("actor is not inside a searchable area")]
    AreaNotSearchable,

    #[error("area {area} does not allow {search_type} searches")]
    SearchTypeNotAllowed {
        area: AreaId,
        search_type: SearchType,
    },

    #[error("enemies are present in area {0}")]
    EnemiesPresent(AreaId),

    #[error("area {area} was already searched for {search_type}")]
    AlreadySearched {
        area: AreaId,
        search_type: SearchType,
    },

    #[error("door {0} not found")]
    DoorNotFound(DoorId),

    #[error("door {0} is already open")]
    DoorAlreadyOpen(DoorId),

    #[error("door {0} is not adjacent to the actor")]
    DoorNotAdjacent(DoorId),

    #[error("no quest trigger matches the supplied context")]
    NoMatchingTrigger,

    #[error("unsupported action kind `{0}`")]
    UnknownActionKind(String),

    #[error("state invariant violated: {0}")]
    InvariantViolated(String),
}

impl GameError for ActionError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::DestinationBlocked(_)
            | Self::TileOccupied(_)
            | Self::InsufficientMovement { .. }
            | Self::TargetNotAdjacent { .. }
            | Self::OutOfRange { .. }
            | Self::NoLineOfSight
            | Self::EnemiesPresent(_)
            | Self::DoorNotAdjacent(_)
            | Self::NotActorsTurn { .. } => ErrorSeverity::Recoverable,
            Self::InvariantViolated(_) => ErrorSeverity::Internal,
            _ => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::ActorNotFound(_) => "ACTION_ACTOR_NOT_FOUND",
            Self::ActorDefeated(_) => "ACTION_ACTOR_DEFEATED",
            Self::NotActorsTurn { .. } => "ACTION_NOT_ACTORS_TURN",
            Self::OutOfBounds(_) => "ACTION_OUT_OF_BOUNDS",
            Self::DestinationBlocked(_) => "ACTION_DESTINATION_BLOCKED",
            Self::TileOccupied(_) => "ACTION_TILE_OCCUPIED",
            Self::NoMovement => "ACTION_NO_MOVEMENT",
            Self::InsufficientMovement { .. } => "ACTION_INSUFFICIENT_MOVEMENT",
            Self::TargetNotFound(_) => "ACTION_TARGET_NOT_FOUND",
            Self::TargetNotAdjacent { .. } => "ACTION_TARGET_NOT_ADJACENT",
            Self::OutOfRange { .. } => "ACTION_OUT_OF_RANGE",
            Self::NoLineOfSight => "ACTION_NO_LINE_OF_SIGHT",
            Self::TargetAlreadyDefeated(_) => "ACTION_TARGET_ALREADY_DEFEATED",
            Self::DiceCountMismatch { .. } => "ACTION_DICE_COUNT_MISMATCH",
            Self::UnknownAbility(_) => "ACTION_UNKNOWN_ABILITY",
            Self::AbilityNotPossessed(_) => "ACTION_ABILITY_NOT_POSSESSED",
            Self::InvalidTarget(_) => "ACTION_INVALID_TARGET",
            Self::SearchRestrictedToHeroes => "ACTION_SEARCH_RESTRICTED_TO_HEROES",
            Self::AreaNotSearchable => "ACTION_AREA_NOT_SEARCHABLE",
            Self::SearchTypeNotAllowed { .. } => "ACTION_SEARCH_TYPE_NOT_ALLOWED",
            Self::EnemiesPresent(_) => "ACTION_ENEMIES_PRESENT",
            Self::AlreadySearched { .. } => "ACTION_ALREADY_SEARCHED",
            Self::DoorNotFound(_) => "ACTION_DOOR_NOT_FOUND",
            Self::DoorAlreadyOpen(_) => "ACTION_DOOR_ALREADY_OPEN",
            Self::DoorNotAdjacent(_) => "ACTION_DOOR_NOT_ADJACENT",
            Self::NoMatchingTrigger => "ACTION_NO_MATCHING_TRIGGER",
            Self::UnknownActionKind(_) => "ACTION_UNKNOWN_ACTION_KIND",
            Self::InvariantViolated(_) => "ACTION_INVARIANT_VIOLATED",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reasons_read_as_sentences() {
        let error = ActionError::InsufficientMovement {
            required: 5,
            remaining: 3,
        };
        assert_eq!(error.to_string(), "insufficient movement: 5 needed, 3 remaining");

        let error = ActionError::DiceCountMismatch {
            side: RollSide::Defense,
            expected: 2,
            actual: 1,
        };
        assert_eq!(error.to_string(), "defense roll has 1 dice, expected 2");

        let error = ActionError::UnknownAbility(AbilityRef::Spell("fireball".into()));
        assert_eq!(error.to_string(), "unknown spell fireball");
    }

    #[test]
    fn severities_split_retryable_from_malformed() {
        assert!(ActionError::NoLineOfSight.severity().is_recoverable());
        assert_eq!(
            ActionError::ActorNotFound("x".into()).severity(),
            ErrorSeverity::Validation
        );
        assert!(ActionError::InvariantViolated("hp".into()).severity().is_internal());
    }

    #[test]
    fn error_codes_are_stable() {
        let error = ActionError::AlreadySearched {
            area: "hall".into(),
            search_type: SearchType::Treasure,
        };
        assert_eq!(error.error_code(), "ACTION_ALREADY_SEARCHED");
    }
}
