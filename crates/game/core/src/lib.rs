//! Deterministic rules engine for a tile-based tactical quest game.
//!
//! `quest-core` owns the canonical rules (actions, combat, effects, search,
//! fog of war, turn order, quest objectives) and exposes them as pure
//! functions over [`GameState`]. Every successor state comes from
//! [`apply`]; snapshots are never mutated after they are handed out, so
//! callers can explore several futures from the same state freely.
//!
//! The contract is small:
//!
//! - [`create_game_state`] builds the initial snapshot
//! - [`validate`] checks an action and explains a rejection
//! - [`apply`] produces the next snapshot and the events that led to it
//! - the read-only queries re-exported below
pub mod action;
pub mod config;
pub mod engine;
pub mod error;
pub mod event;
pub mod geometry;
pub mod objectives;
pub mod quest;
pub mod state;
pub mod visibility;

pub use action::{
    AbilityRef, Action, ActionError, ActionKind, ActionTransition, AttackAction, CastSpellAction,
    DieFace, EndTurnAction, MoveAction, OpenDoorAction, RollSide, SearchAction, TargetRejection,
    TriggerQuestVisibilityAction, UseEquipmentAction,
};
pub use config::{GameConfig, VisibilityRules};
pub use engine::{
    ExecuteError, GameEngine, Transition, TransitionPhase, TransitionPhaseError, apply, validate,
};
pub use error::{ErrorSeverity, GameError};
pub use event::{GameEvent, SearchDiscovery};
pub use geometry::{
    actor_ids_in_area, has_line_of_sight, is_blocked, is_occupied, is_within_bounds,
    manhattan_distance,
};
pub use objectives::track_objectives;
pub use state::*;
pub use visibility::{
    compute_visible_tiles, trigger_quest_visibility, trigger_visibility_reveal,
    visible_tiles_for_actor,
};

/// Builds the initial snapshot from setup data.
///
/// Optional subsystems fall back to their defaults: strict per-area search
/// rules, global fog of war with unlimited range, empty quest layer. Every
/// actor starts with its full movement budget.
pub fn create_game_state(setup: GameSetup, config: &GameConfig) -> GameState {
    GameState::from_setup(setup, config)
}

/// Id of the actor whose turn it is.
pub fn current_actor_id(state: &GameState) -> Option<&ActorId> {
    state.current_actor_id()
}
