//! Action vocabulary and the per-action transition rules.
//!
//! Every action is a plain data record. Its rules live in an
//! [`ActionTransition`] impl next to it:
//!
//! - `pre_validate`: checks against the state **before** mutation
//! - `apply`: mutates a working copy and pushes events
//! - `post_validate`: checks against the state **after** mutation
//!
//! The engine drives these phases; nothing here is called on a snapshot the
//! caller still holds.

pub mod ability;
pub mod combat;
pub mod door;
pub mod effect;
pub mod error;
pub mod movement;
pub mod search;
pub mod targeting;
pub mod trigger;
pub mod turn;

pub use ability::{CastSpellAction, UseEquipmentAction};
pub use combat::{AttackAction, AttackOutcome, resolve_attack};
pub use door::OpenDoorAction;
pub use effect::{EffectContext, apply_effects};
pub use error::{AbilityRef, ActionError, RollSide, TargetRejection};
pub use movement::MoveAction;
pub use search::SearchAction;
pub use targeting::resolve_target;
pub use trigger::TriggerQuestVisibilityAction;
pub use turn::EndTurnAction;

use crate::event::GameEvent;
use crate::state::{ActorId, GameState};

/// Face of a combat die.
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
pub enum DieFace {
    Skull,
    WhiteShield,
    BlackShield,
}

impl DieFace {
    pub fn is_skull(self) -> bool {
        matches!(self, DieFace::Skull)
    }

    pub fn is_shield(self) -> bool {
        matches!(self, DieFace::WhiteShield | DieFace::BlackShield)
    }
}

/// Defines how a concrete action variant checks and mutates game state.
///
/// `apply` may assume `pre_validate` has already succeeded on the same
/// state. Hooks other than `apply` must stay side-effect free.
pub trait ActionTransition {
    /// The acting actor, if the action has one. Actor-initiated actions get
    /// the shared turn checks before `pre_validate`.
    fn actor(&self) -> Option<&ActorId>;

    /// Validates pre-conditions using the state **before** mutation.
    fn pre_validate(&self, _state: &GameState) -> Result<(), ActionError> {
        Ok(())
    }

    /// Applies the action to a working copy, pushing the events it causes.
    fn apply(&self, state: &mut GameState, events: &mut Vec<GameEvent>)
    -> Result<(), ActionError>;

    /// Validates post-conditions using the state **after** mutation.
    fn post_validate(&self, _state: &GameState) -> Result<(), ActionError> {
        Ok(())
    }
}

/// Shared preconditions of every actor-initiated action: the actor exists,
/// is alive, and holds the current turn.
pub fn ensure_active_actor(state: &GameState, actor_id: &ActorId) -> Result<(), ActionError> {
    let actor = state
        .actor(actor_id)
        .ok_or_else(|| ActionError::ActorNotFound(actor_id.clone()))?;
    if !actor.is_alive() {
        return Err(ActionError::ActorDefeated(actor_id.clone()));
    }
    if state.current_actor_id() != Some(actor_id) {
        return Err(ActionError::NotActorsTurn {
            actor: actor_id.clone(),
        });
    }
    Ok(())
}

/// Discriminant of [`Action`], used in logs and error reports.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::IntoStaticStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
#[strum(serialize_all = "camelCase")]
pub enum ActionKind {
    Move,
    Attack,
    Search,
    CastSpell,
    UseEquipment,
    OpenDoor,
    TriggerQuestVisibility,
    EndTurn,
}

impl ActionKind {
    pub fn as_str(self) -> &'static str {
        self.into()
    }
}

/// Everything a caller can ask the engine to do.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub enum Action {
    Move(MoveAction),
    Attack(AttackAction),
    Search(SearchAction),
    CastSpell(CastSpellAction),
    UseEquipment(UseEquipmentAction),
    OpenDoor(OpenDoorAction),
    TriggerQuestVisibility(TriggerQuestVisibilityAction),
    EndTurn(EndTurnAction),
}

impl Action {
    pub fn kind(&self) -> ActionKind {
        match self {
            Action::Move(_) => ActionKind::Move,
            Action::Attack(_) => ActionKind::Attack,
            Action::Search(_) => ActionKind::Search,
            Action::CastSpell(_) => ActionKind::CastSpell,
            Action::UseEquipment(_) => ActionKind::UseEquipment,
            Action::OpenDoor(_) => ActionKind::OpenDoor,
            Action::TriggerQuestVisibility(_) => ActionKind::TriggerQuestVisibility,
            Action::EndTurn(_) => ActionKind::EndTurn,
        }
    }

    /// The acting actor, if any.
    pub fn actor(&self) -> Option<&ActorId> {
        match self {
            Action::Move(action) => action.actor(),
            Action::Attack(action) => action.actor(),
            Action::Search(action) => action.actor(),
            Action::CastSpell(action) => action.actor(),
            Action::UseEquipment(action) => action.actor(),
            Action::OpenDoor(action) => action.actor(),
            Action::TriggerQuestVisibility(action) => action.actor(),
            Action::EndTurn(action) => action.actor(),
        }
    }
}

macro_rules! impl_from_action {
    ($($variant:ident($ty:ty)),+ $(,)?) => {
        $(
            impl From<$ty> for Action {
                fn from(action: $ty) -> Self {
                    Action::$variant(action)
                }
            }
        )+
    };
}

impl_from_action! {
    Move(MoveAction),
    Attack(AttackAction),
    Search(SearchAction),
    CastSpell(CastSpellAction),
    UseEquipment(UseEquipmentAction),
    OpenDoor(OpenDoorAction),
    TriggerQuestVisibility(TriggerQuestVisibilityAction),
    EndTurn(EndTurnAction),
}
