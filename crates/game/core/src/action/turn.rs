use super::{ActionError, ActionTransition};
use crate::engine::advance_turn;
use crate::event::GameEvent;
use crate::state::{ActorId, GameState};

/// Hand the turn to the next living actor in order.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EndTurnAction {
    pub actor_id: ActorId,
}

impl EndTurnAction {
    pub fn new(actor_id: impl Into<ActorId>) -> Self {
        Self {
            actor_id: actor_id.into(),
        }
    }
}

impl ActionTransition for EndTurnAction {
    fn actor(&self) -> Option<&ActorId> {
        Some(&self.actor_id)
    }

    fn apply(&self, state: &mut GameState, events: &mut Vec<GameEvent>) -> Result<(), ActionError> {
        advance_turn(state, events);
        Ok(())
    }

    fn post_validate(&self, state: &GameState) -> Result<(), ActionError> {
        let any_alive = state
            .turn
            .order
            .iter()
            .filter_map(|id| state.actor(id))
            .any(|actor| actor.is_alive());
        let current_alive = state
            .current_actor_id()
            .and_then(|id| state.actor(id))
            .is_some_and(|actor| actor.is_alive());
        if any_alive && !current_alive {
            return Err(ActionError::InvariantViolated(
                "turn passed to a defeated actor".into(),
            ));
        }
        Ok(())
    }
}
