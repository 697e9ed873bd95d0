use tracing::debug;

use super::{ActionError, ActionTransition};
use crate::event::GameEvent;
use crate::geometry::{is_blocked, is_occupied, is_within_bounds, manhattan_distance};
use crate::state::{ActorId, GameState, Position};

/// Walk to `to`, spending one movement point per tile of Manhattan distance.
///
/// Paths are not traced: only the destination is checked.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MoveAction {
    pub actor_id: ActorId,
    pub to: Position,
}

impl MoveAction {
    pub fn new(actor_id: impl Into<ActorId>, to: Position) -> Self {
        Self {
            actor_id: actor_id.into(),
            to,
        }
    }
}

impl ActionTransition for MoveAction {
    fn actor(&self) -> Option<&ActorId> {
        Some(&self.actor_id)
    }

    fn pre_validate(&self, state: &GameState) -> Result<(), ActionError> {
        let actor = state
            .actor(&self.actor_id)
            .ok_or_else(|| ActionError::ActorNotFound(self.actor_id.clone()))?;

        if !is_within_bounds(&state.board, self.to) {
            return Err(ActionError::OutOfBounds(self.to));
        }
        if is_blocked(&state.board, self.to) {
            return Err(ActionError::DestinationBlocked(self.to));
        }

        let required = manhattan_distance(actor.position, self.to);
        let remaining = state.turn.movement_remaining(&self.actor_id);
        if required == 0 {
            return Err(ActionError::NoMovement);
        }
        if required > remaining {
            return Err(ActionError::InsufficientMovement {
                required,
                remaining,
            });
        }

        if is_occupied(state, self.to) {
            return Err(ActionError::TileOccupied(self.to));
        }

        Ok(())
    }

    fn apply(&self, state: &mut GameState, events: &mut Vec<GameEvent>) -> Result<(), ActionError> {
        let actor = state
            .actor_mut(&self.actor_id)
            .ok_or_else(|| ActionError::ActorNotFound(self.actor_id.clone()))?;
        let from = actor.position;
        actor.position = self.to;

        let distance = manhattan_distance(from, self.to);
        let remaining = state
            .turn
            .movement_remaining
            .entry(self.actor_id.clone())
            .or_default();
        *remaining = remaining.saturating_sub(distance);

        debug!(actor = %self.actor_id, %from, to = %self.to, remaining = *remaining, "actor moved");
        events.push(GameEvent::Move {
            actor_id: self.actor_id.clone(),
            from,
            to: self.to,
        });
        Ok(())
    }

    fn post_validate(&self, state: &GameState) -> Result<(), ActionError> {
        let occupants = state
            .actors
            .values()
            .filter(|actor| actor.position == self.to)
            .count();
        if occupants > 1 {
            return Err(ActionError::InvariantViolated(format!(
                "{occupants} actors share tile {}",
                self.to
            )));
        }
        Ok(())
    }
}
