use tracing::debug;

use super::{ActionError, ActionTransition};
use crate::event::GameEvent;
use crate::geometry::manhattan_distance;
use crate::state::{ActorId, DoorId, GameState, TriggerContext};
use crate::visibility::fire_matching_triggers;

/// Open an adjacent closed door, then fire the triggers bound to it.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OpenDoorAction {
    pub actor_id: ActorId,
    pub door_id: DoorId,
}

impl OpenDoorAction {
    pub fn new(actor_id: impl Into<ActorId>, door_id: impl Into<DoorId>) -> Self {
        Self {
            actor_id: actor_id.into(),
            door_id: door_id.into(),
        }
    }
}

impl ActionTransition for OpenDoorAction {
    fn actor(&self) -> Option<&ActorId> {
        Some(&self.actor_id)
    }

    fn pre_validate(&self, state: &GameState) -> Result<(), ActionError> {
        let actor = state
            .actor(&self.actor_id)
            .ok_or_else(|| ActionError::ActorNotFound(self.actor_id.clone()))?;
        let door = state
            .board
            .door(&self.door_id)
            .ok_or_else(|| ActionError::DoorNotFound(self.door_id.clone()))?;
        if door.open {
            return Err(ActionError::DoorAlreadyOpen(self.door_id.clone()));
        }
        if manhattan_distance(actor.position, door.position) != 1 {
            return Err(ActionError::DoorNotAdjacent(self.door_id.clone()));
        }
        Ok(())
    }

    fn apply(&self, state: &mut GameState, events: &mut Vec<GameEvent>) -> Result<(), ActionError> {
        let door = state
            .board_mut()
            .door_mut(&self.door_id)
            .ok_or_else(|| ActionError::DoorNotFound(self.door_id.clone()))?;
        door.open = true;
        state
            .quest
            .interaction_history
            .insert(format!("door:{}", self.door_id));

        debug!(actor = %self.actor_id, door = %self.door_id, "door opened");
        events.push(GameEvent::DoorOpened {
            actor_id: self.actor_id.clone(),
            door_id: self.door_id.clone(),
        });

        fire_matching_triggers(state, &TriggerContext::Door(self.door_id.clone()), events);
        Ok(())
    }

    fn post_validate(&self, state: &GameState) -> Result<(), ActionError> {
        match state.board.door(&self.door_id) {
            Some(door) if door.open => Ok(()),
            _ => Err(ActionError::InvariantViolated(format!(
                "door {} did not open",
                self.door_id
            ))),
        }
    }
}
