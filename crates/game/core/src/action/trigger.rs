use super::{ActionError, ActionTransition};
use crate::event::GameEvent;
use crate::state::{ActorId, DoorId, GameState, TriggerContext};
use crate::visibility::{fire_matching_triggers, matching_triggers};

/// Fire every board trigger bound to a door or script context.
///
/// When `actor_id` is set the usual turn checks apply; scripted callers may
/// leave it empty.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TriggerQuestVisibilityAction {
    #[cfg_attr(feature = "serde", serde(default))]
    pub actor_id: Option<ActorId>,
    pub context: TriggerContext,
}

impl TriggerQuestVisibilityAction {
    pub fn new(context: TriggerContext) -> Self {
        Self {
            actor_id: None,
            context,
        }
    }

    pub fn door(door_id: impl Into<DoorId>) -> Self {
        Self::new(TriggerContext::Door(door_id.into()))
    }

    pub fn script(key: impl Into<String>) -> Self {
        Self::new(TriggerContext::Script(key.into()))
    }

    pub fn by(mut self, actor_id: impl Into<ActorId>) -> Self {
        self.actor_id = Some(actor_id.into());
        self
    }
}

impl ActionTransition for TriggerQuestVisibilityAction {
    fn actor(&self) -> Option<&ActorId> {
        self.actor_id.as_ref()
    }

    fn pre_validate(&self, state: &GameState) -> Result<(), ActionError> {
        if matching_triggers(&state.board, &self.context).next().is_none() {
            return Err(ActionError::NoMatchingTrigger);
        }
        Ok(())
    }

    fn apply(&self, state: &mut GameState, events: &mut Vec<GameEvent>) -> Result<(), ActionError> {
        fire_matching_triggers(state, &self.context, events);
        Ok(())
    }
}
