//! Turn rotation.

use tracing::{debug, warn};

use crate::action::effect::tick_status_effects;
use crate::event::GameEvent;
use crate::state::GameState;

/// Ends the current actor's turn.
///
/// The outgoing actor's statuses tick first. The scan then walks the order
/// from the next index, wrapping, and stops on the first living actor, whose
/// movement budget is refilled. When nobody is alive the index stays where
/// it is and [`GameEvent::TurnOrderExhausted`] is pushed instead of
/// [`GameEvent::TurnEnded`].
pub fn advance_turn(state: &mut GameState, events: &mut Vec<GameEvent>) {
    let Some(previous) = state.current_actor_id().cloned() else {
        warn!("turn order is empty");
        return;
    };

    tick_status_effects(state, &previous, events);

    let next_index = state.turn.scan_from_next().find(|&index| {
        state
            .turn
            .order
            .get(index)
            .and_then(|id| state.actor(id))
            .is_some_and(|actor| actor.is_alive())
    });

    let Some(next_index) = next_index else {
        debug!(previous = %previous, "no living actor left in turn order");
        events.push(GameEvent::TurnOrderExhausted {
            previous_actor_id: previous,
        });
        return;
    };

    state.turn.current_index = next_index;
    let Some(next) = state.turn.order.get(next_index).cloned() else {
        return;
    };
    let movement = state.actor(&next).map_or(0, |actor| actor.movement);
    state.turn.movement_remaining.insert(next.clone(), movement);

    debug!(previous = %previous, next = %next, movement, "turn ended");
    events.push(GameEvent::TurnEnded {
        previous_actor_id: previous,
        next_actor_id: next,
    });
}
