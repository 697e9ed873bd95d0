//! Forced movement effect implementation.

use super::EffectContext;
use crate::action::error::ActionError;
use crate::event::GameEvent;
use crate::geometry::{is_blocked, is_within_bounds, living_occupant};
use crate::state::Position;

/// Relocates the target to `destination`, or by `delta` when no destination
/// is given.
///
/// Does nothing when there is nowhere to go: no destination at all, a delta
/// that overflows the coordinate range, the current tile, off the board, or
/// (unless collisions are ignored) a blocked tile or one held by another
/// living actor. Movement budget is untouched.
pub(super) fn apply(
    ctx: &mut EffectContext<'_>,
    delta: Option<Position>,
    destination: Option<Position>,
    ignore_collisions: bool,
) -> Result<(), ActionError> {
    let from = ctx.target()?.position;
    let to = match (destination, delta) {
        (Some(destination), _) => Some(destination),
        (None, Some(delta)) => from.offset(delta),
        (None, None) => None,
    };
    let Some(to) = to else {
        return Ok(());
    };

    if to == from || !is_within_bounds(&ctx.state.board, to) {
        return Ok(());
    }

    if !ignore_collisions {
        let occupied_by_other =
            living_occupant(ctx.state, to).is_some_and(|occupant| &occupant.id != ctx.target);
        if is_blocked(&ctx.state.board, to) || occupied_by_other {
            return Ok(());
        }
    }

    let target = ctx.target_mut()?;
    target.position = to;
    let event = GameEvent::Move {
        actor_id: target.id.clone(),
        from,
        to,
    };
    ctx.events.push(event);
    Ok(())
}
