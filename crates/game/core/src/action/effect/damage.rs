//! Damage effect implementation.

use super::EffectContext;
use crate::action::error::ActionError;
use crate::event::GameEvent;

/// Deals `amount` damage, flooring health at zero.
pub(super) fn apply(ctx: &mut EffectContext<'_>, amount: u32) -> Result<(), ActionError> {
    let target = ctx.target_mut()?;
    if target.take_damage(amount) {
        let event = GameEvent::ActorDefeated {
            actor_id: target.id.clone(),
            faction: target.faction,
        };
        ctx.events.push(event);
    }
    Ok(())
}
