//! Healing effect implementation.

use super::EffectContext;
use crate::action::error::ActionError;

/// Restores up to `amount` health, capped at maximum health.
///
/// Defeat is permanent: a target at zero health stays there.
pub(super) fn apply_heal(ctx: &mut EffectContext<'_>, amount: u32) -> Result<(), ActionError> {
    let target = ctx.target_mut()?;
    if target.is_alive() {
        target.heal(amount);
    }
    Ok(())
}
