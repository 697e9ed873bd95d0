//! Spell and equipment effect pipeline.
//!
//! An ability is an ordered list of [`SpellEffect`]s applied to one resolved
//! target. Each effect runs through the same three steps as an action:
//!
//! - `pre_validate`: the target still exists
//! - `apply`: mutate the target, pushing any events it causes
//! - `post_validate`: health stays within `[0, max_health]`
//!
//! Effects that cannot do anything (a move onto a wall, a cleanse with
//! nothing to remove) are silent no-ops, not errors.

mod damage;
mod displacement;
mod resource;
mod status;

pub use status::{revert_status, tick_status_effects, upsert_status};

use tracing::trace;

use crate::action::error::ActionError;
use crate::event::GameEvent;
use crate::state::{ActorId, ActorState, GameState, SpellEffect};

/// Context for effect execution.
///
/// Created once per ability use and reused for every effect in its list.
pub struct EffectContext<'a> {
    /// The actor using the ability.
    pub caster: &'a ActorId,

    /// The resolved target; equal to `caster` for self-targeted abilities.
    pub target: &'a ActorId,

    pub state: &'a mut GameState,

    pub events: &'a mut Vec<GameEvent>,
}

impl<'a> EffectContext<'a> {
    pub fn new(
        caster: &'a ActorId,
        target: &'a ActorId,
        state: &'a mut GameState,
        events: &'a mut Vec<GameEvent>,
    ) -> Self {
        Self {
            caster,
            target,
            state,
            events,
        }
    }

    pub fn target(&self) -> Result<&ActorState, ActionError> {
        self.state
            .actor(self.target)
            .ok_or_else(|| ActionError::TargetNotFound(self.target.clone()))
    }

    pub fn target_mut(&mut self) -> Result<&mut ActorState, ActionError> {
        let target = self.target;
        self.state
            .actor_mut(target)
            .ok_or_else(|| ActionError::TargetNotFound(target.clone()))
    }
}

/// Applies `effects` to the context's target in order.
pub fn apply_effects(
    effects: &[SpellEffect],
    ctx: &mut EffectContext<'_>,
) -> Result<(), ActionError> {
    for effect in effects {
        pre_validate(ctx)?;
        apply_effect(effect, ctx)?;
        post_validate(ctx)?;
    }
    Ok(())
}

fn pre_validate(ctx: &EffectContext<'_>) -> Result<(), ActionError> {
    ctx.target().map(|_| ())
}

fn apply_effect(effect: &SpellEffect, ctx: &mut EffectContext<'_>) -> Result<(), ActionError> {
    trace!(caster = %ctx.caster, target = %ctx.target, ?effect, "applying effect");

    match effect {
        SpellEffect::Damage { amount } => damage::apply(ctx, *amount),
        SpellEffect::Heal { amount } => resource::apply_heal(ctx, *amount),
        SpellEffect::Move {
            delta,
            destination,
            ignore_collisions,
        } => displacement::apply(ctx, *delta, *destination, *ignore_collisions),
        SpellEffect::Buff { stat, amount } => status::apply_buff(ctx, *stat, *amount),
        SpellEffect::Status { effect } => status::apply_status(ctx, effect.clone()),
        SpellEffect::StatusModifier {
            stat,
            amount,
            duration,
            id,
            name,
            tags,
        } => {
            let effect =
                status::modifier_status(*stat, *amount, *duration, id.clone(), name.clone(), tags);
            status::apply_status(ctx, effect)
        }
        SpellEffect::Cleanse {
            status_ids,
            tags,
            remove_all,
        } => status::cleanse(ctx, status_ids, tags, *remove_all),
    }
}

fn post_validate(ctx: &EffectContext<'_>) -> Result<(), ActionError> {
    let target = ctx.target()?;
    if target.health > target.max_health {
        return Err(ActionError::InvariantViolated(format!(
            "{} has health {} above maximum {}",
            target.id, target.health, target.max_health
        )));
    }
    Ok(())
}
