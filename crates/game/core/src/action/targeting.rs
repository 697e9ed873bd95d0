use super::{ActionError, TargetRejection};
use crate::geometry::{has_line_of_sight, manhattan_distance};
use crate::state::{ActorId, GameState, TargetKind, TargetingProfile};

/// Resolves who an ability lands on.
///
/// An omitted target means the user. Allies include the user; enemies are
/// actors of an opposing faction. Both must be alive and within `range`
/// tiles, with a clear line when the profile asks for one.
pub fn resolve_target(
    state: &GameState,
    user_id: &ActorId,
    target_id: Option<&ActorId>,
    profile: &TargetingProfile,
) -> Result<ActorId, ActionError> {
    let user = state
        .actor(user_id)
        .ok_or_else(|| ActionError::ActorNotFound(user_id.clone()))?;
    let target_id = target_id.unwrap_or(user_id);

    if profile.kind == TargetKind::SelfOnly {
        if target_id != user_id {
            return Err(ActionError::InvalidTarget(TargetRejection::SelfOnly));
        }
        return Ok(user_id.clone());
    }

    let target = state
        .actor(target_id)
        .ok_or_else(|| ActionError::TargetNotFound(target_id.clone()))?;
    if !target.is_alive() {
        return Err(ActionError::TargetAlreadyDefeated(target_id.clone()));
    }

    match profile.kind {
        TargetKind::Ally if target.faction != user.faction => {
            return Err(ActionError::InvalidTarget(TargetRejection::NotAlly));
        }
        TargetKind::Enemy if !target.faction.opposes(user.faction) => {
            return Err(ActionError::InvalidTarget(TargetRejection::NotEnemy));
        }
        _ => {}
    }

    let distance = manhattan_distance(user.position, target.position);
    if distance > profile.range {
        return Err(ActionError::OutOfRange {
            distance,
            range: profile.range,
        });
    }
    if profile.requires_line_of_sight
        && distance > 0
        && !has_line_of_sight(&state.board, user.position, target.position)
    {
        return Err(ActionError::NoLineOfSight);
    }

    Ok(target_id.clone())
}
