//! Quest objective tracking.
//!
//! The tracker is fed the events `apply` returned; the engine never calls it
//! itself. Each objective counts matching events once per tracking key (the
//! spawned or defeated actor, or the searched area when the objective names
//! areas) and settles when its count reaches the target.

use tracing::debug;

use crate::event::GameEvent;
use crate::state::{
    ActorId, AreaId, Faction, GameState, ObjectiveDefinition, ObjectiveKind, ObjectiveOutcome,
    ObjectiveStatus, QuestObjectivesState, QuestStatus, SearchType,
};

/// Advances objectives from `events`, returning the successor state and a
/// [`GameEvent::QuestObjectivesUpdated`] when anything changed.
pub fn track_objectives(state: &GameState, events: &[GameEvent]) -> (GameState, Option<GameEvent>) {
    let mut next = state.clone();
    if events.is_empty() || next.quest.objectives.is_empty() {
        return (next, None);
    }

    let mut objectives = std::mem::take(&mut next.quest.objectives);
    let changed = update_objectives(&mut objectives, &next, events);
    next.quest.objectives = objectives;

    if !changed {
        return (next, None);
    }

    let objectives = &next.quest.objectives;
    debug!(status = %objectives.overall_status, "quest objectives updated");
    let event = GameEvent::QuestObjectivesUpdated {
        status: objectives.overall_status,
        objectives: objectives.snapshot(),
    };
    (next, Some(event))
}

/// Applies `events` to `objectives`; returns whether anything changed.
///
/// `state` supplies actor factions for spawn filters.
pub fn update_objectives(
    objectives: &mut QuestObjectivesState,
    state: &GameState,
    events: &[GameEvent],
) -> bool {
    let mut changed = false;

    for event in events {
        match event {
            GameEvent::ActorsSpawned { actor_ids } => {
                for actor_id in actor_ids {
                    let faction = state.actor(actor_id).map(|actor| actor.faction);
                    changed |= advance_matching(objectives, |definition| {
                        matches_actor(definition, ObjectiveKind::Spawn, actor_id, faction)
                            .then(|| Some(actor_id.to_string()))
                    });
                }
            }
            GameEvent::ActorDefeated { actor_id, faction } => {
                changed |= advance_matching(objectives, |definition| {
                    matches_actor(definition, ObjectiveKind::Defeat, actor_id, Some(*faction))
                        .then(|| Some(actor_id.to_string()))
                });
            }
            GameEvent::SearchPerformed {
                area_id,
                search_type,
                ..
            } => {
                changed |= advance_matching(objectives, |definition| {
                    search_tracking_key(definition, area_id, *search_type)
                });
            }
            _ => {}
        }
    }

    let status = overall_status(objectives);
    if status != objectives.overall_status {
        objectives.overall_status = status;
        changed = true;
    }
    changed
}

fn matches_actor(
    definition: &ObjectiveDefinition,
    kind: ObjectiveKind,
    actor_id: &ActorId,
    faction: Option<Faction>,
) -> bool {
    let condition = &definition.condition;
    if condition.kind != kind {
        return false;
    }
    if !condition.actor_ids.is_empty() && !condition.actor_ids.contains(actor_id) {
        return false;
    }
    match condition.faction {
        Some(wanted) => faction == Some(wanted),
        None => true,
    }
}

/// `None` when the search does not match; `Some(None)` when it matches but
/// is not keyed (no area filter), so every such search counts.
fn search_tracking_key(
    definition: &ObjectiveDefinition,
    area_id: &AreaId,
    search_type: SearchType,
) -> Option<Option<String>> {
    let condition = &definition.condition;
    if condition.kind != ObjectiveKind::Search {
        return None;
    }
    if condition.search_type.is_some_and(|wanted| wanted != search_type) {
        return None;
    }
    if condition.area_ids.is_empty() {
        return Some(None);
    }
    condition
        .area_ids
        .contains(area_id)
        .then(|| Some(area_id.to_string()))
}

/// Increments every pending objective for which `matcher` yields a tracking
/// decision, in declaration order.
fn advance_matching(
    objectives: &mut QuestObjectivesState,
    matcher: impl Fn(&ObjectiveDefinition) -> Option<Option<String>>,
) -> bool {
    let QuestObjectivesState {
        definitions,
        progress,
        tracking,
        ..
    } = objectives;

    let mut changed = false;
    for definition in definitions.iter() {
        let Some(key) = matcher(definition) else {
            continue;
        };
        let Some(progress) = progress.get_mut(&definition.id) else {
            continue;
        };
        if progress.status != ObjectiveStatus::Pending {
            continue;
        }
        if let Some(key) = key {
            if !tracking.entry(definition.id.clone()).or_default().insert(key) {
                continue;
            }
        }

        let next = progress.target.min(progress.current.saturating_add(1));
        if next != progress.current {
            progress.current = next;
            changed = true;
        }
        if progress.current >= progress.target {
            let settled = match definition.contributes_to {
                ObjectiveOutcome::Defeat => ObjectiveStatus::Failed,
                ObjectiveOutcome::Victory | ObjectiveOutcome::None => ObjectiveStatus::Completed,
            };
            if progress.status != settled {
                progress.status = settled;
                changed = true;
            }
        }
    }
    changed
}

/// Defeat is sticky. Otherwise victory needs at least one victory objective,
/// all of them completed.
fn overall_status(objectives: &QuestObjectivesState) -> QuestStatus {
    if objectives.overall_status == QuestStatus::Defeat {
        return QuestStatus::Defeat;
    }

    let status_of = |definition: &ObjectiveDefinition| {
        objectives
            .progress
            .get(&definition.id)
            .map(|progress| progress.status)
    };

    let defeated = objectives
        .definitions
        .iter()
        .filter(|definition| definition.contributes_to == ObjectiveOutcome::Defeat)
        .any(|definition| status_of(definition) == Some(ObjectiveStatus::Failed));
    if defeated {
        return QuestStatus::Defeat;
    }

    let mut victory = objectives
        .definitions
        .iter()
        .filter(|definition| definition.contributes_to == ObjectiveOutcome::Victory)
        .peekable();
    if victory.peek().is_some()
        && victory.all(|definition| status_of(definition) == Some(ObjectiveStatus::Completed))
    {
        return QuestStatus::Victory;
    }

    QuestStatus::InProgress
}
