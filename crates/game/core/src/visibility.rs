//! Fog-of-war engine.
//!
//! Discovered tiles are partitioned by [`OwnerKey`] according to the game's
//! [`VisibilityMode`]. Reveals only ever add tiles, and each trigger id fires
//! at most once per game.

use std::collections::{BTreeSet, VecDeque};

use tracing::{debug, trace};

use crate::engine::Transition;
use crate::event::GameEvent;
use crate::geometry::{is_blocked, is_within_bounds, tiles_for_areas};
use crate::quest::apply_quest_effects;
use crate::state::{
    ActorId, BoardState, GameState, OwnerKey, Position, RevealSource, TriggerContext, TriggerId,
    TriggerOwner, VisibilityMode, VisibilityState, VisibilityTrigger,
};

/// Tiles reachable from `origin` within `range` orthogonal steps.
///
/// Breadth-first over the 4-neighbourhood; blocked tiles (walls, closed
/// doors) are neither visible nor seen through. The origin is always
/// included. Tiles come back in discovery order.
pub fn compute_visible_tiles(board: &BoardState, origin: Position, range: u32) -> Vec<Position> {
    let mut visited = BTreeSet::from([origin]);
    let mut queue = VecDeque::from([(origin, 0u32)]);
    let mut tiles = Vec::new();

    while let Some((position, distance)) = queue.pop_front() {
        tiles.push(position);
        if distance >= range {
            continue;
        }
        for neighbor in position.neighbors() {
            if !is_within_bounds(board, neighbor) || is_blocked(board, neighbor) {
                continue;
            }
            if visited.insert(neighbor) {
                queue.push_back((neighbor, distance + 1));
            }
        }
    }

    tiles
}

/// Configured vision range, bounded by the board's width plus height.
pub fn effective_vision_range(state: &GameState) -> u32 {
    let board_span = state.board.width.saturating_add(state.board.height);
    state
        .visibility
        .vision_range
        .map_or(board_span, |range| range.min(board_span))
}

/// What `actor_id` can currently see. Unknown actors see nothing.
pub fn visible_tiles_for_actor(state: &GameState, actor_id: &ActorId) -> Vec<Position> {
    match state.actor(actor_id) {
        Some(actor) => {
            compute_visible_tiles(&state.board, actor.position, effective_vision_range(state))
        }
        None => Vec::new(),
    }
}

/// Owner key an actor's discoveries are filed under.
pub fn owner_key_for_actor(state: &GameState, actor_id: &ActorId) -> Option<OwnerKey> {
    let actor = state.actor(actor_id)?;
    Some(match state.visibility.mode {
        VisibilityMode::Global => OwnerKey::Global,
        VisibilityMode::PerFaction => OwnerKey::Faction(actor.faction),
        VisibilityMode::PerActor => OwnerKey::Actor(actor.id.clone()),
    })
}

/// Owner keys that receive a trigger's tiles.
///
/// A faction owner fans out to every living member under per-actor mode and
/// collapses to the global key under global mode.
pub fn resolve_owner_keys(state: &GameState, owner: &TriggerOwner) -> Vec<OwnerKey> {
    match owner {
        TriggerOwner::Global => vec![OwnerKey::Global],
        TriggerOwner::Actor(actor_id) => owner_key_for_actor(state, actor_id).into_iter().collect(),
        TriggerOwner::Faction(faction) => match state.visibility.mode {
            VisibilityMode::Global => vec![OwnerKey::Global],
            VisibilityMode::PerFaction => vec![OwnerKey::Faction(*faction)],
            VisibilityMode::PerActor => state
                .actors
                .values()
                .filter(|actor| actor.faction == *faction && actor.is_alive())
                .map(|actor| OwnerKey::Actor(actor.id.clone()))
                .collect(),
        },
    }
}

/// Adds `tiles` to the owner's discovered set and returns the ones that
/// were not there before, in input order.
pub fn merge_tiles(
    visibility: &mut VisibilityState,
    owner: &OwnerKey,
    tiles: &[Position],
) -> Vec<Position> {
    let discovered = visibility.discovered.entry(owner.clone()).or_default();
    tiles
        .iter()
        .copied()
        .filter(|tile| discovered.insert(*tile))
        .collect()
}

/// Merges tiles for one owner and reports the new ones, if any.
pub(crate) fn reveal_for_owner(
    state: &mut GameState,
    owner: OwnerKey,
    tiles: &[Position],
    source: RevealSource,
    trigger_id: Option<&TriggerId>,
    events: &mut Vec<GameEvent>,
) {
    let revealed = merge_tiles(&mut state.visibility, &owner, tiles);
    if revealed.is_empty() {
        return;
    }
    trace!(%owner, count = revealed.len(), %source, "tiles revealed");
    events.push(GameEvent::TilesRevealed {
        owner,
        tiles: revealed,
        source,
        trigger_id: trigger_id.cloned(),
    });
}

/// Fires `trigger` against a snapshot, returning the successor.
///
/// A trigger that already fired yields an unchanged copy and no events.
pub fn trigger_visibility_reveal(state: &GameState, trigger: &VisibilityTrigger) -> Transition {
    let mut next = state.clone();
    let mut events = Vec::new();
    fire_trigger(&mut next, trigger, &mut events);
    Transition::new(next, events)
}

/// Fires every board trigger bound to `context`, in board order.
pub fn trigger_quest_visibility(state: &GameState, context: &TriggerContext) -> Transition {
    let mut next = state.clone();
    let mut events = Vec::new();
    fire_matching_triggers(&mut next, context, &mut events);
    Transition::new(next, events)
}

/// Board triggers bound to `context`.
pub fn matching_triggers<'a>(
    board: &'a BoardState,
    context: &'a TriggerContext,
) -> impl Iterator<Item = &'a VisibilityTrigger> + 'a {
    board
        .visibility_triggers
        .iter()
        .filter(move |trigger| trigger.matches(context))
}

pub(crate) fn fire_matching_triggers(
    state: &mut GameState,
    context: &TriggerContext,
    events: &mut Vec<GameEvent>,
) {
    let triggers: Vec<VisibilityTrigger> =
        matching_triggers(&state.board, context).cloned().collect();
    for trigger in &triggers {
        fire_trigger(state, trigger, events);
    }
}

pub(crate) fn fire_trigger(
    state: &mut GameState,
    trigger: &VisibilityTrigger,
    events: &mut Vec<GameEvent>,
) {
    if state.visibility.has_fired(&trigger.id) {
        trace!(trigger = %trigger.id, "trigger already fired");
        return;
    }
    state.visibility.trigger_history.insert(trigger.id.clone());

    let mut seen = BTreeSet::new();
    let tiles: Vec<Position> = trigger
        .tiles
        .iter()
        .copied()
        .chain(tiles_for_areas(&state.board, &trigger.area_ids))
        .filter(|tile| seen.insert(*tile))
        .collect();

    if !tiles.is_empty() {
        let source = trigger.context.source();
        for owner in resolve_owner_keys(state, &trigger.owner) {
            reveal_for_owner(state, owner, &tiles, source, Some(&trigger.id), events);
        }
    }

    debug!(trigger = %trigger.id, tiles = tiles.len(), "visibility trigger fired");
    apply_quest_effects(state, &trigger.effects, events);
}
