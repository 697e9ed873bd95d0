//! Consistency checks for scenario setups.
//!
//! The engine trusts its setup: an actor placed in a wall or a turn order
//! naming a missing actor would surface later as confusing rejections. These
//! checks catch such mistakes once, at load time.

use std::collections::{BTreeMap, BTreeSet};

use quest_core::{GameSetup, TriggerOwner, is_blocked, is_within_bounds};

use crate::error::ScenarioError;

/// Checks that `setup` describes a playable game.
pub fn validate_setup(setup: &GameSetup) -> Result<(), ScenarioError> {
    let board = &setup.board;
    if board.width == 0 || board.height == 0 {
        return Err(ScenarioError::EmptyBoard {
            width: board.width,
            height: board.height,
        });
    }

    let mut ids = BTreeSet::new();
    let mut tiles = BTreeMap::new();
    for actor in &setup.actors {
        if !ids.insert(&actor.id) {
            return Err(ScenarioError::DuplicateActor(actor.id.clone()));
        }
        if !is_within_bounds(board, actor.position) {
            return Err(ScenarioError::ActorOutOfBounds {
                actor: actor.id.clone(),
                position: actor.position,
            });
        }
        if is_blocked(board, actor.position) {
            return Err(ScenarioError::ActorOnBlockedTile {
                actor: actor.id.clone(),
                position: actor.position,
            });
        }
        if actor.is_alive() {
            if let Some(first) = tiles.insert(actor.position, &actor.id) {
                return Err(ScenarioError::SharedTile {
                    first: first.clone(),
                    second: actor.id.clone(),
                    position: actor.position,
                });
            }
        }
        if let Some(spell) = actor
            .known_spells
            .iter()
            .find(|spell| setup.cards.spell(spell).is_none())
        {
            return Err(ScenarioError::UnknownSpell {
                actor: actor.id.clone(),
                spell: spell.clone(),
            });
        }
        if let Some(equipment) = actor
            .equipment
            .iter()
            .find(|equipment| setup.cards.equipment(equipment).is_none())
        {
            return Err(ScenarioError::UnknownEquipment {
                actor: actor.id.clone(),
                equipment: equipment.clone(),
            });
        }
    }

    if let Some(order) = &setup.turn_order {
        if let Some(missing) = order.iter().find(|id| !ids.contains(id)) {
            return Err(ScenarioError::UnknownTurnActor(missing.clone()));
        }
    }

    for discoverable in &setup.discoverables {
        if board.area(&discoverable.area_id).is_none() {
            return Err(ScenarioError::UnknownArea {
                owner: format!("discoverable {}", discoverable.id),
                area: discoverable.area_id.clone(),
            });
        }
    }

    let mut triggers = BTreeSet::new();
    for trigger in &board.visibility_triggers {
        if !triggers.insert(&trigger.id) {
            return Err(ScenarioError::DuplicateTrigger(trigger.id.clone()));
        }
        if let Some(area) = trigger.area_ids.iter().find(|area| board.area(area).is_none()) {
            return Err(ScenarioError::UnknownArea {
                owner: format!("trigger {}", trigger.id),
                area: area.clone(),
            });
        }
        if let TriggerOwner::Actor(actor) = &trigger.owner {
            if !ids.contains(actor) {
                tracing::warn!(
                    trigger = %trigger.id,
                    %actor,
                    "trigger owner is not placed at setup; it reveals nothing until spawned"
                );
            }
        }
    }

    for objective in &setup.objectives {
        if let Some(area) = objective
            .condition
            .area_ids
            .iter()
            .find(|area| board.area(area).is_none())
        {
            return Err(ScenarioError::UnknownArea {
                owner: format!("objective {}", objective.id),
                area: area.clone(),
            });
        }
    }

    Ok(())
}
