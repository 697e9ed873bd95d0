//! Quest side effects carried by visibility triggers.

use tracing::debug;

use crate::event::GameEvent;
use crate::state::{GameState, QuestTriggerEffect};

/// Applies trigger side effects in order, pushing one event per effect that
/// changed something.
pub fn apply_quest_effects(
    state: &mut GameState,
    effects: &[QuestTriggerEffect],
    events: &mut Vec<GameEvent>,
) {
    for effect in effects {
        match effect {
            QuestTriggerEffect::SpawnActors { actors } => {
                let mut spawned = Vec::new();
                for actor in actors {
                    if state.actors.contains_key(&actor.id) {
                        continue;
                    }
                    state.turn.order.push(actor.id.clone());
                    state
                        .turn
                        .movement_remaining
                        .insert(actor.id.clone(), actor.movement);
                    state.actors.insert(actor.id.clone(), actor.clone());
                    spawned.push(actor.id.clone());
                }
                if !spawned.is_empty() {
                    debug!(count = spawned.len(), "actors spawned");
                    events.push(GameEvent::ActorsSpawned { actor_ids: spawned });
                }
            }
            QuestTriggerEffect::AddDiscoverables { discoverables } => {
                let mut added = Vec::new();
                for discoverable in discoverables {
                    if state.discoverables.contains_key(&discoverable.id) {
                        continue;
                    }
                    state
                        .discoverables
                        .insert(discoverable.id.clone(), discoverable.clone());
                    added.push(discoverable.id.clone());
                }
                if !added.is_empty() {
                    events.push(GameEvent::DiscoverablesAdded {
                        discoverable_ids: added,
                    });
                }
            }
            QuestTriggerEffect::EnqueueDialog { entries } => {
                if !entries.is_empty() {
                    state.quest.dialog_queue.extend(entries.iter().cloned());
                    events.push(GameEvent::DialogEnqueued {
                        entries: entries.clone(),
                    });
                }
            }
            QuestTriggerEffect::PlaceFurniture { furniture } => {
                for item in furniture {
                    state.quest.furniture.insert(item.id.clone(), item.clone());
                }
                if !furniture.is_empty() {
                    events.push(GameEvent::FurniturePlaced {
                        furniture_ids: furniture.iter().map(|item| item.id.clone()).collect(),
                    });
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::state::{
        ActorId, ActorState, BoardState, DialogEntry, Faction, FurnitureState, GameSetup, Position,
    };

    fn state() -> GameState {
        GameState::from_setup(
            GameSetup::new(
                BoardState::new(6, 6),
                vec![ActorState::new("hero", "Hero", Faction::Hero, Position::ORIGIN)],
            ),
            &GameConfig::default(),
        )
    }

    #[test]
    fn spawn_skips_existing_and_appends_to_order() {
        let mut state = state();
        let mut events = Vec::new();
        let orc =
            ActorState::new("orc", "Orc", Faction::Monster, Position::new(3, 3)).with_movement(8);
        let duplicate = ActorState::new("hero", "Impostor", Faction::Monster, Position::new(4, 4));

        apply_quest_effects(
            &mut state,
            &[QuestTriggerEffect::SpawnActors {
                actors: vec![duplicate, orc],
            }],
            &mut events,
        );

        assert_eq!(state.turn.order, vec![ActorId::from("hero"), ActorId::from("orc")]);
        assert_eq!(state.turn.movement_remaining(&"orc".into()), 8);
        assert_eq!(state.actor(&"hero".into()).map(|a| a.name.as_str()), Some("Hero"));
        assert_eq!(
            events,
            vec![GameEvent::ActorsSpawned {
                actor_ids: vec!["orc".into()]
            }]
        );
    }

    #[test]
    fn furniture_upserts_and_dialog_appends() {
        let mut state = state();
        let mut events = Vec::new();
        let chest = |x| FurnitureState {
            id: "chest".into(),
            kind: "chest".into(),
            position: Position::new(x, 1),
        };
        let line = DialogEntry {
            id: "intro".into(),
            speaker: Some("Mentor".into()),
            text: "Beware the dark.".into(),
        };

        apply_quest_effects(
            &mut state,
            &[
                QuestTriggerEffect::PlaceFurniture {
                    furniture: vec![chest(1)],
                },
                QuestTriggerEffect::PlaceFurniture {
                    furniture: vec![chest(2)],
                },
                QuestTriggerEffect::EnqueueDialog {
                    entries: vec![line.clone()],
                },
            ],
            &mut events,
        );

        assert_eq!(state.quest.furniture.len(), 1);
        assert_eq!(
            state.quest.furniture.get::<crate::state::FurnitureId>(&"chest".into()).map(|f| f.position),
            Some(Position::new(2, 1))
        );
        assert_eq!(state.quest.dialog_queue, vec![line]);
        assert_eq!(events.len(), 3);
    }
}
