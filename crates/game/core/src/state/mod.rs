//! Authoritative game state representation.
//!
//! A [`GameState`] is a snapshot. Transitions never touch it in place: the
//! engine clones it, mutates the clone, and hands the clone back. The static
//! parts (board layout, card catalog) sit behind [`Arc`] so a clone only pays
//! for the branches that actually change; opening a door copies the board on
//! write.
pub mod root;
pub mod types;

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

#[cfg(feature = "serde")]
pub use root::compute_actions_root;
pub use types::*;

use crate::config::GameConfig;

/// Canonical snapshot of the deterministic game state.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameState {
    pub turn: TurnState,
    pub actors: BTreeMap<ActorId, ActorState>,
    pub board: Arc<BoardState>,
    pub discoverables: BTreeMap<DiscoverableId, DiscoverableState>,
    pub search: SearchState,
    pub cards: Arc<CardCatalog>,
    pub visibility: VisibilityState,
    pub quest: QuestState,
}

/// Static data a game is created from.
///
/// Everything except the board and the actors is optional and normalizes to
/// an empty subsystem.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameSetup {
    pub board: BoardState,
    pub actors: Vec<ActorState>,
    /// Acting order; defaults to the order of `actors`.
    #[cfg_attr(feature = "serde", serde(default))]
    pub turn_order: Option<Vec<ActorId>>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub discoverables: Vec<DiscoverableState>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub cards: CardCatalog,
    #[cfg_attr(feature = "serde", serde(default))]
    pub furniture: Vec<FurnitureState>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub dialog: Vec<DialogEntry>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub objectives: Vec<ObjectiveDefinition>,
    /// Tiles already known to each owner when the game starts.
    #[cfg_attr(feature = "serde", serde(default))]
    pub discovered: BTreeMap<OwnerKey, BTreeSet<Position>>,
}

impl GameSetup {
    pub fn new(board: BoardState, actors: Vec<ActorState>) -> Self {
        Self {
            board,
            actors,
            ..Self::default()
        }
    }

    pub fn with_turn_order(mut self, order: Vec<ActorId>) -> Self {
        self.turn_order = Some(order);
        self
    }

    pub fn with_discoverables(mut self, discoverables: Vec<DiscoverableState>) -> Self {
        self.discoverables = discoverables;
        self
    }

    pub fn with_cards(mut self, cards: CardCatalog) -> Self {
        self.cards = cards;
        self
    }

    pub fn with_furniture(mut self, furniture: Vec<FurnitureState>) -> Self {
        self.furniture = furniture;
        self
    }

    pub fn with_dialog(mut self, dialog: Vec<DialogEntry>) -> Self {
        self.dialog = dialog;
        self
    }

    pub fn with_objectives(mut self, objectives: Vec<ObjectiveDefinition>) -> Self {
        self.objectives = objectives;
        self
    }
}

impl GameState {
    /// Builds the initial snapshot, seeding the movement budget of every
    /// actor in the turn order. Ids in the order with no matching actor get
    /// no budget.
    pub fn from_setup(setup: GameSetup, config: &GameConfig) -> Self {
        let GameSetup {
            board,
            actors,
            turn_order,
            discoverables,
            cards,
            furniture,
            dialog,
            objectives,
            discovered,
        } = setup;

        let order = turn_order.unwrap_or_else(|| actors.iter().map(|a| a.id.clone()).collect());
        let movement_remaining: BTreeMap<_, _> = order
            .iter()
            .filter_map(|id| actors.iter().find(|actor| &actor.id == id))
            .map(|actor| (actor.id.clone(), actor.movement))
            .collect();
        let mut turn = TurnState::new(order);
        turn.movement_remaining = movement_remaining;

        let mut visibility =
            VisibilityState::new(config.visibility.mode, config.visibility.vision_range);
        visibility.discovered = discovered;

        Self {
            turn,
            actors: actors
                .into_iter()
                .map(|actor| (actor.id.clone(), actor))
                .collect(),
            board: Arc::new(board),
            discoverables: discoverables
                .into_iter()
                .map(|discoverable| (discoverable.id.clone(), discoverable))
                .collect(),
            search: SearchState::new(config.search),
            cards: Arc::new(cards),
            visibility,
            quest: QuestState {
                furniture: furniture
                    .into_iter()
                    .map(|item| (item.id.clone(), item))
                    .collect(),
                dialog_queue: dialog,
                objectives: QuestObjectivesState::from_definitions(objectives),
                interaction_history: BTreeSet::new(),
            },
        }
    }

    pub fn actor(&self, id: &ActorId) -> Option<&ActorState> {
        self.actors.get(id)
    }

    pub fn actor_mut(&mut self, id: &ActorId) -> Option<&mut ActorState> {
        self.actors.get_mut(id)
    }

    /// Id of the actor whose turn it is.
    pub fn current_actor_id(&self) -> Option<&ActorId> {
        self.turn.current_actor()
    }

    /// Mutable board access; copies the board if another snapshot shares it.
    pub fn board_mut(&mut self) -> &mut BoardState {
        Arc::make_mut(&mut self.board)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup() -> GameSetup {
        GameSetup::new(
            BoardState::new(5, 5),
            vec![
                ActorState::new("hero", "Hero", Faction::Hero, Position::new(0, 0))
                    .with_movement(4),
                ActorState::new("orc", "Orc", Faction::Monster, Position::new(4, 4))
                    .with_movement(6),
            ],
        )
    }

    #[test]
    fn turn_order_defaults_to_actor_order() {
        let state = GameState::from_setup(setup(), &GameConfig::default());
        assert_eq!(state.turn.order, vec![ActorId::from("hero"), ActorId::from("orc")]);
        assert_eq!(state.current_actor_id(), Some(&ActorId::from("hero")));
    }

    #[test]
    fn movement_is_seeded_for_every_actor() {
        let state = GameState::from_setup(setup(), &GameConfig::default());
        assert_eq!(state.turn.movement_remaining(&"hero".into()), 4);
        assert_eq!(state.turn.movement_remaining(&"orc".into()), 6);
    }

    #[test]
    fn movement_follows_an_explicit_turn_order() {
        let setup = setup().with_turn_order(vec!["orc".into(), "ghost".into()]);
        let state = GameState::from_setup(setup, &GameConfig::default());
        assert_eq!(state.current_actor_id(), Some(&ActorId::from("orc")));
        assert_eq!(state.turn.movement_remaining(&"orc".into()), 6);
        assert_eq!(
            state.turn.movement_remaining.keys().collect::<Vec<_>>(),
            vec![&ActorId::from("orc")]
        );
    }

    #[test]
    fn board_mut_leaves_earlier_snapshot_untouched() {
        let board = BoardState::new(3, 3).with_door(DoorState::closed("d1", Position::new(1, 1)));
        let original = GameState::from_setup(
            GameSetup::new(board, Vec::new()),
            &GameConfig::default(),
        );

        let mut next = original.clone();
        if let Some(door) = next.board_mut().door_mut(&"d1".into()) {
            door.open = true;
        }

        assert!(!original.board.doors[0].open);
        assert!(next.board.doors[0].open);
    }
}
