#![cfg(feature = "serde")]

use quest_core::{
    Action, ActorState, AttackAction, BoardState, DieFace, EndTurnAction, Faction, GameConfig,
    GameSetup, GameState, MoveAction, Position, apply, compute_actions_root, create_game_state,
};

fn game() -> GameState {
    let actors = vec![
        ActorState::new("hero", "Hero", Faction::Hero, Position::new(0, 0))
            .with_movement(5)
            .with_attack(2, 1)
            .with_health(6),
        ActorState::new("orc", "Orc", Faction::Monster, Position::new(3, 0))
            .with_movement(4)
            .with_defense(1)
            .with_health(3),
    ];
    create_game_state(GameSetup::new(BoardState::new(6, 6), actors), &GameConfig::default())
}

fn script() -> Vec<Action> {
    vec![
        MoveAction::new("hero", Position::new(2, 0)).into(),
        AttackAction::new(
            "hero",
            "orc",
            vec![DieFace::Skull, DieFace::Skull],
            vec![DieFace::WhiteShield],
        )
        .into(),
        EndTurnAction::new("hero").into(),
        MoveAction::new("orc", Position::new(3, 2)).into(),
    ]
}

fn replay(actions: &[Action]) -> GameState {
    actions.iter().fold(game(), |state, action| {
        apply(&state, action)
            .unwrap_or_else(|error| panic!("{error}"))
            .state
    })
}

#[test]
fn replaying_a_script_reproduces_the_state_root() {
    let first = replay(&script());
    let second = replay(&script());

    assert_eq!(
        hex::encode(first.state_root()),
        hex::encode(second.state_root())
    );
    assert_ne!(first.state_root(), game().state_root());
}

#[test]
fn actions_root_depends_on_order() {
    let forward = script();
    let mut shuffled = script();
    shuffled.swap(0, 2);

    assert_eq!(compute_actions_root(&forward), compute_actions_root(&script()));
    assert_ne!(compute_actions_root(&forward), compute_actions_root(&shuffled));
    assert_eq!(hex::encode(compute_actions_root(&[])).len(), 64);
}
