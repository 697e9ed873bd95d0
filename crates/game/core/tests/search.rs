use quest_core::{
    Action, ActionError, ActorState, BoardState, DiscoverableId, DiscoverableState,
    DiscoverableType, EndTurnAction, Faction, GameConfig, GameEvent, GameSetup, GameState,
    OwnerKey, Position, RevealSource, SearchAction, SearchArea, SearchDiscovery,
    SearchHistoryMode, SearchKinds, SearchRules, SearchType, apply, create_game_state, validate,
};

fn hall_tiles() -> Vec<Position> {
    (0..3)
        .flat_map(|y| (0..3).map(move |x| Position::new(x, y)))
        .collect()
}

fn board() -> BoardState {
    BoardState::new(6, 3)
        .with_area(SearchArea::new("hall", "Great Hall", hall_tiles()))
        .with_area(
            SearchArea::new("closet", "Closet", vec![Position::new(5, 0)])
                .with_allowed_searches(SearchKinds::TREASURE),
        )
}

fn heroes() -> Vec<ActorState> {
    vec![
        ActorState::new("h1", "Barbarian", Faction::Hero, Position::new(0, 0)).with_health(8),
        ActorState::new("h2", "Dwarf", Faction::Hero, Position::new(1, 0)).with_health(7),
    ]
}

fn game(actors: Vec<ActorState>, rules: SearchRules) -> GameState {
    let setup = GameSetup::new(board(), actors).with_discoverables(vec![
        DiscoverableState::hidden("pit", "hall", DiscoverableType::Trap, Position::new(2, 2)),
        DiscoverableState::hidden("chest", "hall", DiscoverableType::Treasure, Position::new(1, 1)),
    ]);
    create_game_state(setup, &GameConfig::default().with_search(rules))
}

fn run(state: &GameState, action: impl Into<Action>) -> (GameState, Vec<GameEvent>) {
    let action = action.into();
    let transition = apply(state, &action).unwrap_or_else(|error| panic!("{error}"));
    (transition.state, transition.events)
}

#[test]
fn search_reveals_matching_features_and_area_tiles() {
    let state = game(heroes(), SearchRules::default());

    let (state, events) = run(&state, SearchAction::new("h1", SearchType::Traps));

    assert_eq!(
        events,
        vec![
            GameEvent::SearchPerformed {
                actor_id: "h1".into(),
                area_id: "hall".into(),
                search_type: SearchType::Traps,
                discoveries: vec![SearchDiscovery {
                    id: "pit".into(),
                    kind: DiscoverableType::Trap,
                    position: Position::new(2, 2),
                }],
            },
            GameEvent::TilesRevealed {
                owner: OwnerKey::Global,
                tiles: hall_tiles(),
                source: RevealSource::Search,
                trigger_id: None,
            },
        ]
    );
    assert!(state.discoverables[&DiscoverableId::from("pit")].revealed);
    assert!(!state.discoverables[&DiscoverableId::from("chest")].revealed);
}

#[test]
fn per_area_history_blocks_the_next_hero() {
    let state = game(heroes(), SearchRules::default());
    let (state, _) = run(&state, SearchAction::new("h1", SearchType::Traps));
    let (state, _) = run(&state, EndTurnAction::new("h1"));

    assert_eq!(
        validate(&state, &SearchAction::new("h2", SearchType::Traps).into()),
        Err(ActionError::AlreadySearched {
            area: "hall".into(),
            search_type: SearchType::Traps,
        })
    );

    // A different kind of search is still open, but finds no new tiles.
    let (_, events) = run(&state, SearchAction::new("h2", SearchType::Treasure));
    assert_eq!(events.len(), 1);
    assert!(matches!(
        &events[0],
        GameEvent::SearchPerformed { discoveries, .. } if discoveries.len() == 1
    ));
}

#[test]
fn per_hero_history_lets_each_hero_search_once() {
    let rules = SearchRules {
        history_mode: SearchHistoryMode::PerHero,
        ..SearchRules::default()
    };
    let state = game(heroes(), rules);
    let (state, _) = run(&state, SearchAction::new("h1", SearchType::Traps));
    let (state, _) = run(&state, EndTurnAction::new("h1"));

    let (state, events) = run(&state, SearchAction::new("h2", SearchType::Traps));
    assert!(matches!(
        &events[0],
        GameEvent::SearchPerformed { discoveries, .. } if discoveries.is_empty()
    ));

    assert_eq!(
        validate(&state, &SearchAction::new("h2", SearchType::Traps).into()),
        Err(ActionError::AlreadySearched {
            area: "hall".into(),
            search_type: SearchType::Traps,
        })
    );
}

#[test]
fn living_enemies_in_the_area_prevent_searching() {
    let mut actors = heroes();
    actors.push(
        ActorState::new("orc", "Orc", Faction::Monster, Position::new(2, 1)).with_health(3),
    );
    let search = Action::from(SearchAction::new("h1", SearchType::Treasure));

    let state = game(actors.clone(), SearchRules::default());
    assert_eq!(
        validate(&state, &search),
        Err(ActionError::EnemiesPresent("hall".into()))
    );

    let lenient = game(
        actors,
        SearchRules {
            require_no_enemies: false,
            ..SearchRules::default()
        },
    );
    assert_eq!(validate(&lenient, &search), Ok(()));

    let mut cleared = state.clone();
    if let Some(orc) = cleared.actor_mut(&"orc".into()) {
        orc.health = 0;
    }
    assert_eq!(validate(&cleared, &search), Ok(()));
}

#[test]
fn monsters_and_bare_corridors_cannot_be_searched() {
    let actors = vec![
        ActorState::new("orc", "Orc", Faction::Monster, Position::new(4, 4)).with_health(3),
        ActorState::new("h1", "Elf", Faction::Hero, Position::new(4, 0)).with_health(6),
    ];
    let board = BoardState::new(6, 6).with_area(SearchArea::new("hall", "Hall", hall_tiles()));
    let state = create_game_state(GameSetup::new(board, actors), &GameConfig::default());
    assert_eq!(
        validate(&state, &SearchAction::new("orc", SearchType::Traps).into()),
        Err(ActionError::SearchRestrictedToHeroes)
    );

    let (state, _) = run(&state, EndTurnAction::new("orc"));
    assert_eq!(
        validate(&state, &SearchAction::new("h1", SearchType::Traps).into()),
        Err(ActionError::AreaNotSearchable)
    );
}

#[test]
fn area_permissions_limit_search_kinds() {
    let actors = vec![
        ActorState::new("h1", "Wizard", Faction::Hero, Position::new(5, 0)).with_health(4),
    ];
    let state = game(actors, SearchRules::default());

    assert_eq!(
        validate(&state, &SearchAction::new("h1", SearchType::SecretDoors).into()),
        Err(ActionError::SearchTypeNotAllowed {
            area: "closet".into(),
            search_type: SearchType::SecretDoors,
        })
    );
    assert_eq!(
        validate(&state, &SearchAction::new("h1", SearchType::Treasure).into()),
        Ok(())
    );
}
