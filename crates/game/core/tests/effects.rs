use std::collections::BTreeSet;

use quest_core::{
    Action, ActorState, BoardState, CardCatalog, CastSpellAction, EquipmentDefinition,
    EquipmentSlot, Faction, GameConfig, GameEvent, GameSetup, GameState, Position,
    SpellDefinition, SpellEffect, StatKind, StatusDuration, TargetingProfile, UseEquipmentAction,
    apply, create_game_state, validate,
};

fn spell(id: &str, target: TargetingProfile, effects: Vec<SpellEffect>) -> SpellDefinition {
    SpellDefinition {
        id: id.into(),
        name: id.into(),
        school: "arcane".into(),
        target,
        effects,
    }
}

fn push(delta: Option<Position>, destination: Option<Position>) -> SpellEffect {
    SpellEffect::Move {
        delta,
        destination,
        ignore_collisions: false,
    }
}

fn cards() -> CardCatalog {
    CardCatalog::default()
        .with_spell(spell(
            "repel",
            TargetingProfile::enemy(2, false),
            vec![push(Some(Position::new(0, 2)), None), SpellEffect::Damage { amount: 1 }],
        ))
        .with_spell(spell(
            "war-cry",
            TargetingProfile::self_only(),
            vec![
                SpellEffect::Buff {
                    stat: StatKind::AttackDice,
                    amount: 1,
                },
                SpellEffect::StatusModifier {
                    stat: StatKind::Movement,
                    amount: 2,
                    duration: StatusDuration::Turns(1),
                    id: None,
                    name: None,
                    tags: BTreeSet::from(["haste".to_owned()]),
                },
                SpellEffect::StatusModifier {
                    stat: StatKind::DefenseDice,
                    amount: -1,
                    duration: StatusDuration::Turns(3),
                    id: Some("dread".into()),
                    name: Some("Dread".into()),
                    tags: BTreeSet::from(["curse".to_owned()]),
                },
            ],
        ))
        .with_spell(spell(
            "purify",
            TargetingProfile::self_only(),
            vec![SpellEffect::Cleanse {
                status_ids: BTreeSet::new(),
                tags: BTreeSet::from(["curse".to_owned()]),
                remove_all: false,
            }],
        ))
        .with_equipment(EquipmentDefinition {
            id: "runaway-charm".into(),
            name: "Runaway Charm".into(),
            slot: EquipmentSlot::Trinket,
            target: TargetingProfile::self_only(),
            effects: vec![push(Some(Position::new(i32::MAX, 0)), None)],
            consumable: true,
        })
}

fn game() -> GameState {
    let actors = vec![
        ActorState::new("wizard", "Wizard", Faction::Hero, Position::new(3, 1))
            .with_attack(1, 1)
            .with_defense(2)
            .with_movement(4)
            .with_health(4)
            .with_spell("repel")
            .with_spell("war-cry")
            .with_spell("purify")
            .with_equipment("runaway-charm"),
        ActorState::new("orc", "Orc", Faction::Monster, Position::new(3, 2)).with_health(3),
    ];
    let setup = GameSetup::new(BoardState::new(6, 6), actors).with_cards(cards());
    create_game_state(setup, &GameConfig::default())
}

fn run(state: &GameState, action: impl Into<Action>) -> (GameState, Vec<GameEvent>) {
    let action = action.into();
    assert_eq!(validate(state, &action), Ok(()), "{action:?} should validate");
    let transition = apply(state, &action).unwrap_or_else(|error| panic!("{error}"));
    (transition.state, transition.events)
}

#[test]
fn forced_move_resolves_before_damage() {
    let (state, events) = run(&game(), CastSpellAction::new("wizard", "repel").targeting("orc"));

    let orc = state.actor(&"orc".into()).expect("orc");
    assert_eq!(orc.position, Position::new(3, 4));
    assert_eq!(orc.health, 2);
    assert!(matches!(events[0], GameEvent::SpellCast { .. }));
    assert_eq!(
        events[1],
        GameEvent::Move {
            actor_id: "orc".into(),
            from: Position::new(3, 2),
            to: Position::new(3, 4),
        }
    );
}

#[test]
fn stat_effects_stack_and_cleanse_by_tag() {
    let (state, _) = run(&game(), CastSpellAction::new("wizard", "war-cry"));
    let wizard = state.actor(&"wizard".into()).expect("wizard");
    assert_eq!(wizard.attack_dice, 2);
    assert_eq!(wizard.movement, 6);
    assert_eq!(wizard.defense_dice, 1);
    assert!(wizard.status_effects.contains(&"modifier:movement".into()));
    assert!(wizard.status_effects.contains(&"dread".into()));

    let (state, events) = run(&state, CastSpellAction::new("wizard", "purify"));
    let wizard = state.actor(&"wizard".into()).expect("wizard");
    assert_eq!(events.len(), 1);
    assert_eq!(wizard.defense_dice, 2);
    assert_eq!(wizard.movement, 6);
    assert_eq!(wizard.attack_dice, 2);
    assert!(!wizard.status_effects.contains(&"dread".into()));
}

#[test]
fn oversized_push_leaves_the_target_in_place() {
    let (state, events) = run(&game(), UseEquipmentAction::new("wizard", "runaway-charm"));

    let wizard = state.actor(&"wizard".into()).expect("wizard");
    assert_eq!(wizard.position, Position::new(3, 1));
    assert!(!wizard.carries(&"runaway-charm".into()));
    assert_eq!(events.len(), 1);
    assert!(matches!(events[0], GameEvent::EquipmentUsed { consumed: true, .. }));
}
