//! Action validation and execution pipeline.
//!
//! [`validate`] and [`apply`] are the only ways state changes. `apply` never
//! touches its input: it clones the snapshot (sharing the board and card
//! catalog), drives the action through
//! `pre_validate → apply → post_validate` on the clone, and hands the clone
//! back with the events it produced. If any phase fails the clone is dropped,
//! so an action either commits completely or not at all.

mod errors;
mod turns;

pub use errors::{ExecuteError, TransitionPhase, TransitionPhaseError};
pub use turns::advance_turn;

use tracing::{debug, warn};

use crate::action::{Action, ActionError, ActionKind, ActionTransition, ensure_active_actor};
use crate::event::GameEvent;
use crate::state::GameState;

/// Successor snapshot plus the events that produced it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Transition {
    pub state: GameState,
    pub events: Vec<GameEvent>,
}

impl Transition {
    pub fn new(state: GameState, events: Vec<GameEvent>) -> Self {
        Self { state, events }
    }
}

type TransitionResult = Result<(), TransitionPhaseError<ActionError>>;

macro_rules! dispatch_transition {
    ($action:expr, $transition:ident => $body:expr) => {{
        match $action {
            Action::Move($transition) => $body,
            Action::Attack($transition) => $body,
            Action::Search($transition) => $body,
            Action::CastSpell($transition) => $body,
            Action::UseEquipment($transition) => $body,
            Action::OpenDoor($transition) => $body,
            Action::TriggerQuestVisibility($transition) => $body,
            Action::EndTurn($transition) => $body,
        }
    }};
}

/// Checks `action` against `state` without changing anything.
///
/// Actor-initiated actions first pass the shared turn checks (actor exists,
/// is alive, holds the turn), then their own rules.
pub fn validate(state: &GameState, action: &Action) -> Result<(), ActionError> {
    dispatch_transition!(action, transition => check_transition(transition, state))
}

/// Applies `action` to a copy of `state`.
///
/// Calling this with an action [`validate`] rejects is a caller bug and
/// yields an [`ExecuteError`] in the `pre_validate` phase.
pub fn apply(state: &GameState, action: &Action) -> Result<Transition, ExecuteError> {
    let mut next = state.clone();
    let events = GameEngine::new(&mut next)
        .execute(action)
        .inspect_err(|error| warn!(%error, "apply rejected action"))?;
    Ok(Transition::new(next, events))
}

/// Runs actions against a working copy the caller owns.
pub struct GameEngine<'a> {
    state: &'a mut GameState,
}

impl<'a> GameEngine<'a> {
    pub fn new(state: &'a mut GameState) -> Self {
        Self { state }
    }

    /// Executes an action through the transition pipeline.
    ///
    /// On error the working copy may be partially modified and must be
    /// discarded.
    pub fn execute(&mut self, action: &Action) -> Result<Vec<GameEvent>, ExecuteError> {
        let kind = action.kind();
        let mut events = Vec::new();

        let outcome = dispatch_transition!(action, transition => {
            drive_transition(transition, self.state, &mut events)
        });
        outcome.map_err(|failure| ExecuteError::new(kind, failure))?;

        if kind != ActionKind::EndTurn && self.current_actor_defeated() {
            debug!("current actor fell during their own action");
            advance_turn(self.state, &mut events);
        }

        debug!(%kind, events = events.len(), "action applied");
        Ok(events)
    }

    fn current_actor_defeated(&self) -> bool {
        self.state
            .current_actor_id()
            .and_then(|id| self.state.actor(id))
            .is_some_and(|actor| !actor.is_alive())
    }
}

fn check_transition<T>(transition: &T, state: &GameState) -> Result<(), ActionError>
where
    T: ActionTransition,
{
    if let Some(actor_id) = transition.actor() {
        ensure_active_actor(state, actor_id)?;
    }
    transition.pre_validate(state)
}

#[inline]
fn drive_transition<T>(
    transition: &T,
    state: &mut GameState,
    events: &mut Vec<GameEvent>,
) -> TransitionResult
where
    T: ActionTransition,
{
    check_transition(transition, state)
        .map_err(|error| TransitionPhaseError::new(TransitionPhase::PreValidate, error))?;

    transition
        .apply(state, events)
        .map_err(|error| TransitionPhaseError::new(TransitionPhase::Apply, error))?;

    transition
        .post_validate(state)
        .map_err(|error| TransitionPhaseError::new(TransitionPhase::PostValidate, error))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::{CastSpellAction, EndTurnAction, MoveAction};
    use crate::config::GameConfig;
    use crate::state::{
        ActorId, ActorState, BoardState, CardCatalog, Faction, GameSetup, Position,
        SpellDefinition, SpellEffect, TargetingProfile,
    };

    fn state() -> GameState {
        let cards = CardCatalog::default().with_spell(SpellDefinition {
            id: "backfire".into(),
            name: "Backfire".into(),
            school: "chaos".into(),
            target: TargetingProfile::self_only(),
            effects: vec![SpellEffect::Damage { amount: 10 }],
        });
        let actors = vec![
            ActorState::new("wizard", "Wizard", Faction::Hero, Position::new(0, 0))
                .with_movement(4)
                .with_health(3)
                .with_spell("backfire"),
            ActorState::new("orc", "Orc", Faction::Monster, Position::new(3, 3))
                .with_movement(6)
                .with_health(2),
        ];
        GameState::from_setup(
            GameSetup::new(BoardState::new(5, 5), actors).with_cards(cards),
            &GameConfig::default(),
        )
    }

    #[test]
    fn apply_leaves_the_input_untouched() {
        let state = state();
        let before = state.clone();
        let action = Action::from(MoveAction::new("wizard", Position::new(2, 0)));

        let transition = apply(&state, &action).unwrap_or_else(|error| panic!("{error}"));

        assert_eq!(state, before);
        assert_eq!(
            transition.state.actor(&"wizard".into()).map(|a| a.position),
            Some(Position::new(2, 0))
        );
        assert_eq!(transition.state.turn.movement_remaining(&"wizard".into()), 2);
    }

    #[test]
    fn shared_checks_run_before_action_rules() {
        let state = state();
        let action = Action::from(MoveAction::new("orc", Position::new(3, 4)));
        assert_eq!(
            validate(&state, &action),
            Err(ActionError::NotActorsTurn {
                actor: "orc".into()
            })
        );

        let error = apply(&state, &action).err();
        assert_eq!(error.as_ref().map(ExecuteError::phase), Some(TransitionPhase::PreValidate));
        assert_eq!(error.map(|e| e.kind), Some(ActionKind::Move));
    }

    #[test]
    fn self_defeat_passes_the_turn() {
        let state = state();
        let action = Action::from(CastSpellAction::new("wizard", "backfire"));

        let transition = apply(&state, &action).unwrap_or_else(|error| panic!("{error}"));

        assert_eq!(transition.state.current_actor_id(), Some(&ActorId::from("orc")));
        assert!(transition.events.contains(&GameEvent::ActorDefeated {
            actor_id: "wizard".into(),
            faction: Faction::Hero,
        }));
        assert_eq!(
            transition.events.last(),
            Some(&GameEvent::TurnEnded {
                previous_actor_id: "wizard".into(),
                next_actor_id: "orc".into(),
            })
        );
    }

    #[test]
    fn end_turn_is_validated_like_any_action() {
        let state = state();
        assert!(validate(&state, &EndTurnAction::new("wizard").into()).is_ok());
        assert_eq!(
            validate(&state, &EndTurnAction::new("ghost").into()),
            Err(ActionError::ActorNotFound("ghost".into()))
        );
    }
}
