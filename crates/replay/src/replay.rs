//! Script replay loop.
//!
//! Each action is validated, applied, and its events fed to the objective
//! tracker. A rejected action leaves the state untouched; the loop either
//! stops there or skips it, depending on `keep_going`.

use quest_core::{
    Action, GameError, GameEvent, GameState, QuestStatus, apply, compute_actions_root,
    track_objectives, validate,
};
use serde::Serialize;
use tracing::{info, warn};

/// What happened to one scripted action.
#[derive(Clone, Debug, Serialize)]
#[serde(tag = "outcome", rename_all = "camelCase")]
pub enum StepOutcome {
    Applied { events: Vec<GameEvent> },
    Rejected { code: &'static str, message: String },
}

#[derive(Clone, Debug, Serialize)]
pub struct Step {
    pub index: usize,
    pub action: Action,
    #[serde(flatten)]
    pub outcome: StepOutcome,
}

impl Step {
    pub fn is_rejected(&self) -> bool {
        matches!(self.outcome, StepOutcome::Rejected { .. })
    }
}

/// Result of replaying a whole script.
#[derive(Clone, Debug)]
pub struct ReplayReport {
    pub steps: Vec<Step>,
    pub state: GameState,
}

impl ReplayReport {
    pub fn status(&self) -> QuestStatus {
        self.state.quest.objectives.overall_status
    }

    pub fn rejected(&self) -> usize {
        self.steps.iter().filter(|step| step.is_rejected()).count()
    }

    /// Hex digest of the final state.
    pub fn state_root(&self) -> String {
        hex::encode(self.state.state_root())
    }

    /// Hex digest of the actions that were actually applied, in order.
    pub fn actions_root(&self) -> String {
        let applied: Vec<Action> = self
            .steps
            .iter()
            .filter(|step| !step.is_rejected())
            .map(|step| step.action.clone())
            .collect();
        hex::encode(compute_actions_root(&applied))
    }
}

/// Plays `script` from `state`.
pub fn replay(state: GameState, script: &[Action], keep_going: bool) -> ReplayReport {
    let mut state = state;
    let mut steps = Vec::with_capacity(script.len());

    for (index, action) in script.iter().enumerate() {
        let outcome = match step(&state, action) {
            Ok((next, events)) => {
                info!(index, kind = %action.kind(), events = events.len(), "action applied");
                state = next;
                StepOutcome::Applied { events }
            }
            Err((code, message)) => {
                warn!(index, kind = %action.kind(), code, %message, "action rejected");
                StepOutcome::Rejected { code, message }
            }
        };

        let stop = matches!(outcome, StepOutcome::Rejected { .. }) && !keep_going;
        steps.push(Step {
            index,
            action: action.clone(),
            outcome,
        });
        if stop {
            break;
        }
    }

    ReplayReport { steps, state }
}

fn step(
    state: &GameState,
    action: &Action,
) -> Result<(GameState, Vec<GameEvent>), (&'static str, String)> {
    validate(state, action).map_err(|error| (error.error_code(), error.to_string()))?;
    let transition =
        apply(state, action).map_err(|error| (error.error_code(), error.to_string()))?;

    let mut events = transition.events;
    let (next, update) = track_objectives(&transition.state, &events);
    events.extend(update);
    Ok((next, events))
}

#[cfg(test)]
mod tests {
    use super::*;
    use quest_content::ContentFactory;
    use quest_core::{EndTurnAction, create_game_state};

    fn first_trial() -> (GameState, Vec<Action>) {
        let factory = ContentFactory::bundled();
        let scenario = factory.load_scenario("first-trial").expect("scenario");
        let script = factory.load_script("first-trial").expect("script");
        let config = factory.load_config().expect("config");
        (create_game_state(scenario.setup, &config), script)
    }

    #[test]
    fn bundled_script_replays_to_victory() {
        let (state, script) = first_trial();
        let report = replay(state, &script, false);

        assert_eq!(report.steps.len(), script.len());
        assert_eq!(report.rejected(), 0);
        assert_eq!(report.status(), QuestStatus::Victory);
        assert_eq!(report.state_root().len(), 64);
    }

    #[test]
    fn rejection_stops_unless_keep_going() {
        let (state, mut script) = first_trial();
        script.insert(1, EndTurnAction::new("wizard").into());

        let stopped = replay(state.clone(), &script, false);
        assert_eq!(stopped.steps.len(), 2);
        assert!(matches!(
            stopped.steps[1].outcome,
            StepOutcome::Rejected {
                code: "ACTION_NOT_ACTORS_TURN",
                ..
            }
        ));

        let skipped = replay(state, &script, true);
        assert_eq!(skipped.rejected(), 1);
        assert_eq!(skipped.status(), QuestStatus::Victory);

        let (fresh, original) = first_trial();
        assert_eq!(skipped.actions_root(), replay(fresh, &original, false).actions_root());
    }
}
