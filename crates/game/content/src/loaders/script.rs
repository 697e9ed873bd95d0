//! Action script loader.
//!
//! A script is a RON list of records tagged by a string `kind` (the camelCase
//! action name). Dice faces and search types are written as their labels,
//! e.g. `attack: ["skull", "white-shield"]`, `search: "secret-doors"`.

use std::path::Path;
use std::str::FromStr;

use quest_core::{
    Action, ActionError, ActionKind, ActorId, AttackAction, CastSpellAction, DieFace, DoorId,
    EndTurnAction, EquipmentId, MoveAction, OpenDoorAction, Position, SearchAction, SearchType,
    SpellId, TriggerQuestVisibilityAction, UseEquipmentAction,
};
use serde::Deserialize;
use tracing::debug;

use crate::error::ScenarioError;
use crate::loaders::{LoadResult, read_file, ron_options};

/// One scripted action as written in the file.
#[derive(Debug, Clone, Default, Deserialize)]
struct ActionRecord {
    kind: String,
    #[serde(default)]
    actor: Option<ActorId>,
    #[serde(default)]
    to: Option<Position>,
    #[serde(default)]
    target: Option<ActorId>,
    #[serde(default)]
    attack: Vec<String>,
    #[serde(default)]
    defense: Vec<String>,
    #[serde(default)]
    search: Option<String>,
    #[serde(default)]
    spell: Option<SpellId>,
    #[serde(default)]
    equipment: Option<EquipmentId>,
    #[serde(default)]
    door: Option<DoorId>,
    #[serde(default)]
    script: Option<String>,
}

fn required<T>(
    value: Option<T>,
    index: usize,
    kind: ActionKind,
    field: &'static str,
) -> Result<T, ScenarioError> {
    value.ok_or(ScenarioError::MissingField { index, kind, field })
}

fn label<T: FromStr>(value: &str, index: usize, field: &'static str) -> Result<T, ScenarioError> {
    value.parse().map_err(|_| ScenarioError::InvalidLabel {
        index,
        field,
        value: value.to_owned(),
    })
}

fn roll(faces: &[String], index: usize) -> Result<Vec<DieFace>, ScenarioError> {
    faces
        .iter()
        .map(|face| label(face, index, "die face"))
        .collect()
}

impl ActionRecord {
    fn into_action(self, index: usize) -> Result<Action, ScenarioError> {
        let kind = ActionKind::from_str(&self.kind).map_err(|_| ScenarioError::InvalidAction {
            index,
            source: ActionError::UnknownActionKind(self.kind.clone()),
        })?;

        let action = match kind {
            ActionKind::Move => MoveAction::new(
                required(self.actor, index, kind, "actor")?,
                required(self.to, index, kind, "to")?,
            )
            .into(),
            ActionKind::Attack => AttackAction::new(
                required(self.actor, index, kind, "actor")?,
                required(self.target, index, kind, "target")?,
                roll(&self.attack, index)?,
                roll(&self.defense, index)?,
            )
            .into(),
            ActionKind::Search => {
                let search = required(self.search, index, kind, "search")?;
                SearchAction::new(
                    required(self.actor, index, kind, "actor")?,
                    label::<SearchType>(&search, index, "search type")?,
                )
                .into()
            }
            ActionKind::CastSpell => CastSpellAction {
                caster_id: required(self.actor, index, kind, "actor")?,
                spell_id: required(self.spell, index, kind, "spell")?,
                target_id: self.target,
            }
            .into(),
            ActionKind::UseEquipment => UseEquipmentAction {
                actor_id: required(self.actor, index, kind, "actor")?,
                equipment_id: required(self.equipment, index, kind, "equipment")?,
                target_id: self.target,
            }
            .into(),
            ActionKind::OpenDoor => OpenDoorAction::new(
                required(self.actor, index, kind, "actor")?,
                required(self.door, index, kind, "door")?,
            )
            .into(),
            ActionKind::TriggerQuestVisibility => {
                let trigger = match (self.door, self.script) {
                    (Some(door), _) => TriggerQuestVisibilityAction::door(door),
                    (None, Some(script)) => TriggerQuestVisibilityAction::script(script),
                    (None, None) => {
                        return Err(ScenarioError::MissingField {
                            index,
                            kind,
                            field: "door or script",
                        });
                    }
                };
                let trigger = match self.actor {
                    Some(actor) => trigger.by(actor),
                    None => trigger,
                };
                trigger.into()
            }
            ActionKind::EndTurn => {
                EndTurnAction::new(required(self.actor, index, kind, "actor")?).into()
            }
        };
        Ok(action)
    }
}

/// Loader for action scripts from RON files.
pub struct ActionScriptLoader;

impl ActionScriptLoader {
    /// Load an action script, in order.
    pub fn load(path: &Path) -> LoadResult<Vec<Action>> {
        let content = read_file(path)?;
        let actions =
            Self::parse(&content).map_err(|e| anyhow::anyhow!("{}: {}", path.display(), e))?;
        debug!(path = %path.display(), actions = actions.len(), "action script loaded");
        Ok(actions)
    }

    pub fn parse(content: &str) -> LoadResult<Vec<Action>> {
        let records: Vec<ActionRecord> = ron_options()
            .from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse action script RON: {}", e))?;
        let actions = Self::convert(records)?;
        Ok(actions)
    }

    fn convert(records: Vec<ActionRecord>) -> Result<Vec<Action>, ScenarioError> {
        records
            .into_iter()
            .enumerate()
            .map(|(index, record)| record.into_action(index))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quest_core::GameError;

    fn record(kind: &str) -> ActionRecord {
        ActionRecord {
            kind: kind.to_owned(),
            actor: Some("hero".into()),
            ..ActionRecord::default()
        }
    }

    #[test]
    fn parses_every_kind_of_record() {
        let actions = ActionScriptLoader::parse(
            r#"[
                (kind: "move", actor: "hero", to: (x: 1, y: 0)),
                (kind: "attack", actor: "hero", target: "orc",
                 attack: ["skull", "white-shield"], defense: ["black-shield"]),
                (kind: "search", actor: "hero", search: "secret-doors"),
                (kind: "castSpell", actor: "hero", spell: "fire-bolt", target: "orc"),
                (kind: "useEquipment", actor: "hero", equipment: "potion"),
                (kind: "openDoor", actor: "hero", door: "d1"),
                (kind: "triggerQuestVisibility", script: "omen"),
                (kind: "endTurn", actor: "hero"),
            ]"#,
        )
        .expect("script parses");

        let kinds: Vec<ActionKind> = actions.iter().map(Action::kind).collect();
        assert_eq!(
            kinds,
            vec![
                ActionKind::Move,
                ActionKind::Attack,
                ActionKind::Search,
                ActionKind::CastSpell,
                ActionKind::UseEquipment,
                ActionKind::OpenDoor,
                ActionKind::TriggerQuestVisibility,
                ActionKind::EndTurn,
            ]
        );
        assert_eq!(
            actions[1],
            Action::from(AttackAction::new(
                "hero",
                "orc",
                vec![DieFace::Skull, DieFace::WhiteShield],
                vec![DieFace::BlackShield],
            ))
        );
        assert_eq!(
            actions[2],
            Action::from(SearchAction::new("hero", SearchType::SecretDoors))
        );
        assert_eq!(
            actions[6],
            Action::from(TriggerQuestVisibilityAction::script("omen"))
        );
        assert_eq!(actions[4].actor(), Some(&ActorId::from("hero")));
    }

    #[test]
    fn unknown_kind_is_an_unsupported_action() {
        let error = record("teleport").into_action(4).expect_err("unknown kind");
        assert_eq!(
            error,
            ScenarioError::InvalidAction {
                index: 4,
                source: ActionError::UnknownActionKind("teleport".into()),
            }
        );
        assert_eq!(error.error_code(), "ACTION_UNKNOWN_ACTION_KIND");
    }

    #[test]
    fn missing_fields_and_bad_labels_are_reported() {
        assert_eq!(
            record("move").into_action(0),
            Err(ScenarioError::MissingField {
                index: 0,
                kind: ActionKind::Move,
                field: "to",
            })
        );

        let mut attack = record("attack");
        attack.target = Some("orc".into());
        attack.attack = vec!["crit".into()];
        assert_eq!(
            attack.into_action(2),
            Err(ScenarioError::InvalidLabel {
                index: 2,
                field: "die face",
                value: "crit".into(),
            })
        );
    }
}
