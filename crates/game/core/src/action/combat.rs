//! Dice combat.
//!
//! Dice are rolled by the caller. Skulls on the attack roll are hits; white
//! and black shields on the defense roll each cancel one hit.

use tracing::debug;

use super::{ActionError, ActionTransition, DieFace, RollSide};
use crate::event::GameEvent;
use crate::geometry::{has_line_of_sight, manhattan_distance};
use crate::state::{ActorId, GameState};

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AttackAction {
    pub attacker_id: ActorId,
    pub target_id: ActorId,
    pub attack_roll: Vec<DieFace>,
    pub defense_roll: Vec<DieFace>,
}

impl AttackAction {
    pub fn new(
        attacker_id: impl Into<ActorId>,
        target_id: impl Into<ActorId>,
        attack_roll: Vec<DieFace>,
        defense_roll: Vec<DieFace>,
    ) -> Self {
        Self {
            attacker_id: attacker_id.into(),
            target_id: target_id.into(),
            attack_roll,
            defense_roll,
        }
    }
}

/// Result of scoring one exchange of dice.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AttackOutcome {
    pub attack_successes: u32,
    pub defense_successes: u32,
    pub damage: u32,
    /// Damage landed and every attack die came up skull.
    pub critical: bool,
}

/// Scores an attack. `attack_dice` is the attacker's dice count, which a
/// critical hit must match with skulls.
pub fn resolve_attack(
    attack_dice: u32,
    attack_roll: &[DieFace],
    defense_roll: &[DieFace],
) -> AttackOutcome {
    let attack_successes = count(attack_roll, DieFace::is_skull);
    let defense_successes = count(defense_roll, DieFace::is_shield);
    let damage = attack_successes.saturating_sub(defense_successes);

    AttackOutcome {
        attack_successes,
        defense_successes,
        damage,
        critical: damage > 0 && attack_successes == attack_dice,
    }
}

fn count(roll: &[DieFace], predicate: fn(DieFace) -> bool) -> u32 {
    let hits = roll.iter().copied().filter(|face| predicate(*face)).count();
    u32::try_from(hits).unwrap_or(u32::MAX)
}

fn roll_len(roll: &[DieFace]) -> u32 {
    u32::try_from(roll.len()).unwrap_or(u32::MAX)
}

impl ActionTransition for AttackAction {
    fn actor(&self) -> Option<&ActorId> {
        Some(&self.attacker_id)
    }

    fn pre_validate(&self, state: &GameState) -> Result<(), ActionError> {
        let attacker = state
            .actor(&self.attacker_id)
            .ok_or_else(|| ActionError::ActorNotFound(self.attacker_id.clone()))?;
        let target = state
            .actor(&self.target_id)
            .ok_or_else(|| ActionError::TargetNotFound(self.target_id.clone()))?;
        if !target.is_alive() {
            return Err(ActionError::TargetAlreadyDefeated(self.target_id.clone()));
        }

        let distance = manhattan_distance(attacker.position, target.position);
        let range = attacker.attack_range.max(1);
        if range == 1 {
            if distance != 1 {
                return Err(ActionError::TargetNotAdjacent { distance });
            }
        } else if distance == 0 || distance > range {
            return Err(ActionError::OutOfRange { distance, range });
        }
        if distance > 1 && !has_line_of_sight(&state.board, attacker.position, target.position) {
            return Err(ActionError::NoLineOfSight);
        }

        let actual = roll_len(&self.attack_roll);
        if actual != attacker.attack_dice {
            return Err(ActionError::DiceCountMismatch {
                side: RollSide::Attack,
                expected: attacker.attack_dice,
                actual,
            });
        }
        let actual = roll_len(&self.defense_roll);
        if actual != target.defense_dice {
            return Err(ActionError::DiceCountMismatch {
                side: RollSide::Defense,
                expected: target.defense_dice,
                actual,
            });
        }

        Ok(())
    }

    fn apply(&self, state: &mut GameState, events: &mut Vec<GameEvent>) -> Result<(), ActionError> {
        let attack_dice = state
            .actor(&self.attacker_id)
            .map(|attacker| attacker.attack_dice)
            .ok_or_else(|| ActionError::ActorNotFound(self.attacker_id.clone()))?;
        let outcome = resolve_attack(attack_dice, &self.attack_roll, &self.defense_roll);

        let target = state
            .actor_mut(&self.target_id)
            .ok_or_else(|| ActionError::TargetNotFound(self.target_id.clone()))?;
        let defeated_now = target.take_damage(outcome.damage);
        let target_health = target.health;
        let faction = target.faction;

        debug!(
            attacker = %self.attacker_id,
            target = %self.target_id,
            damage = outcome.damage,
            critical = outcome.critical,
            target_health,
            "attack resolved"
        );
        events.push(GameEvent::AttackResolved {
            attacker_id: self.attacker_id.clone(),
            target_id: self.target_id.clone(),
            attack_roll: self.attack_roll.clone(),
            defense_roll: self.defense_roll.clone(),
            attack_successes: outcome.attack_successes,
            defense_successes: outcome.defense_successes,
            damage: outcome.damage,
            critical: outcome.critical,
            target_health,
            target_defeated: target_health == 0,
        });
        if defeated_now {
            events.push(GameEvent::ActorDefeated {
                actor_id: self.target_id.clone(),
                faction,
            });
        }
        Ok(())
    }
}
