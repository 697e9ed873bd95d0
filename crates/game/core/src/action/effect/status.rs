//! Stat and status effect implementations.
//!
//! A status commits its modifiers through [`ActorState::adjust_stat`] and
//! stores the deltas that actually landed in `applied`. Removal subtracts
//! exactly those deltas, so a clamped modifier is never over-reverted.

use std::collections::BTreeSet;

use tracing::trace;

use super::EffectContext;
use crate::action::error::ActionError;
use crate::event::GameEvent;
use crate::state::{
    ActorId, ActorState, GameState, StatKind, StatModifiers, StatusDuration, StatusEffect,
    StatusId,
};

/// Permanent stat adjustment.
pub(super) fn apply_buff(
    ctx: &mut EffectContext<'_>,
    stat: StatKind,
    amount: i32,
) -> Result<(), ActionError> {
    ctx.target_mut()?.adjust_stat(stat, amount);
    Ok(())
}

pub(super) fn apply_status(
    ctx: &mut EffectContext<'_>,
    effect: StatusEffect,
) -> Result<(), ActionError> {
    upsert_status(ctx.target_mut()?, effect);
    Ok(())
}

/// Builds the single-stat status behind a `StatusModifier` effect.
pub(super) fn modifier_status(
    stat: StatKind,
    amount: i32,
    duration: StatusDuration,
    id: Option<StatusId>,
    name: Option<String>,
    tags: &BTreeSet<String>,
) -> StatusEffect {
    let id = id.unwrap_or_else(|| StatusId::new(format!("modifier:{stat}")));
    let name = name.unwrap_or_else(|| format!("{stat} modifier"));
    let mut effect = StatusEffect::new(id, name, duration).with_modifier(stat, amount);
    effect.tags = tags.clone();
    effect
}

pub(super) fn cleanse(
    ctx: &mut EffectContext<'_>,
    status_ids: &BTreeSet<StatusId>,
    tags: &BTreeSet<String>,
    remove_all: bool,
) -> Result<(), ActionError> {
    let target = ctx.target_mut()?;
    let removed = target.status_effects.drain_matching(|effect| {
        remove_all || status_ids.contains(&effect.id) || effect.has_any_tag(tags)
    });
    for effect in &removed {
        revert_status(target, effect);
    }
    Ok(())
}

/// Adds or replaces a status on `actor`, committing its modifiers.
///
/// A status with the same id is reverted first and then replaced in place.
pub fn upsert_status(actor: &mut ActorState, mut effect: StatusEffect) {
    let previous = actor
        .status_effects
        .get(&effect.id)
        .map(|existing| existing.applied.clone());
    if let Some(applied) = previous {
        revert_modifiers(actor, &applied);
    }

    effect.applied = effect
        .modifiers
        .iter()
        .map(|(&stat, &delta)| (stat, actor.adjust_stat(stat, delta)))
        .collect();
    trace!(actor = %actor.id, status = %effect.id, applied = ?effect.applied, "status applied");
    actor.status_effects.insert(effect);
}

/// Undoes the stat contribution of a status that has left `actor`.
pub fn revert_status(actor: &mut ActorState, effect: &StatusEffect) {
    revert_modifiers(actor, &effect.applied);
}

fn revert_modifiers(actor: &mut ActorState, applied: &StatModifiers) {
    for (&stat, &delta) in applied {
        actor.adjust_stat(stat, -delta);
    }
}

/// Ages the statuses of `actor_id` by one turn, reverting and reporting the
/// ones that expire. Unknown actors are ignored.
pub fn tick_status_effects(state: &mut GameState, actor_id: &ActorId, events: &mut Vec<GameEvent>) {
    let Some(actor) = state.actor_mut(actor_id) else {
        return;
    };

    for effect in actor.status_effects.tick() {
        revert_status(actor, &effect);
        events.push(GameEvent::StatusExpired {
            actor_id: actor_id.clone(),
            status_id: effect.id,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::effect::apply_effects;
    use crate::config::GameConfig;
    use crate::state::{BoardState, Faction, GameSetup, Position, SpellEffect};

    fn actor() -> ActorState {
        ActorState::new("hero", "Hero", Faction::Hero, Position::ORIGIN)
            .with_attack(2, 1)
            .with_defense(2)
            .with_movement(4)
            .with_health(5)
    }

    #[test]
    fn replacing_a_status_reverts_the_old_contribution_first() {
        let mut actor = actor();
        upsert_status(
            &mut actor,
            StatusEffect::new("rage", "Rage", StatusDuration::Turns(2))
                .with_modifier(StatKind::AttackDice, 2),
        );
        assert_eq!(actor.attack_dice, 4);

        upsert_status(
            &mut actor,
            StatusEffect::new("rage", "Rage", StatusDuration::Turns(2))
                .with_modifier(StatKind::AttackDice, 1),
        );
        assert_eq!(actor.attack_dice, 3);
        assert_eq!(actor.status_effects.len(), 1);
    }

    #[test]
    fn clamped_modifier_reverts_only_what_landed() {
        let mut actor = actor();
        let effect = StatusEffect::new("curse", "Curse", StatusDuration::Turns(1))
            .with_modifier(StatKind::DefenseDice, -5);
        upsert_status(&mut actor, effect);
        assert_eq!(actor.defense_dice, 0);

        let stored = actor
            .status_effects
            .get(&"curse".into())
            .cloned()
            .unwrap_or_else(|| panic!("curse should be active"));
        assert_eq!(stored.applied.get(&StatKind::DefenseDice), Some(&-2));

        actor.status_effects.remove(&stored.id);
        revert_status(&mut actor, &stored);
        assert_eq!(actor.defense_dice, 2);
    }

    #[test]
    fn modifier_status_gets_stat_keyed_id() {
        let effect = modifier_status(
            StatKind::Movement,
            2,
            StatusDuration::Turns(1),
            None,
            None,
            &BTreeSet::new(),
        );
        assert_eq!(effect.id.as_str(), "modifier:movement");
        assert_eq!(effect.modifiers.get(&StatKind::Movement), Some(&2));
    }

    fn run(actor: ActorState, effects: &[SpellEffect]) -> ActorState {
        let mut state = GameState::from_setup(
            GameSetup::new(BoardState::new(3, 3), vec![actor]),
            &GameConfig::default(),
        );
        let hero = ActorId::from("hero");
        let mut events = Vec::new();
        let mut ctx = EffectContext::new(&hero, &hero, &mut state, &mut events);
        apply_effects(effects, &mut ctx).unwrap_or_else(|e| panic!("{e}"));
        assert!(events.is_empty());
        state
            .actor(&hero)
            .cloned()
            .unwrap_or_else(|| panic!("hero should exist"))
    }

    fn modifier(stat: StatKind, amount: i32, id: &str, tag: &str) -> SpellEffect {
        SpellEffect::StatusModifier {
            stat,
            amount,
            duration: StatusDuration::Turns(3),
            id: Some(id.into()),
            name: None,
            tags: BTreeSet::from([tag.to_owned()]),
        }
    }

    fn cleanse(ids: &[&str], tags: &[&str], remove_all: bool) -> SpellEffect {
        SpellEffect::Cleanse {
            status_ids: ids.iter().map(|&id| StatusId::from(id)).collect(),
            tags: tags.iter().map(|&tag| tag.to_owned()).collect(),
            remove_all,
        }
    }

    #[test]
    fn buffs_respect_stat_floors() {
        let hero = run(
            actor(),
            &[
                SpellEffect::Buff {
                    stat: StatKind::DefenseDice,
                    amount: -5,
                },
                SpellEffect::Buff {
                    stat: StatKind::AttackDice,
                    amount: 3,
                },
                SpellEffect::Buff {
                    stat: StatKind::MaxHealth,
                    amount: -10,
                },
            ],
        );
        assert_eq!(hero.defense_dice, 0);
        assert_eq!(hero.attack_dice, 5);
        assert_eq!(hero.max_health, 1);
        assert_eq!(hero.health, 1);
        assert!(hero.status_effects.is_empty());
    }

    #[test]
    fn shrinking_max_health_pulls_health_down() {
        let hero = run(
            actor(),
            &[SpellEffect::Buff {
                stat: StatKind::MaxHealth,
                amount: -2,
            }],
        );
        assert_eq!((hero.health, hero.max_health), (3, 3));
    }

    #[test]
    fn status_modifier_effect_defaults_its_id_and_name() {
        let hero = run(
            actor(),
            &[SpellEffect::StatusModifier {
                stat: StatKind::Movement,
                amount: 2,
                duration: StatusDuration::Turns(1),
                id: None,
                name: None,
                tags: BTreeSet::from(["haste".to_owned()]),
            }],
        );
        assert_eq!(hero.movement, 6);
        let status = hero
            .status_effects
            .get(&"modifier:movement".into())
            .unwrap_or_else(|| panic!("modifier status should be active"));
        assert_eq!(status.name, "movement modifier");
        assert!(status.tags.contains("haste"));
        assert_eq!(status.applied.get(&StatKind::Movement), Some(&2));
    }

    #[test]
    fn cleanse_by_id_reverts_only_that_status() {
        let hero = run(
            actor(),
            &[
                modifier(StatKind::AttackDice, 2, "rage", "buff"),
                modifier(StatKind::DefenseDice, -1, "weakness", "curse"),
                cleanse(&["weakness", "missing"], &[], false),
            ],
        );
        assert_eq!(hero.attack_dice, 4);
        assert_eq!(hero.defense_dice, 2);
        assert!(hero.status_effects.contains(&"rage".into()));
        assert_eq!(hero.status_effects.len(), 1);
    }

    #[test]
    fn cleanse_by_tag_reverts_every_match() {
        let hero = run(
            actor(),
            &[
                modifier(StatKind::AttackDice, 2, "rage", "buff"),
                modifier(StatKind::DefenseDice, -1, "weakness", "curse"),
                modifier(StatKind::Movement, -3, "slow", "curse"),
                cleanse(&[], &["curse"], false),
            ],
        );
        assert_eq!(hero.attack_dice, 4);
        assert_eq!(hero.defense_dice, 2);
        assert_eq!(hero.movement, 4);
        assert_eq!(hero.status_effects.len(), 1);
    }

    #[test]
    fn cleanse_all_restores_base_stats() {
        let hero = run(
            actor(),
            &[
                modifier(StatKind::AttackDice, 2, "rage", "buff"),
                modifier(StatKind::DefenseDice, -5, "weakness", "curse"),
                modifier(StatKind::MaxHealth, 3, "vigour", "buff"),
                cleanse(&[], &[], true),
            ],
        );
        assert_eq!(hero.attack_dice, 2);
        assert_eq!(hero.defense_dice, 2);
        assert_eq!(hero.max_health, 5);
        assert!(hero.status_effects.is_empty());
    }

    #[test]
    fn cleanse_with_no_match_is_a_no_op() {
        let hero = run(
            actor(),
            &[
                modifier(StatKind::AttackDice, 1, "rage", "buff"),
                cleanse(&["other"], &["curse"], false),
            ],
        );
        assert_eq!(hero.attack_dice, 3);
        assert_eq!(hero.status_effects.len(), 1);
    }
}
