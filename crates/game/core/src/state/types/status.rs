//! Status effect system for actors.
//!
//! Status effects are named, tagged, timed modifier sets. Each effect records
//! the net stat contribution it actually committed (`applied`), which can
//! differ from the declared `modifiers` when a stat floor clamps the change.
//! Reverting an effect subtracts exactly that contribution.
//!
//! # Turn-based Duration
//!
//! Durations count the holder's turns. The holder's effects tick once when
//! the holder ends its turn; an effect expires when its counter reaches zero.

use std::collections::{BTreeMap, BTreeSet};

use super::StatusId;

/// Actor stat that effects and equipment can adjust.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::IntoStaticStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
#[strum(serialize_all = "camelCase")]
pub enum StatKind {
    AttackDice,
    DefenseDice,
    Movement,
    MaxHealth,
}

/// Per-stat deltas.
pub type StatModifiers = BTreeMap<StatKind, i32>;

/// Remaining lifetime of a status effect.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StatusDuration {
    /// Expires after the holder ends this many more turns.
    Turns(u32),
    /// Never expires on its own; only a cleanse removes it.
    Permanent,
}

impl StatusDuration {
    /// Returns the duration after one of the holder's turns has ended.
    pub fn tick(self) -> Self {
        match self {
            Self::Turns(turns) => Self::Turns(turns.saturating_sub(1)),
            Self::Permanent => Self::Permanent,
        }
    }

    pub fn is_expired(self) -> bool {
        matches!(self, Self::Turns(0))
    }
}

/// A single status effect held by an actor.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusEffect {
    pub id: StatusId,
    pub name: String,
    pub duration: StatusDuration,
    #[cfg_attr(feature = "serde", serde(default))]
    pub modifiers: StatModifiers,
    #[cfg_attr(feature = "serde", serde(default))]
    pub tags: BTreeSet<String>,
    /// Net contribution committed to the holder's stats while active.
    #[cfg_attr(feature = "serde", serde(default))]
    pub applied: StatModifiers,
}

impl StatusEffect {
    pub fn new(id: impl Into<StatusId>, name: impl Into<String>, duration: StatusDuration) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            duration,
            modifiers: StatModifiers::new(),
            tags: BTreeSet::new(),
            applied: StatModifiers::new(),
        }
    }

    pub fn with_modifier(mut self, stat: StatKind, delta: i32) -> Self {
        self.modifiers.insert(stat, delta);
        self
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.insert(tag.into());
        self
    }

    pub fn has_any_tag<'a>(&self, tags: impl IntoIterator<Item = &'a String>) -> bool {
        tags.into_iter().any(|tag| self.tags.contains(tag))
    }
}

/// Active status effects on an actor, unique by id, in application order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct StatusEffects {
    effects: Vec<StatusEffect>,
}

impl StatusEffects {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn get(&self, id: &StatusId) -> Option<&StatusEffect> {
        self.effects.iter().find(|effect| &effect.id == id)
    }

    pub fn contains(&self, id: &StatusId) -> bool {
        self.get(id).is_some()
    }

    /// Inserts an effect, replacing any effect with the same id in place.
    ///
    /// Returns the replaced effect. Callers are responsible for reverting its
    /// contribution before inserting the successor.
    pub fn insert(&mut self, effect: StatusEffect) -> Option<StatusEffect> {
        match self.effects.iter_mut().find(|existing| existing.id == effect.id) {
            Some(slot) => Some(std::mem::replace(slot, effect)),
            None => {
                self.effects.push(effect);
                None
            }
        }
    }

    pub fn remove(&mut self, id: &StatusId) -> Option<StatusEffect> {
        let index = self.effects.iter().position(|effect| &effect.id == id)?;
        Some(self.effects.remove(index))
    }

    /// Removes and returns every effect matching `predicate`, preserving order.
    pub fn drain_matching(
        &mut self,
        mut predicate: impl FnMut(&StatusEffect) -> bool,
    ) -> Vec<StatusEffect> {
        let (removed, kept) = std::mem::take(&mut self.effects)
            .into_iter()
            .partition(|effect| predicate(effect));
        self.effects = kept;
        removed
    }

    /// Advances every duration by one turn and removes the expired effects.
    pub fn tick(&mut self) -> Vec<StatusEffect> {
        for effect in &mut self.effects {
            effect.duration = effect.duration.tick();
        }
        self.drain_matching(|effect| effect.duration.is_expired())
    }

    pub fn iter(&self) -> impl Iterator<Item = &StatusEffect> {
        self.effects.iter()
    }

    pub fn len(&self) -> usize {
        self.effects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn timed(id: &str, turns: u32) -> StatusEffect {
        StatusEffect::new(id, id, StatusDuration::Turns(turns))
    }

    #[test]
    fn insert_replaces_same_id_in_place() {
        let mut effects = StatusEffects::empty();
        effects.insert(timed("bless", 2));
        effects.insert(timed("curse", 1));

        let previous = effects.insert(timed("bless", 5));

        assert_eq!(previous.map(|e| e.duration), Some(StatusDuration::Turns(2)));
        assert_eq!(effects.len(), 2);
        let ids: Vec<_> = effects.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, ["bless", "curse"]);
    }

    #[test]
    fn tick_expires_effects_reaching_zero() {
        let mut effects = StatusEffects::empty();
        effects.insert(timed("short", 1));
        effects.insert(timed("long", 3));
        effects.insert(StatusEffect::new("aura", "Aura", StatusDuration::Permanent));

        let expired = effects.tick();

        assert_eq!(expired.len(), 1);
        assert_eq!(expired[0].id.as_str(), "short");
        assert_eq!(
            effects.get(&StatusId::from("long")).map(|e| e.duration),
            Some(StatusDuration::Turns(2))
        );
        assert!(effects.contains(&StatusId::from("aura")));
    }

    #[test]
    fn stat_labels_are_camel_case() {
        assert_eq!(StatKind::AttackDice.as_ref(), "attackDice");
        assert_eq!("maxHealth".parse::<StatKind>().ok(), Some(StatKind::MaxHealth));
    }
}
