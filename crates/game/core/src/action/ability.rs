//! Spell and equipment use.
//!
//! Both resolve a target through the card's targeting profile and then run
//! its effect list through [`apply_effects`]. The announcing event is pushed
//! before the events the effects cause.

use std::sync::Arc;

use tracing::debug;

use super::{
    AbilityRef, ActionError, ActionTransition, EffectContext, apply_effects, resolve_target,
};
use crate::event::GameEvent;
use crate::state::{ActorId, EquipmentDefinition, EquipmentId, GameState, SpellDefinition, SpellId};

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CastSpellAction {
    pub caster_id: ActorId,
    pub spell_id: SpellId,
    /// Omitted means the caster.
    #[cfg_attr(feature = "serde", serde(default))]
    pub target_id: Option<ActorId>,
}

impl CastSpellAction {
    pub fn new(caster_id: impl Into<ActorId>, spell_id: impl Into<SpellId>) -> Self {
        Self {
            caster_id: caster_id.into(),
            spell_id: spell_id.into(),
            target_id: None,
        }
    }

    pub fn targeting(mut self, target_id: impl Into<ActorId>) -> Self {
        self.target_id = Some(target_id.into());
        self
    }

    fn definition<'a>(&self, state: &'a GameState) -> Result<&'a SpellDefinition, ActionError> {
        state
            .cards
            .spell(&self.spell_id)
            .ok_or_else(|| ActionError::UnknownAbility(AbilityRef::Spell(self.spell_id.clone())))
    }
}

impl ActionTransition for CastSpellAction {
    fn actor(&self) -> Option<&ActorId> {
        Some(&self.caster_id)
    }

    fn pre_validate(&self, state: &GameState) -> Result<(), ActionError> {
        let spell = self.definition(state)?;
        let caster = state
            .actor(&self.caster_id)
            .ok_or_else(|| ActionError::ActorNotFound(self.caster_id.clone()))?;
        if !caster.knows_spell(&self.spell_id) {
            return Err(ActionError::AbilityNotPossessed(AbilityRef::Spell(
                self.spell_id.clone(),
            )));
        }
        resolve_target(state, &self.caster_id, self.target_id.as_ref(), &spell.target)?;
        Ok(())
    }

    fn apply(&self, state: &mut GameState, events: &mut Vec<GameEvent>) -> Result<(), ActionError> {
        let cards = Arc::clone(&state.cards);
        let spell = cards
            .spell(&self.spell_id)
            .ok_or_else(|| ActionError::UnknownAbility(AbilityRef::Spell(self.spell_id.clone())))?;
        let target =
            resolve_target(state, &self.caster_id, self.target_id.as_ref(), &spell.target)?;

        debug!(caster = %self.caster_id, spell = %self.spell_id, %target, "spell cast");
        events.push(GameEvent::SpellCast {
            caster_id: self.caster_id.clone(),
            spell_id: self.spell_id.clone(),
            target_id: Some(target.clone()),
            effects: spell.effects.clone(),
        });

        let mut ctx = EffectContext::new(&self.caster_id, &target, state, events);
        apply_effects(&spell.effects, &mut ctx)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UseEquipmentAction {
    pub actor_id: ActorId,
    pub equipment_id: EquipmentId,
    /// Omitted means the user.
    #[cfg_attr(feature = "serde", serde(default))]
    pub target_id: Option<ActorId>,
}

impl UseEquipmentAction {
    pub fn new(actor_id: impl Into<ActorId>, equipment_id: impl Into<EquipmentId>) -> Self {
        Self {
            actor_id: actor_id.into(),
            equipment_id: equipment_id.into(),
            target_id: None,
        }
    }

    pub fn targeting(mut self, target_id: impl Into<ActorId>) -> Self {
        self.target_id = Some(target_id.into());
        self
    }

    fn definition<'a>(
        &self,
        state: &'a GameState,
    ) -> Result<&'a EquipmentDefinition, ActionError> {
        state.cards.equipment(&self.equipment_id).ok_or_else(|| {
            ActionError::UnknownAbility(AbilityRef::Equipment(self.equipment_id.clone()))
        })
    }
}

impl ActionTransition for UseEquipmentAction {
    fn actor(&self) -> Option<&ActorId> {
        Some(&self.actor_id)
    }

    fn pre_validate(&self, state: &GameState) -> Result<(), ActionError> {
        let equipment = self.definition(state)?;
        let actor = state
            .actor(&self.actor_id)
            .ok_or_else(|| ActionError::ActorNotFound(self.actor_id.clone()))?;
        if !actor.carries(&self.equipment_id) {
            return Err(ActionError::AbilityNotPossessed(AbilityRef::Equipment(
                self.equipment_id.clone(),
            )));
        }
        resolve_target(state, &self.actor_id, self.target_id.as_ref(), &equipment.target)?;
        Ok(())
    }

    fn apply(&self, state: &mut GameState, events: &mut Vec<GameEvent>) -> Result<(), ActionError> {
        let cards = Arc::clone(&state.cards);
        let equipment = cards.equipment(&self.equipment_id).ok_or_else(|| {
            ActionError::UnknownAbility(AbilityRef::Equipment(self.equipment_id.clone()))
        })?;
        let target = resolve_target(
            state,
            &self.actor_id,
            self.target_id.as_ref(),
            &equipment.target,
        )?;

        let consumed = equipment.consumable;
        debug!(
            actor = %self.actor_id,
            equipment = %self.equipment_id,
            %target,
            consumed,
            "equipment used"
        );
        events.push(GameEvent::EquipmentUsed {
            actor_id: self.actor_id.clone(),
            equipment_id: self.equipment_id.clone(),
            target_id: Some(target.clone()),
            effects: equipment.effects.clone(),
            consumed,
        });

        let mut ctx = EffectContext::new(&self.actor_id, &target, state, events);
        apply_effects(&equipment.effects, &mut ctx)?;

        if consumed {
            let actor = state
                .actor_mut(&self.actor_id)
                .ok_or_else(|| ActionError::ActorNotFound(self.actor_id.clone()))?;
            actor.remove_equipment(&self.equipment_id);
        }
        Ok(())
    }
}
