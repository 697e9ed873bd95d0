//! Room searches.
//!
//! A search covers the whole area the actor stands in. Each (area, search
//! type) pair, or (area, hero, search type) under per-hero history, can be
//! searched once.

use tracing::debug;

use super::{ActionError, ActionTransition};
use crate::event::{GameEvent, SearchDiscovery};
use crate::geometry::{actor_ids_in_area, find_area_containing};
use crate::state::{
    ActorId, AreaId, Faction, GameState, RevealSource, SearchArea, SearchHistoryMode, SearchState,
    SearchType,
};
use crate::visibility::{owner_key_for_actor, reveal_for_owner};

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchAction {
    pub actor_id: ActorId,
    pub search_type: SearchType,
}

impl SearchAction {
    pub fn new(actor_id: impl Into<ActorId>, search_type: SearchType) -> Self {
        Self {
            actor_id: actor_id.into(),
            search_type,
        }
    }
}

/// Whether `actor_id` (or anyone, under per-area history) already searched
/// `area_id` for `search_type`.
pub fn has_search_occurred(
    search: &SearchState,
    area_id: &AreaId,
    actor_id: &ActorId,
    search_type: SearchType,
) -> bool {
    let kinds = match search.rules.history_mode {
        SearchHistoryMode::PerArea => search.history.per_area.get(area_id),
        SearchHistoryMode::PerHero => search
            .history
            .per_hero
            .get(actor_id)
            .and_then(|areas| areas.get(area_id)),
    };
    kinds.is_some_and(|kinds| kinds.has(search_type))
}

fn record_search(
    search: &mut SearchState,
    area_id: &AreaId,
    actor_id: &ActorId,
    search_type: SearchType,
) {
    let kinds = match search.rules.history_mode {
        SearchHistoryMode::PerArea => search.history.per_area.entry(area_id.clone()).or_default(),
        SearchHistoryMode::PerHero => search
            .history
            .per_hero
            .entry(actor_id.clone())
            .or_default()
            .entry(area_id.clone())
            .or_default(),
    };
    kinds.insert(search_type.flag());
}

/// Whether a living actor of a faction other than `faction` stands in the
/// area.
pub fn has_opposing_faction_in_area(state: &GameState, area_id: &AreaId, faction: Faction) -> bool {
    actor_ids_in_area(state, area_id)
        .iter()
        .filter_map(|id| state.actor(id))
        .any(|actor| actor.faction != faction && actor.is_alive())
}

impl SearchAction {
    fn area<'a>(&self, state: &'a GameState) -> Result<&'a SearchArea, ActionError> {
        let actor = state
            .actor(&self.actor_id)
            .ok_or_else(|| ActionError::ActorNotFound(self.actor_id.clone()))?;
        find_area_containing(&state.board, actor.position).ok_or(ActionError::AreaNotSearchable)
    }
}

impl ActionTransition for SearchAction {
    fn actor(&self) -> Option<&ActorId> {
        Some(&self.actor_id)
    }

    fn pre_validate(&self, state: &GameState) -> Result<(), ActionError> {
        let actor = state
            .actor(&self.actor_id)
            .ok_or_else(|| ActionError::ActorNotFound(self.actor_id.clone()))?;
        let rules = &state.search.rules;

        if rules.require_heroes_only && actor.faction != Faction::Hero {
            return Err(ActionError::SearchRestrictedToHeroes);
        }

        let area = self.area(state)?;
        if !area.allows(self.search_type) {
            return Err(ActionError::SearchTypeNotAllowed {
                area: area.id.clone(),
                search_type: self.search_type,
            });
        }

        if rules.require_no_enemies && has_opposing_faction_in_area(state, &area.id, actor.faction)
        {
            return Err(ActionError::EnemiesPresent(area.id.clone()));
        }

        if has_search_occurred(&state.search, &area.id, &self.actor_id, self.search_type) {
            return Err(ActionError::AlreadySearched {
                area: area.id.clone(),
                search_type: self.search_type,
            });
        }

        Ok(())
    }

    fn apply(&self, state: &mut GameState, events: &mut Vec<GameEvent>) -> Result<(), ActionError> {
        let area = self.area(state)?.clone();

        let mut discoveries = Vec::new();
        for discoverable in state.discoverables.values_mut() {
            if discoverable.revealed
                || discoverable.area_id != area.id
                || discoverable.kind.revealed_by() != self.search_type
            {
                continue;
            }
            discoverable.revealed = true;
            discoveries.push(SearchDiscovery {
                id: discoverable.id.clone(),
                kind: discoverable.kind,
                position: discoverable.position,
            });
        }

        record_search(&mut state.search, &area.id, &self.actor_id, self.search_type);

        debug!(
            actor = %self.actor_id,
            area = %area.id,
            search_type = %self.search_type,
            found = discoveries.len(),
            "search performed"
        );
        events.push(GameEvent::SearchPerformed {
            actor_id: self.actor_id.clone(),
            area_id: area.id.clone(),
            search_type: self.search_type,
            discoveries,
        });

        if let Some(owner) = owner_key_for_actor(state, &self.actor_id) {
            reveal_for_owner(state, owner, &area.tiles, RevealSource::Search, None, events);
        }
        Ok(())
    }
}
