use std::collections::BTreeMap;

use super::ActorId;

/// Turn bookkeeping: who acts, and how much movement each actor has left.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TurnState {
    /// Fixed acting order. Spawned actors are appended, never inserted.
    pub order: Vec<ActorId>,
    pub current_index: usize,
    pub movement_remaining: BTreeMap<ActorId, u32>,
}

impl TurnState {
    pub fn new(order: Vec<ActorId>) -> Self {
        Self {
            order,
            current_index: 0,
            movement_remaining: BTreeMap::new(),
        }
    }

    pub fn current_actor(&self) -> Option<&ActorId> {
        self.order.get(self.current_index)
    }

    pub fn movement_remaining(&self, actor: &ActorId) -> u32 {
        self.movement_remaining.get(actor).copied().unwrap_or(0)
    }

    /// Indices after the current one, wrapping, ending with the current index.
    pub fn scan_from_next(&self) -> impl Iterator<Item = usize> + '_ {
        let len = self.order.len();
        (1..=len).map(move |step| (self.current_index + step) % len)
    }
}
