//! Deterministic digests for replay and determinism checks.
//!
//! Both digests are SHA-256 over the `bincode` encoding. Every collection in
//! the state is ordered, so equal states always produce equal roots.

#[cfg(feature = "serde")]
use sha2::{Digest, Sha256};
#[cfg(feature = "serde")]
use tracing::warn;

#[cfg(feature = "serde")]
use super::GameState;
#[cfg(feature = "serde")]
use crate::action::Action;

#[cfg(feature = "serde")]
impl GameState {
    /// Commitment to the full snapshot.
    pub fn state_root(&self) -> [u8; 32] {
        let mut hasher = Sha256::new();
        absorb(&mut hasher, self, "state");
        hasher.finalize().into()
    }
}

/// Commitment to an ordered action script. Order matters.
#[cfg(feature = "serde")]
pub fn compute_actions_root(actions: &[Action]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    for action in actions {
        absorb(&mut hasher, action, "action");
    }
    hasher.finalize().into()
}

/// Feeds the encoding of `value` into `hasher`. A value that fails to encode
/// contributes nothing and is logged. Returns whether anything was added.
#[cfg(feature = "serde")]
fn absorb<T>(hasher: &mut Sha256, value: &T, what: &'static str) -> bool
where
    T: serde::Serialize + ?Sized,
{
    match bincode::serialize(value) {
        Ok(bytes) => {
            hasher.update(&bytes);
            true
        }
        Err(error) => {
            warn!(%error, what, "failed to encode value for root; digest is incomplete");
            false
        }
    }
}

#[cfg(all(test, feature = "serde"))]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::state::{ActorState, BoardState, Faction, GameSetup, Position};

    fn state() -> GameState {
        GameState::from_setup(
            GameSetup::new(
                BoardState::new(4, 4),
                vec![ActorState::new("hero", "Hero", Faction::Hero, Position::ORIGIN)],
            ),
            &GameConfig::default(),
        )
    }

    #[test]
    fn equal_states_share_a_root() {
        assert_eq!(state().state_root(), state().state_root());
    }

    #[test]
    fn root_changes_with_state() {
        let before = state();
        let mut after = before.clone();
        if let Some(actor) = after.actor_mut(&"hero".into()) {
            actor.position = Position::new(1, 0);
        }
        assert_ne!(before.state_root(), after.state_root());
    }

    struct Unencodable;

    impl serde::Serialize for Unencodable {
        fn serialize<S: serde::Serializer>(&self, _: S) -> Result<S::Ok, S::Error> {
            Err(serde::ser::Error::custom("refused"))
        }
    }

    #[test]
    fn encode_failure_adds_nothing_to_the_digest() {
        let mut hasher = Sha256::new();
        assert!(!absorb(&mut hasher, &Unencodable, "test"));
        let digest: [u8; 32] = hasher.finalize().into();
        assert_eq!(digest, compute_actions_root(&[]));
    }
}
