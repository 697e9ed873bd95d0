use std::borrow::Borrow;
use std::fmt;

/// Declares a string-backed identifier newtype.
///
/// Identifiers are authored in scenario data as plain strings (`"hero-1"`), so
/// they stay strings at runtime but cannot be mixed up across domains.
macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        #[cfg_attr(feature = "serde", serde(transparent))]
        pub struct $name(pub String);

        impl $name {
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_owned())
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }

        impl Borrow<str> for $name {
            fn borrow(&self) -> &str {
                &self.0
            }
        }
    };
}

string_id!(
    /// Unique identifier of an actor (hero or monster).
    ActorId
);
string_id!(
    /// Identifier of a searchable board area.
    AreaId
);
string_id!(
    /// Identifier of a door placed on the board.
    DoorId
);
string_id!(
    /// Identifier of a hidden discoverable (trap, secret door, treasure).
    DiscoverableId
);
string_id!(
    /// Key into the spell table of the card catalog.
    SpellId
);
string_id!(
    /// Key into the equipment table of the card catalog.
    EquipmentId
);
string_id!(
    /// One-shot visibility/quest trigger identifier.
    TriggerId
);
string_id!(
    /// Identifier of a status effect; unique per actor.
    StatusId
);
string_id!(
    /// Identifier of a quest objective.
    ObjectiveId
);
string_id!(
    /// Identifier of a piece of quest furniture.
    FurnitureId
);

/// Discrete grid position expressed in tile coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const ORIGIN: Self = Self { x: 0, y: 0 };

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns this position translated by `delta`, or `None` when either
    /// coordinate would leave the `i32` range.
    pub const fn offset(self, delta: Position) -> Option<Self> {
        match (self.x.checked_add(delta.x), self.y.checked_add(delta.y)) {
            (Some(x), Some(y)) => Some(Self::new(x, y)),
            _ => None,
        }
    }

    /// Orthogonal neighbours in east, west, south, north order. Neighbours
    /// that fall outside the `i32` range are skipped.
    pub fn neighbors(self) -> impl Iterator<Item = Position> {
        [(1, 0), (-1, 0), (0, 1), (0, -1)]
            .into_iter()
            .filter_map(move |(dx, dy)| self.offset(Self::new(dx, dy)))
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::ORIGIN
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Side an actor fights for.
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
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
pub enum Faction {
    Hero,
    Monster,
}

impl Faction {
    /// Returns true when the two factions fight each other.
    pub fn opposes(self, other: Faction) -> bool {
        self != other
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offset_reports_overflow() {
        let edge = Position::new(i32::MAX, 3);
        assert_eq!(edge.offset(Position::new(-1, 1)), Some(Position::new(i32::MAX - 1, 4)));
        assert_eq!(edge.offset(Position::new(1, 0)), None);
        assert_eq!(Position::new(0, i32::MIN).offset(Position::new(0, -1)), None);
    }

    #[test]
    fn neighbors_skip_tiles_past_the_edge() {
        let inner: Vec<Position> = Position::new(2, 2).neighbors().collect();
        assert_eq!(
            inner,
            vec![
                Position::new(3, 2),
                Position::new(1, 2),
                Position::new(2, 3),
                Position::new(2, 1),
            ]
        );

        let corner: Vec<Position> = Position::new(i32::MAX, i32::MIN).neighbors().collect();
        assert_eq!(
            corner,
            vec![Position::new(i32::MAX - 1, i32::MIN), Position::new(i32::MAX, i32::MIN + 1)]
        );
    }
}
