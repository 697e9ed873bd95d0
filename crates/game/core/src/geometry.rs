//! Board geometry queries.
//!
//! Pure helpers over [`BoardState`] and [`GameState`]; nothing here mutates.

use crate::state::{ActorId, ActorState, AreaId, BoardState, GameState, Position, SearchArea};

pub fn is_within_bounds(board: &BoardState, position: Position) -> bool {
    position.x >= 0
        && position.y >= 0
        && i64::from(position.x) < i64::from(board.width)
        && i64::from(position.y) < i64::from(board.height)
}

/// True for walls and closed doors.
pub fn is_blocked(board: &BoardState, position: Position) -> bool {
    board
        .doors
        .iter()
        .any(|door| !door.open && door.position == position)
        || board.blocked.contains(&position)
}

/// True when any actor stands on `position`, defeated actors included.
pub fn is_occupied(state: &GameState, position: Position) -> bool {
    state.actors.values().any(|actor| actor.position == position)
}

/// The living actor standing on `position`, if any.
pub fn living_occupant(state: &GameState, position: Position) -> Option<&ActorState> {
    state
        .actors
        .values()
        .find(|actor| actor.is_alive() && actor.position == position)
}

pub fn manhattan_distance(a: Position, b: Position) -> u32 {
    a.x.abs_diff(b.x) + a.y.abs_diff(b.y)
}

/// Bresenham line of sight between two in-bounds tiles.
///
/// Only the tiles strictly between the endpoints are tested, so an actor
/// standing in a doorway can still see and be seen.
pub fn has_line_of_sight(board: &BoardState, from: Position, to: Position) -> bool {
    if !is_within_bounds(board, from) || !is_within_bounds(board, to) {
        return false;
    }

    BresenhamLine::new(from, to)
        .take_while(|step| *step != to)
        .all(|step| !is_blocked(board, step))
}

/// Tiles visited walking from `from` towards `to`, excluding `from` and
/// including `to`.
struct BresenhamLine {
    current: Position,
    target: Position,
    dx: i32,
    dy: i32,
    sx: i32,
    sy: i32,
    err: i32,
}

impl BresenhamLine {
    fn new(from: Position, to: Position) -> Self {
        let dx = (to.x - from.x).abs();
        let dy = (to.y - from.y).abs();
        Self {
            current: from,
            target: to,
            dx,
            dy,
            sx: if from.x < to.x { 1 } else { -1 },
            sy: if from.y < to.y { 1 } else { -1 },
            err: dx - dy,
        }
    }
}

impl Iterator for BresenhamLine {
    type Item = Position;

    fn next(&mut self) -> Option<Position> {
        if self.current == self.target {
            return None;
        }
        let e2 = 2 * self.err;
        if e2 > -self.dy {
            self.err -= self.dy;
            self.current.x += self.sx;
        }
        if e2 < self.dx {
            self.err += self.dx;
            self.current.y += self.sy;
        }
        Some(self.current)
    }
}

/// First area (in board order) whose tiles include `position`.
pub fn find_area_containing(board: &BoardState, position: Position) -> Option<&SearchArea> {
    board.areas.iter().find(|area| area.contains(position))
}

/// Ids of every actor standing inside the area, defeated actors included.
/// Unknown areas contain nobody.
pub fn actor_ids_in_area(state: &GameState, area_id: &AreaId) -> Vec<ActorId> {
    let Some(area) = state.board.area(area_id) else {
        return Vec::new();
    };
    state
        .actors
        .values()
        .filter(|actor| area.contains(actor.position))
        .map(|actor| actor.id.clone())
        .collect()
}

/// Tiles of the listed areas in listing order. Unknown ids are skipped.
pub fn tiles_for_areas<'a>(
    board: &'a BoardState,
    area_ids: &'a [AreaId],
) -> impl Iterator<Item = Position> + 'a {
    area_ids
        .iter()
        .filter_map(|id| board.area(id))
        .flat_map(|area| area.tiles.iter().copied())
}
