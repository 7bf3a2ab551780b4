use std::fmt;

use crate::tile::Tile;

/// The direction a tile slides into the empty cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Generation order for actions and children.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Offset from the empty cell to the tile that would slide in this direction.
    pub fn as_offset(&self) -> (isize, isize) {
        match self {
            Direction::Up => (1, 0),
            Direction::Down => (-1, 0),
            Direction::Left => (0, 1),
            Direction::Right => (0, -1),
        }
    }

    pub fn opposite(&self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match *self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        };
        write!(f, "{}", s)
    }
}

/// A candidate move: `tile` slides `direction` into the empty cell.
///
/// Infeasible actions are placeholders for neighbours outside the board and
/// carry [`Tile::Empty`]. Feasibility is checked again when the action is
/// applied, see [`State::result`](crate::state::State::result).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Action {
    tile: Tile,
    direction: Direction,
    feasible: bool,
}

impl Action {
    pub fn new(tile: Tile, direction: Direction, feasible: bool) -> Self {
        Self {
            tile,
            direction,
            feasible,
        }
    }

    pub fn tile(&self) -> Tile {
        self.tile
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn is_feasible(&self) -> bool {
        self.feasible
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Move {} {}", self.tile, self.direction)
    }
}
