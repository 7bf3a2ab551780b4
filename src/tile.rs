use std::fmt;

/// One grid cell: a numbered tile or the blank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tile {
    Empty,
    Number(u32),
}

impl Tile {
    pub fn number(&self) -> Option<u32> {
        match *self {
            Tile::Number(n) => Some(n),
            Tile::Empty => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Tile::Empty)
    }
}

impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Tile::Number(n) => write!(f, "{}", n),
            Tile::Empty => write!(f, "_"),
        }
    }
}
