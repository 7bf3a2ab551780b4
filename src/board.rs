use rand::seq::SliceRandom;
use rand::Rng;
use std::fmt;
use std::str::FromStr;

use crate::action::Direction;
use crate::error::{PuzzleError, Result};
use crate::tile::Tile;

/// Token that marks the empty cell in a layout unless configured otherwise.
pub const DEFAULT_EMPTY_MARKER: &str = "_";

/// Immutable snapshot of the grid.
///
/// Every board holds exactly one empty cell and each number in
/// `1..rows * cols` exactly once. Cloning copies the whole grid, so boards
/// handed to different search branches never share storage.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    rows: usize,
    cols: usize,
    grid: Vec<Vec<Tile>>,
    empty: (usize, usize),
}

impl Board {
    /// Parses a layout such as `1 2 3|4 5 6|7 _ 8` using the default marker.
    pub fn parse(layout: &str) -> Result<Self> {
        Self::parse_with_marker(layout, DEFAULT_EMPTY_MARKER)
    }

    /// Parses a layout where `marker` denotes the empty cell.
    ///
    /// Rows are separated by `|` and tiles within a row by whitespace.
    pub fn parse_with_marker(layout: &str, marker: &str) -> Result<Self> {
        let trimmed = layout.trim();
        if trimmed.is_empty() {
            return Err(PuzzleError::EmptyLayout);
        }

        let mut grid: Vec<Vec<Tile>> = Vec::new();
        let mut empties = Vec::new();

        for (r, row) in trimmed.split('|').enumerate() {
            let tokens: Vec<&str> = row.split_whitespace().collect();
            if tokens.is_empty() {
                return Err(PuzzleError::EmptyRow {
                    row: r,
                    layout: layout.to_string(),
                });
            }
            if let Some(first) = grid.first() {
                if tokens.len() != first.len() {
                    return Err(PuzzleError::RaggedRow {
                        row: r,
                        expected: first.len(),
                        got: tokens.len(),
                        layout: layout.to_string(),
                    });
                }
            }

            let mut cells = Vec::with_capacity(tokens.len());
            for (c, token) in tokens.iter().enumerate() {
                if *token == marker {
                    empties.push((r, c));
                    cells.push(Tile::Empty);
                    continue;
                }
                let value = token
                    .parse::<u32>()
                    .map_err(|_| PuzzleError::InvalidToken {
                        token: token.to_string(),
                        row: r,
                        col: c,
                    })?;
                cells.push(Tile::Number(value));
            }
            grid.push(cells);
        }

        let empty = match empties.as_slice() {
            [only] => *only,
            [] => {
                return Err(PuzzleError::MissingEmpty {
                    layout: layout.to_string(),
                    marker: marker.to_string(),
                })
            }
            many => {
                return Err(PuzzleError::MultipleEmpty {
                    layout: layout.to_string(),
                    marker: marker.to_string(),
                    count: many.len(),
                })
            }
        };

        Self::from_grid(grid, empty)
    }

    /// Checks the numbering invariant and builds the board.
    fn from_grid(grid: Vec<Vec<Tile>>, empty: (usize, usize)) -> Result<Self> {
        let rows = grid.len();
        let cols = grid[0].len();
        let max = (rows * cols - 1) as u32;
        let mut seen = vec![false; rows * cols];

        for value in grid.iter().flatten().filter_map(Tile::number) {
            if value == 0 || value > max {
                return Err(PuzzleError::TileOutOfRange { value, max });
            }
            if std::mem::replace(&mut seen[value as usize], true) {
                return Err(PuzzleError::DuplicateTile { value });
            }
        }

        Ok(Self {
            rows,
            cols,
            grid,
            empty,
        })
    }

    /// The solved layout: `1..rows * cols` in row-major order, blank last.
    pub fn goal(rows: usize, cols: usize) -> Result<Self> {
        if rows == 0 || cols == 0 {
            return Err(PuzzleError::EmptyLayout);
        }

        let mut grid = Vec::with_capacity(rows);
        let mut value = 1;
        for i in 0..rows {
            let mut row = Vec::with_capacity(cols);
            for j in 0..cols {
                if i == rows - 1 && j == cols - 1 {
                    row.push(Tile::Empty);
                } else {
                    row.push(Tile::Number(value));
                    value += 1;
                }
            }
            grid.push(row);
        }

        Ok(Self {
            rows,
            cols,
            grid,
            empty: (rows - 1, cols - 1),
        })
    }

    /// Walks `moves` random legal slides away from the goal.
    ///
    /// A slide never undoes the one before it. The result is reachable from
    /// the goal by construction, whatever the board's shape.
    pub fn scrambled<R: Rng + ?Sized>(
        rows: usize,
        cols: usize,
        moves: usize,
        rng: &mut R,
    ) -> Result<Self> {
        let mut board = Self::goal(rows, cols)?;
        let mut last: Option<Direction> = None;

        for _ in 0..moves {
            let candidates: Vec<Direction> = Direction::ALL
                .into_iter()
                .filter(|dir| last != Some(dir.opposite()))
                .filter(|dir| board.neighbour(*dir).is_some())
                .collect();

            let Some(&dir) = candidates.choose(rng) else {
                break;
            };
            if let Some(next) = board.slide(dir) {
                board = next;
                last = Some(dir);
            }
        }

        Ok(board)
    }

    /// Layout text using `marker` for the empty cell.
    pub fn layout<'a>(&'a self, marker: &'a str) -> Layout<'a> {
        Layout {
            board: self,
            marker,
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Row and column of the empty cell.
    pub fn empty(&self) -> (usize, usize) {
        self.empty
    }

    pub fn tile(&self, row: usize, col: usize) -> Option<Tile> {
        self.grid.get(row).and_then(|r| r.get(col)).copied()
    }

    pub fn grid(&self) -> &[Vec<Tile>] {
        &self.grid
    }

    /// Numbered tiles in row-major order, skipping the blank.
    pub fn numbers(&self) -> impl Iterator<Item = u32> + '_ {
        self.grid.iter().flatten().filter_map(Tile::number)
    }

    /// Position of the tile that would slide into the empty cell along `direction`.
    pub fn neighbour(&self, direction: Direction) -> Option<(usize, usize)> {
        let (dr, dc) = direction.as_offset();
        let row = self.empty.0 as isize + dr;
        let col = self.empty.1 as isize + dc;

        if row >= 0 && row < self.rows as isize && col >= 0 && col < self.cols as isize {
            Some((row as usize, col as usize))
        } else {
            None
        }
    }

    /// Copy of this board with the neighbour along `direction` slid into the blank.
    pub fn slide(&self, direction: Direction) -> Option<Self> {
        let (row, col) = self.neighbour(direction)?;
        let (er, ec) = self.empty;

        let mut next = self.clone();
        next.grid[er][ec] = next.grid[row][col];
        next.grid[row][col] = Tile::Empty;
        next.empty = (row, col);
        Some(next)
    }

    /// Number of pairs of numbered tiles out of order in row-major reading.
    pub fn inversions(&self) -> usize {
        let flattened: Vec<u32> = self.numbers().collect();
        flattened
            .iter()
            .enumerate()
            .map(|(i, &val)| flattened[i + 1..].iter().filter(|&&next| next < val).count())
            .sum()
    }

    /// Even-inversion solvability test against the row-major goal.
    ///
    /// This is the classical rule for boards with an odd number of columns.
    /// With an even number of columns every vertical slide flips the
    /// inversion parity, so the rule is not a proof of reachability there;
    /// see [`Board::solvable_by_width`].
    pub fn solvable(&self) -> bool {
        self.inversions() % 2 == 0
    }

    /// Solvability test that accounts for the blank's row on even-width boards.
    ///
    /// Odd width: inversions must be even. Even width: inversions plus the
    /// blank's row counted from the bottom (starting at 1) must be odd.
    pub fn solvable_by_width(&self) -> bool {
        let inversions = self.inversions();

        if self.cols % 2 == 1 {
            inversions % 2 == 0
        } else {
            let from_bottom = self.rows - self.empty.0;
            (inversions + from_bottom) % 2 == 1
        }
    }
}

impl FromStr for Board {
    type Err = PuzzleError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// A board written in layout form with a chosen empty marker.
///
/// Created by [`Board::layout`]; the output parses back with
/// [`Board::parse_with_marker`] and the same marker.
pub struct Layout<'a> {
    board: &'a Board,
    marker: &'a str,
}

impl fmt::Display for Layout<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.board.grid.iter().enumerate() {
            if i > 0 {
                write!(f, "|")?;
            }
            for (j, tile) in row.iter().enumerate() {
                if j > 0 {
                    write!(f, " ")?;
                }
                match tile {
                    Tile::Number(n) => write!(f, "{}", n)?,
                    Tile::Empty => write!(f, "{}", self.marker)?,
                }
            }
        }
        Ok(())
    }
}

/// `{}` writes the layout format accepted by [`Board::parse`];
/// `{:#}` writes an aligned grid, one row per line.
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            let width = (self.rows * self.cols - 1).to_string().len();
            for row in &self.grid {
                for tile in row {
                    write!(f, "{:>width$} ", tile.to_string(), width = width)?;
                }
                writeln!(f)?;
            }
            return Ok(());
        }

        fmt::Display::fmt(&self.layout(DEFAULT_EMPTY_MARKER), f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn parses_layout_and_locates_blank() {
        let board = Board::parse("1 2 3|4 5 6|7 _ 8").unwrap();
        assert_eq!(board.rows(), 3);
        assert_eq!(board.cols(), 3);
        assert_eq!(board.empty(), (2, 1));
        assert_eq!(board.tile(2, 2), Some(Tile::Number(8)));
        assert_eq!(board.tile(3, 0), None);
    }

    #[test]
    fn display_round_trips_through_parse() {
        for layout in ["1 2 3|4 5 6|7 _ 8", "_ 1|2 3", "3 1 2 _|4 5 6 7"] {
            let board = Board::parse(layout).unwrap();
            assert_eq!(board.to_string(), layout);
            assert_eq!(Board::parse(&board.to_string()).unwrap(), board);
        }

        let mut rng = StdRng::seed_from_u64(17);
        for (rows, cols) in [(3, 3), (2, 4), (4, 3), (1, 5)] {
            for moves in [0, 5, 40] {
                let board = Board::scrambled(rows, cols, moves, &mut rng).unwrap();
                assert_eq!(Board::parse(&board.to_string()).unwrap(), board);
            }
        }
    }

    #[test]
    fn custom_marker_layout_round_trips() {
        let board = Board::parse_with_marker("1 2 3|4 5 6|7 0 8", "0").unwrap();
        let text = board.layout("0").to_string();
        assert_eq!(text, "1 2 3|4 5 6|7 0 8");
        assert_eq!(Board::parse_with_marker(&text, "0").unwrap(), board);
        assert_eq!(board.layout("*").to_string(), "1 2 3|4 5 6|7 * 8");

        let mut rng = StdRng::seed_from_u64(4);
        let scrambled = Board::scrambled(4, 3, 30, &mut rng).unwrap();
        let text = scrambled.layout("x").to_string();
        assert_eq!(Board::parse_with_marker(&text, "x").unwrap(), scrambled);
    }

    #[test]
    fn alternate_display_is_aligned_grid() {
        let board = Board::parse("1 2 3|4 5 6|7 _ 8").unwrap();
        assert_eq!(format!("{:#}", board), "1 2 3 \n4 5 6 \n7 _ 8 \n");
    }

    #[test]
    fn custom_marker_is_respected() {
        let board = Board::parse_with_marker("1 2|3 0", "0").unwrap();
        assert_eq!(board.empty(), (1, 1));
        assert_eq!(board, Board::goal(2, 2).unwrap());
    }

    #[test]
    fn rejects_ragged_rows() {
        let err = Board::parse("1 2 3|4 5|6 7 _").unwrap_err();
        assert!(matches!(
            err,
            PuzzleError::RaggedRow {
                row: 1,
                expected: 3,
                got: 2,
                ..
            }
        ));
    }

    #[test]
    fn rejects_bad_tokens() {
        let err = Board::parse("1 2 x|4 5 6|7 _ 8").unwrap_err();
        assert!(matches!(err, PuzzleError::InvalidToken { row: 0, col: 2, .. }));
    }

    #[test]
    fn rejects_missing_or_repeated_blank() {
        assert!(matches!(
            Board::parse("1 2|3 4").unwrap_err(),
            PuzzleError::MissingEmpty { .. }
        ));
        assert!(matches!(
            Board::parse("1 _|_ 2").unwrap_err(),
            PuzzleError::MultipleEmpty { count: 2, .. }
        ));
    }

    #[test]
    fn rejects_out_of_range_and_duplicate_tiles() {
        assert!(matches!(
            Board::parse("1 2|9 _").unwrap_err(),
            PuzzleError::TileOutOfRange { value: 9, max: 3 }
        ));
        assert!(matches!(
            Board::parse("1 1|2 _").unwrap_err(),
            PuzzleError::DuplicateTile { value: 1 }
        ));
        assert!(matches!(Board::parse("  ").unwrap_err(), PuzzleError::EmptyLayout));
        assert!(matches!(
            Board::parse("1 2||3 _").unwrap_err(),
            PuzzleError::EmptyRow { row: 1, .. }
        ));
    }

    #[test]
    fn goal_is_row_major_with_blank_last() {
        let goal = Board::goal(2, 3).unwrap();
        assert_eq!(goal.to_string(), "1 2 3|4 5 _");
        assert_eq!(goal.inversions(), 0);
        assert!(goal.solvable());
        assert!(goal.solvable_by_width());
    }

    #[test]
    fn slide_copies_and_leaves_source_untouched() {
        let board = Board::parse("1 2 3|4 5 6|7 _ 8").unwrap();
        let next = board.slide(Direction::Left).unwrap();
        assert_eq!(next.to_string(), "1 2 3|4 5 6|7 8 _");
        assert_eq!(next.empty(), (2, 2));
        assert_eq!(board.to_string(), "1 2 3|4 5 6|7 _ 8");
        assert!(board.slide(Direction::Up).is_none());
    }

    #[test]
    fn swapped_pair_is_unsolvable() {
        let board = Board::parse("1 2 3|4 5 6|8 7 _").unwrap();
        assert_eq!(board.inversions(), 1);
        assert!(!board.solvable());
        assert!(!board.solvable_by_width());
    }

    #[test]
    fn odd_width_parity_survives_legal_moves() {
        let mut rng = StdRng::seed_from_u64(11);
        for moves in [1, 7, 30, 101] {
            let board = Board::scrambled(3, 3, moves, &mut rng).unwrap();
            assert!(board.solvable(), "{} should stay solvable", board);
        }
    }

    #[test]
    fn width_aware_rule_accepts_even_width_scrambles() {
        let mut rng = StdRng::seed_from_u64(5);
        for moves in [1, 2, 15, 64] {
            let board = Board::scrambled(4, 4, moves, &mut rng).unwrap();
            assert!(board.solvable_by_width(), "{} should be solvable", board);
        }
    }

    #[test]
    fn scramble_is_deterministic_for_a_seed() {
        let a = Board::scrambled(3, 4, 50, &mut StdRng::seed_from_u64(3)).unwrap();
        let b = Board::scrambled(3, 4, 50, &mut StdRng::seed_from_u64(3)).unwrap();
        assert_eq!(a, b);
        assert_eq!(
            Board::scrambled(3, 3, 0, &mut StdRng::seed_from_u64(3)).unwrap(),
            Board::goal(3, 3).unwrap()
        );
    }
}
