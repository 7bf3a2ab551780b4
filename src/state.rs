use std::hash::{Hash, Hasher};
use std::rc::Rc;

use crate::action::{Action, Direction};
use crate::board::Board;
use crate::error::{PuzzleError, Result};
use crate::tile::Tile;

/// A live board paired with the goal of the current search.
///
/// The goal is shared between all states of one run. Equality and hashing
/// only look at the live board.
#[derive(Debug, Clone)]
pub struct State {
    current: Board,
    target: Rc<Board>,
}

impl State {
    pub fn new(current: Board, target: Board) -> Result<Self> {
        Self::with_target(current, Rc::new(target))
    }

    /// Builds a state around an already shared goal.
    pub fn with_target(current: Board, target: Rc<Board>) -> Result<Self> {
        if current.rows() != target.rows() || current.cols() != target.cols() {
            return Err(PuzzleError::DimensionMismatch {
                rows: target.rows(),
                cols: target.cols(),
                got_rows: current.rows(),
                got_cols: current.cols(),
            });
        }
        Ok(Self { current, target })
    }

    pub fn board(&self) -> &Board {
        &self.current
    }

    pub fn target(&self) -> &Board {
        &self.target
    }

    pub fn is_goal(&self) -> bool {
        self.current == *self.target
    }

    /// One action per direction, in [`Direction::ALL`] order.
    pub fn actions(&self) -> Vec<Action> {
        Direction::ALL
            .into_iter()
            .map(|dir| match self.current.neighbour(dir) {
                Some((row, col)) => {
                    let tile = self.current.tile(row, col).unwrap_or(Tile::Empty);
                    Action::new(tile, dir, true)
                }
                None => Action::new(Tile::Empty, dir, false),
            })
            .collect()
    }

    /// Applies `action`, or returns a copy of `self` when it is not legal here.
    ///
    /// Callers detect the no-op by comparing the result with `self`.
    pub fn result(&self, action: &Action) -> State {
        if !action.is_feasible() {
            return self.clone();
        }

        let legal = self
            .current
            .neighbour(action.direction())
            .and_then(|(row, col)| self.current.tile(row, col))
            .is_some_and(|tile| !tile.is_empty() && tile == action.tile());
        if !legal {
            return self.clone();
        }

        match self.current.slide(action.direction()) {
            Some(next) => State {
                current: next,
                target: Rc::clone(&self.target),
            },
            None => self.clone(),
        }
    }
}

impl PartialEq for State {
    fn eq(&self, other: &Self) -> bool {
        self.current == other.current
    }
}

impl Eq for State {}

impl Hash for State {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.current.hash(state);
    }
}
