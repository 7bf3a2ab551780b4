//! Sliding-tile puzzle solver.
//!
//! Boards are parsed from layouts such as `1 2 3|4 5 6|7 _ 8`, paired with a
//! goal into [`State`]s and searched greedily by [`Solver`]:
//!
//! ```
//! use tile_slide::{Board, Solver};
//!
//! let initial = Board::parse("1 2 3|4 5 6|7 _ 8").unwrap();
//! let goal = Board::goal(3, 3).unwrap();
//! let solution = Solver::default().solve(initial, goal).unwrap();
//! assert_eq!(solution.moves(), vec!["Move 8 left"]);
//! ```

pub mod action;
pub mod board;
pub mod config;
pub mod error;
pub mod logging;
pub mod node;
pub mod render;
pub mod solver;
pub mod state;
pub mod tile;

pub use action::{Action, Direction};
pub use board::{Board, Layout};
pub use config::{HeuristicWeights, SolvabilityRule, SolverConfig};
pub use error::{PuzzleError, Result};
pub use node::{Node, NodeId};
pub use solver::{SearchStats, Solution, Solver};
pub use state::State;
pub use tile::Tile;
