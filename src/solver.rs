//! Greedy best-first search over board states.
//!
//! The frontier is a min-heap keyed by [`Node::heuristic_value_with`], ties
//! going to the node pushed first. Since children are pushed in direction
//! order, equal priorities resolve the same way on every run.

use log::{debug, info, warn};
use std::cmp::{Ordering, Reverse};
use std::collections::{BinaryHeap, HashSet};
use std::rc::Rc;
use std::sync::atomic::{AtomicBool, Ordering as AtomicOrdering};

use crate::action::Action;
use crate::board::Board;
use crate::config::{SolvabilityRule, SolverConfig};
use crate::error::{PuzzleError, Result};
use crate::node::{Node, NodeId};
use crate::state::State;

const PROGRESS_INTERVAL: usize = 10_000;

/// Frontier ordering: lower priority first, then older insertion.
#[derive(Debug, Clone, Copy)]
struct FrontierKey {
    priority: f64,
    sequence: u64,
}

impl PartialEq for FrontierKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for FrontierKey {}

impl PartialOrd for FrontierKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FrontierKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.priority
            .total_cmp(&other.priority)
            .then(self.sequence.cmp(&other.sequence))
    }
}

#[derive(Debug, PartialEq, Eq, PartialOrd, Ord)]
struct FrontierEntry {
    key: FrontierKey,
    id: NodeId,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Nodes taken off the frontier and expanded.
    pub expanded: usize,
    /// Children pushed onto the frontier.
    pub generated: usize,
    /// Largest frontier size seen.
    pub max_frontier: usize,
}

/// Moves from the initial board to the goal.
#[derive(Debug, Clone)]
pub struct Solution {
    /// One action per move, first move first.
    pub actions: Vec<Action>,
    /// Every board along the path, starting with the initial one.
    pub boards: Vec<Board>,
    pub stats: SearchStats,
}

impl Solution {
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Human-readable moves such as `Move 8 left`.
    pub fn moves(&self) -> Vec<String> {
        self.actions.iter().map(ToString::to_string).collect()
    }
}

pub struct Solver {
    config: SolverConfig,
}

impl Default for Solver {
    fn default() -> Self {
        Self::new(SolverConfig::default())
    }
}

impl Solver {
    pub fn new(config: SolverConfig) -> Self {
        Self { config }
    }

    /// Searches from `initial` to `target`.
    ///
    /// Fails with [`PuzzleError::Unsolvable`] before expanding anything when
    /// the configured parity rule says the boards are in different classes.
    pub fn solve(&self, initial: Board, target: Board) -> Result<Solution> {
        self.solve_inner(initial, target, None)
    }

    /// Like [`Solver::solve`], but gives up with [`PuzzleError::Cancelled`]
    /// once `cancel` is set. The flag is read once per iteration.
    pub fn solve_with_cancel(
        &self,
        initial: Board,
        target: Board,
        cancel: &AtomicBool,
    ) -> Result<Solution> {
        self.solve_inner(initial, target, Some(cancel))
    }

    fn solve_inner(
        &self,
        initial: Board,
        target: Board,
        cancel: Option<&AtomicBool>,
    ) -> Result<Solution> {
        let state = State::with_target(initial, Rc::new(target))?;
        if !self.parity_matches(state.board(), state.target()) {
            let marker = self.config.empty_marker.as_str();
            warn!(
                "{} cannot reach {}",
                state.board().layout(marker),
                state.target().layout(marker)
            );
            return Err(PuzzleError::Unsolvable {
                board: state.board().layout(marker).to_string(),
            });
        }
        self.search(Node::root(state), cancel)
    }

    fn parity_matches(&self, initial: &Board, target: &Board) -> bool {
        match self.config.solvability {
            SolvabilityRule::InversionParity => initial.solvable() == target.solvable(),
            SolvabilityRule::WidthAware => {
                initial.solvable_by_width() == target.solvable_by_width()
            }
            SolvabilityRule::Skip => true,
        }
    }

    /// Runs the search loop from `root` without any solvability pre-check.
    pub fn search(&self, root: Node, cancel: Option<&AtomicBool>) -> Result<Solution> {
        let weights = &self.config.heuristic;
        let mut stats = SearchStats::default();
        let mut sequence = 0u64;
        let mut explored: HashSet<Board> = HashSet::new();
        let mut frontier = BinaryHeap::new();

        frontier.push(Reverse(FrontierEntry {
            key: FrontierKey {
                priority: root.heuristic_value_with(weights),
                sequence,
            },
            id: NodeId(0),
        }));
        let mut arena = vec![root];

        while let Some(Reverse(entry)) = frontier.pop() {
            if cancel.is_some_and(|flag| flag.load(AtomicOrdering::Relaxed)) {
                info!("search cancelled after {} expansions", stats.expanded);
                return Err(PuzzleError::Cancelled {
                    expanded: stats.expanded,
                });
            }

            let children = {
                let node = &arena[entry.id.index()];
                let board = node.state().board();
                if explored.contains(board) {
                    continue;
                }
                if node.state().is_goal() {
                    let solution = reconstruct(&arena, entry.id, stats);
                    info!(
                        "solved in {} moves after expanding {} nodes",
                        solution.len(),
                        stats.expanded
                    );
                    return Ok(solution);
                }
                if let Some(limit) = self.config.max_expansions {
                    if stats.expanded >= limit {
                        warn!("expansion limit of {} reached", limit);
                        return Err(PuzzleError::ExpansionLimit { limit });
                    }
                }

                explored.insert(board.clone());
                node.expand(entry.id)
            };
            stats.expanded += 1;

            for child in children {
                if explored.contains(child.state().board()) {
                    continue;
                }
                sequence += 1;
                let key = FrontierKey {
                    priority: child.heuristic_value_with(weights),
                    sequence,
                };
                let id = NodeId(arena.len());
                arena.push(child);
                frontier.push(Reverse(FrontierEntry { key, id }));
                stats.generated += 1;
            }
            stats.max_frontier = stats.max_frontier.max(frontier.len());

            if stats.expanded % PROGRESS_INTERVAL == 0 {
                debug!(
                    "expanded {} nodes, frontier {}, explored {}",
                    stats.expanded,
                    frontier.len(),
                    explored.len()
                );
            }
        }

        warn!("frontier exhausted after {} expansions", stats.expanded);
        Err(PuzzleError::SearchExhausted {
            expanded: stats.expanded,
        })
    }
}

/// Follows parent links from `goal` back to the root.
fn reconstruct(arena: &[Node], goal: NodeId, stats: SearchStats) -> Solution {
    let mut actions = Vec::new();
    let mut boards = Vec::new();
    let mut cursor = Some(goal);

    while let Some(id) = cursor {
        let node = &arena[id.index()];
        boards.push(node.state().board().clone());
        if let Some(action) = node.action() {
            actions.push(*action);
        }
        cursor = node.parent();
    }

    actions.reverse();
    boards.reverse();
    Solution {
        actions,
        boards,
        stats,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::Direction;
    use crate::config::HeuristicWeights;
    use crate::tile::Tile;

    fn board(layout: &str) -> Board {
        Board::parse(layout).unwrap()
    }

    #[test]
    fn frontier_key_prefers_lower_priority_then_older() {
        let a = FrontierKey {
            priority: 1.0,
            sequence: 9,
        };
        let b = FrontierKey {
            priority: 2.0,
            sequence: 0,
        };
        let c = FrontierKey {
            priority: 1.0,
            sequence: 3,
        };
        assert!(a < b);
        assert!(c < a);
    }

    #[test]
    fn single_move_puzzle() {
        let solution = Solver::default()
            .solve(board("1 2 3|4 5 6|7 _ 8"), board("1 2 3|4 5 6|7 8 _"))
            .unwrap();
        assert_eq!(solution.moves(), vec!["Move 8 left"]);
        assert_eq!(
            solution.actions[0],
            Action::new(Tile::Number(8), Direction::Left, true)
        );
        assert_eq!(solution.boards.last(), Some(&board("1 2 3|4 5 6|7 8 _")));
        assert_eq!(solution.stats.expanded, 1);
    }

    #[test]
    fn solved_board_gives_empty_path() {
        let goal = Board::goal(3, 3).unwrap();
        let solution = Solver::default().solve(goal.clone(), goal.clone()).unwrap();
        assert!(solution.is_empty());
        assert_eq!(solution.boards, vec![goal]);
        assert_eq!(solution.stats.expanded, 0);
    }

    #[test]
    fn swapped_tiles_are_unsolvable() {
        let err = Solver::default()
            .solve(board("1 2 3|4 5 6|8 7 _"), Board::goal(3, 3).unwrap())
            .unwrap_err();
        assert!(matches!(err, PuzzleError::Unsolvable { .. }));
    }

    #[test]
    fn unsolvable_report_uses_configured_marker() {
        let config = SolverConfig {
            empty_marker: "0".to_string(),
            ..SolverConfig::default()
        };
        let initial = Board::parse_with_marker("1 2 3|4 5 6|8 7 0", "0").unwrap();
        let err = Solver::new(config)
            .solve(initial, Board::goal(3, 3).unwrap())
            .unwrap_err();
        match err {
            PuzzleError::Unsolvable { board } => {
                assert_eq!(board, "1 2 3|4 5 6|8 7 0");
                assert!(Board::parse_with_marker(&board, "0").is_ok());
            }
            other => panic!("expected Unsolvable, got {}", other),
        }
    }

    #[test]
    fn heuristic_weights_reach_the_search() {
        let weights = HeuristicWeights {
            manhattan: 1.0,
            hamming: 1.0,
        };
        let solver = Solver::new(SolverConfig::default().with_heuristic(weights));
        let solution = solver
            .solve(board("1 2 3|4 5 6|_ 7 8"), Board::goal(3, 3).unwrap())
            .unwrap();
        assert_eq!(solution.moves(), vec!["Move 7 left", "Move 8 left"]);
    }

    #[test]
    fn unchecked_unsolvable_board_exhausts_frontier() {
        let solver = Solver::new(SolverConfig::default().with_solvability(SolvabilityRule::Skip));
        let err = solver
            .solve(board("2 1|3 _"), Board::goal(2, 2).unwrap())
            .unwrap_err();
        // half of the 4! arrangements are reachable
        assert!(matches!(err, PuzzleError::SearchExhausted { expanded: 12 }));
    }

    #[test]
    fn expansion_limit_stops_search() {
        let solver = Solver::new(SolverConfig::default().with_max_expansions(3));
        let err = solver
            .solve(board("8 6 7|2 5 4|3 _ 1"), Board::goal(3, 3).unwrap())
            .unwrap_err();
        assert!(matches!(err, PuzzleError::ExpansionLimit { limit: 3 }));
    }

    #[test]
    fn raised_flag_cancels_before_expanding() {
        let cancel = AtomicBool::new(true);
        let err = Solver::default()
            .solve_with_cancel(board("1 2 3|4 5 6|7 _ 8"), Board::goal(3, 3).unwrap(), &cancel)
            .unwrap_err();
        assert!(matches!(err, PuzzleError::Cancelled { expanded: 0 }));
    }

    #[test]
    fn mismatched_dimensions_are_rejected() {
        let err = Solver::default()
            .solve(Board::goal(2, 3).unwrap(), Board::goal(3, 2).unwrap())
            .unwrap_err();
        assert!(matches!(err, PuzzleError::DimensionMismatch { .. }));
    }

    #[test]
    fn path_boards_follow_actions() {
        let solution = Solver::default()
            .solve(board("8 6 7|2 5 4|3 _ 1"), Board::goal(3, 3).unwrap())
            .unwrap();
        assert_eq!(solution.boards.len(), solution.len() + 1);
        for (i, action) in solution.actions.iter().enumerate() {
            let next = solution.boards[i].slide(action.direction()).unwrap();
            assert_eq!(next, solution.boards[i + 1]);
        }
        assert_eq!(solution.boards.last(), Some(&Board::goal(3, 3).unwrap()));
    }
}
