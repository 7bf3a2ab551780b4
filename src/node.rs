use crate::action::Action;
use crate::config::HeuristicWeights;
use crate::state::State;

/// Index of a node inside the solver's arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    pub fn index(&self) -> usize {
        self.0
    }
}

/// A vertex of the search tree.
///
/// `parent` refers to another node of the same arena and is `None` for the
/// root, as is `action`.
#[derive(Debug, Clone)]
pub struct Node {
    state: State,
    parent: Option<NodeId>,
    action: Option<Action>,
}

impl Node {
    pub fn new(state: State, parent: Option<NodeId>, action: Option<Action>) -> Self {
        Self {
            state,
            parent,
            action,
        }
    }

    pub fn root(state: State) -> Self {
        Self::new(state, None, None)
    }

    pub fn state(&self) -> &State {
        &self.state
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn action(&self) -> Option<&Action> {
        self.action.as_ref()
    }

    /// Children reachable in one slide, in direction order.
    ///
    /// `id` is this node's own arena index; children point back to it.
    /// Actions that leave the state unchanged produce no child.
    pub fn expand(&self, id: NodeId) -> Vec<Node> {
        self.state
            .actions()
            .into_iter()
            .filter_map(|action| {
                let next = self.state.result(&action);
                if next == self.state {
                    None
                } else {
                    Some(Node::new(next, Some(id), Some(action)))
                }
            })
            .collect()
    }

    /// Sum of row and column offsets of each tile from its row-major home.
    ///
    /// Home of tile `v` is row `(v - 1) / cols`, column `(v - 1) % cols`.
    pub fn manhattan_distance(&self) -> usize {
        let board = self.state.board();
        let cols = board.cols();
        let mut distance = 0;

        for (i, row) in board.grid().iter().enumerate() {
            for (j, tile) in row.iter().enumerate() {
                if let Some(value) = tile.number() {
                    let home = value as usize - 1;
                    distance += i.abs_diff(home / cols);
                    distance += j.abs_diff(home % cols);
                }
            }
        }
        distance
    }

    /// Number of tiles not at their row-major home.
    pub fn hamming_distance(&self) -> usize {
        let board = self.state.board();
        let cols = board.cols();

        board
            .grid()
            .iter()
            .enumerate()
            .flat_map(|(i, row)| {
                row.iter()
                    .enumerate()
                    .map(move |(j, tile)| (i * cols + j + 1, tile))
            })
            .filter(|(home, tile)| tile.number().is_some_and(|v| v as usize != *home))
            .count()
    }

    /// Search priority with the default weights. Lower is closer.
    pub fn heuristic_value(&self) -> f64 {
        self.heuristic_value_with(&HeuristicWeights::default())
    }

    /// `(manhattan * w_m) * (hamming * w_h)`.
    ///
    /// Not admissible; only used to order the frontier.
    pub fn heuristic_value_with(&self, weights: &HeuristicWeights) -> f64 {
        let manhattan = self.manhattan_distance() as f64;
        let hamming = self.hamming_distance() as f64;
        (manhattan * weights.manhattan) * (hamming * weights.hamming)
    }
}
