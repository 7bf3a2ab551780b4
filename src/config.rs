use serde::Deserialize;
use std::path::Path;

use crate::board::DEFAULT_EMPTY_MARKER;
use crate::error::{PuzzleError, Result};

/// Factors of the search priority `(manhattan * manhattan_w) * (hamming * hamming_w)`.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HeuristicWeights {
    #[serde(default = "defaults::manhattan")]
    pub manhattan: f64,
    #[serde(default = "defaults::hamming")]
    pub hamming: f64,
}

impl Default for HeuristicWeights {
    fn default() -> Self {
        Self {
            manhattan: defaults::manhattan(),
            hamming: defaults::hamming(),
        }
    }
}

/// Which parity rule gates the search before any expansion.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SolvabilityRule {
    /// Even number of inversions, see [`Board::solvable`](crate::board::Board::solvable).
    #[default]
    InversionParity,
    /// Accounts for the blank row on even widths, see
    /// [`Board::solvable_by_width`](crate::board::Board::solvable_by_width).
    WidthAware,
    /// No pre-check; an unreachable goal runs until the frontier empties.
    Skip,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct SolverConfig {
    /// Layout token for the empty cell.
    #[serde(default = "defaults::empty_marker")]
    pub empty_marker: String,

    #[serde(default)]
    pub heuristic: HeuristicWeights,

    /// Stop after this many expansions. `None` searches until the frontier empties.
    #[serde(default)]
    pub max_expansions: Option<usize>,

    #[serde(default)]
    pub solvability: SolvabilityRule,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            empty_marker: defaults::empty_marker(),
            heuristic: HeuristicWeights::default(),
            max_expansions: None,
            solvability: SolvabilityRule::default(),
        }
    }
}

impl SolverConfig {
    pub fn from_toml<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| PuzzleError::Io {
            operation: format!("read config {}", path.display()),
            source,
        })?;
        Self::from_toml_str(&contents)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let cfg: Self = toml::from_str(contents)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn with_max_expansions(mut self, limit: usize) -> Self {
        self.max_expansions = Some(limit);
        self
    }

    pub fn with_solvability(mut self, rule: SolvabilityRule) -> Self {
        self.solvability = rule;
        self
    }

    pub fn with_heuristic(mut self, weights: HeuristicWeights) -> Self {
        self.heuristic = weights;
        self
    }

    pub fn validate(&self) -> Result<()> {
        let marker = self.empty_marker.as_str();
        if marker.is_empty() || marker.contains('|') || marker.chars().any(char::is_whitespace) {
            return Err(PuzzleError::Config {
                message: format!("empty marker '{}' must be a single token", marker),
            });
        }
        for (name, value) in [
            ("manhattan", self.heuristic.manhattan),
            ("hamming", self.heuristic.hamming),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(PuzzleError::Config {
                    message: format!("{} weight {} must be positive and finite", name, value),
                });
            }
        }
        if self.max_expansions == Some(0) {
            return Err(PuzzleError::Config {
                message: "max-expansions must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}

mod defaults {
    use super::DEFAULT_EMPTY_MARKER;

    pub fn manhattan() -> f64 { 1.2 }
    pub fn hamming() -> f64 { 2.3 }
    pub fn empty_marker() -> String { DEFAULT_EMPTY_MARKER.to_string() }
}
