//! The three search strategies from spec.md §4.E, expressed as a common
//! trait so the recursive search in [`crate::solver::engine`] can stay a
//! single function instead of three near-duplicates.

use crate::solver::heuristics::value::{RandomValueHeuristic, ValueOrderingHeuristic};
use crate::solver::heuristics::variable::{
    MrvDegreeHeuristic, RowMajorHeuristic, VariableSelectionHeuristic,
};

/// The closed set of search strategies a caller may select.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Strategy {
    Slow,
    Medium,
    Fast,
}

impl Strategy {
    pub fn build(self) -> Box<dyn SearchStrategy> {
        match self {
            Strategy::Slow => Box::new(SlowSearch),
            Strategy::Medium => Box::new(MediumSearch),
            Strategy::Fast => Box::new(FastSearch),
        }
    }
}

/// How much pruning a step performs, distinguishing the three spec
/// strategies at the point the engine needs to branch on it (whether to
/// run arc consistency, and whether to snapshot before assigning).
pub trait SearchStrategy {
    fn variable_heuristic(&self) -> &dyn VariableSelectionHeuristic;
    fn value_heuristic(&self) -> &dyn ValueOrderingHeuristic;
    /// Forward checking + arc consistency after each assignment, rather
    /// than a whole-grid strict validation pass. Only `Fast` does this.
    fn propagates(&self) -> bool;
    /// Snapshot the grid before each tentative assignment so failure can
    /// restore in O(1) via structural sharing, rather than explicitly
    /// unassigning the one cell. Only meaningful (and only used) alongside
    /// `propagates`, since propagation can touch cells beyond the one just
    /// assigned.
    fn snapshots(&self) -> bool {
        self.propagates()
    }
}

/// Row-major backtracking: no heuristic ordering, no propagation.
pub struct SlowSearch;

impl SearchStrategy for SlowSearch {
    fn variable_heuristic(&self) -> &dyn VariableSelectionHeuristic {
        &RowMajorHeuristic
    }

    fn value_heuristic(&self) -> &dyn ValueOrderingHeuristic {
        &RandomValueHeuristic
    }

    fn propagates(&self) -> bool {
        false
    }
}

/// MRV + degree heuristic, still no propagation.
pub struct MediumSearch;

impl SearchStrategy for MediumSearch {
    fn variable_heuristic(&self) -> &dyn VariableSelectionHeuristic {
        &MrvDegreeHeuristic
    }

    fn value_heuristic(&self) -> &dyn ValueOrderingHeuristic {
        &RandomValueHeuristic
    }

    fn propagates(&self) -> bool {
        false
    }
}

/// MRV + degree + forward checking + arc consistency.
pub struct FastSearch;

impl SearchStrategy for FastSearch {
    fn variable_heuristic(&self) -> &dyn VariableSelectionHeuristic {
        &MrvDegreeHeuristic
    }

    fn value_heuristic(&self) -> &dyn ValueOrderingHeuristic {
        &RandomValueHeuristic
    }

    fn propagates(&self) -> bool {
        true
    }
}
