//! Variable-selection heuristics: which unassigned `Empty` cell the search
//! branches on next.

use crate::cell::{Cell, Coordinate};
use crate::grid::Grid;

/// Chooses the next unassigned cell to branch on, or `None` once every
/// `Empty` cell is assigned.
pub trait VariableSelectionHeuristic {
    fn select_variable(&self, grid: &Grid) -> Option<Coordinate>;
}

/// Row-major order, first unassigned cell found. Used by the Slow strategy.
pub struct RowMajorHeuristic;

impl VariableSelectionHeuristic for RowMajorHeuristic {
    fn select_variable(&self, grid: &Grid) -> Option<Coordinate> {
        grid.coordinates().into_iter().find(|&coord| {
            matches!(grid.get(coord), Cell::Empty { assigned, .. } if *assigned == crate::cell::UNSET)
        })
    }
}

/// Minimum-remaining-values, tie-broken by highest degree, then by
/// row-major coordinate for determinism. Used by the Medium and Fast
/// strategies. Degree must already be populated (see
/// [`crate::solver::engine::assign_degrees`]).
pub struct MrvDegreeHeuristic;

impl VariableSelectionHeuristic for MrvDegreeHeuristic {
    fn select_variable(&self, grid: &Grid) -> Option<Coordinate> {
        grid.coordinates()
            .into_iter()
            .filter_map(|coord| match grid.get(coord) {
                Cell::Empty {
                    assigned,
                    domain,
                    degree,
                    ..
                } if *assigned == crate::cell::UNSET => Some((coord, domain.len(), *degree)),
                _ => None,
            })
            .min_by_key(|&(coord, domain_len, degree)| {
                (domain_len, std::cmp::Reverse(degree), coord)
            })
            .map(|(coord, _, _)| coord)
    }
}
