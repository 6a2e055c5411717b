//! The Solver: structural fix-up, combo decomposition, domain intersection,
//! feasibility, and the recursive search dispatched to one of the three
//! strategies in [`crate::solver::strategy`].

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use rand_core::RngCore;
use tracing::debug;

use crate::cell::{Cell, Coordinate, UNSET};
use crate::config::EngineConfig;
use crate::error::{Result, SolveError};
use crate::grid::{Direction, Grid};
use crate::solver::combos;
use crate::solver::propagate;
use crate::solver::stats::SearchStats;
use crate::solver::strategy::{SearchStrategy, Strategy};
use crate::validator::{self, ValidationOutcome};

/// A cooperative cancellation flag, cloneable and shareable across whatever
/// the caller uses to drive a watchdog (a timer thread, a UI cancel
/// button). Polled, never interrupted.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken(Arc<AtomicBool>);

impl CancellationToken {
    pub fn new() -> Self {
        Self(Arc::new(AtomicBool::new(false)))
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// An opaque progress tick, handed to the caller's callback at every
/// suspension point. The tick counter has no meaning beyond "search is
/// still running"; `assigned_count` is the number of `Empty` cells
/// currently assigned, for callers that want a rough completion estimate.
#[derive(Debug, Clone, Copy)]
pub struct SolverProgress {
    pub tick: u64,
    pub assigned_count: usize,
}

/// Converts every `Empty` cell with no `Clue` reachable leftward *and* none
/// reachable upward into a `Block`. Such a cell can never be constrained by
/// any sum, so it can never be meaningfully assigned.
fn structural_fixup(grid: &mut Grid) {
    for coord in grid.coordinates() {
        if !grid.get(coord).is_empty_cell() {
            continue;
        }
        if grid.clue_left(coord).is_none() && grid.clue_up(coord).is_none() {
            grid.set(coord, Cell::Block);
        }
    }
}

/// For every `Clue`, enumerates sum decompositions for each nonzero
/// direction and stores them on the cell.
fn decompose_combos(grid: &mut Grid, config: &EngineConfig) {
    for coord in grid.coordinates() {
        let Cell::Clue {
            sum_right,
            sum_down,
            err_right,
            err_down,
            ..
        } = grid.get(coord).clone()
        else {
            continue;
        };

        let combos_right = if sum_right > 0 {
            combos::combinations(sum_right, grid.run_length_right(coord), config)
        } else {
            Vec::new()
        };
        let combos_down = if sum_down > 0 {
            combos::combinations(sum_down, grid.run_length_down(coord), config)
        } else {
            Vec::new()
        };

        grid.set(
            coord,
            Cell::Clue {
                sum_right,
                sum_down,
                err_right,
                err_down,
                combos_right,
                combos_down,
            },
        );
    }
}

/// Each `Empty` cell's domain is intersected with the digit universes of
/// its owning clues' surviving combo lists.
fn intersect_domains(grid: &mut Grid, config: &EngineConfig) {
    for coord in grid.coordinates() {
        if !grid.get(coord).is_empty_cell() {
            continue;
        }

        let mut universe: im::HashSet<u8> = (config.digit_min..=config.digit_max).collect();
        if let Some(right_clue) = grid.clue_left(coord) {
            if let Cell::Clue { combos_right, .. } = grid.get(right_clue) {
                universe = universe.intersection(combos::digit_universe(combos_right));
            }
        }
        if let Some(down_clue) = grid.clue_up(coord) {
            if let Cell::Clue { combos_down, .. } = grid.get(down_clue) {
                universe = universe.intersection(combos::digit_universe(combos_down));
            }
        }

        if let Cell::Empty {
            solution,
            assigned,
            degree,
            err,
            ..
        } = grid.get(coord).clone()
        {
            grid.set(
                coord,
                Cell::Empty {
                    solution,
                    assigned,
                    domain: universe,
                    degree,
                    err,
                },
            );
        }
    }
}

/// Degree := length of the full run the cell sits in, horizontally plus
/// vertically, computed once before search begins.
fn assign_degrees(grid: &mut Grid) {
    for coord in grid.coordinates() {
        if !grid.get(coord).is_empty_cell() {
            continue;
        }
        let horizontal =
            grid.run(coord, Direction::Left).len() + 1 + grid.run(coord, Direction::Right).len();
        let vertical =
            grid.run(coord, Direction::Up).len() + 1 + grid.run(coord, Direction::Down).len();

        if let Cell::Empty {
            solution,
            assigned,
            domain,
            err,
            ..
        } = grid.get(coord).clone()
        {
            grid.set(
                coord,
                Cell::Empty {
                    solution,
                    assigned,
                    domain,
                    degree: (horizontal + vertical) as u32,
                    err,
                },
            );
        }
    }
}

/// Any `Empty` cell with an empty domain, or any `Clue` with a nonzero sum
/// and no surviving combos in that direction, makes the puzzle unsolvable
/// as authored.
fn feasible(grid: &Grid) -> bool {
    for coord in grid.coordinates() {
        match grid.get(coord) {
            Cell::Empty {
                assigned, domain, ..
            } if *assigned == UNSET && domain.is_empty() => return false,
            Cell::Clue {
                sum_right,
                sum_down,
                combos_right,
                combos_down,
                ..
            } => {
                if *sum_right > 0 && combos_right.is_empty() {
                    return false;
                }
                if *sum_down > 0 && combos_down.is_empty() {
                    return false;
                }
            }
            _ => {}
        }
    }
    true
}

fn assigned_count(grid: &Grid) -> usize {
    grid.coordinates()
        .into_iter()
        .filter(|&c| grid.get(c).assigned_digit().is_some())
        .count()
}

fn assign(grid: &mut Grid, coord: Coordinate, value: u8) {
    if let Cell::Empty {
        solution, domain, degree, err, ..
    } = grid.get(coord).clone()
    {
        grid.set(
            coord,
            Cell::Empty {
                solution,
                assigned: value as i8,
                domain,
                degree,
                err,
            },
        );
    }
}

/// Pins a cell's domain down to the single value just assigned, so that
/// forward checking and arc consistency (which reason over domains, not
/// over `assigned`) actually treat the assignment as binding. Without
/// this, a combo that used the cell's old, wider domain would still look
/// realizable after the assignment, and the value would never be pruned
/// from the rest of the run.
fn pin_domain(grid: &mut Grid, coord: Coordinate, value: u8) {
    if let Cell::Empty {
        solution,
        assigned,
        degree,
        err,
        ..
    } = grid.get(coord).clone()
    {
        grid.set(
            coord,
            Cell::Empty {
                solution,
                assigned,
                domain: im::HashSet::unit(value),
                degree,
                err,
            },
        );
    }
}

fn unassign(grid: &mut Grid, coord: Coordinate) {
    if let Cell::Empty {
        solution, domain, degree, err, ..
    } = grid.get(coord).clone()
    {
        grid.set(
            coord,
            Cell::Empty {
                solution,
                assigned: UNSET,
                domain,
                degree,
                err,
            },
        );
    }
}

#[allow(clippy::too_many_arguments)]
fn search(
    grid: &mut Grid,
    strategy: &dyn SearchStrategy,
    rng: &mut dyn RngCore,
    token: &CancellationToken,
    progress: &mut Option<&mut dyn FnMut(SolverProgress)>,
    stats: &mut SearchStats,
) -> Result<bool> {
    if token.is_cancelled() {
        return Err(SolveError::Abandoned.into());
    }
    stats.nodes_visited += 1;
    if let Some(cb) = progress.as_mut() {
        cb(SolverProgress {
            tick: stats.nodes_visited,
            assigned_count: assigned_count(grid),
        });
    }

    let Some(coord) = strategy.variable_heuristic().select_variable(grid) else {
        return Ok(true);
    };

    let domain = match grid.get(coord) {
        Cell::Empty { domain, .. } => domain.clone(),
        _ => unreachable!("variable heuristic only selects Empty cells"),
    };
    let ordered_values = strategy.value_heuristic().order_values(&domain, rng);

    for value in ordered_values {
        if token.is_cancelled() {
            return Err(SolveError::Abandoned.into());
        }

        let snapshot = strategy.snapshots().then(|| grid.snapshot());
        assign(grid, coord, value);

        let ok = if strategy.propagates() {
            pin_domain(grid, coord, value);
            let seed = [grid.clue_left(coord), grid.clue_up(coord)]
                .into_iter()
                .flatten();
            propagate::propagate(grid, seed, stats)
        } else {
            validator::validate_play(grid, true) == ValidationOutcome::Ok
        };

        if ok && search(grid, strategy, rng, token, progress, stats)? {
            return Ok(true);
        }

        stats.backtracks += 1;
        match snapshot {
            Some(snap) => *grid = snap,
            None => unassign(grid, coord),
        }
    }

    Ok(false)
}

/// Runs the five solver phases (spec.md §4.E) against `grid` and, if
/// feasible, searches for an assignment using `strategy`. On success every
/// `Empty` cell's `assigned` field holds the found solution; call
/// [`confirm_solution`] to adopt it. Returns [`SolveError::NoSolution`] if
/// no assignment satisfies every clue, or [`SolveError::Abandoned`] if
/// `token` was cancelled first.
pub fn solve(
    grid: &mut Grid,
    strategy: Strategy,
    config: &EngineConfig,
    rng: &mut dyn RngCore,
    token: &CancellationToken,
    mut progress: Option<&mut dyn FnMut(SolverProgress)>,
) -> Result<SearchStats> {
    debug!(?strategy, "solver: structural fix-up");
    structural_fixup(grid);

    debug!("solver: decomposing clue sums into combos");
    decompose_combos(grid, config);

    debug!("solver: intersecting cell domains");
    intersect_domains(grid, config);

    debug!("solver: computing cell degrees");
    assign_degrees(grid);

    if !feasible(grid) {
        return Err(SolveError::NoSolution.into());
    }

    let mut stats = SearchStats::default();
    let strategy_impl = strategy.build();
    let found = search(grid, strategy_impl.as_ref(), rng, token, &mut progress, &mut stats)?;

    if !found {
        return Err(SolveError::NoSolution.into());
    }

    Ok(stats)
}

/// Moves every `Empty` cell's `assigned` value into `solution` and clears
/// `assigned`, turning a solved-but-unset grid into a playable puzzle.
/// Sets `grid.has_solution`, since every `Empty` cell now has one.
pub fn confirm_solution(grid: &mut Grid) {
    for coord in grid.coordinates() {
        if let Cell::Empty {
            assigned,
            domain,
            degree,
            err,
            ..
        } = grid.get(coord).clone()
        {
            if assigned == UNSET {
                continue;
            }
            grid.set(
                coord,
                Cell::Empty {
                    solution: assigned,
                    assigned: UNSET,
                    domain,
                    degree,
                    err,
                },
            );
        }
    }
    grid.has_solution = true;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::Cell;
    use pretty_assertions::assert_eq;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    /// A clue at (0,0) with a 2-cell right-run and a 2-cell down-run, both
    /// summing to 3; spec.md §8 scenario S2.
    fn shared_run_grid() -> Grid {
        let mut g = Grid::new(3, 3, 1, 9);
        g.set(Coordinate::new(0, 0), Cell::clue(3, 3));
        g.set(Coordinate::new(1, 1), Cell::Block);
        g.set(Coordinate::new(1, 2), Cell::Block);
        g.set(Coordinate::new(2, 1), Cell::Block);
        g.set(Coordinate::new(2, 2), Cell::Block);
        g
    }

    #[test]
    fn fast_strategy_solves_shared_run_puzzle() {
        let mut g = shared_run_grid();
        let config = EngineConfig::standard();
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let token = CancellationToken::new();
        let stats = solve(&mut g, Strategy::Fast, &config, &mut rng, &token, None).unwrap();
        assert!(stats.nodes_visited > 0);

        confirm_solution(&mut g);
        let right_sum: i32 = g
            .run_right(Coordinate::new(0, 0))
            .iter()
            .filter_map(|&c| g.get(c).solution_digit())
            .map(|d| d as i32)
            .sum();
        assert_eq!(right_sum, 3);
        let down_sum: i32 = g
            .run_down(Coordinate::new(0, 0))
            .iter()
            .filter_map(|&c| g.get(c).solution_digit())
            .map(|d| d as i32)
            .sum();
        assert_eq!(down_sum, 3);
    }

    #[test]
    fn slow_strategy_solves_shared_run_puzzle() {
        let mut g = shared_run_grid();
        let config = EngineConfig::standard();
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let token = CancellationToken::new();
        solve(&mut g, Strategy::Slow, &config, &mut rng, &token, None).unwrap();
        confirm_solution(&mut g);
        assert!(g.get(Coordinate::new(1, 0)).solution_digit().is_some());
    }

    #[test]
    fn cancelled_token_reports_abandoned() {
        let mut g = shared_run_grid();
        let config = EngineConfig::standard();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let token = CancellationToken::new();
        token.cancel();
        let err = solve(&mut g, Strategy::Fast, &config, &mut rng, &token, None).unwrap_err();
        assert!(matches!(
            err,
            crate::error::Error::Inner { .. }
        ));
    }

    #[test]
    fn infeasible_sum_reports_no_solution() {
        // A length-1 run with an out-of-range sum can never decompose.
        let mut g = Grid::new(2, 1, 1, 9);
        g.set(Coordinate::new(0, 0), Cell::clue(15, 0));
        let config = EngineConfig::standard();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let token = CancellationToken::new();
        let result = solve(&mut g, Strategy::Fast, &config, &mut rng, &token, None);
        assert!(result.is_err());
    }
}
