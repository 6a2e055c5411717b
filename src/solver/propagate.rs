//! Arc consistency for Kakuro runs: a clue's combo list is revised against
//! the current domains of the cells in its run, and a cell's domain is
//! re-derived from the digits its owning clues' surviving combos can still
//! realize.
//!
//! A combo survives revision only if it admits a system of distinct
//! representatives against the run's domains (each digit in the combo can
//! be matched to a different cell whose domain contains it) — the standard
//! AC-3 "pair is consistent iff compatible with some value of the
//! neighbor" check, specialized to Kakuro's multiset constraint. This
//! never discards a combo the true solution could still realize, so it
//! never removes a domain value that appears in the puzzle's solution.

use im::HashSet as ImHashSet;

use crate::cell::{Cell, Combo, Coordinate};
use crate::grid::{Direction, Grid};
use crate::solver::combos::digit_universe;
use crate::solver::stats::SearchStats;
use crate::solver::work_list::WorkList;

/// Does `combo` admit an assignment of its digits to distinct cells in
/// `domains`, each cell receiving a digit its domain contains?
fn combo_is_realizable(combo: &Combo, domains: &[&ImHashSet<u8>]) -> bool {
    let mut match_for_cell: Vec<Option<usize>> = vec![None; domains.len()];

    fn augment(
        digit_idx: usize,
        combo: &Combo,
        domains: &[&ImHashSet<u8>],
        match_for_cell: &mut [Option<usize>],
        visited: &mut [bool],
    ) -> bool {
        for (cell_idx, domain) in domains.iter().enumerate() {
            if visited[cell_idx] || !domain.contains(&combo[digit_idx]) {
                continue;
            }
            visited[cell_idx] = true;
            let free = match match_for_cell[cell_idx] {
                None => true,
                Some(prev_digit) => {
                    augment(prev_digit, combo, domains, match_for_cell, visited)
                }
            };
            if free {
                match_for_cell[cell_idx] = Some(digit_idx);
                return true;
            }
        }
        false
    }

    for digit_idx in 0..combo.len() {
        let mut visited = vec![false; domains.len()];
        if !augment(digit_idx, combo, domains, &mut match_for_cell, &mut visited) {
            return false;
        }
    }
    true
}

/// Revises the clue at `clue_coord`'s combo list for `direction` against
/// the current domains of its run. Returns `None` if the run is empty
/// (nothing to revise) or the combo list becomes empty (inconsistency —
/// the branch should fail). Otherwise returns `Some(shrank)`.
fn revise_direction(
    grid: &mut Grid,
    clue_coord: Coordinate,
    direction: Direction,
    stats: &mut SearchStats,
) -> Option<bool> {
    let run = grid.run(clue_coord, direction);
    if run.is_empty() {
        return None;
    }

    let domains: Vec<ImHashSet<u8>> = run
        .iter()
        .map(|&c| grid.get(c).as_empty().unwrap().2.clone())
        .collect();
    let domain_refs: Vec<&ImHashSet<u8>> = domains.iter().collect();

    let Cell::Clue {
        sum_right,
        sum_down,
        err_right,
        err_down,
        combos_right,
        combos_down,
    } = grid.get(clue_coord).clone()
    else {
        return None;
    };

    let combos = match direction {
        Direction::Right => &combos_right,
        Direction::Down => &combos_down,
        _ => unreachable!("clues only own Right/Down runs"),
    };

    let original_len = combos.len();
    let surviving: Vec<Combo> = combos
        .iter()
        .filter(|combo| combo_is_realizable(combo, &domain_refs))
        .cloned()
        .collect();
    let combos_shrank = surviving.len() < original_len;

    if surviving.is_empty() {
        stats.record_revision(clue_coord, true);
        grid.set(
            clue_coord,
            Cell::Clue {
                sum_right,
                sum_down,
                err_right,
                err_down,
                combos_right: if matches!(direction, Direction::Right) {
                    surviving
                } else {
                    combos_right
                },
                combos_down: if matches!(direction, Direction::Down) {
                    Vec::new()
                } else {
                    combos_down
                },
            },
        );
        return None;
    }

    let universe = digit_universe(&surviving);
    let mut any_cell_shrank = false;
    for (&coord, domain) in run.iter().zip(domains.iter()) {
        let new_domain = domain.clone().intersection(universe.clone());
        if new_domain.len() < domain.len() {
            any_cell_shrank = true;
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
                    domain: new_domain,
                    degree,
                    err,
                },
            );
        }
    }

    match direction {
        Direction::Right => grid.set(
            clue_coord,
            Cell::Clue {
                sum_right,
                sum_down,
                err_right,
                err_down,
                combos_right: surviving,
                combos_down,
            },
        ),
        Direction::Down => grid.set(
            clue_coord,
            Cell::Clue {
                sum_right,
                sum_down,
                err_right,
                err_down,
                combos_right,
                combos_down: surviving,
            },
        ),
        _ => unreachable!("clues only own Right/Down runs"),
    }

    let shrank = combos_shrank || any_cell_shrank;
    stats.record_revision(clue_coord, shrank);
    Some(shrank)
}

/// Runs AC-3 to a fixed point, starting from `seed` clue coordinates.
/// Returns `false` as soon as any clue's combo list is wiped out (the
/// grid is left in whatever partial state propagation reached at that
/// point; callers searching with backtracking restore from a snapshot).
pub fn propagate(grid: &mut Grid, seed: impl IntoIterator<Item = Coordinate>, stats: &mut SearchStats) -> bool {
    let mut worklist = WorkList::new();
    for coord in seed {
        worklist.push_back(coord);
    }

    while let Some(clue_coord) = worklist.pop_front() {
        for direction in [Direction::Right, Direction::Down] {
            let run = grid.run(clue_coord, direction);
            match revise_direction(grid, clue_coord, direction, stats) {
                None if grid.get(clue_coord).is_clue() && !run.is_empty() => {
                    // Combo list was wiped out.
                    let Cell::Clue {
                        combos_right,
                        combos_down,
                        ..
                    } = grid.get(clue_coord).clone()
                    else {
                        unreachable!()
                    };
                    let empty = match direction {
                        Direction::Right => combos_right.is_empty(),
                        Direction::Down => combos_down.is_empty(),
                        _ => false,
                    };
                    if empty {
                        return false;
                    }
                }
                Some(true) => {
                    for &coord in &run {
                        let other_owner = match direction {
                            Direction::Right => grid.clue_up(coord),
                            Direction::Down => grid.clue_left(coord),
                            _ => None,
                        };
                        if let Some(owner) = other_owner {
                            worklist.push_back(owner);
                        }
                    }
                }
                _ => {}
            }
        }
    }

    true
}
