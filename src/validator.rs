//! Two validation modes: play-mode (checking an in-progress assignment)
//! and edit-mode (checking a user-authored clue grid's structure).

use std::collections::HashMap;

use im::HashSet;

use crate::cell::{Cell, Coordinate, UNSET};
use crate::config::EngineConfig;
use crate::grid::Grid;
use crate::solver::combos;

/// Outcome of `validate_play`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationOutcome {
    Ok,
    DuplicateOnly,
    WrongSumOnly,
    Mixed,
}

/// Outcome of `validate_edit`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditOutcome {
    Ok,
    BlockedOnly,
    BadValueOnly,
    MixedEdit,
}

struct RunFlags {
    duplicate_cells: HashSet<Coordinate>,
    wrong_sum: bool,
}

fn evaluate_run(grid: &Grid, coords: &[Coordinate], target: u32, strict: bool) -> RunFlags {
    let mut by_value: HashMap<i8, Vec<Coordinate>> = HashMap::new();
    let mut sum = 0u32;
    let mut all_assigned = true;

    for &coord in coords {
        let Some((_, assigned, _)) = grid.get(coord).as_empty() else {
            continue;
        };
        if assigned == UNSET {
            all_assigned = false;
        } else {
            sum += assigned as u32;
            by_value.entry(assigned).or_default().push(coord);
        }
    }

    let mut duplicate_cells = HashSet::new();
    for coords_for_value in by_value.values() {
        if coords_for_value.len() > 1 {
            duplicate_cells.extend(coords_for_value.iter().copied());
        }
    }

    let wrong_sum = if all_assigned {
        sum != target
    } else {
        strict && sum >= target
    };

    RunFlags {
        duplicate_cells,
        wrong_sum,
    }
}

/// Validates the current assignment, stamping `err` on Empty cells and
/// `err_right`/`err_down` on Clues, and returns the combined outcome.
///
/// When `strict` is set, a clue whose run isn't yet fully assigned but
/// whose running partial sum already meets or exceeds the target is also
/// flagged — this is the "partial-sum conflict" behavior the solver relies
/// on to prune branches early. Without `strict`, only a fully-assigned run
/// with the wrong total is flagged.
pub fn validate_play(grid: &mut Grid, strict: bool) -> ValidationOutcome {
    let coords = grid.coordinates();
    let mut duplicate_cells: HashSet<Coordinate> = HashSet::new();
    let mut wrong_sum_clues: HashSet<Coordinate> = HashSet::new();
    let mut wrong_sum_dir_down: HashSet<Coordinate> = HashSet::new();

    for &coord in &coords {
        let Cell::Clue {
            sum_right,
            sum_down,
            ..
        } = grid.get(coord).clone()
        else {
            continue;
        };

        if sum_right > 0 {
            let run = grid.run_right(coord);
            let flags = evaluate_run(grid, &run, sum_right, strict);
            duplicate_cells.extend(flags.duplicate_cells);
            if flags.wrong_sum {
                wrong_sum_clues.insert(coord);
            }
        }
        if sum_down > 0 {
            let run = grid.run_down(coord);
            let flags = evaluate_run(grid, &run, sum_down, strict);
            duplicate_cells.extend(flags.duplicate_cells);
            if flags.wrong_sum {
                wrong_sum_dir_down.insert(coord);
            }
        }
    }

    for &coord in &coords {
        match grid.get(coord).clone() {
            Cell::Empty {
                solution,
                assigned,
                domain,
                degree,
                ..
            } => {
                grid.set(
                    coord,
                    Cell::Empty {
                        solution,
                        assigned,
                        domain,
                        degree,
                        err: duplicate_cells.contains(&coord),
                    },
                );
            }
            Cell::Clue {
                sum_right,
                sum_down,
                combos_right,
                combos_down,
                ..
            } => {
                grid.set(
                    coord,
                    Cell::Clue {
                        sum_right,
                        sum_down,
                        err_right: wrong_sum_clues.contains(&coord),
                        err_down: wrong_sum_dir_down.contains(&coord),
                        combos_right,
                        combos_down,
                    },
                );
            }
            Cell::Block => {}
        }
    }

    let has_duplicate = !duplicate_cells.is_empty();
    let has_wrong_sum = !wrong_sum_clues.is_empty() || !wrong_sum_dir_down.is_empty();
    match (has_duplicate, has_wrong_sum) {
        (false, false) => ValidationOutcome::Ok,
        (true, false) => ValidationOutcome::DuplicateOnly,
        (false, true) => ValidationOutcome::WrongSumOnly,
        (true, true) => ValidationOutcome::Mixed,
    }
}

/// Validates the structural consistency of a user-authored clue grid,
/// ignoring any assignments. Stamps `err_right`/`err_down` on clues whose
/// stated sum cannot be achieved by their run's length.
pub fn validate_edit(grid: &mut Grid, config: &EngineConfig) -> EditOutcome {
    let coords = grid.coordinates();
    let mut blocked = false;
    let mut bad_right: HashSet<Coordinate> = HashSet::new();
    let mut bad_down: HashSet<Coordinate> = HashSet::new();

    for &coord in &coords {
        let Cell::Clue {
            sum_right,
            sum_down,
            ..
        } = grid.get(coord).clone()
        else {
            continue;
        };

        if grid.is_blocked(coord) {
            blocked = true;
        }

        let right_len = grid.run_length_right(coord);
        let right_bad = if right_len == 0 {
            sum_right != 0
        } else {
            sum_right < combos::min_sum(right_len, config) || sum_right > combos::max_sum(right_len, config)
        };
        if right_bad {
            bad_right.insert(coord);
        }

        let down_len = grid.run_length_down(coord);
        let down_bad = if down_len == 0 {
            sum_down != 0
        } else {
            sum_down < combos::min_sum(down_len, config) || sum_down > combos::max_sum(down_len, config)
        };
        if down_bad {
            bad_down.insert(coord);
        }
    }

    for &coord in &coords {
        if let Cell::Clue {
            sum_right,
            sum_down,
            combos_right,
            combos_down,
            ..
        } = grid.get(coord).clone()
        {
            grid.set(
                coord,
                Cell::Clue {
                    sum_right,
                    sum_down,
                    err_right: bad_right.contains(&coord),
                    err_down: bad_down.contains(&coord),
                    combos_right,
                    combos_down,
                },
            );
        }
    }

    let bad_value = !bad_right.is_empty() || !bad_down.is_empty();
    match (blocked, bad_value) {
        (false, false) => EditOutcome::Ok,
        (true, false) => EditOutcome::BlockedOnly,
        (false, true) => EditOutcome::BadValueOnly,
        (true, true) => EditOutcome::MixedEdit,
    }
}

/// True iff validation reports no errors and every `Empty` cell has been
/// assigned a digit.
pub fn is_won(grid: &mut Grid) -> bool {
    let outcome = validate_play(grid, false);
    if outcome != ValidationOutcome::Ok {
        return false;
    }
    grid.empty_cells()
        .into_iter()
        .all(|coord| grid.get(coord).assigned_digit().is_some())
}

/// Clears every `Empty` cell's assignment back to unset and its domain
/// back to the full digit range, and clears all error flags.
pub fn reset(grid: &mut Grid, config: &EngineConfig) {
    for coord in grid.coordinates() {
        match grid.get(coord).clone() {
            Cell::Empty { solution, .. } => {
                grid.set(
                    coord,
                    Cell::Empty {
                        solution,
                        assigned: UNSET,
                        domain: (config.digit_min..=config.digit_max).collect(),
                        degree: 0,
                        err: false,
                    },
                );
            }
            Cell::Clue {
                sum_right,
                sum_down,
                ..
            } => {
                grid.set(
                    coord,
                    Cell::Clue {
                        sum_right,
                        sum_down,
                        err_right: false,
                        err_down: false,
                        combos_right: Vec::new(),
                        combos_down: Vec::new(),
                    },
                );
            }
            Cell::Block => {}
        }
    }
}

/// Copies each `Empty` cell's `solution` into `assigned` and clears
/// errors. Requires `grid.has_solution`.
pub fn reveal(grid: &mut Grid) -> crate::error::Result<()> {
    if !grid.has_solution {
        return Err(crate::error::EngineError::NoStoredSolution.into());
    }
    for coord in grid.coordinates() {
        if let Cell::Empty {
            solution, domain, ..
        } = grid.get(coord).clone()
        {
            grid.set(
                coord,
                Cell::Empty {
                    solution,
                    assigned: solution,
                    domain,
                    degree: 0,
                    err: false,
                },
            );
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::Coordinate;
    use pretty_assertions::assert_eq;

    /// 1 C 1
    /// C E E   clue sum_right = 3 over a run of length 2
    fn sum3_grid() -> Grid {
        let config = EngineConfig::standard();
        let mut g = Grid::new(3, 1, config.digit_min, config.digit_max);
        g.set(Coordinate::new(0, 0), Cell::clue(3, 0));
        g
    }

    #[test]
    fn ok_when_assignment_matches_sum_and_is_unique() {
        let mut g = sum3_grid();
        g.set(
            Coordinate::new(1, 0),
            Cell::Empty {
                solution: UNSET,
                assigned: 1,
                domain: (1..=9).collect(),
                degree: 0,
                err: false,
            },
        );
        g.set(
            Coordinate::new(2, 0),
            Cell::Empty {
                solution: UNSET,
                assigned: 2,
                domain: (1..=9).collect(),
                degree: 0,
                err: false,
            },
        );
        assert_eq!(validate_play(&mut g, false), ValidationOutcome::Ok);
        assert!(is_won(&mut g));
    }

    #[test]
    fn duplicate_broadcast_across_run_is_flagged() {
        let mut g = sum3_grid();
        g.set(
            Coordinate::new(1, 0),
            Cell::Empty {
                solution: UNSET,
                assigned: 2,
                domain: (1..=9).collect(),
                degree: 0,
                err: false,
            },
        );
        g.set(
            Coordinate::new(2, 0),
            Cell::Empty {
                solution: UNSET,
                assigned: 2,
                domain: (1..=9).collect(),
                degree: 0,
                err: false,
            },
        );
        let outcome = validate_play(&mut g, false);
        assert_eq!(outcome, ValidationOutcome::Mixed);
        assert!(g.get(Coordinate::new(1, 0)).clone().as_empty().unwrap().0 == UNSET);
    }

    #[test]
    fn single_cell_assigned_three_fails() {
        let mut g = sum3_grid();
        g.set(
            Coordinate::new(1, 0),
            Cell::Empty {
                solution: UNSET,
                assigned: 3,
                domain: (1..=9).collect(),
                degree: 0,
                err: false,
            },
        );
        // run not fully assigned; strict=false means no partial-sum check
        assert_eq!(validate_play(&mut g, false), ValidationOutcome::Ok);
        // strict=true flags the overflow immediately (3 + unassigned >= 3)
        assert_eq!(validate_play(&mut g, true), ValidationOutcome::WrongSumOnly);
    }

    #[test]
    fn bad_value_on_length_one_run() {
        let config = EngineConfig::standard();
        let mut g = Grid::new(2, 1, config.digit_min, config.digit_max);
        g.set(Coordinate::new(0, 0), Cell::clue(10, 0));
        assert_eq!(
            validate_edit(&mut g, &config),
            EditOutcome::BadValueOnly,
            "max feasible sum for a length-1 run is 9"
        );
    }

    #[test]
    fn reset_clears_assignment_and_domain() {
        let config = EngineConfig::standard();
        let mut g = sum3_grid();
        g.set(
            Coordinate::new(1, 0),
            Cell::Empty {
                solution: 5,
                assigned: 7,
                domain: im::HashSet::unit(7),
                degree: 2,
                err: true,
            },
        );
        reset(&mut g, &config);
        let (solution, assigned, domain) = g.get(Coordinate::new(1, 0)).as_empty().unwrap();
        assert_eq!(solution, 5);
        assert_eq!(assigned, UNSET);
        assert_eq!(domain.len(), 9);
    }
}
