//! Generates a random solvable Kakuro grid at a chosen difficulty.
//!
//! Phase order is fixed, per spec.md §5: seed structure, scatter clues,
//! de-block, fill values, re-block, derive sums.

use im::HashSet as ImHashSet;
use rand::Rng;
use rand_core::RngCore;
use tracing::debug;

use crate::cell::{Cell, Coordinate, UNSET};
use crate::config::{Difficulty, EngineConfig};
use crate::grid::{Direction, Grid};

/// Populates `grid` with a random solvable layout at `difficulty`. Writes
/// only structural fields and each `Empty` cell's `solution`; never touches
/// `assigned`. Always produces *some* consistent solution, though not
/// necessarily a uniquely-solvable puzzle.
pub fn generate(
    grid: &mut Grid,
    difficulty: Difficulty,
    config: &EngineConfig,
    rng: &mut dyn RngCore,
) {
    debug!(?difficulty, "generator: seeding structure");
    seed_structure(grid, config, rng);

    debug!("generator: scattering clues");
    scatter_clues(grid, difficulty, config, rng);

    debug!("generator: de-blocking pass 1");
    deblock_clues(grid);

    debug!("generator: filling values");
    fill_values(grid, config, rng);

    debug!("generator: de-blocking pass 2");
    deblock_clues(grid);

    debug!("generator: deriving clue sums");
    derive_sums(grid);

    grid.has_solution = true;
}

fn seed_structure(grid: &mut Grid, config: &EngineConfig, rng: &mut dyn RngCore) {
    // Top border: for each column, a clue at a random row offset in {0, 1},
    // blocking any cell above it.
    for x in 0..config.width {
        let offset: usize = rng.gen_range(0..2);
        for y in 0..offset {
            grid.set(Coordinate::new(x, y), Cell::Block);
        }
        grid.set(Coordinate::new(x, offset), Cell::clue(0, 0));
    }

    // Left border: symmetrically, for each row, a clue at a random column
    // offset in {0, 1}.
    for y in 0..config.height {
        let offset: usize = rng.gen_range(0..2);
        for x in 0..offset {
            grid.set(Coordinate::new(x, y), Cell::Block);
        }
        grid.set(Coordinate::new(offset, y), Cell::clue(0, 0));
    }
}

fn scatter_clues(
    grid: &mut Grid,
    difficulty: Difficulty,
    config: &EngineConfig,
    rng: &mut dyn RngCore,
) {
    let scattered = difficulty.clue_count(config);
    for _ in 0..scattered {
        if config.width <= 1 || config.height <= 1 {
            break;
        }
        let x = rng.gen_range(1..config.width);
        let y = rng.gen_range(1..config.height);
        grid.set(Coordinate::new(x, y), Cell::clue(0, 0));
    }
}

fn deblock_clues(grid: &mut Grid) {
    for coord in grid.coordinates() {
        if grid.is_blocked(coord) {
            grid.set(coord, Cell::Block);
        }
    }
}

fn used_digits_in_run(grid: &Grid, run: &[Coordinate]) -> ImHashSet<u8> {
    run.iter()
        .filter_map(|&c| grid.get(c).solution_digit())
        .map(|d| d as u8)
        .collect()
}

fn fill_values(grid: &mut Grid, config: &EngineConfig, rng: &mut dyn RngCore) {
    for coord in grid.coordinates() {
        if !grid.get(coord).is_empty_cell() {
            continue;
        }

        let mut horizontal = grid.run(coord, Direction::Left);
        horizontal.extend(grid.run(coord, Direction::Right));
        let mut vertical = grid.run(coord, Direction::Up);
        vertical.extend(grid.run(coord, Direction::Down));

        let used: ImHashSet<u8> = used_digits_in_run(grid, &horizontal)
            .union(used_digits_in_run(grid, &vertical));

        let available: Vec<u8> = (config.digit_min..=config.digit_max)
            .filter(|d| !used.contains(d))
            .collect();

        if available.is_empty() {
            // No digit can be placed here without repeating within a run;
            // turn the cell into a clue and let later passes deal with
            // whatever blocking that implies.
            grid.set(coord, Cell::clue(0, 0));
            continue;
        }

        let digit = available[rng.gen_range(0..available.len())];
        grid.set(
            coord,
            Cell::Empty {
                solution: digit as i8,
                assigned: UNSET,
                domain: (config.digit_min..=config.digit_max).collect(),
                degree: 0,
                err: false,
            },
        );
    }
}

fn derive_sums(grid: &mut Grid) {
    for coord in grid.coordinates() {
        if !grid.get(coord).is_clue() {
            continue;
        }

        let right_sum: u32 = grid
            .run_right(coord)
            .iter()
            .filter_map(|&c| grid.get(c).solution_digit())
            .map(|d| d as u32)
            .sum();
        let down_sum: u32 = grid
            .run_down(coord)
            .iter()
            .filter_map(|&c| grid.get(c).solution_digit())
            .map(|d| d as u32)
            .sum();

        grid.set(coord, Cell::clue(right_sum, down_sum));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validator::{self, ValidationOutcome};
    use pretty_assertions::assert_eq;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn generated_grid_has_no_blocked_clues_and_reveal_wins() {
        let config = EngineConfig::standard();
        let mut grid = Grid::new(config.width, config.height, config.digit_min, config.digit_max);
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        generate(&mut grid, Difficulty::Easy, &config, &mut rng);

        assert!(grid.has_solution);
        for coord in grid.coordinates() {
            assert!(!grid.is_blocked(coord), "clue at {coord:?} is blocked");
        }

        for coord in grid.empty_cells() {
            let solution = grid.get(coord).solution_digit();
            assert!(solution.is_some(), "empty cell {coord:?} has no solution");
        }

        validator::reveal(&mut grid).unwrap();
        assert_eq!(validator::validate_play(&mut grid, false), ValidationOutcome::Ok);
        assert!(validator::is_won(&mut grid));
    }

    #[test]
    fn same_seed_produces_same_grid() {
        let config = EngineConfig::with_size(6, 6);
        let mut grid_a = Grid::new(config.width, config.height, config.digit_min, config.digit_max);
        let mut grid_b = Grid::new(config.width, config.height, config.digit_min, config.digit_max);
        generate(
            &mut grid_a,
            Difficulty::Hard,
            &config,
            &mut ChaCha8Rng::seed_from_u64(7),
        );
        generate(
            &mut grid_b,
            Difficulty::Hard,
            &config,
            &mut ChaCha8Rng::seed_from_u64(7),
        );
        assert_eq!(grid_a, grid_b);
    }
}
