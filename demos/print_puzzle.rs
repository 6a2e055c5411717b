//! Generates a puzzle and prints it as a `prettytable` grid, the way the
//! teacher crate's demos render a solved CSP instance to the terminal.

use kakuro_engine::config::{Difficulty, EngineConfig};
use kakuro_engine::grid::Grid;
use kakuro_engine::{generator, Cell, Coordinate};
use prettytable::{Cell as TableCell, Row, Table};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn cell_text(cell: &Cell, show_solution: bool) -> String {
    match cell {
        Cell::Block => "#".to_string(),
        Cell::Clue {
            sum_right,
            sum_down,
            ..
        } => format!("{sum_down}\\{sum_right}"),
        Cell::Empty {
            solution, assigned, ..
        } => {
            let digit = if show_solution { *solution } else { *assigned };
            if digit < 0 {
                ".".to_string()
            } else {
                digit.to_string()
            }
        }
    }
}

fn print_grid(grid: &Grid, show_solution: bool) {
    let mut table = Table::new();
    for y in 0..grid.height() {
        let mut row = Vec::with_capacity(grid.width());
        for x in 0..grid.width() {
            let coord = Coordinate::new(x, y);
            row.push(TableCell::new(&cell_text(grid.get(coord), show_solution)));
        }
        table.add_row(Row::new(row));
    }
    table.printstd();
}

fn main() {
    let config = EngineConfig::with_size(8, 8);
    let mut grid = Grid::new(config.width, config.height, config.digit_min, config.digit_max);
    let mut rng = ChaCha8Rng::seed_from_u64(2024);
    generator::generate(&mut grid, Difficulty::Medium, &config, &mut rng);

    println!("Generated 8x8 Medium puzzle (clue \\ down \\ right, . = unsolved):");
    print_grid(&grid, false);

    println!("\nSolution:");
    print_grid(&grid, true);
}
