//! The rectangular grid and its run-traversal primitives.
//!
//! Cells live in a single `im::Vector`, row-major by `y * width + x`. Using
//! a persistent vector (rather than a plain `Vec`) gives the solver's
//! forward-checking phase a cheap structural-sharing snapshot/restore
//! around each recursion frame, in place of a deep copy of the whole board.

use im::Vector;

use crate::cell::{Cell, Coordinate};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Right,
    Down,
    Left,
    Up,
}

/// A rectangular board of cells.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vector<Cell>,
    /// True once every `Empty` cell has a known `solution`.
    pub has_solution: bool,
}

impl Grid {
    /// A grid of the given dimensions, filled with fresh `Empty` cells.
    pub fn new(width: usize, height: usize, digit_min: u8, digit_max: u8) -> Self {
        let cells = (0..width * height)
            .map(|_| Cell::empty(digit_min, digit_max))
            .collect();
        Self {
            width,
            height,
            cells,
            has_solution: false,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    fn index(&self, coord: Coordinate) -> usize {
        debug_assert!(
            self.in_bounds(coord),
            "coordinate {:?} out of bounds for {}x{} grid",
            coord,
            self.width,
            self.height
        );
        coord.y * self.width + coord.x
    }

    pub fn in_bounds(&self, coord: Coordinate) -> bool {
        coord.x < self.width && coord.y < self.height
    }

    /// Constant-time coordinate access. Out-of-bounds is a programmer error.
    pub fn get(&self, coord: Coordinate) -> &Cell {
        let idx = self.index(coord);
        &self.cells[idx]
    }

    /// Constant-time coordinate mutation. Out-of-bounds is a programmer error.
    pub fn set(&mut self, coord: Coordinate, cell: Cell) {
        let idx = self.index(coord);
        self.cells.set(idx, cell);
    }

    /// Cheap structural-sharing clone, used by the solver to snapshot state
    /// before a tentative assignment so it can restore on backtrack.
    pub fn snapshot(&self) -> Self {
        self.clone()
    }

    fn neighbor(&self, coord: Coordinate, dir: Direction) -> Option<Coordinate> {
        match dir {
            Direction::Right => {
                let n = coord.right();
                self.in_bounds(n).then_some(n)
            }
            Direction::Down => {
                let n = coord.down();
                self.in_bounds(n).then_some(n)
            }
            Direction::Left => coord.left(),
            Direction::Up => coord.up(),
        }
    }

    fn is_empty_at(&self, coord: Coordinate) -> bool {
        self.in_bounds(coord) && self.get(coord).is_empty_cell()
    }

    /// The ordered sequence of `Empty` cell coordinates starting one step
    /// from `coord` in direction `dir`, stopping at the first non-`Empty`
    /// cell or the grid edge. Restartable: a pure function of
    /// `(grid, coord, direction)`.
    pub fn run(&self, coord: Coordinate, dir: Direction) -> Vec<Coordinate> {
        let mut out = Vec::new();
        let mut cur = coord;
        while let Some(next) = self.neighbor(cur, dir) {
            if !self.is_empty_at(next) {
                break;
            }
            out.push(next);
            cur = next;
        }
        out
    }

    pub fn run_right(&self, coord: Coordinate) -> Vec<Coordinate> {
        self.run(coord, Direction::Right)
    }

    pub fn run_down(&self, coord: Coordinate) -> Vec<Coordinate> {
        self.run(coord, Direction::Down)
    }

    pub fn run_left(&self, coord: Coordinate) -> Vec<Coordinate> {
        self.run(coord, Direction::Left)
    }

    pub fn run_up(&self, coord: Coordinate) -> Vec<Coordinate> {
        self.run(coord, Direction::Up)
    }

    /// Length of the horizontal run owned by the clue at `coord`.
    pub fn run_length_right(&self, coord: Coordinate) -> usize {
        self.run_right(coord).len()
    }

    /// Length of the vertical run owned by the clue at `coord`.
    pub fn run_length_down(&self, coord: Coordinate) -> usize {
        self.run_down(coord).len()
    }

    /// True iff the cell at `coord` is a `Clue` with no `Empty` neighbor
    /// to the right *and* none below (grid edges count as non-`Empty`).
    pub fn is_blocked(&self, coord: Coordinate) -> bool {
        if !self.get(coord).is_clue() {
            return false;
        }
        !self.is_empty_at(coord.right()) && !self.is_empty_at(coord.down())
    }

    /// True iff walking left from `coord` reaches a `Clue` and walking up
    /// from `coord` also reaches a `Clue`, passing only through `Empty`
    /// cells along the way.
    pub fn reachable_by_clue(&self, coord: Coordinate) -> bool {
        self.reaches_clue(coord, Direction::Left) && self.reaches_clue(coord, Direction::Up)
    }

    fn reaches_clue(&self, coord: Coordinate, dir: Direction) -> bool {
        self.clue_in_direction(coord, dir).is_some()
    }

    /// Walks from `coord` in direction `dir` (`Left` or `Up`) through
    /// `Empty` cells until it finds the owning `Clue`, returning its
    /// coordinate. `None` if a `Block` or the grid edge is hit first.
    pub fn clue_in_direction(&self, coord: Coordinate, dir: Direction) -> Option<Coordinate> {
        let mut cur = coord;
        loop {
            let prev = match dir {
                Direction::Left => cur.left(),
                Direction::Up => cur.up(),
                _ => unreachable!("clue_in_direction only walks Left or Up"),
            }?;
            if !self.in_bounds(prev) {
                return None;
            }
            match self.get(prev) {
                Cell::Clue { .. } => return Some(prev),
                Cell::Empty { .. } => cur = prev,
                Cell::Block => return None,
            }
        }
    }

    /// The clue owning `coord`'s horizontal run.
    pub fn clue_left(&self, coord: Coordinate) -> Option<Coordinate> {
        self.clue_in_direction(coord, Direction::Left)
    }

    /// The clue owning `coord`'s vertical run.
    pub fn clue_up(&self, coord: Coordinate) -> Option<Coordinate> {
        self.clue_in_direction(coord, Direction::Up)
    }

    /// All `Empty` cell coordinates, in row-major order.
    pub fn empty_cells(&self) -> Vec<Coordinate> {
        let mut out = Vec::with_capacity(self.width * self.height);
        for y in 0..self.height {
            for x in 0..self.width {
                let coord = Coordinate::new(x, y);
                if self.get(coord).is_empty_cell() {
                    out.push(coord);
                }
            }
        }
        out
    }

    /// All coordinates in row-major order, regardless of variant.
    pub fn coordinates(&self) -> Vec<Coordinate> {
        let mut out = Vec::with_capacity(self.width * self.height);
        for y in 0..self.height {
            for x in 0..self.width {
                out.push(Coordinate::new(x, y));
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn small_grid() -> Grid {
        // . C .
        // C E E
        // . E .
        let mut g = Grid::new(3, 3, 1, 9);
        g.set(Coordinate::new(0, 0), Cell::Block);
        g.set(Coordinate::new(1, 0), Cell::clue(0, 6));
        g.set(Coordinate::new(2, 0), Cell::Block);
        g.set(Coordinate::new(0, 1), Cell::clue(3, 0));
        g.set(Coordinate::new(2, 1), Cell::Block);
        g
    }

    #[test]
    fn run_right_stops_at_block() {
        let g = small_grid();
        let run = g.run_right(Coordinate::new(0, 1));
        assert_eq!(run, vec![Coordinate::new(1, 1)]);
    }

    #[test]
    fn run_down_walks_through_empties() {
        let g = small_grid();
        let run = g.run_down(Coordinate::new(1, 0));
        assert_eq!(run, vec![Coordinate::new(1, 1), Coordinate::new(1, 2)]);
    }

    #[test]
    fn reachable_by_clue_requires_both_directions() {
        let g = small_grid();
        assert!(g.reachable_by_clue(Coordinate::new(1, 1)));
        // (2,2) has no clue above it in this tiny layout (edge), not reachable up.
        assert!(!g.reachable_by_clue(Coordinate::new(2, 2)));
    }

    #[test]
    fn is_blocked_detects_clue_with_no_runs() {
        let mut g = Grid::new(2, 2, 1, 9);
        g.set(Coordinate::new(0, 0), Cell::clue(0, 0));
        assert!(g.is_blocked(Coordinate::new(0, 0)));
    }

    #[test]
    fn snapshot_is_independent_of_original() {
        let g = small_grid();
        let mut snap = g.snapshot();
        snap.set(Coordinate::new(1, 1), Cell::Block);
        assert!(g.get(Coordinate::new(1, 1)).is_empty_cell());
        assert!(snap.get(Coordinate::new(1, 1)).is_block());
    }
}
