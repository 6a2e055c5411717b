//! The cell model: a closed tagged variant replacing the source's
//! dynamically-typed, downcast-based cell representation.

use im::HashSet;
use serde::{Deserialize, Serialize};

/// A grid coordinate. `x` is the column (increases rightward), `y` is the
/// row (increases downward). Upper-left is `(0, 0)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Coordinate {
    pub x: usize,
    pub y: usize,
}

impl Coordinate {
    pub fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    pub fn right(self) -> Self {
        Self::new(self.x + 1, self.y)
    }

    pub fn down(self) -> Self {
        Self::new(self.x, self.y + 1)
    }

    pub fn left(self) -> Option<Self> {
        self.x.checked_sub(1).map(|x| Self::new(x, self.y))
    }

    pub fn up(self) -> Option<Self> {
        self.y.checked_sub(1).map(|y| Self::new(self.x, y))
    }
}

/// Sentinel used for "unknown"/"unassigned" digit slots, matching the
/// source's use of -1 for the same purpose.
pub const UNSET: i8 = -1;

/// A candidate decomposition of a clue's sum into distinct digits: a sorted
/// multiset of length equal to the owning run's length.
pub type Combo = Vec<u8>;

/// A grid cell. Equality is structural, per spec.md §4.A: two `Empty` cells
/// compare equal iff `solution`, `assigned`, and `domain` all match; two
/// `Clue`s iff both sums match; all `Block`s are equal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Cell {
    /// A structural wall. Owns no run, carries no state.
    Block,
    /// Annotates the sum of the run(s) starting immediately right/below.
    /// A sum of 0 means "no run in that direction".
    Clue {
        sum_right: u32,
        sum_down: u32,
        #[serde(default)]
        err_right: bool,
        #[serde(default)]
        err_down: bool,
        #[serde(default)]
        combos_right: Vec<Combo>,
        #[serde(default)]
        combos_down: Vec<Combo>,
    },
    /// A playable digit slot.
    Empty {
        solution: i8,
        assigned: i8,
        domain: HashSet<u8>,
        #[serde(default)]
        degree: u32,
        #[serde(default)]
        err: bool,
    },
}

impl Cell {
    /// A fresh clue with the given sums and no combos computed yet.
    pub fn clue(sum_right: u32, sum_down: u32) -> Self {
        Cell::Clue {
            sum_right,
            sum_down,
            err_right: false,
            err_down: false,
            combos_right: Vec::new(),
            combos_down: Vec::new(),
        }
    }

    /// A fresh empty cell with no solution or assignment and a full domain
    /// over `[digit_min, digit_max]`.
    pub fn empty(digit_min: u8, digit_max: u8) -> Self {
        Cell::Empty {
            solution: UNSET,
            assigned: UNSET,
            domain: (digit_min..=digit_max).collect(),
            degree: 0,
            err: false,
        }
    }

    pub fn is_block(&self) -> bool {
        matches!(self, Cell::Block)
    }

    pub fn is_clue(&self) -> bool {
        matches!(self, Cell::Clue { .. })
    }

    pub fn is_empty_cell(&self) -> bool {
        matches!(self, Cell::Empty { .. })
    }

    pub fn as_empty(&self) -> Option<(i8, i8, &HashSet<u8>)> {
        match self {
            Cell::Empty {
                solution,
                assigned,
                domain,
                ..
            } => Some((*solution, *assigned, domain)),
            _ => None,
        }
    }

    pub fn assigned_digit(&self) -> Option<i8> {
        match self {
            Cell::Empty { assigned, .. } if *assigned != UNSET => Some(*assigned),
            _ => None,
        }
    }

    pub fn solution_digit(&self) -> Option<i8> {
        match self {
            Cell::Empty { solution, .. } if *solution != UNSET => Some(*solution),
            _ => None,
        }
    }
}
