//! A single immutable configuration value threaded through generation and
//! solving, in place of scattered global constants.

/// Difficulty tiers the generator can target. Each maps to an approximate
/// number of clue cells left on the board: fewer clues, harder puzzle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
    Expert,
}

impl Difficulty {
    /// The target clue count for this difficulty, read from `config`.
    pub fn clue_count(&self, config: &EngineConfig) -> u32 {
        match self {
            Difficulty::Easy => config.difficulty_clue_counts.easy,
            Difficulty::Medium => config.difficulty_clue_counts.medium,
            Difficulty::Hard => config.difficulty_clue_counts.hard,
            Difficulty::Expert => config.difficulty_clue_counts.expert,
        }
    }
}

/// Target interior clue counts per difficulty tier, for a 10x10 board.
/// Scaled proportionally by the generator for other board sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DifficultyClueCounts {
    pub easy: u32,
    pub medium: u32,
    pub hard: u32,
    pub expert: u32,
}

impl Default for DifficultyClueCounts {
    fn default() -> Self {
        Self {
            easy: 40,
            medium: 30,
            hard: 20,
            expert: 10,
        }
    }
}

/// Geometry and rule constants for the engine.
///
/// Constructed once by the caller and passed by reference to generator and
/// solver entry points. Replaces the "global constants" pattern the source
/// material used for grid geometry, difficulty numbers, and digit bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    pub width: usize,
    pub height: usize,
    pub digit_min: u8,
    pub digit_max: u8,
    pub difficulty_clue_counts: DifficultyClueCounts,
}

impl EngineConfig {
    /// The canonical 10x10 board with digits 1..=9, matching spec.md's
    /// default geometry.
    pub fn standard() -> Self {
        Self {
            width: 10,
            height: 10,
            digit_min: 1,
            digit_max: 9,
            difficulty_clue_counts: DifficultyClueCounts::default(),
        }
    }

    /// A board of the given size, with difficulty clue counts scaled
    /// proportionally from the standard 10x10 table.
    pub fn with_size(width: usize, height: usize) -> Self {
        let base = Self::standard();
        let scale = (width * height) as f64 / (base.width * base.height) as f64;
        let scaled = |n: u32| ((n as f64) * scale).round().max(1.0) as u32;
        Self {
            width,
            height,
            difficulty_clue_counts: DifficultyClueCounts {
                easy: scaled(base.difficulty_clue_counts.easy),
                medium: scaled(base.difficulty_clue_counts.medium),
                hard: scaled(base.difficulty_clue_counts.hard),
                expert: scaled(base.difficulty_clue_counts.expert),
            },
            ..base
        }
    }

    /// Number of distinct digits available, i.e. the longest run a clue
    /// can own.
    pub fn max_run_length(&self) -> usize {
        (self.digit_max - self.digit_min + 1) as usize
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::standard()
    }
}
