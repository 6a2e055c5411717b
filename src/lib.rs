//! A Kakuro puzzle engine: cell model, grid, validator, generator, and
//! solver. No UI, editor, persistence format, or CLI is part of the core —
//! those are left to collaborators with read/write access to [`Grid`].
//!
//! # Example
//!
//! ```
//! use kakuro_engine::config::EngineConfig;
//! use kakuro_engine::config::Difficulty;
//! use kakuro_engine::grid::Grid;
//! use kakuro_engine::{generator, validator};
//! use rand::SeedableRng;
//! use rand_chacha::ChaCha8Rng;
//!
//! let config = EngineConfig::with_size(6, 6);
//! let mut grid = Grid::new(config.width, config.height, config.digit_min, config.digit_max);
//! let mut rng = ChaCha8Rng::seed_from_u64(42);
//! generator::generate(&mut grid, Difficulty::Medium, &config, &mut rng);
//!
//! validator::reveal(&mut grid).unwrap();
//! assert!(validator::is_won(&mut grid));
//! ```

pub mod cell;
pub mod config;
pub mod error;
pub mod generator;
pub mod grid;
pub mod solver;
pub mod validator;

pub use cell::{Cell, Combo, Coordinate};
pub use config::{Difficulty, EngineConfig};
pub use error::{Error, Result};
pub use grid::Grid;
pub use solver::engine::{confirm_solution, solve, CancellationToken, SolverProgress};
pub use solver::stats::{render_stats_table, SearchStats};
pub use solver::strategy::Strategy;
pub use validator::{is_won, reset, reveal, validate_edit, validate_play, EditOutcome, ValidationOutcome};
