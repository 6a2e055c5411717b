//! Generate-then-solve round trip driven from the command line, in the
//! shape of the teacher crate's `degrees_of_separation` demo: a `clap`
//! argument struct, a seeded RNG for reproducibility, and a stats summary
//! printed at the end.

use clap::Parser;
use kakuro_engine::config::{Difficulty, EngineConfig};
use kakuro_engine::grid::Grid;
use kakuro_engine::solver::engine::{self, CancellationToken};
use kakuro_engine::solver::strategy::Strategy;
use kakuro_engine::{generator, validator};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(long, default_value_t = 10)]
    width: usize,

    #[arg(long, default_value_t = 10)]
    height: usize,

    /// easy | medium | hard | expert
    #[arg(long, default_value = "medium")]
    difficulty: String,

    /// slow | medium | fast
    #[arg(long, default_value = "fast")]
    strategy: String,

    #[arg(long, default_value_t = 1)]
    seed: u64,
}

fn parse_difficulty(s: &str) -> Difficulty {
    match s.to_lowercase().as_str() {
        "easy" => Difficulty::Easy,
        "medium" => Difficulty::Medium,
        "hard" => Difficulty::Hard,
        "expert" => Difficulty::Expert,
        other => panic!("unknown difficulty {other:?}; expected easy|medium|hard|expert"),
    }
}

fn parse_strategy(s: &str) -> Strategy {
    match s.to_lowercase().as_str() {
        "slow" => Strategy::Slow,
        "medium" => Strategy::Medium,
        "fast" => Strategy::Fast,
        other => panic!("unknown strategy {other:?}; expected slow|medium|fast"),
    }
}

fn main() {
    tracing_subscriber::fmt::init();

    let args = Args::parse();
    let difficulty = parse_difficulty(&args.difficulty);
    let strategy = parse_strategy(&args.strategy);

    let config = EngineConfig::with_size(args.width, args.height);
    let mut grid = Grid::new(config.width, config.height, config.digit_min, config.digit_max);
    let mut rng = ChaCha8Rng::seed_from_u64(args.seed);
    generator::generate(&mut grid, difficulty, &config, &mut rng);

    println!(
        "Generated a {}x{} {:?} puzzle (seed {}).",
        config.width, config.height, difficulty, args.seed
    );

    // `reset` only clears `assigned`/domains, not `solution` — the solver
    // never reads `solution`, so this still makes it do real search work,
    // the same as a puzzle loaded fresh from a file with no solution set.
    validator::reset(&mut grid, &config);

    let token = CancellationToken::new();
    match engine::solve(&mut grid, strategy, &config, &mut rng, &token, None) {
        Ok(stats) => {
            engine::confirm_solution(&mut grid);
            println!("Solved with strategy {strategy:?}.");
            println!("{}", kakuro_engine::render_stats_table(&stats));
            validator::reveal(&mut grid).expect("solve just stored a fresh solution");
            println!(
                "is_won after reveal: {}",
                validator::is_won(&mut grid)
            );
        }
        Err(err) => {
            eprintln!("solve failed: {err}");
            std::process::exit(1);
        }
    }
}
