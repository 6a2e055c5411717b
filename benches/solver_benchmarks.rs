use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use kakuro_engine::config::EngineConfig;
use kakuro_engine::config::Difficulty;
use kakuro_engine::generator;
use kakuro_engine::grid::Grid;
use kakuro_engine::solver::engine::{self, CancellationToken};
use kakuro_engine::solver::strategy::Strategy;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn generated_grid(size: usize, seed: u64) -> Grid {
    let config = EngineConfig::with_size(size, size);
    let mut grid = Grid::new(config.width, config.height, config.digit_min, config.digit_max);
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    generator::generate(&mut grid, Difficulty::Medium, &config, &mut rng);
    // The generator never touches `assigned`, so every Empty cell is still
    // unset here: re-solving this grid does the solver's real work rather
    // than replaying a cached answer.
    grid
}

fn strategy_comparison(c: &mut Criterion) {
    let mut group = c.benchmark_group("Kakuro strategies, 8x8");
    let config = EngineConfig::with_size(8, 8);
    let template = generated_grid(8, 1);

    for strategy in [Strategy::Slow, Strategy::Medium, Strategy::Fast] {
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{strategy:?}")),
            &strategy,
            |b, &strategy| {
                b.iter(|| {
                    let mut grid = template.snapshot();
                    let mut rng = ChaCha8Rng::seed_from_u64(2);
                    let token = CancellationToken::new();
                    let result = engine::solve(
                        black_box(&mut grid),
                        strategy,
                        &config,
                        &mut rng,
                        &token,
                        None,
                    );
                    assert!(result.is_ok());
                });
            },
        );
    }
    group.finish();
}

fn grid_size_scaling(c: &mut Criterion) {
    let mut group = c.benchmark_group("Fast strategy by grid size");

    for size in [4, 8, 12].iter() {
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, &size| {
            let config = EngineConfig::with_size(size, size);
            let template = generated_grid(size, 3);
            b.iter(|| {
                let mut grid = template.snapshot();
                let mut rng = ChaCha8Rng::seed_from_u64(4);
                let token = CancellationToken::new();
                let result = engine::solve(
                    black_box(&mut grid),
                    Strategy::Fast,
                    &config,
                    &mut rng,
                    &token,
                    None,
                );
                assert!(result.is_ok());
            });
        });
    }
    group.finish();
}

criterion_group!(benches, strategy_comparison, grid_size_scaling);
criterion_main!(benches);
