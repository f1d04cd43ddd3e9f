use criterion::{BatchSize, BenchmarkId, Criterion, criterion_group, criterion_main};
use sapper_core::*;
use std::hint::black_box;

fn center(config: BoardConfig) -> Coord2 {
    (config.width / 2, config.height / 2)
}

fn bench_random_placement(c: &mut Criterion) {
    let mut group = c.benchmark_group("gen/random");
    for difficulty in Difficulty::ALL {
        let config = difficulty.config();
        group.bench_with_input(
            BenchmarkId::from_parameter(difficulty),
            &config,
            |bch, &config| {
                let mut seed = 0;
                bch.iter_batched(
                    || {
                        seed += 1;
                        (Grid::new(config.size()), RandomMinefieldGenerator::new(seed))
                    },
                    |(mut grid, mut generator)| {
                        let report = generator
                            .generate(&mut grid, center(config), config.mines)
                            .unwrap();
                        black_box((grid, report))
                    },
                    BatchSize::SmallInput,
                )
            },
        );
    }
    group.finish();
}

fn bench_no_guess(c: &mut Criterion) {
    let mut group = c.benchmark_group("gen/no_guess");
    group.sample_size(20);
    for difficulty in Difficulty::ALL {
        let config = difficulty.config();
        group.bench_with_input(
            BenchmarkId::from_parameter(difficulty),
            &config,
            |bch, &config| {
                let mut seed = 0;
                bch.iter_batched(
                    || {
                        seed += 1;
                        (Grid::new(config.size()), NoGuessMinefieldGenerator::new(seed))
                    },
                    |(mut grid, mut generator)| {
                        let report = generator
                            .generate(&mut grid, center(config), config.mines)
                            .unwrap();
                        black_box((grid, report))
                    },
                    BatchSize::SmallInput,
                )
            },
        );
    }
    group.finish();
}

fn bench_validate(c: &mut Criterion) {
    let mut group = c.benchmark_group("validate");
    for difficulty in Difficulty::ALL {
        let config = difficulty.config();
        let grids: Vec<Grid> = (0..16)
            .map(|seed| {
                let mut grid = Grid::new(config.size());
                RandomMinefieldGenerator::new(seed)
                    .generate(&mut grid, center(config), config.mines)
                    .unwrap();
                grid
            })
            .collect();

        group.bench_with_input(
            BenchmarkId::from_parameter(difficulty),
            &grids,
            |bch, grids| {
                bch.iter(|| {
                    let mut accepted = 0u32;
                    for grid in grids {
                        if validate_layout(grid, center(config)).unwrap().accepted {
                            accepted += 1;
                        }
                    }
                    black_box(accepted)
                })
            },
        );
    }
    group.finish();
}

criterion_group!(benches, bench_random_placement, bench_no_guess, bench_validate);
criterion_main!(benches);
