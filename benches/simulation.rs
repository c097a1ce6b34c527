//! Performance benchmarks for WA-TOR

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use wator::{rng, Config, Wator};

fn populated_world(width: usize, height: usize, seed: u64) -> (Wator, rng::SimRng) {
    let mut config = Config::default();
    config.world.width = width;
    config.world.height = height;

    let mut world = Wator::from_config(&config).unwrap();
    let mut rng = rng::seeded(seed);
    let cells = width * height;
    world.initialize(cells / 4, cells / 20, &mut rng);
    (world, rng)
}

fn benchmark_update(c: &mut Criterion) {
    let mut group = c.benchmark_group("update");

    for &(width, height) in [(80, 60), (160, 120), (320, 240)].iter() {
        let (mut world, mut rng) = populated_world(width, height, 42);

        // Warm up into a mixed population
        for _ in 0..20 {
            world.update(&mut rng);
        }

        group.bench_with_input(
            BenchmarkId::new("grid", format!("{}x{}", width, height)),
            &(width, height),
            |b, _| {
                b.iter(|| {
                    world.update(black_box(&mut rng));
                });
            },
        );
    }

    group.finish();
}

fn benchmark_initialize(c: &mut Criterion) {
    let (mut world, mut rng) = populated_world(160, 120, 7);

    c.bench_function("initialize_160x120", |b| {
        b.iter(|| {
            world.initialize(black_box(5000), black_box(1000), &mut rng);
        });
    });
}

criterion_group!(benches, benchmark_update, benchmark_initialize);

criterion_main!(benches);
