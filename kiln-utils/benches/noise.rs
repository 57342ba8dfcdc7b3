#![allow(missing_docs)]
//! Benchmarks for the noise primitives.

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::hint::black_box;

use kiln_utils::noise::{perlin_noise_2d, perlin_noise_3d, worley_noise_3d};
use kiln_utils::random::xoroshiro::Xoroshiro;

const SEED: u64 = 12345;

fn bench_value_noise_2d(c: &mut Criterion) {
    let mut group = c.benchmark_group("value_noise_2d");

    for octaves in [2u32, 4, 6] {
        group.bench_with_input(
            BenchmarkId::new("tile_32", octaves),
            &octaves,
            |b, &octaves| {
                let mut random = Xoroshiro::from_seed(SEED);
                b.iter(|| {
                    black_box(perlin_noise_2d(
                        &mut random,
                        32,
                        32,
                        black_box(0.3),
                        octaves,
                    ));
                });
            },
        );
    }

    group.finish();
}

fn bench_point_samples(c: &mut Criterion) {
    c.bench_function("smooth_noise_3d_sample", |b| {
        b.iter(|| black_box(perlin_noise_3d(black_box(1.3), black_box(2.7), black_box(0.4))));
    });

    c.bench_function("worley_noise_3d_sample", |b| {
        b.iter(|| black_box(worley_noise_3d(black_box(1.3), black_box(0.7), black_box(0.4))));
    });

    // One 16³ slab: 4096 blended samples, the volume generator's inner loop
    c.bench_function("cloud_slab_16", |b| {
        b.iter(|| {
            let mut total = 0.0;
            for z in 0..16 {
                for y in 0..16 {
                    for x in 0..16 {
                        let nx = f64::from(x) / 128.0;
                        let ny = f64::from(y) / 128.0;
                        let nz = f64::from(z) / 128.0;
                        total += perlin_noise_3d(nx * 4.0, ny * 4.0, nz * 4.0) * 0.6
                            + worley_noise_3d(nx * 2.0, ny * 2.0, nz * 2.0) * 0.4;
                    }
                }
            }
            black_box(total);
        });
    });
}

criterion_group!(benches, bench_value_noise_2d, bench_point_samples);
criterion_main!(benches);
