#![allow(missing_docs)]
//! Benchmarks for texture compositing and cloud volume generation.

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::hint::black_box;

use kiln_core::material::Catalog;
use kiln_core::texture_batch::TextureBatch;
use kiln_core::volume::generate_cloud_volume;

fn bench_cloud_volume(c: &mut Criterion) {
    let mut group = c.benchmark_group("cloud_volume");
    group.sample_size(10);

    for size in [16usize, 32] {
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &size| {
            b.iter(|| black_box(generate_cloud_volume(size)));
        });
    }

    group.finish();
}

fn bench_textures(c: &mut Criterion) {
    let Ok(catalog) = Catalog::builtin() else {
        return;
    };
    let batch = TextureBatch::new(12345);
    let mut group = c.benchmark_group("texture");

    for name in ["grass", "stone", "sand", "diamond_block", "iron_block", "lava"] {
        let Some(material) = catalog.get(name) else {
            continue;
        };
        group.bench_function(name, |b| b.iter(|| black_box(batch.render(material))));
    }

    group.finish();
}

criterion_group!(benches, bench_cloud_volume, bench_textures);
criterion_main!(benches);
