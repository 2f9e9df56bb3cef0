use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use terrain_core::{
    Fbm, FbmParams, NoiseGenerator, Perlin2D, Simplex2D, TerrainConfig, compute_normals,
    generate_terrain,
};

const SIZE: u32 = 128;
const SEED: u32 = 2025;

// Sample a SIZE×SIZE grid over [0, 4) in both axes
fn sample_grid<N: NoiseGenerator>(generator: &N) -> f32 {
    let mut sum = 0.0;
    for y in 0..SIZE {
        for x in 0..SIZE {
            let nx = x as f32 / SIZE as f32 * 4.0;
            let ny = y as f32 / SIZE as f32 * 4.0;
            sum += generator.get2(nx, ny);
        }
    }
    sum
}

fn bench_perlin2_plain(c: &mut Criterion) {
    let perlin = Perlin2D::new(SEED);
    c.bench_function("Perlin2D 128x128 grid", |b| {
        b.iter(|| black_box(sample_grid(&perlin)))
    });
}

fn bench_simplex_plain(c: &mut Criterion) {
    let simplex = Simplex2D::new(SEED);
    c.bench_function("Simplex2D 128x128 grid", |b| {
        b.iter(|| black_box(sample_grid(&simplex)))
    });
}

fn bench_fbm(c: &mut Criterion) {
    let fbm = Fbm::new(
        SEED,
        FbmParams {
            octaves: 6,
            persistence: 0.5,
            lacunarity: 2.0,
        },
    )
    .unwrap();
    c.bench_function("Fbm (6 octaves) 128x128 grid", |b| {
        b.iter(|| black_box(sample_grid(&fbm)))
    });
}

fn bench_generate_terrain(c: &mut Criterion) {
    let config = TerrainConfig {
        width: SIZE,
        height: SIZE,
        seed: SEED,
        ..TerrainConfig::default()
    };
    c.bench_function("generate_terrain 128x128", |b| {
        b.iter(|| black_box(generate_terrain(black_box(&config)).unwrap()))
    });
}

fn bench_normals(c: &mut Criterion) {
    let config = TerrainConfig {
        width: SIZE,
        height: SIZE,
        seed: SEED,
        ..TerrainConfig::default()
    };
    let mesh = generate_terrain(&config).unwrap();
    c.bench_function("compute_normals 128x128", |b| {
        b.iter(|| black_box(compute_normals(mesh.positions(), mesh.indices())))
    });
}

criterion_group!(
    terrain_benchmarks,
    bench_perlin2_plain,
    bench_simplex_plain,
    bench_fbm,
    bench_generate_terrain,
    bench_normals
);
criterion_main!(terrain_benchmarks);
