use terrain_core::{Fbm, FbmParams, NoiseGenerator, Perlin2D, Simplex2D};

fn print_grid<N: NoiseGenerator>(label: &str, generator: &N) {
    println!("{label}");
    // Top-left 12×12 corner, sampled every 0.25 units
    for y in 0..12 {
        for x in 0..12 {
            print!("{:>6.3} ", generator.get2(x as f32 * 0.25, y as f32 * 0.25));
        }
        println!();
    }
    println!();
}

fn main() {
    let seed = 2025;
    print_grid("perlin", &Perlin2D::new(seed));
    print_grid("simplex", &Simplex2D::new(seed));
    print_grid(
        "fbm (6 octaves)",
        &Fbm::new(
            seed,
            FbmParams {
                octaves: 6,
                persistence: 0.5,
                lacunarity: 2.0,
            },
        )
        .unwrap(),
    );
}
