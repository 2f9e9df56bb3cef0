// core holds the noise engine, biome classifier and heightfield mesh builder
pub mod biome;
pub mod config;
pub mod error;
pub mod fbm;
pub mod mesh;
pub mod perlin2;
pub mod permutation;
pub mod simplex2;
pub mod utils;

pub use biome::{Biome, biome_color};
pub use config::{PresetParams, TerrainConfig, TerrainPreset};
pub use error::{ConfigError, TerrainError};
pub use fbm::{Fbm, FbmParams, MAX_OCTAVES, fbm};
pub use mesh::{
    GenerationStats, TerrainMesh, compute_normals, free_terrain, generate_terrain,
    generate_terrain_with_stats,
};
pub use perlin2::{Perlin2D, perlin2d};
pub use permutation::PermutationTable;
pub use simplex2::{Simplex2D, simplex2d};
pub use utils::{GRADIENTS_2D, fade, interpolate};

// Seeded 2D noise source.
// Every implementation owns its permutation tables, so sampling has no
// side effects and generators can be shared across threads.
pub trait NoiseGenerator {
    // Sample at (x, y)
    fn get2(&self, x: f32, y: f32) -> f32;
}
