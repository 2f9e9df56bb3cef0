use std::borrow::Borrow;

use serde::{Deserialize, Serialize};

use crate::NoiseGenerator;
use crate::error::TerrainError;
use crate::simplex2::Simplex2D;

// Upper bound on octaves a generator will hold tables for.
// Past this, f32 frequencies overflow for any useful lacunarity.
pub const MAX_OCTAVES: u32 = 32;

// Octave layout for fractal Brownian motion
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct FbmParams {
    pub octaves: u32,     // number of simplex layers to sum
    pub persistence: f32, // amplitude multiplier per octave
    pub lacunarity: f32,  // frequency multiplier per octave
}

impl Default for FbmParams {
    fn default() -> Self {
        Self {
            octaves: 3,
            persistence: 0.5,
            lacunarity: 2.0,
        }
    }
}

// Multi-octave simplex noise.
// Octave `i` samples its own table seeded with `seed + i`,
// so layers look independent of each other.
#[derive(Clone, Debug)]
pub struct Fbm {
    layers: Vec<Simplex2D>,
    persistence: f32,
    lacunarity: f32,
}

impl Fbm {
    // Fails with InvalidConfig above MAX_OCTAVES, or AllocationFailure
    // if the octave tables cannot be reserved.
    pub fn new(seed: u32, params: FbmParams) -> Result<Self, TerrainError> {
        if params.octaves > MAX_OCTAVES {
            return Err(TerrainError::InvalidConfig(format!(
                "octaves must be at most {MAX_OCTAVES}, got {}",
                params.octaves
            )));
        }
        let mut layers = Vec::new();
        layers
            .try_reserve_exact(params.octaves as usize)
            .map_err(|_| TerrainError::AllocationFailure {
                what: "octave tables",
            })?;
        layers.extend((0..params.octaves).map(|i| Simplex2D::new(seed.wrapping_add(i))));
        Ok(Self {
            layers,
            persistence: params.persistence,
            lacunarity: params.lacunarity,
        })
    }

    pub fn octaves(&self) -> u32 {
        self.layers.len() as u32
    }

    pub fn sample(&self, x: f32, y: f32) -> f32 {
        // Zero octaves would be 0/0
        if self.layers.is_empty() {
            return 0.0;
        }
        fractal_sum(&self.layers, x, y, self.persistence, self.lacunarity)
    }
}

impl NoiseGenerator for Fbm {
    fn get2(&self, x: f32, y: f32) -> f32 {
        self.sample(x, y)
    }
}

// Weighted octave sum normalized by the summed weights. `layers` must not be empty.
fn fractal_sum<L: Borrow<Simplex2D>>(
    layers: impl IntoIterator<Item = L>,
    x: f32,
    y: f32,
    persistence: f32,
    lacunarity: f32,
) -> f32 {
    let mut total = 0.0; // Accumulated noise value
    let mut frequency = 1.0; // How zoomed in we are on the noise pattern
    let mut amplitude = 1.0; // Weight of the current octave
    let mut max_value = 0.0; // Sum of weights, for normalization

    for layer in layers {
        total += layer.borrow().noise(x * frequency, y * frequency) * amplitude;
        max_value += amplitude;
        amplitude *= persistence;
        frequency *= lacunarity;
    }

    // Normalize to roughly [-1, 1] whatever the octave count
    total / max_value
}

/// Fractal Brownian motion over simplex noise.
///
/// Sums `octaves` layers of [`simplex2d`](crate::simplex2d), starting at
/// frequency 1 and amplitude 1, scaling by `lacunarity` and `persistence`
/// after every layer, and divides by the summed amplitude. Layer `i` uses
/// seed `seed + i` (wrapping). Returns `0.0` when `octaves` is zero.
///
/// Tables are built one octave at a time and dropped, so memory stays
/// constant whatever `octaves` is. `persistence` and `lacunarity` are not
/// validated.
pub fn fbm(x: f32, y: f32, octaves: u32, persistence: f32, lacunarity: f32, seed: u32) -> f32 {
    if octaves == 0 {
        return 0.0;
    }
    let layers = (0..octaves).map(|i| Simplex2D::new(seed.wrapping_add(i)));
    fractal_sum(layers, x, y, persistence, lacunarity)
}
