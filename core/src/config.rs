//! Terrain generation parameters, named presets and RON persistence.

use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, TerrainError};
use crate::fbm::{FbmParams, MAX_OCTAVES};

/// Parameters for one call to [`generate_terrain`](crate::generate_terrain).
///
/// A plain value: copied into the generator, never retained by it.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TerrainConfig {
    /// Grid vertices along X. At least 2.
    pub width: u32,
    /// Grid vertices along Z. At least 2.
    pub height: u32,
    /// Noise-space extent covered by the grid. Must be positive.
    pub scale: f32,
    /// World-space height of a sample at normalized height 1.0.
    /// Zero flattens the terrain.
    pub height_multiplier: f32,
    /// Number of fBm octaves for the height field. 1 to `MAX_OCTAVES`.
    pub octaves: u32,
    /// Amplitude multiplier between octaves.
    pub persistence: f32,
    /// Frequency multiplier between octaves.
    pub lacunarity: f32,
    /// Seed for the height field. The moisture field uses `seed + 1000`.
    pub seed: u32,
    /// Normalized sea level. Not used by generation; carried for consumers
    /// that draw a water plane.
    pub water_level: f32,
}

impl Default for TerrainConfig {
    fn default() -> Self {
        Self {
            width: 128,
            height: 128,
            scale: 4.0,
            height_multiplier: 30.0,
            octaves: 6,
            persistence: 0.5,
            lacunarity: 2.0,
            seed: 12345,
            water_level: 0.3,
        }
    }
}

impl TerrainConfig {
    /// Octave layout of the height field.
    pub fn fbm_params(&self) -> FbmParams {
        FbmParams {
            octaves: self.octaves,
            persistence: self.persistence,
            lacunarity: self.lacunarity,
        }
    }

    /// Number of vertices the generated mesh will have.
    pub fn vertex_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Number of indices the generated mesh will have.
    pub fn index_count(&self) -> usize {
        (self.width.saturating_sub(1) as usize) * (self.height.saturating_sub(1) as usize) * 6
    }

    /// Reject configs that cannot produce a well-formed mesh.
    ///
    /// Persistence, lacunarity and height multiplier are not checked.
    pub fn validate(&self) -> Result<(), TerrainError> {
        if self.width < 2 || self.height < 2 {
            return Err(TerrainError::InvalidConfig(format!(
                "grid must be at least 2x2, got {}x{}",
                self.width, self.height
            )));
        }
        if self.octaves < 1 || self.octaves > MAX_OCTAVES {
            return Err(TerrainError::InvalidConfig(format!(
                "octaves must be in 1..={MAX_OCTAVES}, got {}",
                self.octaves
            )));
        }
        if !self.scale.is_finite() || self.scale <= 0.0 {
            return Err(TerrainError::InvalidConfig(format!(
                "scale must be positive and finite, got {}",
                self.scale
            )));
        }
        // Indices are u32
        if u64::from(self.width) * u64::from(self.height) > u64::from(u32::MAX) {
            return Err(TerrainError::InvalidConfig(format!(
                "grid {}x{} has too many vertices for 32-bit indices",
                self.width, self.height
            )));
        }
        Ok(())
    }

    /// Overwrite the shape parameters with those of `preset`.
    ///
    /// Grid size, seed and water level are kept.
    pub fn with_preset(mut self, preset: TerrainPreset) -> Self {
        let p = preset.params();
        self.scale = p.scale;
        self.height_multiplier = p.height_multiplier;
        self.octaves = p.octaves;
        self.persistence = p.persistence;
        self.lacunarity = p.lacunarity;
        self
    }

    /// Same config with a freshly drawn seed.
    pub fn with_random_seed(mut self) -> Self {
        self.seed = rand::random();
        self
    }

    pub fn from_ron_str(s: &str) -> Result<Self, ConfigError> {
        ron::from_str(s).map_err(ConfigError::ParseError)
    }

    pub fn to_ron_string(&self) -> Result<String, ConfigError> {
        let pretty = ron::ser::PrettyConfig::new();
        ron::ser::to_string_pretty(self, pretty).map_err(ConfigError::SerializeError)
    }

    /// Load a config from a RON file. Missing fields take their defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(ConfigError::ReadError)?;
        Self::from_ron_str(&contents)
    }

    /// Write this config to `path` as pretty RON, creating parent dirs.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(ConfigError::WriteError)?;
        }
        let contents = self.to_ron_string()?;
        std::fs::write(path, contents).map_err(ConfigError::WriteError)
    }
}

/// Named terrain styles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TerrainPreset {
    Mountains,
    Hills,
    Plains,
    Islands,
    Desert,
    Canyon,
}

/// Shape parameters a preset sets.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PresetParams {
    pub scale: f32,
    pub height_multiplier: f32,
    pub octaves: u32,
    pub persistence: f32,
    pub lacunarity: f32,
}

impl TerrainPreset {
    pub const ALL: [TerrainPreset; 6] = [
        TerrainPreset::Mountains,
        TerrainPreset::Hills,
        TerrainPreset::Plains,
        TerrainPreset::Islands,
        TerrainPreset::Desert,
        TerrainPreset::Canyon,
    ];

    pub fn name(self) -> &'static str {
        match self {
            TerrainPreset::Mountains => "mountains",
            TerrainPreset::Hills => "hills",
            TerrainPreset::Plains => "plains",
            TerrainPreset::Islands => "islands",
            TerrainPreset::Desert => "desert",
            TerrainPreset::Canyon => "canyon",
        }
    }

    pub fn params(self) -> PresetParams {
        let (scale, height_multiplier, octaves, persistence, lacunarity) = match self {
            TerrainPreset::Mountains => (4.0, 50.0, 8, 0.5, 2.0),
            TerrainPreset::Hills => (6.0, 20.0, 5, 0.5, 2.0),
            TerrainPreset::Plains => (8.0, 10.0, 3, 0.4, 2.0),
            TerrainPreset::Islands => (5.0, 30.0, 6, 0.55, 2.2),
            TerrainPreset::Desert => (7.0, 15.0, 4, 0.4, 2.5),
            TerrainPreset::Canyon => (3.0, 60.0, 7, 0.6, 2.0),
        };
        PresetParams {
            scale,
            height_multiplier,
            octaves,
            persistence,
            lacunarity,
        }
    }
}

impl FromStr for TerrainPreset {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TerrainPreset::ALL
            .into_iter()
            .find(|p| p.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| ConfigError::UnknownPreset(s.to_string()))
    }
}

impl std::fmt::Display for TerrainPreset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
