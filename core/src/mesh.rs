//! Heightfield mesh builder.
//!
//! Samples a height field and a moisture field over a regular grid, emits one
//! vertex per grid point colored by biome, two triangles per grid quad, and
//! smooth per-vertex normals.

use std::time::{Duration, Instant};

use glam::Vec3;
use tracing::{debug, trace, warn};

use crate::biome::biome_color;
use crate::config::TerrainConfig;
use crate::error::TerrainError;
use crate::fbm::{Fbm, FbmParams};
use crate::utils::{HeightMap2D, try_height_map};

/// Seed offset of the moisture field relative to the height field.
pub const MOISTURE_SEED_OFFSET: u32 = 1000;

/// Fixed octave layout of the moisture field.
pub const MOISTURE_FBM: FbmParams = FbmParams {
    octaves: 3,
    persistence: 0.5,
    lacunarity: 2.0,
};

/// Accumulated normals shorter than this fall back to straight up.
pub const NORMAL_EPSILON: f32 = 1e-4;

/// Triangulated heightfield with per-vertex attributes.
///
/// Attribute buffers are parallel: vertex `i` has `positions()[i]`,
/// `normals()[i]` and `colors()[i]`. Every index is below `vertex_count()`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TerrainMesh {
    positions: Vec<[f32; 3]>,
    normals: Vec<[f32; 3]>,
    colors: Vec<[f32; 3]>,
    indices: Vec<u32>,
}

impl TerrainMesh {
    pub fn positions(&self) -> &[[f32; 3]] {
        &self.positions
    }

    pub fn normals(&self) -> &[[f32; 3]] {
        &self.normals
    }

    pub fn colors(&self) -> &[[f32; 3]] {
        &self.colors
    }

    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    /// Positions as a flat `x, y, z, x, y, z, ...` slice.
    pub fn positions_flat(&self) -> &[f32] {
        bytemuck::cast_slice(&self.positions)
    }

    /// Normals as a flat `x, y, z, ...` slice.
    pub fn normals_flat(&self) -> &[f32] {
        bytemuck::cast_slice(&self.normals)
    }

    /// Colors as a flat `r, g, b, ...` slice.
    pub fn colors_flat(&self) -> &[f32] {
        bytemuck::cast_slice(&self.colors)
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn index_count(&self) -> usize {
        self.indices.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Free every buffer. Calling this again is a no-op.
    pub fn release(&mut self) {
        if self.is_released() {
            return;
        }
        trace!(vertices = self.vertex_count(), "releasing terrain mesh");
        self.positions = Vec::new();
        self.normals = Vec::new();
        self.colors = Vec::new();
        self.indices = Vec::new();
    }

    pub fn is_released(&self) -> bool {
        self.positions.is_empty() && self.indices.is_empty()
    }
}

/// Drop the mesh held in `mesh`, leaving `None`.
///
/// An empty handle, or a handle already freed, is left untouched.
pub fn free_terrain(mesh: &mut Option<TerrainMesh>) {
    if let Some(mut m) = mesh.take() {
        m.release();
    }
}

/// Summary of one generation run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationStats {
    pub vertices: usize,
    pub triangles: usize,
    pub elapsed: Duration,
}

/// Build a terrain mesh for `config`.
///
/// Either returns a complete mesh or an error; no partially built mesh is
/// ever handed back. The same config always yields the same mesh.
pub fn generate_terrain(config: &TerrainConfig) -> Result<TerrainMesh, TerrainError> {
    generate_terrain_with_stats(config).map(|(mesh, _)| mesh)
}

/// [`generate_terrain`] plus vertex/triangle counts and wall time.
pub fn generate_terrain_with_stats(
    config: &TerrainConfig,
) -> Result<(TerrainMesh, GenerationStats), TerrainError> {
    let start = Instant::now();
    let _span = tracing::debug_span!(
        "generate_terrain",
        width = config.width,
        height = config.height,
        seed = config.seed
    )
    .entered();

    if let Err(e) = config.validate() {
        warn!("rejecting terrain config: {e}");
        return Err(e);
    }
    debug!(
        scale = config.scale,
        octaves = config.octaves,
        persistence = config.persistence,
        lacunarity = config.lacunarity,
        "generating terrain"
    );

    let mesh = build_mesh(config).inspect_err(|e| warn!("terrain generation failed: {e}"))?;

    let stats = GenerationStats {
        vertices: mesh.vertex_count(),
        triangles: mesh.triangle_count(),
        elapsed: start.elapsed(),
    };
    debug!(
        vertices = stats.vertices,
        triangles = stats.triangles,
        elapsed_ms = stats.elapsed.as_secs_f64() * 1000.0,
        "terrain generated"
    );
    Ok((mesh, stats))
}

fn build_mesh(config: &TerrainConfig) -> Result<TerrainMesh, TerrainError> {
    let width = config.width as usize;
    let height = config.height as usize;
    let vertex_count = config.vertex_count();

    let mut positions = try_buffer(vertex_count, "vertex positions")?;
    let mut normals = try_buffer(vertex_count, "vertex normals")?;
    let mut colors = try_buffer(vertex_count, "vertex colors")?;
    let mut indices = try_buffer(config.index_count(), "triangle indices")?;

    // Fields only live until the vertices are emitted
    let (height_map, moisture_map) = sample_fields(config)?;
    trace!("sampled height and moisture fields");

    let half_w = width as f32 * 0.5;
    let half_h = height as f32 * 0.5;
    for z in 0..height {
        for x in 0..width {
            let h = height_map[z][x];
            let m = moisture_map[z][x];

            // Grid centered on the origin, Y is up
            positions.push([x as f32 - half_w, h * config.height_multiplier, z as f32 - half_h]);

            let (r, g, b) = biome_color(h, m).into_components();
            colors.push([r, g, b]);
        }
    }
    drop(height_map);
    drop(moisture_map);

    push_grid_indices(&mut indices, config.width, config.height);
    trace!(indices = indices.len(), "emitted triangle indices");

    normals.resize(vertex_count, [0.0; 3]);
    accumulate_normals(&positions, &indices, &mut normals);

    Ok(TerrainMesh {
        positions,
        normals,
        colors,
        indices,
    })
}

/// Sample the normalized height and moisture fields for `config`.
///
/// Both fields are `height` rows of `width` values in roughly [0, 1],
/// indexed `map[z][x]`.
pub fn sample_fields(config: &TerrainConfig) -> Result<(HeightMap2D, HeightMap2D), TerrainError> {
    let width = config.width as usize;
    let height = config.height as usize;

    let height_noise = Fbm::new(config.seed, config.fbm_params())?;
    let moisture_noise = Fbm::new(
        config.seed.wrapping_add(MOISTURE_SEED_OFFSET),
        MOISTURE_FBM,
    )?;

    let mut height_map = try_height_map(width, height, "height field")?;
    let mut moisture_map = try_height_map(width, height, "moisture field")?;

    for z in 0..height {
        for x in 0..width {
            // Normalized grid coordinates in [0, 1)
            let nx = x as f32 / width as f32;
            let nz = z as f32 / height as f32;

            let h = height_noise.sample(nx * config.scale, nz * config.scale);
            let m = moisture_noise.sample(nx * config.scale * 0.5, nz * config.scale * 0.5);

            // Remap [-1, 1] to [0, 1]
            height_map[z][x] = (h + 1.0) * 0.5;
            moisture_map[z][x] = (m + 1.0) * 0.5;
        }
    }

    Ok((height_map, moisture_map))
}

/// Two triangles per grid quad:
/// (top-left, bottom-left, top-right) and (top-right, bottom-left, bottom-right).
fn push_grid_indices(indices: &mut Vec<u32>, width: u32, height: u32) {
    for z in 0..height.saturating_sub(1) {
        for x in 0..width.saturating_sub(1) {
            let top_left = z * width + x;
            let top_right = top_left + 1;
            let bottom_left = (z + 1) * width + x;
            let bottom_right = bottom_left + 1;

            indices.extend_from_slice(&[top_left, bottom_left, top_right]);
            indices.extend_from_slice(&[top_right, bottom_left, bottom_right]);
        }
    }
}

/// Smooth per-vertex normals for an indexed triangle list.
///
/// Each triangle adds its unnormalized face normal `(v1 - v0) × (v2 - v0)`
/// to its three vertices; the sums are then normalized. Vertices whose sum
/// is shorter than [`NORMAL_EPSILON`] get `(0, 1, 0)`. Triangles that
/// reference a missing vertex are skipped.
pub fn compute_normals(positions: &[[f32; 3]], indices: &[u32]) -> Vec<[f32; 3]> {
    let mut normals = vec![[0.0; 3]; positions.len()];
    accumulate_normals(positions, indices, &mut normals);
    normals
}

fn accumulate_normals(positions: &[[f32; 3]], indices: &[u32], normals: &mut [[f32; 3]]) {
    normals.fill([0.0; 3]);

    for tri in indices.chunks_exact(3) {
        let (i0, i1, i2) = (tri[0] as usize, tri[1] as usize, tri[2] as usize);
        let (Some(&p0), Some(&p1), Some(&p2)) =
            (positions.get(i0), positions.get(i1), positions.get(i2))
        else {
            continue;
        };

        let v0 = Vec3::from(p0);
        let edge1 = Vec3::from(p1) - v0;
        let edge2 = Vec3::from(p2) - v0;
        let face_normal = edge1.cross(edge2);

        for i in [i0, i1, i2] {
            normals[i] = (Vec3::from(normals[i]) + face_normal).into();
        }
    }

    for n in normals.iter_mut() {
        let v = Vec3::from(*n);
        let length = v.length();
        *n = if length > NORMAL_EPSILON {
            (v / length).into()
        } else {
            Vec3::Y.into()
        };
    }
}

// Reserve an empty Vec of exactly `len` capacity, reporting failure
fn try_buffer<T>(len: usize, what: &'static str) -> Result<Vec<T>, TerrainError> {
    let mut buf = Vec::new();
    buf.try_reserve_exact(len)
        .map_err(|_| TerrainError::AllocationFailure { what })?;
    Ok(buf)
}
