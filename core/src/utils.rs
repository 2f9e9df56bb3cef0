use crate::TerrainError;

// 2D scalar field: row-major Vec<Vec<f32>> of size height×width
// access as `map[z][x]`.
pub type HeightMap2D = Vec<Vec<f32>>;

// The 8 gradient directions shared by Perlin and simplex noise.
// Indexed by `hash & 7`.
pub const GRADIENTS_2D: [[f32; 2]; 8] = [
    [1.0, 1.0],
    [-1.0, 1.0],
    [1.0, -1.0],
    [-1.0, -1.0],
    [1.0, 0.0],
    [-1.0, 0.0],
    [0.0, 1.0],
    [0.0, -1.0],
];

// Fade function as defined by Ken Perlin: 6t^5 − 15t^4 + 10t^3
// First and second derivatives are zero at t=0 and t=1,
// so interpolated noise has no creases along grid lines.
#[inline]
pub fn fade(t: f32) -> f32 {
    t * t * t * (t * (t * 6.0 - 15.0) + 10.0)
}

// Linear interpolation
#[inline]
pub fn interpolate(a: f32, b: f32, t: f32) -> f32 {
    a + t * (b - a)
}

// Dot product of gradient `hash & 7` with the offset (dx, dy)
#[inline]
pub(crate) fn grad_dot(hash: u8, dx: f32, dy: f32) -> f32 {
    let g = GRADIENTS_2D[(hash & 7) as usize];
    g[0] * dx + g[1] * dy
}

// Allocate a zeroed width×height field, reporting failure instead of aborting
pub(crate) fn try_height_map(
    width: usize,
    height: usize,
    what: &'static str,
) -> Result<HeightMap2D, TerrainError> {
    let mut map: HeightMap2D = Vec::new();
    map.try_reserve_exact(height)
        .map_err(|_| TerrainError::AllocationFailure { what })?;
    for _ in 0..height {
        let mut row = Vec::new();
        row.try_reserve_exact(width)
            .map_err(|_| TerrainError::AllocationFailure { what })?;
        row.resize(width, 0.0);
        map.push(row);
    }
    Ok(map)
}
