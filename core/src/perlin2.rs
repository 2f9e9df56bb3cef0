use crate::NoiseGenerator;
use crate::permutation::PermutationTable;
use crate::utils::{fade, grad_dot, interpolate};

// Classic 2D gradient (Perlin) noise, single octave
#[derive(Clone, Debug)]
pub struct Perlin2D {
    perm: PermutationTable,
}

impl Perlin2D {
    pub fn new(seed: u32) -> Self {
        Self {
            perm: PermutationTable::new(seed),
        }
    }

    pub fn seed(&self) -> u32 {
        self.perm.seed()
    }

    // Dot product between the corner gradient and the offset from that corner
    #[inline]
    fn dot_grid_gradient(&self, ix: i32, iy: i32, x: f32, y: f32) -> f32 {
        let hash = self.perm.hash(ix, iy);
        grad_dot(hash, x - ix as f32, y - iy as f32)
    }

    // Raw Perlin noise at (x, y)
    // Returns roughly [−1, +1], not strictly bounded
    pub fn noise(&self, x: f32, y: f32) -> f32 {
        // Find unit square that contains point
        let x0 = x.floor() as i32;
        let y0 = y.floor() as i32;
        let x1 = x0.wrapping_add(1);
        let y1 = y0.wrapping_add(1);

        // Smoothed position within the square
        let sx = fade(x - x0 as f32);
        let sy = fade(y - y0 as f32);

        // Bottom edge, then top edge, then blend along y
        let n0 = self.dot_grid_gradient(x0, y0, x, y);
        let n1 = self.dot_grid_gradient(x1, y0, x, y);
        let ix0 = interpolate(n0, n1, sx);

        let n0 = self.dot_grid_gradient(x0, y1, x, y);
        let n1 = self.dot_grid_gradient(x1, y1, x, y);
        let ix1 = interpolate(n0, n1, sx);

        interpolate(ix0, ix1, sy)
    }
}

impl NoiseGenerator for Perlin2D {
    fn get2(&self, x: f32, y: f32) -> f32 {
        self.noise(x, y)
    }
}

/// Sample Perlin noise for `seed` at (x, y).
///
/// Builds its own permutation table on every call. Use [`Perlin2D`] to
/// sample many points with the same seed.
pub fn perlin2d(x: f32, y: f32, seed: u32) -> f32 {
    Perlin2D::new(seed).noise(x, y)
}
