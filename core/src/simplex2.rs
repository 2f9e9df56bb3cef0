use crate::NoiseGenerator;
use crate::permutation::PermutationTable;
use crate::utils::grad_dot;

// Skewing/Unskewing factors for 2D simplex
const F2: f32 = 0.366_025_403; // (sqrt(3) - 1) / 2, squashes the square grid into a rhombus grid
const G2: f32 = 0.211_324_865; // (3 - sqrt(3)) / 6, reverses the skew

// Empirical factor that brings the corner sum to roughly [-1, 1]
const SCALE: f32 = 70.0;

// 2D Simplex noise generator, single octave
// Simplex divides space into triangles rather than squares,
// which gives fewer axis-aligned artifacts than Perlin noise.
#[derive(Clone, Debug)]
pub struct Simplex2D {
    perm: PermutationTable,
}

impl Simplex2D {
    pub fn new(seed: u32) -> Self {
        Self {
            perm: PermutationTable::new(seed),
        }
    }

    pub fn seed(&self) -> u32 {
        self.perm.seed()
    }

    // Radial falloff contribution of one corner
    #[inline]
    fn corner(hash: u8, x: f32, y: f32) -> f32 {
        let t = 0.5 - x * x - y * y;
        if t < 0.0 {
            0.0
        } else {
            let t_sq = t * t;
            t_sq * t_sq * grad_dot(hash, x, y)
        }
    }

    // Raw 2D simplex noise at (xin, yin)
    pub fn noise(&self, xin: f32, yin: f32) -> f32 {
        // Skew input space to find the simplex cell
        let s = (xin + yin) * F2;
        let i = (xin + s).floor() as i32;
        let j = (yin + s).floor() as i32;

        // Unskew the cell origin back to (x, y) space
        let t = i.wrapping_add(j) as f32 * G2;
        let x0 = xin - (i as f32 - t);
        let y0 = yin - (j as f32 - t);

        // Lower or upper triangle of the rhombus
        let (i1, j1) = if x0 > y0 { (1, 0) } else { (0, 1) };

        // Offsets for the middle and far corners
        let x1 = x0 - i1 as f32 + G2;
        let y1 = y0 - j1 as f32 + G2;
        let x2 = x0 - 1.0 + 2.0 * G2;
        let y2 = y0 - 1.0 + 2.0 * G2;

        // Hash the three corners. Indices stay below 512.
        let ii = (i & 255) as usize;
        let jj = (j & 255) as usize;
        let p = &self.perm;
        let gi0 = p.get(ii + p.get(jj) as usize);
        let gi1 = p.get(ii + i1 + p.get(jj + j1) as usize);
        let gi2 = p.get(ii + 1 + p.get(jj + 1) as usize);

        let n0 = Self::corner(gi0, x0, y0);
        let n1 = Self::corner(gi1, x1, y1);
        let n2 = Self::corner(gi2, x2, y2);

        SCALE * (n0 + n1 + n2)
    }
}

impl NoiseGenerator for Simplex2D {
    fn get2(&self, x: f32, y: f32) -> f32 {
        self.noise(x, y)
    }
}

/// Sample simplex noise for `seed` at (x, y).
///
/// Builds its own permutation table on every call. Use [`Simplex2D`] to
/// sample many points with the same seed.
pub fn simplex2d(x: f32, y: f32, seed: u32) -> f32 {
    Simplex2D::new(seed).noise(x, y)
}
