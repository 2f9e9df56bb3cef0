use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

// Seeded permutation table shared by the gradient noise generators.
// Each generator owns its own copy, so different seeds never interfere.
#[derive(Clone, PartialEq, Eq)]
pub struct PermutationTable {
    seed: u32,
    perm: [u8; 512], // 256 shuffled entries, duplicated
}

impl PermutationTable {
    pub fn new(seed: u32) -> Self {
        // Start from the identity 0..=255
        let mut p = [0u8; 256];
        for (i, v) in p.iter_mut().enumerate() {
            *v = i as u8;
        }

        // Fisher–Yates from the top index down: j is drawn from [0..=i]
        let mut rng = ChaCha8Rng::seed_from_u64(u64::from(seed));
        for i in (1..256).rev() {
            let j = (rng.next_u32() as usize) % (i + 1);
            p.swap(i, j);
        }

        // Duplicate into 512 entries so `perm[a + b]` never needs a modulo
        let mut perm = [0u8; 512];
        for i in 0..512 {
            perm[i] = p[i & 255];
        }

        Self { seed, perm }
    }

    pub fn seed(&self) -> u32 {
        self.seed
    }

    // Raw lookup. `i` must be < 512.
    #[inline]
    pub(crate) fn get(&self, i: usize) -> u8 {
        self.perm[i]
    }

    // Corner hash for integer lattice point (ix, iy)
    #[inline]
    pub fn hash(&self, ix: i32, iy: i32) -> u8 {
        let a = self.perm[(ix & 255) as usize] as usize;
        self.perm[a + (iy & 255) as usize]
    }
}

impl std::fmt::Debug for PermutationTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PermutationTable")
            .field("seed", &self.seed)
            .finish_non_exhaustive()
    }
}
