use palette::LinSrgb;

// Height band edges. Bands are hard-edged: no blending across them.
pub const WATER_THRESHOLD: f32 = 0.30;
pub const BEACH_THRESHOLD: f32 = 0.35;
pub const GRASS_THRESHOLD: f32 = 0.65;
pub const MOUNTAIN_THRESHOLD: f32 = 0.80;

// Moisture splits inside the grass and mountain bands
const FOREST_MOISTURE: f32 = 0.5;
const DESERT_MOISTURE: f32 = 0.3;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Biome {
    Water,
    Beach,
    Forest,
    Grass,
    Desert,
    Rock,
    Snow,
}

impl Biome {
    // Classify a (height, moisture) pair, both nominally in [0, 1]
    pub fn classify(height: f32, moisture: f32) -> Self {
        match height {
            h if h < WATER_THRESHOLD => Biome::Water,
            h if h < BEACH_THRESHOLD => Biome::Beach,
            h if h < GRASS_THRESHOLD => {
                if moisture > FOREST_MOISTURE {
                    Biome::Forest
                } else {
                    Biome::Grass
                }
            }
            h if h < MOUNTAIN_THRESHOLD => {
                if moisture < DESERT_MOISTURE {
                    Biome::Desert
                } else {
                    Biome::Rock
                }
            }
            _ => Biome::Snow,
        }
    }

    // Vertex color for this biome at the given height and moisture
    pub fn color(self, height: f32, moisture: f32) -> LinSrgb {
        let (h, m) = (height, moisture);
        match self {
            // deeper water is darker
            Biome::Water => LinSrgb::new(0.1 + h * 0.3, 0.3 + h * 0.5, 0.8),
            Biome::Beach => LinSrgb::new(0.9, 0.85, 0.6),
            Biome::Forest => LinSrgb::new(0.1 + m * 0.1, 0.4 + m * 0.2, 0.1),
            Biome::Grass => LinSrgb::new(0.3 + m * 0.2, 0.6 + m * 0.2, 0.2),
            Biome::Desert => LinSrgb::new(0.7 + h * 0.2, 0.6 + h * 0.1, 0.3),
            Biome::Rock => LinSrgb::new(0.5, 0.5, 0.5),
            Biome::Snow => {
                // gray at the snow line, white towards 1.0
                let blend = (h - MOUNTAIN_THRESHOLD) / 0.2;
                let v = 0.5 + blend * 0.4;
                LinSrgb::new(v, v, v)
            }
        }
    }
}

/// Biome color for a vertex at `height` with `moisture`.
pub fn biome_color(height: f32, moisture: f32) -> LinSrgb {
    Biome::classify(height, moisture).color(height, moisture)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rgb(c: LinSrgb) -> (f32, f32, f32) {
        c.into_components()
    }

    fn close(a: (f32, f32, f32), b: (f32, f32, f32)) -> bool {
        (a.0 - b.0).abs() < 1e-6 && (a.1 - b.1).abs() < 1e-6 && (a.2 - b.2).abs() < 1e-6
    }

    #[test]
    fn water_beach_edge_is_hard() {
        for &m in &[0.0, 0.4, 0.9] {
            assert_eq!(Biome::classify(0.2999, m), Biome::Water);
            assert_eq!(Biome::classify(0.30, m), Biome::Beach);
            assert!(close(rgb(biome_color(0.30, m)), (0.9, 0.85, 0.6)));
            let below = rgb(biome_color(0.2999, m));
            assert_eq!(below.2, 0.8);
        }
    }

    #[test]
    fn remaining_edges_are_hard() {
        assert_eq!(Biome::classify(0.3499, 0.7), Biome::Beach);
        assert_eq!(Biome::classify(0.35, 0.7), Biome::Forest);
        assert_eq!(Biome::classify(0.6499, 0.7), Biome::Forest);
        assert_eq!(Biome::classify(0.65, 0.7), Biome::Rock);
        assert_eq!(Biome::classify(0.7999, 0.7), Biome::Rock);
        assert_eq!(Biome::classify(0.80, 0.7), Biome::Snow);
    }

    #[test]
    fn moisture_branches() {
        // grass band: forest only when strictly above 0.5
        assert_eq!(Biome::classify(0.5, 0.5), Biome::Grass);
        assert_eq!(Biome::classify(0.5, 0.51), Biome::Forest);
        // mountain band: desert only when strictly below 0.3
        assert_eq!(Biome::classify(0.7, 0.3), Biome::Rock);
        assert_eq!(Biome::classify(0.7, 0.29), Biome::Desert);
    }

    #[test]
    fn band_colors_match_affine_blends() {
        assert!(close(rgb(biome_color(0.0, 0.5)), (0.1, 0.3, 0.8)));
        assert!(close(rgb(biome_color(0.5, 1.0)), (0.2, 0.6, 0.1)));
        assert!(close(rgb(biome_color(0.5, 0.0)), (0.3, 0.6, 0.2)));
        assert!(close(rgb(biome_color(0.7, 0.1)), (0.84, 0.67, 0.3)));
        assert!(close(rgb(biome_color(0.7, 0.8)), (0.5, 0.5, 0.5)));
    }

    #[test]
    fn snow_blends_to_white() {
        assert!(close(rgb(biome_color(0.8, 0.5)), (0.5, 0.5, 0.5)));
        assert!(close(rgb(biome_color(1.0, 0.5)), (0.9, 0.9, 0.9)));
        let (r, g, b) = rgb(biome_color(0.9, 0.5));
        assert!((r - 0.7).abs() < 1e-5 && r == g && g == b);
    }
}
