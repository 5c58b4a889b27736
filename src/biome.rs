//! three‑octave biome classification on the world grid
use std::sync::Arc;

use noise::NoiseFn;

use crate::constants::{GRASS_FROM, GRASS_TO, OCTAVES, ROCK_BELOW, TREE_ABOVE};
use crate::gradient::GradientNoise;

/// -------- terrain categories --------
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum TerrainKind {
    #[default]
    None,
    Tree,
    Rock,
    TallGrass,
}

impl TerrainKind {
    /// Map a composite noise value to a category. First match wins, so a
    /// value above the tree line never reaches the grass band.
    pub fn from_value(value: f64) -> Self {
        if value > TREE_ABOVE {
            TerrainKind::Tree
        } else if value < ROCK_BELOW {
            TerrainKind::Rock
        } else if (GRASS_FROM..=GRASS_TO).contains(&value) {
            TerrainKind::TallGrass
        } else {
            TerrainKind::None
        }
    }

    /// trees & rocks block movement and spawning
    #[inline]
    pub fn is_obstacle(self) -> bool {
        matches!(self, TerrainKind::Tree | TerrainKind::Rock)
    }

    /// anything that gets a tile sprite
    #[inline]
    pub fn is_drawable(self) -> bool {
        self != TerrainKind::None
    }
}

/// Grid‑cell index of a world coordinate.
#[inline]
pub fn world_to_cell(v: f32, cell_size: f32) -> i64 {
    (v / cell_size).floor() as i64
}

/// Sums the octaves of a shared noise source per grid cell.
///
/// Generic over the `noise` crate's [`NoiseFn`] so any 2‑D source can drive
/// the classifier; production uses [`GradientNoise`].
#[derive(Debug)]
pub struct BiomeClassifier<N = GradientNoise> {
    noise: Arc<N>,
    cell_size: f32,
}

impl<N> Clone for BiomeClassifier<N> {
    fn clone(&self) -> Self {
        Self { noise: Arc::clone(&self.noise), cell_size: self.cell_size }
    }
}

impl BiomeClassifier<GradientNoise> {
    pub fn seeded(seed: f64, cell_size: f32) -> Self {
        Self::new(Arc::new(GradientNoise::seeded(seed)), cell_size)
    }
}

impl<N: NoiseFn<f64, 2>> BiomeClassifier<N> {
    pub fn new(noise: Arc<N>, cell_size: f32) -> Self {
        Self { noise, cell_size }
    }

    #[inline]
    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }

    /// Composite octave value for a grid cell.
    pub fn cell_value(&self, gx: i64, gy: i64) -> f64 {
        let (gx, gy) = (gx as f64, gy as f64);
        OCTAVES
            .iter()
            .map(|&(freq, weight)| self.noise.get([gx * freq, gy * freq]) * weight)
            .sum()
    }

    /// Category of the cell containing world point `(x, y)`.
    pub fn classify(&self, x: f32, y: f32) -> TerrainKind {
        let gx = world_to_cell(x, self.cell_size);
        let gy = world_to_cell(y, self.cell_size);
        TerrainKind::from_value(self.cell_value(gx, gy))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use noise::Constant;

    #[test]
    fn tree_wins_at_shared_boundary() {
        assert_eq!(TerrainKind::from_value(0.65), TerrainKind::TallGrass);
        assert_eq!(TerrainKind::from_value(0.650001), TerrainKind::Tree);
    }

    #[test]
    fn bands() {
        assert_eq!(TerrainKind::from_value(0.10), TerrainKind::Rock);
        assert_eq!(TerrainKind::from_value(0.3199), TerrainKind::Rock);
        assert_eq!(TerrainKind::from_value(0.32), TerrainKind::None);
        assert_eq!(TerrainKind::from_value(0.4799), TerrainKind::None);
        assert_eq!(TerrainKind::from_value(0.48), TerrainKind::TallGrass);
        assert_eq!(TerrainKind::from_value(0.99), TerrainKind::Tree);
    }

    #[test]
    fn octave_weights_sum_to_one() {
        // constant noise passes straight through the weighted sum
        let c = BiomeClassifier::new(Arc::new(Constant::new(0.7)), 32.0);
        assert!((c.cell_value(3, 4) - 0.7).abs() < 1e-12);
        assert_eq!(c.classify(100.0, 100.0), TerrainKind::Tree);

        let c = BiomeClassifier::new(Arc::new(Constant::new(0.2)), 32.0);
        assert_eq!(c.classify(-5.0, 9_000.0), TerrainKind::Rock);
    }

    #[test]
    fn whole_cell_shares_one_category() {
        let c = BiomeClassifier::seeded(12345.0, 32.0);
        for gy in 0..20 {
            for gx in 0..20 {
                let (x0, y0) = (gx as f32 * 32.0, gy as f32 * 32.0);
                let k = c.classify(x0, y0);
                assert_eq!(c.classify(x0 + 16.0, y0 + 16.0), k);
                assert_eq!(c.classify(x0 + 31.9, y0 + 31.9), k);
            }
        }
    }

    #[test]
    fn negative_coordinates_floor_down() {
        assert_eq!(world_to_cell(-0.5, 32.0), -1);
        assert_eq!(world_to_cell(31.99, 32.0), 0);
        assert_eq!(world_to_cell(32.0, 32.0), 1);
    }

    #[test]
    fn origin_cell_is_tall_grass() {
        // all octaves sample the lattice origin -> 0.5
        let c = BiomeClassifier::seeded(12345.0, 32.0);
        assert!((c.cell_value(0, 0) - 0.5).abs() < 1e-12);
        assert_eq!(c.classify(0.0, 0.0), TerrainKind::TallGrass);
    }
}
