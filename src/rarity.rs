//! creature rarity tags and the weighted table they are drawn from
use bevy::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rarity {
    N,
    R,
    SR,
    SSR,
    UR,
    LR,
}

impl Rarity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Rarity::N => "N",
            Rarity::R => "R",
            Rarity::SR => "SR",
            Rarity::SSR => "SSR",
            Rarity::UR => "UR",
            Rarity::LR => "LR",
        }
    }
}

impl std::fmt::Display for Rarity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RarityEntry {
    pub rarity: Rarity,
    /// display colour (sRGB)
    pub color: [u8; 3],
    pub probability: f64,
}

impl RarityEntry {
    pub fn color(&self) -> Color {
        let [r, g, b] = self.color;
        Color::srgb_u8(r, g, b)
    }
}

/// Ordered `(rarity, colour, probability)` list. Sampling walks it in
/// declared order, so reordering entries changes which rarity a draw maps to.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RarityTable(pub Vec<RarityEntry>);

impl Default for RarityTable {
    fn default() -> Self {
        let e = |rarity, color, probability| RarityEntry { rarity, color, probability };
        Self(vec![
            e(Rarity::N,   [0x9E, 0x9E, 0x9E], 0.50),
            e(Rarity::R,   [0x21, 0x96, 0xF3], 0.30),
            e(Rarity::SR,  [0x9C, 0x27, 0xB0], 0.15),
            e(Rarity::SSR, [0xFF, 0xC1, 0x07], 0.04),
            e(Rarity::UR,  [0xE5, 0x39, 0x35], 0.009),
            e(Rarity::LR,  [0xED, 0xE7, 0xF6], 0.001),
        ])
    }
}

impl RarityTable {
    pub fn entries(&self) -> &[RarityEntry] {
        &self.0
    }

    pub fn total(&self) -> f64 {
        self.0.iter().map(|e| e.probability).sum()
    }

    pub fn get(&self, rarity: Rarity) -> Option<&RarityEntry> {
        self.0.iter().find(|e| e.rarity == rarity)
    }

    /// Lowest tier; also the fallback when rounding leaves a draw unmatched.
    pub fn lowest(&self) -> Rarity {
        self.0.first().map_or(Rarity::N, |e| e.rarity)
    }

    /// Map a uniform draw in [0, 1) to a rarity by cumulative mass.
    pub fn pick(&self, draw: f64) -> Rarity {
        let mut cumulative = 0.0;
        for entry in &self.0 {
            cumulative += entry.probability;
            if draw < cumulative {
                return entry.rarity;
            }
        }
        self.lowest()
    }

    pub fn color_of(&self, rarity: Rarity) -> Color {
        self.get(rarity).map_or(Color::WHITE, RarityEntry::color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_table_sums_to_one() {
        assert!((RarityTable::default().total() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn cumulative_boundaries() {
        let t = RarityTable::default();
        assert_eq!(t.pick(0.0), Rarity::N);
        assert_eq!(t.pick(0.4999), Rarity::N);
        assert_eq!(t.pick(0.5), Rarity::R);
        assert_eq!(t.pick(0.79), Rarity::R);
        assert_eq!(t.pick(0.81), Rarity::SR);
        assert_eq!(t.pick(0.96), Rarity::SSR);
        assert_eq!(t.pick(0.995), Rarity::UR);
        assert_eq!(t.pick(0.9995), Rarity::LR);
    }

    #[test]
    fn unmatched_draw_falls_back_to_lowest() {
        let short = RarityTable(vec![RarityEntry {
            rarity: Rarity::SR,
            color: [0, 0, 0],
            probability: 0.25,
        }]);
        assert_eq!(short.pick(0.9), Rarity::SR);
        assert_eq!(RarityTable::default().pick(1.5), Rarity::N);
    }
}
