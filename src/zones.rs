//! exclusion zones (town, landmarks) and the authoritative terrain query
use bevy::prelude::*;
use noise::NoiseFn;
use serde::{Deserialize, Serialize};

use crate::biome::{BiomeClassifier, TerrainKind};
use crate::gradient::GradientNoise;

/* ===========================================================
   geometry
   =========================================================== */

/// Fixed rectangular extent of the world, in world units.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct WorldBounds {
    pub width: f32,
    pub height: f32,
}

impl WorldBounds {
    #[inline]
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    /// whether `area` lies entirely inside the world
    pub fn encloses(&self, area: &Area) -> bool {
        area.x >= 0.0
            && area.y >= 0.0
            && area.x + area.w <= self.width
            && area.y + area.h <= self.height
    }
}

/// Axis‑aligned rectangle, top‑left origin, y grows downward.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Area {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Area {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// square area with its top‑left corner at `pos`
    pub fn square(pos: Vec2, size: f32) -> Self {
        Self::new(pos.x, pos.y, size, size)
    }

    /// Strict interior test; points on an edge are outside.
    #[inline]
    pub fn contains_strict(&self, x: f32, y: f32) -> bool {
        x > self.x && x < self.x + self.w && y > self.y && y < self.y + self.h
    }

    /// Open‑interval AABB overlap; touching edges do not overlap.
    #[inline]
    pub fn overlaps(&self, other: &Area) -> bool {
        self.x < other.x + other.w
            && self.x + self.w > other.x
            && self.y < other.y + other.h
            && self.y + self.h > other.y
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.w * 0.5, self.y + self.h * 0.5)
    }

    /// four corners: tl, tr, bl, br
    pub fn corners(&self) -> [Vec2; 4] {
        [
            Vec2::new(self.x, self.y),
            Vec2::new(self.x + self.w, self.y),
            Vec2::new(self.x, self.y + self.h),
            Vec2::new(self.x + self.w, self.y + self.h),
        ]
    }
}

/* ===========================================================
   points of interest
   =========================================================== */

/// Named safe area out in the wilds.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Landmark {
    pub area: Area,
    pub label: String,
    /// hint shown while the player is in reach
    pub prompt: String,
    /// reply when the player interacts
    pub message: String,
    pub radius: f32,
    pub tint: [u8; 3],
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum BuildingKind {
    Hospital,
    Shop,
}

/// Building inside the town. Buildings do not affect terrain.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Building {
    pub kind: BuildingKind,
    pub area: Area,
    pub label: String,
    pub message: String,
    pub radius: f32,
}

/// Which exclusion zone a point falls in.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Zone<'a> {
    Town,
    Landmark(&'a Landmark),
}

/* ===========================================================
   terrain query seam
   =========================================================== */

/// Single source of truth for "what occupies this point".
///
/// Spawn placement, movement and culling only ever talk to this trait.
pub trait TerrainQuery {
    fn resolve(&self, x: f32, y: f32) -> TerrainKind;

    fn cell_size(&self) -> f32;

    #[inline]
    fn blocks(&self, x: f32, y: f32) -> bool {
        self.resolve(x, y).is_obstacle()
    }
}

/// Exclusion zones layered over procedural biomes.
#[derive(Resource, Debug, Clone)]
pub struct ZoneResolver<N = GradientNoise>
where
    N: Send + Sync + 'static,
{
    classifier: BiomeClassifier<N>,
    town: Area,
    landmarks: Vec<Landmark>,
}

/// the resolver the game runs with
pub type Terrain = ZoneResolver<GradientNoise>;

impl<N> ZoneResolver<N>
where
    N: NoiseFn<f64, 2> + Send + Sync + 'static,
{
    pub fn new(classifier: BiomeClassifier<N>, town: Area, landmarks: Vec<Landmark>) -> Self {
        Self { classifier, town, landmarks }
    }

    #[inline]
    pub fn town(&self) -> &Area {
        &self.town
    }

    #[inline]
    pub fn landmarks(&self) -> &[Landmark] {
        &self.landmarks
    }

    /// Town first, then landmarks in declared order.
    pub fn zone_at(&self, x: f32, y: f32) -> Option<Zone<'_>> {
        if self.town.contains_strict(x, y) {
            return Some(Zone::Town);
        }
        self.landmarks
            .iter()
            .find(|l| l.area.contains_strict(x, y))
            .map(Zone::Landmark)
    }
}

impl<N> TerrainQuery for ZoneResolver<N>
where
    N: NoiseFn<f64, 2> + Send + Sync + 'static,
{
    fn resolve(&self, x: f32, y: f32) -> TerrainKind {
        if self.zone_at(x, y).is_some() {
            return TerrainKind::None;
        }
        self.classifier.classify(x, y)
    }

    #[inline]
    fn cell_size(&self) -> f32 {
        self.classifier.cell_size()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use noise::Constant;
    use std::sync::Arc;

    fn rock_world() -> ZoneResolver<Constant> {
        // 0.1 everywhere -> rock, so any None must come from a zone
        let classifier = BiomeClassifier::new(Arc::new(Constant::new(0.1)), 32.0);
        let shrine = Landmark {
            area: Area::new(2000.0, 2000.0, 300.0, 300.0),
            label: "ANCIENT SHRINE".into(),
            prompt: "[E] Pray".into(),
            message: "You pray.".into(),
            radius: 400.0,
            tint: [34, 34, 34],
        };
        ZoneResolver::new(classifier, Area::new(4400.0, 4400.0, 1200.0, 1200.0), vec![shrine])
    }

    #[test]
    fn zones_override_noise() {
        let t = rock_world();
        assert_eq!(t.resolve(5000.0, 5000.0), TerrainKind::None);
        assert_eq!(t.resolve(2150.0, 2150.0), TerrainKind::None);
        assert_eq!(t.resolve(100.0, 100.0), TerrainKind::Rock);
    }

    #[test]
    fn zone_edges_are_exclusive() {
        let t = rock_world();
        assert_eq!(t.resolve(4400.0, 5000.0), TerrainKind::Rock);
        assert_eq!(t.resolve(5600.0, 5000.0), TerrainKind::Rock);
        assert_eq!(t.resolve(4400.01, 5000.0), TerrainKind::None);
        assert_eq!(t.resolve(2000.0, 2000.0), TerrainKind::Rock);
    }

    #[test]
    fn town_is_checked_before_landmarks() {
        let t = rock_world();
        assert_eq!(t.zone_at(5000.0, 5000.0), Some(Zone::Town));
        match t.zone_at(2100.0, 2100.0) {
            Some(Zone::Landmark(l)) => assert_eq!(l.label, "ANCIENT SHRINE"),
            other => panic!("expected shrine, got {other:?}"),
        }
        assert!(t.zone_at(0.0, 0.0).is_none());
    }

    #[test]
    fn area_overlap_is_open() {
        let a = Area::new(0.0, 0.0, 10.0, 10.0);
        assert!(a.overlaps(&Area::new(9.0, 9.0, 5.0, 5.0)));
        assert!(!a.overlaps(&Area::new(10.0, 0.0, 5.0, 5.0)));
        assert!(!a.overlaps(&Area::new(0.0, -5.0, 5.0, 5.0)));
    }
}
