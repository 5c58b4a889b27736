//! creature placement (rejection sampling) & deferred respawns
use bevy::prelude::*;
use rand::Rng;

use crate::config::CreatureConfig;
use crate::rarity::{Rarity, RarityTable};
use crate::zones::{Area, TerrainQuery, WorldBounds};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CreatureId(pub u64);

/// A wild creature waiting in the grass.
#[derive(Clone, Debug, PartialEq)]
pub struct Creature {
    pub id: CreatureId,
    /// top‑left corner
    pub pos: Vec2,
    pub size: f32,
    pub rarity: Rarity,
}

impl Creature {
    #[inline]
    pub fn footprint(&self) -> Area {
        Area::square(self.pos, self.size)
    }
}

/// The live creature collection, capped at `config.max_population`.
#[derive(Debug, Clone)]
pub struct Creatures {
    list: Vec<Creature>,
    config: CreatureConfig,
    rarities: RarityTable,
    /// spawning never lands strictly inside this area
    town: Area,
    next_id: u64,
}

impl Creatures {
    pub fn new(config: CreatureConfig, rarities: RarityTable, town: Area) -> Self {
        Self { list: Vec::new(), config, rarities, town, next_id: 0 }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.list.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.list.len() >= self.config.max_population
    }

    pub fn iter(&self) -> impl Iterator<Item = &Creature> {
        self.list.iter()
    }

    pub fn config(&self) -> &CreatureConfig {
        &self.config
    }

    pub fn rarities(&self) -> &RarityTable {
        &self.rarities
    }

    /// Remove and return the first creature whose footprint overlaps `area`.
    /// Order of the remaining creatures is preserved.
    pub fn take_overlapping(&mut self, area: &Area) -> Option<Creature> {
        let i = self.list.iter().position(|c| c.footprint().overlaps(area))?;
        Some(self.list.remove(i))
    }

    /// Whether a candidate point is an acceptable home for a creature:
    /// outside the town and not on a tree or rock. Tall grass is fine.
    pub fn accepts(&self, terrain: &impl TerrainQuery, x: f32, y: f32) -> bool {
        !self.town.contains_strict(x, y) && !terrain.resolve(x, y).is_obstacle()
    }

    /// One placement attempt.
    ///
    /// Draws a rarity first, then up to `spawn_attempts` positions inset by
    /// half a footprint from each world edge. Gives up silently when every
    /// candidate is rejected.
    pub fn try_spawn<R: Rng + ?Sized>(
        &mut self,
        terrain: &impl TerrainQuery,
        bounds: &WorldBounds,
        rng: &mut R,
    ) -> Option<CreatureId> {
        if self.is_full() {
            return None;
        }

        let rarity = self.rarities.pick(rng.gen::<f64>());
        let size = self.config.size;
        let inset = size * 0.5;
        let span = Vec2::new(
            (bounds.width - size).max(0.0),
            (bounds.height - size).max(0.0),
        );

        for _ in 0..self.config.spawn_attempts {
            let x = rng.gen::<f32>() * span.x + inset;
            let y = rng.gen::<f32>() * span.y + inset;
            if !self.accepts(terrain, x, y) {
                continue;
            }

            let id = CreatureId(self.next_id);
            self.next_id += 1;
            self.list.push(Creature { id, pos: Vec2::new(x, y), size, rarity });
            return Some(id);
        }

        debug!(
            "spawn skipped: no valid spot for {} after {} attempts",
            rarity, self.config.spawn_attempts
        );
        None
    }

    /// Start‑up fill: one attempt per population slot. Returns how many
    /// creatures were placed.
    pub fn populate<R: Rng + ?Sized>(
        &mut self,
        terrain: &impl TerrainQuery,
        bounds: &WorldBounds,
        rng: &mut R,
    ) -> usize {
        (0..self.config.max_population)
            .filter(|_| self.try_spawn(terrain, bounds, rng).is_some())
            .count()
    }
}

/// Pending respawns. Each entry fires exactly once; there is no cancel.
#[derive(Debug, Clone, Default)]
pub struct RespawnQueue {
    timers: Vec<f32>,
}

impl RespawnQueue {
    /// Schedule one respawn after a uniform delay in `[0, max_delay]`.
    pub fn schedule<R: Rng + ?Sized>(&mut self, max_delay: f32, rng: &mut R) {
        let delay = rng.gen::<f32>() * max_delay.max(0.0);
        self.timers.push(delay);
    }

    #[inline]
    pub fn pending(&self) -> usize {
        self.timers.len()
    }

    /// Advance all timers by `dt`; returns how many came due.
    pub fn advance(&mut self, dt: f32) -> usize {
        let before = self.timers.len();
        for t in &mut self.timers {
            *t -= dt;
        }
        self.timers.retain(|t| *t > 0.0);
        before - self.timers.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::biome::TerrainKind;
    use rand::SeedableRng;
    use rand_xoshiro::Xoshiro256PlusPlus;

    /// rock on the left half of the world, grass on the right
    struct HalfRock;

    impl TerrainQuery for HalfRock {
        fn resolve(&self, x: f32, _y: f32) -> TerrainKind {
            if x < 500.0 { TerrainKind::Rock } else { TerrainKind::TallGrass }
        }
        fn cell_size(&self) -> f32 {
            32.0
        }
    }

    struct AllRock;

    impl TerrainQuery for AllRock {
        fn resolve(&self, _x: f32, _y: f32) -> TerrainKind {
            TerrainKind::Rock
        }
        fn cell_size(&self) -> f32 {
            32.0
        }
    }

    const BOUNDS: WorldBounds = WorldBounds { width: 1000.0, height: 1000.0 };

    fn creatures(max: usize) -> Creatures {
        let config = CreatureConfig { max_population: max, ..CreatureConfig::default() };
        Creatures::new(config, RarityTable::default(), Area::new(600.0, 600.0, 200.0, 200.0))
    }

    #[test]
    fn respects_population_cap() {
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(1);
        let mut c = creatures(5);
        for _ in 0..50 {
            c.try_spawn(&HalfRock, &BOUNDS, &mut rng);
        }
        assert_eq!(c.len(), 5);
        assert!(c.try_spawn(&HalfRock, &BOUNDS, &mut rng).is_none());
    }

    #[test]
    fn tall_grass_is_a_valid_home() {
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(2);
        let mut c = creatures(40);
        c.populate(&HalfRock, &BOUNDS, &mut rng);
        assert!(!c.is_empty());
        for cr in c.iter() {
            assert!(cr.pos.x >= 500.0, "{cr:?} on rock");
            assert!(!Area::new(600.0, 600.0, 200.0, 200.0).contains_strict(cr.pos.x, cr.pos.y));
        }
    }

    #[test]
    fn positions_are_inset_by_half_a_footprint() {
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(3);
        let mut c = creatures(100);
        c.populate(&HalfRock, &BOUNDS, &mut rng);
        for cr in c.iter() {
            assert!(cr.pos.x >= 12.0 && cr.pos.x <= 988.0);
            assert!(cr.pos.y >= 12.0 && cr.pos.y <= 988.0);
        }
    }

    #[test]
    fn exhausted_attempts_skip_silently() {
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(4);
        let mut c = creatures(10);
        assert_eq!(c.populate(&AllRock, &BOUNDS, &mut rng), 0);
        assert!(c.is_empty());
    }

    #[test]
    fn take_overlapping_removes_first_hit_only() {
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(5);
        let mut c = creatures(3);
        c.populate(&HalfRock, &BOUNDS, &mut rng);
        let first = c.iter().next().cloned().unwrap();
        let hit = c.take_overlapping(&first.footprint()).unwrap();
        assert_eq!(hit.id, first.id);
        assert_eq!(c.len(), 2);
        assert!(c.take_overlapping(&Area::new(-100.0, -100.0, 10.0, 10.0)).is_none());
    }

    #[test]
    fn respawn_fires_once() {
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(6);
        let mut q = RespawnQueue::default();
        q.schedule(15.0, &mut rng);
        assert_eq!(q.pending(), 1);
        assert_eq!(q.advance(15.0), 1);
        assert_eq!(q.pending(), 0);
        assert_eq!(q.advance(100.0), 0);
    }

    #[test]
    fn zero_delay_fires_on_next_advance() {
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(7);
        let mut q = RespawnQueue::default();
        q.schedule(0.0, &mut rng);
        assert_eq!(q.advance(0.0), 1);
    }
}
