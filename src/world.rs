//! the per‑tick world aggregate
//!
//! `Overworld` owns every piece of mutable game state (player, camera,
//! creatures, pending respawns, motion mode) and hands each component only
//! the slice it needs. Terrain is passed in separately: it is immutable and
//! may be shared with any number of readers.
use bevy::input::ButtonInput;
use bevy::prelude::*;
use rand::SeedableRng;
use rand_xoshiro::Xoshiro256PlusPlus;

use crate::camera::CameraView;
use crate::config::WorldConfig;
use crate::movement::{detect_encounter, step_player, DirectionalIntent, Encounter, MotionMode, Player};
use crate::spawn::{Creatures, RespawnQueue};
use crate::zones::{Terrain, TerrainQuery, WorldBounds};

/// What happened during one tick.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TickReport {
    pub moved: bool,
    pub encounter: Option<Encounter>,
    /// respawn timers that fired this tick
    pub respawns_fired: usize,
    /// of those, how many actually placed a creature
    pub respawned: usize,
}

#[derive(Resource, Debug)]
pub struct Overworld {
    pub bounds: WorldBounds,
    pub zoom: f32,
    pub player: Player,
    pub camera: CameraView,
    pub creatures: Creatures,
    pub respawns: RespawnQueue,
    pub mode: MotionMode,
    rng: Xoshiro256PlusPlus,
}

impl Overworld {
    /// Fresh world with the player in the middle and no creatures yet.
    pub fn new(config: &WorldConfig, screen: Vec2) -> Self {
        let rng = match config.spawn_seed {
            Some(seed) => Xoshiro256PlusPlus::seed_from_u64(seed),
            None => Xoshiro256PlusPlus::seed_from_u64(rand::random()),
        };
        let bounds = config.world;
        let player = Player {
            pos: bounds.size() * 0.5,
            size: config.player.size,
            speed: config.player.speed,
        };
        let view = CameraView::effective_size(screen, config.zoom);
        Self {
            bounds,
            zoom: config.zoom,
            camera: CameraView::follow(player.pos, view, &bounds),
            player,
            creatures: Creatures::new(config.creatures.clone(), config.rarities.clone(), config.town),
            respawns: RespawnQueue::default(),
            mode: MotionMode::FreeRoam,
            rng,
        }
    }

    /// Initial creature fill; returns how many were placed.
    pub fn populate(&mut self, terrain: &impl TerrainQuery) -> usize {
        let placed = self.creatures.populate(terrain, &self.bounds, &mut self.rng);
        info!(
            "placed {} of {} creatures",
            placed,
            self.creatures.config().max_population
        );
        placed
    }

    /// Window resized: recompute the effective viewport and re‑clamp.
    pub fn set_screen(&mut self, screen: Vec2) {
        let view = CameraView::effective_size(screen, self.zoom);
        if view != self.camera.size {
            self.camera = CameraView::follow(self.player.pos, view, &self.bounds);
        }
    }

    pub fn is_locked(&self) -> bool {
        self.mode == MotionMode::InteractionLocked
    }

    /// Enter or leave the locked state (battle / dialog).
    pub fn set_locked(&mut self, locked: bool) {
        self.mode = if locked {
            MotionMode::InteractionLocked
        } else {
            MotionMode::FreeRoam
        };
    }

    /// One logical frame.
    ///
    /// Free‑roam: move, clamp, recompute camera, check creature overlap. A hit
    /// removes the creature, schedules one respawn and locks the world until
    /// the caller unlocks it. Locked: intent is cleared and nothing moves.
    /// Respawn timers run in both modes.
    pub fn tick(
        &mut self,
        terrain: &impl TerrainQuery,
        intent: &mut DirectionalIntent,
        dt: f32,
    ) -> TickReport {
        let mut report = TickReport::default();

        match self.mode {
            MotionMode::InteractionLocked => intent.clear(),
            MotionMode::FreeRoam => {
                report.moved = step_player(&mut self.player, intent, terrain, &self.bounds);
                self.camera = CameraView::follow(self.player.pos, self.camera.size, &self.bounds);

                if let Some(hit) = detect_encounter(&self.player, &mut self.creatures) {
                    let max_delay = self.creatures.config().respawn_delay_max;
                    self.respawns.schedule(max_delay, &mut self.rng);
                    self.mode = MotionMode::InteractionLocked;
                    report.encounter = Some(hit);
                }
            }
        }

        report.respawns_fired = self.respawns.advance(dt);
        for _ in 0..report.respawns_fired {
            if self
                .creatures
                .try_spawn(terrain, &self.bounds, &mut self.rng)
                .is_some()
            {
                report.respawned += 1;
            }
        }
        if report.respawns_fired > 0 {
            debug!(
                "respawn fired {} time(s), placed {}",
                report.respawns_fired, report.respawned
            );
        }
        report
    }
}

/// Battle (or dialog) finished; the world is free to move again.
#[derive(Event, Clone, Copy, Debug, Default)]
pub struct BattleEnded;

/* ===========================================================
   systems
   =========================================================== */

/// One logical tick; runs in `FixedUpdate`.
pub fn tick_overworld_system(
    time: Res<Time>,
    terrain: Res<Terrain>,
    mut intent: ResMut<DirectionalIntent>,
    mut world: ResMut<Overworld>,
    mut encounters: EventWriter<Encounter>,
) {
    let report = world.tick(&*terrain, &mut intent, time.delta_secs());
    if let Some(hit) = report.encounter {
        info!("encounter: {} creature {:?}", hit.rarity, hit.creature);
        encounters.send(hit);
    }
}

/// Stand‑in for the battle screen: Enter ends the encounter.
pub fn end_battle_input_system(
    keys: Res<ButtonInput<KeyCode>>,
    world: Res<Overworld>,
    mut ended: EventWriter<BattleEnded>,
) {
    if world.is_locked() && keys.just_pressed(KeyCode::Enter) {
        ended.send(BattleEnded);
    }
}

pub fn unlock_on_battle_end_system(
    mut ended: EventReader<BattleEnded>,
    mut world: ResMut<Overworld>,
) {
    if ended.read().count() > 0 {
        world.set_locked(false);
        info!("battle over, free roam");
    }
}
