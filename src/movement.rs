//! player movement against obstacle terrain, plus creature encounters
use bevy::input::ButtonInput;
use bevy::prelude::*;

use crate::rarity::Rarity;
use crate::spawn::{CreatureId, Creatures};
use crate::zones::{Area, TerrainQuery, WorldBounds};

/* ===========================================================
   state
   =========================================================== */
#[derive(Clone, Debug, PartialEq)]
pub struct Player {
    /// top‑left corner
    pub pos: Vec2,
    pub size: f32,
    /// world units per tick, per axis
    pub speed: f32,
}

impl Player {
    #[inline]
    pub fn footprint_at(&self, pos: Vec2) -> Area {
        Area::square(pos, self.size)
    }

    #[inline]
    pub fn footprint(&self) -> Area {
        self.footprint_at(self.pos)
    }
}

/// Held directions for this tick; diagonals combine.
#[derive(Resource, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DirectionalIntent {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

impl DirectionalIntent {
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn is_idle(&self) -> bool {
        *self == Self::default()
    }

    /// Per‑axis step; opposite directions cancel.
    pub fn step(&self, speed: f32) -> Vec2 {
        let mut d = Vec2::ZERO;
        if self.up {
            d.y -= speed;
        }
        if self.down {
            d.y += speed;
        }
        if self.left {
            d.x -= speed;
        }
        if self.right {
            d.x += speed;
        }
        d
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MotionMode {
    #[default]
    FreeRoam,
    /// battle or blocking dialog in progress
    InteractionLocked,
}

/// Player bumped into a wild creature.
#[derive(Event, Clone, Copy, Debug, PartialEq, Eq)]
pub struct Encounter {
    pub creature: CreatureId,
    pub rarity: Rarity,
}

/* ===========================================================
   movement
   =========================================================== */

/// Try to move the player one tick along `intent`.
///
/// If any footprint corner of the candidate lands on an obstacle the whole
/// move is dropped (no sliding along walls). The result is clamped to the
/// world either way. Returns whether the candidate was accepted.
pub fn step_player(
    player: &mut Player,
    intent: &DirectionalIntent,
    terrain: &impl TerrainQuery,
    bounds: &WorldBounds,
) -> bool {
    let candidate = player.pos + intent.step(player.speed);
    let blocked = player
        .footprint_at(candidate)
        .corners()
        .iter()
        .any(|c| terrain.blocks(c.x, c.y));

    if !blocked {
        player.pos = candidate;
    }

    let max = Vec2::new(bounds.width - player.size, bounds.height - player.size).max(Vec2::ZERO);
    player.pos = player.pos.clamp(Vec2::ZERO, max);
    !blocked
}

/// First creature the player overlaps is taken out of the world.
pub fn detect_encounter(player: &Player, creatures: &mut Creatures) -> Option<Encounter> {
    let hit = creatures.take_overlapping(&player.footprint())?;
    Some(Encounter { creature: hit.id, rarity: hit.rarity })
}

/* ===========================================================
   input (arrows / WASD)
   =========================================================== */
pub fn player_input_system(
    keys: Res<ButtonInput<KeyCode>>,
    mut intent: ResMut<DirectionalIntent>,
) {
    let held = |a, b| keys.pressed(a) || keys.pressed(b);
    *intent = DirectionalIntent {
        up: held(KeyCode::ArrowUp, KeyCode::KeyW),
        down: held(KeyCode::ArrowDown, KeyCode::KeyS),
        left: held(KeyCode::ArrowLeft, KeyCode::KeyA),
        right: held(KeyCode::ArrowRight, KeyCode::KeyD),
    };
}
