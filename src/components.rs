use bevy::prelude::*;

use crate::spawn::CreatureId;

/* ===========================================================
   player
   =========================================================== */
#[derive(Component)]
pub struct PlayerSprite;

/* ===========================================================
   creatures
   =========================================================== */
#[derive(Component)]
pub struct CreatureSprite(pub CreatureId);

/* ===========================================================
   terrain helper components
   =========================================================== */
#[derive(Component)]
pub struct TileSprite {
    pub x: i64,
    pub y: i64,
}

/* ===========================================================
   points of interest
   =========================================================== */

/// "[E] …" hint floating above a building or landmark; shown while the
/// player is within `radius` of `center`.
#[derive(Component)]
pub struct ReachPrompt {
    pub center: Vec2,
    pub radius: f32,
}

/* ===========================================================
   hud
   =========================================================== */
#[derive(Component)]
pub struct PositionText;

#[derive(Component)]
pub struct MessageText;
