//! procedural overworld for a top‑down monster‑catching game
//!
//! Terrain is a pure function of world coordinates: seeded gradient noise,
//! three octaves, fixed thresholds, with the town and landmarks carved out.
//! On top of that sit creature spawning, player movement & encounters, and
//! a viewport culler that streams tile sprites. Works with **Bevy 0.15**.

pub mod biome;
pub mod camera;
pub mod components;
pub mod config;
pub mod constants;
pub mod gradient;
pub mod interaction;
pub mod movement;
pub mod rarity;
pub mod render;
pub mod spawn;
pub mod viewport;
pub mod world;
pub mod zones;

use bevy::prelude::*;

use camera::{camera_follow_system, track_viewport_system};
use config::WorldConfig;
use interaction::{interact_system, InteractionEvent};
use movement::{player_input_system, DirectionalIntent, Encounter};
use render::{
    blink_creatures_system, hud_system, player_sprite_system, reach_prompt_system,
    setup_scene, sync_creature_sprites_system,
};
use viewport::{stream_tiles_system, update_active_cells_system, LastCells, TileSprites};
use world::{
    end_battle_input_system, tick_overworld_system, unlock_on_battle_end_system, BattleEnded,
    Overworld,
};

/* ------------------------------------------------------------------------ */
/* startup                                                                  */
/* ------------------------------------------------------------------------ */

/// Build terrain (permutation table included) and the world aggregate,
/// then fill the creature population.
pub fn setup_world(mut commands: Commands, config: Res<WorldConfig>, window_q: Query<&Window>) {
    let screen = window_q
        .get_single()
        .map(|w| Vec2::new(w.width(), w.height()))
        .unwrap_or(Vec2::new(1280.0, 720.0));

    let terrain = config.terrain();
    let mut world = Overworld::new(&config, screen);
    world.populate(&terrain);

    info!(
        "world {}x{} seed {} cell {}",
        config.world.width, config.world.height, config.seed, config.cell_size
    );
    commands.insert_resource(terrain);
    commands.insert_resource(world);
}

/* ------------------------------------------------------------------------ */
/* plugin                                                                   */
/* ------------------------------------------------------------------------ */

/// Everything except window/bevy core. Expects a [`WorldConfig`] resource;
/// inserts the default one if missing.
pub struct OverworldPlugin;

impl Plugin for OverworldPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<WorldConfig>()
            .init_resource::<DirectionalIntent>()
            .init_resource::<TileSprites>()
            .init_resource::<LastCells>()
            .insert_resource(Time::<Fixed>::from_hz(constants::TICK_HZ))
            .add_event::<Encounter>()
            .add_event::<InteractionEvent>()
            .add_event::<BattleEnded>()

            /* startup systems ------------------------------------------------- */
            .add_systems(Startup, setup_world)
            .add_systems(Startup, setup_scene.after(setup_world))
            .add_systems(Startup, update_active_cells_system.after(setup_world))

            /* input ----------------------------------------------------------- */
            .add_systems(
                Update,
                (
                    player_input_system,          // arrows / WASD
                    track_viewport_system,        // window → viewport
                    interact_system,              // E near a landmark
                    end_battle_input_system,      // Enter closes battle
                    unlock_on_battle_end_system,
                )
                    .chain(),
            )

            /* logical tick ---------------------------------------------------- */
            .add_systems(FixedUpdate, tick_overworld_system)

            /* drawing --------------------------------------------------------- */
            .add_systems(
                Update,
                (
                    player_sprite_system,
                    sync_creature_sprites_system,
                    blink_creatures_system,
                    reach_prompt_system,
                    hud_system,
                )
                    .after(unlock_on_battle_end_system),
            )

            /* post‑update (camera / culling) ---------------------------------- */
            .add_systems(
                PostUpdate,
                (
                    camera_follow_system,
                    update_active_cells_system, // slide range with camera
                    stream_tiles_system,
                )
                    .chain(),
            );
    }
}
