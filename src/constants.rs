/// -------- world & grid --------
pub const WORLD_SEED: f64   = 12345.0;
pub const WORLD_WIDTH: f32  = 10_000.0;
pub const WORLD_HEIGHT: f32 = 10_000.0;
pub const CELL_SIZE: f32    = 32.0;

/// 1.0 = one world unit per pixel, < 1.0 zooms out
pub const GAME_ZOOM: f32 = 0.6;

/// -------- biome octaves (frequency, weight) --------
pub const OCTAVES: [(f64, f64); 3] = [
    (0.015, 0.65), // coarse shape
    (0.05,  0.25), // variation
    (0.15,  0.10), // rough edges
];

/// -------- biome thresholds --------
pub const TREE_ABOVE: f64       = 0.65;
pub const ROCK_BELOW: f64       = 0.32;
pub const GRASS_FROM: f64       = 0.48;
pub const GRASS_TO: f64         = 0.65;

/// -------- player --------
pub const PLAYER_SIZE: f32  = 32.0;
pub const PLAYER_SPEED: f32 =  6.0; // units per tick, per axis

/// -------- creatures --------
pub const MAX_CREATURES: usize     = 100;
pub const CREATURE_SIZE: f32       = 24.0;
pub const SPAWN_ATTEMPTS: u32      = 20;
pub const RESPAWN_DELAY_MAX: f32   = 15.0; // seconds
pub const CREATURE_BLINK_SECS: f32 = 0.8;

/// -------- town & points of interest --------
pub const TOWN_SIZE: f32         = 1200.0;
pub const BUILDING_REACH: f32    = 250.0;
pub const LANDMARK_REACH: f32    = 400.0;

/// logical ticks per second (one per display refresh)
pub const TICK_HZ: f64 = 60.0;

/// default config location, overridable via `OVERWORLD_CONFIG`
pub const CONFIG_PATH: &str = "assets/overworld.ron";
pub const CONFIG_ENV: &str  = "OVERWORLD_CONFIG";
