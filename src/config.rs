//! start‑up configuration (RON), validated once and never reloaded
use std::path::{Path, PathBuf};

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::biome::BiomeClassifier;
use crate::constants::*;
use crate::rarity::RarityTable;
use crate::zones::{Area, Building, BuildingKind, Landmark, Terrain, WorldBounds};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: ron::error::SpannedError,
    },
    #[error("{field} must be positive and finite, got {value}")]
    NotPositive { field: &'static str, value: f64 },
    #[error("rarity table is empty")]
    EmptyRarities,
    #[error("rarity {rarity} has negative probability {probability}")]
    NegativeProbability { rarity: String, probability: f64 },
    #[error("rarity probabilities sum to {0}, expected 1")]
    RarityMass(f64),
    #[error("{0} lies outside the world")]
    ZoneOutOfBounds(String),
    #[error("player footprint {size} does not fit a {width}x{height} world")]
    PlayerTooLarge { size: f32, width: f32, height: f32 },
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    pub size: f32,
    /// world units per tick, per axis
    pub speed: f32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self { size: PLAYER_SIZE, speed: PLAYER_SPEED }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CreatureConfig {
    pub max_population: usize,
    pub size: f32,
    pub spawn_attempts: u32,
    /// upper bound of the uniform respawn delay, in seconds
    pub respawn_delay_max: f32,
}

impl Default for CreatureConfig {
    fn default() -> Self {
        Self {
            max_population: MAX_CREATURES,
            size: CREATURE_SIZE,
            spawn_attempts: SPAWN_ATTEMPTS,
            respawn_delay_max: RESPAWN_DELAY_MAX,
        }
    }
}

#[derive(Resource, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// noise seed; fractional seeds in (0, 1) are scaled up
    pub seed: f64,
    pub world: WorldBounds,
    pub cell_size: f32,
    pub zoom: f32,
    pub player: PlayerConfig,
    pub creatures: CreatureConfig,
    pub rarities: RarityTable,
    pub town: Area,
    pub buildings: Vec<Building>,
    pub landmarks: Vec<Landmark>,
    /// fixed seed for spawn placement; `None` draws from entropy
    pub spawn_seed: Option<u64>,
}

impl Default for WorldConfig {
    fn default() -> Self {
        let world = WorldBounds { width: WORLD_WIDTH, height: WORLD_HEIGHT };
        let town = Area::new(
            (world.width - TOWN_SIZE) / 2.0,
            (world.height - TOWN_SIZE) / 2.0,
            TOWN_SIZE,
            TOWN_SIZE,
        );

        let buildings = vec![
            Building {
                kind: BuildingKind::Hospital,
                area: Area::new(town.x + 200.0, town.y + 200.0, 200.0, 150.0),
                label: "HOSPITAL".into(),
                message: "Healing your monsters...".into(),
                radius: BUILDING_REACH,
            },
            Building {
                kind: BuildingKind::Shop,
                area: Area::new(town.x + 800.0, town.y + 200.0, 200.0, 150.0),
                label: "SHOP".into(),
                message: "Shop is under construction! Come back later.".into(),
                radius: BUILDING_REACH,
            },
        ];

        let landmark = |area, label: &str, prompt: &str, message: &str, tint| Landmark {
            area,
            label: label.into(),
            prompt: prompt.into(),
            message: message.into(),
            radius: LANDMARK_REACH,
            tint,
        };
        let landmarks = vec![
            landmark(
                Area::new(2000.0, 2000.0, 300.0, 300.0),
                "ANCIENT SHRINE",
                "A mysterious energy radiates here. [E] Pray",
                "You pray at the Ancient Shrine...\nYour monsters feel blessed! (EXP Boost active)",
                [0x22, 0x22, 0x22],
            ),
            landmark(
                Area::new(8000.0, 2000.0, 400.0, 400.0),
                "BATTLE ARENA",
                "Test your strength against champions. [E] Enter",
                "The Arena is closed for the season.\nCome back when you are stronger!",
                [0x33, 0x33, 0x33],
            ),
            landmark(
                Area::new(2000.0, 8000.0, 250.0, 250.0),
                "DEEP CAVE",
                "Darkness consumes all light. [E] Explore",
                "The cave is too dark to enter without a Flashlight.",
                [0x11, 0x11, 0x11],
            ),
            landmark(
                Area::new(8000.0, 8000.0, 200.0, 600.0),
                "SKY TOWER",
                "Reach for the heavens. [E] Climb",
                "The Sky Tower door is locked tight.",
                [0x44, 0x44, 0x44],
            ),
        ];

        Self {
            seed: WORLD_SEED,
            world,
            cell_size: CELL_SIZE,
            zoom: GAME_ZOOM,
            player: PlayerConfig::default(),
            creatures: CreatureConfig::default(),
            rarities: RarityTable::default(),
            town,
            buildings,
            landmarks,
            spawn_seed: None,
        }
    }
}

impl WorldConfig {
    /// Parse and validate a RON config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_ron(&text).map_err(|e| match e {
            ConfigError::Parse { source, .. } => ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            },
            other => other,
        })
    }

    /// Like [`WorldConfig::load`], but a missing file yields the defaults.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            info!("no config at {:?}, using defaults", path);
            return Ok(Self::default());
        }
        let config = Self::load(path)?;
        info!("loaded world config from {:?}", path);
        Ok(config)
    }

    pub fn from_ron(text: &str) -> Result<Self, ConfigError> {
        let config: Self = ron::from_str(text).map_err(|source| ConfigError::Parse {
            path: PathBuf::new(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// `OVERWORLD_CONFIG` if set, otherwise the bundled asset path.
    pub fn default_path() -> PathBuf {
        std::env::var_os(CONFIG_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(CONFIG_PATH))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("world.width", self.world.width as f64),
            ("world.height", self.world.height as f64),
            ("cell_size", self.cell_size as f64),
            ("zoom", self.zoom as f64),
            ("player.size", self.player.size as f64),
            ("creatures.size", self.creatures.size as f64),
        ];
        for (field, value) in positive {
            // also rejects NaN
            if !(value > 0.0) || !value.is_finite() {
                return Err(ConfigError::NotPositive { field, value });
            }
        }
        if self.player.speed < 0.0 || !self.player.speed.is_finite() {
            return Err(ConfigError::NotPositive {
                field: "player.speed",
                value: self.player.speed as f64,
            });
        }
        if self.creatures.respawn_delay_max < 0.0 {
            return Err(ConfigError::NotPositive {
                field: "creatures.respawn_delay_max",
                value: self.creatures.respawn_delay_max as f64,
            });
        }

        if self.player.size > self.world.width || self.player.size > self.world.height {
            return Err(ConfigError::PlayerTooLarge {
                size: self.player.size,
                width: self.world.width,
                height: self.world.height,
            });
        }

        if self.rarities.entries().is_empty() {
            return Err(ConfigError::EmptyRarities);
        }
        if let Some(e) = self.rarities.entries().iter().find(|e| e.probability < 0.0) {
            return Err(ConfigError::NegativeProbability {
                rarity: e.rarity.to_string(),
                probability: e.probability,
            });
        }
        let total = self.rarities.total();
        if (total - 1.0).abs() > 1e-6 {
            return Err(ConfigError::RarityMass(total));
        }

        if !self.world.encloses(&self.town) {
            return Err(ConfigError::ZoneOutOfBounds("town".into()));
        }
        for l in &self.landmarks {
            if !self.world.encloses(&l.area) {
                return Err(ConfigError::ZoneOutOfBounds(l.label.clone()));
            }
        }
        for b in &self.buildings {
            if !self.world.encloses(&b.area) {
                return Err(ConfigError::ZoneOutOfBounds(b.label.clone()));
            }
        }
        Ok(())
    }

    /// Build the terrain resolver; the permutation table is created here, once.
    pub fn terrain(&self) -> Terrain {
        Terrain::new(
            BiomeClassifier::seeded(self.seed, self.cell_size),
            self.town,
            self.landmarks.clone(),
        )
    }
}
