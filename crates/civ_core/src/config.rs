//! Construction-time game configuration.

use serde::{Deserialize, Serialize};

use crate::error::{GameError, Result};

/// Upper bound on map dimensions.
pub const MAX_MAP_DIMENSION: u32 = 512;

/// Upper bound on AI civilizations.
pub const MAX_AI_CIVILIZATIONS: u32 = 63;

/// Parameters fixed when a game is created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Map width in tiles.
    pub map_width: u32,
    /// Map height in tiles.
    pub map_height: u32,
    /// Hex radius in pixels.
    pub tile_size: f64,
    /// Number of AI civilizations besides the player.
    pub starting_civilizations: u32,
    /// Seed for map generation and AI decisions.
    pub seed: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            map_width: 50,
            map_height: 40,
            tile_size: 32.0,
            starting_civilizations: 1,
            seed: 42,
        }
    }
}

impl GameConfig {
    /// Set the seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the map size.
    #[must_use]
    pub fn with_map_size(mut self, width: u32, height: u32) -> Self {
        self.map_width = width;
        self.map_height = height;
        self
    }

    /// Set the number of AI civilizations.
    #[must_use]
    pub fn with_ai_civilizations(mut self, count: u32) -> Self {
        self.starting_civilizations = count;
        self
    }

    /// Number of civilizations including the player.
    #[must_use]
    pub fn total_civilizations(&self) -> u32 {
        self.starting_civilizations.saturating_add(1)
    }

    /// Check the configuration can build a game.
    pub fn validate(&self) -> Result<()> {
        if self.map_width == 0 || self.map_height == 0 {
            return Err(GameError::InvalidConfig(format!(
                "map size must be non-zero, got {}x{}",
                self.map_width, self.map_height
            )));
        }
        if self.map_width > MAX_MAP_DIMENSION || self.map_height > MAX_MAP_DIMENSION {
            return Err(GameError::InvalidConfig(format!(
                "map size {}x{} exceeds {MAX_MAP_DIMENSION}",
                self.map_width, self.map_height
            )));
        }
        if self.starting_civilizations > MAX_AI_CIVILIZATIONS {
            return Err(GameError::InvalidConfig(format!(
                "{} AI civilizations exceeds {MAX_AI_CIVILIZATIONS}",
                self.starting_civilizations
            )));
        }
        if !self.tile_size.is_finite() || self.tile_size <= 0.0 {
            return Err(GameError::InvalidConfig(format!(
                "tile size must be positive, got {}",
                self.tile_size
            )));
        }
        Ok(())
    }
}
