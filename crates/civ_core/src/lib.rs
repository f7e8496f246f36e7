//! # Civ Core
//!
//! Game rules for a turn-based civilization game on a hex grid.
//!
//! This crate contains **only** game state and rules:
//! - No rendering
//! - No IO
//! - No system randomness (every roll comes from a seeded stream)
//!
//! A game built from the same [`config::GameConfig`] and driven by the same
//! calls always reaches the same state, which [`game::Game::state_hash`]
//! makes easy to check.
//!
//! ## Crate Structure
//!
//! - [`hex_grid`] - Offset-coordinate hex grid and tiles
//! - [`terrain`] - Terrain catalog
//! - [`map_generation`] - Seeded continent generator
//! - [`unit`] - Unit catalog and movement
//! - [`combat`] - Damage and attack rules
//! - [`city`] - Growth, yields and production
//! - [`civilization`] - Per-civilization ownership and economy
//! - [`game`] - The game session
//! - [`turn`] - Turn order
//! - [`ai`] - Computer-controlled civilizations

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic)]

pub mod ai;
pub mod buildings;
pub mod city;
pub mod civilization;
pub mod combat;
pub mod config;
pub mod error;
pub mod game;
pub mod hex_grid;
pub mod map_generation;
pub mod math;
pub mod production;
pub mod terrain;
pub mod turn;
pub mod unit;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::ai::AiTurnReport;
    pub use crate::buildings::{BuildingKind, Yields};
    pub use crate::city::{City, CityId, CitySummary, CityTurnReport, ProductionEvent};
    pub use crate::civilization::{CivId, Civilization, CivilizationSummary, EconomyDelta};
    pub use crate::combat::AttackOutcome;
    pub use crate::config::GameConfig;
    pub use crate::error::{GameError, Result};
    pub use crate::game::Game;
    pub use crate::hex_grid::{HexCoord, HexGrid, PixelPoint, Tile};
    pub use crate::map_generation::{GenerationSummary, MapGenerator};
    pub use crate::math::Fixed;
    pub use crate::production::ProductionOrder;
    pub use crate::terrain::Terrain;
    pub use crate::turn::{CityReport, TurnReport};
    pub use crate::unit::{Unit, UnitId, UnitSummary, UnitType};
}
