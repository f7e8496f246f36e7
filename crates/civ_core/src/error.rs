//! Error types for the game simulation.

use thiserror::Error;

use crate::buildings::BuildingKind;
use crate::city::CityId;
use crate::civilization::CivId;
use crate::hex_grid::HexCoord;
use crate::unit::UnitId;

/// Result type alias using [`GameError`].
pub type Result<T> = std::result::Result<T, GameError>;

/// Top-level error type for all game simulation errors.
///
/// Every operation that returns one of these leaves the game untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    /// Coordinate lies outside the grid.
    #[error("Coordinate {0} is out of bounds")]
    OutOfBounds(HexCoord),

    /// Invalid unit identifier.
    #[error("Unit not found: {0}")]
    UnitNotFound(UnitId),

    /// Invalid city identifier.
    #[error("City not found: {0}")]
    CityNotFound(CityId),

    /// Invalid civilization identifier.
    #[error("Civilization not found: {0}")]
    CivilizationNotFound(CivId),

    /// The game has no civilizations to take turns.
    #[error("No civilizations in play")]
    NoCivilizations,

    /// Target tile already holds a unit.
    #[error("Tile {0} is occupied")]
    TileOccupied(HexCoord),

    /// Unit class cannot enter the target terrain.
    #[error("Tile {0} is not navigable for this unit")]
    NotNavigable(HexCoord),

    /// Not enough movement left for the target terrain.
    #[error("Insufficient moves: need {needed}, have {available}")]
    InsufficientMoves {
        /// Movement cost of the target tile.
        needed: u32,
        /// Moves the unit has left this turn.
        available: u32,
    },

    /// Unit already attacked this turn.
    #[error("Unit {0} has already attacked this turn")]
    AlreadyAttacked(UnitId),

    /// Target is beyond attack reach.
    #[error("Target out of range: distance {distance}, reach {reach}")]
    OutOfRange {
        /// Manhattan distance to the target.
        distance: u32,
        /// Attacker reach.
        reach: u32,
    },

    /// Unit has no combat strength.
    #[error("Unit {0} cannot attack")]
    NonCombatant(UnitId),

    /// Target belongs to the attacker's own civilization.
    #[error("Cannot attack a unit of the same civilization")]
    FriendlyTarget,

    /// Only settlers may found cities.
    #[error("Unit {0} is not a settler")]
    NotASettler(UnitId),

    /// Cities cannot be founded on water.
    #[error("Cannot found a city on water at {0}")]
    CannotFoundOnWater(HexCoord),

    /// Tile already hosts a city.
    #[error("Tile {0} already has a city")]
    TileHasCity(HexCoord),

    /// Tile outside the city's working radius.
    #[error("Tile {0} is not workable by this city")]
    TileNotWorkable(HexCoord),

    /// Tile is already worked by a city.
    #[error("Tile {coord} is already worked by city {city}")]
    TileAlreadyWorked {
        /// Contested tile.
        coord: HexCoord,
        /// City currently working it.
        city: CityId,
    },

    /// Building was already constructed in this city.
    #[error("Building {0:?} already constructed")]
    AlreadyBuilt(BuildingKind),

    /// Invalid construction-time configuration.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}
