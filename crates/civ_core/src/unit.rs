//! Units: the static unit catalog and per-unit turn state.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::civilization::CivId;
use crate::error::{GameError, Result};
use crate::hex_grid::{HexCoord, HexGrid, Tile};

/// Full health for a fresh unit.
pub const MAX_HEALTH: i32 = 100;

/// Unique identifier for a unit.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub struct UnitId(pub u32);

impl fmt::Display for UnitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Unit types available in the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnitType {
    /// Founds cities.
    Settler,
    /// Builds improvements.
    Worker,
    /// Basic melee.
    Warrior,
    /// Ranged infantry.
    Archer,
    /// Defensive melee.
    Spearman,
    /// Fast mounted melee.
    Horseman,
    /// Heavy melee.
    Swordsman,
    /// Siege, long range.
    Catapult,
    /// Early ship.
    Galley,
    /// Improved ship.
    Trireme,
}

/// Static statistics of a unit type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnitStats {
    /// Lookup key.
    pub key: &'static str,
    /// Display name.
    pub name: &'static str,
    /// Movement points per turn.
    pub moves: u32,
    /// Combat strength; zero means non-combatant.
    pub strength: u32,
    /// Attack range; zero means melee.
    pub range: u32,
    /// Production cost.
    pub cost: u32,
    /// Upkeep per turn.
    pub maintenance: u32,
    /// Moves on water only.
    pub is_naval: bool,
}

const fn stats(
    key: &'static str,
    name: &'static str,
    moves: u32,
    strength: u32,
    range: u32,
    cost: u32,
    maintenance: u32,
    is_naval: bool,
) -> UnitStats {
    UnitStats {
        key,
        name,
        moves,
        strength,
        range,
        cost,
        maintenance,
        is_naval,
    }
}

static SETTLER: UnitStats = stats("settler", "Settler", 2, 0, 0, 89, 1, false);
static WORKER: UnitStats = stats("worker", "Worker", 2, 0, 0, 70, 1, false);
static WARRIOR: UnitStats = stats("warrior", "Warrior", 2, 4, 0, 40, 1, false);
static ARCHER: UnitStats = stats("archer", "Archer", 2, 3, 2, 40, 1, false);
static SPEARMAN: UnitStats = stats("spearman", "Spearman", 2, 5, 0, 50, 1, false);
static HORSEMAN: UnitStats = stats("horseman", "Horseman", 4, 6, 0, 80, 2, false);
static SWORDSMAN: UnitStats = stats("swordsman", "Swordsman", 2, 8, 0, 90, 2, false);
static CATAPULT: UnitStats = stats("catapult", "Catapult", 1, 4, 3, 120, 3, false);
static GALLEY: UnitStats = stats("galley", "Galley", 3, 4, 0, 60, 1, true);
static TRIREME: UnitStats = stats("trireme", "Trireme", 4, 6, 0, 90, 2, true);

impl UnitType {
    /// All unit types in catalog order.
    pub const ALL: [UnitType; 10] = [
        UnitType::Settler,
        UnitType::Worker,
        UnitType::Warrior,
        UnitType::Archer,
        UnitType::Spearman,
        UnitType::Horseman,
        UnitType::Swordsman,
        UnitType::Catapult,
        UnitType::Galley,
        UnitType::Trireme,
    ];

    /// Catalog entry for this type.
    #[must_use]
    pub fn stats(self) -> &'static UnitStats {
        match self {
            UnitType::Settler => &SETTLER,
            UnitType::Worker => &WORKER,
            UnitType::Warrior => &WARRIOR,
            UnitType::Archer => &ARCHER,
            UnitType::Spearman => &SPEARMAN,
            UnitType::Horseman => &HORSEMAN,
            UnitType::Swordsman => &SWORDSMAN,
            UnitType::Catapult => &CATAPULT,
            UnitType::Galley => &GALLEY,
            UnitType::Trireme => &TRIREME,
        }
    }

    /// Resolve a key, falling back to warrior for anything unknown.
    #[must_use]
    pub fn from_key(key: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|t| t.stats().key == key)
            .unwrap_or(UnitType::Warrior)
    }

    /// Lookup key.
    #[must_use]
    pub fn key(self) -> &'static str {
        self.stats().key
    }

    /// Display name.
    #[must_use]
    pub fn name(self) -> &'static str {
        self.stats().name
    }

    /// Production cost.
    #[must_use]
    pub fn cost(self) -> u32 {
        self.stats().cost
    }
}

/// A unit on the map.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Unit {
    /// Unique id.
    pub id: UnitId,
    /// Catalog type.
    pub unit_type: UnitType,
    /// Owning civilization.
    pub owner: CivId,
    /// Current tile.
    pub position: HexCoord,
    /// Remaining health; the unit dies at zero.
    pub health: i32,
    /// Movement points left this turn.
    pub moves_left: u32,
    /// Movement points restored each turn.
    pub max_moves: u32,
    /// Combat strength.
    pub strength: u32,
    /// Attack range, zero for melee.
    pub range: u32,
    /// Water-only unit.
    pub is_naval: bool,
    /// Moved at least once this turn.
    pub has_moved: bool,
    /// Attacked this turn.
    pub has_attacked: bool,
}

impl Unit {
    /// Create a unit with full health and moves from the catalog.
    #[must_use]
    pub fn new(id: UnitId, unit_type: UnitType, owner: CivId, position: HexCoord) -> Self {
        let stats = unit_type.stats();
        Self {
            id,
            unit_type,
            owner,
            position,
            health: MAX_HEALTH,
            moves_left: stats.moves,
            max_moves: stats.moves,
            strength: stats.strength,
            range: stats.range,
            is_naval: stats.is_naval,
            has_moved: false,
            has_attacked: false,
        }
    }

    /// Restore moves and clear per-turn flags.
    pub fn reset_for_new_turn(&mut self) {
        self.moves_left = self.max_moves;
        self.has_moved = false;
        self.has_attacked = false;
    }

    /// Whether the unit can still act.
    #[must_use]
    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    /// Whether this unit can found a city.
    #[must_use]
    pub fn is_settler(&self) -> bool {
        self.unit_type == UnitType::Settler
    }

    /// Whether this unit can attack at all.
    #[must_use]
    pub fn is_combatant(&self) -> bool {
        self.strength > 0
    }

    /// Attack reach in Manhattan tiles. Melee units reach adjacent tiles.
    #[must_use]
    pub fn attack_reach(&self) -> u32 {
        self.range.max(1)
    }

    /// Whether a unit of this class may stand on the tile's terrain.
    #[must_use]
    pub fn can_enter(&self, tile: &Tile) -> bool {
        tile.terrain.is_navigable(self.is_naval)
    }

    /// Validate a move onto `tile`, returning the movement cost.
    pub fn check_move(&self, tile: &Tile) -> Result<u32> {
        if !self.can_enter(tile) {
            return Err(GameError::NotNavigable(tile.coord));
        }
        if tile.is_occupied() {
            return Err(GameError::TileOccupied(tile.coord));
        }
        let cost = tile.terrain.movement_cost_for(self.is_naval);
        if self.moves_left < cost {
            return Err(GameError::InsufficientMoves {
                needed: cost,
                available: self.moves_left,
            });
        }
        Ok(cost)
    }

    /// Whether a move onto `tile` would succeed.
    #[must_use]
    pub fn can_move_to(&self, tile: &Tile) -> bool {
        self.check_move(tile).is_ok()
    }

    /// Move onto `target`, updating tile occupancy.
    ///
    /// Nothing changes when the move is rejected.
    pub fn move_to(&mut self, grid: &mut HexGrid, target: HexCoord) -> Result<()> {
        let tile = grid.get_tile(target).ok_or(GameError::OutOfBounds(target))?;
        let cost = self.check_move(tile)?;

        if let Some(old) = grid.get_tile_mut(self.position) {
            if old.unit == Some(self.id) {
                old.unit = None;
            }
        }
        if let Some(new) = grid.get_tile_mut(target) {
            new.unit = Some(self.id);
        }

        tracing::debug!(
            unit = self.id.0,
            from = %self.position,
            to = %target,
            cost,
            "Unit moved"
        );

        self.position = target;
        self.moves_left -= cost;
        self.has_moved = true;
        Ok(())
    }

    /// Apply damage. Returns `true` if the unit died.
    pub fn take_damage(&mut self, amount: i32) -> bool {
        self.health -= amount;
        !self.is_alive()
    }

    /// Display fields for UI layers.
    #[must_use]
    pub fn summary(&self) -> UnitSummary {
        UnitSummary {
            id: self.id,
            name: self.unit_type.name().to_string(),
            position: self.position,
            health: self.health,
            moves_left: self.moves_left,
            max_moves: self.max_moves,
            strength: self.strength,
        }
    }
}

/// Display snapshot of a unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitSummary {
    /// Unit id.
    pub id: UnitId,
    /// Type name.
    pub name: String,
    /// Current tile.
    pub position: HexCoord,
    /// Health.
    pub health: i32,
    /// Moves left.
    pub moves_left: u32,
    /// Moves per turn.
    pub max_moves: u32,
    /// Combat strength.
    pub strength: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::terrain::Terrain;

    fn grid_with(terrain: &[(i32, i32, Terrain)]) -> HexGrid {
        let mut grid = HexGrid::new(6, 6, 32.0);
        for tile in grid.tiles_mut() {
            tile.terrain = Terrain::Grass;
        }
        for &(c, r, t) in terrain {
            grid.set_terrain(HexCoord::new(c, r), t);
        }
        grid
    }

    fn place(grid: &mut HexGrid, id: u32, unit_type: UnitType, col: i32, row: i32) -> Unit {
        let unit = Unit::new(UnitId(id), unit_type, CivId(0), HexCoord::new(col, row));
        if let Some(tile) = grid.get_tile_mut(unit.position) {
            tile.unit = Some(unit.id);
        }
        unit
    }

    #[test]
    fn test_catalog_lookup() {
        let horse = UnitType::Horseman.stats();
        assert_eq!((horse.moves, horse.strength, horse.cost), (4, 6, 80));
        assert!(UnitType::Trireme.stats().is_naval);
        assert_eq!(UnitType::from_key("catapult"), UnitType::Catapult);
        assert_eq!(UnitType::from_key("dragon"), UnitType::Warrior);
    }

    #[test]
    fn test_new_unit_from_catalog() {
        let unit = Unit::new(UnitId(1), UnitType::Archer, CivId(0), HexCoord::new(0, 0));
        assert_eq!(unit.health, MAX_HEALTH);
        assert_eq!(unit.moves_left, 2);
        assert_eq!(unit.range, 2);
        assert_eq!(unit.attack_reach(), 2);
        assert!(!unit.has_moved);

        let warrior = Unit::new(UnitId(2), UnitType::Warrior, CivId(0), HexCoord::new(0, 0));
        assert_eq!(warrior.attack_reach(), 1);
    }

    #[test]
    fn test_move_spends_terrain_cost() {
        let mut grid = grid_with(&[(2, 1, Terrain::Hills)]);
        let mut unit = place(&mut grid, 1, UnitType::Warrior, 1, 1);

        unit.move_to(&mut grid, HexCoord::new(2, 1)).unwrap();
        assert_eq!(unit.moves_left, 0);
        assert!(unit.has_moved);
        assert_eq!(unit.position, HexCoord::new(2, 1));
        assert_eq!(grid.get_tile(HexCoord::new(1, 1)).unwrap().unit, None);
        assert_eq!(grid.get_tile(HexCoord::new(2, 1)).unwrap().unit, Some(UnitId(1)));
    }

    #[test]
    fn test_move_rejected_without_enough_moves() {
        let mut grid = grid_with(&[(2, 1, Terrain::Hills)]);
        let mut unit = place(&mut grid, 1, UnitType::Catapult, 1, 1);

        let err = unit.move_to(&mut grid, HexCoord::new(2, 1)).unwrap_err();
        assert_eq!(
            err,
            GameError::InsufficientMoves {
                needed: 2,
                available: 1
            }
        );
        assert_eq!(unit.position, HexCoord::new(1, 1));
        assert_eq!(unit.moves_left, 1);
    }

    #[test]
    fn test_move_rejected_onto_impassable() {
        let mut grid = grid_with(&[(2, 1, Terrain::Mountains), (0, 1, Terrain::Ocean)]);
        let mut unit = place(&mut grid, 1, UnitType::Warrior, 1, 1);

        assert!(!unit.can_move_to(grid.get_tile(HexCoord::new(2, 1)).unwrap()));
        assert_eq!(
            unit.move_to(&mut grid, HexCoord::new(0, 1)),
            Err(GameError::NotNavigable(HexCoord::new(0, 1)))
        );
        assert!(!unit.has_moved);
    }

    #[test]
    fn test_move_rejected_onto_occupied() {
        let mut grid = grid_with(&[]);
        let mut a = place(&mut grid, 1, UnitType::Warrior, 1, 1);
        let _b = place(&mut grid, 2, UnitType::Warrior, 2, 1);

        assert_eq!(
            a.move_to(&mut grid, HexCoord::new(2, 1)),
            Err(GameError::TileOccupied(HexCoord::new(2, 1)))
        );
        assert_eq!(grid.get_tile(HexCoord::new(1, 1)).unwrap().unit, Some(UnitId(1)));
        assert_eq!(grid.get_tile(HexCoord::new(2, 1)).unwrap().unit, Some(UnitId(2)));
    }

    #[test]
    fn test_naval_unit_moves_on_water() {
        let mut grid = grid_with(&[(1, 1, Terrain::Coast), (2, 1, Terrain::Ocean)]);
        let mut galley = place(&mut grid, 1, UnitType::Galley, 1, 1);

        galley.move_to(&mut grid, HexCoord::new(2, 1)).unwrap();
        assert_eq!(galley.moves_left, 2);
        assert_eq!(
            galley.move_to(&mut grid, HexCoord::new(3, 1)),
            Err(GameError::NotNavigable(HexCoord::new(3, 1)))
        );
    }

    #[test]
    fn test_reset_for_new_turn() {
        let mut grid = grid_with(&[]);
        let mut unit = place(&mut grid, 1, UnitType::Warrior, 1, 1);
        unit.move_to(&mut grid, HexCoord::new(2, 1)).unwrap();
        unit.has_attacked = true;

        unit.reset_for_new_turn();
        assert_eq!(unit.moves_left, unit.max_moves);
        assert!(!unit.has_moved);
        assert!(!unit.has_attacked);
    }

    #[test]
    fn test_take_damage() {
        let mut unit = Unit::new(UnitId(1), UnitType::Warrior, CivId(0), HexCoord::new(0, 0));
        assert!(!unit.take_damage(40));
        assert_eq!(unit.health, 60);
        assert!(unit.take_damage(60));
        assert!(!unit.is_alive());
    }
}
