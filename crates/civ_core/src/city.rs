//! Cities: growth, yields, production and worked tiles.
//!
//! A city processes its turn in a fixed order: growth, then production,
//! then health. Unit orders cannot be delivered by the city alone (the unit
//! needs a free tile), so they surface as [`ProductionEvent::UnitReady`] and
//! stay queued until the caller confirms delivery with
//! [`City::complete_production`].

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::buildings::{total_bonus, BuildingKind, Yields};
use crate::civilization::CivId;
use crate::error::{GameError, Result};
use crate::hex_grid::{HexCoord, HexGrid};
use crate::production::ProductionOrder;
use crate::unit::UnitType;

/// Manhattan radius of a city's workable area.
pub const CITY_RADIUS: u32 = 2;

/// Health of a freshly founded city.
pub const CITY_MAX_HEALTH: u32 = 100;

/// Food needed for the first growth.
pub const BASE_FOOD_THRESHOLD: u32 = 10;

/// Extra food needed per point of population.
pub const FOOD_THRESHOLD_PER_POP: u32 = 5;

/// Unique identifier for a city.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub struct CityId(pub u32);

impl fmt::Display for CityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Production outcome of a single turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProductionEvent {
    /// Order finished and removed from the queue.
    Completed(ProductionOrder),
    /// Unit order has enough progress and waits for delivery.
    UnitReady(UnitType),
}

/// What happened to a city during its turn.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CityTurnReport {
    /// Population grew by one.
    pub grew: bool,
    /// Production outcome, if any.
    pub production: Option<ProductionEvent>,
}

/// A city.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct City {
    /// Unique id.
    pub id: CityId,
    /// Owning civilization.
    pub owner: CivId,
    /// City tile.
    pub position: HexCoord,
    /// Display name.
    pub name: String,
    /// Population, at least 1.
    pub population: u32,
    /// Health.
    pub health: u32,
    /// Stored food toward the next growth.
    pub food: u32,
    /// Food needed to grow.
    pub food_threshold: u32,
    /// Constructed buildings.
    pub buildings: BTreeSet<BuildingKind>,
    /// Current order.
    pub current_production: Option<ProductionOrder>,
    /// Progress toward the current order.
    pub production_progress: u32,
    /// Tiles in the working radius.
    pub workable_tiles: Vec<HexCoord>,
    /// Tiles assigned to citizens.
    pub worked_tiles: BTreeSet<HexCoord>,
}

impl City {
    /// Create a population-1 city. Call [`City::initialize_workable_tiles`]
    /// once the grid is known.
    #[must_use]
    pub fn new(id: CityId, owner: CivId, position: HexCoord, name: impl Into<String>) -> Self {
        Self {
            id,
            owner,
            position,
            name: name.into(),
            population: 1,
            health: CITY_MAX_HEALTH,
            food: 0,
            food_threshold: BASE_FOOD_THRESHOLD,
            buildings: BTreeSet::new(),
            current_production: None,
            production_progress: 0,
            workable_tiles: Vec::new(),
            worked_tiles: BTreeSet::new(),
        }
    }

    /// Precompute in-bounds tiles within [`CITY_RADIUS`].
    pub fn initialize_workable_tiles(&mut self, grid: &HexGrid) {
        self.workable_tiles = grid.tiles_within(self.position, CITY_RADIUS);
    }

    /// Full per-turn output.
    #[must_use]
    pub fn yields(&self) -> Yields {
        let base = Yields {
            food: self.population,
            production: self.population,
            science: self.population / 2,
            gold: self.population / 3,
            culture: 1,
        };
        base + total_bonus(&self.buildings)
    }

    /// Food per turn.
    #[must_use]
    pub fn food_production(&self) -> u32 {
        self.yields().food
    }

    /// Production per turn.
    #[must_use]
    pub fn production(&self) -> u32 {
        self.yields().production
    }

    /// Science per turn.
    #[must_use]
    pub fn science(&self) -> u32 {
        self.yields().science
    }

    /// Gold per turn.
    #[must_use]
    pub fn gold(&self) -> u32 {
        self.yields().gold
    }

    /// Culture per turn.
    #[must_use]
    pub fn culture(&self) -> u32 {
        self.yields().culture
    }

    /// Run growth, production and health for one turn.
    pub fn process_turn(&mut self) -> CityTurnReport {
        let grew = self.process_growth();
        let production = self.process_production();
        self.update_health();
        CityTurnReport { grew, production }
    }

    /// Add food and grow once if the threshold is reached.
    pub fn process_growth(&mut self) -> bool {
        self.food += self.food_production();
        if self.food < self.food_threshold {
            return false;
        }

        self.population += 1;
        self.food -= self.food_threshold;
        self.food_threshold = BASE_FOOD_THRESHOLD + self.population * FOOD_THRESHOLD_PER_POP;
        tracing::info!(city = %self.name, population = self.population, "City grew");
        true
    }

    /// Add production to the current order.
    pub fn process_production(&mut self) -> Option<ProductionEvent> {
        let order = self.current_production.as_ref()?;
        let cost = order.cost();
        let unit = match order {
            ProductionOrder::Unit(unit_type) => Some(*unit_type),
            _ => None,
        };

        self.production_progress += self.production();
        if self.production_progress < cost {
            return None;
        }

        match unit {
            Some(unit_type) => Some(ProductionEvent::UnitReady(unit_type)),
            None => self.complete_production().map(ProductionEvent::Completed),
        }
    }

    /// Finish the current order: buildings are added, progress resets and the
    /// queue empties. Returns the finished order.
    pub fn complete_production(&mut self) -> Option<ProductionOrder> {
        let order = self.current_production.take()?;
        match &order {
            ProductionOrder::Building(kind) => {
                self.buildings.insert(*kind);
            }
            ProductionOrder::Unit(_) | ProductionOrder::Wonder { .. } => {}
        }
        self.production_progress = 0;
        tracing::info!(city = %self.name, item = order.name(), "Production completed");
        Some(order)
    }

    /// Hook for health changes; health is currently stable.
    pub fn update_health(&mut self) {}

    /// Replace the current order. Progress always restarts from zero.
    pub fn set_production(&mut self, order: ProductionOrder) {
        tracing::debug!(city = %self.name, item = order.name(), "Production set");
        self.current_production = Some(order);
        self.production_progress = 0;
    }

    /// Add a building directly.
    pub fn add_building(&mut self, kind: BuildingKind) {
        self.buildings.insert(kind);
    }

    /// Whether a building is constructed.
    #[must_use]
    pub fn has_building(&self, kind: BuildingKind) -> bool {
        self.buildings.contains(&kind)
    }

    /// Whether a tile lies in the working radius.
    #[must_use]
    pub fn is_workable(&self, coord: HexCoord) -> bool {
        self.workable_tiles.contains(&coord)
    }

    /// Assign a citizen to a workable tile.
    ///
    /// Does not check other cities; see `Game::assign_citizen_to_tile`.
    pub fn assign_citizen_to_tile(&mut self, coord: HexCoord) -> Result<()> {
        if !self.is_workable(coord) {
            return Err(GameError::TileNotWorkable(coord));
        }
        self.worked_tiles.insert(coord);
        Ok(())
    }

    /// Release a worked tile. Returns `false` if it was not worked.
    pub fn remove_citizen_from_tile(&mut self, coord: HexCoord) -> bool {
        self.worked_tiles.remove(&coord)
    }

    /// Whether a citizen works the tile.
    #[must_use]
    pub fn is_tile_worked(&self, coord: HexCoord) -> bool {
        self.worked_tiles.contains(&coord)
    }

    /// Display fields for UI layers.
    #[must_use]
    pub fn summary(&self) -> CitySummary {
        CitySummary {
            id: self.id,
            name: self.name.clone(),
            position: self.position,
            population: self.population,
            health: self.health,
            food: self.food,
            food_threshold: self.food_threshold,
            yields: self.yields(),
            production: self.current_production.as_ref().map(|o| o.name().to_string()),
            production_progress: self.production_progress,
            production_cost: self.current_production.as_ref().map(ProductionOrder::cost),
            buildings: self.buildings.iter().map(|b| b.name().to_string()).collect(),
        }
    }
}

/// Display snapshot of a city.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CitySummary {
    /// City id.
    pub id: CityId,
    /// Name.
    pub name: String,
    /// City tile.
    pub position: HexCoord,
    /// Population.
    pub population: u32,
    /// Health.
    pub health: u32,
    /// Stored food.
    pub food: u32,
    /// Food needed to grow.
    pub food_threshold: u32,
    /// Per-turn output.
    pub yields: Yields,
    /// Current order name.
    pub production: Option<String>,
    /// Progress toward the current order.
    pub production_progress: u32,
    /// Cost of the current order.
    pub production_cost: Option<u32>,
    /// Constructed building names.
    pub buildings: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn city() -> City {
        City::new(CityId(1), CivId(0), HexCoord::new(5, 5), "Nova Roma")
    }

    #[test]
    fn test_new_city() {
        let city = city();
        assert_eq!(city.population, 1);
        assert_eq!(city.health, CITY_MAX_HEALTH);
        assert_eq!(city.food, 0);
        assert_eq!(city.food_threshold, 10);
        assert!(city.current_production.is_none());
    }

    #[test]
    fn test_base_yields() {
        let mut city = city();
        city.population = 7;
        let y = city.yields();
        assert_eq!(y.food, 7);
        assert_eq!(y.production, 7);
        assert_eq!(y.science, 3);
        assert_eq!(y.gold, 2);
        assert_eq!(y.culture, 1);
    }

    #[test]
    fn test_building_bonuses() {
        let mut city = city();
        for kind in BuildingKind::ALL {
            city.add_building(kind);
        }
        let y = city.yields();
        assert_eq!(y.food, 1 + 4);
        assert_eq!(y.production, 1 + 6);
        assert_eq!(y.science, 6);
        assert_eq!(y.gold, 6);
        assert_eq!(y.culture, 1 + 3);
        assert!(city.has_building(BuildingKind::Temple));
    }

    #[test]
    fn test_growth() {
        let mut city = city();
        city.food = 9;
        assert!(city.process_growth());
        assert_eq!(city.population, 2);
        assert_eq!(city.food, 0);
        assert_eq!(city.food_threshold, 20);
    }

    #[test]
    fn test_growth_carries_surplus() {
        let mut city = city();
        city.add_building(BuildingKind::Granary);
        city.food = 9;
        assert!(city.process_growth());
        assert_eq!(city.food, 2);
    }

    #[test]
    fn test_no_growth_below_threshold() {
        let mut city = city();
        assert!(!city.process_growth());
        assert_eq!(city.food, 1);
        assert_eq!(city.population, 1);
    }

    #[test]
    fn test_set_production_resets_progress() {
        let mut city = city();
        city.set_production(ProductionOrder::Building(BuildingKind::Monument));
        city.production_progress = 30;
        city.set_production(ProductionOrder::Building(BuildingKind::Temple));
        assert_eq!(city.production_progress, 0);
    }

    #[test]
    fn test_building_completes() {
        let mut city = city();
        city.set_production(ProductionOrder::Building(BuildingKind::Monument));
        city.production_progress = 39;

        let event = city.process_production();
        assert_eq!(
            event,
            Some(ProductionEvent::Completed(ProductionOrder::Building(
                BuildingKind::Monument
            )))
        );
        assert!(city.has_building(BuildingKind::Monument));
        assert_eq!(city.production_progress, 0);
        assert!(city.current_production.is_none());
    }

    #[test]
    fn test_unit_order_waits_for_delivery() {
        let mut city = city();
        city.set_production(ProductionOrder::Unit(UnitType::Warrior));
        city.production_progress = 39;

        assert_eq!(
            city.process_production(),
            Some(ProductionEvent::UnitReady(UnitType::Warrior))
        );
        assert_eq!(city.production_progress, 40);
        assert!(city.current_production.is_some());

        assert_eq!(
            city.complete_production(),
            Some(ProductionOrder::Unit(UnitType::Warrior))
        );
        assert_eq!(city.production_progress, 0);
    }

    #[test]
    fn test_no_production_without_order() {
        let mut city = city();
        assert_eq!(city.process_production(), None);
        assert_eq!(city.production_progress, 0);
    }

    #[test]
    fn test_process_turn_order() {
        let mut city = city();
        city.food = 9;
        city.set_production(ProductionOrder::Wonder {
            name: "Colossus".to_string(),
            cost: 2,
        });

        // Growth runs first, so production already uses population 2.
        let report = city.process_turn();
        assert!(report.grew);
        assert!(matches!(
            report.production,
            Some(ProductionEvent::Completed(ProductionOrder::Wonder { .. }))
        ));
    }

    #[test]
    fn test_workable_tiles_and_citizens() {
        let grid = HexGrid::new(10, 10, 32.0);
        let mut city = city();
        city.initialize_workable_tiles(&grid);
        assert_eq!(city.workable_tiles.len(), 13);

        assert!(city.assign_citizen_to_tile(HexCoord::new(6, 6)).is_ok());
        assert!(city.is_tile_worked(HexCoord::new(6, 6)));
        assert_eq!(
            city.assign_citizen_to_tile(HexCoord::new(7, 7)),
            Err(GameError::TileNotWorkable(HexCoord::new(7, 7)))
        );
        assert!(city.remove_citizen_from_tile(HexCoord::new(6, 6)));
        assert!(!city.remove_citizen_from_tile(HexCoord::new(6, 6)));
    }
}
