//! The game session.
//!
//! [`Game`] owns the grid and every civilization. Civilizations own their
//! units and cities; tiles refer to them by id. All mutation goes through
//! methods on `Game` so the two sides never drift apart:
//!
//! - a unit's position always names the one tile whose `unit` is that unit,
//! - a city's position always names the one tile whose `city` is that city.
//!
//! Fallible operations validate everything before touching state, so an
//! `Err` means nothing changed.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::city::{City, CityId, CITY_RADIUS};
use crate::civilization::{CivId, Civilization};
use crate::combat::{resolve_attack, validate_attack, AttackOutcome};
use crate::config::GameConfig;
use crate::error::{GameError, Result};
use crate::hex_grid::{HexCoord, HexGrid, Tile};
use crate::map_generation::{GenerationSummary, MapGenerator};
use crate::production::ProductionOrder;
use crate::turn::TurnManager;
use crate::unit::{Unit, UnitId, UnitType};

/// Civilizations assigned to starting locations, in turn order.
pub const CIVILIZATION_PRESETS: [(&str, &str, bool); 4] = [
    ("Rome", "#E71919", true),
    ("Egypt", "#EBCB00", false),
    ("Greece", "#00AEBB", false),
    ("China", "#FCBB00", false),
];

/// Names drawn for new cities.
pub const CITY_NAMES: [&str; 20] = [
    "Nova Roma",
    "Alexandria",
    "Athens",
    "Sparta",
    "Carthage",
    "Byzantium",
    "Babylon",
    "Ur",
    "Thebes",
    "Memphis",
    "Nineveh",
    "Persepolis",
    "Tyre",
    "Sidon",
    "Troy",
    "Mycenae",
    "Knossos",
    "Corinth",
    "Syracuse",
    "Ravenna",
];

/// A single in-memory game session.
#[derive(Debug, Clone)]
pub struct Game {
    config: GameConfig,
    pub(crate) grid: HexGrid,
    pub(crate) civilizations: Vec<Civilization>,
    pub(crate) turns: TurnManager,
    pub(crate) rng: ChaCha8Rng,
    next_unit_id: u32,
    next_city_id: u32,
    selected_tile: Option<HexCoord>,
    selected_unit: Option<UnitId>,
    starting_locations: Vec<HexCoord>,
    generation: Option<GenerationSummary>,
}

impl Game {
    /// Generate a map and place one settler per civilization.
    ///
    /// The player plus `starting_civilizations` AI civilizations are created,
    /// or fewer when the map has fewer starting locations.
    pub fn new(config: GameConfig) -> Result<Self> {
        config.validate()?;

        let mut grid = HexGrid::new(config.map_width, config.map_height, config.tile_size);
        let mut generator = MapGenerator::new(config.seed);
        let summary = generator.generate(&mut grid);
        let locations =
            generator.find_starting_locations(&grid, config.total_civilizations() as usize);

        let mut game = Self::with_grid(config, grid);
        game.generation = Some(summary);
        game.starting_locations.clone_from(&locations);

        for (i, &location) in locations.iter().enumerate() {
            let (name, color, is_player) = CIVILIZATION_PRESETS[i % CIVILIZATION_PRESETS.len()];
            let civ = game.add_civilization(name, color, is_player && i == 0);
            game.spawn_unit(civ, UnitType::Settler, location)?;
        }

        tracing::info!(
            civilizations = game.civilizations.len(),
            seed = game.config.seed,
            "Game created"
        );
        Ok(game)
    }

    /// Wrap an existing grid with no civilizations. Used to build scenarios.
    #[must_use]
    pub fn with_grid(config: GameConfig, grid: HexGrid) -> Self {
        let rng = ChaCha8Rng::seed_from_u64(config.seed);
        Self {
            config,
            grid,
            civilizations: Vec::new(),
            turns: TurnManager::new(),
            rng,
            next_unit_id: 1,
            next_city_id: 1,
            selected_tile: None,
            selected_unit: None,
            starting_locations: Vec::new(),
            generation: None,
        }
    }

    /// Construction-time configuration.
    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// The map.
    #[must_use]
    pub fn grid(&self) -> &HexGrid {
        &self.grid
    }

    /// Mutable map access for scenario setup. Changing occupancy or city
    /// links through this bypasses the game's bookkeeping.
    pub fn grid_mut(&mut self) -> &mut HexGrid {
        &mut self.grid
    }

    /// Tile lookup.
    #[must_use]
    pub fn tile(&self, coord: HexCoord) -> Option<&Tile> {
        self.grid.get_tile(coord)
    }

    /// Starting locations found during generation.
    #[must_use]
    pub fn starting_locations(&self) -> &[HexCoord] {
        &self.starting_locations
    }

    /// Generation result, when the map was generated by [`Game::new`].
    #[must_use]
    pub fn generation(&self) -> Option<&GenerationSummary> {
        self.generation.as_ref()
    }

    /// All civilizations in turn order.
    #[must_use]
    pub fn civilizations(&self) -> &[Civilization] {
        &self.civilizations
    }

    /// Civilization by id.
    #[must_use]
    pub fn civilization(&self, id: CivId) -> Option<&Civilization> {
        self.civilizations.get(id.index())
    }

    /// Civilization by id, mutably.
    pub fn civilization_mut(&mut self, id: CivId) -> Option<&mut Civilization> {
        self.civilizations.get_mut(id.index())
    }

    /// Add a civilization at the end of the turn order.
    pub fn add_civilization(&mut self, name: &str, color: &str, is_player: bool) -> CivId {
        let id = CivId(self.civilizations.len() as u32);
        self.civilizations
            .push(Civilization::new(id, name, color, is_player));
        id
    }

    /// Unit by id, searching every civilization.
    #[must_use]
    pub fn unit(&self, id: UnitId) -> Option<&Unit> {
        self.civilizations.iter().find_map(|c| c.unit(id))
    }

    /// City by id, searching every civilization.
    #[must_use]
    pub fn city(&self, id: CityId) -> Option<&City> {
        self.civilizations.iter().find_map(|c| c.city(id))
    }

    pub(crate) fn unit_owner_index(&self, id: UnitId) -> Result<usize> {
        self.civilizations
            .iter()
            .position(|c| c.unit(id).is_some())
            .ok_or(GameError::UnitNotFound(id))
    }

    pub(crate) fn city_owner_index(&self, id: CityId) -> Result<usize> {
        self.civilizations
            .iter()
            .position(|c| c.city(id).is_some())
            .ok_or(GameError::CityNotFound(id))
    }

    fn civ_index(&self, id: CivId) -> Result<usize> {
        if id.index() < self.civilizations.len() {
            Ok(id.index())
        } else {
            Err(GameError::CivilizationNotFound(id))
        }
    }

    /// Place a new unit on a free tile it can stand on.
    pub fn spawn_unit(&mut self, civ: CivId, unit_type: UnitType, at: HexCoord) -> Result<UnitId> {
        let civ_idx = self.civ_index(civ)?;
        let tile = self.grid.get_tile(at).ok_or(GameError::OutOfBounds(at))?;
        if !tile.terrain.is_navigable(unit_type.stats().is_naval) {
            return Err(GameError::NotNavigable(at));
        }
        if tile.is_occupied() {
            return Err(GameError::TileOccupied(at));
        }

        let id = UnitId(self.next_unit_id);
        self.next_unit_id += 1;

        if let Some(tile) = self.grid.get_tile_mut(at) {
            tile.unit = Some(id);
        }
        self.civilizations[civ_idx].add_unit(Unit::new(id, unit_type, civ, at));
        self.reveal_around(civ_idx, at, 1);

        tracing::debug!(unit = id.0, kind = unit_type.key(), civ = civ.0, at = %at, "Unit spawned");
        Ok(id)
    }

    /// Select a tile, and its unit when the unit belongs to the active
    /// civilization. Out-of-bounds coordinates leave the selection as is.
    pub fn select_tile(&mut self, coord: HexCoord) -> Option<&Tile> {
        let tile = self.grid.get_tile(coord)?;
        let active = self.turns.current_civ_index();
        self.selected_tile = Some(coord);
        self.selected_unit = tile.unit.filter(|&id| {
            self.civilizations
                .get(active)
                .is_some_and(|civ| civ.unit(id).is_some())
        });
        Some(tile)
    }

    /// Currently selected tile.
    #[must_use]
    pub fn selected_tile(&self) -> Option<HexCoord> {
        self.selected_tile
    }

    /// Currently selected unit.
    #[must_use]
    pub fn selected_unit(&self) -> Option<UnitId> {
        self.selected_unit
    }

    /// Move a unit onto a tile.
    ///
    /// The target must be on the grid, navigable for the unit, unoccupied,
    /// and affordable with the unit's remaining moves.
    pub fn move_unit(&mut self, id: UnitId, target: HexCoord) -> Result<()> {
        let civ_idx = self.unit_owner_index(id)?;
        let unit = self.civilizations[civ_idx]
            .unit_mut(id)
            .ok_or(GameError::UnitNotFound(id))?;
        unit.move_to(&mut self.grid, target)?;
        self.reveal_around(civ_idx, target, 1);
        Ok(())
    }

    /// Attack another civilization's unit.
    ///
    /// A destroyed defender is removed from its tile and its civilization.
    pub fn attack(&mut self, attacker: UnitId, defender: UnitId) -> Result<AttackOutcome> {
        let att_idx = self.unit_owner_index(attacker)?;
        let def_idx = self.unit_owner_index(defender)?;

        let defense = {
            let a = self.civilizations[att_idx]
                .unit(attacker)
                .ok_or(GameError::UnitNotFound(attacker))?;
            let d = self.civilizations[def_idx]
                .unit(defender)
                .ok_or(GameError::UnitNotFound(defender))?;
            validate_attack(a, d)?;
            self.grid.terrain(d.position).map_or(0, |t| t.info().defense)
        };

        let (att_civ, def_civ) =
            civ_pair_mut(&mut self.civilizations, att_idx, def_idx).ok_or(GameError::FriendlyTarget)?;
        let (Some(a), Some(d)) = (att_civ.unit_mut(attacker), def_civ.unit_mut(defender)) else {
            return Err(GameError::UnitNotFound(defender));
        };
        let outcome = resolve_attack(a, d, defense);

        if outcome.defender_destroyed {
            if let Some(dead) = def_civ.remove_unit(defender) {
                if let Some(tile) = self.grid.get_tile_mut(dead.position) {
                    tile.unit = None;
                }
                tracing::info!(unit = defender.0, at = %dead.position, "Unit destroyed");
            }
            if self.selected_unit == Some(defender) {
                self.selected_unit = None;
            }
        }
        Ok(outcome)
    }

    /// Turn a settler into a city on its tile.
    ///
    /// The city claims its tile and any unowned tile in its working radius.
    pub fn found_city(&mut self, settler: UnitId) -> Result<CityId> {
        let civ_idx = self.unit_owner_index(settler)?;
        let unit = self.civilizations[civ_idx]
            .unit(settler)
            .ok_or(GameError::UnitNotFound(settler))?;
        if !unit.is_settler() {
            return Err(GameError::NotASettler(settler));
        }
        let position = unit.position;
        let tile = self
            .grid
            .get_tile(position)
            .ok_or(GameError::OutOfBounds(position))?;
        if tile.is_water() {
            return Err(GameError::CannotFoundOnWater(position));
        }
        if tile.city.is_some() {
            return Err(GameError::TileHasCity(position));
        }

        let id = CityId(self.next_city_id);
        self.next_city_id += 1;
        let civ_id = self.civilizations[civ_idx].id;
        let name = self.generate_city_name(civ_idx);

        let mut city = City::new(id, civ_id, position, name);
        city.initialize_workable_tiles(&self.grid);
        for &coord in &city.workable_tiles {
            if let Some(tile) = self.grid.get_tile_mut(coord) {
                tile.owner.get_or_insert(civ_id);
            }
        }
        if let Some(tile) = self.grid.get_tile_mut(position) {
            tile.owner = Some(civ_id);
            tile.city = Some(id);
            tile.unit = None;
        }

        tracing::info!(city = %city.name, civ = %self.civilizations[civ_idx].name, at = %position, "City founded");

        let civ = &mut self.civilizations[civ_idx];
        civ.remove_unit(settler);
        civ.add_city(city);
        self.reveal_around(civ_idx, position, CITY_RADIUS);
        if self.selected_unit == Some(settler) {
            self.selected_unit = None;
        }
        Ok(id)
    }

    /// Replace a city's production order.
    pub fn set_production(&mut self, city: CityId, order: ProductionOrder) -> Result<()> {
        let civ_idx = self.city_owner_index(city)?;
        let target = self.civilizations[civ_idx]
            .city_mut(city)
            .ok_or(GameError::CityNotFound(city))?;
        if let ProductionOrder::Building(kind) = order {
            if target.has_building(kind) {
                return Err(GameError::AlreadyBuilt(kind));
            }
        }
        target.set_production(order);
        Ok(())
    }

    /// Work a tile from a city. A tile may be worked by one city at a time.
    pub fn assign_citizen_to_tile(&mut self, city: CityId, coord: HexCoord) -> Result<()> {
        if !self.grid.in_bounds(coord) {
            return Err(GameError::OutOfBounds(coord));
        }
        let civ_idx = self.city_owner_index(city)?;
        let worked_by = self
            .civilizations
            .iter()
            .flat_map(Civilization::cities)
            .find(|c| c.id != city && c.is_tile_worked(coord));
        if let Some(other) = worked_by {
            return Err(GameError::TileAlreadyWorked {
                coord,
                city: other.id,
            });
        }

        self.civilizations[civ_idx]
            .city_mut(city)
            .ok_or(GameError::CityNotFound(city))?
            .assign_citizen_to_tile(coord)
    }

    /// Stop working a tile. Returns `false` if the city was not working it.
    pub fn remove_citizen_from_tile(&mut self, city: CityId, coord: HexCoord) -> Result<bool> {
        let civ_idx = self.city_owner_index(city)?;
        Ok(self.civilizations[civ_idx]
            .city_mut(city)
            .ok_or(GameError::CityNotFound(city))?
            .remove_citizen_from_tile(coord))
    }

    /// Deliver a produced unit at a city: the city tile if possible, else the
    /// first free neighbor the unit can stand on.
    pub(crate) fn deliver_unit(
        &mut self,
        civ_idx: usize,
        city: CityId,
        unit_type: UnitType,
    ) -> Option<UnitId> {
        let position = self.civilizations[civ_idx].city(city)?.position;
        let is_naval = unit_type.stats().is_naval;
        let free = |grid: &HexGrid, c: HexCoord| {
            grid.get_tile(c)
                .is_some_and(|t| !t.is_occupied() && t.terrain.is_navigable(is_naval))
        };

        let spot = std::iter::once(position)
            .chain(self.grid.neighbors(position))
            .find(|&c| free(&self.grid, c))?;
        let civ = self.civilizations[civ_idx].id;
        self.spawn_unit(civ, unit_type, spot).ok()
    }

    fn generate_city_name(&mut self, civ_idx: usize) -> String {
        let base = CITY_NAMES[self.rng.gen_range(0..CITY_NAMES.len())];
        let existing = self.civilizations[civ_idx].cities().len();
        if existing > 0 {
            format!("{base} {}", existing + 1)
        } else {
            base.to_string()
        }
    }

    fn reveal_around(&mut self, civ_idx: usize, center: HexCoord, radius: u32) {
        let civ = &mut self.civilizations[civ_idx];
        for coord in self.grid.tiles_within(center, radius) {
            civ.discover_tile(coord);
        }
    }

    /// Deterministic hash of the whole game state.
    #[must_use]
    pub fn state_hash(&self) -> u64 {
        let mut hasher = DefaultHasher::new();

        self.turns.current_turn().hash(&mut hasher);
        self.turns.current_civ_index().hash(&mut hasher);
        self.next_unit_id.hash(&mut hasher);
        self.next_city_id.hash(&mut hasher);
        self.rng.get_word_pos().hash(&mut hasher);

        for tile in self.grid.tiles() {
            tile.hash(&mut hasher);
        }
        self.civilizations.hash(&mut hasher);

        let hash = hasher.finish();
        tracing::trace!(turn = self.turns.current_turn(), state_hash = hash, "Game state hash");
        hash
    }
}

/// Two distinct civilizations, mutably. `None` when `a == b`.
fn civ_pair_mut(
    civs: &mut [Civilization],
    a: usize,
    b: usize,
) -> Option<(&mut Civilization, &mut Civilization)> {
    match a.cmp(&b) {
        std::cmp::Ordering::Less => {
            let (left, right) = civs.split_at_mut(b);
            Some((&mut left[a], &mut right[0]))
        }
        std::cmp::Ordering::Greater => {
            let (left, right) = civs.split_at_mut(a);
            Some((&mut right[0], &mut left[b]))
        }
        std::cmp::Ordering::Equal => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buildings::BuildingKind;
    use crate::terrain::Terrain;

    fn land_game() -> (Game, CivId, CivId) {
        let mut grid = HexGrid::new(12, 12, 32.0);
        for tile in grid.tiles_mut() {
            tile.terrain = Terrain::Grass;
        }
        let mut game = Game::with_grid(GameConfig::default(), grid);
        let rome = game.add_civilization("Rome", "#E71919", true);
        let egypt = game.add_civilization("Egypt", "#EBCB00", false);
        (game, rome, egypt)
    }

    #[test]
    fn test_new_game_places_settlers() {
        let game = Game::new(GameConfig::default()).unwrap();
        assert!(!game.civilizations().is_empty());
        assert!(game.civilizations().len() <= 2);
        assert!(game.civilizations()[0].is_player);

        for civ in game.civilizations() {
            assert_eq!(civ.units().len(), 1);
            let settler = &civ.units()[0];
            assert!(settler.is_settler());
            assert_eq!(game.tile(settler.position).unwrap().unit, Some(settler.id));
            assert!(civ.has_discovered_tile(settler.position));
        }
    }

    #[test]
    fn test_new_game_rejects_bad_config() {
        let config = GameConfig::default().with_map_size(0, 0);
        assert!(matches!(Game::new(config), Err(GameError::InvalidConfig(_))));
    }

    #[test]
    fn test_new_game_rejects_huge_civilization_count() {
        let config = GameConfig::default()
            .with_map_size(10, 10)
            .with_ai_civilizations(u32::MAX);
        assert!(matches!(Game::new(config), Err(GameError::InvalidConfig(_))));
    }

    #[test]
    fn test_spawn_unit_validation() {
        let (mut game, rome, _) = land_game();
        game.grid_mut().set_terrain(HexCoord::new(0, 0), Terrain::Ocean);

        assert_eq!(
            game.spawn_unit(rome, UnitType::Warrior, HexCoord::new(0, 0)),
            Err(GameError::NotNavigable(HexCoord::new(0, 0)))
        );
        assert!(game.spawn_unit(rome, UnitType::Galley, HexCoord::new(0, 0)).is_ok());
        assert_eq!(
            game.spawn_unit(rome, UnitType::Galley, HexCoord::new(0, 0)),
            Err(GameError::TileOccupied(HexCoord::new(0, 0)))
        );
        assert_eq!(
            game.spawn_unit(CivId(9), UnitType::Warrior, HexCoord::new(1, 1)),
            Err(GameError::CivilizationNotFound(CivId(9)))
        );
    }

    #[test]
    fn test_select_tile() {
        let (mut game, rome, egypt) = land_game();
        let mine = game.spawn_unit(rome, UnitType::Warrior, HexCoord::new(2, 2)).unwrap();
        let theirs = game.spawn_unit(egypt, UnitType::Warrior, HexCoord::new(5, 5)).unwrap();

        assert!(game.select_tile(HexCoord::new(2, 2)).is_some());
        assert_eq!(game.selected_unit(), Some(mine));

        game.select_tile(HexCoord::new(5, 5));
        assert_eq!(game.selected_tile(), Some(HexCoord::new(5, 5)));
        assert_eq!(game.selected_unit(), None);
        assert_eq!(game.tile(HexCoord::new(5, 5)).unwrap().unit, Some(theirs));

        assert!(game.select_tile(HexCoord::new(40, 40)).is_none());
        assert_eq!(game.selected_tile(), Some(HexCoord::new(5, 5)));
    }

    #[test]
    fn test_move_unit_reveals_tiles() {
        let (mut game, rome, _) = land_game();
        let id = game.spawn_unit(rome, UnitType::Warrior, HexCoord::new(2, 2)).unwrap();

        game.move_unit(id, HexCoord::new(3, 2)).unwrap();
        let civ = game.civilization(rome).unwrap();
        assert!(civ.has_discovered_tile(HexCoord::new(4, 2)));
        assert_eq!(game.unit(id).unwrap().moves_left, 1);
        assert_eq!(game.tile(HexCoord::new(2, 2)).unwrap().unit, None);
    }

    #[test]
    fn test_move_unknown_unit() {
        let (mut game, _, _) = land_game();
        assert_eq!(
            game.move_unit(UnitId(77), HexCoord::new(1, 1)),
            Err(GameError::UnitNotFound(UnitId(77)))
        );
    }

    #[test]
    fn test_attack_destroys_defender() {
        let (mut game, rome, egypt) = land_game();
        let sword = game.spawn_unit(rome, UnitType::Swordsman, HexCoord::new(2, 2)).unwrap();
        let settler = game.spawn_unit(egypt, UnitType::Settler, HexCoord::new(3, 2)).unwrap();

        let first = game.attack(sword, settler).unwrap();
        assert_eq!(first.damage, 72);
        assert_eq!(
            game.attack(sword, settler),
            Err(GameError::AlreadyAttacked(sword))
        );

        game.civilization_mut(rome).unwrap().units_mut()[0].has_attacked = false;
        let second = game.attack(sword, settler).unwrap();
        assert!(second.defender_destroyed);
        assert!(game.unit(settler).is_none());
        assert_eq!(game.tile(HexCoord::new(3, 2)).unwrap().unit, None);
        assert_eq!(game.unit(sword).unwrap().moves_left, 0);
    }

    #[test]
    fn test_attack_friendly_rejected() {
        let (mut game, rome, _) = land_game();
        let a = game.spawn_unit(rome, UnitType::Warrior, HexCoord::new(2, 2)).unwrap();
        let b = game.spawn_unit(rome, UnitType::Warrior, HexCoord::new(3, 2)).unwrap();
        assert_eq!(game.attack(a, b), Err(GameError::FriendlyTarget));
        assert!(!game.unit(a).unwrap().has_attacked);
    }

    #[test]
    fn test_found_city_claims_territory() {
        let (mut game, rome, _) = land_game();
        let settler = game.spawn_unit(rome, UnitType::Settler, HexCoord::new(5, 5)).unwrap();

        let city = game.found_city(settler).unwrap();
        let tile = game.tile(HexCoord::new(5, 5)).unwrap();
        assert_eq!(tile.city, Some(city));
        assert_eq!(tile.unit, None);
        assert_eq!(tile.owner, Some(rome));
        assert_eq!(game.tile(HexCoord::new(7, 5)).unwrap().owner, Some(rome));
        assert_eq!(game.tile(HexCoord::new(8, 5)).unwrap().owner, None);

        let civ = game.civilization(rome).unwrap();
        assert!(civ.units().is_empty());
        assert_eq!(civ.cities().len(), 1);
        assert!(CITY_NAMES.contains(&civ.cities()[0].name.as_str()));
    }

    #[test]
    fn test_second_city_name_is_numbered() {
        let (mut game, rome, _) = land_game();
        let a = game.spawn_unit(rome, UnitType::Settler, HexCoord::new(1, 1)).unwrap();
        let b = game.spawn_unit(rome, UnitType::Settler, HexCoord::new(8, 8)).unwrap();
        game.found_city(a).unwrap();
        let second = game.found_city(b).unwrap();
        assert!(game.city(second).unwrap().name.ends_with(" 2"));
    }

    #[test]
    fn test_found_city_rejections() {
        let (mut game, rome, _) = land_game();
        let warrior = game.spawn_unit(rome, UnitType::Warrior, HexCoord::new(1, 1)).unwrap();
        assert_eq!(game.found_city(warrior), Err(GameError::NotASettler(warrior)));

        let settler = game.spawn_unit(rome, UnitType::Settler, HexCoord::new(4, 4)).unwrap();
        game.found_city(settler).unwrap();
        let again = game.spawn_unit(rome, UnitType::Settler, HexCoord::new(5, 4)).unwrap();
        game.move_unit(again, HexCoord::new(4, 4)).unwrap();
        assert_eq!(
            game.found_city(again),
            Err(GameError::TileHasCity(HexCoord::new(4, 4)))
        );
        assert!(game.unit(again).is_some());
    }

    #[test]
    fn test_set_production_rejects_existing_building() {
        let (mut game, rome, _) = land_game();
        let settler = game.spawn_unit(rome, UnitType::Settler, HexCoord::new(4, 4)).unwrap();
        let city = game.found_city(settler).unwrap();

        game.set_production(city, ProductionOrder::Building(BuildingKind::Library))
            .unwrap();
        game.civilization_mut(rome).unwrap().cities_mut()[0].add_building(BuildingKind::Granary);
        assert_eq!(
            game.set_production(city, ProductionOrder::Building(BuildingKind::Granary)),
            Err(GameError::AlreadyBuilt(BuildingKind::Granary))
        );
        assert_eq!(
            game.city(city).unwrap().current_production,
            Some(ProductionOrder::Building(BuildingKind::Library))
        );
    }

    #[test]
    fn test_worked_tiles_are_exclusive() {
        let (mut game, rome, egypt) = land_game();
        let a = game.spawn_unit(rome, UnitType::Settler, HexCoord::new(3, 3)).unwrap();
        let b = game.spawn_unit(egypt, UnitType::Settler, HexCoord::new(6, 3)).unwrap();
        let city_a = game.found_city(a).unwrap();
        let city_b = game.found_city(b).unwrap();

        let contested = HexCoord::new(5, 3);
        game.assign_citizen_to_tile(city_a, contested).unwrap();
        assert_eq!(
            game.assign_citizen_to_tile(city_b, contested),
            Err(GameError::TileAlreadyWorked {
                coord: contested,
                city: city_a
            })
        );

        assert!(game.remove_citizen_from_tile(city_a, contested).unwrap());
        assert!(game.assign_citizen_to_tile(city_b, contested).is_ok());
    }

    #[test]
    fn test_state_hash_tracks_changes() {
        let (mut game, rome, _) = land_game();
        let id = game.spawn_unit(rome, UnitType::Warrior, HexCoord::new(2, 2)).unwrap();
        let before = game.state_hash();
        assert_eq!(before, game.clone().state_hash());

        game.move_unit(id, HexCoord::new(3, 2)).unwrap();
        assert_ne!(before, game.state_hash());
    }
}
