//! Civilizations: ownership of units and cities plus empire-wide resources.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::city::{City, CityId, CitySummary};
use crate::hex_grid::HexCoord;
use crate::unit::{Unit, UnitId, UnitSummary};

/// Unique identifier for a civilization. Also its turn-order index.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub struct CivId(pub u32);

impl CivId {
    /// Index into the game's civilization list.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for CivId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Resources gained from one economy update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EconomyDelta {
    /// Gold gained.
    pub gold: u32,
    /// Science gained.
    pub science: u32,
    /// Culture gained.
    pub culture: u32,
}

/// A civilization taking part in the game.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Civilization {
    /// Unique id.
    pub id: CivId,
    /// Display name.
    pub name: String,
    /// Display color, `#RRGGBB`.
    pub color: String,
    /// Controlled by the human player.
    pub is_player: bool,
    units: Vec<Unit>,
    cities: Vec<City>,
    /// Treasury.
    pub gold: u32,
    /// Accumulated science.
    pub science: u32,
    /// Accumulated culture.
    pub culture: u32,
    technologies: BTreeSet<String>,
    discovered_tiles: BTreeSet<HexCoord>,
}

impl Civilization {
    /// Create an empty civilization.
    #[must_use]
    pub fn new(id: CivId, name: impl Into<String>, color: impl Into<String>, is_player: bool) -> Self {
        Self {
            id,
            name: name.into(),
            color: color.into(),
            is_player,
            units: Vec::new(),
            cities: Vec::new(),
            gold: 0,
            science: 0,
            culture: 0,
            technologies: BTreeSet::new(),
            discovered_tiles: BTreeSet::new(),
        }
    }

    /// Take ownership of a unit.
    pub fn add_unit(&mut self, mut unit: Unit) {
        unit.owner = self.id;
        self.units.push(unit);
    }

    /// Release a unit. Returns it if it was owned.
    pub fn remove_unit(&mut self, id: UnitId) -> Option<Unit> {
        let index = self.units.iter().position(|u| u.id == id)?;
        Some(self.units.remove(index))
    }

    /// Owned units in insertion order.
    #[must_use]
    pub fn units(&self) -> &[Unit] {
        &self.units
    }

    /// Owned units, mutably.
    pub fn units_mut(&mut self) -> &mut [Unit] {
        &mut self.units
    }

    /// Look up an owned unit.
    #[must_use]
    pub fn unit(&self, id: UnitId) -> Option<&Unit> {
        self.units.iter().find(|u| u.id == id)
    }

    /// Look up an owned unit, mutably.
    pub fn unit_mut(&mut self, id: UnitId) -> Option<&mut Unit> {
        self.units.iter_mut().find(|u| u.id == id)
    }

    /// Take ownership of a city.
    pub fn add_city(&mut self, mut city: City) {
        city.owner = self.id;
        self.cities.push(city);
    }

    /// Release a city. Returns it if it was owned.
    pub fn remove_city(&mut self, id: CityId) -> Option<City> {
        let index = self.cities.iter().position(|c| c.id == id)?;
        Some(self.cities.remove(index))
    }

    /// Owned cities in founding order.
    #[must_use]
    pub fn cities(&self) -> &[City] {
        &self.cities
    }

    /// Owned cities, mutably.
    pub fn cities_mut(&mut self) -> &mut [City] {
        &mut self.cities
    }

    /// Look up an owned city.
    #[must_use]
    pub fn city(&self, id: CityId) -> Option<&City> {
        self.cities.iter().find(|c| c.id == id)
    }

    /// Look up an owned city, mutably.
    pub fn city_mut(&mut self, id: CityId) -> Option<&mut City> {
        self.cities.iter_mut().find(|c| c.id == id)
    }

    /// Sum of city populations.
    #[must_use]
    pub fn total_population(&self) -> u32 {
        self.cities.iter().map(|c| c.population).sum()
    }

    /// Sum of city production.
    #[must_use]
    pub fn total_production(&self) -> u32 {
        self.cities.iter().map(City::production).sum()
    }

    /// Whether a technology is known.
    #[must_use]
    pub fn has_technology(&self, tech: &str) -> bool {
        self.technologies.contains(tech)
    }

    /// Learn a technology. Returns `false` if it was already known.
    pub fn add_technology(&mut self, tech: impl Into<String>) -> bool {
        self.technologies.insert(tech.into())
    }

    /// Known technologies, sorted.
    pub fn technologies(&self) -> impl Iterator<Item = &str> {
        self.technologies.iter().map(String::as_str)
    }

    /// Mark a tile as discovered.
    pub fn discover_tile(&mut self, coord: HexCoord) {
        self.discovered_tiles.insert(coord);
    }

    /// Whether a tile has been discovered.
    #[must_use]
    pub fn has_discovered_tile(&self, coord: HexCoord) -> bool {
        self.discovered_tiles.contains(&coord)
    }

    /// Number of discovered tiles.
    #[must_use]
    pub fn discovered_count(&self) -> usize {
        self.discovered_tiles.len()
    }

    /// Collect gold, science and culture from every city.
    pub fn update_economy(&mut self) -> EconomyDelta {
        let delta = self.cities.iter().fold(EconomyDelta::default(), |acc, city| {
            let y = city.yields();
            EconomyDelta {
                gold: acc.gold + y.gold,
                science: acc.science + y.science,
                culture: acc.culture + y.culture,
            }
        });

        self.gold += delta.gold;
        self.science += delta.science;
        self.culture += delta.culture;

        tracing::debug!(
            civ = %self.name,
            gold = delta.gold,
            science = delta.science,
            culture = delta.culture,
            "Economy updated"
        );
        delta
    }

    /// Spend gold if affordable. Returns `false` and changes nothing otherwise.
    pub fn spend_gold(&mut self, amount: u32) -> bool {
        if self.gold < amount {
            return false;
        }
        self.gold -= amount;
        true
    }

    /// Display fields for UI layers.
    #[must_use]
    pub fn summary(&self) -> CivilizationSummary {
        CivilizationSummary {
            id: self.id,
            name: self.name.clone(),
            color: self.color.clone(),
            is_player: self.is_player,
            gold: self.gold,
            science: self.science,
            culture: self.culture,
            population: self.total_population(),
            production: self.total_production(),
            discovered_tiles: self.discovered_count(),
            technologies: self.technologies.iter().cloned().collect(),
            cities: self.cities.iter().map(City::summary).collect(),
            units: self.units.iter().map(Unit::summary).collect(),
        }
    }
}

/// Display snapshot of a civilization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CivilizationSummary {
    /// Civilization id.
    pub id: CivId,
    /// Name.
    pub name: String,
    /// Color.
    pub color: String,
    /// Human-controlled.
    pub is_player: bool,
    /// Treasury.
    pub gold: u32,
    /// Accumulated science.
    pub science: u32,
    /// Accumulated culture.
    pub culture: u32,
    /// Total population.
    pub population: u32,
    /// Total production.
    pub production: u32,
    /// Number of discovered tiles.
    pub discovered_tiles: usize,
    /// Known technologies.
    pub technologies: Vec<String>,
    /// Cities.
    pub cities: Vec<CitySummary>,
    /// Units.
    pub units: Vec<UnitSummary>,
}
