//! Terrain catalog.
//!
//! Immutable per-terrain properties looked up by [`Terrain`]. Lookups by
//! string key never fail: unknown keys resolve to grassland.

use serde::{Deserialize, Serialize};

/// Movement cost marking a terrain as impassable for land units.
pub const IMPASSABLE: u32 = 999;

/// Movement cost naval units pay per water tile.
pub const NAVAL_MOVEMENT_COST: u32 = 1;

/// Terrain types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Terrain {
    /// Deep water.
    Ocean,
    /// Shallow water next to land.
    Coast,
    /// Grassland.
    Grass,
    /// Plains.
    Plains,
    /// Desert.
    Desert,
    /// Tundra.
    Tundra,
    /// Snow.
    Snow,
    /// Hills.
    Hills,
    /// Mountains.
    Mountains,
    /// Forest.
    Forest,
    /// Jungle.
    Jungle,
}

/// Static properties of a terrain type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TerrainInfo {
    /// Lookup key.
    pub key: &'static str,
    /// Display name.
    pub name: &'static str,
    /// Movement points a land unit spends to enter.
    pub movement_cost: u32,
    /// Defense modifier for units standing here.
    pub defense: u32,
    /// Food yield.
    pub food: u32,
    /// Production yield.
    pub production: u32,
    /// Commerce yield.
    pub commerce: u32,
    /// Water terrain.
    pub is_water: bool,
    /// Wooded terrain.
    pub is_forest: bool,
}

const fn info(
    key: &'static str,
    name: &'static str,
    movement_cost: u32,
    defense: u32,
    yields: (u32, u32, u32),
    is_water: bool,
    is_forest: bool,
) -> TerrainInfo {
    TerrainInfo {
        key,
        name,
        movement_cost,
        defense,
        food: yields.0,
        production: yields.1,
        commerce: yields.2,
        is_water,
        is_forest,
    }
}

static OCEAN: TerrainInfo = info("ocean", "Ocean", IMPASSABLE, 0, (1, 0, 2), true, false);
static COAST: TerrainInfo = info("coast", "Coast", IMPASSABLE, 0, (2, 0, 1), true, false);
static GRASS: TerrainInfo = info("grass", "Grassland", 1, 1, (2, 0, 0), false, false);
static PLAINS: TerrainInfo = info("plains", "Plains", 1, 1, (1, 1, 0), false, false);
static DESERT: TerrainInfo = info("desert", "Desert", 1, 1, (0, 1, 0), false, false);
static TUNDRA: TerrainInfo = info("tundra", "Tundra", 1, 1, (1, 0, 0), false, false);
static SNOW: TerrainInfo = info("snow", "Snow", 1, 1, (0, 0, 0), false, false);
static HILLS: TerrainInfo = info("hills", "Hills", 2, 3, (1, 1, 0), false, false);
static MOUNTAINS: TerrainInfo = info("mountains", "Mountains", IMPASSABLE, 6, (0, 1, 0), false, false);
static FOREST: TerrainInfo = info("forest", "Forest", 2, 3, (1, 2, 0), false, true);
static JUNGLE: TerrainInfo = info("jungle", "Jungle", 2, 3, (1, 0, 0), false, true);

impl Terrain {
    /// All terrain types in catalog order.
    pub const ALL: [Terrain; 11] = [
        Terrain::Ocean,
        Terrain::Coast,
        Terrain::Grass,
        Terrain::Plains,
        Terrain::Desert,
        Terrain::Tundra,
        Terrain::Snow,
        Terrain::Hills,
        Terrain::Mountains,
        Terrain::Forest,
        Terrain::Jungle,
    ];

    /// Catalog entry for this terrain.
    #[must_use]
    pub fn info(self) -> &'static TerrainInfo {
        match self {
            Terrain::Ocean => &OCEAN,
            Terrain::Coast => &COAST,
            Terrain::Grass => &GRASS,
            Terrain::Plains => &PLAINS,
            Terrain::Desert => &DESERT,
            Terrain::Tundra => &TUNDRA,
            Terrain::Snow => &SNOW,
            Terrain::Hills => &HILLS,
            Terrain::Mountains => &MOUNTAINS,
            Terrain::Forest => &FOREST,
            Terrain::Jungle => &JUNGLE,
        }
    }

    /// Resolve a key, falling back to grassland for anything unknown.
    #[must_use]
    pub fn from_key(key: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|t| t.info().key == key)
            .unwrap_or(Terrain::Grass)
    }

    /// Lookup key.
    #[must_use]
    pub fn key(self) -> &'static str {
        self.info().key
    }

    /// Whether this is water terrain.
    #[must_use]
    pub fn is_water(self) -> bool {
        self.info().is_water
    }

    /// Land movement cost from the catalog.
    #[must_use]
    pub fn movement_cost(self) -> u32 {
        self.info().movement_cost
    }

    /// Movement cost for a unit of the given class.
    ///
    /// Naval units pay [`NAVAL_MOVEMENT_COST`] on water; the catalog cost of
    /// water terrain applies to land units only.
    #[must_use]
    pub fn movement_cost_for(self, is_naval: bool) -> u32 {
        if is_naval && self.is_water() {
            NAVAL_MOVEMENT_COST
        } else {
            self.movement_cost()
        }
    }

    /// Whether a unit of the given class may enter this terrain at all.
    #[must_use]
    pub fn is_navigable(self, is_naval: bool) -> bool {
        if is_naval {
            self.is_water()
        } else {
            !self.is_water() && self.movement_cost() < IMPASSABLE
        }
    }

    /// Single-character glyph used by text renderers.
    #[must_use]
    pub fn glyph(self) -> char {
        match self {
            Terrain::Ocean => '~',
            Terrain::Coast => '-',
            Terrain::Grass => '"',
            Terrain::Plains => '.',
            Terrain::Desert => ':',
            Terrain::Tundra => ',',
            Terrain::Snow => '*',
            Terrain::Hills => 'n',
            Terrain::Mountains => '^',
            Terrain::Forest => 'f',
            Terrain::Jungle => 'j',
        }
    }
}

/// Key-based catalog lookup with the grassland fallback.
#[must_use]
pub fn terrain_info(key: &str) -> &'static TerrainInfo {
    Terrain::from_key(key).info()
}
