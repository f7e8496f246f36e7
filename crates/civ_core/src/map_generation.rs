//! Procedural map generation.
//!
//! Maps are fully determined by the seed. The pipeline runs in a strict order
//! and every stage draws from the same [`MapRng`] stream, so the number and
//! order of draws is part of the output:
//!
//! 1. Fill the grid with ocean.
//! 2. Drop 3-5 continent seeds as plains, spaced apart.
//! 3. Grow land outward from the coasts of existing land until 30% of the
//!    map is land, choosing terrain by latitude.
//! 4. Turn ocean next to land into coast.
//! 5. Scatter hills, mountains, forest and jungle over land.
//!
//! Starting locations are then drawn from the same stream. Generation never
//! fails; a map too small for its targets just comes out sparser.

use serde::{Deserialize, Serialize};

use crate::hex_grid::{HexCoord, HexGrid};
use crate::math::straight_line_distance;
use crate::terrain::Terrain;

/// Share of tiles the expansion stage turns into land.
pub const LAND_FRACTION: f64 = 0.30;

/// Candidate draws per continent seed before giving up on it.
pub const MAX_SEED_ATTEMPTS: u32 = 1000;

/// Random tiles tried when searching for starting locations.
pub const MAX_START_ATTEMPTS: u32 = 1000;

/// Land tiles a starting location needs in its surrounding box.
pub const MIN_START_LAND_NEIGHBORS: usize = 5;

const LCG_MULTIPLIER: u64 = 9301;
const LCG_INCREMENT: u64 = 49297;
const LCG_MODULUS: u64 = 233_280;

/// Linear congruential generator used for map generation.
///
/// `state = (state * 9301 + 49297) mod 233280`, output `state / 233280`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapRng {
    state: u64,
}

impl MapRng {
    /// Seed the generator. Seeds are reduced modulo 233280, which yields the
    /// same sequence as starting from the unreduced seed.
    #[must_use]
    pub const fn new(seed: u64) -> Self {
        Self {
            state: seed % LCG_MODULUS,
        }
    }

    /// Next value in `[0, 1)`.
    pub fn next_f64(&mut self) -> f64 {
        self.state = (self.state * LCG_MULTIPLIER + LCG_INCREMENT) % LCG_MODULUS;
        self.state as f64 / LCG_MODULUS as f64
    }

    /// `floor(next * n)`, in `0..n` for `n > 0`.
    pub fn next_below(&mut self, n: u32) -> u32 {
        (self.next_f64() * f64::from(n)).floor() as u32
    }
}

/// What the generator produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationSummary {
    /// Accepted continent seeds.
    pub continent_seeds: Vec<HexCoord>,
    /// Land tiles after expansion.
    pub land_tiles: usize,
    /// Land tiles the expansion aimed for.
    pub target_land_tiles: usize,
}

/// Seeded terrain generator.
#[derive(Debug, Clone)]
pub struct MapGenerator {
    seed: u64,
    rng: MapRng,
}

impl MapGenerator {
    /// Create a generator for a seed.
    #[must_use]
    pub const fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: MapRng::new(seed),
        }
    }

    /// Seed this generator was created with.
    #[must_use]
    pub const fn seed(&self) -> u64 {
        self.seed
    }

    /// Run the full terrain pipeline on `grid`.
    pub fn generate(&mut self, grid: &mut HexGrid) -> GenerationSummary {
        self.fill_ocean(grid);
        if grid.is_empty() {
            return GenerationSummary {
                continent_seeds: Vec::new(),
                land_tiles: 0,
                target_land_tiles: 0,
            };
        }

        let continent_seeds = self.seed_continents(grid);
        let target_land_tiles = target_land_tiles(grid);
        let land_tiles = self.expand_continents(grid, continent_seeds.len(), target_land_tiles);
        self.add_coastlines(grid);
        self.add_details(grid);

        tracing::info!(
            seed = self.seed,
            width = grid.width(),
            height = grid.height(),
            continents = continent_seeds.len(),
            land_tiles,
            target_land_tiles,
            "Map generated"
        );

        GenerationSummary {
            continent_seeds,
            land_tiles,
            target_land_tiles,
        }
    }

    /// Stage 1: reset every tile to ocean.
    pub fn fill_ocean(&mut self, grid: &mut HexGrid) {
        grid.reset();
    }

    /// Stage 2: place 3-5 plains seeds at least `min(w, h) / 4` apart.
    ///
    /// A seed that cannot be placed within [`MAX_SEED_ATTEMPTS`] draws is
    /// skipped.
    pub fn seed_continents(&mut self, grid: &mut HexGrid) -> Vec<HexCoord> {
        let count = 3 + self.rng.next_below(3);
        let min_spacing = f64::from(grid.width().min(grid.height())) / 4.0;
        let (margin_x, span_x) = seed_band(grid.width());
        let (margin_y, span_y) = seed_band(grid.height());

        let mut seeds: Vec<HexCoord> = Vec::with_capacity(count as usize);
        for _ in 0..count {
            let mut placed = None;
            for _ in 0..MAX_SEED_ATTEMPTS {
                let candidate = HexCoord::new(
                    (self.rng.next_below(span_x) + margin_x) as i32,
                    (self.rng.next_below(span_y) + margin_y) as i32,
                );
                if seeds
                    .iter()
                    .all(|&s| straight_line_distance(s, candidate) >= min_spacing)
                {
                    placed = Some(candidate);
                    break;
                }
            }

            match placed {
                Some(coord) => {
                    grid.set_terrain(coord, Terrain::Plains);
                    seeds.push(coord);
                }
                None => tracing::debug!(placed = seeds.len(), "Continent seed skipped"),
            }
        }
        seeds
    }

    /// Stage 3: grow land from the coasts until `target` land tiles exist.
    ///
    /// Each of the `seeds` placed continent seeds counts as one land tile and
    /// one expansion pass per round. Returns the final land count.
    pub fn expand_continents(&mut self, grid: &mut HexGrid, seeds: usize, target: usize) -> usize {
        let mut land = seeds;

        while land < target {
            let mut candidates = Vec::new();
            for _ in 0..seeds {
                if land >= target {
                    break;
                }

                candidates = expandable_tiles(grid);
                if candidates.is_empty() {
                    continue;
                }

                let chance = ((target - land) as f64 / candidates.len() as f64).min(0.7);
                for &coord in &candidates {
                    if self.rng.next_f64() < chance {
                        let terrain = self.land_for_latitude(latitude(grid, coord.row));
                        grid.set_terrain(coord, terrain);
                        land += 1;
                        if land >= target {
                            break;
                        }
                    }
                }
            }

            if candidates.is_empty() {
                break;
            }
        }
        land
    }

    /// Stage 4: ocean touching land becomes coast.
    pub fn add_coastlines(&mut self, grid: &mut HexGrid) {
        let coasts: Vec<HexCoord> = grid
            .tiles()
            .filter(|t| t.terrain == Terrain::Ocean)
            .map(|t| t.coord)
            .filter(|&c| {
                grid.neighbors(c)
                    .into_iter()
                    .any(|n| grid.terrain(n).is_some_and(|t| !t.is_water()))
            })
            .collect();

        for coord in coasts {
            grid.set_terrain(coord, Terrain::Coast);
        }
    }

    /// Stage 5: hills, mountains, forest and jungle on land. Water is never
    /// touched.
    pub fn add_details(&mut self, grid: &mut HexGrid) {
        let land: Vec<(HexCoord, Terrain)> = grid
            .tiles()
            .filter(|t| !t.is_water())
            .map(|t| (t.coord, t.terrain))
            .collect();

        for (coord, terrain) in land {
            if self.rng.next_f64() < 0.12 {
                grid.set_terrain(coord, Terrain::Hills);
                continue;
            }
            if self.rng.next_f64() < 0.08 {
                grid.set_terrain(coord, Terrain::Mountains);
                continue;
            }
            if matches!(terrain, Terrain::Grass | Terrain::Plains) && self.rng.next_f64() < 0.25 {
                grid.set_terrain(coord, Terrain::Forest);
                continue;
            }
            if latitude(grid, coord.row) < 0.3
                && terrain == Terrain::Grass
                && self.rng.next_f64() < 0.3
            {
                grid.set_terrain(coord, Terrain::Jungle);
            }
        }
    }

    /// Draw up to `count` starting locations.
    ///
    /// A location qualifies when it is settleable land, lies at least
    /// `floor(min(w, h) / 3)` from every accepted location, and has at least
    /// [`MIN_START_LAND_NEIGHBORS`] land tiles within a 2-tile box. May return
    /// fewer than requested.
    pub fn find_starting_locations(&mut self, grid: &HexGrid, count: usize) -> Vec<HexCoord> {
        let mut locations = Vec::with_capacity(count);
        if grid.is_empty() {
            return locations;
        }
        let min_distance = f64::from(grid.width().min(grid.height()) / 3);

        let mut attempts = 0;
        while locations.len() < count && attempts < MAX_START_ATTEMPTS {
            attempts += 1;

            let coord = HexCoord::new(
                self.rng.next_below(grid.width()) as i32,
                self.rng.next_below(grid.height()) as i32,
            );
            let Some(terrain) = grid.terrain(coord) else {
                continue;
            };
            if !is_settleable(terrain) {
                continue;
            }
            if locations
                .iter()
                .any(|&l| straight_line_distance(l, coord) < min_distance)
            {
                continue;
            }

            let land_nearby = grid
                .square_ring(coord, 2)
                .into_iter()
                .filter(|&c| grid.terrain(c).is_some_and(|t| !t.is_water()))
                .count();
            if land_nearby >= MIN_START_LAND_NEIGHBORS {
                locations.push(coord);
            }
        }

        if locations.len() < count {
            tracing::warn!(
                requested = count,
                found = locations.len(),
                attempts,
                "Fewer starting locations than requested"
            );
        }
        locations
    }

    fn land_for_latitude(&mut self, latitude: f64) -> Terrain {
        let roll = self.rng.next_f64();
        if latitude > 0.8 {
            if roll < 0.7 {
                Terrain::Snow
            } else {
                Terrain::Tundra
            }
        } else if latitude > 0.6 {
            if roll < 0.6 {
                Terrain::Tundra
            } else {
                Terrain::Plains
            }
        } else if latitude > 0.4 {
            if roll < 0.6 {
                Terrain::Plains
            } else {
                Terrain::Grass
            }
        } else if latitude > 0.2 {
            if roll < 0.7 {
                Terrain::Grass
            } else {
                Terrain::Plains
            }
        } else if roll < 0.3 {
            Terrain::Desert
        } else if roll < 0.7 {
            Terrain::Plains
        } else {
            Terrain::Grass
        }
    }
}

/// Land the expansion stage aims for.
#[must_use]
pub fn target_land_tiles(grid: &HexGrid) -> usize {
    (grid.len() as f64 * LAND_FRACTION).floor() as usize
}

/// Distance from the equator: 0 on the middle row, 1 at the poles.
#[must_use]
pub fn latitude(grid: &HexGrid, row: i32) -> f64 {
    let half = f64::from(grid.height()) / 2.0;
    ((f64::from(row) - half) / half).abs()
}

/// Whether a civilization may start on this terrain.
#[must_use]
pub fn is_settleable(terrain: Terrain) -> bool {
    !terrain.is_water() && !matches!(terrain, Terrain::Mountains | Terrain::Snow | Terrain::Desert)
}

/// Margin and span for seed placement along one axis. Large maps keep seeds
/// five tiles off the edge; small maps shrink the margin to fit.
fn seed_band(dimension: u32) -> (u32, u32) {
    let margin = 5.min(dimension / 4);
    let span = dimension.saturating_sub(2 * margin).max(1);
    (margin, span)
}

fn expandable_tiles(grid: &HexGrid) -> Vec<HexCoord> {
    grid.tiles()
        .filter(|t| t.terrain == Terrain::Ocean)
        .map(|t| t.coord)
        .filter(|&c| {
            grid.neighbors(c)
                .into_iter()
                .any(|n| grid.terrain(n).is_some_and(|t| t != Terrain::Ocean))
        })
        .collect()
}
