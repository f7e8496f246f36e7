//! Computer-controlled civilizations.
//!
//! The AI is simple: settlers found a city when they stand on
//! decent land away from other cities, and every other unit wanders to a
//! random neighbouring tile. All randomness comes from the game's seeded
//! stream, so identical games make identical choices.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::city::CityId;
use crate::civilization::CivId;
use crate::error::{GameError, Result};
use crate::game::Game;
use crate::hex_grid::HexCoord;
use crate::map_generation::is_settleable;
use crate::unit::UnitId;

/// Settlers refuse to found a city this close (Manhattan) to an existing one.
pub const AI_CITY_SPACING: u32 = 3;

/// Chance that a settler on an acceptable site founds a city this turn.
pub const AI_FOUND_CHANCE: f64 = 0.5;

/// What an AI civilization did during its turn.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AiTurnReport {
    /// Cities founded by settlers.
    pub cities_founded: Vec<CityId>,
    /// Units that moved.
    pub units_moved: u32,
}

impl Game {
    /// Play one turn for a computer-controlled civilization.
    ///
    /// Units are visited in the order they were owned when the turn began.
    /// Units lost along the way are skipped.
    pub fn process_ai_turn(&mut self, civ: CivId) -> Result<AiTurnReport> {
        let units: Vec<UnitId> = self
            .civilization(civ)
            .ok_or(GameError::CivilizationNotFound(civ))?
            .units()
            .iter()
            .map(|u| u.id)
            .collect();

        let mut report = AiTurnReport::default();
        for id in units {
            let Some(unit) = self.unit(id) else {
                continue;
            };
            if unit.is_settler() && self.should_found_city(id) {
                match self.found_city(id) {
                    Ok(city) => {
                        report.cities_founded.push(city);
                        continue;
                    }
                    Err(err) => tracing::debug!(unit = id.0, %err, "AI settler could not found city"),
                }
            }
            if self.move_unit_randomly(id) {
                report.units_moved += 1;
            }
        }

        tracing::debug!(
            civ = civ.0,
            founded = report.cities_founded.len(),
            moved = report.units_moved,
            "AI turn processed"
        );
        Ok(report)
    }

    /// Whether an AI settler should found a city where it stands.
    ///
    /// Rejects water, desert, snow and mountains, and any site with a city
    /// within [`AI_CITY_SPACING`]. An acceptable site is taken on a coin flip.
    pub fn should_found_city(&mut self, settler: UnitId) -> bool {
        let Some(position) = self.unit(settler).map(|u| u.position) else {
            return false;
        };
        let Some(tile) = self.grid.get_tile(position) else {
            return false;
        };
        if !is_settleable(tile.terrain) {
            return false;
        }

        let city_nearby = self
            .grid
            .tiles_within(position, AI_CITY_SPACING)
            .into_iter()
            .filter_map(|coord| self.grid.get_tile(coord))
            .any(|tile| tile.city.is_some());
        if city_nearby {
            return false;
        }

        self.rng.gen_bool(AI_FOUND_CHANCE)
    }

    /// Move a unit that has not moved yet to a random free neighbour.
    /// Returns `true` if it moved.
    fn move_unit_randomly(&mut self, id: UnitId) -> bool {
        let Some(unit) = self.unit(id) else {
            return false;
        };
        if unit.has_moved {
            return false;
        }

        let candidates: Vec<HexCoord> = self
            .grid
            .neighbors(unit.position)
            .into_iter()
            .filter(|&coord| {
                self.grid
                    .get_tile(coord)
                    .is_some_and(|tile| !tile.is_occupied() && unit.can_enter(tile))
            })
            .collect();
        if candidates.is_empty() {
            return false;
        }

        let target = candidates[self.rng.gen_range(0..candidates.len())];
        match self.move_unit(id, target) {
            Ok(()) => true,
            Err(err) => {
                tracing::trace!(unit = id.0, to = %target, %err, "AI move rejected");
                false
            }
        }
    }
}
