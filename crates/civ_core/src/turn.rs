//! Turn sequencing.
//!
//! Civilizations act one at a time in a fixed order. Ending a turn hands
//! control to the next civilization; when the order wraps back to the first
//! one the turn counter increases.
//!
//! AI civilizations play their whole turn inside [`Game::start_turn`]. They
//! do not end their own turn: the caller decides when to move on, usually by
//! calling [`Game::advance_ai_turns`] after the player ends a turn.

use serde::{Deserialize, Serialize};

use crate::ai::AiTurnReport;
use crate::city::{CityId, CityTurnReport, ProductionEvent};
use crate::civilization::{CivId, Civilization, EconomyDelta};
use crate::error::{GameError, Result};
use crate::game::Game;
use crate::unit::UnitId;

/// Turn counter and active civilization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TurnManager {
    current_turn: u32,
    current_civ_index: usize,
}

impl Default for TurnManager {
    fn default() -> Self {
        Self::new()
    }
}

impl TurnManager {
    /// Turn 1, first civilization.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            current_turn: 1,
            current_civ_index: 0,
        }
    }

    /// Current turn number, starting at 1.
    #[must_use]
    pub const fn current_turn(&self) -> u32 {
        self.current_turn
    }

    /// Index of the active civilization.
    #[must_use]
    pub const fn current_civ_index(&self) -> usize {
        self.current_civ_index
    }

    /// Hand control to the next of `civ_count` civilizations. Returns `true`
    /// when a new turn began.
    pub fn advance(&mut self, civ_count: usize) -> bool {
        if civ_count == 0 {
            return false;
        }
        self.current_civ_index = (self.current_civ_index + 1) % civ_count;
        if self.current_civ_index == 0 {
            self.current_turn += 1;
            true
        } else {
            false
        }
    }
}

/// One city's results within a turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CityReport {
    /// City.
    pub city: CityId,
    /// Growth and production outcome.
    pub report: CityTurnReport,
    /// Unit delivered from a finished unit order.
    pub delivered: Option<UnitId>,
}

/// Everything that happened when a civilization's turn started.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnReport {
    /// Turn number.
    pub turn: u32,
    /// Civilization that became active.
    pub civ: CivId,
    /// Per-city results, in founding order.
    pub cities: Vec<CityReport>,
    /// Resources collected.
    pub economy: EconomyDelta,
    /// AI actions, for computer-controlled civilizations.
    pub ai: Option<AiTurnReport>,
}

impl Game {
    /// Current turn number.
    #[must_use]
    pub fn current_turn(&self) -> u32 {
        self.turns.current_turn()
    }

    /// Index of the active civilization.
    #[must_use]
    pub fn current_civ_index(&self) -> usize {
        self.turns.current_civ_index()
    }

    /// The active civilization.
    #[must_use]
    pub fn current_civilization(&self) -> Option<&Civilization> {
        self.civilizations.get(self.turns.current_civ_index())
    }

    /// Begin the active civilization's turn.
    ///
    /// Units get their moves back, cities grow and produce, the economy is
    /// collected, and an AI civilization then plays its units.
    pub fn start_turn(&mut self) -> Result<TurnReport> {
        let civ_idx = self.turns.current_civ_index();
        let civ = self
            .civilizations
            .get_mut(civ_idx)
            .ok_or(GameError::NoCivilizations)?;
        let civ_id = civ.id;
        let is_player = civ.is_player;

        tracing::info!(turn = self.turns.current_turn(), civ = %civ.name, "Turn started");

        for unit in civ.units_mut() {
            unit.reset_for_new_turn();
        }

        let cities = self.process_cities(civ_idx);
        let economy = self.civilizations[civ_idx].update_economy();
        let ai = if is_player {
            None
        } else {
            Some(self.process_ai_turn(civ_id)?)
        };

        Ok(TurnReport {
            turn: self.turns.current_turn(),
            civ: civ_id,
            cities,
            economy,
            ai,
        })
    }

    /// End the active civilization's turn and start the next one.
    pub fn end_turn(&mut self) -> Result<TurnReport> {
        if self.civilizations.is_empty() {
            return Err(GameError::NoCivilizations);
        }
        if self.turns.advance(self.civilizations.len()) {
            tracing::info!(turn = self.turns.current_turn(), "New turn");
        }
        self.start_turn()
    }

    /// End turns while an AI civilization is active, stopping at the player.
    ///
    /// At most one full rotation is played per call, so a game without a
    /// human player advances one turn at a time.
    pub fn advance_ai_turns(&mut self) -> Result<Vec<TurnReport>> {
        let mut reports = Vec::new();
        for _ in 0..self.civilizations.len() {
            let ai_active = self
                .current_civilization()
                .is_some_and(|civ| !civ.is_player);
            if !ai_active {
                break;
            }
            reports.push(self.end_turn()?);
        }
        Ok(reports)
    }

    fn process_cities(&mut self, civ_idx: usize) -> Vec<CityReport> {
        let ids: Vec<CityId> = self.civilizations[civ_idx]
            .cities()
            .iter()
            .map(|c| c.id)
            .collect();

        let mut reports = Vec::with_capacity(ids.len());
        for id in ids {
            let Some(city) = self.civilizations[civ_idx].city_mut(id) else {
                continue;
            };
            let report = city.process_turn();

            let mut delivered = None;
            if let Some(ProductionEvent::UnitReady(unit_type)) = report.production {
                delivered = self.deliver_unit(civ_idx, id, unit_type);
                match delivered {
                    Some(_) => {
                        if let Some(city) = self.civilizations[civ_idx].city_mut(id) {
                            city.complete_production();
                        }
                    }
                    None => tracing::warn!(
                        city = id.0,
                        unit = unit_type.key(),
                        "No free tile for produced unit, delivery postponed"
                    ),
                }
            }

            reports.push(CityReport {
                city: id,
                report,
                delivered,
            });
        }
        reports
    }
}
