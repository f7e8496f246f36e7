//! Headless autoplay.
//!
//! Builds a game from a config and plays whole rounds without input. The
//! human civilization either idles (its units stay put, its cities keep
//! working) or is handed to the AI.

use std::fmt::Write;

use civ_core::civilization::{Civilization, CivilizationSummary};
use civ_core::config::GameConfig;
use civ_core::error::Result;
use civ_core::game::Game;
use serde::{Deserialize, Serialize};

/// Autoplay settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AutoplayConfig {
    /// Rounds to play. Each round gives every civilization one turn.
    pub turns: u32,
    /// Let the AI play the human civilization too.
    pub ai_player: bool,
}

impl Default for AutoplayConfig {
    fn default() -> Self {
        Self {
            turns: 50,
            ai_player: false,
        }
    }
}

/// Outcome of an autoplay run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutoplayReport {
    /// Generation seed.
    pub seed: u64,
    /// Turn counter when play stopped.
    pub final_turn: u32,
    /// Cities founded during play.
    pub cities_founded: usize,
    /// State hash at the end, for determinism checks.
    pub state_hash: u64,
    /// Per-civilization standings.
    pub civilizations: Vec<CivilizationSummary>,
}

impl AutoplayReport {
    /// Pretty JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Plain-text standings table.
    #[must_use]
    pub fn to_text(&self) -> String {
        let mut out = format!(
            "Seed {} | turn {} | {} cities founded | hash {:016x}\n",
            self.seed, self.final_turn, self.cities_founded, self.state_hash
        );
        out.push_str("civilization   cities  pop  units  gold  science  culture\n");
        for civ in &self.civilizations {
            let _ = writeln!(
                out,
                "{:<14} {:>6} {:>4} {:>6} {:>5} {:>8} {:>8}{}",
                civ.name,
                civ.cities.len(),
                civ.population,
                civ.units.len(),
                civ.gold,
                civ.science,
                civ.culture,
                if civ.is_player { "  (player)" } else { "" }
            );
        }
        out
    }
}

/// Build a game from `config` and play it.
///
/// # Errors
///
/// Returns an error if the config is invalid or the map has no room for any
/// civilization.
pub fn run_autoplay(config: GameConfig, autoplay: &AutoplayConfig) -> Result<AutoplayReport> {
    let seed = config.seed;
    let mut game = Game::new(config)?;
    if autoplay.ai_player {
        let players: Vec<_> = game
            .civilizations()
            .iter()
            .filter(|c| c.is_player)
            .map(|c| c.id)
            .collect();
        for id in players {
            if let Some(civ) = game.civilization_mut(id) {
                civ.is_player = false;
            }
        }
    }

    let mut cities_founded = 0;
    let first = game.start_turn()?;
    cities_founded += first.ai.map_or(0, |ai| ai.cities_founded.len());

    let civ_count = game.civilizations().len();
    for _ in 0..autoplay.turns {
        for _ in 0..civ_count {
            let report = game.end_turn()?;
            cities_founded += report.ai.map_or(0, |ai| ai.cities_founded.len());
        }
        tracing::debug!(turn = game.current_turn(), "Round played");
    }

    tracing::info!(
        turn = game.current_turn(),
        cities = cities_founded,
        "Autoplay finished"
    );

    Ok(AutoplayReport {
        seed,
        final_turn: game.current_turn(),
        cities_founded,
        state_hash: game.state_hash(),
        civilizations: game.civilizations().iter().map(Civilization::summary).collect(),
    })
}
