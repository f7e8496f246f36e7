//! Test fixtures and helpers.
//!
//! Pre-built grids and game sessions for consistent testing.

use civ_core::config::GameConfig;
use civ_core::game::Game;
use civ_core::hex_grid::{HexCoord, HexGrid};
use civ_core::terrain::Terrain;
use civ_core::turn::TurnReport;

/// Tile size used by every fixture grid.
pub const TEST_TILE_SIZE: f64 = 32.0;

/// Shorthand for a grid coordinate.
#[must_use]
pub const fn coord(col: i32, row: i32) -> HexCoord {
    HexCoord::new(col, row)
}

/// A grid covered with a single terrain.
#[must_use]
pub fn flat_grid(width: u32, height: u32, terrain: Terrain) -> HexGrid {
    let mut grid = HexGrid::new(width, height, TEST_TILE_SIZE);
    for tile in grid.tiles_mut() {
        tile.terrain = terrain;
    }
    grid
}

/// A game on a flat grid with the given civilizations and no units.
///
/// Each entry is `(name, is_player)`.
#[must_use]
pub fn flat_game(width: u32, height: u32, terrain: Terrain, civs: &[(&str, bool)]) -> Game {
    let config = GameConfig::default().with_map_size(width, height);
    let mut game = Game::with_grid(config, flat_grid(width, height, terrain));
    for &(name, is_player) in civs {
        game.add_civilization(name, "#FFFFFF", is_player);
    }
    game
}

/// A generated game with a player and `ai` computer civilizations.
///
/// # Panics
///
/// Panics if the configuration is rejected.
#[must_use]
pub fn generated_game(seed: u64, width: u32, height: u32, ai: u32) -> Game {
    let config = GameConfig::default()
        .with_seed(seed)
        .with_map_size(width, height)
        .with_ai_civilizations(ai);
    Game::new(config).expect("fixture config should be valid")
}

/// End one turn for every civilization, so the game returns to the
/// civilization that was active when the round began.
///
/// Stops early if the game has no civilizations.
pub fn play_round(game: &mut Game) -> Vec<TurnReport> {
    let count = game.civilizations().len();
    let mut reports = Vec::with_capacity(count);
    for _ in 0..count {
        match game.end_turn() {
            Ok(report) => reports.push(report),
            Err(err) => {
                tracing::warn!(%err, "Round stopped early");
                break;
            }
        }
    }
    reports
}

/// Play `rounds` full rounds.
pub fn play_rounds(game: &mut Game, rounds: u32) {
    for _ in 0..rounds {
        play_round(game);
    }
}
