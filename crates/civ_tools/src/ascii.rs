//! ASCII map renderer for terminal review.
//!
//! Each tile is one character. Odd rows are shifted half a cell to the right
//! so the offset layout reads like a hex map:
//!
//! ```text
//! ~ ~ - . . ~
//!  ~ - " ^ . ~
//! ```
//!
//! Cities are drawn with the owner's initial in upper case, units in lower
//! case, and starting locations (when requested) as digits.

use std::collections::BTreeMap;
use std::fmt::Write;

use civ_core::game::Game;
use civ_core::hex_grid::{HexCoord, HexGrid};
use civ_core::terrain::Terrain;

/// ASCII rendering options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AsciiConfig {
    /// Draw units and cities over terrain.
    pub show_entities: bool,
    /// Mark starting locations with their civilization index.
    pub show_starts: bool,
    /// Append a terrain legend.
    pub show_legend: bool,
}

impl Default for AsciiConfig {
    fn default() -> Self {
        Self {
            show_entities: true,
            show_starts: false,
            show_legend: true,
        }
    }
}

/// Render terrain only.
#[must_use]
pub fn render_grid(grid: &HexGrid) -> String {
    render_with_overlay(grid, &BTreeMap::new())
}

/// Render a game's map with the configured overlays.
#[must_use]
pub fn render_game(game: &Game, config: &AsciiConfig) -> String {
    let overlay = build_overlay(game, config);
    let mut out = render_with_overlay(game.grid(), &overlay);
    if config.show_legend {
        out.push_str(&legend());
    }
    out
}

/// Terrain legend, one glyph per line.
#[must_use]
pub fn legend() -> String {
    let mut out = String::from("\nLegend:\n");
    for terrain in Terrain::ALL {
        let _ = writeln!(out, "  {} {}", terrain.glyph(), terrain.info().name);
    }
    out.push_str("  A-Z city (owner initial), a-z unit, 0-9 starting location\n");
    out
}

fn build_overlay(game: &Game, config: &AsciiConfig) -> BTreeMap<HexCoord, char> {
    let mut overlay = BTreeMap::new();

    if config.show_starts {
        for (i, &start) in game.starting_locations().iter().enumerate() {
            let digit = u32::try_from(i % 10).ok().and_then(|d| char::from_digit(d, 10));
            if let Some(digit) = digit {
                overlay.insert(start, digit);
            }
        }
    }

    if config.show_entities {
        for civ in game.civilizations() {
            let initial = civ.name.chars().next().unwrap_or('?');
            for unit in civ.units() {
                overlay.insert(unit.position, initial.to_ascii_lowercase());
            }
            for city in civ.cities() {
                overlay.insert(city.position, initial.to_ascii_uppercase());
            }
        }
    }

    overlay
}

fn render_with_overlay(grid: &HexGrid, overlay: &BTreeMap<HexCoord, char>) -> String {
    let mut out = String::with_capacity(grid.len() * 2 + grid.height() as usize);
    for row in grid.rows() {
        let odd = row.first().is_some_and(|t| t.coord.is_odd_row());
        if odd {
            out.push(' ');
        }
        for (i, tile) in row.iter().enumerate() {
            if i > 0 {
                out.push(' ');
            }
            let glyph = overlay
                .get(&tile.coord)
                .copied()
                .unwrap_or_else(|| tile.terrain.glyph());
            out.push(glyph);
        }
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use civ_core::unit::UnitType;
    use civ_test_utils::fixtures::{coord, flat_game, flat_grid};

    #[test]
    fn test_render_grid_shape() {
        let grid = flat_grid(4, 3, Terrain::Ocean);
        let text = render_grid(&grid);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines, vec!["~ ~ ~ ~", " ~ ~ ~ ~", "~ ~ ~ ~"]);
    }

    #[test]
    fn test_render_game_marks_units_and_cities() {
        let mut game = flat_game(4, 2, Terrain::Ocean, &[("Rome", true)]);
        let civ = game.civilizations()[0].id;
        game.grid_mut().set_terrain(coord(0, 0), Terrain::Grass);
        game.grid_mut().set_terrain(coord(2, 0), Terrain::Grass);
        let settler = game.spawn_unit(civ, UnitType::Settler, coord(0, 0)).unwrap();
        game.found_city(settler).unwrap();
        game.spawn_unit(civ, UnitType::Warrior, coord(2, 0)).unwrap();

        let config = AsciiConfig {
            show_legend: false,
            ..AsciiConfig::default()
        };
        let text = render_game(&game, &config);
        assert_eq!(text.lines().next(), Some("R ~ r ~"));
    }

    #[test]
    fn test_legend_lists_every_terrain() {
        let legend = legend();
        for terrain in Terrain::ALL {
            assert!(legend.contains(terrain.info().name));
        }
    }
}
