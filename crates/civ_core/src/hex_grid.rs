//! Hex grid model in odd-row offset layout.
//!
//! Odd rows are shifted right by half a hex. Tiles are stored row-major and
//! every coordinate access is bounds-checked; out-of-range lookups return
//! `None` instead of panicking.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::city::CityId;
use crate::civilization::CivId;
use crate::terrain::Terrain;
use crate::unit::UnitId;

/// Tolerance, in hex fractions, absorbed when converting pixels back to hexes.
const PIXEL_EPSILON: f64 = 1e-6;

/// Neighbor offsets `(dcol, drow)` for odd rows.
const ODD_ROW_NEIGHBORS: [(i32, i32); 6] = [(-1, 0), (0, -1), (1, -1), (1, 0), (1, 1), (0, 1)];

/// Neighbor offsets `(dcol, drow)` for even rows.
const EVEN_ROW_NEIGHBORS: [(i32, i32); 6] = [(-1, 0), (-1, -1), (0, -1), (1, 0), (0, 1), (-1, 1)];

/// Offset coordinate of a tile.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub struct HexCoord {
    /// Column.
    pub col: i32,
    /// Row.
    pub row: i32,
}

impl HexCoord {
    /// Create a coordinate.
    #[must_use]
    pub const fn new(col: i32, row: i32) -> Self {
        Self { col, row }
    }

    /// Coordinate shifted by `(dcol, drow)`.
    #[must_use]
    pub const fn offset(self, dcol: i32, drow: i32) -> Self {
        Self::new(self.col + dcol, self.row + drow)
    }

    /// Whether this coordinate sits on a shifted (odd) row.
    #[must_use]
    pub const fn is_odd_row(self) -> bool {
        self.row & 1 == 1
    }
}

impl fmt::Display for HexCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.col, self.row)
    }
}

/// Pixel-space position of a hex anchor.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PixelPoint {
    /// Horizontal position.
    pub x: f64,
    /// Vertical position.
    pub y: f64,
}

impl PixelPoint {
    /// Create a point.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A single map cell.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tile {
    /// Position on the grid.
    pub coord: HexCoord,
    /// Terrain type.
    pub terrain: Terrain,
    /// Special resource, if any.
    pub resource: Option<String>,
    /// Worker-built improvement, if any.
    pub improvement: Option<String>,
    /// Civilization whose territory this is.
    pub owner: Option<CivId>,
    /// Occupying unit.
    pub unit: Option<UnitId>,
    /// City built here.
    pub city: Option<CityId>,
}

impl Tile {
    /// Fresh ocean tile.
    #[must_use]
    pub fn ocean(coord: HexCoord) -> Self {
        Self {
            coord,
            terrain: Terrain::Ocean,
            resource: None,
            improvement: None,
            owner: None,
            unit: None,
            city: None,
        }
    }

    /// Whether a unit stands here.
    #[must_use]
    pub fn is_occupied(&self) -> bool {
        self.unit.is_some()
    }

    /// Whether this tile's terrain is water.
    #[must_use]
    pub fn is_water(&self) -> bool {
        self.terrain.is_water()
    }
}

/// The map: a fixed-size rectangle of tiles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HexGrid {
    width: u32,
    height: u32,
    tile_size: f64,
    tiles: Vec<Tile>,
}

impl HexGrid {
    /// Create a grid of `width` by `height` ocean tiles.
    #[must_use]
    pub fn new(width: u32, height: u32, tile_size: f64) -> Self {
        let mut grid = Self {
            width,
            height,
            tile_size,
            tiles: Vec::new(),
        };
        grid.reset();
        grid
    }

    /// Re-initialize every tile to empty ocean.
    pub fn reset(&mut self) {
        let (width, height) = (self.width as i32, self.height as i32);
        self.tiles = (0..height)
            .flat_map(|row| (0..width).map(move |col| Tile::ocean(HexCoord::new(col, row))))
            .collect();
    }

    /// Width in tiles.
    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in tiles.
    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Hex radius in pixels.
    #[must_use]
    pub fn tile_size(&self) -> f64 {
        self.tile_size
    }

    /// Horizontal distance between adjacent hex anchors.
    #[must_use]
    pub fn hex_width(&self) -> f64 {
        3f64.sqrt() / 2.0 * self.hex_height()
    }

    /// Full hex height.
    #[must_use]
    pub fn hex_height(&self) -> f64 {
        self.tile_size * 2.0
    }

    /// Vertical distance between rows.
    #[must_use]
    pub fn vertical_distance(&self) -> f64 {
        self.tile_size * 1.5
    }

    /// Total number of tiles.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    /// Whether the grid has no tiles.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Whether a coordinate lies on the grid.
    #[must_use]
    pub fn in_bounds(&self, coord: HexCoord) -> bool {
        coord.col >= 0
            && coord.row >= 0
            && (coord.col as u32) < self.width
            && (coord.row as u32) < self.height
    }

    fn index(&self, coord: HexCoord) -> Option<usize> {
        self.in_bounds(coord)
            .then(|| coord.row as usize * self.width as usize + coord.col as usize)
    }

    /// Tile at a coordinate.
    #[must_use]
    pub fn get_tile(&self, coord: HexCoord) -> Option<&Tile> {
        self.index(coord).map(|i| &self.tiles[i])
    }

    /// Mutable tile at a coordinate.
    pub fn get_tile_mut(&mut self, coord: HexCoord) -> Option<&mut Tile> {
        self.index(coord).map(|i| &mut self.tiles[i])
    }

    /// Terrain at a coordinate.
    #[must_use]
    pub fn terrain(&self, coord: HexCoord) -> Option<Terrain> {
        self.get_tile(coord).map(|t| t.terrain)
    }

    /// Set the terrain of a tile. Returns `false` when out of bounds.
    pub fn set_terrain(&mut self, coord: HexCoord, terrain: Terrain) -> bool {
        match self.get_tile_mut(coord) {
            Some(tile) => {
                tile.terrain = terrain;
                true
            }
            None => false,
        }
    }

    /// All tiles in row-major order.
    pub fn tiles(&self) -> impl Iterator<Item = &Tile> {
        self.tiles.iter()
    }

    /// All tiles, mutably, in row-major order.
    pub fn tiles_mut(&mut self) -> impl Iterator<Item = &mut Tile> {
        self.tiles.iter_mut()
    }

    /// Rows of tiles, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Tile]> {
        self.tiles.chunks(self.width.max(1) as usize)
    }

    /// Anchor pixel of a hex.
    #[must_use]
    pub fn hex_to_pixel(&self, coord: HexCoord) -> PixelPoint {
        let offset = if coord.is_odd_row() {
            self.hex_width() / 2.0
        } else {
            0.0
        };
        PixelPoint::new(
            f64::from(coord.col) * self.hex_width() + offset,
            f64::from(coord.row) * self.vertical_distance(),
        )
    }

    /// Hex containing a pixel, clamped onto the grid.
    #[must_use]
    pub fn pixel_to_hex(&self, point: PixelPoint) -> HexCoord {
        let max_row = i64::from(self.height.saturating_sub(1));
        let max_col = i64::from(self.width.saturating_sub(1));

        let row = ((point.y / self.vertical_distance() + PIXEL_EPSILON).floor() as i64)
            .clamp(0, max_row);
        let offset = if row & 1 == 1 {
            self.hex_width() / 2.0
        } else {
            0.0
        };
        let col = (((point.x - offset) / self.hex_width() + PIXEL_EPSILON).floor() as i64)
            .clamp(0, max_col);

        HexCoord::new(col as i32, row as i32)
    }

    /// In-bounds neighbors of a coordinate, in fixed direction order.
    #[must_use]
    pub fn neighbors(&self, coord: HexCoord) -> Vec<HexCoord> {
        let offsets = if coord.is_odd_row() {
            &ODD_ROW_NEIGHBORS
        } else {
            &EVEN_ROW_NEIGHBORS
        };
        offsets
            .iter()
            .map(|&(dc, dr)| coord.offset(dc, dr))
            .filter(|&c| self.in_bounds(c))
            .collect()
    }

    /// Grid distance on raw offset coordinates.
    #[must_use]
    pub fn distance(a: HexCoord, b: HexCoord) -> u32 {
        let dx = (a.col - b.col).unsigned_abs();
        let dy = (a.row - b.row).unsigned_abs();
        (dx + dy + dx.abs_diff(dy)) / 2
    }

    /// In-bounds coordinates with `|dx| + |dy| <= radius`, centre included.
    #[must_use]
    pub fn tiles_within(&self, center: HexCoord, radius: u32) -> Vec<HexCoord> {
        let r = radius as i32;
        (-r..=r)
            .flat_map(|dy| (-r..=r).map(move |dx| (dx, dy)))
            .filter(|&(dx, dy)| dx.unsigned_abs() + dy.unsigned_abs() <= radius)
            .map(|(dx, dy)| center.offset(dx, dy))
            .filter(|&c| self.in_bounds(c))
            .collect()
    }

    /// In-bounds coordinates of the square box of `radius` around `center`,
    /// centre excluded.
    #[must_use]
    pub fn square_ring(&self, center: HexCoord, radius: u32) -> Vec<HexCoord> {
        let r = radius as i32;
        (-r..=r)
            .flat_map(|dy| (-r..=r).map(move |dx| (dx, dy)))
            .filter(|&(dx, dy)| dx != 0 || dy != 0)
            .map(|(dx, dy)| center.offset(dx, dy))
            .filter(|&c| self.in_bounds(c))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_new_grid_is_ocean() {
        let grid = HexGrid::new(6, 4, 32.0);
        assert_eq!(grid.len(), 24);
        assert!(grid.tiles().all(|t| t.terrain == Terrain::Ocean));
        assert_eq!(grid.rows().count(), 4);
    }

    #[test]
    fn test_get_tile_bounds() {
        let grid = HexGrid::new(5, 5, 32.0);
        assert!(grid.get_tile(HexCoord::new(4, 4)).is_some());
        assert!(grid.get_tile(HexCoord::new(5, 0)).is_none());
        assert!(grid.get_tile(HexCoord::new(0, -1)).is_none());
        assert_eq!(
            grid.get_tile(HexCoord::new(3, 2)).map(|t| t.coord),
            Some(HexCoord::new(3, 2))
        );
    }

    #[test]
    fn test_set_terrain_and_reset() {
        let mut grid = HexGrid::new(3, 3, 32.0);
        assert!(grid.set_terrain(HexCoord::new(1, 1), Terrain::Hills));
        assert!(!grid.set_terrain(HexCoord::new(3, 1), Terrain::Hills));
        assert_eq!(grid.terrain(HexCoord::new(1, 1)), Some(Terrain::Hills));

        grid.reset();
        assert_eq!(grid.terrain(HexCoord::new(1, 1)), Some(Terrain::Ocean));
    }

    #[test]
    fn test_dimensions() {
        let grid = HexGrid::new(2, 2, 32.0);
        assert!((grid.hex_height() - 64.0).abs() < 1e-9);
        assert!((grid.vertical_distance() - 48.0).abs() < 1e-9);
        assert!((grid.hex_width() - 3f64.sqrt() * 32.0).abs() < 1e-9);
    }

    #[test]
    fn test_hex_to_pixel_shifts_odd_rows() {
        let grid = HexGrid::new(4, 4, 32.0);
        let even = grid.hex_to_pixel(HexCoord::new(1, 0));
        let odd = grid.hex_to_pixel(HexCoord::new(1, 1));
        assert!((odd.x - even.x - grid.hex_width() / 2.0).abs() < 1e-9);
        assert!((odd.y - 48.0).abs() < 1e-9);
    }

    #[test]
    fn test_pixel_to_hex_clamps() {
        let grid = HexGrid::new(4, 3, 32.0);
        assert_eq!(
            grid.pixel_to_hex(PixelPoint::new(-500.0, -500.0)),
            HexCoord::new(0, 0)
        );
        assert_eq!(
            grid.pixel_to_hex(PixelPoint::new(1e6, 1e6)),
            HexCoord::new(3, 2)
        );
    }

    #[test]
    fn test_neighbors_even_row() {
        let grid = HexGrid::new(5, 5, 32.0);
        let n = grid.neighbors(HexCoord::new(2, 2));
        assert_eq!(
            n,
            vec![
                HexCoord::new(1, 2),
                HexCoord::new(1, 1),
                HexCoord::new(2, 1),
                HexCoord::new(3, 2),
                HexCoord::new(2, 3),
                HexCoord::new(1, 3),
            ]
        );
    }

    #[test]
    fn test_neighbors_odd_row() {
        let grid = HexGrid::new(5, 5, 32.0);
        let n = grid.neighbors(HexCoord::new(2, 1));
        assert_eq!(
            n,
            vec![
                HexCoord::new(1, 1),
                HexCoord::new(2, 0),
                HexCoord::new(3, 0),
                HexCoord::new(3, 1),
                HexCoord::new(3, 2),
                HexCoord::new(2, 2),
            ]
        );
    }

    #[test]
    fn test_neighbors_at_corner() {
        let grid = HexGrid::new(5, 5, 32.0);
        let n = grid.neighbors(HexCoord::new(0, 0));
        assert_eq!(n, vec![HexCoord::new(1, 0), HexCoord::new(0, 1)]);
    }

    #[test]
    fn test_distance() {
        let a = HexCoord::new(0, 0);
        assert_eq!(HexGrid::distance(a, a), 0);
        assert_eq!(HexGrid::distance(a, HexCoord::new(3, 1)), 3);
        assert_eq!(HexGrid::distance(a, HexCoord::new(1, 4)), 4);
        assert_eq!(HexGrid::distance(HexCoord::new(1, 4), a), 4);
    }

    #[test]
    fn test_tiles_within_radius() {
        let grid = HexGrid::new(10, 10, 32.0);
        assert_eq!(grid.tiles_within(HexCoord::new(5, 5), 2).len(), 13);
        assert_eq!(grid.tiles_within(HexCoord::new(0, 0), 2).len(), 6);
        assert!(grid
            .tiles_within(HexCoord::new(5, 5), 2)
            .contains(&HexCoord::new(5, 5)));
    }

    #[test]
    fn test_square_ring() {
        let grid = HexGrid::new(10, 10, 32.0);
        let ring = grid.square_ring(HexCoord::new(5, 5), 2);
        assert_eq!(ring.len(), 24);
        assert!(!ring.contains(&HexCoord::new(5, 5)));
        assert_eq!(grid.square_ring(HexCoord::new(0, 0), 2).len(), 8);
    }

    proptest! {
        #[test]
        fn prop_pixel_round_trip(
            width in 1u32..60,
            height in 1u32..60,
            tile_size in 4.0f64..64.0,
            col_frac in 0.0f64..1.0,
            row_frac in 0.0f64..1.0,
        ) {
            let grid = HexGrid::new(width, height, tile_size);
            let coord = HexCoord::new(
                (col_frac * f64::from(width)) as i32 % width as i32,
                (row_frac * f64::from(height)) as i32 % height as i32,
            );
            prop_assert_eq!(grid.pixel_to_hex(grid.hex_to_pixel(coord)), coord);
        }

        #[test]
        fn prop_neighbors_in_bounds(col in 0i32..12, row in 0i32..12) {
            let grid = HexGrid::new(12, 12, 32.0);
            let coord = HexCoord::new(col, row);
            let neighbors = grid.neighbors(coord);
            prop_assert!(neighbors.len() <= 6);
            for n in neighbors {
                prop_assert!(grid.in_bounds(n));
                prop_assert_ne!(n, coord);
            }
        }
    }
}
