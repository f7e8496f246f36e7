//! Numeric helpers shared by the rules.
//!
//! The rules measure distance three different ways:
//!
//! - [`HexGrid::distance`](crate::hex_grid::HexGrid::distance) on offset
//!   coordinates for general grid queries,
//! - [`manhattan_distance`] for combat reach, city radius and AI proximity,
//! - [`straight_line_distance`] for spacing during map generation.
//!
//! They do not agree on a staggered grid. Callers pick the one the rule was
//! balanced against; do not swap one for another.

use fixed::types::I32F32;

use crate::hex_grid::HexCoord;

/// Fixed-point number type for rule math that must round identically
/// everywhere (combat damage).
pub type Fixed = I32F32;

/// `|dx| + |dy|` on raw offset coordinates.
#[must_use]
pub fn manhattan_distance(a: HexCoord, b: HexCoord) -> u32 {
    (a.col - b.col).unsigned_abs() + (a.row - b.row).unsigned_abs()
}

/// Euclidean distance on raw offset coordinates.
#[must_use]
pub fn straight_line_distance(a: HexCoord, b: HexCoord) -> f64 {
    let dx = f64::from(a.col - b.col);
    let dy = f64::from(a.row - b.row);
    (dx * dx + dy * dy).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manhattan_distance() {
        let a = HexCoord::new(2, 3);
        assert_eq!(manhattan_distance(a, a), 0);
        assert_eq!(manhattan_distance(a, HexCoord::new(5, 1)), 5);
        assert_eq!(manhattan_distance(HexCoord::new(5, 1), a), 5);
    }

    #[test]
    fn test_straight_line_distance() {
        let d = straight_line_distance(HexCoord::new(0, 0), HexCoord::new(3, 4));
        assert!((d - 5.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_metrics_disagree_on_diagonals() {
        let a = HexCoord::new(0, 0);
        let b = HexCoord::new(2, 2);
        assert_eq!(manhattan_distance(a, b), 4);
        assert!(straight_line_distance(a, b) < 3.0);
    }
}
