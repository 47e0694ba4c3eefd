//! Playable-area bounds in offset coordinates.
//!
//! Game boards are rectangles of columns and rows. Axial coordinates are
//! converted to odd-q offset coordinates for the containment test, so a
//! `Bounds` of 16×17 matches a standard 16-column map sheet.

use serde::{Deserialize, Serialize};

use crate::coord::Hex;

/// Rectangular playable area.
///
/// A hex is inside the bounds when its offset column is in `0..width` and
/// its offset row is in `0..height`. Artillery scatter that lands outside
/// the bounds is discarded with no effect.
///
/// # Example
///
/// ```
/// use hexfield::{Bounds, Hex};
///
/// let bounds = Bounds::new(16, 17);
/// assert!(bounds.contains(Hex::new(0, 0)));
/// assert!(!bounds.contains(Hex::new(-1, 0)));
/// ```
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bounds {
    width: u32,
    height: u32,
}

impl Bounds {
    /// Creates bounds of `width` columns by `height` rows.
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Number of columns.
    #[must_use]
    pub const fn width(self) -> u32 {
        self.width
    }

    /// Number of rows.
    #[must_use]
    pub const fn height(self) -> u32 {
        self.height
    }

    /// Offset-coordinate `(column, row)` of an axial hex.
    #[must_use]
    pub const fn to_offset(hex: Hex) -> (i32, i32) {
        let col = hex.q;
        let row = hex.r + (hex.q - (hex.q & 1)) / 2;
        (col, row)
    }

    /// Whether the hex lies on the playable area.
    #[must_use]
    pub fn contains(self, hex: Hex) -> bool {
        let (col, row) = Self::to_offset(hex);
        #[allow(clippy::cast_possible_wrap)]
        let (w, h) = (self.width as i32, self.height as i32);
        col >= 0 && col < w && row >= 0 && row < h
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coord::Direction;

    #[test]
    fn origin_is_inside() {
        assert!(Bounds::new(1, 1).contains(Hex::new(0, 0)));
    }

    #[test]
    fn negative_columns_are_outside() {
        let bounds = Bounds::new(16, 17);
        assert!(!bounds.contains(Hex::new(-1, 3)));
    }

    #[test]
    fn far_edge_is_exclusive() {
        let bounds = Bounds::new(4, 4);
        assert!(!bounds.contains(Hex::new(4, 0)));
        assert!(!bounds.contains(Hex::new(0, 4)));
        assert!(bounds.contains(Hex::new(3, 2)));
    }

    #[test]
    fn walking_south_eventually_exits() {
        let bounds = Bounds::new(8, 8);
        let mut hex = Hex::new(2, 2);
        let mut steps = 0;
        while bounds.contains(hex) {
            hex = hex.neighbor(Direction::South);
            steps += 1;
            assert!(steps < 20, "never left the board");
        }
    }

    #[test]
    fn offset_conversion_handles_odd_columns() {
        // Column 1, axial r 0 sits on offset row 0 in odd-q layout.
        assert_eq!(Bounds::to_offset(Hex::new(1, 0)), (1, 0));
        assert_eq!(Bounds::to_offset(Hex::new(2, -1)), (2, 0));
    }
}
