//! Axial hex coordinates and the six hex facings.
//!
//! [`Hex`] is the fundamental position type used throughout Fusillade.
//! [`Direction`] enumerates the six facings of a flat-topped hex grid and
//! doubles as the scatter-direction die result (d6 faces map 1:1 onto
//! directions).

use glam::Vec2;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Horizontal spacing factor between adjacent columns of flat-topped hexes.
const COLUMN_SPACING: f32 = 1.5;

/// Vertical spacing factor between adjacent rows (`sqrt(3)`).
const ROW_SPACING: f32 = 1.732_050_8;

/// A position on the hex grid in axial coordinates.
///
/// `q` increases eastward, `r` increases southward. The implied cube
/// coordinate is `(q, -q - r, r)`, which gives the usual hex distance
/// formula.
///
/// # Ordering
///
/// Hexes order by `(q, r)`. Deterministic ordering matters because several
/// board structures iterate hexes in sorted order during resolution.
///
/// # Example
///
/// ```
/// use hexfield::Hex;
///
/// let a = Hex::new(0, 0);
/// let b = Hex::new(3, -1);
/// assert_eq!(a.distance(b), 3);
/// ```
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Hex {
    /// Axial column coordinate.
    pub q: i32,
    /// Axial row coordinate.
    pub r: i32,
}

impl Hex {
    /// Creates a hex from axial coordinates.
    #[must_use]
    pub const fn new(q: i32, r: i32) -> Self {
        Self { q, r }
    }

    /// Grid distance to another hex (number of hex steps).
    #[must_use]
    pub fn distance(self, other: Hex) -> u32 {
        let dq = self.q - other.q;
        let dr = self.r - other.r;
        let ds = dq + dr;
        (dq.abs() + dr.abs() + ds.abs()).unsigned_abs() / 2
    }

    /// The adjacent hex in the given direction.
    #[must_use]
    pub fn neighbor(self, direction: Direction) -> Self {
        self.displaced(direction, 1)
    }

    /// The hex reached by moving `distance` steps in `direction`.
    ///
    /// This is the displacement primitive behind artillery scatter: a
    /// scattered shot lands `distance` hexes away along one of the six
    /// grid axes.
    #[must_use]
    pub fn displaced(self, direction: Direction, distance: u32) -> Self {
        let (dq, dr) = direction.axial_delta();
        #[allow(clippy::cast_possible_wrap)]
        let d = distance as i32;
        Self::new(self.q + dq * d, self.r + dr * d)
    }

    /// Cartesian center of this hex with unit-radius flat-topped hexes.
    ///
    /// North is negative `y`, matching screen coordinates, so bearing math
    /// in [`crate::arc`] can use `Vec2` angles directly.
    #[must_use]
    pub fn to_cartesian(self) -> Vec2 {
        #[allow(clippy::cast_precision_loss)]
        let q = self.q as f32;
        #[allow(clippy::cast_precision_loss)]
        let r = self.r as f32;
        Vec2::new(COLUMN_SPACING * q, ROW_SPACING * (r + q / 2.0))
    }

    /// All six adjacent hexes, in direction order.
    #[must_use]
    pub fn neighbors(self) -> [Hex; 6] {
        [
            self.neighbor(Direction::North),
            self.neighbor(Direction::NorthEast),
            self.neighbor(Direction::SouthEast),
            self.neighbor(Direction::South),
            self.neighbor(Direction::SouthWest),
            self.neighbor(Direction::NorthWest),
        ]
    }

    /// All hexes within `radius` steps of this hex, including itself,
    /// in deterministic `(q, r)` scan order.
    #[must_use]
    pub fn within(self, radius: u32) -> Vec<Hex> {
        #[allow(clippy::cast_possible_wrap)]
        let radius = radius as i32;
        let mut hexes = Vec::new();
        for dq in -radius..=radius {
            let lo = (-radius).max(-dq - radius);
            let hi = radius.min(-dq + radius);
            for ds in lo..=hi {
                hexes.push(Hex::new(self.q + dq, self.r + ds));
            }
        }
        hexes
    }
}

impl fmt::Debug for Hex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Hex({}, {})", self.q, self.r)
    }
}

impl fmt::Display for Hex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.q, self.r)
    }
}

/// One of the six facings of a flat-topped hex grid, clockwise from north.
///
/// Directions serve double duty as scatter-die results: a d6 roll of 1
/// maps to `North` and so on clockwise, so a uniform d6 gives a uniform
/// scatter direction.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Facing 0: grid north.
    North,
    /// Facing 1: northeast.
    NorthEast,
    /// Facing 2: southeast.
    SouthEast,
    /// Facing 3: grid south.
    South,
    /// Facing 4: southwest.
    SouthWest,
    /// Facing 5: northwest.
    NorthWest,
}

impl Direction {
    /// All six directions in clockwise order from north.
    pub const ALL: [Direction; 6] = [
        Direction::North,
        Direction::NorthEast,
        Direction::SouthEast,
        Direction::South,
        Direction::SouthWest,
        Direction::NorthWest,
    ];

    /// Maps a facing index in `0..6` to a direction (wraps modulo 6).
    #[must_use]
    pub fn from_index(index: u32) -> Self {
        Self::ALL[(index % 6) as usize]
    }

    /// Maps a d6 face (1–6) to a direction.
    #[must_use]
    pub fn from_die(face: u32) -> Self {
        Self::from_index(face.wrapping_sub(1))
    }

    /// The facing index in `0..6`, clockwise from north.
    #[must_use]
    pub const fn index(self) -> u32 {
        match self {
            Self::North => 0,
            Self::NorthEast => 1,
            Self::SouthEast => 2,
            Self::South => 3,
            Self::SouthWest => 4,
            Self::NorthWest => 5,
        }
    }

    /// Axial coordinate delta of a single step in this direction.
    #[must_use]
    pub const fn axial_delta(self) -> (i32, i32) {
        match self {
            Self::North => (0, -1),
            Self::NorthEast => (1, -1),
            Self::SouthEast => (1, 0),
            Self::South => (0, 1),
            Self::SouthWest => (-1, 1),
            Self::NorthWest => (-1, 0),
        }
    }

    /// Rotates clockwise by `steps` facings.
    #[must_use]
    pub fn rotated(self, steps: u32) -> Self {
        Self::from_index(self.index() + steps)
    }

    /// The opposite facing.
    #[must_use]
    pub fn opposite(self) -> Self {
        self.rotated(3)
    }

    /// Unit vector of this facing in cartesian space (north is `-y`).
    #[must_use]
    pub fn to_vec2(self) -> Vec2 {
        #[allow(clippy::cast_precision_loss)]
        let angle = (self.index() as f32) * std::f32::consts::FRAC_PI_3;
        // Rotate (0, -1) clockwise by the facing angle.
        Vec2::new(angle.sin(), -angle.cos())
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::North => "N",
            Self::NorthEast => "NE",
            Self::SouthEast => "SE",
            Self::South => "S",
            Self::SouthWest => "SW",
            Self::NorthWest => "NW",
        };
        write!(f, "{name}")
    }
}
