//! Firing-arc classification relative to a unit facing.
//!
//! Arcs partition the plane around a unit into nose, left side, right side,
//! and aft sectors of 120°, 120°, and the nose/aft 60° boundaries shared
//! generously: a bearing that falls exactly on a sector boundary counts for
//! both adjacent arcs, matching tabletop arc diagrams where boundary hex
//! rows belong to either arc.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::coord::{Direction, Hex};

/// Nose sector half-angle in degrees.
const NOSE_HALF_ANGLE: f32 = 60.0;

/// Bearings at or beyond this angle from the facing are aft.
const AFT_ANGLE: f32 = 120.0;

/// A weapon or interceptor firing arc.
///
/// # Example
///
/// ```
/// use hexfield::{Direction, FiringArc, Hex};
///
/// let origin = Hex::new(0, 0);
/// let ahead = Hex::new(0, -4);
/// assert!(FiringArc::Nose.contains(Direction::North, origin, ahead));
/// assert!(!FiringArc::Aft.contains(Direction::North, origin, ahead));
/// ```
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FiringArc {
    /// Forward 120° sector centered on the facing.
    Nose,
    /// Port-side sector.
    LeftSide,
    /// Starboard-side sector.
    RightSide,
    /// Rear 120° sector.
    Aft,
}

impl FiringArc {
    /// Signed bearing in degrees from `facing` to the target, positive
    /// clockwise. Returns `None` when origin and target coincide.
    fn bearing_degrees(facing: Direction, origin: Hex, target: Hex) -> Option<f32> {
        let to_target = target.to_cartesian() - origin.to_cartesian();
        if to_target.length_squared() < 1e-9 {
            return None;
        }
        let f = facing.to_vec2();
        let cross = f.x * to_target.y - f.y * to_target.x;
        let dot = f.dot(to_target);
        Some(cross.atan2(dot).to_degrees())
    }

    /// Whether a target hex lies within this arc for a unit at `origin`
    /// facing `facing`.
    ///
    /// A target in the unit's own hex is treated as being in every arc:
    /// point-blank attacks are engageable by any mounted interceptor.
    #[must_use]
    pub fn contains(self, facing: Direction, origin: Hex, target: Hex) -> bool {
        let Some(bearing) = Self::bearing_degrees(facing, origin, target) else {
            return true;
        };
        let magnitude = bearing.abs();
        match self {
            Self::Nose => magnitude <= NOSE_HALF_ANGLE + f32::EPSILON,
            Self::Aft => magnitude >= AFT_ANGLE - f32::EPSILON,
            Self::RightSide => {
                bearing >= NOSE_HALF_ANGLE - f32::EPSILON && bearing <= AFT_ANGLE + f32::EPSILON
            }
            Self::LeftSide => {
                bearing <= -(NOSE_HALF_ANGLE - f32::EPSILON)
                    && bearing >= -(AFT_ANGLE + f32::EPSILON)
            }
        }
    }
}

impl fmt::Display for FiringArc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Nose => "nose",
            Self::LeftSide => "left side",
            Self::RightSide => "right side",
            Self::Aft => "aft",
        };
        write!(f, "{name}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ORIGIN: Hex = Hex::new(0, 0);

    #[test]
    fn dead_ahead_is_nose_only_forward() {
        let ahead = Hex::new(0, -5);
        assert!(FiringArc::Nose.contains(Direction::North, ORIGIN, ahead));
        assert!(!FiringArc::Aft.contains(Direction::North, ORIGIN, ahead));
    }

    #[test]
    fn dead_astern_is_aft() {
        let astern = Hex::new(0, 5);
        assert!(FiringArc::Aft.contains(Direction::North, ORIGIN, astern));
        assert!(!FiringArc::Nose.contains(Direction::North, ORIGIN, astern));
    }

    #[test]
    fn east_is_right_side_when_facing_north() {
        // Cartesian east of the origin, beyond the nose boundary.
        let east = Hex::new(4, -2);
        assert!(FiringArc::RightSide.contains(Direction::North, ORIGIN, east));
        assert!(!FiringArc::LeftSide.contains(Direction::North, ORIGIN, east));
    }

    #[test]
    fn west_is_left_side_when_facing_north() {
        let west = Hex::new(-4, 2);
        assert!(FiringArc::LeftSide.contains(Direction::North, ORIGIN, west));
        assert!(!FiringArc::RightSide.contains(Direction::North, ORIGIN, west));
    }

    #[test]
    fn arcs_rotate_with_facing() {
        let south_of_origin = Hex::new(0, 5);
        assert!(FiringArc::Nose.contains(Direction::South, ORIGIN, south_of_origin));
        assert!(FiringArc::Aft.contains(Direction::North, ORIGIN, south_of_origin));
    }

    #[test]
    fn boundary_hexes_count_for_adjacent_arcs() {
        // A hex on the 60° line from north: one step along the NE axis.
        let boundary = ORIGIN.displaced(Direction::NorthEast, 3);
        assert!(FiringArc::Nose.contains(Direction::North, ORIGIN, boundary));
    }

    #[test]
    fn own_hex_is_in_every_arc() {
        for arc in [
            FiringArc::Nose,
            FiringArc::LeftSide,
            FiringArc::RightSide,
            FiringArc::Aft,
        ] {
            assert!(arc.contains(Direction::North, ORIGIN, ORIGIN));
        }
    }

    #[test]
    fn every_hex_falls_in_some_arc() {
        for hex in ORIGIN.within(4) {
            let covered = [
                FiringArc::Nose,
                FiringArc::LeftSide,
                FiringArc::RightSide,
                FiringArc::Aft,
            ]
            .iter()
            .any(|arc| arc.contains(Direction::NorthEast, ORIGIN, hex));
            assert!(covered, "hex {hex} not covered by any arc");
        }
    }
}
