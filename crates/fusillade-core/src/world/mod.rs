//! Minimal unit/board model at the collaborator interface boundary.
//!
//! The full entity data model (per-location armor, critical slots) lives
//! outside this crate; resolution only needs the mutation surface specified
//! at the interface: armor/structure damage, heat accumulation, ammunition
//! bins, equipment readiness and arc queries, and the board's building,
//! minefield, and fire hooks.
//!
//! # Ownership
//!
//! One [`World`] is mutated by exactly one resolution at a time (resolution
//! is strictly serial), so unit registries use plain `BTreeMap`s with
//! deterministic iteration order and no interior mutability.

pub mod board;
pub mod unit;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use hexfield::Hex;

pub use board::{Board, Building, MinefieldKind, SmokeKind};
pub use unit::{AmmoBin, Unit, UnitId, UnitKind, UnitStatus, WeaponMount};

/// Radius within which a hostile ECM carrier jams guidance and spotting.
const ECM_RANGE: u32 = 6;

/// What an attack was declared against.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AttackTarget {
    /// An enemy unit.
    Unit(UnitId),
    /// A map hex (artillery, bearings-only launches).
    Hex(Hex),
    /// A building occupying a hex.
    Building(Hex),
}

impl AttackTarget {
    /// The targeted unit, if any.
    #[must_use]
    pub const fn unit(self) -> Option<UnitId> {
        match self {
            Self::Unit(id) => Some(id),
            Self::Hex(_) | Self::Building(_) => None,
        }
    }

    /// Whether this is a unit target.
    #[must_use]
    pub const fn is_unit(self) -> bool {
        matches!(self, Self::Unit(_))
    }
}

/// Unit registry plus board: the state one resolution owns while running.
#[derive(Debug, Clone, Default)]
pub struct World {
    units: BTreeMap<UnitId, Unit>,
    /// The game board.
    pub board: Board,
}

impl World {
    /// Creates an empty world with the given board.
    #[must_use]
    pub fn new(board: Board) -> Self {
        Self {
            units: BTreeMap::new(),
            board,
        }
    }

    /// Adds a unit, replacing any previous unit with the same id.
    pub fn add_unit(&mut self, unit: Unit) {
        self.units.insert(unit.id, unit);
    }

    /// Looks up a unit.
    #[must_use]
    pub fn unit(&self, id: UnitId) -> Option<&Unit> {
        self.units.get(&id)
    }

    /// Looks up a unit mutably.
    pub fn unit_mut(&mut self, id: UnitId) -> Option<&mut Unit> {
        self.units.get_mut(&id)
    }

    /// All units in deterministic id order.
    pub fn units(&self) -> impl Iterator<Item = &Unit> {
        self.units.values()
    }

    /// Units hostile to `side`, in deterministic id order.
    pub fn enemies_of(&self, side: u8) -> impl Iterator<Item = &Unit> {
        self.units.values().filter(move |u| u.side != side)
    }

    /// Position of an attack target: the unit's hex, or the declared hex.
    #[must_use]
    pub fn target_hex(&self, target: AttackTarget) -> Option<Hex> {
        match target {
            AttackTarget::Unit(id) => self.unit(id).map(|u| u.position),
            AttackTarget::Hex(hex) | AttackTarget::Building(hex) => Some(hex),
        }
    }

    /// Whether a hostile ECM carrier sits within jamming range of `hex`.
    ///
    /// Jamming suppresses missile guidance and disqualifies artillery
    /// spotters caught inside the bubble.
    #[must_use]
    pub fn ecm_affected(&self, side: u8, hex: Hex) -> bool {
        self.units.values().any(|unit| {
            unit.side != side
                && unit.is_ready()
                && unit.status.contains(UnitStatus::ECM_ACTIVE)
                && unit.position.distance(hex) <= ECM_RANGE
        })
    }

    /// Units standing in a hex, in deterministic id order.
    pub fn units_in_hex(&self, hex: Hex) -> impl Iterator<Item = &Unit> {
        self.units.values().filter(move |u| u.position == hex)
    }

    /// Ids of units standing in a hex (avoids holding a borrow while
    /// applying area damage).
    #[must_use]
    pub fn unit_ids_in_hex(&self, hex: Hex) -> Vec<UnitId> {
        self.units_in_hex(hex).map(|u| u.id).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hexfield::{Bounds, Direction};

    fn test_unit(id: u32, side: u8, hex: Hex) -> Unit {
        Unit::new(UnitId::new(id), side, UnitKind::Mech, 50, hex, Direction::North)
    }

    #[test]
    fn enemies_excludes_own_side() {
        let mut world = World::new(Board::new(Bounds::new(16, 17)));
        world.add_unit(test_unit(1, 0, Hex::new(0, 0)));
        world.add_unit(test_unit(2, 1, Hex::new(3, 0)));
        world.add_unit(test_unit(3, 1, Hex::new(4, 0)));

        let enemies: Vec<UnitId> = world.enemies_of(0).map(|u| u.id).collect();
        assert_eq!(enemies, vec![UnitId::new(2), UnitId::new(3)]);
    }

    #[test]
    fn target_hex_follows_unit_position() {
        let mut world = World::new(Board::new(Bounds::new(16, 17)));
        world.add_unit(test_unit(1, 0, Hex::new(5, 2)));

        let hex = world.target_hex(AttackTarget::Unit(UnitId::new(1)));
        assert_eq!(hex, Some(Hex::new(5, 2)));
        assert_eq!(
            world.target_hex(AttackTarget::Hex(Hex::new(1, 1))),
            Some(Hex::new(1, 1))
        );
    }

    #[test]
    fn units_in_hex_filters_by_position() {
        let mut world = World::new(Board::new(Bounds::new(16, 17)));
        world.add_unit(test_unit(1, 0, Hex::new(2, 2)));
        world.add_unit(test_unit(2, 1, Hex::new(2, 2)));
        world.add_unit(test_unit(3, 1, Hex::new(9, 9)));

        assert_eq!(world.unit_ids_in_hex(Hex::new(2, 2)).len(), 2);
    }

    #[test]
    fn ecm_bubble_covers_nearby_hexes() {
        let mut world = World::new(Board::new(Bounds::new(16, 17)));
        let mut jammer = test_unit(1, 1, Hex::new(3, 3));
        jammer.status.insert(UnitStatus::ECM_ACTIVE);
        world.add_unit(jammer);

        assert!(world.ecm_affected(0, Hex::new(3, 5)));
        assert!(!world.ecm_affected(0, Hex::new(3, 12)));
        // A carrier never jams its own side.
        assert!(!world.ecm_affected(1, Hex::new(3, 5)));
    }

    #[test]
    fn attack_target_unit_accessor() {
        assert!(AttackTarget::Unit(UnitId::new(1)).is_unit());
        assert!(!AttackTarget::Hex(Hex::new(0, 0)).is_unit());
        assert_eq!(AttackTarget::Building(Hex::new(0, 0)).unit(), None);
    }
}
