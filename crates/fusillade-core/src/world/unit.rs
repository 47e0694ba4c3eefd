//! Units and their mounted equipment.
//!
//! [`Unit`] exposes exactly the mutation surface attack resolution needs:
//! an armor pool with a destroyed determination, a bounded heat
//! accumulator, ammunition bins, weapon mounts, and the interceptor
//! equipment set consulted by point-defense engagement.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

use hexfield::{Direction, FiringArc, Hex};

use crate::munition::{MunitionProfile, WeaponClass};
use crate::pointdefense::Interceptor;

/// Unique identifier for a unit.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct UnitId(u32);

impl UnitId {
    /// Creates an id from a raw value.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// The raw value.
    #[must_use]
    pub const fn as_u32(self) -> u32 {
        self.0
    }
}

impl fmt::Debug for UnitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "UnitId({})", self.0)
    }
}

impl fmt::Display for UnitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Broad unit classification used by targeting and damage overrides.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnitKind {
    /// BattleMech.
    Mech,
    /// Ground vehicle.
    Vehicle,
    /// Conventional infantry platoon.
    Infantry {
        /// Troopers at full strength.
        troopers: u32,
    },
    /// Battle-armor squad.
    BattleArmor {
        /// Troopers at full strength.
        troopers: u32,
    },
    /// Small craft (aerospace).
    SmallCraft,
    /// DropShip.
    Dropship,
    /// WarShip or other capital vessel.
    Warship,
}

impl UnitKind {
    /// Conventional infantry (not battle armor).
    #[must_use]
    pub const fn is_conventional_infantry(self) -> bool {
        matches!(self, Self::Infantry { .. })
    }

    /// Battle-armor squad.
    #[must_use]
    pub const fn is_battle_armor(self) -> bool {
        matches!(self, Self::BattleArmor { .. })
    }

    /// Any dismounted-trooper formation.
    #[must_use]
    pub const fn is_trooper_formation(self) -> bool {
        self.is_conventional_infantry() || self.is_battle_armor()
    }

    /// Small craft or larger: eligible for bearings-only acquisition.
    #[must_use]
    pub const fn is_small_craft_or_larger(self) -> bool {
        matches!(self, Self::SmallCraft | Self::Dropship | Self::Warship)
    }

    /// DropShip-class or larger.
    #[must_use]
    pub const fn is_large_craft(self) -> bool {
        matches!(self, Self::Dropship | Self::Warship)
    }
}

bitflags! {
    /// Transient unit status consulted during resolution.
    #[derive(Debug, Copy, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
    pub struct UnitStatus: u32 {
        /// Reactor shut down; equipment cannot fire.
        const SHUTDOWN = 1 << 0;
        /// Friendly-to-self ECM bubble is active.
        const ECM_ACTIVE = 1 << 1;
        /// Stealth armor system engaged.
        const STEALTH_ACTIVE = 1 << 2;
        /// Crew dead or unit otherwise out of the fight.
        const INCAPACITATED = 1 << 3;
        /// Destroyed by damage.
        const DESTROYED = 1 << 4;
    }
}

/// One ammunition bin feeding a weapon mount.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmmoBin {
    /// The loaded munition.
    pub munition: Arc<MunitionProfile>,
    /// Rounds remaining.
    pub rounds: u32,
}

impl AmmoBin {
    /// Creates a bin with the given rounds remaining.
    #[must_use]
    pub fn new(munition: Arc<MunitionProfile>, rounds: u32) -> Self {
        Self { munition, rounds }
    }
}

/// One weapon mount on a unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeaponMount {
    /// Weapon class.
    pub class: WeaponClass,
    /// Index into the unit's ammo bins, for ammo-fed weapons.
    pub ammo_bin: Option<usize>,
    /// Firing arc of the mount.
    pub arc: FiringArc,
    /// Jammed this engagement (Ultra/Rotary minimum-roll rule).
    pub jammed: bool,
    /// Destroyed by damage.
    pub destroyed: bool,
}

impl WeaponMount {
    /// Creates an operational mount.
    #[must_use]
    pub const fn new(class: WeaponClass, ammo_bin: Option<usize>, arc: FiringArc) -> Self {
        Self {
            class,
            ammo_bin,
            arc,
            jammed: false,
            destroyed: false,
        }
    }

    /// Whether the mount can fire.
    #[must_use]
    pub const fn is_operational(&self) -> bool {
        !self.jammed && !self.destroyed
    }
}

/// A combat unit: the attack-resolution view of the external entity model.
///
/// Armor is a single pool; `apply_damage` reports the destroyed
/// determination the way the external model's `applyDamage(location,
/// amount)` contract does. For trooper formations the pool doubles as the
/// active-trooper count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Unit {
    /// Unique id.
    pub id: UnitId,
    /// Owning side; units on different sides are hostile.
    pub side: u8,
    /// Classification.
    pub kind: UnitKind,
    /// Mass in tons; tie-breaker for bearings-only acquisition.
    pub tonnage: u32,
    /// Position on the board.
    pub position: Hex,
    /// Facing, anchoring firing arcs.
    pub facing: Direction,
    /// Current heat.
    pub heat: u32,
    /// Heat capacity; equipment that would exceed it does not fire.
    pub heat_capacity: u32,
    /// Gunnery skill (lower is better); spotter tie-breaker.
    pub gunnery: u32,
    /// Trained forward observer; preferred as artillery spotter.
    pub forward_observer: bool,
    /// Oblique artilleryman skill: −2 scatter distance.
    pub oblique_artillery: bool,
    /// Transient status flags.
    pub status: UnitStatus,
    /// Remaining armor pool.
    pub armor: u32,
    /// Weapon mounts.
    pub mounts: Vec<WeaponMount>,
    /// Ammunition bins.
    pub ammo: Vec<AmmoBin>,
    /// Point-defense interceptor equipment.
    pub interceptors: Vec<Interceptor>,
}

impl Unit {
    /// Creates a unit with sensible defaults: 10 armor per 5 tons, heat
    /// capacity 30, gunnery 4, no equipment.
    #[must_use]
    pub fn new(
        id: UnitId,
        side: u8,
        kind: UnitKind,
        tonnage: u32,
        position: Hex,
        facing: Direction,
    ) -> Self {
        let armor = match kind {
            UnitKind::Infantry { troopers } | UnitKind::BattleArmor { troopers } => troopers,
            _ => tonnage * 2,
        };
        Self {
            id,
            side,
            kind,
            tonnage,
            position,
            facing,
            heat: 0,
            heat_capacity: 30,
            gunnery: 4,
            forward_observer: false,
            oblique_artillery: false,
            status: UnitStatus::empty(),
            armor,
            mounts: Vec::new(),
            ammo: Vec::new(),
            interceptors: Vec::new(),
        }
    }

    /// Whether the unit can act at all.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        !self
            .status
            .intersects(UnitStatus::SHUTDOWN | UnitStatus::INCAPACITATED | UnitStatus::DESTROYED)
    }

    /// Whether the unit has been destroyed.
    #[must_use]
    pub fn is_destroyed(&self) -> bool {
        self.status.contains(UnitStatus::DESTROYED)
    }

    /// Active troopers for a trooper formation, 0 for other kinds.
    #[must_use]
    pub fn active_troopers(&self) -> u32 {
        match self.kind {
            UnitKind::Infantry { troopers } | UnitKind::BattleArmor { troopers } => {
                self.armor.min(troopers)
            }
            _ => 0,
        }
    }

    /// Applies damage to the armor pool, returning true when the unit is
    /// destroyed. The pool clamps at 0; destruction is latched via status.
    pub fn apply_damage(&mut self, amount: u32) -> bool {
        self.armor = self.armor.saturating_sub(amount);
        if self.armor == 0 {
            self.status.insert(UnitStatus::DESTROYED);
        }
        self.is_destroyed()
    }

    /// Whether the unit can absorb `cost` more heat without exceeding its
    /// capacity.
    #[must_use]
    pub const fn can_afford_heat(&self, cost: u32) -> bool {
        self.heat + cost <= self.heat_capacity
    }

    /// Adds heat from firing equipment.
    pub fn add_heat(&mut self, amount: u32) {
        self.heat += amount;
    }

    /// The ammo bin feeding a mount, if the mount exists and is ammo-fed.
    #[must_use]
    pub fn ammo_for_mount(&self, mount: usize) -> Option<&AmmoBin> {
        let bin = self.mounts.get(mount)?.ammo_bin?;
        self.ammo.get(bin)
    }

    /// Decrements one round from the bin feeding `mount`. Returns false if
    /// no round was available.
    pub fn spend_ammo(&mut self, mount: usize) -> bool {
        let Some(bin) = self.mounts.get(mount).and_then(|m| m.ammo_bin) else {
            return false;
        };
        match self.ammo.get_mut(bin) {
            Some(ammo) if ammo.rounds > 0 => {
                ammo.rounds -= 1;
                true
            }
            _ => false,
        }
    }

    /// Restores one round to the bin feeding `mount` (nested re-fire).
    pub fn restore_ammo(&mut self, mount: usize) {
        if let Some(bin) = self.mounts.get(mount).and_then(|m| m.ammo_bin) {
            if let Some(ammo) = self.ammo.get_mut(bin) {
                ammo.rounds += 1;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::munition::MunitionFlags;

    fn mech(id: u32) -> Unit {
        Unit::new(
            UnitId::new(id),
            0,
            UnitKind::Mech,
            50,
            Hex::new(0, 0),
            Direction::North,
        )
    }

    mod damage_tests {
        use super::*;

        #[test]
        fn damage_reduces_armor() {
            let mut unit = mech(1);
            let destroyed = unit.apply_damage(10);
            assert!(!destroyed);
            assert_eq!(unit.armor, 90);
        }

        #[test]
        fn overkill_clamps_at_zero_and_destroys() {
            let mut unit = mech(1);
            let destroyed = unit.apply_damage(500);
            assert!(destroyed);
            assert_eq!(unit.armor, 0);
            assert!(unit.is_destroyed());
        }

        #[test]
        fn trooper_formation_tracks_active_troopers() {
            let mut squad = Unit::new(
                UnitId::new(2),
                0,
                UnitKind::BattleArmor { troopers: 4 },
                1,
                Hex::new(0, 0),
                Direction::North,
            );
            assert_eq!(squad.active_troopers(), 4);
            squad.apply_damage(3);
            assert_eq!(squad.active_troopers(), 1);
        }
    }

    mod heat_tests {
        use super::*;

        #[test]
        fn heat_affordability_respects_capacity() {
            let mut unit = mech(1);
            unit.heat = 28;
            assert!(unit.can_afford_heat(2));
            assert!(!unit.can_afford_heat(3));
        }
    }

    mod ammo_tests {
        use super::*;

        fn armed_mech() -> Unit {
            let mut unit = mech(1);
            let lrm = MunitionProfile::new("LRM 10", 10, 1, MunitionFlags::CLUSTER_TABLE).shared();
            unit.ammo.push(AmmoBin::new(lrm, 2));
            unit.mounts
                .push(WeaponMount::new(WeaponClass::Missile, Some(0), FiringArc::Nose));
            unit
        }

        #[test]
        fn spend_decrements_exactly_one() {
            let mut unit = armed_mech();
            assert!(unit.spend_ammo(0));
            assert_eq!(unit.ammo[0].rounds, 1);
        }

        #[test]
        fn spend_fails_when_empty() {
            let mut unit = armed_mech();
            unit.ammo[0].rounds = 0;
            assert!(!unit.spend_ammo(0));
        }

        #[test]
        fn restore_gives_back_one_round() {
            let mut unit = armed_mech();
            unit.spend_ammo(0);
            unit.restore_ammo(0);
            assert_eq!(unit.ammo[0].rounds, 2);
        }

        #[test]
        fn readiness_reflects_status() {
            let mut unit = armed_mech();
            assert!(unit.is_ready());
            unit.status.insert(UnitStatus::SHUTDOWN);
            assert!(!unit.is_ready());
        }
    }
}
