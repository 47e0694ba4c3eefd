//! Scenario and equipment factories for resolution tests.

use std::sync::Arc;

use hexfield::{Bounds, Direction, FiringArc, Hex};

use crate::munition::{MunitionFlags, MunitionProfile, WeaponClass};
use crate::resolution::AttackContext;
use crate::roll::ToHit;
use crate::world::{AmmoBin, AttackTarget, Board, Unit, UnitId, UnitKind, WeaponMount, World};

/// An empty standard-size board.
pub fn standard_world() -> World {
    World::new(Board::new(Bounds::new(16, 17)))
}

/// A 50-ton mech facing north.
pub fn mech(id: u32, side: u8, hex: Hex) -> Unit {
    Unit::new(UnitId::new(id), side, UnitKind::Mech, 50, hex, Direction::North)
}

/// Arms a unit with the munition on a fresh mount, returning the mount
/// index.
pub fn arm(unit: &mut Unit, class: WeaponClass, munition: Arc<MunitionProfile>, rounds: u32) -> usize {
    let bin = if class.uses_ammo() {
        unit.ammo.push(AmmoBin::new(munition, rounds));
        Some(unit.ammo.len() - 1)
    } else {
        None
    };
    unit.mounts.push(WeaponMount::new(class, bin, FiringArc::Nose));
    unit.mounts.len() - 1
}

/// A top-level attack context for a unit's mount.
pub fn context_for(unit: &Unit, mount: usize, target: AttackTarget, to_hit: ToHit) -> AttackContext {
    let munition = unit
        .ammo_for_mount(mount)
        .map_or_else(
            || MunitionProfile::new("beam", 1, 5, MunitionFlags::empty()).shared(),
            |bin| Arc::clone(&bin.munition),
        );
    AttackContext::new(unit.id, mount, munition, target, to_hit)
}

// =============================================================================
// Munition factories
// =============================================================================

/// LRM 20: cluster table, 1 damage per missile.
pub fn lrm20() -> Arc<MunitionProfile> {
    MunitionProfile::new("LRM 20", 20, 1, MunitionFlags::CLUSTER_TABLE)
        .with_heat(6)
        .shared()
}

/// Streak SRM 6: every missile connects on a successful roll.
pub fn streak_srm6() -> Arc<MunitionProfile> {
    MunitionProfile::new(
        "Streak SRM 6",
        6,
        2,
        MunitionFlags::CLUSTER_TABLE | MunitionFlags::STREAK,
    )
    .with_heat(4)
    .shared()
}

/// AC/20 slug: one projectile, flat 20.
pub fn ac20() -> Arc<MunitionProfile> {
    MunitionProfile::new("AC/20", 1, 20, MunitionFlags::empty())
        .with_heat(7)
        .shared()
}

/// Ultra AC/5 slug.
pub fn uac5() -> Arc<MunitionProfile> {
    MunitionProfile::new("Ultra AC/5", 1, 5, MunitionFlags::empty())
        .with_heat(1)
        .shared()
}

/// Capital missile with a 40-point armor pool.
pub fn killer_whale() -> Arc<MunitionProfile> {
    MunitionProfile::new("Killer Whale", 1, 40, MunitionFlags::CAPITAL)
        .with_capital_armor(40)
        .with_heat(20)
        .shared()
}

/// Bearings-only capital missile.
pub fn bearings_only_whale() -> Arc<MunitionProfile> {
    MunitionProfile::new(
        "Killer Whale-T",
        1,
        40,
        MunitionFlags::CAPITAL | MunitionFlags::BEARINGS_ONLY,
    )
    .with_capital_armor(40)
    .with_heat(20)
    .shared()
}

/// Arrow IV artillery shell, caliber 20.
pub fn arrow_iv() -> Arc<MunitionProfile> {
    MunitionProfile::new("Arrow IV", 1, 20, MunitionFlags::empty())
        .with_caliber(20)
        .with_heat(10)
        .shared()
}
