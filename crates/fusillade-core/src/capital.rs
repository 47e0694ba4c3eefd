//! Capital missile ballistics.
//!
//! Capital-grade munitions carry their own armor pool (a property of the
//! munition, not the target) and survive or die across counterfire passes
//! before they ever roll damage. Long-flight "bearings-only" missiles are
//! fired at a hex and self-select their final target via sensor rules at
//! detonation time.

use serde::{Deserialize, Serialize};
use tracing::debug;

use hexfield::FiringArc;

use crate::report::{Report, ReportLog};
use crate::roll::{Dice, ToHit};
use crate::world::{Unit, UnitId, World};

/// Counter-attack-value per point of AMS-induced to-hit penalty.
const AMS_PENALTY_DIVISOR: u32 = 10;

/// Acquisition to-hit penalty per ten hexes of range.
const RANGE_PENALTY_STEP: u32 = 10;

/// Armor state of one capital missile across counterfire passes.
///
/// Armor is monotonically non-increasing within a resolution and clamps
/// at 0 before the destroyed determination.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapitalMissileState {
    base_armor: u32,
    armor: u32,
    counter_value: u32,
}

impl CapitalMissileState {
    /// Creates the state for a missile with the given base armor.
    #[must_use]
    pub const fn new(base_armor: u32) -> Self {
        Self {
            base_armor,
            armor: base_armor,
            counter_value: 0,
        }
    }

    /// Remaining armor.
    #[must_use]
    pub const fn armor(self) -> u32 {
        self.armor
    }

    /// Applies one counterfire pass, logging the armor change.
    pub fn apply_counterfire(&mut self, counter_value: u32, log: &mut ReportLog) {
        if counter_value == 0 {
            return;
        }
        let before = self.armor;
        self.armor = self.armor.saturating_sub(counter_value);
        self.counter_value += counter_value;
        debug!(before, after = self.armor, "capital missile armor reduced");
        log.push(Report::CapitalArmor {
            before,
            after: self.armor,
        });
    }

    /// Whether counterfire destroyed the missile outright.
    #[must_use]
    pub const fn is_destroyed(self) -> bool {
        self.armor == 0 && self.base_armor > 0
    }

    /// Guidance-degradation to-hit penalty: `ceil(counterValue / 10)`.
    #[must_use]
    pub const fn ams_to_hit_penalty(self) -> i32 {
        ((self.counter_value + AMS_PENALTY_DIVISOR - 1) / AMS_PENALTY_DIVISOR) as i32
    }

    /// Whether accumulated guidance degradation drops a hit below its
    /// target number, destroying the missile in flight even though the
    /// original roll connected.
    #[must_use]
    pub fn destroyed_in_flight(self, roll: i32, to_hit: ToHit) -> bool {
        match to_hit.value() {
            Some(target) => roll - self.ams_to_hit_penalty() < target.max(2),
            None => false,
        }
    }

    /// Damage the surviving missile deals, scaled by remaining armor:
    /// partial counterfire reduces but does not cancel the hit.
    #[must_use]
    pub const fn surviving_damage(self, base_damage: u32) -> u32 {
        if self.base_armor == 0 {
            return base_damage;
        }
        if self.armor == 0 {
            return 0;
        }
        // Ceiling of base * armor / base_armor.
        (base_damage * self.armor + self.base_armor - 1) / self.base_armor
    }
}

/// Detection-range mode chosen by the firing player for a bearings-only
/// launch.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DetectionRange {
    /// Short-range scan.
    Short,
    /// Medium-range scan.
    Medium,
    /// Long-range scan.
    Long,
    /// Extreme-range scan.
    Extreme,
}

impl DetectionRange {
    /// Scan radius in hexes.
    #[must_use]
    pub const fn radius(self) -> u32 {
        match self {
            Self::Short => 6,
            Self::Medium => 12,
            Self::Long => 20,
            Self::Extreme => 25,
        }
    }
}

/// One eligible unit found during bearings-only acquisition.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AcquisitionCandidate {
    /// The candidate unit.
    pub unit: UnitId,
    /// Distance from the firing unit in hexes.
    pub distance: u32,
    /// Candidate tonnage, for tie-breaking.
    pub tonnage: u32,
    /// DropShip-class or larger.
    pub large_craft: bool,
    /// Computed to-hit against this candidate, for player presentation.
    pub to_hit: ToHit,
}

/// Explicit target selection for tele-operated missiles.
///
/// The firing player is presented the candidate list (with computed
/// to-hit per candidate) and chooses; returning `None` falls back to the
/// automatic selection order.
pub trait TargetChooser {
    /// Picks an index into the candidate list.
    fn choose(&mut self, candidates: &[AcquisitionCandidate]) -> Option<usize>;
}

/// To-hit against one candidate: the base requirement plus one point per
/// ten hexes of range. Sentinels pass through unchanged.
fn candidate_to_hit(base: ToHit, distance: u32) -> ToHit {
    match base.value() {
        #[allow(clippy::cast_possible_wrap)]
        Some(value) => ToHit::Value(value + (distance / RANGE_PENALTY_STEP) as i32),
        None => base,
    }
}

/// Automatic selection order: prefer large craft over small craft; among
/// those, prefer minimum distance, tie-break by maximum tonnage, tie-break
/// by a d6 ≥ 4 keeping the later-found candidate.
fn prefer_later(later: &AcquisitionCandidate, current: &AcquisitionCandidate, dice: &mut Dice) -> bool {
    if later.large_craft != current.large_craft {
        return later.large_craft;
    }
    if later.distance != current.distance {
        return later.distance < current.distance;
    }
    if later.tonnage != current.tonnage {
        return later.tonnage > current.tonnage;
    }
    dice.coin()
}

/// Scans for a bearings-only missile's final target.
///
/// Candidates are enemy units of small-craft class or larger, within the
/// firing unit's nose arc and the detection radius. Returns `None` when
/// no unit is eligible; the caller converts that into an
/// automatic-impossible resolution (ammo and heat stay charged).
pub fn acquire_target(
    world: &World,
    firer: &Unit,
    range: DetectionRange,
    base_to_hit: ToHit,
    dice: &mut Dice,
    mut chooser: Option<&mut dyn TargetChooser>,
    log: &mut ReportLog,
) -> Option<AcquisitionCandidate> {
    let radius = range.radius();
    let mut candidates: Vec<AcquisitionCandidate> = Vec::new();

    for unit in world.enemies_of(firer.side) {
        if unit.is_destroyed() || !unit.kind.is_small_craft_or_larger() {
            continue;
        }
        let distance = firer.position.distance(unit.position);
        if distance > radius {
            continue;
        }
        if !FiringArc::Nose.contains(firer.facing, firer.position, unit.position) {
            continue;
        }
        candidates.push(AcquisitionCandidate {
            unit: unit.id,
            distance,
            tonnage: unit.tonnage,
            large_craft: unit.kind.is_large_craft(),
            to_hit: candidate_to_hit(base_to_hit, distance),
        });
    }

    if candidates.is_empty() {
        log.push(Report::NoEligibleTargets);
        return None;
    }

    if let Some(chooser) = chooser.as_deref_mut() {
        if let Some(index) = chooser.choose(&candidates) {
            let chosen = candidates.get(index).copied()?;
            log.push(Report::TargetAcquired {
                target: chosen.unit,
                distance: chosen.distance,
            });
            return Some(chosen);
        }
    }

    let mut best = candidates[0];
    for candidate in &candidates[1..] {
        if prefer_later(candidate, &best, dice) {
            best = *candidate;
        }
    }
    log.push(Report::TargetAcquired {
        target: best.unit,
        distance: best.distance,
    });
    Some(best)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::{Board, UnitKind};
    use hexfield::{Bounds, Direction, Hex};

    fn craft(id: u32, side: u8, kind: UnitKind, tonnage: u32, hex: Hex) -> Unit {
        Unit::new(UnitId::new(id), side, kind, tonnage, hex, Direction::North)
    }

    fn world_with(units: Vec<Unit>) -> World {
        let mut world = World::new(Board::new(Bounds::new(40, 40)));
        for unit in units {
            world.add_unit(unit);
        }
        world
    }

    mod armor_tests {
        use super::*;

        #[test]
        fn armor_monotonically_decreases_and_clamps() {
            let mut state = CapitalMissileState::new(40);
            let mut log = ReportLog::new();
            state.apply_counterfire(15, &mut log);
            assert_eq!(state.armor(), 25);
            state.apply_counterfire(30, &mut log);
            assert_eq!(state.armor(), 0);
            assert!(state.is_destroyed());
        }

        #[test]
        fn zero_counterfire_logs_nothing() {
            let mut state = CapitalMissileState::new(40);
            let mut log = ReportLog::new();
            state.apply_counterfire(0, &mut log);
            assert!(log.is_empty());
            assert!(!state.is_destroyed());
        }

        #[test]
        fn ams_penalty_is_ceiling_of_tenth() {
            let mut state = CapitalMissileState::new(40);
            let mut log = ReportLog::new();
            state.apply_counterfire(11, &mut log);
            assert_eq!(state.ams_to_hit_penalty(), 2);
        }

        #[test]
        fn degradation_can_destroy_in_flight() {
            let mut state = CapitalMissileState::new(40);
            let mut log = ReportLog::new();
            state.apply_counterfire(15, &mut log);
            // Rolled a 9 against 8+: margin 1, penalty 2 pushes it under.
            assert!(state.destroyed_in_flight(9, ToHit::Value(8)));
            assert!(!state.destroyed_in_flight(12, ToHit::Value(8)));
        }

        #[test]
        fn partial_damage_reduces_but_does_not_cancel() {
            let mut state = CapitalMissileState::new(40);
            let mut log = ReportLog::new();
            state.apply_counterfire(10, &mut log);
            // 30/40 armor left: ceil(100 * 3/4).
            assert_eq!(state.surviving_damage(100), 75);
        }

        #[test]
        fn destroyed_missile_deals_nothing() {
            let mut state = CapitalMissileState::new(40);
            let mut log = ReportLog::new();
            state.apply_counterfire(60, &mut log);
            assert_eq!(state.surviving_damage(100), 0);
        }
    }

    mod acquisition_tests {
        use super::*;

        fn firer_at_origin() -> Unit {
            craft(1, 0, UnitKind::Warship, 500_000, Hex::new(0, 20))
        }

        #[test]
        fn no_candidates_reports_and_returns_none() {
            let world = world_with(vec![firer_at_origin()]);
            let firer = world.unit(UnitId::new(1)).unwrap().clone();
            let mut dice = Dice::from_seed(1);
            let mut log = ReportLog::new();

            let result = acquire_target(
                &world,
                &firer,
                DetectionRange::Long,
                ToHit::Value(7),
                &mut dice,
                None,
                &mut log,
            );

            assert!(result.is_none());
            assert!(matches!(log.entries()[0], Report::NoEligibleTargets));
        }

        #[test]
        fn small_units_are_not_eligible() {
            let world = world_with(vec![
                firer_at_origin(),
                craft(2, 1, UnitKind::Mech, 50, Hex::new(0, 15)),
            ]);
            let firer = world.unit(UnitId::new(1)).unwrap().clone();
            let mut dice = Dice::from_seed(1);
            let mut log = ReportLog::new();

            let result = acquire_target(
                &world,
                &firer,
                DetectionRange::Long,
                ToHit::Value(7),
                &mut dice,
                None,
                &mut log,
            );
            assert!(result.is_none());
        }

        #[test]
        fn prefers_large_craft_over_closer_small_craft() {
            let world = world_with(vec![
                firer_at_origin(),
                craft(2, 1, UnitKind::SmallCraft, 100, Hex::new(0, 16)),
                craft(3, 1, UnitKind::Dropship, 3000, Hex::new(0, 10)),
            ]);
            let firer = world.unit(UnitId::new(1)).unwrap().clone();
            let mut dice = Dice::from_seed(1);
            let mut log = ReportLog::new();

            let result = acquire_target(
                &world,
                &firer,
                DetectionRange::Long,
                ToHit::Value(7),
                &mut dice,
                None,
                &mut log,
            )
            .unwrap();
            assert_eq!(result.unit, UnitId::new(3));
        }

        #[test]
        fn prefers_minimum_distance_then_tonnage() {
            let world = world_with(vec![
                firer_at_origin(),
                craft(2, 1, UnitKind::Dropship, 2000, Hex::new(0, 12)),
                craft(3, 1, UnitKind::Dropship, 5000, Hex::new(0, 12)),
                craft(4, 1, UnitKind::Dropship, 9000, Hex::new(0, 5)),
            ]);
            let firer = world.unit(UnitId::new(1)).unwrap().clone();
            let mut dice = Dice::from_seed(1);
            let mut log = ReportLog::new();

            let result = acquire_target(
                &world,
                &firer,
                DetectionRange::Long,
                ToHit::Value(7),
                &mut dice,
                None,
                &mut log,
            )
            .unwrap();
            // Unit 4 is nearest.
            assert_eq!(result.unit, UnitId::new(4));
        }

        #[test]
        fn out_of_arc_candidates_are_skipped() {
            // Target dead astern of a north-facing firer.
            let world = world_with(vec![
                firer_at_origin(),
                craft(2, 1, UnitKind::Dropship, 3000, Hex::new(0, 30)),
            ]);
            let firer = world.unit(UnitId::new(1)).unwrap().clone();
            let mut dice = Dice::from_seed(1);
            let mut log = ReportLog::new();

            let result = acquire_target(
                &world,
                &firer,
                DetectionRange::Long,
                ToHit::Value(7),
                &mut dice,
                None,
                &mut log,
            );
            assert!(result.is_none());
        }

        #[test]
        fn candidate_to_hit_scales_with_range() {
            assert_eq!(candidate_to_hit(ToHit::Value(6), 5), ToHit::Value(6));
            assert_eq!(candidate_to_hit(ToHit::Value(6), 20), ToHit::Value(8));
            assert_eq!(candidate_to_hit(ToHit::Impossible, 20), ToHit::Impossible);
        }

        struct PickFirst;
        impl TargetChooser for PickFirst {
            fn choose(&mut self, candidates: &[AcquisitionCandidate]) -> Option<usize> {
                (!candidates.is_empty()).then_some(0)
            }
        }

        #[test]
        fn tele_operated_chooser_overrides_preference() {
            let world = world_with(vec![
                firer_at_origin(),
                craft(2, 1, UnitKind::SmallCraft, 100, Hex::new(0, 16)),
                craft(3, 1, UnitKind::Dropship, 3000, Hex::new(0, 10)),
            ]);
            let firer = world.unit(UnitId::new(1)).unwrap().clone();
            let mut dice = Dice::from_seed(1);
            let mut log = ReportLog::new();
            let mut chooser = PickFirst;

            let result = acquire_target(
                &world,
                &firer,
                DetectionRange::Long,
                ToHit::Value(7),
                &mut dice,
                Some(&mut chooser),
                &mut log,
            )
            .unwrap();
            // Candidate list is in unit-id order; the chooser took the
            // small craft the automatic order would have passed over.
            assert_eq!(result.unit, UnitId::new(2));
        }
    }
}
