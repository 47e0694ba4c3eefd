//! Cluster hit resolution.
//!
//! Converts a raw submissile count plus a net modifier into the number of
//! submissiles that actually connect. The probability table is indexed by
//! rack size column and a 2d6 roll shifted by the modifier sum; a streak
//! lock or point-blank override bypasses the table entirely.
//!
//! # Modifier Order
//!
//! Modifier sources are accumulated in a fixed order before lookup:
//! range band, guidance bonus (exactly one source, possibly suppressed),
//! glancing penalty, direct bonus, electromagnetic interference, and the
//! point-defense penalty. The order is load-bearing only for reporting;
//! the lookup uses the sum.

use serde::{Deserialize, Serialize};

use crate::munition::MunitionFlags;
use crate::roll::{BlowGrade, Dice};

/// Cluster modifier applied for a glancing blow.
pub const GLANCING_CLUSTER_PENALTY: i32 = -4;

/// Guidance bonus for an active homing source (Artemis, ATM, Narc).
pub const GUIDANCE_BONUS: i32 = 2;

/// Rack-size columns of the cluster table, ascending.
const COLUMN_SIZES: [u32; 12] = [2, 3, 4, 5, 6, 7, 8, 9, 10, 12, 15, 20];

/// Hits by [column][roll - 2] for rolls 2–12.
#[rustfmt::skip]
const CLUSTER_TABLE: [[u32; 11]; 12] = [
    // roll:    2  3  4  5  6  7  8  9 10 11 12
    /*  2 */ [  1, 1, 1, 1, 1, 1, 2, 2, 2, 2, 2 ],
    /*  3 */ [  1, 1, 1, 2, 2, 2, 2, 2, 3, 3, 3 ],
    /*  4 */ [  1, 1, 2, 2, 2, 3, 3, 3, 3, 4, 4 ],
    /*  5 */ [  1, 2, 2, 3, 3, 3, 3, 4, 4, 5, 5 ],
    /*  6 */ [  2, 2, 3, 3, 4, 4, 4, 5, 5, 6, 6 ],
    /*  7 */ [  2, 2, 3, 4, 4, 4, 4, 6, 6, 7, 7 ],
    /*  8 */ [  3, 3, 4, 4, 5, 5, 5, 6, 6, 8, 8 ],
    /*  9 */ [  3, 3, 4, 5, 5, 5, 5, 7, 7, 9, 9 ],
    /* 10 */ [  3, 3, 4, 6, 6, 6, 6, 8, 8, 10, 10 ],
    /* 12 */ [  4, 4, 5, 8, 8, 8, 8, 10, 10, 12, 12 ],
    /* 15 */ [  5, 5, 6, 9, 9, 9, 9, 12, 12, 15, 15 ],
    /* 20 */ [  6, 6, 9, 12, 12, 12, 12, 16, 16, 20, 20 ],
];

/// Which suppression, if any, cancelled the guidance bonus.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GuidanceSuppression {
    /// No suppression applied.
    None,
    /// The attack path crosses hostile ECM.
    Ecm,
    /// The target mounts an active stealth system.
    Stealth,
}

/// The single guidance bonus source that applied, first match wins.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GuidanceSource {
    /// Artemis fire-control system.
    Artemis,
    /// Native ATM guidance.
    Atm,
    /// Narc homing pod on the target.
    Narc,
}

/// Outcome of guidance-bonus selection.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Guidance {
    /// A bonus source applied.
    Active(GuidanceSource),
    /// A source was present but suppressed; the cause is reported.
    Suppressed(GuidanceSuppression),
    /// The munition has no guidance source.
    Unguided,
}

impl Guidance {
    /// Selects the guidance outcome for a munition.
    ///
    /// Exactly one source may apply: Artemis, then native ATM, then Narc.
    /// ECM suppression takes precedence over stealth when both are present.
    #[must_use]
    pub fn select(flags: MunitionFlags, ecm_affected: bool, target_stealth: bool) -> Self {
        let source = if flags.contains(MunitionFlags::ARTEMIS) {
            Some(GuidanceSource::Artemis)
        } else if flags.contains(MunitionFlags::ATM_GUIDED) {
            Some(GuidanceSource::Atm)
        } else if flags.contains(MunitionFlags::NARC) {
            Some(GuidanceSource::Narc)
        } else {
            None
        };
        match source {
            None => Self::Unguided,
            Some(_) if ecm_affected => Self::Suppressed(GuidanceSuppression::Ecm),
            Some(_) if target_stealth => Self::Suppressed(GuidanceSuppression::Stealth),
            Some(source) => Self::Active(source),
        }
    }

    /// The cluster modifier contributed by this guidance outcome.
    #[must_use]
    pub const fn modifier(self) -> i32 {
        match self {
            Self::Active(_) => GUIDANCE_BONUS,
            Self::Suppressed(_) | Self::Unguided => 0,
        }
    }
}

/// Accumulated cluster-table modifiers for one attack, by source.
///
/// Kept per-source rather than pre-summed so the report log can show where
/// the net modifier came from.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ClusterModifiers {
    /// Ultra-long-range table bonus or penalty.
    pub range_band: i32,
    /// Guidance bonus after suppression.
    pub guidance: i32,
    /// Glancing-blow penalty.
    pub glancing: i32,
    /// Direct-blow bonus for eligible munition classes.
    pub direct: i32,
    /// Electromagnetic-interference penalty.
    pub emi: i32,
    /// Point-defense engagement penalty.
    pub point_defense: i32,
}

impl ClusterModifiers {
    /// Starts an empty accumulation.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Folds the blow grade in: glancing applies a flat −4, direct adds
    /// `steps × 2` for cluster-table munitions.
    #[must_use]
    pub fn with_blow_grade(mut self, grade: BlowGrade, flags: MunitionFlags) -> Self {
        match grade {
            BlowGrade::Glancing => self.glancing = GLANCING_CLUSTER_PENALTY,
            BlowGrade::Direct { steps } if flags.contains(MunitionFlags::CLUSTER_TABLE) => {
                self.direct = steps * 2;
            }
            BlowGrade::Direct { .. } | BlowGrade::Normal => {}
        }
        self
    }

    /// Folds a guidance outcome in.
    #[must_use]
    pub fn with_guidance(mut self, guidance: Guidance) -> Self {
        self.guidance = guidance.modifier();
        self
    }

    /// Sets the range-band modifier.
    #[must_use]
    pub const fn with_range_band(mut self, modifier: i32) -> Self {
        self.range_band = modifier;
        self
    }

    /// Sets the electromagnetic-interference penalty.
    #[must_use]
    pub const fn with_emi(mut self, penalty: i32) -> Self {
        self.emi = penalty;
        self
    }

    /// Sets the point-defense penalty from counterfire.
    #[must_use]
    pub const fn with_point_defense(mut self, penalty: i32) -> Self {
        self.point_defense = penalty;
        self
    }

    /// Net modifier passed to the table lookup.
    #[must_use]
    pub const fn total(self) -> i32 {
        self.range_band + self.guidance + self.glancing + self.direct + self.emi
            + self.point_defense
    }
}

/// Largest table column at or below the rack size.
fn column_for(rack_size: u32) -> usize {
    let mut column = 0;
    for (index, size) in COLUMN_SIZES.iter().enumerate() {
        if *size <= rack_size {
            column = index;
        }
    }
    column
}

/// Table hits for a rack size at a given effective roll (clamped 2–12).
///
/// Rack sizes above the last column scale the 20-column result linearly,
/// floored, so a notional 40-rack delivers twice the 20-rack count.
fn table_hits(rack_size: u32, effective_roll: i32) -> u32 {
    let roll = effective_roll.clamp(2, 12);
    #[allow(clippy::cast_sign_loss)]
    let row = (roll - 2) as usize;
    let column = column_for(rack_size);
    let base = CLUSTER_TABLE[column][row];
    let largest = COLUMN_SIZES[COLUMN_SIZES.len() - 1];
    if rack_size > largest {
        (base * rack_size) / largest
    } else {
        base
    }
}

/// Resolves how many submissiles of a salvo connect.
///
/// With `all_shots_hit` (streak lock, point-blank shots against buildings
/// or clear hexes) every submissile connects unconditionally. Otherwise a
/// 2d6 roll shifted by the net modifier indexes the cluster table.
///
/// The result is always in `[0, rack_size]`; a heavily penalized salvo can
/// legitimately connect with zero submissiles once point-defense drives
/// the effective roll below the table floor.
pub fn resolve_hits(
    rack_size: u32,
    modifiers: ClusterModifiers,
    all_shots_hit: bool,
    dice: &mut Dice,
) -> u32 {
    if rack_size == 0 {
        return 0;
    }
    if all_shots_hit {
        return rack_size;
    }
    let raw = dice.two_d6() + modifiers.total();
    // A net roll pushed below the 2-row by counterfire destroys the salvo.
    if raw < 2 {
        return 0;
    }
    table_hits(rack_size, raw).min(rack_size)
}

/// Lump hits for conventional infantry: the whole salvo lands as a single
/// scaled lump rather than via the cluster table.
#[must_use]
pub const fn infantry_lump(rack_size: u32) -> u32 {
    rack_size
}

/// Lump hits for a battle-armor squad: one lump per active trooper.
#[must_use]
pub const fn battle_armor_lumps(active_troopers: u32) -> u32 {
    active_troopers
}

#[cfg(test)]
mod tests {
    use super::*;

    mod table_tests {
        use super::*;

        #[test]
        fn midline_roll_matches_table() {
            // Rack 20 at roll 7 is the canonical 12-hit cell.
            assert_eq!(table_hits(20, 7), 12);
        }

        #[test]
        fn snake_eyes_row_is_minimum() {
            assert_eq!(table_hits(2, 2), 1);
            assert_eq!(table_hits(20, 2), 6);
        }

        #[test]
        fn boxcars_row_delivers_full_rack() {
            for size in COLUMN_SIZES {
                assert_eq!(table_hits(size, 12), size);
            }
        }

        #[test]
        fn hits_never_exceed_rack() {
            for size in 2..=20 {
                for roll in 2..=12 {
                    assert!(table_hits(size, roll) <= size);
                }
            }
        }

        #[test]
        fn hits_monotonic_in_roll() {
            for size in COLUMN_SIZES {
                for roll in 2..12 {
                    assert!(table_hits(size, roll) <= table_hits(size, roll + 1));
                }
            }
        }

        #[test]
        fn off_column_rack_uses_next_lower_column() {
            // Rack 11 uses the 10 column.
            assert_eq!(table_hits(11, 7), table_hits(10, 7));
        }

        #[test]
        fn oversized_rack_scales_from_last_column() {
            assert_eq!(table_hits(40, 7), 2 * table_hits(20, 7));
        }

        #[test]
        fn roll_is_clamped() {
            assert_eq!(table_hits(10, 15), table_hits(10, 12));
        }
    }

    mod guidance_tests {
        use super::*;

        #[test]
        fn artemis_wins_over_narc() {
            let guidance = Guidance::select(
                MunitionFlags::ARTEMIS | MunitionFlags::NARC,
                false,
                false,
            );
            assert_eq!(guidance, Guidance::Active(GuidanceSource::Artemis));
        }

        #[test]
        fn ecm_suppression_is_reported() {
            let guidance = Guidance::select(MunitionFlags::ARTEMIS, true, false);
            assert_eq!(guidance, Guidance::Suppressed(GuidanceSuppression::Ecm));
            assert_eq!(guidance.modifier(), 0);
        }

        #[test]
        fn stealth_suppression_is_reported() {
            let guidance = Guidance::select(MunitionFlags::NARC, false, true);
            assert_eq!(guidance, Guidance::Suppressed(GuidanceSuppression::Stealth));
        }

        #[test]
        fn ecm_takes_precedence_over_stealth() {
            let guidance = Guidance::select(MunitionFlags::ATM_GUIDED, true, true);
            assert_eq!(guidance, Guidance::Suppressed(GuidanceSuppression::Ecm));
        }

        #[test]
        fn unguided_munitions_get_nothing() {
            let guidance = Guidance::select(MunitionFlags::CLUSTER_TABLE, false, false);
            assert_eq!(guidance, Guidance::Unguided);
            assert_eq!(guidance.modifier(), 0);
        }

        #[test]
        fn active_guidance_is_plus_two() {
            let guidance = Guidance::select(MunitionFlags::ATM_GUIDED, false, false);
            assert_eq!(guidance.modifier(), GUIDANCE_BONUS);
        }
    }

    mod modifier_tests {
        use super::*;

        #[test]
        fn total_sums_all_sources() {
            let modifiers = ClusterModifiers::new()
                .with_range_band(-1)
                .with_guidance(Guidance::Active(GuidanceSource::Artemis))
                .with_emi(-2)
                .with_point_defense(-4);
            assert_eq!(modifiers.total(), -1 + 2 - 2 - 4);
        }

        #[test]
        fn glancing_applies_minus_four() {
            let modifiers = ClusterModifiers::new()
                .with_blow_grade(BlowGrade::Glancing, MunitionFlags::CLUSTER_TABLE);
            assert_eq!(modifiers.total(), GLANCING_CLUSTER_PENALTY);
        }

        #[test]
        fn direct_blow_needs_cluster_munition() {
            let direct = BlowGrade::Direct { steps: 2 };
            let with = ClusterModifiers::new()
                .with_blow_grade(direct, MunitionFlags::CLUSTER_TABLE);
            let without = ClusterModifiers::new()
                .with_blow_grade(direct, MunitionFlags::empty());
            assert_eq!(with.total(), 4);
            assert_eq!(without.total(), 0);
        }
    }

    mod resolve_tests {
        use super::*;

        #[test]
        fn override_delivers_full_rack() {
            let mut dice = Dice::from_seed(1);
            let hits = resolve_hits(20, ClusterModifiers::new(), true, &mut dice);
            assert_eq!(hits, 20);
        }

        #[test]
        fn zero_rack_is_zero_hits() {
            let mut dice = Dice::from_seed(1);
            assert_eq!(resolve_hits(0, ClusterModifiers::new(), false, &mut dice), 0);
        }

        #[test]
        fn unmodified_rack_twenty_is_in_table_range() {
            // Rack 20, no modifiers: any unmodified roll lands in the
            // 6..=20 cell range of that column.
            for seed in 0..64 {
                let mut dice = Dice::from_seed(seed);
                let hits = resolve_hits(20, ClusterModifiers::new(), false, &mut dice);
                assert!((6..=20).contains(&hits), "hits {hits} outside table range");
            }
        }

        #[test]
        fn heavy_penalty_can_zero_the_salvo() {
            let modifiers = ClusterModifiers::new().with_point_defense(-11);
            let mut found_zero = false;
            for seed in 0..64 {
                let mut dice = Dice::from_seed(seed);
                if resolve_hits(10, modifiers, false, &mut dice) == 0 {
                    found_zero = true;
                }
            }
            assert!(found_zero, "a -11 modifier should zero some salvos");
        }

        #[test]
        fn hits_bounded_by_rack() {
            for seed in 0..32 {
                let mut dice = Dice::from_seed(seed);
                let modifiers = ClusterModifiers::new().with_range_band(3);
                let hits = resolve_hits(6, modifiers, false, &mut dice);
                assert!(hits <= 6);
            }
        }
    }

    mod lump_tests {
        use super::*;

        #[test]
        fn infantry_lump_scales_with_rack() {
            assert_eq!(infantry_lump(20), 20);
        }

        #[test]
        fn battle_armor_gets_one_lump_per_trooper() {
            assert_eq!(battle_armor_lumps(4), 4);
        }
    }
}
