//! Munition and weapon profiles.
//!
//! Profiles are static, already-resolved descriptive data: rack size,
//! per-submissile damage, capability flags, and capital armor. They are
//! shared read-only for the whole game session (`Arc`), and all derived
//! lookup tables are built eagerly by [`MunitionTables`] and injected into
//! the components that need them.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

bitflags! {
    /// Capability flags of a munition.
    ///
    /// Guidance flags (`ARTEMIS`, `ATM_GUIDED`, `NARC`) are mutually
    /// exclusive at lookup time: the cluster resolver applies exactly one
    /// guidance bonus, first match wins.
    #[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
    pub struct MunitionFlags: u32 {
        /// Hit count is drawn from the cluster probability table.
        const CLUSTER_TABLE = 1 << 0;
        /// Artemis fire-control bonus applies.
        const ARTEMIS = 1 << 1;
        /// Native ATM guidance bonus applies.
        const ATM_GUIDED = 1 << 2;
        /// Narc homing bonus applies when the target carries a pod.
        const NARC = 1 << 3;
        /// Streak lock: all submissiles hit on a successful roll.
        const STREAK = 1 << 4;
        /// Leftover missiles continue to a nearby target.
        const SWARM = 1 << 5;
        /// iNarc nemesis pod confusion can re-target the salvo.
        const NEMESIS = 1 << 6;
        /// Capital-grade missile with its own armor pool.
        const CAPITAL = 1 << 7;
        /// Fired at a hex; self-selects its target at detonation time.
        const BEARINGS_ONLY = 1 << 8;
        /// Tele-operated: the firing player chooses among candidates.
        const TELE_OPERATED = 1 << 9;
        /// Illumination flare payload.
        const FLARE = 1 << 10;
        /// Conventional smoke payload.
        const SMOKE = 1 << 11;
        /// Laser-inhibiting smoke payload.
        const LASER_SMOKE = 1 << 12;
        /// FASCAM conventional minefield payload.
        const FASCAM = 1 << 13;
        /// Vibrabomb minefield payload.
        const VIBRABOMB = 1 << 14;
        /// Nuclear warhead.
        const NUCLEAR = 1 << 15;
        /// Fuel-air explosive: area damage falling off by ring.
        const FUEL_AIR = 1 << 16;
        /// Mine-clearance munition.
        const MINE_CLEARANCE = 1 << 17;
    }
}

impl MunitionFlags {
    /// Whether any artillery special payload flag is set.
    #[must_use]
    pub fn has_special_payload(self) -> bool {
        self.intersects(
            Self::FLARE
                | Self::SMOKE
                | Self::LASER_SMOKE
                | Self::FASCAM
                | Self::VIBRABOMB
                | Self::NUCLEAR
                | Self::FUEL_AIR,
        )
    }
}

/// Weapon class driving re-fire and ammunition semantics.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WeaponClass {
    /// Heat-fed direct-fire weapon; no ammunition.
    Energy,
    /// Single-shot ammo-fed direct-fire weapon.
    Ballistic,
    /// Missile rack resolved through the cluster table.
    Missile,
    /// Ultra autocannon: may fire twice, jams on a first-shot roll of 2.
    Ultra,
    /// Rotary autocannon: may fire twice, jams on a first-shot roll of 2.
    Rotary,
    /// Indirect-fire tube with multi-turn flight.
    Artillery,
    /// Capital-grade missile launcher.
    Capital,
}

impl WeaponClass {
    /// Whether this class consumes ammunition per shot.
    #[must_use]
    pub const fn uses_ammo(self) -> bool {
        !matches!(self, Self::Energy)
    }

    /// Whether the two-rolls re-fire rule can apply.
    #[must_use]
    pub const fn supports_refire(self) -> bool {
        matches!(self, Self::Ultra | Self::Rotary)
    }
}

impl fmt::Display for WeaponClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Energy => "energy",
            Self::Ballistic => "ballistic",
            Self::Missile => "missile",
            Self::Ultra => "ultra",
            Self::Rotary => "rotary",
            Self::Artillery => "artillery",
            Self::Capital => "capital",
        };
        write!(f, "{name}")
    }
}

/// Immutable descriptive data for one loaded munition.
///
/// Shared read-only for the session; resolution never mutates a profile.
///
/// # Example
///
/// ```
/// use fusillade_core::munition::{MunitionFlags, MunitionProfile};
///
/// let lrm20 = MunitionProfile::new("LRM 20", 20, 1, MunitionFlags::CLUSTER_TABLE);
/// assert_eq!(lrm20.rack_size, 20);
/// assert_eq!(lrm20.salvo_damage(), 20);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MunitionProfile {
    /// Display name.
    pub name: String,
    /// Submissiles per shot; 1 for single-projectile weapons.
    pub rack_size: u32,
    /// Base damage per submissile.
    pub damage_per_missile: u32,
    /// Capability flags.
    pub flags: MunitionFlags,
    /// Armor value for capital-grade missiles; 0 otherwise.
    pub capital_armor: u32,
    /// Artillery caliber, indexing the blast/flare tables; 0 otherwise.
    pub caliber: u32,
    /// Heat generated by firing one shot.
    pub heat: u32,
}

impl MunitionProfile {
    /// Creates a profile with no capital armor, caliber, or heat.
    #[must_use]
    pub fn new(name: &str, rack_size: u32, damage_per_missile: u32, flags: MunitionFlags) -> Self {
        Self {
            name: name.to_string(),
            rack_size,
            damage_per_missile,
            flags,
            capital_armor: 0,
            caliber: 0,
            heat: 0,
        }
    }

    /// Sets the capital missile armor value.
    #[must_use]
    pub fn with_capital_armor(mut self, armor: u32) -> Self {
        self.capital_armor = armor;
        self
    }

    /// Sets the artillery caliber.
    #[must_use]
    pub fn with_caliber(mut self, caliber: u32) -> Self {
        self.caliber = caliber;
        self
    }

    /// Sets the per-shot heat.
    #[must_use]
    pub fn with_heat(mut self, heat: u32) -> Self {
        self.heat = heat;
        self
    }

    /// Total damage if every submissile connects.
    #[must_use]
    pub const fn salvo_damage(&self) -> u32 {
        self.rack_size * self.damage_per_missile
    }

    /// Wraps the profile for session-wide sharing.
    #[must_use]
    pub fn shared(self) -> Arc<Self> {
        Arc::new(self)
    }
}

/// Eagerly-constructed lookup tables derived from munition data.
///
/// Owned by whoever loads munition profiles and injected into the
/// resolver; never accessed through statics.
#[derive(Debug, Clone)]
pub struct MunitionTables {
    blast_radius: BTreeMap<u32, u32>,
    flare_radius: BTreeMap<u32, u32>,
    nuclear_damage: BTreeMap<u32, u32>,
}

impl MunitionTables {
    /// Builds the standard tables.
    ///
    /// Calibers are keyed by the munition's `caliber` field; lookups fall
    /// back to the largest table entry at or below the requested caliber.
    #[must_use]
    pub fn standard() -> Self {
        let blast_radius = BTreeMap::from([(5, 0), (10, 1), (15, 1), (20, 2), (25, 2), (30, 3)]);
        let flare_radius = BTreeMap::from([(5, 2), (10, 3), (15, 4), (20, 5), (25, 6), (30, 6)]);
        let nuclear_damage =
            BTreeMap::from([(5, 100), (10, 200), (15, 400), (20, 600), (25, 800), (30, 1000)]);
        Self {
            blast_radius,
            flare_radius,
            nuclear_damage,
        }
    }

    fn floor_lookup(table: &BTreeMap<u32, u32>, caliber: u32) -> u32 {
        table
            .range(..=caliber)
            .next_back()
            .map_or(0, |(_, value)| *value)
    }

    /// Blast radius in hexes for an artillery caliber.
    #[must_use]
    pub fn blast_radius(&self, caliber: u32) -> u32 {
        Self::floor_lookup(&self.blast_radius, caliber)
    }

    /// Illumination radius in hexes for a flare of the given caliber.
    #[must_use]
    pub fn flare_radius(&self, caliber: u32) -> u32 {
        Self::floor_lookup(&self.flare_radius, caliber)
    }

    /// Detonation damage for a nuclear munition of the given caliber.
    #[must_use]
    pub fn nuclear_damage(&self, caliber: u32) -> u32 {
        Self::floor_lookup(&self.nuclear_damage, caliber)
    }

    /// Fuel-air damage fraction numerator/denominator by ring distance
    /// from the impact hex: full at the center, halving per ring.
    #[must_use]
    pub fn fuel_air_fraction(ring: u32) -> (u32, u32) {
        match ring {
            0 => (1, 1),
            1 => (1, 2),
            2 => (1, 4),
            _ => (0, 1),
        }
    }
}

impl Default for MunitionTables {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod profile_tests {
        use super::*;

        #[test]
        fn salvo_damage_is_rack_times_per_missile() {
            let profile = MunitionProfile::new("SRM 6", 6, 2, MunitionFlags::CLUSTER_TABLE);
            assert_eq!(profile.salvo_damage(), 12);
        }

        #[test]
        fn builder_sets_optional_fields() {
            let profile = MunitionProfile::new("Killer Whale", 1, 40, MunitionFlags::CAPITAL)
                .with_capital_armor(40)
                .with_heat(20);
            assert_eq!(profile.capital_armor, 40);
            assert_eq!(profile.heat, 20);
        }

        #[test]
        fn special_payload_detection() {
            assert!(MunitionFlags::FLARE.has_special_payload());
            assert!(MunitionFlags::FUEL_AIR.has_special_payload());
            assert!(!MunitionFlags::CLUSTER_TABLE.has_special_payload());
            assert!(!MunitionFlags::MINE_CLEARANCE.has_special_payload());
        }

        #[test]
        fn profiles_serialize_round_trip() {
            let profile = MunitionProfile::new(
                "LRM 15",
                15,
                1,
                MunitionFlags::CLUSTER_TABLE | MunitionFlags::ARTEMIS,
            );
            let json = serde_json::to_string(&profile).unwrap();
            let back: MunitionProfile = serde_json::from_str(&json).unwrap();
            assert_eq!(profile, back);
        }
    }

    mod table_tests {
        use super::*;

        #[test]
        fn blast_radius_grows_with_caliber() {
            let tables = MunitionTables::standard();
            assert!(tables.blast_radius(5) <= tables.blast_radius(20));
            assert_eq!(tables.blast_radius(20), 2);
        }

        #[test]
        fn lookup_floors_between_entries() {
            let tables = MunitionTables::standard();
            assert_eq!(tables.blast_radius(12), tables.blast_radius(10));
        }

        #[test]
        fn unknown_small_caliber_is_zero() {
            let tables = MunitionTables::standard();
            assert_eq!(tables.blast_radius(1), 0);
        }

        #[test]
        fn fuel_air_fractions_fall_off() {
            assert_eq!(MunitionTables::fuel_air_fraction(0), (1, 1));
            assert_eq!(MunitionTables::fuel_air_fraction(1), (1, 2));
            assert_eq!(MunitionTables::fuel_air_fraction(2), (1, 4));
            assert_eq!(MunitionTables::fuel_air_fraction(3), (0, 1));
        }
    }
}
