//! Structured resolution reporting.
//!
//! The core emits typed event records, not formatted strings; a presentation
//! layer owns the human-readable text. [`ReportLog`] is an append-only
//! ordered sink drained by the caller after each resolution, mirroring how
//! the engine's other telemetry is collected.

use serde::{Deserialize, Serialize};

use hexfield::Hex;

use crate::cluster::{GuidanceSource, GuidanceSuppression};
use crate::pointdefense::InterceptorClass;
use crate::roll::{BlowGrade, ToHit};
use crate::world::{AttackTarget, MinefieldKind, SmokeKind, UnitId};

/// Why a nested re-target resolution was spawned.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RetargetReason {
    /// iNarc nemesis pod confusion.
    Nemesis,
    /// Swarm missiles continuing to a nearby unit.
    Swarm,
}

/// One typed resolution event.
///
/// Each variant is a message id plus typed arguments. Events appear in the
/// log in the exact order the resolution produced them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Report {
    /// An attack was announced.
    AttackAnnounced {
        /// Attacking unit.
        attacker: UnitId,
        /// Weapon mount index.
        mount: usize,
        /// Declared target.
        target: AttackTarget,
    },
    /// The to-hit calculator ruled the attack impossible.
    AttackImpossible {
        /// Attacking unit.
        attacker: UnitId,
    },
    /// The attack roll was made.
    RollMade {
        /// 2d6 result.
        roll: i32,
        /// The requirement rolled against.
        target: ToHit,
    },
    /// A glancing or direct blow applied.
    BlowGraded {
        /// The grade.
        grade: BlowGrade,
    },
    /// A guidance bonus source applied.
    GuidanceApplied {
        /// Which source won.
        source: GuidanceSource,
    },
    /// The guidance bonus was suppressed.
    GuidanceSuppressed {
        /// Which suppression applied.
        cause: GuidanceSuppression,
    },
    /// Cluster table resolution.
    ClusterHits {
        /// Submissiles in the salvo.
        rack: u32,
        /// Net table modifier.
        modifier: i32,
        /// Submissiles that connected.
        hits: u32,
    },
    /// Lump override against infantry or battle armor.
    LumpedHits {
        /// Lumps delivered.
        hits: u32,
    },
    /// An interceptor engaged the incoming attack.
    InterceptorFired {
        /// Interceptor class.
        class: InterceptorClass,
        /// Cluster modifier contributed (standard regime).
        modifier: i32,
        /// Counter-attack-value contributed (capital regime).
        counter_value: u32,
    },
    /// Capital missile armor after a counterfire pass.
    CapitalArmor {
        /// Armor before the pass.
        before: u32,
        /// Armor after, clamped at 0.
        after: u32,
    },
    /// Counterfire destroyed the capital missile outright.
    CapitalMissileDestroyed,
    /// Guidance degradation pushed the roll below the target.
    DestroyedInFlight {
        /// The to-hit penalty that did it.
        penalty: i32,
    },
    /// Bearings-only acquisition locked a target.
    TargetAcquired {
        /// The acquired unit.
        target: UnitId,
        /// Distance in hexes at acquisition.
        distance: u32,
    },
    /// Bearings-only acquisition found nothing in arc and range.
    NoEligibleTargets,
    /// A multi-shot weapon jammed on the minimum roll.
    WeaponJammed {
        /// Owning unit.
        unit: UnitId,
        /// Mount index.
        mount: usize,
    },
    /// An artillery shot scattered.
    ShotScattered {
        /// Intended hex.
        from: Hex,
        /// Landing hex.
        to: Hex,
        /// Displacement in hexes.
        distance: u32,
        /// Landed off the playable area.
        off_board: bool,
    },
    /// An artillery shot is still in flight.
    ArtilleryInFlight {
        /// Turns until impact.
        turns_remaining: u32,
    },
    /// A hex became a persistent artillery auto-hit marker.
    AutoHitMarked {
        /// The marked hex.
        hex: Hex,
    },
    /// A spotter adjusted an artillery to-hit.
    SpotterAdjusted {
        /// The spotting unit.
        spotter: UnitId,
        /// To-hit reduction applied.
        reduction: i32,
    },
    /// Damage applied to a unit.
    UnitDamaged {
        /// The damaged unit.
        target: UnitId,
        /// Damage amount.
        amount: u32,
        /// Destroyed determination from the entity model.
        destroyed: bool,
    },
    /// Damage applied to a building.
    BuildingDamaged {
        /// Building hex.
        hex: Hex,
        /// Damage amount.
        amount: u32,
        /// Remaining construction factor.
        cf_remaining: u32,
    },
    /// Minefields removed from a hex.
    MinefieldCleared {
        /// The hex.
        hex: Hex,
        /// Fields removed.
        fields: u32,
    },
    /// A minefield payload landed.
    MinesLaid {
        /// The hex.
        hex: Hex,
        /// Field type.
        kind: MinefieldKind,
    },
    /// A smoke payload landed.
    SmokeLaid {
        /// The hex.
        hex: Hex,
        /// Smoke type.
        kind: SmokeKind,
    },
    /// A flare payload lit.
    FlareLit {
        /// Center hex.
        hex: Hex,
        /// Illumination radius.
        radius: u32,
    },
    /// A nuclear payload detonated.
    NuclearDetonation {
        /// Ground zero.
        hex: Hex,
        /// Detonation damage.
        damage: u32,
    },
    /// A fuel-air payload detonated.
    FuelAirDetonation {
        /// Center hex.
        hex: Hex,
        /// Outermost damaged ring.
        radius: u32,
    },
    /// Exposed troopers killed by blast instant-kill rolls.
    TroopersKilled {
        /// The formation.
        unit: UnitId,
        /// Troopers lost.
        troopers: u32,
    },
    /// A hex caught fire.
    FireIgnited {
        /// The burning hex.
        hex: Hex,
    },
    /// One shot of ammunition was restored for a nested re-fire.
    AmmoRestored {
        /// Owning unit.
        unit: UnitId,
        /// Mount index.
        mount: usize,
    },
    /// The salvo re-targeted and a nested resolution began.
    Retargeted {
        /// New target.
        target: UnitId,
        /// Why.
        reason: RetargetReason,
    },
}

/// Append-only ordered log of resolution events.
///
/// # Example
///
/// ```
/// use fusillade_core::report::{Report, ReportLog};
/// use fusillade_core::world::UnitId;
///
/// let mut log = ReportLog::new();
/// log.push(Report::AttackImpossible { attacker: UnitId::new(1) });
/// assert_eq!(log.len(), 1);
/// let drained = log.drain();
/// assert!(log.is_empty());
/// assert_eq!(drained.len(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReportLog {
    entries: Vec<Report>,
}

impl ReportLog {
    /// Creates an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an event.
    pub fn push(&mut self, report: Report) {
        self.entries.push(report);
    }

    /// Number of events recorded.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the log is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Events in order.
    #[must_use]
    pub fn entries(&self) -> &[Report] {
        &self.entries
    }

    /// Iterates events in order.
    pub fn iter(&self) -> impl Iterator<Item = &Report> {
        self.entries.iter()
    }

    /// Drains and returns all recorded events, clearing the log.
    pub fn drain(&mut self) -> Vec<Report> {
        std::mem::take(&mut self.entries)
    }
}
