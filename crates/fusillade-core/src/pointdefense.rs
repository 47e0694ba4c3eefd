//! Point-defense engagement against incoming missile attacks.
//!
//! Counterfire runs in two regimes. Against standard missiles an engaging
//! interceptor degrades the salvo with a cluster-table penalty. Against
//! capital-grade missiles it produces a counter-attack-value subtracted
//! from the missile's own armor (see [`crate::capital`]).
//!
//! At most one unit-mounted interceptor (AMS or APDS) and one bay-type
//! interceptor (AMS bay or PD bay) engage per attack, first eligible found
//! wins. This is a deliberate simplification matching the simulated
//! ruleset, not a general auction.

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

use hexfield::{FiringArc, Hex};

use crate::report::{Report, ReportLog};
use crate::world::Unit;

/// Cluster-table penalty applied by an engaging AMS-family interceptor.
pub const AMS_CLUSTER_PENALTY: i32 = -4;

/// APDS penalty at point-blank range, before the trooper cap.
const APDS_BASE_PENALTY: i32 = 4;

/// Class of automated interceptor equipment.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum InterceptorClass {
    /// Anti-missile system mounted on a single unit.
    Ams,
    /// Advanced point-defense system carried by battle-armor troopers.
    Apds,
    /// Capital-ship anti-missile bay.
    AmsBay,
    /// Capital-ship general point-defense bay.
    PdBay,
}

impl InterceptorClass {
    /// True AMS: contributes full counter value against capital missiles.
    #[must_use]
    pub const fn is_true_ams(self) -> bool {
        matches!(self, Self::Ams | Self::AmsBay)
    }

    /// Bay-type interceptor (capital-ship weapon group).
    #[must_use]
    pub const fn is_bay(self) -> bool {
        matches!(self, Self::AmsBay | Self::PdBay)
    }
}

impl fmt::Display for InterceptorClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Ams => "AMS",
            Self::Apds => "APDS",
            Self::AmsBay => "AMS bay",
            Self::PdBay => "PD bay",
        };
        write!(f, "{name}")
    }
}

/// One piece of interceptor equipment mounted on a unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interceptor {
    /// Equipment class.
    pub class: InterceptorClass,
    /// Covered firing arc.
    pub arc: FiringArc,
    /// Undamaged and ready to fire.
    pub ready: bool,
    /// Rounds remaining; `None` for energy-fed equipment.
    pub rounds: Option<u32>,
    /// Heat added to the owning unit per engagement.
    pub heat: u32,
    /// Counter-attack-value against capital missiles.
    pub counter_value: u32,
    /// Weapons in the bay; bay-type only. Single-weapon bays cannot
    /// engage capital missiles.
    pub weapons_in_bay: u32,
    /// Active troopers backing an APDS; caps its distance-scaled penalty.
    pub trooper_cap: u32,
}

impl Interceptor {
    /// Creates a ready unit-mounted AMS.
    #[must_use]
    pub const fn ams(arc: FiringArc, rounds: u32, heat: u32, counter_value: u32) -> Self {
        Self {
            class: InterceptorClass::Ams,
            arc,
            ready: true,
            rounds: Some(rounds),
            heat,
            counter_value,
            weapons_in_bay: 0,
            trooper_cap: 0,
        }
    }

    /// Creates a ready APDS backed by `troopers`.
    #[must_use]
    pub const fn apds(arc: FiringArc, rounds: u32, troopers: u32) -> Self {
        Self {
            class: InterceptorClass::Apds,
            arc,
            ready: true,
            rounds: Some(rounds),
            heat: 0,
            counter_value: 2,
            weapons_in_bay: 0,
            trooper_cap: troopers,
        }
    }

    /// Creates a ready bay-type interceptor.
    #[must_use]
    pub const fn bay(
        class: InterceptorClass,
        arc: FiringArc,
        weapons: u32,
        heat: u32,
        counter_value: u32,
    ) -> Self {
        Self {
            class,
            arc,
            ready: true,
            rounds: None,
            heat,
            counter_value,
            weapons_in_bay: weapons,
            trooper_cap: 0,
        }
    }
}

/// The incoming attack as seen by the defender's point defense.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct IncomingSalvo {
    /// Hex the attack originates from; arcs are tested against it.
    pub origin: Hex,
    /// Capital-grade missile rather than a standard salvo.
    pub capital: bool,
    /// Range in hexes from defender to origin.
    pub distance: u32,
}

/// Accumulated counterfire results for one attack resolution.
///
/// Created when counterfire resolution begins, consumed by the state
/// machine, discarded after damage application.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CounterfireState {
    /// A unit-mounted AMS engaged.
    pub ams_engaged: bool,
    /// An APDS engaged.
    pub apds_engaged: bool,
    /// An AMS bay engaged.
    pub ams_bay_engaged: bool,
    /// A PD bay engaged.
    pub pd_bay_engaged: bool,
    /// Accumulated counter-attack-value (capital regime).
    pub counter_value: u32,
    /// Accumulated cluster-table penalty (standard regime).
    pub cluster_modifier: i32,
}

impl CounterfireState {
    /// Whether any interceptor engaged.
    #[must_use]
    pub const fn any_engaged(&self) -> bool {
        self.ams_engaged || self.apds_engaged || self.ams_bay_engaged || self.pd_bay_engaged
    }

    fn mark(&mut self, class: InterceptorClass) {
        match class {
            InterceptorClass::Ams => self.ams_engaged = true,
            InterceptorClass::Apds => self.apds_engaged = true,
            InterceptorClass::AmsBay => self.ams_bay_engaged = true,
            InterceptorClass::PdBay => self.pd_bay_engaged = true,
        }
    }
}

/// Distance-scaled APDS penalty: full at adjacent range, one point lost
/// per two hexes, never below 1, capped by the backing trooper count.
fn apds_penalty(distance: u32, trooper_cap: u32) -> i32 {
    #[allow(clippy::cast_possible_wrap)]
    let falloff = (distance / 2) as i32;
    let scaled = (APDS_BASE_PENALTY - falloff).max(1);
    #[allow(clippy::cast_possible_wrap)]
    let cap = trooper_cap.min(i32::MAX as u32) as i32;
    scaled.min(cap)
}

fn is_eligible(interceptor: &Interceptor, defender: &Unit, incoming: &IncomingSalvo) -> bool {
    if !interceptor.ready {
        return false;
    }
    if !interceptor
        .arc
        .contains(defender.facing, defender.position, incoming.origin)
    {
        return false;
    }
    if matches!(interceptor.rounds, Some(0)) {
        return false;
    }
    if !defender.can_afford_heat(interceptor.heat) {
        return false;
    }
    if incoming.capital && interceptor.class.is_bay() && interceptor.weapons_in_bay < 2 {
        return false;
    }
    true
}

/// Contribution of one engaging interceptor.
fn contribution(interceptor: &Interceptor, incoming: &IncomingSalvo) -> (i32, u32) {
    if incoming.capital {
        let value = if interceptor.class.is_true_ams() {
            interceptor.counter_value
        } else {
            interceptor.counter_value.div_ceil(2)
        };
        (0, value)
    } else if interceptor.class == InterceptorClass::Apds {
        (-apds_penalty(incoming.distance, interceptor.trooper_cap), 0)
    } else {
        (AMS_CLUSTER_PENALTY, 0)
    }
}

/// Resolves counterfire for one incoming attack.
///
/// Each engaging interceptor spends one round of ammunition (if ammo-fed)
/// and adds its heat to the defender. An interceptor whose heat cost the
/// defender cannot afford does not fire. The defender itself must be ready
/// (not shut down, not destroyed) for anything to engage.
pub fn engage(defender: &mut Unit, incoming: &IncomingSalvo, log: &mut ReportLog) -> CounterfireState {
    let mut state = CounterfireState::default();
    if !defender.is_ready() {
        return state;
    }

    let mut mount_used = false;
    let mut bay_used = false;

    for index in 0..defender.interceptors.len() {
        let interceptor = &defender.interceptors[index];
        let family_used = if interceptor.class.is_bay() {
            bay_used
        } else {
            mount_used
        };
        if family_used || !is_eligible(interceptor, defender, incoming) {
            continue;
        }

        let (modifier, counter_value) = contribution(interceptor, incoming);
        let class = interceptor.class;
        let heat = interceptor.heat;

        let interceptor = &mut defender.interceptors[index];
        if let Some(rounds) = interceptor.rounds.as_mut() {
            *rounds -= 1;
        }
        defender.add_heat(heat);

        state.mark(class);
        state.cluster_modifier += modifier;
        state.counter_value += counter_value;
        if class.is_bay() {
            bay_used = true;
        } else {
            mount_used = true;
        }

        debug!(%class, modifier, counter_value, "interceptor engaged");
        log.push(Report::InterceptorFired {
            class,
            modifier,
            counter_value,
        });
    }

    state
}
