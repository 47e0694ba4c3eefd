//! Per-resolution attack context.

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::capital::DetectionRange;
use crate::munition::MunitionProfile;
use crate::roll::ToHit;
use crate::world::{AttackTarget, UnitId};

/// Everything one attack resolution needs, owned by that resolution.
///
/// A context is created per attack and moved through the state machine;
/// nested re-fires build a fresh context rather than mutating shared
/// state, so re-entrancy cannot corrupt an outer resolution.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttackContext {
    /// Attacking unit.
    pub attacker: UnitId,
    /// Index of the firing mount on the attacker.
    pub mount: usize,
    /// The loaded munition.
    pub munition: Arc<MunitionProfile>,
    /// Declared target.
    pub target: AttackTarget,
    /// To-hit requirement from the external calculator.
    pub to_hit: ToHit,
    /// Range-band cluster modifier from the external calculator.
    pub range_band: i32,
    /// Electromagnetic-interference cluster penalty at the target.
    pub emi: i32,
    /// Charge one round of ammunition for this resolution.
    pub charge_ammo: bool,
    /// Charge weapon heat for this resolution.
    pub charge_heat: bool,
    /// Overrides the munition rack size (swarm continuations fire the
    /// leftover missiles only).
    pub rack_override: Option<u32>,
    /// Nested re-targets and second shots may spawn from this context.
    pub allow_nested: bool,
    /// Sensor mode declared for a bearings-only launch.
    pub detection_range: DetectionRange,
}

impl AttackContext {
    /// Creates a top-level context with costs charged and nesting allowed.
    #[must_use]
    pub fn new(
        attacker: UnitId,
        mount: usize,
        munition: Arc<MunitionProfile>,
        target: AttackTarget,
        to_hit: ToHit,
    ) -> Self {
        Self {
            attacker,
            mount,
            munition,
            target,
            to_hit,
            range_band: 0,
            emi: 0,
            charge_ammo: true,
            charge_heat: true,
            rack_override: None,
            allow_nested: true,
            detection_range: DetectionRange::Long,
        }
    }

    /// Sets the sensor mode for a bearings-only launch.
    #[must_use]
    pub const fn with_detection_range(mut self, range: DetectionRange) -> Self {
        self.detection_range = range;
        self
    }

    /// Sets the range-band cluster modifier.
    #[must_use]
    pub const fn with_range_band(mut self, modifier: i32) -> Self {
        self.range_band = modifier;
        self
    }

    /// Sets the electromagnetic-interference cluster penalty.
    #[must_use]
    pub const fn with_emi(mut self, penalty: i32) -> Self {
        self.emi = penalty;
        self
    }

    /// Derives a nested re-target context: same weapon, new unit target,
    /// duplicate heat charges suppressed, no further nesting.
    #[must_use]
    pub fn retargeted(&self, target: UnitId, rack: Option<u32>) -> Self {
        Self {
            attacker: self.attacker,
            mount: self.mount,
            munition: Arc::clone(&self.munition),
            target: AttackTarget::Unit(target),
            to_hit: self.to_hit,
            range_band: self.range_band,
            emi: self.emi,
            charge_ammo: true,
            charge_heat: false,
            rack_override: rack,
            allow_nested: false,
            detection_range: self.detection_range,
        }
    }

    /// Derives the second-shot context for an Ultra/Rotary re-fire: ammo
    /// charged again, heat not, no further nesting.
    #[must_use]
    pub fn second_shot(&self) -> Self {
        Self {
            attacker: self.attacker,
            mount: self.mount,
            munition: Arc::clone(&self.munition),
            target: self.target,
            to_hit: self.to_hit,
            range_band: self.range_band,
            emi: self.emi,
            charge_ammo: true,
            charge_heat: false,
            rack_override: self.rack_override,
            allow_nested: false,
            detection_range: self.detection_range,
        }
    }

    /// Submissiles this resolution fires.
    #[must_use]
    pub fn rack_size(&self) -> u32 {
        self.rack_override.unwrap_or(self.munition.rack_size)
    }
}
