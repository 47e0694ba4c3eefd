//! Dice, to-hit outcomes, and margin-of-success math.
//!
//! All randomness in a resolution flows through one [`Dice`] value seeded
//! per engagement, so a recorded seed replays the entire engagement
//! deterministically. Once a roll is consumed it is never discarded.
//!
//! The to-hit number is consumed from an external calculator as a
//! [`ToHit`] tagged union rather than sentinel integers, so sentinel
//! handling is exhaustiveness-checked at compile time.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A 2d6 roll can never be below this; margins are computed against an
/// effective target number floored here.
pub const MINIMUM_TARGET: i32 = 2;

/// Margin of success needed per direct-blow step.
pub const DIRECT_BLOW_DIVISOR: i32 = 3;

/// The to-hit requirement for one attack, as produced by the external
/// to-hit calculator.
///
/// # Example
///
/// ```
/// use fusillade_core::roll::ToHit;
///
/// let to_hit = ToHit::Value(8);
/// assert_eq!(to_hit.value(), Some(8));
/// assert!(ToHit::Impossible.value().is_none());
/// ```
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ToHit {
    /// The attack cannot be attempted; no roll is consumed, but heat and
    /// ammunition are still charged exactly once.
    Impossible,
    /// The attack automatically fails; a roll is still made for display.
    AutoFail,
    /// The attack automatically succeeds; a roll is still made for display.
    AutoSuccess,
    /// A finite 2d6 target number.
    Value(i32),
}

impl ToHit {
    /// The finite target number, if any.
    #[must_use]
    pub const fn value(self) -> Option<i32> {
        match self {
            Self::Value(v) => Some(v),
            _ => None,
        }
    }

    /// Whether this is one of the three sentinels.
    #[must_use]
    pub const fn is_sentinel(self) -> bool {
        !matches!(self, Self::Value(_))
    }
}

impl fmt::Display for ToHit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Impossible => write!(f, "impossible"),
            Self::AutoFail => write!(f, "automatic failure"),
            Self::AutoSuccess => write!(f, "automatic success"),
            Self::Value(v) => write!(f, "{v}+"),
        }
    }
}

/// Margin of success for a roll against a to-hit requirement.
///
/// Defined as `roll - max(2, target)`; negative values are a margin of
/// failure. Only meaningful for finite targets: sentinels yield `None`.
#[must_use]
pub fn margin_of_success(roll: i32, to_hit: ToHit) -> Option<i32> {
    to_hit.value().map(|v| roll - v.max(MINIMUM_TARGET))
}

/// Damage grade from the margin-of-success rules.
///
/// Glancing and direct blows are mutually exclusive and computed once per
/// attack, upstream of both cluster resolution and per-hit damage.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum BlowGrade {
    /// Roll exactly equalled the target number: resultant damage is halved.
    Glancing,
    /// No special grade.
    Normal,
    /// High margin of success: damage may rise up to double.
    Direct {
        /// `margin / 3` (integer division), at least 1.
        steps: i32,
    },
}

impl BlowGrade {
    /// Grades a roll against its to-hit requirement.
    ///
    /// Direct blows require a unit target; glancing blows are config-gated
    /// by `glancing_enabled`. Sentinels always grade `Normal` because no
    /// finite margin exists.
    #[must_use]
    pub fn grade(roll: i32, to_hit: ToHit, target_is_unit: bool, glancing_enabled: bool) -> Self {
        let Some(target) = to_hit.value() else {
            return Self::Normal;
        };
        if glancing_enabled && roll == target {
            return Self::Glancing;
        }
        let Some(margin) = margin_of_success(roll, to_hit) else {
            return Self::Normal;
        };
        let steps = margin / DIRECT_BLOW_DIVISOR;
        if steps >= 1 && target_is_unit {
            Self::Direct { steps }
        } else {
            Self::Normal
        }
    }

    /// Scales a flat damage value by this grade.
    ///
    /// Glancing halves, rounded up (a glancing hit that connects always
    /// deals at least one point). Direct adds one quarter of the base per
    /// step, rounded up, capped at double. Cluster-table munitions do not
    /// use this path; they fold the grade into the cluster modifier
    /// instead (see [`crate::cluster`]).
    #[must_use]
    pub fn scale_damage(self, base: u32) -> u32 {
        match self {
            Self::Glancing => base.div_ceil(2),
            Self::Normal => base,
            Self::Direct { steps } => {
                let step_bonus = base.div_ceil(4);
                let bonus = step_bonus.saturating_mul(steps.max(0).unsigned_abs());
                (base + bonus).min(base * 2)
            }
        }
    }
}

/// Deterministic dice roller for one engagement.
///
/// Wraps a `ChaCha8Rng` so replays from a recorded seed reproduce every
/// roll in order.
///
/// # Example
///
/// ```
/// use fusillade_core::roll::Dice;
///
/// let mut a = Dice::from_seed(17);
/// let mut b = Dice::from_seed(17);
/// assert_eq!(a.two_d6(), b.two_d6());
/// ```
#[derive(Debug, Clone)]
pub struct Dice {
    rng: ChaCha8Rng,
}

impl Dice {
    /// Creates a roller from an engagement seed.
    #[must_use]
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// One d6: uniform in 1–6.
    pub fn d6(&mut self) -> i32 {
        self.rng.gen_range(1..=6)
    }

    /// Two d6 summed: 2–12 with the standard triangular distribution.
    pub fn two_d6(&mut self) -> i32 {
        self.d6() + self.d6()
    }

    /// Fair coin via the tabletop convention: true on a d6 of 4+.
    pub fn coin(&mut self) -> bool {
        self.d6() >= 4
    }
}
