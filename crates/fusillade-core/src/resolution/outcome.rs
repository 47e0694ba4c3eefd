//! Resolution outcomes.

use serde::{Deserialize, Serialize};

use crate::artillery::{ArtilleryShot, ScatterResult};
use crate::pointdefense::CounterfireState;

/// How one resolution ended.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutcomeKind {
    /// The attack could not be attempted; costs were still charged.
    Impossible,
    /// Automatic failure ruled by the to-hit calculator.
    AutoFailed,
    /// The roll (or an automatic success) connected.
    Hit,
    /// The roll fell short.
    Missed,
    /// Counterfire destroyed the missile before or during flight.
    DestroyedInFlight,
    /// A multi-shot weapon jammed on the minimum roll.
    Jammed,
    /// An artillery shot is still counting down.
    InFlight,
}

/// The complete result of one attack resolution.
///
/// Nested outcomes chain through `nested`: an Ultra second shot, a swarm
/// continuation, or a nemesis re-target each append one level.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolutionOutcome {
    /// Terminal state of the resolution.
    pub kind: OutcomeKind,
    /// Hits that connected (submissiles, lumps, or 1 for a single hit).
    pub hits: u32,
    /// Damage applied per hit.
    pub damage_per_hit: u32,
    /// Counterfire summary, when point defense engaged.
    pub interception: Option<CounterfireState>,
    /// Scatter result for artillery misses.
    pub scatter: Option<ScatterResult>,
    /// The declared shot for an artillery attack still in flight; the
    /// caller owns the countdown queue.
    pub in_flight: Option<ArtilleryShot>,
    /// Outcome of a nested re-fire or re-target resolution.
    pub nested: Option<Box<ResolutionOutcome>>,
}

impl ResolutionOutcome {
    /// An outcome with no hits and no attachments.
    #[must_use]
    pub const fn empty(kind: OutcomeKind) -> Self {
        Self {
            kind,
            hits: 0,
            damage_per_hit: 0,
            interception: None,
            scatter: None,
            in_flight: None,
            nested: None,
        }
    }

    /// A hit outcome.
    #[must_use]
    pub const fn hit(hits: u32, damage_per_hit: u32) -> Self {
        Self {
            kind: OutcomeKind::Hit,
            hits,
            damage_per_hit,
            interception: None,
            scatter: None,
            in_flight: None,
            nested: None,
        }
    }

    /// Total damage this outcome delivered, excluding nested outcomes.
    #[must_use]
    pub const fn total_damage(&self) -> u32 {
        self.hits * self.damage_per_hit
    }

    /// Attaches a counterfire summary.
    #[must_use]
    pub fn with_interception(mut self, state: CounterfireState) -> Self {
        self.interception = Some(state);
        self
    }

    /// Attaches a scatter result.
    #[must_use]
    pub fn with_scatter(mut self, scatter: ScatterResult) -> Self {
        self.scatter = Some(scatter);
        self
    }

    /// Attaches the declared shot of an in-flight artillery attack.
    #[must_use]
    pub fn with_in_flight(mut self, shot: ArtilleryShot) -> Self {
        self.in_flight = Some(shot);
        self
    }

    /// Attaches a nested outcome.
    #[must_use]
    pub fn with_nested(mut self, nested: ResolutionOutcome) -> Self {
        self.nested = Some(Box::new(nested));
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_damage_multiplies_hits() {
        let outcome = ResolutionOutcome::hit(6, 2);
        assert_eq!(outcome.total_damage(), 12);
    }

    #[test]
    fn empty_outcomes_deal_nothing() {
        let outcome = ResolutionOutcome::empty(OutcomeKind::Missed);
        assert_eq!(outcome.total_damage(), 0);
        assert!(outcome.nested.is_none());
    }

    #[test]
    fn nesting_chains() {
        let outcome = ResolutionOutcome::hit(1, 5)
            .with_nested(ResolutionOutcome::empty(OutcomeKind::Missed));
        assert_eq!(outcome.nested.unwrap().kind, OutcomeKind::Missed);
    }
}
