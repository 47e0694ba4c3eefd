//! Error types for attack resolution.
//!
//! Only precondition violations cross the `resolve()` boundary. Every
//! in-rule outcome (miss, zero hits, full interception, off-board scatter)
//! is a normal [`crate::resolution::ResolutionOutcome`], never an error.

use thiserror::Error;

use crate::world::UnitId;

/// A precondition violation that aborts one attack before any roll or
/// heat/ammo cost.
///
/// The caller's game turn continues with other attacks; these errors are
/// fatal only for the attack that raised them.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AttackError {
    /// The attacking unit is not present in the world.
    #[error("attacker {0} not found")]
    UnknownAttacker(UnitId),

    /// The targeted unit is not present in the world.
    #[error("target unit {0} not found")]
    UnknownTarget(UnitId),

    /// The weapon mount index does not exist on the attacker.
    #[error("unit {unit} has no weapon mount {mount}")]
    UnknownMount {
        /// The attacking unit.
        unit: UnitId,
        /// The requested mount index.
        mount: usize,
    },

    /// The mount is destroyed or jammed and cannot fire.
    #[error("weapon mount {mount} on unit {unit} is not operational")]
    MountNotOperational {
        /// The attacking unit.
        unit: UnitId,
        /// The mount index.
        mount: usize,
    },

    /// An ammo-fed weapon has no usable ammunition loaded.
    #[error("no usable ammunition for mount {mount} on unit {unit}")]
    NoAmmunition {
        /// The attacking unit.
        unit: UnitId,
        /// The mount index.
        mount: usize,
    },

    /// The munition requires a unit target but the attack was declared
    /// against a hex or building.
    #[error("attack requires a unit target")]
    UnitTargetRequired,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn errors_render_context() {
        let err = AttackError::NoAmmunition {
            unit: UnitId::new(3),
            mount: 1,
        };
        let text = err.to_string();
        assert!(text.contains("mount 1"));
        assert!(text.contains("unit 3"));
    }
}
