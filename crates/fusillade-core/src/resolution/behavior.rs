//! Weapon behavior selection.

use crate::munition::{MunitionFlags, WeaponClass};

/// How an attack resolves once the roll is known.
///
/// Selected up front from the weapon class and munition flags; the state
/// machine dispatches on this sum type rather than on class-specific
/// handler objects, so every combination is visible in one match.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum WeaponBehavior {
    /// One projectile, flat damage.
    SingleHit,
    /// Submissile salvo resolved through the cluster table.
    Cluster,
    /// Ultra/Rotary double-tap with the jam-on-2 rule.
    Refire,
    /// Capital missile with its own armor pool.
    Capital {
        /// Fired at a hex; acquires its target at resolution time.
        bearings_only: bool,
    },
    /// Indirect shot with multi-turn flight.
    Artillery,
}

impl WeaponBehavior {
    /// Selects the behavior for a weapon class and munition.
    #[must_use]
    pub fn select(class: WeaponClass, flags: MunitionFlags) -> Self {
        match class {
            WeaponClass::Artillery => Self::Artillery,
            WeaponClass::Capital => Self::Capital {
                bearings_only: flags.contains(MunitionFlags::BEARINGS_ONLY),
            },
            WeaponClass::Ultra | WeaponClass::Rotary => Self::Refire,
            WeaponClass::Missile => Self::Cluster,
            WeaponClass::Energy | WeaponClass::Ballistic => {
                if flags.contains(MunitionFlags::CLUSTER_TABLE) {
                    Self::Cluster
                } else {
                    Self::SingleHit
                }
            }
        }
    }

    /// Whether this behavior draws incoming point-defense counterfire.
    #[must_use]
    pub const fn draws_counterfire(self) -> bool {
        matches!(self, Self::Cluster | Self::Capital { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missiles_use_the_cluster_table() {
        let behavior = WeaponBehavior::select(WeaponClass::Missile, MunitionFlags::CLUSTER_TABLE);
        assert_eq!(behavior, WeaponBehavior::Cluster);
    }

    #[test]
    fn autocannon_classes_refire() {
        assert_eq!(
            WeaponBehavior::select(WeaponClass::Ultra, MunitionFlags::empty()),
            WeaponBehavior::Refire
        );
        assert_eq!(
            WeaponBehavior::select(WeaponClass::Rotary, MunitionFlags::empty()),
            WeaponBehavior::Refire
        );
    }

    #[test]
    fn bearings_only_flag_shapes_capital_behavior() {
        let plain = WeaponBehavior::select(WeaponClass::Capital, MunitionFlags::CAPITAL);
        let bearings = WeaponBehavior::select(
            WeaponClass::Capital,
            MunitionFlags::CAPITAL | MunitionFlags::BEARINGS_ONLY,
        );
        assert_eq!(plain, WeaponBehavior::Capital { bearings_only: false });
        assert_eq!(bearings, WeaponBehavior::Capital { bearings_only: true });
    }

    #[test]
    fn cluster_ballistics_exist() {
        // LB-X style cluster shot on a ballistic mount.
        let behavior = WeaponBehavior::select(WeaponClass::Ballistic, MunitionFlags::CLUSTER_TABLE);
        assert_eq!(behavior, WeaponBehavior::Cluster);
    }

    #[test]
    fn plain_guns_are_single_hit() {
        let behavior = WeaponBehavior::select(WeaponClass::Energy, MunitionFlags::empty());
        assert_eq!(behavior, WeaponBehavior::SingleHit);
        assert!(!behavior.draws_counterfire());
    }
}
