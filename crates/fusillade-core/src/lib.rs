//! # Fusillade Core
//!
//! Deterministic weapon attack resolution for hex-grid tactical combat.
//!
//! Fusillade resolves declared attacks from weapon fire to applied damage:
//! cluster-table hit counting for missile salvos, point-defense counterfire,
//! capital-missile ballistics with armor pools and bearings-only target
//! acquisition, multi-turn artillery with scatter and special payloads, and
//! a single state machine sequencing it all.
//!
//! ## Architecture
//!
//! - **Profiles**: immutable munition data shared for the session
//! - **Resolvers**: cluster, point defense, capital, artillery
//! - **State machine**: [`resolution::AttackResolver`] drives one attack at
//!   a time through a fixed phase order against a mutable [`world::World`]
//!
//! All randomness flows through one seeded [`roll::Dice`] per engagement,
//! so a recorded seed replays identically.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use fusillade_core::resolution::{AttackContext, AttackResolver};
//!
//! let resolver = AttackResolver::with_defaults();
//! let outcome = resolver.resolve(&ctx, &mut world, &mut dice, &mut log)?;
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

// Re-export hexfield for grid types
pub use hexfield;

pub mod artillery;
pub mod capital;
pub mod cluster;
pub mod error;
pub mod munition;
pub mod pointdefense;
pub mod report;
pub mod resolution;
pub mod roll;
pub mod world;

// Re-exports for convenience
pub use error::AttackError;
pub use munition::{MunitionFlags, MunitionProfile, MunitionTables, WeaponClass};
pub use report::{Report, ReportLog};
pub use resolution::{AttackContext, AttackResolver, ResolutionOutcome, ResolverConfig};
pub use roll::{BlowGrade, Dice, ToHit};
pub use world::{AttackTarget, Unit, UnitId, World};

#[cfg(test)]
mod tests;
