//! Test module for the attack-resolution engine.
//!
//! - **Integration tests**: full resolutions through [`crate::resolution`]
//! - **Determinism tests**: same seed, same scenario, identical outcome
//! - **Property tests**: invariants over generated inputs
//! - **Helper functions**: scenario and equipment factories

mod helpers;

pub use helpers::*;
