//! # Hexfield
//!
//! Hex-grid spatial substrate for Fusillade's attack resolution.
//!
//! This crate provides pure geometry with no game rules:
//! - [`Hex`]: axial hex coordinates with distance and displacement
//! - [`Direction`]: the six hex facings and rotation between them
//! - [`FiringArc`]: nose/side/aft arc classification relative to a facing
//! - [`Bounds`]: rectangular playable-area test in offset coordinates
//!
//! # Coordinate System
//!
//! Hexes use axial coordinates `(q, r)` over flat-topped hexes, with `q`
//! increasing eastward and `r` increasing southward. Cartesian conversion
//! places north at negative `y` so that screen-space and bearing math agree.
//!
//! # Example
//!
//! ```
//! use hexfield::{Direction, Hex};
//!
//! let origin = Hex::new(0, 0);
//! let north = origin.neighbor(Direction::North);
//! assert_eq!(origin.distance(north), 1);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod arc;
pub mod bounds;
pub mod coord;

pub use arc::FiringArc;
pub use bounds::Bounds;
pub use coord::{Direction, Hex};
