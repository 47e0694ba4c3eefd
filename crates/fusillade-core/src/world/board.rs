//! Game board: bounds, buildings, minefields, smoke, flares, and fires.
//!
//! The board exposes the hooks artillery payload dispatch and area damage
//! need. All collections are ordered so that iteration during resolution
//! is deterministic.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use hexfield::{Bounds, Hex};

use crate::roll::Dice;

/// A building occupying one hex, tracked by construction factor.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Building {
    /// Remaining construction factor; 0 means collapsed.
    pub cf: u32,
}

impl Building {
    /// Creates a building with the given construction factor.
    #[must_use]
    pub const fn new(cf: u32) -> Self {
        Self { cf }
    }

    /// Damage absorbed from attacks passing through: CF / 10.
    #[must_use]
    pub const fn absorption(self) -> u32 {
        self.cf / 10
    }
}

/// Minefield type laid by artillery payloads.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum MinefieldKind {
    /// Conventional FASCAM field.
    Conventional,
    /// Vibrabomb field.
    Vibrabomb,
}

/// Smoke type laid by artillery payloads.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SmokeKind {
    /// Standard vision-blocking smoke.
    Standard,
    /// Laser-inhibiting smoke.
    LaserInhibiting,
}

/// The playable board and its per-hex overlays.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Board {
    bounds: Bounds,
    buildings: BTreeMap<Hex, Building>,
    minefields: BTreeMap<Hex, Vec<MinefieldKind>>,
    auto_hit: BTreeSet<Hex>,
    smoke: BTreeMap<Hex, SmokeKind>,
    flares: BTreeMap<Hex, u32>,
    fires: BTreeSet<Hex>,
}

impl Board {
    /// Creates an empty board with the given bounds.
    #[must_use]
    pub fn new(bounds: Bounds) -> Self {
        Self {
            bounds,
            buildings: BTreeMap::new(),
            minefields: BTreeMap::new(),
            auto_hit: BTreeSet::new(),
            smoke: BTreeMap::new(),
            flares: BTreeMap::new(),
            fires: BTreeSet::new(),
        }
    }

    /// Whether the hex is on the playable area.
    #[must_use]
    pub fn contains(&self, hex: Hex) -> bool {
        self.bounds.contains(hex)
    }

    /// Adds a building.
    pub fn add_building(&mut self, hex: Hex, building: Building) {
        self.buildings.insert(hex, building);
    }

    /// The building in a hex, if any.
    #[must_use]
    pub fn building(&self, hex: Hex) -> Option<Building> {
        self.buildings.get(&hex).copied()
    }

    /// Applies damage to a building's construction factor, returning the
    /// remaining CF, or `None` if the hex has no building.
    pub fn damage_building(&mut self, hex: Hex, amount: u32) -> Option<u32> {
        let building = self.buildings.get_mut(&hex)?;
        building.cf = building.cf.saturating_sub(amount);
        Some(building.cf)
    }

    /// Lays a minefield in a hex.
    pub fn place_minefield(&mut self, hex: Hex, kind: MinefieldKind) {
        self.minefields.entry(hex).or_default().push(kind);
    }

    /// Minefields currently in a hex.
    #[must_use]
    pub fn minefields(&self, hex: Hex) -> &[MinefieldKind] {
        self.minefields.get(&hex).map_or(&[], Vec::as_slice)
    }

    /// Removes every minefield in a hex, returning how many were cleared.
    pub fn clear_minefields(&mut self, hex: Hex) -> u32 {
        self.minefields
            .remove(&hex)
            .map_or(0, |fields| u32::try_from(fields.len()).unwrap_or(u32::MAX))
    }

    /// Marks a hex as a persistent artillery auto-hit target.
    pub fn mark_auto_hit(&mut self, hex: Hex) {
        self.auto_hit.insert(hex);
    }

    /// Whether a hex carries the artillery auto-hit marker.
    #[must_use]
    pub fn is_auto_hit(&self, hex: Hex) -> bool {
        self.auto_hit.contains(&hex)
    }

    /// Lays smoke in a hex. Laser-inhibiting smoke overrides standard.
    pub fn lay_smoke(&mut self, hex: Hex, kind: SmokeKind) {
        self.smoke.insert(hex, kind);
    }

    /// The smoke in a hex, if any.
    #[must_use]
    pub fn smoke(&self, hex: Hex) -> Option<SmokeKind> {
        self.smoke.get(&hex).copied()
    }

    /// Drops an illumination flare of the given radius over a hex.
    pub fn drop_flare(&mut self, hex: Hex, radius: u32) {
        self.flares.insert(hex, radius);
    }

    /// Whether a hex is illuminated by any flare.
    #[must_use]
    pub fn is_illuminated(&self, hex: Hex) -> bool {
        self.flares
            .iter()
            .any(|(center, radius)| center.distance(hex) <= *radius)
    }

    /// Attempts to ignite a hex: 2d6 against the terrain's ignition target.
    /// A hex already burning cannot reignite.
    pub fn try_ignite(&mut self, hex: Hex, target: i32, dice: &mut Dice) -> bool {
        if self.fires.contains(&hex) {
            return false;
        }
        if dice.two_d6() >= target {
            self.fires.insert(hex);
            true
        } else {
            false
        }
    }

    /// Whether a hex is on fire.
    #[must_use]
    pub fn is_burning(&self, hex: Hex) -> bool {
        self.fires.contains(&hex)
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new(Bounds::new(16, 17))
    }
}
