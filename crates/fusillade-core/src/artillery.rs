//! Artillery ballistics: flight countdown, spotting, scatter, and payload
//! dispatch.
//!
//! Artillery is the one attack path split across turns: heat and
//! ammunition are charged at declaration, the shot then counts down in
//! flight, and only at countdown zero does a roll and impact resolution
//! happen. Everything here operates on the landing hex; the resolver owns
//! the to-hit roll and hands the final hex to [`resolve_impact`].

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

use hexfield::{Direction, Hex};

use crate::munition::{MunitionFlags, MunitionProfile, MunitionTables};
use crate::report::{Report, ReportLog};
use crate::roll::{BlowGrade, Dice, ToHit};
use crate::world::{UnitId, World};

/// Hexes per map sheet; one turn of flight per full sheet of range.
const SHEET_SPAN: u32 = 17;

/// Scatter-distance reduction for an oblique artilleryman.
const OBLIQUE_SCATTER_REDUCTION: u32 = 2;

/// Maximum distance at which a unit can spot for artillery.
const SPOTTER_SIGHT_RANGE: u32 = 17;

/// To-hit reduction from a trained forward observer.
const FORWARD_OBSERVER_REDUCTION: i32 = 2;

/// To-hit reduction from an ordinary spotting unit.
const SPOTTER_REDUCTION: i32 = 1;

/// Base d6 kill target for troopers caught at a fuel-air ground zero;
/// one point harder per ring outward.
const FUEL_AIR_KILL_TARGET: i32 = 3;

/// One artillery shot in flight.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtilleryShot {
    /// Firing unit.
    pub attacker: UnitId,
    /// Firing mount index.
    pub mount: usize,
    /// Loaded munition.
    pub munition: Arc<MunitionProfile>,
    /// Declared target hex.
    pub target: Hex,
    /// To-hit requirement computed at declaration.
    pub to_hit: ToHit,
    /// Turns remaining before impact; 0 means it lands this turn.
    pub turns_til_hit: u32,
    /// Direct-fire flak shot against an airborne target.
    pub flak: bool,
}

impl ArtilleryShot {
    /// Declares a shot; flight time comes from the range at declaration.
    #[must_use]
    pub fn declare(
        attacker: UnitId,
        mount: usize,
        munition: Arc<MunitionProfile>,
        from: Hex,
        target: Hex,
        to_hit: ToHit,
        flak: bool,
    ) -> Self {
        Self {
            attacker,
            mount,
            munition,
            target,
            to_hit,
            turns_til_hit: flight_turns(from.distance(target)),
            flak,
        }
    }

    /// Advances the countdown by one turn, returning true when the shot
    /// lands this turn.
    pub fn tick(&mut self) -> bool {
        if self.turns_til_hit > 0 {
            self.turns_til_hit -= 1;
        }
        self.turns_til_hit == 0
    }
}

/// Turns of flight for a shot across `distance` hexes: one per full map
/// sheet, so anything on the firing sheet lands the same turn.
#[must_use]
pub const fn flight_turns(distance: u32) -> u32 {
    distance / SHEET_SPAN
}

/// A spotting unit and the to-hit reduction it grants.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Spotter {
    /// The spotting unit.
    pub unit: UnitId,
    /// To-hit reduction (subtracted from the target number).
    pub reduction: i32,
}

/// Picks a spotter for a shot from `side` against `target`.
///
/// Candidates are ready friendly units with the target in sight range and
/// clear of hostile ECM. Trained forward observers are preferred; ties
/// fall to the lowest gunnery, then the lowest unit id (registry order).
#[must_use]
pub fn select_spotter(world: &World, side: u8, target: Hex) -> Option<Spotter> {
    let mut best: Option<(&crate::world::Unit, bool)> = None;
    for unit in world.units() {
        if unit.side != side || !unit.is_ready() {
            continue;
        }
        if unit.position.distance(target) > SPOTTER_SIGHT_RANGE {
            continue;
        }
        if world.ecm_affected(side, unit.position) {
            continue;
        }
        let better = match best {
            None => true,
            Some((current, _)) => {
                if unit.forward_observer != current.forward_observer {
                    unit.forward_observer
                } else {
                    unit.gunnery < current.gunnery
                }
            }
        };
        if better {
            best = Some((unit, unit.forward_observer));
        }
    }
    best.map(|(unit, observer)| Spotter {
        unit: unit.id,
        reduction: if observer {
            FORWARD_OBSERVER_REDUCTION
        } else {
            SPOTTER_REDUCTION
        },
    })
}

/// Where a missed shot actually landed.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScatterResult {
    /// Intended hex.
    pub from: Hex,
    /// Landing hex.
    pub to: Hex,
    /// Displacement in hexes.
    pub distance: u32,
    /// Landed outside the playable area; the shot is lost.
    pub off_board: bool,
}

/// Scatters an indirect shot: distance is the margin of failure, reduced
/// by 2 for an oblique artilleryman and floored at zero, in a uniform d6
/// direction.
#[must_use]
pub fn scatter(
    world: &World,
    target: Hex,
    margin_of_failure: u32,
    oblique: bool,
    dice: &mut Dice,
) -> ScatterResult {
    let distance = if oblique {
        margin_of_failure.saturating_sub(OBLIQUE_SCATTER_REDUCTION)
    } else {
        margin_of_failure
    };
    displace(world, target, distance, dice)
}

/// Scatters a flak shot: distance is the margin of failure capped by a
/// d6, in a uniform d6 direction. Flak never uses spotters or auto-hit
/// markers.
#[must_use]
pub fn flak_scatter(
    world: &World,
    target: Hex,
    margin_of_failure: u32,
    dice: &mut Dice,
) -> ScatterResult {
    let cap = dice.d6().unsigned_abs();
    displace(world, target, margin_of_failure.min(cap), dice)
}

fn displace(world: &World, target: Hex, distance: u32, dice: &mut Dice) -> ScatterResult {
    let direction = Direction::from_die(dice.d6().unsigned_abs());
    let to = target.displaced(direction, distance);
    ScatterResult {
        from: target,
        to,
        distance,
        off_board: !world.board.contains(to),
    }
}

/// Resolves an artillery impact in `hex`.
///
/// Special payloads dispatch first-match-wins in a fixed order; a
/// munition with no special payload deals standard area damage with
/// incidental minefield clearance at the impact hex. The blow grade from
/// the landing roll scales every damaging payload; scattered shots land
/// ungraded.
pub fn resolve_impact(
    world: &mut World,
    munition: &MunitionProfile,
    tables: &MunitionTables,
    hex: Hex,
    grade: BlowGrade,
    dice: &mut Dice,
    log: &mut ReportLog,
) {
    let flags = munition.flags;
    debug!(%hex, munition = %munition.name, "artillery impact");

    if flags.contains(MunitionFlags::FLARE) {
        let radius = tables.flare_radius(munition.caliber);
        world.board.drop_flare(hex, radius);
        log.push(Report::FlareLit { hex, radius });
    } else if flags.contains(MunitionFlags::NUCLEAR) {
        let damage = grade.scale_damage(tables.nuclear_damage(munition.caliber));
        let radius = tables.blast_radius(munition.caliber);
        log.push(Report::NuclearDetonation { hex, damage });
        area_damage(world, hex, damage, radius, log);
        if world.board.try_ignite(hex, 2, dice) {
            log.push(Report::FireIgnited { hex });
        }
    } else if flags.contains(MunitionFlags::FASCAM) {
        world.board.place_minefield(hex, crate::world::MinefieldKind::Conventional);
        log.push(Report::MinesLaid {
            hex,
            kind: crate::world::MinefieldKind::Conventional,
        });
    } else if flags.contains(MunitionFlags::VIBRABOMB) {
        world.board.place_minefield(hex, crate::world::MinefieldKind::Vibrabomb);
        log.push(Report::MinesLaid {
            hex,
            kind: crate::world::MinefieldKind::Vibrabomb,
        });
    } else if flags.contains(MunitionFlags::SMOKE) {
        world.board.lay_smoke(hex, crate::world::SmokeKind::Standard);
        log.push(Report::SmokeLaid {
            hex,
            kind: crate::world::SmokeKind::Standard,
        });
    } else if flags.contains(MunitionFlags::LASER_SMOKE) {
        world
            .board
            .lay_smoke(hex, crate::world::SmokeKind::LaserInhibiting);
        log.push(Report::SmokeLaid {
            hex,
            kind: crate::world::SmokeKind::LaserInhibiting,
        });
    } else if flags.contains(MunitionFlags::FUEL_AIR) {
        fuel_air_impact(world, munition, hex, grade, dice, log);
    } else {
        let radius = tables.blast_radius(munition.caliber);
        area_damage(world, hex, grade.scale_damage(munition.salvo_damage()), radius, log);
        // Mine-clearance shells sweep the whole blast area; ordinary
        // shells only disturb the impact hex.
        let swept = if flags.contains(MunitionFlags::MINE_CLEARANCE) {
            hex.within(radius)
        } else {
            vec![hex]
        };
        for target in swept {
            let cleared = world.board.clear_minefields(target);
            if cleared > 0 {
                log.push(Report::MinefieldCleared {
                    hex: target,
                    fields: cleared,
                });
            }
        }
    }
}

/// Applies area damage falling off by ring: full in the impact hex,
/// halving per ring out to `radius`. Buildings in affected hexes take the
/// same ring damage as units standing there.
fn area_damage(world: &mut World, center: Hex, base: u32, radius: u32, log: &mut ReportLog) {
    for target in center.within(radius) {
        let ring = center.distance(target);
        let amount = base >> ring;
        if amount == 0 {
            continue;
        }
        damage_hex(world, target, amount, log);
    }
}

/// Damages every unit standing in a hex, and the building if one stands
/// there.
fn damage_hex(world: &mut World, hex: Hex, amount: u32, log: &mut ReportLog) {
    for id in world.unit_ids_in_hex(hex) {
        if let Some(unit) = world.unit_mut(id) {
            let destroyed = unit.apply_damage(amount);
            log.push(Report::UnitDamaged {
                target: id,
                amount,
                destroyed,
            });
        }
    }
    if let Some(cf_remaining) = world.board.damage_building(hex, amount) {
        log.push(Report::BuildingDamaged {
            hex,
            amount,
            cf_remaining,
        });
    }
}

/// Fuel-air detonation: blast damage by ring fraction out to the last
/// non-zero ring, plus per-trooper instant-kill rolls against exposed
/// infantry and battle armor, one point harder per ring.
fn fuel_air_impact(
    world: &mut World,
    munition: &MunitionProfile,
    center: Hex,
    grade: BlowGrade,
    dice: &mut Dice,
    log: &mut ReportLog,
) {
    let base = grade.scale_damage(munition.salvo_damage());
    let mut outer = 0;
    let mut ring = 0;
    while MunitionTables::fuel_air_fraction(ring).0 > 0 {
        outer = ring;
        ring += 1;
    }
    log.push(Report::FuelAirDetonation {
        hex: center,
        radius: outer,
    });

    for target in center.within(outer) {
        let ring = center.distance(target);
        let (numerator, denominator) = MunitionTables::fuel_air_fraction(ring);
        if numerator == 0 {
            continue;
        }
        let amount = (base * numerator) / denominator;
        for id in world.unit_ids_in_hex(target) {
            let Some(unit) = world.unit_mut(id) else {
                continue;
            };
            #[allow(clippy::cast_possible_wrap)]
            let kill_target = FUEL_AIR_KILL_TARGET + ring as i32;
            let mut killed = 0;
            if unit.kind.is_trooper_formation() {
                for _ in 0..unit.active_troopers() {
                    if dice.d6() >= kill_target {
                        killed += 1;
                    }
                }
            }
            let destroyed = unit.apply_damage(amount + killed);
            if amount > 0 {
                log.push(Report::UnitDamaged {
                    target: id,
                    amount,
                    destroyed,
                });
            }
            if killed > 0 {
                log.push(Report::TroopersKilled {
                    unit: id,
                    troopers: killed,
                });
            }
        }
        if let Some(cf_remaining) = world.board.damage_building(target, amount) {
            log.push(Report::BuildingDamaged {
                hex: target,
                amount,
                cf_remaining,
            });
        }
    }
    if world.board.try_ignite(center, 4, dice) {
        log.push(Report::FireIgnited { hex: center });
    }
}
