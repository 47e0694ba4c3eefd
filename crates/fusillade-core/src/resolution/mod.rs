//! The attack-resolution state machine.
//!
//! One [`AttackResolver`] serves a whole session. Each call to
//! [`AttackResolver::resolve`] runs a single attack through the fixed
//! phase order: announce, charge costs, roll, grade the blow, counterfire,
//! hit counting, damage application, and any nested re-fire. Resolution is
//! strictly serial; the resolver holds no per-attack state, so a nested
//! resolution is just a recursive call with a fresh [`AttackContext`].
//!
//! # Phase order
//!
//! Costs are charged exactly once per context, before the roll, so an
//! impossible attack still pays its heat and ammunition. Nested contexts
//! suppress the duplicate heat charge and restore one round of ammunition
//! before re-spending it.

pub mod behavior;
pub mod context;
pub mod outcome;

use std::sync::Arc;
use tracing::debug;

use crate::artillery::{self, ArtilleryShot};
use crate::capital::{self, CapitalMissileState, TargetChooser};
use crate::cluster::{
    self, battle_armor_lumps, infantry_lump, ClusterModifiers, Guidance,
};
use crate::error::AttackError;
use crate::munition::{MunitionFlags, MunitionTables, WeaponClass};
use crate::pointdefense::{engage, CounterfireState, IncomingSalvo};
use crate::report::{Report, ReportLog, RetargetReason};
use crate::roll::{BlowGrade, Dice, ToHit, MINIMUM_TARGET};
use crate::world::{AttackTarget, UnitId, UnitStatus, World};

pub use behavior::WeaponBehavior;
pub use context::AttackContext;
pub use outcome::{OutcomeKind, ResolutionOutcome};

/// How far leftover swarm missiles will travel to a new target.
const SWARM_RANGE: u32 = 2;

/// Scatter distance stand-in for an artillery automatic failure, which
/// has no finite margin.
const AUTO_FAIL_SCATTER: u32 = 6;

/// Session-level resolver configuration.
#[derive(Debug, Copy, Clone)]
pub struct ResolverConfig {
    /// Apply the glancing-blow rule when a roll exactly equals its target.
    pub glancing_enabled: bool,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            glancing_enabled: true,
        }
    }
}

/// Resolves declared attacks against a mutable world.
#[derive(Debug, Clone)]
pub struct AttackResolver {
    config: ResolverConfig,
    tables: MunitionTables,
}

impl AttackResolver {
    /// Creates a resolver with the given configuration and lookup tables.
    #[must_use]
    pub fn new(config: ResolverConfig, tables: MunitionTables) -> Self {
        Self { config, tables }
    }

    /// Creates a resolver with default configuration and standard tables.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::new(ResolverConfig::default(), MunitionTables::standard())
    }

    /// Resolves one attack to completion.
    ///
    /// # Errors
    ///
    /// Returns an [`AttackError`] for precondition violations (unknown
    /// attacker or target, bad mount, empty bin). In-rule outcomes such as
    /// misses and fully-intercepted salvos are `Ok`.
    pub fn resolve(
        &self,
        ctx: &AttackContext,
        world: &mut World,
        dice: &mut Dice,
        log: &mut ReportLog,
    ) -> Result<ResolutionOutcome, AttackError> {
        self.resolve_with_chooser(ctx, world, dice, log, None)
    }

    /// Resolves one attack, presenting bearings-only candidates to an
    /// explicit chooser (tele-operated missiles).
    ///
    /// # Errors
    ///
    /// Same contract as [`Self::resolve`].
    pub fn resolve_with_chooser(
        &self,
        ctx: &AttackContext,
        world: &mut World,
        dice: &mut Dice,
        log: &mut ReportLog,
        chooser: Option<&mut dyn TargetChooser>,
    ) -> Result<ResolutionOutcome, AttackError> {
        let class = validate(ctx, world)?;
        let behavior = WeaponBehavior::select(class, ctx.munition.flags);
        debug!(attacker = %ctx.attacker, mount = ctx.mount, ?behavior, "resolving attack");

        log.push(Report::AttackAnnounced {
            attacker: ctx.attacker,
            mount: ctx.mount,
            target: ctx.target,
        });
        charge_costs(ctx, class, world);

        match behavior {
            WeaponBehavior::Artillery => self.declare_artillery(ctx, world, dice, log),
            WeaponBehavior::Capital { bearings_only } => {
                self.resolve_capital(ctx, bearings_only, world, dice, log, chooser)
            }
            WeaponBehavior::Refire if ctx.allow_nested => {
                self.resolve_refire(ctx, world, dice, log)
            }
            _ => self.resolve_direct(ctx, behavior, world, dice, log),
        }
    }

    /// Resolves a landed artillery shot (countdown reached zero).
    ///
    /// # Errors
    ///
    /// Infallible today; kept fallible for parity with [`Self::resolve`].
    pub fn resolve_artillery_impact(
        &self,
        shot: &ArtilleryShot,
        world: &mut World,
        dice: &mut Dice,
        log: &mut ReportLog,
    ) -> Result<ResolutionOutcome, AttackError> {
        let firer = world.unit(shot.attacker);
        let side = firer.map(|u| u.side);
        let oblique = firer.is_some_and(|u| u.oblique_artillery);
        let incapacitated =
            firer.is_none_or(|u| u.status.contains(UnitStatus::INCAPACITATED));

        let auto_hit = !shot.flak && world.board.is_auto_hit(shot.target);
        let mut to_hit = shot.to_hit;
        if !shot.flak && !auto_hit {
            if let Some(side) = side {
                if let Some(spotter) = artillery::select_spotter(world, side, shot.target) {
                    log.push(Report::SpotterAdjusted {
                        spotter: spotter.unit,
                        reduction: spotter.reduction,
                    });
                    if let Some(value) = to_hit.value() {
                        to_hit = ToHit::Value(value - spotter.reduction);
                    }
                }
            }
        }

        let roll = dice.two_d6();
        log.push(Report::RollMade {
            roll,
            target: to_hit,
        });

        if auto_hit || is_hit(roll, to_hit) {
            // An auto-hit marker leaves no margin to grade; otherwise the
            // shell's damage is graded like any other connecting roll. Only
            // flak has a unit target, so only flak can land a direct blow.
            let grade = if auto_hit {
                BlowGrade::Normal
            } else {
                BlowGrade::grade(roll, to_hit, shot.flak, self.config.glancing_enabled)
            };
            if grade != BlowGrade::Normal {
                log.push(Report::BlowGraded { grade });
            }
            if !shot.flak && !incapacitated {
                world.board.mark_auto_hit(shot.target);
                log.push(Report::AutoHitMarked { hex: shot.target });
            }
            artillery::resolve_impact(
                world,
                &shot.munition,
                &self.tables,
                shot.target,
                grade,
                dice,
                log,
            );
            return Ok(ResolutionOutcome::hit(
                1,
                grade.scale_damage(shot.munition.salvo_damage()),
            ));
        }

        let margin_of_failure = match to_hit.value() {
            Some(value) => (value.max(MINIMUM_TARGET) - roll).unsigned_abs(),
            None => AUTO_FAIL_SCATTER,
        };
        let scatter = if shot.flak {
            artillery::flak_scatter(world, shot.target, margin_of_failure, dice)
        } else {
            artillery::scatter(world, shot.target, margin_of_failure, oblique, dice)
        };
        log.push(Report::ShotScattered {
            from: scatter.from,
            to: scatter.to,
            distance: scatter.distance,
            off_board: scatter.off_board,
        });
        if !scatter.off_board {
            artillery::resolve_impact(
                world,
                &shot.munition,
                &self.tables,
                scatter.to,
                BlowGrade::Normal,
                dice,
                log,
            );
        }
        Ok(ResolutionOutcome::empty(OutcomeKind::Missed).with_scatter(scatter))
    }

    // === Direct-fire and cluster attacks ===

    fn resolve_direct(
        &self,
        ctx: &AttackContext,
        behavior: WeaponBehavior,
        world: &mut World,
        dice: &mut Dice,
        log: &mut ReportLog,
    ) -> Result<ResolutionOutcome, AttackError> {
        if ctx.to_hit == ToHit::Impossible {
            log.push(Report::AttackImpossible {
                attacker: ctx.attacker,
            });
            return Ok(ResolutionOutcome::empty(OutcomeKind::Impossible));
        }

        // A nested re-fire shot resolves like the weapon's base behavior.
        let behavior = if behavior == WeaponBehavior::Refire {
            shot_behavior(ctx.munition.flags)
        } else {
            behavior
        };

        let roll = dice.two_d6();
        log.push(Report::RollMade {
            roll,
            target: ctx.to_hit,
        });

        if !is_hit(roll, ctx.to_hit) {
            return self.resolve_miss(ctx, world, dice, log);
        }
        self.resolve_connected(ctx, behavior, roll, world, dice, log)
    }

    /// A connected roll: grade the blow, run counterfire, count hits, and
    /// apply damage.
    fn resolve_connected(
        &self,
        ctx: &AttackContext,
        behavior: WeaponBehavior,
        roll: i32,
        world: &mut World,
        dice: &mut Dice,
        log: &mut ReportLog,
    ) -> Result<ResolutionOutcome, AttackError> {
        let grade = BlowGrade::grade(
            roll,
            ctx.to_hit,
            ctx.target.is_unit(),
            self.config.glancing_enabled,
        );
        if grade != BlowGrade::Normal {
            log.push(Report::BlowGraded { grade });
        }

        let interception = if behavior.draws_counterfire() {
            counterfire(ctx, false, world, log)
        } else {
            None
        };
        let pd_penalty = interception.map_or(0, |state| state.cluster_modifier);

        let rack = ctx.rack_size();
        let (hits, damage_per_hit) = if behavior == WeaponBehavior::Cluster {
            cluster_hits(ctx, grade, pd_penalty, rack, world, dice, log)
        } else {
            (1, grade.scale_damage(ctx.munition.salvo_damage()))
        };

        apply_damage(world, ctx.target, hits * damage_per_hit, log);

        // A clearance round fired straight at a hex disturbs the minefield
        // there; only artillery shells sweep a whole blast area.
        if !ctx.target.is_unit() && ctx.munition.flags.contains(MunitionFlags::MINE_CLEARANCE) {
            if let Some(hex) = world.target_hex(ctx.target) {
                let cleared = world.board.clear_minefields(hex);
                if cleared > 0 {
                    log.push(Report::MinefieldCleared {
                        hex,
                        fields: cleared,
                    });
                }
            }
        }

        let mut outcome = ResolutionOutcome::hit(hits, damage_per_hit);
        if let Some(state) = interception {
            outcome = outcome.with_interception(state);
        }

        // Leftover swarm missiles continue to a nearby unit.
        if ctx.allow_nested
            && ctx.munition.flags.contains(MunitionFlags::SWARM)
            && hits < rack
        {
            if let Some(original) = ctx.target.unit() {
                if let Some(next) = swarm_target(world, original) {
                    let nested =
                        self.retarget(ctx, next, Some(rack - hits), RetargetReason::Swarm, world, dice, log)?;
                    outcome = outcome.with_nested(nested);
                }
            }
        }
        Ok(outcome)
    }

    /// A failed roll: report the miss and run any nemesis re-target.
    fn resolve_miss(
        &self,
        ctx: &AttackContext,
        world: &mut World,
        dice: &mut Dice,
        log: &mut ReportLog,
    ) -> Result<ResolutionOutcome, AttackError> {
        let kind = if ctx.to_hit == ToHit::AutoFail {
            OutcomeKind::AutoFailed
        } else {
            OutcomeKind::Missed
        };
        let mut outcome = ResolutionOutcome::empty(kind);

        if ctx.allow_nested && ctx.munition.flags.contains(MunitionFlags::NEMESIS) {
            if let Some(original) = ctx.target.unit() {
                let attacker_side = world.unit(ctx.attacker).map(|u| u.side);
                if let Some(side) = attacker_side {
                    if let Some(next) = nemesis_target(world, side, original) {
                        let nested = self.retarget(
                            ctx,
                            next,
                            None,
                            RetargetReason::Nemesis,
                            world,
                            dice,
                            log,
                        )?;
                        outcome = outcome.with_nested(nested);
                    }
                }
            }
        }
        Ok(outcome)
    }

    /// Restores one round and runs a nested resolution against `next`.
    fn retarget(
        &self,
        ctx: &AttackContext,
        next: UnitId,
        rack: Option<u32>,
        reason: RetargetReason,
        world: &mut World,
        dice: &mut Dice,
        log: &mut ReportLog,
    ) -> Result<ResolutionOutcome, AttackError> {
        if let Some(attacker) = world.unit_mut(ctx.attacker) {
            attacker.restore_ammo(ctx.mount);
        }
        log.push(Report::AmmoRestored {
            unit: ctx.attacker,
            mount: ctx.mount,
        });
        log.push(Report::Retargeted {
            target: next,
            reason,
        });
        self.resolve(&ctx.retargeted(next, rack), world, dice, log)
    }

    // === Ultra/Rotary re-fire ===

    fn resolve_refire(
        &self,
        ctx: &AttackContext,
        world: &mut World,
        dice: &mut Dice,
        log: &mut ReportLog,
    ) -> Result<ResolutionOutcome, AttackError> {
        if ctx.to_hit == ToHit::Impossible {
            log.push(Report::AttackImpossible {
                attacker: ctx.attacker,
            });
            return Ok(ResolutionOutcome::empty(OutcomeKind::Impossible));
        }

        let roll = dice.two_d6();
        log.push(Report::RollMade {
            roll,
            target: ctx.to_hit,
        });

        // First-shot minimum roll jams the mount and cancels everything.
        if roll == 2 {
            if let Some(attacker) = world.unit_mut(ctx.attacker) {
                if let Some(mount) = attacker.mounts.get_mut(ctx.mount) {
                    mount.jammed = true;
                }
            }
            log.push(Report::WeaponJammed {
                unit: ctx.attacker,
                mount: ctx.mount,
            });
            return Ok(ResolutionOutcome::empty(OutcomeKind::Jammed));
        }

        let behavior = shot_behavior(ctx.munition.flags);
        let mut outcome = if is_hit(roll, ctx.to_hit) {
            self.resolve_connected(ctx, behavior, roll, world, dice, log)?
        } else {
            self.resolve_miss(ctx, world, dice, log)?
        };

        // Second shot; an empty bin simply ends the double-tap.
        match self.resolve(&ctx.second_shot(), world, dice, log) {
            Ok(second) => outcome = outcome.with_nested(second),
            Err(AttackError::NoAmmunition { .. }) => {}
            Err(err) => return Err(err),
        }
        Ok(outcome)
    }

    // === Capital missiles ===

    #[allow(clippy::too_many_arguments)]
    fn resolve_capital(
        &self,
        ctx: &AttackContext,
        bearings_only: bool,
        world: &mut World,
        dice: &mut Dice,
        log: &mut ReportLog,
        chooser: Option<&mut dyn TargetChooser>,
    ) -> Result<ResolutionOutcome, AttackError> {
        let acquired = if bearings_only {
            acquire_bearings_target(ctx, world, dice, log, chooser)
        } else {
            ctx.target.unit().map(|id| (id, ctx.to_hit))
        };
        let Some((target_id, to_hit)) = acquired else {
            // Costs stay charged; the launch simply finds nothing.
            log.push(Report::AttackImpossible {
                attacker: ctx.attacker,
            });
            return Ok(ResolutionOutcome::empty(OutcomeKind::Impossible));
        };
        if to_hit == ToHit::Impossible {
            log.push(Report::AttackImpossible {
                attacker: ctx.attacker,
            });
            return Ok(ResolutionOutcome::empty(OutcomeKind::Impossible));
        }

        let against = AttackContext {
            target: AttackTarget::Unit(target_id),
            to_hit,
            ..ctx.clone()
        };
        let interception = counterfire(&against, true, world, log);

        let mut missile = CapitalMissileState::new(ctx.munition.capital_armor);
        if let Some(state) = interception {
            missile.apply_counterfire(state.counter_value, log);
        }
        if missile.is_destroyed() {
            log.push(Report::CapitalMissileDestroyed);
            let mut outcome = ResolutionOutcome::empty(OutcomeKind::DestroyedInFlight);
            if let Some(state) = interception {
                outcome = outcome.with_interception(state);
            }
            return Ok(outcome);
        }

        let roll = dice.two_d6();
        log.push(Report::RollMade {
            roll,
            target: to_hit,
        });
        if !is_hit(roll, to_hit) {
            let mut outcome = ResolutionOutcome::empty(OutcomeKind::Missed);
            if let Some(state) = interception {
                outcome = outcome.with_interception(state);
            }
            return Ok(outcome);
        }
        if missile.destroyed_in_flight(roll, to_hit) {
            log.push(Report::DestroyedInFlight {
                penalty: missile.ams_to_hit_penalty(),
            });
            let mut outcome = ResolutionOutcome::empty(OutcomeKind::DestroyedInFlight);
            if let Some(state) = interception {
                outcome = outcome.with_interception(state);
            }
            return Ok(outcome);
        }

        let grade = BlowGrade::grade(roll, to_hit, true, self.config.glancing_enabled);
        if grade != BlowGrade::Normal {
            log.push(Report::BlowGraded { grade });
        }
        let damage = grade.scale_damage(missile.surviving_damage(ctx.munition.salvo_damage()));
        apply_damage(world, AttackTarget::Unit(target_id), damage, log);

        let mut outcome = ResolutionOutcome::hit(1, damage);
        if let Some(state) = interception {
            outcome = outcome.with_interception(state);
        }
        Ok(outcome)
    }

    // === Artillery declaration ===

    fn declare_artillery(
        &self,
        ctx: &AttackContext,
        world: &mut World,
        dice: &mut Dice,
        log: &mut ReportLog,
    ) -> Result<ResolutionOutcome, AttackError> {
        let from = world
            .unit(ctx.attacker)
            .ok_or(AttackError::UnknownAttacker(ctx.attacker))?
            .position;
        let Some(target) = world.target_hex(ctx.target) else {
            return Err(AttackError::UnitTargetRequired);
        };
        // A unit-targeted tube shot is flak against an airborne target.
        let flak = ctx.target.is_unit();
        let shot = ArtilleryShot::declare(
            ctx.attacker,
            ctx.mount,
            Arc::clone(&ctx.munition),
            from,
            target,
            ctx.to_hit,
            flak,
        );
        if shot.turns_til_hit == 0 {
            return self.resolve_artillery_impact(&shot, world, dice, log);
        }
        log.push(Report::ArtilleryInFlight {
            turns_remaining: shot.turns_til_hit,
        });
        Ok(ResolutionOutcome::empty(OutcomeKind::InFlight).with_in_flight(shot))
    }
}

// === Free helpers (no resolver state) ===

/// Checks attack preconditions without mutating anything; returns the
/// firing weapon class.
fn validate(ctx: &AttackContext, world: &World) -> Result<WeaponClass, AttackError> {
    let attacker = world
        .unit(ctx.attacker)
        .ok_or(AttackError::UnknownAttacker(ctx.attacker))?;
    let mount = attacker
        .mounts
        .get(ctx.mount)
        .ok_or(AttackError::UnknownMount {
            unit: ctx.attacker,
            mount: ctx.mount,
        })?;
    if !mount.is_operational() || !attacker.is_ready() {
        return Err(AttackError::MountNotOperational {
            unit: ctx.attacker,
            mount: ctx.mount,
        });
    }
    if let Some(target) = ctx.target.unit() {
        if world.unit(target).is_none() {
            return Err(AttackError::UnknownTarget(target));
        }
    }
    if mount.class == WeaponClass::Capital
        && !ctx.munition.flags.contains(MunitionFlags::BEARINGS_ONLY)
        && !ctx.target.is_unit()
    {
        return Err(AttackError::UnitTargetRequired);
    }
    if ctx.charge_ammo
        && mount.class.uses_ammo()
        && attacker
            .ammo_for_mount(ctx.mount)
            .is_none_or(|bin| bin.rounds == 0)
    {
        return Err(AttackError::NoAmmunition {
            unit: ctx.attacker,
            mount: ctx.mount,
        });
    }
    Ok(mount.class)
}

/// Charges heat and ammunition exactly once per context. Validation has
/// already confirmed the round exists.
fn charge_costs(ctx: &AttackContext, class: WeaponClass, world: &mut World) {
    let Some(attacker) = world.unit_mut(ctx.attacker) else {
        return;
    };
    if ctx.charge_ammo && class.uses_ammo() {
        attacker.spend_ammo(ctx.mount);
    }
    if ctx.charge_heat {
        attacker.add_heat(ctx.munition.heat);
    }
}

/// Runs point defense for a unit target, if there is one.
fn counterfire(
    ctx: &AttackContext,
    capital: bool,
    world: &mut World,
    log: &mut ReportLog,
) -> Option<CounterfireState> {
    let target = ctx.target.unit()?;
    let origin = world.unit(ctx.attacker)?.position;
    let defender = world.unit_mut(target)?;
    let incoming = IncomingSalvo {
        origin,
        capital,
        distance: defender.position.distance(origin),
    };
    let state = engage(defender, &incoming, log);
    state.any_engaged().then_some(state)
}

/// Cluster hit counting, including the trooper-formation lump overrides
/// and guidance selection.
#[allow(clippy::too_many_arguments)]
fn cluster_hits(
    ctx: &AttackContext,
    grade: BlowGrade,
    pd_penalty: i32,
    rack: u32,
    world: &World,
    dice: &mut Dice,
    log: &mut ReportLog,
) -> (u32, u32) {
    let damage_per_hit = ctx.munition.damage_per_missile;

    if let Some(target) = ctx.target.unit().and_then(|id| world.unit(id)) {
        if target.kind.is_conventional_infantry() {
            let hits = infantry_lump(rack);
            log.push(Report::LumpedHits { hits });
            return (hits, damage_per_hit);
        }
        if target.kind.is_battle_armor() {
            let hits = battle_armor_lumps(target.active_troopers());
            log.push(Report::LumpedHits { hits });
            return (hits, damage_per_hit);
        }
    }

    let guidance = guidance_for(ctx, world, log);
    // Buildings and clear hexes soak the whole rack only at point blank.
    let point_blank = world
        .unit(ctx.attacker)
        .zip(world.target_hex(ctx.target))
        .is_some_and(|(attacker, hex)| attacker.position.distance(hex) <= 1);
    let all_shots_hit = ctx.munition.flags.contains(MunitionFlags::STREAK)
        || (!ctx.target.is_unit() && point_blank);
    let modifiers = ClusterModifiers::new()
        .with_range_band(ctx.range_band)
        .with_guidance(guidance)
        .with_blow_grade(grade, ctx.munition.flags)
        .with_emi(ctx.emi)
        .with_point_defense(pd_penalty);
    let hits = cluster::resolve_hits(rack, modifiers, all_shots_hit, dice);
    log.push(Report::ClusterHits {
        rack,
        modifier: modifiers.total(),
        hits,
    });
    (hits, damage_per_hit)
}

/// Selects and reports the guidance outcome for a unit-targeted salvo.
fn guidance_for(ctx: &AttackContext, world: &World, log: &mut ReportLog) -> Guidance {
    let Some(target) = ctx.target.unit().and_then(|id| world.unit(id)) else {
        return Guidance::Unguided;
    };
    let attacker_side = world.unit(ctx.attacker).map_or(u8::MAX, |u| u.side);
    let ecm = world.ecm_affected(attacker_side, target.position);
    let stealth = target.status.contains(UnitStatus::STEALTH_ACTIVE);
    let guidance = Guidance::select(ctx.munition.flags, ecm, stealth);
    match guidance {
        Guidance::Active(source) => log.push(Report::GuidanceApplied { source }),
        Guidance::Suppressed(cause) => log.push(Report::GuidanceSuppressed { cause }),
        Guidance::Unguided => {}
    }
    guidance
}

/// Bearings-only sensor acquisition at the declared hex.
fn acquire_bearings_target(
    ctx: &AttackContext,
    world: &World,
    dice: &mut Dice,
    log: &mut ReportLog,
    chooser: Option<&mut dyn TargetChooser>,
) -> Option<(UnitId, ToHit)> {
    let firer = world.unit(ctx.attacker)?;
    let chooser = if ctx.munition.flags.contains(MunitionFlags::TELE_OPERATED) {
        chooser
    } else {
        None
    };
    let candidate = capital::acquire_target(
        world,
        firer,
        ctx.detection_range,
        ctx.to_hit,
        dice,
        chooser,
        log,
    )?;
    Some((candidate.unit, candidate.to_hit))
}

/// Per-shot behavior of an Ultra/Rotary round: cluster burst or slug.
fn shot_behavior(flags: MunitionFlags) -> WeaponBehavior {
    if flags.contains(MunitionFlags::CLUSTER_TABLE) {
        WeaponBehavior::Cluster
    } else {
        WeaponBehavior::SingleHit
    }
}

/// Whether a roll connects against a to-hit requirement.
fn is_hit(roll: i32, to_hit: ToHit) -> bool {
    match to_hit {
        ToHit::AutoSuccess => true,
        ToHit::AutoFail | ToHit::Impossible => false,
        ToHit::Value(value) => roll >= value.max(MINIMUM_TARGET),
    }
}

/// Applies attack damage to whatever the attack was declared against.
fn apply_damage(world: &mut World, target: AttackTarget, amount: u32, log: &mut ReportLog) {
    if amount == 0 {
        return;
    }
    match target {
        AttackTarget::Unit(id) => {
            if let Some(unit) = world.unit_mut(id) {
                let destroyed = unit.apply_damage(amount);
                log.push(Report::UnitDamaged {
                    target: id,
                    amount,
                    destroyed,
                });
            }
        }
        AttackTarget::Building(hex) => {
            if let Some(cf_remaining) = world.board.damage_building(hex, amount) {
                log.push(Report::BuildingDamaged {
                    hex,
                    amount,
                    cf_remaining,
                });
            }
        }
        AttackTarget::Hex(_) => {}
    }
}

/// Nearest other enemy for a nemesis-confused salvo; ties fall to the
/// lowest unit id.
fn nemesis_target(world: &World, attacker_side: u8, original: UnitId) -> Option<UnitId> {
    let origin = world.unit(original)?.position;
    world
        .enemies_of(attacker_side)
        .filter(|u| u.id != original && !u.is_destroyed())
        .min_by_key(|u| (origin.distance(u.position), u.id))
        .map(|u| u.id)
}

/// Nearest other unit within swarm range of the original target, any side.
fn swarm_target(world: &World, original: UnitId) -> Option<UnitId> {
    let origin = world.unit(original)?.position;
    world
        .units()
        .filter(|u| {
            u.id != original && !u.is_destroyed() && u.position.distance(origin) <= SWARM_RANGE
        })
        .min_by_key(|u| (origin.distance(u.position), u.id))
        .map(|u| u.id)
}
