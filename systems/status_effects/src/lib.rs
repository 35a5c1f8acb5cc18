#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Status effect system: application, refresh, expiry, modifiers and periodic ticks.
//!
//! Every kind in the catalog allows a single instance per target, so a
//! re-application refreshes the existing instance. Timing fields always take
//! the newest application while potency keeps the stronger of the two.

use wave_combat_core::{
    finite_or, round_to, EnemyInstance, StatusEffectInstance, StatusKind, UnitId, EPSILON,
    SCHEDULE_DIGITS,
};

/// Smallest periodic tick interval honoured by the system.
pub const MIN_TICK_INTERVAL: f64 = 1e-3;

/// Most periodic ticks processed for one instance in one call to [`tick_periodic`].
pub const MAX_PERIODIC_TICKS_PER_STEP: usize = 1024;

/// Slow potency ceiling for a single instance.
pub const MAX_SLOW_POTENCY: f64 = 0.95;

/// Floor of the combined movement multiplier.
pub const MIN_MOVEMENT_MULTIPLIER: f64 = 0.05;

/// Request to apply one status to one target.
#[derive(Clone, Debug, PartialEq)]
pub struct StatusApplication {
    /// Kind to apply.
    pub kind: StatusKind,
    /// Unit responsible for the application.
    pub source: Option<UnitId>,
    /// Application time.
    pub now: f64,
    /// Duration override; the catalog default applies when absent or non-finite.
    pub duration: Option<f64>,
    /// Potency override; the catalog default applies when absent or non-finite.
    pub potency: Option<f64>,
}

/// Values reported after an application, as stored on the target.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AppliedStatus {
    /// Duration of the stored instance.
    pub duration: f64,
    /// Potency of the stored instance.
    pub potency: f64,
    /// Whether an existing instance was refreshed instead of a new one added.
    pub was_refresh: bool,
}

/// Aggregated effect of the statuses active at one instant.
#[derive(Clone, Debug, PartialEq)]
pub struct StatusModifiers<'a> {
    /// A stun blocks all movement.
    pub stunned: bool,
    /// Product of every slow factor, floored at [`MIN_MOVEMENT_MULTIPLIER`].
    pub movement_multiplier: f64,
    /// Active burn instances, in application order.
    pub burns: Vec<&'a StatusEffectInstance>,
}

/// One periodic damage tick removed from a target.
#[derive(Clone, Debug, PartialEq)]
pub struct PeriodicTick {
    /// Kind that produced the tick.
    pub kind: StatusKind,
    /// Scheduled time of the tick.
    pub time: f64,
    /// Hp removed.
    pub amount: f64,
    /// Unit that applied the status, if any.
    pub source: Option<UnitId>,
}

/// Outcome of [`tick_periodic`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PeriodicReport {
    /// Number of ticks appended to the output buffer.
    pub ticks: usize,
    /// Set when owed ticks were dropped by the per-step guard.
    pub throttled: bool,
}

/// Builds a fresh instance for `application` using catalog defaults where needed.
#[must_use]
pub fn create(application: &StatusApplication) -> StatusEffectInstance {
    let definition = application.kind.definition();
    let now = finite_or(application.now, 0.0);
    let duration = application
        .duration
        .map_or(definition.default_duration, |value| {
            finite_or(value, definition.default_duration)
        })
        .max(0.0);
    let potency = application
        .potency
        .map_or(definition.default_potency, |value| {
            finite_or(value, definition.default_potency)
        });
    let tick_interval = definition
        .tick_interval
        .map(|interval| interval.max(MIN_TICK_INTERVAL));

    StatusEffectInstance {
        kind: application.kind,
        source: application.source.clone(),
        applied_at: now,
        duration,
        expires_at: now + duration,
        potency,
        tick_interval,
        next_tick_at: tick_interval.map(|interval| now + interval),
    }
}

/// Applies a status to `target`, refreshing an existing instance of the same kind.
pub fn apply(target: &mut EnemyInstance, application: &StatusApplication) -> AppliedStatus {
    let incoming = create(application);
    let max_stacks = application.kind.definition().max_stacks as usize;
    let existing = target
        .statuses
        .iter()
        .filter(|status| status.kind == application.kind)
        .count();

    if existing >= max_stacks.max(1) {
        if let Some(current) = target
            .statuses
            .iter_mut()
            .find(|status| status.kind == application.kind)
        {
            current.applied_at = incoming.applied_at;
            current.duration = incoming.duration;
            current.expires_at = incoming.expires_at;
            current.potency = current.potency.max(incoming.potency);
            current.source = incoming.source.or_else(|| current.source.take());
            current.tick_interval = incoming.tick_interval;
            current.next_tick_at = incoming.next_tick_at;

            return AppliedStatus {
                duration: current.duration,
                potency: current.potency,
                was_refresh: true,
            };
        }
    }

    let applied = AppliedStatus {
        duration: incoming.duration,
        potency: incoming.potency,
        was_refresh: false,
    };
    target.statuses.push(incoming);
    applied
}

/// Reports whether an instance is finished at `now`.
///
/// A periodic instance past its expiry still counts as live while it owes a
/// tick scheduled at or before that expiry.
#[must_use]
pub fn is_expired(status: &StatusEffectInstance, now: f64) -> bool {
    status.expires_at <= now && !owes_final_tick(status)
}

fn owes_final_tick(status: &StatusEffectInstance) -> bool {
    status
        .next_tick_at
        .is_some_and(|next| next <= status.expires_at + EPSILON)
}

/// Removes every expired instance from `target`.
pub fn sweep_expired(target: &mut EnemyInstance, now: f64) {
    let now = finite_or(now, 0.0);
    target.statuses.retain(|status| !is_expired(status, now));
}

/// Aggregates the instances active at `now` into movement modifiers.
#[must_use]
pub fn modifiers(statuses: &[StatusEffectInstance], now: f64) -> StatusModifiers<'_> {
    let now = finite_or(now, 0.0);
    let mut stunned = false;
    let mut multiplier = 1.0;
    let mut burns = Vec::new();

    for status in statuses.iter().filter(|status| status.expires_at > now) {
        match status.kind {
            StatusKind::Stun => stunned = true,
            StatusKind::Slow => {
                multiplier *= 1.0 - finite_or(status.potency, 0.0).clamp(0.0, MAX_SLOW_POTENCY);
            }
            StatusKind::Burn => burns.push(status),
        }
    }

    StatusModifiers {
        stunned,
        movement_multiplier: multiplier.max(MIN_MOVEMENT_MULTIPLIER),
        burns,
    }
}

/// Removes hp for every periodic tick due at or before `now`.
///
/// Ticks stop once the target's hp reaches zero; marking the target dead is
/// left to the caller. Ticks are appended to `out` in time order.
pub fn tick_periodic(
    target: &mut EnemyInstance,
    now: f64,
    out: &mut Vec<PeriodicTick>,
) -> PeriodicReport {
    let mut report = PeriodicReport::default();
    if !target.is_targetable() {
        return report;
    }

    let now = finite_or(now, 0.0);
    let EnemyInstance { hp, statuses, .. } = target;

    for status in statuses.iter_mut() {
        let Some(interval) = status.tick_interval else {
            continue;
        };
        let interval = interval.max(MIN_TICK_INTERVAL);
        let mut processed = 0;

        while let Some(next) = status.next_tick_at {
            if next > now + EPSILON || next > status.expires_at + EPSILON || *hp <= 0.0 {
                break;
            }
            if processed == MAX_PERIODIC_TICKS_PER_STEP {
                report.throttled = true;
                status.next_tick_at = Some(round_to(now + interval, SCHEDULE_DIGITS));
                break;
            }

            let amount = finite_or(status.potency, 0.0).max(0.0);
            *hp -= amount;
            out.push(PeriodicTick {
                kind: status.kind,
                time: next,
                amount,
                source: status.source.clone(),
            });
            processed += 1;
            status.next_tick_at = Some(round_to(next + interval, SCHEDULE_DIGITS));
        }

        report.ticks += processed;
        if *hp <= 0.0 {
            break;
        }
    }

    report
}
