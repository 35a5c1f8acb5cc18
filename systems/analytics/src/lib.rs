#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Derives wave-level statistics from a finished simulation.
//!
//! Everything here is a pure function of a [`SimulationResult`] or its
//! [`FinalState`], so summaries can be recomputed from a stored replay.

mod metrics;

use serde::{Deserialize, Serialize};
use wave_combat_core::{round_to, FinalState, SimulationEvent, SimulationResult, REPORT_DIGITS};

pub use metrics::{damage_by_source, kills_by_enemy_type};

/// Progress at which an enemy has crossed the lane and reached the gate.
pub const LEAK_PROGRESS: f64 = 1.0;

/// Aggregate counters over one event log.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WaveSummary {
    /// Number of recorded events, including the wave start.
    pub event_count: usize,
    /// Number of enemy deaths.
    pub kill_count: usize,
    /// Sum of every damage amount.
    pub total_damage: f64,
}

/// Consequences of a wave for the defended gate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WaveOutcome {
    /// Enemies still alive when the simulation stopped.
    pub alive_enemy_count: usize,
    /// Alive enemies that reached the gate.
    pub leaks: u32,
    /// Whether no enemy survived.
    pub wave_cleared: bool,
    /// Gate hp after subtracting one per leak.
    pub next_gate_hp: u32,
}

/// Counts events, kills and total damage in `result`.
#[must_use]
pub fn summarize(result: &SimulationResult) -> WaveSummary {
    let mut summary = WaveSummary {
        event_count: result.event_log.len(),
        ..WaveSummary::default()
    };

    for event in &result.event_log {
        match event {
            SimulationEvent::Damage { amount, .. } => summary.total_damage += amount,
            SimulationEvent::EnemyDeath { .. } => summary.kill_count += 1,
            _ => {}
        }
    }

    summary.total_damage = round_to(summary.total_damage, REPORT_DIGITS);
    summary
}

/// Resolves the gate outcome of a wave that ended in `final_state`.
#[must_use]
pub fn resolve_outcome(final_state: &FinalState, gate_hp: u32) -> WaveOutcome {
    let alive: Vec<_> = final_state
        .enemies
        .iter()
        .filter(|enemy| enemy.is_alive)
        .collect();
    let leaks = alive
        .iter()
        .filter(|enemy| enemy.progress >= LEAK_PROGRESS)
        .count();
    let leaks = u32::try_from(leaks).unwrap_or(u32::MAX);

    WaveOutcome {
        alive_enemy_count: alive.len(),
        leaks,
        wave_cleared: alive.is_empty(),
        next_gate_hp: gate_hp.saturating_sub(leaks),
    }
}
