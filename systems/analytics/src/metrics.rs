use std::collections::BTreeMap;

use wave_combat_core::{round_to, EnemyTypeId, SimulationEvent, REPORT_DIGITS};

/// Sums damage per source id; periodic damage without an applier is grouped
/// under its synthetic source label.
#[must_use]
pub fn damage_by_source(events: &[SimulationEvent]) -> BTreeMap<String, f64> {
    let mut totals = BTreeMap::new();
    for event in events {
        if let SimulationEvent::Damage { src_id, amount, .. } = event {
            *totals.entry(src_id.clone()).or_insert(0.0) += amount;
        }
    }

    for total in totals.values_mut() {
        *total = round_to(*total, REPORT_DIGITS);
    }
    totals
}

/// Counts deaths per enemy type.
#[must_use]
pub fn kills_by_enemy_type(events: &[SimulationEvent]) -> BTreeMap<EnemyTypeId, usize> {
    let mut kills = BTreeMap::new();
    for event in events {
        if let SimulationEvent::EnemyDeath { enemy_id, .. } = event {
            *kills.entry(enemy_id.clone()).or_insert(0) += 1;
        }
    }
    kills
}
