#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Deterministic spawn scheduler that releases enemy spawn instructions by time.

use wave_combat_core::{finite_or, EnemyTypeId, SpawnBatch, SpawnInstruction, EPSILON};

/// Most instructions a single batch expands into.
pub const MAX_SPAWNS_PER_BATCH: u32 = 100_000;

/// Expands declarative batches into individual instructions.
///
/// Batches with an empty enemy id are dropped, negative or non-finite numbers
/// are clamped to zero, counts are capped at [`MAX_SPAWNS_PER_BATCH`], and the output is sorted by
/// `(time, batch_index, sequence_index)` so exact time ties still resolve in a
/// fixed order.
#[must_use]
pub fn expand(batches: &[SpawnBatch]) -> Vec<SpawnInstruction> {
    let mut expanded = Vec::new();

    for (batch_index, batch) in batches.iter().enumerate() {
        if batch.enemy_id.is_empty() {
            continue;
        }

        let count = finite_or(batch.count, 0.0)
            .max(0.0)
            .floor()
            .min(f64::from(MAX_SPAWNS_PER_BATCH)) as u32;
        let start = finite_or(batch.time, 0.0).max(0.0);
        let interval = finite_or(batch.interval, 0.0).max(0.0);
        let enemy_id = EnemyTypeId::new(batch.enemy_id.as_str());

        expanded.reserve(count as usize);
        for sequence_index in 0..count {
            expanded.push(SpawnInstruction {
                time: start + interval * f64::from(sequence_index),
                enemy_id: enemy_id.clone(),
                batch_index,
                sequence_index,
            });
        }
    }

    expanded.sort_by(|a, b| {
        a.time
            .total_cmp(&b.time)
            .then(a.batch_index.cmp(&b.batch_index))
            .then(a.sequence_index.cmp(&b.sequence_index))
    });
    expanded
}

/// Cursor over a precomputed, immutable spawn schedule.
#[derive(Clone, Debug, Default)]
pub struct SpawnScheduler {
    schedule: Vec<SpawnInstruction>,
    cursor: usize,
}

impl SpawnScheduler {
    /// Builds a scheduler from the provided batches.
    #[must_use]
    pub fn new(batches: &[SpawnBatch]) -> Self {
        Self {
            schedule: expand(batches),
            cursor: 0,
        }
    }

    /// Releases every remaining instruction due at or before `now`.
    ///
    /// Released instructions are never returned again.
    pub fn pop_due(&mut self, now: f64) -> &[SpawnInstruction] {
        let now = finite_or(now, 0.0);
        let start = self.cursor;
        while self
            .schedule
            .get(self.cursor)
            .is_some_and(|instruction| instruction.time <= now + EPSILON)
        {
            self.cursor += 1;
        }
        &self.schedule[start..self.cursor]
    }

    /// Time of the next instruction still pending.
    #[must_use]
    pub fn peek_next_time(&self) -> Option<f64> {
        self.schedule.get(self.cursor).map(|instruction| instruction.time)
    }

    /// Reports whether every instruction has been released.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.cursor >= self.schedule.len()
    }

    /// Number of instructions still pending.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.schedule.len() - self.cursor
    }
}
