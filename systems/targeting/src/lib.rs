#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure system that picks one deterministic target for an attacking unit.

use std::cmp::Ordering;

use wave_combat_core::{EnemyInstance, TargetingRule};
use wave_combat_system_rng::RandomSource;

const RANDOM_DRAW_CEILING: f64 = 0.999_999_999_999;

/// Target selector that reuses a scratch buffer to avoid repeated allocations.
#[derive(Debug, Default)]
pub struct Targeting {
    candidates: Vec<usize>,
}

impl Targeting {
    /// Creates a new selector with an empty scratch buffer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Selects one targetable enemy according to `rule`.
    ///
    /// Returns the index of the chosen enemy within `enemies`, or `None` when
    /// no enemy is alive with positive hp. Only [`TargetingRule::Random`]
    /// consumes a draw, and only when candidates exist. Enemies are never
    /// mutated.
    pub fn select<R>(
        &mut self,
        enemies: &[EnemyInstance],
        rule: TargetingRule,
        rng: &mut R,
    ) -> Option<usize>
    where
        R: RandomSource + ?Sized,
    {
        self.candidates.clear();
        self.candidates.extend(
            enemies
                .iter()
                .enumerate()
                .filter(|(_, enemy)| enemy.is_targetable())
                .map(|(index, _)| index),
        );

        if self.candidates.is_empty() {
            return None;
        }

        match rule {
            TargetingRule::FrontMost => self.best_by(enemies, compare_front_most),
            TargetingRule::LowestHp => self.best_by(enemies, compare_lowest_hp),
            TargetingRule::Random => {
                let position = random_index(self.candidates.len(), rng.next_unit());
                self.candidates.get(position).copied()
            }
        }
    }

    fn best_by<F>(&self, enemies: &[EnemyInstance], compare: F) -> Option<usize>
    where
        F: Fn(&EnemyInstance, &EnemyInstance) -> Ordering,
    {
        let mut best: Option<usize> = None;
        for &index in &self.candidates {
            match best {
                Some(current) if compare(&enemies[index], &enemies[current]) != Ordering::Less => {}
                _ => best = Some(index),
            }
        }
        best
    }
}

/// Orders enemies so the one furthest along comes first.
///
/// Ties fall back to the lower spawn ordinal and then to the instance id.
#[must_use]
pub fn compare_front_most(a: &EnemyInstance, b: &EnemyInstance) -> Ordering {
    b.progress
        .total_cmp(&a.progress)
        .then(a.spawn_order.cmp(&b.spawn_order))
        .then_with(|| a.instance_id.cmp(&b.instance_id))
}

/// Orders enemies so the one with the least hp comes first, then by [`compare_front_most`].
#[must_use]
pub fn compare_lowest_hp(a: &EnemyInstance, b: &EnemyInstance) -> Ordering {
    a.hp.total_cmp(&b.hp)
        .then_with(|| compare_front_most(a, b))
}

fn random_index(len: usize, draw: f64) -> usize {
    if !draw.is_finite() {
        return 0;
    }
    let bounded = draw.clamp(0.0, RANDOM_DRAW_CEILING);
    ((bounded * len as f64).floor() as usize).min(len - 1)
}
