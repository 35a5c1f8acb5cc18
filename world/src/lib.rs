#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative state and tick loop for one simulated wave.
//!
//! A [`World`] is built fresh from a [`SimulationConfig`] and owns every piece
//! of mutable state the wave needs: the spawn cursor, the enemy roster and the
//! unit cooldowns. [`step`] advances it by one fixed tick and appends what
//! happened to an event log; [`run`] drives it to completion. Nothing is
//! shared between worlds, so independent waves can run on separate threads.

use std::collections::BTreeMap;

use tracing::{debug, trace, warn};
use wave_combat_core::{
    clamp_unit, finite_or, round_to, AttackerUnitState, DamageTag, EnemyInstance, EnemyStats,
    EnemyTypeId, SimulationConfig, SimulationEvent, SimulationResult, SpawnInstruction,
    EPSILON, REPORT_DIGITS, SCHEDULE_DIGITS,
};
use wave_combat_system_damage::{self as damage, DamageRequest};
use wave_combat_system_rng::{RandomSource, SeededRng};
use wave_combat_system_spawning::SpawnScheduler;
use wave_combat_system_status::{self as status, PeriodicTick, StatusApplication};
use wave_combat_system_targeting::Targeting;

/// Smallest interval between two attacks of one unit.
pub const MIN_ATTACK_INTERVAL: f64 = 1e-3;

/// Most attack attempts a single unit makes in one tick.
pub const MAX_ATTACKS_PER_STEP: usize = 4096;

/// Source label used for periodic damage whose applier is unknown.
pub const UNATTRIBUTED_BURN_SOURCE: &str = "status:burn";

const MIN_TICK_SECONDS: f64 = 1e-6;

/// Reports where the wave stands after a call to [`step`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickStatus {
    /// More ticks remain.
    Running,
    /// The schedule is exhausted and every enemy is dead.
    Cleared,
    /// The clock passed the configured duration.
    TimeUp,
}

/// Mutable working set of one wave.
#[derive(Debug)]
pub struct World {
    tick_seconds: f64,
    duration_seconds: f64,
    wave_number: u32,
    clock: f64,
    status: TickStatus,
    scheduler: SpawnScheduler,
    catalog: BTreeMap<String, EnemyStats>,
    spawn_counters: BTreeMap<EnemyTypeId, u32>,
    enemies: Vec<EnemyInstance>,
    units: Vec<AttackerUnitState>,
    targeting: Targeting,
    periodic_scratch: Vec<PeriodicTick>,
}

impl World {
    /// Builds a world at time zero from `config`, sanitising its numbers.
    #[must_use]
    pub fn new(config: &SimulationConfig) -> Self {
        let units = config
            .units
            .iter()
            .enumerate()
            .map(|(index, definition)| AttackerUnitState::from_definition(definition, index))
            .collect();

        Self {
            tick_seconds: finite_or(config.tick_seconds, 0.1).max(MIN_TICK_SECONDS),
            duration_seconds: finite_or(config.duration_seconds, 10.0).max(0.0),
            wave_number: config.wave_number.max(1),
            clock: 0.0,
            status: TickStatus::Running,
            scheduler: SpawnScheduler::new(&config.spawn_events),
            catalog: config.enemy_catalog.clone(),
            spawn_counters: BTreeMap::new(),
            enemies: Vec::new(),
            units,
            targeting: Targeting::new(),
            periodic_scratch: Vec::new(),
        }
    }

    fn spawn(&mut self, instruction: &SpawnInstruction, out_events: &mut Vec<SimulationEvent>) {
        let counter = self
            .spawn_counters
            .entry(instruction.enemy_id.clone())
            .or_insert(0);
        *counter += 1;
        let ordinal = *counter;

        let stats = match self.catalog.get(instruction.enemy_id.as_str()) {
            Some(stats) => stats.clone(),
            None => {
                warn!(
                    enemy_id = %instruction.enemy_id,
                    "spawned enemy type missing from catalog, using default stats"
                );
                EnemyStats::default()
            }
        };

        let enemy = EnemyInstance::spawn(
            instruction.enemy_id.clone(),
            ordinal,
            &stats,
            instruction.time,
        );
        out_events.push(SimulationEvent::Spawn {
            time: round_to(instruction.time, REPORT_DIGITS),
            enemy_id: enemy.enemy_id.clone(),
            instance_id: enemy.instance_id.clone(),
        });
        self.enemies.push(enemy);
    }

    fn advance_enemies(&mut self, now: f64, out_events: &mut Vec<SimulationEvent>) {
        let tick_seconds = self.tick_seconds;

        for enemy in self.enemies.iter_mut() {
            if !enemy.is_targetable() {
                continue;
            }

            status::sweep_expired(enemy, now);
            self.periodic_scratch.clear();
            let report = status::tick_periodic(enemy, now, &mut self.periodic_scratch);
            if report.throttled {
                warn!(
                    instance_id = %enemy.instance_id,
                    time = now,
                    "periodic tick backlog exceeded the per-tick guard"
                );
            }

            let mut last_tick_time = now;
            for tick in self.periodic_scratch.drain(..) {
                last_tick_time = tick.time;
                out_events.push(SimulationEvent::Damage {
                    time: round_to(tick.time, REPORT_DIGITS),
                    src_id: tick.source.map_or_else(
                        || UNATTRIBUTED_BURN_SOURCE.to_owned(),
                        |source| source.as_str().to_owned(),
                    ),
                    dst_id: enemy.instance_id.clone(),
                    amount: round_to(tick.amount, REPORT_DIGITS),
                    is_crit: false,
                    tags: vec![DamageTag::Burn, DamageTag::Magic],
                });
            }
            if enemy.hp <= 0.0 {
                kill(enemy, last_tick_time, out_events);
            }

            status::sweep_expired(enemy, now);
            if !enemy.is_targetable() {
                continue;
            }

            let modifiers = status::modifiers(&enemy.statuses, now);
            if !modifiers.stunned {
                enemy.progress += enemy.move_speed * modifiers.movement_multiplier * tick_seconds;
            }
        }
    }

    fn resolve_attacks<R>(&mut self, now: f64, rng: &mut R, out_events: &mut Vec<SimulationEvent>)
    where
        R: RandomSource + ?Sized,
    {
        let Self {
            units,
            enemies,
            targeting,
            ..
        } = self;

        for unit in units.iter_mut() {
            if !unit.is_armed() {
                continue;
            }

            let interval = (1.0 / unit.attacks_per_second).max(MIN_ATTACK_INTERVAL);
            let mut attempts = 0;

            while unit.next_attack_at <= now + EPSILON {
                if attempts == MAX_ATTACKS_PER_STEP {
                    warn!(
                        unit_id = %unit.id,
                        time = now,
                        "attack backlog exceeded the per-tick guard"
                    );
                    unit.next_attack_at = round_to(now + interval, SCHEDULE_DIGITS);
                    break;
                }
                attempts += 1;

                // An idle unit slips one interval per tick and fires the backlog
                // once a target shows up.
                let Some(index) = targeting.select(enemies, unit.targeting, rng) else {
                    unit.next_attack_at = round_to(unit.next_attack_at + interval, SCHEDULE_DIGITS);
                    break;
                };
                let target = &mut enemies[index];

                let outcome = damage::resolve(
                    &DamageRequest {
                        raw_damage: unit.attack_power,
                        damage_type: unit.damage_type,
                        armor: target.armor,
                        resist: target.resist,
                        crit_chance: unit.crit_chance,
                        crit_multiplier: unit.crit_multiplier,
                        force_crit: false,
                    },
                    rng,
                );

                target.hp -= outcome.final_damage;
                trace!(
                    unit_id = %unit.id,
                    target = %target.instance_id,
                    amount = outcome.final_damage,
                    is_crit = outcome.is_crit,
                    time = now,
                    "attack resolved"
                );
                out_events.push(SimulationEvent::Damage {
                    time: round_to(now, REPORT_DIGITS),
                    src_id: unit.id.as_str().to_owned(),
                    dst_id: target.instance_id.clone(),
                    amount: round_to(outcome.final_damage, REPORT_DIGITS),
                    is_crit: outcome.is_crit,
                    tags: vec![DamageTag::from(outcome.damage_type)],
                });

                if target.is_targetable() {
                    apply_on_hit_statuses(unit, target, now, rng, out_events);
                }

                if target.hp <= 0.0 {
                    kill(target, now, out_events);
                }

                unit.next_attack_at = round_to(unit.next_attack_at + interval, SCHEDULE_DIGITS);
            }
        }
    }

    fn is_cleared(&self) -> bool {
        self.scheduler.is_finished() && self.enemies.iter().all(|enemy| !enemy.is_targetable())
    }
}

fn apply_on_hit_statuses<R>(
    unit: &AttackerUnitState,
    target: &mut EnemyInstance,
    now: f64,
    rng: &mut R,
    out_events: &mut Vec<SimulationEvent>,
) where
    R: RandomSource + ?Sized,
{
    let time = round_to(now, REPORT_DIGITS);

    for on_hit in &unit.on_hit_statuses {
        let chance = clamp_unit(on_hit.chance);
        if finite_or(rng.next_unit(), 1.0) >= chance {
            continue;
        }

        let applied = status::apply(
            target,
            &StatusApplication {
                kind: on_hit.status_id,
                source: Some(unit.id.clone()),
                now: time,
                duration: on_hit.duration,
                potency: on_hit.potency,
            },
        );
        out_events.push(SimulationEvent::StatusApply {
            time,
            dst_id: target.instance_id.clone(),
            status_id: on_hit.status_id,
            duration: applied.duration,
            source_id: Some(unit.id.clone()),
            potency: applied.potency,
        });
    }
}

/// Marks `enemy` dead and records the death once.
fn kill(enemy: &mut EnemyInstance, time: f64, out_events: &mut Vec<SimulationEvent>) {
    if !enemy.alive {
        return;
    }

    enemy.hp = 0.0;
    enemy.alive = false;
    out_events.push(SimulationEvent::EnemyDeath {
        time: round_to(time, REPORT_DIGITS),
        id: enemy.instance_id.clone(),
        enemy_id: enemy.enemy_id.clone(),
    });
}

/// Processes the tick at the current clock value.
///
/// Spawns are released first, then enemies move and burn, then units attack.
/// The clock only advances when the wave is still running afterwards, so a
/// cleared world keeps the time of the tick that cleared it.
pub fn step<R>(world: &mut World, rng: &mut R, out_events: &mut Vec<SimulationEvent>) -> TickStatus
where
    R: RandomSource + ?Sized,
{
    if world.status != TickStatus::Running {
        return world.status;
    }

    let now = world.clock;
    let due: Vec<SpawnInstruction> = world.scheduler.pop_due(now).to_vec();
    for instruction in &due {
        world.spawn(instruction, out_events);
    }

    world.advance_enemies(now, out_events);
    world.resolve_attacks(now, rng, out_events);

    if world.is_cleared() {
        world.status = TickStatus::Cleared;
        return world.status;
    }

    world.clock = round_to(now + world.tick_seconds, SCHEDULE_DIGITS);
    if world.clock > world.duration_seconds + EPSILON {
        world.status = TickStatus::TimeUp;
    }
    world.status
}

/// Runs a full wave using the built-in generator seeded from `config.seed`.
#[must_use]
pub fn run(config: &SimulationConfig) -> SimulationResult {
    let mut rng = SeededRng::new(config.seed);
    run_with_rng(config, &mut rng)
}

/// Runs a full wave drawing every random value from `rng`.
pub fn run_with_rng<R>(config: &SimulationConfig, rng: &mut R) -> SimulationResult
where
    R: RandomSource + ?Sized,
{
    let mut world = World::new(config);
    debug!(
        wave_number = world.wave_number,
        seed = config.seed,
        tick_seconds = world.tick_seconds,
        duration_seconds = world.duration_seconds,
        scheduled_spawns = world.scheduler.remaining(),
        units = world.units.len(),
        "wave simulation started"
    );

    let mut event_log = vec![SimulationEvent::WaveStart {
        time: 0.0,
        wave_number: world.wave_number,
    }];

    let mut status = TickStatus::Running;
    while status == TickStatus::Running {
        status = step(&mut world, rng, &mut event_log);
    }

    let final_state = query::final_state(&world);
    debug!(
        end_time = final_state.time,
        outcome = ?status,
        events = event_log.len(),
        enemies = world.enemies.len(),
        "wave simulation finished"
    );

    SimulationResult {
        event_log,
        final_state,
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use super::{TickStatus, World};
    use wave_combat_core::{
        round_to, AttackerUnitState, EnemyFinalState, EnemyInstance, FinalState, REPORT_DIGITS,
    };

    /// Current clock value.
    #[must_use]
    pub fn clock(world: &World) -> f64 {
        world.clock
    }

    /// Status after the latest tick.
    #[must_use]
    pub fn status(world: &World) -> TickStatus {
        world.status
    }

    /// Every enemy spawned so far, alive or dead, in spawn order.
    #[must_use]
    pub fn enemies(world: &World) -> &[EnemyInstance] {
        &world.enemies
    }

    /// Runtime state of every unit, in roster order.
    #[must_use]
    pub fn units(world: &World) -> &[AttackerUnitState] {
        &world.units
    }

    /// Number of spawn instructions not yet released.
    #[must_use]
    pub fn pending_spawns(world: &World) -> usize {
        world.scheduler.remaining()
    }

    /// Time of the next spawn instruction still pending.
    #[must_use]
    pub fn next_spawn_time(world: &World) -> Option<f64> {
        world.scheduler.peek_next_time()
    }

    /// Snapshot of the roster at the current clock value.
    #[must_use]
    pub fn final_state(world: &World) -> FinalState {
        FinalState {
            time: round_to(world.clock, REPORT_DIGITS),
            enemies: world.enemies.iter().map(EnemyFinalState::capture).collect(),
        }
    }
}
