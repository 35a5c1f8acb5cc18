#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the wave combat engine.
//!
//! This crate defines the vocabulary that connects the scenario loader, the
//! authoritative simulation world, and the pure combat systems. Callers
//! describe a wave with a [`SimulationConfig`], the world expands it into
//! [`EnemyInstance`] and [`AttackerUnitState`] records, and every observable
//! change is appended to the log as a [`SimulationEvent`]. The run ends with a
//! [`SimulationResult`] holding that log and a [`FinalState`] snapshot.

use std::{collections::BTreeMap, fmt, str::FromStr};

use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

/// Tolerance applied to every due-time comparison.
pub const EPSILON: f64 = 1e-9;

/// Decimal digits kept on internal scheduling timestamps.
pub const SCHEDULE_DIGITS: i32 = 6;

/// Decimal digits kept on values written to events and snapshots.
pub const REPORT_DIGITS: i32 = 4;

/// Critical multiplier used when a unit does not configure one.
pub const DEFAULT_CRIT_MULTIPLIER: f64 = 1.5;

/// Rounds `value` to the requested number of decimal digits.
#[must_use]
pub fn round_to(value: f64, digits: i32) -> f64 {
    let precision = 10_f64.powi(digits);
    (value * precision).round() / precision
}

/// Returns `value` when it is finite and `fallback` otherwise.
#[must_use]
pub fn finite_or(value: f64, fallback: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        fallback
    }
}

/// Clamps a probability-like value into `[0, 1]`, mapping non-finite input to zero.
#[must_use]
pub fn clamp_unit(value: f64) -> f64 {
    finite_or(value, 0.0).clamp(0.0, 1.0)
}

/// Errors raised when a closed catalog is asked for a member it does not define.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum CoreError {
    /// The requested status effect kind is not part of the catalog.
    #[error("unknown status: {0}")]
    UnknownStatus(String),
}

/// Identifier of an enemy type within the enemy catalog.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EnemyTypeId(String);

impl EnemyTypeId {
    /// Creates a new enemy type identifier.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Borrows the textual form of the identifier.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EnemyTypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Unique identifier of a spawned enemy, derived from its type and spawn ordinal.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InstanceId(String);

impl InstanceId {
    /// Creates an instance identifier from an explicit string.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Derives the identifier for the `ordinal`-th spawn of `enemy`, e.g. `goblin#2`.
    #[must_use]
    pub fn from_spawn(enemy: &EnemyTypeId, ordinal: u32) -> Self {
        Self(format!("{enemy}#{ordinal}"))
    }

    /// Borrows the textual form of the identifier.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for InstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier of a player-controlled attacking unit.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UnitId(String);

impl UnitId {
    /// Creates a new unit identifier.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Borrows the textual form of the identifier.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UnitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Category of damage dealt by an attack, deciding which defense stat applies.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DamageType {
    /// Mitigated by armor.
    #[default]
    Physical,
    /// Mitigated by resist.
    Magic,
    /// Ignores all mitigation.
    True,
}

/// Label attached to a damage event for downstream consumers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DamageTag {
    /// Damage mitigated by armor.
    Physical,
    /// Damage mitigated by resist.
    Magic,
    /// Unmitigated damage.
    True,
    /// Periodic damage produced by a burn status.
    Burn,
}

impl From<DamageType> for DamageTag {
    fn from(value: DamageType) -> Self {
        match value {
            DamageType::Physical => Self::Physical,
            DamageType::Magic => Self::Magic,
            DamageType::True => Self::True,
        }
    }
}

/// Rule used by a unit to pick one target among the targetable enemies.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TargetingRule {
    /// Furthest progress wins.
    #[default]
    FrontMost,
    /// Lowest remaining hp wins.
    LowestHp,
    /// Uniform pick driven by one random draw.
    Random,
}

/// Closed catalog of status effect kinds known to the engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusKind {
    /// Scales movement down by its potency.
    Slow,
    /// Blocks movement entirely while active.
    Stun,
    /// Deals its potency as damage every tick interval.
    Burn,
}

impl StatusKind {
    /// Every kind in catalog order.
    pub const ALL: [StatusKind; 3] = [Self::Slow, Self::Stun, Self::Burn];

    /// Frozen defaults for this kind.
    #[must_use]
    pub const fn definition(self) -> StatusDefinition {
        match self {
            Self::Slow => StatusDefinition {
                default_duration: 2.0,
                default_potency: 0.3,
                tick_interval: None,
                max_stacks: 1,
            },
            Self::Stun => StatusDefinition {
                default_duration: 0.8,
                default_potency: 1.0,
                tick_interval: None,
                max_stacks: 1,
            },
            Self::Burn => StatusDefinition {
                default_duration: 3.0,
                default_potency: 3.0,
                tick_interval: Some(1.0),
                max_stacks: 1,
            },
        }
    }

    /// Catalog identifier of the kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Slow => "slow",
            Self::Stun => "stun",
            Self::Burn => "burn",
        }
    }
}

impl fmt::Display for StatusKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StatusKind {
    type Err = CoreError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == value)
            .ok_or_else(|| CoreError::UnknownStatus(value.to_owned()))
    }
}

/// Frozen per-kind defaults of the status catalog.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StatusDefinition {
    /// Duration used when an application does not specify one.
    pub default_duration: f64,
    /// Potency used when an application does not specify one.
    pub default_potency: f64,
    /// Interval between periodic ticks, present only for periodic kinds.
    pub tick_interval: Option<f64>,
    /// Maximum simultaneous instances on one target.
    pub max_stacks: u32,
}

/// One status effect applied to one enemy.
#[derive(Clone, Debug, PartialEq)]
pub struct StatusEffectInstance {
    /// Kind of the effect.
    pub kind: StatusKind,
    /// Unit that applied the effect, if any.
    pub source: Option<UnitId>,
    /// Time of the latest application.
    pub applied_at: f64,
    /// Duration of the latest application.
    pub duration: f64,
    /// Always `applied_at + duration`.
    pub expires_at: f64,
    /// Magnitude of the effect.
    pub potency: f64,
    /// Interval between periodic ticks, present only for periodic kinds.
    pub tick_interval: Option<f64>,
    /// Time the next periodic tick is due.
    pub next_tick_at: Option<f64>,
}

/// Base statistics of an enemy type.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnemyStats {
    /// Starting and maximum hp.
    #[serde(default = "default_enemy_hp")]
    pub hp: f64,
    /// Defense against physical damage.
    #[serde(default)]
    pub armor: f64,
    /// Defense against magic damage.
    #[serde(default)]
    pub resist: f64,
    /// Progress gained per simulated second.
    #[serde(default)]
    pub move_speed: f64,
}

impl Default for EnemyStats {
    fn default() -> Self {
        Self {
            hp: default_enemy_hp(),
            armor: 0.0,
            resist: 0.0,
            move_speed: 0.0,
        }
    }
}

fn default_enemy_hp() -> f64 {
    1.0
}

/// One spawned enemy tracked by the simulation roster.
#[derive(Clone, Debug, PartialEq)]
pub struct EnemyInstance {
    /// Unique identifier derived from the type and spawn ordinal.
    pub instance_id: InstanceId,
    /// Type of the enemy.
    pub enemy_id: EnemyTypeId,
    /// Remaining hp.
    pub hp: f64,
    /// Hp at spawn.
    pub max_hp: f64,
    /// Defense against physical damage.
    pub armor: f64,
    /// Defense against magic damage.
    pub resist: f64,
    /// Progress gained per simulated second.
    pub move_speed: f64,
    /// Distance travelled toward the defended point; never decreases.
    pub progress: f64,
    /// Per-type spawn ordinal, used as a targeting tie-break.
    pub spawn_order: u32,
    /// Time the enemy entered the wave.
    pub spawn_time: f64,
    /// Active status effects in application order.
    pub statuses: Vec<StatusEffectInstance>,
    /// Cleared once hp reaches zero; the record stays on the roster.
    pub alive: bool,
}

impl EnemyInstance {
    /// Instantiates the `ordinal`-th enemy of a type using sanitised catalog stats.
    #[must_use]
    pub fn spawn(enemy_id: EnemyTypeId, ordinal: u32, stats: &EnemyStats, spawn_time: f64) -> Self {
        let hp = finite_or(stats.hp, 1.0).max(1.0);
        Self {
            instance_id: InstanceId::from_spawn(&enemy_id, ordinal),
            enemy_id,
            hp,
            max_hp: hp,
            armor: finite_or(stats.armor, 0.0),
            resist: finite_or(stats.resist, 0.0),
            move_speed: finite_or(stats.move_speed, 0.0).max(0.0),
            progress: 0.0,
            spawn_order: ordinal,
            spawn_time,
            statuses: Vec::new(),
            alive: true,
        }
    }

    /// Reports whether the enemy is alive and has positive hp.
    #[must_use]
    pub fn is_targetable(&self) -> bool {
        self.alive && self.hp > 0.0
    }
}

/// Declarative batch of identical spawns.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpawnBatch {
    /// Time of the first spawn in the batch.
    #[serde(default)]
    pub time: f64,
    /// Enemy type to spawn; batches with an empty id are dropped.
    #[serde(default)]
    pub enemy_id: String,
    /// Number of spawns, floored to an integer.
    #[serde(default)]
    pub count: f64,
    /// Spacing between consecutive spawns.
    #[serde(default)]
    pub interval: f64,
}

/// One resolved spawn produced by expanding a [`SpawnBatch`].
#[derive(Clone, Debug, PartialEq)]
pub struct SpawnInstruction {
    /// Absolute spawn time.
    pub time: f64,
    /// Enemy type to instantiate.
    pub enemy_id: EnemyTypeId,
    /// Position of the originating batch in the input list.
    pub batch_index: usize,
    /// Position of the spawn within its batch.
    pub sequence_index: u32,
}

/// Status effect a unit attempts to apply on every hit.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OnHitStatus {
    /// Kind of the status.
    pub status_id: StatusKind,
    /// Probability of applying the status on a hit.
    #[serde(default = "default_on_hit_chance")]
    pub chance: f64,
    /// Duration override; the catalog default applies when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,
    /// Potency override; the catalog default applies when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub potency: Option<f64>,
}

fn default_on_hit_chance() -> f64 {
    1.0
}

/// Caller-supplied definition of an attacking unit.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnitDefinition {
    /// Identifier of the unit; an empty id is replaced by a positional one.
    #[serde(default)]
    pub id: String,
    /// Raw damage per attack.
    #[serde(default)]
    pub atk: f64,
    /// Attacks per second.
    #[serde(default)]
    pub atk_speed: f64,
    /// Damage type of every attack.
    #[serde(default)]
    pub damage_type: DamageType,
    /// Probability of a critical hit.
    #[serde(default)]
    pub crit_chance: f64,
    /// Raw damage multiplier on a critical hit.
    #[serde(default = "default_crit_multiplier")]
    pub crit_multiplier: f64,
    /// Rule used to pick a target.
    #[serde(default)]
    pub targeting: TargetingRule,
    /// Statuses rolled on every hit.
    #[serde(default)]
    pub on_hit_statuses: Vec<OnHitStatus>,
    /// Time of the first permitted attack.
    #[serde(default)]
    pub initial_attack_at: f64,
}

impl Default for UnitDefinition {
    fn default() -> Self {
        Self {
            id: String::new(),
            atk: 0.0,
            atk_speed: 0.0,
            damage_type: DamageType::Physical,
            crit_chance: 0.0,
            crit_multiplier: DEFAULT_CRIT_MULTIPLIER,
            targeting: TargetingRule::FrontMost,
            on_hit_statuses: Vec::new(),
            initial_attack_at: 0.0,
        }
    }
}

fn default_crit_multiplier() -> f64 {
    DEFAULT_CRIT_MULTIPLIER
}

/// Runtime attack state of one unit.
#[derive(Clone, Debug, PartialEq)]
pub struct AttackerUnitState {
    /// Identifier of the unit.
    pub id: UnitId,
    /// Raw damage per attack.
    pub attack_power: f64,
    /// Attacks per second.
    pub attacks_per_second: f64,
    /// Damage type of every attack.
    pub damage_type: DamageType,
    /// Probability of a critical hit, within `[0, 1]`.
    pub crit_chance: f64,
    /// Raw damage multiplier on a critical hit, at least 1.
    pub crit_multiplier: f64,
    /// Rule used to pick a target.
    pub targeting: TargetingRule,
    /// Statuses rolled on every hit.
    pub on_hit_statuses: Vec<OnHitStatus>,
    /// Earliest time the next attack may fire.
    pub next_attack_at: f64,
}

impl AttackerUnitState {
    /// Builds the runtime state for the unit at `index` in the roster.
    #[must_use]
    pub fn from_definition(definition: &UnitDefinition, index: usize) -> Self {
        let id = if definition.id.is_empty() {
            UnitId::new(format!("unit_{}", index + 1))
        } else {
            UnitId::new(definition.id.clone())
        };

        Self {
            id,
            attack_power: finite_or(definition.atk, 0.0).max(0.0),
            attacks_per_second: finite_or(definition.atk_speed, 0.0).max(0.0),
            damage_type: definition.damage_type,
            crit_chance: clamp_unit(definition.crit_chance),
            crit_multiplier: finite_or(definition.crit_multiplier, DEFAULT_CRIT_MULTIPLIER)
                .max(1.0),
            targeting: definition.targeting,
            on_hit_statuses: definition.on_hit_statuses.clone(),
            next_attack_at: finite_or(definition.initial_attack_at, 0.0).max(0.0),
        }
    }

    /// Reports whether the unit is able to attack at all.
    #[must_use]
    pub fn is_armed(&self) -> bool {
        self.attack_power > 0.0 && self.attacks_per_second > 0.0
    }
}

/// Complete, self-contained description of one wave.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationConfig {
    /// Fixed step size in seconds.
    #[serde(default = "default_tick_seconds")]
    pub tick_seconds: f64,
    /// Simulated wave length cap in seconds.
    #[serde(default = "default_duration_seconds")]
    pub duration_seconds: f64,
    /// Wave number reported by the wave start event.
    #[serde(
        default = "default_wave_number",
        deserialize_with = "deserialize_wave_number"
    )]
    pub wave_number: u32,
    /// Seed of the built-in random number generator.
    ///
    /// Zero is passed to the generator as is; scenario files map a zero seed
    /// to the default through [`coerce_seed`].
    #[serde(default = "default_seed", deserialize_with = "deserialize_seed")]
    pub seed: u32,
    /// Spawn batches in declaration order.
    #[serde(default)]
    pub spawn_events: Vec<SpawnBatch>,
    /// Base statistics keyed by enemy type id.
    #[serde(default)]
    pub enemy_catalog: BTreeMap<String, EnemyStats>,
    /// Attacking units in roster order.
    #[serde(default)]
    pub units: Vec<UnitDefinition>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            tick_seconds: default_tick_seconds(),
            duration_seconds: default_duration_seconds(),
            wave_number: default_wave_number(),
            seed: default_seed(),
            spawn_events: Vec::new(),
            enemy_catalog: BTreeMap::new(),
            units: Vec::new(),
        }
    }
}

fn default_tick_seconds() -> f64 {
    0.1
}

fn default_duration_seconds() -> f64 {
    10.0
}

fn default_wave_number() -> u32 {
    1
}

fn default_seed() -> u32 {
    1
}

/// Converts a loosely typed seed into the generator's 32-bit seed.
///
/// Zero and NaN select the default seed of 1. Any other value is truncated and
/// wrapped modulo 2^32, so `-1` becomes `u32::MAX` and infinities become 0.
#[must_use]
pub fn coerce_seed(raw: f64) -> u32 {
    if raw == 0.0 || raw.is_nan() {
        return default_seed();
    }
    if !raw.is_finite() {
        return 0;
    }
    raw.trunc().rem_euclid(4_294_967_296.0) as u32
}

/// Floors a loosely typed wave number to an integer of at least 1.
#[must_use]
pub fn coerce_wave_number(raw: f64) -> u32 {
    finite_or(raw, 1.0)
        .floor()
        .clamp(1.0, f64::from(u32::MAX)) as u32
}

/// Numeric scenario value that may arrive as a number, a boolean or a string.
#[derive(Deserialize)]
#[serde(untagged)]
enum LooseNumber {
    Number(f64),
    Flag(bool),
    Text(String),
}

impl LooseNumber {
    fn into_f64(self) -> f64 {
        match self {
            Self::Number(value) => value,
            Self::Flag(flag) => f64::from(u8::from(flag)),
            Self::Text(text) => {
                let trimmed = text.trim();
                if trimmed.is_empty() {
                    0.0
                } else {
                    trimmed.parse().unwrap_or(f64::NAN)
                }
            }
        }
    }
}

fn deserialize_seed<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<LooseNumber>::deserialize(deserializer)?;
    Ok(coerce_seed(raw.map_or(f64::NAN, LooseNumber::into_f64)))
}

fn deserialize_wave_number<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<LooseNumber>::deserialize(deserializer)?;
    Ok(coerce_wave_number(raw.map_or(f64::NAN, LooseNumber::into_f64)))
}

/// Append-only record of something that happened during the wave.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SimulationEvent {
    /// The wave began.
    #[serde(rename_all = "camelCase")]
    WaveStart {
        /// Event time.
        time: f64,
        /// Wave number supplied by the caller.
        wave_number: u32,
    },
    /// An enemy entered the wave.
    #[serde(rename_all = "camelCase")]
    Spawn {
        /// Event time.
        time: f64,
        /// Type of the spawned enemy.
        enemy_id: EnemyTypeId,
        /// Identifier of the new instance.
        instance_id: InstanceId,
    },
    /// Hp was removed from an enemy.
    #[serde(rename_all = "camelCase")]
    Damage {
        /// Event time.
        time: f64,
        /// Unit or status responsible for the damage.
        src_id: String,
        /// Enemy that took the damage.
        dst_id: InstanceId,
        /// Mitigated damage amount.
        amount: f64,
        /// Whether the hit was critical.
        is_crit: bool,
        /// Damage classification labels.
        tags: Vec<DamageTag>,
    },
    /// A status effect was applied or refreshed.
    #[serde(rename_all = "camelCase")]
    StatusApply {
        /// Event time.
        time: f64,
        /// Enemy that received the status.
        dst_id: InstanceId,
        /// Kind of the status.
        status_id: StatusKind,
        /// Duration after application.
        duration: f64,
        /// Unit that applied the status, if any.
        source_id: Option<UnitId>,
        /// Potency after application.
        potency: f64,
    },
    /// An enemy's hp reached zero.
    #[serde(rename_all = "camelCase")]
    EnemyDeath {
        /// Event time.
        time: f64,
        /// Identifier of the dead instance.
        id: InstanceId,
        /// Type of the dead enemy.
        enemy_id: EnemyTypeId,
    },
}

impl SimulationEvent {
    /// Timestamp carried by every event.
    #[must_use]
    pub const fn time(&self) -> f64 {
        match self {
            Self::WaveStart { time, .. }
            | Self::Spawn { time, .. }
            | Self::Damage { time, .. }
            | Self::StatusApply { time, .. }
            | Self::EnemyDeath { time, .. } => *time,
        }
    }
}

/// Snapshot of one enemy when the simulation stopped.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnemyFinalState {
    /// Identifier of the instance.
    pub instance_id: InstanceId,
    /// Type of the enemy.
    pub enemy_id: EnemyTypeId,
    /// Remaining hp, rounded and never negative.
    pub hp: f64,
    /// Whether the enemy survived.
    pub is_alive: bool,
    /// Rounded progress.
    pub progress: f64,
}

impl EnemyFinalState {
    /// Captures the reportable state of a roster entry.
    #[must_use]
    pub fn capture(enemy: &EnemyInstance) -> Self {
        Self {
            instance_id: enemy.instance_id.clone(),
            enemy_id: enemy.enemy_id.clone(),
            hp: round_to(enemy.hp.max(0.0), REPORT_DIGITS),
            is_alive: enemy.is_targetable(),
            progress: round_to(enemy.progress, REPORT_DIGITS),
        }
    }
}

/// Roster snapshot as of the tick the simulation stopped on.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinalState {
    /// Clock value at loop exit.
    pub time: f64,
    /// Every spawned enemy in spawn order.
    pub enemies: Vec<EnemyFinalState>,
}

/// Terminal output of one simulation.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationResult {
    /// Ordered history of the wave.
    pub event_log: Vec<SimulationEvent>,
    /// Roster snapshot at loop exit.
    pub final_state: FinalState,
}
