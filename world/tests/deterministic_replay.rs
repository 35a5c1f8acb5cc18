use std::thread;

use wave_combat_core::{
    DamageTag, DamageType, EnemyStats, EnemyTypeId, InstanceId, OnHitStatus, SimulationConfig,
    SimulationEvent, SimulationResult, SpawnBatch, StatusKind, TargetingRule, UnitDefinition,
    UnitId,
};
use wave_combat_world::{self as world, query, TickStatus, World};

fn archer_scenario() -> SimulationConfig {
    let mut config = SimulationConfig {
        tick_seconds: 0.5,
        duration_seconds: 5.0,
        wave_number: 2,
        seed: 12_345,
        spawn_events: vec![SpawnBatch {
            time: 0.0,
            enemy_id: "goblin".into(),
            count: 1.0,
            interval: 0.0,
        }],
        units: vec![UnitDefinition {
            id: "archer_1".into(),
            atk: 6.0,
            atk_speed: 2.0,
            on_hit_statuses: vec![OnHitStatus {
                status_id: StatusKind::Burn,
                chance: 1.0,
                duration: Some(3.0),
                potency: Some(2.0),
            }],
            ..UnitDefinition::default()
        }],
        ..SimulationConfig::default()
    };
    let _ = config.enemy_catalog.insert(
        "goblin".into(),
        EnemyStats {
            hp: 12.0,
            armor: 0.0,
            resist: 0.0,
            move_speed: 0.2,
        },
    );
    config
}

fn mixed_scenario(seed: u32) -> SimulationConfig {
    let mut config = SimulationConfig {
        tick_seconds: 0.1,
        duration_seconds: 20.0,
        wave_number: 4,
        seed,
        spawn_events: vec![
            SpawnBatch {
                time: 0.0,
                enemy_id: "goblin".into(),
                count: 6.0,
                interval: 0.4,
            },
            SpawnBatch {
                time: 1.0,
                enemy_id: "brute".into(),
                count: 3.0,
                interval: 1.5,
            },
            SpawnBatch {
                time: 2.5,
                enemy_id: "wisp".into(),
                count: 4.0,
                interval: 0.2,
            },
        ],
        units: vec![
            UnitDefinition {
                id: "archer".into(),
                atk: 9.0,
                atk_speed: 1.6,
                crit_chance: 0.25,
                crit_multiplier: 2.0,
                targeting: TargetingRule::FrontMost,
                ..UnitDefinition::default()
            },
            UnitDefinition {
                id: "mage".into(),
                atk: 14.0,
                atk_speed: 0.7,
                damage_type: DamageType::Magic,
                targeting: TargetingRule::Random,
                on_hit_statuses: vec![
                    OnHitStatus {
                        status_id: StatusKind::Burn,
                        chance: 0.5,
                        duration: None,
                        potency: None,
                    },
                    OnHitStatus {
                        status_id: StatusKind::Slow,
                        chance: 0.35,
                        duration: Some(1.5),
                        potency: Some(0.4),
                    },
                ],
                ..UnitDefinition::default()
            },
            UnitDefinition {
                id: "stunner".into(),
                atk: 3.0,
                atk_speed: 0.5,
                targeting: TargetingRule::LowestHp,
                initial_attack_at: 1.0,
                on_hit_statuses: vec![OnHitStatus {
                    status_id: StatusKind::Stun,
                    chance: 0.6,
                    duration: None,
                    potency: None,
                }],
                ..UnitDefinition::default()
            },
        ],
        ..SimulationConfig::default()
    };
    for (id, hp, armor, resist, move_speed) in [
        ("goblin", 30.0, 10.0, 0.0, 0.12),
        ("brute", 120.0, 60.0, 15.0, 0.05),
        ("wisp", 18.0, 0.0, 80.0, 0.3),
    ] {
        let _ = config.enemy_catalog.insert(
            id.into(),
            EnemyStats {
                hp,
                armor,
                resist,
                move_speed,
            },
        );
    }
    config
}

fn serialised(result: &SimulationResult) -> String {
    serde_json::to_string(result).expect("results serialise")
}

#[test]
fn archer_kills_goblin_with_exact_event_log() {
    let result = world::run(&archer_scenario());
    let goblin = InstanceId::new("goblin#1");

    let expected = vec![
        SimulationEvent::WaveStart {
            time: 0.0,
            wave_number: 2,
        },
        SimulationEvent::Spawn {
            time: 0.0,
            enemy_id: EnemyTypeId::new("goblin"),
            instance_id: goblin.clone(),
        },
        SimulationEvent::Damage {
            time: 0.0,
            src_id: "archer_1".into(),
            dst_id: goblin.clone(),
            amount: 6.0,
            is_crit: false,
            tags: vec![DamageTag::Physical],
        },
        SimulationEvent::StatusApply {
            time: 0.0,
            dst_id: goblin.clone(),
            status_id: StatusKind::Burn,
            duration: 3.0,
            source_id: Some(UnitId::new("archer_1")),
            potency: 2.0,
        },
        SimulationEvent::Damage {
            time: 0.5,
            src_id: "archer_1".into(),
            dst_id: goblin.clone(),
            amount: 6.0,
            is_crit: false,
            tags: vec![DamageTag::Physical],
        },
        SimulationEvent::EnemyDeath {
            time: 0.5,
            id: goblin.clone(),
            enemy_id: EnemyTypeId::new("goblin"),
        },
    ];
    assert_eq!(result.event_log, expected);

    assert_eq!(result.final_state.time, 0.5);
    let enemy = &result.final_state.enemies[0];
    assert_eq!(enemy.instance_id, goblin);
    assert_eq!(enemy.hp, 0.0);
    assert!(!enemy.is_alive);
    assert_eq!(enemy.progress, 0.2);
}

#[test]
fn deterministic_replay_is_byte_identical() {
    let config = mixed_scenario(2_024);
    let first = world::run(&config);
    let second = world::run(&config);

    assert_eq!(first, second, "replay diverged between runs");
    assert_eq!(serialised(&first), serialised(&second));
    assert!(first.event_log.len() > 13);
}

#[test]
fn event_log_is_time_ordered_and_starts_with_wave_start() {
    let result = world::run(&mixed_scenario(7));

    assert!(matches!(
        result.event_log.first(),
        Some(SimulationEvent::WaveStart {
            time,
            wave_number: 4
        }) if *time == 0.0
    ));
    assert_eq!(
        result
            .event_log
            .iter()
            .filter(|event| matches!(event, SimulationEvent::WaveStart { .. }))
            .count(),
        1
    );
    for pair in result.event_log.windows(2) {
        assert!(
            pair[0].time() <= pair[1].time() + 1e-9,
            "event log went back in time: {pair:?}"
        );
    }

    let spawns = result
        .event_log
        .iter()
        .filter(|event| matches!(event, SimulationEvent::Spawn { .. }))
        .count();
    assert_eq!(spawns, 13);
    assert_eq!(result.final_state.enemies.len(), 13);
}

#[test]
fn every_death_is_reported_once_and_matches_final_state() {
    let result = world::run(&mixed_scenario(99));

    let mut dead: Vec<&InstanceId> = result
        .event_log
        .iter()
        .filter_map(|event| match event {
            SimulationEvent::EnemyDeath { id, .. } => Some(id),
            _ => None,
        })
        .collect();
    let reported = dead.len();
    dead.sort();
    dead.dedup();
    assert_eq!(dead.len(), reported, "an enemy died twice");

    for enemy in &result.final_state.enemies {
        assert_eq!(!enemy.is_alive, dead.contains(&&enemy.instance_id));
        assert!(enemy.hp >= 0.0);
        if !enemy.is_alive {
            assert_eq!(enemy.hp, 0.0);
        }
    }

    for (index, event) in result.event_log.iter().enumerate() {
        if let SimulationEvent::EnemyDeath { id, .. } = event {
            let later_hits = result.event_log[index + 1..].iter().any(|later| {
                matches!(later, SimulationEvent::Damage { dst_id, .. } if dst_id == id)
            });
            assert!(!later_hits, "{id} took damage after dying");
        }
    }
}

#[test]
fn burn_ticks_every_second_even_with_coarse_steps() {
    let mut config = archer_scenario();
    config.tick_seconds = 2.0;
    config.duration_seconds = 4.0;
    config.enemy_catalog.get_mut("goblin").expect("goblin").hp = 100.0;
    config.units[0].atk_speed = 0.01;

    let result = world::run(&config);
    let burn_times: Vec<f64> = result
        .event_log
        .iter()
        .filter_map(|event| match event {
            SimulationEvent::Damage {
                time,
                src_id,
                tags,
                amount,
                ..
            } if tags.contains(&DamageTag::Burn) => {
                assert_eq!(src_id, "archer_1");
                assert_eq!(*amount, 2.0);
                assert_eq!(tags, &vec![DamageTag::Burn, DamageTag::Magic]);
                Some(*time)
            }
            _ => None,
        })
        .collect();

    assert_eq!(burn_times, vec![1.0, 2.0, 3.0]);
    assert_eq!(result.final_state.enemies[0].hp, 100.0 - 6.0 - 6.0);
    assert_eq!(result.final_state.time, 6.0);
}

#[test]
fn injected_generator_drives_every_roll() {
    let mut config = archer_scenario();
    config.units[0].crit_chance = 0.5;
    config.units[0].crit_multiplier = 2.0;
    config.units[0].on_hit_statuses.clear();

    let always_crit = world::run_with_rng(&config, &mut || 0.0);
    let never_crit = world::run_with_rng(&config, &mut || 0.99);

    let crits = |result: &SimulationResult| -> Vec<bool> {
        result
            .event_log
            .iter()
            .filter_map(|event| match event {
                SimulationEvent::Damage { is_crit, .. } => Some(*is_crit),
                _ => None,
            })
            .collect()
    };

    assert_eq!(crits(&always_crit), vec![true]);
    assert_eq!(crits(&never_crit), vec![false, false]);
    assert_eq!(always_crit.final_state.time, 0.0);
}

#[test]
fn missing_catalog_entries_spawn_with_default_stats() {
    let mut config = archer_scenario();
    config.spawn_events[0].enemy_id = "phantom".into();

    let result = world::run(&config);
    assert!(matches!(
        &result.event_log[1],
        SimulationEvent::Spawn { instance_id, .. } if instance_id.as_str() == "phantom#1"
    ));
    let phantom = &result.final_state.enemies[0];
    assert!(!phantom.is_alive);
    assert_eq!(phantom.progress, 0.0);
}

#[test]
fn spawn_ordinals_count_per_enemy_type() {
    let result = world::run(&mixed_scenario(3));
    let ids: Vec<&str> = result
        .final_state
        .enemies
        .iter()
        .map(|enemy| enemy.instance_id.as_str())
        .collect();

    assert_eq!(&ids[..3], &["goblin#1", "goblin#2", "goblin#3"]);
    assert!(ids.contains(&"brute#3"));
    assert!(ids.contains(&"wisp#4"));
    assert!(!ids.contains(&"goblin#7"));
}

#[test]
fn stepping_manually_matches_run() {
    let config = mixed_scenario(11);
    let expected = world::run(&config);

    let mut world = World::new(&config);
    let mut rng = wave_combat_system_rng::SeededRng::new(config.seed);
    let mut events = vec![SimulationEvent::WaveStart {
        time: 0.0,
        wave_number: config.wave_number,
    }];
    while world::step(&mut world, &mut rng, &mut events) == TickStatus::Running {}

    assert_eq!(events, expected.event_log);
    assert_eq!(query::final_state(&world), expected.final_state);
}

#[test]
fn concurrent_runs_match_sequential_runs() {
    let seeds: Vec<u32> = (1..=8).collect();
    let sequential: Vec<String> = seeds
        .iter()
        .map(|&seed| serialised(&world::run(&mixed_scenario(seed))))
        .collect();

    let concurrent: Vec<String> = thread::scope(|scope| {
        let handles: Vec<_> = seeds
            .iter()
            .map(|&seed| scope.spawn(move || serialised(&world::run(&mixed_scenario(seed)))))
            .collect();
        handles
            .into_iter()
            .map(|handle| handle.join().expect("simulation thread panicked"))
            .collect()
    });

    assert_eq!(sequential, concurrent);
}
