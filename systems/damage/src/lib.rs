#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure damage resolver covering the critical roll and defense mitigation.

use wave_combat_core::{clamp_unit, finite_or, DamageType, DEFAULT_CRIT_MULTIPLIER};
use wave_combat_system_rng::RandomSource;

/// Inputs describing one attack against one defender.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DamageRequest {
    /// Damage before the critical multiplier and mitigation.
    pub raw_damage: f64,
    /// Category deciding which defense stat applies.
    pub damage_type: DamageType,
    /// Defender armor, used for physical damage.
    pub armor: f64,
    /// Defender resist, used for magic damage.
    pub resist: f64,
    /// Probability of a critical hit.
    pub crit_chance: f64,
    /// Raw damage multiplier on a critical hit.
    pub crit_multiplier: f64,
    /// Skips the roll and always crits.
    pub force_crit: bool,
}

impl Default for DamageRequest {
    fn default() -> Self {
        Self {
            raw_damage: 0.0,
            damage_type: DamageType::Physical,
            armor: 0.0,
            resist: 0.0,
            crit_chance: 0.0,
            crit_multiplier: DEFAULT_CRIT_MULTIPLIER,
            force_crit: false,
        }
    }
}

/// Result of resolving a [`DamageRequest`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DamageOutcome {
    /// Raw damage after the critical multiplier, before mitigation.
    pub raw_damage: f64,
    /// Damage actually removed from the defender.
    pub final_damage: f64,
    /// Whether the attack was critical.
    pub is_crit: bool,
    /// Category the damage was resolved as.
    pub damage_type: DamageType,
}

/// Resolves one attack.
///
/// The critical multiplier scales raw damage before mitigation. A forced crit
/// consumes no draw; otherwise exactly one draw is taken.
pub fn resolve<R>(request: &DamageRequest, rng: &mut R) -> DamageOutcome
where
    R: RandomSource + ?Sized,
{
    let raw = finite_or(request.raw_damage, 0.0).max(0.0);
    let is_crit = request.force_crit || roll_crit(request.crit_chance, rng);
    let raw = if is_crit {
        raw * finite_or(request.crit_multiplier, DEFAULT_CRIT_MULTIPLIER).max(1.0)
    } else {
        raw
    };

    let final_damage = match request.damage_type {
        DamageType::Physical => mitigate(raw, request.armor),
        DamageType::Magic => mitigate(raw, request.resist),
        DamageType::True => raw,
    };

    DamageOutcome {
        raw_damage: raw,
        final_damage,
        is_crit,
        damage_type: request.damage_type,
    }
}

/// Applies `raw * 100 / (100 + defense)`, clamping both inputs to be non-negative.
#[must_use]
pub fn mitigate(raw_damage: f64, defense: f64) -> f64 {
    let raw = finite_or(raw_damage, 0.0).max(0.0);
    let defense = finite_or(defense, 0.0).max(0.0);
    raw * (100.0 / (100.0 + defense).max(1.0))
}

/// Rolls a critical hit; a non-finite draw never crits.
pub fn roll_crit<R>(crit_chance: f64, rng: &mut R) -> bool
where
    R: RandomSource + ?Sized,
{
    let chance = clamp_unit(crit_chance);
    finite_or(rng.next_unit(), 1.0) < chance
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn physical_damage_is_halved_by_one_hundred_armor() {
        let outcome = resolve(
            &DamageRequest {
                raw_damage: 200.0,
                armor: 100.0,
                ..DamageRequest::default()
            },
            &mut || 0.5,
        );
        assert_eq!(outcome.final_damage, 100.0);
        assert!(!outcome.is_crit);
    }

    #[test]
    fn magic_damage_uses_resist() {
        let outcome = resolve(
            &DamageRequest {
                raw_damage: 150.0,
                damage_type: DamageType::Magic,
                armor: 1_000.0,
                resist: 50.0,
                ..DamageRequest::default()
            },
            &mut || 0.5,
        );
        assert_eq!(outcome.final_damage, 100.0);
        assert_eq!(outcome.damage_type, DamageType::Magic);
    }

    #[test]
    fn crit_multiplier_applies_before_mitigation() {
        let outcome = resolve(
            &DamageRequest {
                raw_damage: 100.0,
                armor: 100.0,
                crit_multiplier: 2.0,
                force_crit: true,
                ..DamageRequest::default()
            },
            &mut || 0.99,
        );
        assert!(outcome.is_crit);
        assert_eq!(outcome.raw_damage, 200.0);
        assert_eq!(outcome.final_damage, 100.0);
    }

    #[test]
    fn non_crit_magic_hit_is_deterministic_with_injected_draw() {
        let outcome = resolve(
            &DamageRequest {
                raw_damage: 80.0,
                damage_type: DamageType::Magic,
                resist: 60.0,
                crit_chance: 0.5,
                crit_multiplier: 2.0,
                ..DamageRequest::default()
            },
            &mut || 0.9,
        );
        assert!(!outcome.is_crit);
        assert_eq!(outcome.final_damage, 50.0);
    }

    #[test]
    fn true_damage_ignores_defenses() {
        let outcome = resolve(
            &DamageRequest {
                raw_damage: 40.0,
                damage_type: DamageType::True,
                armor: 300.0,
                resist: 300.0,
                ..DamageRequest::default()
            },
            &mut || 0.5,
        );
        assert_eq!(outcome.final_damage, 40.0);
    }

    #[test]
    fn negative_inputs_never_produce_negative_damage() {
        let outcome = resolve(
            &DamageRequest {
                raw_damage: -50.0,
                armor: -400.0,
                ..DamageRequest::default()
            },
            &mut || 0.5,
        );
        assert_eq!(outcome.final_damage, 0.0);

        assert_eq!(mitigate(10.0, -400.0), 10.0);

        let outcome = resolve(
            &DamageRequest {
                raw_damage: 10.0,
                crit_multiplier: 0.1,
                force_crit: true,
                ..DamageRequest::default()
            },
            &mut || 0.5,
        );
        assert_eq!(outcome.raw_damage, 10.0);
    }

    #[test]
    fn crit_roll_clamps_chance_and_rejects_non_finite_draws() {
        assert!(roll_crit(5.0, &mut || 0.999));
        assert!(!roll_crit(-1.0, &mut || 0.0));
        assert!(!roll_crit(1.0, &mut || f64::NAN));
        assert!(roll_crit(0.3, &mut || 0.29));
        assert!(!roll_crit(0.3, &mut || 0.3));
    }

    #[test]
    fn forced_crit_consumes_no_draw() {
        let mut draws = 0;
        let _ = resolve(
            &DamageRequest {
                raw_damage: 1.0,
                force_crit: true,
                ..DamageRequest::default()
            },
            &mut || {
                draws += 1;
                0.0
            },
        );
        assert_eq!(draws, 0);
    }
}
