use bevy::prelude::*;

use super::super::components::{CombatState, Fighter, Velocity};
use super::super::types::{FacingSign, Multiplier, Seconds};
use super::attack::AttackDescriptor;
use crate::config::tuning::Tuning;

/// What one knockback application did, echoed into the damage notification.
#[derive(Debug, Clone, Copy)]
pub struct AppliedKnockback {
    pub velocity: Vec2,
    pub force: f32,
    pub hitstun: Seconds,
}

/// Launch a fighter: overwrite its velocity and restart its hitstun.
///
/// Velocity is set, never accumulated, so the newest hit always owns the
/// launch. A non-positive `hitstun_override` derives the duration from the
/// final force instead, clamped to the tuned window.
pub fn apply_knockback(
    tuning: &Tuning,
    multiplier: Multiplier,
    combat: &mut CombatState,
    velocity: &mut Velocity,
    direction: Vec2,
    base_force: f32,
    hitstun_override: f32,
) -> AppliedKnockback {
    let force = base_force.max(0.0) * multiplier.0 * tuning.base_knockback_multiplier;
    let launch = direction.normalize_or_zero() * force;
    velocity.0 = launch;
    combat.last_knockback = launch;

    let hitstun = if hitstun_override > 0.0 {
        Seconds::new(hitstun_override)
    } else {
        Seconds::new(
            (force * tuning.hitstun_per_force)
                .max(tuning.min_hitstun)
                .min(tuning.max_hitstun),
        )
    };
    combat.start_hitstun(hitstun);

    AppliedKnockback {
        velocity: launch,
        force,
        hitstun,
    }
}

/// Launch a fighter from an attack, mirroring the launch angle by the
/// attacker's facing.
pub fn apply_attack_knockback(
    tuning: &Tuning,
    multiplier: Multiplier,
    combat: &mut CombatState,
    velocity: &mut Velocity,
    attack: &AttackDescriptor,
    attacker_facing: FacingSign,
) -> AppliedKnockback {
    let direction = attacker_facing.mirror_x(attack.knockback_angle);
    apply_knockback(
        tuning,
        multiplier,
        combat,
        velocity,
        direction,
        attack.base_knockback,
        attack.hitstun_duration,
    )
}

/// PhysicsSet: count hitstun down on the gameplay clock. The fixed step
/// halts during hitstop, so frozen frames never consume hitstun.
pub fn tick_hitstun(tuning: Res<Tuning>, mut fighters: Query<&mut CombatState, With<Fighter>>) {
    let dt = tuning.dt;
    for mut combat in &mut fighters {
        combat.tick(dt);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn apply(
        tuning: &Tuning,
        multiplier: f32,
        direction: Vec2,
        base_force: f32,
        hitstun_override: f32,
    ) -> (CombatState, Velocity, AppliedKnockback) {
        let mut combat = CombatState::default();
        let mut velocity = Velocity(Vec2::new(9.0, -1.0));
        let applied = apply_knockback(
            tuning,
            Multiplier::new(multiplier),
            &mut combat,
            &mut velocity,
            direction,
            base_force,
            hitstun_override,
        );
        (combat, velocity, applied)
    }

    #[test]
    fn velocity_is_set_not_accumulated() {
        let tuning = Tuning::default();
        let (combat, velocity, applied) = apply(&tuning, 1.2, Vec2::new(-1.0, 0.5), 5.0, 0.0);

        let expected = Vec2::new(-1.0, 0.5).normalize() * 6.0;
        assert!((velocity.0 - expected).length() < 1e-5);
        assert_eq!(combat.last_knockback, velocity.0);
        assert!((applied.force - 6.0).abs() < 1e-5);
    }

    #[test]
    fn derived_hitstun_is_clamped_to_window() {
        let tuning = Tuning::default();

        // Small force rides the floor of the window.
        let (_, _, weak) = apply(&tuning, 1.0, Vec2::X, 2.0, 0.0);
        assert_eq!(weak.hitstun, Seconds(tuning.min_hitstun));

        // Huge force hits the ceiling.
        let (_, _, strong) = apply(&tuning, 10.0, Vec2::X, 100.0, 0.0);
        assert_eq!(strong.hitstun, Seconds(tuning.max_hitstun));

        // In between scales linearly with force.
        let (_, _, mid) = apply(&tuning, 1.0, Vec2::X, 50.0, 0.0);
        assert!((mid.hitstun.0 - 0.5).abs() < 1e-5);
    }

    #[test]
    fn explicit_hitstun_passes_through() {
        let tuning = Tuning::default();
        let (combat, _, applied) = apply(&tuning, 1.0, Vec2::X, 5.0, 0.7);
        assert_eq!(applied.hitstun, Seconds(0.7));
        assert_eq!(combat.hitstun_remaining, Seconds(0.7));
    }

    #[test]
    fn zero_direction_leaves_fighter_in_place() {
        let tuning = Tuning::default();
        let (_, velocity, applied) = apply(&tuning, 1.0, Vec2::ZERO, 5.0, 0.0);
        assert_eq!(velocity.0, Vec2::ZERO);
        assert_eq!(applied.velocity, Vec2::ZERO);
        // Force is still reported; only the direction degenerated.
        assert!((applied.force - 5.0).abs() < 1e-5);
    }

    #[test]
    fn negative_base_force_is_clamped() {
        let tuning = Tuning::default();
        let (_, velocity, applied) = apply(&tuning, 1.0, Vec2::X, -3.0, 0.0);
        assert_eq!(applied.force, 0.0);
        assert_eq!(velocity.0, Vec2::ZERO);
    }

    #[test]
    fn facing_mirrors_attack_angle() {
        let tuning = Tuning::default();
        let mut combat = CombatState::default();
        let mut velocity = Velocity(Vec2::ZERO);
        let attack = AttackDescriptor::new(10.0, 5.0, Vec2::new(1.0, 0.5));

        let applied = apply_attack_knockback(
            &tuning,
            Multiplier::new(1.2),
            &mut combat,
            &mut velocity,
            &attack,
            FacingSign::LEFT,
        );

        let expected = Vec2::new(-1.0, 0.5).normalize() * 6.0;
        assert!((applied.velocity - expected).length() < 1e-5);
        assert!(applied.velocity.x < 0.0);
    }
}
