use bevy::prelude::*;

use super::super::components::CollisionRadius;
use super::super::types::Seconds;
use crate::config::tuning::Tuning;

// ── Attack data ─────────────────────────────────────────────────────

/// Immutable tuning values for one attack. Negative inputs are clamped
/// at construction; a zero hitstun duration means "derive from force".
#[derive(Debug, Clone, Copy)]
pub struct AttackDescriptor {
    pub damage: f32,
    pub base_knockback: f32,
    /// Launch direction for a right-facing attacker; mirrored by facing.
    pub knockback_angle: Vec2,
    pub hitstun_duration: f32,
    pub hitstop_duration: f32,
}

impl AttackDescriptor {
    pub fn new(damage: f32, base_knockback: f32, knockback_angle: Vec2) -> Self {
        Self {
            damage: damage.max(0.0),
            base_knockback: base_knockback.max(0.0),
            knockback_angle,
            hitstun_duration: 0.0,
            hitstop_duration: 0.0,
        }
    }

    pub fn with_hitstun(mut self, seconds: f32) -> Self {
        self.hitstun_duration = seconds.max(0.0);
        self
    }

    pub fn with_hitstop(mut self, seconds: f32) -> Self {
        self.hitstop_duration = seconds.max(0.0);
        self
    }

    // ── Presets ─────────────────────────────────────────────────────

    /// Quick poke: low damage, shallow launch.
    pub fn jab() -> Self {
        Self::new(4.0, 3.0, Vec2::new(1.0, 0.35)).with_hitstop(0.04)
    }

    /// Heavy hit with a rising launch angle.
    pub fn launcher() -> Self {
        Self::new(10.0, 5.0, Vec2::new(1.0, 0.5)).with_hitstop(0.05)
    }

    /// Downward-angled finisher toward the bottom blast zone.
    pub fn spike() -> Self {
        Self::new(12.0, 9.0, Vec2::new(0.35, -1.0)).with_hitstop(0.07)
    }
}

// ── Live hitboxes ───────────────────────────────────────────────────

/// One active swing of an attack, owned by a fighter.
///
/// The offset is local-space and mirrored by the owner's facing each
/// tick. A hitbox remembers which fighters it has already hit, so one
/// swing overlapping several hurtboxes of the same fighter lands once.
#[derive(Component, Debug)]
pub struct ActiveHitbox {
    pub owner: Entity,
    pub attack: AttackDescriptor,
    pub offset: Vec2,
    pub lifetime: Seconds,
    hit_fighters: Vec<Entity>,
}

impl ActiveHitbox {
    pub fn new(owner: Entity, attack: AttackDescriptor, offset: Vec2, active_for: f32) -> Self {
        Self {
            owner,
            attack,
            offset,
            lifetime: Seconds::new(active_for),
            hit_fighters: Vec::new(),
        }
    }

    pub fn can_hit(&self, fighter: Entity) -> bool {
        !self.hit_fighters.contains(&fighter)
    }

    pub fn register_hit(&mut self, fighter: Entity) {
        self.hit_fighters.push(fighter);
    }
}

/// Spawn a live hitbox for `owner`'s attack.
pub fn spawn_attack_hitbox(
    commands: &mut Commands,
    owner: Entity,
    attack: AttackDescriptor,
    offset: Vec2,
    radius: f32,
    active_for: f32,
) -> Entity {
    commands
        .spawn((
            ActiveHitbox::new(owner, attack, offset, active_for),
            CollisionRadius(radius),
        ))
        .id()
}

// ── Systems ─────────────────────────────────────────────────────────

/// PhysicsSet: age live hitboxes on the gameplay clock.
pub fn tick_hitbox_lifetimes(tuning: Res<Tuning>, mut hitboxes: Query<&mut ActiveHitbox>) {
    let dt = tuning.dt;
    for mut hitbox in &mut hitboxes {
        hitbox.lifetime = hitbox.lifetime.dec(dt);
    }
}

/// CleanupSet: drop expired hitboxes after detection has seen their last tick.
pub fn despawn_expired_hitboxes(
    mut commands: Commands,
    hitboxes: Query<(Entity, &ActiveHitbox)>,
) {
    for (entity, hitbox) in &hitboxes {
        if hitbox.lifetime.is_expired() {
            commands.entity(entity).despawn();
        }
    }
}
