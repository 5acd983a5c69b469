use bevy::prelude::*;

use super::super::components::{CombatState, Facing, Fighter, PlayerSlot, RespawnState, Velocity};
use super::super::events::{FighterDamaged, HurtboxHit};
use super::super::health::FighterHealth;
use super::super::match_flow::RoundClock;
use super::super::types::Multiplier;
use super::hitstop::Hitstop;
use super::knockback;
use crate::config::tuning::Tuning;

/// Damage receiver owned by a fighter.
///
/// Ownership is an explicit entity reference set at spawn. A fighter may
/// carry several hurtboxes (body, head); each forwards hits on its own.
#[derive(Component, Debug)]
pub struct Hurtbox {
    pub owner: Entity,
    pub invincible: bool,
}

impl Hurtbox {
    pub fn new(owner: Entity) -> Self {
        Self {
            owner,
            invincible: false,
        }
    }

    pub fn set_invincible(&mut self, invincible: bool) {
        self.invincible = invincible;
    }
}

/// Local-space offset from the owner's position, mirrored by facing.
#[derive(Component, Debug, Clone, Copy)]
pub struct HurtboxOffset(pub Vec2);

/// PhysicsSet: hurtboxes follow their owner every tick. A hurtbox whose
/// owner is gone keeps its last position; resolution reports it if hit.
pub fn sync_hurtbox_transforms(
    fighters: Query<(&Transform, &Facing), (With<Fighter>, Without<Hurtbox>)>,
    mut hurtboxes: Query<(&Hurtbox, &HurtboxOffset, &mut Transform), Without<Fighter>>,
) {
    for (hurtbox, offset, mut transform) in &mut hurtboxes {
        let Ok((owner_tf, facing)) = fighters.get(hurtbox.owner) else {
            continue;
        };
        let pos = owner_tf.translation.truncate() + facing.0.mirror_x(offset.0);
        transform.translation.x = pos.x;
        transform.translation.y = pos.y;
    }
}

/// ResolutionSet: validate each detected hit and apply it.
///
/// Guards run in order: invincible hurtbox, unresolvable owner, respawning
/// owner. A surviving hit lands damage, overwrites velocity and hitstun,
/// triggers hitstop if the attack carries one, and emits the damage
/// notification. The knockback multiplier is read after the damage ledger
/// grows, so the hit's own damage already counts.
pub fn resolve_hits(
    tuning: Res<Tuning>,
    round_clock: Res<RoundClock>,
    mut hits: MessageReader<HurtboxHit>,
    hurtboxes: Query<&Hurtbox>,
    mut fighters: Query<
        (
            &PlayerSlot,
            &RespawnState,
            &mut FighterHealth,
            &mut CombatState,
            &mut Velocity,
        ),
        With<Fighter>,
    >,
    mut hitstop: ResMut<Hitstop>,
    mut virtual_time: ResMut<Time<Virtual>>,
    mut damaged: MessageWriter<FighterDamaged>,
) {
    for hit in hits.read() {
        let Ok(hurtbox) = hurtboxes.get(hit.hurtbox) else {
            continue;
        };
        if hurtbox.invincible {
            continue;
        }
        let Ok((slot, respawn, mut health, mut combat, mut velocity)) =
            fighters.get_mut(hurtbox.owner)
        else {
            warn!("Hurtbox {:?} has no resolvable owner, dropping hit", hit.hurtbox);
            continue;
        };
        if respawn.respawning {
            continue;
        }

        health.take_damage(hit.attack.damage);
        let multiplier = if round_clock.sudden_death {
            Multiplier::new(tuning.sudden_death_knockback_mult)
        } else {
            health.knockback_multiplier(tuning.knockback_per_damage)
        };
        let applied = knockback::apply_attack_knockback(
            &tuning,
            multiplier,
            &mut combat,
            &mut velocity,
            &hit.attack,
            hit.attacker_facing,
        );

        if hit.attack.hitstop_duration > 0.0 {
            hitstop.trigger(&mut virtual_time, Some(hit.attack.hitstop_duration), &tuning);
        }

        damaged.write(FighterDamaged {
            player: slot.0,
            damage: hit.attack.damage,
            damage_total: health.damage_taken,
            knockback_force: applied.force,
            knockback_direction: applied.velocity.normalize_or_zero(),
        });
    }
}
