use bevy::prelude::*;

use super::combat::attack::ActiveHitbox;
use super::combat::hurtbox::Hurtbox;
use super::components::{CollisionRadius, Facing, Fighter};
use super::events::HurtboxHit;

/// CollisionSet: circle-overlap live hitboxes against hurtboxes.
///
/// The hitbox position derives from its owner each tick (offset mirrored
/// by facing), so a swing travels with the attacker. Hits are registered
/// per target fighter at detection time: one swing overlapping a fighter's
/// body and head hurtboxes in the same tick forwards a single hit.
pub fn detect_hitbox_overlaps(
    mut hitboxes: Query<(&mut ActiveHitbox, &CollisionRadius)>,
    fighters: Query<(&Transform, &Facing), With<Fighter>>,
    hurtboxes: Query<(Entity, &Hurtbox, &Transform, &CollisionRadius), Without<ActiveHitbox>>,
    mut hits: MessageWriter<HurtboxHit>,
) {
    for (mut hitbox, hitbox_radius) in &mut hitboxes {
        // A hitbox whose owner vanished mid-swing just goes inert.
        let Ok((owner_tf, owner_facing)) = fighters.get(hitbox.owner) else {
            continue;
        };
        let facing = owner_facing.0;
        let hitbox_pos = owner_tf.translation.truncate() + facing.mirror_x(hitbox.offset);

        for (hurtbox_entity, hurtbox, hurtbox_tf, hurtbox_radius) in &hurtboxes {
            if hurtbox.owner == hitbox.owner {
                continue;
            }
            if !hitbox.can_hit(hurtbox.owner) {
                continue;
            }

            let hurtbox_pos = hurtbox_tf.translation.truncate();
            let dist = hitbox_pos.distance(hurtbox_pos);
            let min_dist = hitbox_radius.0 + hurtbox_radius.0;

            if dist < min_dist {
                hitbox.register_hit(hurtbox.owner);
                hits.write(HurtboxHit {
                    hurtbox: hurtbox_entity,
                    attack: hitbox.attack,
                    attacker_facing: facing,
                });
            }
        }
    }
}
