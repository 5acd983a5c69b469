use bevy::prelude::*;

use super::components::{Fighter, Velocity};
use crate::config::tuning::Tuning;

/// PhysicsSet: gravity, velocity → position, and main-platform landing.
///
/// A fighter lands only when it crosses the platform surface from above
/// while horizontally over it; anything launched past the edge (or under
/// the platform) keeps falling toward the bottom blast zone.
pub fn integrate_fighters(
    tuning: Res<Tuning>,
    mut fighters: Query<(&mut Transform, &mut Velocity), With<Fighter>>,
) {
    let dt = tuning.dt;
    for (mut transform, mut velocity) in &mut fighters {
        velocity.0.y -= tuning.gravity * dt;

        let prev_y = transform.translation.y;
        transform.translation.x += velocity.0.x * dt;
        transform.translation.y += velocity.0.y * dt;

        let over_platform = transform.translation.x.abs() <= tuning.floor_half_width;
        let crossed_surface = prev_y >= tuning.floor_y && transform.translation.y <= tuning.floor_y;
        if over_platform && velocity.0.y < 0.0 && crossed_surface {
            transform.translation.y = tuning.floor_y;
            velocity.0.y = 0.0;

            // Grounded: bleed horizontal speed
            let damp = (1.0 - tuning.ground_friction * dt).max(0.0);
            velocity.0.x *= damp;
        }
    }
}
