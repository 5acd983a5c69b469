use bevy::prelude::*;

use super::super::types::{FacingSign, PlayerIndex};
use crate::config::tuning::Tuning;

/// Respawn location for one player slot.
#[derive(Component, Debug)]
pub struct SpawnPoint {
    pub player: PlayerIndex,
    pub facing: FacingSign,
    pub position: Vec2,
}

/// Startup: mirrored spawn points on the platform, facing the center.
pub fn spawn_spawn_points(mut commands: Commands, tuning: Res<Tuning>) {
    commands.spawn(SpawnPoint {
        player: PlayerIndex::new(0),
        facing: FacingSign::RIGHT,
        position: Vec2::new(-tuning.spawn_offset_x, tuning.spawn_y),
    });
    commands.spawn(SpawnPoint {
        player: PlayerIndex::new(1),
        facing: FacingSign::LEFT,
        position: Vec2::new(tuning.spawn_offset_x, tuning.spawn_y),
    });
}
