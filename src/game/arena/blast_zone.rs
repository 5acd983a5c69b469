use bevy::prelude::*;

use super::super::components::{Fighter, PlayerSlot, RespawnState, Velocity};
use super::super::events::FighterKo;
use super::super::types::BlastZoneType;
use crate::config::tuning::Tuning;

/// Knockout trigger region past one arena edge.
///
/// Outer edges are unbounded, so no launch speed can tunnel through the
/// region between two ticks.
#[derive(Component, Debug)]
pub struct BlastZone {
    pub zone: BlastZoneType,
    pub min: Vec2,
    pub max: Vec2,
}

impl BlastZone {
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
    }
}

/// Startup: one zone per arena edge, placed from the tuned extents.
pub fn spawn_blast_zones(mut commands: Commands, tuning: Res<Tuning>) {
    let w = tuning.blast_half_width;
    let h = tuning.blast_half_height;
    let inf = f32::INFINITY;

    commands.spawn(BlastZone {
        zone: BlastZoneType::Left,
        min: Vec2::new(-inf, -inf),
        max: Vec2::new(-w, inf),
    });
    commands.spawn(BlastZone {
        zone: BlastZoneType::Right,
        min: Vec2::new(w, -inf),
        max: Vec2::new(inf, inf),
    });
    commands.spawn(BlastZone {
        zone: BlastZoneType::Top,
        min: Vec2::new(-inf, h),
        max: Vec2::new(inf, inf),
    });
    commands.spawn(BlastZone {
        zone: BlastZoneType::Bottom,
        min: Vec2::new(-inf, -inf),
        max: Vec2::new(inf, -h),
    });
}

/// CollisionSet: emit one knockout per fighter that sits inside a zone.
///
/// Respawning fighters are skipped, and the knockout handler flags the
/// victim as respawning in the same tick, so a crossing reports exactly
/// once. The first matching zone wins when regions overlap in a corner.
pub fn detect_blast_zone_entries(
    zones: Query<&BlastZone>,
    fighters: Query<(&PlayerSlot, &Transform, Option<&Velocity>, &RespawnState), With<Fighter>>,
    mut kos: MessageWriter<FighterKo>,
) {
    for (slot, transform, velocity, respawn) in &fighters {
        if respawn.respawning {
            continue;
        }
        let position = transform.translation.truncate();
        for zone in &zones {
            if zone.contains(position) {
                let exit_velocity = velocity.map(|v| v.0).unwrap_or(Vec2::ZERO);
                kos.write(FighterKo {
                    player: slot.0,
                    zone: zone.zone,
                    exit_velocity,
                });
                break;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contains_handles_unbounded_edges() {
        let bottom = BlastZone {
            zone: BlastZoneType::Bottom,
            min: Vec2::new(-f32::INFINITY, -f32::INFINITY),
            max: Vec2::new(f32::INFINITY, -9.0),
        };
        assert!(bottom.contains(Vec2::new(0.0, -9.5)));
        assert!(bottom.contains(Vec2::new(1000.0, -5000.0)));
        assert!(!bottom.contains(Vec2::new(0.0, -8.9)));
    }

    #[test]
    fn side_zone_only_covers_its_edge() {
        let left = BlastZone {
            zone: BlastZoneType::Left,
            min: Vec2::new(-f32::INFINITY, -f32::INFINITY),
            max: Vec2::new(-14.0, f32::INFINITY),
        };
        assert!(left.contains(Vec2::new(-14.5, 3.0)));
        assert!(!left.contains(Vec2::new(13.0, 3.0)));
        assert!(!left.contains(Vec2::new(0.0, 0.0)));
    }
}
