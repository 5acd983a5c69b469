use bevy::prelude::*;

use super::combat::attack::AttackDescriptor;
use super::types::{BlastZoneType, FacingSign, PlayerIndex};

/// Hitbox–hurtbox overlap (separate message type so detection and
/// resolution stay in their own sets).
#[derive(Message, Debug, Clone)]
pub struct HurtboxHit {
    pub hurtbox: Entity,
    pub attack: AttackDescriptor,
    pub attacker_facing: FacingSign,
}

/// A fighter crossed a blast zone. Emitted exactly once per knockout.
#[derive(Message, Debug, Clone)]
pub struct FighterKo {
    pub player: PlayerIndex,
    pub zone: BlastZoneType,
    /// Velocity at the moment of crossing; zero if the fighter had no body.
    pub exit_velocity: Vec2,
}

/// A hit fully resolved against a fighter.
#[derive(Message, Debug, Clone)]
pub struct FighterDamaged {
    pub player: PlayerIndex,
    pub damage: f32,
    pub damage_total: f32,
    pub knockback_force: f32,
    pub knockback_direction: Vec2,
}

/// A fighter was reset at its spawn point.
#[derive(Message, Debug, Clone)]
pub struct FighterRespawned {
    pub player: PlayerIndex,
    pub position: Vec2,
}

#[derive(Message, Debug, Clone)]
pub struct RoundStarted {
    pub round: u32,
}

#[derive(Message, Debug, Clone)]
pub struct RoundEnded {
    pub round: u32,
    pub winner: PlayerIndex,
}

#[derive(Message, Debug, Clone)]
pub struct MatchEnded {
    pub winner: PlayerIndex,
    pub rounds_won: [u32; 2],
}

#[derive(Message, Debug, Clone)]
pub struct ScoreChanged {
    pub player: PlayerIndex,
    pub rounds_won: u32,
}

/// Drain every notification queue. Runs at match teardown so a later
/// match can never observe stale messages.
pub fn clear_all(world: &mut World) {
    fn clear<M: Message>(world: &mut World) {
        if let Some(mut messages) = world.get_resource_mut::<Messages<M>>() {
            messages.clear();
        }
    }
    clear::<HurtboxHit>(world);
    clear::<FighterKo>(world);
    clear::<FighterDamaged>(world);
    clear::<FighterRespawned>(world);
    clear::<RoundStarted>(world);
    clear::<RoundEnded>(world);
    clear::<MatchEnded>(world);
    clear::<ScoreChanged>(world);
}
