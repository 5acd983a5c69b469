use bevy::prelude::*;

use super::types::{FacingSign, PlayerIndex, Seconds};

// ── Marker components ───────────────────────────────────────────────

#[derive(Component)]
pub struct Fighter;

// ── Fighter identity ────────────────────────────────────────────────

/// Which player slot this fighter belongs to.
#[derive(Component, Debug, Clone, Copy)]
pub struct PlayerSlot(pub PlayerIndex);

#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Facing(pub FacingSign);

// ── Fighter runtime state ───────────────────────────────────────────

#[derive(Component, Debug, Default)]
pub struct Velocity(pub Vec2);

/// Hitstun countdown plus the last knockback applied.
///
/// `in_hitstun` is derived from the countdown, so the two can never
/// disagree. A new hit restarts the countdown; durations don't stack.
#[derive(Component, Debug, Default)]
pub struct CombatState {
    pub hitstun_remaining: Seconds,
    pub last_knockback: Vec2,
}

impl CombatState {
    pub fn in_hitstun(&self) -> bool {
        !self.hitstun_remaining.is_expired()
    }

    pub fn start_hitstun(&mut self, duration: Seconds) {
        self.hitstun_remaining = duration;
    }

    /// Cut an in-flight hitstun short.
    pub fn end_hitstun(&mut self) {
        self.hitstun_remaining = Seconds::new(0.0);
    }

    pub fn tick(&mut self, dt: f32) {
        self.hitstun_remaining = self.hitstun_remaining.dec(dt);
    }

    /// Back to neutral (round reset / respawn).
    pub fn reset(&mut self) {
        self.hitstun_remaining = Seconds::new(0.0);
        self.last_knockback = Vec2::ZERO;
    }
}

/// Respawn flag plus the post-respawn invincibility window.
///
/// `respawning` shields the fighter from hits and blast zones between the
/// round reset and the round start; the invincibility countdown only
/// drives hurtbox protection and keeps running into the round.
#[derive(Component, Debug, Default)]
pub struct RespawnState {
    pub respawning: bool,
    pub invincibility: Seconds,
}

// ── Collision ───────────────────────────────────────────────────────

#[derive(Component, Debug, Clone, Copy)]
pub struct CollisionRadius(pub f32);
