use std::ops::Mul;

use bevy::math::Vec2;
use serde::{Deserialize, Serialize};

// ── Newtypes ────────────────────────────────────────────────────────

/// Duration in seconds. Always >= 0.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
pub struct Seconds(pub f32);

impl Seconds {
    pub fn new(v: f32) -> Self {
        Self(v.max(0.0))
    }

    /// Decrement by dt, clamped to 0.
    pub fn dec(self, dt: f32) -> Self {
        Self((self.0 - dt).max(0.0))
    }

    pub fn is_expired(self) -> bool {
        self.0 <= 0.0
    }
}

/// Multiplier value. Clamped to [0, MAX].
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct Multiplier(pub f32);

impl Multiplier {
    pub const MAX: f32 = 10.0;

    pub fn new(v: f32) -> Self {
        debug_assert!(v.is_finite(), "Multiplier must be finite");
        Self(v.clamp(0.0, Self::MAX))
    }

    pub fn one() -> Self {
        Self(1.0)
    }
}

impl Default for Multiplier {
    fn default() -> Self {
        Self(1.0)
    }
}

impl Mul for Multiplier {
    type Output = Self;
    fn mul(self, rhs: Self) -> Self {
        Self::new(self.0 * rhs.0)
    }
}

/// Horizontal facing sign: +1 faces right, -1 faces left.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FacingSign(pub i8);

impl FacingSign {
    pub const RIGHT: Self = Self(1);
    pub const LEFT: Self = Self(-1);

    pub fn new(v: i8) -> Self {
        debug_assert!(v == 1 || v == -1, "FacingSign must be +1 or -1");
        Self(v)
    }

    /// Mirror a local-space vector's x by this facing.
    pub fn mirror_x(self, v: Vec2) -> Vec2 {
        Vec2::new(v.x * self.0 as f32, v.y)
    }

    pub fn flipped(self) -> Self {
        Self(-self.0)
    }
}

impl Default for FacingSign {
    fn default() -> Self {
        Self::RIGHT
    }
}

/// Player slot in a two-fighter match (0 or 1).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub struct PlayerIndex(pub usize);

impl PlayerIndex {
    pub fn new(v: usize) -> Self {
        debug_assert!(v < 2, "PlayerIndex must be 0 or 1");
        Self(v)
    }

    pub fn opponent(self) -> Self {
        Self(1 - self.0)
    }
}

// ── Enums ───────────────────────────────────────────────────────────

/// Which arena boundary a fighter crossed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BlastZoneType {
    Top,
    Bottom,
    Left,
    Right,
}
