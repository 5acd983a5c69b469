use bevy::prelude::*;

use super::types::Multiplier;

/// Accumulated damage for one fighter.
///
/// Damage never depletes to a knockout; it only raises the knockback
/// multiplier, so heavily damaged fighters fly further and the knockout
/// itself always comes from a blast zone.
#[derive(Component, Debug, Default)]
pub struct FighterHealth {
    pub damage_taken: f32,
}

impl FighterHealth {
    pub fn take_damage(&mut self, amount: f32) {
        self.damage_taken += amount.max(0.0);
    }

    /// 1.0 at zero damage, growing linearly with the ledger.
    pub fn knockback_multiplier(&self, per_damage: f32) -> Multiplier {
        Multiplier::new(1.0 + self.damage_taken * per_damage.max(0.0))
    }

    pub fn reset(&mut self) {
        self.damage_taken = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn multiplier_is_one_at_zero_damage() {
        let health = FighterHealth::default();
        assert_eq!(health.knockback_multiplier(0.01), Multiplier::one());
    }

    #[test]
    fn multiplier_grows_with_damage() {
        let mut health = FighterHealth::default();
        health.take_damage(20.0);
        assert_eq!(health.knockback_multiplier(0.01).0, 1.2);
    }

    #[test]
    fn negative_damage_is_ignored() {
        let mut health = FighterHealth::default();
        health.take_damage(-5.0);
        assert_eq!(health.damage_taken, 0.0);
    }

    #[test]
    fn reset_clears_the_ledger() {
        let mut health = FighterHealth::default();
        health.take_damage(42.0);
        health.reset();
        assert_eq!(health.damage_taken, 0.0);
    }
}
