pub mod attack;
pub mod hitstop;
pub mod hurtbox;
pub mod knockback;
