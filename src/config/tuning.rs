use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// All tunable game parameters, loaded from tuning.ron.
#[derive(Debug, Clone, Resource, Serialize, Deserialize)]
pub struct Tuning {
    pub dt: f32,
    /// Hitstop length used when a trigger supplies no duration.
    pub hitstop_default: f32,
    /// Global scale applied to every hitstop duration.
    pub hitstop_multiplier: f32,
    pub min_hitstun: f32,
    pub max_hitstun: f32,
    /// Seconds of hitstun per unit of final knockback force.
    pub hitstun_per_force: f32,
    /// Global scale applied to every knockback force.
    pub base_knockback_multiplier: f32,
    /// Knockback multiplier growth per point of accumulated damage.
    pub knockback_per_damage: f32,
    /// Multiplier override while a timed-out round runs in sudden death.
    pub sudden_death_knockback_mult: f32,
    pub gravity: f32,
    /// Horizontal speed bleed per second while standing on the platform.
    pub ground_friction: f32,
    pub floor_y: f32,
    pub floor_half_width: f32,
    /// Blast zones sit just past these extents on each side.
    pub blast_half_width: f32,
    pub blast_half_height: f32,
    pub spawn_offset_x: f32,
    pub spawn_y: f32,
    pub fighter_radius: f32,
    pub rounds_to_win: u32,
    pub round_start_delay: f32,
    pub round_end_delay: f32,
    /// Round time limit in seconds. 0 = untimed.
    pub match_time_limit: f32,
    pub respawn_invincibility: f32,
    pub enable_sudden_death: bool,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            dt: 1.0 / 60.0,
            hitstop_default: 0.05,
            hitstop_multiplier: 1.0,
            min_hitstun: 0.1,
            max_hitstun: 1.5,
            hitstun_per_force: 0.01,
            base_knockback_multiplier: 1.0,
            knockback_per_damage: 0.01,
            sudden_death_knockback_mult: 8.0,
            gravity: 28.0,
            ground_friction: 6.0,
            floor_y: 0.0,
            floor_half_width: 7.0,
            blast_half_width: 14.0,
            blast_half_height: 9.0,
            spawn_offset_x: 3.5,
            spawn_y: 0.0,
            fighter_radius: 0.5,
            rounds_to_win: 2,
            round_start_delay: 2.0,
            round_end_delay: 1.5,
            match_time_limit: 0.0,
            respawn_invincibility: 2.0,
            enable_sudden_death: true,
        }
    }
}

impl Tuning {
    /// Get the data directory for tuning files.
    pub fn data_dir() -> PathBuf {
        let base = dirs::data_dir().unwrap_or_else(|| PathBuf::from("."));
        base.join("neon_brawl")
    }

    /// Path to the tuning file.
    pub fn file_path() -> PathBuf {
        Self::data_dir().join("tuning.ron")
    }

    /// Load from file, or create default if not found.
    pub fn load_or_default() -> Self {
        let path = Self::file_path();
        if path.exists() {
            match std::fs::read_to_string(&path) {
                Ok(contents) => match ron::from_str(&contents) {
                    Ok(tuning) => return tuning,
                    Err(e) => {
                        warn!("Failed to parse tuning.ron: {e}, using defaults");
                    }
                },
                Err(e) => {
                    warn!("Failed to read tuning.ron: {e}, using defaults");
                }
            }
        }
        let tuning = Self::default();
        tuning.save();
        tuning
    }

    /// Save current tuning to file.
    pub fn save(&self) {
        let path = Self::file_path();
        if let Some(parent) = path.parent() {
            let _ = std::fs::create_dir_all(parent);
        }
        let pretty = ron::ser::PrettyConfig::default();
        match ron::ser::to_string_pretty(self, pretty) {
            Ok(s) => {
                if let Err(e) = std::fs::write(&path, s) {
                    warn!("Failed to write tuning.ron: {e}");
                }
            }
            Err(e) => {
                warn!("Failed to serialize tuning: {e}");
            }
        }
    }

    /// Reload from file.
    pub fn reload(&mut self) {
        *self = Self::load_or_default();
        info!("Tuning reloaded");
    }
}
