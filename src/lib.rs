//! Combat-resolution core for a local two-player brawler: a hit becomes
//! damage, knockback scaled by accumulated damage, hitstun, a global
//! hitstop, and eventually a blast-zone knockout, all coordinated on one
//! fixed-step clock.

use std::time::Duration;

use bevy::prelude::*;
use bevy::state::app::StatesPlugin;
use bevy::time::TimeUpdateStrategy;

pub mod config;
pub mod game;
pub mod plugins;
pub mod storage;

use config::tuning::Tuning;
use plugins::game_plugin::GamePlugin;

/// Build a windowless app running the full simulation on a manual clock:
/// every `App::update` advances real time by exactly one `dt`, so the
/// match plays out deterministically as fast as the loop spins. Used by
/// the demo binary and the integration tests.
pub fn create_headless_app(tuning: Tuning) -> App {
    let step = Duration::from_secs_f32(tuning.dt.max(1e-4));

    let mut app = App::new();
    app.add_plugins((MinimalPlugins, StatesPlugin))
        .insert_resource(Time::<Fixed>::from_duration(step))
        .insert_resource(TimeUpdateStrategy::ManualDuration(step))
        .insert_resource(tuning)
        .add_plugins(GamePlugin);
    app
}
