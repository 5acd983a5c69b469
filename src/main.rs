use bevy::log::LogPlugin;
use bevy::prelude::*;

use neon_brawl::config::tuning::Tuning;
use neon_brawl::create_headless_app;
use neon_brawl::plugins::{demo_plugin::DemoPlugin, storage_plugin::StoragePlugin};

fn main() {
    let tuning = Tuning::load_or_default();

    let mut app = create_headless_app(tuning);
    app.add_plugins(LogPlugin::default())
        .add_plugins(StoragePlugin)
        .add_plugins(DemoPlugin)
        .run();
}
