pub mod demo_plugin;
pub mod game_plugin;
pub mod storage_plugin;
