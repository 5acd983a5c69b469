pub mod arena;
pub mod collision;
pub mod combat;
pub mod components;
pub mod events;
pub mod health;
pub mod match_flow;
pub mod physics;
pub mod types;
