// The core module contains all business logic.
// Each feature gets its own submodule.

#[path = "ai/mod.rs"]
pub mod ai;

#[path = "config/bot_config.rs"]
pub mod config;

#[path = "rooms/room_registry.rs"]
pub mod rooms;
