// Discord layer - commands and event handlers.

#[path = "ai/mod.rs"]
pub mod ai;

#[path = "commands/command_catalog.rs"]
pub mod commands;

// Re-export command types for convenience
pub use commands::relay::{Context, Data, Error};
