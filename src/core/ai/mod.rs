pub mod formatting;
pub mod models;
pub mod relay_service;

pub use models::{AiConfig, AiMessage};
pub use relay_service::{AiProvider, RelayService};
