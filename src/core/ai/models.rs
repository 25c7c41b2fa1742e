use serde::{Deserialize, Serialize};

/// A single message in a model conversation. Role is "system", "user" or
/// "assistant"; providers translate these to their own wire terminology.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AiMessage {
    pub role: String,
    pub content: String,
}

/// Generation parameters passed through to the provider on every call.
#[derive(Debug, Clone)]
pub struct AiConfig {
    pub model: String,
    pub temperature: f32,
    pub max_output_tokens: Option<u32>,
    pub top_p: Option<f32>,
}
