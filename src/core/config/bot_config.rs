use thiserror::Error;

/// Model used when `GEMINI_MODEL` is not set.
pub const DEFAULT_MODEL: &str = "gemini-1.5-flash";

/// Persona prepended to every model invocation. Overridable with
/// `GEMINI_SYSTEM_PROMPT` for servers that want a different voice.
pub const DEFAULT_SYSTEM_PROMPT: &str = "\
You are a Discord bot that helps server members with programming, design \
feedback, and general questions. When reviewing a design, inspect it closely \
and give at least four tips, three mistakes, or four improvements. Stay \
focused and don't pad your answers beyond what was asked.";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    MissingVar(&'static str),
}

/// Everything the bot needs from the environment, resolved once at startup.
#[derive(Debug, Clone)]
pub struct BotConfig {
    pub discord_token: String,
    pub gemini_api_key: String,
    pub model: String,
    pub system_prompt: String,
}

impl BotConfig {
    /// Reads the configuration from the process environment.
    ///
    /// `DISCORD_TOKEN` and `GEMINI_API_KEY` are required; a missing one is
    /// fatal and must be reported before any network connection is opened.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            discord_token: require("DISCORD_TOKEN")?,
            gemini_api_key: require("GEMINI_API_KEY")?,
            model: std::env::var("GEMINI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string()),
            system_prompt: std::env::var("GEMINI_SYSTEM_PROMPT")
                .unwrap_or_else(|_| DEFAULT_SYSTEM_PROMPT.to_string()),
        })
    }
}

fn require(name: &'static str) -> Result<String, ConfigError> {
    std::env::var(name).map_err(|_| ConfigError::MissingVar(name))
}
