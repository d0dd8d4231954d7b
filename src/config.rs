// Startup configuration, read once from the environment.
//
// Missing credentials are fatal: `main` bails out with the error text before
// any connection is attempted.

use crate::infra::ai::DEFAULT_GROQ_URL;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_MODEL: &str = "llama-3.1-8b-instant";
pub const DEFAULT_SYSTEM_PROMPT: &str = "You are a friendly, knowledgeable AI assistant.";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{0} environment variable is not set")]
    Missing(&'static str),

    #[error("{name} has an invalid value {value:?}")]
    Invalid { name: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct BotConfig {
    pub discord_token: String,
    pub groq_api_key: String,
    pub groq_url: String,
    pub model: String,
    pub system_prompt: String,
    pub request_timeout: Duration,
    pub temperature: Option<f32>,
    pub max_tokens: Option<u32>,
}

impl BotConfig {
    /// Load from the process environment (after `.env`, if present).
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load from any key/value source. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        // TOKEN is what older deployments of this bot used.
        let discord_token = get("DISCORD_TOKEN")
            .or_else(|| get("TOKEN"))
            .ok_or(ConfigError::Missing("DISCORD_TOKEN"))?;
        let groq_api_key = get("GROQ_API_KEY").ok_or(ConfigError::Missing("GROQ_API_KEY"))?;

        let system_prompt = match get("GROQ_SYSTEM_PROMPT_FILE") {
            Some(path) => std::fs::read_to_string(&path).unwrap_or_else(|e| {
                tracing::warn!("Failed to read system prompt file at {}: {}", path, e);
                DEFAULT_SYSTEM_PROMPT.to_string()
            }),
            None => get("GROQ_SYSTEM_PROMPT").unwrap_or_else(|| DEFAULT_SYSTEM_PROMPT.to_string()),
        };

        let timeout_secs =
            parse_optional(&get, "GROQ_TIMEOUT_SECS")?.unwrap_or(DEFAULT_TIMEOUT_SECS);
        // A zero timeout makes reqwest fail every request
        if timeout_secs == 0 {
            return Err(ConfigError::Invalid {
                name: "GROQ_TIMEOUT_SECS",
                value: timeout_secs.to_string(),
            });
        }

        Ok(Self {
            discord_token,
            groq_api_key,
            groq_url: get("GROQ_API_URL").unwrap_or_else(|| DEFAULT_GROQ_URL.to_string()),
            model: get("GROQ_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            system_prompt,
            request_timeout: Duration::from_secs(timeout_secs),
            temperature: parse_optional(&get, "GROQ_TEMPERATURE")?,
            max_tokens: parse_optional(&get, "GROQ_MAX_TOKENS")?,
        })
    }
}

fn parse_optional<T, G>(get: &G, name: &'static str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    G: Fn(&str) -> Option<String>,
{
    match get(name) {
        Some(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::Invalid { name, value }),
        None => Ok(None),
    }
}
