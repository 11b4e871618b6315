use serde::Deserialize;
use std::env;
use std::path::PathBuf;

fn parse_env_or<T: std::str::FromStr>(var: &str, default: T) -> T
where
    T::Err: std::fmt::Display,
{
    match env::var(var) {
        Ok(val) => match val.parse() {
            Ok(parsed) => parsed,
            Err(e) => {
                tracing::warn!("Invalid value '{}' for {}: {}. Using default.", val, var, e);
                default
            }
        },
        Err(_) => default,
    }
}

fn parse_env_opt<T: std::str::FromStr>(var: &str) -> Option<T>
where
    T::Err: std::fmt::Display,
{
    match env::var(var) {
        Ok(val) => match val.parse() {
            Ok(parsed) => Some(parsed),
            Err(e) => {
                tracing::warn!("Invalid value '{}' for {}: {}. Ignoring.", val, var, e);
                None
            }
        },
        Err(_) => None,
    }
}

fn non_empty_env(var: &str) -> Option<String> {
    env::var(var).ok().filter(|value| !value.trim().is_empty())
}

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub records: RecordsConfig,
    pub assistant: AssistantConfig,
    pub llm: LlmConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RecordsConfig {
    /// JSON record document; the embedded demo record is used when unset.
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AssistantConfig {
    pub name: String,
    pub max_sessions: usize,
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            name: "Aura".to_string(),
            max_sessions: 1000,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LlmConfig {
    pub model: String,
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    /// Transport timeout. `None` waits for the generation service indefinitely.
    pub timeout_secs: Option<u64>,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            model: "openai/gpt-4o-mini".to_string(),
            api_key: None,
            base_url: None,
            timeout_secs: None,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        let assistant = AssistantConfig::default();
        let llm = LlmConfig::default();

        Self {
            server: ServerConfig {
                host: env::var("JOURNEY_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
                port: parse_env_or("JOURNEY_PORT", 3000),
            },
            records: RecordsConfig {
                path: non_empty_env("JOURNEY_RECORD_PATH").map(PathBuf::from),
            },
            assistant: AssistantConfig {
                name: non_empty_env("ASSISTANT_NAME").unwrap_or(assistant.name),
                max_sessions: parse_env_or("ASSISTANT_MAX_SESSIONS", assistant.max_sessions)
                    .max(1),
            },
            llm: LlmConfig {
                model: non_empty_env("LLM_MODEL").unwrap_or(llm.model),
                api_key: non_empty_env("LLM_API_KEY"),
                base_url: non_empty_env("LLM_BASE_URL"),
                timeout_secs: parse_env_opt("LLM_TIMEOUT"),
            },
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::default()
    }
}

/// Known LLM providers that use OpenAI-compatible APIs
pub const KNOWN_LLM_PROVIDERS: &[&str] = &["openai", "openrouter", "ollama", "lmstudio"];

/// Parse an LLM model name into (provider, model) tuple.
pub fn parse_llm_provider_model(model: &str) -> (&str, &str) {
    if let Some((prefix, rest)) = model.split_once('/') {
        let prefix_lower = prefix.to_lowercase();
        if KNOWN_LLM_PROVIDERS.contains(&prefix_lower.as_str()) {
            return (prefix, rest);
        }
    }
    // Default to treating the whole string as a local model
    ("local", model)
}
