use std::sync::Arc;

use crate::config::{parse_llm_provider_model, LlmConfig};
use crate::error::{JourneyError, Result};
use crate::llm::api::LlmApiClient;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LlmBackend {
    OpenAI,
    OpenRouter,
    Ollama,
    LmStudio,
    OpenAICompatible { base_url: String },
    Unavailable { reason: String },
}

impl LlmBackend {
    /// Picks the backend from the `provider/model` prefix. Unknown prefixes
    /// are usable only with an explicit base URL.
    fn detect(config: &LlmConfig) -> Self {
        let (provider, _) = parse_llm_provider_model(&config.model);

        match (provider.to_lowercase().as_str(), &config.base_url) {
            ("openai", _) => Self::OpenAI,
            ("openrouter", _) => Self::OpenRouter,
            ("ollama", _) => Self::Ollama,
            ("lmstudio", _) => Self::LmStudio,
            (_, Some(base_url)) => Self::OpenAICompatible {
                base_url: base_url.clone(),
            },
            (_, None) => Self::Unavailable {
                reason: format!("Unknown provider in model: {}", config.model),
            },
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::OpenAI => "openai",
            Self::OpenRouter => "openrouter",
            Self::Ollama => "ollama",
            Self::LmStudio => "lmstudio",
            Self::OpenAICompatible { .. } => "openai-compatible",
            Self::Unavailable { .. } => "unavailable",
        }
    }
}

/// Sampling knobs forwarded with each completion request.
#[derive(Debug, Clone, Default)]
pub struct CompletionOptions {
    pub temperature: Option<f32>,
    pub max_tokens: Option<u32>,
}

/// Handle to the external text-generation service. Cheap to clone; holds no
/// connection, a client is built per request.
#[derive(Debug, Clone)]
pub struct LlmProvider {
    backend: LlmBackend,
    config: Option<Arc<LlmConfig>>,
}

impl LlmProvider {
    pub fn new(config: &LlmConfig) -> Self {
        Self {
            backend: LlmBackend::detect(config),
            config: Some(Arc::new(config.clone())),
        }
    }

    pub fn unavailable(reason: &str) -> Self {
        Self {
            backend: LlmBackend::Unavailable {
                reason: reason.to_string(),
            },
            config: None,
        }
    }

    pub fn is_available(&self) -> bool {
        !matches!(self.backend, LlmBackend::Unavailable { .. })
    }

    pub fn backend(&self) -> &LlmBackend {
        &self.backend
    }

    pub fn config(&self) -> Option<&LlmConfig> {
        self.config.as_deref()
    }

    /// One request, one answer. Credential problems surface as
    /// `MissingCredential`; every transport or payload problem as `UpstreamFailure`.
    pub async fn complete(
        &self,
        prompt: &str,
        options: Option<&CompletionOptions>,
    ) -> Result<String> {
        let config = match (&self.backend, self.config()) {
            (LlmBackend::Unavailable { reason }, _) => {
                return Err(JourneyError::LlmUnavailable(reason.clone()))
            }
            (_, Some(config)) => config,
            (_, None) => {
                return Err(JourneyError::LlmUnavailable(
                    "No LLM configuration".to_string(),
                ))
            }
        };

        LlmApiClient::new(config)?.complete(prompt, options).await
    }
}
