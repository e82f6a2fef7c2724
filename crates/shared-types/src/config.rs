use serde::{Deserialize, Serialize};

/// Which LLM backend the analysis and generation screens talk to.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "snake_case")]
pub enum LlmProvider {
    #[default]
    #[serde(rename = "openai")]
    OpenAi,
    Anthropic,
    Local,
}

impl LlmProvider {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OpenAi => "openai",
            Self::Anthropic => "anthropic",
            Self::Local => "local",
        }
    }

    /// Model used when the settings form leaves the model blank.
    pub fn default_model(&self) -> &'static str {
        match self {
            Self::OpenAi => "gpt-4o",
            Self::Anthropic => "claude-3-5-sonnet",
            Self::Local => "llama3",
        }
    }

    /// Hosted providers need an API key; a local model does not.
    pub fn requires_api_key(&self) -> bool {
        match self {
            Self::OpenAi | Self::Anthropic => true,
            Self::Local => false,
        }
    }
}

/// LLM provider settings. Replaced wholesale by the settings panel.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct LlmConfig {
    #[serde(default)]
    pub provider: LlmProvider,
    #[serde(default)]
    pub model: String,
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default)]
    pub base_url: Option<String>,
    #[serde(default = "default_temperature")]
    pub temperature: f32,
}

fn default_temperature() -> f32 {
    0.2
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: LlmProvider::default(),
            model: String::new(),
            api_key: None,
            base_url: None,
            temperature: default_temperature(),
        }
    }
}

impl LlmConfig {
    /// The configured model, or the provider default when blank.
    pub fn effective_model(&self) -> &str {
        if self.model.trim().is_empty() {
            self.provider.default_model()
        } else {
            &self.model
        }
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.as_deref().is_some_and(|k| !k.trim().is_empty())
    }
}

/// Settings response shape: never echoes the API key back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct LlmConfigResponse {
    pub provider: LlmProvider,
    pub model: String,
    pub has_api_key: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    pub temperature: f32,
}

impl From<LlmConfig> for LlmConfigResponse {
    fn from(c: LlmConfig) -> Self {
        Self {
            provider: c.provider,
            model: c.effective_model().to_string(),
            has_api_key: c.has_api_key(),
            base_url: c.base_url,
            temperature: c.temperature,
        }
    }
}

/// OAuth client credentials for the Google document/sheet integration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct GoogleCredentials {
    pub client_id: String,
    pub client_secret: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
}

/// Settings response shape for Google credentials.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct GoogleCredentialsResponse {
    pub configured: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_id: Option<String>,
    pub connected: bool,
}

impl From<Option<GoogleCredentials>> for GoogleCredentialsResponse {
    fn from(creds: Option<GoogleCredentials>) -> Self {
        match creds {
            Some(c) => Self {
                configured: true,
                connected: c.refresh_token.is_some(),
                client_id: Some(c.client_id),
            },
            None => Self {
                configured: false,
                client_id: None,
                connected: false,
            },
        }
    }
}

// ── config.toml ─────────────────────────────────────────────────────

/// `[server]` table.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ServerConfig {
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,
}

fn default_bind_addr() -> String {
    "127.0.0.1:8080".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
        }
    }
}

/// `[providers]` table: knobs for the simulated collaborators.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProviderConfig {
    /// Fixed delay each mock provider call sleeps for.
    #[serde(default = "default_latency_ms")]
    pub latency_ms: u64,
}

fn default_latency_ms() -> u64 {
    1500
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            latency_ms: default_latency_ms(),
        }
    }
}

/// Top-level config file structure matching `config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub providers: ProviderConfig,
    #[serde(default)]
    pub llm: LlmConfig,
    #[serde(default)]
    pub seed_demo_data: bool,
}
