//! Configuration from the environment (with `.env` support).

/// Model identifier used when none is configured.
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// Environment-backed configuration: API key, base URL, model identifier.
///
/// The key must be present before any run; the other two fall back to the
/// client's default endpoint and [`DEFAULT_MODEL`].
#[derive(Debug, Clone, Default)]
pub struct TernConfig {
    api_key: Option<String>,
    base_url: Option<String>,
    model: Option<String>,
}

impl TernConfig {
    /// Empty configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load from environment variables, reading `.env` first if present.
    ///
    /// The first variable found wins in each group.
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv(); // load .env if present, ignore error
        let mut config = Self::new();

        let key_vars = ["TERN_API_KEY", "OPENAI_API_KEY", "GEMINI_API_KEY"];
        for var in &key_vars {
            if let Ok(key) = std::env::var(var) {
                config.api_key = Some(key);
                break;
            }
        }

        let url_vars = ["TERN_BASE_URL", "OPENAI_BASE_URL"];
        for var in &url_vars {
            if let Ok(url) = std::env::var(var) {
                config.base_url = Some(url);
                break;
            }
        }

        if let Ok(model) = std::env::var("TERN_MODEL") {
            config.model = Some(model);
        }

        config
    }

    /// Override the API key.
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Override the base URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Override the model identifier.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref()
    }

    pub fn base_url(&self) -> Option<&str> {
        self.base_url.as_deref()
    }

    /// Configured model identifier, or [`DEFAULT_MODEL`].
    pub fn model(&self) -> &str {
        self.model.as_deref().unwrap_or(DEFAULT_MODEL)
    }

    /// Whether an API key is available.
    pub fn has_credentials(&self) -> bool {
        self.api_key.is_some()
    }
}
