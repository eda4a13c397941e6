//! HTTP client for OpenAI-compatible chat completion endpoints.

pub mod http;

use serde::Deserialize;
use tracing::debug;

use crate::config::TernConfig;
use crate::error::{Result, TernError};
use crate::types::{CompletionSettings, FinishReason, Message};
use crate::util::retry::RetryPolicy;

use http::{bearer_headers, shared_client};

/// Default endpoint when no base URL is configured.
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Client for a single OpenAI-schema-compatible provider.
///
/// Holds the API key and base URL; the model identifier travels with each
/// call, so one client serves any number of models on the same endpoint.
#[derive(Debug, Clone)]
pub struct CompletionsClient {
    api_key: String,
    base_url: String,
    retry_policy: RetryPolicy,
}

impl CompletionsClient {
    /// Create a client for `base_url`, defaulting to the OpenAI endpoint.
    pub fn new(api_key: impl Into<String>, base_url: Option<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            retry_policy: RetryPolicy::default(),
        }
    }

    /// Build a client from environment-backed configuration.
    pub fn from_config(config: &TernConfig) -> Result<Self> {
        let api_key = config
            .api_key()
            .ok_or_else(|| TernError::Configuration("missing API key".into()))?;
        Ok(Self::new(api_key, config.base_url().map(str::to_string)))
    }

    /// Install a retry policy. The default performs no retries.
    pub fn with_retry_policy(mut self, policy: RetryPolicy) -> Self {
        self.retry_policy = policy;
        self
    }

    /// The endpoint this client talks to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Perform one chat-completion call.
    ///
    /// `messages` must be non-empty; the caller assembles the full request
    /// sequence (system instruction first) before handing it over.
    pub async fn chat_completions(
        &self,
        model: &str,
        messages: &[Message],
        settings: &CompletionSettings,
    ) -> Result<ChatCompletion> {
        if messages.is_empty() {
            return Err(TernError::Configuration(
                "chat completion requires at least one message".into(),
            ));
        }

        let body = build_request_body(model, messages, settings);
        let url = format!("{}/chat/completions", self.base_url);

        debug!(model, count = messages.len(), "sending chat completion");

        self.retry_policy.execute(|| self.send(&url, &body)).await
    }

    async fn send(&self, url: &str, body: &serde_json::Value) -> Result<ChatCompletion> {
        let resp = shared_client()
            .post(url)
            .headers(bearer_headers(&self.api_key))
            .json(body)
            .send()
            .await?;

        let status = resp.status().as_u16();
        let text = resp.text().await?;
        if status != 200 {
            return Err(TernError::from_status(status, &text));
        }

        serde_json::from_str(&text).map_err(|e| {
            TernError::MalformedResponse(format!("undecodable completion payload: {e}"))
        })
    }
}

fn build_request_body(
    model: &str,
    messages: &[Message],
    settings: &CompletionSettings,
) -> serde_json::Value {
    let messages = messages.iter().map(message_to_wire).collect::<Vec<_>>();

    let mut body = serde_json::json!({
        "model": model,
        "messages": messages,
    });

    let obj = body.as_object_mut().unwrap();

    if let Some(max) = settings.max_tokens {
        obj.insert("max_tokens".into(), max.into());
    }
    if let Some(temp) = settings.temperature {
        obj.insert("temperature".into(), temp.into());
    }
    if let Some(top_p) = settings.top_p {
        obj.insert("top_p".into(), top_p.into());
    }
    if let Some(ref stops) = settings.stop_sequences {
        obj.insert("stop".into(), serde_json::json!(stops));
    }
    if let Some(pp) = settings.presence_penalty {
        obj.insert("presence_penalty".into(), pp.into());
    }
    if let Some(fp) = settings.frequency_penalty {
        obj.insert("frequency_penalty".into(), fp.into());
    }
    if let Some(seed) = settings.seed {
        obj.insert("seed".into(), seed.into());
    }
    if let Some(ref user) = settings.user {
        obj.insert("user".into(), user.clone().into());
    }

    body
}

fn message_to_wire(msg: &Message) -> serde_json::Value {
    match msg.name {
        Some(ref name) => serde_json::json!({
            "role": msg.role.as_str(),
            "content": msg.content,
            "name": name,
        }),
        None => serde_json::json!({
            "role": msg.role.as_str(),
            "content": msg.content,
        }),
    }
}

// Wire-format response types. Candidate extraction lives in the model layer.

/// Raw chat-completion response.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatCompletion {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub choices: Vec<ChatChoice>,
    #[serde(default)]
    pub usage: Option<TokenUsage>,
}

impl ChatCompletion {
    /// Parsed finish reason of the first candidate, if recognizable.
    pub fn finish_reason(&self) -> Option<FinishReason> {
        self.choices
            .first()
            .and_then(|c| c.finish_reason.as_deref())
            .and_then(|s| s.parse().ok())
    }
}

/// One candidate reply.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatChoice {
    pub message: ChoiceMessage,
    #[serde(default)]
    pub finish_reason: Option<String>,
}

/// The message inside a candidate.
#[derive(Debug, Clone, Deserialize)]
pub struct ChoiceMessage {
    #[serde(default)]
    pub content: Option<String>,
}

/// Token accounting reported by the endpoint.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct TokenUsage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}
