//! Completion model trait and the chat-completions implementation.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::client::{ChatCompletion, CompletionsClient};
use crate::error::{Result, TernError};
use crate::types::{CompletionSettings, Message};

/// Uniform "messages → text" operation over a specific remote model.
///
/// Object-safe so agents can hold `Arc<dyn CompletionModel>` and tests can
/// substitute a canned implementation for the network-backed one.
#[async_trait]
pub trait CompletionModel: Send + Sync {
    /// The model identifier requests are issued under.
    fn model_id(&self) -> &str;

    /// Complete the conversation, returning the next assistant text.
    async fn complete(&self, messages: &[Message]) -> Result<String>;
}

/// A fixed model identifier bound to an OpenAI-compatible client.
pub struct ChatCompletionsModel {
    model_id: String,
    client: Arc<CompletionsClient>,
    settings: CompletionSettings,
}

impl ChatCompletionsModel {
    pub fn new(model_id: impl Into<String>, client: Arc<CompletionsClient>) -> Self {
        Self {
            model_id: model_id.into(),
            client,
            settings: CompletionSettings::default(),
        }
    }

    /// Set the settings forwarded with every request.
    pub fn with_settings(mut self, settings: CompletionSettings) -> Self {
        self.settings = settings;
        self
    }
}

#[async_trait]
impl CompletionModel for ChatCompletionsModel {
    fn model_id(&self) -> &str {
        &self.model_id
    }

    async fn complete(&self, messages: &[Message]) -> Result<String> {
        let response = self
            .client
            .chat_completions(&self.model_id, messages, &self.settings)
            .await?;

        if let Some(usage) = &response.usage {
            debug!(
                model = %self.model_id,
                prompt_tokens = usage.prompt_tokens,
                completion_tokens = usage.completion_tokens,
                finish_reason = ?response.finish_reason(),
                "completion finished"
            );
        }

        extract_text(response)
    }
}

/// Pull the first candidate's text out of a raw response.
fn extract_text(response: ChatCompletion) -> Result<String> {
    let choice = response
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| TernError::MalformedResponse("response contained no choices".into()))?;

    choice
        .message
        .content
        .ok_or_else(|| TernError::MalformedResponse("first choice has no message content".into()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn completion_from(raw: &str) -> ChatCompletion {
        serde_json::from_str(raw).unwrap()
    }

    #[test]
    fn extracts_first_choice_text() {
        let response = completion_from(
            r#"{"choices": [
                {"message": {"content": "first"}},
                {"message": {"content": "second"}}
            ]}"#,
        );
        assert_eq!(extract_text(response).unwrap(), "first");
    }

    #[test]
    fn empty_choices_is_malformed() {
        let response = completion_from(r#"{"choices": []}"#);
        let err = extract_text(response).unwrap_err();
        assert!(matches!(err, TernError::MalformedResponse(m) if m.contains("no choices")));
    }

    #[test]
    fn missing_content_is_malformed() {
        let response = completion_from(r#"{"choices": [{"message": {}}]}"#);
        let err = extract_text(response).unwrap_err();
        assert!(matches!(err, TernError::MalformedResponse(m) if m.contains("content")));
    }
}
