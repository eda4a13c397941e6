//! Shared test helpers and mock completion model.

use std::sync::Mutex;

use async_trait::async_trait;

use tern::error::{Result, TernError};
use tern::model::CompletionModel;
use tern::types::Message;

/// A mock model that returns canned replies and records every request it sees.
pub struct MockModel {
    model_id: String,
    replies: Mutex<Vec<Result<String>>>,
    requests: Mutex<Vec<Vec<Message>>>,
}

impl MockModel {
    pub fn new(model_id: &str) -> Self {
        Self {
            model_id: model_id.to_string(),
            replies: Mutex::new(Vec::new()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Queue a successful reply.
    pub fn queue_reply(&self, text: &str) {
        self.replies.lock().unwrap().push(Ok(text.to_string()));
    }

    /// Queue a failure.
    pub fn queue_error(&self, error: TernError) {
        self.replies.lock().unwrap().push(Err(error));
    }

    /// Message sequences received so far, in call order.
    pub fn requests(&self) -> Vec<Vec<Message>> {
        self.requests.lock().unwrap().clone()
    }

    /// Number of calls made against this model.
    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl CompletionModel for MockModel {
    fn model_id(&self) -> &str {
        &self.model_id
    }

    async fn complete(&self, messages: &[Message]) -> Result<String> {
        self.requests.lock().unwrap().push(messages.to_vec());

        let mut replies = self.replies.lock().unwrap();
        if replies.is_empty() {
            return Ok("mock reply".to_string());
        }
        replies.remove(0)
    }
}
