//! Agents: a fixed system instruction bound to a completion model.

use std::fmt;
use std::sync::Arc;

use tracing::debug;

use crate::error::Result;
use crate::model::CompletionModel;
use crate::types::Message;

/// A named system instruction paired with the model that answers under it.
///
/// Immutable after construction; one instance per session. The instruction
/// is injected fresh on every run and never stored in the history.
#[derive(Clone)]
pub struct Agent {
    name: String,
    instructions: String,
    model: Arc<dyn CompletionModel>,
}

impl Agent {
    pub fn new(
        name: impl Into<String>,
        instructions: impl Into<String>,
        model: Arc<dyn CompletionModel>,
    ) -> Self {
        Self {
            name: name.into(),
            instructions: instructions.into(),
            model,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn instructions(&self) -> &str {
        &self.instructions
    }

    pub fn model(&self) -> &Arc<dyn CompletionModel> {
        &self.model
    }

    /// Produce the next reply for `history`.
    ///
    /// Sends `[system(instructions)]` followed by `history` in its original
    /// order and returns the model's text unmodified. An empty history is
    /// valid: the request then carries only the instruction.
    pub async fn run(&self, history: &[Message]) -> Result<String> {
        self.run_with(self.model.as_ref(), history).await
    }

    /// Like [`Agent::run`] but against an explicit model (run-config override).
    pub(crate) async fn run_with(
        &self,
        model: &dyn CompletionModel,
        history: &[Message],
    ) -> Result<String> {
        let messages = self.request_messages(history);
        debug!(agent = %self.name, model = model.model_id(), turns = history.len(), "agent run");
        model.complete(&messages).await
    }

    fn request_messages(&self, history: &[Message]) -> Vec<Message> {
        let mut messages = Vec::with_capacity(history.len() + 1);
        messages.push(Message::system(self.instructions.clone()));
        messages.extend_from_slice(history);
        messages
    }
}

impl fmt::Debug for Agent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Agent")
            .field("name", &self.name)
            .field("instructions", &self.instructions)
            .field("model", &self.model.model_id())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Role;
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct EchoModel {
        seen: Mutex<Vec<Vec<Message>>>,
    }

    impl EchoModel {
        fn new() -> Arc<Self> {
            Arc::new(Self {
                seen: Mutex::new(Vec::new()),
            })
        }

        fn last_request(&self) -> Vec<Message> {
            self.seen.lock().unwrap().last().cloned().unwrap()
        }
    }

    #[async_trait]
    impl CompletionModel for EchoModel {
        fn model_id(&self) -> &str {
            "echo"
        }

        async fn complete(&self, messages: &[Message]) -> Result<String> {
            self.seen.lock().unwrap().push(messages.to_vec());
            Ok("echoed".to_string())
        }
    }

    #[tokio::test]
    async fn prepends_fresh_instruction_to_history() {
        let model = EchoModel::new();
        let agent = Agent::new("helper", "be brief", model.clone() as Arc<dyn CompletionModel>);

        let history = vec![Message::user("one"), Message::assistant("two")];
        let reply = agent.run(&history).await.unwrap();
        assert_eq!(reply, "echoed");

        let request = model.last_request();
        assert_eq!(request.len(), 3);
        assert_eq!(request[0].role, Role::System);
        assert_eq!(request[0].content, "be brief");
        assert_eq!(request[1].content, "one");
        assert_eq!(request[2].content, "two");
    }

    #[tokio::test]
    async fn empty_history_sends_instruction_only() {
        let model = EchoModel::new();
        let agent = Agent::new("helper", "be brief", model.clone() as Arc<dyn CompletionModel>);

        agent.run(&[]).await.unwrap();

        let request = model.last_request();
        assert_eq!(request.len(), 1);
        assert_eq!(request[0].role, Role::System);
    }

    #[tokio::test]
    async fn instruction_is_never_duplicated_across_runs() {
        let model = EchoModel::new();
        let agent = Agent::new("helper", "stay calm", model.clone() as Arc<dyn CompletionModel>);

        let first = vec![Message::user("a")];
        agent.run(&first).await.unwrap();

        let second = vec![
            Message::user("a"),
            Message::assistant("b"),
            Message::user("c"),
        ];
        agent.run(&second).await.unwrap();

        let request = model.last_request();
        let system_count = request
            .iter()
            .filter(|m| m.role == Role::System)
            .count();
        assert_eq!(system_count, 1);
        assert_eq!(request[0].content, "stay calm");
        assert_eq!(request.len(), 4);
    }
}
