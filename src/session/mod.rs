//! Stateful chat sessions built on top of [`Runner`].

mod history;
mod manager;

pub use history::History;
pub use manager::SessionManager;

use crate::agent::Agent;
use crate::error::Result;
use crate::runner::{RunConfig, Runner};
use crate::types::Message;

/// One agent plus the transcript accumulated against it.
///
/// History only advances on success: a failed turn surfaces its error and
/// leaves the transcript exactly as it was, so the caller can retry the
/// same input or move on.
#[derive(Debug, Clone)]
pub struct ChatSession {
    agent: Agent,
    config: RunConfig,
    history: History,
}

impl ChatSession {
    pub fn new(agent: Agent, config: RunConfig) -> Self {
        Self {
            agent,
            config,
            history: History::new(),
        }
    }

    /// Send one user turn and return the assistant's reply.
    pub async fn send(&mut self, text: impl Into<String>) -> Result<String> {
        let mut pending = self.history.messages().to_vec();
        pending.push(Message::user(text));

        let result = Runner::run(&self.agent, &pending, &self.config).await?;
        self.history = History::from_messages(result.to_history());
        Ok(result.final_output)
    }

    pub fn agent(&self) -> &Agent {
        &self.agent
    }

    pub fn config(&self) -> &RunConfig {
        &self.config
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    /// Forget the transcript but keep the agent.
    pub fn clear(&mut self) {
        self.history.clear();
    }

    /// Swap in a different agent while keeping the transcript.
    pub fn replace_agent(&mut self, agent: Agent) {
        self.agent = agent;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TernError;
    use crate::model::CompletionModel;
    use crate::types::Role;
    use async_trait::async_trait;
    use std::collections::VecDeque;
    use std::sync::{Arc, Mutex};

    struct ScriptedModel {
        replies: Mutex<VecDeque<Result<String>>>,
    }

    impl ScriptedModel {
        fn new(replies: Vec<Result<String>>) -> Arc<Self> {
            Arc::new(Self {
                replies: Mutex::new(replies.into()),
            })
        }
    }

    #[async_trait]
    impl CompletionModel for ScriptedModel {
        fn model_id(&self) -> &str {
            "scripted"
        }

        async fn complete(&self, _messages: &[Message]) -> Result<String> {
            self.replies
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Ok("out of script".to_string()))
        }
    }

    fn session_with(replies: Vec<Result<String>>) -> ChatSession {
        let agent = Agent::new("session", "be helpful", ScriptedModel::new(replies));
        ChatSession::new(agent, RunConfig::new().with_tracing_disabled(true))
    }

    #[tokio::test]
    async fn send_records_user_and_assistant_turns() {
        let mut session = session_with(vec![Ok("hello there".to_string())]);

        let reply = session.send("hi").await.unwrap();

        assert_eq!(reply, "hello there");
        let messages = session.history().messages();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, Role::User);
        assert_eq!(messages[0].content, "hi");
        assert_eq!(messages[1].role, Role::Assistant);
        assert_eq!(messages[1].content, "hello there");
    }

    #[tokio::test]
    async fn failed_send_leaves_history_untouched() {
        let mut session = session_with(vec![
            Ok("first".to_string()),
            Err(TernError::api(500, "upstream down")),
        ]);

        session.send("one").await.unwrap();
        assert_eq!(session.history().len(), 2);

        let err = session.send("two").await.unwrap_err();
        assert!(matches!(err, TernError::Api { status: 500, .. }));
        assert_eq!(session.history().len(), 2);
        assert_eq!(session.history().messages()[0].content, "one");
    }

    #[tokio::test]
    async fn replace_agent_preserves_history() {
        let mut session = session_with(vec![Ok("before".to_string())]);
        session.send("start").await.unwrap();

        let replacement = Agent::new(
            "other",
            "be terse",
            ScriptedModel::new(vec![Ok("after".to_string())]),
        );
        session.replace_agent(replacement);

        assert_eq!(session.agent().name(), "other");
        assert_eq!(session.history().len(), 2);

        let reply = session.send("again").await.unwrap();
        assert_eq!(reply, "after");
        assert_eq!(session.history().len(), 4);
    }

    #[tokio::test]
    async fn manager_keeps_sessions_isolated() {
        let mut manager = SessionManager::new();

        manager
            .get_or_create_with("alpha", || session_with(vec![Ok("a".to_string())]))
            .send("to alpha")
            .await
            .unwrap();

        let beta = manager.get_or_create_with("beta", || session_with(vec![]));
        assert!(beta.history().is_empty());

        assert_eq!(manager.get("alpha").unwrap().history().len(), 2);
        assert_eq!(manager.len(), 2);

        manager.remove("alpha");
        assert!(manager.get("alpha").is_none());
        assert_eq!(manager.session_ids(), vec!["beta"]);
    }
}
