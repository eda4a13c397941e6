//! Turn orchestration: drive an agent over a history and collect the result.

use std::fmt;
use std::sync::Arc;

use tracing::{info_span, Instrument};
use uuid::Uuid;

use crate::agent::Agent;
use crate::client::CompletionsClient;
use crate::error::{Result, TernError};
use crate::model::CompletionModel;
use crate::types::Message;

/// Per-run knobs threaded through [`Runner::run`].
///
/// `model` overrides the agent's own model for this run only. The
/// `model_provider` handle is not consulted by the runner itself; it rides
/// along so callers that own the run loop can mint replacement models
/// without re-reading credentials.
#[derive(Clone, Default)]
pub struct RunConfig {
    model: Option<Arc<dyn CompletionModel>>,
    model_provider: Option<Arc<CompletionsClient>>,
    tracing_disabled: bool,
}

impl RunConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_model(mut self, model: Arc<dyn CompletionModel>) -> Self {
        self.model = Some(model);
        self
    }

    pub fn with_model_provider(mut self, provider: Arc<CompletionsClient>) -> Self {
        self.model_provider = Some(provider);
        self
    }

    pub fn with_tracing_disabled(mut self, disabled: bool) -> Self {
        self.tracing_disabled = disabled;
        self
    }

    pub fn model(&self) -> Option<&Arc<dyn CompletionModel>> {
        self.model.as_ref()
    }

    pub fn model_provider(&self) -> Option<&Arc<CompletionsClient>> {
        self.model_provider.as_ref()
    }

    pub fn tracing_disabled(&self) -> bool {
        self.tracing_disabled
    }
}

impl fmt::Debug for RunConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RunConfig")
            .field("model", &self.model.as_ref().map(|m| m.model_id().to_string()))
            .field("model_provider", &self.model_provider.is_some())
            .field("tracing_disabled", &self.tracing_disabled)
            .finish()
    }
}

/// Outcome of a single successful run.
#[derive(Debug, Clone)]
pub struct RunResult {
    /// The assistant text produced by this run.
    pub final_output: String,
    /// Identifier stamped on the run's tracing span.
    pub run_id: Uuid,
    history: Vec<Message>,
}

impl RunResult {
    /// The full transcript after this run: the input history plus exactly
    /// one new assistant message. Feed it back in as the next run's input.
    pub fn to_history(&self) -> Vec<Message> {
        self.history.clone()
    }
}

/// Stateless entry point for executing agent turns.
pub struct Runner;

impl Runner {
    /// Run one turn: ask `agent` (or `config`'s override model) for a reply
    /// to `history` and return the extended transcript.
    ///
    /// The input slice is never mutated. On error nothing is appended and
    /// the failure is returned as-is.
    pub async fn run(agent: &Agent, history: &[Message], config: &RunConfig) -> Result<RunResult> {
        let run_id = Uuid::new_v4();
        if config.tracing_disabled {
            Self::execute(agent, history, config, run_id).await
        } else {
            let span = info_span!("agent_run", agent = %agent.name(), run_id = %run_id);
            Self::execute(agent, history, config, run_id)
                .instrument(span)
                .await
        }
    }

    /// Blocking wrapper around [`Runner::run`] for synchronous callers.
    ///
    /// Spins up a current-thread runtime per call. Must not be invoked from
    /// inside an async runtime; use [`Runner::run`] there instead.
    pub fn run_sync(agent: &Agent, history: &[Message], config: &RunConfig) -> Result<RunResult> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| {
                TernError::Configuration(format!("failed to start blocking runtime: {e}"))
            })?;
        runtime.block_on(Self::run(agent, history, config))
    }

    async fn execute(
        agent: &Agent,
        history: &[Message],
        config: &RunConfig,
        run_id: Uuid,
    ) -> Result<RunResult> {
        let final_output = match &config.model {
            Some(model) => agent.run_with(model.as_ref(), history).await?,
            None => agent.run(history).await?,
        };

        let mut transcript = Vec::with_capacity(history.len() + 1);
        transcript.extend_from_slice(history);
        transcript.push(Message::assistant(final_output.clone()));

        Ok(RunResult {
            final_output,
            run_id,
            history: transcript,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TernError;
    use crate::types::Role;
    use async_trait::async_trait;

    struct FixedModel {
        id: &'static str,
        reply: std::result::Result<&'static str, u16>,
    }

    #[async_trait]
    impl CompletionModel for FixedModel {
        fn model_id(&self) -> &str {
            self.id
        }

        async fn complete(&self, _messages: &[Message]) -> Result<String> {
            match self.reply {
                Ok(text) => Ok(text.to_string()),
                Err(status) => Err(TernError::api(status, "boom")),
            }
        }
    }

    fn agent_with(reply: std::result::Result<&'static str, u16>) -> Agent {
        Agent::new(
            "unit",
            "testing",
            Arc::new(FixedModel { id: "fixed", reply }),
        )
    }

    #[tokio::test]
    async fn appends_exactly_one_assistant_message() {
        let agent = agent_with(Ok("four"));
        let history = vec![Message::user("2+2?")];

        let result = Runner::run(&agent, &history, &RunConfig::new()).await.unwrap();

        assert_eq!(result.final_output, "four");
        let transcript = result.to_history();
        assert_eq!(transcript.len(), 2);
        assert_eq!(transcript[1].role, Role::Assistant);
        assert_eq!(transcript[1].content, "four");
        assert_eq!(history.len(), 1);
    }

    #[tokio::test]
    async fn failure_surfaces_error_and_appends_nothing() {
        let agent = agent_with(Err(500));
        let history = vec![Message::user("hi")];

        let err = Runner::run(&agent, &history, &RunConfig::new())
            .await
            .unwrap_err();

        assert!(matches!(err, TernError::Api { status: 500, .. }));
        assert_eq!(history.len(), 1);
    }

    #[tokio::test]
    async fn config_model_takes_precedence() {
        let agent = agent_with(Ok("from agent"));
        let override_model: Arc<dyn CompletionModel> = Arc::new(FixedModel {
            id: "override",
            reply: Ok("from override"),
        });
        let config = RunConfig::new().with_model(override_model);

        let result = Runner::run(&agent, &[], &config).await.unwrap();
        assert_eq!(result.final_output, "from override");
    }

    #[test]
    fn run_sync_executes_without_ambient_runtime() {
        let agent = agent_with(Ok("sync"));
        let result = Runner::run_sync(&agent, &[], &RunConfig::new()).unwrap();
        assert_eq!(result.final_output, "sync");
        assert_eq!(result.to_history().len(), 1);
    }
}
