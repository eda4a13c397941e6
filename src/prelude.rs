//! Convenience re-exports for common use.

pub use crate::agent::Agent;
pub use crate::client::CompletionsClient;
pub use crate::config::TernConfig;
pub use crate::error::{Result, TernError};
pub use crate::model::{ChatCompletionsModel, CompletionModel};
pub use crate::runner::{RunConfig, RunResult, Runner};
pub use crate::session::{ChatSession, History, SessionManager};
pub use crate::types::{CompletionSettings, FinishReason, Message, Role};
