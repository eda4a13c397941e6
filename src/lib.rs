//! Tern — minimal agent/runner chat core
//!
//! A small client for OpenAI-compatible chat-completion endpoints built
//! around three pieces: an [`agent::Agent`] (instruction + model), the
//! [`runner::Runner`] that executes single turns over an explicit history,
//! and a [`session::ChatSession`] that accumulates the transcript for you.
//!
//! # Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//! use tern::prelude::*;
//!
//! # async fn example() -> tern::error::Result<()> {
//! let config = TernConfig::from_env();
//! let client = Arc::new(CompletionsClient::from_config(&config)?);
//! let model = Arc::new(ChatCompletionsModel::new(config.model(), client));
//!
//! let agent = Agent::new("assistant", "You are a helpful assistant.", model);
//! let result = Runner::run(&agent, &[Message::user("Hello!")], &RunConfig::new()).await?;
//! println!("{}", result.final_output);
//! # Ok(())
//! # }
//! ```

pub mod agent;
pub mod client;
pub mod config;
pub mod error;
pub mod model;
pub mod prelude;
pub mod runner;
pub mod session;
pub mod types;
pub mod util;

#[cfg(feature = "cli")]
pub mod cli;
