//! CLI argument surface for the `tern` binary.

use clap::Parser;

/// Tern chat CLI
#[derive(Parser, Debug)]
#[command(name = "tern", version, about = "Tern — chat against an OpenAI-compatible endpoint")]
pub struct Cli {
    /// Model ID (falls back to TERN_MODEL, then the built-in default)
    #[arg(short, long)]
    pub model: Option<String>,

    /// System instructions for the assistant
    #[arg(short, long, default_value = "You are a helpful assistant.")]
    pub instructions: String,

    /// Endpoint base URL (falls back to TERN_BASE_URL / OPENAI_BASE_URL)
    #[arg(long)]
    pub base_url: Option<String>,

    /// Temperature (0.0 - 2.0)
    #[arg(short, long)]
    pub temperature: Option<f64>,

    /// Max tokens per reply
    #[arg(long)]
    pub max_tokens: Option<u32>,

    /// Disable per-run tracing spans
    #[arg(long)]
    pub no_trace: bool,

    /// One-shot prompt; omit it to start an interactive session
    pub prompt: Option<String>,
}

impl Cli {
    /// Parse CLI arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
