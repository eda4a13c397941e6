//! Tern CLI binary entry point.

use std::sync::Arc;

use clap::Parser;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

use tern::agent::Agent;
use tern::cli::Cli;
use tern::client::CompletionsClient;
use tern::config::TernConfig;
use tern::model::ChatCompletionsModel;
use tern::runner::RunConfig;
use tern::session::ChatSession;
use tern::types::CompletionSettings;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = TernConfig::from_env();
    if let Some(url) = &cli.base_url {
        config = config.with_base_url(url.clone());
    }
    if let Some(model) = &cli.model {
        config = config.with_model(model.clone());
    }

    let client = Arc::new(CompletionsClient::from_config(&config)?);

    let mut settings = CompletionSettings::default();
    settings.temperature = cli.temperature;
    settings.max_tokens = cli.max_tokens;

    let model = Arc::new(
        ChatCompletionsModel::new(config.model(), client.clone()).with_settings(settings.clone()),
    );
    let agent = Agent::new("assistant", cli.instructions.clone(), model);

    let run_config = RunConfig::new()
        .with_model_provider(client)
        .with_tracing_disabled(cli.no_trace);
    let mut session = ChatSession::new(agent, run_config);

    match cli.prompt {
        Some(prompt) => {
            let reply = session.send(prompt).await?;
            println!("{reply}");
            Ok(())
        }
        None => repl(session, settings).await,
    }
}

async fn repl(
    mut session: ChatSession,
    settings: CompletionSettings,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut rl = DefaultEditor::new()?;

    println!(
        "tern — interactive chat (model: {})",
        session.agent().model().model_id()
    );
    println!("Commands: /model <id>, /clear, exit");
    println!();

    loop {
        match rl.readline("> ") {
            Ok(line) => {
                let trimmed = line.trim();

                if trimmed.is_empty() {
                    continue;
                }
                if trimmed == "exit" || trimmed == "quit" {
                    break;
                }

                let _ = rl.add_history_entry(&line);

                if let Some(rest) = trimmed.strip_prefix("/model") {
                    switch_model(&mut session, rest.trim(), &settings);
                    continue;
                }
                if trimmed == "/clear" {
                    session.clear();
                    println!("history cleared");
                    continue;
                }

                // A failed turn leaves the session usable for the next one.
                match session.send(trimmed).await {
                    Ok(reply) => println!("{reply}\n"),
                    Err(e) => eprintln!("Error: {e}"),
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("Type 'exit' to quit.");
            }
            Err(ReadlineError::Eof) => break,
            Err(err) => return Err(err.into()),
        }
    }

    Ok(())
}

fn switch_model(session: &mut ChatSession, model_id: &str, settings: &CompletionSettings) {
    if model_id.is_empty() {
        println!("current model: {}", session.agent().model().model_id());
        return;
    }

    let Some(client) = session.config().model_provider().cloned() else {
        eprintln!("no model provider available to switch with");
        return;
    };

    let model = Arc::new(
        ChatCompletionsModel::new(model_id, client).with_settings(settings.clone()),
    );
    let agent = Agent::new(
        session.agent().name(),
        session.agent().instructions(),
        model,
    );
    session.replace_agent(agent);
    println!("switched to {model_id}");
}
