//! Command-line host for the context-prepending chat participant.
//!
//! Run with: cargo run -p copilot-context-chat -- "How should I name this?"
//!
//! The context source comes from `--context-source`, else from a settings
//! file given with `--settings`, else the default `~/.copilot.md`.

mod echo;

use std::{io::Write as _, path::PathBuf, sync::Arc, time::Duration};

use anyhow::Context as _;
use clap::Parser;
use copilot_context_core::{
    Configuration, JsonConfiguration, ModelRegistry, PrependerSettings, Transcript,
};
use copilot_context_dispatch::{ChatRequest, HandleOutcome, activate};
use copilot_context_resolver::HomeEnv;
use futures::StreamExt;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::echo::EchoModel;

#[derive(Debug, Parser)]
#[command(name = "copilot-context-chat", version, about)]
struct Cli {
    /// Editor settings JSON to read `copilotContextPrepender.contextSource` from.
    #[arg(long)]
    settings: Option<PathBuf>,

    /// File path or URL of the custom instructions (overrides --settings).
    #[arg(long, env = "COPILOT_CONTEXT_SOURCE")]
    context_source: Option<String>,

    /// Register no model, to see the unavailable-model reply.
    #[arg(long)]
    no_model: bool,

    /// Delay between echoed words, in milliseconds.
    #[arg(long, default_value_t = 15)]
    delay_ms: u64,

    /// The chat prompt.
    prompt: String,
}

fn load_config(cli: &Cli) -> anyhow::Result<Arc<dyn Configuration>> {
    if let Some(source) = &cli.context_source {
        return Ok(Arc::new(PrependerSettings::new(source.clone())));
    }
    let Some(path) = &cli.settings else {
        return Ok(Arc::new(JsonConfiguration::default()));
    };
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read settings file {}", path.display()))?;
    let config = JsonConfiguration::parse(&raw)
        .with_context(|| format!("Invalid settings JSON in {}", path.display()))?;
    Ok(Arc::new(config))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let cli = Cli::parse();
    let config = load_config(&cli)?;

    let mut registry = ModelRegistry::new();
    if !cli.no_model {
        registry = registry.register(EchoModel::new(Duration::from_millis(cli.delay_ms)));
    }
    tracing::debug!(models = ?registry.list_models(), "Model catalog ready");

    let participant = activate(config, Arc::new(registry), HomeEnv::from_process());

    let token = CancellationToken::new();
    let ctrl_c = token.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("Cancellation requested");
            ctrl_c.cancel();
        }
    });

    let transcript = Arc::new(Transcript::new());
    let mut output = transcript.markdown_stream();
    let printer = tokio::spawn(async move {
        let mut stdout = std::io::stdout();
        while let Some(fragment) = output.next().await {
            write!(stdout, "{fragment}")?;
            stdout.flush()?;
        }
        writeln!(stdout)
    });

    let outcome = participant
        .handle(&ChatRequest::new(cli.prompt), &transcript, Arc::new(token))
        .await;
    transcript.push_finished();
    printer
        .await
        .context("Output printer panicked")?
        .context("Failed to write the reply to stdout")?;

    match outcome {
        HandleOutcome::Completed { fragments } => {
            tracing::info!(fragments, "Reply complete");
        }
        HandleOutcome::ModelUnavailable => tracing::warn!("No model was available"),
        HandleOutcome::Failed { phase, message } => {
            tracing::warn!(%phase, "Request failed: {message}");
        }
    }

    Ok(())
}
