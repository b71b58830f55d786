//! CLI entrypoint for agent-foreman
//!
//! This is the main binary that wires together all layers using
//! dependency injection: the figment config loader, the tokio-backed
//! jittered pacer, and the lifecycle observers feed the planner use case.

mod output;

use anyhow::{Result, bail};
use clap::{Parser, ValueEnum};
use foreman_application::{ConfigPatch, ProcessInput, RunPlannerUseCase};
use foreman_domain::SessionContext;
use foreman_infrastructure::{
    CompositeObserver, ConfigLoader, JitteredThinkingPacer, JsonlLifecycleLogger,
    TracingLifecycleObserver,
};
use std::path::PathBuf;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// Human-readable summary
    Text,
    /// Full result record as pretty-printed JSON
    Json,
}

/// Bounded heuristic planner: turns an instruction into an ordered,
/// validated, confidence-scored list of candidate actions.
#[derive(Debug, Parser)]
#[command(name = "agent-foreman", version)]
struct Cli {
    /// The instruction to plan for
    instruction: Option<String>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Effort level: low, medium, high, maximum
    #[arg(long)]
    effort: Option<String>,

    /// Override the effort-derived iteration bound
    #[arg(long)]
    max_iterations: Option<u32>,

    /// Disable the reflection phase
    #[arg(long)]
    no_reflection: bool,

    /// Disable the planning phase (direct action generation)
    #[arg(long)]
    no_planning: bool,

    /// Working directory recorded in the session context
    #[arg(long)]
    working_dir: Option<String>,

    /// Known file in the session context (repeatable)
    #[arg(long = "context-file")]
    context_files: Vec<String>,

    /// Explicit config file path
    #[arg(long)]
    config: Option<PathBuf>,

    /// Ignore config files and use built-in defaults
    #[arg(long)]
    no_config: bool,

    /// Output format
    #[arg(long, value_enum, default_value = "text")]
    output: OutputFormat,

    /// JSONL lifecycle log path (overrides the config file)
    #[arg(long)]
    log_file: Option<String>,

    /// Print config file locations and exit
    #[arg(long)]
    show_config_sources: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity level
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    if cli.show_config_sources {
        ConfigLoader::print_config_sources();
        return Ok(());
    }

    let instruction = match &cli.instruction {
        Some(instruction) => instruction.clone(),
        None => bail!("An instruction is required. See --help for usage."),
    };

    // === Configuration: file sources, then CLI overrides ===
    let file_config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref()).map_err(|e| anyhow::anyhow!(e))?
    };
    let mut config = file_config.to_planner_config()?;

    let mut patch = ConfigPatch::new();
    if let Some(effort) = &cli.effort {
        patch = patch.with_effort(effort);
    }
    if let Some(max_iterations) = cli.max_iterations {
        patch = patch.with_max_iterations(max_iterations);
    }
    if cli.no_reflection {
        patch = patch.with_reflection(false);
    }
    if cli.no_planning {
        patch = patch.with_planning(false);
    }
    config.apply(&patch);
    debug!(?config, "resolved planner configuration");

    // === Dependency Injection ===
    let planner = RunPlannerUseCase::new(Arc::new(JitteredThinkingPacer::new()))
        .with_config(config);

    // Ctrl-C cancels the in-flight session cooperatively
    let token = CancellationToken::new();
    let planner = planner.with_cancellation(token.clone());
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("interrupt received; cancelling session");
            token.cancel();
        }
    });

    // Lifecycle observers: tracing always, JSONL when configured
    let mut observer = CompositeObserver::new().with(Box::new(TracingLifecycleObserver));
    let log_file = cli
        .log_file
        .clone()
        .or(file_config.logging.lifecycle_log.clone());
    if let Some(path) = log_file
        && let Some(logger) = JsonlLifecycleLogger::new(&path)
    {
        observer = observer.with(Box::new(logger));
    }

    // === Session context ===
    let mut context = SessionContext::new();
    if let Some(dir) = &cli.working_dir {
        context = context.with_working_directory(dir);
    }
    for file in &cli.context_files {
        context.add_file(file);
    }

    let input = ProcessInput::new(instruction).with_context(context);
    let result = planner.execute_with_observer(input, &observer).await?;

    let rendered = match cli.output {
        OutputFormat::Text => output::render_text(&result),
        OutputFormat::Json => serde_json::to_string_pretty(&result)?,
    };
    println!("{}", rendered);

    Ok(())
}
