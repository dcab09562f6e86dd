use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use blockflow_core::config::RunnerConfig;
use blockflow_core::interpreter::{register_default_handlers, Interpreter, Outcome};

#[derive(Parser)]
#[command(name = "blockflow")]
#[command(about = "Block-program execution engine", long_about = None)]
struct Cli {
    /// Path to a TOML config file
    #[arg(long)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load a block program and trigger its entrances
    Run {
        /// Program JSON file (overrides config)
        #[arg(long)]
        program: Option<String>,

        /// Entrance type to trigger (repeatable; default: every entrance
        /// the document registers)
        #[arg(long)]
        entrance: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = RunnerConfig::load(cli.config.as_deref())?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_new(&config.log_filter).context("Invalid log filter")?,
        )
        .init();

    match cli.command {
        Commands::Run { program, entrance } => run(config, program, entrance).await,
    }
}

async fn run(
    config: RunnerConfig,
    program: Option<String>,
    entrance: Vec<String>,
) -> anyhow::Result<()> {
    let program = program
        .or(config.program)
        .context("No program file given (--program or config)")?;

    let interp = Interpreter::new();
    register_default_handlers(&interp);

    if let Outcome::Fault(err) = interp.load_file(&program).await? {
        anyhow::bail!("Failed to load program: {err}");
    }

    let mut entrances = if entrance.is_empty() {
        config.entrances
    } else {
        entrance
    };
    if entrances.is_empty() {
        entrances = interp.entrance_names();
    }
    if entrances.is_empty() {
        anyhow::bail!("Program registered no entrances and none were requested");
    }

    for name in entrances {
        match interp.trigger_entrance(&name).await {
            Outcome::Fault(err) => anyhow::bail!("Entrance `{name}` failed: {err}"),
            outcome => tracing::info!(entrance = %name, outcome = ?outcome, "entrance finished"),
        }
    }

    Ok(())
}
