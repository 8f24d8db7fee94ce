use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

use ns_conditions::{init_telemetry, ReconcilePass, ReconcilerConfig};

#[derive(Parser)]
#[command(name = "ns-conditions")]
#[command(about = "Reconcile namespace deletion status conditions")]
#[command(long_about = "Replays one namespace deletion pass: the errors reported by discovery, \
                       group-version parsing and content deletion are folded into the namespace's \
                       current status conditions, and the status to write back is printed.")]
struct Cli {
    /// Configuration file (defaults to ns-conditions.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a reconciliation pass from a JSON pass document
    Reconcile {
        /// Pass document with the current status and reported errors
        #[arg(long, short = 'i')]
        input: PathBuf,
        /// Write the outcome here instead of stdout
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,
    },
    /// Print the effective configuration as TOML
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    ReconcilerConfig::load_env_file()?;
    let config = ReconcilerConfig::load(cli.config.as_deref())
        .context("Failed to load configuration")?;
    init_telemetry(&config.observability)?;

    match cli.command {
        Commands::Reconcile { input, output } => reconcile_command(&config, &input, output),
        Commands::Config => {
            print!("{}", config.to_toml()?);
            Ok(())
        }
    }
}

fn reconcile_command(
    config: &ReconcilerConfig,
    input: &Path,
    output: Option<PathBuf>,
) -> Result<()> {
    let pass = ReconcilePass::load(input)?;
    let outcome = pass.run();
    let json = outcome.to_json(config.output.pretty)?;

    match output {
        Some(path) => {
            std::fs::write(&path, json + "\n")
                .with_context(|| format!("Failed to write {}", path.display()))?;
            tracing::info!(path = %path.display(), changed = outcome.changed, "pass outcome written");
        }
        None => println!("{json}"),
    }
    Ok(())
}
