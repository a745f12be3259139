//! barcast CLI — serve the batch pipeline over stdin or replay files.
//!
//! Commands:
//! - `serve` — read one JSON batch per stdin line until EOF
//! - `process` — run the same loop over one or more files of JSON lines
//!
//! Results go to stdout; `{"error": ..}` / `{"warning": ..}` objects go to stderr.

use anyhow::{Context, Result};
use barcast_core::Pipeline;
use barcast_runner::{open_store, serve, ServeConfig, ServeSummary};
use clap::{Args, Parser, Subcommand};
use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "barcast",
    about = "barcast CLI — indicator signals and windowed price predictions for bar batches"
)]
struct Cli {
    /// Log filter (e.g. `info`, `barcast_core=debug`). Defaults to RUST_LOG, else off.
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Process batches from stdin until EOF.
    Serve {
        #[command(flatten)]
        opts: RunOpts,
    },
    /// Process batches from files of JSON lines, in order.
    Process {
        /// Input files, one JSON batch per line.
        #[arg(required = true)]
        files: Vec<PathBuf>,

        #[command(flatten)]
        opts: RunOpts,
    },
}

#[derive(Args)]
struct RunOpts {
    /// Path to a TOML serve config.
    #[arg(long)]
    config: Option<PathBuf>,

    /// SQLite database path (overrides the config file).
    #[arg(long)]
    db: Option<PathBuf>,

    /// Keep trades in memory for this run only.
    #[arg(long, default_value_t = false)]
    no_persist: bool,

    /// Fit training windows in parallel.
    #[arg(long, default_value_t = false)]
    parallel: bool,
}

impl RunOpts {
    fn load(&self) -> Result<ServeConfig> {
        let mut config = match &self.config {
            Some(path) => ServeConfig::from_file(path)
                .with_context(|| format!("loading config {}", path.display()))?,
            None => ServeConfig::default(),
        };
        if let Some(db) = &self.db {
            config.database = db.clone();
        }
        if self.no_persist {
            config.persist = false;
        }
        if self.parallel {
            config.pipeline.parallel_windows = true;
        }
        Ok(config)
    }
}

fn init_tracing(level: Option<&str>) {
    let filter = match level {
        Some(level) => EnvFilter::new(level),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("off")),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_level.as_deref());

    match cli.command {
        Commands::Serve { opts } => {
            let config = opts.load()?;
            let (pipeline, mut store) = setup(&config)?;
            let stdin = io::stdin();
            let summary = serve(&pipeline, &mut *store, stdin.lock(), io::stdout(), io::stderr())?;
            log_summary("stdin", summary);
        }
        Commands::Process { files, opts } => {
            let config = opts.load()?;
            let (pipeline, mut store) = setup(&config)?;
            for path in &files {
                let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
                let summary = serve(
                    &pipeline,
                    &mut *store,
                    BufReader::new(file),
                    io::stdout(),
                    io::stderr(),
                )
                .with_context(|| format!("processing {}", path.display()))?;
                log_summary(&path.display().to_string(), summary);
            }
        }
    }

    Ok(())
}

fn setup(config: &ServeConfig) -> Result<(Pipeline, Box<dyn barcast_core::store::TradeStore>)> {
    let pipeline = Pipeline::new(config.pipeline.clone()).context("invalid pipeline config")?;
    let store = open_store(config)
        .with_context(|| format!("opening trade store {}", config.database.display()))?;
    info!(
        database = %config.database.display(),
        persist = config.persist,
        parallel = config.pipeline.parallel_windows,
        "pipeline ready"
    );
    Ok((pipeline, store))
}

fn log_summary(source: &str, summary: ServeSummary) {
    info!(
        source,
        batches = summary.batches,
        processed = summary.processed,
        failed = summary.failed,
        warnings = summary.warnings,
        "source finished"
    );
}
