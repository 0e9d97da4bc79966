mod config;
mod report;

use anyhow::Context;
use clap::Parser;
use config::PuzzleFile;
use squares_core::pipeline::available_parallelism;
use squares_core::{Pipeline, PipelineConfig};
use std::io::{self, IsTerminal};
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

/// squares: search random letter grids for a square that holds every word.
#[derive(Parser, Debug)]
#[command(name = "squares", version, about)]
struct Cli {
    /// File containing details of the puzzle to run, in JSON format.
    #[arg(short = 'f', long, default_value = "input.json")]
    file: PathBuf,
    /// Test mode: inject a known-good square and slow the generators down.
    #[arg(short = 't', long = "test")]
    test: bool,
    /// Verbose logging.
    #[arg(short, long)]
    verbose: bool,
    /// Number of solvers. Default is twice the core count.
    #[arg(short = 's', long, default_value_t = 0)]
    solvers: usize,
    /// Number of grid makers. Default is the core count.
    #[arg(short = 'm', long, default_value_t = 0)]
    makers: usize,
    /// Pause before each generation cycle in test mode, in milliseconds.
    #[arg(long, default_value_t = 10_000)]
    delay_ms: u64,
    /// Print the result as JSON instead of a framed grid.
    #[arg(long)]
    json: bool,
}

impl Cli {
    fn pipeline_config(&self) -> PipelineConfig {
        let config = PipelineConfig::new(self.makers, self.solvers).with_self_test(self.test);
        if self.test {
            config.with_generator_delay(Duration::from_millis(self.delay_ms))
        } else {
            config
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(io::stderr)
        .init();

    tracing::info!("Running on a system with {} cores.", available_parallelism());

    let puzzle = PuzzleFile::load(&cli.file)?;
    let spec = puzzle
        .to_spec()
        .with_context(|| format!("invalid puzzle in {}", cli.file.display()))?;

    let outcome = Pipeline::new(spec, cli.pipeline_config()).run()?;

    let mut stdout = io::stdout().lock();
    if cli.json {
        report::write_json(&mut stdout, &outcome)?;
    } else {
        let color = stdout.is_terminal();
        report::write_outcome(&mut stdout, &outcome, color)?;
    }
    Ok(())
}
