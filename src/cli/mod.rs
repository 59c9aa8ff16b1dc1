//! Command-line interface for codebase-context

use anyhow::Result;
use clap::Parser;
use tracing::Level;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod generate;

use crate::interrupt::Interrupt;

/// Generate intelligent codebase context for LLMs
#[derive(Parser)]
#[command(name = "codebase-context")]
#[command(author, version, about, long_about = None)]
#[command(after_help = "Examples:
  codebase-context                                    # Scan current directory
  codebase-context /path/to/project                   # Scan specific directory
  codebase-context -o output.txt --max-tokens 50000   # Custom settings
  codebase-context -e .py .js -p main.py utils.py     # Filter files and prioritize")]
pub struct Cli {
    #[command(flatten)]
    args: generate::GenerateArgs,

    /// Enable verbose logging (sets log level to DEBUG)
    #[arg(short, long, global = true)]
    verbose: bool,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    // RUST_LOG in the environment always takes precedence; --verbose falls back to DEBUG.
    let filter = if cli.verbose {
        EnvFilter::from_default_env().add_directive(Level::DEBUG.into())
    } else {
        EnvFilter::from_default_env().add_directive(Level::WARN.into())
    };
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .try_init();

    let interrupt = Interrupt::install();
    generate::run(cli.args, &interrupt)
}
