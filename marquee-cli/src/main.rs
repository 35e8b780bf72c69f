//! Marquee CLI - Command-line interface
//!
//! Provides command-line access to Marquee movie search.

mod commands;

use clap::Parser;
use marquee_core::tracing_setup::{self, CliLogLevel};

#[derive(Parser)]
#[command(name = "marquee")]
#[command(about = "A movie metadata search client")]
struct Cli {
    /// Console log verbosity
    #[arg(long, value_enum, default_value_t = CliLogLevel::Warn, global = true)]
    log_level: CliLogLevel,

    #[command(subcommand)]
    command: commands::Commands,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    tracing_setup::init_tracing(cli.log_level.as_tracing_level(), None)
        .map_err(|e| anyhow::anyhow!("failed to initialize tracing: {e}"))?;

    commands::handle_command(cli.command).await?;

    Ok(())
}
