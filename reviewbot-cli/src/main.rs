//! Reviewbot CLI - request reviewers on pull requests targeting a branch
//!
//! Runs as a GitHub Action step. Inputs come from `INPUT_*` variables or the
//! matching flags.

mod assign;
mod logging;

use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use assign::AssignArgs;
use logging::ActionsFormat;

/// Request reviewers on pull requests that target a configured branch
#[derive(Parser, Debug)]
#[command(name = "reviewbot")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable debug output
    #[arg(
        short,
        long,
        env = "RUNNER_DEBUG",
        value_parser = clap::builder::FalseyValueParser::new()
    )]
    verbose: bool,

    #[command(flatten)]
    assign: AssignArgs,
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    init_tracing(cli.verbose)?;

    let outcome = cli.assign.execute().await;
    tracing::debug!(?outcome, "Reviewer assignment finished");

    if outcome.is_failure() {
        Ok(ExitCode::FAILURE)
    } else {
        Ok(ExitCode::SUCCESS)
    }
}

/// Initialize tracing
///
/// `RUST_LOG` wins when set; otherwise debug mode of the runner selects the level.
fn init_tracing(verbose: bool) -> anyhow::Result<()> {
    let filter = match std::env::var(EnvFilter::DEFAULT_ENV) {
        Ok(directives) if !directives.is_empty() => {
            EnvFilter::try_new(&directives).with_context(|| format!("Invalid log filter '{}'", directives))?
        }
        _ if verbose => EnvFilter::new("debug"),
        _ => EnvFilter::new("info"),
    };

    tracing_subscriber::registry()
        .with(fmt::layer().event_format(ActionsFormat))
        .with(filter)
        .try_init()
        .context("Failed to initialize tracing")?;

    Ok(())
}
