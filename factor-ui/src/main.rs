use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use tracing::debug;

use factor_ui::config::Settings;
use factor_ui::{logging, oneshot, panel, prompt};

// ─── CLI definition ──────────────────────────────────────────────────────────

/// Engineering-economics factor calculator.
///
/// With no EXPR, starts an interactive session. With EXPR, evaluates one
/// factor call such as `A_P(2.5%, 10)` and exits.
#[derive(Debug, Parser)]
#[command(name = "factor-calc", version)]
struct Cli {
    /// Start the full-screen panel instead of the line prompt.
    #[arg(long)]
    panel: bool,

    /// Configuration file.
    /// Defaults to `<config dir>/factor-calc/config.toml` when it exists.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Log filter: error, warn, info, debug, trace, or an EnvFilter directive.
    /// Takes precedence over RUST_LOG and the configuration file.
    #[arg(long, value_name = "LVL")]
    log_level: Option<String>,

    /// Append log records to this file.
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Factor call to evaluate, e.g. `A_P(2.5%, 10)`. Words are joined with
    /// spaces.
    #[arg(value_name = "EXPR", allow_hyphen_values = true)]
    expr: Vec<String>,
}

// ─── entry point ─────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    let level_from_cli = cli.log_level.is_some();

    let settings = Settings::load_or_default(cli.config.as_deref())
        .context("cannot load configuration")?
        .with_overrides(cli.log_level, cli.log_file);

    logging::init_logging();
    if level_from_cli || std::env::var_os("RUST_LOG").is_none() {
        logging::set_log_level(&settings.logging.level)?;
    }
    if let Some(path) = &settings.logging.file {
        logging::enable_file_logging(path)?;
    }
    debug!(?settings, "configuration loaded");

    if !cli.expr.is_empty() {
        return Ok(oneshot::run(&cli.expr));
    }

    if cli.panel {
        panel::run(&settings.panel)?;
    } else {
        prompt::run(&settings.display)?;
    }
    Ok(ExitCode::SUCCESS)
}
