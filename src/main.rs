use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use tracing::error;
use tracing_subscriber::EnvFilter;

use clockify_report::clockify::ClockifyClient;
use clockify_report::config::{Config, DEFAULT_CONFIG_FILE};
use clockify_report::dates::DayWindow;
use clockify_report::http::{ClientSettings, HttpClient};
use clockify_report::report::{DailyReport, build_report};

const LOG_ENV: &str = "CLOCKIFY_REPORT_LOG";

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Days relative to today, e.g. -1 for yesterday
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    day: i64,
    /// Path of the TOML config file
    #[arg(long, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,
    /// Workspace name, overrides `workspace.name`
    #[arg(long)]
    workspace: Option<String>,
    #[arg(short, long, conflicts_with = "quiet")]
    verbose: bool,
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(err) = init_tracing(cli.quiet, cli.verbose) {
        eprintln!("{err:#}");
        return ExitCode::FAILURE;
    }

    match run(cli) {
        Ok(report) => {
            print!("{report}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!("{err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<DailyReport> {
    let config = Config::load(&cli.config)?.with_workspace_override(cli.workspace);
    config.validate()?;

    let window = DayWindow::today(cli.day)?;
    let settings = ClientSettings::new(config.clockify.api_key.clone(), config.timeout());
    let http = HttpClient::new(&settings).context("failed to build HTTP client")?;
    let client = ClockifyClient::new(http, &config.clockify.url_base_endpoint);

    let report = build_report(&client, &config.workspace.name, &window)
        .with_context(|| format!("failed to build report for {}", window.label()))?;
    Ok(report)
}

fn init_tracing(quiet: bool, verbose: bool) -> anyhow::Result<()> {
    let level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "warn"
    };

    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|err| anyhow::anyhow!("failed to initialize tracing subscriber: {err}"))?;

    Ok(())
}
