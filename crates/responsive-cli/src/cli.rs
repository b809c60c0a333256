//! Command-line parsing and dispatch for the responsive probe tool.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use responsive_telemetry::{LogFormat, LoggingConfig, TelemetryError, init_logging};

use crate::commands::breakpoints::handle_breakpoints;
use crate::commands::probe::handle_probe;
use crate::commands::replay::handle_replay;
use crate::context::{CliResult, load_config};

const DEFAULT_LOG_LEVEL: &str = "warn";
const DEFAULT_HEIGHT: u32 = 800;

/// Parses CLI arguments, executes the requested command, and returns the
/// process exit code.
pub async fn run() -> i32 {
    let cli = Cli::parse();
    let logging = LoggingConfig {
        level: &cli.log_level,
        format: cli.log_format,
        ..LoggingConfig::default()
    };
    if let Err(err) = init_logging(&logging) {
        eprintln!("warning: {err}");
    }

    match dispatch(cli).await {
        Ok(()) => 0,
        Err(err) => {
            eprintln!("error: {}", err.display_message());
            err.exit_code()
        }
    }
}

async fn dispatch(cli: Cli) -> CliResult<()> {
    let config = load_config(cli.config.as_deref())?;
    tracing::debug!(
        debounce_ms = config.debounce_ms,
        namespace = %config.default_namespace,
        "configuration loaded"
    );
    match cli.command {
        Command::Probe(args) => handle_probe(args, &config, cli.output),
        Command::Replay(args) => handle_replay(args, &config, cli.output).await,
        Command::Breakpoints => handle_breakpoints(cli.output),
    }
}

#[derive(Parser)]
#[command(
    name = "responsive",
    about = "Evaluate media-query width listeners and replay resize traces"
)]
pub(crate) struct Cli {
    #[arg(long, global = true, env = "RESPONSIVE_CONFIG")]
    config: Option<PathBuf>,
    #[arg(
        long = "output",
        alias = "format",
        global = true,
        value_enum,
        default_value_t = OutputFormat::Table,
        help = "Select output format for command results"
    )]
    output: OutputFormat,
    #[arg(
        long,
        global = true,
        env = "RESPONSIVE_LOG_LEVEL",
        default_value = DEFAULT_LOG_LEVEL
    )]
    log_level: String,
    #[arg(
        long,
        global = true,
        env = "RESPONSIVE_LOG_FORMAT",
        default_value = "auto",
        value_parser = parse_log_format
    )]
    log_format: LogFormat,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Check which queries match a viewport size.
    Probe(ProbeArgs),
    /// Replay a timed resize trace through the debounced dispatcher.
    Replay(ReplayArgs),
    /// List the built-in breakpoint presets.
    Breakpoints,
}

#[derive(Args, Debug)]
pub(crate) struct ProbeArgs {
    /// Media query to evaluate; repeat for several.
    #[arg(long = "query", short = 'q', required = true)]
    pub(crate) queries: Vec<String>,
    /// Viewport width in pixels.
    #[arg(long)]
    pub(crate) width: u32,
    /// Viewport height in pixels.
    #[arg(long, default_value_t = DEFAULT_HEIGHT)]
    pub(crate) height: u32,
    /// Reject queries without a width feature or with inverted bounds.
    #[arg(long)]
    pub(crate) strict: bool,
}

#[derive(Args, Debug)]
pub(crate) struct ReplayArgs {
    /// Media query to bind; repeat for several.
    #[arg(long = "query", short = 'q', required = true)]
    pub(crate) queries: Vec<String>,
    /// Comma separated `WIDTH[xHEIGHT]@MILLIS` steps, e.g. `320@0,480x900@40`.
    #[arg(long)]
    pub(crate) trace: String,
    /// Override the configured debounce delay.
    #[arg(long)]
    pub(crate) debounce_ms: Option<u32>,
    /// Height used for steps that omit one.
    #[arg(long, default_value_t = DEFAULT_HEIGHT)]
    pub(crate) height: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    Table,
    Json,
}

fn parse_log_format(value: &str) -> Result<LogFormat, String> {
    value
        .parse()
        .map_err(|err: TelemetryError| format!("{err}: {value}"))
}
