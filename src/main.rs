//! floodfis - fuzzy flood risk assessment
//!
//! Command-line interface for the inference engine.

use std::path::PathBuf;
use std::process;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use tracing_subscriber::EnvFilter;

use floodfis::{
    assess, render, write_report, FloodConfig, FloodEngine, FloodError, LogLevel, Observation,
    OutputFormat, Preset,
};

#[derive(Parser)]
#[command(name = "floodfis")]
#[command(version)]
#[command(about = "Fuzzy flood risk and water depth assessment", long_about = None)]
struct Cli {
    /// Rainfall intensity in mm/h (nominal 0-300)
    #[arg(long, value_name = "MM_PER_H", allow_negative_numbers = true)]
    rainfall: Option<f64>,

    /// River water level in m (nominal 0-5)
    #[arg(long, value_name = "M", allow_negative_numbers = true)]
    water_level: Option<f64>,

    /// Rain duration in hours (nominal 0-24)
    #[arg(long, value_name = "H", allow_negative_numbers = true)]
    duration: Option<f64>,

    /// Use a canned input triple instead of explicit values
    #[arg(long, value_enum, conflicts_with_all = ["rainfall", "water_level", "duration"])]
    preset: Option<Preset>,

    /// Output format
    #[arg(short, long, value_enum)]
    format: Option<OutputFormat>,

    /// Write the report to a file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Include the aggregated output curves (JSON only)
    #[arg(long)]
    curves: bool,

    /// Clamp inputs to their nominal ranges before inference
    #[arg(long)]
    clamp: bool,

    /// Configuration file (skips the default search)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// More logging (-v crate debug, -vv everything)
    #[arg(short, long, action = ArgAction::Count, conflicts_with = "quiet")]
    verbose: u8,

    /// Errors only
    #[arg(short, long)]
    quiet: bool,

    /// Print the effective configuration as TOML and exit
    #[arg(long)]
    print_config: bool,

    /// Print a commented default configuration file and exit
    #[arg(long)]
    default_config: bool,
}

fn main() {
    if let Err(err) = run() {
        eprintln!("Error: {:#}", err);
        let status = err
            .downcast_ref::<FloodError>()
            .map(FloodError::exit_status)
            .unwrap_or(1);
        process::exit(status);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    if cli.default_config {
        print!("{}", FloodConfig::default_config_content());
        return Ok(());
    }

    let mut config = load_config(&cli)?;
    apply_cli(&cli, &mut config);
    init_logging(config.general.log_level);

    if cli.print_config {
        let toml = config.to_toml().map_err(FloodError::from)?;
        print!("{}", toml);
        return Ok(());
    }

    let observation = observation_from(&cli)?;
    tracing::debug!(?observation, clamp = config.inputs.clamp, "running assessment");

    let engine = FloodEngine::new();
    let assessment = assess(
        &engine,
        observation,
        config.inputs.clamp,
        config.report.include_curves,
    )?;

    let report = render(&assessment, &config.report)?;
    write_report(&report, cli.output.as_deref())
        .with_context(|| match &cli.output {
            Some(path) => format!("Failed to write report to {}", path.display()),
            None => "Failed to write report to stdout".to_string(),
        })?;

    Ok(())
}

fn load_config(cli: &Cli) -> Result<FloodConfig> {
    let mut config = match &cli.config {
        Some(path) => FloodConfig::load_from_file(path).map_err(FloodError::from)?,
        None => FloodConfig::load().map_err(FloodError::from)?,
    };
    if cli.config.is_some() {
        config.apply_env_overrides().map_err(FloodError::from)?;
    }
    Ok(config)
}

/// Command-line flags win over file and environment settings.
fn apply_cli(cli: &Cli, config: &mut FloodConfig) {
    if let Some(format) = cli.format {
        config.report.format = format;
    }
    if cli.curves {
        config.report.include_curves = true;
    }
    if cli.clamp {
        config.inputs.clamp = true;
    }
    if cli.quiet {
        config.general.log_level = LogLevel::Quiet;
    } else {
        match cli.verbose {
            0 => {}
            1 => config.general.log_level = LogLevel::Verbose,
            _ => config.general.log_level = LogLevel::Debug,
        }
    }
}

fn init_logging(level: LogLevel) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.filter_directive()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn observation_from(cli: &Cli) -> Result<Observation, FloodError> {
    if let Some(preset) = cli.preset {
        return Ok(preset.observation());
    }

    let rainfall = cli.rainfall.ok_or_else(|| missing("rainfall"))?;
    let water_level = cli.water_level.ok_or_else(|| missing("water-level"))?;
    let duration = cli.duration.ok_or_else(|| missing("duration"))?;
    Ok(Observation::new(rainfall, water_level, duration))
}

fn missing(flag: &str) -> FloodError {
    FloodError::missing_input(flag)
        .with_hint("pass --rainfall, --water-level and --duration, or use --preset")
}
