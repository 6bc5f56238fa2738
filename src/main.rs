use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cmap2d::colormaps;
use cmap2d::models::{write_json, AppConfig, SamplingConfig};
use cmap2d::services::{Evaluator, Watchdog};
use jnd_engine::{CancellationToken, DistanceMetric};

#[derive(Parser)]
#[command(name = "cmap2d")]
#[command(about = "Perceptual quality evaluation of 2D colormaps")]
struct Cli {
    /// YAML configuration file (defaults to $CONFIG_FILE)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Overrides shared by the analysis commands
#[derive(clap::Args)]
struct RunArgs {
    /// JND threshold (perceptual distance units)
    #[arg(short, long)]
    threshold: Option<f64>,

    /// Distance metric: cie76, cie94 or ciede2000
    #[arg(short, long)]
    distance: Option<DistanceMetric>,

    /// Seed for the random and pair samplers
    #[arg(long)]
    seed: Option<u64>,

    /// Run on a single thread
    #[arg(long)]
    sequential: bool,

    /// Cancel after this many seconds and write the partial result
    #[arg(long)]
    timeout_secs: Option<u64>,

    /// Output JSON file (stdout when omitted)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// List the built-in colormaps
    List,
    /// Compute the JND point set and regions of one colormap
    Jnd {
        /// Colormap name (see 'cmap2d list')
        colormap: String,

        /// Sample on an N x N grid instead of the configured sampling
        #[arg(long)]
        grid: Option<usize>,

        /// Rays per JND region
        #[arg(long)]
        angles: Option<usize>,

        /// Radial step of region tracing
        #[arg(long)]
        step: Option<f64>,

        #[command(flatten)]
        run: RunArgs,
    },
    /// Score and rank colormaps with the configured metrics
    Evaluate {
        /// Colormap names (defaults to the configured list)
        colormaps: Vec<String>,

        #[command(flatten)]
        run: RunArgs,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config_path = cli
        .config
        .or_else(|| std::env::var("CONFIG_FILE").ok().map(PathBuf::from));

    match cli.command {
        Some(Commands::List) => {
            init_logging();
            run_list_command(config_path.as_deref())
        }
        Some(Commands::Jnd {
            colormap,
            grid,
            angles,
            step,
            run,
        }) => {
            init_logging();
            let mut config = load_config(config_path.as_deref(), &run)?;
            if let Some(resolution) = grid {
                config.jnd_sampling = SamplingConfig::Grid { resolution };
            }
            if let Some(angles) = angles {
                config.region.angles = angles;
            }
            if let Some(step) = step {
                config.region.step = step;
            }
            run_jnd_command(config, &colormap, &run)
        }
        Some(Commands::Evaluate { colormaps, run }) => {
            init_logging();
            let config = load_config(config_path.as_deref(), &run)?;
            run_evaluate_command(config, colormaps, &run)
        }
        None => {
            run_status_command(config_path.as_deref());
            Ok(())
        }
    }
}

/// Logs go to stderr so stdout carries only the JSON report
fn init_logging() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cmap2d=info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .without_time()
                .with_writer(std::io::stderr),
        )
        .init();
}

/// Load the config file and apply command-line overrides
fn load_config(path: Option<&Path>, run: &RunArgs) -> anyhow::Result<AppConfig> {
    let mut config = read_config(path)?;
    if let Some(threshold) = run.threshold {
        config.threshold = threshold;
    }
    if let Some(distance) = run.distance {
        config.distance = distance;
    }
    if run.seed.is_some() {
        config.seed = run.seed;
    }
    if run.sequential {
        config.parallel = false;
    }
    Ok(config)
}

fn read_config(path: Option<&Path>) -> anyhow::Result<AppConfig> {
    AppConfig::load(path).with_context(|| match path {
        Some(p) => format!("Invalid configuration file {}", p.display()),
        None => "Invalid configuration".to_string(),
    })
}

/// Arm the timeout watchdog if requested; it disarms when dropped
fn arm_watchdog(token: &CancellationToken, run: &RunArgs) -> Option<Watchdog> {
    run.timeout_secs
        .map(|secs| Watchdog::arm(token.clone(), Duration::from_secs(secs)))
}

fn run_list_command(config_path: Option<&Path>) -> anyhow::Result<()> {
    let config = read_config(config_path)?;

    println!("{:<15} {:<8} Description", "Name", "Space");
    for name in colormaps::BUILTIN {
        let cmap = colormaps::build(name, &config)
            .with_context(|| format!("Failed to build colormap '{name}'"))?;
        println!(
            "{:<15} {:<8} {}",
            cmap.name(),
            cmap.color_space().to_string(),
            cmap.description()
        );
    }
    Ok(())
}

fn run_jnd_command(config: AppConfig, colormap: &str, run: &RunArgs) -> anyhow::Result<()> {
    let evaluator = Evaluator::new(config).context("Invalid configuration")?;
    let cmap = colormaps::build(colormap, evaluator.config())?;

    let token = CancellationToken::new();
    let watchdog = arm_watchdog(&token, run);
    let report = evaluator.jnd(cmap.as_ref(), &token)?;
    drop(watchdog);

    write_json(&report, run.output.as_deref()).context("Failed to write JND report")?;
    Ok(())
}

fn run_evaluate_command(
    config: AppConfig,
    names: Vec<String>,
    run: &RunArgs,
) -> anyhow::Result<()> {
    let evaluator = Evaluator::new(config).context("Invalid configuration")?;
    let names = if names.is_empty() {
        evaluator.config().colormaps.clone()
    } else {
        names
    };
    if names.is_empty() {
        anyhow::bail!("No colormaps to evaluate; name some or set 'colormaps' in the config");
    }
    let maps = colormaps::build_all(&names, evaluator.config())?;

    let token = CancellationToken::new();
    let watchdog = arm_watchdog(&token, run);
    let report = evaluator.evaluate(&maps, &token)?;
    drop(watchdog);

    write_json(&report, run.output.as_deref()).context("Failed to write evaluation report")?;
    Ok(())
}

/// Show status information when no command is given
fn run_status_command(config_path: Option<&Path>) {
    const VERSION: &str = env!("CARGO_PKG_VERSION");

    let rust_log = std::env::var("RUST_LOG").ok();
    let config_file = std::env::var("CONFIG_FILE").ok();

    // Header
    println!("cmap2d v{VERSION}");
    println!("Perceptual quality evaluation of 2D colormaps\n");

    // Environment variables section
    println!("Environment Variables:");
    println!(
        "  CONFIG_FILE = {}",
        config_file.as_deref().unwrap_or("(not set)")
    );
    println!(
        "  RUST_LOG    = {}",
        rust_log.as_deref().unwrap_or("cmap2d=info (default)")
    );

    // Configuration section
    let config_source = match config_path {
        Some(p) if p.exists() => p.display().to_string(),
        Some(p) => format!("{} (file not found)", p.display()),
        None => "built-in defaults".to_string(),
    };
    println!("\nConfiguration:");
    println!("  Source:    {config_source}");
    match AppConfig::load(config_path) {
        Ok(config) => {
            println!("  Threshold: {} ({})", config.threshold, config.distance);
            println!("  Colormaps: {}", config.colormaps.join(", "));
            println!("  Metrics:   {}", config.metrics.len());
        }
        Err(e) => println!("  Error:     {e}"),
    }

    // Commands section
    println!("\nCommands:");
    println!("  cmap2d list       List built-in colormaps");
    println!("  cmap2d jnd        JND point set and regions of one colormap");
    println!("  cmap2d evaluate   Score and rank colormaps");
    println!("\nRun 'cmap2d --help' for more details.");
}
