//! Robust newsvendor driver.
//!
//! Computes optimal order quantities for a discrete-demand newsvendor
//! under epsilon-contamination ambiguity, for both the maximin profit
//! and the minimax loss criteria. Payloads go to stdout, logs to stderr.

use clap::{Args, Parser, Subcommand, ValueEnum};
use rnv_core::{DemandModel, DEFAULT_TAIL_WIDTH};
use thiserror::Error;
use tracing_subscriber::EnvFilter;

mod commands;
mod output;
mod report;

use commands::GridSpec;
use output::OutputFormat;

/// Robust newsvendor order-quantity solver
#[derive(Parser)]
#[command(name = "rnv")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[command(flatten)]
    global: GlobalOpts,
}

/// Global options available to all commands
#[derive(Args, Debug)]
struct GlobalOpts {
    /// Output format
    #[arg(long, short = 'f', global = true, default_value = "json")]
    format: OutputFormat,

    /// Increase verbosity (-v, -vv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Decrease verbosity (quiet mode)
    #[arg(short, long, global = true)]
    quiet: bool,
}

/// Demand distribution shared by all commands
#[derive(Args, Debug)]
struct ModelArgs {
    /// Demand support, strictly decreasing, comma separated
    #[arg(
        long,
        value_delimiter = ',',
        default_value = "2500,2000,1500,1000,500,0"
    )]
    support: Vec<f64>,

    /// Probability weights for the support, comma separated (normalized)
    #[arg(long, value_delimiter = ',', default_value = "8,5,1,2,2,2")]
    weights: Vec<f64>,
}

#[derive(Subcommand)]
enum Commands {
    /// Maximize the lower expected profit over the contamination class
    Maximin(MaximinArgs),

    /// Minimize the upper expected loss over the contamination class
    Minimax(MinimaxArgs),

    /// Sweep the optimal quantity over a grid of cost parameters
    Surface(SurfaceArgs),
}

#[derive(Args, Debug)]
struct MaximinArgs {
    #[command(flatten)]
    model: ModelArgs,

    /// Unit selling price
    #[arg(long, default_value_t = 6.0)]
    revenue: f64,

    /// Unit purchase cost
    #[arg(long, default_value_t = 2.0)]
    cost: f64,

    /// Contamination weights, comma separated
    #[arg(
        long,
        value_delimiter = ',',
        default_value = "0,0.2,0.4,0.6,0.8,1"
    )]
    epsilons: Vec<f64>,

    /// Width of the candidate interval past the largest demand
    #[arg(long, default_value_t = DEFAULT_TAIL_WIDTH)]
    tail_width: f64,
}

#[derive(Args, Debug)]
struct MinimaxArgs {
    #[command(flatten)]
    model: ModelArgs,

    /// Unit shortage (understock) cost
    #[arg(long, default_value_t = 4.0)]
    shortage: f64,

    /// Unit holding (overstock) cost
    #[arg(long, default_value_t = 2.0)]
    holding: f64,

    /// Contamination weights, comma separated
    #[arg(
        long,
        value_delimiter = ',',
        default_value = "0,0.2,0.4,0.6,0.8,1"
    )]
    epsilons: Vec<f64>,

    /// Width of the open interval past the largest breakpoint
    #[arg(long, default_value_t = DEFAULT_TAIL_WIDTH)]
    tail_width: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Criterion {
    Maximin,
    Minimax,
}

#[derive(Args, Debug)]
struct SurfaceArgs {
    #[command(flatten)]
    model: ModelArgs,

    /// Which criterion to sweep
    #[arg(long, value_enum, default_value = "minimax")]
    criterion: Criterion,

    /// Contamination weight
    #[arg(long, default_value_t = 0.2)]
    epsilon: f64,

    /// Smallest cost parameter on each axis
    #[arg(long, default_value_t = 0.1)]
    grid_min: f64,

    /// Largest cost parameter on each axis
    #[arg(long, default_value_t = 5.1)]
    grid_max: f64,

    /// Grid step on each axis
    #[arg(long, default_value_t = 0.1)]
    grid_step: f64,

    /// Width of the interval past the largest demand or breakpoint
    #[arg(long, default_value_t = DEFAULT_TAIL_WIDTH)]
    tail_width: f64,
}

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Core(#[from] rnv_core::Error),

    #[error("grid step must be positive and finite, got {0}")]
    InvalidGridStep(f64),

    #[error("failed to render output: {0}")]
    Render(#[from] serde_json::Error),
}

fn init_logging(global: &GlobalOpts) {
    let level = if global.quiet {
        "error"
    } else {
        match global.verbose {
            0 => "warn",
            1 => "info",
            _ => "debug",
        }
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn build_model(args: &ModelArgs) -> Result<DemandModel, CliError> {
    let total: f64 = args.weights.iter().sum();
    let probs = args.weights.iter().map(|w| w / total).collect();
    Ok(DemandModel::new(args.support.clone(), probs)?)
}

fn run(cli: &Cli) -> Result<String, CliError> {
    match &cli.command {
        Commands::Maximin(args) => {
            let model = build_model(&args.model)?;
            let report = commands::maximin(
                &model,
                &args.epsilons,
                args.revenue,
                args.cost,
                args.tail_width,
            )?;
            Ok(output::render_maximin(&report, cli.global.format)?)
        }
        Commands::Minimax(args) => {
            let model = build_model(&args.model)?;
            let report = commands::minimax(
                &model,
                &args.epsilons,
                args.shortage,
                args.holding,
                args.tail_width,
            )?;
            Ok(output::render_minimax(&report, cli.global.format)?)
        }
        Commands::Surface(args) => {
            if !args.grid_step.is_finite() || args.grid_step <= 0.0 {
                return Err(CliError::InvalidGridStep(args.grid_step));
            }
            let model = build_model(&args.model)?;
            let grid = GridSpec {
                start: args.grid_min,
                stop: args.grid_max,
                step: args.grid_step,
            };
            let report = match args.criterion {
                Criterion::Maximin => {
                    commands::surface_maximin(&model, args.epsilon, grid, args.tail_width)?
                }
                Criterion::Minimax => {
                    commands::surface_minimax(&model, args.epsilon, grid, args.tail_width)?
                }
            };
            Ok(output::render_surface(&report, cli.global.format)?)
        }
    }
}

fn main() -> std::process::ExitCode {
    let cli = Cli::parse();
    init_logging(&cli.global);

    match run(&cli) {
        Ok(payload) => {
            println!("{payload}");
            std::process::ExitCode::SUCCESS
        }
        Err(err) => {
            tracing::error!(error = %err, "command failed");
            eprintln!("error: {err}");
            std::process::ExitCode::FAILURE
        }
    }
}
