use clap::{Args, Parser, Subcommand, ValueEnum};
use mixswarm::core::bounds::BoundHandling;
use mixswarm::core::objective::Direction;
use mixswarm::engine::config::Propagation;
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    author = "Tony Kan, Ted Yu",
    version,
    about = "MixSwarm CLI - Particle swarm optimization over mixed continuous, integer, categorical and binary search spaces.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Set the number of threads used to evaluate particles in parallel.
    /// Defaults to the number of available logical cores.
    #[arg(short = 'j', long, global = true, value_name = "NUM")]
    pub threads: Option<usize>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run an optimization described by a configuration file.
    Run(RunArgs),
    /// Check a configuration file and print the resulting search space.
    Validate(ValidateArgs),
}

/// Arguments for the `run` subcommand.
#[derive(Args, Debug)]
pub struct RunArgs {
    /// Path to the run configuration file in TOML format.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub config: PathBuf,

    /// Write the per-iteration history to a CSV file.
    #[arg(long, value_name = "PATH")]
    pub history: Option<PathBuf>,

    #[command(flatten)]
    pub overrides: OverrideArgs,
}

/// Arguments for the `validate` subcommand.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Path to the run configuration file in TOML format.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub config: PathBuf,

    #[command(flatten)]
    pub overrides: OverrideArgs,
}

/// Command-line overrides of configuration file values.
#[derive(Args, Debug, Default, Clone)]
pub struct OverrideArgs {
    /// Override the benchmark objective (sphere, rosenbrock, rastrigin, ackley).
    #[arg(long, value_name = "NAME")]
    pub objective: Option<String>,

    /// Override the random seed.
    #[arg(long, value_name = "INT")]
    pub seed: Option<u64>,

    /// Override the number of particles.
    #[arg(short = 'n', long, value_name = "INT")]
    pub swarm_size: Option<usize>,

    /// Override the number of iterations after the bootstrap pass.
    #[arg(short = 'i', long, value_name = "INT")]
    pub max_iterations: Option<usize>,

    /// Override the optimization direction.
    #[arg(long, value_enum)]
    pub direction: Option<DirectionArg>,

    /// Override when the swarm best is propagated to particles.
    #[arg(long, value_enum)]
    pub propagation: Option<PropagationArg>,

    /// Override the bound-handling policy.
    #[arg(long, value_enum)]
    pub bound_handling: Option<BoundHandlingArg>,

    /// Set a specific configuration value, overriding the config file.
    /// Can be used multiple times. Example: -S optimization.inertia=0.5
    #[arg(short = 'S', long = "set", value_name = "KEY=VALUE", num_args(0..))]
    pub set_values: Vec<String>,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirectionArg {
    Minimize,
    Maximize,
}

impl From<DirectionArg> for Direction {
    fn from(arg: DirectionArg) -> Self {
        match arg {
            DirectionArg::Minimize => Direction::Minimize,
            DirectionArg::Maximize => Direction::Maximize,
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropagationArg {
    Synchronous,
    Asynchronous,
}

impl From<PropagationArg> for Propagation {
    fn from(arg: PropagationArg) -> Self {
        match arg {
            PropagationArg::Synchronous => Propagation::Synchronous,
            PropagationArg::Asynchronous => Propagation::Asynchronous,
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundHandlingArg {
    Clamp,
    Resample,
}

impl From<BoundHandlingArg> for BoundHandling {
    fn from(arg: BoundHandlingArg) -> Self {
        match arg {
            BoundHandlingArg::Clamp => BoundHandling::Clamp,
            BoundHandlingArg::Resample => BoundHandling::Resample,
        }
    }
}
