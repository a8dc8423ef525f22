use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    version,
    about = "trafogen - exhaustive design-space enumeration for mains transformers.",
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
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Enumerate and evaluate every transformer design the configured ranges imply.
    Sweep(SweepArgs),
    /// Load the catalogs and sweep configuration and report problems without running.
    Validate(ValidateArgs),
}

/// Arguments for the `sweep` subcommand.
#[derive(Args, Debug)]
pub struct SweepArgs {
    #[command(flatten)]
    pub inputs: InputArgs,

    /// Path for the CSV results file. Omit to print a summary only.
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Number of evaluation workers, overriding the config file.
    /// Defaults to the number of available logical cores.
    #[arg(short = 'j', long, value_name = "NUM")]
    pub workers: Option<usize>,

    /// Emit every winding-order permutation of each wire combination,
    /// overriding the config file.
    #[arg(long)]
    pub permute_windings: bool,
}

/// Arguments for the `validate` subcommand.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    #[command(flatten)]
    pub inputs: InputArgs,
}

/// The input files shared by every subcommand.
#[derive(Args, Debug)]
pub struct InputArgs {
    /// Path to the sweep configuration file in TOML format.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub config: PathBuf,

    /// Path to the wire catalog in CSV format.
    #[arg(long, required = true, value_name = "PATH")]
    pub wires: PathBuf,

    /// Path to the standard lamination catalog in TOML format.
    #[arg(long, required = true, value_name = "PATH")]
    pub laminations: PathBuf,

    /// Path to the core-loss curves in CSV format.
    #[arg(long, required = true, value_name = "PATH")]
    pub losses: PathBuf,
}
