use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Recal calendar converter for UKCP convection permitting model output.
#[derive(Parser)]
#[command(
    name = "recal",
    version,
    about = "Convert 360-day climate model output to the standard Gregorian calendar"
)]
pub struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand)]
pub enum Command {
    /// Convert one NetCDF file.
    Convert(ConvertArgs),
    /// Convert every file in a directory.
    Batch(BatchArgs),
    /// Print the Gregorian dates synthesised in a year.
    Gaps(GapsArgs),
}

/// Conversion settings shared by `convert` and `batch`.
#[derive(clap::Args)]
pub struct ConversionArgs {
    /// Path to TOML configuration file.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Override the data variable from config.
    #[arg(long)]
    pub variable: Option<String>,

    /// Override the interpolation method from config ("nearest" or "linear").
    #[arg(long)]
    pub interpolation: Option<String>,

    /// Override the edge fill from config ("nearest" or "extrapolate").
    #[arg(long = "edge-fill")]
    pub edge_fill: Option<String>,

    /// Replace existing output files.
    #[arg(long)]
    pub overwrite: bool,
}

/// Arguments for the `convert` subcommand.
#[derive(clap::Args)]
pub struct ConvertArgs {
    /// Path to the 360-day input NetCDF file.
    #[arg(short, long)]
    pub input: PathBuf,

    /// Path for the Gregorian output NetCDF file.
    #[arg(short, long)]
    pub output: PathBuf,

    #[command(flatten)]
    pub conversion: ConversionArgs,
}

/// Arguments for the `batch` subcommand.
#[derive(clap::Args)]
pub struct BatchArgs {
    /// Override the input directory from config.
    #[arg(long = "input-dir")]
    pub input_dir: Option<PathBuf>,

    /// Override the output directory from config.
    #[arg(long = "output-dir")]
    pub output_dir: Option<PathBuf>,

    /// First file to convert, by position in the sorted listing.
    #[arg(long = "start-index")]
    pub start_index: Option<usize>,

    /// Position after the last file to convert.
    #[arg(long = "stop-index")]
    pub stop_index: Option<usize>,

    #[command(flatten)]
    pub conversion: ConversionArgs,
}

/// Arguments for the `gaps` subcommand.
#[derive(clap::Args)]
pub struct GapsArgs {
    /// Gregorian year.
    #[arg(short, long)]
    pub year: i32,
}
