use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use mound_store::DATA_DIR_ENV;

#[derive(Parser)]
#[command(
    name = "mound",
    about = "Mound: run-provenance store demo driver",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Store root directory
    #[arg(long, global = true, env = DATA_DIR_ENV)]
    pub root: Option<PathBuf>,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Clone, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Write a sample record with two streams and finalize it
    Demo(DemoArgs),
    /// Print the metadata document of a record
    Show(ShowArgs),
    /// Format a program version string
    Semver(SemverArgs),
}

#[derive(Args)]
pub struct DemoArgs {
    #[arg(long, default_value = "mound")]
    pub program: String,
    #[arg(long, default_value = "0.0.1-demo")]
    pub version: String,
    /// Record id to link as a source
    #[arg(long)]
    pub link: Vec<String>,
    /// Completion status to finalize with
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    pub status: i64,
}

#[derive(Args)]
pub struct ShowArgs {
    pub id: String,
}

#[derive(Args)]
pub struct SemverArgs {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
}
