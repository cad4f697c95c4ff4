use std::path::PathBuf;

use clap::Parser;

use crate::Commands;

/// Main CLI application arguments and command structure
#[derive(Parser, Debug)]
#[clap(
    name = "todoboard",
    version,
    about = "Social todo board: categories, progress, likes and comments"
)]
pub struct Cli {
    /// Path to the configuration file
    #[clap(short = 'c', long, value_parser)]
    pub config: Option<PathBuf>,

    /// Wallet address to act as (overrides the configured address)
    #[clap(short = 'a', long, env = "TODOBOARD_ADDRESS")]
    pub address: Option<String>,

    /// Disable colored output
    #[clap(long)]
    pub no_color: bool,

    /// Verbose output mode
    #[clap(short, long)]
    pub verbose: bool,

    /// Subcommands for the todoboard application
    #[clap(subcommand)]
    pub command: Commands,
}
