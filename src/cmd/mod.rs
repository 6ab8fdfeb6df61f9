mod list;
mod populate;

pub use populate::PopulateArgs;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "streamfill")]
#[command(version)]
#[command(
    about = "Populate a DuckDB database with a consistent streaming-platform dataset",
    long_about = None
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate and load a dataset according to a volume preset
    Populate(PopulateArgs),

    /// List the available volume presets
    List,
}

pub fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Populate(args) => populate::execute(args),
        Commands::List => list::execute(),
    }
}
