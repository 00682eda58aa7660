mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{convert::ConvertArgs, preamble::PreambleArgs};

#[derive(Parser)]
#[command(name = "transedf", about = "Convert EyeLink EDF files to Parquet tables")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert an EDF file to samples/events/messages Parquet groups
    Convert(ConvertArgs),
    /// Print the preamble text of an EDF file
    Preamble(PreambleArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Convert(args) => args.run(),
        Commands::Preamble(args) => args.run(),
    }
}
