//! folio command-line entry point

use clap::Parser;
use folio_cli::commands::Commands;
use folio_cli::CliResult;

/// Layout-aware segmentation of OCR documents into rule-tagged chunks
#[derive(Debug, Parser)]
#[command(name = "folio", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

fn main() -> CliResult<()> {
    Cli::parse().command.execute()
}
