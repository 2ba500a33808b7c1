//! CLI command implementations

use clap::Subcommand;

pub mod generate_config;
pub mod inspect;
pub mod segment;
pub mod validate;

/// Available CLI commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Segment Document AI layout JSON into hierarchical chunks
    Segment(segment::SegmentArgs),

    /// Dump the reading-order rows and block tags of one shard
    Inspect(inspect::InspectArgs),

    /// Write a commented configuration template
    GenerateConfig(generate_config::GenerateConfigArgs),

    /// Check a configuration file
    Validate(validate::ValidateArgs),
}

impl Commands {
    /// Run the selected command
    pub fn execute(&self) -> anyhow::Result<()> {
        match self {
            Commands::Segment(args) => args.execute(),
            Commands::Inspect(args) => args.execute(),
            Commands::GenerateConfig(args) => args.execute(),
            Commands::Validate(args) => args.execute(),
        }
    }
}
