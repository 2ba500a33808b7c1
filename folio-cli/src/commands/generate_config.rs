//! Generate config command implementation

use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;

/// Arguments for the generate-config command
#[derive(Debug, Args)]
pub struct GenerateConfigArgs {
    /// Output file path
    #[arg(short, long, value_name = "FILE", required = true)]
    pub output: PathBuf,

    /// Variant tag to pre-fill
    #[arg(long, value_name = "NAME", default_value = folio_engine::DEFAULT_VARIANT)]
    pub variant: String,
}

impl GenerateConfigArgs {
    /// Execute the generate-config command
    pub fn execute(&self) -> Result<()> {
        use std::fs;

        println!("Generating configuration template...");
        println!("  Variant: {}", self.variant);
        println!("  Output file: {}", self.output.display());

        let template = self.generate_template();

        fs::write(&self.output, template)
            .with_context(|| format!("Failed to write to {}", self.output.display()))?;

        println!("✓ Configuration template generated successfully!");
        println!();
        println!("Next steps:");
        println!("1. Edit the configuration file");
        println!("2. Validate your configuration:");
        println!("   folio validate -c {}", self.output.display());
        println!("3. Use it for segmentation:");
        println!(
            "   folio segment -i 'output/doc-*.json' -c {}",
            self.output.display()
        );

        Ok(())
    }

    /// Generate template configuration content
    fn generate_template(&self) -> String {
        format!(
            r#"# folio configuration
#
# Every value can be overridden on the command line.

[segmentation]
# Tag stamped on every chunk, e.g. the ruleset or edition the document covers
variant = "{}"

# Ingestion label stamped on every chunk
source = "{}"

[output]
# One of: text, json, jsonl, markdown
default_format = "text"

# Pretty print JSON arrays (jsonl is always one chunk per line)
pretty_json = true

[pages]
# When only some pages of the source file were sent for layout analysis,
# list their original page numbers in order so chunks carry them.
# Comma-separated pages and inclusive ranges:
# map = "3,4,7-9"
"#,
            self.variant.replace('\\', "\\\\").replace('"', "\\\""),
            folio_core::DEFAULT_SOURCE
        )
    }
}
