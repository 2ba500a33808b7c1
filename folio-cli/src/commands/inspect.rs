//! Inspect command implementation

use crate::input::FileReader;
use anyhow::{Context, Result};
use clap::Args;
use folio_core::{reading_order, Block, Classifier};
use folio_engine::{OffsetResolver, Shard, TextResolver};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

/// Arguments for the inspect command
#[derive(Debug, Args)]
pub struct InspectArgs {
    /// Document AI JSON shard to inspect
    #[arg(short, long, value_name = "FILE", required = true)]
    pub input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

impl InspectArgs {
    /// Execute the inspect command
    pub fn execute(&self) -> Result<()> {
        let shard = FileReader::read_shard(&self.input)?;

        match &self.output {
            Some(path) => {
                let file = File::create(path)
                    .with_context(|| format!("Failed to create {}", path.display()))?;
                let mut writer = BufWriter::new(file);
                dump_structure(&shard, &mut writer)?;
                writer.flush()?;
                println!("✓ Dumped structure to {}", path.display());
            }
            None => {
                let stdout = io::stdout();
                dump_structure(&shard, &mut stdout.lock())?;
            }
        }
        Ok(())
    }
}

/// Write every page's reading-order rows with geometry and classification
pub fn dump_structure<W: Write>(shard: &Shard, writer: &mut W) -> Result<()> {
    let classifier = Classifier::new();
    let resolver = OffsetResolver;

    writeln!(writer, "Shard with {} pages", shard.pages().len())?;
    for (index, page) in shard.pages().iter().enumerate() {
        let number = page.page_number.unwrap_or(index as u32 + 1);
        writeln!(writer)?;
        writeln!(writer, "=== Page {number} ({} blocks) ===", page.blocks.len())?;

        let mut empty = 0;
        let blocks: Vec<Block> = page
            .blocks
            .iter()
            .filter_map(|layout_block| {
                let text = resolver.resolve(shard, &layout_block.anchor);
                let text = text.trim();
                if text.is_empty() {
                    empty += 1;
                    return None;
                }
                Some(Block::new(layout_block.bbox(), text, number, 0))
            })
            .collect();

        for (row_index, row) in reading_order::group_rows(blocks).iter().enumerate() {
            writeln!(writer, "Row {row_index}")?;
            for block in row {
                let tag = classifier.classify(&block.text);
                writeln!(
                    writer,
                    "  [top {:.3} bottom {:.3} left {:.3}] {:>4} chars  {:<16} {}",
                    block.bbox.top,
                    block.bbox.bottom,
                    block.bbox.left,
                    block.text.chars().count(),
                    tag.to_string(),
                    preview(&block.text)
                )?;
            }
        }
        if empty > 0 {
            writeln!(writer, "({empty} blocks without text)")?;
        }
    }
    Ok(())
}

/// First line of the text, shortened for display
fn preview(text: &str) -> String {
    const MAX: usize = 60;
    let line = text.lines().next().unwrap_or_default();
    if line.chars().count() > MAX || line.len() < text.len() {
        let short: String = line.chars().take(MAX).collect();
        format!("{short}...")
    } else {
        line.to_string()
    }
}
