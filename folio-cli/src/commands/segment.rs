//! Segment command implementation

use crate::config::FolioConfig;
use crate::error::CliError;
use crate::input::{resolve_patterns, FileReader};
use crate::output::{write_chunks, OutputFormat};
use crate::progress::ProgressReporter;
use anyhow::{Context, Result};
use clap::Args;
use folio_core::Chunk;
use folio_engine::{LayoutSegmenter, PageMap};
use rayon::prelude::*;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

/// Arguments for the segment command
#[derive(Debug, Args)]
pub struct SegmentArgs {
    /// Document AI JSON shards (supports glob); shards of one document
    /// are read in natural filename order
    #[arg(short, long, value_name = "FILE/PATTERN", required = true)]
    pub input: Vec<String>,

    /// Output file (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Output format (default: from config, else text)
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Variant tag stamped on every chunk
    #[arg(long, value_name = "NAME")]
    pub variant: Option<String>,

    /// Source file name stamped on every chunk
    #[arg(long, value_name = "NAME", conflicts_with = "per_file")]
    pub source_file: Option<String>,

    /// Original page numbers of the processed pages, e.g. "3,4,7-9"
    #[arg(long, value_name = "PAGES")]
    pub page_map: Option<String>,

    /// Configuration file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Segment every file as an independent document
    #[arg(long)]
    pub per_file: bool,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Increase verbosity
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl SegmentArgs {
    /// Execute the segment command
    pub fn execute(&self) -> Result<()> {
        // Initialize logging based on verbosity
        self.init_logging()?;

        log::info!("Starting segmentation");
        log::debug!("Arguments: {:?}", self);

        let config = self.load_config()?;
        let format = match self.format {
            Some(format) => format,
            None => config
                .default_format()
                .map_err(|e| CliError::ConfigError(e.to_string()))?,
        };

        let files = resolve_patterns(&self.input)?;
        log::info!("Found {} input files", files.len());

        let chunks = if self.per_file {
            self.segment_per_file(&config, &files)?
        } else {
            self.segment_document(&config, &files)?
        };

        let writer: Box<dyn Write + Send> = match &self.output {
            Some(path) => Box::new(BufWriter::new(File::create(path).with_context(|| {
                format!("Failed to create output file: {}", path.display())
            })?)),
            None => Box::new(io::stdout()),
        };
        let mut formatter = format.formatter(writer, config.output.pretty_json);
        write_chunks(formatter.as_mut(), &chunks)?;

        log::info!("Wrote {} chunks as {format}", chunks.len());
        Ok(())
    }

    /// Load the configuration file, if one was given
    fn load_config(&self) -> Result<FolioConfig> {
        match &self.config {
            Some(path) => FolioConfig::from_file(path)
                .with_context(|| format!("Failed to load config: {}", path.display())),
            None => Ok(FolioConfig::default()),
        }
    }

    /// Build the segmenter, letting flags override the configuration file
    fn segmenter(
        &self,
        config: &FolioConfig,
        source_file: Option<String>,
    ) -> Result<LayoutSegmenter> {
        let page_map = match &self.page_map {
            Some(spec) => Some(PageMap::parse(spec).map_err(CliError::from)?),
            None => config
                .page_map()
                .map_err(|e| CliError::ConfigError(e.to_string()))?,
        };
        let variant = self
            .variant
            .clone()
            .unwrap_or_else(|| config.segmentation.variant.clone());

        let segmenter = LayoutSegmenter::builder()
            .variant(variant)
            .source(config.segmentation.source.clone())
            .source_file(source_file)
            .page_map(page_map)
            .build()
            .map_err(CliError::from)?;
        Ok(segmenter)
    }

    /// Treat all files as consecutive shards of one document
    fn segment_document(&self, config: &FolioConfig, files: &[PathBuf]) -> Result<Vec<Chunk>> {
        let segmenter = self.segmenter(config, self.source_file.clone())?;

        let mut progress = ProgressReporter::new(self.quiet);
        progress.init_files(files.len() as u64);
        let mut shards = Vec::with_capacity(files.len());
        for path in files {
            shards.push(FileReader::read_shard(path)?);
            progress.file_completed(&display_name(path));
        }
        progress.finish();

        let output = segmenter.segment_shards(shards);
        log::info!(
            "{} pages, {} blocks ({} empty) in {:.1} ms",
            output.metadata.pages,
            output.metadata.blocks,
            output.metadata.skipped_blocks,
            output.metadata.processing_time_ms
        );
        Ok(output.chunks)
    }

    /// Segment every file independently, in parallel
    fn segment_per_file(&self, config: &FolioConfig, files: &[PathBuf]) -> Result<Vec<Chunk>> {
        let mut progress = ProgressReporter::new(self.quiet);
        progress.init_files(files.len() as u64);

        let results: Vec<Result<Vec<Chunk>>> = files
            .par_iter()
            .map(|path| -> Result<Vec<Chunk>> {
                let segmenter = self.segmenter(config, FileReader::source_name(path))?;
                let shard = FileReader::read_shard(path)?;
                let output = segmenter.segment(&shard.into());
                progress.file_completed(&display_name(path));
                Ok(output.chunks)
            })
            .collect();
        progress.finish();

        let mut chunks = Vec::new();
        for result in results {
            chunks.extend(result?);
        }
        Ok(chunks)
    }

    /// Initialize logging based on verbosity level
    fn init_logging(&self) -> Result<()> {
        let log_level = match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        };

        if !self.quiet {
            // A logger may already be installed when running under tests
            let _ = env_logger::Builder::from_env(
                env_logger::Env::default().default_filter_or(log_level),
            )
            .try_init();
        }

        Ok(())
    }
}

fn display_name(path: &Path) -> String {
    FileReader::source_name(path).unwrap_or_else(|| path.display().to_string())
}
