//! PDF unlocking CLI application.
//!
//! Strips encryption from every PDF in a directory, or inspects a single file.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

use pdf_unlock::config::{DEFAULT_INPUT_DIR, DEFAULT_OUTPUT_DIR, DEFAULT_PATTERN};
use pdf_unlock::{BatchStripper, StripConfig};

/// PDF Unlock Tool
///
/// Remove encryption and permission restrictions from a directory of PDFs.
/// Files already present in the output directory are skipped.
#[derive(Parser)]
#[command(name = "pdf-unlock")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Directory scanned for PDF files
    #[arg(short, long, value_name = "DIR", default_value = DEFAULT_INPUT_DIR)]
    input_dir: PathBuf,

    /// Directory receiving the unprotected copies
    #[arg(short, long, value_name = "DIR", default_value = DEFAULT_OUTPUT_DIR)]
    output_dir: PathBuf,

    /// Case-sensitive file name pattern
    #[arg(short, long, value_name = "GLOB", default_value = DEFAULT_PATTERN)]
    pattern: String,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Report whether a PDF is encrypted and whether the empty password opens it
    Inspect {
        /// PDF file to inspect
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
}

impl Cli {
    fn config(&self) -> StripConfig {
        StripConfig::new(&self.input_dir, &self.output_dir).with_pattern(&self.pattern)
    }
}

/// Command handler owning the stripper.
struct UnlockHandler {
    stripper: BatchStripper,
}

impl UnlockHandler {
    fn new() -> Self {
        Self {
            stripper: BatchStripper::with_lopdf(),
        }
    }

    /// Runs the batch and prints a summary.
    fn unlock(&self, config: &StripConfig) -> Result<()> {
        let report = self
            .stripper
            .run(config)
            .with_context(|| "Batch run failed")?;

        for file in report.files.iter().filter(|file| file.outcome.is_failure()) {
            println!("✗ {}: {}", file.file_name, file.outcome);
        }

        println!("✓ {} → {}", report, config.output_dir.display());
        Ok(())
    }

    /// Prints the security state of one file.
    fn inspect(&self, file: &Path) -> Result<()> {
        if !file.exists() {
            anyhow::bail!("Input file does not exist: {}", file.display());
        }

        let info = self
            .stripper
            .inspect(file)
            .with_context(|| format!("Inspection failed for {}", file.display()))?;

        println!("File:      {}", file.display());
        println!("Encrypted: {}", if info.encrypted { "yes" } else { "no" });
        println!(
            "Unlocked:  {}",
            if info.unlocked {
                "yes (empty password)"
            } else {
                "no (owner password needed)"
            }
        );
        if let Some(pages) = info.page_count {
            println!("Pages:     {}", pages);
        }

        Ok(())
    }
}

/// Installs the stderr log subscriber; `RUST_LOG` overrides the level.
fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let handler = UnlockHandler::new();

    match &cli.command {
        Some(Commands::Inspect { file }) => handler.inspect(file)?,
        None => handler.unlock(&cli.config())?,
    }

    Ok(())
}
