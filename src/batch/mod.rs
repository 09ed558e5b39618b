//! Batch processing of a directory of PDF documents.
//!
//! [`BatchStripper`] walks the input directory once, sequentially, and hands
//! each document to its [`PdfCodec`]. The output directory doubles as the
//! record of completed work: a file already present there is never touched
//! again, so an interrupted run can simply be restarted.

pub mod discover;
pub mod report;

pub use discover::{find_inputs, FileFilter};
pub use report::{BatchReport, FileOutcome, FileReport};

use crate::codec::{LopdfCodec, PdfCodec, SecurityInfo};
use crate::config::StripConfig;
use crate::error::{StripError, StripResult};
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;
use tracing::{debug, error, info, warn};

/// The only password ever tried on encrypted documents.
const EMPTY_PASSWORD: &str = "";

/// Produces unencrypted copies of every matching document in a directory.
pub struct BatchStripper {
    codec: Box<dyn PdfCodec>,
}

impl BatchStripper {
    /// Creates a stripper using the given codec.
    pub fn new(codec: Box<dyn PdfCodec>) -> Self {
        Self { codec }
    }

    /// Creates a stripper backed by `lopdf`.
    pub fn with_lopdf() -> Self {
        Self::new(Box::new(LopdfCodec::new()))
    }

    /// Processes every matching document in `config.input_dir`.
    ///
    /// Fails with [`StripError::DirectoryNotFound`] before touching the
    /// filesystem if the input directory is missing. Decrypt and parse
    /// failures are recorded in the report; any other error ends the run.
    pub fn run(&self, config: &StripConfig) -> StripResult<BatchReport> {
        if !config.input_dir.is_dir() {
            return Err(StripError::DirectoryNotFound {
                path: config.input_dir.clone(),
            });
        }

        let filter = FileFilter::new(&config.pattern)?;

        fs::create_dir_all(&config.output_dir).map_err(|source| StripError::Io {
            path: config.output_dir.clone(),
            source,
        })?;

        let inputs = find_inputs(&config.input_dir, &filter)?;
        debug!(
            codec = self.codec.name(),
            count = inputs.len(),
            input_dir = %config.input_dir.display(),
            "found input documents"
        );

        let mut report = BatchReport::default();
        for input in inputs {
            let Some(output) = config.output_path_for(&input) else {
                continue;
            };
            let file_name = output
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_default();

            let outcome = self.process(&file_name, &input, &output)?;
            report.record(file_name, outcome);
        }

        Ok(report)
    }

    /// Handles one input: skip if done, otherwise strip and contain
    /// per-file failures.
    fn process(&self, file_name: &str, input: &Path, output: &Path) -> StripResult<FileOutcome> {
        if output.exists() {
            info!("Skipping (already processed): {}", file_name);
            return Ok(FileOutcome::AlreadyProcessed);
        }

        info!("Processing: {} → {}", file_name, output.display());

        match self.strip_security(input, output) {
            Ok(outcome) => Ok(outcome),
            Err(err @ StripError::DecryptionFailed { .. }) => {
                error!("{}", err);
                Ok(FileOutcome::DecryptionFailed)
            }
            Err(StripError::ParseFailure { path, reason }) => {
                warn!("Could not parse PDF, skipping: {} ({})", path.display(), reason);
                Ok(FileOutcome::Unparseable { reason })
            }
            Err(err) => Err(err),
        }
    }

    /// Writes an unencrypted copy of `input` to `output`.
    ///
    /// The output is created exclusively; if it appears after the caller's
    /// existence check the file is left alone and reported as already
    /// processed.
    pub fn strip_security(&self, input: &Path, output: &Path) -> StripResult<FileOutcome> {
        let source = fs::read(input).map_err(|source| StripError::Io {
            path: input.to_path_buf(),
            source,
        })?;

        let unprotected = self
            .codec
            .strip(&source, EMPTY_PASSWORD)
            .map_err(|err| StripError::from_codec(input, output, err))?;

        match write_new(output, &unprotected.bytes) {
            Ok(()) => {}
            Err(err) if err.kind() == io::ErrorKind::AlreadyExists => {
                info!("Skipping (already processed): {}", output.display());
                return Ok(FileOutcome::AlreadyProcessed);
            }
            Err(source) => {
                return Err(StripError::WriteFailure {
                    path: output.to_path_buf(),
                    source,
                })
            }
        }

        debug!(
            pages = unprotected.page_count,
            was_encrypted = unprotected.was_encrypted,
            bytes = unprotected.bytes.len(),
            "wrote {}",
            output.display()
        );

        Ok(FileOutcome::Stripped {
            pages: unprotected.page_count,
            was_encrypted: unprotected.was_encrypted,
        })
    }

    /// Reports the security state of a single document.
    pub fn inspect(&self, input: &Path) -> StripResult<SecurityInfo> {
        let source = fs::read(input).map_err(|source| StripError::Io {
            path: input.to_path_buf(),
            source,
        })?;

        self.codec
            .inspect(&source, EMPTY_PASSWORD)
            .map_err(|err| StripError::from_codec(input, input, err))
    }
}

/// Creates `path` (failing if it exists) and fills it with `bytes`.
///
/// A partially written file is removed so that it is not mistaken for a
/// completed one by the next run.
fn write_new(path: &Path, bytes: &[u8]) -> io::Result<()> {
    let file = OpenOptions::new().write(true).create_new(true).open(path)?;

    fill_or_remove(path, file, |file| {
        file.write_all(bytes)?;
        file.sync_all()
    })
}

/// Runs `fill` on the freshly created `file` at `path`, deleting it on error.
fn fill_or_remove<F>(path: &Path, mut file: File, fill: F) -> io::Result<()>
where
    F: FnOnce(&mut File) -> io::Result<()>,
{
    if let Err(err) = fill(&mut file) {
        drop(file);
        if let Err(remove_err) = fs::remove_file(path) {
            warn!("Could not remove partial output {}: {}", path.display(), remove_err);
        }
        return Err(err);
    }

    Ok(())
}
