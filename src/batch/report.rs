//! Per-file outcomes and the batch summary.

use std::fmt;

/// What happened to one input document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileOutcome {
    /// An unprotected copy was written
    Stripped { pages: usize, was_encrypted: bool },

    /// A file with the same name already existed in the output directory
    AlreadyProcessed,

    /// Encrypted and the empty password does not open it
    DecryptionFailed,

    /// Not a readable PDF
    Unparseable { reason: String },
}

impl FileOutcome {
    /// Returns true if this run wrote an output file.
    pub fn is_written(&self) -> bool {
        matches!(self, Self::Stripped { .. })
    }

    /// Returns true if the file was skipped because of a problem with it.
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::DecryptionFailed | Self::Unparseable { .. })
    }
}

impl fmt::Display for FileOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Stripped {
                pages,
                was_encrypted: true,
            } => write!(f, "decrypted, {} page(s) written", pages),
            Self::Stripped { pages, .. } => write!(f, "{} page(s) written", pages),
            Self::AlreadyProcessed => write!(f, "already processed"),
            Self::DecryptionFailed => write!(f, "could not decrypt (owner password needed)"),
            Self::Unparseable { reason } => write!(f, "not a readable PDF ({})", reason),
        }
    }
}

/// Outcome for a single input, keyed by file name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileReport {
    pub file_name: String,
    pub outcome: FileOutcome,
}

/// Every file visited by a run, in visiting order.
#[derive(Debug, Clone, Default)]
pub struct BatchReport {
    pub files: Vec<FileReport>,
}

impl BatchReport {
    /// Appends the outcome for one file.
    pub fn record(&mut self, file_name: impl Into<String>, outcome: FileOutcome) {
        self.files.push(FileReport {
            file_name: file_name.into(),
            outcome,
        });
    }

    /// Number of files visited.
    pub fn total(&self) -> usize {
        self.files.len()
    }

    /// Number of unprotected copies written.
    pub fn stripped(&self) -> usize {
        self.count(FileOutcome::is_written)
    }

    /// Number of files skipped because their output already existed.
    pub fn already_processed(&self) -> usize {
        self.count(|outcome| *outcome == FileOutcome::AlreadyProcessed)
    }

    /// Number of files skipped because of a decrypt or parse failure.
    pub fn failed(&self) -> usize {
        self.count(FileOutcome::is_failure)
    }

    /// Looks up the outcome for a file name.
    pub fn outcome(&self, file_name: &str) -> Option<&FileOutcome> {
        self.files
            .iter()
            .find(|report| report.file_name == file_name)
            .map(|report| &report.outcome)
    }

    fn count(&self, predicate: impl Fn(&FileOutcome) -> bool) -> usize {
        self.files
            .iter()
            .filter(|report| predicate(&report.outcome))
            .count()
    }
}

impl fmt::Display for BatchReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} file(s): {} stripped, {} already processed, {} failed",
            self.total(),
            self.stripped(),
            self.already_processed(),
            self.failed()
        )
    }
}
