//! Run configuration.

use std::path::{Path, PathBuf};

/// Directory scanned when none is given.
pub const DEFAULT_INPUT_DIR: &str = "./data";

/// Directory written to when none is given.
pub const DEFAULT_OUTPUT_DIR: &str = "./processed";

/// File name pattern selecting the documents to process.
pub const DEFAULT_PATTERN: &str = "*.pdf";

/// Where to read documents from and where to write their unprotected copies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StripConfig {
    /// Directory scanned (non-recursively) for input documents
    pub input_dir: PathBuf,

    /// Directory receiving the unprotected copies, created on demand
    pub output_dir: PathBuf,

    /// Case-sensitive glob matched against file names in `input_dir`
    pub pattern: String,
}

impl Default for StripConfig {
    fn default() -> Self {
        Self::new(DEFAULT_INPUT_DIR, DEFAULT_OUTPUT_DIR)
    }
}

impl StripConfig {
    /// Creates a configuration for the given directories with the default pattern.
    pub fn new(input_dir: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            input_dir: input_dir.into(),
            output_dir: output_dir.into(),
            pattern: DEFAULT_PATTERN.to_string(),
        }
    }

    /// Sets the file name pattern.
    pub fn with_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.pattern = pattern.into();
        self
    }

    /// Output location for an input document: same file name, output directory.
    pub fn output_path_for(&self, input: &Path) -> Option<PathBuf> {
        input.file_name().map(|name| self.output_dir.join(name))
    }
}
