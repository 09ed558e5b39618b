//! Error types for batch security stripping.
//!
//! Errors are split by scope: some only concern the file being processed and
//! are contained by the batch loop, the rest describe the environment and end
//! the run.

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::codec::CodecError;

/// Result type alias for stripping operations.
pub type StripResult<T> = Result<T, StripError>;

/// Every failure a batch run can report.
#[derive(Debug, Error)]
pub enum StripError {
    /// The configured input directory is missing or is not a directory
    #[error("Input directory not found: {}", .path.display())]
    DirectoryNotFound { path: PathBuf },

    /// The document is encrypted and the empty password does not open it
    #[error("Could not decrypt (owner password needed): {}", .path.display())]
    DecryptionFailed { path: PathBuf, reason: String },

    /// The input bytes are not a parseable PDF
    #[error("Could not parse PDF '{}': {reason}", .path.display())]
    ParseFailure { path: PathBuf, reason: String },

    /// The unprotected copy could not be written
    #[error("Failed to write '{}': {source}", .path.display())]
    WriteFailure {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Any other filesystem error (listing, reading, creating directories)
    #[error("IO error for path '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The file name pattern is not a valid glob
    #[error("Invalid file pattern '{pattern}': {reason}")]
    InvalidPattern { pattern: String, reason: String },
}

impl StripError {
    /// Returns true for errors confined to a single input file.
    ///
    /// The batch loop logs these and moves on to the next file; anything else
    /// aborts the run.
    pub fn is_contained(&self) -> bool {
        matches!(
            self,
            Self::DecryptionFailed { .. } | Self::ParseFailure { .. }
        )
    }

    /// Attaches file context to a codec failure.
    ///
    /// Parse and decrypt failures name the input, serialization failures the
    /// output that could not be produced.
    pub(crate) fn from_codec(input: &Path, output: &Path, err: CodecError) -> Self {
        match err {
            CodecError::Parse(reason) => Self::ParseFailure {
                path: input.to_path_buf(),
                reason,
            },
            CodecError::Decrypt(reason) => Self::DecryptionFailed {
                path: input.to_path_buf(),
                reason,
            },
            CodecError::Serialize(reason) => Self::WriteFailure {
                path: output.to_path_buf(),
                source: io::Error::other(reason),
            },
        }
    }
}
