//! Input discovery.

use crate::error::{StripError, StripResult};
use glob::{MatchOptions, Pattern};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Shell-style matching: case-sensitive, `*` never matches a leading dot.
const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: true,
};

/// File name filter for input documents.
#[derive(Debug, Clone)]
pub struct FileFilter {
    pattern: Pattern,
}

impl FileFilter {
    /// Compiles a glob such as `*.pdf`.
    pub fn new(pattern: &str) -> StripResult<Self> {
        let pattern = Pattern::new(pattern).map_err(|e| StripError::InvalidPattern {
            pattern: pattern.to_string(),
            reason: e.to_string(),
        })?;
        Ok(Self { pattern })
    }

    /// Returns true if a bare file name is selected.
    pub fn matches(&self, file_name: &str) -> bool {
        self.pattern.matches_with(file_name, MATCH_OPTIONS)
    }
}

/// Lists regular files directly inside `dir` whose names pass `filter`.
///
/// Entries come back in directory listing order; subdirectories are never
/// descended into.
pub fn find_inputs(dir: &Path, filter: &FileFilter) -> StripResult<Vec<PathBuf>> {
    let io_error = |source: std::io::Error| StripError::Io {
        path: dir.to_path_buf(),
        source,
    };

    let mut inputs = Vec::new();
    for entry in fs::read_dir(dir).map_err(io_error)? {
        let path = entry.map_err(io_error)?.path();

        if !path.is_file() {
            continue;
        }

        let Some(name) = path.file_name().map(|n| n.to_string_lossy().into_owned()) else {
            continue;
        };

        if filter.matches(&name) {
            inputs.push(path);
        } else {
            debug!(file = %name, "ignoring non-matching file");
        }
    }

    Ok(inputs)
}
