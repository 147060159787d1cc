use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use regex::Regex;
use tracing::debug;

use crate::error::{Result, RotateError};

/// A matched directory together with the attributes it is sorted by.
///
/// Attributes are read once at selection time and never refreshed, so a
/// directory touched mid-run keeps its original position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateDirectory {
    path: PathBuf,
    name: String,
    modified: SystemTime,
}

impl CandidateDirectory {
    /// Create a snapshot from already known attributes
    pub fn new(path: impl Into<PathBuf>, modified: SystemTime) -> Self {
        let path = path.into();
        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self {
            path,
            name,
            modified,
        }
    }

    /// Full path of the directory
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Base name of the directory
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Modification time captured at selection
    pub fn modified(&self) -> SystemTime {
        self.modified
    }
}

/// Compile a user pattern so that it only matches whole names
pub fn compile_name_pattern(pattern: &str) -> Result<Regex> {
    Regex::new(&format!("^(?:{pattern})$")).map_err(|source| RotateError::InvalidPattern {
        pattern: pattern.to_string(),
        source,
    })
}

/// List the immediate child directories of `base_dir` whose names match.
///
/// `pattern` must already be anchored (see [`compile_name_pattern`]). Plain
/// files and symlinks are ignored, as are entries that vanish between listing
/// and inspection. The result is in directory enumeration order.
pub fn select_directories(base_dir: &Path, pattern: &Regex) -> Result<Vec<CandidateDirectory>> {
    if !base_dir.is_dir() {
        return Err(RotateError::NotFound(base_dir.to_path_buf()));
    }

    let entries = fs::read_dir(base_dir).map_err(|source| RotateError::IoError {
        path: base_dir.to_path_buf(),
        source,
    })?;

    let mut candidates = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|source| RotateError::IoError {
            path: base_dir.to_path_buf(),
            source,
        })?;

        let file_name = entry.file_name();
        let Some(name) = file_name.to_str() else {
            debug!("skipping non UTF-8 name {:?}", entry.path());
            continue;
        };
        if !pattern.is_match(name) {
            continue;
        }

        // DirEntry::metadata does not traverse symlinks
        let metadata = match entry.metadata() {
            Ok(metadata) => metadata,
            Err(err) => {
                debug!("skipping {:?}: {err}", entry.path());
                continue;
            }
        };
        if !metadata.is_dir() {
            debug!("skipping {:?}: not a directory", entry.path());
            continue;
        }

        let modified = metadata.modified().map_err(|source| RotateError::IoError {
            path: entry.path(),
            source,
        })?;
        candidates.push(CandidateDirectory::new(entry.path(), modified));
    }

    debug!(
        "found {} matches for {} in {}",
        candidates.len(),
        pattern.as_str(),
        base_dir.display()
    );

    Ok(candidates)
}
