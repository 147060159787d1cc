use std::fs;
use std::io;
use std::path::Path;

use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::error::RotateError;
use crate::logging::error_chain;

/// What happened to one directory handed to [`remove_directory`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RemovalReport {
    /// Entries (files, links and directories) successfully removed
    pub entries_removed: usize,
    /// Entries that could not be removed or read
    pub failures: usize,
    /// The directory was left alone because it is not writable
    pub skipped: bool,
}

impl RemovalReport {
    /// True when the directory was attempted and nothing went wrong
    pub fn is_complete(&self) -> bool {
        !self.skipped && self.failures == 0
    }
}

/// Remove `path` and everything beneath it, best effort.
///
/// A directory the current user cannot write to is skipped with a warning
/// instead of producing one failure per entry. Otherwise every entry is
/// removed children-first; an entry that cannot be removed is logged and the
/// walk carries on with its siblings. Failures are reported only through the
/// log and the returned [`RemovalReport`].
pub fn remove_directory(path: &Path) -> RemovalReport {
    remove_tree(path, is_writable, remove_entry)
}

fn remove_entry(path: &Path, is_dir: bool) -> io::Result<()> {
    if is_dir {
        fs::remove_dir(path)
    } else {
        fs::remove_file(path)
    }
}

fn remove_tree<W, R>(path: &Path, writable: W, mut remove: R) -> RemovalReport
where
    W: Fn(&Path) -> bool,
    R: FnMut(&Path, bool) -> io::Result<()>,
{
    let mut report = RemovalReport::default();

    if !writable(path) {
        warn!("no write access to {}, skipping", path.display());
        report.skipped = true;
        return report;
    }

    for entry in WalkDir::new(path).follow_links(false).contents_first(true) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(source) => {
                let failed = source
                    .path()
                    .map(Path::to_path_buf)
                    .unwrap_or_else(|| path.to_path_buf());
                warn!(
                    "{}",
                    error_chain(&RotateError::Deletion {
                        path: failed,
                        source: source.into(),
                    })
                );
                report.failures += 1;
                continue;
            }
        };

        match remove(entry.path(), entry.file_type().is_dir()) {
            Ok(()) => report.entries_removed += 1,
            Err(source) => {
                warn!(
                    "{}",
                    error_chain(&RotateError::Deletion {
                        path: entry.path().to_path_buf(),
                        source,
                    })
                );
                report.failures += 1;
            }
        }
    }

    debug!(
        "removed {} entries under {} ({} failures)",
        report.entries_removed,
        path.display(),
        report.failures
    );

    report
}

/// Check write permission for the current user the way `access(2)` does
#[cfg(unix)]
fn is_writable(path: &Path) -> bool {
    use std::ffi::CString;
    use std::os::unix::ffi::OsStrExt;

    let Ok(c_path) = CString::new(path.as_os_str().as_bytes()) else {
        return false;
    };
    // SAFETY: c_path is a valid NUL-terminated string that outlives the call.
    unsafe { libc::access(c_path.as_ptr(), libc::W_OK) == 0 }
}

#[cfg(not(unix))]
fn is_writable(path: &Path) -> bool {
    fs::metadata(path)
        .map(|metadata| !metadata.permissions().readonly())
        .unwrap_or(false)
}
