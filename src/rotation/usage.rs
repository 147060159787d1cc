use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::{Result, RotateError};

/// Calculate the total size of the regular files under a directory.
///
/// Symbolic links are never followed, so a link pointing back at one of its
/// ancestors is a leaf with no content. Directories themselves count as zero.
/// The first unreadable entry aborts the walk with
/// [`RotateError::SizeComputation`] naming that entry.
pub fn calculate_directory_size(path: &Path) -> Result<u64> {
    let mut total_size = 0;

    for entry in WalkDir::new(path).follow_links(false) {
        let entry = entry.map_err(|source| RotateError::SizeComputation {
            path: source
                .path()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| PathBuf::from(path)),
            source,
        })?;

        if entry.file_type().is_file() {
            let metadata = entry.metadata().map_err(|source| RotateError::SizeComputation {
                path: entry.path().to_path_buf(),
                source,
            })?;
            total_size += metadata.len();
        }
    }

    Ok(total_size)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_sums_nested_files() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().join("20240101");
        fs::create_dir_all(root.join("cam1/clips")).unwrap();
        fs::write(root.join("index.txt"), vec![b'x'; 100]).unwrap();
        fs::write(root.join("cam1/a.jpg"), vec![b'x'; 250]).unwrap();
        fs::write(root.join("cam1/clips/b.mp4"), vec![b'x'; 4_000]).unwrap();

        assert_eq!(calculate_directory_size(&root).unwrap(), 4_350);
    }

    #[test]
    fn test_empty_directory_is_zero() {
        let temp_dir = TempDir::new().unwrap();
        fs::create_dir_all(temp_dir.path().join("a/b/c")).unwrap();

        assert_eq!(calculate_directory_size(temp_dir.path()).unwrap(), 0);
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinks_are_not_followed() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().join("20240101");
        let outside = temp_dir.path().join("outside");
        fs::create_dir_all(&root).unwrap();
        fs::create_dir_all(&outside).unwrap();
        fs::write(root.join("own.bin"), vec![b'x'; 10]).unwrap();
        fs::write(outside.join("big.bin"), vec![b'x'; 10_000]).unwrap();

        std::os::unix::fs::symlink(&outside, root.join("link-out")).unwrap();
        std::os::unix::fs::symlink(&root, root.join("loop")).unwrap();
        std::os::unix::fs::symlink("self", root.join("self")).unwrap();

        assert_eq!(calculate_directory_size(&root).unwrap(), 10);
    }

    #[test]
    fn test_missing_directory_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("gone");

        let result = calculate_directory_size(&missing);
        assert!(matches!(
            result,
            Err(RotateError::SizeComputation { ref path, .. }) if path == &missing
        ));
    }
}
