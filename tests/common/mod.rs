use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

use filetime::FileTime;

/// Create a day directory holding one file of `size` bytes, aged `age_days`.
///
/// The file is written before the directory mtime is set, since creating it
/// would bump the directory's mtime again.
pub fn create_day_dir(base: &Path, name: &str, size: usize, age_days: u64) -> PathBuf {
    let dir = base.join(name);
    fs::create_dir_all(&dir).unwrap();
    if size > 0 {
        fs::write(dir.join("capture.bin"), vec![b'x'; size]).unwrap();
    }

    let mtime = SystemTime::now() - Duration::from_secs(age_days * 24 * 60 * 60 + 60);
    filetime::set_file_mtime(&dir, FileTime::from_system_time(mtime)).unwrap();
    dir
}

/// Create `20230101`..`202301NN`, the newest day being the youngest
pub fn create_ten_days(base: &Path, size: usize) -> Vec<PathBuf> {
    (1..=10u64)
        .map(|day| create_day_dir(base, &format!("202301{day:02}"), size, 10 - day))
        .collect()
}

/// Sorted names of the immediate children of `base`
pub fn child_names(base: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(base)
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

#[cfg(unix)]
pub fn running_as_root() -> bool {
    // SAFETY: geteuid has no preconditions.
    unsafe { libc::geteuid() == 0 }
}
