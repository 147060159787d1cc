//! Turns parsed CLI arguments into a [`Rotation`] and runs it.

use tracing::info;

use crate::cli::Cli;
use crate::error::Result;
use crate::rotation::{Rotation, RotationStats};


/// Validate the arguments and run the rotation.
///
/// Only invalid arguments produce an error. Filesystem problems are logged
/// by the rotation and reflected in the returned statistics.
pub fn execute(cli: &Cli) -> Result<RotationStats> {
    let rotation = build_rotation(cli)?;
    let stats = rotation.run();

    info!(
        "done: {} directories removed in {} base directories",
        stats.removed(),
        stats.bases.len()
    );

    Ok(stats)
}

/// Build the rotation described by `cli` without touching the filesystem
pub fn build_rotation(cli: &Cli) -> Result<Rotation> {
    let mut builder = Rotation::builder()
        .path(cli.path())
        .pattern(cli.pattern())
        .sort_key(cli.sort_by().into());

    if let Some(count) = cli.keep_last() {
        builder = builder.keep_last(clamp_keep_last(count));
    }
    if let Some(bytes) = cli.max_size() {
        builder = builder.max_size(bytes);
    }

    builder.build()
}

/// Negative counts keep nothing; counts beyond `usize` keep everything
fn clamp_keep_last(count: i64) -> usize {
    if count < 0 {
        0
    } else {
        usize::try_from(count).unwrap_or(usize::MAX)
    }
}
