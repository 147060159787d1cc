//! # rotdir CLI
//!
//! Keeps the newest dated directories under one or more base directories
//! and deletes the rest, so capture and output directories never fill up a
//! disk.
//!
//! ## Quick Start
//!
//! ```bash
//! # Keep the 7 most recent day directories of every camera
//! rotdir --path '/media/motion/*/*' --keep_last 7
//!
//! # Keep as many recent days as fit in 350 GB, ordered by name
//! rotdir -p /media/motion/cam1 -m 350G -s name -v
//! ```
//!
//! ## Environment Variables
//!
//! - `ROTDIR_PATH`, `ROTDIR_PATTERN`, `ROTDIR_KEEP_LAST`, `ROTDIR_MAX_SIZE`,
//!   `ROTDIR_SORT_BY`, `ROTDIR_VERBOSE`, `ROTDIR_QUIET`: defaults for the
//!   matching flags
//! - `ROTDIR_LOG`: tracing filter directive overriding `-v`/`-q`

use std::io::IsTerminal;

use rotdir::cli::Cli;

fn main() -> miette::Result<()> {
    miette::set_panic_hook();

    // Plain output when stderr goes to a log file or a scheduler
    if std::io::stderr().is_terminal() {
        miette::set_hook(Box::new(|_| {
            Box::new(
                miette::GraphicalReportHandler::new()
                    .with_theme(miette::GraphicalTheme::unicode_nocolor())
                    .with_context_lines(3),
            )
        }))?;
    } else {
        miette::set_hook(Box::new(|_| {
            Box::new(
                miette::GraphicalReportHandler::new()
                    .with_theme(miette::GraphicalTheme::none())
                    .with_context_lines(0),
            )
        }))?;
    }

    let cli = Cli::parse_args();
    rotdir::logging::init(cli.verbose(), cli.quiet());

    rotdir::commands::execute(&cli)?;

    Ok(())
}
