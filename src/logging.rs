use std::error::Error;

use tracing_subscriber::EnvFilter;

/// Environment variable holding an `EnvFilter` directive that overrides `-v`
pub const LOG_ENV: &str = "ROTDIR_LOG";

/// Map the CLI verbosity to a filter directive.
///
/// Quiet shows errors only; otherwise warnings by default, `-v` adds info
/// and `-vv` adds debug output.
pub fn level_directive(verbose: u8, quiet: bool) -> &'static str {
    match (quiet, verbose) {
        (true, _) => "error",
        (false, 0) => "warn",
        (false, 1) => "info",
        (false, _) => "debug",
    }
}

/// Install the stderr subscriber.
///
/// Safe to call more than once; only the first call takes effect.
pub fn init(verbose: u8, quiet: bool) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(level_directive(verbose, quiet)));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Render an error followed by each of its sources, colon separated.
///
/// A source whose message already ends the previous one is left out, since
/// wrappers such as `walkdir::Error` and `glob::GlobError` print their cause
/// themselves.
pub(crate) fn error_chain(err: &dyn Error) -> String {
    let mut message = err.to_string();
    let mut previous = message.clone();
    let mut source = err.source();
    while let Some(cause) = source {
        let rendered = cause.to_string();
        if !previous.ends_with(&rendered) {
            message.push_str(": ");
            message.push_str(&rendered);
        }
        previous = rendered;
        source = cause.source();
    }
    message
}
