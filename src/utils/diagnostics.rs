//! Diagnostic (`tracing`) output.
//!
//! The TUI owns the terminal, so interactive sessions only emit diagnostics
//! when a file is given. One-shot commands log to stderr.

use std::error::Error;
use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::core::constants::LOG_FILTER_ENV_VAR;

fn env_filter(default_directive: &str) -> EnvFilter {
    EnvFilter::try_from_env(LOG_FILTER_ENV_VAR).unwrap_or_else(|_| EnvFilter::new(default_directive))
}

pub fn init_file_diagnostics(path: &Path) -> Result<(), Box<dyn Error>> {
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter("info"))
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init()
        .map_err(|err| err as Box<dyn Error>)?;
    Ok(())
}

pub fn init_stderr_diagnostics() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter("warn"))
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|err| err as Box<dyn Error>)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn a_second_subscriber_is_reported_as_an_error() {
        let dir = TempDir::new().expect("temp dir");
        let path = dir.path().join("debug.log");

        // The global subscriber may already be set by another test in this
        // process; either way, installing another one must fail cleanly.
        let _ = init_file_diagnostics(&path);
        assert!(path.exists());
        assert!(init_stderr_diagnostics().is_err());
        assert!(init_file_diagnostics(&path).is_err());
    }
}
