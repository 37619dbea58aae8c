use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::core::builtin_examples::load_builtin_examples;
use crate::core::constants::DEFAULT_ENDPOINT;

#[derive(Debug, Serialize, Deserialize, Default, Clone, PartialEq, Eq)]
pub struct Config {
    /// Answering service endpoint (full URL or bare server address)
    pub endpoint: Option<String>,
    /// Give up on a request after this many seconds; unset means wait forever
    pub request_timeout_secs: Option<u64>,
    /// Replaces the built-in example questions when set
    pub example_questions: Option<Vec<String>>,
    /// Append completed exchanges to this file
    pub log_file: Option<String>,
}

impl Config {
    /// Picks the endpoint by precedence: CLI flag, environment, config file,
    /// built-in default. Blank values at any level are skipped.
    pub fn resolve_endpoint(&self, cli: Option<&str>, env: Option<&str>) -> String {
        [cli, env, self.endpoint.as_deref()]
            .into_iter()
            .flatten()
            .map(str::trim)
            .find(|value| !value.is_empty())
            .unwrap_or(DEFAULT_ENDPOINT)
            .to_string()
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
    }

    /// Configured example questions, falling back to the built-in list.
    pub fn example_questions(&self) -> Vec<String> {
        match &self.example_questions {
            Some(custom) => {
                let cleaned: Vec<String> = custom
                    .iter()
                    .map(|q| q.trim())
                    .filter(|q| !q.is_empty())
                    .map(str::to_string)
                    .collect();
                if cleaned.is_empty() {
                    load_builtin_examples()
                } else {
                    cleaned
                }
            }
            None => load_builtin_examples(),
        }
    }
}

pub fn path_display<P: AsRef<Path>>(path: P) -> String {
    let path = path.as_ref();

    #[cfg(unix)]
    {
        if let Some(home) = std::env::var_os("HOME") {
            let home_path = PathBuf::from(home);
            if let Ok(relative) = path.strip_prefix(&home_path) {
                return format!("~/{}", relative.display());
            }
        }
    }

    path.display().to_string()
}
