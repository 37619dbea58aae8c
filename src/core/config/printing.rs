use std::fmt::Write;

use crate::core::config::data::Config;

impl Config {
    pub fn render_all(&self) -> String {
        let mut out = String::from("Current configuration:\n");
        let _ = match &self.endpoint {
            Some(endpoint) => writeln!(out, "  endpoint: {endpoint}"),
            None => writeln!(out, "  endpoint: (unset)"),
        };
        let _ = match self.request_timeout_secs {
            Some(secs) => writeln!(out, "  request-timeout: {secs}s"),
            None => writeln!(out, "  request-timeout: (none)"),
        };
        let _ = match &self.log_file {
            Some(path) => writeln!(out, "  log-file: {path}"),
            None => writeln!(out, "  log-file: (unset)"),
        };
        match &self.example_questions {
            Some(examples) if !examples.is_empty() => {
                let _ = writeln!(out, "  examples:");
                for example in examples {
                    let _ = writeln!(out, "    - {example}");
                }
            }
            _ => {
                let _ = writeln!(out, "  examples: (built-in)");
            }
        }
        out
    }

    pub fn print_all(&self) {
        print!("{}", self.render_all());
    }
}
