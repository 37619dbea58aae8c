use crate::core::config::data::Config;
use crate::utils::url::resolve_ask_url;

/// Keys accepted by `ragask set` / `ragask unset`.
pub const CONFIG_KEYS: &[&str] = &["endpoint", "request-timeout", "log-file", "example"];

impl Config {
    /// Applies `ragask set <key> <value>`. `example` appends to the custom
    /// example list instead of replacing it.
    pub fn set_value(&mut self, key: &str, value: &str) -> Result<String, String> {
        let value = value.trim();
        if value.is_empty() {
            return Err(format!("A value is required for '{key}'"));
        }

        match key {
            "endpoint" => {
                resolve_ask_url(value).map_err(|err| err.to_string())?;
                self.endpoint = Some(value.to_string());
                Ok(format!("Set endpoint to: {value}"))
            }
            "request-timeout" => {
                let secs: u64 = value
                    .parse()
                    .map_err(|_| format!("request-timeout must be a whole number of seconds, got '{value}'"))?;
                self.request_timeout_secs = Some(secs);
                Ok(format!("Set request-timeout to: {secs}s"))
            }
            "log-file" => {
                self.log_file = Some(value.to_string());
                Ok(format!("Set log-file to: {value}"))
            }
            "example" => {
                self.example_questions
                    .get_or_insert_with(Vec::new)
                    .push(value.to_string());
                Ok(format!("Added example question: {value}"))
            }
            _ => Err(unknown_key(key)),
        }
    }

    pub fn unset_value(&mut self, key: &str) -> Result<String, String> {
        match key {
            "endpoint" => self.endpoint = None,
            "request-timeout" => self.request_timeout_secs = None,
            "log-file" => self.log_file = None,
            "example" => self.example_questions = None,
            _ => return Err(unknown_key(key)),
        }
        Ok(format!("Unset {key}"))
    }
}

fn unknown_key(key: &str) -> String {
    format!(
        "Unknown config key: {key} (expected one of: {})",
        CONFIG_KEYS.join(", ")
    )
}
