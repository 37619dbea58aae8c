//! Shared constants used across the application

/// Endpoint used when neither the CLI, the environment, nor the config names one.
pub const DEFAULT_ENDPOINT: &str = "http://localhost:8000/ask";

/// Environment variable that overrides the configured endpoint.
pub const ENDPOINT_ENV_VAR: &str = "RAGASK_ENDPOINT";

/// Environment variable holding the diagnostic log filter directives.
pub const LOG_FILTER_ENV_VAR: &str = "RAGASK_LOG";

/// The one message a user ever sees when a question could not be answered.
pub fn failure_message(service_authority: &str) -> String {
    format!("Failed to get answer. Please check if the backend is running on {service_authority}")
}
