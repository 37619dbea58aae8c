//! URL utilities for the answering-service endpoint
//!
//! The endpoint may be configured either as a full URL (`http://host:8000/ask`)
//! or as a bare server address (`http://host:8000`), in which case the
//! standard `ask` route is appended.

use std::fmt;

use reqwest::Url;

/// Route the answering service exposes when only a server address is given.
pub const ASK_ROUTE: &str = "ask";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidEndpoint {
    pub endpoint: String,
    pub reason: String,
}

impl fmt::Display for InvalidEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Invalid endpoint '{}': {}", self.endpoint, self.reason)
    }
}

impl std::error::Error for InvalidEndpoint {}

/// Normalize a base URL by removing trailing slashes
///
/// # Examples
///
/// ```
/// use ragask::utils::url::normalize_base_url;
///
/// assert_eq!(normalize_base_url("http://localhost:8000/"), "http://localhost:8000");
/// assert_eq!(normalize_base_url("http://localhost:8000///"), "http://localhost:8000");
/// ```
pub fn normalize_base_url(base_url: &str) -> String {
    base_url.trim_end_matches('/').to_string()
}

/// Construct a complete endpoint URL from a base URL and a route
///
/// # Examples
///
/// ```
/// use ragask::utils::url::construct_api_url;
///
/// assert_eq!(
///     construct_api_url("http://localhost:8000/", "/ask"),
///     "http://localhost:8000/ask"
/// );
/// ```
pub fn construct_api_url(base_url: &str, endpoint: &str) -> String {
    let normalized_base = normalize_base_url(base_url);
    let endpoint = endpoint.trim_start_matches('/');
    format!("{}/{}", normalized_base, endpoint)
}

/// Validate a configured endpoint and expand a bare server address to its
/// `ask` route.
pub fn resolve_ask_url(endpoint: &str) -> Result<String, InvalidEndpoint> {
    let trimmed = endpoint.trim();
    let parsed = Url::parse(trimmed).map_err(|err| InvalidEndpoint {
        endpoint: trimmed.to_string(),
        reason: err.to_string(),
    })?;

    match parsed.scheme() {
        "http" | "https" => {}
        other => {
            return Err(InvalidEndpoint {
                endpoint: trimmed.to_string(),
                reason: format!("unsupported scheme '{other}'"),
            })
        }
    }

    if parsed.path().trim_matches('/').is_empty() && parsed.query().is_none() {
        Ok(construct_api_url(trimmed, ASK_ROUTE))
    } else {
        Ok(trimmed.to_string())
    }
}

/// `host:port` of an endpoint, for user-facing messages. Falls back to the
/// raw text when it does not parse.
pub fn endpoint_authority(endpoint: &str) -> String {
    match Url::parse(endpoint.trim()) {
        Ok(url) => match (url.host_str(), url.port_or_known_default()) {
            (Some(host), Some(port)) => format!("{host}:{port}"),
            (Some(host), None) => host.to_string(),
            _ => endpoint.trim().to_string(),
        },
        Err(_) => endpoint.trim().to_string(),
    }
}
