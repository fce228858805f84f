//! Golemio client error types.

/// Errors from the Golemio HTTP client.
///
/// None of these are fatal for a board run: they feed the id-scheme
/// fallback, and only a failure that survives it reaches the panel.
#[derive(Debug, thiserror::Error)]
pub enum GolemioError {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON deserialization failed
    #[error("JSON parse error: {message}{}", body_suffix(.body))]
    Json {
        message: String,
        body: Option<String>,
    },

    /// API returned an error status code
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Rate limited by the API
    #[error("rate limited by Golemio API")]
    RateLimited,

    /// Missing or rejected access token
    #[error("unauthorized (invalid API key)")]
    Unauthorized,

    /// Query had no stop ids to send
    #[error("no stop ids to query")]
    NoIds,
}

fn body_suffix(body: &Option<String>) -> String {
    body.as_ref()
        .map(|b| format!(" (body: {b})"))
        .unwrap_or_default()
}
