use thiserror::Error;

/// Failures raised by a `FormPage` implementation.
#[derive(Debug, Error)]
pub enum PageError {
    /// Node.js browser server failed to spawn
    #[error("Failed to spawn {script} (is Node.js installed?): {source}")]
    SubprocessSpawn {
        script: String,
        #[source]
        source: std::io::Error,
    },

    /// Reading or writing the browser server pipes failed
    #[error("Browser session I/O error: {0}")]
    SessionIO(String),

    #[error("JSON parse error ({context}): {source}")]
    JsonParse {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("JSON serialize error ({context}): {source}")]
    JsonSerialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// The server answered `ok: false`
    #[error("Browser command '{command}' failed: {error}")]
    Protocol { command: String, error: String },

    /// The field handle no longer resolves to a live element
    #[error("Field '{field}' is not available: {reason}")]
    StaleField { field: String, reason: String },

    /// The page is gone (closed tab, crashed browser)
    #[error("Page closed: {0}")]
    Closed(String),
}
