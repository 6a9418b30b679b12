use thiserror::Error;

/// Reasons a token fetch can fail.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("invalid token endpoint: {0}")]
    InvalidUrl(String),

    #[error("failed to serialize token request body: {0}")]
    FailedToSerializeBody(#[source] serde_json::Error),

    #[error("failed to parse token: {0}")]
    FailedToParseToken(String),

    /// No Tokio runtime was running and none could be started.
    #[error("cannot start a runtime for the token fetch: {0}")]
    Runtime(#[source] std::io::Error),

    /// Network failures and non-2xx responses, as reported by the client.
    #[error(transparent)]
    Transport(#[from] reqwest::Error),
}

impl AuthError {
    /// HTTP status carried by a transport failure, if the server answered.
    pub fn status(&self) -> Option<reqwest::StatusCode> {
        match self {
            AuthError::Transport(e) => e.status(),
            _ => None,
        }
    }
}
