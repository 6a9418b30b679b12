use std::fmt;

use chrono::{DateTime, Duration, Utc};

static BEARER_PREFIX: &str = "Bearer ";

/// Bearer credential with an absolute expiry.
///
/// Tokens never refresh themselves; once expired a holder fetches a new one.
#[derive(Clone, PartialEq, Eq)]
pub struct Token {
    value: String,
    expires_at: DateTime<Utc>,
}

impl Token {
    pub fn new(value: impl Into<String>, expires_at: DateTime<Utc>) -> Self {
        Self { value: value.into(), expires_at }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }

    /// Expired at and after the expiry instant.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }

    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }

    /// Remaining lifetime, zero once expired.
    pub fn expires_in(&self) -> Duration {
        (self.expires_at - Utc::now()).max(Duration::zero())
    }

    /// True when the token expires within `margin` from now.
    pub fn expires_within(&self, margin: Duration) -> bool {
        self.is_expired_at(Utc::now() + margin)
    }

    /// Value for an `Authorization` header.
    pub fn authorization_header(&self) -> String {
        format!("{}{}", BEARER_PREFIX, self.value)
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Token")
            .field("value", &"<redacted>")
            .field("expires_at", &self.expires_at)
            .finish()
    }
}
