use base64::Engine;
use chrono::{DateTime, Duration, TimeZone, Utc};
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::token::{AuthError, Token};

static ACCESS_TOKEN_FIELD: &str = "access_token";
static EXPIRES_IN_FIELD: &str = "expires_in";
static EXPIRES_AT_FIELD: &str = "expires_at";

#[derive(Debug, Deserialize)]
struct JwtClaims {
    exp: i64,
}

/// Where the expiry of a token came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpirationSource {
    /// `expires_in`, seconds relative to now
    Seconds,
    /// `expires_at`, unix seconds
    Unix,
    /// `exp` claim of a JWT access token
    JwtClaim,
}

/// Parse a token endpoint response body into a [`Token`].
///
/// Anything short of a non-empty `access_token` with a future expiry is
/// reported as [`AuthError::FailedToParseToken`].
pub fn parse_token_response(body: &str) -> Result<Token, AuthError> {
    parse_token_response_at(body, Utc::now())
}

pub(crate) fn parse_token_response_at(body: &str, now: DateTime<Utc>) -> Result<Token, AuthError> {
    let json: Value = serde_json::from_str(body).map_err(|e| {
        warn!("token response is not valid JSON: {}", e);
        parse_error(format!("body is not valid JSON: {}", e))
    })?;

    let token_value = json
        .get(ACCESS_TOKEN_FIELD)
        .ok_or_else(|| parse_error(format!("field '{}' not found", ACCESS_TOKEN_FIELD)))?
        .as_str()
        .ok_or_else(|| parse_error(format!("field '{}' is not a string", ACCESS_TOKEN_FIELD)))?;

    if token_value.is_empty() {
        return Err(parse_error(format!("field '{}' is empty", ACCESS_TOKEN_FIELD)));
    }

    let (expires_at, source) = get_expiration(&json, token_value, now)?;
    if expires_at <= now {
        return Err(parse_error(format!("token already expired at {}", expires_at)));
    }

    debug!(expires_at = %expires_at, source = ?source, "token parsed successfully");
    Ok(Token::new(token_value, expires_at))
}

fn get_expiration(
    json: &Value,
    token_value: &str,
    now: DateTime<Utc>,
) -> Result<(DateTime<Utc>, ExpirationSource), AuthError> {
    if let Some(raw) = json.get(EXPIRES_IN_FIELD) {
        let seconds = raw
            .as_i64()
            .ok_or_else(|| parse_error(format!("field '{}' is not an integer", EXPIRES_IN_FIELD)))?;
        let expires_at = Duration::try_seconds(seconds)
            .and_then(|ttl| now.checked_add_signed(ttl))
            .ok_or_else(|| parse_error(format!("field '{}' is out of range", EXPIRES_IN_FIELD)))?;
        return Ok((expires_at, ExpirationSource::Seconds));
    }

    if let Some(raw) = json.get(EXPIRES_AT_FIELD) {
        let unix = raw
            .as_i64()
            .ok_or_else(|| parse_error(format!("field '{}' is not an integer", EXPIRES_AT_FIELD)))?;
        return Ok((unix_to_datetime(unix, EXPIRES_AT_FIELD)?, ExpirationSource::Unix));
    }

    let claims = decode_jwt_claims(token_value)
        .map_err(|reason| parse_error(format!("no expiry in response and {}", reason)))?;
    Ok((unix_to_datetime(claims.exp, "exp")?, ExpirationSource::JwtClaim))
}

fn decode_jwt_claims(token_value: &str) -> Result<JwtClaims, String> {
    let parts: Vec<&str> = token_value.split('.').collect();
    if parts.len() != 3 {
        return Err("token is not a JWT".to_owned());
    }

    let decoded = base64::engine::general_purpose::URL_SAFE_NO_PAD
        .decode(parts[1].trim_end_matches('='))
        .map_err(|e| format!("JWT payload is not base64: {}", e))?;

    serde_json::from_slice::<JwtClaims>(&decoded).map_err(|e| format!("invalid JWT payload: {}", e))
}

fn unix_to_datetime(unix: i64, field: &str) -> Result<DateTime<Utc>, AuthError> {
    Utc.timestamp_opt(unix, 0)
        .single()
        .ok_or_else(|| parse_error(format!("field '{}' is not a valid timestamp", field)))
}

fn parse_error(reason: String) -> AuthError {
    AuthError::FailedToParseToken(reason)
}
