//! Bearer token inspection
//!
//! The console never verifies signatures; it only reads the `exp` claim to
//! decide whether a token is still worth sending.

use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;

use crate::{ClientError, ClientResult};

/// Claims the console reads from the token payload
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Claims {
    /// Expiration time (Unix timestamp, seconds)
    #[serde(deserialize_with = "numeric_seconds")]
    pub exp: i64,
    /// Subject
    #[serde(default)]
    pub sub: Option<String>,
    /// Email, when the issuer includes it
    #[serde(default)]
    pub email: Option<String>,
}

#[allow(clippy::cast_possible_truncation)]
fn numeric_seconds<'de, D: serde::Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
    match Value::deserialize(deserializer)? {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f as i64))
            .ok_or_else(|| serde::de::Error::custom("exp out of range")),
        other => Err(serde::de::Error::custom(format!("exp is not a number: {other}"))),
    }
}

impl Claims {
    /// Expiration as a timestamp
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.exp, 0)
    }
}

/// Decode the payload segment of a JWT without verifying it
///
/// # Errors
///
/// Returns [`ClientError::InvalidToken`] when the token does not have three
/// segments, the payload is not base64url JSON, or `exp` is missing.
pub fn decode_claims(token: &str) -> ClientResult<Claims> {
    let mut segments = token.trim().split('.');
    let (Some(_header), Some(payload), Some(_signature), None) = (
        segments.next(),
        segments.next(),
        segments.next(),
        segments.next(),
    ) else {
        return Err(ClientError::invalid_token("expected three dot-separated segments"));
    };

    let bytes = URL_SAFE_NO_PAD
        .decode(payload.trim_end_matches('='))
        .map_err(|e| ClientError::invalid_token(format!("payload is not base64url: {e}")))?;

    serde_json::from_slice(&bytes)
        .map_err(|e| ClientError::invalid_token(format!("payload is not a claims object: {e}")))
}

/// Expiration of a token, `None` if it cannot be decoded
pub fn expiry(token: &str) -> Option<DateTime<Utc>> {
    decode_claims(token).ok().and_then(|c| c.expires_at())
}

/// Whether `token` decodes and expires after `now`
pub fn is_token_valid_at(token: &str, now: DateTime<Utc>) -> bool {
    decode_claims(token).is_ok_and(|claims| now.timestamp() < claims.exp)
}

/// Whether `token` decodes and has not expired yet
pub fn is_token_valid(token: &str) -> bool {
    is_token_valid_at(token, Utc::now())
}

/// Whether `token` is invalid or expires within `skew` of `now`
pub fn needs_refresh(token: &str, now: DateTime<Utc>, skew: chrono::Duration) -> bool {
    !is_token_valid_at(token, now + skew)
}

/// Build an unsigned token carrying the given claims, for tests and fixtures
pub fn unsigned_token(claims: &Value) -> String {
    let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"none","typ":"JWT"}"#);
    let payload = URL_SAFE_NO_PAD.encode(claims.to_string());
    format!("{header}.{payload}.")
}
