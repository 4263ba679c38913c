use base64::Engine as _;
use chrono::{DateTime, TimeDelta, Utc};
use cf_core::identity::{AuthUser, Session};
use serde::Deserialize;

use crate::error::AuthError;

/// Body returned by the token, verify and signup endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub token_type: Option<String>,
    #[serde(default)]
    pub expires_in: Option<i64>,
    /// Unix seconds.
    #[serde(default)]
    pub expires_at: Option<i64>,
    pub user: AuthUser,
}

impl TokenResponse {
    /// Convert into a [`Session`].
    ///
    /// Expiry comes from `expires_at`, then `expires_in`, then the JWT `exp`
    /// claim of the access token.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Other` when no expiry can be determined.
    pub fn into_session(self) -> Result<Session, AuthError> {
        let expires_at = match (self.expires_at, self.expires_in) {
            (Some(at), _) => DateTime::from_timestamp(at, 0)
                .ok_or_else(|| AuthError::Other("invalid expires_at timestamp".into()))?,
            (None, Some(seconds)) => Utc::now() + TimeDelta::seconds(seconds),
            (None, None) => decode_expiry(&self.access_token)?,
        };

        let mut user = self.user;
        user.email = user.email.filter(|e| !e.is_empty());
        user.phone = user.phone.filter(|p| !p.is_empty());

        Ok(Session {
            access_token: self.access_token,
            refresh_token: self.refresh_token.filter(|t| !t.is_empty()),
            token_type: self.token_type.unwrap_or_else(|| "bearer".into()),
            expires_at,
            user,
        })
    }
}

/// Decode the JWT `exp` claim without verifying the signature.
///
/// The backend is the authority on token validity; this is only used to know
/// when to refresh.
///
/// # Errors
///
/// Returns `AuthError::Other` if the JWT format is invalid or the `exp` claim
/// is missing or cannot be parsed.
pub fn decode_expiry(jwt: &str) -> Result<DateTime<Utc>, AuthError> {
    let parts: Vec<&str> = jwt.split('.').collect();
    if parts.len() != 3 {
        return Err(AuthError::Other("invalid JWT format".into()));
    }
    let payload = base64::engine::general_purpose::URL_SAFE_NO_PAD
        .decode(parts[1])
        .map_err(|e| AuthError::Other(format!("base64 decode failed: {e}")))?;
    let value: serde_json::Value = serde_json::from_slice(&payload)
        .map_err(|e| AuthError::Other(format!("JSON parse failed: {e}")))?;
    let exp = value["exp"]
        .as_i64()
        .ok_or_else(|| AuthError::Other("missing exp claim".into()))?;
    DateTime::from_timestamp(exp, 0).ok_or_else(|| AuthError::Other("invalid exp timestamp".into()))
}
