//! Bearer tokens obtained from the client-credentials exchange.

use std::fmt;
use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};

use crate::proto::TokenResponse;

/// A bearer token and its expiry.
#[derive(Clone, PartialEq, Eq)]
pub struct Token {
    /// The access token.
    pub value: String,
    /// Token type, used as the `Authorization` scheme.
    pub token_type: String,
    /// Instant the token stops being accepted.
    pub expires_at: DateTime<Utc>,
    /// Whether the token was unexpired when it was created.
    ///
    /// A snapshot taken at construction; use [`Token::is_expired_at`] for a
    /// live check.
    pub is_valid: bool,
}

impl Token {
    /// Builds a token from a token-endpoint response received at `now`.
    #[must_use]
    pub fn from_response(response: &TokenResponse, now: DateTime<Utc>) -> Self {
        let lifetime = i64::try_from(response.expires_in)
            .ok()
            .and_then(TimeDelta::try_seconds)
            .unwrap_or(TimeDelta::MAX);
        let expires_at = now
            .checked_add_signed(lifetime)
            .unwrap_or(DateTime::<Utc>::MAX_UTC);
        Self {
            value: response.access_token.clone(),
            token_type: response.token_type.clone(),
            expires_at,
            is_valid: now < expires_at,
        }
    }

    /// Value of the `Authorization` header for this token.
    #[must_use]
    pub fn authorization_header(&self) -> String {
        format!("{} {}", self.token_type, self.value)
    }

    /// Returns `true` if the token expires within `margin` of `now`.
    #[must_use]
    pub fn is_expired_at(&self, now: DateTime<Utc>, margin: Duration) -> bool {
        let margin = TimeDelta::from_std(margin).unwrap_or(TimeDelta::MAX);
        now.checked_add_signed(margin)
            .is_none_or(|deadline| deadline >= self.expires_at)
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Token")
            .field("value", &"<redacted>")
            .field("token_type", &self.token_type)
            .field("expires_at", &self.expires_at)
            .field("is_valid", &self.is_valid)
            .finish()
    }
}
