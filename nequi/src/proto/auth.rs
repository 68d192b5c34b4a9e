//! OAuth2 client-credentials token response.

use serde::{Deserialize, Serialize};
use serde_with::{DisplayFromStr, PickFirst, serde_as};

use crate::validation::{FieldChecker, Schema};

/// The only token type the provider issues.
pub const BEARER: &str = "Bearer";

/// Body returned by the token endpoint.
///
/// `expires_in` arrives either as a number or as a decimal string; both are
/// coerced to whole seconds.
#[serde_as]
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenResponse {
    /// The bearer token.
    pub access_token: String,
    /// Always [`BEARER`].
    pub token_type: String,
    /// Lifetime of the token in seconds.
    #[serde_as(as = "PickFirst<(_, DisplayFromStr)>")]
    pub expires_in: u64,
}

impl Schema for TokenResponse {
    fn check(fields: &mut FieldChecker<'_>) {
        fields
            .required_string("access_token")
            .literal("token_type", BEARER)
            .integer_like("expires_in");
    }
}

impl std::fmt::Debug for TokenResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenResponse")
            .field("access_token", &"<redacted>")
            .field("token_type", &self.token_type)
            .field("expires_in", &self.expires_in)
            .finish()
    }
}
