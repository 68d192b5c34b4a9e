//! HTTP-specific constants for the Nequi API.

/// Header carrying the merchant API key on business calls.
pub const API_KEY_HEADER: &str = "x-api-key";

/// Query string appended to the token endpoint.
pub const CLIENT_CREDENTIALS_QUERY: &str = "grant_type=client_credentials";

/// Content type of the token request.
pub const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Content type and accepted type of business calls.
pub const JSON_CONTENT_TYPE: &str = "application/json";

/// Message of a token exchange rejected by the provider.
pub const INVALID_CREDENTIALS_MESSAGE: &str =
    "[Nequi SDK]: Authentication failed - Invalid credentials";

/// Fallback message when a non-2xx response has no reason phrase.
pub const UNKNOWN_ERROR_MESSAGE: &str = "Unknown error";

/// HTTP-equivalent status reported for timed-out requests.
pub const TIMEOUT_STATUS: u16 = 504;
