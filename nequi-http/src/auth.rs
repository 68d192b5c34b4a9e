//! OAuth2 client-credentials authentication.
//!
//! [`Authenticator`] performs one token exchange per call. It is the default
//! [`TokenProvider`], so every business call re-authenticates. Wrapping it in
//! a [`CachedTokenProvider`] reuses a token until it nears expiry.

use std::fmt;
use std::time::Duration;

use base64::prelude::*;
use chrono::Utc;
use nequi::proto::TokenResponse;
use nequi::token::Token;
use nequi::{Credentials, Failure, Result, Schema, SdkError, normalize};
use reqwest::Client;
use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use serde_json::Value;
use tokio::sync::Mutex;

#[cfg(feature = "telemetry")]
use tracing::instrument;

use crate::constants::{
    CLIENT_CREDENTIALS_QUERY, FORM_CONTENT_TYPE, INVALID_CREDENTIALS_MESSAGE, JSON_CONTENT_TYPE,
};

/// Source of bearer tokens for business calls.
#[async_trait::async_trait]
pub trait TokenProvider: Send + Sync + fmt::Debug {
    /// Returns a token usable for the next call.
    ///
    /// # Errors
    ///
    /// Returns `authentication_error` if the exchange fails, or
    /// `validation_error` if the token endpoint answered with an unexpected shape.
    async fn token(&self) -> Result<Token>;
}

/// Exchanges client credentials for a bearer token.
#[derive(Clone)]
pub struct Authenticator {
    client: Client,
    auth_url: String,
    client_id: String,
    client_secret: String,
    timeout: Option<Duration>,
}

impl Authenticator {
    /// Creates an authenticator for the given token endpoint.
    #[must_use]
    pub fn new(client: Client, auth_url: impl Into<String>, credentials: &Credentials) -> Self {
        Self {
            client,
            auth_url: auth_url.into(),
            client_id: credentials.client_id.clone(),
            client_secret: credentials.client_secret.clone(),
            timeout: None,
        }
    }

    /// Sets a timeout for the token request.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// The token endpoint.
    #[must_use]
    pub fn auth_url(&self) -> &str {
        &self.auth_url
    }

    fn basic_authorization(&self) -> String {
        let pair = format!("{}:{}", self.client_id, self.client_secret);
        format!("Basic {}", BASE64_STANDARD.encode(pair))
    }

    /// Performs a single client-credentials exchange.
    ///
    /// There is no retry. A transport failure or an unreadable body is
    /// reported as `authentication_error` 401 without the underlying cause.
    ///
    /// # Errors
    ///
    /// - `authentication_error` with the response status for a non-2xx answer
    /// - `authentication_error` 401 for network failures
    /// - `validation_error` if the body is not a valid token response
    #[cfg_attr(
        feature = "telemetry",
        instrument(
            name = "nequi.auth.authenticate",
            skip_all,
            fields(client_id = %self.client_id),
            err
        )
    )]
    pub async fn authenticate(&self) -> Result<Token> {
        let url = format!("{}?{CLIENT_CREDENTIALS_QUERY}", self.auth_url);
        let mut request = self
            .client
            .post(url)
            .header(CONTENT_TYPE, FORM_CONTENT_TYPE)
            .header(AUTHORIZATION, self.basic_authorization())
            .header(ACCEPT, JSON_CONTENT_TYPE);
        if let Some(timeout) = self.timeout {
            request = request.timeout(timeout);
        }

        let response = request.send().await.map_err(|err| {
            #[cfg(feature = "telemetry")]
            tracing::warn!(error = %err, "token request failed");
            #[cfg(not(feature = "telemetry"))]
            drop(err);
            normalize(Failure::Authentication { status: None })
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(SdkError::authentication(
                INVALID_CREDENTIALS_MESSAGE,
                status.as_u16(),
            ));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|_| normalize(Failure::Authentication { status: None }))?;
        let token_response = TokenResponse::validate(&body)?;
        Ok(Token::from_response(&token_response, Utc::now()))
    }
}

impl fmt::Debug for Authenticator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Authenticator")
            .field("auth_url", &self.auth_url)
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

#[async_trait::async_trait]
impl TokenProvider for Authenticator {
    async fn token(&self) -> Result<Token> {
        self.authenticate().await
    }
}

/// Reuses a token until it is within a refresh margin of expiry.
///
/// The lock is held across the refresh, so concurrent callers wait for a
/// single in-flight exchange instead of each starting their own.
#[derive(Debug)]
pub struct CachedTokenProvider<P = Authenticator> {
    inner: P,
    refresh_margin: Duration,
    state: Mutex<Option<Token>>,
}

impl<P: TokenProvider> CachedTokenProvider<P> {
    /// Default margin before expiry at which a token is refreshed (1 minute).
    pub const DEFAULT_REFRESH_MARGIN: Duration = Duration::from_mins(1);

    /// Wraps `inner` with the default refresh margin.
    #[must_use]
    pub fn new(inner: P) -> Self {
        Self {
            inner,
            refresh_margin: Self::DEFAULT_REFRESH_MARGIN,
            state: Mutex::new(None),
        }
    }

    /// Sets the refresh margin.
    #[must_use]
    pub const fn with_refresh_margin(mut self, margin: Duration) -> Self {
        self.refresh_margin = margin;
        self
    }

    /// Drops the cached token, forcing a refresh on next use.
    pub async fn clear(&self) {
        let mut guard = self.state.lock().await;
        *guard = None;
    }
}

#[async_trait::async_trait]
impl<P: TokenProvider> TokenProvider for CachedTokenProvider<P> {
    async fn token(&self) -> Result<Token> {
        let mut guard = self.state.lock().await;
        if let Some(token) = guard
            .as_ref()
            .filter(|token| !token.is_expired_at(Utc::now(), self.refresh_margin))
        {
            return Ok(token.clone());
        }

        #[cfg(feature = "telemetry")]
        tracing::debug!("nequi.auth.token_cache_miss");

        let token = self.inner.token().await?;
        *guard = Some(token.clone());
        Ok(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nequi::ErrorKind;
    use serde_json::json;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn authenticator(server: &MockServer) -> Authenticator {
        Authenticator::new(
            Client::new(),
            format!("{}/oauth2/token", server.uri()),
            &Credentials::new("key", "id", "secret"),
        )
    }

    fn token_body(expires_in: Value) -> Value {
        json!({"access_token": "tok", "token_type": "Bearer", "expires_in": expires_in})
    }

    #[tokio::test]
    async fn test_authenticate_sends_basic_credentials() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/oauth2/token"))
            .and(query_param("grant_type", "client_credentials"))
            .and(header("authorization", "Basic aWQ6c2VjcmV0"))
            .and(header("content-type", "application/x-www-form-urlencoded"))
            .and(header("accept", "application/json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(token_body(json!("3600"))))
            .expect(1)
            .mount(&server)
            .await;

        let token = authenticator(&server).authenticate().await.unwrap();
        assert_eq!(token.value, "tok");
        assert_eq!(token.authorization_header(), "Bearer tok");
        assert!(token.is_valid);
    }

    #[tokio::test]
    async fn test_rejected_credentials_keep_status() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(400))
            .mount(&server)
            .await;

        let err = authenticator(&server).authenticate().await.unwrap_err();
        assert_eq!(err.name, ErrorKind::AuthenticationError);
        assert_eq!(err.status, 400);
        assert_eq!(err.message, INVALID_CREDENTIALS_MESSAGE);
    }

    #[tokio::test]
    async fn test_malformed_token_is_validation_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"access_token": "tok"})),
            )
            .mount(&server)
            .await;

        let err = authenticator(&server).authenticate().await.unwrap_err();
        assert_eq!(err.name, ErrorKind::ValidationError);
        assert!(err.message.contains("token_type"));
    }

    #[tokio::test]
    async fn test_non_json_body_is_authentication_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
            .mount(&server)
            .await;

        let err = authenticator(&server).authenticate().await.unwrap_err();
        assert_eq!(err.name, ErrorKind::AuthenticationError);
        assert_eq!(err.status, 401);
    }

    #[tokio::test]
    async fn test_network_failure_is_generic_authentication_error() {
        let auth = Authenticator::new(
            Client::new(),
            "http://127.0.0.1:1/oauth2/token",
            &Credentials::new("key", "id", "secret"),
        );
        let err = auth.authenticate().await.unwrap_err();
        assert_eq!(err.name, ErrorKind::AuthenticationError);
        assert_eq!(err.status, 401);
        assert_eq!(err.message, "[Nequi SDK]: Authentication failed");
    }

    #[tokio::test]
    async fn test_cached_provider_reuses_token() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(token_body(json!(3600))))
            .expect(1)
            .mount(&server)
            .await;

        let provider = CachedTokenProvider::new(authenticator(&server));
        let first = provider.token().await.unwrap();
        let second = provider.token().await.unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_cached_provider_refreshes_near_expiry() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(token_body(json!(30))))
            .expect(2)
            .mount(&server)
            .await;

        let provider = CachedTokenProvider::new(authenticator(&server));
        provider.token().await.unwrap();
        provider.token().await.unwrap();
    }

    #[tokio::test]
    async fn test_cached_provider_single_flight() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(token_body(json!(3600)))
                    .set_delay(Duration::from_millis(50)),
            )
            .expect(1)
            .mount(&server)
            .await;

        let provider = CachedTokenProvider::new(authenticator(&server));
        let (a, b, c) = tokio::join!(provider.token(), provider.token(), provider.token());
        assert_eq!(a.unwrap(), b.unwrap());
        assert!(c.is_ok());
    }

    #[tokio::test]
    async fn test_cached_provider_clear_forces_refresh() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(token_body(json!(3600))))
            .expect(2)
            .mount(&server)
            .await;

        let provider = CachedTokenProvider::new(authenticator(&server))
            .with_refresh_margin(Duration::from_secs(5));
        provider.token().await.unwrap();
        provider.clear().await;
        provider.token().await.unwrap();
    }

    #[test]
    fn test_debug_redacts_secret() {
        let auth = Authenticator::new(
            Client::new(),
            "http://localhost/token",
            &Credentials::new("key", "id", "top-secret"),
        );
        assert!(!format!("{auth:?}").contains("top-secret"));
    }
}
