//! Authenticated JSON transport.
//!
//! [`HttpTransport`] obtains a token, posts a JSON body and interprets the
//! answer. Every failure is returned as an [`SdkError`]; nothing panics and
//! no transport error escapes unnormalized.

use std::fmt::Display;
use std::sync::Arc;
use std::time::Duration;

use nequi::Result;
use nequi::SdkError;
use nequi::token::Token;
use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tokio_util::sync::CancellationToken;

#[cfg(feature = "telemetry")]
use tracing::{Span, instrument};

use crate::auth::TokenProvider;
use crate::constants::{API_KEY_HEADER, JSON_CONTENT_TYPE, UNKNOWN_ERROR_MESSAGE};
use crate::error::HttpError;

/// Posts authenticated JSON requests to the provider.
#[derive(Clone)]
pub struct HttpTransport {
    client: Client,
    api_key: String,
    tokens: Arc<dyn TokenProvider>,
    timeout: Option<Duration>,
}

impl HttpTransport {
    /// Creates a transport authenticating through `tokens`.
    #[must_use]
    pub fn new(client: Client, api_key: impl Into<String>, tokens: Arc<dyn TokenProvider>) -> Self {
        Self {
            client,
            api_key: api_key.into(),
            tokens,
            timeout: None,
        }
    }

    /// Sets a timeout for business requests.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Returns the configured timeout, if any.
    #[must_use]
    pub const fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Authenticates, then posts `body` to `url`.
    ///
    /// If `cancel` fires before the call completes, the in-flight request is
    /// dropped and `request_cancelled` is returned.
    ///
    /// # Errors
    ///
    /// - the token provider's error if authentication fails (no request is sent)
    /// - `invalid_api_key` for a 403 answer
    /// - `application_error` for any other non-2xx answer, network failure or
    ///   undecodable body (504 on timeout)
    /// - `request_cancelled` if `cancel` fires
    pub async fn send<B, T>(
        &self,
        url: &str,
        body: &B,
        cancel: Option<&CancellationToken>,
    ) -> Result<T>
    where
        B: Serialize + Sync + ?Sized,
        T: DeserializeOwned,
    {
        let call = self.send_authenticated(url, body);
        match cancel {
            Some(cancel) => {
                tokio::select! {
                    biased;
                    () = cancel.cancelled() => Err(SdkError::cancelled()),
                    result = call => result,
                }
            }
            None => call.await,
        }
    }

    #[cfg_attr(
        feature = "telemetry",
        instrument(
            name = "nequi.transport.send",
            skip_all,
            fields(
                url = %url,
                otel.status_code = tracing::field::Empty,
                error.message = tracing::field::Empty,
            )
        )
    )]
    async fn send_authenticated<B, T>(&self, url: &str, body: &B) -> Result<T>
    where
        B: Serialize + Sync + ?Sized,
        T: DeserializeOwned,
    {
        let token = self.tokens.token().await?;
        let result = self.post_json(url, &token, body).await;
        record_result_on_span(&result);
        result.map_err(SdkError::from)
    }

    async fn post_json<B, T>(&self, url: &str, token: &Token, body: &B) -> Result<T, HttpError>
    where
        B: Serialize + Sync + ?Sized,
        T: DeserializeOwned,
    {
        let context = "POST";
        let mut request = self
            .client
            .post(url)
            .header(AUTHORIZATION, token.authorization_header())
            .header(ACCEPT, JSON_CONTENT_TYPE)
            .header(CONTENT_TYPE, JSON_CONTENT_TYPE)
            .header(API_KEY_HEADER, &self.api_key)
            .json(body);
        if let Some(timeout) = self.timeout {
            request = request.timeout(timeout);
        }

        let response = request
            .send()
            .await
            .map_err(|e| HttpError::from_reqwest(context, e))?;

        let status = response.status();
        if status.is_success() {
            response
                .json::<T>()
                .await
                .map_err(|e| HttpError::from_reqwest(context, e))
        } else {
            let text = response.text().await.unwrap_or_else(|err| {
                #[cfg(feature = "telemetry")]
                tracing::warn!(error = %err, status = status.as_u16(), "failed to read error body");
                #[cfg(not(feature = "telemetry"))]
                drop(err);
                String::new()
            });
            Err(HttpError::HttpStatus {
                status: status.as_u16(),
                message: error_message(status, &text),
            })
        }
    }
}

impl std::fmt::Debug for HttpTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpTransport")
            .field("api_key", &"<redacted>")
            .field("tokens", &self.tokens)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

/// The provider's `message` field if the body is JSON carrying one,
/// otherwise the status reason phrase.
fn error_message(status: StatusCode, body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|value| value.get("message")?.as_str().map(str::to_owned))
        .filter(|message| !message.is_empty())
        .unwrap_or_else(|| {
            status
                .canonical_reason()
                .unwrap_or(UNKNOWN_ERROR_MESSAGE)
                .to_owned()
        })
}

/// Records the outcome of a request on the current span.
#[cfg(feature = "telemetry")]
fn record_result_on_span<R, E: Display>(result: &Result<R, E>) {
    let span = Span::current();
    match result {
        Ok(_) => {
            span.record("otel.status_code", "OK");
        }
        Err(err) => {
            span.record("otel.status_code", "ERROR");
            span.record("error.message", tracing::field::display(err));
            tracing::event!(tracing::Level::ERROR, error = %err, "Request to provider failed");
        }
    }
}

/// Records the outcome of a request on the current span.
/// Noop if telemetry feature is off.
#[cfg(not(feature = "telemetry"))]
fn record_result_on_span<R, E: Display>(_result: &Result<R, E>) {}
