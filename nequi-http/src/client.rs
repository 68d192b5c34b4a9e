//! The Nequi API client.

use std::sync::Arc;

use nequi::catalog::Operation;
use nequi::envelope::build_envelope;
use nequi::{NequiOptions, Result, Schema, SdkError, ValidationError, normalize};
use reqwest::Client;
use serde::Serialize;
use serde_json::{Map, Value};
use tokio_util::sync::CancellationToken;

#[cfg(feature = "telemetry")]
use tracing::instrument;

use crate::auth::{Authenticator, CachedTokenProvider, TokenProvider};
use crate::services::{Dispersions, PushPayments, Qr, Reports, Subscriptions};
use crate::transport::HttpTransport;

/// Client for the Nequi payments API.
///
/// Cloning is cheap; clones share credentials, the HTTP connection pool and,
/// when enabled, the token cache.
///
/// ```rust,no_run
/// use nequi::{Credentials, NequiOptions};
/// use nequi_http::Nequi;
/// use serde_json::json;
///
/// # async fn run() -> nequi::Result<()> {
/// let client = Nequi::new(NequiOptions::new(Credentials::new("key", "id", "secret")))?;
/// let qr = client.qr().create_qr(&json!({"code": "NIT_1", "value": "1000"})).await?;
/// println!("{qr}");
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct Nequi {
    inner: Arc<Inner>,
    cancel: Option<CancellationToken>,
}

#[derive(Debug)]
struct Inner {
    client_id: String,
    base_url: String,
    transport: HttpTransport,
}

impl Nequi {
    /// Creates a client from validated options.
    ///
    /// # Errors
    ///
    /// Returns `missing_required_field` if a credential is empty, or
    /// `application_error` if the HTTP client cannot be initialized.
    pub fn new(options: NequiOptions) -> Result<Self> {
        options.validate()?;
        let client = http_client()?;
        let authenticator = Authenticator::new(
            client.clone(),
            options.resolved_auth_url(),
            &options.credentials,
        )
        .with_timeout(options.timeout);
        let tokens: Arc<dyn TokenProvider> = if options.cache_tokens {
            Arc::new(CachedTokenProvider::new(authenticator))
        } else {
            Arc::new(authenticator)
        };
        Ok(Self::assemble(&options, client, tokens))
    }

    /// Creates a client that takes tokens from `tokens` instead of
    /// authenticating on its own.
    ///
    /// # Errors
    ///
    /// Same as [`Nequi::new`].
    pub fn with_token_provider(
        options: NequiOptions,
        tokens: Arc<dyn TokenProvider>,
    ) -> Result<Self> {
        options.validate()?;
        let client = http_client()?;
        Ok(Self::assemble(&options, client, tokens))
    }

    fn assemble(options: &NequiOptions, client: Client, tokens: Arc<dyn TokenProvider>) -> Self {
        let transport = HttpTransport::new(client, options.credentials.api_key.clone(), tokens)
            .with_timeout(options.timeout);
        Self {
            inner: Arc::new(Inner {
                client_id: options.credentials.client_id.clone(),
                base_url: options.resolved_base_url().to_owned(),
                transport,
            }),
            cancel: None,
        }
    }

    /// The `ClientID` stamped on every envelope.
    #[must_use]
    pub fn client_id(&self) -> &str {
        &self.inner.client_id
    }

    /// Base URL operation paths are appended to.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.inner.base_url
    }

    /// Returns a handle whose calls are aborted when `token` is cancelled.
    #[must_use]
    pub fn with_cancellation(&self, token: CancellationToken) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            cancel: Some(token),
        }
    }

    /// Runs one remote operation.
    ///
    /// `input` is validated against `S` before anything is sent. On success
    /// the validated body is nested under the operation's body key, wrapped
    /// in a fresh envelope and posted. The provider's JSON answer is returned
    /// unchanged; use [`nequi::proto::decode_response`] for typed access.
    ///
    /// # Errors
    ///
    /// `validation_error` for invalid input (no request is made), otherwise
    /// any error of [`HttpTransport::send`].
    #[cfg_attr(
        feature = "telemetry",
        instrument(
            name = "nequi.execute",
            skip_all,
            fields(operation = operation.service_operation, channel = operation.channel),
            err
        )
    )]
    pub async fn execute<S>(
        &self,
        operation: &Operation,
        input: &(impl Serialize + ?Sized),
    ) -> Result<Value>
    where
        S: Schema + Serialize,
    {
        let raw = serde_json::to_value(input).map_err(ValidationError::from)?;
        let validated = S::validate(&raw)?;

        let mut body = Map::new();
        body.insert(
            operation.body_key.to_owned(),
            serde_json::to_value(&validated).map_err(normalize)?,
        );
        let envelope = build_envelope(
            operation.channel,
            &self.inner.client_id,
            operation.destination(),
            body,
        );

        let url = format!("{}{}", self.inner.base_url, operation.path);
        self.inner
            .transport
            .send(&url, &envelope, self.cancel.as_ref())
            .await
    }

    /// QR code payments.
    #[must_use]
    pub const fn qr(&self) -> Qr<'_> {
        Qr::new(self)
    }

    /// Push payments.
    #[must_use]
    pub const fn push_payments(&self) -> PushPayments<'_> {
        PushPayments::new(self)
    }

    /// Subscriptions.
    #[must_use]
    pub const fn subscriptions(&self) -> Subscriptions<'_> {
        Subscriptions::new(self)
    }

    /// Fund dispersions.
    #[must_use]
    pub const fn dispersions(&self) -> Dispersions<'_> {
        Dispersions::new(self)
    }

    /// Reports.
    #[must_use]
    pub const fn reports(&self) -> Reports<'_> {
        Reports::new(self)
    }
}

fn http_client() -> Result<Client> {
    Client::builder().build().map_err(|e| {
        SdkError::application(
            format!("[Nequi SDK]: Failed to initialize HTTP client: {e}"),
            500,
        )
    })
}
