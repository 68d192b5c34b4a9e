//! Error taxonomy and normalization for Nequi SDK operations.
//!
//! Every failure an operation can hit ends up as one [`SdkError`] with a
//! stable `{name, message, status}` shape, whether it started as invalid
//! caller input, a rejected credential exchange or a non-2xx response.
//!
//! Raw failures are described by [`Failure`] and folded into an [`SdkError`]
//! by [`normalize`]. Normalization is idempotent: feeding an [`SdkError`] back
//! in (directly or boxed as a runtime error) returns it unchanged, so any layer
//! of a call chain may normalize without double-wrapping.

use std::error::Error as StdError;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::validation::ValidationError;

/// Crate-wide result alias returning [`SdkError`] by default.
pub type Result<T, E = SdkError> = std::result::Result<T, E>;

/// Machine-readable error kinds.
///
/// Serialized in `snake_case`, which is also the value of [`SdkError::name`]
/// on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub enum ErrorKind {
    /// Caller input failed schema validation.
    ValidationError,
    /// The client-credentials exchange failed.
    AuthenticationError,
    /// The provider rejected the API key (HTTP 403).
    InvalidApiKey,
    /// Any other transport or runtime failure.
    ApplicationError,
    /// The client was configured without a required credential.
    MissingRequiredField,
    /// The caller cancelled the in-flight request.
    RequestCancelled,
}

impl ErrorKind {
    /// Returns the wire name of this kind (e.g. `"validation_error"`).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ValidationError => "validation_error",
            Self::AuthenticationError => "authentication_error",
            Self::InvalidApiKey => "invalid_api_key",
            Self::ApplicationError => "application_error",
            Self::MissingRequiredField => "missing_required_field",
            Self::RequestCancelled => "request_cancelled",
        }
    }

    /// HTTP-equivalent status used when no better status is known.
    #[must_use]
    pub const fn default_status(self) -> u16 {
        match self {
            Self::ValidationError | Self::MissingRequiredField => 422,
            Self::AuthenticationError => 401,
            Self::InvalidApiKey => 403,
            Self::ApplicationError => 500,
            Self::RequestCancelled => 499,
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The single error shape returned by every SDK operation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, thiserror::Error)]
#[error("{name}: {message}")]
pub struct SdkError {
    /// Error kind.
    pub name: ErrorKind,
    /// Human-readable description.
    pub message: String,
    /// HTTP-equivalent status code.
    pub status: u16,
}

impl SdkError {
    /// Creates an error of the given kind.
    #[must_use]
    pub fn new(name: ErrorKind, message: impl Into<String>, status: u16) -> Self {
        Self {
            name,
            message: message.into(),
            status,
        }
    }

    /// A `validation_error` (422).
    #[must_use]
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(
            ErrorKind::ValidationError,
            message,
            ErrorKind::ValidationError.default_status(),
        )
    }

    /// An `authentication_error` carrying the status of the failed exchange.
    #[must_use]
    pub fn authentication(message: impl Into<String>, status: u16) -> Self {
        Self::new(ErrorKind::AuthenticationError, message, status)
    }

    /// An `invalid_api_key` error (403).
    #[must_use]
    pub fn invalid_api_key(message: impl Into<String>) -> Self {
        Self::new(
            ErrorKind::InvalidApiKey,
            message,
            ErrorKind::InvalidApiKey.default_status(),
        )
    }

    /// An `application_error` with an explicit status.
    #[must_use]
    pub fn application(message: impl Into<String>, status: u16) -> Self {
        Self::new(ErrorKind::ApplicationError, message, status)
    }

    /// A `missing_required_field` configuration error (422).
    #[must_use]
    pub fn missing_required_field(message: impl Into<String>) -> Self {
        Self::new(
            ErrorKind::MissingRequiredField,
            message,
            ErrorKind::MissingRequiredField.default_status(),
        )
    }

    /// A `request_cancelled` error (499).
    #[must_use]
    pub fn cancelled() -> Self {
        Self::new(
            ErrorKind::RequestCancelled,
            "[Nequi SDK]: Request cancelled",
            ErrorKind::RequestCancelled.default_status(),
        )
    }

    /// Maps a non-2xx provider response to an error.
    ///
    /// 403 means the API key was rejected; every other status is an
    /// `application_error` passing the status through.
    #[must_use]
    pub fn from_http_status(status: u16, message: impl Into<String>) -> Self {
        if status == 403 {
            Self::new(ErrorKind::InvalidApiKey, message, status)
        } else {
            Self::application(message, status)
        }
    }

    /// Returns `true` if `err` is already an [`SdkError`].
    #[must_use]
    pub fn is_sdk_error(err: &(dyn StdError + 'static)) -> bool {
        err.is::<Self>()
    }
}

impl From<ValidationError> for SdkError {
    fn from(value: ValidationError) -> Self {
        normalize(value)
    }
}

/// A raw failure, before normalization.
#[derive(Debug)]
pub enum Failure {
    /// Already normalized.
    Sdk(SdkError),
    /// Caller input failed schema validation.
    Validation(ValidationError),
    /// The credential exchange failed; `status` is the response status if one arrived.
    Authentication {
        /// Status of the failed exchange, if known.
        status: Option<u16>,
    },
    /// The provider answered with a non-2xx status.
    HttpStatus {
        /// HTTP status code.
        status: u16,
        /// Provider-supplied message or the status line text.
        message: String,
    },
    /// Anything else: I/O, decoding, programmer errors surfaced at runtime.
    Runtime(Box<dyn StdError + Send + Sync>),
}

impl From<SdkError> for Failure {
    fn from(value: SdkError) -> Self {
        Self::Sdk(value)
    }
}

impl From<ValidationError> for Failure {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<serde_json::Error> for Failure {
    fn from(value: serde_json::Error) -> Self {
        Self::Runtime(Box::new(value))
    }
}

impl From<Box<dyn StdError + Send + Sync>> for Failure {
    fn from(value: Box<dyn StdError + Send + Sync>) -> Self {
        Self::Runtime(value)
    }
}

/// Folds any raw failure into an [`SdkError`].
///
/// Runtime errors are inspected by type: a boxed [`SdkError`] is returned as
/// is and a boxed [`ValidationError`] becomes a `validation_error`.
pub fn normalize(failure: impl Into<Failure>) -> SdkError {
    match failure.into() {
        Failure::Sdk(err) => err,
        Failure::Validation(err) => SdkError::validation(err.to_string()),
        Failure::Authentication { status } => SdkError::authentication(
            "[Nequi SDK]: Authentication failed",
            status.unwrap_or_else(|| ErrorKind::AuthenticationError.default_status()),
        ),
        Failure::HttpStatus { status, message } => SdkError::from_http_status(status, message),
        Failure::Runtime(err) => match err.downcast::<SdkError>() {
            Ok(sdk) => *sdk,
            Err(err) => match err.downcast::<ValidationError>() {
                Ok(validation) => SdkError::validation(validation.to_string()),
                Err(other) => {
                    #[cfg(feature = "telemetry")]
                    tracing::debug!(error = %other, "normalizing unclassified runtime error");
                    SdkError::application(
                        other.to_string(),
                        ErrorKind::ApplicationError.default_status(),
                    )
                }
            },
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::Issue;

    fn sample_validation_error() -> ValidationError {
        ValidationError::new(vec![
            Issue::new("code", "code is required"),
            Issue::new("value", "value is required"),
        ])
    }

    #[test]
    fn test_error_kind_wire_names() {
        let json = serde_json::to_string(&ErrorKind::InvalidApiKey).unwrap();
        assert_eq!(json, "\"invalid_api_key\"");
        assert_eq!(ErrorKind::ValidationError.as_str(), "validation_error");
        assert_eq!(ErrorKind::MissingRequiredField.default_status(), 422);
    }

    #[test]
    fn test_sdk_error_serializes_flat_shape() {
        let err = SdkError::application("boom", 502);
        let value = serde_json::to_value(&err).unwrap();
        assert_eq!(
            value,
            serde_json::json!({"name": "application_error", "message": "boom", "status": 502})
        );
    }

    #[test]
    fn test_validation_failure_normalizes_to_422() {
        let err = normalize(sample_validation_error());
        assert_eq!(err.name, ErrorKind::ValidationError);
        assert_eq!(err.status, 422);
        assert_eq!(
            err.message,
            "Validation failed: code: code is required; value: value is required"
        );
    }

    #[test]
    fn test_authentication_failure_defaults_to_401() {
        let err = normalize(Failure::Authentication { status: None });
        assert_eq!(err.name, ErrorKind::AuthenticationError);
        assert_eq!(err.status, 401);

        let err = normalize(Failure::Authentication { status: Some(400) });
        assert_eq!(err.status, 400);
    }

    #[test]
    fn test_http_403_is_invalid_api_key() {
        let err = normalize(Failure::HttpStatus {
            status: 403,
            message: "Forbidden".into(),
        });
        assert_eq!(err.name, ErrorKind::InvalidApiKey);
        assert_eq!(err.status, 403);
    }

    #[test]
    fn test_other_http_statuses_are_application_errors() {
        for status in [400, 404, 409, 500, 502, 503] {
            let err = normalize(Failure::HttpStatus {
                status,
                message: "nope".into(),
            });
            assert_eq!(err.name, ErrorKind::ApplicationError);
            assert_eq!(err.status, status);
        }
    }

    #[test]
    fn test_runtime_failure_is_application_error() {
        let json_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err = normalize(json_err);
        assert_eq!(err.name, ErrorKind::ApplicationError);
        assert_eq!(err.status, 500);
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let original = SdkError::authentication("denied", 401);
        let once = normalize(original.clone());
        let twice = normalize(once.clone());
        assert_eq!(once, original);
        assert_eq!(twice, original);
    }

    #[test]
    fn test_normalize_recognizes_boxed_sdk_error() {
        let original = SdkError::invalid_api_key("bad key");
        let boxed: Box<dyn StdError + Send + Sync> = Box::new(original.clone());
        assert!(SdkError::is_sdk_error(boxed.as_ref()));
        assert_eq!(normalize(boxed), original);
    }

    #[test]
    fn test_normalize_recognizes_boxed_validation_error() {
        let boxed: Box<dyn StdError + Send + Sync> = Box::new(sample_validation_error());
        assert!(!SdkError::is_sdk_error(boxed.as_ref()));
        let err = normalize(boxed);
        assert_eq!(err.name, ErrorKind::ValidationError);
    }
}
