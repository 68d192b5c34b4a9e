//! Error types for the HTTP transport layer.
//!
//! [`HttpError`] keeps the transport context of a failed call for logging;
//! callers only ever see it folded into an [`SdkError`].

use nequi::{Failure, SdkError, normalize};

use crate::constants::TIMEOUT_STATUS;

/// Errors that can occur while talking to the provider over HTTP.
#[derive(Debug, thiserror::Error)]
pub enum HttpError {
    /// The request could not be sent or the connection broke.
    #[error("HTTP error: {context}: {source}")]
    Http {
        /// Human-readable context.
        context: &'static str,
        /// The underlying reqwest error.
        #[source]
        source: reqwest::Error,
    },

    /// The request exceeded the configured timeout.
    #[error("Request timed out: {context}")]
    Timeout {
        /// Human-readable context.
        context: &'static str,
    },

    /// A 2xx body could not be decoded.
    #[error("Failed to deserialize JSON: {context}: {source}")]
    JsonDeserialization {
        /// Human-readable context.
        context: &'static str,
        /// The underlying reqwest error.
        #[source]
        source: reqwest::Error,
    },

    /// The provider answered with a non-2xx status.
    #[error("{message}")]
    HttpStatus {
        /// HTTP status code.
        status: u16,
        /// Provider-supplied message, or the reason phrase.
        message: String,
    },
}

impl HttpError {
    /// Classifies a reqwest error raised while sending or reading.
    pub(crate) fn from_reqwest(context: &'static str, source: reqwest::Error) -> Self {
        if source.is_timeout() {
            Self::Timeout { context }
        } else if source.is_decode() {
            Self::JsonDeserialization { context, source }
        } else {
            Self::Http { context, source }
        }
    }
}

impl From<HttpError> for SdkError {
    fn from(value: HttpError) -> Self {
        match value {
            HttpError::Timeout { .. } => Self::application(value.to_string(), TIMEOUT_STATUS),
            HttpError::HttpStatus { status, message } => {
                normalize(Failure::HttpStatus { status, message })
            }
            other => normalize(Failure::Runtime(Box::new(other))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nequi::ErrorKind;

    #[test]
    fn test_status_errors_keep_provider_status() {
        let err = SdkError::from(HttpError::HttpStatus {
            status: 403,
            message: "Forbidden".into(),
        });
        assert_eq!(err.name, ErrorKind::InvalidApiKey);
        assert_eq!(err.message, "Forbidden");

        let err = SdkError::from(HttpError::HttpStatus {
            status: 404,
            message: "Not Found".into(),
        });
        assert_eq!(err.name, ErrorKind::ApplicationError);
        assert_eq!(err.status, 404);
    }

    #[test]
    fn test_timeout_is_gateway_timeout() {
        let err = SdkError::from(HttpError::Timeout { context: "POST" });
        assert_eq!(err.name, ErrorKind::ApplicationError);
        assert_eq!(err.status, 504);
        assert_eq!(err.message, "Request timed out: POST");
    }
}
