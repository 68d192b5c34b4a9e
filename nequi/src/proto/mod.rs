//! Wire format types for the Nequi API.
//!
//! Every business call is wrapped in a provider-mandated envelope:
//!
//! ```json
//! {
//!   "RequestMessage": {
//!     "RequestHeader": { "Channel": "...", "RequestDate": "...", "MessageID": "...",
//!                        "ClientID": "...", "Destination": { ... } },
//!     "RequestBody": { "any": { "generateCodeQRRQ": { ... } } }
//!   }
//! }
//! ```
//!
//! Responses mirror it under `ResponseMessage`, with a business [`Status`]
//! whose `StatusCode` is `"0"` on success regardless of the HTTP status.
//!
//! # Modules
//!
//! - [`auth`] - OAuth2 token response
//! - [`qr`] - QR code payments
//! - [`payments`] - push payments to unregistered users
//! - [`subscriptions`] - subscriptions and automatic payments
//! - [`dispersions`] - fund dispersions
//! - [`reports`] - transaction reports

pub mod auth;
pub mod dispersions;
pub mod payments;
pub mod qr;
pub mod reports;
pub mod subscriptions;

pub use auth::TokenResponse;
pub use dispersions::{DisperseFundsRequest, ReverseDispersionRequest};
pub use payments::{
    CancelUnregisteredPaymentRequest, PaymentStatusRequest, RevertTransactionRequest,
    UnregisteredPaymentRequest,
};
pub use qr::{GenerateCodeQrRequest, QrStatusRequest, ReverseQrRequest};
pub use reports::{GetReportsRequest, ReportFormat};
pub use subscriptions::{
    AutomaticPaymentRequest, GetSubscriptionRequest, NewSubscriptionRequest,
    ReverseSubscriptionRequest,
};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Result, SdkError};
use crate::validation::ValidationError;

/// Business status code signalling success.
pub const SUCCESS_STATUS_CODE: &str = "0";

/// Returns `true` if a business status code signals success.
#[must_use]
pub fn is_success_status(code: &str) -> bool {
    code == SUCCESS_STATUS_CODE
}

/// Identifies the remote service method being invoked.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Destination {
    /// Remote service (e.g. `"PaymentsService"`).
    pub service_name: String,
    /// Remote operation (e.g. `"generateCodeQR"`).
    pub service_operation: String,
    /// Provider region code (e.g. `"C001"`).
    pub service_region: String,
    /// Operation version (e.g. `"1.2.0"`).
    pub service_version: String,
}

/// Header metadata of an outbound message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RequestHeader {
    /// Capability channel code.
    pub channel: String,
    /// RFC 3339 timestamp of the request.
    pub request_date: String,
    /// Unique identifier of this message.
    #[serde(rename = "MessageID")]
    pub message_id: String,
    /// Client identifier the message is sent on behalf of.
    #[serde(rename = "ClientID")]
    pub client_id: String,
    /// Target service method.
    pub destination: Destination,
}

/// The fixed `{"any": ...}` wrapper around every payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Body<T> {
    /// The operation-specific payload.
    pub any: T,
}

/// Header and body of an outbound message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RequestMessage<T> {
    /// Header metadata.
    pub request_header: RequestHeader,
    /// Wrapped payload.
    pub request_body: Body<T>,
}

/// A complete outbound envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RequestEnvelope<T> {
    /// The message.
    pub request_message: RequestMessage<T>,
}

impl<T> RequestEnvelope<T> {
    /// The header of this envelope.
    #[must_use]
    pub const fn header(&self) -> &RequestHeader {
        &self.request_message.request_header
    }

    /// The payload of this envelope.
    #[must_use]
    pub const fn body(&self) -> &T {
        &self.request_message.request_body.any
    }
}

/// Business-level status embedded in a response header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Status {
    /// `"0"` on success; anything else is a business failure.
    pub status_code: String,
    /// Provider description of the status.
    pub status_desc: String,
}

impl Status {
    /// Returns `true` if the status code signals success.
    #[must_use]
    pub fn is_success(&self) -> bool {
        is_success_status(&self.status_code)
    }
}

/// Header metadata of a provider response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ResponseHeader {
    /// Capability channel code.
    pub channel: String,
    /// Timestamp of the response.
    pub response_date: String,
    /// Business status.
    pub status: Status,
    /// Identifier echoed from the request.
    #[serde(rename = "MessageID")]
    pub message_id: String,
    /// Client identifier echoed from the request.
    #[serde(rename = "ClientID")]
    pub client_id: String,
    /// Target service method, when echoed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination: Option<Destination>,
}

/// Header and body of a provider response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ResponseMessage<T> {
    /// Header metadata.
    pub response_header: ResponseHeader,
    /// Wrapped payload.
    pub response_body: Body<T>,
}

/// A complete provider response envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ResponseEnvelope<T> {
    /// The message.
    pub response_message: ResponseMessage<T>,
}

impl<T> ResponseEnvelope<T> {
    /// The business status of this response.
    #[must_use]
    pub const fn status(&self) -> &Status {
        &self.response_message.response_header.status
    }

    /// Returns `true` if the business status signals success.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status().is_success()
    }

    /// Consumes the envelope and returns its payload.
    #[must_use]
    pub fn into_body(self) -> T {
        self.response_message.response_body.any
    }
}

/// Decodes a raw response body into a typed envelope.
///
/// Operations hand back the provider's JSON untouched; use this to opt into a
/// typed view of it.
///
/// # Errors
///
/// Returns a `validation_error` if `value` does not match the envelope shape.
pub fn decode_response<T: DeserializeOwned>(value: Value) -> Result<ResponseEnvelope<T>> {
    serde_json::from_value(value).map_err(|e| SdkError::from(ValidationError::from(e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use serde_json::json;

    fn response_json(code: &str) -> Value {
        json!({
            "ResponseMessage": {
                "ResponseHeader": {
                    "Channel": "PQR03-C001",
                    "ResponseDate": "2024-01-01T00:00:00.000Z",
                    "Status": {"StatusCode": code, "StatusDesc": "SUCCESS"},
                    "MessageID": "m-1",
                    "ClientID": "client"
                },
                "ResponseBody": {
                    "any": {"generateCodeQRRS": {"qrValue": "Q1", "transactionId": "T1"}}
                }
            }
        })
    }

    #[test]
    fn test_destination_uses_pascal_case_keys() {
        let destination = Destination {
            service_name: "PaymentsService".into(),
            service_operation: "generateCodeQR".into(),
            service_region: "C001".into(),
            service_version: "1.2.0".into(),
        };
        assert_eq!(
            serde_json::to_value(&destination).unwrap(),
            json!({
                "ServiceName": "PaymentsService",
                "ServiceOperation": "generateCodeQR",
                "ServiceRegion": "C001",
                "ServiceVersion": "1.2.0"
            })
        );
    }

    #[test]
    fn test_decode_typed_response() {
        let envelope: ResponseEnvelope<qr::GenerateCodeQrResponse> =
            decode_response(response_json("0")).unwrap();
        assert!(envelope.is_success());
        assert!(envelope.response_message.response_header.destination.is_none());
        let body = envelope.into_body();
        assert_eq!(body.generate_code_qr_rs.qr_value, "Q1");
        assert_eq!(body.generate_code_qr_rs.transaction_id, "T1");
    }

    #[test]
    fn test_business_failure_status() {
        let envelope: ResponseEnvelope<Value> = decode_response(response_json("20-07A")).unwrap();
        assert!(!envelope.is_success());
        assert_eq!(envelope.status().status_code, "20-07A");
    }

    #[test]
    fn test_decode_mismatch_is_validation_error() {
        let err = decode_response::<Value>(json!({"generateCodeQRRS": {}})).unwrap_err();
        assert_eq!(err.name, ErrorKind::ValidationError);
    }
}
