//! QR code payment schemas.

use serde::{Deserialize, Serialize};

use super::payments::{ReversionResponse, StatusPayment};
use crate::validation::{FieldChecker, Schema};

/// Request to generate a QR payment code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateCodeQrRequest {
    /// Merchant code.
    pub code: String,
    /// Amount to charge.
    pub value: String,
    /// Free-form merchant reference.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference1: Option<String>,
    /// Free-form merchant reference.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference2: Option<String>,
    /// Free-form merchant reference.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference3: Option<String>,
}

impl Schema for GenerateCodeQrRequest {
    fn check(fields: &mut FieldChecker<'_>) {
        fields
            .required_string("code")
            .required_string("value")
            .optional_string("reference1")
            .optional_string("reference2")
            .optional_string("reference3");
    }
}

/// Request for the payment status of a QR code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QrStatusRequest {
    /// The QR value returned at generation time.
    pub qr_value: String,
}

impl Schema for QrStatusRequest {
    fn check(fields: &mut FieldChecker<'_>) {
        fields.required_string("qrValue");
    }
}

/// Request to reverse a QR payment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReverseQrRequest {
    /// The QR value of the original payment.
    pub qr_value: String,
    /// Payer phone number.
    pub phone_number: String,
    /// Amount to reverse.
    pub value: String,
    /// Merchant code.
    pub code: String,
}

impl Schema for ReverseQrRequest {
    fn check(fields: &mut FieldChecker<'_>) {
        fields
            .required_string("qrValue")
            .required_string("phoneNumber")
            .required_string("value")
            .required_string("code");
    }
}

/// Payload of a successful QR generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateCodeQrResponse {
    /// Generated QR details.
    #[serde(rename = "generateCodeQRRS")]
    pub generate_code_qr_rs: GeneratedQr,
}

/// A generated QR code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedQr {
    /// Value to render as a QR code.
    pub qr_value: String,
    /// Provider transaction identifier.
    pub transaction_id: String,
}

/// Payload of a QR status query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QrStatusResponse {
    /// Payment status details.
    #[serde(rename = "getStatusPaymentRS")]
    pub get_status_payment_rs: StatusPayment,
}

/// Payload of a QR reversal.
pub type ReverseQrResponse = ReversionResponse;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::validate;
    use serde_json::json;

    #[test]
    fn test_generate_request_keeps_only_known_fields() {
        let request: GenerateCodeQrRequest = validate(&json!({
            "code": "C1",
            "value": "1000",
            "reference1": "order-9",
            "unexpected": 1
        }))
        .unwrap();
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({"code": "C1", "value": "1000", "reference1": "order-9"})
        );
    }

    #[test]
    fn test_reverse_request_reports_every_missing_field() {
        let err = validate::<ReverseQrRequest>(&json!({})).unwrap_err();
        let paths: Vec<_> = err.issues().iter().map(|i| i.path.as_str()).collect();
        assert_eq!(paths, ["qrValue", "phoneNumber", "value", "code"]);
    }

    #[test]
    fn test_status_request_rejects_non_string() {
        let err = validate::<QrStatusRequest>(&json!({"qrValue": 42})).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Validation failed: qrValue: Expected string, received number"
        );
    }
}
