//! Push payment schemas.
//!
//! Push payments are collection requests sent to a phone number that is not
//! registered with the merchant; the payer approves them in the Nequi app.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::validation::{FieldChecker, Schema};

/// Request to push a payment notification to a phone number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnregisteredPaymentRequest {
    /// Payer phone number.
    pub phone_number: String,
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

impl Schema for UnregisteredPaymentRequest {
    fn check(fields: &mut FieldChecker<'_>) {
        fields
            .required_string("phoneNumber")
            .required_string("code")
            .required_string("value")
            .optional_string("reference1")
            .optional_string("reference2")
            .optional_string("reference3");
    }
}

/// Request to cancel a pending push payment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CancelUnregisteredPaymentRequest {
    /// Merchant code.
    pub code: String,
    /// Payer phone number.
    pub phone_number: String,
    /// Transaction returned when the payment was created.
    pub transaction_id: String,
}

impl Schema for CancelUnregisteredPaymentRequest {
    fn check(fields: &mut FieldChecker<'_>) {
        fields
            .required_string("code")
            .required_string("phoneNumber")
            .required_string("transactionId");
    }
}

/// Request for the status of a push payment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentStatusRequest {
    /// Payment code to query.
    #[serde(rename = "codeQR")]
    pub code_qr: String,
}

impl Schema for PaymentStatusRequest {
    fn check(fields: &mut FieldChecker<'_>) {
        fields.required_string("codeQR");
    }
}

/// Request to revert a completed push payment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RevertTransactionRequest {
    /// Payer phone number.
    pub phone_number: String,
    /// Amount to revert.
    pub value: String,
    /// Merchant code.
    pub code: String,
    /// `MessageID` of the original payment request.
    pub message_id: String,
    /// Transaction type being reverted.
    #[serde(rename = "type")]
    pub kind: String,
}

impl Schema for RevertTransactionRequest {
    fn check(fields: &mut FieldChecker<'_>) {
        fields
            .required_string("phoneNumber")
            .required_string("value")
            .required_string("code")
            .required_string("messageId")
            .required_string("type");
    }
}

/// Payload of a created push payment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnregisteredPaymentResponse {
    /// Created payment.
    #[serde(rename = "unregisteredPaymentRS")]
    pub unregistered_payment_rs: CreatedPayment,
}

/// A created push payment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedPayment {
    /// Provider transaction identifier.
    pub transaction_id: String,
}

/// Payload of a cancelled push payment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CancelUnregisteredPaymentResponse {
    /// Cancellation acknowledgement.
    #[serde(
        rename = "cancelRequestMoneyRS",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub cancel_request_money_rs: Option<Map<String, Value>>,
}

/// Payload of a payment status query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentStatusResponse {
    /// Payment status details.
    #[serde(rename = "getStatusPaymentRS")]
    pub get_status_payment_rs: StatusPayment,
}

/// Status details of a payment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusPayment {
    /// Provider status code of the payment.
    pub status: String,
    /// Payer name.
    pub name: String,
    /// Paid amount.
    pub value: String,
    /// Payment date.
    pub date: String,
    /// Provider transaction identifier.
    pub trn_id: String,
    /// Pockets the money came from.
    pub origin_money: Vec<OriginMoney>,
    /// Payer IP address.
    pub ip_address: String,
}

/// One source pocket of a payment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OriginMoney {
    /// Pocket name.
    pub name: String,
    /// Pocket type.
    pub pocket_type: String,
    /// Amount taken from the pocket.
    pub value: String,
}

/// Payload of any reversal; the provider acknowledges with an empty object.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReversionResponse {
    /// Reversal acknowledgement.
    #[serde(
        rename = "reversionRS",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub reversion_rs: Option<Map<String, Value>>,
}
