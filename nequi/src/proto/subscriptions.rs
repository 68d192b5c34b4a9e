//! Subscription schemas.
//!
//! A subscription is a standing authorization from a payer; its token is then
//! used to charge automatic payments without further approval.

use serde::{Deserialize, Serialize};

use super::payments::ReversionResponse;
use crate::validation::{FieldChecker, Schema};

/// Transaction type accepted when reversing a subscription charge.
pub const AUTOMATIC_PAYMENT_TYPE: &str = "automaticPayment";

/// Request to create a subscription.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSubscriptionRequest {
    /// Subscriber phone number.
    pub phone_number: String,
    /// Merchant code.
    pub code: String,
    /// Name shown to the subscriber.
    pub name: String,
}

impl Schema for NewSubscriptionRequest {
    fn check(fields: &mut FieldChecker<'_>) {
        fields
            .required_string("phoneNumber")
            .required_string("code")
            .required_string("name");
    }
}

/// Request to charge an existing subscription.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AutomaticPaymentRequest {
    /// Subscriber phone number.
    pub phone_number: String,
    /// Merchant code.
    pub code: String,
    /// Amount to charge.
    pub value: String,
    /// Subscription token.
    pub token: String,
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

impl Schema for AutomaticPaymentRequest {
    fn check(fields: &mut FieldChecker<'_>) {
        fields
            .required_string("phoneNumber")
            .required_string("code")
            .required_string("value")
            .required_string("token")
            .optional_string("reference1")
            .optional_string("reference2")
            .optional_string("reference3");
    }
}

/// Request for the details of a subscription.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetSubscriptionRequest {
    /// Subscriber phone number.
    pub phone_number: String,
    /// Merchant code.
    pub code: String,
    /// Subscription token.
    pub token: String,
}

impl Schema for GetSubscriptionRequest {
    fn check(fields: &mut FieldChecker<'_>) {
        fields
            .required_string("phoneNumber")
            .required_string("code")
            .required_string("token");
    }
}

/// Request to reverse an automatic payment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReverseSubscriptionRequest {
    /// Subscriber phone number.
    pub phone_number: String,
    /// Amount to reverse.
    pub value: String,
    /// Merchant code.
    pub code: String,
    /// `MessageID` of the original automatic payment.
    pub message_id: String,
    /// Always [`AUTOMATIC_PAYMENT_TYPE`].
    #[serde(rename = "type")]
    pub kind: String,
}

impl Schema for ReverseSubscriptionRequest {
    fn check(fields: &mut FieldChecker<'_>) {
        fields
            .required_string("phoneNumber")
            .required_string("value")
            .required_string("code")
            .required_string("messageId")
            .literal("type", AUTOMATIC_PAYMENT_TYPE);
    }
}

/// Payload of a created subscription.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewSubscriptionResponse {
    /// Created subscription.
    #[serde(rename = "newSubscriptionRS")]
    pub new_subscription_rs: SubscriptionToken,
}

/// Token identifying a subscription.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscriptionToken {
    /// Subscription token.
    pub token: String,
}

/// Payload of a charged automatic payment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutomaticPaymentResponse {
    /// Charge details.
    #[serde(rename = "automaticPaymentRS")]
    pub automatic_payment_rs: AutomaticPayment,
}

/// A charged automatic payment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AutomaticPayment {
    /// Provider transaction identifier.
    pub transaction_id: String,
    /// Subscription token.
    pub token: String,
}

/// Payload of a subscription query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetSubscriptionResponse {
    /// Subscription details.
    #[serde(rename = "getSubscriptionRS")]
    pub get_subscription_rs: SubscriptionDetails,
}

/// Details of a subscription.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionDetails {
    /// Creation date.
    pub date_created: String,
    /// Subscription name.
    pub name: String,
    /// Provider status code.
    pub status: String,
}

/// Payload of a reversed automatic payment.
pub type ReverseSubscriptionResponse = ReversionResponse;
