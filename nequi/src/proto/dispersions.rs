//! Fund dispersion schemas.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::validation::{FieldChecker, Schema};

/// Request to disperse funds to a phone number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DisperseFundsRequest {
    /// Merchant code.
    pub code: String,
    /// Merchant tracking identifier for this dispersion.
    #[serde(rename = "trackingID")]
    pub tracking_id: String,
    /// Beneficiary phone number.
    pub phone_number: String,
    /// Amount to disperse.
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

/// Request to reverse a dispersion; same shape as the original dispersion.
pub type ReverseDispersionRequest = DisperseFundsRequest;

impl Schema for DisperseFundsRequest {
    fn check(fields: &mut FieldChecker<'_>) {
        fields
            .required_string("code")
            .required_string("trackingID")
            .required_string("phoneNumber")
            .required_string("value")
            .optional_string("reference1")
            .optional_string("reference2")
            .optional_string("reference3");
    }
}

/// Payload of a dispersion or its reversal; the provider returns an open object.
pub type DispersionResponse = Map<String, Value>;
