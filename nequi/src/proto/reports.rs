//! Transaction report schemas.

use serde::{Deserialize, Serialize};

use crate::validation::{FieldChecker, Schema};

/// Output format of a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    /// JSON document.
    Json,
    /// Comma-separated values.
    Csv,
    /// PDF document.
    Pdf,
}

impl ReportFormat {
    /// Wire names of every format.
    pub const ALL: [&'static str; 3] = ["json", "csv", "pdf"];
}

/// Request for a transaction report over a date range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetReportsRequest {
    /// Merchant code.
    pub code: String,
    /// Range start.
    pub start_date: String,
    /// Range end.
    pub end_date: String,
    /// Output format.
    pub format: ReportFormat,
}

impl Schema for GetReportsRequest {
    fn check(fields: &mut FieldChecker<'_>) {
        fields
            .required_string("code")
            .required_string("startDate")
            .required_string("endDate")
            .one_of("format", &ReportFormat::ALL);
    }
}

/// Payload of a report query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetReportsResponse {
    /// The report.
    #[serde(rename = "getReportsRS")]
    pub get_reports_rs: Report,
}

/// A transaction report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    /// Merchant name.
    pub commerce: String,
    /// Merchant tax identifier.
    pub nit: String,
    /// Merchant account numbers.
    pub account_number: Vec<String>,
    /// Range start.
    pub from: String,
    /// Range end.
    pub to: String,
    /// Sum of transaction values.
    pub total: String,
    /// Number of transactions.
    pub count: String,
    /// Transactions in the range.
    pub transactions: Vec<ReportTransaction>,
}

/// One transaction of a report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportTransaction {
    /// Buyer last name.
    pub buyer_last_name: String,
    /// Transaction date.
    pub transaction_date: String,
    /// Merchant name.
    pub commerce_name: String,
    /// Buyer first name.
    pub buyer_name: String,
    /// Product channel the payment came through.
    pub product_channel: String,
    /// Merchant reference.
    pub transaction_reference: String,
    /// `MessageID` of the payment request.
    pub message_id: String,
    /// Transaction amount.
    pub transaction_value: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::validate;
    use serde_json::json;

    #[test]
    fn test_format_is_parsed_into_enum() {
        let request: GetReportsRequest = validate(&json!({
            "code": "NIT_1",
            "startDate": "2024-01-01",
            "endDate": "2024-01-31",
            "format": "csv"
        }))
        .unwrap();
        assert_eq!(request.format, ReportFormat::Csv);
    }

    #[test]
    fn test_unknown_format_is_rejected() {
        let err = validate::<GetReportsRequest>(&json!({
            "code": "NIT_1",
            "startDate": "2024-01-01",
            "endDate": "2024-01-31",
            "format": "xlsx"
        }))
        .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Validation failed: format: Invalid enum value. \
             Expected 'json' | 'csv' | 'pdf', received 'xlsx'"
        );
    }
}
