//! Static description of every remote operation.
//!
//! Each [`Operation`] fixes the channel code, the remote service method, the
//! endpoint path relative to the environment base URL, and the key the
//! validated payload is nested under inside `RequestBody.any`.

use crate::proto::Destination;

/// Provider-assigned channel codes, one per capability group.
pub mod channels {
    /// QR code payments.
    pub const QR: &str = "PQR03-C001";
    /// Push payments.
    pub const PAYMENT_PUSH: &str = "PNP04-C001";
    /// Subscriptions.
    pub const SUBSCRIPTION: &str = "PDA05-C001";
    /// Fund dispersions.
    pub const DISPERSIONS: &str = "GLK06-C001";
    /// Reports.
    pub const REPORTS: &str = "MF-001";
}

/// Region code used by every operation.
pub const SERVICE_REGION: &str = "C001";

/// One remote operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Operation {
    /// Channel code.
    pub channel: &'static str,
    /// Remote service name.
    pub service_name: &'static str,
    /// Remote operation name.
    pub service_operation: &'static str,
    /// Remote operation version.
    pub service_version: &'static str,
    /// Endpoint path relative to the base URL.
    pub path: &'static str,
    /// Key wrapping the payload inside `RequestBody.any`.
    pub body_key: &'static str,
}

impl Operation {
    /// The `Destination` header block for this operation.
    #[must_use]
    pub fn destination(&self) -> Destination {
        Destination {
            service_name: self.service_name.to_owned(),
            service_operation: self.service_operation.to_owned(),
            service_region: SERVICE_REGION.to_owned(),
            service_version: self.service_version.to_owned(),
        }
    }
}

/// QR code payments.
pub mod qr {
    use super::{Operation, channels};

    /// Generate a QR code.
    pub const GENERATE: Operation = Operation {
        channel: channels::QR,
        service_name: "PaymentsService",
        service_operation: "generateCodeQR",
        service_version: "1.2.0",
        path: "/payments/v2/-services-paymentservice-generatecodeqr",
        body_key: "generateCodeQRRQ",
    };

    /// Query the payment status of a QR code.
    pub const STATUS: Operation = Operation {
        channel: channels::QR,
        service_name: "PaymentsService",
        service_operation: "getStatusPayment",
        service_version: "1.0.0",
        path: "/payments/v2/-services-paymentservice-getstatuspayment",
        body_key: "getStatusPaymentRQ",
    };

    /// Reverse a QR payment.
    pub const REVERT: Operation = Operation {
        channel: channels::QR,
        service_name: "reverseServices",
        service_operation: "reverseTransaction",
        service_version: "1.0.0",
        path: "/payments/v2/-services-reverseservices-reversetransaction",
        body_key: "reversionRQ",
    };
}

/// Push payments.
pub mod payments {
    use super::{Operation, channels};

    /// Push a payment to an unregistered phone number.
    pub const UNREGISTERED: Operation = Operation {
        channel: channels::PAYMENT_PUSH,
        service_name: "PaymentsService",
        service_operation: "unregisteredPayment",
        service_version: "1.2.0",
        path: "/payments/v2/-services-paymentservice-unregisteredpayment",
        body_key: "unregisteredPaymentRQ",
    };

    /// Cancel a pending push payment.
    pub const CANCEL_UNREGISTERED: Operation = Operation {
        channel: channels::PAYMENT_PUSH,
        service_name: "PaymentsService",
        service_operation: "cancelUnregisteredPayment",
        service_version: "1.0.0",
        path: "/payments/v2/-services-paymentservice-cancelunregisteredpayment",
        body_key: "cancelUnregisteredPaymentRQ",
    };

    /// Query the status of a push payment.
    pub const STATUS: Operation = Operation {
        channel: channels::PAYMENT_PUSH,
        service_name: "PaymentsService",
        service_operation: "getStatusPayment",
        service_version: "1.0.0",
        path: "/payments/v2/-services-paymentservice-getstatuspayment",
        body_key: "getStatusPaymentRQ",
    };

    /// Revert a push payment.
    pub const REVERT: Operation = Operation {
        channel: channels::PAYMENT_PUSH,
        service_name: "ReverseServices",
        service_operation: "reverseTransaction",
        service_version: "1.0.0",
        path: "/payments/v2/-services-reverseservices-reversetransaction",
        body_key: "reversionRQ",
    };
}

/// Subscriptions.
pub mod subscriptions {
    use super::{Operation, channels};

    /// Create a subscription.
    pub const CREATE: Operation = Operation {
        channel: channels::SUBSCRIPTION,
        service_name: "SubscriptionPaymentService",
        service_operation: "newSubscription",
        service_version: "1.0.0",
        path: "/subscriptions/v2/-services-subscriptionpaymentservice-newsubscription",
        body_key: "newSubscriptionRQ",
    };

    /// Charge a subscription.
    pub const AUTOMATIC_PAYMENT: Operation = Operation {
        channel: channels::SUBSCRIPTION,
        service_name: "SubscriptionPaymentService",
        service_operation: "automaticPayment",
        service_version: "1.0.0",
        path: "/subscriptions/v2/-services-subscriptionpaymentservice-automaticpayment",
        body_key: "automaticPaymentRQ",
    };

    /// Fetch subscription details.
    pub const GET: Operation = Operation {
        channel: channels::SUBSCRIPTION,
        service_name: "SubscriptionPaymentService",
        service_operation: "getSubscription",
        service_version: "1.0.0",
        path: "/subscriptions/v2/-services-subscriptionpaymentservice-getsubscription",
        body_key: "getSubscriptionRQ",
    };

    /// Reverse an automatic payment.
    pub const REVERSE: Operation = Operation {
        channel: channels::SUBSCRIPTION,
        service_name: "ReverseServices",
        service_operation: "reverseTransaction",
        service_version: "1.0.0",
        path: "/subscriptions/v2/-services-reverseservices-reversetransaction",
        body_key: "reversionRQ",
    };
}

/// Fund dispersions.
pub mod dispersions {
    use super::{Operation, channels};

    /// Disperse funds.
    pub const CREATE: Operation = Operation {
        channel: channels::DISPERSIONS,
        service_name: "DispersionService",
        service_operation: "disperseFunds",
        service_version: "1.0.0",
        path: "/dispersions/v2/-services-dispersionservice-dispersefunds",
        body_key: "disperseFundsRQ",
    };

    /// Reverse a dispersion.
    pub const REVERSE: Operation = Operation {
        channel: channels::DISPERSIONS,
        service_name: "DispersionService",
        service_operation: "reverseDispersion",
        service_version: "1.0.0",
        path: "/dispersions/v2/-services-dispersionservice-reversedispersion",
        body_key: "reverseDispersionRQ",
    };
}

/// Reports.
pub mod reports {
    use super::{Operation, channels};

    /// Fetch a transaction report.
    pub const GET: Operation = Operation {
        channel: channels::REPORTS,
        service_name: "ReportsService",
        service_operation: "getReports",
        service_version: "1.0.0",
        path: "/partners/v2/-services-reportsservice-getreports",
        body_key: "getReportsRQ",
    };
}

/// Every operation in the catalog.
pub const ALL: [Operation; 14] = [
    qr::GENERATE,
    qr::STATUS,
    qr::REVERT,
    payments::UNREGISTERED,
    payments::CANCEL_UNREGISTERED,
    payments::STATUS,
    payments::REVERT,
    subscriptions::CREATE,
    subscriptions::AUTOMATIC_PAYMENT,
    subscriptions::GET,
    subscriptions::REVERSE,
    dispersions::CREATE,
    dispersions::REVERSE,
    reports::GET,
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_destination_uses_shared_region() {
        let destination = qr::GENERATE.destination();
        assert_eq!(destination.service_name, "PaymentsService");
        assert_eq!(destination.service_operation, "generateCodeQR");
        assert_eq!(destination.service_region, "C001");
        assert_eq!(destination.service_version, "1.2.0");
    }

    #[test]
    fn test_paths_are_rooted_and_versioned() {
        for op in ALL {
            assert!(op.path.starts_with('/'), "{}", op.path);
            assert!(op.path.contains("/v2/-services-"), "{}", op.path);
            assert!(op.body_key.ends_with("RQ"), "{}", op.body_key);
        }
    }

    #[test]
    fn test_channels_match_capability_groups() {
        assert!(ALL[..3].iter().all(|op| op.channel == channels::QR));
        assert!(ALL[3..7].iter().all(|op| op.channel == channels::PAYMENT_PUSH));
        assert!(ALL[7..11].iter().all(|op| op.channel == channels::SUBSCRIPTION));
        assert!(ALL[11..13].iter().all(|op| op.channel == channels::DISPERSIONS));
        assert_eq!(ALL[13].channel, channels::REPORTS);
    }
}
