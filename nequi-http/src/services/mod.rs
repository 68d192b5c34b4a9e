//! Capability groups of the Nequi API.
//!
//! Each façade borrows a [`Nequi`](crate::Nequi) client and maps its
//! methods onto [`catalog`](nequi::catalog) operations. Inputs are any
//! serializable value, usually a `serde_json::Value` or one of the request
//! types in [`nequi::proto`]; they are validated before anything is sent.

mod dispersions;
mod payments;
mod qr;
mod reports;
mod subscriptions;

pub use dispersions::Dispersions;
pub use payments::PushPayments;
pub use qr::Qr;
pub use reports::Reports;
pub use subscriptions::Subscriptions;
