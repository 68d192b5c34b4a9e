#![cfg_attr(docsrs, feature(doc_auto_cfg))]

//! HTTP client for the Nequi payments API.
//!
//! Builds on the envelopes, schemas and error taxonomy of the `nequi` crate
//! and adds the OAuth2 token exchange, the authenticated transport and one
//! façade per capability group.
//!
//! # Modules
//!
//! - [`auth`] - client-credentials exchange and token caching
//! - [`client`] - the [`Nequi`] client and its generic operation runner
//! - [`constants`] - header names, content types and fixed messages
//! - [`error`] - HTTP transport error types
//! - [`services`] - QR, push payment, subscription, dispersion and report façades
//! - [`transport`] - authenticated JSON transport with timeout and cancellation
//!
//! # Feature Flags
//!
//! - `telemetry` (default) - Enables tracing instrumentation
//! - `full` - `telemetry` plus the `cli` feature of `nequi`

pub mod auth;
pub mod client;
pub mod constants;
pub mod error;
pub mod services;
pub mod transport;

pub use auth::{Authenticator, CachedTokenProvider, TokenProvider};
pub use client::Nequi;
pub use transport::HttpTransport;

pub use tokio_util::sync::CancellationToken;
