#![cfg_attr(docsrs, feature(doc_auto_cfg))]

//! Core types for the Nequi payments API.
//!
//! This crate is transport-agnostic: it validates caller input, builds the
//! provider's request envelopes, describes every remote operation, and
//! defines the single error shape all operations return. The HTTP client
//! lives in `nequi-http`.
//!
//! # Overview
//!
//! Every remote call follows the same pipeline. Untrusted input is validated
//! against a [`Schema`](validation::Schema), wrapped in a
//! `RequestMessage` envelope carrying a fresh `MessageID` and the target
//! [`Destination`](proto::Destination), and posted with a bearer token. Any
//! failure along the way is folded into an [`SdkError`] by [`normalize`].
//!
//! # Modules
//!
//! - [`catalog`] - Channel codes, destinations and paths for every operation
//! - [`config`] - Environments, credentials and client options
//! - [`envelope`] - Request envelope construction
//! - [`error`] - Error taxonomy and normalization
//! - [`proto`] - Wire format types and per-operation schemas
//! - [`token`] - Bearer tokens and expiry
//! - [`validation`] - Schema validation for untrusted input
//!
//! # Feature Flags
//!
//! - `cli` - `clap` arguments for building client options, with `.env` loading
//! - `telemetry` - Enables tracing instrumentation

pub mod catalog;
pub mod config;
pub mod envelope;
pub mod error;
pub mod proto;
pub mod token;
pub mod validation;

pub use config::{Credentials, Environment, NequiOptions};
pub use error::{ErrorKind, Failure, Result, SdkError, normalize};
pub use validation::{Schema, ValidationError, validate};
