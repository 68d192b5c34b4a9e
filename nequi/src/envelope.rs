//! Construction of outbound request envelopes.
//!
//! Both builders read the clock and draw a random `MessageID` on every call;
//! apart from those two ambient values the output depends only on the
//! arguments.

use chrono::{SecondsFormat, Utc};
use uuid::Uuid;

use crate::proto::{Body, Destination, RequestEnvelope, RequestHeader, RequestMessage};

/// Builds a request header with a fresh `MessageID` and the current time.
#[must_use]
pub fn build_header(channel: &str, client_id: &str, destination: Destination) -> RequestHeader {
    RequestHeader {
        channel: channel.to_owned(),
        request_date: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        message_id: Uuid::new_v4().to_string(),
        client_id: client_id.to_owned(),
        destination,
    }
}

/// Wraps `body` in a complete request envelope.
#[must_use]
pub fn build_envelope<T>(
    channel: &str,
    client_id: &str,
    destination: Destination,
    body: T,
) -> RequestEnvelope<T> {
    RequestEnvelope {
        request_message: RequestMessage {
            request_header: build_header(channel, client_id, destination),
            request_body: Body { any: body },
        },
    }
}
