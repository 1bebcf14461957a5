// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod context;
mod sink;

#[cfg(test)]
mod tests;

pub use context::{ExecutionContext, ExecutionError, Performance};
pub use sink::{AuditSink, MemoryAuditSink, TracingAuditSink};

use serde::Serialize;
use serde_json::{Map, Value};
use slotbook_domain::{BookingId, BookingStatus, UserId};
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

/// Current UTC time as an RFC 3339 string.
///
/// Falls back to the Unix timestamp if formatting fails, which only
/// happens for years outside the RFC 3339 range.
#[must_use]
pub fn now_rfc3339() -> String {
    let now: OffsetDateTime = OffsetDateTime::now_utc();
    now.format(&Rfc3339)
        .unwrap_or_else(|_| now.unix_timestamp().to_string())
}

/// Represents the trainee performing an action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Actor {
    /// The trainee identifier.
    pub user_id: String,
}

impl Actor {
    /// An actor acting as the given trainee.
    #[must_use]
    pub fn trainee(user_id: &UserId) -> Self {
        Self {
            user_id: user_id.value().to_string(),
        }
    }
}

/// Describes the HTTP request an execution context belongs to.
///
/// Fixed at construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RequestMeta {
    /// Random per-request identifier.
    pub request_id: String,
    /// HTTP method.
    pub method: String,
    /// Request path.
    pub path: String,
    /// When the request was received (RFC 3339).
    pub timestamp: String,
}

impl RequestMeta {
    /// Creates request metadata with a fresh v4 request id.
    #[must_use]
    pub fn new(method: &str, path: &str) -> Self {
        Self {
            request_id: uuid::Uuid::new_v4().to_string(),
            method: method.to_string(),
            path: path.to_string(),
            timestamp: now_rfc3339(),
        }
    }
}

/// The state change a business event records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Action {
    /// A booking reached `CONFIRMED` through submission or confirmation.
    BookingConfirmed,
    /// A single slot was added.
    SlotAdded,
    /// A single slot was removed.
    SlotRemoved,
}

impl Action {
    /// The event name as emitted to the audit sink.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::BookingConfirmed => "BOOKING_CONFIRMED",
            Self::SlotAdded => "SLOT_ADDED",
            Self::SlotRemoved => "SLOT_REMOVED",
        }
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A committed business fact.
///
/// Events are only recorded after the transaction that produced them has
/// committed, so a retried attempt never leaves a stray event behind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BusinessEvent {
    /// Event name, see [`Action::name`].
    pub name: String,
    /// When the event was recorded (RFC 3339).
    pub timestamp: String,
    /// Structured event data.
    pub payload: Map<String, Value>,
}

impl BusinessEvent {
    /// Creates an event stamped with the current time.
    #[must_use]
    pub fn new(action: Action, payload: Map<String, Value>) -> Self {
        Self {
            name: action.name().to_string(),
            timestamp: now_rfc3339(),
            payload,
        }
    }

    /// Creates the standard booking event
    /// `{bookingId, userId, totalHours, status}`.
    #[must_use]
    pub fn booking(
        action: Action,
        booking_id: BookingId,
        user_id: &UserId,
        total_hours: u32,
        status: BookingStatus,
    ) -> Self {
        let mut payload: Map<String, Value> = Map::new();
        payload.insert(String::from("bookingId"), Value::from(booking_id.value()));
        payload.insert(String::from("userId"), Value::from(user_id.value()));
        payload.insert(String::from("totalHours"), Value::from(total_hours));
        payload.insert(String::from("status"), Value::from(status.as_str()));
        Self::new(action, payload)
    }
}
