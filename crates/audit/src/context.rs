// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{Actor, BusinessEvent, RequestMeta, now_rfc3339};
use serde::Serialize;
use std::time::Duration;

/// Timing and retry counters accumulated over one request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Performance {
    /// Time spent inside store transactions, summed over attempts.
    pub db_tx_ms: u64,
    /// Wall time of the whole request. Set once when the request finishes.
    pub total_duration_ms: u64,
    /// Transaction attempts made, including retried ones.
    pub attempts: u32,
}

/// A failure recorded against a request stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExecutionError {
    /// Where the failure happened (`"validation"`, `"transaction"`, ...).
    pub stage: String,
    /// Rendered error message.
    pub message: String,
    /// When it was recorded (RFC 3339).
    pub at: String,
}

/// Per-request record of who did what and how long it took.
///
/// The metadata and actor are fixed at construction. Events and errors can
/// only be appended. A context belongs to exactly one in-flight request and
/// is threaded through operations by `&mut`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExecutionContext {
    meta: RequestMeta,
    actor: Actor,
    events: Vec<BusinessEvent>,
    performance: Performance,
    errors: Vec<ExecutionError>,
    response_status: u16,
}

impl ExecutionContext {
    /// Creates a context with no events and a `200` response status.
    #[must_use]
    pub const fn new(meta: RequestMeta, actor: Actor) -> Self {
        Self {
            meta,
            actor,
            events: Vec::new(),
            performance: Performance {
                db_tx_ms: 0,
                total_duration_ms: 0,
                attempts: 0,
            },
            errors: Vec::new(),
            response_status: 200,
        }
    }

    /// Request metadata.
    #[must_use]
    pub const fn meta(&self) -> &RequestMeta {
        &self.meta
    }

    /// The acting trainee.
    #[must_use]
    pub const fn actor(&self) -> &Actor {
        &self.actor
    }

    /// Recorded business events, oldest first.
    #[must_use]
    pub fn events(&self) -> &[BusinessEvent] {
        &self.events
    }

    /// Recorded errors, oldest first.
    #[must_use]
    pub fn errors(&self) -> &[ExecutionError] {
        &self.errors
    }

    /// Accumulated counters.
    #[must_use]
    pub const fn performance(&self) -> Performance {
        self.performance
    }

    /// The HTTP status the request finished with.
    #[must_use]
    pub const fn response_status(&self) -> u16 {
        self.response_status
    }

    /// Appends a business event.
    pub fn record_event(&mut self, event: BusinessEvent) {
        self.events.push(event);
    }

    /// Adds the duration of one transaction attempt.
    pub fn record_transaction(&mut self, elapsed: Duration) {
        let ms: u64 = u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX);
        self.performance.db_tx_ms = self.performance.db_tx_ms.saturating_add(ms);
        self.performance.attempts = self.performance.attempts.saturating_add(1);
    }

    /// Appends an error for the given stage.
    pub fn record_error(&mut self, stage: &str, error: &dyn std::fmt::Display) {
        self.errors.push(ExecutionError {
            stage: stage.to_string(),
            message: error.to_string(),
            at: now_rfc3339(),
        });
    }

    /// Stamps the final status and total request duration.
    pub fn finish(&mut self, response_status: u16, total: Duration) {
        self.response_status = response_status;
        self.performance.total_duration_ms = u64::try_from(total.as_millis()).unwrap_or(u64::MAX);
    }
}
