// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::ExecutionContext;
use std::sync::{Mutex, PoisonError};
use tracing::{info, warn};

/// Receives finished execution contexts.
///
/// Emission happens after the store transaction has committed and must not
/// fail the request: implementations swallow their own errors.
pub trait AuditSink: Send + Sync {
    /// Accepts one finished request.
    fn emit(&self, context: &ExecutionContext);
}

/// Writes every business event and a request summary to `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingAuditSink;

impl AuditSink for TracingAuditSink {
    fn emit(&self, context: &ExecutionContext) {
        let meta = context.meta();
        let user_id: &str = &context.actor().user_id;

        for event in context.events() {
            let payload: String = serde_json::Value::Object(event.payload.clone()).to_string();
            info!(
                target: "slotbook::audit",
                request_id = %meta.request_id,
                user_id,
                event = %event.name,
                timestamp = %event.timestamp,
                payload = %payload,
                "business event"
            );
        }

        for error in context.errors() {
            warn!(
                target: "slotbook::audit",
                request_id = %meta.request_id,
                stage = %error.stage,
                message = %error.message,
                "request error"
            );
        }

        let performance = context.performance();
        info!(
            target: "slotbook::audit",
            request_id = %meta.request_id,
            method = %meta.method,
            path = %meta.path,
            status = context.response_status(),
            db_tx_ms = performance.db_tx_ms,
            attempts = performance.attempts,
            total_duration_ms = performance.total_duration_ms,
            "request finished"
        );
    }
}

/// Keeps emitted contexts in memory.
#[derive(Debug, Default)]
pub struct MemoryAuditSink {
    contexts: Mutex<Vec<ExecutionContext>>,
}

impl MemoryAuditSink {
    /// Creates an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of everything emitted so far.
    #[must_use]
    pub fn contexts(&self) -> Vec<ExecutionContext> {
        self.contexts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Names of all emitted business events, in emission order.
    #[must_use]
    pub fn event_names(&self) -> Vec<String> {
        self.contexts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .flat_map(|c| c.events().iter().map(|e| e.name.clone()))
            .collect()
    }
}

impl AuditSink for MemoryAuditSink {
    fn emit(&self, context: &ExecutionContext) {
        self.contexts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(context.clone());
    }
}
