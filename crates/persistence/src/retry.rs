// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Bounded retry for write transactions that lose the lock race.
//!
//! Only lock contention is retried. Rule rejections and every other
//! database failure are returned on the first attempt.

use std::time::{Duration, Instant};

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use slotbook_audit::ExecutionContext;
use tracing::{debug, warn};

use crate::error::PersistenceError;

/// Exponential backoff settings for the allocation transaction.
///
/// # Default Values
///
/// - `max_attempts`: 5
/// - `initial_delay`: 10ms
/// - `multiplier`: 2
/// - `max_delay`: 200ms
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, including the first one. Zero is treated as one.
    pub max_attempts: u32,
    /// Delay after the first failed attempt.
    pub initial_delay: Duration,
    /// Growth factor applied per failed attempt.
    pub multiplier: u32,
    /// Cap on any single delay.
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            initial_delay: Duration::from_millis(10),
            multiplier: 2,
            max_delay: Duration::from_millis(200),
        }
    }
}

impl RetryPolicy {
    /// A policy that never retries.
    #[must_use]
    pub const fn no_retry() -> Self {
        Self {
            max_attempts: 1,
            initial_delay: Duration::ZERO,
            multiplier: 1,
            max_delay: Duration::ZERO,
        }
    }

    /// Delay to wait after `failed_attempts` attempts have failed.
    ///
    /// `initial_delay * multiplier ^ (failed_attempts - 1)`, capped at
    /// `max_delay`.
    #[must_use]
    pub fn delay_for_attempt(&self, failed_attempts: u32) -> Duration {
        let exponent: u32 = failed_attempts.saturating_sub(1);
        let factor: u32 = self
            .multiplier
            .checked_pow(exponent)
            .unwrap_or(u32::MAX);
        self.initial_delay
            .saturating_mul(factor)
            .min(self.max_delay)
    }
}

/// Returns true if the error means another writer holds the lock.
///
/// `SQLite` reports `SQLITE_BUSY` and `SQLITE_LOCKED` as generic database
/// errors, so the message is inspected.
pub(crate) fn is_lock_contention(err: &DieselError) -> bool {
    match err {
        DieselError::DatabaseError(DatabaseErrorKind::SerializationFailure, _) => true,
        DieselError::DatabaseError(_, info) => {
            let message: String = info.message().to_ascii_lowercase();
            message.contains("database is locked")
                || message.contains("database is busy")
                || message.contains("database table is locked")
        }
        DieselError::RollbackErrorOnCommit { commit_error, .. } => {
            is_lock_contention(commit_error)
        }
        _ => false,
    }
}

/// Runs `attempt` until it succeeds, is rejected, or the policy runs out.
///
/// Each attempt must open and finish its own transaction, so a retry always
/// starts from a fresh snapshot. Time spent and attempts made are added to
/// the execution context.
///
/// # Errors
///
/// Returns the first non-contention error, or `PersistenceError::Conflict`
/// once every attempt has hit lock contention.
pub(crate) fn run_with_retry<T, F>(
    policy: &RetryPolicy,
    context: &mut ExecutionContext,
    operation: &str,
    mut attempt: F,
) -> Result<T, PersistenceError>
where
    F: FnMut() -> Result<T, PersistenceError>,
{
    let max_attempts: u32 = policy.max_attempts.max(1);
    let mut made: u32 = 0;
    loop {
        made += 1;
        let started: Instant = Instant::now();
        let result: Result<T, PersistenceError> = attempt();
        context.record_transaction(started.elapsed());

        match result {
            Err(PersistenceError::Busy(reason)) if made < max_attempts => {
                let delay: Duration = policy.delay_for_attempt(made);
                warn!(
                    operation,
                    attempt = made,
                    delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                    %reason,
                    "Write lock contention, retrying"
                );
                std::thread::sleep(delay);
            }
            Err(PersistenceError::Busy(reason)) => {
                warn!(operation, attempts = made, %reason, "Giving up after lock contention");
                return Err(PersistenceError::Conflict { attempts: made });
            }
            other => {
                debug!(operation, attempts = made, ok = other.is_ok(), "Transaction finished");
                return other;
            }
        }
    }
}
