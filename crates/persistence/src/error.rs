// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::retry::is_lock_contention;
use slotbook::CoreError;

/// Errors that can occur during persistence operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersistenceError {
    /// A database error occurred.
    DatabaseError(String),
    /// Database connection failed.
    DatabaseConnectionFailed(String),
    /// Database migration failed.
    MigrationFailed(String),
    /// Query execution failed.
    QueryFailed(String),
    /// A stored row could not be turned back into a domain value.
    ReconstructionError(String),
    /// Initialization error.
    InitializationError(String),
    /// Foreign key enforcement is not enabled.
    ForeignKeyEnforcementNotEnabled,
    /// No connection could be taken from the pool.
    PoolError(String),
    /// The write lock could not be taken in this attempt.
    ///
    /// Retried internally; callers only see it if they bypass the retry
    /// loop.
    Busy(String),
    /// Lock contention persisted through every retry attempt.
    Conflict {
        /// Attempts made before giving up.
        attempts: u32,
    },
    /// The command was rejected by a booking rule. Nothing was written.
    Rejected(CoreError),
    /// Caller-supplied input is unusable.
    InvalidInput(String),
    /// The requested resource was not found.
    NotFound(String),
}

impl std::fmt::Display for PersistenceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DatabaseError(msg) => write!(f, "Database error: {msg}"),
            Self::DatabaseConnectionFailed(msg) => {
                write!(f, "Database connection failed: {msg}")
            }
            Self::MigrationFailed(msg) => write!(f, "Migration failed: {msg}"),
            Self::QueryFailed(msg) => write!(f, "Query failed: {msg}"),
            Self::ReconstructionError(msg) => write!(f, "Row reconstruction error: {msg}"),
            Self::InitializationError(msg) => write!(f, "Initialization error: {msg}"),
            Self::ForeignKeyEnforcementNotEnabled => {
                write!(f, "Foreign key enforcement is not enabled")
            }
            Self::PoolError(msg) => write!(f, "Connection pool error: {msg}"),
            Self::Busy(msg) => write!(f, "Database busy: {msg}"),
            Self::Conflict { attempts } => write!(
                f,
                "Booking store is busy after {attempts} attempts, try again"
            ),
            Self::Rejected(err) => write!(f, "{err}"),
            Self::InvalidInput(msg) => write!(f, "Invalid input: {msg}"),
            Self::NotFound(msg) => write!(f, "Not found: {msg}"),
        }
    }
}

impl std::error::Error for PersistenceError {}

impl From<diesel::result::Error> for PersistenceError {
    fn from(err: diesel::result::Error) -> Self {
        if is_lock_contention(&err) {
            return Self::Busy(err.to_string());
        }
        match err {
            diesel::result::Error::NotFound => Self::NotFound("Record not found".to_string()),
            _ => Self::DatabaseError(err.to_string()),
        }
    }
}

impl From<diesel::ConnectionError> for PersistenceError {
    fn from(err: diesel::ConnectionError) -> Self {
        Self::DatabaseConnectionFailed(err.to_string())
    }
}

impl From<diesel::r2d2::PoolError> for PersistenceError {
    fn from(err: diesel::r2d2::PoolError) -> Self {
        Self::PoolError(err.to_string())
    }
}

impl From<CoreError> for PersistenceError {
    fn from(err: CoreError) -> Self {
        Self::Rejected(err)
    }
}

/// Maps a query failure, keeping lock contention recognisable.
pub(crate) fn query_failed(operation: &str, err: diesel::result::Error) -> PersistenceError {
    if is_lock_contention(&err) {
        PersistenceError::Busy(format!("{operation}: {err}"))
    } else {
        PersistenceError::QueryFailed(format!("{operation}: {err}"))
    }
}
