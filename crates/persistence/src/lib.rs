// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Persistence layer for Slotbook.
//!
//! This crate owns the booking store and the allocation transaction. It is
//! built on Diesel over `SQLite`, with an r2d2 connection pool shared by
//! every request handler.
//!
//! ## Consistency
//!
//! Every write path runs inside `BEGIN IMMEDIATE`, which takes the
//! database write lock before anything is read. Occupancy is therefore
//! read and written under the same lock, and two trainees racing for the
//! last seat on a day are serialized by the database, not by the process.
//!
//! A writer that cannot get the lock within `busy_timeout` fails with
//! `SQLITE_BUSY`. That attempt is rolled back and retried from a fresh
//! snapshot according to the configured [`RetryPolicy`]. Rule rejections
//! are never retried.
//!
//! ## Databases
//!
//! - **In-memory** (`new_in_memory`) for tests. Each call gets its own
//!   shared-cache database, named from an atomic counter.
//! - **File** (`new_with_file`) for running servers. WAL journaling is
//!   enabled so calendar reads never wait on writers.
//!
//! ## Testing Philosophy
//!
//! - Standard tests (`cargo test`) use in-memory databases
//! - Concurrency tests use a temporary file database and real threads

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

mod allocation;
mod backend;
mod data_models;
mod diesel_schema;
mod error;
mod mutations;
mod queries;
mod retry;

#[cfg(test)]
mod tests;

use std::collections::HashMap;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use diesel::SqliteConnection;
use slotbook::Command;
use slotbook_audit::{BusinessEvent, ExecutionContext};
use slotbook_domain::{
    Booking, BookingId, BookingStatus, DEFAULT_MODULE_HOURS, DEFAULT_MODULES, DayOccupancy,
    Module, PlannedDay, TrainingDay, TrainingDayId, UserId, add_months, generate_schedule,
};
use time::Date;
use tracing::{debug, info};

use crate::allocation::Executed;
use crate::backend::sqlite::{SqlitePool, build_pool};

pub use error::PersistenceError;
pub use retry::RetryPolicy;

/// Atomic counter for generating unique in-memory database names.
///
/// Each call to `new_in_memory()` receives a unique sequential ID, so
/// tests never share a database by accident.
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Longest calendar range served in one read, in days.
pub const MAX_CALENDAR_SPAN_DAYS: i64 = 186;

/// Connection and retry settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PersistenceConfig {
    /// Maximum pooled connections for file databases.
    pub pool_size: u32,
    /// How long `SQLite` waits on a held lock before reporting busy.
    pub busy_timeout: Duration,
    /// Retry settings for lock contention.
    pub retry: RetryPolicy,
}

impl Default for PersistenceConfig {
    fn default() -> Self {
        Self {
            pool_size: 8,
            busy_timeout: Duration::from_millis(250),
            retry: RetryPolicy::default(),
        }
    }
}

/// The result of an allocation operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllocationOutcome {
    /// The trainee's active booking after the operation, if any.
    pub booking: Option<Booking>,
    /// Whether anything was written.
    pub changed: bool,
}

impl AllocationOutcome {
    /// The booking identifier, if the trainee has a booking.
    #[must_use]
    pub fn booking_id(&self) -> Option<BookingId> {
        self.booking.as_ref().map(|b| b.booking_id)
    }

    /// The booking status, `Draft` when there is no booking.
    #[must_use]
    pub fn status(&self) -> BookingStatus {
        self.booking.as_ref().map(|b| b.status).unwrap_or_default()
    }

    /// Hours credited by the held days.
    #[must_use]
    pub fn total_hours(&self) -> u32 {
        self.booking.as_ref().map_or(0, |b| b.total_hours)
    }

    /// Number of held days.
    #[must_use]
    pub fn remaining_slots(&self) -> usize {
        self.booking.as_ref().map_or(0, Booking::slot_count)
    }
}

/// What `seed_curriculum` wrote.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedSummary {
    /// Modules present after seeding.
    pub modules: usize,
    /// Training days created by this call.
    pub days_inserted: usize,
    /// Planned days whose date already existed.
    pub days_skipped: usize,
}

/// Persistence adapter for the booking store.
///
/// Cloning is cheap; clones share one connection pool.
#[derive(Clone)]
pub struct Persistence {
    pool: SqlitePool,
    retry: RetryPolicy,
}

impl std::fmt::Debug for Persistence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Persistence")
            .field("pool_state", &self.pool.state())
            .field("retry", &self.retry)
            .finish()
    }
}

impl Persistence {
    /// Creates a new persistence adapter with an in-memory `SQLite` database.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        Self::new_in_memory_with_config(PersistenceConfig::default())
    }

    /// Creates an in-memory database with the given settings.
    ///
    /// Shared-cache in-memory databases report table locks instead of
    /// waiting on them, so the pool holds a single connection regardless of
    /// `config.pool_size`.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_in_memory_with_config(config: PersistenceConfig) -> Result<Self, PersistenceError> {
        let db_id: u64 = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let shared_memory_url: String = format!("file:memdb_test_{db_id}?mode=memory&cache=shared");

        let pool: SqlitePool = build_pool(&shared_memory_url, 1, config.busy_timeout, false)?;
        Ok(Self {
            pool,
            retry: config.retry,
        })
    }

    /// Creates a new persistence adapter with a file-based `SQLite` database.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn new_with_file<P: AsRef<Path>>(
        path: P,
        config: PersistenceConfig,
    ) -> Result<Self, PersistenceError> {
        let path_str: &str = path.as_ref().to_str().ok_or_else(|| {
            PersistenceError::InitializationError("Invalid database path".to_string())
        })?;

        let pool: SqlitePool = build_pool(path_str, config.pool_size, config.busy_timeout, true)?;
        Ok(Self {
            pool,
            retry: config.retry,
        })
    }

    // ========================================================================
    // Allocation
    // ========================================================================

    /// Replaces the trainee's slot set with `training_day_ids` and confirms
    /// it in one transaction.
    ///
    /// # Errors
    ///
    /// - `PersistenceError::Rejected` for validation and capacity failures
    /// - `PersistenceError::Conflict` if the write lock stayed contended
    pub fn submit(
        &self,
        context: &mut ExecutionContext,
        user_id: &UserId,
        training_day_ids: Vec<TrainingDayId>,
    ) -> Result<AllocationOutcome, PersistenceError> {
        self.allocate(context, user_id, &Command::Submit { training_day_ids })
    }

    /// Adds one day to the trainee's booking, creating a draft if needed.
    ///
    /// # Errors
    ///
    /// - `PersistenceError::Rejected` for validation and capacity failures
    /// - `PersistenceError::Conflict` if the write lock stayed contended
    pub fn add_slot(
        &self,
        context: &mut ExecutionContext,
        user_id: &UserId,
        training_day_id: TrainingDayId,
    ) -> Result<AllocationOutcome, PersistenceError> {
        self.allocate(context, user_id, &Command::AddSlot { training_day_id })
    }

    /// Removes one day from the trainee's booking.
    ///
    /// Removing a day that is not held is a no-op.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::Conflict` if the write lock stayed
    /// contended, or a database error.
    pub fn remove_slot(
        &self,
        context: &mut ExecutionContext,
        user_id: &UserId,
        training_day_id: TrainingDayId,
    ) -> Result<AllocationOutcome, PersistenceError> {
        self.allocate(context, user_id, &Command::RemoveSlot { training_day_id })
    }

    /// Confirms the trainee's draft booking.
    ///
    /// # Errors
    ///
    /// - `PersistenceError::Rejected` if the booking is not the caller's,
    ///   is already confirmed, or fails validation or capacity
    /// - `PersistenceError::Conflict` if the write lock stayed contended
    pub fn confirm_booking(
        &self,
        context: &mut ExecutionContext,
        user_id: &UserId,
        booking_id: BookingId,
    ) -> Result<AllocationOutcome, PersistenceError> {
        self.allocate(context, user_id, &Command::Confirm { booking_id })
    }

    fn allocate(
        &self,
        context: &mut ExecutionContext,
        user_id: &UserId,
        command: &Command,
    ) -> Result<AllocationOutcome, PersistenceError> {
        let operation: &'static str = command.name();
        let executed: Executed = retry::run_with_retry(&self.retry, context, operation, || {
            let mut conn = self.pool.get()?;
            allocation::execute(&mut conn, user_id, command)
        })?;

        // The transaction has committed; only now does the event exist.
        if let (Some(action), Some(booking)) = (executed.action, executed.booking.as_ref()) {
            context.record_event(BusinessEvent::booking(
                action,
                booking.booking_id,
                user_id,
                booking.total_hours,
                booking.status,
            ));
            info!(
                user_id = %user_id,
                booking_id = %booking.booking_id,
                action = %action,
                status = %booking.status,
                total_hours = booking.total_hours,
                attempts = context.performance().attempts,
                db_tx_ms = context.performance().db_tx_ms,
                "Booking updated"
            );
        }

        Ok(AllocationOutcome {
            changed: executed.action.is_some(),
            booking: executed.booking,
        })
    }

    // ========================================================================
    // Reads
    // ========================================================================

    /// Returns the trainee's active booking with its held days.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be queried.
    pub fn get_active_booking(&self, user_id: &UserId) -> Result<Option<Booking>, PersistenceError> {
        let mut conn = self.pool.get()?;
        queries::bookings::find_active_booking(&mut conn, user_id)
    }

    /// Counts the trainee's active bookings. Never more than one.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be queried.
    pub fn count_active_bookings(&self, user_id: &UserId) -> Result<i64, PersistenceError> {
        let mut conn = self.pool.get()?;
        queries::bookings::count_active_bookings(&mut conn, user_id)
    }

    /// Returns every training day in `[from, to]` with its confirmed
    /// occupancy, ordered by date.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::InvalidInput` if `from` is after `to` or
    /// the range spans more than [`MAX_CALENDAR_SPAN_DAYS`].
    pub fn get_calendar(&self, from: Date, to: Date) -> Result<Vec<DayOccupancy>, PersistenceError> {
        if from > to {
            return Err(PersistenceError::InvalidInput(format!(
                "calendar range starts after it ends ({from} > {to})"
            )));
        }
        let span: i64 = (to - from).whole_days();
        if span > MAX_CALENDAR_SPAN_DAYS {
            return Err(PersistenceError::InvalidInput(format!(
                "calendar range of {span} days exceeds {MAX_CALENDAR_SPAN_DAYS}"
            )));
        }

        let mut conn = self.pool.get()?;
        queries::ledger::load_calendar(&mut conn, from, to)
    }

    /// Returns the curriculum modules in order.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be queried.
    pub fn list_modules(&self) -> Result<Vec<Module>, PersistenceError> {
        let mut conn = self.pool.get()?;
        queries::schedule::list_modules(&mut conn)
    }

    // ========================================================================
    // Administration
    // ========================================================================

    /// Seeds the default curriculum and `months` of training days starting
    /// at `start`.
    ///
    /// Existing modules and dates are left untouched, so seeding twice is
    /// harmless.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::InvalidInput` if the schedule cannot be
    /// generated, or a database error.
    pub fn seed_curriculum(
        &self,
        start: Date,
        months: u32,
        capacity: u32,
    ) -> Result<SeedSummary, PersistenceError> {
        let end: Date =
            add_months(start, months).map_err(|e| PersistenceError::InvalidInput(e.to_string()))?;
        let plan: Vec<PlannedDay> = generate_schedule(start, end, DEFAULT_MODULES.len(), capacity)
            .map_err(|e| PersistenceError::InvalidInput(e.to_string()))?;

        let mut conn = self.pool.get()?;
        let summary: SeedSummary = conn.immediate_transaction(|conn| seed(conn, &plan))?;

        info!(
            %start,
            %end,
            modules = summary.modules,
            days_inserted = summary.days_inserted,
            days_skipped = summary.days_skipped,
            "Seeded curriculum"
        );
        Ok(summary)
    }

    /// Edits a training day's capacity and active flag.
    ///
    /// Capacity may be set below current occupancy; existing slots stay
    /// and only later allocations see the lower limit.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::NotFound` if the day does not exist.
    pub fn update_training_day(
        &self,
        training_day_id: TrainingDayId,
        capacity: Option<u32>,
        is_active: Option<bool>,
    ) -> Result<TrainingDay, PersistenceError> {
        let id: i64 = training_day_id.value();
        let mut conn = self.pool.get()?;
        conn.immediate_transaction(|conn| {
            if queries::ledger::load_day(conn, id)?.is_none() {
                return Err(PersistenceError::NotFound(format!(
                    "training day {training_day_id}"
                )));
            }
            mutations::schedule::update_training_day(conn, id, capacity, is_active)?;
            queries::ledger::load_day(conn, id)?.ok_or_else(|| {
                PersistenceError::NotFound(format!("training day {training_day_id}"))
            })
        })
        .inspect(|day| {
            info!(
                training_day_id = %day.training_day_id,
                capacity = day.capacity,
                is_active = day.is_active,
                "Training day updated"
            );
        })
    }
}

fn seed(conn: &mut SqliteConnection, plan: &[PlannedDay]) -> Result<SeedSummary, PersistenceError> {
    let mut module_ids: HashMap<u8, i64> = HashMap::new();
    for (order, name) in (1u8..).zip(DEFAULT_MODULES) {
        let module_id: i64 =
            mutations::schedule::upsert_module(conn, name, order, DEFAULT_MODULE_HOURS)?;
        module_ids.insert(order, module_id);
    }

    let mut days_inserted: usize = 0;
    for day in plan {
        let module_id: Option<i64> = day
            .module_order
            .and_then(|order| module_ids.get(&order).copied());
        if mutations::schedule::insert_training_day(conn, day.date, module_id, day.capacity, true)?
            .is_some()
        {
            days_inserted += 1;
        } else {
            debug!(date = %day.date, "Training day already exists");
        }
    }

    Ok(SeedSummary {
        modules: module_ids.len(),
        days_inserted,
        days_skipped: plan.len() - days_inserted,
    })
}
