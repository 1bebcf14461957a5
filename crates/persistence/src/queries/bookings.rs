// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Booking queries.

use diesel::SqliteConnection;
use diesel::prelude::*;
use slotbook_domain::{Booking, BookingStatus, TrainingDay, UserId};

use crate::data_models::{BookingRow, ModuleRow, TrainingDayRow};
use crate::diesel_schema::{booking_slots, bookings, modules, training_days};
use crate::error::{PersistenceError, query_failed};

/// Loads the held days of a booking, ordered by date.
///
/// # Errors
///
/// Returns an error if the query fails or a row is malformed.
pub fn load_slots(
    conn: &mut SqliteConnection,
    booking_id: i64,
) -> Result<Vec<TrainingDay>, PersistenceError> {
    let rows: Vec<(TrainingDayRow, Option<ModuleRow>)> = booking_slots::table
        .inner_join(training_days::table.left_join(modules::table))
        .filter(booking_slots::booking_id.eq(booking_id))
        .order(training_days::date.asc())
        .select((training_days::all_columns, modules::all_columns.nullable()))
        .load(conn)
        .map_err(|e| query_failed("load_slots", e))?;

    rows.into_iter()
        .map(|(day, module)| day.into_domain(module))
        .collect()
}

/// Loads a booking with its slots.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if the booking does not exist.
pub fn load_booking(
    conn: &mut SqliteConnection,
    booking_id: i64,
) -> Result<Booking, PersistenceError> {
    let row: BookingRow = bookings::table
        .find(booking_id)
        .first::<BookingRow>(conn)
        .optional()
        .map_err(|e| query_failed("load_booking", e))?
        .ok_or_else(|| PersistenceError::NotFound(format!("booking {booking_id}")))?;
    let slots: Vec<TrainingDay> = load_slots(conn, booking_id)?;
    row.into_domain(slots)
}

/// Finds the trainee's active (draft or confirmed) booking.
///
/// Only one can exist; if an earlier bug ever left two, the oldest wins so
/// the choice is stable.
///
/// # Errors
///
/// Returns an error if a query fails or a row is malformed.
pub fn find_active_booking(
    conn: &mut SqliteConnection,
    user_id: &UserId,
) -> Result<Option<Booking>, PersistenceError> {
    let active: [&str; 2] = [
        BookingStatus::Draft.as_str(),
        BookingStatus::Confirmed.as_str(),
    ];
    let row: Option<BookingRow> = bookings::table
        .filter(bookings::user_id.eq(user_id.value()))
        .filter(bookings::status.eq_any(active))
        .order(bookings::booking_id.asc())
        .first::<BookingRow>(conn)
        .optional()
        .map_err(|e| query_failed("find_active_booking", e))?;

    match row {
        Some(row) => {
            let slots: Vec<TrainingDay> = load_slots(conn, row.booking_id)?;
            Ok(Some(row.into_domain(slots)?))
        }
        None => Ok(None),
    }
}

/// Counts the trainee's active bookings.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn count_active_bookings(
    conn: &mut SqliteConnection,
    user_id: &UserId,
) -> Result<i64, PersistenceError> {
    let active: [&str; 2] = [
        BookingStatus::Draft.as_str(),
        BookingStatus::Confirmed.as_str(),
    ];
    bookings::table
        .filter(bookings::user_id.eq(user_id.value()))
        .filter(bookings::status.eq_any(active))
        .count()
        .get_result(conn)
        .map_err(|e| query_failed("count_active_bookings", e))
}
