// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Booking and slot writes.

use diesel::SqliteConnection;
use diesel::prelude::*;
use slotbook::{BookingTarget, SlotChange, TransitionResult};
use slotbook_domain::{BookingStatus, TrainingDayId, UserId};
use tracing::debug;

use crate::backend::sqlite::get_last_insert_rowid;
use crate::data_models::to_db_int;
use crate::diesel_schema::{booking_slots, bookings};
use crate::error::{PersistenceError, query_failed};

/// Inserts a booking and returns its id.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn insert_booking(
    conn: &mut SqliteConnection,
    user_id: &UserId,
    status: BookingStatus,
    total_hours: u32,
    now: &str,
) -> Result<i64, PersistenceError> {
    diesel::insert_into(bookings::table)
        .values((
            bookings::user_id.eq(user_id.value()),
            bookings::status.eq(status.as_str()),
            bookings::total_hours.eq(to_db_int(total_hours, "total hours")?),
            bookings::created_at.eq(now),
            bookings::updated_at.eq(now),
        ))
        .execute(conn)
        .map_err(|e| query_failed("insert_booking", e))?;
    get_last_insert_rowid(conn)
}

/// Sets the status and cached hours of a booking and touches `updated_at`.
///
/// # Errors
///
/// Returns an error if the update fails.
pub fn update_booking(
    conn: &mut SqliteConnection,
    booking_id: i64,
    status: BookingStatus,
    total_hours: u32,
    now: &str,
) -> Result<(), PersistenceError> {
    diesel::update(bookings::table.find(booking_id))
        .set((
            bookings::status.eq(status.as_str()),
            bookings::total_hours.eq(to_db_int(total_hours, "total hours")?),
            bookings::updated_at.eq(now),
        ))
        .execute(conn)
        .map_err(|e| query_failed("update_booking", e))?;
    Ok(())
}

/// Inserts one slot.
///
/// # Errors
///
/// Returns an error if the insert fails, including when the pair already
/// exists.
pub fn insert_slot(
    conn: &mut SqliteConnection,
    booking_id: i64,
    training_day_id: TrainingDayId,
    now: &str,
) -> Result<(), PersistenceError> {
    diesel::insert_into(booking_slots::table)
        .values((
            booking_slots::booking_id.eq(booking_id),
            booking_slots::training_day_id.eq(training_day_id.value()),
            booking_slots::created_at.eq(now),
        ))
        .execute(conn)
        .map_err(|e| query_failed("insert_slot", e))?;
    Ok(())
}

/// Deletes one slot. Returns the number of rows removed.
///
/// # Errors
///
/// Returns an error if the delete fails.
pub fn delete_slot(
    conn: &mut SqliteConnection,
    booking_id: i64,
    training_day_id: TrainingDayId,
) -> Result<usize, PersistenceError> {
    diesel::delete(
        booking_slots::table
            .filter(booking_slots::booking_id.eq(booking_id))
            .filter(booking_slots::training_day_id.eq(training_day_id.value())),
    )
    .execute(conn)
    .map_err(|e| query_failed("delete_slot", e))
}

/// Deletes every slot of a booking.
///
/// # Errors
///
/// Returns an error if the delete fails.
pub fn delete_all_slots(
    conn: &mut SqliteConnection,
    booking_id: i64,
) -> Result<usize, PersistenceError> {
    diesel::delete(booking_slots::table.filter(booking_slots::booking_id.eq(booking_id)))
        .execute(conn)
        .map_err(|e| query_failed("delete_all_slots", e))
}

/// Writes a decided transition and returns the booking id it landed on.
///
/// # Errors
///
/// Returns an error if any write fails.
pub fn write_transition(
    conn: &mut SqliteConnection,
    user_id: &UserId,
    result: &TransitionResult,
    now: &str,
) -> Result<i64, PersistenceError> {
    let booking_id: i64 = match result.target {
        BookingTarget::Existing(id) => {
            update_booking(conn, id.value(), result.status, result.total_hours, now)?;
            id.value()
        }
        BookingTarget::New => {
            insert_booking(conn, user_id, result.status, result.total_hours, now)?
        }
    };

    match &result.slot_change {
        SlotChange::Replace(day_ids) => {
            let removed: usize = delete_all_slots(conn, booking_id)?;
            for day_id in day_ids {
                insert_slot(conn, booking_id, *day_id, now)?;
            }
            debug!(booking_id, removed, inserted = day_ids.len(), "Replaced slots");
        }
        SlotChange::Insert(day_id) => insert_slot(conn, booking_id, *day_id, now)?,
        SlotChange::Delete(day_id) => {
            delete_slot(conn, booking_id, *day_id)?;
        }
        SlotChange::Keep => {}
    }

    Ok(booking_id)
}
