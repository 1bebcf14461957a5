// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The allocation transaction.
//!
//! One attempt is: take the write lock, read the trainee's booking and the
//! relevant occupancy, let the core decide, write, commit. The lock is
//! taken by `BEGIN IMMEDIATE` before the first read, so no other writer can
//! change occupancy between the capacity check and the insert.

use diesel::SqliteConnection;
use slotbook::{AllocationSnapshot, Command, CoreError, Transition, apply};
use slotbook_audit::{Action, now_rfc3339};
use slotbook_domain::{Booking, DayOccupancy, TrainingDayId, UserId, validate_selection_size};
use tracing::debug;

use crate::error::PersistenceError;
use crate::mutations::bookings::write_transition;
use crate::queries::bookings::{find_active_booking, load_booking};
use crate::queries::ledger::load_occupancy;

/// What one committed attempt produced.
#[derive(Debug)]
pub struct Executed {
    /// The trainee's booking after the attempt.
    pub booking: Option<Booking>,
    /// The action written, `None` when nothing changed.
    pub action: Option<Action>,
}

/// Runs one attempt of `command` for `user_id` in its own write-locked
/// transaction.
///
/// # Errors
///
/// - `PersistenceError::Rejected` if a booking rule rejects the command
/// - `PersistenceError::Busy` if the write lock could not be taken
/// - other variants for database failures
pub fn execute(
    conn: &mut SqliteConnection,
    user_id: &UserId,
    command: &Command,
) -> Result<Executed, PersistenceError> {
    // The requested ids are bound into one IN clause below.
    if let Command::Submit { training_day_ids } = command {
        validate_selection_size(training_day_ids).map_err(CoreError::from)?;
    }

    conn.immediate_transaction(|conn| {
        let active: Option<Booking> = find_active_booking(conn, user_id)?;

        let day_ids: Vec<TrainingDayId> = match command {
            Command::Confirm { .. } => active
                .as_ref()
                .map(Booking::held_day_ids)
                .unwrap_or_default(),
            _ => command.requested_day_ids(),
        };
        let raw_ids: Vec<i64> = day_ids.iter().map(|id| id.value()).collect();
        let occupancy: Vec<DayOccupancy> = load_occupancy(conn, &raw_ids, Some(user_id))?;

        let snapshot: AllocationSnapshot =
            AllocationSnapshot::new(user_id.clone(), occupancy, active);

        match apply(&snapshot, command.clone())? {
            Transition::Unchanged { .. } => {
                debug!(user_id = %user_id, command = command.name(), "No change to write");
                Ok(Executed {
                    booking: snapshot.active_booking,
                    action: None,
                })
            }
            Transition::Changed(result) => {
                let now: String = now_rfc3339();
                let booking_id: i64 = write_transition(conn, user_id, &result, &now)?;
                let booking: Booking = load_booking(conn, booking_id)?;
                debug!(
                    user_id = %user_id,
                    booking_id,
                    status = %booking.status,
                    total_hours = booking.total_hours,
                    "Transition written"
                );
                Ok(Executed {
                    booking: Some(booking),
                    action: Some(result.action),
                })
            }
        }
    })
}
