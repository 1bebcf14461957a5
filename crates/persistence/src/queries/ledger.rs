// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Capacity ledger queries.
//!
//! Confirmed occupancy is always counted from `booking_slots` joined to
//! confirmed `bookings`; nothing is cached.

use std::collections::HashMap;

use diesel::SqliteConnection;
use diesel::dsl::count_star;
use diesel::prelude::*;
use num_traits::ToPrimitive;
use slotbook_domain::{BookingStatus, DayOccupancy, TrainingDay, UserId, format_date};
use time::Date;

use crate::data_models::{ModuleRow, TrainingDayRow};
use crate::diesel_schema::{booking_slots, bookings, modules, training_days};
use crate::error::{PersistenceError, query_failed};

/// Loads training days with their modules, ordered by date.
///
/// Unknown identifiers are skipped.
///
/// # Errors
///
/// Returns an error if the query fails or a row is malformed.
pub fn load_days(
    conn: &mut SqliteConnection,
    training_day_ids: &[i64],
) -> Result<Vec<TrainingDay>, PersistenceError> {
    if training_day_ids.is_empty() {
        return Ok(Vec::new());
    }

    let rows: Vec<(TrainingDayRow, Option<ModuleRow>)> = training_days::table
        .left_join(modules::table)
        .filter(training_days::training_day_id.eq_any(training_day_ids))
        .order(training_days::date.asc())
        .select((training_days::all_columns, modules::all_columns.nullable()))
        .load(conn)
        .map_err(|e| query_failed("load_days", e))?;

    rows.into_iter()
        .map(|(day, module)| day.into_domain(module))
        .collect()
}

/// Loads one training day with its module.
///
/// # Errors
///
/// Returns an error if the query fails or the row is malformed.
pub fn load_day(
    conn: &mut SqliteConnection,
    training_day_id: i64,
) -> Result<Option<TrainingDay>, PersistenceError> {
    Ok(load_days(conn, &[training_day_id])?.into_iter().next())
}

/// Counts confirmed slots per training day.
///
/// With `exclude_user`, slots belonging to that trainee's bookings are not
/// counted.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn confirmed_counts(
    conn: &mut SqliteConnection,
    training_day_ids: &[i64],
    exclude_user: Option<&UserId>,
) -> Result<HashMap<i64, u32>, PersistenceError> {
    if training_day_ids.is_empty() {
        return Ok(HashMap::new());
    }

    let confirmed: &str = BookingStatus::Confirmed.as_str();
    let rows: Vec<(i64, i64)> = match exclude_user {
        Some(user_id) => booking_slots::table
            .inner_join(bookings::table)
            .filter(bookings::status.eq(confirmed))
            .filter(bookings::user_id.ne(user_id.value()))
            .filter(booking_slots::training_day_id.eq_any(training_day_ids))
            .group_by(booking_slots::training_day_id)
            .select((booking_slots::training_day_id, count_star()))
            .load::<(i64, i64)>(conn),
        None => booking_slots::table
            .inner_join(bookings::table)
            .filter(bookings::status.eq(confirmed))
            .filter(booking_slots::training_day_id.eq_any(training_day_ids))
            .group_by(booking_slots::training_day_id)
            .select((booking_slots::training_day_id, count_star()))
            .load::<(i64, i64)>(conn),
    }
    .map_err(|e| query_failed("confirmed_counts", e))?;

    rows.into_iter()
        .map(|(day_id, count)| {
            count.to_u32().map(|c| (day_id, c)).ok_or_else(|| {
                PersistenceError::ReconstructionError(format!(
                    "occupancy count {count} for day {day_id} is out of range"
                ))
            })
        })
        .collect()
}

fn attach_counts(days: Vec<TrainingDay>, counts: &HashMap<i64, u32>) -> Vec<DayOccupancy> {
    days.into_iter()
        .map(|day| {
            let count: u32 = counts.get(&day.training_day_id.value()).copied().unwrap_or(0);
            DayOccupancy::new(day, count)
        })
        .collect()
}

/// Loads days together with their confirmed occupancy.
///
/// Must be called inside the write-locked transaction when the result feeds
/// a capacity decision.
///
/// # Errors
///
/// Returns an error if a query fails or a row is malformed.
pub fn load_occupancy(
    conn: &mut SqliteConnection,
    training_day_ids: &[i64],
    exclude_user: Option<&UserId>,
) -> Result<Vec<DayOccupancy>, PersistenceError> {
    let days: Vec<TrainingDay> = load_days(conn, training_day_ids)?;
    let counts: HashMap<i64, u32> = confirmed_counts(conn, training_day_ids, exclude_user)?;
    Ok(attach_counts(days, &counts))
}

/// Loads every day in `[from, to]` with its confirmed occupancy, ordered
/// by date.
///
/// # Errors
///
/// Returns an error if a query fails or a row is malformed.
pub fn load_calendar(
    conn: &mut SqliteConnection,
    from: Date,
    to: Date,
) -> Result<Vec<DayOccupancy>, PersistenceError> {
    let rows: Vec<(TrainingDayRow, Option<ModuleRow>)> = training_days::table
        .left_join(modules::table)
        .filter(training_days::date.ge(format_date(from)))
        .filter(training_days::date.le(format_date(to)))
        .order(training_days::date.asc())
        .select((training_days::all_columns, modules::all_columns.nullable()))
        .load(conn)
        .map_err(|e| query_failed("load_calendar", e))?;

    let days: Vec<TrainingDay> = rows
        .into_iter()
        .map(|(day, module)| day.into_domain(module))
        .collect::<Result<_, _>>()?;
    let ids: Vec<i64> = days.iter().map(|d| d.training_day_id.value()).collect();
    let counts: HashMap<i64, u32> = confirmed_counts(conn, &ids, None)?;
    Ok(attach_counts(days, &counts))
}
