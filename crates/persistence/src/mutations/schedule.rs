// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Curriculum and calendar writes.

use diesel::SqliteConnection;
use diesel::prelude::*;
use slotbook_domain::format_date;
use time::Date;

use crate::backend::sqlite::get_last_insert_rowid;
use crate::data_models::{to_db_bool, to_db_int};
use crate::diesel_schema::{modules, training_days};
use crate::error::{PersistenceError, query_failed};
use crate::queries::schedule::module_id_for_order;

/// Inserts a module unless one already holds `order`. Returns the id of
/// the module at that position either way.
///
/// # Errors
///
/// Returns an error if a query fails or a value is out of range.
pub fn upsert_module(
    conn: &mut SqliteConnection,
    name: &str,
    order: u8,
    duration_hours: u32,
) -> Result<i64, PersistenceError> {
    let order: i32 = i32::from(order);
    if let Some(existing) = module_id_for_order(conn, order)? {
        return Ok(existing);
    }

    diesel::insert_into(modules::table)
        .values((
            modules::name.eq(name),
            modules::module_order.eq(order),
            modules::duration_hours.eq(to_db_int(duration_hours, "duration hours")?),
        ))
        .execute(conn)
        .map_err(|e| query_failed("upsert_module", e))?;
    get_last_insert_rowid(conn)
}

/// Inserts a training day. Returns `None` if the date already exists.
///
/// # Errors
///
/// Returns an error if the insert fails for any other reason.
pub fn insert_training_day(
    conn: &mut SqliteConnection,
    date: Date,
    module_id: Option<i64>,
    capacity: u32,
    is_active: bool,
) -> Result<Option<i64>, PersistenceError> {
    let inserted: usize = diesel::insert_or_ignore_into(training_days::table)
        .values((
            training_days::date.eq(format_date(date)),
            training_days::module_id.eq(module_id),
            training_days::is_gap_day.eq(to_db_bool(module_id.is_none())),
            training_days::is_active.eq(to_db_bool(is_active)),
            training_days::capacity.eq(to_db_int(capacity, "capacity")?),
        ))
        .execute(conn)
        .map_err(|e| query_failed("insert_training_day", e))?;

    if inserted == 0 {
        return Ok(None);
    }
    Ok(Some(get_last_insert_rowid(conn)?))
}

/// Edits the administrative attributes of a training day. Returns the
/// number of rows touched.
///
/// # Errors
///
/// Returns an error if the update fails or the capacity is out of range.
pub fn update_training_day(
    conn: &mut SqliteConnection,
    training_day_id: i64,
    capacity: Option<u32>,
    is_active: Option<bool>,
) -> Result<usize, PersistenceError> {
    let mut touched: usize = 0;
    if let Some(capacity) = capacity {
        touched = diesel::update(training_days::table.find(training_day_id))
            .set(training_days::capacity.eq(to_db_int(capacity, "capacity")?))
            .execute(conn)
            .map_err(|e| query_failed("update_training_day", e))?;
    }
    if let Some(is_active) = is_active {
        touched = diesel::update(training_days::table.find(training_day_id))
            .set(training_days::is_active.eq(to_db_bool(is_active)))
            .execute(conn)
            .map_err(|e| query_failed("update_training_day", e))?;
    }
    Ok(touched)
}
