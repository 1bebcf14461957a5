// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Curriculum queries.

use diesel::SqliteConnection;
use diesel::prelude::*;
use slotbook_domain::Module;

use crate::data_models::ModuleRow;
use crate::diesel_schema::modules;
use crate::error::{PersistenceError, query_failed};

/// Lists all modules in curriculum order.
///
/// # Errors
///
/// Returns an error if the query fails or a row is malformed.
pub fn list_modules(conn: &mut SqliteConnection) -> Result<Vec<Module>, PersistenceError> {
    modules::table
        .order(modules::module_order.asc())
        .load::<ModuleRow>(conn)
        .map_err(|e| query_failed("list_modules", e))?
        .into_iter()
        .map(ModuleRow::into_domain)
        .collect()
}

/// Looks up a module id by its curriculum position.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn module_id_for_order(
    conn: &mut SqliteConnection,
    order: i32,
) -> Result<Option<i64>, PersistenceError> {
    modules::table
        .filter(modules::module_order.eq(order))
        .select(modules::module_id)
        .first::<i64>(conn)
        .optional()
        .map_err(|e| query_failed("module_id_for_order", e))
}
