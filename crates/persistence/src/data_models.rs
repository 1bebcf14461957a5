// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Row types and their conversion into domain values.

use diesel::prelude::*;
use num_traits::ToPrimitive;
use slotbook_domain::{
    Booking, BookingId, BookingStatus, Module, ModuleId, TrainingDay, TrainingDayId, UserId,
    parse_date,
};
use std::str::FromStr;

use crate::error::PersistenceError;

/// Diesel Queryable struct for module rows.
#[derive(Debug, Clone, Queryable)]
pub struct ModuleRow {
    pub module_id: i64,
    pub name: String,
    pub module_order: i32,
    pub duration_hours: i32,
}

impl ModuleRow {
    pub fn into_domain(self) -> Result<Module, PersistenceError> {
        let order: u8 = self.module_order.to_u8().ok_or_else(|| {
            PersistenceError::ReconstructionError(format!(
                "module {} has invalid order {}",
                self.module_id, self.module_order
            ))
        })?;
        let duration_hours: u32 = self.duration_hours.to_u32().ok_or_else(|| {
            PersistenceError::ReconstructionError(format!(
                "module {} has negative duration",
                self.module_id
            ))
        })?;
        Ok(Module::new(
            ModuleId::new(self.module_id),
            self.name,
            order,
            duration_hours,
        ))
    }
}

/// Diesel Queryable struct for training day rows.
#[derive(Debug, Clone, Queryable)]
pub struct TrainingDayRow {
    pub training_day_id: i64,
    pub date: String,
    pub module_id: Option<i64>,
    pub is_gap_day: i32,
    pub is_active: i32,
    pub capacity: i32,
}

impl TrainingDayRow {
    /// Assembles the domain day from this row and its (left-joined) module.
    pub fn into_domain(self, module: Option<ModuleRow>) -> Result<TrainingDay, PersistenceError> {
        let date = parse_date(&self.date)
            .map_err(|e| PersistenceError::ReconstructionError(e.to_string()))?;
        let capacity: u32 = self.capacity.to_u32().ok_or_else(|| {
            PersistenceError::ReconstructionError(format!(
                "training day {} has negative capacity",
                self.training_day_id
            ))
        })?;
        Ok(TrainingDay {
            training_day_id: TrainingDayId::new(self.training_day_id),
            date,
            module: module.map(ModuleRow::into_domain).transpose()?,
            is_gap_day: self.is_gap_day != 0,
            is_active: self.is_active != 0,
            capacity,
        })
    }
}

/// Diesel Queryable struct for booking rows.
#[derive(Debug, Clone, Queryable)]
pub struct BookingRow {
    pub booking_id: i64,
    pub user_id: String,
    pub status: String,
    pub total_hours: i32,
    pub created_at: String,
    pub updated_at: String,
}

impl BookingRow {
    pub fn into_domain(self, slots: Vec<TrainingDay>) -> Result<Booking, PersistenceError> {
        let status: BookingStatus = BookingStatus::from_str(&self.status)
            .map_err(|e| PersistenceError::ReconstructionError(e.to_string()))?;
        let total_hours: u32 = self.total_hours.to_u32().ok_or_else(|| {
            PersistenceError::ReconstructionError(format!(
                "booking {} has negative total hours",
                self.booking_id
            ))
        })?;
        Ok(Booking {
            booking_id: BookingId::new(self.booking_id),
            user_id: UserId::new(&self.user_id),
            status,
            total_hours,
            created_at: self.created_at,
            updated_at: self.updated_at,
            slots,
        })
    }
}

/// Converts a count or capacity to the `Integer` column type.
pub fn to_db_int(value: u32, what: &str) -> Result<i32, PersistenceError> {
    value
        .to_i32()
        .ok_or_else(|| PersistenceError::InvalidInput(format!("{what} {value} is out of range")))
}

/// Converts a boolean to the `Integer` column representation.
pub fn to_db_bool(value: bool) -> i32 {
    i32::from(value)
}
