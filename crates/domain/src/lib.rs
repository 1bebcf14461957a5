// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

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

mod booking_status;
mod capacity;
mod error;
mod schedule;
mod types;
mod validation;

#[cfg(test)]
mod tests;

pub use booking_status::BookingStatus;
pub use capacity::{DayOccupancy, check_capacity, check_slot_capacity};
pub use schedule::{
    DEFAULT_MODULE_HOURS, DEFAULT_MODULES, GAP_DAYS, PlannedDay, add_months, generate_schedule,
};

// Re-export public types
pub use error::{DomainError, ErrorKind};
pub use types::{
    Booking, BookingId, DATE_FORMAT, Module, ModuleId, TrainingDay, TrainingDayId, UserId,
    format_date, parse_date, total_hours,
};
pub use validation::{
    MAX_SELECTION_DAYS, REQUIRED_HOURS, validate_selection, validate_selection_size,
    validate_slot_addition,
};
