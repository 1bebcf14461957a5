// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::booking_status::BookingStatus;
use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use time::Date;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;

/// Storage and wire format for calendar dates (`YYYY-MM-DD`).
pub const DATE_FORMAT: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");

/// Formats a calendar date as `YYYY-MM-DD`.
#[must_use]
pub fn format_date(date: Date) -> String {
    // Display for `Date` already renders the ISO calendar form.
    date.to_string()
}

/// Parses a `YYYY-MM-DD` calendar date.
///
/// # Errors
///
/// Returns `DomainError::DateParseError` if the string is not a valid date.
pub fn parse_date(value: &str) -> Result<Date, DomainError> {
    Date::parse(value, DATE_FORMAT).map_err(|e| DomainError::DateParseError {
        date_string: value.to_string(),
        error: e.to_string(),
    })
}

/// Identifier of an authenticated trainee.
///
/// The identity provider hands this value over already authenticated;
/// the engine treats it as an opaque key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct UserId(String);

impl UserId {
    /// Creates a new `UserId`.
    #[must_use]
    pub fn new(value: &str) -> Self {
        Self(value.to_string())
    }

    /// Returns the raw identifier.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

macro_rules! numeric_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            /// Wraps a persisted row identifier.
            #[must_use]
            pub const fn new(value: i64) -> Self {
                Self(value)
            }

            /// Returns the raw row identifier.
            #[must_use]
            pub const fn value(self) -> i64 {
                self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

numeric_id!(
    /// Identifier of a curriculum module.
    ModuleId
);
numeric_id!(
    /// Identifier of a training day.
    TrainingDayId
);
numeric_id!(
    /// Identifier of a booking.
    BookingId
);

/// A topic in the fixed curriculum.
///
/// Modules are seeded once and are read-only to the allocation engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Module {
    /// The module identifier.
    pub module_id: ModuleId,
    /// Display name.
    pub name: String,
    /// Position in the curriculum, starting at 1.
    pub order: u8,
    /// Hours credited for attending one day of this module.
    pub duration_hours: u32,
}

impl Module {
    /// Creates a new `Module`.
    #[must_use]
    pub const fn new(module_id: ModuleId, name: String, order: u8, duration_hours: u32) -> Self {
        Self {
            module_id,
            name,
            order,
            duration_hours,
        }
    }
}

/// One calendar date's training offering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainingDay {
    /// The training day identifier.
    pub training_day_id: TrainingDayId,
    /// The calendar date (unique across the schedule).
    pub date: Date,
    /// The module taught on this day. `None` for gap days.
    pub module: Option<Module>,
    /// Whether this is a non-teaching day.
    pub is_gap_day: bool,
    /// Soft-disable flag controlled by administrators.
    pub is_active: bool,
    /// Maximum number of confirmed occupants.
    pub capacity: u32,
}

impl TrainingDay {
    /// Returns the module identifier, if this day teaches one.
    #[must_use]
    pub fn module_id(&self) -> Option<ModuleId> {
        self.module.as_ref().map(|m| m.module_id)
    }

    /// Hours credited for this day (zero for gap days).
    #[must_use]
    pub fn credited_hours(&self) -> u32 {
        self.module.as_ref().map_or(0, |m| m.duration_hours)
    }
}

/// A trainee's active claim set.
///
/// At most one active booking exists per trainee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Booking {
    /// The booking identifier.
    pub booking_id: BookingId,
    /// The owning trainee.
    pub user_id: UserId,
    /// Current lifecycle status.
    pub status: BookingStatus,
    /// Cached sum of credited hours over the held days.
    pub total_hours: u32,
    /// Creation timestamp (RFC 3339).
    pub created_at: String,
    /// Last modification timestamp (RFC 3339).
    pub updated_at: String,
    /// The training days currently held, ordered by date.
    pub slots: Vec<TrainingDay>,
}

impl Booking {
    /// Returns the identifiers of the held training days.
    #[must_use]
    pub fn held_day_ids(&self) -> Vec<TrainingDayId> {
        self.slots.iter().map(|d| d.training_day_id).collect()
    }

    /// Returns true if the booking holds the given training day.
    #[must_use]
    pub fn holds(&self, training_day_id: TrainingDayId) -> bool {
        self.slots
            .iter()
            .any(|d| d.training_day_id == training_day_id)
    }

    /// Number of held slots.
    #[must_use]
    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }
}

/// Sums the credited hours over a set of training days.
#[must_use]
pub fn total_hours(days: &[TrainingDay]) -> u32 {
    days.iter().map(TrainingDay::credited_hours).sum()
}
