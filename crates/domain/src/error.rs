// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::types::{BookingId, TrainingDayId};
use time::Date;

/// Broad classification of domain errors.
///
/// Callers use the kind to decide how a rejection is surfaced; none of
/// these kinds is retried automatically.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Caller input is structurally wrong.
    Validation,
    /// A seat was taken by someone else. The caller may resubmit.
    Capacity,
    /// The target does not exist for this caller.
    NotFound,
}

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// The requested day set is empty, references unknown or inactive
    /// days, repeats a day, or contains a gap day.
    InvalidSelection {
        /// Description of the problem.
        reason: String,
        /// The offending training day, when one can be named.
        training_day_id: Option<TrainingDayId>,
    },
    /// The selected days do not credit enough hours.
    InsufficientHours {
        /// Hours credited by the selection.
        total_hours: u32,
        /// Hours required for a complete booking.
        required_hours: u32,
    },
    /// Two selected days teach the same module.
    DuplicateModule {
        /// The module name.
        module: String,
        /// The first date teaching the module.
        first_date: Date,
        /// The second date teaching the module.
        second_date: Date,
    },
    /// A requested day has no confirmed seat left.
    DayFull {
        /// The full day.
        training_day_id: TrainingDayId,
        /// Its date.
        date: Date,
    },
    /// The day cannot take another slot.
    CapacityFull {
        /// The full day.
        training_day_id: TrainingDayId,
        /// Its date.
        date: Date,
    },
    /// The day cannot be added on its own (unknown, inactive, gap day).
    InvalidTrainingDay {
        /// The rejected day.
        training_day_id: TrainingDayId,
        /// Description of the problem.
        reason: String,
    },
    /// The booking already holds a day of this module.
    ModuleAlreadySelected {
        /// The module name.
        module: String,
        /// The date already held for it.
        held_date: Date,
    },
    /// The booking is already confirmed.
    AlreadyConfirmed,
    /// The booking does not exist or does not belong to the caller.
    BookingNotFound {
        /// The requested booking.
        booking_id: BookingId,
    },
    /// Stored status text is not a known status.
    InvalidBookingStatus {
        /// The unrecognised value.
        status: String,
    },
    /// Failed to parse date from string.
    DateParseError {
        /// The invalid date string.
        date_string: String,
        /// The parsing error message.
        error: String,
    },
    /// Date arithmetic overflow.
    DateArithmeticOverflow {
        /// Description of the operation that failed.
        operation: String,
    },
    /// Schedule generation input is unusable.
    InvalidSchedule(String),
}

impl DomainError {
    /// Returns the classification of this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::DayFull { .. } | Self::CapacityFull { .. } => ErrorKind::Capacity,
            Self::BookingNotFound { .. } => ErrorKind::NotFound,
            _ => ErrorKind::Validation,
        }
    }
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidSelection {
                reason,
                training_day_id: Some(id),
            } => write!(f, "Invalid training day selection: {reason} (day {id})"),
            Self::InvalidSelection {
                reason,
                training_day_id: None,
            } => write!(f, "Invalid training day selection: {reason}"),
            Self::InsufficientHours {
                total_hours,
                required_hours,
            } => write!(
                f,
                "Minimum required hours not met: selected {total_hours} of {required_hours}"
            ),
            Self::DuplicateModule {
                module,
                first_date,
                second_date,
            } => write!(
                f,
                "Cannot book module '{module}' twice ({first_date} and {second_date})"
            ),
            Self::DayFull { date, .. } => write!(f, "Selected date {date} is full"),
            Self::CapacityFull { date, .. } => {
                write!(f, "Training day on {date} has no seats left")
            }
            Self::InvalidTrainingDay {
                training_day_id,
                reason,
            } => write!(f, "Training day {training_day_id} cannot be booked: {reason}"),
            Self::ModuleAlreadySelected { module, held_date } => write!(
                f,
                "Module '{module}' is already selected (held on {held_date})"
            ),
            Self::AlreadyConfirmed => write!(f, "Booking is already confirmed"),
            Self::BookingNotFound { booking_id } => {
                write!(f, "Booking {booking_id} not found for this trainee")
            }
            Self::InvalidBookingStatus { status } => {
                write!(f, "Unrecognized booking status: {status}")
            }
            Self::DateParseError { date_string, error } => {
                write!(f, "Failed to parse date '{date_string}': {error}")
            }
            Self::DateArithmeticOverflow { operation } => {
                write!(f, "Date arithmetic overflow while {operation}")
            }
            Self::InvalidSchedule(msg) => write!(f, "Invalid schedule: {msg}"),
        }
    }
}

impl std::error::Error for DomainError {}
