// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Capacity ledger arithmetic.
//!
//! Occupancy is always counted by the caller from the authoritative store
//! inside its own transaction. This module only interprets the count.

use crate::error::DomainError;
use crate::types::TrainingDay;
use serde::{Deserialize, Serialize};

/// A training day together with its confirmed occupancy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayOccupancy {
    /// The training day.
    pub training_day: TrainingDay,
    /// Slots on this day owned by confirmed bookings.
    pub confirmed_count: u32,
}

impl DayOccupancy {
    /// Creates a new `DayOccupancy`.
    #[must_use]
    pub const fn new(training_day: TrainingDay, confirmed_count: u32) -> Self {
        Self {
            training_day,
            confirmed_count,
        }
    }

    /// Seats left, never negative.
    ///
    /// Capacity may have been lowered below the current count by an
    /// administrator, so this saturates at zero.
    #[must_use]
    pub const fn remaining_seats(&self) -> u32 {
        self.training_day.capacity.saturating_sub(self.confirmed_count)
    }

    /// True when no confirmed seat is left.
    #[must_use]
    pub const fn is_full(&self) -> bool {
        self.confirmed_count >= self.training_day.capacity
    }

    /// True when the day can be selected right now.
    #[must_use]
    pub const fn is_available(&self) -> bool {
        self.training_day.is_active && !self.training_day.is_gap_day && !self.is_full()
    }
}

/// Checks every requested day for a free confirmed seat, in order.
///
/// # Errors
///
/// Returns `DomainError::DayFull` naming the first full day.
pub fn check_capacity(occupancy: &[DayOccupancy]) -> Result<(), DomainError> {
    match occupancy.iter().find(|o| o.is_full()) {
        Some(full) => Err(DomainError::DayFull {
            training_day_id: full.training_day.training_day_id,
            date: full.training_day.date,
        }),
        None => Ok(()),
    }
}

/// Checks a single day for a free confirmed seat before adding a slot.
///
/// # Errors
///
/// Returns `DomainError::CapacityFull` if the day is full.
pub const fn check_slot_capacity(occupancy: &DayOccupancy) -> Result<(), DomainError> {
    if occupancy.is_full() {
        return Err(DomainError::CapacityFull {
            training_day_id: occupancy.training_day.training_day_id,
            date: occupancy.training_day.date,
        });
    }
    Ok(())
}
