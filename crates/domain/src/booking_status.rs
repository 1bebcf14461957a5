// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Booking lifecycle states and transitions.
//!
//! A booking is either editable (`Draft`) or locked (`Confirmed`).
//! Confirmation always implies the hour threshold has been met; falling
//! below the threshold re-opens editing.

use crate::error::DomainError;
use crate::validation::REQUIRED_HOURS;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Lifecycle status of an active booking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BookingStatus {
    /// Editable. May not yet meet the hour threshold.
    #[default]
    Draft,
    /// Locked. Meets the hour threshold.
    Confirmed,
}

impl BookingStatus {
    /// Returns the string representation used for persistence and the API.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "DRAFT",
            Self::Confirmed => "CONFIRMED",
        }
    }

    /// Returns the status after a slot has been removed.
    ///
    /// A booking that no longer meets the threshold is demoted to `Draft`;
    /// otherwise the status is kept.
    #[must_use]
    pub const fn after_removal(self, remaining_hours: u32) -> Self {
        if remaining_hours >= REQUIRED_HOURS {
            self
        } else {
            Self::Draft
        }
    }

    /// Confirms a draft booking holding `total_hours`.
    ///
    /// # Errors
    ///
    /// - `DomainError::AlreadyConfirmed` if the booking is already confirmed
    /// - `DomainError::InsufficientHours` if the threshold is not met
    pub const fn confirm(self, total_hours: u32) -> Result<Self, DomainError> {
        match self {
            Self::Confirmed => Err(DomainError::AlreadyConfirmed),
            Self::Draft if total_hours < REQUIRED_HOURS => Err(DomainError::InsufficientHours {
                total_hours,
                required_hours: REQUIRED_HOURS,
            }),
            Self::Draft => Ok(Self::Confirmed),
        }
    }
}

impl FromStr for BookingStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "DRAFT" => Ok(Self::Draft),
            "CONFIRMED" => Ok(Self::Confirmed),
            _ => Err(DomainError::InvalidBookingStatus {
                status: s.to_string(),
            }),
        }
    }
}

impl std::fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
