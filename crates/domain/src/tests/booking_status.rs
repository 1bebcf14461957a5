// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{BookingStatus, DomainError, REQUIRED_HOURS};
use std::str::FromStr;

#[test]
fn test_default_status_is_draft() {
    assert_eq!(BookingStatus::default(), BookingStatus::Draft);
}

#[test]
fn test_status_string_round_trip() {
    for status in [BookingStatus::Draft, BookingStatus::Confirmed] {
        assert_eq!(BookingStatus::from_str(status.as_str()).unwrap(), status);
    }
    assert_eq!(
        serde_json::to_string(&BookingStatus::Confirmed).unwrap(),
        "\"CONFIRMED\""
    );
}

#[test]
fn test_unknown_status_is_rejected() {
    let result = BookingStatus::from_str("CANCELLED");
    assert_eq!(
        result,
        Err(DomainError::InvalidBookingStatus {
            status: String::from("CANCELLED")
        })
    );
}

#[test]
fn test_confirm_requires_threshold() {
    assert_eq!(
        BookingStatus::Draft.confirm(REQUIRED_HOURS - 1),
        Err(DomainError::InsufficientHours {
            total_hours: REQUIRED_HOURS - 1,
            required_hours: REQUIRED_HOURS,
        })
    );
    assert_eq!(
        BookingStatus::Draft.confirm(REQUIRED_HOURS),
        Ok(BookingStatus::Confirmed)
    );
}

#[test]
fn test_confirm_twice_is_rejected() {
    assert_eq!(
        BookingStatus::Confirmed.confirm(REQUIRED_HOURS),
        Err(DomainError::AlreadyConfirmed)
    );
}

#[test]
fn test_removal_below_threshold_demotes() {
    assert_eq!(
        BookingStatus::Confirmed.after_removal(REQUIRED_HOURS - 1),
        BookingStatus::Draft
    );
}

#[test]
fn test_removal_keeping_threshold_keeps_status() {
    assert_eq!(
        BookingStatus::Confirmed.after_removal(REQUIRED_HOURS),
        BookingStatus::Confirmed
    );
    assert_eq!(
        BookingStatus::Draft.after_removal(REQUIRED_HOURS + 1),
        BookingStatus::Draft
    );
}
